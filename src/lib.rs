//! Spyrit - MUD client input pipeline
//!
//! A chunk-based processing pipeline for MUD/MUSH server output: telnet
//! command stripping, ANSI/SGR interpretation, incremental charset
//! decoding, line-structure extraction, and trigger matching with
//! highlight splicing. Sans-IO: the host owns the socket and event loop.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow FlowControlFilter etc
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod bus;
pub mod chunk;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod filters;
pub mod format;
pub mod format_stack;
pub mod palette;
pub mod pipeline;
pub mod trigger;

// Re-export core types at crate root
pub use bus::{ENCODING_CHANGED, Notification, NotificationBus};
pub use chunk::{Chunk, ChunkMask, ChunkTag, FlowControlCode, HighlightId, NetworkState, PacketEdge};
pub use color::{ColorPair, Rgb};
pub use config::{PipelineConfig, TriggerSpec};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use filter::{Filter, FilterOutput};
pub use format::{FormatDelta, FormatProperty, FormatTarget, FormatValue, ResolvedFormat};
pub use format_stack::{FormatStack, LayerId};
pub use pipeline::{Pipeline, Sink};

// Re-export trigger types
pub use trigger::{MatchGroup, Pattern, PatternKind, TriggerEngine};
