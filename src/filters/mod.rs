//! The built-in filter chain, in pipeline order: telnet, ANSI, decoding,
//! flow control, triggers.

pub mod ansi;
pub mod flow;
pub mod telnet;
pub mod trigger;
pub mod unicode;

pub use ansi::AnsiFilter;
pub use flow::FlowControlFilter;
pub use telnet::TelnetFilter;
pub use trigger::TriggerFilter;
pub use unicode::UnicodeFilter;
