//! Pipeline and trigger configuration.

use std::time::Duration;

use crate::trigger::{ActionParams, PatternKind};

/// Ingress block size, in bytes, for [`crate::pipeline::Pipeline::feed_bytes`].
pub const DEFAULT_BLOCK_SIZE: usize = 2048;

/// Inter-packet silence after which a trailing partial line is treated as a
/// prompt.
pub const DEFAULT_PROMPT_TIMEOUT: Duration = Duration::from_millis(700);

/// Tunables for a pipeline instance.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Encoding label for the decoding stage ("latin1", "utf-8", ...).
    pub encoding: String,
    /// Maximum bytes per ingress packet.
    pub block_size: usize,
    /// Silence before a prompt sweep fires.
    pub prompt_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            encoding: crate::filters::unicode::DEFAULT_ENCODING.to_string(),
            block_size: DEFAULT_BLOCK_SIZE,
            prompt_timeout: DEFAULT_PROMPT_TIMEOUT,
        }
    }
}

/// A settings-level trigger definition: patterns plus named actions with
/// their parameters, compiled via
/// [`crate::trigger::TriggerEngine::add_spec`].
#[derive(Clone, Debug, Default)]
pub struct TriggerSpec {
    pub patterns: Vec<(PatternKind, String)>,
    pub actions: Vec<(String, ActionParams)>,
}
