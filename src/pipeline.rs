//! The pipeline driver: filter chain, sink table, prompt timer.
//!
//! Sans-IO and single-threaded. The host owns the socket and the event
//! loop; it hands ingress packets to [`Pipeline::feed_bytes`], polls
//! [`Pipeline::prompt_deadline`] to schedule the prompt timer, and passes
//! outbound input through [`Pipeline::format_outbound`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crate::bus::{ListenerHandle, Notification, NotificationBus};
use crate::chunk::{Chunk, ChunkMask, PacketEdge};
use crate::config::PipelineConfig;
use crate::filter::{Filter, Stage};
use crate::filters::{AnsiFilter, FlowControlFilter, TelnetFilter, TriggerFilter, UnicodeFilter};
use crate::trigger::TriggerEngine;

/// Receiver for chunks leaving the pipeline.
///
/// `flush_begin`/`flush_end` bracket every drain so batching sinks can open
/// and close an edit block.
pub trait Sink {
    fn chunk(&mut self, chunk: &Chunk);
    fn flush_begin(&mut self) {}
    fn flush_end(&mut self) {}
}

impl<F: FnMut(&Chunk)> Sink for F {
    fn chunk(&mut self, chunk: &Chunk) {
        self(chunk);
    }
}

/// The filter chain plus everything downstream of it.
pub struct Pipeline {
    stages: Vec<Stage>,
    scratch: Vec<Chunk>,
    sinks: Vec<(ChunkMask, Box<dyn Sink>)>,
    bus: NotificationBus,
    config: PipelineConfig,
    prompt_deadline: Option<Instant>,
}

impl Pipeline {
    /// An empty pipeline; chunks pass straight to the sinks.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            stages: Vec::new(),
            scratch: Vec::new(),
            sinks: Vec::new(),
            bus: NotificationBus::new(),
            config,
            prompt_deadline: None,
        }
    }

    /// The standard chain: telnet, ANSI, decoding, flow control, triggers.
    #[must_use]
    pub fn with_defaults(
        config: PipelineConfig,
        engine: Option<Rc<RefCell<TriggerEngine>>>,
    ) -> Self {
        let mut pipeline = Self::new(config);
        pipeline.add_filter(Box::new(TelnetFilter::new()));
        pipeline.add_filter(Box::new(AnsiFilter::new()));
        let encoding = pipeline.config.encoding.clone();
        pipeline.add_filter(Box::new(UnicodeFilter::new(&encoding)));
        pipeline.add_filter(Box::new(FlowControlFilter::new()));
        pipeline.add_filter(Box::new(TriggerFilter::new(engine)));
        pipeline
    }

    /// Append a filter to the end of the chain.
    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.stages.push(Stage::new(filter));
    }

    /// Register a sink for chunks whose tag bit is in `mask`.
    pub fn add_sink(&mut self, sink: Box<dyn Sink>, mask: ChunkMask) {
        self.sinks.push((mask, sink));
    }

    /// Register a sink receiving every chunk type.
    pub fn add_sink_all(&mut self, sink: Box<dyn Sink>) {
        self.add_sink(sink, ChunkMask::all());
    }

    /// Feed one ingress packet, split into blocks for responsiveness, and
    /// arm the prompt timer.
    pub fn feed_bytes(&mut self, packet: &[u8]) {
        for block in packet.chunks(self.config.block_size.max(1)) {
            self.feed_chunk(Chunk::PacketBoundary(PacketEdge::Start), false);
            self.feed_chunk(Chunk::Bytes(block.to_vec()), false);
            self.feed_chunk(Chunk::PacketBoundary(PacketEdge::End), true);
        }
        self.prompt_deadline = Some(Instant::now() + self.config.prompt_timeout);
    }

    /// When the prompt timer should fire, if armed. The host's event loop
    /// schedules a wakeup for this instant.
    #[must_use]
    pub fn prompt_deadline(&self) -> Option<Instant> {
        self.prompt_deadline
    }

    /// Fire the prompt sweep if the armed deadline has passed.
    pub fn poll_prompt(&mut self, now: Instant) -> bool {
        match self.prompt_deadline {
            Some(deadline) if now >= deadline => {
                self.sweep_prompt();
                true
            }
            _ => false,
        }
    }

    /// Feed a `PromptSweep` so filters can treat a trailing partial line as
    /// a prompt. Disarms the timer.
    pub fn sweep_prompt(&mut self) {
        self.prompt_deadline = None;
        self.feed_chunk(Chunk::PromptSweep, true);
    }

    /// Enqueue one chunk into the head of the chain. With `autoflush`, the
    /// scratch buffer is drained to the sinks after the chain settles.
    pub fn feed_chunk(&mut self, chunk: Chunk, autoflush: bool) {
        let mut current = vec![chunk];
        let mut next = Vec::new();
        for stage in &mut self.stages {
            for chunk in current.drain(..) {
                stage.feed(chunk, &mut next);
            }
            std::mem::swap(&mut current, &mut next);
        }
        self.scratch.extend(current);
        if autoflush {
            self.flush();
        }
    }

    /// Drain the scratch buffer through the sink table, in chunk order,
    /// bracketed by `flush_begin`/`flush_end`.
    pub fn flush(&mut self) {
        if self.scratch.is_empty() {
            return;
        }
        for (_, sink) in &mut self.sinks {
            sink.flush_begin();
        }
        for chunk in self.scratch.drain(..) {
            let bit = ChunkMask::from(chunk.tag());
            for (mask, sink) in &mut self.sinks {
                if mask.contains(bit) {
                    sink.chunk(&chunk);
                }
            }
        }
        for (_, sink) in &mut self.sinks {
            sink.flush_end();
        }
    }

    /// Transform outbound data through the chain in reverse order.
    #[must_use]
    pub fn format_outbound(&self, data: Vec<u8>) -> Vec<u8> {
        self.stages
            .iter()
            .rev()
            .fold(data, |data, stage| stage.filter().format_outbound(data))
    }

    /// Deliver a named notification to every filter and bus listener.
    pub fn notify(&mut self, name: &str, value: &str) {
        let note = Notification { name, value };
        for stage in &mut self.stages {
            stage.filter_mut().on_notification(&note);
        }
        self.bus.emit(&note);
    }

    /// Subscribe to a named notification on the pipeline bus.
    #[must_use]
    pub fn listen<F>(&mut self, name: &str, callback: F) -> ListenerHandle
    where
        F: Fn(&str) + 'static,
    {
        self.bus.listen(name, callback)
    }

    /// Reset every filter and drop all buffered state (called on reconnect).
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        self.scratch.clear();
        self.prompt_deadline = None;
    }
}
