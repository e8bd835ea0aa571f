//! Line assembly in front of the trigger engine.
//!
//! Buffers everything flowing past until a line terminator arrives (a
//! linefeed, a network transition, or a prompt sweep), assembles the line's
//! text, runs the trigger engine over it, then releases the buffered chunks
//! with whatever highlights the actions spliced in.

use std::cell::RefCell;
use std::rc::Rc;

use crate::chunk::{Chunk, ChunkMask, FlowControlCode};
use crate::filter::{Filter, FilterOutput};
use crate::trigger::TriggerEngine;

/// Filter feeding assembled lines to a [`TriggerEngine`].
///
/// Without an engine attached the filter is a pure pass-through.
pub struct TriggerFilter {
    buffer: Vec<Chunk>,
    engine: Option<Rc<RefCell<TriggerEngine>>>,
}

impl TriggerFilter {
    #[must_use]
    pub fn new(engine: Option<Rc<RefCell<TriggerEngine>>>) -> Self {
        Self {
            buffer: Vec::new(),
            engine,
        }
    }

    fn ends_line(chunk: &Chunk) -> bool {
        matches!(
            chunk,
            Chunk::FlowControl(FlowControlCode::Linefeed) | Chunk::Network(_) | Chunk::PromptSweep
        )
    }

    fn assembled_line(&self) -> String {
        let mut line = String::new();
        for chunk in &self.buffer {
            if let Chunk::Text(s) = chunk {
                line.push_str(s);
            }
        }
        line
    }

    fn flush_line(&mut self, out: &mut FilterOutput) {
        if let Some(engine) = &self.engine {
            let line = self.assembled_line();
            if !line.is_empty() {
                engine.borrow_mut().process_line(&line, &mut self.buffer);
            }
        }
        for chunk in self.buffer.drain(..) {
            out.emit(chunk);
        }
    }
}

impl Filter for TriggerFilter {
    fn relevant_types(&self) -> ChunkMask {
        if self.engine.is_some() {
            ChunkMask::all() - ChunkMask::PACKET_BOUNDARY
        } else {
            ChunkMask::empty()
        }
    }

    fn process(&mut self, chunk: Chunk, out: &mut FilterOutput) {
        let terminal = Self::ends_line(&chunk);
        self.buffer.push(chunk);
        if terminal {
            self.flush_line(out);
        }
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::NetworkState;
    use crate::config::TriggerSpec;
    use crate::format::FormatDelta;
    use crate::trigger::{ActionParams, PatternKind};

    fn engine_with_highlight(pattern: &str, token: &str, format: &str) -> Rc<RefCell<TriggerEngine>> {
        let mut engine = TriggerEngine::without_builtins();
        let mut params = ActionParams::new();
        params.insert(token.to_string(), format.to_string());
        engine
            .add_spec(&TriggerSpec {
                patterns: vec![(PatternKind::Smart, pattern.to_string())],
                actions: vec![("highlights".to_string(), params)],
            })
            .unwrap();
        Rc::new(RefCell::new(engine))
    }

    fn feed(filter: &mut TriggerFilter, chunks: Vec<Chunk>) -> Vec<Chunk> {
        let mut emitted = Vec::new();
        for chunk in chunks {
            let mut out = FilterOutput::default();
            filter.process(chunk, &mut out);
            let (chunks, postponed) = out.into_parts();
            assert!(postponed.is_none());
            emitted.extend(chunks);
        }
        emitted
    }

    #[test]
    fn test_buffers_until_linefeed() {
        let engine = engine_with_highlight("[n] waves", "n", "bold");
        let mut filter = TriggerFilter::new(Some(engine));
        assert!(feed(&mut filter, vec![Chunk::Text("Bob".into())]).is_empty());
        let out = feed(
            &mut filter,
            vec![
                Chunk::Text(" waves".into()),
                Chunk::FlowControl(FlowControlCode::Linefeed),
            ],
        );
        assert_eq!(
            out,
            vec![
                Chunk::Highlight(1, FormatDelta::bold(true)),
                Chunk::Text("Bob".into()),
                Chunk::Highlight(1, FormatDelta::new()),
                Chunk::Text(" waves".into()),
                Chunk::FlowControl(FlowControlCode::Linefeed),
            ]
        );
    }

    #[test]
    fn test_prompt_sweep_terminates_line() {
        let engine = engine_with_highlight("[w]>", "w", "italic");
        let mut filter = TriggerFilter::new(Some(engine));
        let out = feed(
            &mut filter,
            vec![Chunk::Text("hp>".into()), Chunk::PromptSweep],
        );
        assert_eq!(out.last(), Some(&Chunk::PromptSweep));
        assert!(
            out.iter()
                .any(|c| matches!(c, Chunk::Highlight(_, d) if !d.is_empty()))
        );
    }

    #[test]
    fn test_network_transition_terminates_line() {
        let engine = engine_with_highlight("bye", "x", "bold");
        let mut filter = TriggerFilter::new(Some(engine));
        let out = feed(
            &mut filter,
            vec![
                Chunk::Text("partial".into()),
                Chunk::Network(NetworkState::Disconnected),
            ],
        );
        assert_eq!(out.last(), Some(&Chunk::Network(NetworkState::Disconnected)));
        assert!(out.contains(&Chunk::Text("partial".into())));
    }

    #[test]
    fn test_empty_line_skips_engine() {
        let engine = engine_with_highlight("*", "x", "bold");
        let mut filter = TriggerFilter::new(Some(engine));
        let out = feed(
            &mut filter,
            vec![Chunk::FlowControl(FlowControlCode::Linefeed)],
        );
        assert_eq!(out, vec![Chunk::FlowControl(FlowControlCode::Linefeed)]);
    }

    #[test]
    fn test_carriage_return_does_not_terminate() {
        let engine = engine_with_highlight("abc", "x", "bold");
        let mut filter = TriggerFilter::new(Some(engine));
        let out = feed(
            &mut filter,
            vec![
                Chunk::Text("ab".into()),
                Chunk::FlowControl(FlowControlCode::CarriageReturn),
            ],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_engine_passes_through() {
        let filter = TriggerFilter::new(None);
        assert_eq!(filter.relevant_types(), ChunkMask::empty());
    }

    #[test]
    fn test_reset_drops_buffered_chunks() {
        let engine = engine_with_highlight("abc", "x", "bold");
        let mut filter = TriggerFilter::new(Some(engine));
        feed(&mut filter, vec![Chunk::Text("abc".into())]);
        filter.reset();
        let out = feed(
            &mut filter,
            vec![Chunk::FlowControl(FlowControlCode::Linefeed)],
        );
        assert_eq!(out, vec![Chunk::FlowControl(FlowControlCode::Linefeed)]);
    }
}
