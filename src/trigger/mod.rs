//! The trigger engine: pattern matching with chunk-buffer side effects.
//!
//! The triggers filter hands the engine each assembled line together with
//! the chunk buffer that produced it. The engine runs every match group's
//! patterns over the line and, for each match, invokes the group's actions,
//! which may splice highlight chunks into the buffer or empty it entirely.

pub mod action;
pub mod pattern;
pub mod splice;

use std::collections::{BTreeMap, BTreeSet};

use crate::chunk::{Chunk, HighlightId};
use crate::config::TriggerSpec;
use crate::error::{Error, Result};

pub use action::{ActionParams, ActionRegistry, TriggerAction};
pub use pattern::{Pattern, PatternKind};

/// Allocator for highlight open/close pair identifiers.
#[derive(Debug, Default)]
pub struct HighlightIds {
    next: HighlightId,
}

impl HighlightIds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> HighlightId {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

/// One match handed to an action: the line, the whole-match span, and the
/// named token spans (byte offsets into the line).
pub struct MatchContext<'a> {
    pub line: &'a str,
    pub whole: (usize, usize),
    pub spans: BTreeMap<String, (usize, usize)>,
}

/// An ordered list of patterns sharing an ordered list of actions.
pub struct MatchGroup {
    patterns: Vec<Pattern>,
    actions: Vec<Box<dyn TriggerAction>>,
}

impl MatchGroup {
    #[must_use]
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: Box<dyn TriggerAction>) -> Self {
        self.actions.push(action);
        self
    }
}

/// The engine: match groups plus the action factory registry.
pub struct TriggerEngine {
    groups: Vec<MatchGroup>,
    registry: ActionRegistry,
    ids: HighlightIds,
}

impl TriggerEngine {
    /// Engine with the built-in URL-link group installed.
    #[must_use]
    pub fn new() -> Self {
        let mut engine = Self::without_builtins();
        engine.groups.push(url_group());
        engine
    }

    /// Engine with no groups at all.
    #[must_use]
    pub fn without_builtins() -> Self {
        Self {
            groups: Vec::new(),
            registry: ActionRegistry::with_builtins(),
            ids: HighlightIds::new(),
        }
    }

    /// Access the action registry, e.g. to register plugin actions.
    pub fn registry_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }

    /// Append a programmatically built group.
    pub fn add_group(&mut self, group: MatchGroup) {
        self.groups.push(group);
    }

    /// Remove all groups, including the built-in ones.
    pub fn clear_groups(&mut self) {
        self.groups.clear();
    }

    /// Number of installed groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Compile a settings-level trigger definition into a group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] for an uncompilable pattern and
    /// [`Error::InvalidFormat`] when an action factory rejects its
    /// parameters.
    pub fn add_spec(&mut self, spec: &TriggerSpec) -> Result<()> {
        let mut patterns = Vec::with_capacity(spec.patterns.len());
        for (kind, source) in &spec.patterns {
            patterns.push(Pattern::compile(*kind, source)?);
        }
        let mut group = MatchGroup::new(patterns);
        for (name, params) in &spec.actions {
            let action = self
                .registry
                .create(name, params)
                .map_err(Error::InvalidFormat)?;
            group.actions.push(action);
        }
        self.groups.push(group);
        Ok(())
    }

    /// Run every group over one assembled line, mutating `buffer` through
    /// the matched actions.
    pub fn process_line(&mut self, line: &str, buffer: &mut Vec<Chunk>) {
        let Self { groups, ids, .. } = self;
        let mut fired: BTreeSet<&'static str> = BTreeSet::new();

        for group in groups.iter() {
            for pattern in &group.patterns {
                for captures in pattern.regex().captures_iter(line) {
                    let Ok(captures) = captures else {
                        // Backtracking blow-up or similar: skip this match.
                        continue;
                    };
                    let Some(whole) = captures.get(0) else {
                        continue;
                    };
                    let mut spans = BTreeMap::new();
                    for token in pattern.tokens() {
                        if let Some(m) = captures.name(token) {
                            spans.insert(token.clone(), (m.start(), m.end()));
                        }
                    }
                    let ctx = MatchContext {
                        line,
                        whole: (whole.start(), whole.end()),
                        spans,
                    };
                    for trigger_action in &group.actions {
                        if !trigger_action.multiple_matches_per_line()
                            && fired.contains(trigger_action.name())
                        {
                            continue;
                        }
                        fired.insert(trigger_action.name());
                        trigger_action.apply(&ctx, buffer, ids);
                    }
                }
            }
        }
    }
}

impl Default for TriggerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The default group linking HTTP/HTTPS and bare-IP URLs.
fn url_group() -> MatchGroup {
    let pattern = Pattern::compile(
        PatternKind::Regex,
        r#"\bhttps?://[^\s<>"']+|\b(?:\d{1,3}\.){3}\d{1,3}(?::\d{1,5})?\b"#,
    )
    .expect("built-in URL pattern compiles");
    MatchGroup::new(vec![pattern]).with_action(Box::new(action::LinkAction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::FlowControlCode;
    use crate::format::{FormatDelta, FormatProperty, FormatValue};

    fn text_buffer(line: &str) -> Vec<Chunk> {
        vec![Chunk::Text(line.to_string())]
    }

    fn highlight_events(buffer: &[Chunk]) -> Vec<(HighlightId, bool)> {
        buffer
            .iter()
            .filter_map(|c| match c {
                Chunk::Highlight(id, d) => Some((*id, d.is_empty())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_builtin_url_group_links() {
        let mut engine = TriggerEngine::new();
        let line = "read http://example.com/page today";
        let mut buffer = text_buffer(line);
        engine.process_line(line, &mut buffer);

        let events = highlight_events(&buffer);
        assert_eq!(events.len(), 2);
        let open = buffer
            .iter()
            .find_map(|c| match c {
                Chunk::Highlight(_, d) if !d.is_empty() => Some(d),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            open.get(FormatProperty::Href),
            Some(&Some(FormatValue::Url(
                "http://example.com/page".to_string()
            )))
        );
    }

    #[test]
    fn test_builtin_ip_url() {
        let mut engine = TriggerEngine::new();
        let line = "connect to 10.0.0.1:4201 now";
        let mut buffer = text_buffer(line);
        engine.process_line(line, &mut buffer);
        let open = buffer
            .iter()
            .find_map(|c| match c {
                Chunk::Highlight(_, d) if !d.is_empty() => Some(d),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            open.get(FormatProperty::Href),
            Some(&Some(FormatValue::Url("10.0.0.1:4201".to_string())))
        );
    }

    #[test]
    fn test_no_match_leaves_buffer_alone() {
        let mut engine = TriggerEngine::new();
        let line = "nothing interesting here";
        let mut buffer = text_buffer(line);
        engine.process_line(line, &mut buffer);
        assert_eq!(buffer, text_buffer(line));
    }

    #[test]
    fn test_spec_compiles_highlight_group() {
        let mut engine = TriggerEngine::without_builtins();
        let mut params = ActionParams::new();
        params.insert("player".to_string(), "bold; color: #ffffff".to_string());
        let spec = TriggerSpec {
            patterns: vec![(PatternKind::Smart, "[player] pages: *".to_string())],
            actions: vec![("highlights".to_string(), params)],
        };
        engine.add_spec(&spec).unwrap();

        let line = "Alice pages: hi";
        let mut buffer = text_buffer(line);
        engine.process_line(line, &mut buffer);

        let events = highlight_events(&buffer);
        assert_eq!(events.len(), 2);
        // "Alice" ends up isolated between the pair.
        let texts: Vec<&str> = buffer
            .iter()
            .filter_map(|c| match c {
                Chunk::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Alice", " pages: hi"]);
    }

    #[test]
    fn test_spec_bad_pattern_errors() {
        let mut engine = TriggerEngine::without_builtins();
        let spec = TriggerSpec {
            patterns: vec![(PatternKind::Regex, "(open".to_string())],
            actions: vec![],
        };
        assert!(matches!(engine.add_spec(&spec), Err(Error::Pattern { .. })));
    }

    #[test]
    fn test_spec_bad_action_errors() {
        let mut engine = TriggerEngine::without_builtins();
        let spec = TriggerSpec {
            patterns: vec![(PatternKind::Smart, "*".to_string())],
            actions: vec![("gong".to_string(), ActionParams::new())],
        };
        assert!(matches!(
            engine.add_spec(&spec),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_gag_fires_once_per_line() {
        struct CountingGag(std::rc::Rc<std::cell::RefCell<usize>>);
        impl TriggerAction for CountingGag {
            fn name(&self) -> &'static str {
                "gag"
            }
            fn multiple_matches_per_line(&self) -> bool {
                false
            }
            fn apply(
                &self,
                _ctx: &MatchContext<'_>,
                _buffer: &mut Vec<Chunk>,
                _ids: &mut HighlightIds,
            ) {
                *self.0.borrow_mut() += 1;
            }
        }

        let count = std::rc::Rc::new(std::cell::RefCell::new(0));
        let mut engine = TriggerEngine::without_builtins();
        let pattern = Pattern::compile(PatternKind::Smart, "spam").unwrap();
        engine.add_group(
            MatchGroup::new(vec![pattern]).with_action(Box::new(CountingGag(count.clone()))),
        );

        let line = "spam spam spam";
        let mut buffer = text_buffer(line);
        engine.process_line(line, &mut buffer);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_gag_empties_line_chunks() {
        let mut engine = TriggerEngine::without_builtins();
        let pattern = Pattern::compile(PatternKind::Smart, "secret").unwrap();
        engine.add_group(
            MatchGroup::new(vec![pattern]).with_action(Box::new(action::GagAction)),
        );

        let line = "a secret thing";
        let mut buffer = vec![
            Chunk::Ansi(FormatDelta::bold(true)),
            Chunk::Text(line.to_string()),
            Chunk::FlowControl(FlowControlCode::Linefeed),
        ];
        engine.process_line(line, &mut buffer);
        assert_eq!(buffer, vec![Chunk::Ansi(FormatDelta::bold(true))]);
    }

    #[test]
    fn test_highlight_after_gag_degrades_to_noop() {
        // A gag in an earlier group empties the line; a highlight group
        // matching the same line must not resurrect text or abort.
        let mut engine = TriggerEngine::without_builtins();
        let gag = Pattern::compile(PatternKind::Smart, "spoiler").unwrap();
        engine.add_group(
            MatchGroup::new(vec![gag]).with_action(Box::new(action::GagAction)),
        );
        let mut params = ActionParams::new();
        params.insert(action::LINE_TOKEN.to_string(), "bold".to_string());
        let spec = TriggerSpec {
            patterns: vec![(PatternKind::Smart, "ahead".to_string())],
            actions: vec![("highlights".to_string(), params)],
        };
        engine.add_spec(&spec).unwrap();

        let line = "spoiler ahead";
        let mut buffer = vec![
            Chunk::Text(line.to_string()),
            Chunk::FlowControl(FlowControlCode::CarriageReturn),
            Chunk::FlowControl(FlowControlCode::Linefeed),
        ];
        engine.process_line(line, &mut buffer);

        assert!(!buffer.iter().any(|c| matches!(c, Chunk::Text(_))));
        let events = highlight_events(&buffer);
        // The pair lands harmlessly at the end of the gagged buffer.
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, events[1].0);
        assert!(!events[0].1);
        assert!(events[1].1);
    }

    #[test]
    fn test_multiple_matches_highlight_all() {
        let mut engine = TriggerEngine::without_builtins();
        let mut params = ActionParams::new();
        params.insert("n".to_string(), "bold".to_string());
        let spec = TriggerSpec {
            patterns: vec![(PatternKind::Regex, r"(?P<n>\d+)".to_string())],
            actions: vec![("highlights".to_string(), params)],
        };
        engine.add_spec(&spec).unwrap();

        let line = "roll 12 and 37";
        let mut buffer = text_buffer(line);
        engine.process_line(line, &mut buffer);
        // Two matches, a pair each.
        assert_eq!(highlight_events(&buffer).len(), 4);
    }

    #[test]
    fn test_highlight_ids_unique() {
        let mut ids = HighlightIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }
}
