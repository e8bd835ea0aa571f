//! Trigger actions: what happens when a pattern matches a line.
//!
//! Actions are trait objects created through a factory registry so that
//! settings-driven trigger definitions (and plugins) can instantiate them by
//! name from string parameters.

use std::collections::BTreeMap;

use crate::chunk::Chunk;
use crate::color::Rgb;
use crate::event::{PLAY_SOUND, emit_event};
use crate::format::{FormatDelta, FormatProperty, FormatValue};
use crate::trigger::splice::{Insertion, splice};
use crate::trigger::{HighlightIds, MatchContext};

/// Pseudo-token addressing the whole match span in a `highlights` action.
pub const LINE_TOKEN: &str = "__line__";

/// Color applied to spans wrapped by the `link` action.
pub const LINK_COLOR: Rgb = Rgb::new(0x00, 0x00, 0xFF);

/// String parameters an action factory is built from.
pub type ActionParams = BTreeMap<String, String>;

/// Factory signature: build an action or explain why the parameters are
/// unusable.
pub type ActionFactory = fn(&ActionParams) -> std::result::Result<Box<dyn TriggerAction>, String>;

/// A side effect to run against a matched line's chunk buffer.
pub trait TriggerAction {
    /// Registry name of the action class.
    fn name(&self) -> &'static str;

    /// Whether the action may fire more than once per line. The dispatcher
    /// skips repeat invocations for classes answering `false`.
    fn multiple_matches_per_line(&self) -> bool {
        true
    }

    /// Apply the action for one match.
    fn apply(&self, ctx: &MatchContext<'_>, buffer: &mut Vec<Chunk>, ids: &mut HighlightIds);
}

/// Registry mapping action names to factories.
pub struct ActionRegistry {
    factories: BTreeMap<String, ActionFactory>,
}

impl ActionRegistry {
    /// Registry with the four built-in actions.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };
        registry.register("highlights", HighlightAction::factory);
        registry.register("play", PlayAction::factory);
        registry.register("gag", GagAction::factory);
        registry.register("link", LinkAction::factory);
        registry
    }

    /// Register (or replace) a factory under a name.
    pub fn register(&mut self, name: &str, factory: ActionFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    /// Instantiate an action by name.
    ///
    /// # Errors
    ///
    /// Returns a message when the name is unknown or the factory rejects
    /// the parameters.
    pub fn create(
        &self,
        name: &str,
        params: &ActionParams,
    ) -> std::result::Result<Box<dyn TriggerAction>, String> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| format!("unknown action: {name}"))?;
        factory(params)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Wrap matched token spans in highlight chunk pairs.
pub struct HighlightAction {
    highlights: BTreeMap<String, FormatDelta>,
}

impl HighlightAction {
    #[must_use]
    pub fn new(highlights: BTreeMap<String, FormatDelta>) -> Self {
        Self { highlights }
    }

    /// Build from parameters mapping token names to format description
    /// strings (`"bold; color: #ffffff"`).
    pub fn factory(params: &ActionParams) -> std::result::Result<Box<dyn TriggerAction>, String> {
        let mut highlights = BTreeMap::new();
        for (token, format) in params {
            let delta = FormatDelta::parse(format).map_err(|e| e.to_string())?;
            if delta.is_empty() {
                return Err(format!("empty highlight format for token {token:?}"));
            }
            highlights.insert(token.clone(), delta);
        }
        if highlights.is_empty() {
            return Err("highlights action needs at least one token".to_string());
        }
        Ok(Box::new(Self::new(highlights)))
    }
}

impl TriggerAction for HighlightAction {
    fn name(&self) -> &'static str {
        "highlights"
    }

    fn apply(&self, ctx: &MatchContext<'_>, buffer: &mut Vec<Chunk>, ids: &mut HighlightIds) {
        // Collect (span, delta) for every token with a non-empty span.
        let mut spans: Vec<((usize, usize), &FormatDelta)> = Vec::new();
        for (token, delta) in &self.highlights {
            let span = if token == LINE_TOKEN {
                Some(ctx.whole)
            } else {
                ctx.spans.get(token).copied()
            };
            if let Some(span) = span {
                if span.0 < span.1 {
                    spans.push((span, delta));
                }
            }
        }
        if spans.is_empty() {
            return;
        }

        // One open/close pair per span, spliced in a single ascending pass.
        // At shared offsets: closes before opens, outer opens before inner,
        // inner closes before outer, so distinct ids nest instead of
        // interleaving.
        let mut insertions: Vec<(usize, u8, usize, Chunk)> = Vec::new();
        for ((start, end), delta) in spans {
            let id = ids.next_id();
            insertions.push((
                start,
                1,
                usize::MAX - end,
                Chunk::Highlight(id, (*delta).clone()),
            ));
            insertions.push((
                end,
                0,
                usize::MAX - start,
                Chunk::Highlight(id, FormatDelta::new()),
            ));
        }
        insertions.sort_by(|a, b| (a.0, a.1, a.2).cmp(&(b.0, b.1, b.2)));
        splice(
            buffer,
            insertions
                .into_iter()
                .map(|(offset, _, _, chunk)| Insertion { offset, chunk })
                .collect(),
        );
    }
}

/// Ask the application to play a sound file (at most once per line).
pub struct PlayAction {
    file: String,
}

impl PlayAction {
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }

    pub fn factory(params: &ActionParams) -> std::result::Result<Box<dyn TriggerAction>, String> {
        let file = params
            .get("file")
            .ok_or_else(|| "play action needs a \"file\" parameter".to_string())?;
        Ok(Box::new(Self::new(file.clone())))
    }
}

impl TriggerAction for PlayAction {
    fn name(&self) -> &'static str {
        "play"
    }

    fn multiple_matches_per_line(&self) -> bool {
        false
    }

    fn apply(&self, _ctx: &MatchContext<'_>, _buffer: &mut Vec<Chunk>, _ids: &mut HighlightIds) {
        emit_event(PLAY_SOUND, &self.file);
    }
}

/// Suppress the matched line: drop its text, flow control, and highlights.
pub struct GagAction;

impl GagAction {
    pub fn factory(_params: &ActionParams) -> std::result::Result<Box<dyn TriggerAction>, String> {
        Ok(Box::new(Self))
    }
}

impl TriggerAction for GagAction {
    fn name(&self) -> &'static str {
        "gag"
    }

    fn multiple_matches_per_line(&self) -> bool {
        false
    }

    fn apply(&self, _ctx: &MatchContext<'_>, buffer: &mut Vec<Chunk>, _ids: &mut HighlightIds) {
        buffer.retain(|chunk| {
            !matches!(
                chunk,
                Chunk::Text(_) | Chunk::FlowControl(_) | Chunk::Highlight(..)
            )
        });
    }
}

/// Wrap the match span in a clickable-link highlight.
pub struct LinkAction;

impl LinkAction {
    pub fn factory(_params: &ActionParams) -> std::result::Result<Box<dyn TriggerAction>, String> {
        Ok(Box::new(Self))
    }
}

impl TriggerAction for LinkAction {
    fn name(&self) -> &'static str {
        "link"
    }

    fn apply(&self, ctx: &MatchContext<'_>, buffer: &mut Vec<Chunk>, ids: &mut HighlightIds) {
        let (start, end) = ctx.whole;
        if start >= end {
            return;
        }
        let url = &ctx.line[start..end];
        let mut delta = FormatDelta::new();
        delta.set(FormatProperty::Href, FormatValue::Url(url.to_string()));
        delta.set(FormatProperty::Underline, FormatValue::Flag(true));
        delta.set(FormatProperty::Color, FormatValue::Color(LINK_COLOR));
        crate::trigger::splice::splice_highlight(buffer, ids.next_id(), delta, start, end);
    }
}
