//! Layered format resolution for a text-rendering sink.
//!
//! The stack keeps an ordered list of format layers. Two static layers sit
//! at the bottom: `Base` (the app-configured default) and `Ansi` (the
//! accumulated ANSI state). Highlights push ephemeral layers on top. When a
//! layer changes, each touched property is re-resolved topmost-wins and
//! pushed into a [`FormatTarget`], so an open highlight overrides the ANSI
//! color without destroying it.

use std::collections::BTreeSet;

use crate::chunk::HighlightId;
use crate::format::{FormatDelta, FormatProperty, FormatTarget};

/// Identity of one layer in the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerId {
    Base,
    Ansi,
    Ephemeral(HighlightId),
}

impl LayerId {
    fn is_static(self) -> bool {
        matches!(self, Self::Base | Self::Ansi)
    }
}

/// Ordered format layers with topmost-wins resolution.
pub struct FormatStack {
    layers: Vec<(LayerId, FormatDelta)>,
}

impl FormatStack {
    /// A stack with empty `Base` and `Ansi` layers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: vec![
                (LayerId::Base, FormatDelta::new()),
                (LayerId::Ansi, FormatDelta::new()),
            ],
        }
    }

    /// Apply a delta to the layer `id`, resolving every touched property
    /// into `target`.
    ///
    /// The empty delta clears a static layer's slot and pops an ephemeral
    /// layer entirely; this is how `Ansi({})` resets and `Highlight(id, {})`
    /// closes.
    pub fn apply(&mut self, target: &mut dyn FormatTarget, id: LayerId, delta: &FormatDelta) {
        let mut touched: BTreeSet<FormatProperty> = delta.properties().collect();
        let position = self.layers.iter().position(|(l, _)| *l == id);

        if delta.is_empty() {
            if let Some(i) = position {
                touched.extend(self.layers[i].1.properties());
                if id.is_static() {
                    self.layers[i].1 = FormatDelta::new();
                } else {
                    self.layers.remove(i);
                }
            }
        } else {
            match position {
                Some(i) => self.layers[i].1.merge(delta),
                None => self.layers.push((id, delta.clone())),
            }
        }

        for property in touched {
            self.refresh_property(target, property);
        }
    }

    /// Re-resolve one property: the topmost layer that sets it wins; with no
    /// setter the property is cleared.
    pub fn refresh_property(&self, target: &mut dyn FormatTarget, property: FormatProperty) {
        for (_, delta) in self.layers.iter().rev() {
            match delta.get(property) {
                Some(Some(value)) => {
                    target.set_property(property, value);
                    return;
                }
                // An unset entry in a layer does not veto lower layers; it
                // only removes the key from that layer's own contribution.
                Some(None) | None => {}
            }
        }
        target.clear_property(property);
    }

    /// Overwrite the base layer and re-resolve everything it touched.
    pub fn set_base(&mut self, target: &mut dyn FormatTarget, delta: FormatDelta) {
        let mut touched: BTreeSet<FormatProperty> = delta.properties().collect();
        touched.extend(self.layers[0].1.properties());
        self.layers[0].1 = delta;
        for property in touched {
            self.refresh_property(target, property);
        }
    }

    /// Number of layers, static ones included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl Default for FormatStack {
    fn default() -> Self {
        Self::new()
    }
}
