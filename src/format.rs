//! Format properties and deltas.
//!
//! A [`FormatDelta`] is the payload of `Ansi` and `Highlight` chunks: an
//! ordered mapping from property to value-or-unset. Applying a delta to a
//! format state replaces the listed keys; an unset entry removes a key. The
//! *empty* delta is special by convention: it means "reset everything" on an
//! `Ansi` chunk and "close this highlight" on a `Highlight` chunk.

use std::collections::BTreeMap;
use std::fmt;

use crate::color::Rgb;
use crate::error::{Error, Result};

/// The closed set of styling properties a delta can touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatProperty {
    Bold,
    Italic,
    Underline,
    Blink,
    Reversed,
    Color,
    Background,
    Href,
}

/// The value carried for a property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatValue {
    Flag(bool),
    Color(Rgb),
    Url(String),
}

impl fmt::Display for FormatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::Url(u) => write!(f, "{u}"),
        }
    }
}

/// A mapping from property to value-or-unset.
///
/// `Some(value)` entries set the property; `None` entries remove it from the
/// state the delta is applied to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatDelta {
    entries: BTreeMap<FormatProperty, Option<FormatValue>>,
}

impl FormatDelta {
    /// The empty delta (reset-all / highlight-close marker).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the delta carries no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries (set and unset alike).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record a property assignment.
    pub fn set(&mut self, property: FormatProperty, value: FormatValue) {
        self.entries.insert(property, Some(value));
    }

    /// Record a property removal.
    pub fn unset(&mut self, property: FormatProperty) {
        self.entries.insert(property, None);
    }

    /// Look up an entry. `None` means the delta does not touch the property;
    /// `Some(None)` means it removes it.
    #[must_use]
    pub fn get(&self, property: FormatProperty) -> Option<&Option<FormatValue>> {
        self.entries.get(&property)
    }

    /// Iterate entries in property order.
    pub fn iter(&self) -> impl Iterator<Item = (FormatProperty, &Option<FormatValue>)> {
        self.entries.iter().map(|(p, v)| (*p, v))
    }

    /// The properties this delta touches.
    pub fn properties(&self) -> impl Iterator<Item = FormatProperty> + '_ {
        self.entries.keys().copied()
    }

    /// Merge `other` into `self`, letting `other` win on conflicts.
    pub fn merge(&mut self, other: &Self) {
        for (p, v) in &other.entries {
            self.entries.insert(*p, v.clone());
        }
    }

    /// Apply this delta to a resolved state mapping.
    pub fn apply_to(&self, state: &mut BTreeMap<FormatProperty, FormatValue>) {
        for (p, v) in &self.entries {
            match v {
                Some(value) => {
                    state.insert(*p, value.clone());
                }
                None => {
                    state.remove(p);
                }
            }
        }
    }

    // Builder-style helpers for the common payload shapes.

    /// Delta setting only `Bold`.
    #[must_use]
    pub fn bold(on: bool) -> Self {
        let mut d = Self::new();
        d.set(FormatProperty::Bold, FormatValue::Flag(on));
        d
    }

    /// Delta setting only the foreground color.
    #[must_use]
    pub fn color(c: Rgb) -> Self {
        let mut d = Self::new();
        d.set(FormatProperty::Color, FormatValue::Color(c));
        d
    }

    /// Return `self` with an additional flag entry.
    #[must_use]
    pub fn with_flag(mut self, property: FormatProperty, on: bool) -> Self {
        self.set(property, FormatValue::Flag(on));
        self
    }

    /// Return `self` with an additional color entry.
    #[must_use]
    pub fn with_color(mut self, c: Rgb) -> Self {
        self.set(FormatProperty::Color, FormatValue::Color(c));
        self
    }

    /// Parse a format description string, as used in trigger definitions.
    ///
    /// The syntax is a `;`-separated list of items: bare attribute names
    /// (`bold`, `italic`, `underline`, `blink`, `reversed`), `color: <hex>`,
    /// `background: <hex>`, and `href: <url>`. Items may also be prefixed
    /// with `no ` to record an unset entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on an unknown item and
    /// [`Error::InvalidColor`] on a malformed color value.
    pub fn parse(s: &str) -> Result<Self> {
        let mut delta = Self::new();
        for raw in s.split(';') {
            let item = raw.trim();
            if item.is_empty() {
                continue;
            }
            let (negated, item) = match item.strip_prefix("no ") {
                Some(rest) => (true, rest.trim()),
                None => (false, item),
            };
            let (key, value) = match item.split_once(':') {
                Some((k, v)) => (k.trim(), Some(v.trim())),
                None => (item, None),
            };
            let property = match key.to_ascii_lowercase().as_str() {
                "bold" => FormatProperty::Bold,
                "italic" => FormatProperty::Italic,
                "underline" => FormatProperty::Underline,
                "blink" => FormatProperty::Blink,
                "reversed" => FormatProperty::Reversed,
                "color" => FormatProperty::Color,
                "background" => FormatProperty::Background,
                "href" => FormatProperty::Href,
                _ => return Err(Error::InvalidFormat(item.to_string())),
            };
            if negated {
                delta.unset(property);
                continue;
            }
            match (property, value) {
                (
                    FormatProperty::Bold
                    | FormatProperty::Italic
                    | FormatProperty::Underline
                    | FormatProperty::Blink
                    | FormatProperty::Reversed,
                    None,
                ) => delta.set(property, FormatValue::Flag(true)),
                (FormatProperty::Color | FormatProperty::Background, Some(hex)) => {
                    delta.set(property, FormatValue::Color(Rgb::from_hex(hex)?));
                }
                (FormatProperty::Href, Some(url)) => {
                    delta.set(property, FormatValue::Url(url.to_string()));
                }
                _ => return Err(Error::InvalidFormat(item.to_string())),
            }
        }
        Ok(delta)
    }
}

/// Receiver for resolved property changes.
///
/// The format stack pushes topmost-wins resolutions into one of these; the
/// rendering sink implements it over its character format object.
pub trait FormatTarget {
    fn set_property(&mut self, property: FormatProperty, value: &FormatValue);
    fn clear_property(&mut self, property: FormatProperty);
}

/// A plain resolved format state. Doubles as the reference [`FormatTarget`]
/// implementation for tests and simple sinks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedFormat {
    values: BTreeMap<FormatProperty, FormatValue>,
}

impl ResolvedFormat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, property: FormatProperty) -> Option<&FormatValue> {
        self.values.get(&property)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FormatTarget for ResolvedFormat {
    fn set_property(&mut self, property: FormatProperty, value: &FormatValue) {
        self.values.insert(property, value.clone());
    }

    fn clear_property(&mut self, property: FormatProperty) {
        self.values.remove(&property);
    }
}
