use crate::Number;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// Text shown for a slot that was never assigned.
pub const MISSING_TEXT: &str = "n/a";

/// Which payload a [`Cell`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Number,
    Text,
}

/// A single table entry: either a number or a piece of text, never both.
///
/// Cells are plain values. Whether raw text becomes a number is decided by
/// the CSV reader through a [`NumberFormat`](crate::NumberFormat), not here:
/// a `Cell` built from a `&str` is always text, even if it looks numeric.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub enum Cell<T: Number> {
    Number(T),
    Text(String),
}

impl<T: Number> Cell<T> {
    pub fn number(value: T) -> Self {
        Cell::Number(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Number(_) => CellKind::Number,
            Cell::Text(_) => CellKind::Text,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }

    /// The numeric payload, or `None` for a text cell.
    pub fn as_number(&self) -> Option<T> {
        match self {
            Cell::Number(value) => Some(*value),
            Cell::Text(_) => None,
        }
    }

    /// The cell rendered as text. Numbers use their `Display` form.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Number(value) => Cow::Owned(value.to_string()),
            Cell::Text(text) => Cow::Borrowed(text),
        }
    }
}

impl<T: Number> Display for Cell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

impl<T: Number> From<String> for Cell<T> {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Number> From<&str> for Cell<T> {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }
}
