//! Cell data kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The recognized cell data kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Value stored and rendered verbatim
    Literal,
}

impl CellKind {
    /// Wire name of this kind (the `type` field in JSON)
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Literal => "literal",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CellKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "literal" => Ok(CellKind::Literal),
            other => Err(Error::InvalidCellData(format!(
                "unrecognized cell data type '{}'",
                other
            ))),
        }
    }
}

/// Data stored in a cell
///
/// Serialized as `{"type": "literal", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellData {
    /// A literal string value
    Literal {
        /// The stored text
        value: String,
    },
}

impl CellData {
    /// Create a literal value
    pub fn literal<S: Into<String>>(value: S) -> Self {
        CellData::Literal {
            value: value.into(),
        }
    }

    /// Build cell data from an untyped kind tag and value
    ///
    /// This is the validation entry point for data arriving from outside:
    /// an unknown `kind` fails with [`Error::InvalidCellData`].
    pub fn from_parts(kind: &str, value: String) -> Result<Self> {
        match kind.parse::<CellKind>()? {
            CellKind::Literal => Ok(CellData::Literal { value }),
        }
    }

    /// The kind of this data
    pub fn kind(&self) -> CellKind {
        match self {
            CellData::Literal { .. } => CellKind::Literal,
        }
    }

    /// The text shown for this cell in a rendered view
    pub fn display_value(&self) -> &str {
        match self {
            CellData::Literal { value } => value,
        }
    }
}
