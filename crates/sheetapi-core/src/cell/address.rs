//! Cell addresses in A1 notation

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "AA12")
///
/// Both coordinates are 1-based. The canonical string form is an uppercase
/// column label in bijective base-26 (A=1, Z=26, AA=27) immediately followed
/// by the row number without sign or leading zero.
///
/// Addresses are only built through [`CellAddress::new`] or
/// [`CellAddress::parse`], so both coordinates are always within
/// `1..=MAX_COLS` and `1..=MAX_ROWS`.
///
/// Field order matters: the derived `Ord` sorts by row first, then column,
/// which is the order cells are laid out in a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row number (1-based)
    pub(crate) row: u32,
    /// Column number (1-based, A=1)
    pub(crate) col: u32,
}

impl CellAddress {
    /// Create a cell address from 1-based column and row numbers
    ///
    /// Fails with [`Error::InvalidAddress`] if either coordinate is zero or
    /// past the sheet limits.
    pub fn new(col: u32, row: u32) -> Result<Self> {
        if col == 0 || row == 0 {
            return Err(Error::InvalidAddress(format!(
                "column and row must be >= 1 (got column {}, row {})",
                col, row
            )));
        }
        Self::check_bounds(col, row)?;
        Ok(Self { row, col })
    }

    fn check_bounds(col: u32, row: u32) -> Result<()> {
        if row > MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "row {} out of bounds (max: {})",
                row, MAX_ROWS
            )));
        }
        if col > MAX_COLS {
            return Err(Error::InvalidAddress(format!(
                "column {} out of bounds (max: {})",
                column_to_label(col),
                column_to_label(MAX_COLS)
            )));
        }
        Ok(())
    }

    /// Row number (1-based)
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column number (1-based, A=1)
    pub fn col(&self) -> u32 {
        self.col
    }

    /// Parse a cell address from canonical A1 notation
    ///
    /// The accepted grammar is `[A-Z]+[1-9][0-9]*`. Lowercase letters,
    /// surrounding whitespace, `$` markers, row `0` and leading zeros are
    /// all rejected.
    ///
    /// # Examples
    /// ```
    /// use sheetapi_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("AA12").unwrap();
    /// assert_eq!(addr.col(), 27);
    /// assert_eq!(addr.row(), 12);
    ///
    /// assert!(CellAddress::parse("a1").is_err());
    /// assert!(CellAddress::parse("A01").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        // Parse column letters
        while pos < bytes.len() && bytes[pos].is_ascii_uppercase() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }

        let col = label_to_column(&s[..pos])?;

        // Parse row number
        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "row must be decimal digits in '{}'",
                s
            )));
        }

        if row_str.starts_with('0') {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 without leading zeros in '{}'",
                s
            )));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("row number out of range in '{}'", s)))?;

        Self::check_bounds(col, row)?;
        Ok(Self { row, col })
    }

    /// The column label of this address (e.g. "AA")
    pub fn column_label(&self) -> String {
        column_to_label(self.col)
    }

    /// Format as canonical A1 string
    pub fn to_a1_string(&self) -> String {
        let mut result = column_to_label(self.col);
        result.push_str(&self.row.to_string());
        result
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a 1-based column number to its label (1 = A, 26 = Z, 27 = AA, etc.)
///
/// Column 0 has no label and yields an empty string.
pub fn column_to_label(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;

    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert a column label to its 1-based number (A = 1, Z = 26, AA = 27, etc.)
///
/// Only uppercase ASCII letters are accepted.
pub fn label_to_column(label: &str) -> Result<u32> {
    if label.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: u32 = 0;
    for c in label.chars() {
        if !c.is_ascii_uppercase() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = c as u32 - 'A' as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::InvalidAddress(format!("column '{}' out of range", label)))?;
    }

    Ok(col)
}
