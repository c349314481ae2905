//! A1-style cell addresses and rectangular ranges

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Uppercase column letters then digits, on both sides of a single colon.
static STRICT_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]+)([0-9]+):([A-Z]+)([0-9]+)$").expect("valid range regex"));

/// One cell of a sheet
///
/// Rows and columns are 0-based; A1 notation is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    /// 0-based column (A=0, XFD=16383)
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse `B2`-style notation, ignoring `$` markers and letter case
    ///
    /// ```
    /// use sheetbridge_core::CellAddress;
    ///
    /// assert_eq!(CellAddress::parse("B2").unwrap(), CellAddress::new(1, 1));
    /// assert_eq!(CellAddress::parse("$c$10").unwrap(), CellAddress::new(9, 2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        let unmarked: String = text.chars().filter(|c| *c != '$').collect();
        let split = unmarked
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(unmarked.len());
        let (letters, digits) = unmarked.split_at(split);

        if letters.is_empty() || digits.is_empty() {
            return Err(Error::InvalidAddress(format!("'{}' is not a cell like B2", text)));
        }
        let col = Self::letters_to_column(letters)?;
        let row = digits
            .parse::<u32>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| Error::InvalidAddress(format!("bad row number in '{}'", text)))?;
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self { row, col })
    }

    /// Column letters for a 0-based index (0 -> A, 26 -> AA)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::new();
        let mut n = u32::from(col) + 1;
        while n > 0 {
            let digit = (n - 1) % 26;
            letters.push(b'A' + digit as u8);
            n = (n - 1) / 26;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// 0-based index for column letters, in either case
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidAddress(format!("bad column letters '{}'", letters)));
        }

        let mut n: u32 = 0;
        for b in letters.bytes() {
            n = n * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
            if n > u32::from(MAX_COLS) {
                return Err(Error::ColumnOutOfBounds(u16::MAX, MAX_COLS - 1));
            }
        }
        Ok((n - 1) as u16)
    }

    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }

    /// The address one column to the right, if it exists
    pub fn right(&self) -> Option<CellAddress> {
        (self.col + 1 < MAX_COLS).then(|| CellAddress::new(self.row, self.col + 1))
    }

    /// The address one row down, if it exists
    pub fn down(&self) -> Option<CellAddress> {
        (self.row + 1 < MAX_ROWS).then(|| CellAddress::new(self.row + 1, self.col))
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

/// An inclusive rectangle of cells, always stored top-left to bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Span the rectangle between two corners, in any order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    pub fn single(addr: CellAddress) -> Self {
        Self::new(addr, addr)
    }

    /// Parse `A1:B10` leniently: `$` markers, lowercase letters and single cells are accepted
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().split_once(':') {
            Some((a, b)) => Ok(Self::new(CellAddress::parse(a)?, CellAddress::parse(b)?)),
            None => CellAddress::parse(s).map(Self::single),
        }
    }

    /// Parse the strict job-configuration form `<COL><ROW>:<COL><ROW>`
    ///
    /// Column letters must be uppercase and both corners must be present.
    ///
    /// ```
    /// use sheetbridge_core::CellRange;
    ///
    /// let range = CellRange::parse_strict("B2:L14").unwrap();
    /// assert_eq!(range.row_count(), 13);
    /// assert_eq!(range.col_count(), 11);
    /// assert!(CellRange::parse_strict("b2:l14").is_err());
    /// assert!(CellRange::parse_strict("B2").is_err());
    /// ```
    pub fn parse_strict(s: &str) -> Result<Self> {
        let caps = STRICT_RANGE
            .captures(s)
            .ok_or_else(|| Error::InvalidRangeFormat(s.to_string()))?;

        let corner = |letters: &str, digits: &str| -> Result<CellAddress> {
            CellAddress::parse(&format!("{}{}", letters, digits))
                .map_err(|_| Error::InvalidRangeFormat(s.to_string()))
        };

        let start = corner(&caps[1], &caps[2])?;
        let end = corner(&caps[3], &caps[4])?;
        Ok(Self::new(start, end))
    }

    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn col_count(&self) -> u16 {
        self.end.col - self.start.col + 1
    }

    /// `B2:C4`, or just `B2` for a single cell
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            return self.start.to_a1_string();
        }
        format!("{}:{}", self.start, self.end)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
