//! Source locations for declaration nodes
//!
//! Every location field in the declaration family is a [`SourceLoc`]: a file
//! and a byte offset, with [`SourceLoc::INVALID`] standing in for "no location
//! was written".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl FileId {
    /// Reserved id carried by invalid locations
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a file id from its raw value
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A byte offset in a source file
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceLoc {
    /// File the offset points into
    pub file: FileId,
    /// Byte offset from the start of the file
    pub offset: u32,
}

impl SourceLoc {
    /// The "no location" sentinel
    pub const INVALID: Self = Self {
        file: FileId::INVALID,
        offset: u32::MAX,
    };

    /// Creates a location at `offset` in `file`
    pub const fn new(file: FileId, offset: u32) -> Self {
        Self { file, offset }
    }

    /// Whether this is a real location rather than the sentinel
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(formatter, "{}:{}", self.file.0, self.offset)
        } else {
            write!(formatter, "<invalid>")
        }
    }
}

/// A pair of locations delimiting a construct, such as `[` and `]`
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SourceRange {
    /// Location of the opening token
    pub start: SourceLoc,
    /// Location of the closing token
    pub end: SourceLoc,
}

impl SourceRange {
    /// A range with both ends invalid
    pub const INVALID: Self = Self {
        start: SourceLoc::INVALID,
        end: SourceLoc::INVALID,
    };

    /// Creates a range from its two ends
    pub const fn new(start: SourceLoc, end: SourceLoc) -> Self {
        Self { start, end }
    }

    /// Whether both ends are real locations
    pub fn is_valid(self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_is_invalid() {
        assert!(!SourceLoc::default().is_valid());
        assert!(!SourceRange::default().is_valid());
        assert_eq!(SourceLoc::default().to_string(), "<invalid>");
    }

    #[test]
    fn test_location_display() {
        let start = SourceLoc::new(FileId::new(2), 10);
        let end = SourceLoc::new(FileId::new(2), 14);
        assert!(start.is_valid());
        assert_eq!(SourceRange::new(start, end).to_string(), "[2:10, 2:14]");
    }

    #[test]
    fn test_half_open_range_is_invalid() {
        let start = SourceLoc::new(FileId::new(0), 1);
        assert!(!SourceRange::new(start, SourceLoc::INVALID).is_valid());
    }
}
