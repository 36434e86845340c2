use std::fmt;
use std::str::FromStr;

use crate::error::MetacheckError;

/// Identifies one row of a reference table
pub trait SampleSelector {
    /// Row index in the reference table
    fn index(&self) -> usize;

    /// Human-readable tag, also matched against a row's `sample` label.
    /// Empty for selectors that go by position only.
    fn label(&self) -> &'static str;
}

/// The MP3 tagging variants covered by the MP3 reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mp3Sample {
    Id3v1v2,
    Id3v2,
    Id3v1,
}

impl Mp3Sample {
    pub const ALL: [Mp3Sample; 3] = [Mp3Sample::Id3v1v2, Mp3Sample::Id3v2, Mp3Sample::Id3v1];
}

impl SampleSelector for Mp3Sample {
    fn index(&self) -> usize {
        match self {
            Mp3Sample::Id3v1v2 => 0,
            Mp3Sample::Id3v2 => 1,
            Mp3Sample::Id3v1 => 2,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Mp3Sample::Id3v1v2 => "ID3V1V2",
            Mp3Sample::Id3v2 => "ID3V2",
            Mp3Sample::Id3v1 => "ID3V1",
        }
    }
}

impl fmt::Display for Mp3Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mp3Sample {
    type Err = MetacheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mp3Sample::ALL
            .into_iter()
            .find(|sample| sample.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| MetacheckError::NotFound(format!("Unknown MP3 sample: {s}")))
    }
}

/// Selects a row by position only, for tables without dedicated sample tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowIndex(pub usize);

impl SampleSelector for RowIndex {
    fn index(&self) -> usize {
        self.0
    }

    /// Empty: never matched against row labels
    fn label(&self) -> &'static str {
        ""
    }
}
