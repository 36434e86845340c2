use std::fmt;
use std::str::FromStr;

use crate::error::MetacheckError;

/// Logical metadata fields, in reference-file column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    FilePath,
    CdTrack,
    Album,
    Artist,
    Author,
    Composer,
    Date,
    Genre,
    Title,
    Year,
    Duration,
    NumTracks,
    Writer,
}

impl FieldKind {
    pub const COUNT: usize = 13;

    pub const ALL: [FieldKind; Self::COUNT] = [
        FieldKind::FilePath,
        FieldKind::CdTrack,
        FieldKind::Album,
        FieldKind::Artist,
        FieldKind::Author,
        FieldKind::Composer,
        FieldKind::Date,
        FieldKind::Genre,
        FieldKind::Title,
        FieldKind::Year,
        FieldKind::Duration,
        FieldKind::NumTracks,
        FieldKind::Writer,
    ];

    /// Fields compared by exact string equality before duration
    pub const EXACT_CHECKS: [FieldKind; 9] = [
        FieldKind::CdTrack,
        FieldKind::Album,
        FieldKind::Artist,
        FieldKind::Author,
        FieldKind::Composer,
        FieldKind::Date,
        FieldKind::Genre,
        FieldKind::Title,
        FieldKind::Year,
    ];

    /// Order in which a validator checks fields. Failure reports follow it.
    pub const CHECK_ORDER: [FieldKind; 12] = [
        FieldKind::CdTrack,
        FieldKind::Album,
        FieldKind::Artist,
        FieldKind::Author,
        FieldKind::Composer,
        FieldKind::Date,
        FieldKind::Genre,
        FieldKind::Title,
        FieldKind::Year,
        FieldKind::Duration,
        FieldKind::NumTracks,
        FieldKind::Writer,
    ];

    /// Column position in a flat reference row
    pub fn column(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::FilePath => "FILE_PATH",
            FieldKind::CdTrack => "CD_TRACK",
            FieldKind::Album => "ALBUM",
            FieldKind::Artist => "ARTIST",
            FieldKind::Author => "AUTHOR",
            FieldKind::Composer => "COMPOSER",
            FieldKind::Date => "DATE",
            FieldKind::Genre => "GENRE",
            FieldKind::Title => "TITLE",
            FieldKind::Year => "YEAR",
            FieldKind::Duration => "DURATION",
            FieldKind::NumTracks => "NUM_TRACKS",
            FieldKind::Writer => "WRITER",
        }
    }

    /// Key used in reference files
    pub fn key(self) -> &'static str {
        match self {
            FieldKind::FilePath => "file_path",
            FieldKind::CdTrack => "cd_track",
            FieldKind::Album => "album",
            FieldKind::Artist => "artist",
            FieldKind::Author => "author",
            FieldKind::Composer => "composer",
            FieldKind::Date => "date",
            FieldKind::Genre => "genre",
            FieldKind::Title => "title",
            FieldKind::Year => "year",
            FieldKind::Duration => "duration",
            FieldKind::NumTracks => "num_tracks",
            FieldKind::Writer => "writer",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = MetacheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s) || f.key() == s)
            .ok_or_else(|| MetacheckError::NotFound(format!("Unknown metadata field: {s}")))
    }
}
