//! Reference tables: the ground-truth metadata for each sample file.
//!
//! A reference file is TOML with one array of tables per media type:
//!
//! ```toml
//! [[mp3]]
//! sample = "ID3V1V2"
//! file_path = "MP3/ID3V1_ID3V2.mp3"
//! album = "AlbumX"
//! duration = 180000
//! ```
//!
//! Omitted keys mean the field is expected to be absent.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::config::{Capabilities, Config};
use crate::error::{MetacheckError, Result};
use crate::field::FieldKind;
use crate::sample::SampleSelector;

/// Media families that have their own reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MediaType {
    Mp3,
    Wma,
    Wmv,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Mp3, MediaType::Wma, MediaType::Wmv];

    pub fn key(self) -> &'static str {
        match self {
            MediaType::Mp3 => "mp3",
            MediaType::Wma => "wma",
            MediaType::Wmv => "wmv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MediaType {
    type Err = MetacheckError;

    fn from_str(s: &str) -> Result<Self> {
        MediaType::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| MetacheckError::NotFound(format!("Unknown media type: {s}")))
    }
}

/// Formats whose support depends on optional codecs in the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedFormat {
    Wma,
    Wmv,
}

impl GatedFormat {
    pub fn extension(self) -> &'static str {
        match self {
            GatedFormat::Wma => "wma",
            GatedFormat::Wmv => "wmv",
        }
    }

    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension()?;
        [GatedFormat::Wma, GatedFormat::Wmv]
            .into_iter()
            .find(|f| ext.eq_ignore_ascii_case(f.extension()))
    }
}

impl fmt::Display for GatedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatedFormat::Wma => f.write_str("WMA"),
            GatedFormat::Wmv => f.write_str("WMV"),
        }
    }
}

/// Parse a millisecond count as stored in reference rows and extractor output
pub fn parse_millis(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Expected metadata for one sample file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRow {
    sample: Option<String>,
    path: Utf8PathBuf,
    values: BTreeMap<FieldKind, String>,
}

impl ReferenceRow {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            sample: None,
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_sample(mut self, label: impl Into<String>) -> Self {
        self.sample = Some(label.into());
        self
    }

    /// Set the expected value of a field; `FilePath` replaces the path
    pub fn with(mut self, field: FieldKind, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    fn set(&mut self, field: FieldKind, value: Option<String>) {
        match (field, value) {
            (FieldKind::FilePath, Some(path)) => self.path = Utf8PathBuf::from(path),
            (FieldKind::FilePath, None) => {}
            (field, Some(value)) => {
                self.values.insert(field, value);
            }
            (field, None) => {
                self.values.remove(&field);
            }
        }
    }

    /// Build a row from a flat positional row, one column per `FieldKind`
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let columns: Vec<Option<String>> = columns
            .into_iter()
            .map(|c| c.map(Into::into))
            .collect();

        if columns.len() != FieldKind::COUNT {
            return Err(MetacheckError::Reference(format!(
                "Row has {} columns, expected {}",
                columns.len(),
                FieldKind::COUNT
            )));
        }

        let mut cells = FieldKind::ALL.into_iter().zip(columns);
        let path = match cells.next() {
            Some((FieldKind::FilePath, Some(path))) if !path.is_empty() => path,
            _ => {
                return Err(MetacheckError::Reference(
                    "Row is missing its FILE_PATH column".to_owned(),
                ));
            }
        };

        let mut row = ReferenceRow::new(path);
        for (field, value) in cells {
            row.set(field, value);
        }
        Ok(row)
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn sample(&self) -> Option<&str> {
        self.sample.as_deref()
    }

    /// Expected value of a field, `None` when the field should be absent
    pub fn expected(&self, field: FieldKind) -> Option<&str> {
        match field {
            FieldKind::FilePath => Some(self.path.as_str()),
            field => self.values.get(&field).map(String::as_str),
        }
    }

    /// Flat view of the row in column order
    pub fn columns(&self) -> [Option<&str>; FieldKind::COUNT] {
        FieldKind::ALL.map(|field| self.expected(field))
    }

    fn resolve_against(&mut self, root: &Utf8Path) {
        if self.path.is_relative() {
            self.path = root.join(&self.path);
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(duration) = self.expected(FieldKind::Duration) {
            if parse_millis(duration).is_none() {
                return Err(MetacheckError::Reference(format!(
                    "{}: DURATION {:?} is not an integer number of milliseconds",
                    self.path, duration
                )));
            }
        }
        Ok(())
    }
}

/// All reference rows for one media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    media_type: MediaType,
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    pub fn new(media_type: MediaType, rows: Vec<ReferenceRow>) -> Self {
        Self { media_type, rows }
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Row for a sample: a row labelled with the sample's tag wins, then the
    /// sample's position. A positional row labelled for another sample never
    /// matches. Selectors with an empty label go by position only.
    pub fn row<S: SampleSelector + ?Sized>(&self, selector: &S) -> Option<&ReferenceRow> {
        let label = selector.label();
        if label.is_empty() {
            return self.rows.get(selector.index());
        }

        self.find_sample(label).or_else(|| {
            self.rows
                .get(selector.index())
                .filter(|row| row.sample().is_none())
        })
    }

    pub fn find_sample(&self, label: &str) -> Option<&ReferenceRow> {
        if label.is_empty() {
            return None;
        }
        self.rows
            .iter()
            .find(|row| row.sample().is_some_and(|s| s.eq_ignore_ascii_case(label)))
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRow> {
        self.rows.iter()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Integer(i64),
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Text(s) => s,
            Cell::Integer(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRow {
    sample: Option<String>,
    file_path: String,
    cd_track: Option<Cell>,
    album: Option<Cell>,
    artist: Option<Cell>,
    author: Option<Cell>,
    composer: Option<Cell>,
    date: Option<Cell>,
    genre: Option<Cell>,
    title: Option<Cell>,
    year: Option<Cell>,
    duration: Option<Cell>,
    num_tracks: Option<Cell>,
    writer: Option<Cell>,
}

impl RawRow {
    fn into_row(self) -> ReferenceRow {
        let cells = [
            (FieldKind::CdTrack, self.cd_track),
            (FieldKind::Album, self.album),
            (FieldKind::Artist, self.artist),
            (FieldKind::Author, self.author),
            (FieldKind::Composer, self.composer),
            (FieldKind::Date, self.date),
            (FieldKind::Genre, self.genre),
            (FieldKind::Title, self.title),
            (FieldKind::Year, self.year),
            (FieldKind::Duration, self.duration),
            (FieldKind::NumTracks, self.num_tracks),
            (FieldKind::Writer, self.writer),
        ];

        let mut row = ReferenceRow::new(self.file_path);
        row.sample = self.sample;
        for (field, cell) in cells {
            row.set(field, cell.map(String::from));
        }
        row
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    mp3: Vec<RawRow>,
    #[serde(default)]
    wma: Vec<RawRow>,
    #[serde(default)]
    wmv: Vec<RawRow>,
}

/// Every reference table known to a run
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    tables: BTreeMap<MediaType, ReferenceTable>,
}

impl ReferenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: ReferenceTable) {
        self.tables.insert(table.media_type(), table);
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P, media_root: Option<&Utf8Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            MetacheckError::Reference(format!(
                "Failed to read reference file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content, media_root)
    }

    pub fn from_toml_str(content: &str, media_root: Option<&Utf8Path>) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(content)
            .map_err(|e| MetacheckError::Reference(format!("Failed to parse reference file: {}", e)))?;

        let mut catalog = Self::new();
        for (media_type, raw_rows) in [
            (MediaType::Mp3, raw.mp3),
            (MediaType::Wma, raw.wma),
            (MediaType::Wmv, raw.wmv),
        ] {
            if raw_rows.is_empty() {
                continue;
            }

            let mut rows = Vec::with_capacity(raw_rows.len());
            for raw_row in raw_rows {
                let mut row = raw_row.into_row();
                if let Some(root) = media_root {
                    row.resolve_against(root);
                }
                row.validate()?;
                rows.push(row);
            }

            debug!("Loaded {} reference rows for {}", rows.len(), media_type);
            catalog.insert(ReferenceTable::new(media_type, rows));
        }

        Ok(catalog)
    }

    pub fn table(&self, media_type: MediaType) -> Result<&ReferenceTable> {
        self.tables.get(&media_type).ok_or_else(|| {
            MetacheckError::NotFound(format!("No reference table for {media_type}"))
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &ReferenceTable> {
        self.tables.values()
    }
}

/// Source of reference tables and environment capability flags
pub trait ReferenceData {
    fn table(&self, media_type: MediaType) -> Result<&ReferenceTable>;

    fn is_format_enabled(&self, format: GatedFormat) -> bool;
}

/// Reference tables paired with the capabilities of the current environment
#[derive(Debug, Clone, Default)]
pub struct ReferenceProfile {
    catalog: ReferenceCatalog,
    capabilities: Capabilities,
}

impl ReferenceProfile {
    pub fn new(catalog: ReferenceCatalog, capabilities: Capabilities) -> Self {
        Self {
            catalog,
            capabilities,
        }
    }

    /// Load the reference file named by the configuration
    pub fn load(config: &Config) -> Result<Self> {
        let catalog = ReferenceCatalog::load_from_path(
            &config.general.reference_file,
            config.general.media_root.as_deref(),
        )?;
        Ok(Self::new(catalog, config.capabilities))
    }
}

impl ReferenceData for ReferenceProfile {
    fn table(&self, media_type: MediaType) -> Result<&ReferenceTable> {
        self.catalog.table(media_type)
    }

    fn is_format_enabled(&self, format: GatedFormat) -> bool {
        self.capabilities.is_enabled(format)
    }
}
