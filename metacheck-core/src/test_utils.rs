//! Shared test utilities for the metacheck workspace
//!
//! Provides an in-memory extraction backend and reference rows so the
//! validation protocol can be exercised without real media files. Only
//! available when the "test-utils" feature is enabled.

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{MetacheckError, Result};
use crate::extract::{ExtractionSession, MetadataExtractor};
use crate::field::FieldKind;
use crate::reference::ReferenceRow;

/// Calls observed by a [`ScriptedExtractor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractorEvent {
    Opened(Utf8PathBuf),
    OpenFailed(Utf8PathBuf),
    Extracted(FieldKind),
    Released(Utf8PathBuf),
}

#[derive(Debug, Clone)]
enum ScriptedSource {
    Values(BTreeMap<FieldKind, String>),
    Broken(String),
}

/// Extractor that serves canned field values and records every call
#[derive(Debug, Clone, Default)]
pub struct ScriptedExtractor {
    sources: BTreeMap<Utf8PathBuf, ScriptedSource>,
    events: Rc<RefCell<Vec<ExtractorEvent>>>,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source whose values agree with a reference row
    pub fn with_row(mut self, row: &ReferenceRow) -> Self {
        let values = FieldKind::ALL
            .into_iter()
            .filter_map(|field| row.expected(field).map(|v| (field, v.to_owned())))
            .collect();
        self.sources
            .insert(row.path().to_owned(), ScriptedSource::Values(values));
        self
    }

    /// Register a source that fails to open
    pub fn with_broken_source(mut self, path: impl Into<Utf8PathBuf>, reason: &str) -> Self {
        self.sources
            .insert(path.into(), ScriptedSource::Broken(reason.to_owned()));
        self
    }

    /// Override one value of a registered source; `None` removes it
    pub fn set_value(&mut self, path: &Utf8Path, field: FieldKind, value: Option<&str>) {
        if let Some(ScriptedSource::Values(values)) = self.sources.get_mut(path) {
            match value {
                Some(v) => {
                    values.insert(field, v.to_owned());
                }
                None => {
                    values.remove(&field);
                }
            }
        }
    }

    pub fn events(&self) -> Vec<ExtractorEvent> {
        self.events.borrow().clone()
    }

    pub fn open_count(&self) -> usize {
        self.count(|e| matches!(e, ExtractorEvent::Opened(_) | ExtractorEvent::OpenFailed(_)))
    }

    pub fn release_count(&self) -> usize {
        self.count(|e| matches!(e, ExtractorEvent::Released(_)))
    }

    /// Fields queried so far, in query order
    pub fn extracted_fields(&self) -> Vec<FieldKind> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ExtractorEvent::Extracted(field) => Some(*field),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&ExtractorEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl MetadataExtractor for ScriptedExtractor {
    type Session = ScriptedSession;

    fn open(&self, path: &Utf8Path) -> Result<ScriptedSession> {
        match self.sources.get(path) {
            Some(ScriptedSource::Values(values)) => {
                self.events
                    .borrow_mut()
                    .push(ExtractorEvent::Opened(path.to_owned()));
                Ok(ScriptedSession {
                    path: path.to_owned(),
                    values: Some(values.clone()),
                    events: Rc::clone(&self.events),
                })
            }
            Some(ScriptedSource::Broken(reason)) => {
                self.events
                    .borrow_mut()
                    .push(ExtractorEvent::OpenFailed(path.to_owned()));
                Err(MetacheckError::Extraction(reason.clone()))
            }
            None => {
                self.events
                    .borrow_mut()
                    .push(ExtractorEvent::OpenFailed(path.to_owned()));
                Err(MetacheckError::NotFound(format!("No such source: {path}")))
            }
        }
    }
}

#[derive(Debug)]
pub struct ScriptedSession {
    path: Utf8PathBuf,
    values: Option<BTreeMap<FieldKind, String>>,
    events: Rc<RefCell<Vec<ExtractorEvent>>>,
}

impl ExtractionSession for ScriptedSession {
    fn extract(&self, field: FieldKind) -> Option<String> {
        self.events
            .borrow_mut()
            .push(ExtractorEvent::Extracted(field));
        self.values.as_ref()?.get(&field).cloned()
    }

    fn release(&mut self) {
        if self.values.take().is_some() {
            self.events
                .borrow_mut()
                .push(ExtractorEvent::Released(self.path.clone()));
        }
    }
}

/// Fully populated reference row for an ID3v1+ID3v2 tagged MP3
///
/// # Examples
///
/// ```
/// # use metacheck_core::test_utils::create_test_row;
/// # use metacheck_core::field::FieldKind;
/// let row = create_test_row("/media/id3v1v2.mp3");
/// assert_eq!(row.expected(FieldKind::Album), Some("AlbumX"));
/// ```
pub fn create_test_row(path: &str) -> ReferenceRow {
    ReferenceRow::new(path)
        .with_sample("ID3V1V2")
        .with(FieldKind::CdTrack, "3")
        .with(FieldKind::Album, "AlbumX")
        .with(FieldKind::Artist, "ArtistY")
        .with(FieldKind::Author, "AuthorA")
        .with(FieldKind::Composer, "ComposerC")
        .with(FieldKind::Date, "20080101T000000.000Z")
        .with(FieldKind::Genre, "Rock")
        .with(FieldKind::Title, "TitleT")
        .with(FieldKind::Year, "2008")
        .with(FieldKind::Duration, "180000")
        .with(FieldKind::NumTracks, "2")
        .with(FieldKind::Writer, "WriterZ")
}
