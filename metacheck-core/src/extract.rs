//! Contract between the validator and a metadata extraction backend.

use camino::Utf8Path;
use tracing::debug;

use crate::error::Result;
use crate::field::FieldKind;

/// Opens media sources for metadata extraction
pub trait MetadataExtractor {
    type Session: ExtractionSession;

    /// Open a source. Errors when the path is unreadable, unsupported or corrupt.
    fn open(&self, path: &Utf8Path) -> Result<Self::Session>;
}

/// An open handle to one media source
pub trait ExtractionSession {
    /// Extracted value of a field, `None` when the source has no such value
    fn extract(&self, field: FieldKind) -> Option<String>;

    /// Drop backend resources. Calling it again is a no-op, and `extract`
    /// returns `None` afterwards.
    fn release(&mut self);
}

impl<E: MetadataExtractor + ?Sized> MetadataExtractor for &E {
    type Session = E::Session;

    fn open(&self, path: &Utf8Path) -> Result<Self::Session> {
        (**self).open(path)
    }
}

/// Lifecycle of the extraction session behind one validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    Open,
    Released,
    /// The source could not be opened; terminal
    Failed,
}

impl SessionState {
    /// Allowed moves: `Unopened` to `Open` or `Failed`, `Open` to `Released`
    pub fn can_advance_to(self, next: SessionState) -> bool {
        matches!(
            (self, next),
            (SessionState::Unopened, SessionState::Open)
                | (SessionState::Unopened, SessionState::Failed)
                | (SessionState::Open, SessionState::Released)
        )
    }

    /// Move to `next` if allowed, else stay put
    pub fn advance(self, next: SessionState) -> SessionState {
        if self.can_advance_to(next) {
            next
        } else {
            debug!("Ignoring session transition {:?} -> {:?}", self, next);
            self
        }
    }
}
