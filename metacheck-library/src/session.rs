use camino::{Utf8Path, Utf8PathBuf};
use metacheck_core::error::Result;
use metacheck_core::extract::{ExtractionSession, MetadataExtractor};
pub use metacheck_core::extract::SessionState;
use metacheck_core::field::FieldKind;
use tracing::debug;

/// Owns an open session and releases it when dropped
#[derive(Debug)]
pub struct SessionGuard<S: ExtractionSession> {
    session: S,
    path: Utf8PathBuf,
    state: SessionState,
}

impl<S: ExtractionSession> SessionGuard<S> {
    pub fn open<E>(extractor: &E, path: &Utf8Path) -> Result<Self>
    where
        E: MetadataExtractor<Session = S> + ?Sized,
    {
        let session = extractor.open(path)?;
        debug!("Opened extraction session: {}", path);

        Ok(Self {
            session,
            path: path.to_owned(),
            state: SessionState::Unopened.advance(SessionState::Open),
        })
    }

    pub fn extract(&self, field: FieldKind) -> Option<String> {
        match self.state {
            SessionState::Open => self.session.extract(field),
            _ => None,
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Release the session now; later calls and the drop are no-ops
    pub fn release(&mut self) -> SessionState {
        if self.state.can_advance_to(SessionState::Released) {
            self.session.release();
            self.state = self.state.advance(SessionState::Released);
            debug!("Released extraction session: {}", self.path);
        }
        self.state
    }
}

impl<S: ExtractionSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}
