use camino::Utf8PathBuf;
use metacheck_core::config::ValidationConfig;
use metacheck_core::error::{CaseFailure, FieldMismatch};
use metacheck_core::extract::MetadataExtractor;
use metacheck_core::field::FieldKind;
use metacheck_core::reference::ReferenceRow;
use tracing::{debug, info, warn};

use crate::compare::{compare_duration, compare_exact, CheckOutcome};
use crate::session::{SessionGuard, SessionState};

/// One compared field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: FieldKind,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub outcome: CheckOutcome,
}

/// Every field compared for one file, in check order
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub path: Utf8PathBuf,
    pub checks: Vec<FieldCheck>,
    /// Session state when validation returned
    pub state: SessionState,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(|c| c.outcome.is_ok())
    }

    pub fn mismatches(&self) -> Vec<FieldMismatch> {
        self.checks
            .iter()
            .filter_map(|check| {
                check.outcome.message().map(|detail| FieldMismatch {
                    field: check.field,
                    expected: check.expected.clone(),
                    actual: check.actual.clone(),
                    detail: detail.to_owned(),
                })
            })
            .collect()
    }

    pub fn check(&self, field: FieldKind) -> Option<&FieldCheck> {
        self.checks.iter().find(|c| c.field == field)
    }
}

/// Compares the metadata an extractor reports against reference rows
#[derive(Debug, Clone)]
pub struct MetadataValidator<E> {
    extractor: E,
    duration_tolerance_ms: u64,
    fail_fast: bool,
}

impl<E: MetadataExtractor> MetadataValidator<E> {
    pub fn new(extractor: E) -> Self {
        Self::with_config(extractor, &ValidationConfig::default())
    }

    pub fn with_config(extractor: E, config: &ValidationConfig) -> Self {
        Self {
            extractor,
            duration_tolerance_ms: config.duration_tolerance_ms,
            fail_fast: config.fail_fast,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Validate one row; any mismatching field fails the case
    pub fn validate(&self, row: &ReferenceRow) -> Result<ValidationReport, CaseFailure> {
        let report = self.check(row)?;
        if report.is_ok() {
            info!("Metadata matches reference: {}", report.path);
            Ok(report)
        } else {
            Err(CaseFailure::Mismatch(report.mismatches()))
        }
    }

    /// Compare every field of a row and report the outcomes without judging
    /// them. Only a source that cannot be opened is an error.
    pub fn check(&self, row: &ReferenceRow) -> Result<ValidationReport, CaseFailure> {
        let path = row.path();
        debug!("filePath = {}", path);

        let mut session = match SessionGuard::open(&self.extractor, path) {
            Ok(session) => session,
            Err(source) => {
                let state = SessionState::Unopened.advance(SessionState::Failed);
                warn!("Failed to open {} ({:?}): {}", path, state, source);
                return Err(CaseFailure::Open {
                    path: path.to_owned(),
                    state,
                    source,
                });
            }
        };

        let mut checks = Vec::with_capacity(FieldKind::CHECK_ORDER.len());
        for field in FieldKind::CHECK_ORDER {
            let actual = session.extract(field);
            debug!("{} : {}", field, actual.as_deref().unwrap_or("<absent>"));

            let expected = row.expected(field);
            let outcome = match field {
                FieldKind::Duration => {
                    compare_duration(expected, actual.as_deref(), self.duration_tolerance_ms)
                }
                _ => compare_exact(expected, actual.as_deref()),
            };

            let failed = !outcome.is_ok();
            if let Some(msg) = outcome.message() {
                warn!("{} mismatch in {}: {}", field, path, msg);
            }

            checks.push(FieldCheck {
                field,
                expected: expected.map(str::to_owned),
                actual,
                outcome,
            });

            if failed && self.fail_fast {
                break;
            }
        }

        let state = session.release();
        Ok(ValidationReport {
            path: path.to_owned(),
            checks,
            state,
        })
    }
}
