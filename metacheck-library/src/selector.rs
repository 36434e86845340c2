use metacheck_core::error::CaseFailure;
use metacheck_core::extract::MetadataExtractor;
use metacheck_core::reference::{GatedFormat, ReferenceData, ReferenceRow, ReferenceTable};
use metacheck_core::sample::SampleSelector;
use std::fmt;
use tracing::{info, warn};

use crate::validator::{MetadataValidator, ValidationReport};

/// Why a case ended without any assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    FormatDisabled(GatedFormat),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FormatDisabled(format) => write!(f, "{format} support disabled"),
        }
    }
}

/// How a case that did not fail ended
#[derive(Debug, Clone)]
pub enum CaseOutcome {
    Passed(ValidationReport),
    Skipped(SkipReason),
}

impl CaseOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, CaseOutcome::Skipped(_))
    }
}

/// Skip check for a row, decided from its path alone
pub fn skip_reason<R>(row: &ReferenceRow, reference: &R) -> Option<SkipReason>
where
    R: ReferenceData + ?Sized,
{
    GatedFormat::from_path(row.path())
        .filter(|format| !reference.is_format_enabled(*format))
        .map(SkipReason::FormatDisabled)
}

/// Run one case: pick the sample's row, apply the skip policy, then validate
pub fn run_case<S, R, E>(
    selector: &S,
    table: &ReferenceTable,
    reference: &R,
    validator: &MetadataValidator<E>,
) -> Result<CaseOutcome, CaseFailure>
where
    S: SampleSelector + ?Sized,
    R: ReferenceData + ?Sized,
    E: MetadataExtractor,
{
    let row = table.row(selector).ok_or_else(|| CaseFailure::MissingSample {
        label: match selector.label() {
            "" => format!("#{}", selector.index()),
            label => label.to_owned(),
        },
        index: selector.index(),
        rows: table.len(),
    })?;

    run_row(row, reference, validator)
}

/// Skip policy and validation for a row already selected
pub fn run_row<R, E>(
    row: &ReferenceRow,
    reference: &R,
    validator: &MetadataValidator<E>,
) -> Result<CaseOutcome, CaseFailure>
where
    R: ReferenceData + ?Sized,
    E: MetadataExtractor,
{
    if let Some(reason) = skip_reason(row, reference) {
        info!("Skipping {}: {}", row.path(), reason);
        return Ok(CaseOutcome::Skipped(reason));
    }

    match validator.validate(row) {
        Ok(report) => Ok(CaseOutcome::Passed(report)),
        Err(failure) => {
            warn!("Case failed for {}", row.path());
            Err(failure)
        }
    }
}
