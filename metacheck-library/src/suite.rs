use metacheck_core::error::CaseFailure;
use metacheck_core::extract::MetadataExtractor;
use metacheck_core::reference::{ReferenceData, ReferenceTable};
use tracing::info;

use crate::selector::{run_row, CaseOutcome};
use crate::validator::MetadataValidator;

pub type CaseResult = Result<CaseOutcome, CaseFailure>;

/// Outcomes of every row of one table, in table order
#[derive(Debug, Default)]
pub struct SuiteSummary {
    pub cases: Vec<(String, CaseResult)>,
}

impl SuiteSummary {
    pub fn passed(&self) -> usize {
        self.count(|r| matches!(r, Ok(CaseOutcome::Passed(_))))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| matches!(r, Ok(CaseOutcome::Skipped(_))))
    }

    pub fn failed(&self) -> usize {
        self.count(Result::is_err)
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&CaseResult) -> bool) -> usize {
        self.cases.iter().filter(|(_, r)| pred(r)).count()
    }
}

/// Case name for a row: its sample label, else its position and file name
fn case_name(index: usize, table: &ReferenceTable) -> String {
    match table.get(index) {
        Some(row) => match row.sample() {
            Some(label) => label.to_owned(),
            None => format!("#{index} {}", row.path().file_name().unwrap_or("?")),
        },
        None => format!("#{index}"),
    }
}

/// Validate every row of a table, one file at a time
pub fn run_table<R, E>(
    table: &ReferenceTable,
    reference: &R,
    validator: &MetadataValidator<E>,
) -> SuiteSummary
where
    R: ReferenceData + ?Sized,
    E: MetadataExtractor,
{
    info!("Running {} {} cases", table.len(), table.media_type());

    let cases = table
        .iter()
        .enumerate()
        .map(|(index, row)| (case_name(index, table), run_row(row, reference, validator)))
        .collect();
    let summary = SuiteSummary { cases };

    info!(
        "Suite complete: {} passed, {} skipped, {} failed",
        summary.passed(),
        summary.skipped(),
        summary.failed()
    );
    summary
}
