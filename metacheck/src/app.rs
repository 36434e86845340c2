use std::fmt::Write as _;

use anyhow::{Context, Result};
use metacheck_core::config::Config;
use metacheck_core::extract::MetadataExtractor;
use metacheck_core::reference::{MediaType, ReferenceData, ReferenceProfile, ReferenceTable};
use metacheck_core::sample::{Mp3Sample, RowIndex};
use metacheck_library::{
    run_case, run_row, run_table, CaseOutcome, LoftyExtractor, MetadataValidator, SuiteSummary,
};
use tracing::{info, warn};

pub fn run(config: &Config, media_type: MediaType, sample: Option<&str>) -> Result<SuiteSummary> {
    let profile = ReferenceProfile::load(config).with_context(|| {
        format!(
            "Failed to load reference file {}",
            config.general.reference_file
        )
    })?;
    let table = profile.table(media_type)?;
    info!("Loaded {} {} reference rows", table.len(), media_type);

    for row in table.iter() {
        if !LoftyExtractor::is_supported_file(row.path()) {
            warn!("{} has an extension the lofty backend may not read", row.path());
        }
    }

    let validator = MetadataValidator::with_config(LoftyExtractor::new(), &config.validation);
    run_selected(table, &profile, &validator, sample)
}

/// Run one named sample when given, else the whole table
fn run_selected<R, E>(
    table: &ReferenceTable,
    reference: &R,
    validator: &MetadataValidator<E>,
    sample: Option<&str>,
) -> Result<SuiteSummary>
where
    R: ReferenceData + ?Sized,
    E: MetadataExtractor,
{
    let Some(label) = sample else {
        return Ok(run_table(table, reference, validator));
    };

    let result = if table.media_type() == MediaType::Mp3
        && let Ok(mp3) = label.parse::<Mp3Sample>()
    {
        run_case(&mp3, table, reference, validator)
    } else if let Some(row) = table.find_sample(label) {
        run_row(row, reference, validator)
    } else if let Ok(index) = label.parse::<usize>() {
        run_case(&RowIndex(index), table, reference, validator)
    } else {
        anyhow::bail!("No sample {} in the {} table", label, table.media_type());
    };

    Ok(SuiteSummary {
        cases: vec![(label.to_owned(), result)],
    })
}

/// One line per case, failure details indented below, then a totals line
pub fn render(summary: &SuiteSummary) -> String {
    let mut out = String::new();
    for (name, result) in &summary.cases {
        match result {
            Ok(CaseOutcome::Passed(_)) => {
                let _ = writeln!(out, "PASS {name}");
            }
            Ok(CaseOutcome::Skipped(reason)) => {
                let _ = writeln!(out, "SKIP {name} ({reason})");
            }
            Err(failure) => {
                let _ = writeln!(out, "FAIL {name}");
                for line in failure.to_string().lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
        }
    }
    let _ = writeln!(
        out,
        "{} passed, {} skipped, {} failed",
        summary.passed(),
        summary.skipped(),
        summary.failed()
    );
    out
}
