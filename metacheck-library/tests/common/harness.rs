/// Test harness for driving validation cases end to end
///
/// Loads the fixture reference file, builds a scripted extractor that agrees
/// with every row, and runs cases through the selector the way a suite would.
use camino::Utf8Path;
use metacheck_core::config::{Capabilities, ValidationConfig};
use metacheck_core::error::CaseFailure;
use metacheck_core::reference::{
    MediaType, ReferenceCatalog, ReferenceData, ReferenceProfile, ReferenceRow, ReferenceTable,
};
use metacheck_core::sample::Mp3Sample;
use metacheck_core::test_utils::ScriptedExtractor;
use metacheck_library::{run_case, CaseOutcome, MetadataValidator};

use crate::fixtures::{MEDIA_ROOT, REFERENCE_TOML};

pub struct ValidationHarness {
    pub profile: ReferenceProfile,
    pub extractor: ScriptedExtractor,
    pub config: ValidationConfig,
}

impl ValidationHarness {
    /// Fixture reference data, every gated format disabled
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::default())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        let catalog = ReferenceCatalog::from_toml_str(REFERENCE_TOML, Some(Utf8Path::new(MEDIA_ROOT)))
            .expect("fixture reference file parses");

        let mut extractor = ScriptedExtractor::new();
        for table in catalog.tables() {
            for row in table.iter() {
                extractor = extractor.with_row(row);
            }
        }

        Self {
            profile: ReferenceProfile::new(catalog, capabilities),
            extractor,
            config: ValidationConfig::default(),
        }
    }

    pub fn table(&self, media_type: MediaType) -> &ReferenceTable {
        self.profile.table(media_type).expect("fixture table present")
    }

    pub fn mp3_row(&self, sample: Mp3Sample) -> &ReferenceRow {
        self.table(MediaType::Mp3)
            .row(&sample)
            .expect("fixture row present")
    }

    pub fn validator(&self) -> MetadataValidator<&ScriptedExtractor> {
        MetadataValidator::with_config(&self.extractor, &self.config)
    }

    pub fn run_mp3(&self, sample: Mp3Sample) -> Result<CaseOutcome, CaseFailure> {
        run_case(&sample, self.table(MediaType::Mp3), &self.profile, &self.validator())
    }

    /// Run the first row of a table
    pub fn run_first(&self, media_type: MediaType) -> Result<CaseOutcome, CaseFailure> {
        let table = self.table(media_type);
        run_case(&metacheck_core::sample::RowIndex(0), table, &self.profile, &self.validator())
    }
}

/// Test-runner contract: a failure panics, a pass or a skip returns normally
pub fn assert_case_ok(result: Result<CaseOutcome, CaseFailure>) -> CaseOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(failure) => panic!("{failure}"),
    }
}
