/// Failure reporting tests
///
/// A failed case must name the field with expected and actual values, and
/// the extraction session must be released whatever happened.
use metacheck_core::error::CaseFailure;
use metacheck_core::field::FieldKind;
use metacheck_core::sample::Mp3Sample;
use metacheck_core::test_utils::{create_test_row, ExtractorEvent, ScriptedExtractor};
use metacheck_library::{MetadataValidator, SessionState};

use crate::common::harness::ValidationHarness;

#[test]
fn test_missing_album_reported_and_session_released() {
    let row = create_test_row("/media/id3v1v2.mp3");
    let mut extractor = ScriptedExtractor::new().with_row(&row);
    extractor.set_value(row.path(), FieldKind::Album, None);

    let err = MetadataValidator::new(&extractor).validate(&row).unwrap_err();

    let mismatches = err.mismatches();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].field, FieldKind::Album);
    assert_eq!(mismatches[0].expected.as_deref(), Some("AlbumX"));
    assert_eq!(mismatches[0].actual, None);
    assert!(err.to_string().contains("ALBUM"));
    assert_eq!(extractor.release_count(), 1);
}

#[test]
fn test_case_sensitive_artist_mismatch() {
    let row = create_test_row("/media/id3v1v2.mp3").with(FieldKind::Artist, "The Beatles");
    let mut extractor = ScriptedExtractor::new().with_row(&row);
    extractor.set_value(row.path(), FieldKind::Artist, Some("the beatles"));

    let err = MetadataValidator::new(&extractor).validate(&row).unwrap_err();

    assert_eq!(err.mismatches()[0].field, FieldKind::Artist);
    assert!(err.to_string().contains("\"the beatles\""));
}

#[test]
fn test_duration_beyond_tolerance_fails() {
    let row = create_test_row("/media/id3v1v2.mp3").with(FieldKind::Duration, "5000");
    let mut extractor = ScriptedExtractor::new().with_row(&row);
    extractor.set_value(row.path(), FieldKind::Duration, Some("5101"));

    let err = MetadataValidator::new(&extractor).validate(&row).unwrap_err();
    assert_eq!(err.mismatches()[0].field, FieldKind::Duration);

    extractor.set_value(row.path(), FieldKind::Duration, Some("5099"));
    assert!(MetadataValidator::new(&extractor).validate(&row).is_ok());
}

#[test]
fn test_unparseable_extracted_duration_fails() {
    let row = create_test_row("/media/id3v1v2.mp3");
    let mut extractor = ScriptedExtractor::new().with_row(&row);
    extractor.set_value(row.path(), FieldKind::Duration, Some("unknown"));

    let err = MetadataValidator::new(&extractor).validate(&row).unwrap_err();
    assert!(err.mismatches()[0].detail.contains("not an integer"));
    assert_eq!(extractor.release_count(), 1);
}

#[test]
fn test_open_failure_is_fatal_and_attempts_nothing_else() {
    let row = create_test_row("/media/unreadable.mp3");
    let extractor = ScriptedExtractor::new().with_broken_source(row.path(), "unsupported codec");

    let err = MetadataValidator::new(&extractor).validate(&row).unwrap_err();

    match err {
        CaseFailure::Open {
            ref path,
            state,
            ref source,
        } => {
            assert_eq!(path, "/media/unreadable.mp3");
            assert_eq!(state, SessionState::Failed);
            assert!(source.to_string().contains("unsupported codec"));
        }
        other => panic!("expected open failure, got {other}"),
    }
    assert_eq!(
        extractor.events(),
        vec![ExtractorEvent::OpenFailed(row.path().to_owned())]
    );
}

#[test]
fn test_all_mismatches_reported_in_check_order() {
    let mut harness = ValidationHarness::new();
    let path = harness.mp3_row(Mp3Sample::Id3v2).path().to_owned();
    harness.extractor.set_value(&path, FieldKind::NumTracks, Some("2"));
    harness.extractor.set_value(&path, FieldKind::CdTrack, Some("2"));
    harness.extractor.set_value(&path, FieldKind::Genre, None);

    let err = harness.run_mp3(Mp3Sample::Id3v2).unwrap_err();
    let fields: Vec<FieldKind> = err.mismatches().iter().map(|m| m.field).collect();

    assert_eq!(
        fields,
        vec![FieldKind::CdTrack, FieldKind::Genre, FieldKind::NumTracks]
    );
    assert_eq!(harness.extractor.release_count(), 1);
}

#[test]
fn test_fail_fast_still_releases() {
    let mut harness = ValidationHarness::new();
    harness.config.fail_fast = true;
    let path = harness.mp3_row(Mp3Sample::Id3v1).path().to_owned();
    harness.extractor.set_value(&path, FieldKind::CdTrack, Some("9"));

    let report = harness
        .validator()
        .check(harness.mp3_row(Mp3Sample::Id3v1))
        .unwrap();

    assert_eq!(report.checks.len(), 1);
    assert_eq!(report.state, SessionState::Released);
    assert_eq!(harness.extractor.release_count(), 1);
}

#[test]
fn test_missing_sample_row_fails_case() {
    let harness = ValidationHarness::new();
    let table = metacheck_core::reference::ReferenceTable::new(
        metacheck_core::reference::MediaType::Mp3,
        Vec::new(),
    );

    let err = metacheck_library::run_case(
        &Mp3Sample::Id3v1v2,
        &table,
        &harness.profile,
        &harness.validator(),
    )
    .unwrap_err();

    assert!(matches!(err, CaseFailure::MissingSample { .. }));
    assert!(err.to_string().contains("ID3V1V2"));
}
