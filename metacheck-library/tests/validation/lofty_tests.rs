/// Lofty backend tests
///
/// Missing and corrupt sources must fail to open. With FFmpeg installed,
/// generated samples are validated against rows describing their tags.
use camino::Utf8PathBuf;
use metacheck_core::error::CaseFailure;
use metacheck_core::extract::{ExtractionSession, MetadataExtractor};
use metacheck_core::field::FieldKind;
use metacheck_core::reference::ReferenceRow;
use metacheck_library::{LoftyExtractor, MetadataValidator, SessionState};

use crate::fixtures::{SampleFormat, SampleGenerator, SampleTags};

/// Helper to check if FFmpeg is available
macro_rules! require_ffmpeg {
    () => {
        if !SampleGenerator::is_ffmpeg_available() {
            eprintln!("FFmpeg not available - skipping test");
            return;
        }
    };
}

fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::try_from(path).unwrap()
}

#[test]
fn test_missing_file_fails_case_without_checks() {
    let row = ReferenceRow::new("/nonexistent/metacheck/ID3V1.mp3").with(FieldKind::Album, "X");

    let err = MetadataValidator::new(LoftyExtractor::new())
        .validate(&row)
        .unwrap_err();

    assert!(matches!(err, CaseFailure::Open { .. }));
    assert!(err.to_string().contains("/nonexistent/metacheck/ID3V1.mp3"));
}

#[test]
fn test_corrupt_file_fails_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = utf8(dir.path().join("corrupt.flac"));
    std::fs::write(&path, b"This is not a valid audio file").unwrap();

    let err = MetadataValidator::new(LoftyExtractor::new())
        .validate(&ReferenceRow::new(path))
        .unwrap_err();

    assert!(matches!(err, CaseFailure::Open { .. }));
}

#[test]
fn test_generated_mp3_matches_reference_row() {
    require_ffmpeg!();

    let tags = SampleTags::default();
    let (_dir, path) = match SampleGenerator::generate(SampleFormat::Mp3, &tags) {
        Ok(generated) => generated,
        Err(e) => {
            eprintln!("Sample generation failed - skipping test: {e}");
            return;
        }
    };

    let row = ReferenceRow::new(utf8(path))
        .with(FieldKind::CdTrack, "3")
        .with(FieldKind::Album, "Generated Album")
        .with(FieldKind::Artist, "Generated Artist")
        .with(FieldKind::Genre, "Rock")
        .with(FieldKind::Title, "Generated Title")
        .with(FieldKind::Duration, "1000")
        .with(FieldKind::NumTracks, "1");

    let report = MetadataValidator::new(LoftyExtractor::new())
        .validate(&row)
        .unwrap_or_else(|failure| panic!("{failure}"));

    assert_eq!(report.state, SessionState::Released);
}

#[test]
fn test_generated_flac_exposes_tags() {
    require_ffmpeg!();

    let tags = SampleTags {
        composer: Some("Generated Composer".to_string()),
        ..Default::default()
    };
    let (_dir, path) = match SampleGenerator::generate(SampleFormat::Flac, &tags) {
        Ok(generated) => generated,
        Err(e) => {
            eprintln!("Sample generation failed - skipping test: {e}");
            return;
        }
    };
    let path = utf8(path);

    let mut session = LoftyExtractor::new().open(&path).unwrap();

    assert_eq!(session.extract(FieldKind::FilePath), Some(path.to_string()));
    assert_eq!(session.extract(FieldKind::Title), Some("Generated Title".to_string()));
    assert_eq!(
        session.extract(FieldKind::Composer),
        Some("Generated Composer".to_string())
    );
    assert_eq!(session.extract(FieldKind::Writer), None);

    let duration: i64 = session
        .extract(FieldKind::Duration)
        .and_then(|d| d.parse().ok())
        .unwrap();
    assert!((duration - 1000).abs() < 100, "duration {duration}ms");

    session.release();
    session.release();
    assert_eq!(session.extract(FieldKind::Title), None);
}
