use camino::{Utf8Path, Utf8PathBuf};
use lofty::file::TaggedFile;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use metacheck_core::error::{MetacheckError, Result};
use metacheck_core::extract::{ExtractionSession, MetadataExtractor};
use metacheck_core::field::FieldKind;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Extraction backend reading tags and properties with lofty
#[derive(Debug, Copy, Clone, Default)]
pub struct LoftyExtractor;

impl LoftyExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn is_supported_file(path: &Utf8Path) -> bool {
        if let Some(ext) = path.extension() {
            matches!(
                ext.to_lowercase().as_str(),
                "mp3"
                    | "flac"
                    | "ogg"
                    | "opus"
                    | "m4a"
                    | "aac"
                    | "wav"
                    | "wma"
                    | "ape"
                    | "wv"
                    | "dsf"
                    | "dff"
            )
        } else {
            false
        }
    }
}

impl MetadataExtractor for LoftyExtractor {
    type Session = LoftySession;

    fn open(&self, path: &Utf8Path) -> Result<LoftySession> {
        let tagged_file = Probe::open(path.as_str())
            .map_err(|e| MetacheckError::Extraction(format!("Failed to open file: {e}")))?
            .read()
            .map_err(|e| MetacheckError::Extraction(format!("Failed to read file: {e}")))?;

        tracing::debug!("Extracting metadata from: {}", path);
        tracing::debug!(
            "Tag present: {}",
            tagged_file.primary_tag().or_else(|| tagged_file.first_tag()).is_some()
        );

        Ok(LoftySession {
            path: path.to_owned(),
            tagged_file: Some(tagged_file),
        })
    }
}

/// A file parsed by lofty, held until released
#[derive(Debug)]
pub struct LoftySession {
    path: Utf8PathBuf,
    tagged_file: Option<TaggedFile>,
}

impl ExtractionSession for LoftySession {
    fn extract(&self, field: FieldKind) -> Option<String> {
        let tagged_file = self.tagged_file.as_ref()?;

        match field {
            FieldKind::FilePath => Some(self.path.to_string()),
            FieldKind::Duration => Some(
                tagged_file
                    .properties()
                    .duration()
                    .as_millis()
                    .to_string(),
            ),
            FieldKind::NumTracks => count_tracks(&self.path)
                .or_else(|| has_audio(tagged_file).then_some(1))
                .map(|n| n.to_string()),
            field => tagged_file
                .primary_tag()
                .or_else(|| tagged_file.first_tag())
                .and_then(|tag| tag_value(tag, field)),
        }
    }

    fn release(&mut self) {
        self.tagged_file = None;
    }
}

fn tag_value(tag: &Tag, field: FieldKind) -> Option<String> {
    let value = match field {
        FieldKind::CdTrack => tag.track().map(|track| match tag.track_total() {
            Some(total) => format!("{track}/{total}"),
            None => track.to_string(),
        }),
        FieldKind::Album => tag.album().map(|s| s.to_string()),
        FieldKind::Artist => tag.artist().map(|s| s.to_string()),
        // ID3 TEXT (lyricist/text writer) is what players report as author
        FieldKind::Author => tag.get_string(ItemKey::Lyricist).map(|s| s.to_string()),
        FieldKind::Composer => tag.get_string(ItemKey::Composer).map(|s| s.to_string()),
        FieldKind::Date => tag.date().map(|d| d.to_string()),
        FieldKind::Genre => tag.genre().map(|s| s.to_string()),
        FieldKind::Title => tag.title().map(|s| s.to_string()),
        FieldKind::Year => tag.date().map(|d| d.year.to_string()),
        FieldKind::Writer => tag.get_string(ItemKey::Writer).map(|s| s.to_string()),
        FieldKind::FilePath | FieldKind::Duration | FieldKind::NumTracks => None,
    };

    value.filter(|v| !v.is_empty())
}

fn has_audio(tagged_file: &TaggedFile) -> bool {
    let properties = tagged_file.properties();
    properties.sample_rate().is_some() || properties.channels().is_some()
}

/// Number of tracks with a known codec, as seen by symphonia's demuxers
fn count_tracks(path: &Utf8Path) -> Option<usize> {
    let file = std::fs::File::open(path).ok()?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension() {
        hint.with_extension(ext);
    }

    let probed = match symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    ) {
        Ok(probed) => probed,
        Err(e) => {
            tracing::debug!("Track count unavailable for {}: {}", path, e);
            return None;
        }
    };

    let count = probed
        .format
        .tracks()
        .iter()
        .filter(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .count();

    (count > 0).then_some(count)
}
