use std::path::Path;
use std::time::Duration;

use id3::frame::{Chapter as ChapterFrame, Content, Frame, TableOfContents};
use id3::{Tag, TagLike, Version};
use lofty::file::AudioFile;
use lofty::probe::Probe;
use log::{debug, info, warn};

use crate::errors::{MarkerError, TagError};
use crate::markers::{parse_timestr_ms, MarkerRow};

// @module: Chapter metadata construction and ID3 embedding

/// Element id of the table-of-contents frame.
const TOC_ELEMENT_ID: &str = "toc";

// @struct: One navigable chapter derived from a marker row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    // @field: Sequence label, `chp<N>`, 1-based
    pub element_id: String,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms (start + duration)
    pub end_ms: u64,

    // @field: Chapter title, verbatim from the marker name
    pub title: String,
}

/// The full chapter set for one audio file, ready for embedding.
#[derive(Debug)]
pub struct ChapterSet {
    /// Chapters in marker-table order
    pub chapters: Vec<Chapter>,
}

impl ChapterSet {
    /// Derive chapters from marker rows.
    ///
    /// Every row must parse before any chapter is produced, so a bad
    /// timestamp can never leave a file with a truncated chapter set.
    pub fn from_markers(rows: &[MarkerRow]) -> Result<Self, MarkerError> {
        let mut chapters = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let start_ms = parse_timestr_ms(&row.start)?;
            let duration_ms = parse_timestr_ms(&row.duration)?;
            chapters.push(Chapter {
                element_id: format!("chp{}", i + 1),
                start_ms,
                end_ms: start_ms + duration_ms,
                title: row.name.clone(),
            });
        }
        Ok(ChapterSet { chapters })
    }

    /// Ordered chapter element ids for the table of contents.
    pub fn toc_entries(&self) -> Vec<String> {
        self.chapters
            .iter()
            .map(|chapter| chapter.element_id.clone())
            .collect()
    }

    /// Log a warning when the last chapter runs past the audio duration.
    ///
    /// Markers exported with a sloppy final duration can overshoot the file;
    /// the times are embedded as-is, this only surfaces the mismatch.
    pub fn flag_overrun(&self, audio_duration: Duration) {
        let total_ms = audio_duration.as_millis() as u64;
        if let Some(last) = self.chapters.last() {
            if last.end_ms > total_ms {
                warn!(
                    "Final chapter '{}' ends at {} ms but the audio is {} ms long",
                    last.title, last.end_ms, total_ms
                );
            }
        }
    }
}

/// Write a chapter set into the ID3 container of an MP3 file.
///
/// The existing tag is loaded (a missing tag starts a fresh one), one
/// top-level ordered TOC frame and one chapter frame per entry are added,
/// then the tag is saved. Frames are keyed by element id, so re-tagging a
/// file replaces its previous chapter set instead of duplicating it.
pub fn write_chapters<P: AsRef<Path>>(audio_path: P, set: &ChapterSet) -> Result<(), TagError> {
    let audio_path = audio_path.as_ref();
    if !audio_path.is_file() {
        return Err(TagError::AudioFileNotFound(audio_path.to_path_buf()));
    }

    let mut tag = match Tag::read_from_path(audio_path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Tag::new(),
        Err(e) => return Err(TagError::Container(e)),
    };

    tag.add_frame(TableOfContents {
        element_id: TOC_ELEMENT_ID.to_string(),
        top_level: true,
        ordered: true,
        elements: set.toc_entries(),
        frames: Vec::new(),
    });

    for chapter in &set.chapters {
        debug!(
            "chapter {}: {} -> {} ms, '{}'",
            chapter.element_id, chapter.start_ms, chapter.end_ms, chapter.title
        );
        tag.add_frame(ChapterFrame {
            element_id: chapter.element_id.clone(),
            start_time: clamp_ms(chapter.start_ms),
            end_time: clamp_ms(chapter.end_ms),
            // 0xFFFFFFFF marks the byte offsets as unused; players fall
            // back to the millisecond times
            start_offset: u32::MAX,
            end_offset: u32::MAX,
            frames: vec![Frame::with_content(
                "TIT2",
                Content::Text(chapter.title.clone()),
            )],
        });
    }

    tag.write_to_path(audio_path, Version::Id3v24)?;
    info!(
        "Wrote {} chapters to {}",
        set.chapters.len(),
        audio_path.display()
    );
    Ok(())
}

/// Probe the audio file for its playback duration.
///
/// Returns `None` when the file cannot be probed; tagging proceeds without
/// the overrun check in that case.
pub fn probe_duration<P: AsRef<Path>>(audio_path: P) -> Option<Duration> {
    match Probe::open(audio_path.as_ref()).and_then(|probe| probe.read()) {
        Ok(tagged) => Some(tagged.properties().duration()),
        Err(e) => {
            debug!("Could not probe audio duration: {}", e);
            None
        }
    }
}

// ID3 stores chapter times as 32-bit milliseconds
fn clamp_ms(ms: u64) -> u32 {
    ms.min(u64::from(u32::MAX)) as u32
}
