use std::path::{Path, PathBuf};

use crate::episode::EpisodeRef;

// @module: Per-series path conventions under the library root

/// Path conventions for one episode library.
///
/// Every content kind lives under its own top-level directory with
/// per-series subdirectories named by episode slug:
///
/// ```text
/// <root>/episodes/<series>/<slug>.mp3
/// <root>/markers/<series>/<slug>.csv
/// <root>/json/<series>/<slug>.json      (+ json/template.json)
/// <root>/sns/<series>/<slug>.txt
/// <root>/csv/<series>/<slug>.csv
/// <root>/photos/eyecatch/<series>/<slug>.jpg
/// <root>/photos/ai-generated/<series>/<slug>.jpg
/// <root>/photos/edited-icon/<series>/icon-<slug>.jpg
/// <root>/photos/starrings/<name>.jpg
/// ```
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Create a library rooted at the given directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Library {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The library root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Episode audio file.
    pub fn audio_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root.join("episodes").join(episode.rel_path("mp3"))
    }

    /// Marker table exported from the audio editor.
    pub fn markers_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root.join("markers").join(episode.rel_path("csv"))
    }

    /// Episode metadata record.
    pub fn json_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root.join("json").join(episode.rel_path("json"))
    }

    /// Template seeding new metadata records.
    pub fn json_template_path(&self) -> PathBuf {
        self.root.join("json").join("template.json")
    }

    /// Root of the metadata records, for the related-episode scan.
    pub fn json_root(&self) -> PathBuf {
        self.root.join("json")
    }

    /// SNS post text.
    pub fn sns_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root.join("sns").join(episode.rel_path("txt"))
    }

    /// Transcript segment table.
    pub fn transcript_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root.join("csv").join(episode.rel_path("csv"))
    }

    /// Hand-picked episode photo.
    pub fn eyecatch_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root
            .join("photos")
            .join("eyecatch")
            .join(episode.rel_path("jpg"))
    }

    /// Generated episode artwork.
    pub fn artwork_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root
            .join("photos")
            .join("ai-generated")
            .join(episode.rel_path("jpg"))
    }

    /// Composed promo icon.
    pub fn promo_icon_path(&self, episode: &EpisodeRef) -> PathBuf {
        self.root
            .join("photos")
            .join("edited-icon")
            .join(&episode.series)
            .join(format!("icon-{}.jpg", episode.slug()))
    }

    /// Cast member icon photo.
    pub fn starr_icon_path(&self, name: &str) -> PathBuf {
        self.root
            .join("photos")
            .join("starrings")
            .join(format!("{}.jpg", name))
    }

    /// The show's own icon, overlaid on promo images.
    pub fn show_icon_path(&self) -> PathBuf {
        self.root.join("concast.png")
    }
}
