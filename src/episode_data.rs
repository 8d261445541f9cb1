use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::episode::EpisodeRef;

// @module: Episode metadata record and formatting

/// Per-episode metadata record stored as `json/<series>/<slug>.json`.
///
/// Field names mirror the on-disk JSON, which predates this tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeData {
    /// Episode number, or the series name for un-numbered specials
    #[serde(rename = "Number", default)]
    pub number: String,

    /// Episode title
    #[serde(rename = "Title", default)]
    pub title: String,

    /// Cast members, name to profile link (may be null)
    #[serde(rename = "Starr", default)]
    pub starr: serde_json::Map<String, Value>,

    /// Topic lines shown on the episode page and in the SNS post
    #[serde(rename = "Topics", default)]
    pub topics: Vec<String>,

    /// Reference links, display text to URL
    #[serde(rename = "References", default)]
    pub references: serde_json::Map<String, Value>,

    /// Series the episode belongs to
    #[serde(rename = "Genre", default)]
    pub genre: String,

    /// Set once topics have been generated; edited episodes are skipped
    #[serde(rename = "Edited", default)]
    pub edited: bool,
}

impl EpisodeData {
    /// Load an episode record from a JSON file.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open episode data: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse episode data: {}", path.display()))
    }

    /// Save the record as pretty-printed JSON, preserving non-ASCII text.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write episode data: {}", path.display()))
    }

    /// Check that the record belongs to the episode being processed.
    ///
    /// A numbered episode must match `Number` exactly; an un-numbered one
    /// must carry its series name there.
    pub fn validate_for(&self, episode: &EpisodeRef) -> Result<()> {
        match &episode.episode_id {
            Some(id) if *id != self.number => Err(anyhow!(
                "Episode number mismatch: {} != {}",
                id,
                self.number
            )),
            None if episode.series != self.number => Err(anyhow!(
                "Episode name mismatch: {} != {}",
                episode.series,
                self.number
            )),
            _ => Ok(()),
        }
    }

    /// Cast names joined for display, in record order.
    pub fn starr_names(&self) -> Vec<&str> {
        self.starr.keys().map(String::as_str).collect()
    }

    /// Display title: `#<number> <title> (<cast>)` for numbered episodes,
    /// `<title> (<cast>)` otherwise.
    pub fn format_title(&self) -> String {
        let starr = self.starr_names().join(", ");
        if !self.number.is_empty() && self.number.bytes().all(|b| b.is_ascii_digit()) {
            format!("#{} {} ({})", self.number, self.title, starr)
        } else {
            format!("{} ({})", self.title, starr)
        }
    }

    /// Topics as an HTML ordered list for the episode page.
    pub fn format_comments(&self) -> String {
        let items: String = self
            .topics
            .iter()
            .map(|topic| format!("<li>{}</li>", topic))
            .collect();
        format!("<ol>{}</ol>", items)
    }

    /// Topics as numbered plain-text lines for the SNS post.
    pub fn format_comments_sns(&self) -> String {
        self.topics
            .iter()
            .enumerate()
            .map(|(i, topic)| format!("{}. {}", i + 1, topic))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
