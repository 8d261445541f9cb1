use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;

use crate::episode::normalize_extension;
use crate::markers::MarkerTable;

// @module: Extension-dispatched file access with template fallback

/// Content kinds the pipeline reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Episode metadata records
    Json,
    /// Tab-separated marker/transcript tables
    Tabular,
    /// SNS posts and other plain text
    Text,
    /// Photos and icons, handled as raw bytes
    Image,
}

/// Loaded file content, tagged by kind.
#[derive(Debug)]
pub enum Content {
    Json(Value),
    Tabular(MarkerTable),
    Text(String),
    Image(Vec<u8>),
}

/// Select the content kind for a file extension.
pub fn kind_for_extension(extension: &str) -> Result<FileKind> {
    match normalize_extension(extension).as_str() {
        "json" => Ok(FileKind::Json),
        "csv" | "tsv" => Ok(FileKind::Tabular),
        "txt" => Ok(FileKind::Text),
        "png" | "jpg" | "bmp" | "tif" | "gif" => Ok(FileKind::Image),
        other => Err(anyhow!("No handler for file type: .{}", other)),
    }
}

/// Select the content kind for a path by its extension.
pub fn kind_for_path<P: AsRef<Path>>(path: P) -> Result<FileKind> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| anyhow!("Path has no extension: {}", path.display()))?;
    kind_for_extension(extension)
}

impl FileKind {
    /// Check that a file exists at the path.
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Read the file, optionally seeding it from a template when absent.
    ///
    /// With `use_template_if_absent`, a missing target is copied from the
    /// template path first, so later saves land on a complete record.
    pub fn read<P: AsRef<Path>>(
        &self,
        path: P,
        template_path: Option<&Path>,
        use_template_if_absent: bool,
    ) -> Result<Content> {
        let path = path.as_ref();
        if !self.exists(path) {
            let template_path = template_path.filter(|_| use_template_if_absent).ok_or_else(
                || anyhow!("{} not found.", path.display()),
            )?;
            if !self.exists(template_path) {
                return Err(anyhow!("Template {} not found.", template_path.display()));
            }
            let content = self.read(template_path, None, false)?;
            self.save(&content, path)?;
            return Ok(content);
        }

        match self {
            FileKind::Json => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                Ok(Content::Json(serde_json::from_str(&raw)?))
            }
            FileKind::Tabular => Ok(Content::Tabular(MarkerTable::read_from_path(path)?)),
            FileKind::Text => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                Ok(Content::Text(raw))
            }
            FileKind::Image => {
                let raw = fs::read(path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                Ok(Content::Image(raw))
            }
        }
    }

    /// Save content to a path, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, content: &Content, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        match content {
            Content::Json(value) => {
                let json = serde_json::to_string_pretty(value)?;
                fs::write(path, json)
            }
            Content::Tabular(table) => {
                let mut out = String::from("Start\tDuration\tName\n");
                for row in &table.rows {
                    out.push_str(&format!("{}\t{}\t{}\n", row.start, row.duration, row.name));
                }
                fs::write(path, out)
            }
            Content::Text(text) => fs::write(path, text),
            Content::Image(bytes) => fs::write(path, bytes),
        }
        .with_context(|| format!("Failed to write to file: {}", path.display()))
    }
}

/// Write a string to a file, creating parent directories as needed.
pub fn write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    FileKind::Text.save(&Content::Text(content.to_string()), path)
}

/// Write raw bytes to a file, creating parent directories as needed.
pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    FileKind::Image.save(&Content::Image(content.to_vec()), path)
}
