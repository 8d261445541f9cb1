use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::episode::EpisodeRef;
use crate::episode_data::EpisodeData;
use crate::file_handlers;
use crate::html;

// @module: Episode web fragment and SNS post assembly

/// Assembled outputs for one episode post.
#[derive(Debug)]
pub struct EpisodePost {
    /// HTML fragment for the episode web page
    pub web_fragment: String,

    /// Plain-text SNS post
    pub sns_text: String,
}

/// Build the web fragment and SNS text for an episode record.
pub fn build_post(
    episode: &EpisodeRef,
    data: &EpisodeData,
    site_base_url: &str,
    hashtags: &str,
    share_url: &str,
) -> EpisodePost {
    let title = data.format_title();

    let comments = data.format_comments();
    let header_html = html::create_header_html(Some(&comments));
    let references_html = html::create_references_html(&data.references);
    let web_fragment = format!("{}{}{}", title, header_html, references_html);

    let url = format!("{}{}/", site_base_url, episode.slug());
    let sns_text = [
        title.clone(),
        data.format_comments_sns(),
        hashtags.to_string(),
        format!("👇視聴はこちらから {}", share_url),
    ]
    .join("\n\n");
    // The page URL rides along in the log only; the SNS platforms pick the
    // link up from the linktree
    info!("Episode page: {}", url);

    EpisodePost {
        web_fragment,
        sns_text,
    }
}

/// Write the SNS post file and copy the web fragment to the clipboard.
///
/// Clipboard access is best-effort: a headless environment downgrades the
/// copy to a warning, the file output still lands.
pub fn publish_post(post: &EpisodePost, sns_path: &Path) -> Result<()> {
    match copy_to_clipboard(&post.web_fragment) {
        Ok(()) => info!("Copied web fragment to clipboard!"),
        Err(e) => warn!("Clipboard unavailable, skipping copy: {}", e),
    }

    file_handlers::write_text(sns_path, &post.sns_text)
        .with_context(|| format!("Failed to write SNS post: {}", sns_path.display()))?;
    info!("Wrote SNS post to {}", sns_path.display());
    Ok(())
}

pub(crate) fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
