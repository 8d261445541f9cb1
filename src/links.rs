use anyhow::{anyhow, Context, Result};
use log::info;
use scraper::{Html, Selector};

// @module: Reference-link capture

/// Fetch a page and return the text of its `<title>` element.
pub async fn fetch_title(url: &str) -> Result<String> {
    let body = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .text()
        .await
        .context("Failed to read response body")?;
    extract_title(&body).ok_or_else(|| anyhow!("Page has no <title>: {}", url))
}

/// Pull the `<title>` text out of an HTML document.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let title: String = document.select(&selector).next()?.text().collect();
    let title = title.trim().to_string();
    (!title.is_empty()).then_some(title)
}

/// Format a reference as the JSON key-value line pasted into episode records.
pub fn format_reference(title: &str, url: &str) -> String {
    format!("\"{}\": \"{}\",", title, url)
}

/// Read a URL from the clipboard and put its reference line back on it.
pub async fn capture_reference() -> Result<()> {
    let url = {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.get_text().context("Clipboard has no URL")?
    };
    let url = url.trim().to_string();
    if !url.starts_with("http") {
        return Err(anyhow!("Clipboard content is not a URL: {}", url));
    }

    let title = fetch_title(&url).await?;
    arboard::Clipboard::new()?.set_text(format_reference(&title, &url))?;
    info!(
        "A key-value pair was copied to clipboard!\ntitle:\n\t{}\nurl:\n\t{}",
        title, url
    );
    Ok(())
}
