use std::path::Path;

use anyhow::{anyhow, Result};
use log::info;

use crate::file_handlers;
use crate::providers::openai::OpenAi;

// @module: Episode artwork generation

/// Generates episode artwork from the topic list.
#[derive(Debug)]
pub struct ArtworkGenerator<'a> {
    client: &'a OpenAi,
    size: String,
}

impl<'a> ArtworkGenerator<'a> {
    /// Create a generator using the given client and image size.
    pub fn new(client: &'a OpenAi, size: impl Into<String>) -> Self {
        Self {
            client,
            size: size.into(),
        }
    }

    /// Prompt for the image API: the topics joined into one line.
    pub fn create_prompt(topics: &[String]) -> Result<String> {
        if topics.is_empty() {
            return Err(anyhow!("No topics found!"));
        }
        Ok(topics.join(", "))
    }

    /// Generate one image from the topics and save it to the given path.
    pub async fn create_and_save(&self, topics: &[String], output: &Path) -> Result<()> {
        let prompt = Self::create_prompt(topics)?;
        let response = self.client.generate_image(prompt, &self.size).await?;
        let url = response
            .data
            .first()
            .map(|image| image.url.as_str())
            .ok_or_else(|| anyhow!("Image API returned no images"))?;

        let bytes = self.client.download_image(url).await?;
        file_handlers::write_bytes(output, &bytes)?;
        info!("Image saved to {}!", output.display());
        Ok(())
    }
}
