use anyhow::{anyhow, Result};
use log::info;

use crate::episode::EpisodeRef;
use crate::episode_data::EpisodeData;
use crate::errors::ProviderError;
use crate::providers::openai::{ChatRequest, ChatResponse};
use crate::providers::Provider;

// @module: Topic summarization from marker names

const SYSTEM_PROMPT: &str = "You are a professional podcast editor.";

/// Generates topic summaries for an episode from its marker names.
#[derive(Debug)]
pub struct TopicsGenerator<P> {
    provider: P,
    model: String,
}

impl<P> TopicsGenerator<P>
where
    P: Provider<Request = ChatRequest, Response = ChatResponse>,
{
    /// Create a generator backed by the given chat provider.
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Summarize the marker memo into topic lines.
    ///
    /// The provider is asked for at most five Japanese list items, each led
    /// by an emoji; the reply is split on newlines, blank lines dropped.
    pub async fn topics_from_markers(&self, marker_names: &[&str]) -> Result<Vec<String>, ProviderError> {
        let memo = marker_names.join(", ");
        let request = ChatRequest::new(self.model.as_str())
            .add_message("system", SYSTEM_PROMPT)
            .add_message(
                "user",
                format!(
                    "I have a podcast episode memo. Please read and summarize it in a list \
                     format using main points and themes in JAPANESE. This will be captivating \
                     the potential listeners. The number of items should be 5 at most. Each \
                     item should contain a keyword, possibly with a verb if appropriate, and \
                     start with an emoji to represent it. DO NOT IN ANY CIRCUMSTANCES WRITE \
                     ANYTHING ELSE. Here's the memo:{}",
                    memo
                ),
            );

        let response = self.provider.complete(request).await?;
        let text = P::extract_text(&response);
        let topics: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        if topics.is_empty() {
            return Err(ProviderError::EmptyResponse(
                "provider returned no topic lines".to_string(),
            ));
        }
        Ok(topics)
    }

    /// Fill in an episode record's topics and stamp it as edited.
    ///
    /// Already-edited records are left untouched and reported as skipped.
    /// Returns whether the record was updated.
    pub async fn enrich(
        &self,
        episode: &EpisodeRef,
        data: &mut EpisodeData,
        marker_names: &[&str],
    ) -> Result<bool> {
        if data.edited {
            info!("Episode {} is already edited.", episode);
            return Ok(false);
        }
        if marker_names.is_empty() {
            return Err(anyhow!("No markers found for episode {}", episode));
        }

        let topics = self.topics_from_markers(marker_names).await?;
        data.number = episode.slug().to_string();
        data.genre = episode.series.clone();
        data.topics.extend(topics);
        data.edited = true;
        Ok(true)
    }
}
