use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::app_config::Config;
use crate::artwork::ArtworkGenerator;
use crate::chapters::{self, ChapterSet};
use crate::compose::{CropRect, PromoComposer};
use crate::episode::EpisodeRef;
use crate::episode_data::EpisodeData;
use crate::file_handlers::{Content, FileKind};
use crate::html;
use crate::library::Library;
use crate::markers::MarkerTable;
use crate::post;
use crate::providers::openai::OpenAi;
use crate::search::{self, SearchAttrs};
use crate::topics::TopicsGenerator;
use crate::transcribe;

// @module: Per-episode pipeline orchestration

/// Main application controller for episode post-production
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Library path conventions
    library: Library,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let library = Library::new(&config.library_root);
        Ok(Self { config, library })
    }

    /// The library this controller operates on.
    pub fn library(&self) -> &Library {
        &self.library
    }

    fn client(&self) -> OpenAi {
        OpenAi::with_timeout(
            self.config.api_key(),
            self.config.provider.endpoint.as_str(),
            Duration::from_secs(self.config.provider.timeout_secs),
        )
    }

    /// Load the episode record, seeding it from the template when absent.
    fn load_episode_data(&self, episode: &EpisodeRef) -> Result<EpisodeData> {
        let path = self.library.json_path(episode);
        let template = self.library.json_template_path();
        let content = FileKind::Json.read(&path, Some(template.as_path()), true)?;
        match content {
            Content::Json(value) => serde_json::from_value(value)
                .with_context(|| format!("Malformed episode record: {}", path.display())),
            _ => unreachable!("json handler returned non-json content"),
        }
    }

    /// Embed chapter tags into the episode audio from its marker table.
    pub fn tag_episode(&self, episode: &EpisodeRef) -> Result<()> {
        let markers_path = self.library.markers_path(episode);
        let audio_path = self.library.audio_path(episode);

        let table = MarkerTable::read_from_path(&markers_path)?;
        let set = ChapterSet::from_markers(&table.rows)?;
        info!(
            "Building {} chapters for {}",
            set.chapters.len(),
            episode
        );

        if let Some(duration) = chapters::probe_duration(&audio_path) {
            set.flag_overrun(duration);
        }
        chapters::write_chapters(&audio_path, &set)?;
        Ok(())
    }

    /// Generate topics from the marker names into the episode record.
    pub async fn generate_topics(&self, episode: &EpisodeRef) -> Result<()> {
        let markers_path = self.library.markers_path(episode);
        let table = MarkerTable::read_from_path(&markers_path)?;

        let mut data = self.load_episode_data(episode)?;
        let generator =
            TopicsGenerator::new(self.client(), self.config.provider.chat_model.as_str());
        if generator.enrich(episode, &mut data, &table.names()).await? {
            data.save_to_path(self.library.json_path(episode))?;
            info!("Updated episode record for {}", episode);
        }
        Ok(())
    }

    /// Build the web fragment and SNS post for the episode.
    pub fn build_post(&self, episode: &EpisodeRef) -> Result<()> {
        let data = self.load_episode_data(episode)?;
        data.validate_for(episode)?;

        let built = post::build_post(
            episode,
            &data,
            &self.config.site_base_url,
            &self.config.hashtags,
            &self.config.share_url,
        );
        post::publish_post(&built, &self.library.sns_path(episode))
    }

    /// Render the related-episodes HTML list for the episode.
    pub fn related_episodes(&self, episode: &EpisodeRef) -> Result<String> {
        let data = self.load_episode_data(episode)?;
        let attrs = SearchAttrs::from_episode(&data, &self.config.host);
        let related = search::search_related(
            &self.library.json_root(),
            &attrs,
            &self.config.franchises,
            &self.config.site_base_url,
        )?;
        info!("There are {} related episodes.", related.len());

        let links: Vec<String> = related.into_iter().map(|episode| episode.link).collect();
        Ok(format!(
            "{}\n{}",
            html::related_episodes_header(),
            html::related_episodes_list(&links)
        ))
    }

    /// Generate episode artwork from the record's topics.
    pub async fn generate_artwork(&self, episode: &EpisodeRef) -> Result<()> {
        let data = self.load_episode_data(episode)?;
        let client = self.client();
        let generator = ArtworkGenerator::new(&client, self.config.provider.image_size.as_str());
        generator
            .create_and_save(&data.topics, &self.library.artwork_path(episode))
            .await
    }

    /// Compose the promo icon from the eyecatch photo and cast icons.
    pub fn compose_promo(&self, episode: &EpisodeRef, crop: Option<CropRect>) -> Result<()> {
        let data = self.load_episode_data(episode)?;
        let composer = PromoComposer::new(self.config.host.as_str());

        let starr_icon_paths: Vec<_> = data
            .starr_names()
            .into_iter()
            .map(|starr| {
                self.library
                    .starr_icon_path(&composer.icon_name_for(starr))
            })
            .collect();

        composer.compose(
            &self.library.eyecatch_path(episode),
            &self.library.show_icon_path(),
            &starr_icon_paths,
            crop,
            &self.library.promo_icon_path(episode),
        )
    }

    /// Transcribe the episode audio into the segment table.
    pub async fn transcribe_episode(&self, episode: &EpisodeRef) -> Result<()> {
        transcribe::transcribe_to_table(
            &self.client(),
            &self.library.audio_path(episode),
            &self.config.provider.transcription_model,
            &self.config.provider.transcription_language,
            &self.library.transcript_path(episode),
        )
        .await
    }

    /// Run the full post-production pipeline for one episode:
    /// tag → topics → post → promo image.
    pub async fn run_pipeline(&self, episode: &EpisodeRef, crop: Option<CropRect>) -> Result<()> {
        let steps = ["tag", "topics", "post", "compose"];
        let progress = ProgressBar::new(steps.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        progress.set_message("tagging chapters");
        self.tag_episode(episode)?;
        progress.inc(1);

        progress.set_message("generating topics");
        self.generate_topics(episode).await?;
        progress.inc(1);

        progress.set_message("building post");
        self.build_post(episode)?;
        progress.inc(1);

        progress.set_message("composing promo icon");
        if let Err(e) = self.compose_promo(episode, crop) {
            // The eyecatch photo is hand-picked and often arrives late;
            // the rest of the pipeline output is already usable
            warn!("Promo icon skipped: {}", e);
        }
        progress.inc(1);

        progress.finish_with_message("done");
        Ok(())
    }
}
