use std::cmp::Ordering;
use std::path::Path;

use anyhow::Result;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::episode_data::EpisodeData;

// @module: Related-episode search over the episode JSON library

// @const: Digit-run splitter for natural ordering
static DIGIT_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)|(\D+)").unwrap());

/// One related episode, carrying its rendered site link.
#[derive(Debug, Clone)]
pub struct RelatedEpisode {
    /// Pre-rendered `<li>` link for the episode page
    pub link: String,

    /// Episode number used for ordering
    pub number: String,
}

/// Matching criteria for the related-episode scan.
#[derive(Debug)]
pub struct SearchAttrs {
    /// Series prefix the target belongs to
    pub series: String,

    /// Cast names to match on, host already removed
    pub starrs: Vec<String>,
}

impl SearchAttrs {
    /// Build search attributes from an episode record.
    ///
    /// The series prefix comes from the record's number; the host never
    /// counts as a cast match since they appear in every episode.
    pub fn from_episode(data: &EpisodeData, host: &str) -> Self {
        let series = data
            .number
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();
        let starrs = data
            .starr_names()
            .into_iter()
            .filter(|name| *name != host)
            .map(String::from)
            .collect();
        SearchAttrs { series, starrs }
    }
}

/// Scan the JSON library for episodes related to the given attributes.
///
/// An episode matches when its series prefix is a known franchise equal to
/// the target's, or when any cast member overlaps. Results come back in
/// natural (human) order of episode number.
pub fn search_related(
    json_root: &Path,
    attrs: &SearchAttrs,
    franchises: &[String],
    site_base_url: &str,
) -> Result<Vec<RelatedEpisode>> {
    let mut results = Vec::new();

    for entry in WalkDir::new(json_root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable library entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        if path.file_name().is_some_and(|name| name == "template.json") {
            continue;
        }

        let data = match EpisodeData::read_from_path(path) {
            Ok(data) => data,
            Err(e) => {
                debug!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if matches_series(&data, &attrs.series, franchises) || matches_starr(&data, &attrs.starrs)
        {
            results.push(RelatedEpisode {
                link: format!(
                    "<li><a href=\"{}{}/\">[#{}] {}</a></li>",
                    site_base_url, data.number, data.number, data.title
                ),
                number: data.number.clone(),
            });
        }
    }

    results.sort_by(|a, b| natural_cmp(&a.number, &b.number));
    Ok(results)
}

// @checks: Series prefix is a known franchise equal to the target's
fn matches_series(data: &EpisodeData, series: &str, franchises: &[String]) -> bool {
    let prefix = data.number.split('-').next().unwrap_or_default();
    franchises.iter().any(|f| f == prefix) && prefix == series
}

// @checks: Any cast overlap
fn matches_starr(data: &EpisodeData, starrs: &[String]) -> bool {
    starrs.iter().any(|starr| data.starr.contains_key(starr))
}

/// Natural-order comparison: digit runs compare numerically, text runs
/// lexically, so `9` sorts before `10` and `football-2` before `football-16`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_keys = natural_keys(a);
    let b_keys = natural_keys(b);
    a_keys.cmp(&b_keys)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalKey {
    Number(u64),
    Text(String),
}

fn natural_keys(s: &str) -> Vec<NaturalKey> {
    DIGIT_RUNS
        .find_iter(s)
        .map(|run| {
            let run = run.as_str();
            match run.parse::<u64>() {
                Ok(n) => NaturalKey::Number(n),
                Err(_) => NaturalKey::Text(run.to_string()),
            }
        })
        .collect()
}
