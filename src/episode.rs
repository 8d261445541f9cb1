use std::fmt;
use std::path::PathBuf;

use crate::errors::IdentifierError;

// @module: Episode identifier normalization

/// The flagship series; bare numeric tokens belong to it.
pub const DEFAULT_SERIES: &str = "concast";

// @struct: Normalized episode reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRef {
    // @field: Series name
    pub series: String,

    // @field: Episode id within the series, when the token carries one
    pub episode_id: Option<String>,
}

impl EpisodeRef {
    /// Creates an episode reference - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(series: impl Into<String>, episode_id: Option<String>) -> Self {
        EpisodeRef {
            series: series.into(),
            episode_id,
        }
    }

    /// Parse a free-form command-line token into a normalized episode reference.
    ///
    /// Recognized shapes, first match wins:
    /// - `15` → flagship series, episode 15
    /// - `15-1` → flagship series, episode 15 with after-talk 1
    /// - `football-2` → series `football`, episode 2
    /// - `football-16-1` → series `football`, episode `16-1`
    ///
    /// A two-part token where the second part is not numeric is treated as a
    /// bare series name with no episode id. Anything else is rejected.
    pub fn normalize(token: &str) -> Result<Self, IdentifierError> {
        if is_decimal(token) {
            return Ok(EpisodeRef {
                series: DEFAULT_SERIES.to_string(),
                episode_id: Some(token.to_string()),
            });
        }

        let parts: Vec<&str> = token.split('-').collect();
        match parts.as_slice() {
            [episode, aftertalk] => {
                if is_decimal(episode) && is_decimal(aftertalk) {
                    // Main episode paired with its after-talk, flagship series
                    Ok(EpisodeRef {
                        series: DEFAULT_SERIES.to_string(),
                        episode_id: Some(format!("{}-{}", episode, aftertalk)),
                    })
                } else if is_decimal(aftertalk) {
                    Ok(EpisodeRef {
                        series: episode.to_string(),
                        episode_id: Some(aftertalk.to_string()),
                    })
                } else {
                    // e.g. a series name that itself contains a hyphen
                    Ok(EpisodeRef {
                        series: token.to_string(),
                        episode_id: None,
                    })
                }
            }
            [series, segment, sub_segment] => {
                // e.g. football-16-1
                Ok(EpisodeRef {
                    series: series.to_string(),
                    episode_id: Some(format!("{}-{}", segment, sub_segment)),
                })
            }
            _ => Err(IdentifierError::InvalidIdentifier(token.to_string())),
        }
    }

    /// The file-name component for this episode: the episode id when present,
    /// the series name otherwise.
    pub fn slug(&self) -> &str {
        self.episode_id.as_deref().unwrap_or(&self.series)
    }

    /// Relative path `<series>/<slug>.<ext>` under a content root.
    pub fn rel_path(&self, extension: &str) -> PathBuf {
        PathBuf::from(&self.series).join(format!("{}.{}", self.slug(), extension))
    }
}

impl fmt::Display for EpisodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.episode_id {
            Some(id) => write!(f, "{}/{}", self.series, id),
            None => write!(f, "{}", self.series),
        }
    }
}

// @checks: Non-empty and all ASCII decimal digits
fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Strip the series prefix (or the flagship marker word) from a filename stem.
///
/// `concast-15` → `15`, `football-2` → `2` (for series `football`),
/// `concast15` → `15`. Returns the stem unchanged when no prefix matches;
/// a degenerate stem may come back empty.
pub fn rewrite_stem(stem: &str, series: &str) -> String {
    for prefix in [
        format!("{}-", series),
        series.to_string(),
        format!("{}-", DEFAULT_SERIES),
        DEFAULT_SERIES.to_string(),
    ] {
        if let Some(rest) = stem.strip_prefix(&prefix) {
            return rest.to_string();
        }
    }
    stem.to_string()
}

/// Map alias extension spellings to their canonical lowercase short form.
pub fn normalize_extension(extension: &str) -> String {
    let lower = extension.trim_start_matches('.').to_ascii_lowercase();
    match lower.as_str() {
        "jpeg" => "jpg".to_string(),
        "tiff" => "tif".to_string(),
        _ => lower,
    }
}
