/*!
 * Tests for episode identifier normalization
 */

use podpost::episode::{normalize_extension, rewrite_stem, EpisodeRef, DEFAULT_SERIES};
use podpost::errors::IdentifierError;

/// Test bare numeric tokens map to the flagship series
#[test]
fn test_normalize_withAllDigitToken_shouldUseDefaultSeries() {
    let episode = EpisodeRef::normalize("15").unwrap();
    assert_eq!(episode.series, DEFAULT_SERIES);
    assert_eq!(episode.episode_id.as_deref(), Some("15"));
}

/// Test main-episode/after-talk pairs stay in the flagship series
#[test]
fn test_normalize_withNumberPair_shouldKeepPairAsEpisodeId() {
    let episode = EpisodeRef::normalize("15-1").unwrap();
    assert_eq!(episode.series, "concast");
    assert_eq!(episode.episode_id.as_deref(), Some("15-1"));
}

/// Test series-number tokens split into series and id
#[test]
fn test_normalize_withSeriesAndNumber_shouldSplit() {
    let episode = EpisodeRef::normalize("football-2").unwrap();
    assert_eq!(episode.series, "football");
    assert_eq!(episode.episode_id.as_deref(), Some("2"));
}

/// Test two-part tokens without a numeric id fall back to a bare series
#[test]
fn test_normalize_withNonNumericPair_shouldBeBareSeries() {
    let episode = EpisodeRef::normalize("year-end").unwrap();
    assert_eq!(episode.series, "year-end");
    assert_eq!(episode.episode_id, None);
}

/// Test three-part tokens keep the segment pair as the id
#[test]
fn test_normalize_withThreeParts_shouldJoinSegmentPair() {
    let episode = EpisodeRef::normalize("football-16-1").unwrap();
    assert_eq!(episode.series, "football");
    assert_eq!(episode.episode_id.as_deref(), Some("16-1"));
}

/// Test unrecognized shapes are rejected
#[test]
fn test_normalize_withFourParts_shouldFail() {
    let result = EpisodeRef::normalize("a-b-c-d");
    assert!(matches!(
        result,
        Err(IdentifierError::InvalidIdentifier(_))
    ));
}

/// Test the empty token is rejected
#[test]
fn test_normalize_withEmptyToken_shouldBeBareSeries() {
    // An empty token splits into one empty part; it carries no digits so it
    // cannot be an episode, and with a single part it is rejected
    let result = EpisodeRef::normalize("");
    assert!(result.is_err());
}

/// Test slug and relative path construction
#[test]
fn test_rel_path_withEpisodeId_shouldUseSeriesSubdir() {
    let episode = EpisodeRef::normalize("football-16-1").unwrap();
    assert_eq!(episode.slug(), "16-1");
    assert_eq!(
        episode.rel_path("csv"),
        std::path::PathBuf::from("football").join("16-1.csv")
    );
}

/// Test the slug falls back to the series for bare-series tokens
#[test]
fn test_slug_withBareSeries_shouldFallBackToSeries() {
    let episode = EpisodeRef::new("year-end", None);
    assert_eq!(episode.slug(), "year-end");
}

/// Test stem rewriting strips the series prefix
#[test]
fn test_rewrite_stem_withSeriesPrefix_shouldStrip() {
    assert_eq!(rewrite_stem("football-2", "football"), "2");
    assert_eq!(rewrite_stem("concast-15", "football"), "15");
    assert_eq!(rewrite_stem("concast15", "concast"), "15");
    assert_eq!(rewrite_stem("15", "concast"), "15");
}

/// Test degenerate stems may come back empty
#[test]
fn test_rewrite_stem_withBareMarkerWord_shouldBeEmpty() {
    assert_eq!(rewrite_stem("concast", "concast"), "");
}

/// Test extension aliasing
#[test]
fn test_normalize_extension_withAliases_shouldCanonicalize() {
    assert_eq!(normalize_extension("jpeg"), "jpg");
    assert_eq!(normalize_extension(".JPEG"), "jpg");
    assert_eq!(normalize_extension("tiff"), "tif");
    assert_eq!(normalize_extension("PNG"), "png");
    assert_eq!(normalize_extension("mp3"), "mp3");
}
