/*!
 * Post assembly tests against a populated library
 */

use podpost::app_config::Config;
use podpost::app_controller::Controller;
use podpost::episode::EpisodeRef;
use podpost::episode_data::EpisodeData;
use podpost::library::Library;
use podpost::post::build_post;

use crate::common;

fn test_config(root: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.library_root = root.to_string_lossy().to_string();
    config
}

/// Test the assembled fragment and SNS text for a numbered episode
#[test]
fn test_build_post_withNumberedEpisode_shouldAssembleBothOutputs() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    let json_path = common::create_test_episode_json(&root, "15.json", "15").unwrap();
    let data = EpisodeData::read_from_path(&json_path).unwrap();
    let episode = EpisodeRef::normalize("15").unwrap();

    let post = build_post(
        &episode,
        &data,
        "https://example.com/concast-",
        "#コンキャスト #concast",
        "https://linktr.ee/concastx",
    );

    assert!(post.web_fragment.starts_with("#15 Test Episode (Gota, Ken)"));
    assert!(post.web_fragment.contains("<div class=\"content-head\">"));
    assert!(post
        .web_fragment
        .contains("<a href=\"https://example.com/a\">Some article</a>"));

    let blocks: Vec<&str> = post.sns_text.split("\n\n").collect();
    assert_eq!(blocks.len(), 4);
    assert_eq!(blocks[0], "#15 Test Episode (Gota, Ken)");
    assert_eq!(blocks[1], "1. ⚽ サッカーの話\n2. 🎮 ゲームの話");
    assert_eq!(blocks[2], "#コンキャスト #concast");
    assert_eq!(blocks[3], "👇視聴はこちらから https://linktr.ee/concastx");
}

/// Test the controller writes the SNS file under the library conventions
#[test]
fn test_controller_build_post_shouldWriteSnsFile() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    common::create_test_episode_json(&root, "json/concast/15.json", "15").unwrap();

    let controller = Controller::with_config(test_config(temp_dir.path())).unwrap();
    let episode = EpisodeRef::normalize("15").unwrap();
    controller.build_post(&episode).unwrap();

    let library = Library::new(temp_dir.path());
    let sns = std::fs::read_to_string(library.sns_path(&episode)).unwrap();
    assert!(sns.contains("#15 Test Episode"));
    assert!(sns.contains("#concast"));
}

/// Test the controller refuses a record whose number does not match
#[test]
fn test_controller_build_post_withMismatchedRecord_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    // Record claims episode 16 but lives under 15
    common::create_test_episode_json(&root, "json/concast/15.json", "16").unwrap();

    let controller = Controller::with_config(test_config(temp_dir.path())).unwrap();
    let episode = EpisodeRef::normalize("15").unwrap();
    assert!(controller.build_post(&episode).is_err());
}

/// Test the related-episodes listing renders header and links
#[test]
fn test_controller_related_episodes_shouldRenderHtmlList() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    common::create_test_episode_json(&root, "json/football/2.json", "football-2").unwrap();
    common::create_test_episode_json(&root, "json/football/16.json", "football-16").unwrap();

    let controller = Controller::with_config(test_config(temp_dir.path())).unwrap();
    let episode = EpisodeRef::normalize("football-2").unwrap();
    let html = controller.related_episodes(&episode).unwrap();

    assert!(html.starts_with("<h3>関連エピソード</h3>"));
    assert!(html.contains("[#football-2]"));
    assert!(html.contains("[#football-16]"));
    let idx2 = html.find("football-2/").unwrap();
    let idx16 = html.find("football-16/").unwrap();
    assert!(idx2 < idx16, "natural order puts 2 before 16");
}
