/*!
 * Tests for extension-dispatched file handlers
 */

use podpost::file_handlers::{kind_for_extension, kind_for_path, Content, FileKind};
use serde_json::json;

use crate::common;

/// Test extension dispatch for every supported kind
#[test]
fn test_kind_for_extension_withKnownKinds_shouldDispatch() {
    assert_eq!(kind_for_extension("json").unwrap(), FileKind::Json);
    assert_eq!(kind_for_extension("csv").unwrap(), FileKind::Tabular);
    assert_eq!(kind_for_extension("tsv").unwrap(), FileKind::Tabular);
    assert_eq!(kind_for_extension("txt").unwrap(), FileKind::Text);
    assert_eq!(kind_for_extension("jpg").unwrap(), FileKind::Image);
    // Alias spellings go through the extension normalizer
    assert_eq!(kind_for_extension("jpeg").unwrap(), FileKind::Image);
}

/// Test unknown extensions are rejected
#[test]
fn test_kind_for_extension_withUnknown_shouldFail() {
    assert!(kind_for_extension("exe").is_err());
}

/// Test path dispatch requires an extension
#[test]
fn test_kind_for_path_withoutExtension_shouldFail() {
    assert!(kind_for_path("noext").is_err());
    assert_eq!(kind_for_path("a/b/c.json").unwrap(), FileKind::Json);
}

/// Test reading JSON content
#[test]
fn test_read_withJsonFile_shouldParse() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "data.json",
        r#"{"Number": "15"}"#,
    )
    .unwrap();

    let content = FileKind::Json.read(&path, None, false).unwrap();
    match content {
        Content::Json(value) => assert_eq!(value["Number"], json!("15")),
        other => panic!("expected json content, got {:?}", other),
    }
}

/// Test a missing file without a template is an error
#[test]
fn test_read_withMissingFileNoTemplate_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let missing = temp_dir.path().join("missing.json");
    assert!(FileKind::Json.read(&missing, None, false).is_err());
}

/// Test the template seeds a missing target and the copy lands on disk
#[test]
fn test_read_withTemplateFallback_shouldSeedTarget() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    let template =
        common::create_test_file(&root, "template.json", r#"{"Edited": false}"#).unwrap();
    let target = root.join("concast").join("15.json");

    let content = FileKind::Json
        .read(&target, Some(template.as_path()), true)
        .unwrap();
    match content {
        Content::Json(value) => assert_eq!(value["Edited"], json!(false)),
        other => panic!("expected json content, got {:?}", other),
    }
    // The seeded copy must exist so the next save lands on a full record
    assert!(target.is_file());
}

/// Test a missing template is reported
#[test]
fn test_read_withMissingTemplate_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    let target = root.join("15.json");
    let template = root.join("template.json");

    let result = FileKind::Json.read(&target, Some(template.as_path()), true);
    assert!(result.is_err());
}

/// Test text save creates parent directories
#[test]
fn test_save_withNestedTextPath_shouldCreateParents() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("sns").join("concast").join("15.txt");

    FileKind::Text
        .save(&Content::Text("post body".to_string()), &path)
        .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "post body");
}

/// Test tabular content round-trips through save and read
#[test]
fn test_save_withTabularContent_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path().to_path_buf();
    let path = common::create_test_markers(&root, "markers.csv").unwrap();

    let content = FileKind::Tabular.read(&path, None, false).unwrap();
    let copy_path = root.join("copy.csv");
    FileKind::Tabular.save(&content, &copy_path).unwrap();

    let reread = FileKind::Tabular.read(&copy_path, None, false).unwrap();
    match (content, reread) {
        (Content::Tabular(a), Content::Tabular(b)) => assert_eq!(a.rows, b.rows),
        _ => panic!("expected tabular content"),
    }
}
