//! End-to-end tests for `softkey keys`.

mod fixtures;
use fixtures::*;

#[test]
fn test_keys_lists_all_pages() {
    let config_dir = temp_config_dir();
    let output = run_softkey(&["keys"], config_dir.path());
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Page 0: letters"));
    assert!(stdout.contains("Page 1: numbers"));
    assert!(stdout.contains("Page 2: symbols"));
    assert!(stdout.contains("[123>1]"));
}

#[test]
fn test_keys_json_single_page() {
    let config_dir = temp_config_dir();
    let result = run_json(&["keys", "--mode", "1", "--json"], config_dir.path());

    assert_eq!(result["version"], "1.0");
    let pages = result["pages"].as_array().expect("pages array");
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["mode"], 1);
    assert_eq!(pages[0]["name"], "numbers");

    let first_row = pages[0]["rows"][0].as_array().expect("row array");
    assert_eq!(first_row.len(), 10);
    assert_eq!(first_row[0]["lowercase_output"], "1");
    assert_eq!(first_row[0]["kind"], "special_character");
}

#[test]
fn test_keys_invalid_mode() {
    let config_dir = temp_config_dir();
    let output = run_softkey(&["keys", "--mode", "7"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Page 7 does not exist"));
}
