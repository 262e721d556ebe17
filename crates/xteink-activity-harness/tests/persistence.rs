use xteink_activity::{Button, FileSettingsStore, SettingsStore};
use xteink_activity_harness::ScenarioHarness;

#[test]
fn edits_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.txt");

    {
        let mut h = ScenarioHarness::with_store(Box::new(FileSettingsStore::new(&path)));
        h.tick();
        h.press(Button::Confirm);
        h.press(Button::Down);
        h.press(Button::Confirm);
        h.type_text("alice").unwrap();
        h.press_n(Button::Down, 2);
        h.press(Button::Confirm);
        h.app_mut().shutdown();
    }

    let loaded = FileSettingsStore::new(&path).load().unwrap().unwrap();
    assert_eq!(loaded.opds_username.as_str(), "alice");
    assert_eq!(loaded.opds_file_folder, 1);

    let mut h = ScenarioHarness::with_store(Box::new(FileSettingsStore::new(&path)));
    h.tick();
    h.press(Button::Confirm);
    assert_eq!(h.statuses()[1], "alice");
    assert_eq!(h.statuses()[3], "/Downloads");
}

#[test]
fn missing_file_starts_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = ScenarioHarness::with_store(Box::new(FileSettingsStore::new(
        dir.path().join("absent.txt"),
    )));
    h.tick();
    h.press(Button::Confirm);
    assert_eq!(h.statuses()[0], "Not set");
    assert!(!dir.path().join("absent.txt").exists());
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.txt");
    std::fs::write(&path, "garbage\n").unwrap();

    let h = ScenarioHarness::with_store(Box::new(FileSettingsStore::new(&path)));
    assert_eq!(h.app().settings().opds_username.as_str(), "");
}
