use xteink_activity::{Button, Settings, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use xteink_activity_harness::ScenarioHarness;

#[test]
fn screens_draw_ink() {
    let mut h = ScenarioHarness::new(Settings::default());
    h.tick();
    let root = h.display().black_pixel_count();
    assert!(root > 0);

    h.press(Button::Confirm);
    assert_eq!(h.header(), Some("OPDS Browser"));
    assert!(h.display().black_pixel_count() > 0);

    h.press(Button::Confirm);
    assert_eq!(h.app().top_name(), Some("KeyboardEntry"));
    assert_ne!(h.display().black_pixel_count(), root);
}

#[test]
fn screenshot_is_written_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let mut h = ScenarioHarness::new(Settings::default());
    h.tick();
    h.press(Button::Confirm);

    let path = dir.path().join("shots").join("server_settings.png");
    h.save_screenshot_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let (width, height) = h.display().dimensions();
    assert_eq!((width, height), (DISPLAY_WIDTH, DISPLAY_HEIGHT));
    // IHDR width/height, big endian
    assert_eq!(&bytes[16..20], &width.to_be_bytes());
    assert_eq!(&bytes[20..24], &height.to_be_bytes());
}
