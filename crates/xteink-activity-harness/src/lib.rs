//! Host-side scenario test harness for scripted UI flows.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use png::{BitDepth, ColorType, Encoder};
use xteink_activity::keyboard_entry_activity::typing_presses;
use xteink_activity::ui::{ActivityRefreshMode, DisplayGui, Gui, RowText, Theme};
use xteink_activity::{
    App, AppConfig, Button, ButtonLabels, EnglishStrings, InputEvent, MemorySettingsStore,
    RecordingGui, Settings, SettingsState, SettingsStore, TestDisplay,
};

/// Milliseconds between scripted ticks
pub const TICK_MS: u64 = 20;

/// Couples the app, a pixel framebuffer and a draw-call recorder.
///
/// Each tick renders once; every draw call goes to both the framebuffer and
/// the recorder, so tests can assert on either.
pub struct ScenarioHarness {
    app: App,
    gui: DisplayGui<TestDisplay>,
    recorder: RecordingGui,
    store: MemorySettingsStore,
    now_ms: u64,
}

impl ScenarioHarness {
    /// Harness backed by an in-memory store holding `persisted`.
    pub fn new(persisted: Settings) -> Self {
        let store = MemorySettingsStore::with_persisted(persisted);
        let settings = SettingsState::load(Box::new(store.clone()));
        let mut harness = Self::with_settings(settings);
        harness.store = store;
        harness
    }

    /// Harness with a caller-provided store, e.g. a file-backed one.
    pub fn with_store(store: Box<dyn SettingsStore>) -> Self {
        Self::with_settings(SettingsState::load(store))
    }

    fn with_settings(settings: SettingsState) -> Self {
        let app = App::new(settings, Box::new(EnglishStrings), AppConfig::default());
        let theme = app.config().theme;
        Self {
            gui: DisplayGui::new(TestDisplay::default_size(), theme),
            app,
            recorder: RecordingGui::default(),
            store: MemorySettingsStore::new(),
            now_ms: 0,
        }
    }

    /// Run one frame. The recorder only holds this frame's draw calls.
    pub fn tick(&mut self) {
        self.now_ms += TICK_MS;
        self.recorder.clear_ops();
        let mut tee = TeeGui {
            display: &mut self.gui,
            recorder: &mut self.recorder,
        };
        self.app.tick(self.now_ms, &mut tee);
    }

    /// Tap a button: press and release land before the same tick.
    pub fn press(&mut self, button: Button) {
        let input = self.app.input_mut();
        input.push_event(InputEvent::Press(button));
        input.push_event(InputEvent::Release(button));
        self.tick();
    }

    pub fn press_n(&mut self, button: Button, times: usize) {
        for _ in 0..times {
            self.press(button);
        }
    }

    /// Hold `button` down for `duration_ms`, ticking throughout, then
    /// release it.
    pub fn hold(&mut self, button: Button, duration_ms: u64) {
        self.app.input_mut().push_event(InputEvent::Press(button));
        let until = self.now_ms + duration_ms;
        while self.now_ms < until {
            self.tick();
        }
        self.app.input_mut().push_event(InputEvent::Release(button));
        self.tick();
    }

    /// Type `text` on a keyboard that was just opened, then press OK.
    ///
    /// Only characters of the unshifted layout and space are supported.
    pub fn type_text(&mut self, text: &str) -> Result<(), String> {
        let presses = typing_presses(text).ok_or_else(|| format!("no keys for {:?}", text))?;
        for button in presses {
            self.press(button);
        }
        Ok(())
    }

    /// Tick and return elapsed wall time.
    pub fn tick_timed(&mut self) -> Duration {
        let start = Instant::now();
        self.tick();
        start.elapsed()
    }

    /// Tick and assert wall-time budget in milliseconds.
    pub fn assert_tick_budget_ms(&mut self, max_ms: u128, label: &str) {
        let elapsed = self.tick_timed();
        assert!(
            elapsed.as_millis() <= max_ms,
            "{} tick exceeded budget: {}ms > {}ms",
            label,
            elapsed.as_millis(),
            max_ms
        );
    }

    /// Access the app for assertions.
    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Access the display for render assertions.
    pub fn display(&self) -> &TestDisplay {
        self.gui.target()
    }

    /// Frames completed on the display so far
    pub fn display_frames(&self) -> u32 {
        self.gui.frames()
    }

    /// Draw calls of the last frame.
    pub fn recorder(&self) -> &RecordingGui {
        &self.recorder
    }

    /// Handle on the in-memory store (empty when built with `with_store`).
    pub fn store(&self) -> &MemorySettingsStore {
        &self.store
    }

    pub fn header(&self) -> Option<&str> {
        self.recorder.last_header()
    }

    /// Selected index of the list on screen
    pub fn selected(&self) -> Option<usize> {
        self.recorder.last_list().map(|(selected, _, _)| selected)
    }

    /// Status column of the list on screen
    pub fn statuses(&self) -> Vec<String> {
        self.recorder
            .last_list()
            .and_then(|(_, _, statuses)| statuses)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// Save the current framebuffer to a PNG (white = Off, black = On).
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let display = self.display();
        let (width, height) = display.dimensions();
        let mut data = Vec::with_capacity((width * height) as usize);
        for pixel in display.pixels() {
            let value = match pixel {
                BinaryColor::On => 0u8,
                BinaryColor::Off => 255u8,
            };
            data.push(value);
        }

        let file = File::create(path).map_err(|e| e.to_string())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, width, height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        let mut png_writer = encoder.write_header().map_err(|e| e.to_string())?;
        png_writer
            .write_image_data(&data)
            .map_err(|e| e.to_string())
    }
}

/// Forwards every draw call to the framebuffer and the recorder.
/// Geometry queries answer from the framebuffer.
struct TeeGui<'a> {
    display: &'a mut DisplayGui<TestDisplay>,
    recorder: &'a mut RecordingGui,
}

impl Gui for TeeGui<'_> {
    fn screen_size(&self) -> Size {
        self.display.screen_size()
    }

    fn theme(&self) -> &Theme {
        self.display.theme()
    }

    fn clear_screen(&mut self) {
        self.display.clear_screen();
        self.recorder.clear_screen();
    }

    fn draw_header(&mut self, title: &str) {
        self.display.draw_header(title);
        self.recorder.draw_header(title);
    }

    fn draw_sub_header(&mut self, text: &str) {
        self.display.draw_sub_header(text);
        self.recorder.draw_sub_header(text);
    }

    fn draw_list(
        &mut self,
        rect: Rectangle,
        count: usize,
        selected: usize,
        label: RowText<'_>,
        status: Option<RowText<'_>>,
    ) {
        self.display.draw_list(rect, count, selected, label, status);
        self.recorder.draw_list(rect, count, selected, label, status);
    }

    fn draw_text_field(&mut self, rect: Rectangle, title: &str, text: &str) {
        self.display.draw_text_field(rect, title, text);
        self.recorder.draw_text_field(rect, title, text);
    }

    fn draw_key_grid(&mut self, rect: Rectangle, rows: &[&[&str]], selected: (usize, usize)) {
        self.display.draw_key_grid(rect, rows, selected);
        self.recorder.draw_key_grid(rect, rows, selected);
    }

    fn draw_button_hints(&mut self, labels: &ButtonLabels<'_>) {
        self.display.draw_button_hints(labels);
        self.recorder.draw_button_hints(labels);
    }

    fn display_buffer(&mut self, mode: ActivityRefreshMode) {
        self.display.display_buffer(mode);
        self.recorder.display_buffer(mode);
    }
}
