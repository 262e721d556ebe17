//! Shared fixtures for unit tests.

extern crate alloc;

use alloc::boxed::Box;

use crate::activity_manager::{ActivityManager, Services};
use crate::input::{Button, InputEvent, InputMapper};
use crate::keyboard_entry_activity::typing_presses;
use crate::recording_gui::RecordingGui;
use crate::settings::Settings;
use crate::settings_store::{MemorySettingsStore, SettingsState};
use crate::strings::EnglishStrings;
use crate::ui::Activity;

/// A manager with in-memory settings and a recording GUI, driven one
/// tick at a time.
pub(crate) struct Rig {
    pub manager: ActivityManager,
    pub gui: RecordingGui,
    pub store: MemorySettingsStore,
    now_ms: u64,
}

impl Rig {
    pub fn new(settings: Settings) -> Self {
        let store = MemorySettingsStore::new();
        let services = Services::new(
            InputMapper::default(),
            SettingsState::new(settings, Box::new(store.clone())),
            Box::new(EnglishStrings),
        );
        Self {
            manager: ActivityManager::new(services),
            gui: RecordingGui::default(),
            store,
            now_ms: 0,
        }
    }

    pub fn with_root(root: Box<dyn Activity>) -> Self {
        let mut rig = Self::new(Settings::default());
        rig.manager.push_activity(root);
        rig
    }

    pub fn tick(&mut self) {
        self.now_ms += 50;
        self.manager.services_mut().input.update(self.now_ms);
        self.manager.tick(&mut self.gui);
    }

    /// Tap `button` and run one tick
    pub fn press(&mut self, button: Button) {
        let input = &mut self.manager.services_mut().input;
        input.push_event(InputEvent::Press(button));
        input.push_event(InputEvent::Release(button));
        self.tick();
    }

    pub fn press_n(&mut self, button: Button, times: usize) {
        for _ in 0..times {
            self.press(button);
        }
    }

    /// Type `text` on a freshly opened keyboard and press OK.
    pub fn enter_text(&mut self, text: &str) {
        let presses =
            typing_presses(text).unwrap_or_else(|| panic!("no keys for {:?}", text));
        for button in presses {
            self.press(button);
        }
    }

    pub fn settings(&self) -> &Settings {
        self.manager.services().settings.record()
    }
}
