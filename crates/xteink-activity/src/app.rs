//! Main application state.
//!
//! Owns the activity manager and drives it one tick at a time. The root
//! activity is the settings menu.

extern crate alloc;

use alloc::boxed::Box;

use crate::activity_manager::{ActivityManager, Services};
use crate::input::{InputConfig, InputMapper};
use crate::settings::Settings;
use crate::settings_activity::SettingsActivity;
use crate::settings_store::SettingsState;
use crate::strings::StringTable;
use crate::ui::{ActivityState, Gui, Theme};

/// Startup configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub input: InputConfig,
    pub theme: Theme,
}

/// Application state with a stack of activities.
pub struct App {
    manager: ActivityManager,
    config: AppConfig,
}

impl App {
    /// Build the app and enter the root settings menu. The persisted front
    /// button layout overrides `config.input.layout`.
    pub fn new(settings: SettingsState, strings: Box<dyn StringTable>, config: AppConfig) -> Self {
        let mut input = InputMapper::new(config.input);
        input.set_layout(settings.record().front_button_layout());
        let mut manager = ActivityManager::new(Services::new(input, settings, strings));
        manager.push_activity(Box::new(SettingsActivity::new()));
        Self { manager, config }
    }

    /// Sample input, update the top activity, then render it.
    pub fn tick(&mut self, now_ms: u64, gui: &mut dyn Gui) {
        self.manager.services_mut().input.update(now_ms);
        self.manager.tick(gui);
    }

    /// Startup configuration. Renderers take their theme from here.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Input feed for the platform layer
    pub fn input_mut(&mut self) -> &mut InputMapper {
        &mut self.manager.services_mut().input
    }

    pub fn settings(&self) -> &Settings {
        self.manager.services().settings.record()
    }

    pub fn manager(&self) -> &ActivityManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut ActivityManager {
        &mut self.manager
    }

    pub fn depth(&self) -> usize {
        self.manager.depth()
    }

    pub fn top_name(&self) -> Option<&'static str> {
        self.manager.top_name()
    }

    pub fn top_state(&self) -> Option<ActivityState> {
        self.manager.top_state()
    }

    /// Exit every activity. The app does nothing after this.
    pub fn shutdown(&mut self) {
        self.manager.shutdown();
    }
}

impl core::fmt::Debug for App {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("App")
            .field("manager", &self.manager)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Button, FrontButtonLayout, InputEvent};
    use crate::recording_gui::RecordingGui;
    use crate::settings_store::MemorySettingsStore;
    use crate::strings::EnglishStrings;

    fn app_with(settings: Settings) -> App {
        let store = MemorySettingsStore::with_persisted(settings);
        App::new(
            SettingsState::load(Box::new(store)),
            Box::new(EnglishStrings),
            AppConfig::default(),
        )
    }

    #[test]
    fn starts_on_settings_menu() {
        let mut app = app_with(Settings::default());
        let mut gui = RecordingGui::default();
        assert_eq!(app.depth(), 1);
        assert_eq!(app.top_name(), Some("Settings"));
        assert_eq!(app.top_state(), Some(ActivityState::Entered));

        app.tick(0, &mut gui);
        assert_eq!(gui.last_header(), Some("Settings"));
    }

    #[test]
    fn persisted_layout_is_applied() {
        let mut settings = Settings::default();
        settings.front_button_layout = FrontButtonLayout::BackConfirmRightLeft.index() as u8;
        let app = app_with(settings);
        assert_eq!(
            app.manager().services().input.config().layout,
            FrontButtonLayout::BackConfirmRightLeft
        );
    }

    #[test]
    fn keeps_configured_theme() {
        use crate::ui::ThemeMetrics;

        let theme = Theme::new(ThemeMetrics::new(30, 40, 12, 48, 10));
        let config = AppConfig {
            theme,
            ..AppConfig::default()
        };
        let app = App::new(
            SettingsState::load(Box::new(MemorySettingsStore::new())),
            Box::new(EnglishStrings),
            config,
        );
        assert_eq!(app.config().theme, theme);
        assert_eq!(app.config().input, InputConfig::default());
    }

    #[test]
    fn tick_routes_input_to_top() {
        let mut app = app_with(Settings::default());
        let mut gui = RecordingGui::default();
        app.input_mut().push_event(InputEvent::Press(Button::Confirm));
        app.tick(10, &mut gui);
        assert_eq!(app.top_name(), Some("CalibreSettings"));

        app.input_mut().push_event(InputEvent::Release(Button::Confirm));
        app.tick(20, &mut gui);
        assert_eq!(app.depth(), 2);
    }

    #[test]
    fn shutdown_empties_stack() {
        let mut app = app_with(Settings::default());
        app.shutdown();
        assert_eq!(app.depth(), 0);
        assert_eq!(app.top_name(), None);
    }
}
