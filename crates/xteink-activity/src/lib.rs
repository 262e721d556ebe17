//! Stack-based activity framework for the Xteink X4 e-reader UI.
//! Works on ESP32 and desktop.
//!
//! Screens implement [`ui::Activity`] and live on the stack owned by
//! [`ActivityManager`]. A screen can start a child for a result and resume
//! with the child's [`ActivityResult`] once the child is popped.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod activity_manager;
pub mod activity_result;
pub mod app;
pub mod button_navigator;
pub mod calibre_settings_activity;
pub mod input;
pub mod keyboard_entry_activity;
pub mod recording_gui;
pub mod settings;
pub mod settings_activity;
pub mod settings_schema;
pub mod settings_store;
pub mod strings;
pub mod test_display;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use activity_manager::{ActivityManager, Services, StackError};
pub use activity_result::{ActivityResult, KeyboardResult, ResultPayload};
pub use app::{App, AppConfig};
pub use button_navigator::ButtonNavigator;
pub use calibre_settings_activity::{CalibreRow, CalibreSettingsActivity, PASSWORD_MASK};
pub use input::{
    Action, Button, ButtonLabels, FrontButtonLayout, InputConfig, InputEvent, InputMapper,
};
pub use keyboard_entry_activity::KeyboardEntryActivity;
pub use recording_gui::{GuiOp, RecordingGui};
pub use settings::{BoundedString, EnumField, Settings, TextField};
pub use settings_activity::{SettingRow, SettingsActivity};
pub use settings_schema::{settings_list, EnumLabelCache, SettingDescriptor, SettingKind};
#[cfg(feature = "std")]
pub use settings_store::FileSettingsStore;
pub use settings_store::{MemorySettingsStore, SettingsError, SettingsState, SettingsStore};
pub use strings::{EnglishStrings, StrId, StringTable};
pub use test_display::TestDisplay;

/// UI display dimensions (portrait mode).
/// SSD1677 panel is 480x800 pixels in its native orientation.
pub const DISPLAY_WIDTH: u32 = 480;
pub const DISPLAY_HEIGHT: u32 = 800;
