//! Persisted device settings record.
//!
//! Text fields are fixed-capacity buffers: a capacity of `N` bytes holds at
//! most `N - 1` bytes of text (the firmware keeps one byte for the
//! terminator). Longer input is truncated on a char boundary.

extern crate alloc;

use alloc::string::String;

use crate::input::FrontButtonLayout;

/// Text buffer with a fixed byte capacity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundedString<const N: usize> {
    value: String,
}

impl<const N: usize> BoundedString<N> {
    /// Buffer size in bytes, terminator included
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        Self {
            value: String::new(),
        }
    }

    /// Longest text the buffer keeps, in bytes
    pub const fn max_len() -> usize {
        N.saturating_sub(1)
    }

    pub fn from_str_truncated(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set(text);
        buffer
    }

    /// Replace the contents. Returns `true` if `text` had to be truncated.
    pub fn set(&mut self, text: &str) -> bool {
        let mut end = text.len().min(Self::max_len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.value.clear();
        self.value.push_str(&text[..end]);
        end < text.len()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl<const N: usize> core::fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Settings data container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub opds_server_url: BoundedString<128>,
    pub opds_username: BoundedString<64>,
    pub opds_password: BoundedString<64>,
    /// Index into the `opdsFileFolder` schema labels
    pub opds_file_folder: u8,
    /// Index into [`FrontButtonLayout::ALL`]
    pub front_button_layout: u8,
}

impl Settings {
    /// Stored layout, falling back to the default for out-of-range values.
    pub fn front_button_layout(&self) -> FrontButtonLayout {
        FrontButtonLayout::from_index(self.front_button_layout as usize).unwrap_or_default()
    }

    /// Reset to factory defaults
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

/// Bounded text fields of [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    OpdsServerUrl,
    OpdsUsername,
    OpdsPassword,
}

impl TextField {
    pub const ALL: [Self; 3] = [Self::OpdsServerUrl, Self::OpdsUsername, Self::OpdsPassword];

    /// Stable key used by the schema and the settings file
    pub const fn key(self) -> &'static str {
        match self {
            Self::OpdsServerUrl => "opdsServerUrl",
            Self::OpdsUsername => "opdsUsername",
            Self::OpdsPassword => "opdsPassword",
        }
    }

    pub const fn max_len(self) -> usize {
        match self {
            Self::OpdsServerUrl => BoundedString::<128>::max_len(),
            Self::OpdsUsername | Self::OpdsPassword => BoundedString::<64>::max_len(),
        }
    }

    /// Secret fields are never shown in clear text.
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::OpdsPassword)
    }

    pub fn get(self, settings: &Settings) -> &str {
        match self {
            Self::OpdsServerUrl => settings.opds_server_url.as_str(),
            Self::OpdsUsername => settings.opds_username.as_str(),
            Self::OpdsPassword => settings.opds_password.as_str(),
        }
    }

    /// Store `text`, truncated to the field capacity.
    pub fn set(self, settings: &mut Settings, text: &str) -> bool {
        match self {
            Self::OpdsServerUrl => settings.opds_server_url.set(text),
            Self::OpdsUsername => settings.opds_username.set(text),
            Self::OpdsPassword => settings.opds_password.set(text),
        }
    }
}

/// Small enumerated integer fields of [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumField {
    OpdsFileFolder,
    FrontButtonLayout,
}

impl EnumField {
    pub const ALL: [Self; 2] = [Self::OpdsFileFolder, Self::FrontButtonLayout];

    pub const fn key(self) -> &'static str {
        match self {
            Self::OpdsFileFolder => "opdsFileFolder",
            Self::FrontButtonLayout => "frontButtonLayout",
        }
    }

    pub fn get(self, settings: &Settings) -> u8 {
        match self {
            Self::OpdsFileFolder => settings.opds_file_folder,
            Self::FrontButtonLayout => settings.front_button_layout,
        }
    }

    pub fn set(self, settings: &mut Settings, value: u8) {
        match self {
            Self::OpdsFileFolder => settings.opds_file_folder = value,
            Self::FrontButtonLayout => settings.front_button_layout = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_string_keeps_room_for_terminator() {
        let mut buffer = BoundedString::<8>::new();
        assert!(!buffer.set("1234567"));
        assert_eq!(buffer.as_str(), "1234567");

        assert!(buffer.set("12345678"));
        assert_eq!(buffer.as_str(), "1234567");
        assert_eq!(buffer.len(), BoundedString::<8>::max_len());
    }

    #[test]
    fn bounded_string_truncates_on_char_boundary() {
        // "é" is two bytes; a 4-byte buffer keeps 3 bytes -> "aé"
        let buffer = BoundedString::<4>::from_str_truncated("aéé");
        assert_eq!(buffer.as_str(), "aé");

        let buffer = BoundedString::<3>::from_str_truncated("aé");
        assert_eq!(buffer.as_str(), "a");
    }

    #[test]
    fn zero_capacity_buffer_stays_empty() {
        let buffer = BoundedString::<0>::from_str_truncated("abc");
        assert!(buffer.is_empty());
    }

    #[test]
    fn text_field_accessors() {
        let mut settings = Settings::default();
        TextField::OpdsUsername.set(&mut settings, "alice");
        assert_eq!(TextField::OpdsUsername.get(&settings), "alice");
        assert_eq!(settings.opds_username.as_str(), "alice");

        let long = "x".repeat(200);
        assert!(TextField::OpdsServerUrl.set(&mut settings, &long));
        assert_eq!(settings.opds_server_url.len(), 127);
        assert_eq!(TextField::OpdsServerUrl.max_len(), 127);
        assert_eq!(TextField::OpdsPassword.max_len(), 63);
    }

    #[test]
    fn enum_field_accessors() {
        let mut settings = Settings::default();
        EnumField::OpdsFileFolder.set(&mut settings, 2);
        assert_eq!(settings.opds_file_folder, 2);
        assert_eq!(EnumField::OpdsFileFolder.get(&settings), 2);
    }

    #[test]
    fn layout_falls_back_to_default() {
        let mut settings = Settings::default();
        settings.front_button_layout = 1;
        assert_eq!(
            settings.front_button_layout(),
            FrontButtonLayout::LeftRightBackConfirm
        );
        settings.front_button_layout = 42;
        assert_eq!(settings.front_button_layout(), FrontButtonLayout::default());
    }

    #[test]
    fn reset_clears_everything() {
        let mut settings = Settings::default();
        settings.opds_password.set("secret");
        settings.opds_file_folder = 1;
        settings.reset_to_defaults();
        assert_eq!(settings, Settings::default());
    }
}
