//! Settings persistence.
//!
//! The on-disk format is a `v1` header followed by one `key<TAB>value` line
//! per field. Unknown keys are skipped so older firmware can read newer files.
//!
//! Implementations:
//! - `FileSettingsStore` for hosts with a filesystem (`std` feature)
//! - `MemorySettingsStore` for simulators and tests

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use crate::settings::{EnumField, Settings, TextField};

const FORMAT_HEADER: &str = "v1";

/// Settings persistence error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    IoError(String),
    InvalidFormat(String),
    NotSupported,
}

impl core::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "IO error: {}", msg),
            SettingsError::InvalidFormat(msg) => write!(f, "Invalid settings file: {}", msg),
            SettingsError::NotSupported => write!(f, "Operation not supported"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SettingsError {}

/// Trait for settings persistence
pub trait SettingsStore {
    /// Read the persisted record. `Ok(None)` when nothing was saved yet.
    fn load(&mut self) -> Result<Option<Settings>, SettingsError>;

    /// Persist the whole record synchronously.
    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Serialize settings into the `v1` text format.
pub fn encode_settings(settings: &Settings) -> String {
    let mut out = String::from(FORMAT_HEADER);
    out.push('\n');
    for field in TextField::ALL {
        let value: String = field
            .get(settings)
            .chars()
            .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        out.push_str(&format!("{}\t{}\n", field.key(), value));
    }
    for field in EnumField::ALL {
        out.push_str(&format!("{}\t{}\n", field.key(), field.get(settings)));
    }
    out
}

/// Parse the `v1` text format.
pub fn decode_settings(raw: &str) -> Result<Settings, SettingsError> {
    let mut lines = raw.lines();
    match lines.next() {
        Some(header) if header.trim_end() == FORMAT_HEADER => {}
        Some(header) => {
            return Err(SettingsError::InvalidFormat(format!(
                "unknown header {:?}",
                header
            )))
        }
        None => return Err(SettingsError::InvalidFormat(String::from("empty file"))),
    }

    let mut settings = Settings::default();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('\t') else {
            return Err(SettingsError::InvalidFormat(format!(
                "missing separator in {:?}",
                line
            )));
        };
        let value = value.trim_end_matches('\r');

        if let Some(field) = TextField::ALL.iter().find(|f| f.key() == key) {
            field.set(&mut settings, value);
        } else if let Some(field) = EnumField::ALL.iter().find(|f| f.key() == key) {
            let parsed = value.parse::<u8>().map_err(|_| {
                SettingsError::InvalidFormat(format!("bad value {:?} for {}", value, key))
            })?;
            field.set(&mut settings, parsed);
        } else {
            log::debug!("skipping unknown settings key {}", key);
        }
    }
    Ok(settings)
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    persisted: Option<Settings>,
    save_count: usize,
    fail_saves: bool,
}

/// In-memory store. Clones share state, so a test can keep a handle after
/// moving the store into a [`SettingsState`].
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    inner: Rc<RefCell<MemoryStoreInner>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already persisted record
    pub fn with_persisted(settings: Settings) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().persisted = Some(settings);
        store
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.inner.borrow().save_count
    }

    /// Last persisted record
    pub fn persisted(&self) -> Option<Settings> {
        self.inner.borrow().persisted.clone()
    }

    /// Make subsequent saves fail with an IO error
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.borrow_mut().fail_saves = fail;
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&mut self) -> Result<Option<Settings>, SettingsError> {
        Ok(self.inner.borrow().persisted.clone())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            return Err(SettingsError::IoError(String::from("memory store is read-only")));
        }
        inner.persisted = Some(settings.clone());
        inner.save_count += 1;
        Ok(())
    }
}

/// File-backed store using the `v1` text format.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "std")]
impl FileSettingsStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "std")]
impl SettingsStore for FileSettingsStore {
    fn load(&mut self) -> Result<Option<Settings>, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => decode_settings(&raw).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SettingsError::IoError(err.to_string())),
        }
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::IoError(e.to_string()))?;
            }
        }
        std::fs::write(&self.path, encode_settings(settings))
            .map_err(|e| SettingsError::IoError(e.to_string()))
    }
}

/// The live settings record together with the store that persists it.
pub struct SettingsState {
    record: Settings,
    store: Box<dyn SettingsStore>,
}

impl SettingsState {
    pub fn new(record: Settings, store: Box<dyn SettingsStore>) -> Self {
        Self { record, store }
    }

    /// Load the persisted record, falling back to defaults.
    pub fn load(mut store: Box<dyn SettingsStore>) -> Self {
        let record = match store.load() {
            Ok(Some(record)) => record,
            Ok(None) => Settings::default(),
            Err(err) => {
                log::warn!("settings load failed, using defaults: {}", err);
                Settings::default()
            }
        };
        Self { record, store }
    }

    pub fn record(&self) -> &Settings {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Settings {
        &mut self.record
    }

    /// Persist the current record. Failures are logged and reported as `false`.
    pub fn save(&mut self) -> bool {
        match self.store.save(&self.record) {
            Ok(()) => {
                log::debug!("settings saved");
                true
            }
            Err(err) => {
                log::error!("failed to save settings: {}", err);
                false
            }
        }
    }
}

impl core::fmt::Debug for SettingsState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SettingsState")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        let mut settings = Settings::default();
        settings.opds_server_url.set("https://books.example.org/opds");
        settings.opds_username.set("alice");
        settings.opds_password.set("hunter2");
        settings.opds_file_folder = 2;
        settings.front_button_layout = 1;
        settings
    }

    #[test]
    fn encoded_file_layout() {
        let encoded = encode_settings(&sample());
        let mut lines = encoded.lines();
        assert_eq!(lines.next(), Some("v1"));
        assert_eq!(lines.next(), Some("opdsServerUrl\thttps://books.example.org/opds"));
        assert!(encoded.contains("opdsFileFolder\t2\n"));
        assert!(encoded.contains("frontButtonLayout\t1\n"));
    }

    #[test]
    fn decode_reads_encoded_record() {
        let decoded = decode_settings(&encode_settings(&sample())).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn separators_in_text_are_flattened() {
        let mut settings = Settings::default();
        settings.opds_username.set("a\tb\nc");
        let decoded = decode_settings(&encode_settings(&settings)).unwrap();
        assert_eq!(decoded.opds_username.as_str(), "a b c");
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert!(matches!(
            decode_settings(""),
            Err(SettingsError::InvalidFormat(_))
        ));
        assert!(matches!(
            decode_settings("v0\n"),
            Err(SettingsError::InvalidFormat(_))
        ));
        assert!(matches!(
            decode_settings("v1\nopdsFileFolder\tmany\n"),
            Err(SettingsError::InvalidFormat(_))
        ));
        assert!(matches!(
            decode_settings("v1\nno separator\n"),
            Err(SettingsError::InvalidFormat(_))
        ));
    }

    #[test]
    fn decode_skips_unknown_keys_and_missing_fields() {
        let decoded = decode_settings("v1\nsleepTimeout\t5\nopdsUsername\tbob\n").unwrap();
        assert_eq!(decoded.opds_username.as_str(), "bob");
        assert!(decoded.opds_password.is_empty());
    }

    #[test]
    fn decode_truncates_oversized_values() {
        let raw = format!("v1\nopdsUsername\t{}\n", "u".repeat(100));
        let decoded = decode_settings(&raw).unwrap();
        assert_eq!(decoded.opds_username.len(), 63);
    }

    #[test]
    fn memory_store_shares_state_between_clones() {
        let handle = MemorySettingsStore::new();
        let mut state = SettingsState::load(Box::new(handle.clone()));
        assert_eq!(state.record(), &Settings::default());

        state.record_mut().opds_username.set("carol");
        assert!(state.save());
        assert_eq!(handle.save_count(), 1);
        assert_eq!(
            handle.persisted().map(|s| s.opds_username.as_str().to_owned()),
            Some(String::from("carol"))
        );
    }

    #[test]
    fn failed_save_is_reported() {
        let handle = MemorySettingsStore::new();
        handle.set_fail_saves(true);
        let mut state = SettingsState::new(Settings::default(), Box::new(handle.clone()));
        assert!(!state.save());
        assert_eq!(handle.save_count(), 0);
        assert!(handle.persisted().is_none());
    }

    #[test]
    fn load_uses_persisted_record() {
        let handle = MemorySettingsStore::with_persisted(sample());
        let state = SettingsState::load(Box::new(handle));
        assert_eq!(state.record(), &sample());
    }

    #[cfg(feature = "std")]
    #[test]
    fn file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("xteink-settings-{}", std::process::id()));
        let path = dir.join("settings.txt");
        let mut store = FileSettingsStore::new(&path);

        assert_eq!(store.load().unwrap(), None);
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
