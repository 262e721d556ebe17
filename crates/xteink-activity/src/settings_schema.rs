//! Static description of the settings fields.
//!
//! The schema is immutable for the lifetime of the firmware, so label sets
//! resolved from it can be cached forever.

use crate::strings::StrId;

/// Shape of a setting's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Bounded text, `max_len` bytes
    Text { max_len: usize },
    /// Index into an ordered list of labels
    Enum(&'static [StrId]),
}

/// One entry of the settings schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDescriptor {
    pub key: &'static str,
    pub label: StrId,
    pub kind: SettingKind,
}

impl SettingDescriptor {
    /// Labels of an enumerated setting, `None` for other kinds
    pub fn enum_values(&self) -> Option<&'static [StrId]> {
        match self.kind {
            SettingKind::Enum(values) => Some(values),
            SettingKind::Text { .. } => None,
        }
    }
}

const FILE_FOLDER_VALUES: [StrId; 3] = [StrId::FolderBooks, StrId::FolderDownloads, StrId::FolderRoot];

const FRONT_BUTTON_VALUES: [StrId; 4] = [
    StrId::LayoutBackConfirmLeftRight,
    StrId::LayoutLeftRightBackConfirm,
    StrId::LayoutLeftBackConfirmRight,
    StrId::LayoutBackConfirmRightLeft,
];

static SETTINGS_LIST: [SettingDescriptor; 5] = [
    SettingDescriptor {
        key: "opdsServerUrl",
        label: StrId::CalibreWebUrl,
        kind: SettingKind::Text { max_len: 127 },
    },
    SettingDescriptor {
        key: "opdsUsername",
        label: StrId::Username,
        kind: SettingKind::Text { max_len: 63 },
    },
    SettingDescriptor {
        key: "opdsPassword",
        label: StrId::Password,
        kind: SettingKind::Text { max_len: 63 },
    },
    SettingDescriptor {
        key: "opdsFileFolder",
        label: StrId::OpdsFileFolder,
        kind: SettingKind::Enum(&FILE_FOLDER_VALUES),
    },
    SettingDescriptor {
        key: "frontButtonLayout",
        label: StrId::FrontButtons,
        kind: SettingKind::Enum(&FRONT_BUTTON_VALUES),
    },
];

/// Built-in settings schema
pub fn settings_list() -> &'static [SettingDescriptor] {
    &SETTINGS_LIST
}

/// Lazily resolved label set of one enumerated setting.
///
/// The schema is scanned on first use and the result kept; a missing key
/// resolves to an empty set and is retried on the next lookup.
#[derive(Debug, Clone)]
pub struct EnumLabelCache {
    key: &'static str,
    schema: &'static [SettingDescriptor],
    labels: Option<&'static [StrId]>,
}

impl EnumLabelCache {
    pub const fn new(key: &'static str, schema: &'static [SettingDescriptor]) -> Self {
        Self {
            key,
            schema,
            labels: None,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn is_resolved(&self) -> bool {
        self.labels.is_some()
    }

    pub fn labels(&mut self) -> &'static [StrId] {
        if let Some(labels) = self.labels {
            return labels;
        }
        let (key, schema) = (self.key, self.schema);
        match schema
            .iter()
            .find(|setting| setting.key == key)
            .and_then(SettingDescriptor::enum_values)
        {
            Some(labels) => {
                log::debug!("resolved {} labels for {}", labels.len(), key);
                self.labels = Some(labels);
                labels
            }
            None => {
                log::warn!("no enum setting named {} in schema", key);
                &[]
            }
        }
    }

    /// Cached labels, or a fresh scan that is not kept. For read-only
    /// callers such as rendering.
    pub fn lookup(&self) -> &'static [StrId] {
        if let Some(labels) = self.labels {
            return labels;
        }
        self.schema
            .iter()
            .find(|setting| setting.key == self.key)
            .and_then(SettingDescriptor::enum_values)
            .unwrap_or(&[])
    }

    /// Label for a stored index, `None` if the index is out of range
    pub fn label_at(&mut self, index: u8) -> Option<StrId> {
        self.labels().get(index as usize).copied()
    }

    /// Next index, wrapping over the label count. `None` if there are no labels.
    pub fn cycle(&mut self, current: u8) -> Option<u8> {
        let count = self.labels().len();
        if count == 0 {
            return None;
        }
        Some(((current as usize + 1) % count) as u8)
    }
}
