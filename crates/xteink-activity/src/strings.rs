//! UI string identifiers and the lookup used to display them.

/// Identifier of a translatable UI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrId {
    Settings,
    SettingsHint,
    OpdsBrowser,
    FrontButtons,
    CalibreUrlHint,
    CalibreWebUrl,
    Username,
    Password,
    OpdsFileFolder,
    NotSet,
    Back,
    Select,
    DirUp,
    DirDown,
    Left,
    Right,
    Done,
    Shift,
    Space,
    Delete,
    FolderBooks,
    FolderDownloads,
    FolderRoot,
    LayoutBackConfirmLeftRight,
    LayoutLeftRightBackConfirm,
    LayoutLeftBackConfirmRight,
    LayoutBackConfirmRightLeft,
}

impl StrId {
    /// Built-in English text
    pub const fn english(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
            Self::SettingsHint => "Choose a category",
            Self::OpdsBrowser => "OPDS Browser",
            Self::FrontButtons => "Front Buttons",
            Self::CalibreUrlHint => "Use the Calibre-Web or OPDS catalog URL",
            Self::CalibreWebUrl => "Server URL",
            Self::Username => "Username",
            Self::Password => "Password",
            Self::OpdsFileFolder => "Download Folder",
            Self::NotSet => "Not set",
            Self::Back => "Back",
            Self::Select => "Select",
            Self::DirUp => "Up",
            Self::DirDown => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Done => "OK",
            Self::Shift => "shift",
            Self::Space => "space",
            Self::Delete => "del",
            Self::FolderBooks => "/Books",
            Self::FolderDownloads => "/Downloads",
            Self::FolderRoot => "/",
            Self::LayoutBackConfirmLeftRight => "Back, Select, Left, Right",
            Self::LayoutLeftRightBackConfirm => "Left, Right, Back, Select",
            Self::LayoutLeftBackConfirmRight => "Left, Back, Select, Right",
            Self::LayoutBackConfirmRightLeft => "Back, Select, Right, Left",
        }
    }
}

/// Resolves string identifiers to display text.
pub trait StringTable {
    fn get(&self, id: StrId) -> &str;
}

/// English strings compiled into the firmware.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishStrings;

impl StringTable for EnglishStrings {
    fn get(&self, id: StrId) -> &str {
        id.english()
    }
}
