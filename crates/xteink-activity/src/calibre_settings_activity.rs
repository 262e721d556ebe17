//! OPDS server settings (Calibre-Web or any OPDS catalog).
//!
//! Text rows open the keyboard for a result and save on confirm. The
//! download folder row cycles through its schema labels in place.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use crate::activity_result::{ActivityResult, ResultPayload};
use crate::button_navigator::ButtonNavigator;
use crate::input::Action;
use crate::keyboard_entry_activity::KeyboardEntryActivity;
use crate::settings::{EnumField, Settings, TextField};
use crate::settings_schema::{settings_list, EnumLabelCache};
use crate::strings::{StrId, StringTable};
use crate::ui::theme::layout;
use crate::ui::{Activity, ActivityContext, ActivityRefreshMode, Gui, RenderContext};

/// Shown instead of a stored password
pub const PASSWORD_MASK: &str = "******";

/// Rows of the OPDS settings list, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibreRow {
    ServerUrl,
    Username,
    Password,
    FileFolder,
}

impl CalibreRow {
    pub const ALL: [Self; 4] = [
        Self::ServerUrl,
        Self::Username,
        Self::Password,
        Self::FileFolder,
    ];

    pub const fn label(self) -> StrId {
        match self {
            Self::ServerUrl => StrId::CalibreWebUrl,
            Self::Username => StrId::Username,
            Self::Password => StrId::Password,
            Self::FileFolder => StrId::OpdsFileFolder,
        }
    }

    /// Backing text field, `None` for the folder row
    pub const fn text_field(self) -> Option<TextField> {
        match self {
            Self::ServerUrl => Some(TextField::OpdsServerUrl),
            Self::Username => Some(TextField::OpdsUsername),
            Self::Password => Some(TextField::OpdsPassword),
            Self::FileFolder => None,
        }
    }
}

/// Settings screen for the OPDS browser connection.
#[derive(Debug, Clone)]
pub struct CalibreSettingsActivity {
    selected: usize,
    navigator: ButtonNavigator,
    folder_labels: EnumLabelCache,
}

impl CalibreSettingsActivity {
    pub fn new() -> Self {
        Self {
            selected: 0,
            navigator: ButtonNavigator::new(),
            folder_labels: EnumLabelCache::new(EnumField::OpdsFileFolder.key(), settings_list()),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> CalibreRow {
        CalibreRow::ALL
            .get(self.selected)
            .copied()
            .unwrap_or(CalibreRow::ServerUrl)
    }

    /// Status column text for `row`.
    pub fn row_status(&self, row: CalibreRow, settings: &Settings, strings: &dyn StringTable) -> String {
        if let Some(field) = row.text_field() {
            let value = field.get(settings);
            return if value.is_empty() {
                String::from(strings.get(StrId::NotSet))
            } else if field.is_secret() {
                String::from(PASSWORD_MASK)
            } else {
                String::from(value)
            };
        }

        let index = EnumField::OpdsFileFolder.get(settings);
        match self.folder_labels.lookup().get(index as usize) {
            Some(&label) => String::from(strings.get(label)),
            None => String::from(strings.get(StrId::NotSet)),
        }
    }

    fn edit_text(&self, field: TextField, ctx: &mut ActivityContext<'_>) {
        let title = ctx.tr(self.selected_row().label());
        let keyboard = KeyboardEntryActivity::new(
            title,
            field.get(ctx.settings.record()),
            field.max_len(),
            field.is_secret(),
        );
        ctx.start_activity_for_result(Box::new(keyboard), move |result, ctx| match result {
            ActivityResult::Completed(ResultPayload::Keyboard(entry)) => {
                if field.set(ctx.settings.record_mut(), &entry.text) {
                    log::warn!("{} truncated to {} bytes", field.key(), field.max_len());
                }
                ctx.settings.save();
            }
            ActivityResult::Cancelled => {
                log::debug!("{} edit cancelled", field.key());
            }
        });
    }

    fn cycle_folder(&mut self, ctx: &mut ActivityContext<'_>) {
        let field = EnumField::OpdsFileFolder;
        let current = field.get(ctx.settings.record());
        match self.folder_labels.cycle(current) {
            Some(next) => {
                field.set(ctx.settings.record_mut(), next);
                ctx.settings.save();
            }
            None => log::warn!("{} has no labels, left at {}", field.key(), current),
        }
    }
}

impl Default for CalibreSettingsActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl Activity for CalibreSettingsActivity {
    fn name(&self) -> &'static str {
        "CalibreSettings"
    }

    fn on_enter(&mut self, _ctx: &mut ActivityContext<'_>) {
        self.selected = 0;
    }

    fn update(&mut self, ctx: &mut ActivityContext<'_>) {
        if ctx.input.was_pressed(Action::Back) {
            ctx.finish();
            return;
        }

        if ctx.input.was_pressed(Action::Confirm) {
            match self.selected_row().text_field() {
                Some(field) => self.edit_text(field, ctx),
                None => self.cycle_folder(ctx),
            }
            return;
        }

        let count = CalibreRow::ALL.len();
        let Self {
            navigator,
            selected,
            ..
        } = self;
        navigator.on_next(ctx.input, || *selected = (*selected + 1) % count);
        navigator.on_previous(ctx.input, || *selected = (*selected + count - 1) % count);
    }

    fn render(&self, gui: &mut dyn Gui, ctx: &RenderContext<'_>) {
        gui.clear_screen();
        gui.draw_header(ctx.tr(StrId::OpdsBrowser));
        gui.draw_sub_header(ctx.tr(StrId::CalibreUrlHint));

        let rect = gui.content_rect(layout::SUB_HEADER_H as u32);
        let label = |i: usize| {
            CalibreRow::ALL
                .get(i)
                .map(|row| String::from(ctx.tr(row.label())))
                .unwrap_or_default()
        };
        let status = |i: usize| {
            CalibreRow::ALL
                .get(i)
                .map(|&row| self.row_status(row, ctx.settings, ctx.strings))
                .unwrap_or_default()
        };
        gui.draw_list(rect, CalibreRow::ALL.len(), self.selected, &label, Some(&status));

        let labels = ctx.input.map_labels(
            ctx.tr(StrId::Back),
            ctx.tr(StrId::Select),
            ctx.tr(StrId::DirUp),
            ctx.tr(StrId::DirDown),
        );
        gui.draw_button_hints(&labels);
        gui.display_buffer(self.refresh_mode());
    }

    fn refresh_mode(&self) -> ActivityRefreshMode {
        ActivityRefreshMode::Fast
    }
}
