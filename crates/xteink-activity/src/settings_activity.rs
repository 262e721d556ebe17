//! Root settings menu.
//!
//! Lists the setting categories. "OPDS Browser" opens the server settings
//! screen; "Front Buttons" cycles the front button layout in place and
//! applies it right away.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use crate::button_navigator::ButtonNavigator;
use crate::calibre_settings_activity::CalibreSettingsActivity;
use crate::input::Action;
use crate::settings::{EnumField, Settings};
use crate::settings_schema::{settings_list, EnumLabelCache};
use crate::strings::{StrId, StringTable};
use crate::ui::{Activity, ActivityContext, ActivityRefreshMode, Gui, RenderContext};

/// Entries of the root settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingRow {
    OpdsBrowser,
    FrontButtons,
}

impl SettingRow {
    pub const ALL: [Self; 2] = [Self::OpdsBrowser, Self::FrontButtons];

    pub const fn label(self) -> StrId {
        match self {
            Self::OpdsBrowser => StrId::OpdsBrowser,
            Self::FrontButtons => StrId::FrontButtons,
        }
    }
}

/// Settings Activity implementing the Activity trait
#[derive(Debug, Clone)]
pub struct SettingsActivity {
    selected: usize,
    navigator: ButtonNavigator,
    layout_labels: EnumLabelCache,
}

impl SettingsActivity {
    pub fn new() -> Self {
        Self {
            selected: 0,
            navigator: ButtonNavigator::new(),
            layout_labels: EnumLabelCache::new(
                EnumField::FrontButtonLayout.key(),
                settings_list(),
            ),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn selected_row(&self) -> SettingRow {
        SettingRow::ALL
            .get(self.selected)
            .copied()
            .unwrap_or(SettingRow::OpdsBrowser)
    }

    fn row_status(&self, row: SettingRow, settings: &Settings, strings: &dyn StringTable) -> String {
        match row {
            SettingRow::OpdsBrowser => String::new(),
            SettingRow::FrontButtons => self
                .layout_labels
                .lookup()
                .get(settings.front_button_layout().index())
                .map(|&label| String::from(strings.get(label)))
                .unwrap_or_default(),
        }
    }

    fn cycle_layout(&mut self, ctx: &mut ActivityContext<'_>) {
        let field = EnumField::FrontButtonLayout;
        let current = ctx.settings.record().front_button_layout().index() as u8;
        let Some(next) = self.layout_labels.cycle(current) else {
            log::warn!("{} has no labels", field.key());
            return;
        };
        field.set(ctx.settings.record_mut(), next);
        ctx.settings.save();
        let layout = ctx.settings.record().front_button_layout();
        ctx.input.set_layout(layout);
    }
}

impl Default for SettingsActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl Activity for SettingsActivity {
    fn name(&self) -> &'static str {
        "Settings"
    }

    fn update(&mut self, ctx: &mut ActivityContext<'_>) {
        if ctx.input.was_pressed(Action::Back) {
            ctx.finish();
            return;
        }

        if ctx.input.was_pressed(Action::Confirm) {
            match self.selected_row() {
                SettingRow::OpdsBrowser => {
                    ctx.start_activity(Box::new(CalibreSettingsActivity::new()));
                }
                SettingRow::FrontButtons => self.cycle_layout(ctx),
            }
            return;
        }

        let count = SettingRow::ALL.len();
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
        gui.draw_header(ctx.tr(StrId::Settings));
        gui.draw_sub_header(ctx.tr(StrId::SettingsHint));

        let rect = gui.content_rect(crate::ui::theme::layout::SUB_HEADER_H as u32);
        let label = |i: usize| {
            SettingRow::ALL
                .get(i)
                .map(|row| String::from(ctx.tr(row.label())))
                .unwrap_or_default()
        };
        let status = |i: usize| {
            SettingRow::ALL
                .get(i)
                .map(|&row| self.row_status(row, ctx.settings, ctx.strings))
                .unwrap_or_default()
        };
        gui.draw_list(rect, SettingRow::ALL.len(), self.selected, &label, Some(&status));

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
