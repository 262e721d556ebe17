//! [`Gui`] that records draw calls instead of rasterizing them.
//!
//! Lets tests assert on what a screen shows (titles, row labels, status
//! values, hints) without reading pixels.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::input::ButtonLabels;
use crate::ui::activity::ActivityRefreshMode;
use crate::ui::gui::{Gui, RowText};
use crate::ui::theme::Theme;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiOp {
    Clear,
    Header(String),
    SubHeader(String),
    List {
        selected: usize,
        labels: Vec<String>,
        statuses: Option<Vec<String>>,
    },
    TextField {
        title: String,
        text: String,
    },
    KeyGrid {
        rows: Vec<Vec<String>>,
        selected: (usize, usize),
    },
    ButtonHints([String; 4]),
    Display(ActivityRefreshMode),
}

#[derive(Debug, Clone)]
pub struct RecordingGui {
    size: Size,
    theme: Theme,
    ops: Vec<GuiOp>,
}

impl RecordingGui {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            theme: Theme::default(),
            ops: Vec::new(),
        }
    }

    /// Recorder with the Xteink X4 panel size
    pub fn default_size() -> Self {
        Self::new(Size::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT))
    }

    pub fn ops(&self) -> &[GuiOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Number of `display_buffer` calls recorded
    pub fn frames(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, GuiOp::Display(_)))
            .count()
    }

    /// Ops of the last complete frame, starting after the previous
    /// `display_buffer`.
    pub fn last_frame(&self) -> &[GuiOp] {
        let Some(end) = self
            .ops
            .iter()
            .rposition(|op| matches!(op, GuiOp::Display(_)))
        else {
            return &[];
        };
        let start = self.ops[..end]
            .iter()
            .rposition(|op| matches!(op, GuiOp::Display(_)))
            .map_or(0, |i| i + 1);
        &self.ops[start..=end]
    }

    /// Header of the last frame
    pub fn last_header(&self) -> Option<&str> {
        self.last_frame().iter().find_map(|op| match op {
            GuiOp::Header(title) => Some(title.as_str()),
            _ => None,
        })
    }

    /// `(selected, labels, statuses)` of the last list drawn in the last frame
    pub fn last_list(&self) -> Option<(usize, &[String], Option<&[String]>)> {
        self.last_frame().iter().rev().find_map(|op| match op {
            GuiOp::List {
                selected,
                labels,
                statuses,
            } => Some((*selected, labels.as_slice(), statuses.as_deref())),
            _ => None,
        })
    }

    /// Button hints of the last frame
    pub fn last_hints(&self) -> Option<&[String; 4]> {
        self.last_frame().iter().rev().find_map(|op| match op {
            GuiOp::ButtonHints(labels) => Some(labels),
            _ => None,
        })
    }

    /// Text field contents of the last frame
    pub fn last_text_field(&self) -> Option<(&str, &str)> {
        self.last_frame().iter().rev().find_map(|op| match op {
            GuiOp::TextField { title, text } => Some((title.as_str(), text.as_str())),
            _ => None,
        })
    }
}

impl Default for RecordingGui {
    fn default() -> Self {
        Self::default_size()
    }
}

impl Gui for RecordingGui {
    fn screen_size(&self) -> Size {
        self.size
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn clear_screen(&mut self) {
        self.ops.push(GuiOp::Clear);
    }

    fn draw_header(&mut self, title: &str) {
        self.ops.push(GuiOp::Header(title.to_string()));
    }

    fn draw_sub_header(&mut self, text: &str) {
        self.ops.push(GuiOp::SubHeader(text.to_string()));
    }

    fn draw_list(
        &mut self,
        _rect: Rectangle,
        count: usize,
        selected: usize,
        label: RowText<'_>,
        status: Option<RowText<'_>>,
    ) {
        self.ops.push(GuiOp::List {
            selected,
            labels: (0..count).map(label).collect(),
            statuses: status.map(|status| (0..count).map(status).collect()),
        });
    }

    fn draw_text_field(&mut self, _rect: Rectangle, title: &str, text: &str) {
        self.ops.push(GuiOp::TextField {
            title: title.to_string(),
            text: text.to_string(),
        });
    }

    fn draw_key_grid(&mut self, _rect: Rectangle, rows: &[&[&str]], selected: (usize, usize)) {
        self.ops.push(GuiOp::KeyGrid {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|key| key.to_string()).collect())
                .collect(),
            selected,
        });
    }

    fn draw_button_hints(&mut self, labels: &ButtonLabels<'_>) {
        self.ops
            .push(GuiOp::ButtonHints(labels.as_array().map(String::from)));
    }

    fn display_buffer(&mut self, mode: ActivityRefreshMode) {
        self.ops.push(GuiOp::Display(mode));
    }
}
