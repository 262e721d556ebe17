//! Theme system with metrics for consistent UI spacing and sizing.
//!
//! ## Semantic Font API
//!
//! UI code picks one of three font tiers:
//! - `ui_font_title()` for headers
//! - `ui_font_body()` for list rows and key labels
//! - `ui_font_small()` for sub-headers and button hints

use embedded_graphics::mono_font::{ascii, MonoFont};

/// Title/header font, the largest tier.
pub fn ui_font_title() -> &'static MonoFont<'static> {
    &ascii::FONT_10X20
}

/// Body font, for list items and keyboard keys.
pub fn ui_font_body() -> &'static MonoFont<'static> {
    &ascii::FONT_9X18_BOLD
}

/// Small font, for secondary text and captions.
pub fn ui_font_small() -> &'static MonoFont<'static> {
    &ascii::FONT_8X13
}

/// Character width for the body font.
pub fn ui_font_body_char_width() -> i32 {
    ui_font_body().character_size.width as i32
}

// ── Layout constants ────────────────────────────────────────────────

/// Layout constants for the Xteink X4 (480×800 @ 220 PPI).
pub mod layout {
    /// Side margin (left/right padding from screen edge).
    pub const MARGIN: i32 = 20;

    /// Inner padding within cards, panels, overlays.
    pub const INNER_PAD: i32 = 10;

    /// Header bar height (title + separator line area).
    pub const HEADER_H: i32 = 40;

    /// Y baseline for title text in the header.
    pub const HEADER_TEXT_Y: i32 = 28;

    /// Y position of the separator line below the header.
    pub const HEADER_SEP_Y: i32 = 42;

    /// Height reserved for the sub-header text block.
    pub const SUB_HEADER_H: i32 = 44;

    /// Footer bar height (button hints).
    pub const FOOTER_H: i32 = 50;

    /// Small gap (between tight elements).
    pub const GAP_SM: i32 = 8;

    /// Medium gap (section separators, card-to-list).
    pub const GAP_MD: i32 = 18;

    /// Horizontal overshoot for selection highlight rectangles.
    pub const SELECT_PAD_X: i32 = 5;

    /// Separator line thickness.
    pub const SEP_THICKNESS: u32 = 1;

    /// Height of one keyboard key.
    pub const KEY_H: i32 = 48;

    /// Height of the text field above the keyboard.
    pub const FIELD_H: i32 = 56;

    /// Y where content starts (below header + separator + gap).
    pub const fn content_start_y() -> i32 {
        HEADER_SEP_Y + GAP_SM
    }
}

/// UI spacing and sizing metrics (in pixels)
///
/// All values are optimized for the Xteink X4's 480x800 display
/// at 220 PPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeMetrics {
    /// Header height for navigation bars
    pub header_height: u32,
    /// Footer height for the button hint bar
    pub footer_height: u32,
    /// Horizontal padding for side margins and item internal padding
    pub side_padding: u32,
    /// Height of each list item
    pub list_item_height: u32,
    /// Base spacing unit for margins and gaps
    pub spacing: u32,
}

impl ThemeMetrics {
    /// Create metrics with custom values
    pub const fn new(
        header_height: u32,
        footer_height: u32,
        side_padding: u32,
        list_item_height: u32,
        spacing: u32,
    ) -> Self {
        Self {
            header_height,
            footer_height,
            side_padding,
            list_item_height,
            spacing,
        }
    }

    /// Usable content width after side padding
    pub const fn content_width(&self, display_width: u32) -> u32 {
        display_width.saturating_sub(self.side_padding * 2)
    }

    /// Usable content height after header and footer
    pub const fn content_height(&self, display_height: u32) -> u32 {
        display_height.saturating_sub(self.header_height + self.footer_height)
    }

    /// Y offset to vertically center text within a box of given height.
    pub const fn text_y_offset(height: u32) -> i32 {
        (height as i32) / 2 + 6
    }

    /// Shorthand: Y offset for centering text within a list item.
    pub const fn item_text_y(&self) -> i32 {
        Self::text_y_offset(self.list_item_height)
    }

    /// How many list rows fit into `height` pixels.
    pub const fn rows_in(&self, height: u32) -> usize {
        if self.list_item_height == 0 {
            0
        } else {
            (height / self.list_item_height) as usize
        }
    }
}

impl Default for ThemeMetrics {
    fn default() -> Self {
        Self {
            header_height: layout::HEADER_H as u32,
            footer_height: layout::FOOTER_H as u32,
            side_padding: layout::MARGIN as u32,
            list_item_height: 60,
            spacing: layout::GAP_MD as u32,
        }
    }
}

/// Complete theme definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub metrics: ThemeMetrics,
}

impl Theme {
    /// Create a new theme with the given metrics
    pub const fn new(metrics: ThemeMetrics) -> Self {
        Self { metrics }
    }
}
