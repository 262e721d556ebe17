//! Drawing capability handed to activities.
//!
//! Activities never touch a `DrawTarget` directly; they describe a frame in
//! terms of the widgets below and finish with [`Gui::display_buffer`].

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::input::ButtonLabels;
use crate::ui::activity::ActivityRefreshMode;
use crate::ui::theme::{layout, Theme};

/// Label or status text for a list row
pub type RowText<'a> = &'a dyn Fn(usize) -> alloc::string::String;

/// Widget-level drawing operations.
pub trait Gui {
    /// Size of the drawable area in pixels
    fn screen_size(&self) -> Size;

    fn theme(&self) -> &Theme;

    fn clear_screen(&mut self);

    /// Title bar at the top of the screen
    fn draw_header(&mut self, title: &str);

    /// Wrapped hint text below the header
    fn draw_sub_header(&mut self, text: &str);

    /// Rows `0..count` inside `rect`, scrolled so `selected` is visible.
    /// `status` draws a right-aligned value next to each label.
    fn draw_list(
        &mut self,
        rect: Rectangle,
        count: usize,
        selected: usize,
        label: RowText<'_>,
        status: Option<RowText<'_>>,
    );

    /// Boxed single-line text input
    fn draw_text_field(&mut self, rect: Rectangle, title: &str, text: &str);

    /// Grid of keys with one highlighted at `(row, col)`
    fn draw_key_grid(&mut self, rect: Rectangle, rows: &[&[&str]], selected: (usize, usize));

    /// Footer hints for the four front buttons
    fn draw_button_hints(&mut self, labels: &ButtonLabels<'_>);

    /// Push the frame to the panel
    fn display_buffer(&mut self, mode: ActivityRefreshMode);

    /// Area between the header block and the footer, below `top` pixels of
    /// extra content.
    fn content_rect(&self, top: u32) -> Rectangle {
        let size = self.screen_size();
        let metrics = self.theme().metrics;
        let y = layout::content_start_y() as u32 + top;
        let height = size
            .height
            .saturating_sub(y + metrics.footer_height + metrics.spacing);
        Rectangle::new(
            Point::new(0, y as i32),
            Size::new(size.width, height),
        )
    }
}
