//! [`Gui`] implementation on top of an embedded-graphics `DrawTarget`.
//!
//! Components are drawn with e-ink constraints in mind:
//! - High contrast (black/white only)
//! - No animations or gradients
//! - Inverted rows for focus

extern crate alloc;

use alloc::string::String;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use embedded_text::{alignment::HorizontalAlignment, style::TextBoxStyleBuilder, TextBox};

use crate::input::ButtonLabels;
use crate::ui::activity::ActivityRefreshMode;
use crate::ui::gui::{Gui, RowText};
use crate::ui::theme::{
    layout, ui_font_body, ui_font_body_char_width, ui_font_small, ui_font_title, Theme,
    ThemeMetrics,
};

/// Draws widgets into `D`.
///
/// The target is left untouched between frames; `display_buffer` only
/// records that a frame is complete. Callers owning a real panel read
/// [`DisplayGui::take_frame`] to know when to push pixels out.
pub struct DisplayGui<D> {
    target: D,
    theme: Theme,
    frames: u32,
    pending: Option<ActivityRefreshMode>,
}

impl<D> DisplayGui<D>
where
    D: DrawTarget<Color = BinaryColor>,
    D::Error: core::fmt::Debug,
{
    pub fn new(target: D, theme: Theme) -> Self {
        Self {
            target,
            theme,
            frames: 0,
            pending: None,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    /// Number of completed frames
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Refresh mode of the last completed frame not yet taken.
    pub fn take_frame(&mut self) -> Option<ActivityRefreshMode> {
        self.pending.take()
    }

    fn check(&self, what: &str, result: Result<(), D::Error>) {
        if let Err(err) = result {
            log::warn!("draw {} failed: {:?}", what, err);
        }
    }

    fn fill(&mut self, rect: Rectangle, color: BinaryColor) -> Result<(), D::Error> {
        rect.into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn text(
        &mut self,
        text: &str,
        position: Point,
        font: &MonoFont<'_>,
        color: BinaryColor,
        alignment: Alignment,
    ) -> Result<(), D::Error> {
        let style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(Baseline::Alphabetic)
            .build();
        Text::with_text_style(text, position, MonoTextStyle::new(font, color), style)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn header(&mut self, title: &str) -> Result<(), D::Error> {
        let width = self.screen_size().width;
        self.text(
            title,
            Point::new(layout::MARGIN, layout::HEADER_TEXT_Y),
            ui_font_title(),
            BinaryColor::On,
            Alignment::Left,
        )?;
        self.fill(
            Rectangle::new(
                Point::new(layout::MARGIN, layout::HEADER_SEP_Y),
                Size::new(
                    width.saturating_sub(2 * layout::MARGIN as u32),
                    layout::SEP_THICKNESS,
                ),
            ),
            BinaryColor::On,
        )
    }

    fn sub_header(&mut self, text: &str) -> Result<(), D::Error> {
        let metrics = self.theme.metrics;
        let bounds = Rectangle::new(
            Point::new(layout::MARGIN, layout::content_start_y()),
            Size::new(
                metrics.content_width(self.screen_size().width),
                layout::SUB_HEADER_H as u32,
            ),
        );
        let character_style = MonoTextStyle::new(ui_font_small(), BinaryColor::On);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Left)
            .build();
        TextBox::with_textbox_style(text, bounds, character_style, textbox_style)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn list(
        &mut self,
        rect: Rectangle,
        count: usize,
        selected: usize,
        label: RowText<'_>,
        status: Option<RowText<'_>>,
    ) -> Result<(), D::Error> {
        let metrics = self.theme.metrics;
        let visible = metrics.rows_in(rect.size.height);
        if visible == 0 || count == 0 {
            return Ok(());
        }
        let first = (selected.min(count - 1) / visible) * visible;
        let item_h = metrics.list_item_height;
        let left = rect.top_left.x + layout::MARGIN - layout::SELECT_PAD_X;
        let right = rect.top_left.x + rect.size.width as i32 - layout::MARGIN;

        for (row, index) in (first..count).take(visible).enumerate() {
            let y = rect.top_left.y + (row as u32 * item_h) as i32;
            let is_selected = index == selected;
            let (bg, fg) = if is_selected {
                (BinaryColor::On, BinaryColor::Off)
            } else {
                (BinaryColor::Off, BinaryColor::On)
            };
            self.fill(
                Rectangle::new(
                    Point::new(left, y),
                    Size::new((right - left + layout::SELECT_PAD_X) as u32, item_h),
                ),
                bg,
            )?;

            let baseline = y + metrics.item_text_y();
            self.text(
                &label(index),
                Point::new(rect.top_left.x + layout::MARGIN, baseline),
                ui_font_body(),
                fg,
                Alignment::Left,
            )?;
            if let Some(status) = status {
                self.text(
                    &status(index),
                    Point::new(right, baseline),
                    ui_font_body(),
                    fg,
                    Alignment::Right,
                )?;
            }
        }
        Ok(())
    }

    fn text_field(&mut self, rect: Rectangle, title: &str, text: &str) -> Result<(), D::Error> {
        self.text(
            title,
            Point::new(rect.top_left.x, rect.top_left.y - layout::GAP_SM),
            ui_font_small(),
            BinaryColor::On,
            Alignment::Left,
        )?;
        rect.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
            .draw(&mut self.target)?;

        // Show the tail so the cursor end stays visible
        let fits = (rect.size.width as i32 - 2 * layout::INNER_PAD) / ui_font_body_char_width();
        let shown = tail_chars(text, fits.max(0) as usize);
        let mut line = String::from(shown);
        line.push('_');
        self.text(
            &line,
            Point::new(
                rect.top_left.x + layout::INNER_PAD,
                rect.top_left.y + ThemeMetrics::text_y_offset(rect.size.height),
            ),
            ui_font_body(),
            BinaryColor::On,
            Alignment::Left,
        )
    }

    fn key_grid(
        &mut self,
        rect: Rectangle,
        rows: &[&[&str]],
        selected: (usize, usize),
    ) -> Result<(), D::Error> {
        let key_h = layout::KEY_H;
        for (r, keys) in rows.iter().enumerate() {
            if keys.is_empty() {
                continue;
            }
            let key_w = rect.size.width as i32 / keys.len() as i32;
            let y = rect.top_left.y + r as i32 * key_h;
            for (c, key) in keys.iter().enumerate() {
                let x = rect.top_left.x + c as i32 * key_w;
                let bounds = Rectangle::new(
                    Point::new(x + 1, y + 1),
                    Size::new((key_w - 2).max(0) as u32, (key_h - 2) as u32),
                );
                let fg = if (r, c) == selected {
                    self.fill(bounds, BinaryColor::On)?;
                    BinaryColor::Off
                } else {
                    bounds
                        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                        .draw(&mut self.target)?;
                    BinaryColor::On
                };
                self.text(
                    key,
                    Point::new(x + key_w / 2, y + ThemeMetrics::text_y_offset(key_h as u32)),
                    ui_font_body(),
                    fg,
                    Alignment::Center,
                )?;
            }
        }
        Ok(())
    }

    fn button_hints(&mut self, labels: &ButtonLabels<'_>) -> Result<(), D::Error> {
        let size = self.screen_size();
        let footer_h = self.theme.metrics.footer_height;
        let top = size.height.saturating_sub(footer_h) as i32;
        let slot_w = size.width as i32 / 4;
        for (slot, label) in labels.as_array().iter().enumerate() {
            if label.is_empty() {
                continue;
            }
            let x = slot as i32 * slot_w;
            Rectangle::new(
                Point::new(x + layout::GAP_SM, top + layout::GAP_SM),
                Size::new(
                    (slot_w - 2 * layout::GAP_SM) as u32,
                    footer_h.saturating_sub(2 * layout::GAP_SM as u32),
                ),
            )
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.target)?;
            self.text(
                label,
                Point::new(x + slot_w / 2, top + ThemeMetrics::text_y_offset(footer_h)),
                ui_font_small(),
                BinaryColor::On,
                Alignment::Center,
            )?;
        }
        Ok(())
    }
}

fn tail_chars(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    match text.char_indices().nth(count - max_chars) {
        Some((start, _)) => &text[start..],
        None => "",
    }
}

impl<D> Gui for DisplayGui<D>
where
    D: DrawTarget<Color = BinaryColor>,
    D::Error: core::fmt::Debug,
{
    fn screen_size(&self) -> Size {
        self.target.bounding_box().size
    }

    fn theme(&self) -> &Theme {
        &self.theme
    }

    fn clear_screen(&mut self) {
        let result = self.target.clear(BinaryColor::Off);
        self.check("clear", result);
    }

    fn draw_header(&mut self, title: &str) {
        let result = self.header(title);
        self.check("header", result);
    }

    fn draw_sub_header(&mut self, text: &str) {
        let result = self.sub_header(text);
        self.check("sub-header", result);
    }

    fn draw_list(
        &mut self,
        rect: Rectangle,
        count: usize,
        selected: usize,
        label: RowText<'_>,
        status: Option<RowText<'_>>,
    ) {
        let result = self.list(rect, count, selected, label, status);
        self.check("list", result);
    }

    fn draw_text_field(&mut self, rect: Rectangle, title: &str, text: &str) {
        let result = self.text_field(rect, title, text);
        self.check("text field", result);
    }

    fn draw_key_grid(&mut self, rect: Rectangle, rows: &[&[&str]], selected: (usize, usize)) {
        let result = self.key_grid(rect, rows, selected);
        self.check("key grid", result);
    }

    fn draw_button_hints(&mut self, labels: &ButtonLabels<'_>) {
        let result = self.button_hints(labels);
        self.check("button hints", result);
    }

    fn display_buffer(&mut self, mode: ActivityRefreshMode) {
        self.frames = self.frames.wrapping_add(1);
        self.pending = Some(mode);
    }
}
