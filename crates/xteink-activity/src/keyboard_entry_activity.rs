//! On-screen keyboard for entering a single line of text.
//!
//! Returns `Completed(Keyboard { text })` when OK is chosen and
//! `Cancelled` on Back.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::activity_result::ActivityResult;
use crate::input::{Action, Button};
use crate::strings::StrId;
use crate::ui::theme::layout;
use crate::ui::{Activity, ActivityContext, ActivityRefreshMode, Gui, RenderContext};

const CHAR_ROWS: usize = 4;
const ROW_LEN: usize = 10;
const SPECIAL_ROW: usize = CHAR_ROWS;
const ROWS: usize = CHAR_ROWS + 1;

const LOWER: [[&str; ROW_LEN]; CHAR_ROWS] = [
    ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"],
    ["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"],
    ["a", "s", "d", "f", "g", "h", "j", "k", "l", "."],
    ["z", "x", "c", "v", "b", "n", "m", ":", "/", "@"],
];

const UPPER: [[&str; ROW_LEN]; CHAR_ROWS] = [
    ["!", "#", "$", "%", "&", "*", "(", ")", "?", "="],
    ["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
    ["A", "S", "D", "F", "G", "H", "J", "K", "L", ","],
    ["Z", "X", "C", "V", "B", "N", "M", "-", "_", "~"],
];

/// Keys of the bottom row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    Shift,
    Space,
    Backspace,
    Ok,
}

impl SpecialKey {
    pub const ALL: [Self; 4] = [Self::Shift, Self::Space, Self::Backspace, Self::Ok];

    const fn label(self) -> StrId {
        match self {
            Self::Shift => StrId::Shift,
            Self::Space => StrId::Space,
            Self::Backspace => StrId::Delete,
            Self::Ok => StrId::Done,
        }
    }
}

/// Selected key when the keyboard opens
pub const START_CURSOR: (usize, usize) = (1, 0);

/// Position of the OK key
pub const OK_KEY: (usize, usize) = (SPECIAL_ROW, 3);

/// Grid position of `ch` on the unshifted layout
pub fn key_position(ch: char) -> Option<(usize, usize)> {
    if ch == ' ' {
        return Some((SPECIAL_ROW, 1));
    }
    LOWER.iter().enumerate().find_map(|(row, keys)| {
        keys.iter()
            .position(|key| key.chars().eq(core::iter::once(ch)))
            .map(|col| (row, col))
    })
}

/// Number of keys in `row`
pub fn row_len(row: usize) -> usize {
    if row == SPECIAL_ROW {
        SpecialKey::ALL.len()
    } else {
        ROW_LEN
    }
}

/// Buttons that move the cursor from `from` to `to` with the default front
/// button layout: Down until the row matches, then Right.
///
/// Columns clamp on every row passed, the short special row included.
pub fn key_path(from: (usize, usize), to: (usize, usize)) -> Vec<Button> {
    let mut path = Vec::new();
    let (mut row, mut col) = from;
    while row != to.0 % ROWS {
        path.push(Button::Down);
        row = (row + 1) % ROWS;
        col = col.min(row_len(row) - 1);
    }
    let len = row_len(row);
    let steps = (to.1 % len + len - col) % len;
    path.extend(core::iter::repeat(Button::Right).take(steps));
    path
}

/// Every press that types `text` on a freshly opened keyboard and then
/// chooses OK. `None` if a character is not on the unshifted layout.
pub fn typing_presses(text: &str) -> Option<Vec<Button>> {
    let mut presses = Vec::new();
    let mut cursor = START_CURSOR;
    for ch in text.chars() {
        let target = key_position(ch)?;
        presses.extend(key_path(cursor, target));
        presses.push(Button::Confirm);
        cursor = target;
    }
    presses.extend(key_path(cursor, OK_KEY));
    presses.push(Button::Confirm);
    Some(presses)
}

/// Text entry activity with a key grid driven by the four directions.
#[derive(Debug, Clone)]
pub struct KeyboardEntryActivity {
    title: String,
    text: String,
    max_length: usize,
    is_password: bool,
    row: usize,
    col: usize,
    shifted: bool,
}

impl KeyboardEntryActivity {
    /// `initial` is cut to `max_length` bytes on a char boundary.
    pub fn new(title: impl Into<String>, initial: &str, max_length: usize, is_password: bool) -> Self {
        let mut end = initial.len().min(max_length);
        while !initial.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            title: title.into(),
            text: String::from(&initial[..end]),
            max_length,
            is_password,
            row: START_CURSOR.0,
            col: START_CURSOR.1,
            shifted: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Selected `(row, col)` in the key grid
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_shifted(&self) -> bool {
        self.shifted
    }

    fn move_vertical(&mut self, down: bool) {
        self.row = if down {
            (self.row + 1) % ROWS
        } else {
            (self.row + ROWS - 1) % ROWS
        };
        self.col = self.col.min(row_len(self.row) - 1);
    }

    fn move_horizontal(&mut self, right: bool) {
        let len = row_len(self.row);
        self.col = if right {
            (self.col + 1) % len
        } else {
            (self.col + len - 1) % len
        };
    }

    fn type_str(&mut self, s: &str) {
        if self.text.len() + s.len() > self.max_length {
            log::debug!("keyboard input ignored, {} byte limit", self.max_length);
            return;
        }
        self.text.push_str(s);
    }

    fn key_rows(&self) -> &'static [[&'static str; ROW_LEN]; CHAR_ROWS] {
        if self.shifted {
            &UPPER
        } else {
            &LOWER
        }
    }

    fn activate(&mut self, ctx: &mut ActivityContext<'_>) {
        if self.row < CHAR_ROWS {
            let key = self.key_rows()[self.row][self.col];
            self.type_str(key);
            return;
        }
        match SpecialKey::ALL.get(self.col) {
            Some(SpecialKey::Shift) => self.shifted = !self.shifted,
            Some(SpecialKey::Space) => self.type_str(" "),
            Some(SpecialKey::Backspace) => {
                self.text.pop();
            }
            Some(SpecialKey::Ok) => {
                ctx.set_result(ActivityResult::keyboard(self.text.clone()));
                ctx.finish();
            }
            None => {}
        }
    }

    fn shown_text(&self) -> String {
        if self.is_password {
            self.text.chars().map(|_| '*').collect()
        } else {
            self.text.clone()
        }
    }
}

impl Activity for KeyboardEntryActivity {
    fn name(&self) -> &'static str {
        "KeyboardEntry"
    }

    fn update(&mut self, ctx: &mut ActivityContext<'_>) {
        if ctx.input.was_pressed(Action::Back) {
            ctx.finish();
            return;
        }
        if ctx.input.was_pressed(Action::Confirm) {
            self.activate(ctx);
            return;
        }
        if ctx.input.was_pressed(Action::Up) {
            self.move_vertical(false);
        }
        if ctx.input.was_pressed(Action::Down) {
            self.move_vertical(true);
        }
        if ctx.input.was_pressed(Action::Left) {
            self.move_horizontal(false);
        }
        if ctx.input.was_pressed(Action::Right) {
            self.move_horizontal(true);
        }
    }

    fn render(&self, gui: &mut dyn Gui, ctx: &RenderContext<'_>) {
        let size = gui.screen_size();
        let metrics = gui.theme().metrics;

        gui.clear_screen();
        gui.draw_header(&self.title);

        let field = Rectangle::new(
            Point::new(layout::MARGIN, layout::content_start_y() + layout::GAP_MD + layout::GAP_SM),
            Size::new(metrics.content_width(size.width), layout::FIELD_H as u32),
        );
        gui.draw_text_field(field, &self.title, &self.shown_text());

        let keys = self.key_rows();
        let special = SpecialKey::ALL.map(|key| ctx.tr(key.label()));
        let rows: [&[&str]; ROWS] = [&keys[0], &keys[1], &keys[2], &keys[3], &special];
        let grid_top = field.top_left.y + field.size.height as i32 + layout::GAP_MD;
        let grid = Rectangle::new(
            Point::new(layout::MARGIN, grid_top),
            Size::new(
                metrics.content_width(size.width),
                (ROWS as i32 * layout::KEY_H) as u32,
            ),
        );
        gui.draw_key_grid(grid, &rows, (self.row, self.col));

        let labels = ctx.input.map_labels(
            ctx.tr(StrId::Back),
            ctx.tr(StrId::Select),
            ctx.tr(StrId::Left),
            ctx.tr(StrId::Right),
        );
        gui.draw_button_hints(&labels);
        gui.display_buffer(self.refresh_mode());
    }

    fn refresh_mode(&self) -> ActivityRefreshMode {
        ActivityRefreshMode::Fast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording_gui::GuiOp;
    use crate::test_support::Rig;
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    struct Host {
        keyboard: Option<KeyboardEntryActivity>,
        received: Rc<RefCell<Option<ActivityResult>>>,
    }

    impl Activity for Host {
        fn name(&self) -> &'static str {
            "Host"
        }

        fn update(&mut self, ctx: &mut ActivityContext<'_>) {
            if let Some(keyboard) = self.keyboard.take() {
                let received = self.received.clone();
                ctx.start_activity_for_result(Box::new(keyboard), move |result, _| {
                    *received.borrow_mut() = Some(result);
                });
            }
        }

        fn render(&self, gui: &mut dyn Gui, _ctx: &RenderContext<'_>) {
            gui.display_buffer(ActivityRefreshMode::Fast);
        }
    }

    fn open(keyboard: KeyboardEntryActivity) -> (Rig, Rc<RefCell<Option<ActivityResult>>>) {
        let received = Rc::new(RefCell::new(None));
        let mut rig = Rig::with_root(Box::new(Host {
            keyboard: Some(keyboard),
            received: received.clone(),
        }));
        rig.tick();
        assert_eq!(rig.manager.top_name(), Some("KeyboardEntry"));
        (rig, received)
    }

    /// From row 1, col 0: up through the digits to the bottom row, wrap
    /// left onto OK and press it
    fn press_ok(rig: &mut Rig) {
        rig.press_n(Button::Up, 2);
        rig.press(Button::Left);
        rig.press(Button::Confirm);
    }

    #[test]
    fn key_positions() {
        assert_eq!(key_position('q'), Some(START_CURSOR));
        assert_eq!(key_position('1'), Some((0, 0)));
        assert_eq!(key_position('@'), Some((3, 9)));
        assert_eq!(key_position(' '), Some((SPECIAL_ROW, 1)));
        assert_eq!(key_position('Q'), None);
        assert_eq!(SpecialKey::ALL[OK_KEY.1], SpecialKey::Ok);
    }

    #[test]
    fn key_path_clamps_through_special_row() {
        assert!(key_path((2, 5), (2, 5)).is_empty());
        assert_eq!(key_path((1, 0), (1, 3)), vec![Button::Right; 3]);
        // Wrap left onto the last key
        assert_eq!(key_path((1, 1), (1, 0)), vec![Button::Right; 9]);
        // Column 8 clamps to 3 on the special row, then stays 3 on row 0
        let mut expected = vec![Button::Down; 3];
        expected.extend([Button::Right; 2]);
        assert_eq!(key_path((2, 8), (0, 5)), expected);
    }

    #[test]
    fn typing_presses_end_on_ok() {
        let presses = typing_presses("q").unwrap();
        assert_eq!(presses[0], Button::Confirm);
        assert_eq!(presses.last(), Some(&Button::Confirm));
        assert!(typing_presses("Q").is_none());

        // Only OK: from row 1 down through rows 2, 3 and the special row
        let mut expected = vec![Button::Down; 3];
        expected.extend([Button::Right; 3]);
        expected.push(Button::Confirm);
        assert_eq!(typing_presses("").unwrap(), expected);
    }

    #[test]
    fn entering_text_through_the_grid() {
        let (mut rig, received) = open(KeyboardEntryActivity::new("URL", "", 40, false));
        rig.enter_text("http://a.b:80");
        assert_eq!(
            *received.borrow(),
            Some(ActivityResult::keyboard("http://a.b:80"))
        );
    }

    #[test]
    fn initial_text_is_truncated() {
        let keyboard = KeyboardEntryActivity::new("User", "abcdef", 4, false);
        assert_eq!(keyboard.text(), "abcd");
        assert_eq!(keyboard.max_length(), 4);
    }

    #[test]
    fn cursor_wraps_in_both_directions() {
        let mut keyboard = KeyboardEntryActivity::new("User", "", 10, false);
        keyboard.move_horizontal(false);
        assert_eq!(keyboard.cursor(), (1, ROW_LEN - 1));
        keyboard.move_horizontal(true);
        assert_eq!(keyboard.cursor(), (1, 0));

        keyboard.move_vertical(false);
        keyboard.move_vertical(false);
        assert_eq!(keyboard.cursor(), (SPECIAL_ROW, 0));
        keyboard.move_vertical(true);
        assert_eq!(keyboard.cursor(), (0, 0));
    }

    #[test]
    fn column_clamps_on_short_row() {
        let mut keyboard = KeyboardEntryActivity::new("User", "", 10, false);
        for _ in 0..9 {
            keyboard.move_horizontal(true);
        }
        for _ in 0..3 {
            keyboard.move_vertical(true);
        }
        assert_eq!(keyboard.cursor(), (SPECIAL_ROW, SpecialKey::ALL.len() - 1));
    }

    #[test]
    fn typing_and_ok_completes() {
        let (mut rig, received) = open(KeyboardEntryActivity::new("User", "", 20, false));
        // "q" is under the initial cursor
        rig.press(Button::Confirm);
        rig.press(Button::Right);
        rig.press(Button::Confirm);
        rig.press(Button::Left);
        press_ok(&mut rig);

        assert_eq!(rig.manager.top_name(), Some("Host"));
        assert_eq!(*received.borrow(), Some(ActivityResult::keyboard("qw")));
    }

    #[test]
    fn back_cancels() {
        let (mut rig, received) = open(KeyboardEntryActivity::new("User", "keep", 20, false));
        rig.press(Button::Confirm);
        rig.press(Button::Back);
        assert_eq!(rig.manager.depth(), 1);
        assert_eq!(*received.borrow(), Some(ActivityResult::Cancelled));
    }

    #[test]
    fn max_length_is_enforced() {
        let (mut rig, received) = open(KeyboardEntryActivity::new("User", "ab", 3, false));
        rig.press_n(Button::Confirm, 3);
        press_ok(&mut rig);
        assert_eq!(*received.borrow(), Some(ActivityResult::keyboard("abq")));
    }

    #[test]
    fn shift_backspace_and_space() {
        let mut keyboard = KeyboardEntryActivity::new("User", "x", 20, false);
        keyboard.shifted = true;
        keyboard.type_str(keyboard.key_rows()[1][0]);
        assert_eq!(keyboard.text(), "xQ");

        let (mut rig, received) = open(keyboard);
        rig.press_n(Button::Down, 3);
        // Space, then backspace twice
        rig.press(Button::Right);
        rig.press(Button::Confirm);
        rig.press(Button::Right);
        rig.press_n(Button::Confirm, 2);
        // Shift toggles back to lower case
        rig.press_n(Button::Left, 2);
        rig.press(Button::Confirm);
        rig.press_n(Button::Right, 3);
        rig.press(Button::Confirm);
        assert_eq!(*received.borrow(), Some(ActivityResult::keyboard("x")));
    }

    #[test]
    fn password_is_masked_on_screen() {
        let (mut rig, _) = open(KeyboardEntryActivity::new("Password", "secret", 20, true));
        rig.tick();
        assert_eq!(rig.gui.last_text_field(), Some(("Password", "******")));
        let shows_secret = rig
            .gui
            .last_frame()
            .iter()
            .any(|op| format!("{:?}", op).contains("secret"));
        assert!(!shows_secret);
    }

    #[test]
    fn grid_shows_special_row_labels() {
        let (mut rig, _) = open(KeyboardEntryActivity::new("User", "", 20, false));
        rig.tick();
        let grid = rig.gui.last_frame().iter().find_map(|op| match op {
            GuiOp::KeyGrid { rows, selected } => Some((rows.clone(), *selected)),
            _ => None,
        });
        let (rows, selected) = grid.unwrap();
        assert_eq!(rows.len(), ROWS);
        assert_eq!(rows[SPECIAL_ROW], ["shift", "space", "del", "OK"]);
        assert_eq!(selected, (1, 0));
    }
}
