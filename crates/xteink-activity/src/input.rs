//! Button input abstraction.
//!
//! Physical buttons are sampled once per tick by [`InputMapper::update`] and
//! translated into logical [`Action`]s through the configured
//! [`FrontButtonLayout`]. Press edges are one-shot: [`InputMapper::was_pressed`]
//! consumes them, and they only live until the next `update`.

/// Physical device buttons (directly maps to hardware)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    // Front row, left to right (GPIO1 resistor ladder)
    Back,
    Confirm,
    Left,
    Right,
    // Side rocker (GPIO2 resistor ladder)
    Up,
    Down,
    // GPIO3 (digital, active LOW)
    Power,
}

impl Button {
    /// All physical buttons
    pub const ALL: [Self; 7] = [
        Self::Back,
        Self::Confirm,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Power,
    ];

    /// Bit for this button in a raw button mask
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
    Release(Button),
}

/// Logical actions an activity reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Back,
    Confirm,
    Left,
    Right,
    Up,
    Down,
    Power,
}

impl Action {
    pub const ALL: [Self; 7] = [
        Self::Back,
        Self::Confirm,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Power,
    ];

    const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Assignment of logical roles to the four front buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontButtonLayout {
    #[default]
    BackConfirmLeftRight,
    LeftRightBackConfirm,
    LeftBackConfirmRight,
    BackConfirmRightLeft,
}

impl FrontButtonLayout {
    pub const ALL: [Self; 4] = [
        Self::BackConfirmLeftRight,
        Self::LeftRightBackConfirm,
        Self::LeftBackConfirmRight,
        Self::BackConfirmRightLeft,
    ];

    /// Get index in ALL array
    pub const fn index(self) -> usize {
        match self {
            Self::BackConfirmLeftRight => 0,
            Self::LeftRightBackConfirm => 1,
            Self::LeftBackConfirmRight => 2,
            Self::BackConfirmRightLeft => 3,
        }
    }

    /// Create from index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::BackConfirmLeftRight),
            1 => Some(Self::LeftRightBackConfirm),
            2 => Some(Self::LeftBackConfirmRight),
            3 => Some(Self::BackConfirmRightLeft),
            _ => None,
        }
    }

    /// Logical action of each front button, in physical left-to-right order.
    pub const fn roles(self) -> [Action; 4] {
        match self {
            Self::BackConfirmLeftRight => [Action::Back, Action::Confirm, Action::Left, Action::Right],
            Self::LeftRightBackConfirm => [Action::Left, Action::Right, Action::Back, Action::Confirm],
            Self::LeftBackConfirmRight => [Action::Left, Action::Back, Action::Confirm, Action::Right],
            Self::BackConfirmRightLeft => [Action::Back, Action::Confirm, Action::Right, Action::Left],
        }
    }

    /// Logical action produced by a physical button.
    pub const fn action_for(self, button: Button) -> Action {
        let roles = self.roles();
        match button {
            Button::Back => roles[0],
            Button::Confirm => roles[1],
            Button::Left => roles[2],
            Button::Right => roles[3],
            Button::Up => Action::Up,
            Button::Down => Action::Down,
            Button::Power => Action::Power,
        }
    }
}

/// Input tuning. Repeat cadence only affects how fast held buttons scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    /// Hold time before auto-repeat starts
    pub repeat_delay_ms: u32,
    /// Interval between auto-repeat steps
    pub repeat_interval_ms: u32,
    pub layout: FrontButtonLayout,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repeat_delay_ms: 500,
            repeat_interval_ms: 150,
            layout: FrontButtonLayout::default(),
        }
    }
}

/// Previous/current sample of a button bitmask.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    current: u8,
    previous: u8,
}

impl ButtonState {
    pub fn update(&mut self, current: u8) {
        self.previous = self.current;
        self.current = current;
    }

    fn held(&self) -> u8 {
        self.current & self.previous
    }

    fn pressed(&self) -> u8 {
        self.current & !self.previous
    }

    fn released(&self) -> u8 {
        !self.current & self.previous
    }

    pub fn is_down(&self, mask: u8) -> bool {
        (self.current & mask) != 0
    }

    pub fn is_held(&self, mask: u8) -> bool {
        (self.held() & mask) != 0
    }

    pub fn is_pressed(&self, mask: u8) -> bool {
        (self.pressed() & mask) != 0
    }

    pub fn is_released(&self, mask: u8) -> bool {
        (self.released() & mask) != 0
    }
}

/// Hint labels in physical front-button order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLabels<'a> {
    pub btn1: &'a str,
    pub btn2: &'a str,
    pub btn3: &'a str,
    pub btn4: &'a str,
}

impl<'a> ButtonLabels<'a> {
    pub fn as_array(&self) -> [&'a str; 4] {
        [self.btn1, self.btn2, self.btn3, self.btn4]
    }
}

/// Translates raw button state into edge-triggered logical actions.
#[derive(Debug, Clone)]
pub struct InputMapper {
    config: InputConfig,
    raw: u8,
    tapped: u8,
    actions: ButtonState,
    edges: u8,
    press_started_ms: [u64; 7],
    now_ms: u64,
    tick: u64,
}

impl InputMapper {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            raw: 0,
            tapped: 0,
            actions: ButtonState::default(),
            edges: 0,
            press_started_ms: [0; 7],
            now_ms: 0,
            tick: 0,
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Switch the front button layout. Takes effect on the next `update`.
    pub fn set_layout(&mut self, layout: FrontButtonLayout) {
        if self.config.layout != layout {
            log::info!("front button layout -> {:?}", layout);
            self.config.layout = layout;
        }
    }

    /// Replace the raw physical state (bit per [`Button::mask`]).
    pub fn set_raw_state(&mut self, mask: u8) {
        self.raw = mask;
    }

    /// Feed a discrete press/release. A press released before the next
    /// `update` still registers as one press.
    pub fn push_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(button) => {
                self.raw |= button.mask();
                self.tapped |= button.mask();
            }
            InputEvent::Release(button) => self.raw &= !button.mask(),
        }
    }

    /// Sample the raw state for a new tick.
    pub fn update(&mut self, now_ms: u64) {
        let physical = self.raw | self.tapped;
        let logical = self.to_logical(physical);
        // Every press event is a fresh edge, even on back-to-back ticks
        let tapped = self.to_logical(self.tapped);
        self.tapped = 0;

        self.actions.update(logical);
        self.edges = self.actions.pressed() | tapped;
        for (slot, action) in Action::ALL.iter().enumerate() {
            if self.edges & action.mask() != 0 {
                self.press_started_ms[slot] = now_ms;
            }
        }
        if self.edges != 0 {
            log::debug!("input edges {:#09b} at {}ms", self.edges, now_ms);
        }

        self.now_ms = now_ms;
        self.tick = self.tick.wrapping_add(1);
    }

    fn to_logical(&self, physical: u8) -> u8 {
        Button::ALL
            .iter()
            .filter(|button| physical & button.mask() != 0)
            .fold(0, |acc, &button| {
                acc | self.config.layout.action_for(button).mask()
            })
    }

    /// One-shot press edge for this tick; consumed by the first caller.
    pub fn was_pressed(&mut self, action: Action) -> bool {
        let mask = action.mask();
        if self.edges & mask != 0 {
            self.edges &= !mask;
            true
        } else {
            false
        }
    }

    pub fn was_released(&self, action: Action) -> bool {
        self.actions.is_released(action.mask())
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.actions.is_down(action.mask())
    }

    /// How long `action` has been held, 0 when up.
    pub fn held_ms(&self, action: Action) -> u64 {
        if !self.is_held(action) {
            return 0;
        }
        self.now_ms
            .saturating_sub(self.press_started_ms[action as usize])
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of `update` calls so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Order hint labels by physical position for the current layout.
    pub fn map_labels<'a>(
        &self,
        back: &'a str,
        select: &'a str,
        previous: &'a str,
        next: &'a str,
    ) -> ButtonLabels<'a> {
        let label = |action: Action| match action {
            Action::Back => back,
            Action::Confirm => select,
            Action::Left => previous,
            Action::Right => next,
            _ => "",
        };
        let roles = self.config.layout.roles();
        ButtonLabels {
            btn1: label(roles[0]),
            btn2: label(roles[1]),
            btn3: label(roles[2]),
            btn4: label(roles[3]),
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(input: &mut InputMapper, button: Button, now_ms: u64) {
        input.push_event(InputEvent::Press(button));
        input.push_event(InputEvent::Release(button));
        input.update(now_ms);
    }

    #[test]
    fn press_is_consumed_once() {
        let mut input = InputMapper::default();
        input.push_event(InputEvent::Press(Button::Confirm));
        input.update(10);

        assert!(input.was_pressed(Action::Confirm));
        assert!(!input.was_pressed(Action::Confirm));
    }

    #[test]
    fn holding_does_not_retrigger_edge() {
        let mut input = InputMapper::default();
        input.push_event(InputEvent::Press(Button::Back));
        input.update(0);
        assert!(input.was_pressed(Action::Back));

        input.update(20);
        input.update(40);
        assert!(!input.was_pressed(Action::Back));
        assert!(input.is_held(Action::Back));
        assert_eq!(input.held_ms(Action::Back), 40);
    }

    #[test]
    fn unconsumed_edge_expires_on_next_update() {
        let mut input = InputMapper::default();
        tap(&mut input, Button::Confirm, 0);
        input.update(20);
        assert!(!input.was_pressed(Action::Confirm));
        assert!(input.was_released(Action::Confirm));
    }

    #[test]
    fn tap_between_updates_counts_as_press() {
        let mut input = InputMapper::default();
        tap(&mut input, Button::Right, 5);
        assert!(input.was_pressed(Action::Right));
    }

    #[test]
    fn back_to_back_taps_each_register() {
        let mut input = InputMapper::default();
        for now in [0, 20, 40] {
            tap(&mut input, Button::Down, now);
            assert!(input.was_pressed(Action::Down));
        }
    }

    #[test]
    fn raw_state_polling() {
        let mut input = InputMapper::default();
        input.set_raw_state(Button::Down.mask() | Button::Back.mask());
        input.update(0);
        assert!(input.was_pressed(Action::Down));
        assert!(input.was_pressed(Action::Back));

        input.set_raw_state(0);
        input.update(16);
        assert!(!input.is_held(Action::Down));
        assert_eq!(input.held_ms(Action::Down), 0);
    }

    #[test]
    fn layout_remaps_front_buttons() {
        let mut input = InputMapper::new(InputConfig {
            layout: FrontButtonLayout::LeftRightBackConfirm,
            ..InputConfig::default()
        });
        tap(&mut input, Button::Back, 0);
        assert!(!input.was_pressed(Action::Back));
        assert!(input.was_pressed(Action::Left));

        tap(&mut input, Button::Up, 10);
        assert!(input.was_pressed(Action::Up));
    }

    #[test]
    fn layout_index_roundtrip() {
        for (i, layout) in FrontButtonLayout::ALL.iter().enumerate() {
            assert_eq!(layout.index(), i);
            assert_eq!(FrontButtonLayout::from_index(i), Some(*layout));
        }
        assert!(FrontButtonLayout::from_index(4).is_none());
    }

    #[test]
    fn labels_follow_layout() {
        let mut input = InputMapper::default();
        let labels = input.map_labels("Back", "Select", "Up", "Down");
        assert_eq!(labels.as_array(), ["Back", "Select", "Up", "Down"]);

        input.set_layout(FrontButtonLayout::LeftBackConfirmRight);
        let labels = input.map_labels("Back", "Select", "Up", "Down");
        assert_eq!(labels.as_array(), ["Up", "Back", "Select", "Down"]);
    }

    #[test]
    fn tick_counts_updates() {
        let mut input = InputMapper::default();
        assert_eq!(input.tick(), 0);
        input.update(0);
        input.update(16);
        assert_eq!(input.tick(), 2);
        assert_eq!(input.now_ms(), 16);
    }
}
