//! Next/previous navigation with hold-to-repeat.

use crate::input::{Action, InputMapper};

const NEXT: [Action; 2] = [Action::Down, Action::Right];
const PREVIOUS: [Action; 2] = [Action::Up, Action::Left];

#[derive(Debug, Clone, Copy, Default)]
struct RepeatState {
    last_fire_ms: Option<u64>,
    last_fire_tick: Option<u64>,
}

/// Fires list navigation callbacks on a press, then at the configured
/// repeat cadence while the button stays down. Each direction fires at most
/// once per tick.
#[derive(Debug, Clone, Default)]
pub struct ButtonNavigator {
    next: RepeatState,
    previous: RepeatState,
}

impl ButtonNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` if Down/Right was pressed or is repeating. Returns whether it ran.
    pub fn on_next<F: FnOnce()>(&mut self, input: &mut InputMapper, f: F) -> bool {
        Self::fire(&mut self.next, input, &NEXT, f)
    }

    /// Run `f` if Up/Left was pressed or is repeating. Returns whether it ran.
    pub fn on_previous<F: FnOnce()>(&mut self, input: &mut InputMapper, f: F) -> bool {
        Self::fire(&mut self.previous, input, &PREVIOUS, f)
    }

    fn fire<F: FnOnce()>(
        state: &mut RepeatState,
        input: &mut InputMapper,
        actions: &[Action],
        f: F,
    ) -> bool {
        let tick = input.tick();
        if state.last_fire_tick == Some(tick) {
            return false;
        }

        // Consume every edge so Down+Right in one tick still moves once.
        let mut pressed = false;
        for &action in actions {
            pressed |= input.was_pressed(action);
        }

        let now = input.now_ms();
        let triggered = pressed || {
            let config = input.config();
            let repeating = actions
                .iter()
                .any(|&action| input.held_ms(action) >= u64::from(config.repeat_delay_ms));
            repeating
                && state.last_fire_ms.map_or(true, |last| {
                    now.saturating_sub(last) >= u64::from(config.repeat_interval_ms)
                })
        };

        if triggered {
            state.last_fire_ms = Some(now);
            state.last_fire_tick = Some(tick);
            f();
        }
        triggered
    }
}
