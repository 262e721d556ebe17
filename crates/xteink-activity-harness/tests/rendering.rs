use std::cell::Cell;
use std::rc::Rc;

use xteink_activity::ui::{Activity, ActivityContext, Gui, RenderContext};
use xteink_activity::{Button, Settings};
use xteink_activity_harness::ScenarioHarness;

struct CountingScreen {
    renders: Rc<Cell<u32>>,
}

impl Activity for CountingScreen {
    fn name(&self) -> &'static str {
        "Counting"
    }

    fn update(&mut self, _ctx: &mut ActivityContext<'_>) {}

    fn render(&self, gui: &mut dyn Gui, _ctx: &RenderContext<'_>) {
        self.renders.set(self.renders.get() + 1);
        gui.clear_screen();
        gui.draw_header("Counting");
        gui.display_buffer(self.refresh_mode());
    }
}

#[test]
fn one_render_per_tick() {
    let mut h = ScenarioHarness::new(Settings::default());
    let renders = Rc::new(Cell::new(0));
    h.app_mut().manager_mut().push_activity(Box::new(CountingScreen {
        renders: renders.clone(),
    }));

    for n in 1..=3 {
        h.tick();
        assert_eq!(renders.get(), n);
        assert_eq!(h.display_frames(), n);
        assert_eq!(h.recorder().frames(), 1);
        assert_eq!(h.header(), Some("Counting"));
    }
}

#[test]
fn framebuffer_and_recorder_see_the_same_frame() {
    let mut h = ScenarioHarness::new(Settings::default());
    h.tick();
    h.press(Button::Confirm);
    assert_eq!(h.display_frames(), 2);
    assert_eq!(h.recorder().frames(), 1);
    assert_eq!(h.header(), Some("OPDS Browser"));
    assert!(h.display().black_pixel_count() > 0);
}
