//! Activity pattern for screen-based navigation.
//!
//! The Activity pattern provides a lifecycle for UI screens,
//! similar to Android Activities but simplified for e-ink devices.
//! Activities live on a stack owned by the
//! [`ActivityManager`](crate::activity_manager::ActivityManager); only the
//! top one is updated and rendered.

extern crate alloc;

use alloc::boxed::Box;

use crate::activity_result::ActivityResult;
use crate::input::InputMapper;
use crate::settings::Settings;
use crate::settings_store::SettingsState;
use crate::strings::{StrId, StringTable};
use crate::ui::gui::Gui;

/// Display refresh mode preference for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityRefreshMode {
    /// Use fast refresh mode (default for most interactions)
    #[default]
    Fast,
    /// Use partial refresh mode (for periodic ghost cleanup)
    Partial,
    /// Use full refresh mode (on activity enter or manual trigger)
    Full,
}

/// Lifecycle position of a stacked activity. Dropped activities are gone,
/// so there is no state for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    NotStarted,
    Entered,
    Exited,
}

/// Handler run with a child's result when that child is popped.
pub type Continuation = Box<dyn FnOnce(ActivityResult, &mut ActivityContext<'_>)>;

/// Stack change requested by the running activity, applied by the manager
/// once the current call returns.
pub(crate) enum StackRequest {
    Start {
        activity: Box<dyn Activity>,
        continuation: Option<Continuation>,
    },
    Finish,
}

/// Mutable view of the shared services handed to the top activity.
pub struct ActivityContext<'a> {
    pub input: &'a mut InputMapper,
    pub settings: &'a mut SettingsState,
    pub strings: &'a dyn StringTable,
    result: &'a mut Option<ActivityResult>,
    request: &'a mut Option<StackRequest>,
}

impl<'a> ActivityContext<'a> {
    pub(crate) fn new(
        input: &'a mut InputMapper,
        settings: &'a mut SettingsState,
        strings: &'a dyn StringTable,
        result: &'a mut Option<ActivityResult>,
        request: &'a mut Option<StackRequest>,
    ) -> Self {
        Self {
            input,
            settings,
            strings,
            result,
            request,
        }
    }

    /// Look up a display string
    pub fn tr(&self, id: StrId) -> &'a str {
        self.strings.get(id)
    }

    /// Push `activity` on top of the caller.
    pub fn start_activity(&mut self, activity: Box<dyn Activity>) {
        self.request(StackRequest::Start {
            activity,
            continuation: None,
        });
    }

    /// Push `activity` and run `on_result` with its result once it is popped.
    pub fn start_activity_for_result<F>(&mut self, activity: Box<dyn Activity>, on_result: F)
    where
        F: FnOnce(ActivityResult, &mut ActivityContext<'_>) + 'static,
    {
        self.request(StackRequest::Start {
            activity,
            continuation: Some(Box::new(on_result)),
        });
    }

    /// Record the result delivered to the parent when this activity is popped.
    pub fn set_result(&mut self, result: ActivityResult) {
        *self.result = Some(result);
    }

    /// Ask the manager to pop the caller.
    pub fn finish(&mut self) {
        self.request(StackRequest::Finish);
    }

    /// Whether a stack change is already queued for this call
    pub fn has_pending_request(&self) -> bool {
        self.request.is_some()
    }

    fn request(&mut self, request: StackRequest) {
        if self.request.is_some() {
            log::warn!("stack request dropped, one is already pending");
            return;
        }
        *self.request = Some(request);
    }
}

/// Read-only view of the shared services used while rendering.
pub struct RenderContext<'a> {
    pub input: &'a InputMapper,
    pub settings: &'a Settings,
    pub strings: &'a dyn StringTable,
}

impl<'a> RenderContext<'a> {
    /// Look up a display string
    pub fn tr(&self, id: StrId) -> &'a str {
        self.strings.get(id)
    }
}

/// Activity trait for screen-based UI architecture.
///
/// Each screen in the application implements this trait to handle
/// its own lifecycle, input processing, and rendering. Once per tick the
/// top activity gets one `update` followed by one `render`.
///
/// # Example
/// ```
/// use xteink_activity::input::Action;
/// use xteink_activity::ui::{Activity, ActivityContext, Gui, RenderContext};
///
/// struct About;
///
/// impl Activity for About {
///     fn name(&self) -> &'static str {
///         "About"
///     }
///
///     fn update(&mut self, ctx: &mut ActivityContext<'_>) {
///         if ctx.input.was_pressed(Action::Back) {
///             ctx.finish();
///         }
///     }
///
///     fn render(&self, gui: &mut dyn Gui, _ctx: &RenderContext<'_>) {
///         gui.clear_screen();
///         gui.display_buffer(self.refresh_mode());
///     }
/// }
/// ```
pub trait Activity {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Called once, right after the activity becomes the top of the stack
    fn on_enter(&mut self, _ctx: &mut ActivityContext<'_>) {}

    /// Called once, right before the activity is removed from the stack.
    ///
    /// Stack requests made here are ignored; `set_result` still applies.
    fn on_exit(&mut self, _ctx: &mut ActivityContext<'_>) {}

    /// Handle input and state transitions for one tick.
    fn update(&mut self, ctx: &mut ActivityContext<'_>);

    /// Draw the current frame.
    fn render(&self, gui: &mut dyn Gui, ctx: &RenderContext<'_>);

    /// Get the preferred refresh mode for this activity.
    fn refresh_mode(&self) -> ActivityRefreshMode {
        ActivityRefreshMode::default()
    }
}
