//! Activity stack and result delivery.
//!
//! The manager owns every pushed activity together with the services they
//! share. Each tick only the top activity runs: one `update`, then one
//! `render`. Stack changes an activity asks for through its
//! [`ActivityContext`] are applied once the call that asked returns.
//!
//! When a child started for a result is popped, the order is fixed:
//! 1. the child's `on_exit`
//! 2. the child is removed and dropped
//! 3. the continuation runs against the parent
//! 4. any stack change the continuation asked for is applied
//!
//! and all of it happens before the parent's next `update`.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::activity_result::ActivityResult;
use crate::input::InputMapper;
use crate::settings_store::SettingsState;
use crate::strings::StringTable;
use crate::ui::activity::{
    Activity, ActivityContext, ActivityState, Continuation, RenderContext, StackRequest,
};
use crate::ui::gui::Gui;

/// Stack operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// No activity on the stack
    Empty,
    /// The root activity cannot be popped
    RootActivity,
}

impl core::fmt::Display for StackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StackError::Empty => write!(f, "activity stack is empty"),
            StackError::RootActivity => write!(f, "cannot pop the root activity"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StackError {}

/// State shared by all activities, lent to the top one on each call.
pub struct Services {
    pub input: InputMapper,
    pub settings: SettingsState,
    pub strings: Box<dyn StringTable>,
}

impl Services {
    pub fn new(input: InputMapper, settings: SettingsState, strings: Box<dyn StringTable>) -> Self {
        Self {
            input,
            settings,
            strings,
        }
    }
}

struct StackEntry {
    activity: Box<dyn Activity>,
    state: ActivityState,
    /// Runs on the entry below once this one is popped
    continuation: Option<Continuation>,
    result: Option<ActivityResult>,
}

/// Owner and driver of the activity stack.
pub struct ActivityManager {
    stack: Vec<StackEntry>,
    services: Services,
}

impl ActivityManager {
    pub fn new(services: Services) -> Self {
        Self {
            stack: Vec::new(),
            services,
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Place `activity` on top and enter it.
    pub fn push_activity(&mut self, activity: Box<dyn Activity>) {
        self.push_entry(activity, None);
    }

    /// Place `activity` on top and run `on_result` with its result once it
    /// is popped.
    pub fn push_activity_for_result<F>(&mut self, activity: Box<dyn Activity>, on_result: F)
    where
        F: FnOnce(ActivityResult, &mut ActivityContext<'_>) + 'static,
    {
        self.push_entry(activity, Some(Box::new(on_result)));
    }

    /// Exit and remove the top activity, then deliver its result.
    ///
    /// The root activity is never popped.
    pub fn pop_activity(&mut self) -> Result<(), StackError> {
        match self.stack.len() {
            0 => Err(StackError::Empty),
            1 => {
                log::warn!("refusing to pop root activity");
                Err(StackError::RootActivity)
            }
            _ => {
                if let Some((continuation, result)) = self.remove_top() {
                    self.deliver(continuation, result);
                }
                Ok(())
            }
        }
    }

    /// Swap the top activity for `activity`. The replaced activity is exited
    /// and its continuation fires as if it had been popped; the replacement
    /// carries no continuation.
    ///
    /// The continuation and any stack change it asks for run before the
    /// replacement is pushed: a `finish` from it pops the entry below the
    /// replaced one, and a `start_activity` from it ends up under the
    /// replacement.
    pub fn replace_activity(&mut self, activity: Box<dyn Activity>) {
        if let Some((continuation, result)) = self.remove_top() {
            self.deliver(continuation, result);
        }
        self.push_entry(activity, None);
    }

    /// Exit every activity, top first. Pending continuations are dropped
    /// without running.
    pub fn shutdown(&mut self) {
        log::info!("shutting down {} activities", self.stack.len());
        while let Some((continuation, _)) = self.remove_top() {
            if continuation.is_some() {
                log::debug!("dropping pending continuation");
            }
        }
    }

    /// Run one frame: update the top, apply its stack request, then render
    /// whatever is on top afterwards.
    pub fn tick(&mut self, gui: &mut dyn Gui) {
        let request = self.with_top(|activity, ctx| activity.update(ctx));
        self.apply(request);
        self.render(gui);
    }

    /// Render the top activity.
    pub fn render(&self, gui: &mut dyn Gui) {
        let Some(entry) = self.stack.last() else {
            return;
        };
        let ctx = RenderContext {
            input: &self.services.input,
            settings: self.services.settings.record(),
            strings: self.services.strings.as_ref(),
        };
        entry.activity.render(gui, &ctx);
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn top_name(&self) -> Option<&'static str> {
        self.stack.last().map(|entry| entry.activity.name())
    }

    pub fn top_state(&self) -> Option<ActivityState> {
        self.stack.last().map(|entry| entry.state)
    }

    /// Names from root to top
    pub fn stack_names(&self) -> Vec<&'static str> {
        self.stack.iter().map(|entry| entry.activity.name()).collect()
    }

    fn push_entry(&mut self, activity: Box<dyn Activity>, continuation: Option<Continuation>) {
        log::info!(
            "push {} (depth {}){}",
            activity.name(),
            self.stack.len() + 1,
            if continuation.is_some() { " for result" } else { "" }
        );
        self.stack.push(StackEntry {
            activity,
            state: ActivityState::NotStarted,
            continuation,
            result: None,
        });
        let request = self.with_top(|activity, ctx| activity.on_enter(ctx));
        if let Some(entry) = self.stack.last_mut() {
            entry.state = ActivityState::Entered;
        }
        self.apply(request);
    }

    /// Exit, remove and drop the top entry. Returns what must be delivered
    /// to the entry below.
    fn remove_top(&mut self) -> Option<(Option<Continuation>, ActivityResult)> {
        let request = self.with_top(|activity, ctx| activity.on_exit(ctx));
        if request.is_some() {
            log::warn!("stack request from on_exit ignored");
        }
        let mut entry = self.stack.pop()?;
        entry.state = ActivityState::Exited;
        log::info!(
            "pop {} (depth {})",
            entry.activity.name(),
            self.stack.len()
        );
        let result = entry.result.take().unwrap_or_default();
        let continuation = entry.continuation.take();
        drop(entry);
        Some((continuation, result))
    }

    fn deliver(&mut self, continuation: Option<Continuation>, result: ActivityResult) {
        let Some(continuation) = continuation else {
            return;
        };
        if self.stack.is_empty() {
            log::warn!("no activity left to receive {:?}", result);
            return;
        }
        log::debug!(
            "delivering {:?} to {}",
            result,
            self.top_name().unwrap_or("?")
        );
        let request = self.with_top(|_, ctx| continuation(result, ctx));
        self.apply(request);
    }

    /// Lend the services and the top entry's result slot to `f`.
    fn with_top<F>(&mut self, f: F) -> Option<StackRequest>
    where
        F: FnOnce(&mut dyn Activity, &mut ActivityContext<'_>),
    {
        let entry = self.stack.last_mut()?;
        let mut request = None;
        let Services {
            input,
            settings,
            strings,
        } = &mut self.services;
        let mut ctx = ActivityContext::new(
            input,
            settings,
            strings.as_ref(),
            &mut entry.result,
            &mut request,
        );
        f(entry.activity.as_mut(), &mut ctx);
        request
    }

    fn apply(&mut self, request: Option<StackRequest>) {
        match request {
            None => {}
            Some(StackRequest::Start {
                activity,
                continuation,
            }) => self.push_entry(activity, continuation),
            Some(StackRequest::Finish) => {
                if let Err(err) = self.pop_activity() {
                    log::warn!("finish ignored: {}", err);
                }
            }
        }
    }
}

impl core::fmt::Debug for ActivityManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActivityManager")
            .field("stack", &self.stack_names())
            .finish_non_exhaustive()
    }
}
