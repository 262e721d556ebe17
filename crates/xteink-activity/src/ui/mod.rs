//! Minimal UI framework for the Xteink X4 e-reader.
//! E-ink optimized: high contrast, no animations, type-safe.

pub mod activity;
pub mod display_gui;
pub mod gui;
pub mod theme;

pub use activity::{
    Activity, ActivityContext, ActivityRefreshMode, ActivityState, Continuation, RenderContext,
};
pub use display_gui::DisplayGui;
pub use gui::{Gui, RowText};
pub use theme::{Theme, ThemeMetrics};
