//! # Schedule
//!
//! Time-window evaluation shared by the camera and sensor components.
//!
//! A [`WindowSchedule`] is built once from configuration strings; all
//! parsing and validation happens in the constructors, so evaluation
//! ([`WindowSchedule::in_window`]) is a pure comparison with no error path.
//!
//! Three mutually exclusive modes:
//! - **Daily**: one start/end time-of-day pair, applied every day
//! - **Weekly**: a start/end pair per weekday, all seven required
//! - **Ranges**: explicit absolute start/end timestamp ranges
//!
//! Windows are inclusive on both ends. Daily and weekly windows whose end
//! precedes their start span midnight.

mod parse;
mod window;

pub use window::{AbsoluteRange, DayWindow, WindowSchedule};
