//! Generic harness for small visual programs.
//!
//! A [`Program`] implements three hooks (`start`, `update`, `draw`). The
//! [`Harness`] owns one program for its whole run, paces the update loop to a
//! fixed frame rate, advances the program's [`IntervalScheduler`] once per
//! frame and stops the loop on hook failure or [`Context::fatal`].

pub mod harness;
pub mod interval;
pub mod log;
pub mod options;
pub mod surface;

pub use harness::{
    Context, DEFAULT_BACKGROUND, DEFAULT_FPS, DrawMode, Harness, HarnessConfig, HarnessError,
    Phase, Program,
};
pub use interval::{Interval, IntervalError, IntervalScheduler};
pub use log::{LogLevel, Logger};
pub use options::{ConfigError, Options};
pub use surface::{DrawOp, RecordingSurface, Surface};
