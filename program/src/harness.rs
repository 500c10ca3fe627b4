// harness.rs - Frame-paced lifecycle driver for a visual program

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use egui::{Color32, Key};
use thiserror::Error;

use crate::interval::IntervalScheduler;
use crate::log::{LogLevel, Logger};
use crate::options::Options;
use crate::surface::Surface;

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_BACKGROUND: Color32 = Color32::from_rgb(250, 250, 250);

/// What happens to the surface before each draw hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Fill with the background colour every frame.
    #[default]
    Clear,
    /// Leave the previous frame in place.
    Keep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub frame_period: Duration,
    pub draw_mode: DrawMode,
    pub background: Color32,
    pub log_level: LogLevel,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            frame_period: Duration::from_secs(1) / DEFAULT_FPS,
            draw_mode: DrawMode::default(),
            background: DEFAULT_BACKGROUND,
            log_level: LogLevel::default(),
        }
    }
}

impl HarnessConfig {
    /// Reads `log` and `debug`. A bad `log` value keeps the default and is
    /// reported once the logger exists.
    pub fn from_options(options: &Options) -> Self {
        let mut config = Self::default();
        let rejected = match options.parse::<LogLevel>("log") {
            Ok(Some(level)) => {
                config.log_level = level;
                None
            }
            Ok(None) => None,
            Err(err) => Some(err),
        };
        let debug = options.flag("debug");
        if debug {
            config.log_level = LogLevel::Debug;
        }

        let logger = config.logger("Program");
        if let Some(err) = rejected {
            logger.warning(format_args!("{err}; using `{}`", config.log_level));
        }
        if debug {
            logger.debug("Debug mode enabled.");
            logger.debug("Options:");
        }
        for (key, value) in options.iter() {
            logger.debug(format_args!(" > {key}: {value}"));
        }
        config
    }

    pub fn logger(&self, source: &str) -> Logger {
        Logger::new(source, self.log_level)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    #[error("harness has not been started")]
    NotStarted,
    #[error("harness was already started")]
    AlreadyStarted,
    #[error("program stopped running")]
    Stopped,
    #[error("{hook} hook failed: {message}")]
    Hook { hook: &'static str, message: String },
    #[error("{hook} hook panicked: {message}")]
    Panicked { hook: &'static str, message: String },
}

/// Lifecycle phase. `Updating` and `Drawing` name the last hook that ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Started,
    Updating,
    Drawing,
    Stopped,
}

/// Per-run state handed to every hook.
#[derive(Debug)]
pub struct Context {
    logger: Logger,
    running: bool,
    frame: u64,
    elapsed: Duration,
    started_at: Option<DateTime<Local>>,
}

impl Context {
    fn new(logger: Logger) -> Self {
        Self { logger, running: false, frame: 0, elapsed: Duration::ZERO, started_at: None }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of completed update calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Monotonic time since start, as of the current frame.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wall-clock start time, for display only.
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// Logs at fatal severity and stops the loop once the current hook returns.
    pub fn fatal(&mut self, message: impl fmt::Display) {
        self.logger.fatal(message);
        self.running = false;
    }
}

/// The hooks a program exposes to the harness.
pub trait Program {
    /// The program's timers. The harness advances their clock each frame.
    fn intervals_mut(&mut self) -> &mut IntervalScheduler;

    fn start(&mut self, ctx: &mut Context);

    fn update(&mut self, ctx: &mut Context) -> anyhow::Result<()>;

    fn draw(&mut self, ctx: &mut Context, surface: &mut dyn Surface) -> anyhow::Result<()>;

    fn key_pressed(&mut self, _ctx: &mut Context, _key: Key) {}

    fn status_line(&self) -> Option<String> {
        None
    }
}

pub struct Harness {
    program: Box<dyn Program>,
    config: HarnessConfig,
    ctx: Context,
    phase: Phase,
    started: Option<Instant>,
    last_frame: Option<Instant>,
}

impl Harness {
    pub fn new(program: Box<dyn Program>, config: HarnessConfig) -> Self {
        let ctx = Context::new(config.logger("Program"));
        Self { program, config, ctx, phase: Phase::Uninitialized, started: None, last_frame: None }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Stopped && self.ctx.running
    }

    pub fn start(&mut self) -> Result<(), HarnessError> {
        if self.phase != Phase::Uninitialized {
            return Err(HarnessError::AlreadyStarted);
        }
        let now = Instant::now();
        self.started = Some(now);
        self.last_frame = Some(now);
        self.ctx.started_at = Some(Local::now());
        self.ctx.running = true;
        self.phase = Phase::Started;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> anyhow::Result<()> {
            self.program.start(&mut self.ctx);
            Ok(())
        }));
        self.settle("start", outcome)
    }

    /// Paces to the target frame period, advances logical time, then runs
    /// the update hook.
    pub fn update(&mut self) -> Result<(), HarnessError> {
        let (started, last_frame) = self.live()?;

        let frame_time = last_frame.elapsed();
        if frame_time < self.config.frame_period {
            thread::sleep(self.config.frame_period - frame_time);
        }
        let now = Instant::now();
        self.last_frame = Some(now);
        self.ctx.elapsed = now.duration_since(started);
        self.ctx.frame += 1;
        self.program.intervals_mut().advance_to(self.ctx.elapsed);

        if !self.ctx.running {
            return self.settle("update", Ok(Ok(())));
        }
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.program.update(&mut self.ctx)));
        self.settle("update", outcome)?;
        self.phase = Phase::Updating;
        Ok(())
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) -> Result<(), HarnessError> {
        self.live()?;
        if self.config.draw_mode == DrawMode::Clear {
            surface.fill(self.config.background);
        }

        if !self.ctx.running {
            return self.settle("draw", Ok(Ok(())));
        }
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| self.program.draw(&mut self.ctx, surface)));
        self.settle("draw", outcome)?;
        self.phase = Phase::Drawing;
        Ok(())
    }

    pub fn key_pressed(&mut self, key: Key) {
        if self.is_running() {
            self.program.key_pressed(&mut self.ctx, key);
        }
    }

    /// Start time plus whatever the program reports.
    pub fn status_line(&self) -> String {
        let started = self
            .ctx
            .started_at
            .map(|at| format!("started {}", at.format("%H:%M:%S")))
            .unwrap_or_else(|| "not started".to_string());
        match self.program.status_line() {
            Some(status) => format!("{status} | {started}"),
            None => started,
        }
    }

    /// Normal shutdown, e.g. the window was closed.
    pub fn stop(&mut self) {
        if self.phase != Phase::Stopped {
            self.ctx.logger.debug("Stopping.");
        }
        self.ctx.running = false;
        self.phase = Phase::Stopped;
    }

    fn live(&self) -> Result<(Instant, Instant), HarnessError> {
        match (self.phase, self.started, self.last_frame) {
            (Phase::Stopped, ..) => Err(HarnessError::Stopped),
            (_, Some(started), Some(last_frame)) => Ok((started, last_frame)),
            _ => Err(HarnessError::NotStarted),
        }
    }

    fn settle(
        &mut self,
        hook: &'static str,
        outcome: thread::Result<anyhow::Result<()>>,
    ) -> Result<(), HarnessError> {
        let result = match outcome {
            Ok(Ok(())) if self.ctx.running => return Ok(()),
            Ok(Ok(())) => HarnessError::Stopped,
            Ok(Err(err)) => {
                let message = format!("{err:#}");
                self.ctx.logger.error(format_args!("{hook} failed, exiting: {message}"));
                HarnessError::Hook { hook, message }
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.ctx.fatal(format_args!("{hook} hook panicked: {message}"));
                HarnessError::Panicked { hook, message }
            }
        };
        self.stop();
        Err(result)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
