//! # vakit - Prayer Window Evaluation and Display Refresh
//!
//! Works out which of the six daily prayer windows is active, which prayer comes next and how
//! long until it starts, and keeps any number of display surfaces refreshed on a timer.
//!
//! ## Features
//!
//! - **Deterministic evaluation**: a pure function of the schedule and the clock reading
//! - **Midnight-safe countdowns**: the overnight window wraps with minute-of-day arithmetic
//! - **One timer, many surfaces**: a single coordinator drives small, medium and large widgets
//!   plus the ongoing notification
//! - **Failure isolation**: a surface that errors or panics never blocks the others
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`schedule`] - Time parsing, the six-prayer schedule and evaluation
//! - [`store`] - Key-value persistence and the atomically replaced snapshot
//! - [`clock`] - Injectable time source
//! - [`render`] - Refresh coordinator, sink trait and surface layout
//! - `config` - TOML configuration (behind the `config` feature)

// Core modules
pub mod error;
pub mod schedule;

pub mod clock;
pub mod store;

pub mod render;

#[cfg(feature = "config")]
pub mod config;

// Re-export commonly used types for convenience
pub use error::{EvaluationError, ParseError, Result, SinkError, VakitError};

// Public API surface for external usage
pub use clock::{Clock, ManualClock, SystemClock};
pub use render::{DisplaySink, RefreshCoordinator, RenderFrame, SinkId, SurfaceKind};
pub use schedule::{evaluate, EvaluationResult, Prayer, PrayerSchedule, PrayerTime, RawSchedule};
pub use store::{MemoryStore, ScheduleStore, SharedSchedule};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
