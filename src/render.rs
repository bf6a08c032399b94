//! Rendering subsystem.
//!
//! The coordinator in [`service`] evaluates the schedule and hands a [`protocol::RenderFrame`]
//! to each registered [`sink::DisplaySink`]; [`surface`] lays the frame out as text.

pub mod protocol;
pub mod service;
pub mod sink;
pub mod surface;

pub use protocol::{CoordinatorState, RenderFrame, SinkId, TickReport};
pub use service::RefreshCoordinator;
pub use sink::{ConsoleSink, DisplaySink};
pub use surface::{compose, SurfaceKind, SurfaceRow, SurfaceView};
