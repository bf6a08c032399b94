//! Display sink trait and the console implementation.

use crate::error::SinkError;
use crate::render::protocol::RenderFrame;
use crate::render::surface::{compose, SurfaceKind};
use crate::schedule::Language;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Write;

/// A surface that turns a [`RenderFrame`] into something the user sees.
///
/// Implementations own their own rendering latency and state. Errors are reported back to the
/// coordinator, which logs them and carries on with the remaining sinks.
#[async_trait]
pub trait DisplaySink: Send + Sync {
    async fn render(&self, frame: &RenderFrame) -> Result<(), SinkError>;
}

/// Writes a composed surface as plain text, one block per tick.
pub struct ConsoleSink<W> {
    kind: SurfaceKind,
    language: Language,
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(kind: SurfaceKind, language: Language, out: W) -> Self {
        Self {
            kind,
            language,
            out: Mutex::new(out),
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

#[async_trait]
impl<W: Write + Send> DisplaySink for ConsoleSink<W> {
    async fn render(&self, frame: &RenderFrame) -> Result<(), SinkError> {
        let view = compose(self.kind, frame, self.language);
        let mut out = self.out.lock();
        writeln!(out, "{}", view)
            .and_then(|_| out.flush())
            .map_err(|e| SinkError::new(format!("{} surface: {}", self.kind, e)))
    }
}
