//! Reporting of registry and render-path events.
//!
//! The registry never writes to stdout or stderr. Every event it wants to
//! surface goes through a [`RenderEvents`] sink handed to it at construction.
//! The default sink, [`TracingEvents`], forwards them as structured `tracing`
//! events, so any subscriber the application installs picks them up.

use crate::error::RenderError;

/// Receives events the registry and application pipeline report.
///
/// Each occurrence is reported exactly once.
pub trait RenderEvents: Send + Sync {
    /// A registration replaced an existing renderer.
    fn renderer_overwritten(&self, renderer: &str);

    /// A render config named a type with no registered renderer.
    ///
    /// `fell_back` tells whether the default renderer took over.
    fn renderer_not_found(&self, renderer: &str, fell_back: bool);

    /// A renderer returned an error; the raw value is being rendered
    /// through the default renderer instead.
    fn render_failed(&self, renderer: &str, error: &RenderError);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEvents;

impl RenderEvents for TracingEvents {
    fn renderer_overwritten(&self, renderer: &str) {
        tracing::warn!(
            domain = "renderers",
            renderer,
            "renderer already registered; overwriting",
        );
    }

    fn renderer_not_found(&self, renderer: &str, fell_back: bool) {
        tracing::warn!(
            domain = "renderers",
            renderer,
            fell_back,
            "renderer not found",
        );
    }

    fn render_failed(&self, renderer: &str, error: &RenderError) {
        tracing::error!(
            domain = "renderers",
            renderer,
            error = %error,
            "render failed; falling back to default renderer",
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEvents;

impl RenderEvents for NoopEvents {
    fn renderer_overwritten(&self, _renderer: &str) {}

    fn renderer_not_found(&self, _renderer: &str, _fell_back: bool) {}

    fn render_failed(&self, _renderer: &str, _error: &RenderError) {}
}

/// An event captured by [`RecordingEvents`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Overwritten { renderer: String },
    NotFound { renderer: String, fell_back: bool },
    Failed { renderer: String, error: String },
}

/// Keeps every event in memory, for tests and diagnostics screens.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    events: std::sync::Mutex<Vec<RenderEvent>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far, oldest first.
    pub fn events(&self) -> Vec<RenderEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, event: RenderEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RenderEvent>> {
        // A poisoned log is still a usable log.
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RenderEvents for RecordingEvents {
    fn renderer_overwritten(&self, renderer: &str) {
        self.push(RenderEvent::Overwritten {
            renderer: renderer.to_string(),
        });
    }

    fn renderer_not_found(&self, renderer: &str, fell_back: bool) {
        self.push(RenderEvent::NotFound {
            renderer: renderer.to_string(),
            fell_back,
        });
    }

    fn render_failed(&self, renderer: &str, error: &RenderError) {
        self.push(RenderEvent::Failed {
            renderer: renderer.to_string(),
            error: error.to_string(),
        });
    }
}
