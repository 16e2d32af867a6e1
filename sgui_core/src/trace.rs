// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for render passes and event dispatch.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! compositor calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! The compositor owns exactly one sink, installed with
//! [`Compositor::set_trace_sink`](crate::Compositor::set_trace_sink). Until
//! one is installed, events go to [`NoopSink`]. Problems the compositor or a
//! widget recovers from on its own (a missing bitmap, a widget that stays
//! dirty) are reported as [`Diagnostic`]s through the same sink rather than
//! through any process-wide logger.
//!
//! Timestamps are microseconds since the compositor was created.
//!
//! # Crate features
//!
//! - `trace-rich` gates [`WidgetCompositedEvent`] and the corresponding
//!   `TraceSink` method, emitted once per composited widget.

use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use crate::event::Event;
use crate::widget::lock;
#[cfg(feature = "trace-rich")]
use crate::geometry::Rect;

/// Which widget list a diagnostic or composite refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The active screen.
    Screen,
    /// The overlay.
    Overlay,
}

/// A problem recovered from during a render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A widget's `render` returned no bitmap. The widget was skipped.
    MissingBitmap {
        /// Which list the widget is on.
        layer: Layer,
        /// Registration index within that list.
        index: u32,
    },
    /// A widget still reported itself dirty after being composited.
    DirtyAfterRender {
        /// Which list the widget is on.
        layer: Layer,
        /// Registration index within that list.
        index: u32,
    },
    /// A widget reported a problem it recovered from itself.
    Widget {
        /// Which list the widget is on.
        layer: Layer,
        /// Registration index within that list.
        index: u32,
        /// The widget's description of the problem.
        message: Cow<'static, str>,
    },
}

/// Marks the beginning of a render pass.
#[derive(Clone, Copy, Debug)]
pub struct RenderBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Whether this pass refills the background and repaints every widget.
    pub refill: bool,
    /// Time at the start of the pass.
    pub timestamp_us: u64,
}

/// Marks the end of a render pass.
#[derive(Clone, Copy, Debug)]
pub struct RenderEndEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Screen widgets written to the display.
    pub composited: u32,
    /// Screen widgets skipped because they were clean.
    pub skipped: u32,
    /// Overlay widgets written to the display.
    pub overlay_composited: u32,
    /// Rectangles recorded in the screen pass damage (full refill counts
    /// as one).
    pub damage_rects: u32,
    /// Time at the end of the pass.
    pub timestamp_us: u64,
}

/// Emitted after an event has been hit-tested and delivered.
#[derive(Clone, Copy, Debug)]
pub struct DispatchEvent {
    /// The routed event.
    pub event: Event,
    /// Number of widgets the event was delivered to.
    pub deliveries: u32,
    /// Whether the screen's tap hook ran.
    pub hooked: bool,
    /// Time the dispatch finished, before the follow-up render.
    pub timestamp_us: u64,
}

/// Emitted when the active screen is set.
#[derive(Clone, Copy, Debug)]
pub struct ScreenSwitchEvent {
    /// `true` if the screen was already active and only a refill was forced.
    pub same_screen: bool,
    /// Number of widgets on the new screen.
    pub widgets: u32,
    /// Time the swap completed.
    pub timestamp_us: u64,
}

/// Emitted for every recovered problem.
#[derive(Clone, Debug)]
pub struct DiagnosticEvent {
    /// Pass during which the problem was observed.
    pub pass_index: u64,
    /// What went wrong.
    pub diagnostic: Diagnostic,
    /// Time the problem was observed.
    pub timestamp_us: u64,
}

/// Emitted for each widget written to the display.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct WidgetCompositedEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Which list the widget is on.
    pub layer: Layer,
    /// Registration index within that list.
    pub index: u32,
    /// Display rectangle that was written.
    pub rect: Rect,
}

/// Receives trace events from the compositor.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called at the beginning of a render pass.
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        _ = e;
    }

    /// Called at the end of a render pass.
    fn on_render_end(&mut self, e: &RenderEndEvent) {
        _ = e;
    }

    /// Called after an event has been delivered.
    fn on_dispatch(&mut self, e: &DispatchEvent) {
        _ = e;
    }

    /// Called when the active screen is set.
    fn on_screen_switch(&mut self, e: &ScreenSwitchEvent) {
        _ = e;
    }

    /// Called for every recovered problem.
    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        _ = e;
    }

    /// Called for each composited widget (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_widget_composited(&mut self, e: &WidgetCompositedEvent) {
        _ = e;
    }
}

/// Forwards to a shared sink, so the caller can keep a handle to it after
/// installing it on a compositor.
impl<S: TraceSink + ?Sized> TraceSink for Arc<Mutex<S>> {
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        lock(&**self).on_render_begin(e);
    }

    fn on_render_end(&mut self, e: &RenderEndEvent) {
        lock(&**self).on_render_end(e);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        lock(&**self).on_dispatch(e);
    }

    fn on_screen_switch(&mut self, e: &ScreenSwitchEvent) {
        lock(&**self).on_screen_switch(e);
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        lock(&**self).on_diagnostic(e);
    }

    #[cfg(feature = "trace-rich")]
    fn on_widget_composited(&mut self, e: &WidgetCompositedEvent) {
        lock(&**self).on_widget_composited(e);
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_render_begin(&RenderBeginEvent {
            pass_index: 0,
            refill: true,
            timestamp_us: 0,
        });
        sink.on_dispatch(&DispatchEvent {
            event: Event::tap(Point::new(1, 2)),
            deliveries: 0,
            hooked: false,
            timestamp_us: 5,
        });
        sink.on_diagnostic(&DiagnosticEvent {
            pass_index: 0,
            diagnostic: Diagnostic::MissingBitmap {
                layer: Layer::Screen,
                index: 3,
            },
            timestamp_us: 7,
        });
    }

    #[test]
    fn overriding_one_method_is_enough() {
        #[derive(Default)]
        struct Counter {
            switches: usize,
        }
        impl TraceSink for Counter {
            fn on_screen_switch(&mut self, _: &ScreenSwitchEvent) {
                self.switches += 1;
            }
        }

        let mut sink = Counter::default();
        sink.on_screen_switch(&ScreenSwitchEvent {
            same_screen: false,
            widgets: 2,
            timestamp_us: 0,
        });
        sink.on_render_end(&RenderEndEvent {
            pass_index: 0,
            composited: 0,
            skipped: 0,
            overlay_composited: 0,
            damage_rects: 0,
            timestamp_us: 1,
        });
        assert_eq!(sink.switches, 1);
    }

    #[test]
    fn shared_sink_forwards() {
        #[derive(Default)]
        struct Passes(u64);
        impl TraceSink for Passes {
            fn on_render_begin(&mut self, e: &RenderBeginEvent) {
                self.0 = e.pass_index;
            }
        }

        let shared = Arc::new(Mutex::new(Passes::default()));
        let mut installed: Box<dyn TraceSink + Send> = Box::new(Arc::clone(&shared));
        installed.on_render_begin(&RenderBeginEvent {
            pass_index: 9,
            refill: false,
            timestamp_us: 0,
        });
        assert_eq!(shared.lock().unwrap().0, 9);
    }
}
