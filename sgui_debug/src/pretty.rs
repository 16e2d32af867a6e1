// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use sgui_core::EventKind;
use sgui_core::trace::{
    Diagnostic, DiagnosticEvent, DispatchEvent, Layer, RenderBeginEvent, RenderEndEvent,
    ScreenSwitchEvent, TraceSink, WidgetCompositedEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write + Send>> {
    writer: W,
    composites: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("composites", &self.composites)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            composites: false,
        }
    }

    /// Also prints a line for every composited widget. Off by default; a
    /// refill pass prints one line per widget.
    #[must_use]
    pub fn with_composites(mut self, on: bool) -> Self {
        self.composites = on;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Screen => "screen",
        Layer::Overlay => "overlay",
    }
}

fn ms(timestamp_us: u64) -> f64 {
    timestamp_us as f64 / 1000.0
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[render:begin] pass={} refill={} at {:.1}ms",
            e.pass_index,
            e.refill,
            ms(e.timestamp_us),
        );
    }

    fn on_render_end(&mut self, e: &RenderEndEvent) {
        let _ = writeln!(
            self.writer,
            "[render:end] pass={} composited={} skipped={} overlay={} damage={} at {:.1}ms",
            e.pass_index,
            e.composited,
            e.skipped,
            e.overlay_composited,
            e.damage_rects,
            ms(e.timestamp_us),
        );
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        let kind = match e.event.kind {
            EventKind::Tap => "tap",
            EventKind::Release => "release",
        };
        let hook = if e.hooked { " +hook" } else { "" };
        let _ = writeln!(
            self.writer,
            "[dispatch] {kind} ({}, {}) widgets={}{hook}",
            e.event.position.x, e.event.position.y, e.deliveries,
        );
    }

    fn on_screen_switch(&mut self, e: &ScreenSwitchEvent) {
        let what = if e.same_screen { "refill" } else { "switch" };
        let _ = writeln!(self.writer, "[screen] {what} widgets={}", e.widgets);
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        let _ = match &e.diagnostic {
            Diagnostic::MissingBitmap { layer, index } => writeln!(
                self.writer,
                "[diag] pass={} {}#{index} rendered no bitmap",
                e.pass_index,
                layer_name(*layer),
            ),
            Diagnostic::DirtyAfterRender { layer, index } => writeln!(
                self.writer,
                "[diag] pass={} {}#{index} still dirty after render",
                e.pass_index,
                layer_name(*layer),
            ),
            Diagnostic::Widget {
                layer,
                index,
                message,
            } => writeln!(
                self.writer,
                "[diag] pass={} {}#{index}: {message}",
                e.pass_index,
                layer_name(*layer),
            ),
        };
    }

    fn on_widget_composited(&mut self, e: &WidgetCompositedEvent) {
        if !self.composites {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[composite] pass={} {}#{} at {:?}",
            e.pass_index,
            layer_name(e.layer),
            e.index,
            e.rect,
        );
    }
}
