// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Render passes become duration events on thread 0, dispatches and screen
//! switches are instant events on thread 1, and diagnostics are global
//! instant events so they stand out in the timeline.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use sgui_core::EventKind;
use sgui_core::trace::{Diagnostic, Layer};

use crate::recorder::{RecordedEvent, decode};

const RENDER_TID: u32 = 0;
const INPUT_TID: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Recorded timestamps are already in microseconds.
///
/// Composite records carry no timestamp of their own; they are placed at the
/// start of the pass they belong to.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut pass_start = 0_u64;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::RenderBegin(e) => {
                pass_start = e.timestamp_us;
                events.push(json!({
                    "ph": "B",
                    "name": if e.refill { "Refill" } else { "Render" },
                    "cat": "Render",
                    "ts": e.timestamp_us,
                    "pid": 0,
                    "tid": RENDER_TID,
                    "args": {
                        "pass_index": e.pass_index,
                    }
                }));
            }
            RecordedEvent::RenderEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "cat": "Render",
                    "ts": e.timestamp_us,
                    "pid": 0,
                    "tid": RENDER_TID,
                    "args": {
                        "pass_index": e.pass_index,
                        "composited": e.composited,
                        "skipped": e.skipped,
                        "overlay_composited": e.overlay_composited,
                        "damage_rects": e.damage_rects,
                    }
                }));
            }
            RecordedEvent::Dispatch(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": match e.event.kind {
                        EventKind::Tap => "Tap",
                        EventKind::Release => "Release",
                    },
                    "cat": "Input",
                    "ts": e.timestamp_us,
                    "pid": 0,
                    "tid": INPUT_TID,
                    "s": "t",
                    "args": {
                        "x": e.event.position.x,
                        "y": e.event.position.y,
                        "deliveries": e.deliveries,
                        "hooked": e.hooked,
                    }
                }));
            }
            RecordedEvent::ScreenSwitch(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ScreenSwitch",
                    "cat": "Screen",
                    "ts": e.timestamp_us,
                    "pid": 0,
                    "tid": INPUT_TID,
                    "s": "p",
                    "args": {
                        "same_screen": e.same_screen,
                        "widgets": e.widgets,
                    }
                }));
            }
            RecordedEvent::Diagnostic(e) => {
                let (kind, layer, index, message) = match &e.diagnostic {
                    Diagnostic::MissingBitmap { layer, index } => {
                        ("MissingBitmap", *layer, *index, None)
                    }
                    Diagnostic::DirtyAfterRender { layer, index } => {
                        ("DirtyAfterRender", *layer, *index, None)
                    }
                    Diagnostic::Widget {
                        layer,
                        index,
                        message,
                    } => ("Widget", *layer, *index, Some(message.to_string())),
                };
                events.push(json!({
                    "ph": "i",
                    "name": kind,
                    "cat": "Diagnostic",
                    "ts": e.timestamp_us,
                    "pid": 0,
                    "tid": RENDER_TID,
                    "s": "g",
                    "args": {
                        "pass_index": e.pass_index,
                        "layer": layer_name(layer),
                        "index": index,
                        "message": message,
                    }
                }));
            }
            RecordedEvent::WidgetComposited(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Composite",
                    "cat": "Rich",
                    "ts": pass_start,
                    "pid": 0,
                    "tid": RENDER_TID,
                    "s": "t",
                    "args": {
                        "pass_index": e.pass_index,
                        "layer": layer_name(e.layer),
                        "index": e.index,
                        "x": e.rect.origin.x,
                        "y": e.rect.origin.y,
                        "width": e.rect.size.width,
                        "height": e.rect.size.height,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Screen => "screen",
        Layer::Overlay => "overlay",
    }
}
