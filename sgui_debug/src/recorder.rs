// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records, each introduced by a one-byte tag.
//! [`decode`] reads them back as an iterator of [`RecordedEvent`].
//!
//! All records are fixed-size except widget diagnostics, which carry their
//! message as a length-prefixed UTF-8 string.

use std::borrow::Cow;

use sgui_core::trace::{
    Diagnostic, DiagnosticEvent, DispatchEvent, Layer, RenderBeginEvent, RenderEndEvent,
    ScreenSwitchEvent, TraceSink, WidgetCompositedEvent,
};
use sgui_core::{Event, EventKind, Point, Rect, Size};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_RENDER_BEGIN: u8 = 1;
const TAG_RENDER_END: u8 = 2;
const TAG_DISPATCH: u8 = 3;
const TAG_SCREEN_SWITCH: u8 = 4;
const TAG_DIAGNOSTIC: u8 = 5;
const TAG_WIDGET_COMPOSITED: u8 = 6;

const DIAG_MISSING_BITMAP: u8 = 0;
const DIAG_DIRTY_AFTER_RENDER: u8 = 1;
const DIAG_WIDGET: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_layer(&mut self, layer: Layer) {
        self.write_u8(match layer {
            Layer::Screen => 0,
            Layer::Overlay => 1,
        });
    }

    fn write_str(&mut self, s: &str) {
        // Messages longer than u32::MAX bytes are cut at a char boundary.
        let mut end = s.len().min(u32::MAX as usize);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        let len = u32::try_from(end).unwrap_or(u32::MAX);
        self.write_u32(len);
        self.buf.extend_from_slice(&s.as_bytes()[..end]);
    }
}

impl TraceSink for RecorderSink {
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        self.write_u8(TAG_RENDER_BEGIN);
        self.write_u64(e.pass_index);
        self.write_bool(e.refill);
        self.write_u64(e.timestamp_us);
    }

    fn on_render_end(&mut self, e: &RenderEndEvent) {
        self.write_u8(TAG_RENDER_END);
        self.write_u64(e.pass_index);
        self.write_u32(e.composited);
        self.write_u32(e.skipped);
        self.write_u32(e.overlay_composited);
        self.write_u32(e.damage_rects);
        self.write_u64(e.timestamp_us);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.write_u8(TAG_DISPATCH);
        self.write_u8(match e.event.kind {
            EventKind::Tap => 0,
            EventKind::Release => 1,
        });
        self.write_i32(e.event.position.x);
        self.write_i32(e.event.position.y);
        self.write_u32(e.deliveries);
        self.write_bool(e.hooked);
        self.write_u64(e.timestamp_us);
    }

    fn on_screen_switch(&mut self, e: &ScreenSwitchEvent) {
        self.write_u8(TAG_SCREEN_SWITCH);
        self.write_bool(e.same_screen);
        self.write_u32(e.widgets);
        self.write_u64(e.timestamp_us);
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        self.write_u8(TAG_DIAGNOSTIC);
        self.write_u64(e.pass_index);
        match &e.diagnostic {
            Diagnostic::MissingBitmap { layer, index } => {
                self.write_u8(DIAG_MISSING_BITMAP);
                self.write_layer(*layer);
                self.write_u32(*index);
            }
            Diagnostic::DirtyAfterRender { layer, index } => {
                self.write_u8(DIAG_DIRTY_AFTER_RENDER);
                self.write_layer(*layer);
                self.write_u32(*index);
            }
            Diagnostic::Widget {
                layer,
                index,
                message,
            } => {
                self.write_u8(DIAG_WIDGET);
                self.write_layer(*layer);
                self.write_u32(*index);
                self.write_str(message);
            }
        }
        self.write_u64(e.timestamp_us);
    }

    fn on_widget_composited(&mut self, e: &WidgetCompositedEvent) {
        self.write_u8(TAG_WIDGET_COMPOSITED);
        self.write_u64(e.pass_index);
        self.write_layer(e.layer);
        self.write_u32(e.index);
        self.write_i32(e.rect.origin.x);
        self.write_i32(e.rect.origin.y);
        self.write_u32(e.rect.size.width);
        self.write_u32(e.rect.size.height);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`RenderBeginEvent`].
    RenderBegin(RenderBeginEvent),
    /// A [`RenderEndEvent`].
    RenderEnd(RenderEndEvent),
    /// A [`DispatchEvent`].
    Dispatch(DispatchEvent),
    /// A [`ScreenSwitchEvent`].
    ScreenSwitch(ScreenSwitchEvent),
    /// A [`DiagnosticEvent`].
    Diagnostic(DiagnosticEvent),
    /// A [`WidgetCompositedEvent`].
    WidgetComposited(WidgetCompositedEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos.checked_add(N)?)?;
        self.pos += N;
        bytes.try_into().ok()
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_layer(&mut self) -> Option<Layer> {
        Some(match self.read_u8()? {
            0 => Layer::Screen,
            _ => Layer::Overlay,
        })
    }

    fn read_str(&mut self) -> Option<String> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        let bytes = self.data.get(self.pos..self.pos.checked_add(len)?)?;
        self.pos += len;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn decode_render_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RenderBegin(RenderBeginEvent {
            pass_index: self.read_u64()?,
            refill: self.read_bool()?,
            timestamp_us: self.read_u64()?,
        }))
    }

    fn decode_render_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RenderEnd(RenderEndEvent {
            pass_index: self.read_u64()?,
            composited: self.read_u32()?,
            skipped: self.read_u32()?,
            overlay_composited: self.read_u32()?,
            damage_rects: self.read_u32()?,
            timestamp_us: self.read_u64()?,
        }))
    }

    fn decode_dispatch(&mut self) -> Option<RecordedEvent> {
        let kind = match self.read_u8()? {
            0 => EventKind::Tap,
            _ => EventKind::Release,
        };
        let position = Point::new(self.read_i32()?, self.read_i32()?);
        Some(RecordedEvent::Dispatch(DispatchEvent {
            event: Event { position, kind },
            deliveries: self.read_u32()?,
            hooked: self.read_bool()?,
            timestamp_us: self.read_u64()?,
        }))
    }

    fn decode_screen_switch(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ScreenSwitch(ScreenSwitchEvent {
            same_screen: self.read_bool()?,
            widgets: self.read_u32()?,
            timestamp_us: self.read_u64()?,
        }))
    }

    fn decode_diagnostic(&mut self) -> Option<RecordedEvent> {
        let pass_index = self.read_u64()?;
        let kind = self.read_u8()?;
        let layer = self.read_layer()?;
        let index = self.read_u32()?;
        let diagnostic = match kind {
            DIAG_MISSING_BITMAP => Diagnostic::MissingBitmap { layer, index },
            DIAG_DIRTY_AFTER_RENDER => Diagnostic::DirtyAfterRender { layer, index },
            DIAG_WIDGET => Diagnostic::Widget {
                layer,
                index,
                message: Cow::Owned(self.read_str()?),
            },
            _ => return None,
        };
        Some(RecordedEvent::Diagnostic(DiagnosticEvent {
            pass_index,
            diagnostic,
            timestamp_us: self.read_u64()?,
        }))
    }

    fn decode_widget_composited(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::WidgetComposited(WidgetCompositedEvent {
            pass_index: self.read_u64()?,
            layer: self.read_layer()?,
            index: self.read_u32()?,
            rect: Rect::new(
                Point::new(self.read_i32()?, self.read_i32()?),
                Size::new(self.read_u32()?, self.read_u32()?),
            ),
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_RENDER_BEGIN => self.decode_render_begin(),
            TAG_RENDER_END => self.decode_render_end(),
            TAG_DISPATCH => self.decode_dispatch(),
            TAG_SCREEN_SWITCH => self.decode_screen_switch(),
            TAG_DIAGNOSTIC => self.decode_diagnostic(),
            TAG_WIDGET_COMPOSITED => self.decode_widget_composited(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
