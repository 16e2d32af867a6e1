// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen/overlay compositor and event dispatch for pixel framebuffers.
//!
//! `sgui_core` drives small touch-panel UIs: a display buffer is painted
//! from an ordered list of widgets, each of which renders itself into an
//! RGBA bitmap, and pointer events read from an input device are routed to
//! the widgets under them. Only widgets that say they changed are repainted.
//!
//! # Architecture
//!
//! ```text
//!   InputDevice ──► input loop ──► thread per event
//!                                        │
//!                                        ▼
//!                          Compositor::dispatch(event)
//!                      hit-test (screen locked) ──► tap / release
//!                                        │
//!                                        ▼
//!   Screen ──► Compositor::render() ──► DisplayBuffer
//!   Overlay ──────────┘   (dirty widgets only, overlay last)
//! ```
//!
//! **[`compositor`]**: The [`Compositor`] owns the display, the active
//! screen, the overlay, and the input device. It is shared as
//! `Arc<Compositor<D>>` and every operation takes `&self`.
//!
//! **[`screen`]**: [`Screen`] and [`Overlay`] containers of positioned
//! widgets. Insertion order is paint order and event order.
//!
//! **[`widget`]**: The [`Widget`] contract. Concrete widgets live in the
//! `sgui_widgets` crate.
//!
//! **[`bitmap`]**, **[`color`]**, **[`geometry`]**: Pixel surfaces,
//! straight-alpha colors, and integer geometry.
//!
//! **[`display`]**: The [`DisplayBuffer`] trait implemented by framebuffers.
//!
//! **[`damage`]**: Regions repainted during a pass.
//!
//! **[`input`]**: The [`InputDevice`] trait and a channel-backed device.
//!
//! **[`config`]**: [`CompositorConfig`] and its presets.
//!
//! **[`trace`]**: [`TraceSink`] trait and event types for render and
//! dispatch instrumentation. The `sgui_debug` crate has ready-made sinks.
//!
//! # Crate features
//!
//! - `trace-rich` (disabled by default): Emits an event for every
//!   composited widget.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bitmap;
pub mod color;
pub mod compositor;
pub mod config;
pub mod damage;
pub mod display;
pub mod event;
pub mod geometry;
pub mod input;
pub mod screen;
pub mod trace;
pub mod widget;

#[cfg(test)]
mod testing;

pub use bitmap::Bitmap;
pub use color::{BlendMode, Color};
pub use compositor::{Compositor, CompositorStats};
pub use config::{CompositorConfig, DispatchPolicy};
pub use display::DisplayBuffer;
pub use event::{Event, EventKind};
pub use geometry::{Point, Rect, Size};
pub use input::{ChannelInput, InputDevice};
pub use screen::{Object, Overlay, Screen};
pub use trace::TraceSink;
pub use widget::{Action, SharedWidget, Widget, WidgetDiagnostic, lock, shared};
