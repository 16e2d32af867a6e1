// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget capability contract.
//!
//! The compositor never looks inside a widget. It asks for a size to
//! hit-test against, a dirty flag to decide whether to repaint, and a
//! bitmap to composite. Everything else (pressed state, text, parameter
//! sources) is the widget's own business.
//!
//! Widgets are shared as [`SharedWidget`] handles: the screen holding the
//! widget and any application code that mutates its parameters both keep an
//! `Arc`. The `Mutex` around each widget also serializes input delivery, so
//! two events in flight never run `tap`/`release` on the same widget at the
//! same time.

use std::borrow::Cow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::bitmap::Bitmap;
use crate::geometry::{Point, Size};

/// Deferred work a widget hands back after an input delivery.
///
/// Runs after the widget's lock has been released, so it may call back into
/// the compositor (switch screens, swap the overlay) or lock the widget
/// again.
pub type Action = Box<dyn FnOnce() + Send>;

/// A shared, lockable handle to any widget.
pub type SharedWidget = Arc<Mutex<dyn Widget + Send>>;

/// Wraps a widget for registration on a screen while keeping a typed handle.
///
/// ```rust,ignore
/// let button = shared(Button::with_param(param));
/// screen.add_widget(10, 10, button.clone());
/// lock(&button).set_text("OK", 20.0, None);
/// ```
pub fn shared<W: Widget + Send + 'static>(widget: W) -> Arc<Mutex<W>> {
    Arc::new(Mutex::new(widget))
}

/// Locks a widget handle, recovering the guard if a previous holder panicked.
pub fn lock<W: ?Sized>(widget: &Mutex<W>) -> MutexGuard<'_, W> {
    widget.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A problem a widget recovered from on its own.
///
/// Widgets report these through [`Widget::take_diagnostic`]; the compositor
/// forwards them to its trace sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetDiagnostic {
    /// Human-readable description.
    pub message: Cow<'static, str>,
}

impl WidgetDiagnostic {
    /// Creates a diagnostic from a message.
    #[must_use]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The interface every on-screen element implements.
pub trait Widget {
    /// Produces the current bitmap and clears the dirty flag.
    ///
    /// Returns `None` on a render error; the compositor logs it and skips the
    /// widget for this pass. A hidden widget returns its background swatch
    /// rather than its content.
    fn render(&mut self) -> Option<&Bitmap>;

    /// Returns the current size, used for hit-testing. May change between
    /// frames; the compositor never caches it.
    fn size(&self) -> Size;

    /// Returns `true` if the bitmap changed since the last [`render`](Self::render).
    fn updated(&self) -> bool;

    /// Handles a tap at an absolute display position.
    fn tap(&mut self, position: Point);

    /// Handles a release at an absolute display position.
    fn release(&mut self, position: Point);

    /// Hides the widget. It keeps its position and paints its background.
    fn hide(&mut self);

    /// Shows a hidden widget.
    fn show(&mut self);

    /// Returns `true` if the widget is hidden.
    fn hidden(&self) -> bool;

    /// Returns `true` if the widget ignores input.
    fn disabled(&self) -> bool;

    /// Pulls external state before the compositor's dirty check.
    ///
    /// Called once per render pass for every widget on the active screen
    /// and overlay.
    fn update(&mut self) {}

    /// Returns `true` if the widget receives every event regardless of its
    /// rectangle.
    fn hooks_all_events(&self) -> bool {
        false
    }

    /// Returns and clears work queued by the last `tap` or `release`.
    ///
    /// The compositor calls this right after each delivery and runs the
    /// action once the widget is unlocked. Click handlers belong here rather
    /// than inside `release`.
    fn take_action(&mut self) -> Option<Action> {
        None
    }

    /// Returns and clears the most recent locally-recovered problem.
    fn take_diagnostic(&mut self) -> Option<WidgetDiagnostic> {
        None
    }
}
