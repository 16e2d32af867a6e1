// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screens and overlays: ordered collections of positioned widgets.
//!
//! A [`Screen`] is one full-screen view. Its object list is append-only and
//! its order is significant three times over: it is the paint order, the
//! hit-test order and the event-delivery order. A screen also carries a
//! background that is written wholesale whenever the screen becomes active
//! or its background color changes (the *refill*).
//!
//! An [`Overlay`] is the same kind of list without a background. It is
//! always composited after the active screen, whichever screen that is.
//!
//! Both are handed to the compositor as `Arc<Mutex<_>>`. The mutex is the
//! container's exclusive section: render passes and screen switches take it,
//! so a screen is never swapped out from under a pass that is drawing it.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use crate::widget::{SharedWidget, Widget, lock};

/// A callback run for every tap on a screen, regardless of widgets.
pub type TapHook = Arc<dyn Fn(Point) + Send + Sync>;

/// A callback run once, when a screen is first made active.
pub type ActivateHook = Box<dyn FnOnce() + Send>;

/// A widget paired with its display position.
#[derive(Clone)]
pub struct Object {
    /// The widget.
    pub widget: SharedWidget,
    /// Top-left corner on the display.
    pub position: Point,
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Object {
    /// Returns the widget's on-display rectangle,
    /// `[position, position + size)`.
    ///
    /// Locks the widget to read its current size.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, lock(&*self.widget).size())
    }
}

/// Registers a widget at `(x, y)` in `objects`.
fn push_widget<W>(objects: &mut Vec<Object>, x: i32, y: i32, widget: Arc<Mutex<W>>)
where
    W: Widget + Send + 'static,
{
    objects.push(Object {
        widget,
        position: Point::new(x, y),
    });
}

/// One full-screen view.
pub struct Screen {
    size: Size,
    objects: Vec<Object>,
    background_color: Option<Color>,
    background: Option<Bitmap>,
    refill: bool,
    tap_hook: Option<TapHook>,
    on_activate: Option<ActivateHook>,
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("size", &self.size)
            .field("objects", &self.objects.len())
            .field("background_color", &self.background_color)
            .field("refill", &self.refill)
            .field("tap_hook", &self.tap_hook.is_some())
            .field("on_activate", &self.on_activate.is_some())
            .finish_non_exhaustive()
    }
}

impl Screen {
    /// Creates an empty screen. The first render after activation refills
    /// the whole display.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            objects: Vec::new(),
            background_color: None,
            background: None,
            refill: true,
            tap_hook: None,
            on_activate: None,
        }
    }

    /// Returns the screen size. Fixed at creation.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Appends a widget at `(x, y)`. Later widgets paint over earlier ones and
    /// receive events after them.
    pub fn add_widget<W>(&mut self, x: i32, y: i32, widget: Arc<Mutex<W>>)
    where
        W: Widget + Send + 'static,
    {
        push_widget(&mut self.objects, x, y, widget);
    }

    /// Returns the positioned widgets in registration order.
    #[must_use]
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Returns the number of registered widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no widgets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Sets a solid background color.
    ///
    /// The background bitmap is regenerated lazily by the next render pass,
    /// which also repaints every widget.
    pub fn set_background(&mut self, color: Color) {
        if self.background_color == Some(color) {
            return;
        }
        self.background_color = Some(color);
        self.background = None;
        self.refill = true;
    }

    /// Returns the background color, if one was set.
    #[must_use]
    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    /// Installs a hook called with the raw position of every tap on this
    /// screen, independently of widget hit-testing.
    pub fn set_tap_hook(&mut self, hook: impl Fn(Point) + Send + Sync + 'static) {
        self.tap_hook = Some(Arc::new(hook));
    }

    pub(crate) fn tap_hook(&self) -> Option<TapHook> {
        self.tap_hook.clone()
    }

    /// Installs a callback run once, synchronously, the next time this
    /// screen is made active.
    ///
    /// The callback runs while the compositor holds this screen's lock, so it
    /// must not call back into the compositor.
    pub fn set_on_activate(&mut self, hook: impl FnOnce() + Send + 'static) {
        self.on_activate = Some(Box::new(hook));
    }

    pub(crate) fn take_on_activate(&mut self) -> Option<ActivateHook> {
        self.on_activate.take()
    }

    /// Forces a full repaint on the next render pass.
    pub fn request_refill(&mut self) {
        self.refill = true;
    }

    /// Returns `true` if the next render pass will repaint everything.
    #[must_use]
    pub fn needs_refill(&self) -> bool {
        self.refill
    }

    pub(crate) fn clear_refill(&mut self) {
        self.refill = false;
    }

    /// Returns the background bitmap, regenerating it if the color changed.
    ///
    /// Returns `None` if no background color was ever set.
    pub(crate) fn background(&mut self) -> Option<&Bitmap> {
        let color = self.background_color?;
        let size = self.size;
        Some(self.background.get_or_insert_with(|| Bitmap::filled(size, color)))
    }
}

/// A widget layer composited above whichever screen is active.
#[derive(Debug)]
pub struct Overlay {
    size: Size,
    objects: Vec<Object>,
}

impl Overlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            objects: Vec::new(),
        }
    }

    /// Returns the overlay size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Appends a widget at `(x, y)`.
    pub fn add_widget<W>(&mut self, x: i32, y: i32, widget: Arc<Mutex<W>>)
    where
        W: Widget + Send + 'static,
    {
        push_widget(&mut self.objects, x, y, widget);
    }

    /// Returns the positioned widgets in registration order.
    #[must_use]
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }
}
