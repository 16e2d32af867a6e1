// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The compositor: active-screen switching, render passes, and input
//! routing.
//!
//! A [`Compositor`] owns the display buffer and an optional input device. It
//! points at one active [`Screen`] and at most one [`Overlay`], and is
//! normally shared as `Arc<Compositor<D>>` between the input loop, its
//! per-event dispatch threads, and application code.
//!
//! # Render pass
//!
//! [`render`](Compositor::render) locks the active screen for the whole
//! pass. If the screen needs a refill, its background is written wholesale
//! and every widget is repainted. Otherwise only widgets that report
//! [`updated`](crate::Widget::updated) are rendered and written with
//! [`BlendMode::Replace`]. Overlay widgets are then composited with
//! [`BlendMode::SourceOver`], either because they changed or because the
//! screen pass repainted pixels underneath them. In the second case only the
//! repainted pixels are blended again. A changed overlay widget
//! first exposes the screen beneath its rectangle (background and the
//! screen widgets it covers are repainted), so translucent overlay pixels
//! are never blended twice.
//!
//! # Dispatch
//!
//! [`dispatch`](Compositor::dispatch) hit-tests inside the screen's lock and
//! delivers after releasing it. Taps go to every visible, enabled widget
//! whose rectangle contains the position, plus every widget that hooks all
//! events. Releases go to every visible, enabled widget.
//!
//! # Locking
//!
//! Locks are always taken in this order: screen switch, screen, active-screen
//! slot, display, overlay slot, overlay, widget. The trace sink is a leaf.
//! Widget [`Action`](crate::widget::Action)s and screen tap hooks run with no
//! compositor lock held.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::color::BlendMode;
use crate::config::{CompositorConfig, DispatchPolicy};
use crate::damage::DamageRegion;
use crate::display::DisplayBuffer;
use crate::event::{Event, EventKind};
use crate::geometry::{Point, Rect, Size};
use crate::input::InputDevice;
use crate::screen::{Object, Overlay, Screen};
#[cfg(feature = "trace-rich")]
use crate::trace::WidgetCompositedEvent;
use crate::trace::{
    Diagnostic, DiagnosticEvent, DispatchEvent, Layer, NoopSink, RenderBeginEvent, RenderEndEvent,
    ScreenSwitchEvent, TraceSink,
};
use crate::widget::{SharedWidget, Widget, lock};

/// Running totals since the compositor was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositorStats {
    /// Completed render passes.
    pub passes: u64,
    /// Passes abandoned because the screen was switched while waiting.
    pub abandoned_passes: u64,
    /// Screen widgets written to the display.
    pub composited: u64,
    /// Screen widgets skipped because they were clean.
    pub skipped: u64,
    /// Overlay widgets written to the display.
    pub overlay_composited: u64,
    /// Events dispatched to an active screen.
    pub events: u64,
    /// Individual `tap`/`release` deliveries.
    pub deliveries: u64,
    /// Diagnostics sent to the trace sink.
    pub diagnostics: u64,
}

#[derive(Debug, Default)]
struct Counters {
    passes: AtomicU64,
    abandoned_passes: AtomicU64,
    composited: AtomicU64,
    skipped: AtomicU64,
    overlay_composited: AtomicU64,
    events: AtomicU64,
    deliveries: AtomicU64,
    diagnostics: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> CompositorStats {
        let get = |c: &AtomicU64| c.load(Ordering::Relaxed);
        CompositorStats {
            passes: get(&self.passes),
            abandoned_passes: get(&self.abandoned_passes),
            composited: get(&self.composited),
            skipped: get(&self.skipped),
            overlay_composited: get(&self.overlay_composited),
            events: get(&self.events),
            deliveries: get(&self.deliveries),
            diagnostics: get(&self.diagnostics),
        }
    }
}

fn bump(counter: &AtomicU64, n: u64) {
    counter.fetch_add(n, Ordering::Relaxed);
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Per-widget facts gathered before the screen pass.
struct OverlayItem {
    rect: Rect,
    dirty: bool,
}

/// Owns a display buffer and composites screens and an overlay into it.
pub struct Compositor<D> {
    display: Mutex<D>,
    size: Size,
    config: CompositorConfig,
    switch: Mutex<()>,
    active: Mutex<Option<Arc<Mutex<Screen>>>>,
    overlay: Mutex<Option<Arc<Mutex<Overlay>>>>,
    input: Mutex<Option<Box<dyn InputDevice>>>,
    sink: Mutex<Box<dyn TraceSink + Send>>,
    counters: Counters,
    epoch: Instant,
}

impl<D> fmt::Debug for Compositor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("size", &self.size)
            .field("config", &self.config)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl<D: DisplayBuffer + Send> Compositor<D> {
    /// Creates a compositor with the default configuration and no active
    /// screen.
    ///
    /// # Panics
    ///
    /// Panics if the display has zero width or height.
    #[must_use]
    pub fn new(display: D, input: Option<Box<dyn InputDevice>>) -> Self {
        Self::with_config(display, input, CompositorConfig::default())
    }

    /// Creates a compositor with an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if the display has zero width or height.
    #[must_use]
    pub fn with_config(
        display: D,
        input: Option<Box<dyn InputDevice>>,
        config: CompositorConfig,
    ) -> Self {
        let size = display.size();
        assert!(
            !size.is_empty(),
            "display must have a non-zero size, got {size:?}"
        );
        Self {
            display: Mutex::new(display),
            size,
            config,
            switch: Mutex::new(()),
            active: Mutex::new(None),
            overlay: Mutex::new(None),
            input: Mutex::new(input),
            sink: Mutex::new(Box::new(NoopSink)),
            counters: Counters::default(),
            epoch: Instant::now(),
        }
    }

    /// Replaces the trace sink. Events already emitted are not replayed.
    pub fn set_trace_sink(&self, sink: Box<dyn TraceSink + Send>) {
        *lock(&self.sink) = sink;
    }

    /// Returns the configuration this compositor was created with.
    #[must_use]
    pub fn config(&self) -> CompositorConfig {
        self.config
    }

    /// Returns the display size.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.size
    }

    /// Locks the display buffer for reading, e.g. to export a frame.
    ///
    /// Render passes wait while the guard is held.
    pub fn display(&self) -> MutexGuard<'_, D> {
        lock(&self.display)
    }

    /// Returns the active screen, if any.
    #[must_use]
    pub fn active_screen(&self) -> Option<Arc<Mutex<Screen>>> {
        lock(&self.active).clone()
    }

    /// Returns the installed overlay, if any.
    #[must_use]
    pub fn overlay(&self) -> Option<Arc<Mutex<Overlay>>> {
        lock(&self.overlay).clone()
    }

    /// Returns running totals.
    #[must_use]
    pub fn stats(&self) -> CompositorStats {
        self.counters.snapshot()
    }

    /// Makes `screen` the active screen.
    ///
    /// The screen is marked for refill. The call blocks until any render
    /// pass on the outgoing screen has finished, swaps the active screen,
    /// then runs the screen's one-time activation callback before any pass
    /// can observe the new screen. Setting the screen that is already active
    /// swaps nothing but still forces a refill. Concurrent calls are
    /// serialized.
    ///
    /// This does not render; call [`render`](Self::render) afterwards.
    pub fn set_screen(&self, screen: Arc<Mutex<Screen>>) {
        let _switching = lock(&self.switch);
        let mut incoming = lock(&screen);
        incoming.request_refill();

        let outgoing = self.active_screen();
        let same_screen = outgoing.as_ref().is_some_and(|o| Arc::ptr_eq(o, &screen));
        if !same_screen {
            let _outgoing = outgoing.as_deref().map(lock);
            *lock(&self.active) = Some(Arc::clone(&screen));
        }

        if let Some(activate) = incoming.take_on_activate() {
            activate();
        }
        let widgets = count_u32(incoming.len());
        drop(incoming);

        self.emit(|sink, now| {
            sink.on_screen_switch(&ScreenSwitchEvent {
                same_screen,
                widgets,
                timestamp_us: now,
            });
        });
    }

    /// Installs or removes the overlay.
    ///
    /// Blocks until any render pass using the outgoing overlay has finished.
    /// The active screen is marked for refill so stale overlay pixels are
    /// painted over on the next pass.
    pub fn set_overlay(&self, overlay: Option<Arc<Mutex<Overlay>>>) {
        *lock(&self.overlay) = overlay;
        if let Some(screen) = self.active_screen() {
            lock(&screen).request_refill();
        }
    }

    /// Starts the input loop on a dedicated thread.
    ///
    /// The loop pulls events in arrival order and dispatches each on its own
    /// thread, so a slow widget never delays reading the next event. It ends
    /// when the device returns `None`.
    ///
    /// Returns `None` without doing anything if there is no input device or
    /// the loop was already started.
    pub fn start_input_loop(self: &Arc<Self>) -> Option<JoinHandle<()>>
    where
        D: 'static,
    {
        let mut device = lock(&self.input).take()?;
        let compositor = Arc::clone(self);
        let handle = thread::Builder::new()
            .name("sgui-input".into())
            .spawn(move || {
                while let Some(event) = device.next_event() {
                    let compositor = Arc::clone(&compositor);
                    thread::spawn(move || compositor.dispatch(event));
                }
            });
        handle.ok()
    }

    /// Routes one event to the active screen's widgets, then renders.
    ///
    /// Without an active screen this does nothing, not even render.
    pub fn dispatch(&self, event: Event) {
        let Some(screen) = self.active_screen() else {
            return;
        };
        let (hook, targets) = {
            let screen_guard = lock(&screen);
            if !self.is_active(&screen) {
                return;
            }
            let hook = match event.kind {
                EventKind::Tap => screen_guard.tap_hook(),
                EventKind::Release => None,
            };
            (hook, hit_test(screen_guard.objects(), event))
        };

        if let Some(hook) = &hook {
            hook(event.position);
        }
        match self.config.dispatch {
            DispatchPolicy::Concurrent if targets.len() > 1 => {
                thread::scope(|scope| {
                    for widget in &targets {
                        scope.spawn(move || deliver(widget, event));
                    }
                });
            }
            _ => {
                for widget in &targets {
                    deliver(widget, event);
                }
            }
        }

        let deliveries = count_u32(targets.len());
        bump(&self.counters.events, 1);
        bump(&self.counters.deliveries, u64::from(deliveries));
        let hooked = hook.is_some();
        self.emit(|sink, now| {
            sink.on_dispatch(&DispatchEvent {
                event,
                deliveries,
                hooked,
                timestamp_us: now,
            });
        });

        if self.config.render_after_dispatch {
            self.render();
        }
    }

    /// Runs one render pass over the active screen and the overlay.
    ///
    /// Without an active screen this does nothing.
    pub fn render(&self) {
        let Some(screen) = self.active_screen() else {
            return;
        };
        let mut screen_guard = lock(&screen);
        if !self.is_active(&screen) {
            bump(&self.counters.abandoned_passes, 1);
            return;
        }

        let pass_index = self.counters.passes.fetch_add(1, Ordering::Relaxed);
        let refill = screen_guard.needs_refill();
        self.emit(|sink, now| {
            sink.on_render_begin(&RenderBeginEvent {
                pass_index,
                refill,
                timestamp_us: now,
            });
        });

        let mut display = lock(&self.display);
        let overlay_slot = lock(&self.overlay);
        let overlay = overlay_slot.as_deref().map(lock);

        let overlay_items: Vec<OverlayItem> = overlay
            .as_ref()
            .map(|overlay| overlay.objects().iter().map(prepare_overlay_item).collect())
            .unwrap_or_default();
        let mut exposed = DamageRegion::None;
        for item in overlay_items.iter().filter(|item| item.dirty) {
            exposed.add(item.rect);
        }

        let mut damage = DamageRegion::None;
        if refill {
            if let Some(background) = screen_guard.background() {
                display.write_region(Point::ZERO, background, BlendMode::Replace);
            }
            damage = DamageRegion::Full;
        } else if let DamageRegion::Rects(rects) = &exposed {
            for rect in rects {
                if let Some(background) = screen_guard.background()
                    && let Some(clip) = rect.intersection(&background.bounds())
                {
                    display.write_region(clip.origin, &background.region(clip), BlendMode::Replace);
                }
                damage.add(*rect);
            }
        }

        let mut composited = 0_u32;
        let mut skipped = 0_u32;
        for (index, object) in screen_guard.objects().iter().enumerate() {
            let mut widget = lock(&*object.widget);
            widget.update();
            let rect = Rect::new(object.position, widget.size());
            if !refill && !widget.updated() && !exposed.intersects(&rect) {
                skipped += 1;
                continue;
            }
            let target = Target {
                layer: Layer::Screen,
                index: count_u32(index),
                position: object.position,
                mode: BlendMode::Replace,
            };
            if let Some(written) =
                self.composite(&mut *display, &mut *widget, target, None, pass_index)
            {
                damage.add(written);
                composited += 1;
            }
        }
        screen_guard.clear_refill();

        let mut overlay_composited = 0_u32;
        if let Some(overlay) = &overlay {
            for (index, (object, item)) in overlay.objects().iter().zip(&overlay_items).enumerate() {
                // A clean widget is re-blended only where the screen beneath
                // it was repainted; elsewhere its pixels are already on top.
                let clips = if item.dirty || matches!(damage, DamageRegion::Full) {
                    None
                } else {
                    let pieces = damage.disjoint_within(&item.rect);
                    if pieces.is_empty() {
                        continue;
                    }
                    Some(pieces)
                };
                let mut widget = lock(&*object.widget);
                let target = Target {
                    layer: Layer::Overlay,
                    index: count_u32(index),
                    position: object.position,
                    mode: BlendMode::SourceOver,
                };
                let written = self.composite(
                    &mut *display,
                    &mut *widget,
                    target,
                    clips.as_deref(),
                    pass_index,
                );
                if written.is_some() {
                    overlay_composited += 1;
                }
            }
        }
        drop(overlay);
        drop(overlay_slot);
        drop(display);
        drop(screen_guard);

        bump(&self.counters.composited, u64::from(composited));
        bump(&self.counters.skipped, u64::from(skipped));
        bump(&self.counters.overlay_composited, u64::from(overlay_composited));
        let damage_rects = count_u32(damage.rect_count());
        self.emit(|sink, now| {
            sink.on_render_end(&RenderEndEvent {
                pass_index,
                composited,
                skipped,
                overlay_composited,
                damage_rects,
                timestamp_us: now,
            });
        });
    }

    /// Renders one widget into the display. Returns the widget's rectangle.
    ///
    /// With `clips`, only those display-space pieces of the bitmap are
    /// written; they must not overlap.
    fn composite(
        &self,
        display: &mut D,
        widget: &mut (dyn Widget + Send),
        target: Target,
        clips: Option<&[Rect]>,
        pass_index: u64,
    ) -> Option<Rect> {
        let Target {
            layer,
            index,
            position,
            mode,
        } = target;
        let written = match widget.render() {
            Some(bitmap) => {
                match clips {
                    None => display.write_region(position, bitmap, mode),
                    Some(clips) => {
                        for clip in clips {
                            let local = Rect::new(clip.origin - position, clip.size);
                            display.write_region(clip.origin, &bitmap.region(local), mode);
                        }
                    }
                }
                Some(Rect::new(position, bitmap.size()))
            }
            None => {
                self.diagnose(pass_index, Diagnostic::MissingBitmap { layer, index });
                None
            }
        };
        if let Some(reported) = widget.take_diagnostic() {
            self.diagnose(
                pass_index,
                Diagnostic::Widget {
                    layer,
                    index,
                    message: reported.message,
                },
            );
        }
        if written.is_some() && widget.updated() {
            self.diagnose(pass_index, Diagnostic::DirtyAfterRender { layer, index });
        }
        #[cfg(feature = "trace-rich")]
        if let Some(rect) = written {
            self.emit(|sink, _| {
                sink.on_widget_composited(&WidgetCompositedEvent {
                    pass_index,
                    layer,
                    index,
                    rect,
                });
            });
        }
        written
    }

    fn is_active(&self, screen: &Arc<Mutex<Screen>>) -> bool {
        lock(&self.active)
            .as_ref()
            .is_some_and(|active| Arc::ptr_eq(active, screen))
    }

    fn diagnose(&self, pass_index: u64, diagnostic: Diagnostic) {
        bump(&self.counters.diagnostics, 1);
        self.emit(|sink, now| {
            sink.on_diagnostic(&DiagnosticEvent {
                pass_index,
                diagnostic,
                timestamp_us: now,
            });
        });
    }

    fn emit(&self, f: impl FnOnce(&mut dyn TraceSink, u64)) {
        let now = u64::try_from(self.epoch.elapsed().as_micros()).unwrap_or(u64::MAX);
        let mut sink = lock(&self.sink);
        f(&mut **sink, now);
    }
}

/// Where and how a widget's bitmap is written.
#[derive(Clone, Copy)]
struct Target {
    layer: Layer,
    index: u32,
    position: Point,
    mode: BlendMode,
}

fn prepare_overlay_item(object: &Object) -> OverlayItem {
    let mut widget = lock(&*object.widget);
    widget.update();
    OverlayItem {
        rect: Rect::new(object.position, widget.size()),
        dirty: widget.updated(),
    }
}

/// Returns the widgets an event should be delivered to, in registration
/// order.
fn hit_test(objects: &[Object], event: Event) -> Vec<SharedWidget> {
    objects
        .iter()
        .filter(|object| {
            let widget = lock(&*object.widget);
            if widget.hidden() || widget.disabled() {
                return false;
            }
            match event.kind {
                EventKind::Tap => {
                    widget.hooks_all_events()
                        || Rect::new(object.position, widget.size()).contains(event.position)
                }
                EventKind::Release => true,
            }
        })
        .map(|object| Arc::clone(&object.widget))
        .collect()
}

/// Delivers one event to one widget, then runs any action it queued.
fn deliver(widget: &SharedWidget, event: Event) {
    let action = {
        let mut widget = lock(&**widget);
        match event.kind {
            EventKind::Tap => widget.tap(event.position),
            EventKind::Release => widget.release(event.position),
        }
        widget.take_action()
    };
    if let Some(action) = action {
        action();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;
    use crate::bitmap::Bitmap;
    use crate::color::Color;
    use crate::input::ChannelInput;
    use crate::testing::{Probe, RecordingSink, entries, log};
    use crate::widget::shared;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);
    const GREY: Color = Color::rgb(50, 50, 50);

    fn compositor(width: u32, height: u32) -> Compositor<Bitmap> {
        Compositor::with_config(
            Bitmap::new(Size::new(width, height)),
            None,
            CompositorConfig::serialized(),
        )
    }

    fn screen(width: u32, height: u32) -> Arc<Mutex<Screen>> {
        Arc::new(Mutex::new(Screen::new(Size::new(width, height))))
    }

    fn recording(compositor: &Compositor<Bitmap>) -> RecordingSink {
        let sink = RecordingSink::default();
        compositor.set_trace_sink(Box::new(sink.clone()));
        sink
    }

    #[test]
    #[should_panic(expected = "non-zero size")]
    fn zero_sized_display_panics() {
        let _ = compositor(0, 10);
    }

    #[test]
    fn no_active_screen_is_a_noop() {
        let compositor = compositor(4, 4);
        let sink = recording(&compositor);
        compositor.render();
        compositor.dispatch(Event::tap(Point::new(1, 1)));
        assert_eq!(compositor.stats(), CompositorStats::default());
        assert!(lock(&sink.events).begins.is_empty());
        assert_eq!(*compositor.display(), Bitmap::new(Size::new(4, 4)));
    }

    #[test]
    fn first_pass_refills_and_paints_everything() {
        let compositor = compositor(8, 8);
        let screen = screen(8, 8);
        let probe = shared(Probe::colored(Size::new(2, 2), RED));
        {
            let mut s = lock(&screen);
            s.set_background(GREY);
            s.add_widget(3, 3, probe.clone());
        }
        compositor.set_screen(screen.clone());
        compositor.render();

        let display = compositor.display();
        assert_eq!(display.pixel(0, 0), Some(GREY));
        assert_eq!(display.pixel(3, 3), Some(RED));
        assert_eq!(display.pixel(4, 4), Some(RED));
        assert_eq!(display.pixel(5, 5), Some(GREY));
        drop(display);
        assert!(!lock(&screen).needs_refill());
        assert!(!lock(&probe).dirty, "dirty flag is reset after compositing");
    }

    #[test]
    fn second_pass_without_changes_writes_nothing() {
        let compositor = compositor(8, 8);
        let screen = screen(8, 8);
        let probe = shared(Probe::colored(Size::new(2, 2), RED));
        lock(&screen).set_background(GREY);
        lock(&screen).add_widget(0, 0, probe.clone());
        compositor.set_screen(screen);

        compositor.render();
        let first = compositor.display().clone();
        let renders = lock(&probe).renders;

        // Scribble on the display: an idle pass must not touch it.
        compositor.display().set_pixel(7, 7, BLUE);
        compositor.render();

        assert_eq!(lock(&probe).renders, renders);
        assert_eq!(compositor.display().pixel(7, 7), Some(BLUE));
        assert_eq!(compositor.display().pixel(0, 0), first.pixel(0, 0));
        let stats = compositor.stats();
        assert_eq!(stats.passes, 2);
        assert_eq!(stats.composited, 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn only_dirty_widgets_are_repainted() {
        let compositor = compositor(10, 2);
        let screen = screen(10, 2);
        let a = shared(Probe::colored(Size::new(2, 2), RED));
        let b = shared(Probe::colored(Size::new(2, 2), RED));
        lock(&screen).add_widget(0, 0, a.clone());
        lock(&screen).add_widget(5, 0, b.clone());
        compositor.set_screen(screen);
        compositor.render();

        {
            let mut b = lock(&b);
            b.color = BLUE;
            b.dirty = true;
        }
        compositor.render();

        assert_eq!(lock(&a).renders, 1);
        assert_eq!(lock(&b).renders, 2);
        assert_eq!(compositor.display().pixel(5, 0), Some(BLUE));
        assert_eq!(lock(&a).updates, 2, "update runs every pass");
    }

    #[test]
    fn tap_reaches_only_widgets_under_the_point() {
        let compositor = compositor(100, 100);
        let screen = screen(100, 100);
        let inside = shared(Probe::new(Size::new(50, 50)));
        let outside = shared(Probe::new(Size::new(50, 50)));
        lock(&screen).add_widget(10, 10, inside.clone());
        lock(&screen).add_widget(70, 70, outside.clone());
        compositor.set_screen(screen);

        compositor.dispatch(Event::tap(Point::new(20, 20)));
        assert_eq!(lock(&inside).taps, vec![Point::new(20, 20)]);
        assert!(lock(&outside).taps.is_empty());

        // Rectangles are half-open.
        compositor.dispatch(Event::tap(Point::new(60, 60)));
        assert_eq!(lock(&inside).taps.len(), 1);
    }

    #[test]
    fn tap_continues_over_every_match() {
        let compositor = compositor(20, 20);
        let screen = screen(20, 20);
        let below = shared(Probe::new(Size::new(10, 10)));
        let above = shared(Probe::new(Size::new(10, 10)));
        lock(&screen).add_widget(0, 0, below.clone());
        lock(&screen).add_widget(5, 5, above.clone());
        compositor.set_screen(screen);

        compositor.dispatch(Event::tap(Point::new(7, 7)));
        assert_eq!(lock(&below).taps.len(), 1);
        assert_eq!(lock(&above).taps.len(), 1);
    }

    #[test]
    fn hidden_disabled_and_hooking_widgets() {
        let compositor = compositor(20, 20);
        let screen = screen(20, 20);
        let hidden = shared(Probe::new(Size::new(20, 20)));
        let disabled = shared(Probe::new(Size::new(20, 20)));
        let hooker = shared(Probe::new(Size::new(0, 0)));
        lock(&hidden).hidden = true;
        lock(&disabled).disabled = true;
        lock(&hooker).hooks_all = true;
        lock(&screen).add_widget(0, 0, hidden.clone());
        lock(&screen).add_widget(0, 0, disabled.clone());
        lock(&screen).add_widget(0, 0, hooker.clone());
        compositor.set_screen(screen);

        compositor.dispatch(Event::tap(Point::new(5, 5)));
        compositor.dispatch(Event::release(Point::new(5, 5)));
        assert!(lock(&hidden).taps.is_empty());
        assert!(lock(&hidden).releases.is_empty());
        assert!(lock(&disabled).taps.is_empty());
        assert_eq!(lock(&hooker).taps, vec![Point::new(5, 5)]);
    }

    #[test]
    fn release_is_broadcast() {
        let compositor = compositor(100, 100);
        let screen = screen(100, 100);
        let near = shared(Probe::new(Size::new(10, 10)));
        let far = shared(Probe::new(Size::new(10, 10)));
        lock(&screen).add_widget(0, 0, near.clone());
        lock(&screen).add_widget(80, 80, far.clone());
        compositor.set_screen(screen);

        compositor.dispatch(Event::release(Point::new(50, 50)));
        assert_eq!(lock(&near).releases, vec![Point::new(50, 50)]);
        assert_eq!(lock(&far).releases, vec![Point::new(50, 50)]);
    }

    #[test]
    fn tap_hook_sees_raw_position_and_dispatch_renders() {
        let compositor = compositor(10, 10);
        let screen = screen(10, 10);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let hook_seen = Arc::clone(&seen);
        lock(&screen).set_tap_hook(move |p| lock(&hook_seen).push(p));
        compositor.set_screen(screen);

        compositor.dispatch(Event::tap(Point::new(9, 9)));
        compositor.dispatch(Event::release(Point::new(9, 9)));
        assert_eq!(*lock(&seen), vec![Point::new(9, 9)]);
        assert_eq!(compositor.stats().passes, 2);
    }

    #[test]
    fn concurrent_dispatch_delivers_to_all() {
        let compositor = Compositor::new(Bitmap::new(Size::new(10, 10)), None);
        let screen = screen(10, 10);
        let probes: Vec<_> = (0..4)
            .map(|_| shared(Probe::new(Size::new(10, 10))))
            .collect();
        for probe in &probes {
            lock(&screen).add_widget(0, 0, probe.clone());
        }
        compositor.set_screen(screen);
        compositor.dispatch(Event::release(Point::new(1, 1)));
        for probe in &probes {
            assert_eq!(lock(probe).releases.len(), 1);
        }
        assert_eq!(compositor.stats().deliveries, 4);
    }

    #[test]
    fn missing_bitmap_is_reported_and_skipped() {
        let compositor = compositor(4, 4);
        let sink = recording(&compositor);
        let screen = screen(4, 4);
        let broken = shared(Probe::colored(Size::new(2, 2), RED));
        lock(&broken).fail_render = true;
        lock(&screen).add_widget(0, 0, broken);
        compositor.set_screen(screen);
        compositor.render();

        let events = lock(&sink.events);
        assert_eq!(events.diagnostics.len(), 1);
        assert_eq!(
            events.diagnostics[0].diagnostic,
            Diagnostic::MissingBitmap {
                layer: Layer::Screen,
                index: 0
            }
        );
        assert_eq!(events.ends[0].composited, 0);
        drop(events);
        assert_eq!(compositor.display().pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn stubborn_and_chatty_widgets_are_reported() {
        let compositor = compositor(4, 4);
        let sink = recording(&compositor);
        let screen = screen(4, 4);
        let stubborn = shared(Probe::new(Size::new(1, 1)));
        lock(&stubborn).stay_dirty = true;
        lock(&stubborn).diagnostic = Some("no states");
        lock(&screen).add_widget(0, 0, stubborn);
        compositor.set_screen(screen);
        compositor.render();

        let kinds: Vec<_> = lock(&sink.events)
            .diagnostics
            .iter()
            .map(|d| d.diagnostic.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                Diagnostic::Widget {
                    layer: Layer::Screen,
                    index: 0,
                    message: "no states".into(),
                },
                Diagnostic::DirtyAfterRender {
                    layer: Layer::Screen,
                    index: 0
                },
            ]
        );
        assert_eq!(compositor.stats().diagnostics, 2);
    }

    #[test]
    fn hidden_widget_paints_its_swatch() {
        let compositor = compositor(4, 4);
        let screen = screen(4, 4);
        let probe = shared(Probe::colored(Size::new(2, 2), RED));
        lock(&screen).add_widget(0, 0, probe.clone());
        compositor.set_screen(screen);
        compositor.render();
        assert_eq!(compositor.display().pixel(0, 0), Some(RED));

        lock(&probe).hide();
        compositor.render();
        assert_eq!(compositor.display().pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn switching_screens_refills() {
        let compositor = compositor(4, 4);
        let sink = recording(&compositor);
        let a = screen(4, 4);
        let b = screen(4, 4);
        lock(&a).set_background(RED);
        lock(&b).set_background(BLUE);

        compositor.set_screen(a.clone());
        compositor.render();
        compositor.set_screen(b.clone());
        assert!(Arc::ptr_eq(&compositor.active_screen().unwrap(), &b));
        compositor.render();
        assert_eq!(compositor.display().pixel(2, 2), Some(BLUE));

        compositor.set_screen(b.clone());
        assert!(lock(&b).needs_refill(), "same screen still refills");
        let events = lock(&sink.events);
        assert_eq!(events.switches.len(), 3);
        assert!(events.switches[2].same_screen);
    }

    #[test]
    fn activation_callback_runs_once() {
        let compositor = compositor(4, 4);
        let a = screen(4, 4);
        let b = screen(4, 4);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        lock(&a).set_on_activate(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        compositor.set_screen(a.clone());
        compositor.set_screen(b);
        compositor.set_screen(a);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn screen_switch_waits_for_running_pass() {
        let compositor = Arc::new(compositor(4, 4));
        let events = log();
        let a = screen(4, 4);
        let slow = shared(Probe::logging("slow", Size::new(1, 1), &events));
        lock(&slow).render_delay = Some(Duration::from_millis(100));
        lock(&a).add_widget(0, 0, slow);
        compositor.set_screen(a);

        let b = screen(4, 4);
        let switch_log = Arc::clone(&events);
        lock(&b).set_on_activate(move || lock(&switch_log).push("switched".into()));

        let renderer = {
            let compositor = Arc::clone(&compositor);
            thread::spawn(move || compositor.render())
        };
        // Let the pass get going before switching.
        while !entries(&events).iter().any(|e| e == "slow:render-start") {
            thread::yield_now();
        }
        compositor.set_screen(b);
        renderer.join().unwrap();

        assert_eq!(
            entries(&events),
            vec!["slow:render-start", "slow:render-end", "switched"]
        );
    }

    #[test]
    fn swapped_out_screen_is_not_active() {
        let compositor = compositor(4, 4);
        let a = screen(4, 4);
        let b = screen(4, 4);
        compositor.set_screen(a.clone());
        compositor.set_screen(b);
        // Simulates a pass that resolved `a` just before the switch.
        assert!(!compositor.is_active(&a));
    }

    #[test]
    fn click_action_may_switch_screens() {
        let compositor = Arc::new(compositor(10, 10));
        let a = screen(10, 10);
        let b = screen(10, 10);
        let button = shared(Probe::new(Size::new(10, 10)));
        {
            let compositor = Arc::clone(&compositor);
            let b = Arc::clone(&b);
            lock(&button).on_release = Some(Arc::new(move || compositor.set_screen(Arc::clone(&b))));
        }
        lock(&a).add_widget(0, 0, button);
        compositor.set_screen(a);

        compositor.dispatch(Event::release(Point::new(1, 1)));
        assert!(Arc::ptr_eq(&compositor.active_screen().unwrap(), &b));
    }

    #[test]
    fn overlay_is_composited_last() {
        let compositor = compositor(8, 8);
        let screen = screen(8, 8);
        let overlay = Arc::new(Mutex::new(Overlay::new(Size::new(8, 8))));
        let under = shared(Probe::colored(Size::new(4, 4), RED));
        let over = shared(Probe::colored(Size::new(2, 2), BLUE));
        lock(&screen).add_widget(0, 0, under.clone());
        lock(&overlay).add_widget(1, 1, over.clone());
        compositor.set_screen(screen);
        compositor.set_overlay(Some(overlay));
        compositor.render();
        assert_eq!(compositor.display().pixel(1, 1), Some(BLUE));
        assert_eq!(compositor.display().pixel(0, 0), Some(RED));

        // Repainting the widget underneath restores the overlay on top.
        lock(&under).dirty = true;
        compositor.render();
        assert_eq!(compositor.display().pixel(1, 1), Some(BLUE));
        assert_eq!(lock(&over).renders, 2);
    }

    #[test]
    fn clean_overlay_over_clean_pixels_is_left_alone() {
        let compositor = compositor(8, 8);
        let screen = screen(8, 8);
        let overlay = Arc::new(Mutex::new(Overlay::new(Size::new(8, 8))));
        let under = shared(Probe::colored(Size::new(2, 2), RED));
        let over = shared(Probe::colored(Size::new(2, 2), BLUE));
        lock(&screen).add_widget(0, 0, under.clone());
        lock(&overlay).add_widget(6, 6, over.clone());
        compositor.set_screen(screen);
        compositor.set_overlay(Some(overlay));
        compositor.render();

        lock(&under).dirty = true;
        compositor.render();
        assert_eq!(lock(&over).renders, 1);
        assert_eq!(compositor.stats().overlay_composited, 1);
    }

    #[test]
    fn translucent_overlay_reblends_only_repainted_pixels() {
        let compositor = compositor(8, 8);
        let screen = screen(8, 8);
        let overlay = Arc::new(Mutex::new(Overlay::new(Size::new(8, 8))));
        let under = shared(Probe::colored(Size::new(2, 2), RED));
        let glass = shared(Probe::colored(Size::new(8, 8), Color::rgba(0, 0, 255, 128)));
        lock(&screen).set_background(GREY);
        lock(&screen).add_widget(0, 0, under.clone());
        lock(&overlay).add_widget(0, 0, glass.clone());
        compositor.set_screen(screen);
        compositor.set_overlay(Some(overlay));
        compositor.render();
        let over_red = compositor.display().pixel(1, 1);
        let over_grey = compositor.display().pixel(6, 6);
        assert_eq!(over_grey, Some(Color::rgba(0, 0, 255, 128).over(GREY)));

        lock(&under).dirty = true;
        compositor.render();
        assert_eq!(lock(&glass).renders, 2, "glass sits over repainted pixels");
        assert_eq!(compositor.display().pixel(1, 1), over_red, "blended once over red");
        assert_eq!(
            compositor.display().pixel(6, 6),
            over_grey,
            "untouched pixels keep one blend"
        );
    }

    #[test]
    fn changed_overlay_exposes_screen_beneath() {
        let compositor = compositor(8, 8);
        let screen = screen(8, 8);
        let overlay = Arc::new(Mutex::new(Overlay::new(Size::new(8, 8))));
        let under = shared(Probe::colored(Size::new(4, 4), RED));
        let over = shared(Probe::colored(Size::new(2, 2), Color::rgba(0, 0, 255, 128)));
        lock(&screen).set_background(GREY);
        lock(&screen).add_widget(0, 0, under.clone());
        lock(&overlay).add_widget(3, 3, over.clone());
        compositor.set_screen(screen);
        compositor.set_overlay(Some(overlay));
        compositor.render();
        let blended = compositor.display().pixel(3, 3);

        lock(&over).dirty = true;
        compositor.render();
        assert_eq!(compositor.display().pixel(3, 3), blended, "no double blend");
        assert_eq!(lock(&under).renders, 2);
    }

    #[test]
    fn input_loop_dispatches_until_closed() {
        let (tx, input) = ChannelInput::pair();
        let compositor = Arc::new(Compositor::with_config(
            Bitmap::new(Size::new(10, 10)),
            Some(Box::new(input)),
            CompositorConfig::serialized(),
        ));
        let screen = screen(10, 10);
        let probe = shared(Probe::new(Size::new(10, 10)));
        lock(&screen).add_widget(0, 0, probe.clone());
        compositor.set_screen(screen);

        let handle = compositor.start_input_loop().unwrap();
        assert!(compositor.start_input_loop().is_none(), "only one loop");
        tx.send(Event::tap(Point::new(1, 1))).unwrap();
        drop(tx);
        handle.join().unwrap();

        // Dispatch threads are detached; wait for the delivery to land.
        let deadline = Instant::now() + Duration::from_secs(5);
        while lock(&probe).taps.is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(lock(&probe).taps, vec![Point::new(1, 1)]);
    }

    #[test]
    fn input_loop_without_device_is_none() {
        let compositor = Arc::new(compositor(2, 2));
        assert!(compositor.start_input_loop().is_none());
    }
}
