// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-screen touch panel driven by a scripted tap sequence.
//!
//! The main screen holds a grid of buttons, each toggling the lamp next to
//! it, a counter fed by a state source, and a button that opens a status
//! screen. An overlay title bar sits on top of both screens. Events are fed
//! through a [`ChannelInput`] exactly as a touch driver would.
//!
//! Trace lines go to stderr. On exit the final frame is written to
//! `buttons.ppm` and a Chrome trace to `buttons-trace.json` in the current
//! directory.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, Weak};
use std::thread;
use std::time::Duration;

use sgui_core::trace::{
    DiagnosticEvent, DispatchEvent, RenderBeginEvent, RenderEndEvent, ScreenSwitchEvent, TraceSink,
};
use sgui_core::{
    Bitmap, ChannelInput, Color, Compositor, Event, Overlay, Point, Screen, Size, lock, shared,
};
use sgui_debug::chrome;
use sgui_debug::pretty::PrettyPrintSink;
use sgui_debug::recorder::RecorderSink;
use sgui_widgets::{
    BitIndicator, Button, ButtonParam, Label, LabelParam, Rectangle, TapHooker, TextIndicator,
    TextIndicatorParam, Theme, WidgetError,
};

const DISPLAY: Size = Size::new(480, 272);
const TITLE_HEIGHT: u32 = 24;
/// Time given to detached dispatch threads between scripted events.
const SETTLE: Duration = Duration::from_millis(40);

type Panel = Compositor<Bitmap>;

/// Sends every event to the console and to a recording.
struct Tee {
    pretty: PrettyPrintSink,
    recorder: Arc<Mutex<RecorderSink>>,
}

impl TraceSink for Tee {
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        self.pretty.on_render_begin(e);
        lock(&self.recorder).on_render_begin(e);
    }

    fn on_render_end(&mut self, e: &RenderEndEvent) {
        self.pretty.on_render_end(e);
        lock(&self.recorder).on_render_end(e);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        self.pretty.on_dispatch(e);
        lock(&self.recorder).on_dispatch(e);
    }

    fn on_screen_switch(&mut self, e: &ScreenSwitchEvent) {
        self.pretty.on_screen_switch(e);
        lock(&self.recorder).on_screen_switch(e);
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        self.pretty.on_diagnostic(e);
        lock(&self.recorder).on_diagnostic(e);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let theme = Theme::light();
    let (tx, input) = ChannelInput::pair();
    let panel = Arc::new(Panel::new(Bitmap::new(DISPLAY), Some(Box::new(input))));

    // -- sinks -------------------------------------------------------------
    let recorder = Arc::new(Mutex::new(RecorderSink::new()));
    panel.set_trace_sink(Box::new(Tee {
        pretty: PrettyPrintSink::stderr(),
        recorder: Arc::clone(&recorder),
    }));

    // -- screens -----------------------------------------------------------
    let status = Arc::new(Mutex::new(Screen::new(DISPLAY)));
    let main = main_screen(&theme, Arc::downgrade(&panel), Arc::clone(&status));
    build_status_screen(&theme, &status, Arc::downgrade(&panel), Arc::downgrade(&main))?;

    panel.set_overlay(Some(Arc::new(Mutex::new(title_bar(&theme)))));
    panel.set_screen(Arc::clone(&main));
    panel.render();

    // -- scripted input ----------------------------------------------------
    let Some(input_loop) = panel.start_input_loop() else {
        return Err("input loop did not start".into());
    };
    let script = [
        Point::new(60, 50),   // Button 0
        Point::new(60, 98),   // Button 3
        Point::new(220, 50),  // Button 1
        Point::new(60, 50),   // Button 0 again
        Point::new(400, 230), // Status
        Point::new(240, 150), // anywhere: counted by the tap hooker
        Point::new(400, 230), // Back
    ];
    for position in script {
        send(&tx, Event::tap(position))?;
        send(&tx, Event::release(position))?;
    }
    drop(tx);
    if input_loop.join().is_err() {
        return Err("input loop panicked".into());
    }
    thread::sleep(SETTLE);
    panel.render();

    // -- output ------------------------------------------------------------
    let stats = panel.stats();
    eprintln!(
        "passes={} composited={} skipped={} events={} deliveries={} diagnostics={}",
        stats.passes,
        stats.composited,
        stats.skipped,
        stats.events,
        stats.deliveries,
        stats.diagnostics,
    );
    write_ppm(&panel.display(), File::create("buttons.ppm")?)?;
    let mut trace = BufWriter::new(File::create("buttons-trace.json")?);
    chrome::export(lock(&recorder).as_bytes(), &mut trace)?;
    trace.flush()?;
    Ok(())
}

fn send(tx: &Sender<Event>, event: Event) -> io::Result<()> {
    tx.send(event).map_err(io::Error::other)?;
    thread::sleep(SETTLE);
    Ok(())
}

fn main_screen(
    theme: &Theme,
    panel: Weak<Panel>,
    status: Arc<Mutex<Screen>>,
) -> Arc<Mutex<Screen>> {
    let mut screen = Screen::new(DISPLAY);
    screen.set_background(theme.background);
    let toggles = Arc::new(AtomicUsize::new(0));

    for row in 0..4_u8 {
        for col in 0..3_u8 {
            let n = row * 3 + col;
            let lamp = shared(BitIndicator::new(20, theme.background));
            {
                let mut lamp = lock(&lamp);
                lamp.add_state(Color::rgb(200, 40, 40));
                lamp.add_state(Color::rgb(40, 200, 40));
            }
            let target = Arc::clone(&lamp);
            let count = Arc::clone(&toggles);
            let button = shared(Button::with_param(
                ButtonParam::themed(theme, Size::new(110, 40), &format!("Button {n}"))
                    .on_click(move || {
                        let mut lamp = lock(&target);
                        let next = 1 - lamp.state();
                        lamp.set_state(next);
                        count.fetch_add(1, Ordering::Relaxed);
                    }),
            ));
            let x = 10 + i32::from(col) * 155;
            let y = 30 + i32::from(row) * 48;
            screen.add_widget(x, y, button);
            screen.add_widget(x + 120, y + 10, lamp);
        }
    }

    let mut counter = TextIndicator::new(
        TextIndicatorParam {
            size: Size::new(140, 40),
            background: theme.background,
            corner_radius: theme.corner_radius,
            stroke_width: 1.0,
        },
        Some(Box::new(move || toggles.load(Ordering::Relaxed).min(3))),
    );
    for text in ["idle", "1 toggle", "2 toggles", "many"] {
        counter.add_state(
            text,
            15.0,
            Some(theme.stroke),
            Some(Color::WHITE),
            Some(theme.stroke),
        );
    }
    screen.add_widget(10, 222, shared(counter));

    screen.add_widget(
        330,
        222,
        shared(Button::with_param(
            ButtonParam::themed(theme, Size::new(140, 40), "Status").on_click(move || {
                if let Some(panel) = panel.upgrade() {
                    panel.set_screen(Arc::clone(&status));
                }
            }),
        )),
    );
    Arc::new(Mutex::new(screen))
}

fn build_status_screen(
    theme: &Theme,
    screen: &Mutex<Screen>,
    panel: Weak<Panel>,
    main: Weak<Mutex<Screen>>,
) -> Result<(), WidgetError> {
    let dark = Theme::dark();
    let taps = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&taps);

    let mut screen = lock(screen);
    screen.set_background(dark.background);
    screen.set_on_activate(|| eprintln!("status screen shown"));
    screen.add_widget(
        0,
        0,
        shared(TapHooker::new(move |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        })),
    );
    screen.add_widget(
        20,
        60,
        shared(Label::new(
            None,
            Some(Box::new(move || {
                LabelParam::themed(
                    &dark,
                    Size::new(300, 40),
                    &format!("taps here: {}", taps.load(Ordering::Relaxed)),
                )
            })),
        )?),
    );
    screen.add_widget(
        20,
        110,
        shared(Rectangle::new(Size::new(440, 2), dark.stroke, dark.background)),
    );
    screen.add_widget(
        330,
        222,
        shared(Button::with_param(
            ButtonParam::themed(theme, Size::new(140, 40), "Back").on_click(move || {
                if let (Some(panel), Some(main)) = (panel.upgrade(), main.upgrade()) {
                    panel.set_screen(main);
                }
            }),
        )),
    );
    Ok(())
}

fn title_bar(theme: &Theme) -> Overlay {
    let mut overlay = Overlay::new(DISPLAY);
    overlay.add_widget(
        0,
        0,
        shared(Rectangle::new(
            Size::new(DISPLAY.width, TITLE_HEIGHT),
            theme.stroke,
            theme.stroke,
        )),
    );
    overlay.add_widget(
        8,
        2,
        shared(Label::with_param(LabelParam {
            text_color: Some(Color::WHITE),
            background: theme.stroke,
            ..LabelParam::themed(theme, Size::new(200, 20), "sgui demo")
        })),
    );
    overlay
}

/// Writes a binary PPM, dropping alpha.
fn write_ppm(frame: &Bitmap, file: File) -> io::Result<()> {
    let mut out = BufWriter::new(file);
    let size = frame.size();
    write!(out, "P6\n{} {}\n255\n", size.width, size.height)?;
    for c in frame.pixels() {
        out.write_all(&[c.r, c.g, c.b])?;
    }
    out.flush()
}
