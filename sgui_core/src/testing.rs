// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-crate test doubles.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::geometry::{Point, Size};
use crate::trace::{
    DiagnosticEvent, DispatchEvent, RenderBeginEvent, RenderEndEvent, ScreenSwitchEvent, TraceSink,
};
use crate::widget::{Action, Widget, WidgetDiagnostic, lock};

/// A shared, ordered log of what happened.
pub(crate) type Log = Arc<Mutex<Vec<String>>>;

pub(crate) fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub(crate) fn entries(log: &Log) -> Vec<String> {
    lock(log).clone()
}

/// A solid-colour widget that records every call made on it.
pub(crate) struct Probe {
    pub(crate) name: &'static str,
    pub(crate) size: Size,
    pub(crate) color: Color,
    pub(crate) dirty: bool,
    pub(crate) hidden: bool,
    pub(crate) disabled: bool,
    pub(crate) hooks_all: bool,
    pub(crate) fail_render: bool,
    pub(crate) stay_dirty: bool,
    pub(crate) render_delay: Option<Duration>,
    pub(crate) diagnostic: Option<&'static str>,
    pub(crate) on_release: Option<Arc<dyn Fn() + Send + Sync>>,
    pub(crate) renders: usize,
    pub(crate) updates: usize,
    pub(crate) taps: Vec<Point>,
    pub(crate) releases: Vec<Point>,
    pub(crate) log: Option<Log>,
    pending: Option<Action>,
    bitmap: Bitmap,
}

impl Probe {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            name: "probe",
            size,
            color: Color::WHITE,
            dirty: true,
            hidden: false,
            disabled: false,
            hooks_all: false,
            fail_render: false,
            stay_dirty: false,
            render_delay: None,
            diagnostic: None,
            on_release: None,
            renders: 0,
            updates: 0,
            taps: Vec::new(),
            releases: Vec::new(),
            log: None,
            pending: None,
            bitmap: Bitmap::new(size),
        }
    }

    pub(crate) fn colored(size: Size, color: Color) -> Self {
        Self {
            color,
            ..Self::new(size)
        }
    }

    pub(crate) fn logging(name: &'static str, size: Size, log: &Log) -> Self {
        Self {
            name,
            log: Some(Arc::clone(log)),
            ..Self::new(size)
        }
    }

    fn record(&self, what: &str) {
        if let Some(log) = &self.log {
            lock(log).push(format!("{}:{what}", self.name));
        }
    }
}

impl Widget for Probe {
    fn render(&mut self) -> Option<&Bitmap> {
        self.renders += 1;
        self.record("render-start");
        if let Some(delay) = self.render_delay {
            thread::sleep(delay);
        }
        self.record("render-end");
        if self.fail_render {
            return None;
        }
        let color = if self.hidden {
            Color::TRANSPARENT
        } else {
            self.color
        };
        self.bitmap = Bitmap::filled(self.size, color);
        if !self.stay_dirty {
            self.dirty = false;
        }
        Some(&self.bitmap)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn updated(&self) -> bool {
        self.dirty
    }

    fn tap(&mut self, position: Point) {
        self.record("tap");
        self.taps.push(position);
    }

    fn release(&mut self, position: Point) {
        self.record("release");
        self.releases.push(position);
        if let Some(on_release) = &self.on_release {
            let on_release = Arc::clone(on_release);
            self.pending = Some(Box::new(move || on_release()));
        }
    }

    fn hide(&mut self) {
        self.hidden = true;
        self.dirty = true;
    }

    fn show(&mut self) {
        self.hidden = false;
        self.dirty = true;
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn hooks_all_events(&self) -> bool {
        self.hooks_all
    }

    fn take_action(&mut self) -> Option<Action> {
        self.pending.take()
    }

    fn take_diagnostic(&mut self) -> Option<WidgetDiagnostic> {
        self.diagnostic.take().map(WidgetDiagnostic::new)
    }
}

/// A trace sink that keeps every event it sees.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    pub(crate) events: Arc<Mutex<Recorded>>,
}

#[derive(Default)]
pub(crate) struct Recorded {
    pub(crate) begins: Vec<RenderBeginEvent>,
    pub(crate) ends: Vec<RenderEndEvent>,
    pub(crate) dispatches: Vec<DispatchEvent>,
    pub(crate) switches: Vec<ScreenSwitchEvent>,
    pub(crate) diagnostics: Vec<DiagnosticEvent>,
}

impl TraceSink for RecordingSink {
    fn on_render_begin(&mut self, e: &RenderBeginEvent) {
        lock(&self.events).begins.push(*e);
    }

    fn on_render_end(&mut self, e: &RenderEndEvent) {
        lock(&self.events).ends.push(*e);
    }

    fn on_dispatch(&mut self, e: &DispatchEvent) {
        lock(&self.events).dispatches.push(*e);
    }

    fn on_screen_switch(&mut self, e: &ScreenSwitchEvent) {
        lock(&self.events).switches.push(*e);
    }

    fn on_diagnostic(&mut self, e: &DiagnosticEvent) {
        lock(&self.events).diagnostics.push(e.clone());
    }
}
