// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A round lamp with any number of coloured states.
//!
//! States are added with [`BitIndicator::add_state`] and selected with
//! [`BitIndicator::set_state`]. Rendering an indicator that has no states
//! adds a transparent one and reports the problem as a diagnostic.

use sgui_core::{Bitmap, Color, Point, Size, Widget, WidgetDiagnostic};
use sgui_paint::{Circle, draw_circle};

/// Outline drawn around every state.
const RIM: Color = Color::rgb(34, 34, 34);

/// A circular multi-state indicator.
#[derive(Debug)]
pub struct BitIndicator {
    diameter: u32,
    background: Color,
    states: Vec<Bitmap>,
    current: usize,
    hidden: bool,
    dirty: bool,
    swatch: Bitmap,
    diagnostic: Option<WidgetDiagnostic>,
}

impl BitIndicator {
    /// Creates an indicator `diameter` pixels across, with no states yet.
    ///
    /// Discs are drawn from a whole-pixel radius, so an odd diameter is
    /// rounded up to the next even one, and the smallest lamp is 2×2.
    #[must_use]
    pub fn new(diameter: u32, background: Color) -> Self {
        let diameter = diameter.max(2).saturating_add(1) & !1;
        Self {
            diameter,
            background,
            states: Vec::new(),
            current: 0,
            hidden: false,
            dirty: true,
            swatch: Bitmap::filled(Size::new(diameter, diameter), background),
            diagnostic: None,
        }
    }

    /// Appends a state showing a disc of `color`.
    pub fn add_state(&mut self, color: Color) {
        self.states.push(draw_circle(&Circle {
            radius: self.diameter / 2,
            fill: Some(color),
            background: Some(self.background),
            stroke_width: 1.0,
            stroke: Some(RIM),
        }));
    }

    /// Selects a state, clamped to the ones that exist.
    pub fn set_state(&mut self, state: usize) {
        let state = state.min(self.states.len().saturating_sub(1));
        if self.current != state {
            self.current = state;
            self.dirty = true;
        }
    }

    /// Returns the selected state.
    #[must_use]
    pub fn state(&self) -> usize {
        self.current
    }

    /// Returns how many states have been added.
    #[must_use]
    pub fn states(&self) -> usize {
        self.states.len()
    }
}

impl Widget for BitIndicator {
    fn render(&mut self) -> Option<&Bitmap> {
        if self.states.is_empty() {
            self.add_state(Color::TRANSPARENT);
            self.diagnostic = Some(WidgetDiagnostic::new(
                "indicator has no states; added an empty one",
            ));
        }
        self.dirty = false;
        if self.hidden {
            return Some(&self.swatch);
        }
        self.states.get(self.current)
    }

    fn size(&self) -> Size {
        Size::new(self.diameter, self.diameter)
    }

    fn updated(&self) -> bool {
        self.dirty
    }

    fn tap(&mut self, _position: Point) {}

    fn release(&mut self, _position: Point) {}

    fn hide(&mut self) {
        if !self.hidden {
            self.hidden = true;
            self.dirty = true;
        }
    }

    fn show(&mut self) {
        if self.hidden {
            self.hidden = false;
            self.dirty = true;
        }
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn disabled(&self) -> bool {
        false
    }

    fn take_diagnostic(&mut self) -> Option<WidgetDiagnostic> {
        self.diagnostic.take()
    }
}
