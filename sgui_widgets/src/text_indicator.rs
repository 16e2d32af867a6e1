// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A plate that switches between prepared captions.

use std::fmt;

use sgui_core::{Bitmap, Color, Point, Size, Widget, WidgetDiagnostic};

use crate::face::{Caption, Plate, compose};

/// Polled once per render pass for the state to show.
pub type StateSource = Box<dyn FnMut() -> usize + Send>;

/// Shape shared by every state of a [`TextIndicator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextIndicatorParam {
    /// Widget size. Zero dimensions are raised to one.
    pub size: Size,
    /// Colour behind the plate, and the hidden swatch.
    pub background: Color,
    /// Plate corner radius.
    pub corner_radius: f64,
    /// Outline width.
    pub stroke_width: f64,
}

/// A multi-state text indicator, e.g. "RUN" / "STOP" / "FAULT".
pub struct TextIndicator {
    param: TextIndicatorParam,
    source: Option<StateSource>,
    states: Vec<Bitmap>,
    current: usize,
    hidden: bool,
    disabled: bool,
    dirty: bool,
    swatch: Bitmap,
    diagnostic: Option<WidgetDiagnostic>,
}

impl fmt::Debug for TextIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextIndicator")
            .field("param", &self.param)
            .field("states", &self.states.len())
            .field("current", &self.current)
            .field("hidden", &self.hidden)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl TextIndicator {
    /// Creates an indicator with no states, optionally driven by `source`.
    #[must_use]
    pub fn new(mut param: TextIndicatorParam, source: Option<StateSource>) -> Self {
        param.size = param.size.at_least_one();
        Self {
            param,
            source,
            states: Vec::new(),
            current: 0,
            hidden: false,
            disabled: false,
            dirty: true,
            swatch: Bitmap::filled(param.size, param.background),
            diagnostic: None,
        }
    }

    /// Appends a state: `text` centred on a plate of `fill`.
    pub fn add_state(
        &mut self,
        text: &str,
        text_size: f64,
        text_color: Option<Color>,
        fill: Option<Color>,
        stroke: Option<Color>,
    ) {
        let p = &self.param;
        self.states.push(compose(
            p.size,
            p.background,
            &Plate {
                fill,
                corner_radius: p.corner_radius,
                stroke_width: p.stroke_width,
                stroke,
            },
            &Caption {
                text: text.to_owned(),
                size: text_size,
                color: text_color,
            },
        ));
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

    /// Stops the indicator from receiving input.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Lets the indicator receive input again.
    pub fn enable(&mut self) {
        self.disabled = false;
    }
}

impl Widget for TextIndicator {
    fn render(&mut self) -> Option<&Bitmap> {
        if self.states.is_empty() {
            self.add_state("NO STATE", 10.0, Some(Color::WHITE), Some(Color::BLACK), None);
            self.diagnostic = Some(WidgetDiagnostic::new(
                "text indicator has no states; added a placeholder",
            ));
        }
        self.dirty = false;
        if self.hidden {
            return Some(&self.swatch);
        }
        self.states.get(self.current)
    }

    fn size(&self) -> Size {
        self.param.size
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
        self.disabled
    }

    fn update(&mut self) {
        if let Some(source) = &mut self.source {
            let state = source();
            self.set_state(state);
        }
    }

    fn take_diagnostic(&mut self) -> Option<WidgetDiagnostic> {
        self.diagnostic.take()
    }
}
