// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A push button with text, released and pressed looks, and a click handler.
//!
//! A tap presses the button; the next release un-presses it and queues the
//! click handler, which the compositor runs once the button is unlocked.
//! Releases without a prior tap do nothing, so the broadcast release that
//! every widget receives only clicks the button that was actually pressed.

use std::fmt;
use std::sync::Arc;

use sgui_core::{Action, Bitmap, Color, Point, Size, Widget};

use crate::error::WidgetError;
use crate::face::{Caption, Plate, compose};
use crate::theme::Theme;
use crate::{ClickHandler, ParamSource};

/// Everything that determines a button's look and behaviour.
#[derive(Clone)]
pub struct ButtonParam {
    /// Widget size.
    pub size: Size,
    /// Called once per completed tap-release.
    pub on_click: Option<ClickHandler>,
    /// Caption.
    pub text: String,
    /// Caption pixel height.
    pub text_size: f64,
    /// Caption colour; white when `None`.
    pub text_color: Option<Color>,
    /// Plate fill when released.
    pub release_fill: Color,
    /// Plate fill while pressed.
    pub press_fill: Color,
    /// Colour behind the rounded corners, and the hidden swatch.
    pub background: Color,
    /// Plate corner radius.
    pub corner_radius: f64,
    /// Outline width.
    pub stroke_width: f64,
    /// Outline colour; no outline when `None`.
    pub stroke: Option<Color>,
    /// Whether the button starts hidden.
    pub hidden: bool,
}

impl fmt::Debug for ButtonParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonParam")
            .field("size", &self.size)
            .field("text", &self.text)
            .field("text_size", &self.text_size)
            .field("release_fill", &self.release_fill)
            .field("press_fill", &self.press_fill)
            .field("hidden", &self.hidden)
            .field("on_click", &self.on_click.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for ButtonParam {
    fn default() -> Self {
        Self::themed(&Theme::default(), Size::default(), "")
    }
}

impl ButtonParam {
    /// Builds parameters from a theme.
    #[must_use]
    pub fn themed(theme: &Theme, size: Size, text: &str) -> Self {
        Self {
            size,
            on_click: None,
            text: text.to_owned(),
            text_size: 20.0,
            text_color: Some(theme.text),
            release_fill: theme.main,
            press_fill: theme.second,
            background: theme.background,
            corner_radius: theme.corner_radius,
            stroke_width: theme.stroke_width,
            stroke: Some(theme.stroke),
            hidden: false,
        }
    }

    /// Sets the click handler.
    #[must_use]
    pub fn on_click(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(handler));
        self
    }
}

/// A push button.
pub struct Button {
    param: ButtonParam,
    source: Option<ParamSource<ButtonParam>>,
    pressed: bool,
    disabled: bool,
    dirty: bool,
    stale: bool,
    released_face: Bitmap,
    pressed_face: Bitmap,
    swatch: Bitmap,
    pending: Option<Action>,
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("param", &self.param)
            .field("pressed", &self.pressed)
            .field("disabled", &self.disabled)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl Button {
    /// Creates a button from initial parameters, a parameter source polled
    /// on every render pass, or both.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NoParameters`] if both are `None`.
    pub fn new(
        param: Option<ButtonParam>,
        source: Option<ParamSource<ButtonParam>>,
    ) -> Result<Self, WidgetError> {
        if param.is_none() && source.is_none() {
            return Err(WidgetError::NoParameters { widget: "button" });
        }
        let mut button = Self::with_param(param.unwrap_or_default());
        button.source = source;
        Ok(button)
    }

    /// Creates a button from fixed parameters.
    #[must_use]
    pub fn with_param(param: ButtonParam) -> Self {
        Self {
            param,
            source: None,
            pressed: false,
            disabled: false,
            dirty: true,
            stale: true,
            released_face: Bitmap::new(Size::default()),
            pressed_face: Bitmap::new(Size::default()),
            swatch: Bitmap::new(Size::default()),
            pending: None,
        }
    }

    /// Returns the current parameters.
    #[must_use]
    pub fn param(&self) -> &ButtonParam {
        &self.param
    }

    /// Returns `true` between a tap and the following release.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Applies a full parameter set, repainting only if something visible
    /// changed.
    pub fn set_param(&mut self, param: ButtonParam) {
        self.param.on_click = param.on_click;
        self.set_size(param.size);
        self.set_background(param.background);
        self.set_text(&param.text, param.text_size, param.text_color);
        self.set_release_fill(param.release_fill);
        self.set_press_fill(param.press_fill);
        self.set_outline(param.corner_radius, param.stroke_width, param.stroke);
        if param.hidden {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Sets the widget size.
    pub fn set_size(&mut self, size: Size) {
        if self.param.size != size {
            self.param.size = size;
            self.invalidate();
        }
    }

    /// Sets the colour behind the plate.
    pub fn set_background(&mut self, color: Color) {
        if self.param.background != color {
            self.param.background = color;
            self.invalidate();
        }
    }

    /// Sets the caption.
    pub fn set_text(&mut self, text: &str, size: f64, color: Option<Color>) {
        if self.param.text != text || self.param.text_size != size || self.param.text_color != color
        {
            text.clone_into(&mut self.param.text);
            self.param.text_size = size;
            self.param.text_color = color;
            self.invalidate();
        }
    }

    /// Sets the released plate fill.
    pub fn set_release_fill(&mut self, color: Color) {
        if self.param.release_fill != color {
            self.param.release_fill = color;
            self.invalidate();
        }
    }

    /// Sets the pressed plate fill.
    pub fn set_press_fill(&mut self, color: Color) {
        if self.param.press_fill != color {
            self.param.press_fill = color;
            self.invalidate();
        }
    }

    /// Sets the corner radius and outline shared by both looks.
    pub fn set_outline(&mut self, corner_radius: f64, stroke_width: f64, stroke: Option<Color>) {
        if self.param.corner_radius != corner_radius
            || self.param.stroke_width != stroke_width
            || self.param.stroke != stroke
        {
            self.param.corner_radius = corner_radius;
            self.param.stroke_width = stroke_width;
            self.param.stroke = stroke;
            self.invalidate();
        }
    }

    /// Replaces the click handler.
    pub fn set_on_click(&mut self, handler: impl Fn() + Send + Sync + 'static) {
        self.param.on_click = Some(Arc::new(handler));
    }

    /// Stops the button from reacting to input.
    pub fn disable(&mut self) {
        self.disabled = true;
        if self.pressed {
            self.pressed = false;
            self.dirty = true;
        }
    }

    /// Lets the button react to input again.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    fn invalidate(&mut self) {
        self.stale = true;
        self.dirty = true;
    }

    fn rebuild(&mut self) {
        let p = &self.param;
        let caption = Caption {
            text: p.text.clone(),
            size: p.text_size,
            color: p.text_color,
        };
        let plate = |fill| Plate {
            fill: Some(fill),
            corner_radius: p.corner_radius,
            stroke_width: p.stroke_width,
            stroke: p.stroke,
        };
        self.released_face = compose(p.size, p.background, &plate(p.release_fill), &caption);
        self.pressed_face = compose(p.size, p.background, &plate(p.press_fill), &caption);
        self.swatch = Bitmap::filled(p.size, p.background);
        self.stale = false;
    }
}

impl Widget for Button {
    fn render(&mut self) -> Option<&Bitmap> {
        if self.stale {
            self.rebuild();
        }
        self.dirty = false;
        Some(if self.param.hidden {
            &self.swatch
        } else if self.pressed {
            &self.pressed_face
        } else {
            &self.released_face
        })
    }

    fn size(&self) -> Size {
        self.param.size
    }

    fn updated(&self) -> bool {
        self.dirty
    }

    fn tap(&mut self, _position: Point) {
        if self.pressed {
            return;
        }
        self.pressed = true;
        self.dirty = true;
    }

    fn release(&mut self, _position: Point) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        self.dirty = true;
        if let Some(handler) = &self.param.on_click {
            let handler = Arc::clone(handler);
            self.pending = Some(Box::new(move || handler()));
        }
    }

    fn hide(&mut self) {
        if !self.param.hidden {
            self.param.hidden = true;
            self.pressed = false;
            self.dirty = true;
        }
    }

    fn show(&mut self) {
        if self.param.hidden {
            self.param.hidden = false;
            self.dirty = true;
        }
    }

    fn hidden(&self) -> bool {
        self.param.hidden
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn update(&mut self) {
        if let Some(source) = &mut self.source {
            let param = source();
            self.set_param(param);
        }
    }

    fn take_action(&mut self) -> Option<Action> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn param() -> ButtonParam {
        ButtonParam::themed(&Theme::light(), Size::new(60, 30), "OK")
    }

    #[test]
    fn needs_some_parameters() {
        assert_eq!(
            Button::new(None, None).unwrap_err(),
            WidgetError::NoParameters { widget: "button" }
        );
        assert!(Button::new(None, Some(Box::new(param))).is_ok());
        assert!(Button::new(Some(param()), None).is_ok());
    }

    #[test]
    fn tap_release_clicks_once() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&clicks);
        let mut button = Button::with_param(param().on_click(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let _ = button.render();

        button.tap(Point::new(5, 5));
        assert!(button.is_pressed());
        assert!(button.updated());
        assert!(button.take_action().is_none(), "tap alone does not click");

        button.release(Point::new(5, 5));
        assert!(!button.is_pressed());
        let action = button.take_action().expect("release queues the click");
        action();
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        button.release(Point::new(5, 5));
        assert!(button.take_action().is_none(), "stray release is ignored");
    }

    #[test]
    fn pressed_face_differs() {
        let mut button = Button::with_param(param());
        let released = button.render().cloned();
        button.tap(Point::ZERO);
        let pressed = button.render().cloned();
        assert_ne!(released, pressed);
        assert_eq!(
            pressed.and_then(|b| b.pixel(30, 2)),
            Some(Theme::light().second)
        );
    }

    #[test]
    fn unchanged_setters_stay_clean() {
        let mut button = Button::with_param(param());
        let _ = button.render();
        button.set_param(param());
        button.set_text("OK", 20.0, Some(Theme::light().text));
        assert!(!button.updated());

        button.set_text("Go", 20.0, Some(Theme::light().text));
        assert!(button.updated());
    }

    #[test]
    fn hidden_button_paints_background() {
        let mut button = Button::with_param(param());
        let _ = button.render();
        button.hide();
        assert!(button.updated());
        let swatch = button.render().cloned().unwrap();
        assert!(swatch.pixels().iter().all(|&c| c == Theme::light().background));
    }

    #[test]
    fn source_is_polled_on_update() {
        let mut calls = 0;
        let source = move || {
            calls += 1;
            ButtonParam::themed(&Theme::light(), Size::new(10 * calls, 10), "x")
        };
        let mut button = Button::new(None, Some(Box::new(source))).unwrap();
        button.update();
        assert_eq!(button.size(), Size::new(10, 10));
        let _ = button.render();
        button.update();
        assert_eq!(button.size(), Size::new(20, 10));
        assert!(button.updated());
    }

    #[test]
    fn disabling_clears_press() {
        let mut button = Button::with_param(param());
        button.tap(Point::ZERO);
        let _ = button.render();
        button.disable();
        assert!(button.disabled());
        assert!(!button.is_pressed());
        assert!(button.updated(), "the released face must be repainted");
        assert_eq!(
            button.render().and_then(|b| b.pixel(30, 2)),
            Some(Theme::light().main)
        );

        button.disable();
        assert!(!button.updated(), "disabling twice changes nothing");
        button.enable();
        assert!(!button.disabled());
    }
}
