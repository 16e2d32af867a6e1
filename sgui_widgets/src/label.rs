// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static text on a rounded base.

use std::fmt;

use sgui_core::{Bitmap, Color, Point, Size, Widget};

use crate::ParamSource;
use crate::error::WidgetError;
use crate::face::{Caption, Plate, compose};
use crate::theme::Theme;

/// Everything that determines a label's look.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelParam {
    /// Widget size.
    pub size: Size,
    /// Text.
    pub text: String,
    /// Text pixel height.
    pub text_size: f64,
    /// Text colour; white when `None`.
    pub text_color: Option<Color>,
    /// Base fill; no base when `None`.
    pub fill: Option<Color>,
    /// Colour behind the base, and the hidden swatch.
    pub background: Color,
    /// Base corner radius.
    pub corner_radius: f64,
    /// Outline width.
    pub stroke_width: f64,
    /// Outline colour.
    pub stroke: Option<Color>,
    /// Whether the label starts hidden.
    pub hidden: bool,
}

impl Default for LabelParam {
    fn default() -> Self {
        Self::themed(&Theme::default(), Size::default(), "")
    }
}

impl LabelParam {
    /// Builds parameters from a theme: text on a plain background.
    #[must_use]
    pub fn themed(theme: &Theme, size: Size, text: &str) -> Self {
        Self {
            size,
            text: text.to_owned(),
            text_size: 20.0,
            text_color: Some(theme.stroke),
            fill: None,
            background: theme.background,
            corner_radius: theme.corner_radius,
            stroke_width: 0.0,
            stroke: None,
            hidden: false,
        }
    }
}

/// A text label. Ignores input, and counts as disabled while hidden.
pub struct Label {
    param: LabelParam,
    source: Option<ParamSource<LabelParam>>,
    dirty: bool,
    stale: bool,
    face: Bitmap,
    swatch: Bitmap,
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("param", &self.param)
            .field("dirty", &self.dirty)
            .field("source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

impl Label {
    /// Creates a label from initial parameters, a parameter source polled on
    /// every render pass, or both.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::NoParameters`] if both are `None`.
    pub fn new(
        param: Option<LabelParam>,
        source: Option<ParamSource<LabelParam>>,
    ) -> Result<Self, WidgetError> {
        if param.is_none() && source.is_none() {
            return Err(WidgetError::NoParameters { widget: "label" });
        }
        let mut label = Self::with_param(param.unwrap_or_default());
        label.source = source;
        Ok(label)
    }

    /// Creates a label from fixed parameters.
    #[must_use]
    pub fn with_param(param: LabelParam) -> Self {
        Self {
            param,
            source: None,
            dirty: true,
            stale: true,
            face: Bitmap::new(Size::default()),
            swatch: Bitmap::new(Size::default()),
        }
    }

    /// Returns the current parameters.
    #[must_use]
    pub fn param(&self) -> &LabelParam {
        &self.param
    }

    /// Applies a full parameter set; a no-op if nothing changed.
    pub fn set_param(&mut self, param: LabelParam) {
        if self.param == param {
            return;
        }
        let looks_same = LabelParam {
            hidden: self.param.hidden,
            ..param.clone()
        } == self.param;
        self.param = param;
        if looks_same {
            self.dirty = true;
        } else {
            self.invalidate();
        }
    }

    /// Sets the text.
    pub fn set_text(&mut self, text: &str, size: f64, color: Option<Color>) {
        if self.param.text != text || self.param.text_size != size || self.param.text_color != color
        {
            text.clone_into(&mut self.param.text);
            self.param.text_size = size;
            self.param.text_color = color;
            self.invalidate();
        }
    }

    /// Sets the base fill and outline.
    pub fn set_base(
        &mut self,
        fill: Option<Color>,
        corner_radius: f64,
        stroke_width: f64,
        stroke: Option<Color>,
    ) {
        if self.param.fill != fill
            || self.param.corner_radius != corner_radius
            || self.param.stroke_width != stroke_width
            || self.param.stroke != stroke
        {
            self.param.fill = fill;
            self.param.corner_radius = corner_radius;
            self.param.stroke_width = stroke_width;
            self.param.stroke = stroke;
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.stale = true;
        self.dirty = true;
    }

    fn rebuild(&mut self) {
        let p = &self.param;
        self.face = compose(
            p.size,
            p.background,
            &Plate {
                fill: p.fill,
                corner_radius: p.corner_radius,
                stroke_width: p.stroke_width,
                stroke: p.stroke,
            },
            &Caption {
                text: p.text.clone(),
                size: p.text_size,
                color: p.text_color,
            },
        );
        self.swatch = Bitmap::filled(p.size, p.background);
        self.stale = false;
    }
}

impl Widget for Label {
    fn render(&mut self) -> Option<&Bitmap> {
        if self.stale {
            self.rebuild();
        }
        self.dirty = false;
        Some(if self.param.hidden {
            &self.swatch
        } else {
            &self.face
        })
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
        if !self.param.hidden {
            self.param.hidden = true;
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
        self.param.hidden
    }

    fn update(&mut self) {
        if let Some(source) = &mut self.source {
            let param = source();
            self.set_param(param);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(text: &str) -> LabelParam {
        LabelParam::themed(&Theme::dark(), Size::new(80, 24), text)
    }

    #[test]
    fn needs_some_parameters() {
        assert_eq!(
            Label::new(None, None).unwrap_err(),
            WidgetError::NoParameters { widget: "label" }
        );
    }

    #[test]
    fn same_param_keeps_label_clean() {
        let mut label = Label::with_param(param("Temp"));
        let _ = label.render();
        label.set_param(param("Temp"));
        assert!(!label.updated());
        label.set_param(param("Pressure"));
        assert!(label.updated());
        assert_eq!(label.param().text, "Pressure");
    }

    #[test]
    fn source_drives_the_text() {
        let mut n = 0;
        let mut label = Label::new(
            Some(param("")),
            Some(Box::new(move || {
                n += 1;
                param(&n.to_string())
            })),
        )
        .unwrap();
        label.update();
        assert_eq!(label.param().text, "1");
        label.update();
        assert_eq!(label.param().text, "2");
    }

    #[test]
    fn hidden_label_is_disabled_and_blank() {
        let mut label = Label::with_param(param("x"));
        let _ = label.render();
        label.hide();
        assert!(label.updated());
        assert!(label.disabled());
        let swatch = label.render().cloned().unwrap();
        assert!(swatch.pixels().iter().all(|&c| c == Theme::dark().background));

        label.show();
        assert!(label.updated());
        assert!(!label.disabled());
    }

    #[test]
    fn text_is_painted() {
        let mut label = Label::with_param(param("Hi"));
        let face = label.render().cloned().unwrap();
        assert!(face.pixels().contains(&Theme::dark().stroke));
    }
}
