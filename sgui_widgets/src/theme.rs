// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared colour and shape defaults.

use sgui_core::Color;

/// Colours and shape metrics shared by a set of widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Screen colour behind widgets; also what hidden widgets paint.
    pub background: Color,
    /// Primary fill, e.g. a released button.
    pub main: Color,
    /// Secondary fill, e.g. a pressed button.
    pub second: Color,
    /// Text colour.
    pub text: Color,
    /// Outline colour.
    pub stroke: Color,
    /// Outline width in pixels.
    pub stroke_width: f64,
    /// Corner radius in pixels.
    pub corner_radius: f64,
}

impl Theme {
    /// Dark text on light panels.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            background: Color::rgb(236, 236, 236),
            main: Color::rgb(70, 130, 180),
            second: Color::rgb(36, 84, 128),
            text: Color::WHITE,
            stroke: Color::rgb(34, 34, 34),
            stroke_width: 2.0,
            corner_radius: 10.0,
        }
    }

    /// Light text on dark panels.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            background: Color::rgb(24, 24, 24),
            main: Color::rgb(60, 60, 60),
            second: Color::rgb(110, 110, 110),
            text: Color::rgb(230, 230, 230),
            stroke: Color::rgb(140, 140, 140),
            stroke_width: 2.0,
            corner_radius: 10.0,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
