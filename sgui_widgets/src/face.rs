// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text-on-plate composition shared by the text widgets.

use sgui_core::{Bitmap, BlendMode, Color, Size};
use sgui_paint::{RoundedRect, center_in, draw_rounded_rect, text_to_bitmap};

/// The rounded plate behind a widget's text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Plate {
    pub(crate) fill: Option<Color>,
    pub(crate) corner_radius: f64,
    pub(crate) stroke_width: f64,
    pub(crate) stroke: Option<Color>,
}

/// Text drawn centred on a plate.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Caption {
    pub(crate) text: String,
    pub(crate) size: f64,
    pub(crate) color: Option<Color>,
}

/// Paints `plate` over `background` and centres `caption` on it.
pub(crate) fn compose(size: Size, background: Color, plate: &Plate, caption: &Caption) -> Bitmap {
    let mut face = draw_rounded_rect(&RoundedRect {
        size,
        fill: plate.fill,
        background: Some(background),
        corner_radius: plate.corner_radius,
        stroke_width: plate.stroke_width,
        stroke: plate.stroke,
    });
    if !caption.text.is_empty() {
        let text = text_to_bitmap(&caption.text, caption.size, caption.color);
        face.draw(&text, center_in(size, text.size()), BlendMode::SourceOver);
    }
    face
}
