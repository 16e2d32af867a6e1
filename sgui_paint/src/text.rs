// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line text rendered with monospace bitmap fonts.
//!
//! Glyphs come from `embedded-graphics` mono fonts in the ISO 8859-5
//! charset, which covers ASCII and Cyrillic. The face is picked from the
//! requested pixel height; characters outside the charset render as `?`.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, OriginDimensions, Point as EgPoint, Size as EgSize};
use embedded_graphics::mono_font::iso_8859_5::{FONT_6X10, FONT_8X13, FONT_9X15, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};
use sgui_core::{Bitmap, Color, Size};

/// Returns the largest face no taller than `size`, or the smallest face.
fn font_for(size: f64) -> &'static MonoFont<'static> {
    if size <= 10.0 {
        &FONT_6X10
    } else if size <= 13.0 {
        &FONT_8X13
    } else if size <= 15.0 {
        &FONT_9X15
    } else {
        &FONT_10X20
    }
}

/// Draw target writing into a [`Bitmap`] with a fixed alpha.
struct Canvas<'a> {
    bitmap: &'a mut Bitmap,
    alpha: u8,
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> EgSize {
        let size = self.bitmap.size();
        EgSize::new(size.width, size.height)
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.bitmap.set_pixel(
                point.x,
                point.y,
                Color::rgba(color.r(), color.g(), color.b(), self.alpha),
            );
        }
        Ok(())
    }
}

/// Returns the pixel size `text` would occupy at `size`.
#[must_use]
pub fn measure_text(text: &str, size: f64) -> Size {
    let style = MonoTextStyle::new(font_for(size), Rgb888::WHITE);
    let bounds = Text::with_baseline(text, EgPoint::zero(), style, Baseline::Top).bounding_box();
    Size::new(bounds.size.width, bounds.size.height)
}

/// Renders `text` into a bitmap sized to its bounding box.
///
/// Pixels outside the glyphs are transparent. `color` defaults to white.
#[must_use]
pub fn text_to_bitmap(text: &str, size: f64, color: Option<Color>) -> Bitmap {
    let color = color.unwrap_or(Color::WHITE);
    let style = MonoTextStyle::new(font_for(size), Rgb888::new(color.r, color.g, color.b));
    let text = Text::with_baseline(text, EgPoint::zero(), style, Baseline::Top);
    let bounds = text.bounding_box();

    let mut bitmap = Bitmap::new(Size::new(bounds.size.width, bounds.size.height));
    let mut canvas = Canvas {
        bitmap: &mut bitmap,
        alpha: color.a,
    };
    let Ok(_) = text.draw(&mut canvas);
    bitmap
}
