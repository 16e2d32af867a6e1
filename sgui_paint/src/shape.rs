// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filled and stroked circles and rounded rectangles.
//!
//! Shapes are described with [`kurbo`] geometry and rasterized by point
//! sampling: each pixel is sampled on a 4×4 grid and the fraction of samples
//! inside the shape becomes the paint's coverage. A stroke is the area
//! inside the outer outline but outside the outline inset by the stroke
//! width.
//!
//! Layers are painted in order: background over the whole bitmap, then the
//! fill, then the stroke. Each `None` colour skips its layer.

use kurbo::Shape;
use sgui_core::{Bitmap, Color, Size};

/// Samples per pixel along each axis.
const SUBSAMPLES: u32 = 4;

/// A circle inscribed in a `2r × 2r` bitmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Radius in pixels.
    pub radius: u32,
    /// Interior colour.
    pub fill: Option<Color>,
    /// Colour of the square behind the circle.
    pub background: Option<Color>,
    /// Stroke width in pixels, drawn inside the radius.
    pub stroke_width: f64,
    /// Outline colour.
    pub stroke: Option<Color>,
}

/// A rectangle with rounded corners filling its bitmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    /// Bitmap and rectangle size.
    pub size: Size,
    /// Interior colour.
    pub fill: Option<Color>,
    /// Colour behind the rounded corners.
    pub background: Option<Color>,
    /// Corner radius in pixels. Clamped to half the shorter side.
    pub corner_radius: f64,
    /// Stroke width in pixels, drawn inside the edge.
    pub stroke_width: f64,
    /// Outline colour.
    pub stroke: Option<Color>,
}

/// Rasterizes a circle into a `2r × 2r` bitmap.
#[must_use]
pub fn draw_circle(circle: &Circle) -> Bitmap {
    let r = f64::from(circle.radius);
    let side = circle.radius.saturating_mul(2);
    let outer = kurbo::Circle::new((r, r), r);
    let inner = kurbo::Circle::new((r, r), (r - circle.stroke_width).max(0.0));
    paint(
        Size::new(side, side),
        circle.background,
        circle.fill.map(|c| (c, &outer)),
        stroke_layer(circle.stroke, circle.stroke_width).map(|c| (c, &outer, &inner)),
    )
}

/// Rasterizes a rounded rectangle into a bitmap of its own size.
#[must_use]
pub fn draw_rounded_rect(rect: &RoundedRect) -> Bitmap {
    let width = f64::from(rect.size.width);
    let height = f64::from(rect.size.height);
    let radius = rect.corner_radius.clamp(0.0, width.min(height) / 2.0);
    let outer = kurbo::RoundedRect::new(0.0, 0.0, width, height, radius);

    let sw = rect.stroke_width.max(0.0);
    let inner = kurbo::RoundedRect::new(
        sw,
        sw,
        (width - sw).max(sw),
        (height - sw).max(sw),
        (radius - sw).max(0.0),
    );
    paint(
        rect.size,
        rect.background,
        rect.fill.map(|c| (c, &outer)),
        stroke_layer(rect.stroke, rect.stroke_width).map(|c| (c, &outer, &inner)),
    )
}

fn stroke_layer(color: Option<Color>, width: f64) -> Option<Color> {
    color.filter(|_| width > 0.0)
}

fn paint<S: Shape>(
    size: Size,
    background: Option<Color>,
    fill: Option<(Color, &S)>,
    stroke: Option<(Color, &S, &S)>,
) -> Bitmap {
    let mut bitmap = Bitmap::filled(size, background.unwrap_or(Color::TRANSPARENT));
    for y in 0..size.height {
        for x in 0..size.width {
            let (px, py) = (pixel_coord(x), pixel_coord(y));
            if let Some((color, shape)) = fill {
                let coverage = coverage(x, y, |p| shape.contains(p));
                if coverage > 0 {
                    bitmap.blend_pixel(px, py, color.with_coverage(coverage));
                }
            }
            if let Some((color, outer, inner)) = stroke {
                let coverage = coverage(x, y, |p| outer.contains(p) && !inner.contains(p));
                if coverage > 0 {
                    bitmap.blend_pixel(px, py, color.with_coverage(coverage));
                }
            }
        }
    }
    bitmap
}

/// Fraction of the pixel at `(x, y)` inside the shape, scaled to `0..=255`.
fn coverage(x: u32, y: u32, inside: impl Fn(kurbo::Point) -> bool) -> u8 {
    let step = 1.0 / f64::from(SUBSAMPLES);
    let mut hits = 0_u32;
    for sy in 0..SUBSAMPLES {
        for sx in 0..SUBSAMPLES {
            let p = kurbo::Point::new(
                f64::from(x) + (f64::from(sx) + 0.5) * step,
                f64::from(y) + (f64::from(sy) + 0.5) * step,
            );
            if inside(p) {
                hits += 1;
            }
        }
    }
    let total = SUBSAMPLES * SUBSAMPLES;
    u8::try_from((hits * 255 + total / 2) / total).unwrap_or(u8::MAX)
}

fn pixel_coord(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
