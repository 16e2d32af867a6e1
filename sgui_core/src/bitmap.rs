// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned RGBA pixel surfaces.
//!
//! A [`Bitmap`] is what widgets hand to the compositor and what the
//! rasterizer produces. It is also the default [`DisplayBuffer`]
//! implementation, so tests and export glue can composite straight into
//! memory.
//!
//! [`DisplayBuffer`]: crate::display::DisplayBuffer

use crate::color::{BlendMode, Color};
use crate::geometry::{Point, Rect, Size};

/// A row-major `width × height` RGBA surface.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<Color>,
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bitmap")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Creates a fully transparent bitmap.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::filled(size, Color::TRANSPARENT)
    }

    /// Creates a bitmap with every pixel set to `color`.
    #[must_use]
    pub fn filled(size: Size, color: Color) -> Self {
        Self {
            size,
            pixels: vec![color; size.area()],
        }
    }

    /// Wraps existing pixels, returning `None` if the length does not match
    /// `size`.
    #[must_use]
    pub fn from_pixels(size: Size, pixels: Vec<Color>) -> Option<Self> {
        (pixels.len() == size.area()).then_some(Self { size, pixels })
    }

    /// Returns the bitmap dimensions.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Returns the bitmap bounds anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.size)
    }

    /// Returns all pixels in row-major order.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Sets the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Blends `color` over the pixel at `(x, y)`. Out-of-bounds writes are
    /// ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Composites `src` with its top-left corner at `origin`.
    ///
    /// Parts of `src` falling outside this bitmap are clipped; negative
    /// origins are allowed.
    pub fn draw(&mut self, src: &Self, origin: Point, mode: BlendMode) {
        let Some(clip) = Rect::new(origin, src.size).intersection(&self.bounds()) else {
            return;
        };
        let width = clip.size.width as usize;
        let src_x = offset(origin.x, clip.origin.x);
        let src_y = offset(origin.y, clip.origin.y);
        let dst_x = offset(0, clip.origin.x);
        let dst_y = offset(0, clip.origin.y);

        for row in 0..clip.size.height as usize {
            let s = (src_y + row) * src.size.width as usize + src_x;
            let d = (dst_y + row) * self.size.width as usize + dst_x;
            let src_row = &src.pixels[s..s + width];
            let dst_row = &mut self.pixels[d..d + width];
            match mode {
                BlendMode::Replace => dst_row.copy_from_slice(src_row),
                BlendMode::SourceOver => {
                    for (dst, src) in dst_row.iter_mut().zip(src_row) {
                        *dst = src.over(*dst);
                    }
                }
            }
        }
    }

    /// Copies out the pixels under `rect`, clipped to this bitmap.
    ///
    /// Returns an empty bitmap when `rect` lies entirely outside.
    #[must_use]
    pub fn region(&self, rect: Rect) -> Self {
        let Some(clip) = rect.intersection(&self.bounds()) else {
            return Self::new(Size::default());
        };
        let mut out = Self::new(clip.size);
        let neg = Point::new(-clip.origin.x, -clip.origin.y);
        out.draw(self, neg, BlendMode::Replace);
        out
    }

    /// Exports the pixels as tightly packed RGBA8 bytes.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.size.width as usize && y < self.size.height as usize)
            .then(|| y * self.size.width as usize + x)
    }
}

/// Distance from `from` to `to`, where `to >= from` is guaranteed by clipping.
fn offset(from: i32, to: i32) -> usize {
    usize::try_from(i64::from(to) - i64::from(from)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn draw_replace_copies_pixels() {
        let mut dst = Bitmap::filled(Size::new(4, 4), BLUE);
        let src = Bitmap::filled(Size::new(2, 2), RED);
        dst.draw(&src, Point::new(1, 1), BlendMode::Replace);
        assert_eq!(dst.pixel(0, 0), Some(BLUE));
        assert_eq!(dst.pixel(1, 1), Some(RED));
        assert_eq!(dst.pixel(2, 2), Some(RED));
        assert_eq!(dst.pixel(3, 3), Some(BLUE));
    }

    #[test]
    fn draw_clips_negative_origin() {
        let mut dst = Bitmap::filled(Size::new(3, 3), BLUE);
        let mut src = Bitmap::filled(Size::new(2, 2), RED);
        src.set_pixel(1, 1, Color::WHITE);
        dst.draw(&src, Point::new(-1, -1), BlendMode::Replace);
        assert_eq!(dst.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(dst.pixel(1, 0), Some(BLUE));
    }

    #[test]
    fn draw_outside_is_noop() {
        let mut dst = Bitmap::filled(Size::new(3, 3), BLUE);
        let before = dst.clone();
        dst.draw(
            &Bitmap::filled(Size::new(2, 2), RED),
            Point::new(10, 10),
            BlendMode::Replace,
        );
        assert_eq!(dst, before);
    }

    #[test]
    fn replace_writes_transparent_pixels() {
        let mut dst = Bitmap::filled(Size::new(2, 2), BLUE);
        dst.draw(
            &Bitmap::new(Size::new(1, 1)),
            Point::ZERO,
            BlendMode::Replace,
        );
        assert_eq!(dst.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn source_over_preserves_destination_under_transparency() {
        let mut dst = Bitmap::filled(Size::new(2, 2), BLUE);
        let mut src = Bitmap::new(Size::new(2, 2));
        src.set_pixel(0, 0, RED);
        dst.draw(&src, Point::ZERO, BlendMode::SourceOver);
        assert_eq!(dst.pixel(0, 0), Some(RED));
        assert_eq!(dst.pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn region_copies_clipped_area() {
        let mut bmp = Bitmap::filled(Size::new(4, 4), BLUE);
        bmp.set_pixel(3, 3, RED);
        let region = bmp.region(Rect::new(Point::new(2, 2), Size::new(5, 5)));
        assert_eq!(region.size(), Size::new(2, 2));
        assert_eq!(region.pixel(1, 1), Some(RED));
        assert_eq!(region.pixel(0, 0), Some(BLUE));
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(Bitmap::from_pixels(Size::new(2, 2), vec![RED; 3]).is_none());
        assert!(Bitmap::from_pixels(Size::new(2, 2), vec![RED; 4]).is_some());
    }

    #[test]
    fn rgba8_export_is_packed() {
        let bmp = Bitmap::filled(Size::new(1, 2), Color::rgba(1, 2, 3, 4));
        assert_eq!(bmp.to_rgba8(), vec![1, 2, 3, 4, 1, 2, 3, 4]);
    }
}
