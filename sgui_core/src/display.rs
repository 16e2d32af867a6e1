// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display buffer contract.
//!
//! The compositor owns exactly one display buffer and writes to it only
//! during a render pass. It needs nothing from the target beyond its bounds
//! and the ability to write a pixel region, so physical framebuffers
//! (memory-mapped `/dev/fb0`, an SPI panel's shadow buffer) and in-memory
//! [`Bitmap`]s plug in the same way.

use crate::bitmap::Bitmap;
use crate::color::{BlendMode, Color};
use crate::geometry::{Point, Size};

/// A pixel surface the compositor can paint into.
pub trait DisplayBuffer {
    /// Returns the display bounds. Must stay constant for the lifetime of
    /// the compositor.
    fn size(&self) -> Size;

    /// Writes `bitmap` with its top-left corner at `origin`, clipped to the
    /// display bounds.
    ///
    /// Implementations that cannot read back their own pixels may treat
    /// [`BlendMode::SourceOver`] as [`BlendMode::Replace`] for opaque
    /// pixels, but must not write fully transparent source pixels in that
    /// mode.
    fn write_region(&mut self, origin: Point, bitmap: &Bitmap, mode: BlendMode);

    /// Sets the whole display to `color`.
    fn fill(&mut self, color: Color) {
        let size = self.size();
        self.write_region(Point::ZERO, &Bitmap::filled(size, color), BlendMode::Replace);
    }
}

impl DisplayBuffer for Bitmap {
    fn size(&self) -> Size {
        Self::size(self)
    }

    fn write_region(&mut self, origin: Point, bitmap: &Bitmap, mode: BlendMode) {
        self.draw(bitmap, origin, mode);
    }

    fn fill(&mut self, color: Color) {
        Self::fill(self, color);
    }
}
