// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RGBA colors and compositing modes.

use core::fmt;

/// An 8-bit-per-channel RGBA color with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates an opaque color.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with explicit alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with alpha scaled by `coverage` (0–255).
    ///
    /// Used by rasterizers to apply anti-aliasing coverage to a paint.
    #[must_use]
    pub fn with_coverage(self, coverage: u8) -> Self {
        let a = (u32::from(self.a) * u32::from(coverage) + 127) / 255;
        Self {
            a: clamp_u8(a),
            ..self
        }
    }

    /// Composites `self` over `dst` (Porter-Duff source-over).
    ///
    /// Exact for the opaque (`a == 255`, result is `self`) and fully
    /// transparent (`a == 0`, result is `dst`) cases.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        match self.a {
            255 => return self,
            0 => return dst,
            _ => {}
        }
        let sa = u32::from(self.a);
        let dw = (u32::from(dst.a) * (255 - sa) + 127) / 255;
        let out_a = sa + dw;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| {
            clamp_u8((u32::from(s) * sa + u32::from(d) * dw + out_a / 2) / out_a)
        };
        Self {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a: clamp_u8(out_a),
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

fn clamp_u8(v: u32) -> u8 {
    u8::try_from(v).unwrap_or(u8::MAX)
}

/// How a source bitmap is combined with the pixels beneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Opaque overwrite; the destination is not read.
    ///
    /// Used for the base screen pass, where widgets occupy non-overlapping
    /// regions.
    #[default]
    Replace,
    /// Standard source-over alpha compositing.
    ///
    /// Used for the overlay pass so that content beneath stays visible.
    SourceOver,
}
