// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rasterization helpers for sgui widgets.
//!
//! Everything here is a pure function from a description to a fresh
//! [`Bitmap`](sgui_core::Bitmap): the same input always yields the same
//! pixels.
//!
//! **[`shape`]**: Anti-aliased circles and rounded rectangles with optional
//! background, fill, and stroke.
//!
//! **[`text`]**: Single-line text in monospace bitmap fonts.

pub mod shape;
pub mod text;

pub use shape::{Circle, RoundedRect, draw_circle, draw_rounded_rect};
pub use text::{measure_text, text_to_bitmap};

use sgui_core::{Point, Size};

/// Returns the offset that centres `inner` within `outer`.
///
/// Rounds towards the top-left, and goes negative when `inner` is the larger
/// of the two.
#[must_use]
pub fn center_in(outer: Size, inner: Size) -> Point {
    let half = |o: u32, i: u32| {
        let d = (i64::from(o) - i64::from(i)).div_euclid(2);
        i32::try_from(d).unwrap_or(if d < 0 { i32::MIN } else { i32::MAX })
    };
    Point::new(
        half(outer.width, inner.width),
        half(outer.height, inner.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centres_smaller_box() {
        assert_eq!(
            center_in(Size::new(100, 40), Size::new(20, 10)),
            Point::new(40, 15)
        );
    }

    #[test]
    fn odd_slack_rounds_down() {
        assert_eq!(center_in(Size::new(5, 5), Size::new(2, 2)), Point::new(1, 1));
    }

    #[test]
    fn larger_inner_goes_negative() {
        assert_eq!(
            center_in(Size::new(10, 10), Size::new(15, 10)),
            Point::new(-3, 0)
        );
    }
}
