// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer display-space geometry.
//!
//! All coordinates are in display pixels with the origin at the top-left
//! corner. Rectangles are half-open: a [`Rect`] covers
//! `[origin, origin + size)`, so a zero-sized rectangle contains nothing.

use core::fmt;
use core::ops::{Add, Sub};

/// A position on the display.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The display origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a size.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the number of pixels covered.
    #[inline]
    #[must_use]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the size with both dimensions raised to at least one pixel.
    #[inline]
    #[must_use]
    pub const fn at_least_one(self) -> Self {
        Self {
            width: if self.width == 0 { 1 } else { self.width },
            height: if self.height == 0 { 1 } else { self.height },
        }
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A half-open axis-aligned rectangle.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner (inclusive).
    pub origin: Point,
    /// Extent from the origin.
    pub size: Size,
}

impl Rect {
    /// Creates a rectangle from its origin and size.
    #[inline]
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates a rectangle at the display origin.
    #[inline]
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// Exclusive right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> i64 {
        i64::from(self.origin.x) + i64::from(self.size.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> i64 {
        i64::from(self.origin.y) + i64::from(self.size.height)
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Returns `true` if `p` lies inside `[origin, origin + size)`.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let (x, y) = (i64::from(p.x), i64::from(p.y));
        x >= i64::from(self.origin.x)
            && x < self.right()
            && y >= i64::from(self.origin.y)
            && y < self.bottom()
    }

    /// Returns the overlapping area, or `None` if the rectangles are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if i64::from(x0) >= x1 || i64::from(y0) >= y1 {
            return None;
        }
        Some(Self::new(
            Point::new(x0, y0),
            Size::new(span(i64::from(x0), x1), span(i64::from(y0), y1)),
        ))
    }

    /// Returns `true` if the rectangles share at least one pixel.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Returns the smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = self.origin.x.min(other.origin.x);
        let y0 = self.origin.y.min(other.origin.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Self::new(
            Point::new(x0, y0),
            Size::new(span(i64::from(x0), x1), span(i64::from(y0), y1)),
        )
    }

    /// Returns the parts of `self` that `other` does not cover, as at most
    /// four disjoint rectangles.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Vec<Self> {
        let Some(cut) = self.intersection(other) else {
            return if self.is_empty() { Vec::new() } else { vec![*self] };
        };
        let (x0, y0) = (i64::from(self.origin.x), i64::from(self.origin.y));
        let (x1, y1) = (self.right(), self.bottom());
        let (cx0, cy0) = (i64::from(cut.origin.x), i64::from(cut.origin.y));
        let (cx1, cy1) = (cut.right(), cut.bottom());
        [
            (x0, y0, x1, cy0),   // above
            (x0, cy1, x1, y1),   // below
            (x0, cy0, cx0, cy1), // left
            (cx1, cy0, x1, cy1), // right
        ]
        .into_iter()
        .filter(|&(l, t, r, b)| l < r && t < b)
        .map(|(l, t, r, b)| {
            Self::new(
                Point::new(coord(l), coord(t)),
                Size::new(span(l, r), span(t, b)),
            )
        })
        .collect()
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({:?} {:?})", self.origin, self.size)
    }
}

/// Length of `[start, end)` clamped into `u32`.
fn span(start: i64, end: i64) -> u32 {
    u32::try_from((end - start).max(0)).unwrap_or(u32::MAX)
}

fn coord(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}
