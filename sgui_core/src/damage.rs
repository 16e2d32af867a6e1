// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage accumulated during a render pass.
//!
//! The screen pass records every rectangle it overwrote. The overlay pass
//! uses that record to decide which overlay widgets must be composited
//! again even though their own content did not change.

use crate::geometry::Rect;

/// A region of the display that was repainted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DamageRegion {
    /// Nothing was repainted.
    #[default]
    None,
    /// A list of repainted rectangles in display space.
    Rects(Vec<Rect>),
    /// The whole display was repainted.
    Full,
}

impl DamageRegion {
    /// Returns `true` if no region was repainted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Records a repainted rectangle. Empty rectangles are ignored.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        match self {
            Self::Full => {}
            Self::None => *self = Self::Rects(vec![rect]),
            Self::Rects(rects) => rects.push(rect),
        }
    }

    /// Returns `true` if `rect` overlaps any repainted area.
    #[must_use]
    pub fn intersects(&self, rect: &Rect) -> bool {
        match self {
            Self::None => false,
            Self::Full => !rect.is_empty(),
            Self::Rects(rects) => rects.iter().any(|r| r.intersects(rect)),
        }
    }

    /// Returns the repainted parts of `bounds` as disjoint rectangles.
    ///
    /// Recorded rectangles may overlap; each pixel appears in at most one of
    /// the returned pieces, so blending over every piece touches a pixel once.
    #[must_use]
    pub fn disjoint_within(&self, bounds: &Rect) -> Vec<Rect> {
        match self {
            Self::None => Vec::new(),
            Self::Full if bounds.is_empty() => Vec::new(),
            Self::Full => vec![*bounds],
            Self::Rects(rects) => {
                let mut pieces: Vec<Rect> = Vec::new();
                for rect in rects {
                    let Some(clip) = rect.intersection(bounds) else {
                        continue;
                    };
                    let mut fresh = vec![clip];
                    for taken in &pieces {
                        fresh = fresh.iter().flat_map(|f| f.subtract(taken)).collect();
                    }
                    pieces.extend(fresh);
                }
                pieces
            }
        }
    }

    /// Returns the number of recorded rectangles (`Full` counts as one).
    #[must_use]
    pub fn rect_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Full => 1,
            Self::Rects(rects) => rects.len(),
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }
}
