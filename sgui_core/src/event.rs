// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-style input events.

use crate::geometry::Point;

/// What happened at an event's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The pointer went down (finger touched the panel).
    Tap,
    /// The pointer went up.
    Release,
}

/// A positioned input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Event {
    /// Absolute display position.
    pub position: Point,
    /// Tap or release.
    pub kind: EventKind,
}

impl Event {
    /// Creates a tap event.
    #[inline]
    #[must_use]
    pub const fn tap(position: Point) -> Self {
        Self {
            position,
            kind: EventKind::Tap,
        }
    }

    /// Creates a release event.
    #[inline]
    #[must_use]
    pub const fn release(position: Point) -> Self {
        Self {
            position,
            kind: EventKind::Release,
        }
    }
}
