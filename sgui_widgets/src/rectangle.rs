// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A solid block of colour that ignores input.

use sgui_core::{Bitmap, Color, Point, Size, Widget};

/// A filled rectangle. Useful as a separator, a status bar or a backdrop.
#[derive(Debug)]
pub struct Rectangle {
    face: Bitmap,
    swatch: Bitmap,
    hidden: bool,
    dirty: bool,
}

impl Rectangle {
    /// Creates a rectangle of `color`; while hidden it paints `background`.
    ///
    /// Zero dimensions are raised to one.
    #[must_use]
    pub fn new(size: Size, color: Color, background: Color) -> Self {
        let size = size.at_least_one();
        Self {
            face: Bitmap::filled(size, color),
            swatch: Bitmap::filled(size, background),
            hidden: false,
            dirty: true,
        }
    }
}

impl Widget for Rectangle {
    fn render(&mut self) -> Option<&Bitmap> {
        self.dirty = false;
        Some(if self.hidden { &self.swatch } else { &self.face })
    }

    fn size(&self) -> Size {
        self.face.size()
    }

    fn updated(&self) -> bool {
        self.dirty
    }

    fn tap(&mut self, _position: Point) {}

    fn release(&mut self, _position: Point) {}

    fn hide(&mut self) {
        self.hidden = true;
        self.dirty = true;
    }

    fn show(&mut self) {
        self.hidden = false;
        self.dirty = true;
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn disabled(&self) -> bool {
        false
    }
}
