// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An invisible widget that sees every tap on its screen.

use std::fmt;
use std::sync::Arc;

use sgui_core::{Action, Bitmap, Point, Size, Widget};

/// Callback receiving the absolute tap position.
pub type TapCallback = Arc<dyn Fn(Point) + Send + Sync>;

/// Forwards every tap on the screen to a callback, wherever it lands.
///
/// Has no size and never needs painting. Typical uses are waking a dimmed
/// display or resetting an idle timer.
pub struct TapHooker {
    callback: TapCallback,
    disabled: bool,
    empty: Bitmap,
    pending: Option<Action>,
}

impl fmt::Debug for TapHooker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapHooker")
                        .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl TapHooker {
    /// Creates a hooker calling `callback` on each tap.
    #[must_use]
    pub fn new(callback: impl Fn(Point) + Send + Sync + 'static) -> Self {
        Self {
            callback: Arc::new(callback),
            disabled: false,
            empty: Bitmap::new(Size::default()),
            pending: None,
        }
    }

    /// Stops forwarding taps.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Resumes forwarding taps.
    pub fn enable(&mut self) {
        self.disabled = false;
    }
}

impl Widget for TapHooker {
    fn render(&mut self) -> Option<&Bitmap> {
        Some(&self.empty)
    }

    fn size(&self) -> Size {
        Size::default()
    }

    fn updated(&self) -> bool {
        false
    }

    fn tap(&mut self, position: Point) {
        let callback = Arc::clone(&self.callback);
        self.pending = Some(Box::new(move || callback(position)));
    }

    fn release(&mut self, _position: Point) {}

    fn hide(&mut self) {}

    fn show(&mut self) {}

    fn hidden(&self) -> bool {
        false
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn hooks_all_events(&self) -> bool {
        true
    }

    fn take_action(&mut self) -> Option<Action> {
        self.pending.take()
    }
}
