// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock widgets for `sgui_core` screens.
//!
//! Every widget here implements [`Widget`](sgui_core::Widget), caches its
//! bitmaps, and only reports itself dirty when something visible changed.
//! Widgets with many parameters take them as a `*Param` struct, either
//! fixed up front or pulled from a [`ParamSource`] on every render pass.
//!
//! ```rust,ignore
//! let theme = Theme::dark();
//! let start = shared(Button::with_param(
//!     ButtonParam::themed(&theme, Size::new(120, 48), "Start").on_click(|| println!("go")),
//! ));
//! screen.add_widget(20, 20, start);
//! ```
//!
//! Click handlers are not run inside `release`: the widget queues them and
//! the compositor runs them after unlocking it, so a handler may switch
//! screens.

pub mod button;
pub mod error;
pub mod indicator;
pub mod label;
pub mod rectangle;
pub mod tap_hooker;
pub mod text_indicator;
pub mod theme;

mod face;

use std::sync::Arc;

pub use button::{Button, ButtonParam};
pub use error::WidgetError;
pub use indicator::BitIndicator;
pub use label::{Label, LabelParam};
pub use rectangle::Rectangle;
pub use tap_hooker::{TapCallback, TapHooker};
pub use text_indicator::{StateSource, TextIndicator, TextIndicatorParam};
pub use theme::Theme;

/// Produces a widget's parameters; polled once per render pass.
pub type ParamSource<P> = Box<dyn FnMut() -> P + Send>;

/// A button's click handler.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;
