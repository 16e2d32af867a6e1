// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositor configuration.

/// How an event's deliveries are scheduled once hit-testing has picked the
/// target widgets.
///
/// Passed to the [`Compositor`](crate::Compositor) via
/// [`CompositorConfig::dispatch`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DispatchPolicy {
    /// Run each delivery on its own scoped thread and join them all before
    /// the follow-up render.
    ///
    /// Deliveries to different widgets may interleave. Deliveries to the
    /// same widget are still serialized by the widget's lock.
    #[default]
    Concurrent,
    /// Run deliveries one after another on the dispatching thread, in
    /// registration order.
    Serialized,
}

/// Configuration for the [`Compositor`](crate::Compositor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositorConfig {
    /// How deliveries are scheduled.
    pub dispatch: DispatchPolicy,
    /// Whether [`dispatch`](crate::Compositor::dispatch) runs a render pass
    /// after delivering.
    ///
    /// Turning this off leaves rendering to the caller, which is useful when
    /// feeding a batch of events before drawing a single frame.
    pub render_after_dispatch: bool,
}

impl CompositorConfig {
    /// Concurrent deliveries followed by a render. This is the default.
    #[must_use]
    pub const fn concurrent() -> Self {
        Self {
            dispatch: DispatchPolicy::Concurrent,
            render_after_dispatch: true,
        }
    }

    /// In-order deliveries on the dispatching thread followed by a render.
    ///
    /// Deterministic; suited to tests and single-core targets.
    #[must_use]
    pub const fn serialized() -> Self {
        Self {
            dispatch: DispatchPolicy::Serialized,
            render_after_dispatch: true,
        }
    }
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self::concurrent()
    }
}
