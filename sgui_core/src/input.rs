// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input device contract.
//!
//! A device yields events in arrival order. The compositor's input loop
//! pulls from it on a dedicated thread and hands each event to its own
//! short-lived dispatch thread.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::event::Event;

/// A source of input events.
pub trait InputDevice: Send {
    /// Blocks until the next event is available.
    ///
    /// Returns `None` once the device is closed; the input loop then exits.
    fn next_event(&mut self) -> Option<Event>;
}

/// An [`InputDevice`] fed through an in-process channel.
///
/// Useful for tests, simulators, and for bridging a touch driver that runs
/// its own reader thread.
#[derive(Debug)]
pub struct ChannelInput {
    events: Receiver<Event>,
}

impl ChannelInput {
    /// Wraps an existing receiver.
    #[must_use]
    pub fn new(events: Receiver<Event>) -> Self {
        Self { events }
    }

    /// Creates a connected sender and device.
    ///
    /// Dropping every sender closes the device.
    #[must_use]
    pub fn pair() -> (Sender<Event>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::new(rx))
    }
}

impl InputDevice for ChannelInput {
    fn next_event(&mut self) -> Option<Event> {
        self.events.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn channel_yields_in_order_then_closes() {
        let (tx, mut input) = ChannelInput::pair();
        tx.send(Event::tap(Point::new(1, 1))).unwrap();
        tx.send(Event::release(Point::new(2, 2))).unwrap();
        drop(tx);

        assert_eq!(input.next_event(), Some(Event::tap(Point::new(1, 1))));
        assert_eq!(input.next_event(), Some(Event::release(Point::new(2, 2))));
        assert_eq!(input.next_event(), None);
    }
}
