// Copyright 2026 the Sgui Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for sgui compositor
//! traces.
//!
//! This crate provides [`TraceSink`](sgui_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//!
//! A compositor owns its sink. To read a recording back afterwards, install
//! it through an `Arc<Mutex<_>>`, which forwards every event:
//!
//! ```rust,ignore
//! let recorder = Arc::new(Mutex::new(RecorderSink::new()));
//! compositor.set_trace_sink(Box::new(Arc::clone(&recorder)));
//! // ... run ...
//! chrome::export(recorder.lock().unwrap().as_bytes(), &mut file)?;
//! ```

pub mod chrome;
pub mod pretty;
pub mod recorder;
