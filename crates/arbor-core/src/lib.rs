//! Core systems for Arbor.
//!
//! This crate provides the foundational plumbing of the Arbor model/view
//! split:
//!
//! - **Signal/Slot System**: synchronous, type-safe change notification
//! - **Logging**: `tracing` integration and filter targets
//!
//! # Signal/slot example
//!
//! ```
//! use std::sync::Arc;
//! use arbor_core::{Signal, Slot};
//!
//! // Create a signal that notifies when a value changes.
//! let value_changed: Signal<Slot<i32>> = Signal::new();
//!
//! // Connect a slot to handle the signal.
//! let conn_id = value_changed.connect(Arc::new(|value: &i32| {
//!     println!("value changed to: {value}");
//! }));
//!
//! // Emit the signal.
//! value_changed.emit(&42);
//!
//! // Disconnect when done.
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal, Slot};
