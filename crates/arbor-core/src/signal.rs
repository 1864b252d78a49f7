//! Signal/slot system for Arbor.
//!
//! This module provides a type-safe signal mechanism for change notification.
//! Signals are emitted by models when their state changes, and connected
//! slots (callbacks) are invoked in response.
//!
//! Delivery is always synchronous: every connected slot runs on the emitting
//! thread, in connection order, before `emit` returns. There is no queue and
//! no priority. Slots that need to defer work must arrange that themselves.
//!
//! # Payloads with borrowed data
//!
//! A signal is parameterised by its *slot type* `S`, a `dyn Fn(&Payload)`
//! trait object, rather than by the payload directly. This lets a single
//! registry hold slots whose payload borrows transient data — a slot type of
//! `dyn for<'a> Fn(&Event<'a>) + Send + Sync` accepts the payload at any
//! lifetime the emitter chooses, so emitted borrows cannot escape the call.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arbor_core::{Signal, Slot};
//!
//! // A signal that passes an integer argument to its slots.
//! let value_changed: Signal<Slot<i32>> = Signal::new();
//!
//! let id = value_changed.connect(Arc::new(|value: &i32| {
//!     println!("value changed to {value}");
//! }));
//!
//! value_changed.emit(&42);
//! value_changed.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// The slot type for a payload passed by shared reference.
///
/// Shorthand for the common case where the payload owns its data. Payloads
/// that borrow (carry a lifetime parameter) need an explicit higher-ranked
/// slot type instead; see the module docs.
pub type Slot<A> = dyn Fn(&A) + Send + Sync;

/// A multi-subscriber signal with synchronous delivery.
///
/// `S` is the slot trait-object type, e.g. [`Slot<i32>`] for a signal whose
/// payload is an `i32`. Slots are stored as `Arc<S>` and invoked in
/// connection order whenever [`emit`](Signal::emit) is called.
///
/// # Thread safety
///
/// `Signal` is `Send + Sync` and may be shared between threads; slots run on
/// whichever thread emits. Connecting and disconnecting are internally
/// locked.
///
/// # Re-entrancy
///
/// The slot list is snapshotted before invocation, so a slot may connect,
/// disconnect, or emit the same signal without deadlocking. Connections made
/// during an emission are first invoked by the next emission.
pub struct Signal<S: ?Sized> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Arc<S>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<S: ?Sized> Default for Signal<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> Signal<S> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later. The slot is invoked on every subsequent [`emit`](Signal::emit)
    /// until disconnected.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use arbor_core::{Signal, Slot};
    ///
    /// let signal: Signal<Slot<String>> = Signal::new();
    /// let id = signal.connect(Arc::new(|s: &String| println!("got: {s}")));
    /// signal.emit(&"hello".to_string());
    /// # signal.disconnect(id);
    /// ```
    pub fn connect(&self, slot: Arc<S>) -> ConnectionId {
        self.connections.lock().insert(slot)
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// # Safety contract
    ///
    /// The returned guard holds a raw pointer to this signal. The signal must
    /// outlive the guard; keeping both in the same struct, or the guard in a
    /// narrower scope, satisfies this.
    pub fn connect_scoped(&self, slot: Arc<S>) -> ConnectionGuard<S> {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: self as *const Signal<S>,
            id,
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Useful during batch
    /// updates to silence cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// Does nothing if the signal is blocked. The payload is passed to each
    /// slot by shared reference and never outlives the call.
    #[tracing::instrument(skip_all, target = "arbor_core::signal", level = "trace")]
    pub fn emit<A: ?Sized>(&self, args: &A)
    where
        S: Fn(&A),
    {
        if self.is_blocked() {
            tracing::trace!(target: "arbor_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slot list so a slot that re-enters this signal does
        // not contend with the registry lock.
        let slots: Vec<Arc<S>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(
            target: "arbor_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in &slots {
            (&**slot)(args);
        }
    }
}

/// A connection that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`]. Useful for RAII-style connection
/// management, ensuring slots are cleaned up when the receiver goes out of
/// scope.
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use arbor_core::{Signal, Slot};
///
/// let signal: Signal<Slot<i32>> = Signal::new();
/// let total = Arc::new(AtomicI32::new(0));
/// {
///     let total = total.clone();
///     let _guard = signal.connect_scoped(Arc::new(move |n: &i32| {
///         total.fetch_add(*n, Ordering::SeqCst);
///     }));
///     signal.emit(&42);
/// }
/// signal.emit(&43); // connection was dropped with the guard
/// assert_eq!(total.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<S: ?Sized> {
    signal: *const Signal<S>,
    id: ConnectionId,
}

impl<S: ?Sized> Drop for ConnectionGuard<S> {
    fn drop(&mut self) {
        // SAFETY: the guard's contract (documented on `connect_scoped`)
        // requires the signal to outlive the guard, so the pointer is valid
        // here.
        unsafe {
            if !self.signal.is_null() {
                let _ = (*self.signal).disconnect(self.id);
            }
        }
    }
}

// SAFETY: the raw pointer is only dereferenced in `drop`, and the guard's
// contract requires the signal (itself Send + Sync for these bounds) to be
// alive wherever the guard travels.
unsafe impl<S: ?Sized + Send + Sync> Send for ConnectionGuard<S> {}
unsafe impl<S: ?Sized + Send + Sync> Sync for ConnectionGuard<S> {}

static_assertions::assert_impl_all!(Signal<Slot<i32>>: Send, Sync, Default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_and_emit() {
        let signal: Signal<Slot<i32>> = Signal::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(Arc::new(move |&value: &i32| {
            received_clone.lock().push(value);
        }));

        signal.emit(&42);
        signal.emit(&100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn disconnect_stops_delivery() {
        let signal: Signal<Slot<i32>> = Signal::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let id = signal.connect(Arc::new(move |&value: &i32| {
            received_clone.lock().push(value);
        }));

        signal.emit(&1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(&2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn blocked_signal_is_silent() {
        let signal: Signal<Slot<i32>> = Signal::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(Arc::new(move |&value: &i32| {
            received_clone.lock().push(value);
        }));

        signal.emit(&1);
        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(&2);
        signal.set_blocked(false);
        signal.emit(&3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn multiple_connections_all_fire() {
        let signal: Signal<Slot<String>> = Signal::new();
        let count = Arc::new(Mutex::new(0));

        for _ in 0..3 {
            let count_clone = count.clone();
            signal.connect(Arc::new(move |_: &String| {
                *count_clone.lock() += 1;
            }));
        }

        assert_eq!(signal.connection_count(), 3);
        signal.emit(&"test".to_string());
        assert_eq!(*count.lock(), 3);
    }

    #[test]
    fn disconnect_all_clears_registry() {
        let signal: Signal<Slot<()>> = Signal::new();

        for _ in 0..5 {
            signal.connect(Arc::new(|_: &()| {}));
        }

        assert_eq!(signal.connection_count(), 5);
        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn scoped_connection_drops_with_guard() {
        let signal: Signal<Slot<i32>> = Signal::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let _guard = signal.connect_scoped(Arc::new(move |&value: &i32| {
                received_clone.lock().push(value);
            }));
            signal.emit(&1);
        }

        signal.emit(&2);
        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn reentrant_emission_does_not_deadlock() {
        let signal: Arc<Signal<Slot<i32>>> = Arc::new(Signal::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let inner_signal = signal.clone();
        let received_clone = received.clone();
        signal.connect(Arc::new(move |&value: &i32| {
            received_clone.lock().push(value);
            if value > 0 {
                inner_signal.emit(&(value - 1));
            }
        }));

        signal.emit(&2);
        assert_eq!(*received.lock(), vec![2, 1, 0]);
    }

    #[test]
    fn slot_may_disconnect_itself() {
        let signal: Arc<Signal<Slot<()>>> = Arc::new(Signal::new());
        let fired = Arc::new(Mutex::new(0));

        let signal_clone = signal.clone();
        let fired_clone = fired.clone();
        signal.connect(Arc::new(move |_: &()| {
            *fired_clone.lock() += 1;
            signal_clone.disconnect_all();
        }));

        signal.emit(&());
        signal.emit(&());
        assert_eq!(*fired.lock(), 1);
    }

    #[test]
    fn borrowed_payloads_accept_any_lifetime() {
        let signal: Signal<dyn for<'a> Fn(&(i32, &'a str)) + Send + Sync> = Signal::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(Arc::new(move |args| {
            received_clone.lock().push((args.0, args.1.to_string()));
        }));

        let transient = String::from("short-lived");
        signal.emit(&(7, transient.as_str()));
        drop(transient);

        assert_eq!(*received.lock(), vec![(7, "short-lived".to_string())]);
    }

    #[test]
    fn emit_from_multiple_threads() {
        let signal: Arc<Signal<Slot<i32>>> = Arc::new(Signal::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(Arc::new(move |&value: &i32| {
            received_clone.lock().push(value);
        }));

        let mut handles = vec![];
        for i in 0..10 {
            let signal_clone = signal.clone();
            handles.push(std::thread::spawn(move || {
                signal_clone.emit(&i);
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let values = received.lock();
        assert_eq!(values.len(), 10);
        for i in 0..10 {
            assert!(values.contains(&i), "missing value {}", i);
        }
    }
}
