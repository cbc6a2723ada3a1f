use uuid::Uuid;

use crate::error::FrameLoopError;

/// Per-frame listener invoked with the frame's elapsed time in milliseconds.
///
/// A listener that returns an error is logged and retried on the next
/// qualifying frame; it is never deregistered for failing.
pub type FrameListener = Box<dyn FnMut(f64) -> Result<(), FrameLoopError>>;

/// Opaque handle to a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

struct ListenerEntry {
    id: ListenerId,
    listener: FrameListener,
}

/// Insertion-ordered set of per-frame listeners.
///
/// Handles are valid from registration until explicit removal or registry
/// teardown. Dispatch visits listeners in registration order.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<ListenerEntry>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a listener and return its handle.
    pub fn add(&mut self, listener: FrameListener) -> ListenerId {
        let mut id = ListenerId(Uuid::new_v4());
        while self.entries.iter().any(|entry| entry.id == id) {
            id = ListenerId(Uuid::new_v4()); // Ensure unique ID
        }
        self.entries.push(ListenerEntry { id, listener });
        id
    }

    /// Remove a listener by handle.
    pub fn remove(&mut self, id: ListenerId) -> Result<(), FrameLoopError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        if self.entries.len() == before {
            return Err(FrameLoopError::ListenerNotFound { id: id.to_string() });
        }
        Ok(())
    }

    /// Invoke every listener in registration order with `delta_ms`.
    ///
    /// A failing listener is contained: the failure is logged as a warning
    /// and the remaining listeners still run. Returns the number of failures.
    pub fn dispatch(&mut self, delta_ms: f64) -> usize {
        let mut failures = 0;
        for entry in self.entries.iter_mut() {
            if let Err(err) = (entry.listener)(delta_ms) {
                log::warn!("frame listener {} failed: {}", entry.id, err);
                failures += 1;
            }
        }
        failures
    }

    /// Number of registered listeners.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all listeners.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ListenerRegistry::new();
        for label in ["a", "b", "c"] {
            let order = Rc::clone(&order);
            registry.add(Box::new(move |_| {
                order.borrow_mut().push(label);
                Ok(())
            }));
        }

        registry.dispatch(16.0);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failure_is_contained() {
        let calls = Rc::new(RefCell::new(0u32));
        let mut registry = ListenerRegistry::new();

        let counted = |calls: &Rc<RefCell<u32>>| {
            let calls = Rc::clone(calls);
            Box::new(move |_: f64| {
                *calls.borrow_mut() += 1;
                Ok(())
            }) as FrameListener
        };

        registry.add(counted(&calls));
        registry.add(Box::new(|_| Err(FrameLoopError::new("boom"))));
        registry.add(counted(&calls));

        assert_eq!(registry.dispatch(16.0), 1);
        assert_eq!(*calls.borrow(), 2);

        // The failing listener stays registered and fails again next frame.
        assert_eq!(registry.dispatch(16.0), 1);
        assert_eq!(*calls.borrow(), 4);
    }

    #[test]
    fn test_remove_unknown_listener() {
        let mut registry = ListenerRegistry::new();
        let id = registry.add(Box::new(|_| Ok(())));
        assert!(registry.remove(id).is_ok());
        assert!(matches!(
            registry.remove(id),
            Err(FrameLoopError::ListenerNotFound { .. })
        ));
    }
}
