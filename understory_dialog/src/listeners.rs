// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered callback lists for dialog opened/closed notifications.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

/// Handle returned when a listener is added; removes exactly that listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Callbacks invoked synchronously in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: SmallVec<[(ListenerId, Box<dyn FnMut()>); 2]>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `callback` and return its handle.
    pub fn add(&mut self, callback: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove the listener registered under `id`. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every listener in registration order.
    pub fn notify(&mut self) {
        for (_, callback) in &mut self.entries {
            callback();
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn notifies_in_registration_order() {
        let seen: Rc<RefCell<Vec<u32>>> = Rc::default();
        let mut listeners = Listeners::new();
        for n in 1..=3 {
            let seen = seen.clone();
            listeners.add(move || seen.borrow_mut().push(n));
        }
        listeners.notify();
        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn removal_is_by_handle() {
        let seen: Rc<RefCell<Vec<u32>>> = Rc::default();
        let mut listeners = Listeners::new();
        let a = {
            let seen = seen.clone();
            listeners.add(move || seen.borrow_mut().push(1))
        };
        {
            let seen = seen.clone();
            listeners.add(move || seen.borrow_mut().push(2));
        }
        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        listeners.notify();
        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(listeners.len(), 1);
    }
}
