// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-ordered composer slot map.
//!
//! Slot order is the dialog's entire input priority scheme: composers are
//! offered events, rendered, and post-rendered in this order. Reassigning an
//! existing key swaps the composer in place and never moves the slot.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::composer::{Composer, FocusSink};

/// Conventional key of a dialog's sole composer.
pub const SINGLE_COMPOSER: &str = "single";

struct Slot {
    key: String,
    composer: Box<dyn Composer>,
}

fn slot_entry(slot: &Slot) -> (&str, &dyn Composer) {
    (slot.key.as_str(), &*slot.composer)
}

fn slot_entry_mut(slot: &mut Slot) -> (&str, &mut dyn Composer) {
    (slot.key.as_str(), &mut *slot.composer)
}

fn slot_composer(slot: &Slot) -> &dyn Composer {
    &*slot.composer
}

fn slot_composer_mut(slot: &mut Slot) -> &mut dyn Composer {
    &mut *slot.composer
}

/// Ordered `key → composer` map owned by exactly one dialog.
///
/// Every composer placed into the map receives the map's [`FocusSink`].
///
/// ```
/// use kurbo::Rect;
/// use understory_dialog::{Composer, ComposerSlots};
///
/// struct Panel(Rect);
/// impl Composer for Panel {
///     fn bounds(&self) -> Rect { self.0 }
/// }
///
/// let mut slots = ComposerSlots::new();
/// slots.set("a", Box::new(Panel(Rect::ZERO)));
/// slots.set("b", Box::new(Panel(Rect::ZERO)));
/// // Replacing "a" keeps it first.
/// slots.set("a", Box::new(Panel(Rect::new(0.0, 0.0, 1.0, 1.0))));
/// let keys: Vec<&str> = slots.keys().collect();
/// assert_eq!(keys, ["a", "b"]);
/// ```
#[derive(Default)]
pub struct ComposerSlots {
    slots: Vec<Slot>,
    sink: FocusSink,
}

impl fmt::Debug for ComposerSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposerSlots")
            .field("keys", &self.keys().collect::<SmallVec<[&str; 4]>>())
            .field("sink", &self.sink)
            .finish()
    }
}

impl ComposerSlots {
    /// Create an empty map with its own focus channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// The channel handed to every composer placed into this map.
    pub fn focus_sink(&self) -> &FocusSink {
        &self.sink
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.key == key)
    }

    /// Insert `composer` at `key`, or replace the composer already there.
    ///
    /// A replaced composer keeps its slot position and is returned without
    /// being disposed.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        mut composer: Box<dyn Composer>,
    ) -> Option<Box<dyn Composer>> {
        composer.set_focus_sink(self.sink.clone());
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(core::mem::replace(
                &mut self.slots[index].composer,
                composer,
            )),
            None => {
                self.slots.push(Slot { key, composer });
                None
            }
        }
    }

    /// Composer stored at `key`.
    pub fn get(&self, key: &str) -> Option<&dyn Composer> {
        self.slots
            .iter()
            .find(|slot| slot.key == key)
            .map(slot_composer)
    }

    /// Mutable composer stored at `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut dyn Composer> {
        self.slots
            .iter_mut()
            .find(|slot| slot.key == key)
            .map(slot_composer_mut)
    }

    /// Whether a slot named `key` exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove the slot at `key` and hand its composer back undisposed.
    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Composer>> {
        let index = self.position(key)?;
        Some(self.slots.remove(index).composer)
    }

    /// Dispose every composer and empty the map.
    pub fn clear(&mut self) {
        self.dispose();
        self.slots.clear();
    }

    /// Dispose every composer, leaving the slots in place.
    ///
    /// The map is not meant to be used afterwards.
    pub fn dispose(&mut self) {
        for composer in self.values_mut() {
            composer.dispose();
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the map has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(key, composer)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.slots.iter(),
        }
    }

    /// Mutable `(key, composer)` pairs in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut dyn Composer)> {
        self.slots.iter_mut().map(slot_entry_mut)
    }

    /// Keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.key.as_str())
    }

    /// Composers in slot order.
    pub fn values(&self) -> impl Iterator<Item = &dyn Composer> {
        self.slots.iter().map(slot_composer)
    }

    /// Mutable composers in slot order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut dyn Composer> {
        self.slots.iter_mut().map(slot_composer_mut)
    }
}

/// Iterator over `(key, composer)` pairs of a [`ComposerSlots`], in slot order.
#[derive(Clone)]
pub struct Iter<'a> {
    inner: core::slice::Iter<'a, Slot>,
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a dyn Composer);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(slot_entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ComposerSlots {
    type Item = (&'a str, &'a dyn Composer);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Journal, Probe};
    use alloc::vec;
    use alloc::vec::Vec;

    fn keys(slots: &ComposerSlots) -> Vec<&str> {
        slots.keys().collect()
    }

    #[test]
    fn insertion_order_is_iteration_order() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        slots.set("c", Box::new(Probe::new("c", &journal)));
        slots.set("a", Box::new(Probe::new("a", &journal)));
        slots.set("b", Box::new(Probe::new("b", &journal)));
        assert_eq!(keys(&slots), vec!["c", "a", "b"]);
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn reassigning_a_key_keeps_its_position() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        slots.set("a", Box::new(Probe::new("a1", &journal)));
        slots.set("b", Box::new(Probe::new("b", &journal)));
        let old = slots.set("a", Box::new(Probe::new("a2", &journal)));
        assert!(old.is_some());
        assert_eq!(keys(&slots), vec!["a", "b"]);
        assert_eq!(slots.len(), 2);
        // The replaced composer is handed back, not disposed.
        assert_eq!(journal.disposed(), 0);
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let slots = ComposerSlots::new();
        assert!(slots.get("nope").is_none());
        assert!(!slots.contains_key("nope"));
    }

    #[test]
    fn set_installs_shared_focus_sink() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        let probe = Probe::new("a", &journal);
        let sink_slot = probe.sink_slot();
        slots.set("a", Box::new(probe));
        let installed = sink_slot.borrow().clone().expect("sink installed on set");
        installed.request(true);
        assert!(slots.focus_sink().has_pending());
    }

    #[test]
    fn remove_does_not_dispose_and_preserves_order() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        for name in ["a", "b", "c"] {
            slots.set(name, Box::new(Probe::new(name, &journal)));
        }
        assert!(slots.remove("b").is_some());
        assert!(slots.remove("b").is_none());
        assert_eq!(keys(&slots), vec!["a", "c"]);
        assert_eq!(journal.disposed(), 0);
    }

    #[test]
    fn clear_disposes_and_empties() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        slots.set("a", Box::new(Probe::new("a", &journal)));
        slots.set("b", Box::new(Probe::new("b", &journal)));
        slots.clear();
        assert_eq!(journal.disposed(), 2);
        assert!(slots.is_empty());
    }

    #[test]
    fn dispose_keeps_entries() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        slots.set("a", Box::new(Probe::new("a", &journal)));
        slots.dispose();
        assert_eq!(journal.disposed(), 1);
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn iteration_is_restartable() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        slots.set("a", Box::new(Probe::new("a", &journal)));
        slots.set("b", Box::new(Probe::new("b", &journal)));
        let first: Vec<&str> = (&slots).into_iter().map(|(k, _)| k).collect();
        let second: Vec<&str> = slots.iter().map(|(k, _)| k).collect();
        assert_eq!(first, second);
    }
}
