// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composer-chain walking helpers used by every routing entry point.
//!
//! - [`offer`] hands an event to each composer in slot order and stops at the
//!   first one that marks it handled.
//! - [`hit_bounds`] is the geometric fallback for pointer events: it runs no
//!   composer logic and only tests bounds containment.
//!
//! Both report the slot index where they stopped so callers can log it.

use kurbo::Point;

use crate::composer::Composer;
use crate::event::RoutedEvent;

/// Offer `event` to `composers` in order and honor the handled flag.
///
/// Returns the index of the composer that handled the event, or `None` if
/// every composer saw it unhandled.
pub(crate) fn offer<'a, E: RoutedEvent>(
    composers: impl IntoIterator<Item = &'a mut dyn Composer>,
    event: &mut E,
    mut handler: impl FnMut(&mut dyn Composer, &mut E),
) -> Option<usize> {
    for (index, composer) in composers.into_iter().enumerate() {
        handler(composer, event);
        if event.is_handled() {
            return Some(index);
        }
    }
    None
}

/// Index of the first composer whose bounds contain `point`.
pub(crate) fn hit_bounds<'a>(
    composers: impl IntoIterator<Item = &'a dyn Composer>,
    point: Point,
) -> Option<usize> {
    composers
        .into_iter()
        .position(|composer| composer.bounds().contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyCode, KeyEvent};
    use crate::slots::ComposerSlots;
    use crate::testing::{Journal, Probe};
    use alloc::boxed::Box;
    use alloc::vec;
    use kurbo::Rect;

    fn chain(journal: &Journal) -> ComposerSlots {
        let mut slots = ComposerSlots::new();
        slots.set("a", Box::new(Probe::new("a", journal)));
        slots.set("b", Box::new(Probe::new("b", journal).consuming(&["key_up"])));
        slots.set("c", Box::new(Probe::new("c", journal)));
        slots
    }

    #[test]
    fn continue_through_all() {
        let journal = Journal::default();
        let mut slots = chain(&journal);
        let mut ev = KeyEvent::new(KeyCode(1));
        let stopped = offer(slots.values_mut(), &mut ev, |c, e| c.on_key_down(e, false));
        assert!(stopped.is_none());
        assert!(!ev.handled);
        assert_eq!(journal.names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn handled_stops_at_consumer() {
        let journal = Journal::default();
        let mut slots = chain(&journal);
        let mut ev = KeyEvent::new(KeyCode(1));
        let stopped = offer(slots.values_mut(), &mut ev, |c, e| c.on_key_up(e));
        assert_eq!(stopped, Some(1));
        assert!(ev.handled);
        assert_eq!(journal.names(), vec!["a", "b"]);
    }

    #[test]
    fn hit_bounds_picks_first_containing() {
        let journal = Journal::default();
        let mut slots = ComposerSlots::new();
        let a = Probe::new("a", &journal).with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = Probe::new("b", &journal).with_bounds(Rect::new(5.0, 5.0, 50.0, 50.0));
        let c = Probe::new("c", &journal).with_bounds(Rect::new(5.0, 5.0, 60.0, 60.0));
        slots.set("a", Box::new(a));
        slots.set("b", Box::new(b));
        slots.set("c", Box::new(c));
        assert_eq!(hit_bounds(slots.values(), Point::new(7.0, 7.0)), Some(0));
        assert_eq!(hit_bounds(slots.values(), Point::new(20.0, 20.0)), Some(1));
        assert_eq!(hit_bounds(slots.values(), Point::new(100.0, 100.0)), None);
        // Bounds testing never calls into composer logic.
        assert!(journal.names().is_empty());
    }
}
