// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composer contract and the focus-request channel back to the dialog.
//!
//! A composer is a self-contained UI sub-tree. Its layout and rendering live
//! elsewhere; the dialog only needs it to consume input, report bounds, and
//! run its per-frame steps.

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::event::{KeyEvent, MouseEvent, MouseWheelEvent};

/// A UI sub-tree owned by a dialog's [`ComposerSlots`](crate::ComposerSlots).
///
/// Input handlers mark the event handled (see [`RoutedEvent`](crate::RoutedEvent))
/// to stop propagation to later composers. All methods except [`bounds`](Self::bounds)
/// default to no-ops, so an implementation only overrides what it consumes.
pub trait Composer {
    /// Hit-test boundary used by the pointer fallback pass.
    fn bounds(&self) -> Rect;

    /// Key down. `dialog_focused` reports whether the owning dialog holds focus.
    fn on_key_down(&mut self, _event: &mut KeyEvent, _dialog_focused: bool) {}

    /// Key up.
    fn on_key_up(&mut self, _event: &mut KeyEvent) {}

    /// Character key press.
    fn on_key_press(&mut self, _event: &mut KeyEvent) {}

    /// Mouse button down.
    fn on_mouse_down(&mut self, _event: &mut MouseEvent) {}

    /// Mouse button up.
    fn on_mouse_up(&mut self, _event: &mut MouseEvent) {}

    /// Mouse move.
    fn on_mouse_move(&mut self, _event: &mut MouseEvent) {}

    /// Mouse wheel.
    fn on_mouse_wheel(&mut self, _event: &mut MouseWheelEvent) {}

    /// Draw the composer for this frame.
    fn render(&mut self, _dt: f32) {}

    /// Post-render step, run after every dialog rendered.
    fn post_render(&mut self, _dt: f32) {}

    /// Cursor the composer wants while the pointer hovers it.
    fn mouse_over_cursor(&self) -> Option<&str> {
        None
    }

    /// Receive the channel used to ask the owning dialog for focus changes.
    ///
    /// Called every time the composer is placed into a slot map.
    fn set_focus_sink(&mut self, _sink: FocusSink) {}

    /// Release resources held by the composer.
    fn dispose(&mut self) {}
}

/// One-way channel from composers to their dialog's focus handler.
///
/// Requests are queued in posting order and applied by the dialog through
/// [`Dialog::on_focus_changed`](crate::Dialog::on_focus_changed) before the
/// current routing call returns. Requests posted from [`Composer::render`] or
/// [`Composer::post_render`] stay queued until the caller applies them; the
/// frame hooks report them. Clones share the same queue.
#[derive(Clone, Debug, Default)]
pub struct FocusSink {
    queue: Rc<RefCell<SmallVec<[bool; 2]>>>,
}

impl FocusSink {
    /// Ask the dialog to gain (`true`) or drop (`false`) focus.
    pub fn request(&self, want_focus: bool) {
        self.queue.borrow_mut().push(want_focus);
    }

    /// Whether any request is waiting to be applied.
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    pub(crate) fn drain(&self) -> SmallVec<[bool; 2]> {
        core::mem::take(&mut *self.queue.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_queue_in_order() {
        let sink = FocusSink::default();
        let other = sink.clone();
        sink.request(true);
        other.request(false);
        assert!(sink.has_pending());
        let drained = sink.drain();
        assert_eq!(drained.as_slice(), &[true, false]);
        assert!(!other.has_pending());
    }
}
