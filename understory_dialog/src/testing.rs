// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Rect;

use crate::composer::{Composer, FocusSink};
use crate::event::{KeyEvent, MouseEvent, MouseWheelEvent};
use crate::host::{DialogId, GuiManager};

/// Shared record of which composer saw which event, in order.
#[derive(Clone, Default)]
pub(crate) struct Journal {
    seen: Rc<RefCell<Vec<(&'static str, &'static str)>>>,
    disposed: Rc<Cell<u32>>,
}

impl Journal {
    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.seen.borrow().iter().map(|(name, _)| *name).collect()
    }

    pub(crate) fn entries(&self) -> Vec<(&'static str, &'static str)> {
        self.seen.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.seen.borrow_mut().clear();
    }

    pub(crate) fn disposed(&self) -> u32 {
        self.disposed.get()
    }
}

/// Composer that records every call and consumes a configurable set of events.
pub(crate) struct Probe {
    name: &'static str,
    bounds: Rect,
    consume: &'static [&'static str],
    journal: Journal,
    cursor: Option<&'static str>,
    focus_on: Option<(&'static str, bool)>,
    sink: Rc<RefCell<Option<FocusSink>>>,
}

impl Probe {
    pub(crate) fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            bounds: Rect::ZERO,
            consume: &[],
            journal: journal.clone(),
            cursor: None,
            focus_on: None,
            sink: Rc::default(),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Mark events of the listed kinds handled.
    pub(crate) fn consuming(mut self, kinds: &'static [&'static str]) -> Self {
        self.consume = kinds;
        self
    }

    pub(crate) fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub(crate) fn with_cursor(mut self, cursor: &'static str) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Post a focus request through the installed sink when `kind` arrives.
    pub(crate) fn requesting_focus_on(mut self, kind: &'static str, want: bool) -> Self {
        self.focus_on = Some((kind, want));
        self
    }

    /// Cell that receives the sink installed by the slot map.
    pub(crate) fn sink_slot(&self) -> Rc<RefCell<Option<FocusSink>>> {
        self.sink.clone()
    }

    fn record(&self, kind: &'static str) -> bool {
        self.journal.seen.borrow_mut().push((self.name, kind));
        if let Some((on, want)) = self.focus_on {
            if on == kind {
                if let Some(sink) = self.sink.borrow().as_ref() {
                    sink.request(want);
                }
            }
        }
        self.consume.contains(&kind)
    }
}

impl Composer for Probe {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn on_key_down(&mut self, event: &mut KeyEvent, _dialog_focused: bool) {
        event.handled |= self.record("key_down");
    }

    fn on_key_up(&mut self, event: &mut KeyEvent) {
        event.handled |= self.record("key_up");
    }

    fn on_key_press(&mut self, event: &mut KeyEvent) {
        event.handled |= self.record("key_press");
    }

    fn on_mouse_down(&mut self, event: &mut MouseEvent) {
        event.handled |= self.record("mouse_down");
    }

    fn on_mouse_up(&mut self, event: &mut MouseEvent) {
        event.handled |= self.record("mouse_up");
    }

    fn on_mouse_move(&mut self, event: &mut MouseEvent) {
        event.handled |= self.record("mouse_move");
    }

    fn on_mouse_wheel(&mut self, event: &mut MouseWheelEvent) {
        if self.record("mouse_wheel") {
            event.set_handled(true);
        }
    }

    fn render(&mut self, _dt: f32) {
        self.record("render");
    }

    fn post_render(&mut self, _dt: f32) {
        self.record("post_render");
    }

    fn mouse_over_cursor(&self) -> Option<&str> {
        self.cursor
    }

    fn set_focus_sink(&mut self, sink: FocusSink) {
        *self.sink.borrow_mut() = Some(sink);
    }

    fn dispose(&mut self) {
        self.journal.disposed.set(self.journal.disposed.get() + 1);
    }
}

/// Calls received by [`RecordingGui`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum GuiCall {
    Register(DialogId),
    Unregister(DialogId),
    RequestFocus(DialogId),
    Opened(DialogId),
    Closed(DialogId),
}

/// Manager that records calls and never grants focus on its own.
#[derive(Default)]
pub(crate) struct RecordingGui {
    pub(crate) calls: Vec<GuiCall>,
    registered: Vec<DialogId>,
}

impl RecordingGui {
    pub(crate) fn count(&self, call: GuiCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl GuiManager for RecordingGui {
    fn register_dialog(&mut self, dialog: DialogId) {
        self.calls.push(GuiCall::Register(dialog));
        self.registered.push(dialog);
    }

    fn unregister_dialog(&mut self, dialog: DialogId) {
        self.calls.push(GuiCall::Unregister(dialog));
        self.registered.retain(|d| *d != dialog);
    }

    fn is_registered(&self, dialog: DialogId) -> bool {
        self.registered.contains(&dialog)
    }

    fn request_focus(&mut self, dialog: DialogId) {
        self.calls.push(GuiCall::RequestFocus(dialog));
    }

    fn notify_dialog_opened(&mut self, dialog: DialogId) {
        self.calls.push(GuiCall::Opened(dialog));
    }

    fn notify_dialog_closed(&mut self, dialog: DialogId) {
        self.calls.push(GuiCall::Closed(dialog));
    }
}
