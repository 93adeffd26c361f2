// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dialog --heading-base-level=0

//! Understory Dialog: per-frame dialog state and input routing for in-game UI.
//!
//! ## Overview
//!
//! A [`Dialog`] owns an insertion-ordered collection of UI sub-trees
//! ([`Composer`]s, stored in [`ComposerSlots`]), tracks whether it is opened
//! and focused, toggles through a hotkey, and routes raw input through its
//! composers with first-responder semantics.
//! It does not lay out or draw anything; composers do that behind the
//! [`Composer`] trait.
//!
//! ## Routing
//!
//! - Composers see events in slot order. The first one that marks an event
//!   handled stops propagation; later composers never see it.
//! - Pointer events nobody consumed are still marked handled when they land
//!   inside a composer's bounds, so clicks on a dialog's empty areas do not
//!   fall through to the world.
//! - Key-down checks the dialog's toggle hotkey after the composers.
//! - [`Dialog::ignore_next_key_press`] swallows the key-press half of a
//!   keystroke whose key-down already acted.
//!
//! ## Focus
//!
//! At most one dialog holds keyboard focus. This crate only requests and
//! releases it: [`GuiManager::request_focus`] asks, and the manager grants by
//! calling [`Dialog::focus`]. Composers ask their dialog through the
//! [`FocusSink`] they receive when placed into a slot.
//!
//! ## Collaborators
//!
//! - [`GuiManager`]: registry of live dialogs and the focus arbiter.
//! - [`HotkeyResolver`]: hotkey lookup and matching; [`HotkeyMap`] is an
//!   in-memory implementation.
//! - [`DialogBehavior`]: lifecycle hooks of a concrete dialog.
//!
//! Every operation is total: refusal and absence are reported with `bool` and
//! `Option`, never with errors or panics.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use understory_dialog::{
//!     Composer, Dialog, DialogConfig, DialogCx, DialogId, GameMode, GuiManager, HotkeyMap,
//!     MouseButton, MouseEvent,
//! };
//!
//! struct Panel;
//! impl Composer for Panel {
//!     fn bounds(&self) -> Rect {
//!         Rect::new(10.0, 10.0, 110.0, 50.0)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Gui {
//!     live: Vec<DialogId>,
//!     focus_requests: Vec<DialogId>,
//! }
//! impl GuiManager for Gui {
//!     fn register_dialog(&mut self, d: DialogId) { self.live.push(d); }
//!     fn unregister_dialog(&mut self, d: DialogId) { self.live.retain(|x| *x != d); }
//!     fn is_registered(&self, d: DialogId) -> bool { self.live.contains(&d) }
//!     fn request_focus(&mut self, d: DialogId) { self.focus_requests.push(d); }
//!     fn notify_dialog_opened(&mut self, _: DialogId) {}
//!     fn notify_dialog_closed(&mut self, _: DialogId) {}
//! }
//!
//! let mut gui = Gui::default();
//! let mut hotkeys = HotkeyMap::new(GameMode::Survival);
//! let mut dialog = Dialog::new(DialogId(1), DialogConfig::dialog());
//! dialog.set_single_composer(Box::new(Panel));
//!
//! let mut cx = DialogCx::new(&mut gui, &mut hotkeys);
//! assert!(dialog.try_open(&mut cx));
//!
//! // The panel has no click logic, but the click lands inside it.
//! let mut click = MouseEvent::new((50.0, 20.0), MouseButton::Left);
//! dialog.on_mouse_down(&mut cx, &mut click);
//! assert!(click.handled);
//!
//! // The manager decides to grant the focus request.
//! assert_eq!(gui.focus_requests, [DialogId(1)]);
//! dialog.focus();
//! assert!(dialog.should_receive_keyboard_events());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod composer;
mod config;
mod dialog;
mod dispatch;
mod event;
mod host;
mod hotkeys;
mod listeners;
mod slots;

#[cfg(test)]
mod testing;

pub use composer::{Composer, FocusSink};
pub use config::{DialogConfig, DialogType};
pub use dialog::{Dialog, DialogBehavior, NoBehavior};
pub use event::{
    KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseWheelEvent, PointerEvent,
    RoutedEvent,
};
pub use host::{
    DialogCx, DialogId, GameMode, GuiManager, Hotkey, HotkeyResolver, HotkeyType, KeyCombination,
};
pub use hotkeys::HotkeyMap;
pub use listeners::{ListenerId, Listeners};
pub use slots::{ComposerSlots, Iter, SINGLE_COMPOSER};
