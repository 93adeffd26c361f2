// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events routed through a dialog.
//!
//! Every event carries a mutable `handled` flag. The flag is the only
//! propagation control: once a composer (or the dialog itself) sets it, no
//! later consumer in the same dispatch sees the event. An event value lives
//! for exactly one dispatch call; callers build a fresh one per input.

use kurbo::{Point, Vec2};

/// Platform-independent key code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

bitflags::bitflags! {
    /// Modifier keys held while an input event was produced.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 0b0000_0001;
        /// Either control key.
        const CTRL  = 0b0000_0010;
        /// Either alt key.
        const ALT   = 0b0000_0100;
        /// The platform "super" key (command / windows).
        const META  = 0b0000_1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// Mouse button that produced a [`MouseEvent`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    #[default]
    Left,
    /// Middle button or wheel click.
    Middle,
    /// Secondary button.
    Right,
    /// Any additional button, by platform index.
    Other(u8),
}

/// Access to the propagation flag shared by every routed event.
pub trait RoutedEvent {
    /// Whether an earlier consumer already handled this event.
    fn is_handled(&self) -> bool;
    /// Mark the event handled, stopping further propagation.
    fn mark_handled(&mut self);
}

/// Events that carry a pointer position usable for bounds hit testing.
pub trait PointerEvent: RoutedEvent {
    /// Pointer position in the same space as composer bounds.
    fn pointer(&self) -> Point;
}

/// Key down, key up, or key press (character) event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyEvent {
    /// Physical key.
    pub key_code: KeyCode,
    /// Produced character, for key press events.
    pub key_char: Option<char>,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Set once a consumer handled the event.
    pub handled: bool,
}

impl KeyEvent {
    /// Create an unhandled event for `key_code` with no modifiers.
    pub fn new(key_code: KeyCode) -> Self {
        Self {
            key_code,
            ..Self::default()
        }
    }

    /// Return the event with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Return the event carrying the character `ch`.
    #[must_use]
    pub fn with_char(mut self, ch: char) -> Self {
        self.key_char = Some(ch);
        self
    }
}

impl RoutedEvent for KeyEvent {
    fn is_handled(&self) -> bool {
        self.handled
    }

    fn mark_handled(&mut self) {
        self.handled = true;
    }
}

/// Mouse down, up, or move event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MouseEvent {
    /// Pointer position.
    pub position: Point,
    /// Movement since the previous move event; zero for button events.
    pub delta: Vec2,
    /// Button pressed or released; `Left` for plain moves.
    pub button: MouseButton,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Set once a consumer handled the event.
    pub handled: bool,
}

impl MouseEvent {
    /// Create an unhandled event at `position` for `button`.
    pub fn new(position: impl Into<Point>, button: MouseButton) -> Self {
        Self {
            position: position.into(),
            button,
            ..Self::default()
        }
    }

    /// Create an unhandled move event at `position` that moved by `delta`.
    pub fn moved(position: impl Into<Point>, delta: Vec2) -> Self {
        Self {
            position: position.into(),
            delta,
            ..Self::default()
        }
    }
}

impl RoutedEvent for MouseEvent {
    fn is_handled(&self) -> bool {
        self.handled
    }

    fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl PointerEvent for MouseEvent {
    fn pointer(&self) -> Point {
        self.position
    }
}

/// Mouse wheel event.
///
/// The host fills `position` from the current cursor location, since wheel
/// input itself carries no coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MouseWheelEvent {
    /// Whole wheel notches scrolled; positive is away from the user.
    pub delta: i32,
    /// High resolution scroll amount.
    pub delta_precise: f64,
    /// Cursor position at the time of the scroll.
    pub position: Point,
    handled: bool,
}

impl MouseWheelEvent {
    /// Create an unhandled wheel event at `position`.
    pub fn new(delta: i32, delta_precise: f64, position: impl Into<Point>) -> Self {
        Self {
            delta,
            delta_precise,
            position: position.into(),
            handled: false,
        }
    }

    /// Whether the event has been handled.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Set or clear the handled flag.
    pub fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }
}

impl RoutedEvent for MouseWheelEvent {
    fn is_handled(&self) -> bool {
        self.handled
    }

    fn mark_handled(&mut self) {
        self.handled = true;
    }
}

impl PointerEvent for MouseWheelEvent {
    fn pointer(&self) -> Point {
        self.position
    }
}
