// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts with the collaborators a dialog consults but does not own.
//!
//! - [`GuiManager`]: registry of live dialogs, arbiter of the process-wide
//!   focus token, and receiver of open/close broadcasts.
//! - [`HotkeyResolver`]: hotkey storage, key-state matching, and the current
//!   game mode for the creative-tool gate.
//!
//! Dialogs address the manager by [`DialogId`] rather than by reference, so
//! the manager can hold its own dialog collection and call back into a dialog
//! (for example [`Dialog::focus`](crate::Dialog::focus)) after deciding a focus
//! request, outside of the dialog's own call stack.

use alloc::string::String;
use core::fmt;

use crate::event::{KeyCode, KeyEvent, Modifiers};

/// Caller-assigned identity of a dialog, stable for its lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(pub u32);

/// Game mode of the local player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Regular play.
    #[default]
    Survival,
    /// Unlimited resources and creative tools.
    Creative,
    /// Free camera, no interaction.
    Spectator,
    /// Restricted visitor.
    Guest,
}

/// Category of a hotkey.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HotkeyType {
    /// Opens dialogs or other general controls.
    #[default]
    GuiOrOtherControls,
    /// Help screens and overlays.
    HelpAndOverlays,
    /// Character actions.
    CharacterControls,
    /// Movement.
    MovementControls,
    /// Tools only usable in creative mode; toggling is refused elsewhere.
    CreativeTool,
    /// Developer tools.
    DevTool,
}

/// A key plus the exact modifier set that must be held.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// Key that triggers the combination.
    pub key_code: KeyCode,
    /// Modifiers that must be held; other modifiers must not be.
    pub modifiers: Modifiers,
}

impl KeyCombination {
    /// A combination of `key_code` with no modifiers.
    pub fn new(key_code: KeyCode) -> Self {
        Self {
            key_code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Return the combination requiring `modifiers`.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether `event` was produced by this combination.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key_code == event.key_code && self.modifiers == event.modifiers
    }
}

/// A named, bound hotkey.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hotkey {
    /// Lookup code, e.g. `"inventorydialog"`.
    pub code: String,
    /// Bound key combination.
    pub combination: KeyCombination,
    /// Category; gates toggling by game mode.
    pub kind: HotkeyType,
}

impl Hotkey {
    /// Create a hotkey bound to `combination`.
    pub fn new(code: impl Into<String>, combination: KeyCombination, kind: HotkeyType) -> Self {
        Self {
            code: code.into(),
            combination,
            kind,
        }
    }

    /// Whether toggling through this hotkey is allowed in `mode`.
    pub fn permits_toggle(&self, mode: GameMode) -> bool {
        self.kind != HotkeyType::CreativeTool || mode == GameMode::Creative
    }
}

/// Process-wide dialog registry and focus arbiter.
///
/// A dialog only requests or releases focus through this trait; granting it
/// is the manager's decision, made now or later, by calling
/// [`Dialog::focus`](crate::Dialog::focus) on the winner.
pub trait GuiManager {
    /// Add `dialog` to the set of live dialogs.
    fn register_dialog(&mut self, dialog: DialogId);
    /// Remove `dialog` from the set of live dialogs.
    fn unregister_dialog(&mut self, dialog: DialogId);
    /// Whether `dialog` is live.
    fn is_registered(&self, dialog: DialogId) -> bool;
    /// Ask for the focus token on behalf of `dialog`.
    fn request_focus(&mut self, dialog: DialogId);
    /// Broadcast that `dialog` went from closed to opened.
    fn notify_dialog_opened(&mut self, dialog: DialogId);
    /// Broadcast that `dialog` closed.
    fn notify_dialog_closed(&mut self, dialog: DialogId);
}

/// Hotkey storage and live key-state matching.
pub trait HotkeyResolver {
    /// Route presses of the hotkey `code` to `dialog`'s toggle handler.
    fn set_toggle_handler(&mut self, code: &str, dialog: DialogId);
    /// Hotkey registered under `code`.
    fn lookup_hotkey(&self, code: &str) -> Option<&Hotkey>;
    /// Whether `event` presses the hotkey `code`.
    ///
    /// With `consume` set, a match is recorded so the global hotkey pass does
    /// not fire the same keystroke again.
    fn did_press(&mut self, code: &str, event: &KeyEvent, consume: bool) -> bool;
    /// Game mode of the local player.
    fn current_game_mode(&self) -> GameMode;
}

/// Collaborators handed to dialog operations that consult them.
pub struct DialogCx<'a> {
    /// The GUI manager.
    pub gui: &'a mut dyn GuiManager,
    /// The hotkey resolver.
    pub hotkeys: &'a mut dyn HotkeyResolver,
}

impl<'a> DialogCx<'a> {
    /// Bundle `gui` and `hotkeys`.
    pub fn new(gui: &'a mut dyn GuiManager, hotkeys: &'a mut dyn HotkeyResolver) -> Self {
        Self { gui, hotkeys }
    }
}

impl fmt::Debug for DialogCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogCx")
            .field("game_mode", &self.hotkeys.current_game_mode())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combination_requires_exact_modifiers() {
        let comb = KeyCombination::new(KeyCode(23)).with_modifiers(Modifiers::CTRL);
        assert!(comb.matches(&KeyEvent::new(KeyCode(23)).with_modifiers(Modifiers::CTRL)));
        assert!(!comb.matches(&KeyEvent::new(KeyCode(23))));
        assert!(!comb.matches(
            &KeyEvent::new(KeyCode(23)).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT)
        ));
        assert!(!comb.matches(&KeyEvent::new(KeyCode(24)).with_modifiers(Modifiers::CTRL)));
    }

    #[test]
    fn creative_tools_only_toggle_in_creative() {
        let hotkey = Hotkey::new(
            "worldedit",
            KeyCombination::new(KeyCode(1)),
            HotkeyType::CreativeTool,
        );
        assert!(hotkey.permits_toggle(GameMode::Creative));
        assert!(!hotkey.permits_toggle(GameMode::Survival));
        assert!(!hotkey.permits_toggle(GameMode::Spectator));

        let plain = Hotkey::new(
            "inventory",
            KeyCombination::new(KeyCode(2)),
            HotkeyType::GuiOrOtherControls,
        );
        assert!(plain.permits_toggle(GameMode::Survival));
    }
}
