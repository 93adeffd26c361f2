// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`HotkeyResolver`].
//!
//! Hotkeys are kept in registration order; lookups by code go through a hash
//! index. When several hotkeys match one keystroke, the earliest registered
//! one wins.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::event::KeyEvent;
use crate::host::{DialogId, GameMode, Hotkey, HotkeyResolver, KeyCombination};

/// Reference hotkey resolver: bindings, toggle handlers, and game mode.
#[derive(Clone, Debug, Default)]
pub struct HotkeyMap {
    hotkeys: Vec<Hotkey>,
    by_code: HashMap<String, usize>,
    toggle_handlers: HashMap<String, DialogId>,
    game_mode: GameMode,
    consumed: Option<KeyCombination>,
}

impl HotkeyMap {
    /// Create an empty map for a player in `game_mode`.
    pub fn new(game_mode: GameMode) -> Self {
        Self {
            game_mode,
            ..Self::default()
        }
    }

    /// Register `hotkey`, replacing any binding with the same code in place.
    ///
    /// Returns the replaced hotkey.
    pub fn register(&mut self, hotkey: Hotkey) -> Option<Hotkey> {
        match self.by_code.get(hotkey.code.as_str()) {
            Some(&index) => Some(core::mem::replace(&mut self.hotkeys[index], hotkey)),
            None => {
                self.by_code.insert(hotkey.code.clone(), self.hotkeys.len());
                self.hotkeys.push(hotkey);
                None
            }
        }
    }

    /// Change the player's game mode.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        self.game_mode = mode;
    }

    /// Dialog whose toggle handler is bound to `code`.
    pub fn toggle_handler(&self, code: &str) -> Option<DialogId> {
        self.toggle_handlers.get(code).copied()
    }

    /// First registered hotkey pressed by `event` that has a toggle handler,
    /// together with the dialog to toggle.
    pub fn toggle_target(&self, event: &KeyEvent) -> Option<(DialogId, &Hotkey)> {
        self.hotkeys.iter().find_map(|hotkey| {
            if !hotkey.combination.matches(event) {
                return None;
            }
            self.toggle_handler(&hotkey.code)
                .map(|dialog| (dialog, hotkey))
        })
    }

    /// Take the combination consumed by the last matching
    /// [`did_press`](HotkeyResolver::did_press) call, if any.
    pub fn take_consumed(&mut self) -> Option<KeyCombination> {
        self.consumed.take()
    }
}

impl HotkeyResolver for HotkeyMap {
    fn set_toggle_handler(&mut self, code: &str, dialog: DialogId) {
        self.toggle_handlers.insert(String::from(code), dialog);
    }

    fn lookup_hotkey(&self, code: &str) -> Option<&Hotkey> {
        self.by_code.get(code).map(|&index| &self.hotkeys[index])
    }

    fn did_press(&mut self, code: &str, event: &KeyEvent, consume: bool) -> bool {
        let Some(combination) = self.lookup_hotkey(code).map(|hotkey| hotkey.combination) else {
            return false;
        };
        if !combination.matches(event) {
            return false;
        }
        if consume {
            self.consumed = Some(combination);
        }
        true
    }

    fn current_game_mode(&self) -> GameMode {
        self.game_mode
    }
}
