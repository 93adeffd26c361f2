// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static configuration of a dialog.

use alloc::borrow::Cow;
use alloc::string::String;

/// Whether a dialog is a modal-style window or a heads-up element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DialogType {
    /// A window that requests focus when opened and closes on escape.
    #[default]
    Dialog,
    /// A heads-up element; never requests focus on open, ignores escape.
    Hud,
}

/// Per-dialog settings, fixed at construction.
///
/// Defaults describe a focusable, non-capturing modal dialog with no toggle
/// hotkey.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogConfig {
    /// Dialog or HUD.
    pub dialog_type: DialogType,
    /// Depth reserved for the dialog when stacking. Default `150`.
    pub z_size: f32,
    /// `0` draws first, `1` draws last. Default `0.1`.
    pub draw_order: f64,
    /// Order in which opened dialogs receive input; lower goes first.
    ///
    /// For reference: `0` for an escape menu, `0.5` (default) for ordinary
    /// dialogs, `1` for a hotbar, `1.1` for chat.
    pub input_order: f64,
    /// Whether [`Dialog::focus`](crate::Dialog::focus) may take effect.
    pub focusable: bool,
    /// Whether the dialog unregisters itself from the manager after closing.
    pub unregister_on_close: bool,
    /// Code of the hotkey that toggles the dialog.
    pub toggle_hotkey: Option<String>,
    /// Whether the mouse should stay ungrabbed while the dialog is open.
    pub prefers_ungrabbed_mouse: bool,
    /// Whether grabbing the mouse is disabled while the dialog is open.
    pub disable_mouse_grab: bool,
    /// Whether the dialog takes every keystroke except escape while open.
    pub capture_all_inputs: bool,
    /// Name used in log records.
    pub debug_name: Cow<'static, str>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            dialog_type: DialogType::Dialog,
            z_size: 150.0,
            draw_order: 0.1,
            input_order: 0.5,
            focusable: true,
            unregister_on_close: false,
            toggle_hotkey: None,
            prefers_ungrabbed_mouse: true,
            disable_mouse_grab: false,
            capture_all_inputs: false,
            debug_name: Cow::Borrowed("dialog"),
        }
    }
}

impl DialogConfig {
    /// Defaults for a modal dialog.
    pub fn dialog() -> Self {
        Self::default()
    }

    /// Defaults for a HUD element.
    pub fn hud() -> Self {
        Self {
            dialog_type: DialogType::Hud,
            debug_name: Cow::Borrowed("hud"),
            ..Self::default()
        }
    }

    /// Bind the toggle hotkey `code`.
    #[must_use]
    pub fn with_toggle_hotkey(mut self, code: impl Into<String>) -> Self {
        self.toggle_hotkey = Some(code.into());
        self
    }

    /// Set the name used in log records.
    #[must_use]
    pub fn with_debug_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.debug_name = name.into();
        self
    }

    /// Set the stacking depth.
    #[must_use]
    pub fn with_z_size(mut self, z_size: f32) -> Self {
        self.z_size = z_size;
        self
    }

    /// Set the draw order.
    #[must_use]
    pub fn with_draw_order(mut self, draw_order: f64) -> Self {
        self.draw_order = draw_order;
        self
    }

    /// Set the input order.
    #[must_use]
    pub fn with_input_order(mut self, input_order: f64) -> Self {
        self.input_order = input_order;
        self
    }

    /// Allow or forbid focusing.
    #[must_use]
    pub fn with_focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    /// Unregister from the manager after every close.
    #[must_use]
    pub fn with_unregister_on_close(mut self, unregister: bool) -> Self {
        self.unregister_on_close = unregister;
        self
    }

    /// Take every keystroke except escape while open.
    #[must_use]
    pub fn with_capture_all_inputs(mut self, capture: bool) -> Self {
        self.capture_all_inputs = capture;
        self
    }

    /// Mouse grab preferences while open.
    #[must_use]
    pub fn with_mouse_grab(mut self, prefers_ungrabbed: bool, disable_grab: bool) -> Self {
        self.prefers_ungrabbed_mouse = prefers_ungrabbed;
        self.disable_mouse_grab = disable_grab;
        self
    }
}
