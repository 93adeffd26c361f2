// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dialog state machine and its input routing.
//!
//! ## States
//!
//! `Closed` → `OpenedUnfocused` → `OpenedFocused` → `Closed`. Opening a
//! [`DialogType::Dialog`] requests focus from the [`GuiManager`]; the manager
//! grants it by calling [`Dialog::focus`]. HUD dialogs only gain focus when
//! something focuses them explicitly.
//!
//! ## Routing
//!
//! Every input entry point follows the same steps:
//!
//! 1. An event already marked handled is ignored.
//! 2. Composers are offered the event in slot order; the first one that marks
//!    it handled stops propagation.
//! 3. Pointer events nobody handled are absorbed when the pointer lies inside
//!    any composer's bounds. Mouse-down only does this while opened, the wheel
//!    only while focused.
//! 4. Key-down closes the dialog when its toggle hotkey was pressed.
//! 5. Key-press swallows exactly one event after
//!    [`ignore_next_key_press`](Dialog::ignore_next_key_press) was set.
//!
//! Focus requests that composers post through their [`FocusSink`](crate::FocusSink)
//! during a routing call are applied before that call returns.

use alloc::boxed::Box;
use alloc::string::String;

use log::{debug, trace};

use crate::composer::Composer;
use crate::config::{DialogConfig, DialogType};
use crate::dispatch;
use crate::event::{KeyEvent, MouseEvent, MouseWheelEvent, PointerEvent, RoutedEvent};
use crate::host::{DialogCx, DialogId, HotkeyResolver};
use crate::listeners::{ListenerId, Listeners};
use crate::slots::{ComposerSlots, SINGLE_COMPOSER};

/// Hooks a concrete dialog plugs into [`Dialog`].
///
/// Every method has a default, so an implementation only overrides what it
/// needs. Hooks that build UI receive the dialog's composers.
pub trait DialogBehavior {
    /// Guard consulted by [`Dialog::try_open`]; `false` refuses the open.
    fn can_open(&mut self) -> bool {
        true
    }

    /// Guard consulted by [`Dialog::try_close`]; `false` refuses the close.
    fn can_close(&mut self) -> bool {
        true
    }

    /// Runs on the closed → opened edge, before opened listeners.
    fn on_gui_opened(&mut self, _composers: &mut ComposerSlots) {}

    /// Runs on every close, before closed listeners.
    fn on_gui_closed(&mut self, _composers: &mut ComposerSlots) {}

    /// The world finished loading.
    fn on_level_finalize(&mut self, _composers: &mut ComposerSlots) {}

    /// The local player's data arrived from the server.
    fn on_own_player_data_received(&mut self, _composers: &mut ComposerSlots) {}

    /// Runs before the 3D scene renders, regardless of open state.
    fn on_before_render_frame_3d(&mut self, _dt: f32) {}

    /// Whether the dialog counts as opened for the composer named `composer`.
    fn is_opened_in(&self, _composer: &str, opened: bool) -> bool {
        opened
    }
}

/// Behavior that keeps every default.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoBehavior;

impl DialogBehavior for NoBehavior {}

/// A UI window or HUD element: composers plus open/focus state.
pub struct Dialog<B: DialogBehavior = NoBehavior> {
    id: DialogId,
    config: DialogConfig,
    composers: ComposerSlots,
    opened: bool,
    focused: bool,
    /// Swallow the next key-press event.
    ///
    /// A single keystroke produces a key-down and a key-press. When the
    /// key-down already acted as a toggle, set this so the key-press does
    /// not reach the composers.
    pub ignore_next_key_press: bool,
    mouse_over_cursor: Option<String>,
    opened_listeners: Listeners,
    closed_listeners: Listeners,
    behavior: B,
}

impl<B: DialogBehavior> core::fmt::Debug for Dialog<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dialog")
            .field("id", &self.id)
            .field("name", &self.config.debug_name)
            .field("opened", &self.opened)
            .field("focused", &self.focused)
            .field("composers", &self.composers)
            .finish_non_exhaustive()
    }
}

impl Dialog<NoBehavior> {
    /// Create a closed dialog with default behavior.
    pub fn new(id: DialogId, config: DialogConfig) -> Self {
        Self::with_behavior(id, config, NoBehavior)
    }
}

impl<B: DialogBehavior> Dialog<B> {
    /// Create a closed dialog driven by `behavior`.
    pub fn with_behavior(id: DialogId, config: DialogConfig, behavior: B) -> Self {
        Self {
            id,
            config,
            composers: ComposerSlots::new(),
            opened: false,
            focused: false,
            ignore_next_key_press: false,
            mouse_over_cursor: None,
            opened_listeners: Listeners::new(),
            closed_listeners: Listeners::new(),
            behavior,
        }
    }

    /// Identity used with the manager.
    pub fn id(&self) -> DialogId {
        self.id
    }

    /// Static configuration.
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// Name used in log records.
    pub fn debug_name(&self) -> &str {
        &self.config.debug_name
    }

    /// Dialog or HUD.
    pub fn dialog_type(&self) -> DialogType {
        self.config.dialog_type
    }

    /// Stacking depth.
    pub fn z_size(&self) -> f32 {
        self.config.z_size
    }

    /// Draw order, `0` first and `1` last.
    pub fn draw_order(&self) -> f64 {
        self.config.draw_order
    }

    /// Input order, lower receives input first.
    pub fn input_order(&self) -> f64 {
        self.config.input_order
    }

    /// Whether the dialog may be focused.
    pub fn focusable(&self) -> bool {
        self.config.focusable
    }

    /// Whether the mouse should stay ungrabbed while open.
    pub fn prefers_ungrabbed_mouse(&self) -> bool {
        self.config.prefers_ungrabbed_mouse
    }

    /// Whether mouse grabbing is disabled while open.
    pub fn disable_mouse_grab(&self) -> bool {
        self.config.disable_mouse_grab
    }

    /// Whether the dialog takes every keystroke except escape while open.
    pub fn capture_all_inputs(&self) -> bool {
        self.config.capture_all_inputs
    }

    /// The pluggable behavior.
    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    /// The pluggable behavior, mutably.
    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    /// The composer slot map.
    pub fn composers(&self) -> &ComposerSlots {
        &self.composers
    }

    /// The composer slot map, mutably.
    pub fn composers_mut(&mut self) -> &mut ComposerSlots {
        &mut self.composers
    }

    /// The composer in the [`"single"`](SINGLE_COMPOSER) slot.
    pub fn single_composer(&self) -> Option<&dyn Composer> {
        self.composers.get(SINGLE_COMPOSER)
    }

    /// The composer in the `"single"` slot, mutably.
    pub fn single_composer_mut(&mut self) -> Option<&mut dyn Composer> {
        self.composers.get_mut(SINGLE_COMPOSER)
    }

    /// Place `composer` in the `"single"` slot, returning the one it replaced.
    pub fn set_single_composer(
        &mut self,
        composer: Box<dyn Composer>,
    ) -> Option<Box<dyn Composer>> {
        self.composers.set(SINGLE_COMPOSER, composer)
    }

    /// Dispose and drop every composer.
    pub fn clear_composers(&mut self) {
        self.composers.clear();
    }

    /// Dispose every composer. The dialog is not meant to be used afterwards.
    pub fn dispose(&mut self) {
        self.composers.dispose();
    }

    /// Whether the dialog is opened.
    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Whether the dialog is opened for the composer named `composer`.
    pub fn is_opened_in(&self, composer: &str) -> bool {
        self.behavior.is_opened_in(composer, self.opened)
    }

    /// Whether the dialog holds the focus token.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Cursor hint of the last composer rendered.
    pub fn mouse_over_cursor(&self) -> Option<&str> {
        self.mouse_over_cursor.as_deref()
    }

    /// Call `callback` on every closed → opened edge.
    pub fn add_opened_listener(&mut self, callback: impl FnMut() + 'static) -> ListenerId {
        self.opened_listeners.add(callback)
    }

    /// Remove an opened listener by handle.
    pub fn remove_opened_listener(&mut self, id: ListenerId) -> bool {
        self.opened_listeners.remove(id)
    }

    /// Call `callback` on every close.
    pub fn add_closed_listener(&mut self, callback: impl FnMut() + 'static) -> ListenerId {
        self.closed_listeners.add(callback)
    }

    /// Remove a closed listener by handle.
    pub fn remove_closed_listener(&mut self, id: ListenerId) -> bool {
        self.closed_listeners.remove(id)
    }

    /// Open the dialog.
    ///
    /// Registers with the manager if needed and requests focus for
    /// [`DialogType::Dialog`]. On the closed → opened edge, runs
    /// [`DialogBehavior::on_gui_opened`], then the opened listeners, then
    /// broadcasts through the manager. Returns `false` only when the
    /// behavior's [`can_open`](DialogBehavior::can_open) guard refuses.
    pub fn try_open(&mut self, cx: &mut DialogCx<'_>) -> bool {
        if !self.behavior.can_open() {
            debug!("{}: open refused", self.config.debug_name);
            return false;
        }

        let was_opened = self.opened;
        if !cx.gui.is_registered(self.id) {
            cx.gui.register_dialog(self.id);
        }

        self.opened = true;
        if self.config.dialog_type == DialogType::Dialog {
            cx.gui.request_focus(self.id);
        }

        if !was_opened {
            debug!("{}: opened", self.config.debug_name);
            self.behavior.on_gui_opened(&mut self.composers);
            self.opened_listeners.notify();
            cx.gui.notify_dialog_opened(self.id);
        }
        true
    }

    /// Close the dialog.
    ///
    /// Always leaves the dialog unfocused. Runs
    /// [`DialogBehavior::on_gui_closed`], then the closed listeners, then
    /// broadcasts through the manager, and unregisters when configured to.
    /// Returns `false` only when the behavior's
    /// [`can_close`](DialogBehavior::can_close) guard refuses.
    pub fn try_close(&mut self, cx: &mut DialogCx<'_>) -> bool {
        if !self.behavior.can_close() {
            debug!("{}: close refused", self.config.debug_name);
            return false;
        }

        self.opened = false;
        self.unfocus();
        debug!("{}: closed", self.config.debug_name);
        self.behavior.on_gui_closed(&mut self.composers);
        self.closed_listeners.notify();
        self.focused = false;
        cx.gui.notify_dialog_closed(self.id);

        if self.config.unregister_on_close {
            cx.gui.unregister_dialog(self.id);
        }
        true
    }

    /// Close if opened, open otherwise.
    pub fn toggle(&mut self, cx: &mut DialogCx<'_>) {
        if self.opened {
            self.try_close(cx);
        } else {
            self.try_open(cx);
        }
    }

    /// Take the focus token. No-op unless the dialog is focusable.
    ///
    /// Called by the manager when it grants a focus request.
    pub fn focus(&mut self) {
        if !self.config.focusable {
            return;
        }
        self.focused = true;
    }

    /// Drop the focus token.
    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    /// Handle a composer asking to gain or drop focus.
    ///
    /// Gaining focus goes through the manager; dropping it is immediate. A
    /// closed [`DialogType::Dialog`] ignores both.
    pub fn on_focus_changed(&mut self, cx: &mut DialogCx<'_>, want_focus: bool) {
        if want_focus == self.focused {
            return;
        }
        if self.config.dialog_type == DialogType::Dialog && !self.opened {
            return;
        }

        if want_focus {
            debug!("{}: composer requested focus", self.config.debug_name);
            cx.gui.request_focus(self.id);
        } else {
            self.focused = false;
        }
    }

    /// Apply focus requests posted by composers, in posting order.
    pub fn apply_focus_requests(&mut self, cx: &mut DialogCx<'_>) {
        for want_focus in self.composers.focus_sink().drain() {
            self.on_focus_changed(cx, want_focus);
        }
    }

    /// Register this dialog as the toggle handler of its hotkey, if it has one.
    pub fn bind_toggle_hotkey(&self, hotkeys: &mut dyn HotkeyResolver) {
        if let Some(code) = self.config.toggle_hotkey.as_deref() {
            hotkeys.set_toggle_handler(code, self.id);
        }
    }

    /// Toggle in response to the dialog's hotkey combination.
    ///
    /// Returns `false`, leaving the dialog untouched, when no toggle hotkey is
    /// bound or when a [`CreativeTool`](crate::HotkeyType::CreativeTool)
    /// hotkey is pressed outside creative mode.
    pub fn on_key_combination_toggle(&mut self, cx: &mut DialogCx<'_>) -> bool {
        let Some(code) = self.config.toggle_hotkey.as_deref() else {
            return false;
        };
        let Some(hotkey) = cx.hotkeys.lookup_hotkey(code) else {
            return false;
        };
        let mode = cx.hotkeys.current_game_mode();
        if !hotkey.permits_toggle(mode) {
            debug!(
                "{}: toggle hotkey `{}` refused in {mode:?}",
                self.config.debug_name, hotkey.code
            );
            return false;
        }

        self.toggle(cx);
        true
    }

    /// Close the dialog from its title-bar close button.
    pub fn on_title_bar_close(&mut self, cx: &mut DialogCx<'_>) -> bool {
        self.try_close(cx)
    }

    /// Escape was pressed while this dialog wants it.
    ///
    /// HUD dialogs ignore escape and return `false`; other dialogs try to close.
    pub fn on_escape_pressed(&mut self, cx: &mut DialogCx<'_>) -> bool {
        if self.config.dialog_type == DialogType::Hud {
            return false;
        }
        self.try_close(cx)
    }

    fn route<E: RoutedEvent>(
        &mut self,
        cx: &mut DialogCx<'_>,
        event: &mut E,
        kind: &str,
        handler: impl FnMut(&mut dyn Composer, &mut E),
    ) -> bool {
        let consumer = dispatch::offer(self.composers.values_mut(), event, handler);
        self.apply_focus_requests(cx);
        if let Some(index) = consumer {
            trace!("{}: {kind} handled by composer #{index}", self.config.debug_name);
        }
        consumer.is_some()
    }

    fn absorb_within_bounds<E: PointerEvent>(&self, event: &mut E, kind: &str) {
        if let Some(index) = dispatch::hit_bounds(self.composers.values(), event.pointer()) {
            trace!(
                "{}: {kind} absorbed by bounds of composer #{index}",
                self.config.debug_name
            );
            event.mark_handled();
        }
    }

    /// Route a key-down, then check the toggle hotkey.
    pub fn on_key_down(&mut self, cx: &mut DialogCx<'_>, event: &mut KeyEvent) {
        if event.handled {
            return;
        }
        let focused = self.focused;
        if self.route(cx, event, "key_down", |c, e| c.on_key_down(e, focused)) {
            return;
        }

        let Some(code) = self.config.toggle_hotkey.as_deref() else {
            return;
        };
        let Some(hotkey) = cx.hotkeys.lookup_hotkey(code) else {
            return;
        };
        if !hotkey.permits_toggle(cx.hotkeys.current_game_mode()) {
            return;
        }
        if cx.hotkeys.did_press(code, event, true) && self.try_close(cx) {
            event.handled = true;
        }
    }

    /// Route a key-up.
    pub fn on_key_up(&mut self, cx: &mut DialogCx<'_>, event: &mut KeyEvent) {
        if event.handled {
            return;
        }
        self.route(cx, event, "key_up", |c, e| c.on_key_up(e));
    }

    /// Route a key-press, honoring [`ignore_next_key_press`](Self::ignore_next_key_press).
    pub fn on_key_press(&mut self, cx: &mut DialogCx<'_>, event: &mut KeyEvent) {
        if self.ignore_next_key_press {
            self.ignore_next_key_press = false;
            event.handled = true;
            trace!("{}: key_press swallowed", self.config.debug_name);
            return;
        }
        if event.handled {
            return;
        }
        self.route(cx, event, "key_press", |c, e| c.on_key_press(e));
    }

    /// Route a mouse-down; absorbed by composer bounds only while opened.
    pub fn on_mouse_down(&mut self, cx: &mut DialogCx<'_>, event: &mut MouseEvent) {
        if event.handled {
            return;
        }
        if self.route(cx, event, "mouse_down", |c, e| c.on_mouse_down(e)) {
            return;
        }
        if !self.opened {
            return;
        }
        self.absorb_within_bounds(event, "mouse_down");
    }

    /// Route a mouse-up; absorbed by composer bounds.
    pub fn on_mouse_up(&mut self, cx: &mut DialogCx<'_>, event: &mut MouseEvent) {
        if event.handled {
            return;
        }
        if self.route(cx, event, "mouse_up", |c, e| c.on_mouse_up(e)) {
            return;
        }
        self.absorb_within_bounds(event, "mouse_up");
    }

    /// Route a mouse-move; absorbed by composer bounds.
    pub fn on_mouse_move(&mut self, cx: &mut DialogCx<'_>, event: &mut MouseEvent) {
        if event.handled {
            return;
        }
        if self.route(cx, event, "mouse_move", |c, e| c.on_mouse_move(e)) {
            return;
        }
        self.absorb_within_bounds(event, "mouse_move");
    }

    /// Route a wheel event; absorbed by composer bounds only while focused.
    pub fn on_mouse_wheel(&mut self, cx: &mut DialogCx<'_>, event: &mut MouseWheelEvent) {
        if event.is_handled() {
            return;
        }
        if self.route(cx, event, "mouse_wheel", |c, e| c.on_mouse_wheel(e)) {
            return;
        }
        if !self.focused {
            return;
        }
        self.absorb_within_bounds(event, "mouse_wheel");
    }

    /// Render every composer in slot order.
    ///
    /// The cursor hint becomes that of the last composer rendered, even when
    /// it has none. With no composers the previous hint is kept.
    ///
    /// Returns `true` when a composer posted a focus request while rendering;
    /// the caller applies it with [`apply_focus_requests`](Self::apply_focus_requests).
    pub fn on_render_gui(&mut self, dt: f32) -> bool {
        for composer in self.composers.values_mut() {
            composer.render(dt);
            self.mouse_over_cursor = composer.mouse_over_cursor().map(String::from);
        }
        self.composers.focus_sink().has_pending()
    }

    /// Run every composer's post-render step in slot order.
    ///
    /// Returns `true` when focus requests are waiting, as [`on_render_gui`](Self::on_render_gui).
    pub fn on_finalize_frame(&mut self, dt: f32) -> bool {
        for composer in self.composers.values_mut() {
            composer.post_render(dt);
        }
        self.composers.focus_sink().has_pending()
    }

    /// Forward the pre-3D-render tick to the behavior.
    pub fn on_before_render_frame_3d(&mut self, dt: f32) {
        self.behavior.on_before_render_frame_3d(dt);
    }

    /// Forward world-loaded to the behavior.
    pub fn on_level_finalize(&mut self) {
        self.behavior.on_level_finalize(&mut self.composers);
    }

    /// Forward player-data-received to the behavior.
    pub fn on_own_player_data_received(&mut self) {
        self.behavior.on_own_player_data_received(&mut self.composers);
    }

    /// Whether render hooks should run: the dialog is opened.
    pub fn should_receive_render_events(&self) -> bool {
        self.opened
    }

    /// Whether keyboard events should be routed here: the dialog is focused.
    pub fn should_receive_keyboard_events(&self) -> bool {
        self.focused
    }

    /// Whether mouse events should be routed here: the dialog is opened.
    pub fn should_receive_mouse_events(&self) -> bool {
        self.opened
    }
}
