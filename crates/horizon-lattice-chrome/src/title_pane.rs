//! The title pane state machine.
//!
//! A [`TitlePane`] owns the custom chrome of one toolkit window. Its state is
//! the cross product of installed/uninstalled, [`ActivationState`] and
//! [`FrameState`]; everything else (control set, layout, colors) is derived
//! from that state and the window's properties.
//!
//! # Lifecycle
//!
//! ```text
//!  UNINSTALLED --install()--> INSTALLED --uninstall()--> UNINSTALLED
//!       ^                         |
//!       +---- native failure -----+
//! ```
//!
//! [`install`](TitlePane::install) resolves the native handle, switches the
//! window into custom-chrome mode, forces a resize cycle so the native layer
//! recomputes its client area, then subscribes to the window. A window
//! whose handle can't be resolved keeps its native chrome.
//!
//! # Reentrancy
//!
//! Window notifications may arrive while the pane is in the middle of a
//! transition (a native maximize that reports the new state synchronously,
//! for example). They are queued and handled in arrival order once the
//! running transition completes. Repaint and close requests to the window
//! are deferred the same way, so the host may call back into the pane from
//! them.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::bridge::DecorationBridge;
use crate::config::TitlePaneConfig;
use crate::controls::{
    ActivationState, ChromeAction, ControlKind, ControlSetInput, ControlSpec, FrameState,
    build_control_set,
};
use crate::error::{ChromeError, ChromeResult};
use crate::geometry::{Rect, Size};
use crate::handle::{NativeHandleResolver, WindowHandle};
use crate::layout::{ChromeGeometry, ChromeLayout, ChromeLayoutEngine, LayoutInput};
use crate::logging::targets;
use crate::router::{PropertyChangeRouter, Route};
use crate::theme::{
    ChromeTheme, IconPair, IconProvider, PaintContext, Rgb, TitleColors, best_icon_for,
};
use crate::window::{
    ChromeWindow, DecorationStyle, ExtendedState, Insets, MenuBarMetrics, WindowKind,
};

/// An entry of the window icon's popup menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMenuEntry {
    /// A window action and whether it is currently enabled.
    Action {
        action: ChromeAction,
        enabled: bool,
    },
    Separator,
}

/// Custom title bar of one toolkit window.
///
/// Cloning a `TitlePane` is not supported; share it behind an `Rc` if more
/// than one owner is needed. Dropping the pane uninstalls the chrome.
pub struct TitlePane<W: ChromeWindow + 'static> {
    shared: Rc<Shared<W>>,
}

/// Work that arrives from outside the running transition.
#[derive(Debug)]
enum Notification {
    Route(Route),
    Activation(bool),
    Resize(Size),
    MenuBarChanged,
    Uninstall,
}

/// Window calls deferred until the state machine is idle.
#[derive(Debug, Default, Clone, Copy)]
struct Effects {
    repaint: bool,
    close: bool,
}

impl Effects {
    fn is_empty(&self) -> bool {
        !self.repaint && !self.close
    }
}

struct Shared<W: ChromeWindow + 'static> {
    window: Rc<W>,
    core: RefCell<TitlePaneCore<W>>,
    pending: RefCell<VecDeque<Notification>>,
}

impl<W: ChromeWindow + 'static> Shared<W> {
    /// Queue a notification and process the queue if the core is idle.
    fn submit(&self, notification: Notification) {
        self.pending.borrow_mut().push_back(notification);
        self.finish();
    }

    /// Process queued notifications, then run deferred window calls.
    fn finish(&self) {
        loop {
            self.drain();

            let effects = match self.core.try_borrow_mut() {
                Ok(mut core) => std::mem::take(&mut core.effects),
                Err(_) => return,
            };
            if effects.is_empty() {
                return;
            }
            if effects.close {
                self.window.request_close();
            }
            if effects.repaint {
                self.window.request_repaint();
            }
        }
    }

    fn drain(&self) {
        loop {
            let Ok(mut core) = self.core.try_borrow_mut() else {
                return;
            };
            let Some(next) = self.pending.borrow_mut().pop_front() else {
                return;
            };
            core.handle(next);
        }
    }
}

struct TitlePaneCore<W: ChromeWindow + 'static> {
    window: Rc<W>,
    bridge: DecorationBridge,
    resolver: NativeHandleResolver,
    router: PropertyChangeRouter,
    theme: Rc<dyn ChromeTheme>,
    icons: Rc<dyn IconProvider>,
    engine: ChromeLayoutEngine,

    handle: WindowHandle,
    installed: bool,
    activation: ActivationState,
    frame_state: FrameState,
    resizable: bool,
    menu_bar: Option<MenuBarMetrics>,
    colors: Option<TitleColors>,

    size: Size,
    controls: Vec<ControlSpec>,
    layout: ChromeLayout,
    layout_generation: u64,
    effects: Effects,
}

impl<W: ChromeWindow + 'static> TitlePaneCore<W> {
    fn config(&self) -> &TitlePaneConfig {
        self.engine.config()
    }

    fn style(&self) -> DecorationStyle {
        self.window.decoration_style()
    }

    fn effective_resizable(&self) -> bool {
        self.style() != DecorationStyle::None && self.window.is_resizable()
    }

    fn frame_state_of(&self, state: ExtendedState) -> FrameState {
        match self.window.kind() {
            WindowKind::Frame => FrameState::from_extended_state(state),
            WindowKind::Dialog => FrameState::Normal,
        }
    }

    fn should_hide(&self) -> bool {
        if !self.handle.is_valid() {
            return true;
        }
        let untitled = self.window.title().is_none_or(|title| title.is_empty());
        self.style() == DecorationStyle::None && self.menu_bar.is_none() && untitled
    }

    // ------------------------------------------------------------------------
    // Install / uninstall
    // ------------------------------------------------------------------------

    fn install(&mut self, shared: Weak<Shared<W>>) -> bool {
        if self.installed {
            return true;
        }

        let handle = self.resolver.resolve(&*self.window);
        if !handle.is_valid() {
            tracing::debug!(target: targets::TITLE_PANE, "no native handle, native chrome stays");
            return false;
        }
        if let Err(err) = self.bridge.install(handle) {
            tracing::warn!(target: targets::TITLE_PANE, error = %err, "chrome install failed");
            return false;
        }

        self.handle = handle;
        self.installed = true;

        self.frame_state = self.frame_state_of(self.window.extended_state());
        self.activation = ActivationState::from_active(self.window.is_active());
        self.resizable = self.effective_resizable();
        self.menu_bar = self.window.menu_bar();
        self.colors = Some(self.resolve_colors());

        // The native layer picks these up on the next resize cycle.
        let pushed = self
            .bridge
            .set_resizable(handle, self.resizable)
            .and_then(|()| self.bridge.set_background(handle, self.window.background()));
        if let Err(err) = pushed {
            self.fail(err);
            return false;
        }
        self.force_native_resize();

        self.size = Size::new(
            self.window.bounds().width,
            self.engine
                .preferred_height(self.window.title_font_height(), self.menu_bar),
        );
        self.attach_router(shared);

        self.rebuild_controls();
        if !self.relayout() {
            return false;
        }
        self.effects.repaint = true;

        tracing::debug!(
            target: targets::TITLE_PANE,
            %handle,
            frame_state = ?self.frame_state,
            activation = ?self.activation,
            resizable = self.resizable,
            "chrome installed"
        );
        self.installed
    }

    fn attach_router(&mut self, shared: Weak<Shared<W>>) {
        let routes = shared.clone();
        let sink = Rc::new(move |route: Route| {
            if let Some(shared) = routes.upgrade() {
                shared.submit(Notification::Route(route));
            }
        });
        let activation = Rc::new(move |active: bool| {
            if let Some(shared) = shared.upgrade() {
                shared.submit(Notification::Activation(active));
            }
        });
        self.router.attach(&*self.window, sink, activation);
    }

    /// Grow the window by one pixel and shrink it back, keeping its center.
    ///
    /// The native layer only recomputes the client area on a resize.
    fn force_native_resize(&mut self) {
        let bounds = self.window.bounds();
        let center_x = bounds.x + bounds.width / 2;
        let center_y = bounds.y + bounds.height / 2;
        let size = self.window.preferred_size().unwrap_or(bounds.size());

        self.window.set_size(size.width, size.height + 1);
        self.window.set_size(size.width, size.height);
        self.window
            .set_location(center_x - size.width / 2, center_y - size.height / 2);

        tracing::trace!(
            target: targets::TITLE_PANE,
            width = size.width,
            height = size.height,
            "forced native resize"
        );
    }

    fn uninstall(&mut self) {
        if !self.installed {
            return;
        }

        self.router.detach(&*self.window);
        if let Err(err) = self.bridge.uninstall(self.handle) {
            tracing::warn!(target: targets::TITLE_PANE, error = %err, "chrome uninstall failed");
        }
        self.reset();
        tracing::debug!(target: targets::TITLE_PANE, "chrome uninstalled");
    }

    /// Leave the window with its native chrome after a native failure.
    fn fail(&mut self, err: ChromeError) {
        tracing::error!(
            target: targets::TITLE_PANE,
            error = %err,
            "native call failed, falling back to native chrome"
        );
        self.router.detach(&*self.window);
        // Best effort; the window may already be gone.
        let _ = self.bridge.uninstall(self.handle);
        self.reset();
    }

    fn reset(&mut self) {
        if self.menu_bar.take().is_some() {
            self.window.restore_menu_bar();
        }
        self.handle = WindowHandle::INVALID;
        self.resolver.invalidate();
        self.installed = false;
        self.frame_state = FrameState::Normal;
        self.activation = ActivationState::Inactive;
        self.resizable = false;
        self.colors = None;
        self.controls.clear();
        self.layout = ChromeLayout::empty();
        self.layout_generation += 1;
        self.effects.repaint = true;
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn handle(&mut self, notification: Notification) {
        match notification {
            Notification::Route(route) => self.apply_route(route),
            Notification::Activation(active) => self.set_activation(active),
            Notification::Resize(size) => self.resize(size),
            Notification::MenuBarChanged => self.menu_bar_changed(),
            Notification::Uninstall => self.uninstall(),
        }
    }

    fn apply_route(&mut self, route: Route) {
        if !self.installed {
            return;
        }
        match route {
            Route::Resizable(_) => self.sync_resizable(),
            Route::ExtendedState(state) => {
                let state = state.unwrap_or_else(|| self.window.extended_state());
                self.set_frame_state(self.frame_state_of(state));
            }
            Route::Title => {
                if self.should_hide() != self.layout.is_hidden() {
                    self.relayout();
                }
                self.effects.repaint = true;
            }
            Route::Icon => {
                self.rebuild_controls();
                if self.relayout() {
                    self.effects.repaint = true;
                }
            }
            Route::Orientation => {
                if self.relayout() {
                    self.effects.repaint = true;
                }
            }
            Route::Background(color) => {
                let color = color.unwrap_or_else(|| self.window.background());
                if let Err(err) = self.bridge.set_background(self.handle, color) {
                    self.fail(err);
                    return;
                }
                self.effects.repaint = true;
            }
            Route::Ignore => {}
        }
    }

    fn set_activation(&mut self, active: bool) {
        if !self.installed {
            return;
        }
        let activation = ActivationState::from_active(active);
        if activation == self.activation {
            return;
        }
        self.activation = activation;
        self.colors = Some(self.resolve_colors());
        self.effects.repaint = true;
        tracing::trace!(target: targets::TITLE_PANE, ?activation, "activation changed");
    }

    fn sync_resizable(&mut self) {
        let resizable = self.effective_resizable();
        if resizable == self.resizable {
            return;
        }
        self.resizable = resizable;
        if let Err(err) = self.bridge.set_resizable(self.handle, resizable) {
            self.fail(err);
            return;
        }
        tracing::debug!(target: targets::TITLE_PANE, resizable, "resizability changed");
        self.rebuild_controls();
        if self.relayout() {
            self.effects.repaint = true;
        }
    }

    fn set_frame_state(&mut self, frame_state: FrameState) {
        if frame_state == self.frame_state {
            return;
        }
        self.frame_state = frame_state;
        tracing::debug!(target: targets::TITLE_PANE, ?frame_state, "frame state changed");
        self.rebuild_controls();
        if self.relayout() {
            self.effects.repaint = true;
        }
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        if self.installed {
            self.relayout();
        }
    }

    fn menu_bar_changed(&mut self) {
        if !self.installed {
            return;
        }
        self.menu_bar = self.window.menu_bar();
        self.rebuild_controls();
        if self.relayout() {
            self.effects.repaint = true;
        }
    }

    /// Re-read state the window may have changed without notifying.
    fn resync(&mut self) {
        if !self.installed {
            return;
        }
        self.set_frame_state(self.frame_state_of(self.window.extended_state()));
        if self.installed {
            self.sync_resizable();
        }
    }

    // ------------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------------

    fn resolve_colors(&self) -> TitleColors {
        TitleColors::resolve(self.theme.as_ref(), self.style(), self.activation)
    }

    fn rebuild_controls(&mut self) {
        let input = ControlSetInput {
            style: self.style(),
            kind: self.window.kind(),
            resizable: self.resizable,
            frame_state: self.frame_state,
            has_menu_bar: self.menu_bar.is_some(),
        };
        let window_icon = best_icon_for(&self.window.icon_images(), self.config().icon_size())
            .map(IconPair::uniform);
        self.controls = build_control_set(&input, self.icons.as_ref(), window_icon);
    }

    /// Lay the controls out and push the insets to the native layer.
    ///
    /// Returns `false` if the push failed and the chrome was removed.
    fn relayout(&mut self) -> bool {
        let input = LayoutInput {
            width: self.size.width,
            font_height: self.window.title_font_height(),
            direction: self.window.text_direction(),
            controls: &self.controls,
            menu_bar: self.menu_bar,
            hidden: self.should_hide(),
            frame_state_supported: self.window.frame_state_supported(),
        };
        self.layout = self.engine.layout(&input);
        self.layout_generation += 1;

        let geometry = self.layout.geometry();
        let config = self.config();
        let (left, right, bar_height) = (
            config.scaled(geometry.left_inset),
            config.scaled(geometry.right_inset),
            config.scaled(geometry.bar_height),
        );
        match self
            .bridge
            .update_chrome_insets(self.handle, left, right, bar_height)
        {
            Ok(()) => true,
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    fn is_action_enabled(&self, action: ChromeAction) -> bool {
        self.installed
            && self
                .controls
                .iter()
                .any(|control| control.kind == action.control() && control.enabled)
    }

    fn perform(&mut self, action: ChromeAction) -> bool {
        if !self.is_action_enabled(action) {
            tracing::trace!(target: targets::TITLE_PANE, action = action.name(), "action ignored");
            return false;
        }

        tracing::debug!(target: targets::TITLE_PANE, action = action.name(), "performing action");
        let result: ChromeResult<()> = match action {
            ChromeAction::Close => {
                self.effects.close = true;
                Ok(())
            }
            ChromeAction::Minimize => self.bridge.minimize(self.handle),
            ChromeAction::Maximize => self.bridge.maximize(self.handle),
            ChromeAction::Restore => self.bridge.restore(self.handle),
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    fn system_menu(&self) -> Vec<SystemMenuEntry> {
        let frame = self.installed
            && self.style() == DecorationStyle::Frame
            && self.window.kind() == WindowKind::Frame;
        if !frame {
            return Vec::new();
        }

        let entry = |action: ChromeAction| SystemMenuEntry::Action {
            action,
            enabled: self.is_action_enabled(action),
        };
        let mut entries = vec![entry(ChromeAction::Restore), entry(ChromeAction::Minimize)];
        if self.window.frame_state_supported() {
            entries.push(entry(ChromeAction::Maximize));
        }
        entries.push(SystemMenuEntry::Separator);
        entries.push(entry(ChromeAction::Close));
        entries
    }

    // ------------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------------

    fn paint(&self, ctx: &mut dyn PaintContext) {
        let Some(colors) = self.colors else {
            return;
        };
        if self.layout.is_hidden() {
            return;
        }

        let width = self.layout.width();
        let height = self.layout.geometry().bar_height;
        ctx.fill_rect(Rect::new(0, 0, width, height), colors.background);

        if self.menu_bar.is_some() && self.style() != DecorationStyle::None {
            ctx.fill_rect(Rect::new(0, height - 1, width, 1), colors.border);
        }

        for control in self.layout.controls() {
            let bounds = control.bounds;
            if bounds.is_empty() {
                continue;
            }
            match control.kind {
                ControlKind::Title => {
                    if let Some(title) = self.window.title().filter(|title| !title.is_empty()) {
                        ctx.draw_text(&title, bounds, colors.foreground);
                    }
                }
                ControlKind::Menu => {}
                _ => {
                    if let Some(icon) = control.icon(self.activation) {
                        let x = bounds.x + (bounds.width - icon.width()) / 2;
                        let y = bounds.y + (bounds.height - icon.height()) / 2;
                        icon.draw(ctx, x, y);
                    }
                }
            }
        }
    }
}

impl<W: ChromeWindow + 'static> TitlePane<W> {
    /// Create an uninstalled title pane for `window`.
    pub fn new(
        window: Rc<W>,
        bridge: DecorationBridge,
        theme: Rc<dyn ChromeTheme>,
        icons: Rc<dyn IconProvider>,
        config: TitlePaneConfig,
    ) -> Self {
        let mut bridge = bridge;
        bridge.set_assert_native_calls(config.assert_native_calls());

        let core = TitlePaneCore {
            window: window.clone(),
            bridge,
            resolver: NativeHandleResolver::new(),
            router: PropertyChangeRouter::new(),
            theme,
            icons,
            engine: ChromeLayoutEngine::new(config),
            handle: WindowHandle::INVALID,
            installed: false,
            activation: ActivationState::Inactive,
            frame_state: FrameState::Normal,
            resizable: false,
            menu_bar: None,
            colors: None,
            size: Size::ZERO,
            controls: Vec::new(),
            layout: ChromeLayout::empty(),
            layout_generation: 0,
            effects: Effects::default(),
        };

        Self {
            shared: Rc::new(Shared {
                window,
                core: RefCell::new(core),
                pending: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Replace the handle resolver, e.g. to log into a window's span.
    pub fn with_resolver(self, resolver: NativeHandleResolver) -> Self {
        self.shared.core.borrow_mut().resolver = resolver;
        self
    }

    /// The window this pane decorates.
    pub fn window(&self) -> &Rc<W> {
        &self.shared.window
    }

    fn read<R>(&self, f: impl FnOnce(&TitlePaneCore<W>) -> R) -> Option<R> {
        self.shared.core.try_borrow().ok().map(|core| f(&core))
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Install the custom chrome.
    ///
    /// Returns `false` (and leaves the native chrome in place) if the native
    /// handle can't be resolved or a native call fails. Installing an
    /// installed pane is a no-op that returns `true`.
    pub fn install(&self) -> bool {
        let installed = match self.shared.core.try_borrow_mut() {
            Ok(mut core) => core.install(Rc::downgrade(&self.shared)),
            Err(_) => {
                tracing::warn!(target: targets::TITLE_PANE, "install called during a transition");
                return false;
            }
        };
        self.shared.finish();
        installed
    }

    /// Remove the custom chrome. Idempotent.
    pub fn uninstall(&self) {
        self.shared.submit(Notification::Uninstall);
    }

    /// Whether the custom chrome is installed.
    pub fn is_installed(&self) -> bool {
        self.read(|core| core.installed).unwrap_or(false)
    }

    /// The native handle while installed.
    pub fn handle(&self) -> Option<WindowHandle> {
        self.read(|core| core.installed.then_some(core.handle))
            .flatten()
    }

    // ------------------------------------------------------------------------
    // Host notifications
    // ------------------------------------------------------------------------

    /// Lay the chrome out for a new container size.
    pub fn set_size(&self, width: i32, height: i32) {
        self.shared
            .submit(Notification::Resize(Size::new(width, height)));
    }

    /// The window's menu bar was added, removed or resized.
    pub fn menu_bar_changed(&self) {
        self.shared.submit(Notification::MenuBarChanged);
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// The current frame state.
    pub fn frame_state(&self) -> FrameState {
        self.read(|core| core.frame_state)
            .unwrap_or(FrameState::Normal)
    }

    /// The current activation state.
    pub fn activation(&self) -> ActivationState {
        self.read(|core| core.activation)
            .unwrap_or(ActivationState::Inactive)
    }

    /// Effective resizability as last pushed to the native layer.
    pub fn is_resizable(&self) -> bool {
        self.read(|core| core.resizable).unwrap_or(false)
    }

    /// The current control set with its last layout bounds.
    pub fn controls(&self) -> Vec<ControlSpec> {
        self.read(|core| core.layout.controls().to_vec())
            .unwrap_or_default()
    }

    /// Kinds of the current controls, in leading-to-trailing order.
    pub fn control_kinds(&self) -> Vec<ControlKind> {
        self.read(|core| core.controls.iter().map(|control| control.kind).collect())
            .unwrap_or_default()
    }

    /// The last layout.
    pub fn layout(&self) -> ChromeLayout {
        self.read(|core| core.layout.clone()).unwrap_or_default()
    }

    /// The geometry of the last layout, in logical pixels.
    pub fn geometry(&self) -> ChromeGeometry {
        self.read(|core| core.layout.geometry())
            .unwrap_or(ChromeGeometry::HIDDEN)
    }

    /// Number of layout passes run so far.
    pub fn layout_generation(&self) -> u64 {
        self.read(|core| core.layout_generation).unwrap_or(0)
    }

    /// The title bar colors for the current style and activation.
    pub fn colors(&self) -> Option<TitleColors> {
        self.read(|core| core.colors).flatten()
    }

    /// The bar background for the current activation.
    pub fn background(&self) -> Option<Rgb> {
        self.colors().map(|colors| colors.background)
    }

    /// Preferred size of the title pane container.
    pub fn preferred_size(&self) -> Size {
        self.read(|core| {
            core.engine.preferred_size(
                core.window.title_font_height(),
                core.menu_bar,
                core.should_hide(),
            )
        })
        .unwrap_or(Size::ZERO)
    }

    /// Amount to add to the window size to compensate for native frame
    /// insets the toolkit still reports while the custom chrome is
    /// installed.
    pub fn window_size_adjustment(&self) -> Insets {
        self.read(|core| {
            if core.installed {
                core.window.native_insets().negated()
            } else {
                Insets::ZERO
            }
        })
        .unwrap_or(Insets::ZERO)
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    /// Perform a window action.
    ///
    /// Returns `false` if the action's control is absent or disabled, or the
    /// pane is busy with another transition.
    pub fn perform(&self, action: ChromeAction) -> bool {
        let performed = match self.shared.core.try_borrow_mut() {
            Ok(mut core) => core.perform(action),
            Err(_) => {
                tracing::warn!(
                    target: targets::TITLE_PANE,
                    action = action.name(),
                    "action requested during a transition"
                );
                return false;
            }
        };
        self.shared.finish();
        performed
    }

    /// Whether an action is currently available.
    pub fn is_action_enabled(&self, action: ChromeAction) -> bool {
        self.read(|core| core.is_action_enabled(action))
            .unwrap_or(false)
    }

    /// Entries of the window icon's popup menu. Empty for dialogs.
    pub fn system_menu(&self) -> Vec<SystemMenuEntry> {
        self.read(|core| core.system_menu()).unwrap_or_default()
    }

    /// The control at a point of the title pane.
    pub fn control_at(&self, x: i32, y: i32) -> Option<ControlKind> {
        self.read(|core| core.layout.control_at(x, y)).flatten()
    }

    /// Perform the action bound to the control at a point.
    pub fn click(&self, x: i32, y: i32) -> bool {
        match self.control_at(x, y).and_then(|kind| kind.action()) {
            Some(action) => self.perform(action),
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------------

    /// Paint the title pane.
    ///
    /// Before painting, frame state and resizability are re-read from the
    /// window in case a notification was missed.
    pub fn paint(&self, ctx: &mut dyn PaintContext) {
        let Ok(mut core) = self.shared.core.try_borrow_mut() else {
            return;
        };
        core.resync();
        core.paint(ctx);
        if core.installed {
            core.effects.repaint = false;
        }
        drop(core);
        self.shared.finish();
    }
}

impl<W: ChromeWindow + 'static> Drop for TitlePane<W> {
    fn drop(&mut self) {
        if let Ok(mut core) = self.shared.core.try_borrow_mut() {
            core.uninstall();
        }
    }
}

impl<W: ChromeWindow + 'static> fmt::Debug for TitlePane<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TitlePane");
        if let Ok(core) = self.shared.core.try_borrow() {
            s.field("installed", &core.installed)
                .field("handle", &core.handle)
                .field("frame_state", &core.frame_state)
                .field("activation", &core.activation)
                .field("resizable", &core.resizable)
                .field("bridge", &core.bridge);
        }
        s.finish_non_exhaustive()
    }
}
