//! [`ChromeWindow`] adapter for winit windows.
//!
//! winit reports only part of what the title pane needs, so
//! [`WinitChromeWindow`] caches the rest (icons, text direction, background,
//! menu bar, title font metrics) and fires property notifications from its
//! setters. Feed it the window's events with
//! [`handle_event`](WinitChromeWindow::handle_event) to turn focus changes
//! into activation notifications and maximize/minimize changes into
//! extended-state notifications.
//!
//! ```ignore
//! let window = Rc::new(WinitChromeWindow::new(winit_window.clone(), WindowKind::Frame));
//! let bridge = DecorationBridge::new(WinitDecorations::with_window(winit_window)?);
//! let pane = TitlePane::new(window.clone(), bridge, theme, icons, TitlePaneConfig::new());
//! pane.install();
//!
//! // In the event loop:
//! window.handle_event(&event);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use raw_window_handle::{HandleError, HasWindowHandle, WindowHandle as BorrowedHandle};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::geometry::Rect;
use crate::logging::targets;
use crate::notifier::{ActivationCallback, PropertyCallback, PropertyNotifier, SubscriptionId};
use crate::theme::{Icon, Rgb};
use crate::window::{
    ChromeWindow, DecorationStyle, ExtendedState, MenuBarMetrics, PropertyValue, TextDirection,
    WindowKind, WindowProperty,
};

/// Default line height reported until the host sets the real font metrics.
const DEFAULT_FONT_HEIGHT: i32 = 16;

/// A chrome notification produced by a winit window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventNotification {
    Activation(bool),
    ExtendedState(ExtendedState),
}

/// Extended state for winit's maximized and minimized flags.
fn extended_state_from(maximized: bool, minimized: bool) -> ExtendedState {
    let mut state = ExtendedState::NORMAL;
    if maximized {
        state |= ExtendedState::MAXIMIZED_BOTH;
    }
    if minimized {
        state |= ExtendedState::ICONIFIED;
    }
    state
}

fn state_notification(last: ExtendedState, current: ExtendedState) -> Option<EventNotification> {
    (last != current).then_some(EventNotification::ExtendedState(current))
}

/// Map an event onto a notification given the last reported state and focus.
///
/// `current_state` is sampled only for events that can change the state.
fn notification_for(
    event: &WindowEvent,
    last_state: ExtendedState,
    last_focused: bool,
    current_state: impl FnOnce() -> ExtendedState,
) -> Option<EventNotification> {
    match event {
        WindowEvent::Focused(focused) => {
            (*focused != last_focused).then_some(EventNotification::Activation(*focused))
        }
        WindowEvent::Resized(_) | WindowEvent::Occluded(_) => {
            state_notification(last_state, current_state())
        }
        _ => None,
    }
}

fn notify(notifier: &PropertyNotifier, notification: EventNotification) {
    match notification {
        EventNotification::Activation(active) => notifier.notify_activation(active),
        EventNotification::ExtendedState(state) => {
            notifier.fire(WindowProperty::ExtendedState, PropertyValue::State(state))
        }
    }
}

/// Store `value`, returning `true` if it differs from the previous one.
fn replace_changed<T: Copy + PartialEq>(cell: &Cell<T>, value: T) -> bool {
    cell.replace(value) != value
}

/// A winit window seen through the [`ChromeWindow`] interface.
pub struct WinitChromeWindow {
    window: Arc<Window>,
    kind: WindowKind,
    style: Cell<DecorationStyle>,
    title: RefCell<Option<String>>,
    icons: RefCell<Vec<Arc<dyn Icon>>>,
    direction: Cell<TextDirection>,
    background: Cell<Rgb>,
    font_height: Cell<i32>,
    menu_bar: Cell<Option<MenuBarMetrics>>,
    extended_state: Cell<ExtendedState>,
    active: Cell<bool>,
    resizable: Cell<bool>,
    notifier: PropertyNotifier,
    close_handler: RefCell<Option<Rc<dyn Fn()>>>,
}

impl WinitChromeWindow {
    /// Wrap a winit window.
    pub fn new(window: Arc<Window>, kind: WindowKind) -> Self {
        let title = window.title();
        let state = Self::query_state(&window);
        let resizable = window.is_resizable();
        let active = window.has_focus();

        Self {
            window,
            kind,
            style: Cell::new(match kind {
                WindowKind::Frame => DecorationStyle::Frame,
                WindowKind::Dialog => DecorationStyle::PlainDialog,
            }),
            title: RefCell::new((!title.is_empty()).then_some(title)),
            icons: RefCell::new(Vec::new()),
            direction: Cell::new(TextDirection::LeftToRight),
            background: Cell::new(Rgb::WHITE),
            font_height: Cell::new(DEFAULT_FONT_HEIGHT),
            menu_bar: Cell::new(None),
            extended_state: Cell::new(state),
            active: Cell::new(active),
            resizable: Cell::new(resizable),
            notifier: PropertyNotifier::new(),
            close_handler: RefCell::new(None),
        }
    }

    /// The wrapped winit window.
    pub fn winit_window(&self) -> &Arc<Window> {
        &self.window
    }

    /// The notifier backing the subscriptions.
    pub fn notifier(&self) -> &PropertyNotifier {
        &self.notifier
    }

    fn query_state(window: &Window) -> ExtendedState {
        extended_state_from(window.is_maximized(), window.is_minimized().unwrap_or(false))
    }

    /// Translate a winit window event into chrome notifications.
    ///
    /// Returns `true` if a notification was fired.
    pub fn handle_event(&self, event: &WindowEvent) -> bool {
        let notification = notification_for(
            event,
            self.extended_state.get(),
            self.active.get(),
            || Self::query_state(&self.window),
        );
        self.deliver(notification)
    }

    /// Re-read the maximized/minimized state from winit.
    pub fn refresh_state(&self) -> bool {
        let state = Self::query_state(&self.window);
        self.deliver(state_notification(self.extended_state.get(), state))
    }

    fn deliver(&self, notification: Option<EventNotification>) -> bool {
        let Some(notification) = notification else {
            return false;
        };
        match notification {
            EventNotification::Activation(active) => self.active.set(active),
            EventNotification::ExtendedState(state) => {
                tracing::trace!(target: targets::CHROME, state = state.bits(), "winit window state changed");
                self.extended_state.set(state);
            }
        }
        notify(&self.notifier, notification);
        true
    }

    /// Set the window title.
    pub fn set_title(&self, title: Option<String>) {
        self.window.set_title(title.as_deref().unwrap_or_default());
        self.title.replace(title.clone());
        self.notifier
            .fire(WindowProperty::Title, PropertyValue::Text(title));
    }

    /// Set whether the user may resize the window.
    pub fn set_resizable(&self, resizable: bool) {
        if replace_changed(&self.resizable, resizable) {
            self.notifier
                .fire(WindowProperty::Resizable, PropertyValue::Bool(resizable));
        }
    }

    /// Set the window icon images.
    pub fn set_icon_images(&self, icons: Vec<Arc<dyn Icon>>) {
        self.icons.replace(icons);
        self.notifier
            .fire(WindowProperty::IconImages, PropertyValue::Unspecified);
    }

    /// Set the text direction.
    pub fn set_text_direction(&self, direction: TextDirection) {
        if replace_changed(&self.direction, direction) {
            self.notifier.fire(
                WindowProperty::ComponentOrientation,
                PropertyValue::Direction(direction),
            );
        }
    }

    /// Set the background color.
    pub fn set_background(&self, color: Rgb) {
        if replace_changed(&self.background, color) {
            self.notifier
                .fire(WindowProperty::Background, PropertyValue::Color(Some(color)));
        }
    }

    /// Set the decoration style. Takes effect on the next install.
    pub fn set_decoration_style(&self, style: DecorationStyle) {
        self.style.set(style);
    }

    /// Set the embedded menu bar metrics.
    ///
    /// Call [`TitlePane::menu_bar_changed`](crate::TitlePane::menu_bar_changed)
    /// afterwards.
    pub fn set_menu_bar(&self, menu_bar: Option<MenuBarMetrics>) {
        self.menu_bar.set(menu_bar);
    }

    /// Set the line height of the title font.
    pub fn set_title_font_height(&self, height: i32) {
        self.font_height.set(height.max(0));
    }

    /// Set the handler run when the chrome's close button is pressed.
    pub fn on_close_requested(&self, handler: impl Fn() + 'static) {
        self.close_handler.replace(Some(Rc::new(handler)));
    }
}

impl HasWindowHandle for WinitChromeWindow {
    fn window_handle(&self) -> Result<BorrowedHandle<'_>, HandleError> {
        self.window.window_handle()
    }
}

impl ChromeWindow for WinitChromeWindow {
    fn kind(&self) -> WindowKind {
        self.kind
    }

    fn decoration_style(&self) -> DecorationStyle {
        self.style.get()
    }

    fn extended_state(&self) -> ExtendedState {
        self.extended_state.get()
    }

    fn is_resizable(&self) -> bool {
        self.resizable.get()
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn title(&self) -> Option<String> {
        self.title.borrow().clone()
    }

    fn icon_images(&self) -> Vec<Arc<dyn Icon>> {
        self.icons.borrow().clone()
    }

    fn text_direction(&self) -> TextDirection {
        self.direction.get()
    }

    fn background(&self) -> Rgb {
        self.background.get()
    }

    fn bounds(&self) -> Rect {
        let position = self
            .window
            .outer_position()
            .unwrap_or(PhysicalPosition::new(0, 0));
        let size = self.window.inner_size();
        Rect::new(
            position.x,
            position.y,
            i32::try_from(size.width).unwrap_or(i32::MAX),
            i32::try_from(size.height).unwrap_or(i32::MAX),
        )
    }

    fn set_size(&self, width: i32, height: i32) {
        let size = PhysicalSize::new(width.max(1) as u32, height.max(1) as u32);
        let _ = self.window.request_inner_size(size);
    }

    fn set_location(&self, x: i32, y: i32) {
        self.window.set_outer_position(PhysicalPosition::new(x, y));
    }

    fn title_font_height(&self) -> i32 {
        self.font_height.get()
    }

    fn menu_bar(&self) -> Option<MenuBarMetrics> {
        self.menu_bar.get()
    }

    fn request_close(&self) {
        let handler = self.close_handler.borrow().clone();
        match handler {
            Some(handler) => handler(),
            None => {
                tracing::debug!(target: targets::CHROME, "close requested without a handler");
            }
        }
    }

    fn request_repaint(&self) {
        self.window.request_redraw();
    }

    fn subscribe(&self, name: &str, callback: PropertyCallback) -> SubscriptionId {
        self.notifier.subscribe(name, callback)
    }

    fn subscribe_activation(&self, callback: ActivationCallback) -> SubscriptionId {
        self.notifier.subscribe_activation(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

impl fmt::Debug for WinitChromeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinitChromeWindow")
            .field("id", &self.window.id())
            .field("kind", &self.kind)
            .field("extended_state", &self.extended_state.get())
            .field("active", &self.active.get())
            .field("resizable", &self.resizable.get())
            .finish_non_exhaustive()
    }
}
