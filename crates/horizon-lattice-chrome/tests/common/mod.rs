//! In-memory fakes shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::num::NonZeroIsize;
use std::rc::Rc;
use std::sync::Arc;

use horizon_lattice_chrome::{
    ActivationCallback, ActivationState, ChromeError, ChromeGeometry, ChromeResult, ChromeTheme,
    ChromeWindow, ColorKey, DecorationBridge, DecorationStyle, ExtendedState, Icon, IconKey,
    IconPair, IconProvider, Insets, MenuBarMetrics, NativeDecorations, PaintContext,
    PropertyCallback, PropertyNotifier, PropertyValue, Rect, Rgb, Size, SubscriptionId,
    TextDirection, TitlePane, TitlePaneConfig, TitleTone, WindowHandle, WindowKind,
    WindowProperty,
};
use raw_window_handle::{
    HandleError, HasWindowHandle, RawWindowHandle, Win32WindowHandle,
    WindowHandle as BorrowedHandle,
};

pub const HWND: isize = 0x2a00;

/// One entry of a [`Timeline`] shared by the fake window and the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Native(Call),
    SetSize(i32, i32),
    SetLocation(i32, i32),
}

/// Window and native calls in the order they happened.
#[derive(Clone, Default)]
pub struct Timeline(Rc<RefCell<Vec<Step>>>);

impl Timeline {
    pub fn steps(&self) -> Vec<Step> {
        self.0.borrow().clone()
    }

    pub fn position(&self, step: &Step) -> Option<usize> {
        self.0.borrow().iter().position(|recorded| recorded == step)
    }

    fn push(&self, step: Step) {
        self.0.borrow_mut().push(step);
    }
}

fn win32(hwnd: isize) -> RawWindowHandle {
    RawWindowHandle::Win32(Win32WindowHandle::new(NonZeroIsize::new(hwnd).unwrap()))
}

/// Install a test subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Window
// ============================================================================

pub struct FakeWindow {
    raw: Cell<Option<RawWindowHandle>>,
    kind: WindowKind,
    style: Cell<DecorationStyle>,
    state: Cell<ExtendedState>,
    resizable: Cell<bool>,
    active: Cell<bool>,
    title: RefCell<Option<String>>,
    icons: RefCell<Vec<Arc<dyn Icon>>>,
    direction: Cell<TextDirection>,
    background: Cell<Rgb>,
    bounds: Cell<Rect>,
    preferred: Cell<Option<Size>>,
    native_insets: Cell<Insets>,
    menu_bar: Cell<Option<MenuBarMetrics>>,
    frame_state_supported: Cell<bool>,
    notifier: PropertyNotifier,
    timeline: RefCell<Option<Timeline>>,

    pub sizes: RefCell<Vec<(i32, i32)>>,
    pub menu_restores: Cell<usize>,
    pub close_requests: Cell<usize>,
    pub repaints: Cell<usize>,
}

impl FakeWindow {
    pub fn new(kind: WindowKind, style: DecorationStyle) -> Self {
        Self {
            raw: Cell::new(Some(win32(HWND))),
            kind,
            style: Cell::new(style),
            state: Cell::new(ExtendedState::NORMAL),
            resizable: Cell::new(true),
            active: Cell::new(true),
            title: RefCell::new(Some("Untitled".to_string())),
            icons: RefCell::new(Vec::new()),
            direction: Cell::new(TextDirection::LeftToRight),
            background: Cell::new(Rgb::new(250, 250, 250)),
            bounds: Cell::new(Rect::new(100, 80, 640, 480)),
            preferred: Cell::new(None),
            native_insets: Cell::new(Insets::ZERO),
            menu_bar: Cell::new(None),
            frame_state_supported: Cell::new(true),
            notifier: PropertyNotifier::new(),
            timeline: RefCell::new(None),
            sizes: RefCell::new(Vec::new()),
            menu_restores: Cell::new(0),
            close_requests: Cell::new(0),
            repaints: Cell::new(0),
        }
    }

    pub fn frame() -> Rc<Self> {
        Rc::new(Self::new(WindowKind::Frame, DecorationStyle::Frame))
    }

    pub fn dialog() -> Rc<Self> {
        Rc::new(Self::new(WindowKind::Dialog, DecorationStyle::PlainDialog))
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    pub fn current_bounds(&self) -> Rect {
        self.bounds.get()
    }

    pub fn unrealize(&self) {
        self.raw.set(None);
    }

    /// Simulate the toolkit recreating the native peer.
    pub fn set_raw_handle(&self, hwnd: isize) {
        self.raw.set(Some(win32(hwnd)));
    }

    pub fn record_into(&self, timeline: &Timeline) {
        self.timeline.replace(Some(timeline.clone()));
    }

    fn trace(&self, step: Step) {
        if let Some(timeline) = self.timeline.borrow().as_ref() {
            timeline.push(step);
        }
    }

    pub fn set_style(&self, style: DecorationStyle) {
        self.style.set(style);
    }

    pub fn set_preferred_size(&self, size: Option<Size>) {
        self.preferred.set(size);
    }

    pub fn set_native_insets(&self, insets: Insets) {
        self.native_insets.set(insets);
    }

    pub fn set_frame_state_supported(&self, supported: bool) {
        self.frame_state_supported.set(supported);
    }

    pub fn set_menu_bar(&self, menu_bar: Option<MenuBarMetrics>) {
        self.menu_bar.set(menu_bar);
    }

    pub fn set_resizable(&self, resizable: bool) {
        self.resizable.set(resizable);
        self.notifier
            .fire(WindowProperty::Resizable, PropertyValue::Bool(resizable));
    }

    pub fn set_extended_state(&self, state: ExtendedState) {
        self.state.set(state);
        self.notifier
            .fire(WindowProperty::ExtendedState, PropertyValue::State(state));
    }

    /// Change the state without telling anyone.
    pub fn set_extended_state_silently(&self, state: ExtendedState) {
        self.state.set(state);
    }

    pub fn set_title(&self, title: Option<&str>) {
        let title = title.map(str::to_string);
        self.title.replace(title.clone());
        self.notifier
            .fire(WindowProperty::Title, PropertyValue::Text(title));
    }

    pub fn set_icons(&self, icons: Vec<Arc<dyn Icon>>) {
        self.icons.replace(icons);
        self.notifier
            .fire(WindowProperty::IconImages, PropertyValue::Unspecified);
    }

    pub fn set_direction(&self, direction: TextDirection) {
        self.direction.set(direction);
        self.notifier.fire(
            WindowProperty::ComponentOrientation,
            PropertyValue::Direction(direction),
        );
    }

    pub fn set_background(&self, color: Rgb) {
        self.background.set(color);
        self.notifier
            .fire(WindowProperty::Background, PropertyValue::Color(Some(color)));
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
        self.notifier.notify_activation(active);
    }

    pub fn fire_raw(&self, name: &str) {
        self.notifier.notify(&horizon_lattice_chrome::PropertyChange::new(
            name,
            PropertyValue::Unspecified,
        ));
    }
}

impl HasWindowHandle for FakeWindow {
    fn window_handle(&self) -> Result<BorrowedHandle<'_>, HandleError> {
        match self.raw.get() {
            // SAFETY: the fake handle never reaches a native API.
            Some(raw) => Ok(unsafe { BorrowedHandle::borrow_raw(raw) }),
            None => Err(HandleError::Unavailable),
        }
    }
}

impl ChromeWindow for FakeWindow {
    fn kind(&self) -> WindowKind {
        self.kind
    }

    fn decoration_style(&self) -> DecorationStyle {
        self.style.get()
    }

    fn extended_state(&self) -> ExtendedState {
        self.state.get()
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
        self.bounds.get()
    }

    fn preferred_size(&self) -> Option<Size> {
        self.preferred.get()
    }

    fn set_size(&self, width: i32, height: i32) {
        self.sizes.borrow_mut().push((width, height));
        self.trace(Step::SetSize(width, height));
        let bounds = self.bounds.get();
        self.bounds.set(Rect::new(bounds.x, bounds.y, width, height));
    }

    fn set_location(&self, x: i32, y: i32) {
        self.trace(Step::SetLocation(x, y));
        self.bounds.set(self.bounds.get().with_origin(x, y));
    }

    fn native_insets(&self) -> Insets {
        self.native_insets.get()
    }

    fn title_font_height(&self) -> i32 {
        16
    }

    fn menu_bar(&self) -> Option<MenuBarMetrics> {
        self.menu_bar.get()
    }

    fn restore_menu_bar(&self) {
        self.menu_restores.set(self.menu_restores.get() + 1);
    }

    fn frame_state_supported(&self) -> bool {
        self.frame_state_supported.get()
    }

    fn request_close(&self) {
        self.close_requests.set(self.close_requests.get() + 1);
    }

    fn request_repaint(&self) {
        self.repaints.set(self.repaints.get() + 1);
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

// ============================================================================
// Native decorations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Install(WindowHandle),
    Uninstall(WindowHandle),
    SetResizable(bool),
    SetBackground(Rgb),
    Insets(ChromeGeometry),
    Minimize,
    Maximize,
    Restore,
}

/// A decoration backend that records every call.
///
/// Clones share the same log, so a test keeps one clone while the bridge
/// owns the other.
#[derive(Clone, Default)]
pub struct Recording {
    calls: Rc<RefCell<Vec<Call>>>,
    fail_on: Rc<Cell<Option<&'static str>>>,
    installed: Rc<Cell<bool>>,
    echo: Rc<RefCell<Option<Rc<FakeWindow>>>>,
    timeline: Rc<RefCell<Option<Timeline>>>,
}

impl Recording {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn is_installed(&self) -> bool {
        self.installed.get()
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.fail_on.set(Some(operation));
    }

    /// Report maximize/minimize/restore back to `window` synchronously, like
    /// a window manager that sends the state change from inside the call.
    pub fn echo_state_to(&self, window: Rc<FakeWindow>) {
        self.echo.replace(Some(window));
    }

    pub fn record_into(&self, timeline: &Timeline) {
        self.timeline.replace(Some(timeline.clone()));
    }

    pub fn last_insets(&self) -> Option<ChromeGeometry> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            Call::Insets(geometry) => Some(*geometry),
            _ => None,
        })
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, operation: &'static str, call: Call) -> ChromeResult<()> {
        if let Some(timeline) = self.timeline.borrow().as_ref() {
            timeline.push(Step::Native(call.clone()));
        }
        self.calls.borrow_mut().push(call);
        if self.fail_on.get() == Some(operation) {
            return Err(ChromeError::native_call(operation, "simulated failure"));
        }
        Ok(())
    }

    fn echo(&self, state: ExtendedState) {
        let window = self.echo.borrow().clone();
        if let Some(window) = window {
            window.set_extended_state(state);
        }
    }
}

impl NativeDecorations for Recording {
    fn name(&self) -> &str {
        "recording"
    }

    fn install(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.record("install", Call::Install(handle))?;
        self.installed.set(true);
        Ok(())
    }

    fn uninstall(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.installed.set(false);
        self.record("uninstall", Call::Uninstall(handle))
    }

    fn set_resizable(&mut self, _handle: WindowHandle, resizable: bool) -> ChromeResult<()> {
        self.record("set_resizable", Call::SetResizable(resizable))
    }

    fn set_background(&mut self, _handle: WindowHandle, color: Rgb) -> ChromeResult<()> {
        self.record("set_background", Call::SetBackground(color))
    }

    fn update_insets(
        &mut self,
        _handle: WindowHandle,
        geometry: ChromeGeometry,
    ) -> ChromeResult<()> {
        self.record("update_insets", Call::Insets(geometry))
    }

    fn minimize(&mut self, _handle: WindowHandle) -> ChromeResult<()> {
        self.record("minimize", Call::Minimize)?;
        self.echo(ExtendedState::ICONIFIED);
        Ok(())
    }

    fn maximize(&mut self, _handle: WindowHandle) -> ChromeResult<()> {
        self.record("maximize", Call::Maximize)?;
        self.echo(ExtendedState::MAXIMIZED_BOTH);
        Ok(())
    }

    fn restore(&mut self, _handle: WindowHandle) -> ChromeResult<()> {
        self.record("restore", Call::Restore)?;
        self.echo(ExtendedState::NORMAL);
        Ok(())
    }
}

// ============================================================================
// Theme and icons
// ============================================================================

pub const ACTIVE_BACKGROUND: Rgb = Rgb::new(0, 90, 158);
pub const INACTIVE_BACKGROUND: Rgb = Rgb::new(235, 235, 235);
pub const ERROR_BACKGROUND: Rgb = Rgb::new(200, 40, 40);
pub const FOREGROUND: Rgb = Rgb::new(20, 20, 20);
pub const BORDER: Rgb = Rgb::new(128, 128, 128);

pub struct FixedTheme;

impl ChromeTheme for FixedTheme {
    fn color_for(&self, key: ColorKey, activation: ActivationState) -> Rgb {
        match key {
            ColorKey::Background(TitleTone::Error) => ERROR_BACKGROUND,
            ColorKey::Background(_) if activation.is_active() => ACTIVE_BACKGROUND,
            ColorKey::Background(_) => INACTIVE_BACKGROUND,
            ColorKey::Foreground(_) => FOREGROUND,
            ColorKey::Border => BORDER,
            ColorKey::ButtonHover | ColorKey::CloseHover => Rgb::new(60, 60, 60),
            ColorKey::ButtonClick | ColorKey::CloseClick => Rgb::new(30, 30, 30),
        }
    }
}

/// An icon that paints itself as a solid rectangle of its color.
#[derive(Debug)]
pub struct SolidIcon {
    pub width: i32,
    pub height: i32,
    pub color: Rgb,
}

impl SolidIcon {
    pub fn new(width: i32, height: i32, color: Rgb) -> Arc<dyn Icon> {
        Arc::new(Self {
            width,
            height,
            color,
        })
    }
}

impl Icon for SolidIcon {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn draw(&self, ctx: &mut dyn PaintContext, x: i32, y: i32) {
        ctx.fill_rect(Rect::new(x, y, self.width, self.height), self.color);
    }
}

pub const ACTIVE_GLYPH: Rgb = Rgb::new(1, 1, 1);
pub const INACTIVE_GLYPH: Rgb = Rgb::new(2, 2, 2);
pub const WINDOW_GLYPH: Rgb = Rgb::new(3, 3, 3);

pub struct TestIcons;

impl IconProvider for TestIcons {
    fn icon_pair_for(&self, key: IconKey) -> IconPair {
        match key {
            IconKey::Window => IconPair::uniform(SolidIcon::new(16, 16, WINDOW_GLYPH)),
            _ => IconPair::new(
                SolidIcon::new(10, 10, ACTIVE_GLYPH),
                SolidIcon::new(10, 10, INACTIVE_GLYPH),
            ),
        }
    }
}

// ============================================================================
// Painting
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintOp {
    Fill(Rect, Rgb),
    Text(String, Rect, Rgb),
}

#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub ops: Vec<PaintOp>,
}

impl PaintContext for RecordingPainter {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ops.push(PaintOp::Fill(rect, color));
    }

    fn draw_text(&mut self, text: &str, bounds: Rect, color: Rgb) {
        self.ops.push(PaintOp::Text(text.to_string(), bounds, color));
    }
}

// ============================================================================
// Setup
// ============================================================================

pub fn config() -> TitlePaneConfig {
    TitlePaneConfig::new().with_assert_native_calls(false)
}

pub fn pane_with(
    window: &Rc<FakeWindow>,
    config: TitlePaneConfig,
) -> (TitlePane<FakeWindow>, Recording) {
    init_tracing();
    let recording = Recording::default();
    let bridge = DecorationBridge::new(recording.clone());
    let pane = TitlePane::new(
        window.clone(),
        bridge,
        Rc::new(FixedTheme),
        Rc::new(TestIcons),
        config,
    );
    (pane, recording)
}

pub fn pane(window: &Rc<FakeWindow>) -> (TitlePane<FakeWindow>, Recording) {
    pane_with(window, config())
}

/// An installed pane laid out at `width`.
pub fn installed(window: &Rc<FakeWindow>, width: i32) -> (TitlePane<FakeWindow>, Recording) {
    let (pane, recording) = pane(window);
    assert!(pane.install());
    pane.set_size(width, 28);
    (pane, recording)
}
