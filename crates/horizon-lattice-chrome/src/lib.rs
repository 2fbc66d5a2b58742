//! Custom title bar chrome for Horizon Lattice windows.
//!
//! This crate replaces the operating system's title bar with a themeable
//! one while keeping it synchronized with real window management: resize,
//! minimize/maximize/restore, activation, chrome insets and background color.
//!
//! The moving parts, leaves first:
//!
//! - [`NativeHandleResolver`] turns a toolkit window into a [`WindowHandle`].
//! - [`DecorationBridge`] is the façade over the platform's
//!   [`NativeDecorations`] implementation.
//! - [`ChromeLayoutEngine`] positions the title bar controls, mirrored for
//!   right-to-left windows.
//! - [`TitlePane`] is the state machine tying it all together for one window.
//! - [`PropertyChangeRouter`] feeds window property changes into the pane.
//!
//! Events flow in one direction: window notification, router, state
//! machine, layout, bridge, repaint.
//!
//! # Getting Started
//!
//! ```no_run
//! use std::rc::Rc;
//! use std::sync::Arc;
//!
//! use horizon_lattice_chrome::{
//!     ChromeTheme, DecorationBridge, IconProvider, TitlePane, TitlePaneConfig,
//!     WinitChromeWindow, WinitDecorations, WindowKind,
//! };
//! use winit::window::Window;
//!
//! # fn example(
//! #     window: Arc<Window>,
//! #     theme: Rc<dyn ChromeTheme>,
//! #     icons: Rc<dyn IconProvider>,
//! # ) -> horizon_lattice_chrome::ChromeResult<()> {
//! let chrome_window = Rc::new(WinitChromeWindow::new(window.clone(), WindowKind::Frame));
//! let bridge = DecorationBridge::new(WinitDecorations::with_window(window)?);
//!
//! let pane = TitlePane::new(chrome_window, bridge, theme, icons, TitlePaneConfig::new());
//! if pane.install() {
//!     pane.set_size(800, pane.preferred_size().height);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! Everything here runs on the UI thread that owns the window. The title
//! pane is deliberately `!Send`.

pub mod bridge;
mod config;
mod controls;
mod error;
mod geometry;
mod handle;
mod layout;
pub mod logging;
mod notifier;
mod router;
mod theme;
mod title_pane;
mod window;
#[cfg(feature = "winit")]
mod winit_window;

pub use bridge::{DecorationBridge, NativeDecorations};
#[cfg(feature = "winit")]
pub use bridge::{WinitChromeState, WinitDecorations};
pub use config::TitlePaneConfig;
pub use controls::{
    ActivationState, ChromeAction, ControlKind, ControlSetInput, ControlSpec, FrameState,
    build_control_set, control_kinds,
};
pub use error::{ChromeError, ChromeResult};
pub use geometry::{Rect, Size};
pub use handle::{NativeHandleResolver, WindowHandle, handle_from_raw};
pub use layout::{ChromeGeometry, ChromeLayout, ChromeLayoutEngine, LayoutInput};
pub use notifier::{ActivationCallback, PropertyCallback, PropertyNotifier, SubscriptionId};
pub use router::{PropertyChangeRouter, Route, RouteCallback};
pub use theme::{
    ChromeTheme, ColorKey, Icon, IconKey, IconPair, IconProvider, PaintContext, Rgb, TitleColors,
    TitleTone, best_icon_for,
};
pub use title_pane::{SystemMenuEntry, TitlePane};
pub use window::{
    ChromeWindow, DecorationStyle, ExtendedState, Insets, MenuBarMetrics, PropertyChange,
    PropertyValue, TextDirection, WindowKind, WindowProperty,
};
#[cfg(feature = "winit")]
pub use winit_window::WinitChromeWindow;
