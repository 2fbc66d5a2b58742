//! Decoration backend driving winit windows.
//!
//! winit has no custom-chrome mode, so the backend approximates one: install
//! turns the native decorations off and uninstall turns them back on. The
//! background color and chrome insets have no winit counterpart and are
//! recorded per window for the renderer that paints the custom bar.

use std::collections::HashMap;
use std::sync::Arc;

use raw_window_handle::HasWindowHandle;
use winit::window::Window;

use super::NativeDecorations;
use crate::error::{ChromeError, ChromeResult};
use crate::handle::{WindowHandle, handle_from_raw, map_handle_error};
use crate::layout::ChromeGeometry;
use crate::logging::targets;
use crate::theme::Rgb;

/// What the backend knows about one registered window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinitChromeState {
    /// Whether custom chrome is installed.
    pub installed: bool,
    /// The last background pushed by the chrome.
    pub background: Option<Rgb>,
    /// The last insets pushed by the chrome, in physical pixels.
    pub geometry: ChromeGeometry,
}

struct Entry {
    window: Arc<Window>,
    state: WinitChromeState,
}

/// A [`NativeDecorations`] backend over a set of winit windows.
///
/// Windows are addressed by the handle derived from their raw window
/// handle, the same value [`NativeHandleResolver`](crate::NativeHandleResolver)
/// produces for them.
#[derive(Default)]
pub struct WinitDecorations {
    windows: HashMap<WindowHandle, Entry>,
}

impl WinitDecorations {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with one registered window.
    pub fn with_window(window: Arc<Window>) -> ChromeResult<Self> {
        let mut backend = Self::new();
        backend.register(window)?;
        Ok(backend)
    }

    /// Register a window and return its handle.
    pub fn register(&mut self, window: Arc<Window>) -> ChromeResult<WindowHandle> {
        let raw = window.window_handle().map_err(map_handle_error)?.as_raw();
        let handle = handle_from_raw(raw)?;
        tracing::debug!(target: targets::BRIDGE, %handle, "winit window registered");
        self.windows.insert(
            handle,
            Entry {
                window,
                state: WinitChromeState::default(),
            },
        );
        Ok(handle)
    }

    /// Forget a window.
    pub fn unregister(&mut self, handle: WindowHandle) -> Option<Arc<Window>> {
        self.windows.remove(&handle).map(|entry| entry.window)
    }

    /// The chrome state recorded for a window.
    pub fn chrome_state(&self, handle: WindowHandle) -> Option<WinitChromeState> {
        self.windows.get(&handle).map(|entry| entry.state)
    }

    /// Number of registered windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window is registered.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn entry(&mut self, handle: WindowHandle) -> ChromeResult<&mut Entry> {
        self.windows
            .get_mut(&handle)
            .ok_or(ChromeError::UnknownWindow(handle))
    }
}

impl NativeDecorations for WinitDecorations {
    fn name(&self) -> &str {
        "winit"
    }

    fn install(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        let entry = self.entry(handle)?;
        entry.window.set_decorations(false);
        entry.state.installed = true;
        Ok(())
    }

    fn uninstall(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        let entry = self.entry(handle)?;
        if entry.state.installed {
            entry.window.set_decorations(true);
        }
        entry.state = WinitChromeState::default();
        Ok(())
    }

    fn set_resizable(&mut self, handle: WindowHandle, resizable: bool) -> ChromeResult<()> {
        self.entry(handle)?.window.set_resizable(resizable);
        Ok(())
    }

    fn set_background(&mut self, handle: WindowHandle, color: Rgb) -> ChromeResult<()> {
        self.entry(handle)?.state.background = Some(color);
        Ok(())
    }

    fn update_insets(
        &mut self,
        handle: WindowHandle,
        geometry: ChromeGeometry,
    ) -> ChromeResult<()> {
        self.entry(handle)?.state.geometry = geometry;
        Ok(())
    }

    fn minimize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.entry(handle)?.window.set_minimized(true);
        Ok(())
    }

    fn maximize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.entry(handle)?.window.set_maximized(true);
        Ok(())
    }

    fn restore(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        let window = &self.entry(handle)?.window;
        if window.is_minimized().unwrap_or(false) {
            window.set_minimized(false);
        } else {
            window.set_maximized(false);
        }
        Ok(())
    }
}
