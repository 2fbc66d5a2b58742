//! The decoration bridge: the boundary between chrome intents and the
//! native window manager.
//!
//! Platform code implements [`NativeDecorations`], one implementation per
//! target. The rest of the crate only ever talks to a [`DecorationBridge`],
//! which validates handles, logs every call inside an injected span and
//! applies the failure policy:
//!
//! - `install` on an invalid handle is an error ([`ChromeError::InvalidHandle`]).
//! - Every other operation on an invalid handle is a no-op.
//! - A failing native call is logged at `error`. In strict mode the bridge
//!   panics; otherwise the error is returned and the title pane falls back
//!   to the native chrome.

#[cfg(feature = "winit")]
mod winit_backend;

#[cfg(feature = "winit")]
pub use winit_backend::{WinitChromeState, WinitDecorations};

use std::fmt;

use tracing::Span;

use crate::error::{ChromeError, ChromeResult};
use crate::handle::WindowHandle;
use crate::layout::ChromeGeometry;
use crate::logging::targets;
use crate::theme::Rgb;

/// Native custom-chrome operations for one platform.
///
/// Every method is a direct, synchronous call into the window manager. The
/// handle passed in is always valid; [`DecorationBridge`] filters invalid
/// handles before they reach an implementation.
pub trait NativeDecorations {
    /// Short name of the backend, used in log output.
    fn name(&self) -> &str {
        "native"
    }

    /// Switch the window into custom-chrome mode.
    fn install(&mut self, handle: WindowHandle) -> ChromeResult<()>;

    /// Give the window its native chrome back.
    fn uninstall(&mut self, handle: WindowHandle) -> ChromeResult<()>;

    /// Enable or disable native resizing.
    fn set_resizable(&mut self, handle: WindowHandle, resizable: bool) -> ChromeResult<()>;

    /// Set the background color the native layer paints behind the chrome.
    fn set_background(&mut self, handle: WindowHandle, color: Rgb) -> ChromeResult<()>;

    /// Tell the native layer which parts of the bar belong to the chrome.
    ///
    /// The values are in device pixels.
    fn update_insets(&mut self, handle: WindowHandle, geometry: ChromeGeometry)
    -> ChromeResult<()>;

    /// Minimize (iconify) the window.
    fn minimize(&mut self, handle: WindowHandle) -> ChromeResult<()>;

    /// Maximize the window.
    fn maximize(&mut self, handle: WindowHandle) -> ChromeResult<()>;

    /// Restore the window from the minimized or maximized state.
    fn restore(&mut self, handle: WindowHandle) -> ChromeResult<()>;
}

/// Handle-addressed façade over a [`NativeDecorations`] backend.
///
/// The bridge keeps no per-window state of its own.
pub struct DecorationBridge {
    native: Box<dyn NativeDecorations>,
    span: Span,
    assert_native_calls: bool,
}

impl DecorationBridge {
    /// Create a bridge over a backend.
    ///
    /// Strict mode defaults to on in debug builds.
    pub fn new(native: impl NativeDecorations + 'static) -> Self {
        Self::from_boxed(Box::new(native))
    }

    /// Create a bridge over an already boxed backend.
    pub fn from_boxed(native: Box<dyn NativeDecorations>) -> Self {
        Self {
            native,
            span: tracing::debug_span!("decoration_bridge"),
            assert_native_calls: cfg!(debug_assertions),
        }
    }

    /// Record all bridge events inside the given span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Panic when a native call fails instead of returning the error.
    pub fn with_assert_native_calls(mut self, enabled: bool) -> Self {
        self.assert_native_calls = enabled;
        self
    }

    /// Change the strict mode setting.
    pub fn set_assert_native_calls(&mut self, enabled: bool) {
        self.assert_native_calls = enabled;
    }

    /// Whether native call failures panic.
    pub fn asserts_native_calls(&self) -> bool {
        self.assert_native_calls
    }

    /// The span bridge events are recorded in.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Name of the backend.
    pub fn backend_name(&self) -> &str {
        self.native.name()
    }

    /// Enable custom-chrome mode.
    ///
    /// The caller must follow a successful install with a forced resize of
    /// the window: the native layer only recomputes the client area on a
    /// resize.
    pub fn install(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        if !handle.is_valid() {
            let _entered = self.span.enter();
            tracing::warn!(target: targets::BRIDGE, "install requested without a native handle");
            return Err(ChromeError::InvalidHandle);
        }
        self.call("install", handle, |native| native.install(handle))
    }

    /// Disable custom-chrome mode.
    pub fn uninstall(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.call("uninstall", handle, |native| native.uninstall(handle))
    }

    /// Push resizability to the native layer.
    pub fn set_resizable(&mut self, handle: WindowHandle, resizable: bool) -> ChromeResult<()> {
        self.call("set_resizable", handle, |native| {
            native.set_resizable(handle, resizable)
        })
    }

    /// Push the background color to the native layer.
    pub fn set_background(&mut self, handle: WindowHandle, color: Rgb) -> ChromeResult<()> {
        self.call("set_background", handle, |native| {
            native.set_background(handle, color)
        })
    }

    /// Push the chrome insets, in device pixels, to the native layer.
    pub fn update_chrome_insets(
        &mut self,
        handle: WindowHandle,
        left: i32,
        right: i32,
        bar_height: i32,
    ) -> ChromeResult<()> {
        let geometry = ChromeGeometry {
            left_inset: left,
            right_inset: right,
            bar_height,
        };
        self.call("update_insets", handle, |native| {
            native.update_insets(handle, geometry)
        })
    }

    /// Minimize the window.
    pub fn minimize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.call("minimize", handle, |native| native.minimize(handle))
    }

    /// Maximize the window.
    pub fn maximize(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.call("maximize", handle, |native| native.maximize(handle))
    }

    /// Restore the window.
    pub fn restore(&mut self, handle: WindowHandle) -> ChromeResult<()> {
        self.call("restore", handle, |native| native.restore(handle))
    }

    fn call<F>(&mut self, operation: &'static str, handle: WindowHandle, f: F) -> ChromeResult<()>
    where
        F: FnOnce(&mut dyn NativeDecorations) -> ChromeResult<()>,
    {
        let _entered = self.span.enter();

        if !handle.is_valid() {
            tracing::trace!(target: targets::BRIDGE, operation, "skipped: invalid handle");
            return Ok(());
        }

        match f(self.native.as_mut()) {
            Ok(()) => {
                tracing::trace!(target: targets::BRIDGE, operation, %handle, "native call");
                Ok(())
            }
            Err(err) => {
                tracing::error!(
                    target: targets::BRIDGE,
                    operation,
                    %handle,
                    backend = self.native.name(),
                    error = %err,
                    "native call failed"
                );
                if self.assert_native_calls {
                    panic!("native call `{operation}` failed on window {handle}: {err}");
                }
                Err(err)
            }
        }
    }
}

impl fmt::Debug for DecorationBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecorationBridge")
            .field("backend", &self.native.name())
            .field("assert_native_calls", &self.assert_native_calls)
            .finish()
    }
}
