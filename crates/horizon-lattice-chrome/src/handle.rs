//! Native window handles and their resolution from toolkit windows.
//!
//! A [`WindowHandle`] is the opaque, integer-sized reference the decoration
//! bridge uses to address a real OS window. It is obtained from any toolkit
//! window that implements [`HasWindowHandle`] through a
//! [`NativeHandleResolver`].
//!
//! Resolution never fails loudly: when the native library is unavailable or
//! the window has not been realized yet, the resolver logs the problem once
//! and hands back [`WindowHandle::INVALID`], leaving the native chrome in
//! place.

use std::fmt;

use raw_window_handle::{HandleError, HasWindowHandle, RawWindowHandle};
use tracing::Span;

use crate::error::{ChromeError, ChromeResult};
use crate::logging::targets;

/// Opaque reference to a native window.
///
/// The handle is valid iff it is non-zero. Once the decoration bridge has
/// installed custom chrome on a handle, the title pane owns it until
/// uninstall, after which it is reset to [`WindowHandle::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(u64);

impl WindowHandle {
    /// The invalid-handle sentinel.
    pub const INVALID: Self = Self(0);

    /// Wrap a raw native value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Whether this handle refers to a window.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 != 0
    }

    /// The raw native value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WindowHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Convert a raw window handle into the integer handle used by the bridge.
///
/// Pointer-based handles (AppKit views, Wayland surfaces, ...) are converted
/// by address.
pub fn handle_from_raw(raw: RawWindowHandle) -> ChromeResult<WindowHandle> {
    let value = match raw {
        RawWindowHandle::Win32(handle) => handle.hwnd.get() as u64,
        RawWindowHandle::WinRt(handle) => handle.core_window.as_ptr() as usize as u64,
        RawWindowHandle::AppKit(handle) => handle.ns_view.as_ptr() as usize as u64,
        RawWindowHandle::UiKit(handle) => handle.ui_view.as_ptr() as usize as u64,
        RawWindowHandle::Xlib(handle) => handle.window as u64,
        RawWindowHandle::Xcb(handle) => u64::from(handle.window.get()),
        RawWindowHandle::Wayland(handle) => handle.surface.as_ptr() as usize as u64,
        RawWindowHandle::AndroidNdk(handle) => handle.a_native_window.as_ptr() as usize as u64,
        RawWindowHandle::Web(handle) => u64::from(handle.id),
        other => {
            return Err(ChromeError::UnsupportedPlatform(format!("{other:?}")));
        }
    };

    if value == 0 {
        return Err(ChromeError::HandleUnavailable(
            "native window id is zero".to_string(),
        ));
    }
    Ok(WindowHandle(value))
}

pub(crate) fn map_handle_error(err: HandleError) -> ChromeError {
    match err {
        HandleError::NotSupported => ChromeError::UnsupportedPlatform(err.to_string()),
        other => ChromeError::HandleUnavailable(other.to_string()),
    }
}

/// Resolves and caches the native handle of one toolkit window.
///
/// # Example
///
/// ```ignore
/// use horizon_lattice_chrome::NativeHandleResolver;
///
/// let mut resolver = NativeHandleResolver::new();
/// let handle = resolver.resolve(&window);
/// if !handle.is_valid() {
///     // keep the native title bar
/// }
/// ```
#[derive(Debug)]
pub struct NativeHandleResolver {
    /// The last successfully resolved handle.
    cached: WindowHandle,
    /// Whether a resolution failure has already been reported.
    failure_logged: bool,
    /// Span all resolver events are recorded in.
    span: Span,
}

impl Default for NativeHandleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeHandleResolver {
    /// Create a resolver logging into a fresh debug span.
    pub fn new() -> Self {
        Self::with_span(tracing::debug_span!("chrome_resolver"))
    }

    /// Create a resolver logging into the given span.
    pub fn with_span(span: Span) -> Self {
        Self {
            cached: WindowHandle::INVALID,
            failure_logged: false,
            span,
        }
    }

    /// Resolve the native handle of `window`.
    ///
    /// Once a handle has been resolved it is returned from the cache without
    /// querying the window again. On failure the invalid sentinel is
    /// returned; the first failure is logged as a warning, repeats only at
    /// trace level.
    pub fn resolve<W>(&mut self, window: &W) -> WindowHandle
    where
        W: HasWindowHandle + ?Sized,
    {
        if self.cached.is_valid() {
            return self.cached;
        }

        let _entered = self.span.enter();
        let resolved = window
            .window_handle()
            .map_err(map_handle_error)
            .and_then(|handle| handle_from_raw(handle.as_raw()));

        match resolved {
            Ok(handle) => {
                tracing::debug!(target: targets::HANDLE, %handle, "resolved native window handle");
                self.cached = handle;
                handle
            }
            Err(err) => {
                if self.failure_logged {
                    tracing::trace!(target: targets::HANDLE, error = %err, "native window handle still unavailable");
                } else {
                    self.failure_logged = true;
                    tracing::warn!(
                        target: targets::HANDLE,
                        error = %err,
                        "couldn't resolve native window handle, keeping native decorations"
                    );
                }
                WindowHandle::INVALID
            }
        }
    }

    /// The cached handle, if one has been resolved.
    pub fn cached(&self) -> Option<WindowHandle> {
        self.cached.is_valid().then_some(self.cached)
    }

    /// Forget the cached handle so the next resolve queries the window.
    pub fn invalidate(&mut self) {
        self.cached = WindowHandle::INVALID;
        self.failure_logged = false;
    }
}

static_assertions::assert_impl_all!(WindowHandle: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::num::{NonZeroIsize, NonZeroU32};

    use raw_window_handle::{
        HandleError, RawWindowHandle, Win32WindowHandle, WindowHandle as BorrowedHandle,
        XcbWindowHandle, XlibWindowHandle,
    };

    use super::*;

    struct FakeWindow {
        raw: Cell<Option<RawWindowHandle>>,
        queries: Cell<usize>,
    }

    impl FakeWindow {
        fn new(raw: Option<RawWindowHandle>) -> Self {
            Self {
                raw: Cell::new(raw),
                queries: Cell::new(0),
            }
        }
    }

    impl HasWindowHandle for FakeWindow {
        fn window_handle(&self) -> Result<BorrowedHandle<'_>, HandleError> {
            self.queries.set(self.queries.get() + 1);
            match self.raw.get() {
                // SAFETY: the fake handles never reach a native API.
                Some(raw) => Ok(unsafe { BorrowedHandle::borrow_raw(raw) }),
                None => Err(HandleError::Unavailable),
            }
        }
    }

    fn win32(hwnd: isize) -> RawWindowHandle {
        RawWindowHandle::Win32(Win32WindowHandle::new(NonZeroIsize::new(hwnd).unwrap()))
    }

    #[test]
    fn test_handle_validity() {
        assert!(!WindowHandle::INVALID.is_valid());
        assert!(!WindowHandle::default().is_valid());
        assert!(WindowHandle::new(0x1234).is_valid());
        assert_eq!(WindowHandle::new(77).to_string(), "77");
    }

    #[test]
    fn test_handle_from_raw() {
        assert_eq!(handle_from_raw(win32(0x5000)), Ok(WindowHandle::new(0x5000)));

        let xcb = RawWindowHandle::Xcb(XcbWindowHandle::new(NonZeroU32::new(9).unwrap()));
        assert_eq!(handle_from_raw(xcb), Ok(WindowHandle::new(9)));

        let xlib = RawWindowHandle::Xlib(XlibWindowHandle::new(0));
        assert!(matches!(
            handle_from_raw(xlib),
            Err(ChromeError::HandleUnavailable(_))
        ));
    }

    #[test]
    fn test_resolve_caches_success() {
        let window = FakeWindow::new(Some(win32(42)));
        let mut resolver = NativeHandleResolver::new();

        assert_eq!(resolver.resolve(&window), WindowHandle::new(42));
        assert_eq!(resolver.resolve(&window), WindowHandle::new(42));
        assert_eq!(window.queries.get(), 1);
        assert_eq!(resolver.cached(), Some(WindowHandle::new(42)));
    }

    #[test]
    fn test_resolve_failure_yields_sentinel() {
        let window = FakeWindow::new(None);
        let mut resolver = NativeHandleResolver::new();

        assert_eq!(resolver.resolve(&window), WindowHandle::INVALID);
        assert_eq!(resolver.cached(), None);

        // Failures are not cached: the window may be realized later.
        window.raw.set(Some(win32(7)));
        assert_eq!(resolver.resolve(&window), WindowHandle::new(7));
        assert_eq!(window.queries.get(), 2);
    }

    #[test]
    fn test_invalidate_requeries_window() {
        let window = FakeWindow::new(Some(win32(42)));
        let mut resolver = NativeHandleResolver::new();
        assert_eq!(resolver.resolve(&window), WindowHandle::new(42));

        window.raw.set(Some(win32(43)));
        assert_eq!(resolver.resolve(&window), WindowHandle::new(42));

        resolver.invalidate();
        assert_eq!(resolver.cached(), None);
        assert_eq!(resolver.resolve(&window), WindowHandle::new(43));
        assert_eq!(window.queries.get(), 2);
    }
}
