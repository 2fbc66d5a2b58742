//! Error types for the chrome crate.

use thiserror::Error;

use crate::handle::WindowHandle;

/// Errors that can occur while talking to the native decoration layer.
///
/// None of these cross the [`TitlePane`](crate::TitlePane) surface: the
/// state machine logs them and falls back to the native window chrome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChromeError {
    /// The operation requires a valid (non-zero) window handle.
    #[error("invalid window handle")]
    InvalidHandle,

    /// The toolkit window has no native handle yet (not realized, or the
    /// native library is unavailable).
    #[error("native window handle unavailable: {0}")]
    HandleUnavailable(String),

    /// The windowing system is not supported by the resolver or backend.
    #[error("unsupported windowing system: {0}")]
    UnsupportedPlatform(String),

    /// The backend does not know the window behind this handle.
    #[error("no native window registered for handle {0}")]
    UnknownWindow(WindowHandle),

    /// A native decoration call failed.
    #[error("native call `{operation}` failed: {message}")]
    NativeCall {
        operation: &'static str,
        message: String,
    },
}

impl ChromeError {
    /// Create a native call error.
    pub fn native_call(operation: &'static str, message: impl Into<String>) -> Self {
        Self::NativeCall {
            operation,
            message: message.into(),
        }
    }
}

/// Result type for chrome operations.
pub type ChromeResult<T> = Result<T, ChromeError>;

static_assertions::assert_impl_all!(ChromeError: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChromeError::native_call("setResizable", "access denied");
        assert_eq!(
            err.to_string(),
            "native call `setResizable` failed: access denied"
        );

        let err = ChromeError::UnknownWindow(WindowHandle::new(42));
        assert!(err.to_string().contains("42"));

        assert!(ChromeError::InvalidHandle.to_string().contains("invalid"));
    }
}
