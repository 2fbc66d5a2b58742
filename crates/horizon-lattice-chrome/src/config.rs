//! Title pane configuration.

use serde::{Deserialize, Serialize};

/// Layout constants and behavior switches of a title pane.
///
/// # Defaults
///
/// - Gap between leading controls: 5 logical pixels
/// - Minimum bar height: 28 logical pixels
/// - Window button width: 46 logical pixels
/// - Icon control cap: 32 logical pixels (icons are sized to 17)
/// - Padding added to the title font height: 7 logical pixels
/// - Scale factor for native insets: 1.0
/// - Native call assertions: on in debug builds
///
/// # Example
///
/// ```
/// use horizon_lattice_chrome::TitlePaneConfig;
///
/// let config = TitlePaneConfig::new()
///     .with_bar_height(32)
///     .with_button_width(40)
///     .with_scale_factor(2.0);
///
/// assert_eq!(config.bar_height(), 32);
/// assert_eq!(config.scaled(10), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePaneConfig {
    /// Gap between leading-edge controls and around the title.
    pad: i32,
    /// Minimum height of the bar.
    bar_height: i32,
    /// Width of each window button.
    button_width: i32,
    /// Maximum width of the icon control.
    icon_width: i32,
    /// Size window icons are fitted to.
    icon_size: i32,
    /// Padding added to the title font line height.
    text_padding: i32,
    /// Scale applied to the insets pushed to the native layer.
    scale_factor: f64,
    /// Panic when a native decoration call fails.
    assert_native_calls: bool,
}

impl Default for TitlePaneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TitlePaneConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        let pad = 5;
        let icon_width = 32;
        Self {
            pad,
            bar_height: 28,
            button_width: 46,
            icon_width,
            icon_size: icon_width - 3 * pad,
            text_padding: 7,
            scale_factor: 1.0,
            assert_native_calls: cfg!(debug_assertions),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the gap between leading controls.
    pub fn with_pad(mut self, pad: i32) -> Self {
        self.pad = pad.max(0);
        self
    }

    /// Set the minimum bar height.
    pub fn with_bar_height(mut self, height: i32) -> Self {
        self.bar_height = height.max(0);
        self
    }

    /// Set the window button width.
    pub fn with_button_width(mut self, width: i32) -> Self {
        self.button_width = width.max(0);
        self
    }

    /// Set the icon control cap.
    pub fn with_icon_width(mut self, width: i32) -> Self {
        self.icon_width = width.max(0);
        self
    }

    /// Set the size window icons are fitted to.
    pub fn with_icon_size(mut self, size: i32) -> Self {
        self.icon_size = size.max(0);
        self
    }

    /// Set the padding added to the title font height.
    pub fn with_text_padding(mut self, padding: i32) -> Self {
        self.text_padding = padding.max(0);
        self
    }

    /// Set the scale factor for native insets.
    ///
    /// Non-finite or non-positive factors are ignored.
    pub fn with_scale_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            self.scale_factor = factor;
        }
        self
    }

    /// Enable or disable panicking on native call failures.
    pub fn with_assert_native_calls(mut self, enabled: bool) -> Self {
        self.assert_native_calls = enabled;
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Gap between leading controls.
    pub fn pad(&self) -> i32 {
        self.pad
    }

    /// Minimum bar height.
    pub fn bar_height(&self) -> i32 {
        self.bar_height
    }

    /// Window button width.
    pub fn button_width(&self) -> i32 {
        self.button_width
    }

    /// Icon control cap.
    pub fn icon_width(&self) -> i32 {
        self.icon_width
    }

    /// Size window icons are fitted to.
    pub fn icon_size(&self) -> i32 {
        self.icon_size
    }

    /// Padding added to the title font height.
    pub fn text_padding(&self) -> i32 {
        self.text_padding
    }

    /// Scale factor for native insets.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Whether native call failures panic.
    pub fn assert_native_calls(&self) -> bool {
        self.assert_native_calls
    }

    /// Scale a logical length to native pixels.
    pub fn scaled(&self, value: i32) -> i32 {
        (f64::from(value) * self.scale_factor).round() as i32
    }
}

static_assertions::assert_impl_all!(TitlePaneConfig: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TitlePaneConfig::new();
        assert_eq!(config.pad(), 5);
        assert_eq!(config.bar_height(), 28);
        assert_eq!(config.button_width(), 46);
        assert_eq!(config.icon_width(), 32);
        assert_eq!(config.icon_size(), 17);
        assert_eq!(config.text_padding(), 7);
        assert_eq!(config.scale_factor(), 1.0);
        assert_eq!(config.assert_native_calls(), cfg!(debug_assertions));
    }

    #[test]
    fn test_builder_clamps() {
        let config = TitlePaneConfig::new()
            .with_pad(-3)
            .with_bar_height(-1)
            .with_scale_factor(0.0)
            .with_scale_factor(f64::NAN);
        assert_eq!(config.pad(), 0);
        assert_eq!(config.bar_height(), 0);
        assert_eq!(config.scale_factor(), 1.0);
    }

    #[test]
    fn test_scaled_rounds() {
        let config = TitlePaneConfig::new().with_scale_factor(1.25);
        assert_eq!(config.scaled(28), 35);
        assert_eq!(config.scaled(46), 58);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TitlePaneConfig =
            serde_json::from_str(r#"{ "bar_height": 36, "assert_native_calls": false }"#).unwrap();
        assert_eq!(config.bar_height(), 36);
        assert_eq!(config.button_width(), 46);
        assert!(!config.assert_native_calls());
    }
}
