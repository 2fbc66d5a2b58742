//! Theming, icon and painting collaborators.
//!
//! Color lookup, icon loading and widget painting belong to the host
//! toolkit. The title pane reaches them only through the traits in this
//! module.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::controls::ActivationState;
use crate::geometry::Rect;
use crate::window::DecorationStyle;

// ============================================================================
// Colors
// ============================================================================

/// An opaque RGB color as pushed to the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
}

/// Color family of a title bar, derived from the decoration style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TitleTone {
    #[default]
    Default,
    Error,
    Question,
    Warning,
}

impl From<DecorationStyle> for TitleTone {
    fn from(style: DecorationStyle) -> Self {
        match style {
            DecorationStyle::ErrorDialog => TitleTone::Error,
            DecorationStyle::QuestionDialog
            | DecorationStyle::ColorChooserDialog
            | DecorationStyle::FileChooserDialog => TitleTone::Question,
            DecorationStyle::WarningDialog => TitleTone::Warning,
            _ => TitleTone::Default,
        }
    }
}

/// Names of the colors the title pane asks the theme for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    Background(TitleTone),
    Foreground(TitleTone),
    ButtonHover,
    ButtonClick,
    CloseHover,
    CloseClick,
    Border,
}

/// Theme lookup used by the title pane.
pub trait ChromeTheme {
    /// The color for `key` in the given activation state.
    fn color_for(&self, key: ColorKey, activation: ActivationState) -> Rgb;
}

/// The resolved colors of a title bar for one activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleColors {
    pub background: Rgb,
    pub foreground: Rgb,
    pub border: Rgb,
    pub button_hover: Rgb,
    pub button_click: Rgb,
    pub close_hover: Rgb,
    pub close_click: Rgb,
}

impl TitleColors {
    /// Look up all title bar colors for a decoration style.
    pub fn resolve(
        theme: &dyn ChromeTheme,
        style: DecorationStyle,
        activation: ActivationState,
    ) -> Self {
        let tone = TitleTone::from(style);
        Self {
            background: theme.color_for(ColorKey::Background(tone), activation),
            foreground: theme.color_for(ColorKey::Foreground(tone), activation),
            border: theme.color_for(ColorKey::Border, activation),
            button_hover: theme.color_for(ColorKey::ButtonHover, activation),
            button_click: theme.color_for(ColorKey::ButtonClick, activation),
            close_hover: theme.color_for(ColorKey::CloseHover, activation),
            close_click: theme.color_for(ColorKey::CloseClick, activation),
        }
    }
}

// ============================================================================
// Painting and Icons
// ============================================================================

/// Drawing surface handed to [`TitlePane::paint`](crate::TitlePane::paint).
pub trait PaintContext {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draw single-line text inside `bounds`.
    fn draw_text(&mut self, text: &str, bounds: Rect, color: Rgb);
}

/// An icon drawn by the title pane.
pub trait Icon: fmt::Debug {
    /// Icon width in logical pixels.
    fn width(&self) -> i32;

    /// Icon height in logical pixels.
    fn height(&self) -> i32;

    /// Draw the icon with its top-left corner at `(x, y)`.
    fn draw(&self, ctx: &mut dyn PaintContext, x: i32, y: i32);
}

/// The active and inactive variants of an icon.
#[derive(Debug, Clone)]
pub struct IconPair {
    pub active: Arc<dyn Icon>,
    pub inactive: Arc<dyn Icon>,
}

impl IconPair {
    /// Create a pair from both variants.
    pub fn new(active: Arc<dyn Icon>, inactive: Arc<dyn Icon>) -> Self {
        Self { active, inactive }
    }

    /// Use the same icon for both states.
    pub fn uniform(icon: Arc<dyn Icon>) -> Self {
        Self {
            active: icon.clone(),
            inactive: icon,
        }
    }

    /// The variant for an activation state.
    pub fn for_state(&self, activation: ActivationState) -> &Arc<dyn Icon> {
        match activation {
            ActivationState::Active => &self.active,
            ActivationState::Inactive => &self.inactive,
        }
    }
}

/// Names of the icons the title pane asks the provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKey {
    Close,
    Minimize,
    Maximize,
    Restore,
    /// Fallback window icon when the window sets none.
    Window,
}

/// Icon lookup used by the title pane.
pub trait IconProvider {
    /// The icon pair registered for `key`.
    fn icon_pair_for(&self, key: IconKey) -> IconPair;
}

/// Pick the window icon that best fits a square of `size` pixels.
///
/// Prefers the smallest icon whose larger side is at least `size`, and falls
/// back to the largest icon when all of them are smaller.
pub fn best_icon_for(icons: &[Arc<dyn Icon>], size: i32) -> Option<Arc<dyn Icon>> {
    fn extent(icon: &Arc<dyn Icon>) -> i32 {
        icon.width().max(icon.height())
    }

    icons
        .iter()
        .filter(|icon| extent(icon) >= size)
        .min_by_key(|icon| extent(icon))
        .or_else(|| icons.iter().max_by_key(|icon| extent(icon)))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct SquareIcon(i32);

    impl Icon for SquareIcon {
        fn width(&self) -> i32 {
            self.0
        }

        fn height(&self) -> i32 {
            self.0
        }

        fn draw(&self, _ctx: &mut dyn PaintContext, _x: i32, _y: i32) {}
    }

    fn icons(sizes: &[i32]) -> Vec<Arc<dyn Icon>> {
        sizes
            .iter()
            .map(|&size| Arc::new(SquareIcon(size)) as Arc<dyn Icon>)
            .collect()
    }

    #[test]
    fn test_best_icon_prefers_smallest_fitting() {
        let best = best_icon_for(&icons(&[64, 16, 24, 32]), 17).unwrap();
        assert_eq!(best.width(), 24);
    }

    #[test]
    fn test_best_icon_falls_back_to_largest() {
        let best = best_icon_for(&icons(&[8, 12]), 17).unwrap();
        assert_eq!(best.width(), 12);
        assert!(best_icon_for(&[], 17).is_none());
    }

    #[test]
    fn test_title_tone_from_style() {
        assert_eq!(TitleTone::from(DecorationStyle::Frame), TitleTone::Default);
        assert_eq!(
            TitleTone::from(DecorationStyle::FileChooserDialog),
            TitleTone::Question
        );
        assert_eq!(TitleTone::from(DecorationStyle::ErrorDialog), TitleTone::Error);
        assert_eq!(
            TitleTone::from(DecorationStyle::WarningDialog),
            TitleTone::Warning
        );
    }

    #[test]
    fn test_icon_pair_variants() {
        let pair = IconPair::new(Arc::new(SquareIcon(10)), Arc::new(SquareIcon(11)));
        assert_eq!(pair.for_state(ActivationState::Active).width(), 10);
        assert_eq!(pair.for_state(ActivationState::Inactive).width(), 11);
    }
}
