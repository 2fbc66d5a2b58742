//! Title bar layout.
//!
//! [`ChromeLayoutEngine`] positions the controls of a title bar inside a
//! container of a given width. Layout is always computed left-to-right:
//!
//! ```text
//! | pad/2 | icon | pad | menu | pad | title ........ | pad | min | max | close |
//! ```
//!
//! For right-to-left windows the finished layout is mirrored about the
//! container's vertical center line in a single final pass, so the close
//! button ends up in the top-left corner.

use crate::config::TitlePaneConfig;
use crate::controls::{ActivationState, ControlKind, ControlSpec};
use crate::geometry::{Rect, Size};
use crate::logging::targets;
use crate::window::{MenuBarMetrics, TextDirection};

/// Insets the native window manager reserves for the custom chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChromeGeometry {
    /// Width of the control block on the left edge.
    pub left_inset: i32,
    /// Width of the control block on the right edge.
    pub right_inset: i32,
    /// Height of the bar.
    pub bar_height: i32,
}

impl ChromeGeometry {
    /// Geometry of hidden chrome.
    pub const HIDDEN: Self = Self {
        left_inset: 0,
        right_inset: 0,
        bar_height: 0,
    };

    /// Swap the left and right insets.
    pub fn mirrored(&self) -> Self {
        Self {
            left_inset: self.right_inset,
            right_inset: self.left_inset,
            bar_height: self.bar_height,
        }
    }
}

/// Everything a layout pass depends on.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    /// Container width.
    pub width: i32,
    /// Line height of the title font.
    pub font_height: i32,
    /// Text direction of the window.
    pub direction: TextDirection,
    /// The current control set.
    pub controls: &'a [ControlSpec],
    /// The embedded menu bar, if any.
    pub menu_bar: Option<MenuBarMetrics>,
    /// Whether the chrome should be hidden entirely.
    pub hidden: bool,
    /// Whether the platform can maximize windows. Without it the minimize and
    /// maximize/restore buttons are not laid out.
    pub frame_state_supported: bool,
}

/// The result of a layout pass.
#[derive(Debug, Clone)]
pub struct ChromeLayout {
    controls: Vec<ControlSpec>,
    geometry: ChromeGeometry,
    width: i32,
    leading_extent: i32,
    trailing_extent: i32,
    mirrored: bool,
}

impl ChromeLayout {
    /// An empty layout with no controls.
    pub fn empty() -> Self {
        Self {
            controls: Vec::new(),
            geometry: ChromeGeometry::HIDDEN,
            width: 0,
            leading_extent: 0,
            trailing_extent: 0,
            mirrored: false,
        }
    }

    /// The laid out controls.
    pub fn controls(&self) -> &[ControlSpec] {
        &self.controls
    }

    /// The control of the given kind, if present.
    pub fn control(&self, kind: ControlKind) -> Option<&ControlSpec> {
        self.controls.iter().find(|control| control.kind == kind)
    }

    /// Bounds of the control of the given kind, if present.
    pub fn bounds_of(&self, kind: ControlKind) -> Option<Rect> {
        self.control(kind).map(|control| control.bounds)
    }

    /// Bounds of every control, in control set order.
    pub fn bounds(&self) -> Vec<(ControlKind, Rect)> {
        self.controls
            .iter()
            .map(|control| (control.kind, control.bounds))
            .collect()
    }

    /// The insets to push to the native layer.
    pub fn geometry(&self) -> ChromeGeometry {
        self.geometry
    }

    /// Container width the layout was computed for.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Width taken by the leading control block including its trailing gap.
    pub fn leading_extent(&self) -> i32 {
        self.leading_extent
    }

    /// Width taken by the window buttons including the gap before them.
    pub fn trailing_extent(&self) -> i32 {
        self.trailing_extent
    }

    /// Whether the layout has been mirrored for right-to-left text.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Whether the chrome is hidden (zero-height bar).
    pub fn is_hidden(&self) -> bool {
        self.geometry.bar_height == 0
    }

    /// Mirror every control horizontally and swap the insets.
    ///
    /// Mirroring twice yields the original layout.
    pub fn mirrored(&self) -> Self {
        Self {
            controls: self
                .controls
                .iter()
                .map(|control| control.with_bounds(control.bounds.mirrored(self.width)))
                .collect(),
            geometry: self.geometry.mirrored(),
            width: self.width,
            leading_extent: self.leading_extent,
            trailing_extent: self.trailing_extent,
            mirrored: !self.mirrored,
        }
    }

    /// The control under a point, window buttons first.
    pub fn control_at(&self, x: i32, y: i32) -> Option<ControlKind> {
        const ORDER: [ControlKind; 7] = [
            ControlKind::Close,
            ControlKind::Maximize,
            ControlKind::Restore,
            ControlKind::Minimize,
            ControlKind::Icon,
            ControlKind::Menu,
            ControlKind::Title,
        ];

        ORDER.into_iter().find(|&kind| {
            self.bounds_of(kind)
                .is_some_and(|bounds| bounds.contains(x, y))
        })
    }
}

impl Default for ChromeLayout {
    fn default() -> Self {
        Self::empty()
    }
}

/// Computes title bar layouts.
#[derive(Debug, Clone, Default)]
pub struct ChromeLayoutEngine {
    config: TitlePaneConfig,
}

impl ChromeLayoutEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: TitlePaneConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &TitlePaneConfig {
        &self.config
    }

    /// Height of the bar.
    ///
    /// The largest of the configured minimum, the title font height plus
    /// padding, and the menu bar's minimum height.
    pub fn preferred_height(&self, font_height: i32, menu_bar: Option<MenuBarMetrics>) -> i32 {
        let text_height = font_height + self.config.text_padding();
        let menu_height = menu_bar.map_or(0, |menu| menu.minimum_height);
        self.config.bar_height().max(text_height).max(menu_height)
    }

    /// Preferred size of the title pane container.
    pub fn preferred_size(
        &self,
        font_height: i32,
        menu_bar: Option<MenuBarMetrics>,
        hidden: bool,
    ) -> Size {
        if hidden {
            return Size::ZERO;
        }
        let height = self.preferred_height(font_height, menu_bar);
        Size::new(height + 1, height + 1)
    }

    /// Lay out the controls.
    pub fn layout(&self, input: &LayoutInput<'_>) -> ChromeLayout {
        if input.hidden || input.width <= 0 {
            tracing::trace!(target: targets::LAYOUT, width = input.width, "chrome hidden");
            return self.hidden_layout(input);
        }

        let layout = self.layout_left_to_right(input);
        let layout = match input.direction {
            TextDirection::LeftToRight => layout,
            TextDirection::RightToLeft => layout.mirrored(),
        };

        tracing::trace!(
            target: targets::LAYOUT,
            width = input.width,
            left = layout.geometry.left_inset,
            right = layout.geometry.right_inset,
            height = layout.geometry.bar_height,
            "chrome laid out"
        );
        layout
    }

    fn hidden_layout(&self, input: &LayoutInput<'_>) -> ChromeLayout {
        ChromeLayout {
            controls: input
                .controls
                .iter()
                .map(|control| control.with_bounds(Rect::ZERO))
                .collect(),
            geometry: ChromeGeometry::HIDDEN,
            width: input.width.max(0),
            leading_extent: 0,
            trailing_extent: 0,
            mirrored: false,
        }
    }

    fn icon_control_width(&self, control: &ControlSpec) -> i32 {
        let cap = self.config.icon_width();
        match control.icon(ActivationState::Active) {
            Some(icon) => icon.width().max(icon.height()).min(cap),
            None => cap,
        }
    }

    fn layout_left_to_right(&self, input: &LayoutInput<'_>) -> ChromeLayout {
        let pad = self.config.pad();
        let button_width = self.config.button_width();
        let height = self.preferred_height(input.font_height, input.menu_bar);
        let width = input.width;

        let mut bounds: Vec<Rect> = vec![Rect::ZERO; input.controls.len()];
        let index_of =
            |kind: ControlKind| input.controls.iter().position(|control| control.kind == kind);

        // Leading edge: icon, then menu bar.
        let mut start = 0;
        let mut left = 0;
        if let Some(index) = index_of(ControlKind::Icon) {
            let icon_width = self.icon_control_width(&input.controls[index]);
            bounds[index] = Rect::new(start + pad / 2, 0, icon_width, height);
            start += icon_width + pad;
            left = start;
        }
        if let Some(index) = index_of(ControlKind::Menu)
            && let Some(menu) = input.menu_bar
        {
            let menu_width = menu.preferred_width.max(0);
            bounds[index] = Rect::new(start, 0, menu_width, height + menu.bottom_inset);
            start += menu_width + pad;
            left += menu_width;
        }

        // Trailing edge: close nearest the corner, then maximize/restore,
        // then minimize.
        let mut x = width;
        let mut right = 0;
        let mut trailing = vec![ControlKind::Close];
        if input.frame_state_supported {
            trailing.extend([
                ControlKind::Maximize,
                ControlKind::Restore,
                ControlKind::Minimize,
            ]);
        }
        for kind in trailing {
            if let Some(index) = index_of(kind) {
                x -= button_width;
                right += button_width;
                bounds[index] = Rect::new(x, 0, button_width, height);
            }
        }

        // Title fills what is left between the two blocks.
        let start = start.max(pad);
        let title_width = (x - start - pad).max(0);
        if let Some(index) = index_of(ControlKind::Title) {
            bounds[index] = Rect::new(start, 0, title_width, height);
        }

        ChromeLayout {
            controls: input
                .controls
                .iter()
                .zip(bounds)
                .map(|(control, rect)| control.with_bounds(rect))
                .collect(),
            geometry: ChromeGeometry {
                left_inset: left,
                right_inset: right,
                bar_height: height,
            },
            width,
            leading_extent: start,
            trailing_extent: width - x + pad,
            mirrored: false,
        }
    }
}
