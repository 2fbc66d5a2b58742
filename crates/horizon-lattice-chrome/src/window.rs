//! The toolkit window model the title pane synchronizes with.
//!
//! The windowing toolkit itself is external: the chrome only needs the
//! handful of properties listed on [`ChromeWindow`] plus a way to subscribe to
//! their change notifications.

use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::sync::Arc;

use raw_window_handle::HasWindowHandle;

use crate::geometry::{Rect, Size};
use crate::notifier::{ActivationCallback, PropertyCallback, SubscriptionId};
use crate::theme::{Icon, Rgb};

// ============================================================================
// Extended State
// ============================================================================

/// The extended window state bitmask reported by the window manager.
///
/// # Example
///
/// ```
/// use horizon_lattice_chrome::ExtendedState;
///
/// let state = ExtendedState::MAXIMIZED_BOTH | ExtendedState::ICONIFIED;
/// assert!(state.is_maximized());
/// assert!(state.is_iconified());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExtendedState(u8);

impl ExtendedState {
    /// Normal state, no bits set.
    pub const NORMAL: ExtendedState = ExtendedState(0);

    /// The window is iconified (minimized).
    pub const ICONIFIED: ExtendedState = ExtendedState(1 << 0);

    /// The window is maximized horizontally.
    pub const MAXIMIZED_HORIZ: ExtendedState = ExtendedState(1 << 1);

    /// The window is maximized vertically.
    pub const MAXIMIZED_VERT: ExtendedState = ExtendedState(1 << 2);

    /// The window is maximized in both directions.
    pub const MAXIMIZED_BOTH: ExtendedState =
        ExtendedState(Self::MAXIMIZED_HORIZ.0 | Self::MAXIMIZED_VERT.0);

    /// Create from raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get the raw bits.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Check if all bits of `other` are set.
    pub const fn contains(&self, other: ExtendedState) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any maximized bit is set.
    pub const fn is_maximized(&self) -> bool {
        (self.0 & Self::MAXIMIZED_BOTH.0) != 0
    }

    /// Check if the iconified bit is set.
    pub const fn is_iconified(&self) -> bool {
        self.contains(Self::ICONIFIED)
    }
}

impl BitOr for ExtendedState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        ExtendedState(self.0 | rhs.0)
    }
}

impl BitOrAssign for ExtendedState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ExtendedState {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        ExtendedState(self.0 & rhs.0)
    }
}

// ============================================================================
// Window Kind and Decoration Style
// ============================================================================

/// What kind of top-level window the chrome decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowKind {
    /// A frame: can be minimized and maximized.
    #[default]
    Frame,
    /// A dialog: only ever shows a close button.
    Dialog,
}

/// The decoration style requested for the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecorationStyle {
    /// No decorations; the bar only shows when there is a title or menu.
    None,
    /// Full frame decorations.
    #[default]
    Frame,
    PlainDialog,
    InformationDialog,
    ErrorDialog,
    ColorChooserDialog,
    FileChooserDialog,
    QuestionDialog,
    WarningDialog,
}

impl DecorationStyle {
    /// Check if this is the frame style.
    pub fn is_frame(&self) -> bool {
        matches!(self, DecorationStyle::Frame)
    }

    /// Check if this is one of the dialog styles.
    pub fn is_dialog(&self) -> bool {
        !matches!(self, DecorationStyle::None | DecorationStyle::Frame)
    }
}

/// Horizontal text direction of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    /// Check if this is left-to-right.
    pub fn is_left_to_right(&self) -> bool {
        matches!(self, TextDirection::LeftToRight)
    }
}

/// Size information of a menu bar embedded into the title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuBarMetrics {
    /// Width the menu bar wants to occupy.
    pub preferred_width: i32,
    /// Minimum height of the menu bar.
    pub minimum_height: i32,
    /// Bottom inset of the menu bar border.
    pub bottom_inset: i32,
}

impl MenuBarMetrics {
    /// Create menu bar metrics without a bottom inset.
    pub const fn new(preferred_width: i32, minimum_height: i32) -> Self {
        Self {
            preferred_width,
            minimum_height,
            bottom_inset: 0,
        }
    }
}

// ============================================================================
// Property Changes
// ============================================================================

/// The window properties the title pane reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowProperty {
    Resizable,
    ExtendedState,
    Title,
    IconImages,
    ComponentOrientation,
    Background,
}

impl WindowProperty {
    /// All properties the title pane subscribes to.
    pub const ALL: [WindowProperty; 6] = [
        WindowProperty::Resizable,
        WindowProperty::ExtendedState,
        WindowProperty::Title,
        WindowProperty::IconImages,
        WindowProperty::ComponentOrientation,
        WindowProperty::Background,
    ];

    /// The property name used by the toolkit's change notifications.
    pub const fn name(&self) -> &'static str {
        match self {
            WindowProperty::Resizable => "resizable",
            WindowProperty::ExtendedState => "state",
            WindowProperty::Title => "title",
            WindowProperty::IconImages => "iconImage",
            WindowProperty::ComponentOrientation => "componentOrientation",
            WindowProperty::Background => "background",
        }
    }

    /// Look up a property by its notification name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|property| property.name() == name)
    }
}

/// The new value carried by a property change notification.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    State(ExtendedState),
    Text(Option<String>),
    Direction(TextDirection),
    Color(Option<Rgb>),
    /// The toolkit did not send a value (e.g. for icon image lists).
    Unspecified,
}

/// A property change notification sent by the toolkit window.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChange {
    /// The toolkit's property name.
    pub name: String,
    /// The new value.
    pub new_value: PropertyValue,
}

impl PropertyChange {
    /// Create a change notification.
    pub fn new(name: impl Into<String>, new_value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            new_value,
        }
    }

    /// Create a change notification for a known property.
    pub fn of(property: WindowProperty, new_value: PropertyValue) -> Self {
        Self::new(property.name(), new_value)
    }
}

// ============================================================================
// ChromeWindow
// ============================================================================

/// A toolkit window that can carry a custom title pane.
///
/// Implementations are thin adapters over the toolkit's window object. All
/// methods take `&self`: toolkit windows are shared handles and are only
/// touched from the UI thread that owns them.
pub trait ChromeWindow: HasWindowHandle {
    /// Whether the window is a frame or a dialog.
    fn kind(&self) -> WindowKind;

    /// The requested decoration style.
    fn decoration_style(&self) -> DecorationStyle;

    /// The current extended state bitmask.
    fn extended_state(&self) -> ExtendedState;

    /// Whether the user may resize the window.
    fn is_resizable(&self) -> bool;

    /// Whether the window is the active (focused) window.
    fn is_active(&self) -> bool;

    /// The window title.
    fn title(&self) -> Option<String>;

    /// The icon images set on the window, in any order.
    fn icon_images(&self) -> Vec<Arc<dyn Icon>>;

    /// The text direction of the window's components.
    fn text_direction(&self) -> TextDirection;

    /// The window background color.
    fn background(&self) -> Rgb;

    /// The window bounds in screen coordinates.
    fn bounds(&self) -> Rect;

    /// The preferred size, if one has been set explicitly.
    fn preferred_size(&self) -> Option<Size> {
        None
    }

    /// Resize the window.
    fn set_size(&self, width: i32, height: i32);

    /// Move the window.
    fn set_location(&self, x: i32, y: i32);

    /// Insets of the native frame that the toolkit reports.
    fn native_insets(&self) -> Insets {
        Insets::ZERO
    }

    /// Line height of the title font.
    fn title_font_height(&self) -> i32;

    /// The menu bar to embed into the title bar, if any.
    fn menu_bar(&self) -> Option<MenuBarMetrics> {
        None
    }

    /// Hand an embedded menu bar back to its original container.
    fn restore_menu_bar(&self) {}

    /// Whether the platform supports maximizing windows.
    fn frame_state_supported(&self) -> bool {
        true
    }

    /// Ask the toolkit to close the window, as if the user closed it.
    fn request_close(&self);

    /// Ask the toolkit to repaint the title pane.
    fn request_repaint(&self);

    /// Subscribe to change notifications of the named property.
    fn subscribe(&self, name: &str, callback: PropertyCallback) -> SubscriptionId;

    /// Subscribe to activation (focus gained/lost) events.
    fn subscribe_activation(&self, callback: ActivationCallback) -> SubscriptionId;

    /// Remove a subscription. Returns `false` if it was already removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Border insets in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    /// Zero insets.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create new insets.
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Negate every side.
    pub const fn negated(&self) -> Self {
        Self::new(-self.top, -self.left, -self.bottom, -self.right)
    }
}
