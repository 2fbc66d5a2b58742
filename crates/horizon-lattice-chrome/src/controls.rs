//! Title bar controls and the state that decides which are present.
//!
//! The control set is rebuilt from scratch whenever the frame state or the
//! resizability changes. Stale [`ControlSpec`]s are dropped rather than
//! patched, so nothing can keep pointing at a control that was removed.

use std::sync::Arc;

use crate::geometry::Rect;
use crate::theme::{Icon, IconKey, IconPair, IconProvider};
use crate::window::{DecorationStyle, ExtendedState, WindowKind};

// ============================================================================
// States
// ============================================================================

/// Frame state of a window, mirroring the window manager's extended state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    MaximizedAndMinimized,
}

impl FrameState {
    /// Map an extended state bitmask. Any maximized bit counts as maximized.
    pub fn from_extended_state(state: ExtendedState) -> Self {
        match (state.is_maximized(), state.is_iconified()) {
            (false, false) => FrameState::Normal,
            (false, true) => FrameState::Minimized,
            (true, false) => FrameState::Maximized,
            (true, true) => FrameState::MaximizedAndMinimized,
        }
    }

    /// Check if the window is maximized (possibly also minimized).
    pub fn is_maximized(&self) -> bool {
        matches!(
            self,
            FrameState::Maximized | FrameState::MaximizedAndMinimized
        )
    }

    /// Check if the window is minimized (possibly also maximized).
    pub fn is_minimized(&self) -> bool {
        matches!(
            self,
            FrameState::Minimized | FrameState::MaximizedAndMinimized
        )
    }
}

/// Whether the window is the active window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivationState {
    #[default]
    Active,
    Inactive,
}

impl ActivationState {
    /// Map a focus flag.
    pub fn from_active(active: bool) -> Self {
        if active {
            ActivationState::Active
        } else {
            ActivationState::Inactive
        }
    }

    /// Check if this is the active state.
    pub fn is_active(&self) -> bool {
        matches!(self, ActivationState::Active)
    }
}

// ============================================================================
// Controls and Actions
// ============================================================================

/// The kinds of controls a title bar can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Close,
    Maximize,
    Restore,
    Minimize,
    Icon,
    Menu,
    Title,
}

impl ControlKind {
    /// The action a click on this control performs.
    pub fn action(&self) -> Option<ChromeAction> {
        match self {
            ControlKind::Close => Some(ChromeAction::Close),
            ControlKind::Maximize => Some(ChromeAction::Maximize),
            ControlKind::Restore => Some(ChromeAction::Restore),
            ControlKind::Minimize => Some(ChromeAction::Minimize),
            ControlKind::Icon | ControlKind::Menu | ControlKind::Title => None,
        }
    }

    /// Check if this is one of the window buttons on the trailing edge.
    pub fn is_window_button(&self) -> bool {
        self.action().is_some()
    }
}

/// Window actions bound to the title bar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeAction {
    Close,
    Minimize,
    Maximize,
    Restore,
}

impl ChromeAction {
    /// Display name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            ChromeAction::Close => "Close",
            ChromeAction::Minimize => "Minimize",
            ChromeAction::Maximize => "Maximize",
            ChromeAction::Restore => "Restore",
        }
    }

    /// The control that carries this action.
    pub fn control(&self) -> ControlKind {
        match self {
            ChromeAction::Close => ControlKind::Close,
            ChromeAction::Minimize => ControlKind::Minimize,
            ChromeAction::Maximize => ControlKind::Maximize,
            ChromeAction::Restore => ControlKind::Restore,
        }
    }
}

/// One control of the title bar.
#[derive(Debug, Clone)]
pub struct ControlSpec {
    /// What the control is.
    pub kind: ControlKind,
    /// Whether the control reacts to clicks.
    pub enabled: bool,
    /// Bounds assigned by the last layout pass.
    pub bounds: Rect,
    /// Active/inactive icon variants, for icon-bearing controls.
    pub icons: Option<IconPair>,
}

impl ControlSpec {
    /// Create a control with empty bounds.
    pub fn new(kind: ControlKind, enabled: bool, icons: Option<IconPair>) -> Self {
        Self {
            kind,
            enabled,
            bounds: Rect::ZERO,
            icons,
        }
    }

    /// A copy of this control with new bounds.
    pub fn with_bounds(&self, bounds: Rect) -> Self {
        Self {
            bounds,
            ..self.clone()
        }
    }

    /// The icon variant for an activation state.
    pub fn icon(&self, activation: ActivationState) -> Option<&Arc<dyn Icon>> {
        self.icons.as_ref().map(|pair| pair.for_state(activation))
    }
}

// ============================================================================
// Control Set
// ============================================================================

/// The window facts the control set depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSetInput {
    pub style: DecorationStyle,
    pub kind: WindowKind,
    /// Effective resizability (always false for style `None`).
    pub resizable: bool,
    pub frame_state: FrameState,
    pub has_menu_bar: bool,
}

/// Decide which controls are present, in leading-to-trailing order.
///
/// | resizable | maximized | window buttons             |
/// |-----------|-----------|----------------------------|
/// | false     | any       | Close                      |
/// | true      | no        | Close, Minimize, Maximize  |
/// | true      | yes       | Close, Minimize, Restore   |
///
/// Only frames decorated with the frame style get minimize and
/// maximize/restore; dialogs never do.
pub fn control_kinds(input: &ControlSetInput) -> Vec<ControlKind> {
    let mut kinds = Vec::with_capacity(6);

    if input.style.is_frame() {
        kinds.push(ControlKind::Icon);
    }
    if input.has_menu_bar {
        kinds.push(ControlKind::Menu);
    }
    kinds.push(ControlKind::Title);

    if input.style.is_frame() || input.style.is_dialog() {
        kinds.push(ControlKind::Close);
    }

    let frame_buttons =
        input.style.is_frame() && input.kind == WindowKind::Frame && input.resizable;
    if frame_buttons {
        if input.frame_state.is_maximized() {
            kinds.push(ControlKind::Restore);
        } else {
            kinds.push(ControlKind::Maximize);
        }
        kinds.push(ControlKind::Minimize);
    }

    kinds
}

/// Build a fresh control set with icons attached.
///
/// `window_icon` is the icon shown by the icon control; when `None` the
/// provider's default window icon is used.
pub fn build_control_set(
    input: &ControlSetInput,
    icons: &dyn IconProvider,
    window_icon: Option<IconPair>,
) -> Vec<ControlSpec> {
    let mut window_icon = window_icon;

    control_kinds(input)
        .into_iter()
        .map(|kind| match kind {
            ControlKind::Icon => {
                let pair = window_icon
                    .take()
                    .unwrap_or_else(|| icons.icon_pair_for(IconKey::Window));
                ControlSpec::new(kind, true, Some(pair))
            }
            ControlKind::Close => {
                ControlSpec::new(kind, true, Some(icons.icon_pair_for(IconKey::Close)))
            }
            ControlKind::Minimize => {
                ControlSpec::new(kind, true, Some(icons.icon_pair_for(IconKey::Minimize)))
            }
            ControlKind::Maximize => ControlSpec::new(
                kind,
                !input.frame_state.is_maximized(),
                Some(icons.icon_pair_for(IconKey::Maximize)),
            ),
            ControlKind::Restore => ControlSpec::new(
                kind,
                input.frame_state.is_maximized(),
                Some(icons.icon_pair_for(IconKey::Restore)),
            ),
            ControlKind::Menu | ControlKind::Title => ControlSpec::new(kind, true, None),
        })
        .collect()
}
