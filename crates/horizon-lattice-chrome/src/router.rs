//! Routing of window property changes.
//!
//! The [`PropertyChangeRouter`] subscribes to the fixed set of window
//! properties the chrome depends on and classifies every notification into a
//! [`Route`]:
//!
//! | property               | route                              |
//! |------------------------|------------------------------------|
//! | `resizable`            | [`Route::Resizable`] (state machine) |
//! | `state`                | [`Route::ExtendedState`] (state machine) |
//! | `title`                | [`Route::Title`] (repaint)         |
//! | `iconImage`            | [`Route::Icon`] (re-layout)        |
//! | `componentOrientation` | [`Route::Orientation`] (re-layout) |
//! | `background`           | [`Route::Background`] (bridge)     |
//!
//! Anything else is [`Route::Ignore`]d.

use std::rc::Rc;

use crate::logging::targets;
use crate::notifier::{ActivationCallback, SubscriptionId};
use crate::theme::Rgb;
use crate::window::{ChromeWindow, ExtendedState, PropertyChange, PropertyValue, WindowProperty};

/// Where a property change goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Resizability changed. `None` means the value must be re-read from
    /// the window.
    Resizable(Option<bool>),
    /// The extended state changed.
    ExtendedState(Option<ExtendedState>),
    /// The title text changed.
    Title,
    /// The window icon images changed.
    Icon,
    /// The component orientation changed.
    Orientation,
    /// The background color changed.
    Background(Option<Rgb>),
    /// Not a property the chrome cares about.
    Ignore,
}

impl Route {
    /// Whether the route feeds a state machine transition.
    pub fn is_transition(&self) -> bool {
        matches!(self, Route::Resizable(_) | Route::ExtendedState(_))
    }

    /// Whether the route only needs a new layout (and a repaint).
    pub fn needs_layout(&self) -> bool {
        matches!(self, Route::Icon | Route::Orientation)
    }
}

/// Callback receiving routed property changes.
pub type RouteCallback = Rc<dyn Fn(Route)>;

/// Subscribes to window property changes and dispatches them by [`Route`].
///
/// The router keeps the subscription ids it was handed as disposer tokens;
/// [`detach`](Self::detach) returns every one of them to the window.
#[derive(Debug, Default)]
pub struct PropertyChangeRouter {
    tokens: Vec<SubscriptionId>,
}

impl PropertyChangeRouter {
    /// Create a detached router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a property change.
    pub fn route(change: &PropertyChange) -> Route {
        let Some(property) = WindowProperty::from_name(&change.name) else {
            return Route::Ignore;
        };

        match (property, &change.new_value) {
            (WindowProperty::Resizable, PropertyValue::Bool(value)) => Route::Resizable(Some(*value)),
            (WindowProperty::Resizable, _) => Route::Resizable(None),
            (WindowProperty::ExtendedState, PropertyValue::State(state)) => {
                Route::ExtendedState(Some(*state))
            }
            (WindowProperty::ExtendedState, _) => Route::ExtendedState(None),
            (WindowProperty::Title, _) => Route::Title,
            (WindowProperty::IconImages, _) => Route::Icon,
            (WindowProperty::ComponentOrientation, _) => Route::Orientation,
            (WindowProperty::Background, PropertyValue::Color(color)) => Route::Background(*color),
            (WindowProperty::Background, _) => Route::Background(None),
        }
    }

    /// Subscribe to every routed property and to activation events.
    ///
    /// Attaching an already attached router first detaches it, so a window
    /// never holds more than one set of chrome subscriptions.
    pub fn attach<W>(&mut self, window: &W, sink: RouteCallback, activation: ActivationCallback)
    where
        W: ChromeWindow + ?Sized,
    {
        if self.is_attached() {
            self.detach(window);
        }

        for property in WindowProperty::ALL {
            let sink = sink.clone();
            let id = window.subscribe(
                property.name(),
                Rc::new(move |change: &PropertyChange| {
                    let route = PropertyChangeRouter::route(change);
                    tracing::trace!(
                        target: targets::ROUTER,
                        property = %change.name,
                        ?route,
                        "property change"
                    );
                    if route != Route::Ignore {
                        sink(route);
                    }
                }),
            );
            self.tokens.push(id);
        }
        self.tokens.push(window.subscribe_activation(activation));

        tracing::debug!(
            target: targets::ROUTER,
            subscriptions = self.tokens.len(),
            "router attached"
        );
    }

    /// Remove every subscription made by [`attach`](Self::attach).
    ///
    /// Returns the number of subscriptions the window still held.
    pub fn detach<W>(&mut self, window: &W) -> usize
    where
        W: ChromeWindow + ?Sized,
    {
        let removed = self
            .tokens
            .drain(..)
            .filter(|id| window.unsubscribe(*id))
            .count();
        if removed > 0 {
            tracing::debug!(target: targets::ROUTER, removed, "router detached");
        }
        removed
    }

    /// Whether the router currently holds subscriptions.
    pub fn is_attached(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Number of subscriptions held.
    pub fn subscription_count(&self) -> usize {
        self.tokens.len()
    }
}
