//! Property change subscriptions.
//!
//! [`PropertyNotifier`] is the subscriber list toolkit adapters use to
//! implement [`ChromeWindow::subscribe`](crate::ChromeWindow::subscribe) and
//! friends. Every subscription is identified by a [`SubscriptionId`]; the
//! title pane keeps these ids as disposer tokens and hands them back on
//! uninstall so no subscription outlives the chrome.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use horizon_lattice_chrome::{PropertyChange, PropertyNotifier, PropertyValue, WindowProperty};
//!
//! let notifier = PropertyNotifier::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let counter = seen.clone();
//! let id = notifier.subscribe("title", Rc::new(move |_change: &PropertyChange| counter.set(counter.get() + 1)));
//!
//! notifier.notify(&PropertyChange::of(WindowProperty::Title, PropertyValue::Text(None)));
//! notifier.notify(&PropertyChange::of(WindowProperty::Resizable, PropertyValue::Bool(true)));
//! assert_eq!(seen.get(), 1);
//!
//! assert!(notifier.unsubscribe(id));
//! assert!(!notifier.unsubscribe(id));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::window::{PropertyChange, PropertyValue, WindowProperty};

new_key_type! {
    /// Identifier of a property or activation subscription.
    ///
    /// Returned by `subscribe`, consumed by `unsubscribe`.
    pub struct SubscriptionId;
}

/// Callback invoked with a property change notification.
pub type PropertyCallback = Rc<dyn Fn(&PropertyChange)>;

/// Callback invoked with the new activation state (`true` = active).
pub type ActivationCallback = Rc<dyn Fn(bool)>;

enum Subscriber {
    Property {
        name: String,
        callback: PropertyCallback,
    },
    Activation(ActivationCallback),
}

/// A list of property and activation subscribers.
#[derive(Default)]
pub struct PropertyNotifier {
    subscribers: RefCell<SlotMap<SubscriptionId, Subscriber>>,
}

impl PropertyNotifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to changes of the named property.
    pub fn subscribe(&self, name: &str, callback: PropertyCallback) -> SubscriptionId {
        self.subscribers.borrow_mut().insert(Subscriber::Property {
            name: name.to_string(),
            callback,
        })
    }

    /// Subscribe to activation changes.
    pub fn subscribe_activation(&self, callback: ActivationCallback) -> SubscriptionId {
        self.subscribers
            .borrow_mut()
            .insert(Subscriber::Activation(callback))
    }

    /// Remove a subscription.
    ///
    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.borrow_mut().remove(id).is_some()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Deliver a property change to every subscriber of its name.
    ///
    /// Subscribers removed by an earlier callback of the same delivery are
    /// skipped.
    pub fn notify(&self, change: &PropertyChange) {
        let targets: Vec<(SubscriptionId, PropertyCallback)> = self
            .subscribers
            .borrow()
            .iter()
            .filter_map(|(id, subscriber)| match subscriber {
                Subscriber::Property { name, callback } if *name == change.name => {
                    Some((id, callback.clone()))
                }
                _ => None,
            })
            .collect();

        for (id, callback) in targets {
            if self.subscribers.borrow().contains_key(id) {
                callback(change);
            }
        }
    }

    /// Deliver a change of a known property.
    pub fn fire(&self, property: WindowProperty, new_value: PropertyValue) {
        self.notify(&PropertyChange::of(property, new_value));
    }

    /// Deliver an activation change to every activation subscriber.
    pub fn notify_activation(&self, active: bool) {
        let targets: Vec<(SubscriptionId, ActivationCallback)> = self
            .subscribers
            .borrow()
            .iter()
            .filter_map(|(id, subscriber)| match subscriber {
                Subscriber::Activation(callback) => Some((id, callback.clone())),
                Subscriber::Property { .. } => None,
            })
            .collect();

        for (id, callback) in targets {
            if self.subscribers.borrow().contains_key(id) {
                callback(active);
            }
        }
    }
}

impl fmt::Debug for PropertyNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[test]
    fn test_notify_by_name() {
        let notifier = PropertyNotifier::new();
        let titles = Rc::new(RefCell::new(Vec::new()));

        let sink = titles.clone();
        notifier.subscribe(
            "title",
            Rc::new(move |change: &PropertyChange| {
                if let PropertyValue::Text(text) = &change.new_value {
                    sink.borrow_mut().push(text.clone());
                }
            }),
        );

        notifier.fire(WindowProperty::Title, PropertyValue::Text(Some("One".into())));
        notifier.fire(WindowProperty::Background, PropertyValue::Color(None));
        notifier.fire(WindowProperty::Title, PropertyValue::Text(None));

        assert_eq!(*titles.borrow(), vec![Some("One".to_string()), None]);
    }

    #[test]
    fn test_activation_subscribers() {
        let notifier = PropertyNotifier::new();
        let last = Rc::new(Cell::new(None));

        let sink = last.clone();
        let id = notifier.subscribe_activation(Rc::new(move |active: bool| sink.set(Some(active))));

        notifier.notify_activation(false);
        assert_eq!(last.get(), Some(false));

        notifier.unsubscribe(id);
        notifier.notify_activation(true);
        assert_eq!(last.get(), Some(false));
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_delivery() {
        let notifier = Rc::new(PropertyNotifier::new());
        let second_calls = Rc::new(Cell::new(0));
        let second_id = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&notifier);
        let victim = second_id.clone();
        notifier.subscribe(
            "resizable",
            Rc::new(move |_: &PropertyChange| {
                if let (Some(notifier), Some(id)) = (weak.upgrade(), victim.get()) {
                    notifier.unsubscribe(id);
                }
            }),
        );

        let counter = second_calls.clone();
        let id = notifier.subscribe(
            "resizable",
            Rc::new(move |_: &PropertyChange| counter.set(counter.get() + 1)),
        );
        second_id.set(Some(id));

        notifier.fire(WindowProperty::Resizable, PropertyValue::Bool(false));
        assert_eq!(second_calls.get(), 0);
        assert_eq!(notifier.subscriber_count(), 1);
    }
}
