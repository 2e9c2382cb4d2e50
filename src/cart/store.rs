//! Cart Store

use std::{
    fmt, mem,
    sync::{Arc, Mutex},
};

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartCommand, Transition},
    notifications::{Dispatcher, NotificationSink},
    products::Product,
};

new_key_type! {
    /// Handle returned by [`CartStore::subscribe`].
    pub struct SubscriptionKey;
}

/// A store shared between threads. Every operation takes the lock for its whole
/// lookup-then-replace sequence.
pub type SharedCartStore = Arc<Mutex<CartStore>>;

/// Consumer of cart snapshots, such as a rendering layer.
pub trait CartObserver: Send {
    /// Called synchronously after an operation changed the cart.
    fn on_change(&mut self, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: FnMut(&Cart) + Send,
{
    fn on_change(&mut self, cart: &Cart) {
        self(cart);
    }
}

/// Owner of the current cart.
///
/// All mutation goes through [`add`](Self::add), [`remove`](Self::remove),
/// [`set_quantity`](Self::set_quantity) and [`clear`](Self::clear). Each one
/// applies a pure [`Transition`], forwards its events to the notification sink
/// and, when the cart changed, hands the new cart to every subscriber.
pub struct CartStore {
    cart: Cart,
    dispatcher: Dispatcher,
    observers: SlotMap<SubscriptionKey, Box<dyn CartObserver>>,
}

impl CartStore {
    /// Create a store with an empty cart that logs notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Dispatcher::default())
    }

    /// Create a store with an empty cart that notifies the given sink.
    pub fn with_sink(sink: impl NotificationSink + 'static) -> Self {
        Self::with_dispatcher(Dispatcher::new(sink))
    }

    fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            cart: Cart::new(),
            dispatcher,
            observers: SlotMap::with_key(),
        }
    }

    /// Wrap the store for use from several threads.
    pub fn into_shared(self) -> SharedCartStore {
        Arc::new(Mutex::new(self))
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total value of the current cart in centavos.
    pub fn total_cents(&self) -> i64 {
        self.cart.total_cents()
    }

    /// Total value of the current cart in reais.
    pub fn total(&self) -> Money<'static, Currency> {
        self.cart.total()
    }

    /// Register an observer, returning a key to cancel it with.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> SubscriptionKey {
        self.observers.insert(Box::new(observer))
    }

    /// Cancel a subscription. Returns `false` if the key was not subscribed.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.observers.remove(key).is_some()
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Add one of a product.
    pub fn add(&mut self, product: Product) {
        self.add_quantity(product, 1);
    }

    /// Add `quantity` of a product, merging with its existing line.
    ///
    /// A zero quantity is ignored.
    pub fn add_quantity(&mut self, product: Product, quantity: u32) {
        self.dispatch(CartCommand::add(product, quantity));
    }

    /// Remove every line whose resolved key or raw product id equals `key`.
    pub fn remove(&mut self, key: &str) {
        self.dispatch(CartCommand::remove(key));
    }

    /// Set the quantity of every line matching `key`, floored at one.
    pub fn set_quantity(&mut self, key: &str, quantity: i64) {
        self.dispatch(CartCommand::set_quantity(key, quantity));
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.dispatch(CartCommand::Clear);
    }

    /// Apply a command to the current cart.
    pub fn dispatch(&mut self, command: CartCommand) {
        let name = command.name();
        let is_add = matches!(command, CartCommand::Add { .. });

        let Transition {
            cart,
            events,
            changed,
        } = mem::take(&mut self.cart).apply(command);

        self.cart = cart;

        // An add only leaves the cart untouched when its quantity is zero.
        if is_add && !changed {
            warn!(command = name, "ignoring add with zero quantity");
        }

        debug!(
            command = name,
            lines = self.cart.len(),
            changed,
            "applied cart command"
        );

        self.dispatcher.dispatch(&events);

        if changed {
            for observer in self.observers.values_mut() {
                observer.on_change(&self.cart);
            }
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("dispatcher", &self.dispatcher)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::{
        cart::{CartEvent, LineItem},
        notifications::RecordingSink,
    };

    use super::*;

    fn uno() -> Product {
        Product::new("Fiat", "Uno", 2020, 3_000_000)
    }

    #[test]
    fn operations_forward_events_to_sink() {
        let sink = RecordingSink::new();
        let mut store = CartStore::with_sink(sink.clone());

        store.add_quantity(uno(), 2);
        store.add(uno());
        store.set_quantity("Fiat-Uno-2020-3000000", 5);
        store.remove("Fiat-Uno-2020-3000000");
        store.clear();

        assert_eq!(
            sink.events(),
            [
                CartEvent::Added {
                    name: "Fiat Uno".to_string(),
                    quantity: 2
                },
                CartEvent::Merged {
                    name: "Fiat Uno".to_string(),
                    quantity: 1
                },
                CartEvent::QuantityChanged { quantity: 5 },
                CartEvent::Removed {
                    name: "Fiat Uno".to_string()
                },
            ]
        );
    }

    #[test]
    fn add_zero_quantity_is_ignored() {
        let sink = RecordingSink::new();
        let mut store = CartStore::with_sink(sink.clone());

        store.add_quantity(uno(), 0);

        assert!(store.cart().is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn dispatched_zero_add_leaves_observers_alone() {
        let sink = RecordingSink::new();
        let calls = Arc::new(Mutex::new(0));
        let mut store = CartStore::with_sink(sink.clone());

        let counter = Arc::clone(&calls);
        store.subscribe(move |_cart: &Cart| {
            if let Ok(mut calls) = counter.lock() {
                *calls += 1;
            }
        });

        store.dispatch(CartCommand::add(uno(), 0));
        store.add_quantity(uno(), 1);
        store.add_quantity(uno(), 0);

        assert_eq!(store.cart().get("Fiat-Uno-2020-3000000").map(LineItem::quantity), Some(1));
        assert_eq!(sink.events().len(), 1);
        assert_eq!(calls.lock().map(|calls| *calls).unwrap_or_default(), 1);
    }

    #[test]
    fn observers_see_changes_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = CartStore::with_sink(crate::notifications::NoopSink);

        let seen_by_observer = Arc::clone(&seen);
        store.subscribe(move |cart: &Cart| {
            if let Ok(mut seen) = seen_by_observer.lock() {
                seen.push(cart.total_cents());
            }
        });

        store.add_quantity(uno(), 2);
        store.remove("missing");
        store.set_quantity("Fiat-Uno-2020-3000000", 2);
        store.clear();
        store.clear();

        let seen = seen.lock().map(|seen| seen.clone()).unwrap_or_default();

        assert_eq!(seen, [6_000_000, 0]);
    }

    #[test]
    fn unsubscribe_stops_updates() {
        let count = Arc::new(Mutex::new(0));
        let mut store = CartStore::with_sink(crate::notifications::NoopSink);

        let counter = Arc::clone(&count);
        let key = store.subscribe(move |_cart: &Cart| {
            if let Ok(mut count) = counter.lock() {
                *count += 1;
            }
        });

        store.add(uno());
        assert!(store.unsubscribe(key));
        assert!(!store.unsubscribe(key));
        store.add(uno());

        assert_eq!(store.subscriber_count(), 0);
        assert_eq!(count.lock().map(|count| *count).unwrap_or_default(), 1);
    }

    #[test]
    fn totals_follow_cart() {
        let mut store = CartStore::with_sink(crate::notifications::NoopSink);

        store.add_quantity(uno(), 3);

        assert_eq!(store.total_cents(), 9_000_000);
        assert_eq!(store.total(), crate::pricing::brl(9_000_000));
    }

    #[test]
    fn debug_lists_observer_count() {
        let store = CartStore::default();

        assert!(format!("{store:?}").contains("observers: 0"));
    }
}
