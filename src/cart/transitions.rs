//! Cart Transitions
//!
//! Pure state changes. Each command consumes the current [`Cart`] and returns a
//! [`Transition`]: the next cart, the events to report and whether anything
//! changed. Nothing here logs or notifies; [`CartStore`](super::CartStore) does.

use smallvec::{SmallVec, smallvec};

use crate::{
    cart::{Cart, CartEvent, LineItem},
    products::{Product, resolve_key},
};

/// A mutation requested of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add `quantity` of a product, merging with an existing line.
    Add {
        /// Product to add
        product: Product,
        /// Quantity to add; zero is ignored
        quantity: u32,
    },

    /// Remove every line matching `key`.
    Remove {
        /// Resolved key or raw product id
        key: String,
    },

    /// Set the quantity of every line matching `key`, floored at one.
    SetQuantity {
        /// Resolved key or raw product id
        key: String,
        /// Requested quantity
        quantity: i64,
    },

    /// Remove all lines.
    Clear,
}

impl CartCommand {
    /// Add command
    pub fn add(product: Product, quantity: u32) -> Self {
        CartCommand::Add { product, quantity }
    }

    /// Remove command
    pub fn remove(key: impl Into<String>) -> Self {
        CartCommand::Remove { key: key.into() }
    }

    /// Set quantity command
    pub fn set_quantity(key: impl Into<String>, quantity: i64) -> Self {
        CartCommand::SetQuantity {
            key: key.into(),
            quantity,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add { .. } => "add",
            CartCommand::Remove { .. } => "remove",
            CartCommand::SetQuantity { .. } => "set_quantity",
            CartCommand::Clear => "clear",
        }
    }
}

/// Outcome of applying a [`CartCommand`].
#[derive(Debug)]
pub struct Transition {
    /// Cart after the command
    pub cart: Cart,

    /// Events to report, at most one per command
    pub events: SmallVec<[CartEvent; 1]>,

    /// Whether the cart differs from the one the command was applied to
    pub changed: bool,
}

impl Transition {
    fn unchanged(cart: Cart) -> Self {
        Self {
            cart,
            events: SmallVec::new(),
            changed: false,
        }
    }

    fn changed(cart: Cart, event: CartEvent) -> Self {
        Self {
            cart,
            events: smallvec![event],
            changed: true,
        }
    }
}

/// Floor a requested quantity at one and cap it to the line quantity range.
pub fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

impl Cart {
    /// Apply a command, returning the next cart.
    #[must_use]
    pub fn apply(self, command: CartCommand) -> Transition {
        match command {
            CartCommand::Add { product, quantity } => self.add(product, quantity),
            CartCommand::Remove { key } => self.remove(&key),
            CartCommand::SetQuantity { key, quantity } => self.set_quantity(&key, quantity),
            CartCommand::Clear => self.clear(),
        }
    }

    fn add(mut self, product: Product, quantity: u32) -> Transition {
        if quantity == 0 {
            return Transition::unchanged(self);
        }

        let key = resolve_key(&product);
        let name = product.display_name();

        if let Some(existing) = self.items.iter_mut().find(|item| item.key == key) {
            existing.set_quantity(existing.quantity().saturating_add(quantity));

            return Transition::changed(self, CartEvent::Merged { name, quantity });
        }

        self.items.push(LineItem::new(product, quantity));

        Transition::changed(self, CartEvent::Added { name, quantity })
    }

    fn remove(mut self, key: &str) -> Transition {
        let Some(name) = self.get(key).map(|item| item.product().display_name()) else {
            return Transition::unchanged(self);
        };

        self.items.retain(|item| !item.matches(key));

        Transition::changed(self, CartEvent::Removed { name })
    }

    fn set_quantity(mut self, key: &str, quantity: i64) -> Transition {
        let quantity = clamp_quantity(quantity);

        let Some(current) = self.get(key).map(LineItem::quantity) else {
            return Transition::unchanged(self);
        };

        let mut changed = false;

        for item in self.items.iter_mut().filter(|item| item.matches(key)) {
            if item.quantity() != quantity {
                item.set_quantity(quantity);
                changed = true;
            }
        }

        let events = if current == quantity {
            SmallVec::new()
        } else {
            smallvec![CartEvent::QuantityChanged { quantity }]
        };

        Transition {
            cart: self,
            events,
            changed,
        }
    }

    fn clear(self) -> Transition {
        if self.is_empty() {
            Transition::unchanged(self)
        } else {
            Transition::changed(Cart::new(), CartEvent::Cleared)
        }
    }
}
