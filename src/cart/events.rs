//! Cart Events

use std::fmt;

/// Something a cart change reports to the shopper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product got a new line.
    Added {
        /// Display name of the product
        name: String,
        /// Quantity on the new line
        quantity: u32,
    },

    /// A product already in the cart had its quantity increased.
    Merged {
        /// Display name of the product
        name: String,
        /// Quantity added to the existing line
        quantity: u32,
    },

    /// A line was removed.
    Removed {
        /// Display name of the removed product
        name: String,
    },

    /// A line's quantity was set to a new value.
    QuantityChanged {
        /// Quantity after the change
        quantity: u32,
    },

    /// A non-empty cart was emptied.
    Cleared,
}

impl CartEvent {
    /// Kind of this event, without its payload.
    pub fn kind(&self) -> CartEventKind {
        match self {
            CartEvent::Added { .. } => CartEventKind::Added,
            CartEvent::Merged { .. } => CartEventKind::Merged,
            CartEvent::Removed { .. } => CartEventKind::Removed,
            CartEvent::QuantityChanged { .. } => CartEventKind::QuantityChanged,
            CartEvent::Cleared => CartEventKind::Cleared,
        }
    }
}

impl fmt::Display for CartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartEvent::Added { name, .. } => write!(f, "{name} added to the cart!"),
            CartEvent::Merged { name, quantity } => {
                write!(f, "+{quantity} {name} added to the cart!")
            }
            CartEvent::Removed { name } => write!(f, "{name} removed from the cart"),
            CartEvent::QuantityChanged { quantity } => write!(f, "Quantity updated to {quantity}"),
            CartEvent::Cleared => f.write_str("Cart cleared!"),
        }
    }
}

/// Cart event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartEventKind {
    /// See [`CartEvent::Added`]
    Added,
    /// See [`CartEvent::Merged`]
    Merged,
    /// See [`CartEvent::Removed`]
    Removed,
    /// See [`CartEvent::QuantityChanged`]
    QuantityChanged,
    /// See [`CartEvent::Cleared`]
    Cleared,
}

impl CartEventKind {
    /// Snake-case name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            CartEventKind::Added => "added",
            CartEventKind::Merged => "merged",
            CartEventKind::Removed => "removed",
            CartEventKind::QuantityChanged => "quantity_changed",
            CartEventKind::Cleared => "cleared",
        }
    }
}

impl fmt::Display for CartEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
