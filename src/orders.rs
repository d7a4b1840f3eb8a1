//! Orders
//!
//! Order status and the single function deciding who may move an order
//! between statuses.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    /// Created, payment not yet confirmed or collected on delivery
    Processing,

    /// Payment confirmed by the processor
    Paid,

    /// Handed to the carrier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled by the store
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Processing,
        Self::Paid,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised order status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownOrderStatus(value.to_owned()))
    }
}

/// Who is asking for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    /// The shopper who placed the order
    Customer,

    /// A back-office user
    Admin,

    /// The payment processor's verified webhook
    PaymentWebhook,
}

/// Result of an authorized transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Status changes from `from` to `to`.
    Apply {
        /// Current status
        from: OrderStatus,
        /// New status
        to: OrderStatus,
    },

    /// The order is already in the requested status; nothing to do.
    Unchanged,
}

/// Rejected transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The actor may never perform this transition.
    #[error("{actor:?} may not move an order from {from} to {to}")]
    Forbidden {
        /// Current status
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
        /// Requesting actor
        actor: Actor,
    },

    /// The transition is not part of the lifecycle.
    #[error("cannot move an order from {from} to {to}")]
    Invalid {
        /// Current status
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
    },
}

/// Decide whether `actor` may move an order from `from` to `to`.
///
/// - Only the payment webhook marks an order paid, and only from
///   `Processing`; a repeated delivery for a paid order is a no-op.
/// - Admins ship paid or processing orders (pay-on-delivery orders ship
///   unpaid), deliver shipped orders and cancel orders not yet shipped.
/// - Customers cannot change order status.
///
/// # Errors
///
/// - [`TransitionError::Forbidden`]: the transition exists but not for this actor.
/// - [`TransitionError::Invalid`]: the transition is not part of the lifecycle.
pub fn authorize_transition(
    from: OrderStatus,
    to: OrderStatus,
    actor: Actor,
) -> Result<Transition, TransitionError> {
    use OrderStatus::{Cancelled, Delivered, Paid, Processing, Shipped};

    let allowed_for = match (from, to) {
        (Paid, Paid) if actor == Actor::PaymentWebhook => return Ok(Transition::Unchanged),
        (Processing, Paid) => Actor::PaymentWebhook,
        (Processing | Paid, Shipped) | (Shipped, Delivered) | (Processing | Paid, Cancelled) => {
            Actor::Admin
        }
        _ => return Err(TransitionError::Invalid { from, to }),
    };

    if actor != allowed_for {
        return Err(TransitionError::Forbidden { from, to, actor });
    }

    Ok(Transition::Apply { from, to })
}
