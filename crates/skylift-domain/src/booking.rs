//! Booking lifecycle states and transition rules.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an airport pickup booking.
///
/// Wire/storage format: snake_case string (e.g. `driver_en_route_to_pickup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingPayment,
    Accepted,
    DriverEnRouteToPickup,
    DriverArrivedAtPickup,
    InProgress,
    Completed,
    CancelledByCustomer,
    CancelledByDriver,
    CancelledByAdmin,
}

impl BookingStatus {
    /// Storage string for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Accepted => "accepted",
            BookingStatus::DriverEnRouteToPickup => "driver_en_route_to_pickup",
            BookingStatus::DriverArrivedAtPickup => "driver_arrived_at_pickup",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::CancelledByCustomer => "cancelled_by_customer",
            BookingStatus::CancelledByDriver => "cancelled_by_driver",
            BookingStatus::CancelledByAdmin => "cancelled_by_admin",
        }
    }

    /// Parse a storage string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending_payment" => Some(BookingStatus::PendingPayment),
            "accepted" => Some(BookingStatus::Accepted),
            "driver_en_route_to_pickup" => Some(BookingStatus::DriverEnRouteToPickup),
            "driver_arrived_at_pickup" => Some(BookingStatus::DriverArrivedAtPickup),
            "in_progress" => Some(BookingStatus::InProgress),
            "completed" => Some(BookingStatus::Completed),
            "cancelled_by_customer" => Some(BookingStatus::CancelledByCustomer),
            "cancelled_by_driver" => Some(BookingStatus::CancelledByDriver),
            "cancelled_by_admin" => Some(BookingStatus::CancelledByAdmin),
            _ => None,
        }
    }

    /// State a new booking is created in.
    pub fn initial() -> Self {
        BookingStatus::PendingPayment
    }

    /// The single legal forward step, if any.
    pub fn forward_successor(self) -> Option<Self> {
        match self {
            BookingStatus::PendingPayment => Some(BookingStatus::Accepted),
            BookingStatus::Accepted => Some(BookingStatus::DriverEnRouteToPickup),
            BookingStatus::DriverEnRouteToPickup => Some(BookingStatus::DriverArrivedAtPickup),
            BookingStatus::DriverArrivedAtPickup => Some(BookingStatus::InProgress),
            BookingStatus::InProgress => Some(BookingStatus::Completed),
            _ => None,
        }
    }

    /// `completed` and the three cancelled states accept no further moves.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BookingStatus::Completed
                | BookingStatus::CancelledByCustomer
                | BookingStatus::CancelledByDriver
                | BookingStatus::CancelledByAdmin
        )
    }

    pub fn is_cancellation(self) -> bool {
        matches!(
            self,
            BookingStatus::CancelledByCustomer
                | BookingStatus::CancelledByDriver
                | BookingStatus::CancelledByAdmin
        )
    }

    /// States before the ride itself starts. Customer and driver
    /// cancellations are only legal from here; once the ride is in progress
    /// an admin is the only party that may cancel.
    fn before_ride_start(self) -> bool {
        matches!(
            self,
            BookingStatus::PendingPayment
                | BookingStatus::Accepted
                | BookingStatus::DriverEnRouteToPickup
                | BookingStatus::DriverArrivedAtPickup
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected booking status move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot move a booking from {from} to {to}")]
pub struct InvalidTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// Check one status move against the lifecycle.
///
/// Legal moves are the single forward step to the immediate successor, a
/// customer or driver cancellation from any state before the ride starts,
/// and an admin cancellation from any non-terminal state.
pub fn validate_transition(
    from: BookingStatus,
    to: BookingStatus,
) -> Result<(), InvalidTransition> {
    if from.forward_successor() == Some(to) {
        return Ok(());
    }
    let legal_cancel = match to {
        BookingStatus::CancelledByAdmin => !from.is_terminal(),
        BookingStatus::CancelledByCustomer | BookingStatus::CancelledByDriver => {
            from.before_ride_start()
        }
        _ => false,
    };
    if legal_cancel {
        Ok(())
    } else {
        Err(InvalidTransition { from, to })
    }
}
