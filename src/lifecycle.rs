use log::warn;

use crate::error::BookingError;
use crate::models::AppointmentStatus;

/// Legal next statuses for an appointment. Completed and cancelled are
/// terminal; a doctor-flagged cancellation can only be confirmed, never
/// revived.
pub fn allowed_transitions(from: AppointmentStatus) -> &'static [AppointmentStatus] {
    use AppointmentStatus::*;
    match from {
        Scheduled => &[Completed, Cancelled, CancelRequested],
        CancelRequested => &[Cancelled],
        Completed | Cancelled => &[],
    }
}

pub fn validate_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), BookingError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        warn!("rejected appointment status transition {from} -> {to}");
        Err(BookingError::InvalidTransition { from, to })
    }
}
