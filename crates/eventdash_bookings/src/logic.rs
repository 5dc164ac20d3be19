// --- File: crates/eventdash_bookings/src/logic.rs ---
use eventdash_common::Booking;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Display totals over a booking list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Totals {
    #[cfg_attr(feature = "openapi", schema(example = 3))]
    pub total_tickets: u64,
    /// Unrounded; see [`format_amount`] for display.
    #[cfg_attr(feature = "openapi", schema(example = 2000.0))]
    pub total_cost: f64,
}

/// Sums seats and cost over `bookings`.
///
/// A missing quantity counts as one seat and a missing event or price as a
/// price of zero.
pub fn compute_totals<'a, I>(bookings: I) -> Totals
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings
        .into_iter()
        .fold(Totals::default(), |totals, booking| Totals {
            total_tickets: totals.total_tickets + u64::from(booking.quantity_or_default()),
            total_cost: totals.total_cost + line_cost(booking),
        })
}

/// Cost of a single booking: seat price times seats.
pub fn line_cost(booking: &Booking) -> f64 {
    booking.price_or_default() * f64::from(booking.quantity_or_default())
}

/// Rounds to whole units (half away from zero) and appends `suffix`.
pub fn format_amount(value: f64, suffix: &str) -> String {
    let rounded = value.round();
    // avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if suffix.is_empty() {
        format!("{:.0}", rounded)
    } else {
        format!("{:.0} {}", rounded, suffix)
    }
}

/// Avatar initial for a display name: first character upper-cased, `?` when
/// there is no usable name.
pub fn user_initial(name: Option<&str>) -> String {
    name.and_then(|name| name.chars().next())
        .map(|first| first.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
