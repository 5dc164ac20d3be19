// --- File: crates/eventdash_common/src/models.rs ---

// Data structures shared between the booking service client, the workflow
// and the HTTP surface.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One reservation as returned by `GET /api/bookings`.
///
/// The booking service is not strict about its payloads, so everything except
/// the id is optional. Use [`Booking::quantity_or_default`] and
/// [`Booking::price_or_default`] instead of reading the raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Booking {
    /// Opaque identifier; numeric ids on the wire are kept as their decimal text.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Number of seats. Missing or unreadable means one.
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<u32>,

    /// Event data captured at booking time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventSnapshot>,
}

/// Event data embedded in a booking.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EventSnapshot {
    /// Event identifier, used to link to the event page
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Price of a single seat
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "deserialize_lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl Booking {
    /// Creates a booking with only an id; mostly useful in tests and fixtures.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            quantity: None,
            event: None,
        }
    }

    /// Sets the number of seats.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Attaches an event snapshot.
    pub fn with_event(mut self, event: EventSnapshot) -> Self {
        self.event = Some(event);
        self
    }

    /// Seats booked, `1` when the service did not send a quantity.
    pub fn quantity_or_default(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Seat price, `0` when there is no event or no price.
    pub fn price_or_default(&self) -> f64 {
        self.event
            .as_ref()
            .and_then(|event| event.price)
            .unwrap_or(0.0)
    }
}

impl EventSnapshot {
    /// Creates a snapshot carrying only a price.
    pub fn priced(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Default::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(text) => text,
            WireId::Signed(n) => n.to_string(),
            WireId::Unsigned(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    WireId::deserialize(deserializer).map(String::from)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<WireId>::deserialize(deserializer).map(|id| id.map(String::from))
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare
/// date. Anything else becomes `None` rather than failing the whole booking.
fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|value| value.as_str()).and_then(parse_date))
}

/// Accepts an integer, an integral float or a numeric string. Anything else
/// (fractions, negatives, garbage) becomes `None` so the default applies.
fn deserialize_lenient_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_number).and_then(|n| {
        let in_range = n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX);
        in_range.then_some(n as u32)
    }))
}

/// Accepts a number or a numeric string; anything else becomes `None`.
fn deserialize_lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(lenient_number))
}

fn lenient_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
