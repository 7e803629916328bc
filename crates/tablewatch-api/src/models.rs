// Response models for the reservation service.
//
// Every nullable level carries `#[serde(default)]` so the
// `results.venues[0].slots` traversal is explicit optional access with an
// empty-list fallback, never a missing-key failure.

use serde::Deserialize;

/// Per-day inventory sentinel meaning at least one reservation exists for
/// the requested party size. Any other value, including absence, counts as
/// unavailable.
pub const INVENTORY_AVAILABLE: &str = "available";

// ── Calendar endpoint ────────────────────────────────────────────────

/// `GET /venue/calendar` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarResponse {
    #[serde(default)]
    pub scheduled: Vec<ScheduledDay>,
}

/// One day in the venue's calendar with its coarse inventory flag.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduledDay {
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub inventory: Inventory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub reservation: Option<String>,
}

impl ScheduledDay {
    /// Whether the day's reservation inventory equals the `"available"`
    /// sentinel exactly.
    pub fn is_available(&self) -> bool {
        self.inventory.reservation.as_deref() == Some(INVENTORY_AVAILABLE)
    }
}

// ── Find endpoint ────────────────────────────────────────────────────

/// `GET /find` payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindResponse {
    #[serde(default)]
    pub results: FindResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindResults {
    #[serde(default)]
    pub venues: Vec<VenueResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueResult {
    #[serde(default)]
    pub slots: Vec<Slot>,
}

/// A single bookable offering.
#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    pub date: SlotDate,
    pub config: SlotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotDate {
    /// `YYYY-MM-DD HH:MM:SS`, local to the venue.
    pub start: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotConfig {
    /// Seating area label, e.g. "Dining Room" or "Patio".
    #[serde(rename = "type")]
    pub seating_type: String,
}

impl FindResponse {
    /// Slot list of the first venue in the response; empty when the
    /// response carries no venues at all.
    pub fn first_venue_slots(&self) -> &[Slot] {
        self.results
            .venues
            .first()
            .map_or(&[][..], |v| v.slots.as_slice())
    }
}
