// Availability sweep
//
// Composes the calendar and slot endpoints into a per-venue, per-date view
// filtered to a time-of-day window. Venues fan out with bounded
// concurrency; results are collected in declaration order so identical
// upstream responses always produce an identical report. Any fault while
// processing one venue voids that venue entirely and is recorded as a
// warning — no error escapes the sweep.

use std::collections::BTreeMap;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use futures_util::{StreamExt, stream};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::client::ResyClient;
use crate::error::Error;
use crate::models::Slot;

/// Upstream layout of slot start timestamps.
const SLOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How far ahead of today the calendar lookup reaches.
pub const LOOKAHEAD_DAYS: i64 = 30;

/// Largest party the upstream search accepts.
pub const MAX_PARTY_SIZE: u8 = 8;

/// Venues queried at once during a sweep.
pub const DEFAULT_CONCURRENCY: usize = 4;

// ── Inputs ───────────────────────────────────────────────────────────

/// A venue tracked by the sweep: display name plus the platform's numeric
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub name: String,
    pub id: u64,
}

impl Venue {
    pub fn new(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Inclusive time-of-day window.
///
/// Construction rejects `start > end`: the upstream comparison is purely
/// on time-of-day, so an overnight window has no defined semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, Error> {
        if start > end {
            return Err(Error::Validation {
                field: "time window",
                reason: format!(
                    "start {start} is after end {end} (overnight windows are not supported)"
                ),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Inclusive membership on time-of-day only; the date part of a slot
    /// timestamp is ignored.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Inputs for one availability sweep.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    party_size: u8,
    window: TimeWindow,
    lookahead_days: i64,
}

impl AvailabilityQuery {
    pub fn new(party_size: u8, window: TimeWindow) -> Result<Self, Error> {
        if party_size == 0 || party_size > MAX_PARTY_SIZE {
            return Err(Error::Validation {
                field: "party size",
                reason: format!("must be between 1 and {MAX_PARTY_SIZE}, got {party_size}"),
            });
        }
        Ok(Self {
            party_size,
            window,
            lookahead_days: LOOKAHEAD_DAYS,
        })
    }

    pub fn party_size(&self) -> u8 {
        self.party_size
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }
}

// ── Outputs ──────────────────────────────────────────────────────────

/// One bookable offering after filtering: display time plus seating label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// 12-hour rendering of the slot start, e.g. "06:00 PM".
    pub time: String,
    /// Upstream seating label, e.g. "Dining Room".
    pub seating_type: String,
}

/// Dates with matching slots for a single venue, in date order.
///
/// The key set is exactly the venue's available dates; every date maps to
/// a non-empty slot list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VenueAvailability {
    pub slots: BTreeMap<NaiveDate, Vec<TimeSlot>>,
}

impl VenueAvailability {
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.slots.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A venue that failed mid-sweep. Partial results are discarded; the
/// reason is surfaced instead of swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueWarning {
    pub venue: String,
    pub reason: String,
}

/// Aggregated sweep outcome: qualifying venues in declaration order, plus
/// warnings for the venues that failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AvailabilityReport {
    pub venues: IndexMap<String, VenueAvailability>,
    pub warnings: Vec<VenueWarning>,
}

impl AvailabilityReport {
    /// True when no venue has a qualifying slot.
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

// ── Sweep ────────────────────────────────────────────────────────────

/// Drives the availability sweep across an immutable venue directory.
pub struct AvailabilityChecker {
    client: ResyClient,
    venues: Vec<Venue>,
    concurrency: usize,
}

impl AvailabilityChecker {
    pub fn new(client: ResyClient, venues: Vec<Venue>) -> Self {
        Self {
            client,
            venues,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Cap on venues queried concurrently (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    /// Run one sweep over the lookahead horizon starting today.
    pub async fn check(&self, query: &AvailabilityQuery) -> AvailabilityReport {
        self.check_from(Local::now().date_naive(), query).await
    }

    /// Sweep with an explicit start date for the lookahead horizon.
    pub async fn check_from(
        &self,
        start: NaiveDate,
        query: &AvailabilityQuery,
    ) -> AvailabilityReport {
        let end = start + Duration::days(query.lookahead_days);

        let outcomes = stream::iter(self.venues.iter().map(|venue| async move {
            let outcome = self.check_venue(venue, start, end, query).await;
            (venue, outcome)
        }))
        .buffered(self.concurrency)
        .collect::<Vec<_>>()
        .await;

        let mut report = AvailabilityReport::default();
        for (venue, outcome) in outcomes {
            match outcome {
                Ok(availability) if !availability.is_empty() => {
                    report.venues.insert(venue.name.clone(), availability);
                }
                Ok(_) => debug!(venue = %venue.name, "no matching availability"),
                Err(err) => {
                    warn!(venue = %venue.name, error = %err, "venue check failed");
                    report.warnings.push(VenueWarning {
                        venue: venue.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        report
    }

    /// One venue: calendar lookup, then a slot lookup per available day.
    /// Any fault bubbles up and voids the venue's partial results.
    async fn check_venue(
        &self,
        venue: &Venue,
        start: NaiveDate,
        end: NaiveDate,
        query: &AvailabilityQuery,
    ) -> Result<VenueAvailability, Error> {
        let calendar = self
            .client
            .venue_calendar(venue.id, query.party_size, start, end)
            .await?;

        let mut availability = VenueAvailability::default();
        for day in calendar.scheduled.iter().filter(|d| d.is_available()) {
            let date: NaiveDate = day.date.parse().map_err(|_| Error::InvalidTimestamp {
                value: day.date.clone(),
            })?;

            let found = self
                .client
                .find_slots(venue.id, date, query.party_size)
                .await?;
            let slots = filter_slots(found.first_venue_slots(), query.window())?;

            if !slots.is_empty() {
                availability.slots.insert(date, slots);
            }
        }
        Ok(availability)
    }
}

/// Keep slots whose start falls inside the window, reformatted for
/// display. Upstream slot order is preserved.
fn filter_slots(slots: &[Slot], window: &TimeWindow) -> Result<Vec<TimeSlot>, Error> {
    let mut kept = Vec::new();
    for slot in slots {
        let start = NaiveDateTime::parse_from_str(&slot.date.start, SLOT_TIMESTAMP_FORMAT)
            .map_err(|_| Error::InvalidTimestamp {
                value: slot.date.start.clone(),
            })?;

        if window.contains(start.time()) {
            kept.push(TimeSlot {
                time: start.format("%I:%M %p").to_string(),
                seating_type: slot.config.seating_type.clone(),
            });
        }
    }
    Ok(kept)
}
