// Raw HTTP client for the reservation service.
//
// Wraps `reqwest::Client` with base-URL joining, query construction, and
// status/deserialization handling. Composition of the two endpoints into
// an availability report lives in `availability`.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{CalendarResponse, FindResponse};
use crate::transport::TransportConfig;

/// Production base path of the reservation API, versioned.
pub const DEFAULT_BASE_URL: &str = "https://api.resy.com/4";

/// Async client for the reservation service's read-only endpoints.
pub struct ResyClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ResyClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport settings. The static header
    /// set is injected on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(api_key)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        // A trailing slash keeps Url::join from eating the version segment.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self { http, base_url })
    }

    /// The configured service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .expect("path should be a valid relative URL")
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let message = format!("{e} (body preview: {:?})", &body[..body.len().min(200)]);
                Error::Deserialization { message, body }
            })
        } else {
            let raw = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
            })
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Per-day availability flags for a venue over a date range.
    ///
    /// `GET /venue/calendar?venue_id&num_seats&start_date&end_date`
    pub async fn venue_calendar(
        &self,
        venue_id: u64,
        num_seats: u8,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<CalendarResponse, Error> {
        self.get_with_params(
            "venue/calendar",
            &[
                ("venue_id", venue_id.to_string()),
                ("num_seats", num_seats.to_string()),
                ("start_date", start_date.to_string()),
                ("end_date", end_date.to_string()),
            ],
        )
        .await
    }

    /// Concrete slot offerings for a single date.
    ///
    /// `GET /find?lat=0&long=0&day&party_size&venue_id` — the lat/long
    /// pair is fixed at zero; the service scopes the search by venue id.
    pub async fn find_slots(
        &self,
        venue_id: u64,
        date: NaiveDate,
        party_size: u8,
    ) -> Result<FindResponse, Error> {
        self.get_with_params(
            "find",
            &[
                ("lat", "0".to_owned()),
                ("long", "0".to_owned()),
                ("day", date.to_string()),
                ("party_size", party_size.to_string()),
                ("venue_id", venue_id.to_string()),
            ],
        )
        .await
    }
}
