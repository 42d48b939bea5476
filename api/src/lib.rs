pub mod client;
pub mod config;
pub mod crictez;
mod de;
pub mod error;
pub mod provider;
mod shapes;
pub mod sportmonks;
pub mod transport;

pub use client::CricketApi;
pub use config::{ApiConfig, ProviderKind};
pub use error::{ApiError, ApiResult};

use serde::{Deserialize, Serialize};

/// `message` of every response carrying adapted upstream data.
pub const SUCCESS_MESSAGE: &str = "Success";

// ---------------------------------------------------------------------------
// Response envelope handed to the UI layer
// ---------------------------------------------------------------------------

/// Uniform result of every facade call.
///
/// `status` is `true` on every path that resolves, including stubbed and
/// placeholder data, so it cannot be used to detect degradation. Use
/// `is_degraded` for that; `message` is for display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub message: String,
    pub data: T,
    #[serde(skip)]
    degraded: bool,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { status: true, message: SUCCESS_MESSAGE.into(), data, degraded: false }
    }

    /// Data was substituted locally (placeholders, empty stubs).
    pub fn degraded(message: impl Into<String>, data: T) -> Self {
        Self { status: true, message: message.into(), data, degraded: true }
    }

    /// `data` was adapted from an upstream answer.
    pub fn is_success(&self) -> bool {
        !self.degraded
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

// ---------------------------------------------------------------------------
// Domain types: canonical model, independent of any provider wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub status: String, // free text, "ongoing" when the provider has none
    pub season: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Toss {
    pub winner: String,
    pub decision: String, // "bat" | "bowl" | provider text
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Match {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub status: String,
    pub venue: String,
    pub date: String,
    /// Same value as `date`; both are kept for older views.
    pub date_start: String,
    pub home: Team,
    pub away: Team,
    pub result: String,
    pub toss: Option<Toss>,
    pub series_id: String,
    pub series_name: String,
}

impl Match {
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home.short_name, self.away.short_name)
    }
}

/// One side of a live score block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SideScore {
    pub team: String,
    pub runs: Option<u32>,
    pub wickets: Option<u32>,
    pub overs: Option<f64>,
}

impl SideScore {
    /// Batting side: every numeric field is filled, absent values read as 0.
    pub fn batting(team: &str, runs: Option<u32>, wickets: Option<u32>, overs: Option<f64>) -> Self {
        Self {
            team: team.to_owned(),
            runs: Some(runs.unwrap_or(0)),
            wickets: Some(wickets.unwrap_or(0)),
            overs: Some(overs.unwrap_or(0.0)),
        }
    }

    /// Bowling side: absent values stay unset. Views check for presence,
    /// so this must not be collapsed into the batting rule.
    pub fn bowling(team: &str, runs: Option<u32>, wickets: Option<u32>, overs: Option<f64>) -> Self {
        Self { team: team.to_owned(), runs, wickets, overs }
    }

    pub fn summary(&self) -> String {
        match (self.runs, self.wickets, self.overs) {
            (Some(r), Some(w), Some(o)) => format!("{r}/{w} ({o} ov)"),
            (Some(r), Some(w), None) => format!("{r}/{w}"),
            (Some(r), None, _) => r.to_string(),
            _ => "-".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Score {
    pub batting: SideScore,
    pub bowling: SideScore,
    pub current_status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LiveMatch {
    #[serde(flatten)]
    pub match_info: Match,
    pub score: Score,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct News {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image: String,
    pub published_at: String,
    pub source: String,
}

// ---------------------------------------------------------------------------
// Pass-through shapes: fields copied from the upstream record, no fallbacks
// beyond empty values. Upstream key spellings are resolved in `shapes`.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: String,
    pub image: String,
    pub team: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerRanking {
    pub rank: u32,
    pub name: String,
    pub country: String,
    pub rating: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamRanking {
    pub rank: u32,
    pub team: String,
    pub matches: u32,
    pub points: u32,
    pub rating: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointsTableEntry {
    pub team: String,
    pub logo: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub no_result: u32,
    pub points: u32,
    pub net_run_rate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scorecard {
    #[serde(deserialize_with = "de::text_or_default")]
    pub match_id: String,
    #[serde(deserialize_with = "de::text_or_default")]
    pub result: String,
    /// Innings are forwarded untouched.
    #[serde(deserialize_with = "de::list")]
    pub scorecard: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degradation_is_tracked_apart_from_the_message() {
        let ok = ApiResponse::success(1);
        assert!(ok.is_success());
        assert!(!ok.is_degraded());

        let stub = ApiResponse::degraded(SUCCESS_MESSAGE, 0);
        assert_eq!(stub.message, "Success");
        assert!(stub.status);
        assert!(stub.is_degraded());
        assert!(!stub.is_success());
    }

    #[test]
    fn envelope_serializes_three_fields() {
        let json = serde_json::to_value(ApiResponse::degraded("stub", Vec::<u32>::new())).unwrap();
        assert_eq!(json, serde_json::json!({"status": true, "message": "stub", "data": []}));
    }
}
