//! CricTez live-line API, the provider the dashboard started on.
//! `{base}/{endpoint}/{token}`, POST bodies for lookups, and a
//! `{ status, message, data }` envelope whose `status` must be truthy.

use crate::de;
use crate::error::{ApiError, ApiResult};
use crate::provider::{
    self, Credential, DEFAULT_NEWS_SOURCE, DEFAULT_SERIES_STATUS, Provider, Query, Request, Side,
    TeamFields,
};
use crate::{LiveMatch, Match, News, Score, Series, SideScore, Toss};
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Older endpoints spell several keys two ways; both are read and the
/// first spelling wins when both are sent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSeries {
    #[serde(deserialize_with = "de::text")]
    pub series_id: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub series: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub series_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub short_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub series_short: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub series_status: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub season: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub start_date: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub series_start_date: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub series_end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMatch {
    #[serde(default, deserialize_with = "de::text")]
    pub match_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub series_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub series: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub series_name: Option<String>,
    /// Fixture label, e.g. "3rd T20".
    #[serde(default, deserialize_with = "de::text")]
    pub matchs: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub match_date: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub date_wise: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub venue: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub match_status: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub result: Option<String>,
    /// Free text: "India won the toss and elected to bat".
    #[serde(default, deserialize_with = "de::text")]
    pub toss: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_a_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_a: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_a_short: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_a_img: Option<String>,
    /// "178-5" or "178/5"
    #[serde(default, deserialize_with = "de::text")]
    pub team_a_scores: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub team_a_over: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_b_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_b: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_b_short: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_b_img: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub team_b_scores: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub team_b_over: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNews {
    #[serde(default, deserialize_with = "de::text")]
    pub news_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub pub_date: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub source: Option<String>,
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct CricTez;

impl Provider for CricTez {
    fn name(&self) -> &'static str {
        "crictez"
    }

    fn credential(&self) -> Credential {
        Credential::PathSegment
    }

    fn route(&self, query: &Query) -> Option<Request> {
        let by_match =
            |endpoint: &'static str, id: &str| Request::post(endpoint).param("match_id", id);
        let by_series =
            |endpoint: &'static str, id: &str| Request::post(endpoint).param("series_id", id);

        let request = match query {
            Query::HomeList => Request::get("homeList"),
            Query::SeriesList => Request::get("seriesList"),
            Query::UpcomingMatches => Request::get("upcomingMatches"),
            Query::UpcomingMatchesBySeries { series_id } => by_series("matchesBySeriesId", series_id),
            Query::RecentMatches => Request::get("recentMatches"),
            Query::RecentMatchesBySeries { series_id } => {
                by_series("matchesRecentBySeriesId", series_id)
            }
            Query::LiveMatches => Request::get("liveMatchList"),
            Query::LiveMatch { match_id } => by_match("liveMatch", match_id),
            Query::MatchInfo { match_id } => by_match("matchInfo", match_id),
            Query::Scorecard { match_id } => by_match("scorecardByMatchId", match_id),
            Query::Squad { match_id } => by_match("squadByMatchId", match_id),
            Query::PlayersByMatch { match_id } => by_match("playersByMatchId", match_id),
            Query::MatchFancy { match_id } => by_match("matchFancy", match_id),
            Query::OddHistory { match_id } => by_match("matchOddHistory", match_id),
            Query::MatchStats { match_id } => by_match("matchStats", match_id),
            Query::Commentary { match_id } => by_match("commentary", match_id),
            Query::ManOfMatch { match_id } => by_match("manOfMatch", match_id),
            Query::PointsTable { series_id } => by_series("pointsTable", series_id),
            Query::NewPointsTable { series_id } => by_series("pointsNewTable", series_id),
            Query::PlayerRanking { kind } => Request::post("playerRanking").param("type", kind),
            Query::TeamRanking { kind } => Request::post("teamRanking").param("type", kind),
            Query::NewsList => Request::get("news"),
            Query::NewsDetail { news_id } => Request::post("newsDetail").param("news_id", news_id),
        };
        Some(request)
    }

    fn check(&self, raw: &Value) -> ApiResult<()> {
        if raw.get("status").is_some_and(de::truthy) {
            return Ok(());
        }
        let message = ["message", "msg"]
            .iter()
            .find_map(|key| raw.get(*key).and_then(Value::as_str))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("API request failed");
        Err(ApiError::Upstream { message: message.to_owned() })
    }

    fn series_record(&self, item: &Value) -> Series {
        map_series(provider::parse(item))
    }

    fn match_record(&self, item: &Value) -> Match {
        map_match(&provider::parse(item))
    }

    fn live_match_record(&self, item: &Value) -> LiveMatch {
        map_live_match(&provider::parse(item))
    }

    fn news_record(&self, index: usize, item: &Value) -> News {
        map_news(index, provider::parse(item))
    }
}

fn map_series(raw: RawSeries) -> Series {
    Series {
        id: raw.series_id.or(raw.id).unwrap_or_default(),
        name: raw.series.or(raw.series_name).unwrap_or_default(),
        short_name: raw.short_name.or(raw.series_short).unwrap_or_default(),
        status: raw
            .series_status
            .or(raw.status)
            .unwrap_or_else(|| DEFAULT_SERIES_STATUS.into()),
        season: raw.season.unwrap_or_default(),
        start_date: raw.start_date.or(raw.series_start_date).unwrap_or_default(),
        end_date: raw.end_date.or(raw.series_end_date).unwrap_or_default(),
    }
}

fn map_match(raw: &RawMatch) -> Match {
    let home = provider::team(
        Side::Home,
        TeamFields {
            id: raw.team_a_id.as_deref(),
            name: raw.team_a.as_deref(),
            code: raw.team_a_short.as_deref(),
            logo: raw.team_a_img.as_deref(),
        },
    );
    let away = provider::team(
        Side::Away,
        TeamFields {
            id: raw.team_b_id.as_deref(),
            name: raw.team_b.as_deref(),
            code: raw.team_b_short.as_deref(),
            logo: raw.team_b_img.as_deref(),
        },
    );

    let date = raw.match_date.as_ref().or(raw.date_wise.as_ref()).cloned().unwrap_or_default();
    let series_name = raw.series.as_ref().or(raw.series_name.as_ref()).cloned();

    Match {
        id: raw.match_id.as_ref().or(raw.id.as_ref()).cloned().unwrap_or_default(),
        name: match &raw.matchs {
            Some(label) => format!("{} vs {}, {label}", home.name, away.name),
            None => format!("{} vs {}", home.name, away.name),
        },
        short_name: format!("{} vs {}", home.short_name, away.short_name),
        status: raw.match_status.clone().unwrap_or_default(),
        venue: raw.venue.clone().unwrap_or_default(),
        date_start: date.clone(),
        date,
        result: raw.result.clone().unwrap_or_default(),
        toss: raw.toss.as_deref().map(parse_toss),
        series_id: raw.series_id.clone().unwrap_or_default(),
        series_name: series_name.unwrap_or_default(),
        home,
        away,
    }
}

/// "India won the toss and elected to bat" -> ("India", "bat").
/// Text that does not follow the pattern is kept whole as the winner.
fn parse_toss(text: &str) -> Toss {
    let Some((winner, rest)) = text.split_once(" won the toss") else {
        return Toss { winner: text.trim().to_owned(), decision: String::new() };
    };
    let decision = ["elected to ", "opted to ", "chose to "]
        .iter()
        .find_map(|marker| rest.split_once(marker).map(|(_, d)| d))
        .map(|d| d.trim().trim_end_matches('.').to_owned())
        .unwrap_or_default();
    Toss { winner: winner.trim().to_owned(), decision }
}

/// "178-5" / "178/5" / "178" -> (runs, wickets)
fn parse_score(text: Option<&str>) -> (Option<u32>, Option<u32>) {
    let Some(text) = text else {
        return (None, None);
    };
    let mut parts = text.splitn(2, ['-', '/']);
    let runs = parts.next().and_then(|r| r.trim().parse().ok());
    let wickets = parts.next().and_then(|w| w.trim().parse().ok());
    (runs, wickets)
}

fn map_live_match(raw: &RawMatch) -> LiveMatch {
    let match_info = map_match(raw);

    let (a_runs, a_wickets) = parse_score(raw.team_a_scores.as_deref());
    let (b_runs, b_wickets) = parse_score(raw.team_b_scores.as_deref());

    let batting = SideScore::batting(&match_info.home.name, a_runs, a_wickets, raw.team_a_over);
    let bowling = SideScore::bowling(&match_info.away.name, b_runs, b_wickets, raw.team_b_over);

    let current_status = raw
        .result
        .clone()
        .or_else(|| raw.match_status.clone())
        .unwrap_or_default();

    LiveMatch {
        match_info,
        score: Score { batting, bowling, current_status },
    }
}

fn map_news(index: usize, raw: RawNews) -> News {
    let description = raw.description.unwrap_or_default();
    News {
        id: raw.news_id.or(raw.id).unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        content: raw.content.unwrap_or_else(|| description.clone()),
        description,
        image: raw.image.unwrap_or_else(|| provider::placeholder_image(index)),
        published_at: raw.pub_date.or(raw.date).unwrap_or_default(),
        source: raw.source.unwrap_or_else(|| DEFAULT_NEWS_SOURCE.into()),
    }
}
