//! Provider strategy: where each query goes upstream, and how that upstream's
//! records map onto the canonical model.

use crate::config::ProviderKind;
use crate::crictez::CricTez;
use crate::error::ApiResult;
use crate::sportmonks::SportMonks;
use crate::{LiveMatch, Match, News, Series, Team};
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const PLACEHOLDER_NEWS_COUNT: usize = 6;
const PLACEHOLDER_NEWS_BLURB: &str =
    "Stay tuned for the latest updates from the world of cricket.";
pub(crate) const DEFAULT_NEWS_SOURCE: &str = "Cricket News";
pub(crate) const DEFAULT_SERIES_STATUS: &str = "ongoing";
const SHORT_NAME_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Queries and upstream requests
// ---------------------------------------------------------------------------

/// Every logical query the facade exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    HomeList,
    SeriesList,
    UpcomingMatches,
    UpcomingMatchesBySeries { series_id: String },
    RecentMatches,
    RecentMatchesBySeries { series_id: String },
    LiveMatches,
    LiveMatch { match_id: String },
    MatchInfo { match_id: String },
    Scorecard { match_id: String },
    Squad { match_id: String },
    PlayersByMatch { match_id: String },
    MatchFancy { match_id: String },
    OddHistory { match_id: String },
    MatchStats { match_id: String },
    Commentary { match_id: String },
    ManOfMatch { match_id: String },
    PointsTable { series_id: String },
    NewPointsTable { series_id: String },
    PlayerRanking { kind: String },
    TeamRanking { kind: String },
    NewsList,
    NewsDetail { news_id: String },
}

impl Query {
    pub fn label(&self) -> &'static str {
        match self {
            Query::HomeList => "home list",
            Query::SeriesList => "series list",
            Query::UpcomingMatches => "upcoming matches",
            Query::UpcomingMatchesBySeries { .. } => "upcoming matches by series",
            Query::RecentMatches => "recent matches",
            Query::RecentMatchesBySeries { .. } => "recent matches by series",
            Query::LiveMatches => "live matches",
            Query::LiveMatch { .. } => "live match",
            Query::MatchInfo { .. } => "match info",
            Query::Scorecard { .. } => "scorecard",
            Query::Squad { .. } => "squad",
            Query::PlayersByMatch { .. } => "players by match",
            Query::MatchFancy { .. } => "match fancy",
            Query::OddHistory { .. } => "odd history",
            Query::MatchStats { .. } => "match stats",
            Query::Commentary { .. } => "commentary",
            Query::ManOfMatch { .. } => "man of the match",
            Query::PointsTable { .. } => "points table",
            Query::NewPointsTable { .. } => "new points table",
            Query::PlayerRanking { .. } => "player ranking",
            Query::TeamRanking { .. } => "team ranking",
            Query::NewsList => "news list",
            Query::NewsDetail { .. } => "news detail",
        }
    }

    /// Record id the query is keyed on, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Query::UpcomingMatchesBySeries { series_id }
            | Query::RecentMatchesBySeries { series_id }
            | Query::PointsTable { series_id }
            | Query::NewPointsTable { series_id } => Some(series_id),
            Query::LiveMatch { match_id }
            | Query::MatchInfo { match_id }
            | Query::Scorecard { match_id }
            | Query::Squad { match_id }
            | Query::PlayersByMatch { match_id }
            | Query::MatchFancy { match_id }
            | Query::OddHistory { match_id }
            | Query::MatchStats { match_id }
            | Query::Commentary { match_id }
            | Query::ManOfMatch { match_id } => Some(match_id),
            Query::PlayerRanking { kind } | Query::TeamRanking { kind } => Some(kind),
            Query::NewsDetail { news_id } => Some(news_id),
            Query::HomeList
            | Query::SeriesList
            | Query::UpcomingMatches
            | Query::RecentMatches
            | Query::LiveMatches
            | Query::NewsList => None,
        }
    }

    /// Keyed on an id that is blank, so there is nothing to look up.
    pub fn missing_key(&self) -> bool {
        self.key().is_some_and(|key| key.trim().is_empty())
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    /// Params travel as a JSON object body.
    Post,
}

/// One upstream call. Params are unordered; a sorted map keeps URLs stable.
///
/// `endpoint` is a fixed path. Ids and other caller values go in `segments`,
/// which the transport percent-encodes one by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub endpoint: &'static str,
    pub segments: Vec<String>,
    pub params: BTreeMap<String, String>,
}

impl Request {
    pub fn get(endpoint: &'static str) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: &'static str) -> Self {
        Self::new(Method::Post, endpoint)
    }

    fn new(method: Method, endpoint: &'static str) -> Self {
        Self { method, endpoint, segments: Vec::new(), params: BTreeMap::new() }
    }

    /// Appends one path segment after the endpoint.
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Where the static API credential goes on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// `?{name}={token}`
    Query { name: &'static str },
    /// `{base}/{endpoint}/{token}`
    PathSegment,
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

pub trait Provider: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn credential(&self) -> Credential;

    /// Upstream request serving `query`, or `None` when this provider has no
    /// equivalent and the query is answered with a stub.
    fn route(&self, query: &Query) -> Option<Request>;

    /// Provider-level envelope check, run before any adapter sees the body.
    fn check(&self, _raw: &Value) -> ApiResult<()> {
        Ok(())
    }

    fn series_record(&self, item: &Value) -> Series;

    fn match_record(&self, item: &Value) -> Match;

    fn live_match_record(&self, item: &Value) -> LiveMatch;

    /// `index` is the record's position in its list; it picks the fallback image.
    fn news_record(&self, index: usize, item: &Value) -> News;

    fn series(&self, raw: &Value) -> Vec<Series> {
        items(raw).map(|item| self.series_record(item)).collect()
    }

    fn matches(&self, raw: &Value) -> Vec<Match> {
        items(raw).map(|item| self.match_record(item)).collect()
    }

    fn live_matches(&self, raw: &Value) -> Vec<LiveMatch> {
        items(raw).map(|item| self.live_match_record(item)).collect()
    }

    /// Never empty: no usable records yields the placeholder set.
    fn news(&self, raw: &Value) -> Vec<News> {
        let news: Vec<News> = items(raw)
            .enumerate()
            .map(|(index, item)| self.news_record(index, item))
            .collect();
        if news.is_empty() { placeholder_news() } else { news }
    }
}

pub fn for_kind(kind: ProviderKind) -> Arc<dyn Provider> {
    match kind {
        ProviderKind::SportMonks => Arc::new(SportMonks),
        ProviderKind::CricTez => Arc::new(CricTez),
    }
}

// ---------------------------------------------------------------------------
// Envelope helpers shared by every provider
// ---------------------------------------------------------------------------

/// Object records under `data`. Any other envelope shape has none.
pub fn items(raw: &Value) -> impl Iterator<Item = &Value> {
    let list = match raw.get("data") {
        Some(Value::Array(list)) => list.as_slice(),
        _ => &[],
    };
    list.iter().filter(|item| item.is_object())
}

/// Single record under `data`: the object itself, or the first object of a list.
pub fn item(raw: &Value) -> Option<&Value> {
    match raw.get("data")? {
        Value::Array(list) => list.iter().find(|item| item.is_object()),
        record @ Value::Object(_) => Some(record),
        _ => None,
    }
}

/// Records read through their wire shape `R`, for shapes that get no
/// provider-specific mapping.
pub fn passthrough<R, T>(raw: &Value) -> Vec<T>
where
    R: DeserializeOwned,
    T: From<R>,
{
    items(raw).filter_map(|item| R::deserialize(item).ok()).map(T::from).collect()
}

/// Raw record with every field optional. Never fails for an object.
pub(crate) fn parse<T: DeserializeOwned + Default>(item: &Value) -> T {
    T::deserialize(item).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Field fallbacks shared by every provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Home,
    Away,
}

impl Side {
    fn default_name(self) -> &'static str {
        match self {
            Side::Home => "Home Team",
            Side::Away => "Away Team",
        }
    }

    fn default_short_name(self) -> &'static str {
        match self {
            Side::Home => "HOME",
            Side::Away => "AWAY",
        }
    }
}

/// Raw team fields as any provider exposes them.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TeamFields<'a> {
    pub id: Option<&'a str>,
    pub name: Option<&'a str>,
    pub code: Option<&'a str>,
    pub logo: Option<&'a str>,
}

pub(crate) fn team(side: Side, fields: TeamFields<'_>) -> Team {
    Team {
        id: fields.id.unwrap_or_default().to_owned(),
        name: fields.name.unwrap_or(side.default_name()).to_owned(),
        short_name: short_code(fields.code, fields.name, side.default_short_name()),
        logo: fields.logo.unwrap_or_default().to_owned(),
    }
}

/// Code, else the first ten characters of the name, else `fallback`.
pub(crate) fn short_code(code: Option<&str>, name: Option<&str>, fallback: &str) -> String {
    code.map(str::to_owned)
        .or_else(|| name.map(|n| n.chars().take(SHORT_NAME_LEN).collect()))
        .unwrap_or_else(|| fallback.to_owned())
}

pub(crate) fn toss_winner(team_id: &str, home: &Team, away: &Team) -> String {
    if !home.id.is_empty() && home.id == team_id {
        home.name.clone()
    } else if !away.id.is_empty() && away.id == team_id {
        away.name.clone()
    } else {
        String::new()
    }
}

pub fn placeholder_image(index: usize) -> String {
    format!("https://placehold.co/600x400?text=Cricket+News+{}", index + 1)
}

/// The fixed set shown instead of an empty news section.
pub fn placeholder_news() -> Vec<News> {
    let published_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    (0..PLACEHOLDER_NEWS_COUNT)
        .map(|n| News {
            id: format!("placeholder-{}", n + 1),
            title: format!("Latest Cricket News Update {}", n + 1),
            description: PLACEHOLDER_NEWS_BLURB.into(),
            content: PLACEHOLDER_NEWS_BLURB.into(),
            image: placeholder_image(n),
            published_at: published_at.clone(),
            source: DEFAULT_NEWS_SOURCE.into(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn items_only_reads_lists_under_data() {
        assert_eq!(items(&json!({"data": [{"id": 1}, {"id": 2}]})).count(), 2);
        assert_eq!(items(&json!({"data": {"id": 1}})).count(), 0);
        assert_eq!(items(&json!({"data": null})).count(), 0);
        assert_eq!(items(&json!({"results": [{"id": 1}]})).count(), 0);
        assert_eq!(items(&json!(null)).count(), 0);
        assert_eq!(items(&json!([{"id": 1}])).count(), 0);
        assert_eq!(items(&json!({"data": [1, "two", null, {"id": 3}]})).count(), 1);
    }

    #[test]
    fn item_accepts_object_or_list() {
        assert_eq!(item(&json!({"data": {"id": 7}})), Some(&json!({"id": 7})));
        assert_eq!(item(&json!({"data": [3, {"id": 8}]})), Some(&json!({"id": 8})));
        assert_eq!(item(&json!({"data": []})), None);
        assert_eq!(item(&json!({"data": "x"})), None);
        assert_eq!(item(&json!({})), None);
    }

    #[test]
    fn short_code_prefers_code_then_truncated_name() {
        assert_eq!(short_code(Some("IND"), Some("India"), "HOME"), "IND");
        assert_eq!(short_code(None, Some("India"), "HOME"), "India");
        assert_eq!(short_code(None, Some("Royal Challengers Bengaluru"), "HOME"), "Royal Chal");
        assert_eq!(short_code(None, None, "AWAY"), "AWAY");
    }

    #[test]
    fn short_code_truncates_on_characters_not_bytes() {
        assert_eq!(short_code(None, Some("Ñàmíbïå Çricket"), "HOME"), "Ñàmíbïå Çr");
    }

    #[test]
    fn team_falls_back_to_side_defaults() {
        let home = team(Side::Home, TeamFields::default());
        assert_eq!(home.name, "Home Team");
        assert_eq!(home.short_name, "HOME");
        assert_eq!(home.id, "");
        assert_eq!(home.logo, "");

        let away = team(Side::Away, TeamFields::default());
        assert_eq!(away.name, "Away Team");
        assert_eq!(away.short_name, "AWAY");
    }

    #[test]
    fn placeholder_news_is_fixed_size_and_deterministic() {
        let first = placeholder_news();
        let second = placeholder_news();
        assert_eq!(first.len(), PLACEHOLDER_NEWS_COUNT);
        assert_eq!(first[0].title, "Latest Cricket News Update 1");
        assert_eq!(first[5].title, "Latest Cricket News Update 6");
        assert_eq!(first[2].image, placeholder_image(2));

        let titles = |news: &[News]| news.iter().map(|n| n.title.clone()).collect::<Vec<_>>();
        let images = |news: &[News]| news.iter().map(|n| n.image.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&first), titles(&second));
        assert_eq!(images(&first), images(&second));
        assert!(first.iter().all(|n| !n.published_at.is_empty()));
    }

    #[test]
    fn blank_ids_are_missing_keys() {
        assert!(Query::MatchInfo { match_id: String::new() }.missing_key());
        assert!(Query::PointsTable { series_id: "  ".into() }.missing_key());
        assert!(!Query::MatchInfo { match_id: "7".into() }.missing_key());
        assert!(!Query::LiveMatches.missing_key());
        assert_eq!(Query::TeamRanking { kind: "odi".into() }.key(), Some("odi"));
    }

    #[test]
    fn request_params_are_ordered() {
        let req = Request::get("fixtures").param("sort", "x").param("include", "y");
        let keys: Vec<_> = req.params.keys().cloned().collect();
        assert_eq!(keys, vec!["include", "sort"]);
    }
}
