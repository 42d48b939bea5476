//! SportMonks cricket API (v2): raw wire types and their adapter.
//! Envelope is `{ "data": ... }`; the credential travels as `api_token`.

use crate::de;
use crate::provider::{
    self, Credential, DEFAULT_NEWS_SOURCE, DEFAULT_SERIES_STATUS, Provider, Query, Request, Side,
    TeamFields,
};
use crate::{LiveMatch, Match, News, Score, Series, SideScore, Toss};
use serde::Deserialize;
use serde_json::Value;

const FIXTURE_INCLUDES: &str = "localteam,visitorteam,venue,league";
const LIVE_INCLUDES: &str = "localteam,visitorteam,venue,league,runs";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct RawLeague {
    #[serde(default, deserialize_with = "de::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::nested")]
    pub season: Option<RawSeason>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSeason {
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub starting_at: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub ending_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFixture {
    #[serde(default, deserialize_with = "de::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub league_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub round: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub localteam_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub visitorteam_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub starting_at: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub status: Option<String>,
    /// Result or live situation, e.g. "India won by 7 wickets".
    #[serde(default, deserialize_with = "de::text")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub toss_won_team_id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub elected: Option<String>,
    #[serde(default, deserialize_with = "de::nested")]
    pub localteam: Option<RawTeam>,
    #[serde(default, deserialize_with = "de::nested")]
    pub visitorteam: Option<RawTeam>,
    #[serde(default, deserialize_with = "de::nested")]
    pub venue: Option<RawVenue>,
    #[serde(default, deserialize_with = "de::nested")]
    pub league: Option<RawLeague>,
    #[serde(default, deserialize_with = "de::list")]
    pub runs: Vec<RawRuns>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTeam {
    #[serde(default, deserialize_with = "de::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub image_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVenue {
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub city: Option<String>,
}

/// One innings total for one team.
#[derive(Debug, Default, Deserialize)]
pub struct RawRuns {
    #[serde(default, deserialize_with = "de::text")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub inning: Option<u32>,
    #[serde(default, deserialize_with = "de::number")]
    pub score: Option<u32>,
    #[serde(default, deserialize_with = "de::number")]
    pub wickets: Option<u32>,
    #[serde(default, deserialize_with = "de::number")]
    pub overs: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNews {
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
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub source: Option<String>,
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct SportMonks;

impl Provider for SportMonks {
    fn name(&self) -> &'static str {
        "sportmonks"
    }

    fn credential(&self) -> Credential {
        Credential::Query { name: "api_token" }
    }

    fn route(&self, query: &Query) -> Option<Request> {
        let fixtures = |status: &str, sort: &str| {
            Request::get("fixtures")
                .param("include", FIXTURE_INCLUDES)
                .param("filter[status]", status)
                .param("sort", sort)
        };

        let request = match query {
            Query::SeriesList => Request::get("leagues").param("include", "season"),
            Query::UpcomingMatches => fixtures("NS", "starting_at"),
            Query::UpcomingMatchesBySeries { series_id } => {
                fixtures("NS", "starting_at").param("filter[league_id]", series_id)
            }
            Query::RecentMatches => fixtures("Finished", "-starting_at"),
            Query::RecentMatchesBySeries { series_id } => {
                fixtures("Finished", "-starting_at").param("filter[league_id]", series_id)
            }
            Query::LiveMatches => Request::get("livescores").param("include", LIVE_INCLUDES),
            Query::LiveMatch { match_id } => {
                Request::get("fixtures").segment(match_id).param("include", LIVE_INCLUDES)
            }
            Query::MatchInfo { match_id } => {
                Request::get("fixtures").segment(match_id).param("include", FIXTURE_INCLUDES)
            }
            Query::NewsList => Request::get("news"),
            Query::NewsDetail { news_id } => Request::get("news").segment(news_id),
            // No SportMonks equivalent.
            Query::HomeList
            | Query::Scorecard { .. }
            | Query::Squad { .. }
            | Query::PlayersByMatch { .. }
            | Query::MatchFancy { .. }
            | Query::OddHistory { .. }
            | Query::MatchStats { .. }
            | Query::Commentary { .. }
            | Query::ManOfMatch { .. }
            | Query::PointsTable { .. }
            | Query::NewPointsTable { .. }
            | Query::PlayerRanking { .. }
            | Query::TeamRanking { .. } => return None,
        };
        Some(request)
    }

    fn series_record(&self, item: &Value) -> Series {
        map_league(&provider::parse(item))
    }

    fn match_record(&self, item: &Value) -> Match {
        map_fixture(&provider::parse(item))
    }

    fn live_match_record(&self, item: &Value) -> LiveMatch {
        map_live_fixture(&provider::parse(item))
    }

    fn news_record(&self, index: usize, item: &Value) -> News {
        map_news(index, provider::parse(item))
    }
}

fn map_league(raw: &RawLeague) -> Series {
    let season = raw.season.as_ref();
    let from_season = |field: Option<&String>| field.cloned().unwrap_or_default();

    Series {
        id: raw.id.clone().unwrap_or_default(),
        name: raw.name.clone().unwrap_or_default(),
        short_name: raw.code.clone().unwrap_or_default(),
        status: raw.status.clone().unwrap_or_else(|| DEFAULT_SERIES_STATUS.into()),
        season: from_season(season.and_then(|s| s.name.as_ref())),
        start_date: from_season(season.and_then(|s| s.starting_at.as_ref())),
        end_date: from_season(season.and_then(|s| s.ending_at.as_ref())),
    }
}

fn team_fields<'a>(team: Option<&'a RawTeam>, fallback_id: Option<&'a str>) -> TeamFields<'a> {
    TeamFields {
        id: team.and_then(|t| t.id.as_deref()).or(fallback_id),
        name: team.and_then(|t| t.name.as_deref()),
        code: team.and_then(|t| t.code.as_deref()),
        logo: team.and_then(|t| t.image_path.as_deref()),
    }
}

fn map_fixture(raw: &RawFixture) -> Match {
    let home = provider::team(
        Side::Home,
        team_fields(raw.localteam.as_ref(), raw.localteam_id.as_deref()),
    );
    let away = provider::team(
        Side::Away,
        team_fields(raw.visitorteam.as_ref(), raw.visitorteam_id.as_deref()),
    );

    let toss = raw.toss_won_team_id.as_deref().map(|team_id| Toss {
        winner: provider::toss_winner(team_id, &home, &away),
        decision: raw.elected.clone().unwrap_or_default(),
    });

    let venue = raw
        .venue
        .as_ref()
        .and_then(|v| match (&v.name, &v.city) {
            (Some(name), Some(city)) => Some(format!("{name}, {city}")),
            (Some(name), None) => Some(name.clone()),
            (None, city) => city.clone(),
        })
        .unwrap_or_default();

    let date = raw.starting_at.clone().unwrap_or_default();
    let league = raw.league.as_ref();

    Match {
        id: raw.id.clone().unwrap_or_default(),
        name: match &raw.round {
            Some(round) => format!("{} vs {}, {round}", home.name, away.name),
            None => format!("{} vs {}", home.name, away.name),
        },
        short_name: format!("{} vs {}", home.short_name, away.short_name),
        status: raw.status.clone().unwrap_or_default(),
        venue,
        date_start: date.clone(),
        date,
        result: raw.note.clone().unwrap_or_default(),
        toss,
        series_id: raw
            .league_id
            .clone()
            .or_else(|| league.and_then(|l| l.id.clone()))
            .unwrap_or_default(),
        series_name: league.and_then(|l| l.name.clone()).unwrap_or_default(),
        home,
        away,
    }
}

/// Latest innings of `team_id`; a blank id never matches.
fn latest_runs<'a>(runs: &'a [RawRuns], team_id: &str) -> Option<&'a RawRuns> {
    if team_id.is_empty() {
        return None;
    }
    runs.iter()
        .filter(|r| r.team_id.as_deref() == Some(team_id))
        .max_by_key(|r| r.inning.unwrap_or(0))
}

fn map_live_fixture(raw: &RawFixture) -> LiveMatch {
    let match_info = map_fixture(raw);

    let home_runs = latest_runs(&raw.runs, &match_info.home.id);
    let away_runs = latest_runs(&raw.runs, &match_info.away.id);

    let batting = SideScore::batting(
        &match_info.home.name,
        home_runs.and_then(|r| r.score),
        home_runs.and_then(|r| r.wickets),
        home_runs.and_then(|r| r.overs),
    );
    let bowling = SideScore::bowling(
        &match_info.away.name,
        away_runs.and_then(|r| r.score),
        away_runs.and_then(|r| r.wickets),
        away_runs.and_then(|r| r.overs),
    );

    let current_status = raw
        .note
        .clone()
        .or_else(|| raw.status.clone())
        .unwrap_or_default();

    LiveMatch {
        match_info,
        score: Score { batting, bowling, current_status },
    }
}

fn map_news(index: usize, raw: RawNews) -> News {
    let description = raw.description.unwrap_or_default();
    News {
        id: raw.id.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        content: raw.content.unwrap_or_else(|| description.clone()),
        description,
        image: raw
            .image
            .or(raw.image_path)
            .unwrap_or_else(|| provider::placeholder_image(index)),
        published_at: raw.published_at.or(raw.created_at).unwrap_or_default(),
        source: raw.source.unwrap_or_else(|| DEFAULT_NEWS_SOURCE.into()),
    }
}
