//! Wire records for the pass-through shapes. Providers disagree on key names,
//! so each spelling gets its own field and the first one present wins.

use crate::de;
use crate::{Player, PlayerRanking, PointsTableEntry, TeamRanking};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPlayer {
    #[serde(deserialize_with = "de::text")]
    id: Option<String>,
    #[serde(deserialize_with = "de::text")]
    player_id: Option<String>,
    #[serde(deserialize_with = "de::text")]
    name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    player_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    role: Option<String>,
    #[serde(deserialize_with = "de::text")]
    play_role: Option<String>,
    #[serde(deserialize_with = "de::text")]
    image: Option<String>,
    #[serde(deserialize_with = "de::text")]
    team: Option<String>,
    #[serde(deserialize_with = "de::text")]
    team_name: Option<String>,
}

impl From<RawPlayer> for Player {
    fn from(raw: RawPlayer) -> Self {
        Player {
            id: raw.id.or(raw.player_id).unwrap_or_default(),
            name: raw.name.or(raw.player_name).unwrap_or_default(),
            role: raw.role.or(raw.play_role).unwrap_or_default(),
            image: raw.image.unwrap_or_default(),
            team: raw.team.or(raw.team_name).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPlayerRanking {
    #[serde(deserialize_with = "de::number")]
    rank: Option<u32>,
    #[serde(deserialize_with = "de::text")]
    name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    player_name: Option<String>,
    #[serde(deserialize_with = "de::text")]
    country: Option<String>,
    #[serde(deserialize_with = "de::text")]
    team: Option<String>,
    #[serde(deserialize_with = "de::number")]
    rating: Option<u32>,
}

impl From<RawPlayerRanking> for PlayerRanking {
    fn from(raw: RawPlayerRanking) -> Self {
        PlayerRanking {
            rank: raw.rank.unwrap_or_default(),
            name: raw.name.or(raw.player_name).unwrap_or_default(),
            country: raw.country.or(raw.team).unwrap_or_default(),
            rating: raw.rating.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawTeamRanking {
    #[serde(deserialize_with = "de::number")]
    rank: Option<u32>,
    #[serde(deserialize_with = "de::text")]
    team: Option<String>,
    #[serde(deserialize_with = "de::text")]
    team_name: Option<String>,
    #[serde(deserialize_with = "de::number")]
    matches: Option<u32>,
    #[serde(deserialize_with = "de::number")]
    points: Option<u32>,
    #[serde(deserialize_with = "de::number")]
    rating: Option<u32>,
}

impl From<RawTeamRanking> for TeamRanking {
    fn from(raw: RawTeamRanking) -> Self {
        TeamRanking {
            rank: raw.rank.unwrap_or_default(),
            team: raw.team.or(raw.team_name).unwrap_or_default(),
            matches: raw.matches.unwrap_or_default(),
            points: raw.points.unwrap_or_default(),
            rating: raw.rating.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPointsTableEntry {
    #[serde(deserialize_with = "de::text")]
    team: Option<String>,
    #[serde(deserialize_with = "de::text")]
    teams: Option<String>,
    #[serde(deserialize_with = "de::text")]
    logo: Option<String>,
    #[serde(deserialize_with = "de::text")]
    flag: Option<String>,
    #[serde(deserialize_with = "de::number")]
    played: Option<u32>,
    #[serde(rename = "P", deserialize_with = "de::number")]
    p: Option<u32>,
    #[serde(deserialize_with = "de::number")]
    won: Option<u32>,
    #[serde(rename = "W", deserialize_with = "de::number")]
    w: Option<u32>,
    #[serde(deserialize_with = "de::number")]
    lost: Option<u32>,
    #[serde(rename = "L", deserialize_with = "de::number")]
    l: Option<u32>,
    #[serde(deserialize_with = "de::number")]
    no_result: Option<u32>,
    #[serde(rename = "NR", deserialize_with = "de::number")]
    nr: Option<u32>,
    #[serde(deserialize_with = "de::number")]
    points: Option<u32>,
    #[serde(rename = "Pts", deserialize_with = "de::number")]
    pts: Option<u32>,
    #[serde(deserialize_with = "de::text")]
    net_run_rate: Option<String>,
    #[serde(rename = "NRR", deserialize_with = "de::text")]
    nrr: Option<String>,
}

impl From<RawPointsTableEntry> for PointsTableEntry {
    fn from(raw: RawPointsTableEntry) -> Self {
        PointsTableEntry {
            team: raw.team.or(raw.teams).unwrap_or_default(),
            logo: raw.logo.or(raw.flag).unwrap_or_default(),
            played: raw.played.or(raw.p).unwrap_or_default(),
            won: raw.won.or(raw.w).unwrap_or_default(),
            lost: raw.lost.or(raw.l).unwrap_or_default(),
            no_result: raw.no_result.or(raw.nr).unwrap_or_default(),
            points: raw.points.or(raw.pts).unwrap_or_default(),
            net_run_rate: raw.net_run_rate.or(raw.nrr).unwrap_or_default(),
        }
    }
}
