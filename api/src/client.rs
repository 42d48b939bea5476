use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::provider::{self, Provider, Query};
use crate::shapes::{RawPlayer, RawPlayerRanking, RawPointsTableEntry, RawTeamRanking};
use crate::transport::Transport;
use crate::{
    ApiResponse, LiveMatch, Match, News, Player, PlayerRanking, PointsTableEntry, Scorecard,
    Series, TeamRanking,
};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

const NEWS_FALLBACK_MESSAGE: &str = "News unavailable, showing placeholders";

/// Cricket data client: one method per dashboard query, whatever the
/// configured provider.
///
/// Absent or malformed upstream data resolves to empty or placeholder data.
/// Only a failed request is an `Err`, and `news_list` swallows even that.
#[derive(Debug, Clone)]
pub struct CricketApi {
    transport: Transport,
    provider: Arc<dyn Provider>,
}

impl CricketApi {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        Self::with_provider(config, provider::for_kind(config.provider))
    }

    pub fn with_provider(config: &ApiConfig, provider: Arc<dyn Provider>) -> ApiResult<Self> {
        Ok(Self {
            transport: Transport::new(config, provider.credential())?,
            provider,
        })
    }

    pub fn from_env() -> ApiResult<Self> {
        Self::new(&ApiConfig::from_env()?)
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn home_list(&self) -> ApiResult<ApiResponse<Value>> {
        self.opaque(Query::HomeList).await
    }

    pub async fn series_list(&self) -> ApiResult<ApiResponse<Vec<Series>>> {
        self.list(Query::SeriesList, |p, raw| p.series(raw)).await
    }

    pub async fn upcoming_matches(&self) -> ApiResult<ApiResponse<Vec<Match>>> {
        self.list(Query::UpcomingMatches, |p, raw| p.matches(raw)).await
    }

    pub async fn upcoming_matches_by_series(
        &self,
        series_id: &str,
    ) -> ApiResult<ApiResponse<Vec<Match>>> {
        let query = Query::UpcomingMatchesBySeries { series_id: series_id.to_owned() };
        self.list(query, |p, raw| p.matches(raw)).await
    }

    pub async fn recent_matches(&self) -> ApiResult<ApiResponse<Vec<Match>>> {
        self.list(Query::RecentMatches, |p, raw| p.matches(raw)).await
    }

    pub async fn recent_matches_by_series(
        &self,
        series_id: &str,
    ) -> ApiResult<ApiResponse<Vec<Match>>> {
        let query = Query::RecentMatchesBySeries { series_id: series_id.to_owned() };
        self.list(query, |p, raw| p.matches(raw)).await
    }

    pub async fn live_matches(&self) -> ApiResult<ApiResponse<Vec<LiveMatch>>> {
        self.list(Query::LiveMatches, |p, raw| p.live_matches(raw)).await
    }

    pub async fn live_match(&self, match_id: &str) -> ApiResult<ApiResponse<Option<LiveMatch>>> {
        let query = Query::LiveMatch { match_id: match_id.to_owned() };
        self.single(query, |p, item| Some(p.live_match_record(item))).await
    }

    pub async fn match_info(&self, match_id: &str) -> ApiResult<ApiResponse<Option<Match>>> {
        let query = Query::MatchInfo { match_id: match_id.to_owned() };
        self.single(query, |p, item| Some(p.match_record(item))).await
    }

    pub async fn scorecard(&self, match_id: &str) -> ApiResult<ApiResponse<Option<Scorecard>>> {
        let query = Query::Scorecard { match_id: match_id.to_owned() };
        self.single(query, |_, item| Scorecard::deserialize(item).ok()).await
    }

    pub async fn squad(&self, match_id: &str) -> ApiResult<ApiResponse<Vec<Player>>> {
        let query = Query::Squad { match_id: match_id.to_owned() };
        self.list(query, |_, raw| provider::passthrough::<RawPlayer, _>(raw)).await
    }

    pub async fn players_by_match(&self, match_id: &str) -> ApiResult<ApiResponse<Vec<Player>>> {
        let query = Query::PlayersByMatch { match_id: match_id.to_owned() };
        self.list(query, |_, raw| provider::passthrough::<RawPlayer, _>(raw)).await
    }

    /// Betting market lines, forwarded untouched.
    pub async fn match_fancy(&self, match_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.opaque(Query::MatchFancy { match_id: match_id.to_owned() }).await
    }

    pub async fn match_odd_history(&self, match_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.opaque(Query::OddHistory { match_id: match_id.to_owned() }).await
    }

    pub async fn match_stats(&self, match_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.opaque(Query::MatchStats { match_id: match_id.to_owned() }).await
    }

    pub async fn commentary(&self, match_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.opaque(Query::Commentary { match_id: match_id.to_owned() }).await
    }

    pub async fn man_of_match(&self, match_id: &str) -> ApiResult<ApiResponse<Option<Player>>> {
        let query = Query::ManOfMatch { match_id: match_id.to_owned() };
        self.single(query, |_, item| RawPlayer::deserialize(item).ok().map(Player::from)).await
    }

    pub async fn points_table(
        &self,
        series_id: &str,
    ) -> ApiResult<ApiResponse<Vec<PointsTableEntry>>> {
        let query = Query::PointsTable { series_id: series_id.to_owned() };
        self.list(query, |_, raw| provider::passthrough::<RawPointsTableEntry, _>(raw)).await
    }

    pub async fn new_points_table(&self, series_id: &str) -> ApiResult<ApiResponse<Value>> {
        self.opaque(Query::NewPointsTable { series_id: series_id.to_owned() }).await
    }

    /// `kind` is the ranking format as the upstream names it ("test", "odi", "t20").
    pub async fn player_ranking(&self, kind: &str) -> ApiResult<ApiResponse<Vec<PlayerRanking>>> {
        let query = Query::PlayerRanking { kind: kind.to_owned() };
        self.list(query, |_, raw| provider::passthrough::<RawPlayerRanking, _>(raw)).await
    }

    pub async fn team_ranking(&self, kind: &str) -> ApiResult<ApiResponse<Vec<TeamRanking>>> {
        let query = Query::TeamRanking { kind: kind.to_owned() };
        self.list(query, |_, raw| provider::passthrough::<RawTeamRanking, _>(raw)).await
    }

    /// Never fails and never comes back empty. Any failure is logged and
    /// replaced by the placeholder set.
    pub async fn news_list(&self) -> ApiResult<ApiResponse<Vec<News>>> {
        let query = Query::NewsList;
        let response = match self.fetch(&query).await {
            Ok(Some(raw)) => ApiResponse::success(self.provider.news(&raw)),
            Ok(None) => ApiResponse::degraded(self.unsupported(&query), provider::placeholder_news()),
            Err(e) => {
                warn!("{query} failed, using placeholders: {e}");
                ApiResponse::degraded(NEWS_FALLBACK_MESSAGE, provider::placeholder_news())
            }
        };
        Ok(response)
    }

    pub async fn news_detail(&self, news_id: &str) -> ApiResult<ApiResponse<Option<News>>> {
        let query = Query::NewsDetail { news_id: news_id.to_owned() };
        self.single(query, |p, item| Some(p.news_record(0, item))).await
    }

    /// Raw body for `query`, or `None` when the provider stubs it.
    async fn fetch(&self, query: &Query) -> ApiResult<Option<Value>> {
        let Some(request) = self.provider.route(query) else {
            debug!("{query}: no {} endpoint, stubbing", self.provider.name());
            return Ok(None);
        };
        let raw = self.transport.send(&request).await?;
        self.provider.check(&raw)?;
        Ok(Some(raw))
    }

    async fn list<T>(
        &self,
        query: Query,
        adapt: impl FnOnce(&dyn Provider, &Value) -> Vec<T>,
    ) -> ApiResult<ApiResponse<Vec<T>>> {
        if query.missing_key() {
            return Ok(ApiResponse::degraded(missing_key(&query), Vec::new()));
        }
        Ok(match self.fetch(&query).await? {
            Some(raw) => ApiResponse::success(adapt(self.provider.as_ref(), &raw)),
            None => ApiResponse::degraded(self.unsupported(&query), Vec::new()),
        })
    }

    async fn single<T>(
        &self,
        query: Query,
        adapt: impl FnOnce(&dyn Provider, &Value) -> Option<T>,
    ) -> ApiResult<ApiResponse<Option<T>>> {
        if query.missing_key() {
            return Ok(ApiResponse::degraded(missing_key(&query), None));
        }
        Ok(match self.fetch(&query).await? {
            Some(raw) => {
                let record = provider::item(&raw).and_then(|item| adapt(self.provider.as_ref(), item));
                ApiResponse::success(record)
            }
            None => ApiResponse::degraded(self.unsupported(&query), None),
        })
    }

    /// `data` as sent, or an empty object.
    async fn opaque(&self, query: Query) -> ApiResult<ApiResponse<Value>> {
        let empty = || Value::Object(Map::new());
        if query.missing_key() {
            return Ok(ApiResponse::degraded(missing_key(&query), empty()));
        }
        Ok(match self.fetch(&query).await? {
            Some(mut raw) => {
                let data = raw.get_mut("data").map(Value::take).filter(|d| !d.is_null());
                ApiResponse::success(data.unwrap_or_else(empty))
            }
            None => ApiResponse::degraded(self.unsupported(&query), empty()),
        })
    }

    fn unsupported(&self, query: &Query) -> String {
        format!("{query} is not supported by {}", self.provider.name())
    }
}

/// A blank id would address the list endpoint instead of a record.
fn missing_key(query: &Query) -> String {
    debug!("{query}: blank id, not sent upstream");
    format!("{query} needs an id")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;
    use crate::error::ApiError;
    use crate::provider::PLACEHOLDER_NEWS_COUNT;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn sportmonks(server: &Server) -> CricketApi {
        CricketApi::new(&ApiConfig::new(ProviderKind::SportMonks, "secret").with_base_url(server.url()))
            .unwrap()
    }

    fn crictez(server: &Server) -> CricketApi {
        CricketApi::new(&ApiConfig::new(ProviderKind::CricTez, "secret").with_base_url(server.url()))
            .unwrap()
    }

    #[tokio::test]
    async fn upcoming_fixture_without_team_code_gets_name_prefix() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("api_token".into(), "secret".into()),
                Matcher::UrlEncoded("filter[status]".into(), "NS".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"data": [{
                    "id": 1,
                    "localteam": {"id": 5, "name": "India"},
                    "visitorteam": {"id": 6, "name": "Australia", "code": "AUS"}
                }]})
                .to_string(),
            )
            .create_async()
            .await;

        let res = sportmonks(&server).upcoming_matches().await.unwrap();
        assert!(res.status);
        assert_eq!(res.message, "Success");
        assert_eq!(res.data.len(), 1);
        assert_eq!(res.data[0].id, "1");
        assert_eq!(res.data[0].home.short_name, "India");
        assert_eq!(res.data[0].away.short_name, "AUS");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn live_match_without_runs_shows_zero_batting_and_unset_bowling() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/livescores")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({"data": [{
                    "id": 9,
                    "localteam_id": 5,
                    "visitorteam_id": 6,
                    "localteam": {"id": 5, "name": "India", "code": "IND"},
                    "visitorteam": {"id": 6, "name": "Australia", "code": "AUS"},
                    "runs": []
                }]})
                .to_string(),
            )
            .create_async()
            .await;

        let res = sportmonks(&server).live_matches().await.unwrap();
        let score = &res.data[0].score;
        assert_eq!(score.batting.team, "India");
        assert_eq!((score.batting.runs, score.batting.wickets, score.batting.overs), (Some(0), Some(0), Some(0.0)));
        assert_eq!(score.bowling.team, "Australia");
        assert_eq!((score.bowling.runs, score.bowling.wickets, score.bowling.overs), (None, None, None));
    }

    #[tokio::test]
    async fn failing_news_upstream_yields_placeholders() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/news")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let res = sportmonks(&server).news_list().await.unwrap();
        assert!(res.status);
        assert_eq!(res.message, NEWS_FALLBACK_MESSAGE);
        assert_eq!(res.data.len(), PLACEHOLDER_NEWS_COUNT);
        assert_eq!(res.data[0].id, "placeholder-1");
    }

    #[tokio::test]
    async fn unparseable_news_body_also_yields_placeholders() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/news")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let res = sportmonks(&server).news_list().await.unwrap();
        assert_eq!(res.data.len(), PLACEHOLDER_NEWS_COUNT);
    }

    #[tokio::test]
    async fn stubbed_query_makes_no_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let api = sportmonks(&server);
        let squad = api.squad("42").await.unwrap();
        assert!(squad.status);
        assert!(squad.data.is_empty());
        assert_eq!(squad.message, "squad is not supported by sportmonks");

        let table = api.points_table("7").await.unwrap();
        assert!(table.status);
        assert!(table.data.is_empty());

        let stats = api.match_stats("42").await.unwrap();
        assert_eq!(stats.data, json!({}));

        let motm = api.man_of_match("42").await.unwrap();
        assert_eq!(motm.data, None);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transport_failure_propagates_outside_news() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/livescores")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let err = sportmonks(&server).live_matches().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
    }

    #[tokio::test]
    async fn odd_envelope_resolves_to_empty_data() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/leagues")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"data": null}).to_string())
            .create_async()
            .await;

        let res = sportmonks(&server).series_list().await.unwrap();
        assert!(res.status);
        assert!(res.data.is_empty());
    }

    #[tokio::test]
    async fn single_record_accepts_object_or_first_of_list() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures/77")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"data": [{"id": 77, "localteam": {"name": "Nepal"}}]}).to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/news/3")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"data": []}).to_string())
            .create_async()
            .await;

        let api = sportmonks(&server);
        let info = api.match_info("77").await.unwrap().data.unwrap();
        assert_eq!(info.id, "77");
        assert_eq!(info.home.name, "Nepal");
        assert_eq!(info.away.name, "Away Team");

        assert_eq!(api.news_detail("3").await.unwrap().data, None);
    }

    #[tokio::test]
    async fn legacy_rejection_is_an_upstream_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/matchInfo/secret")
            .match_body(Matcher::Json(json!({"match_id": "42"})))
            .with_status(200)
            .with_body(json!({"status": false, "message": "Match not found"}).to_string())
            .create_async()
            .await;

        let err = crictez(&server).match_info("42").await.unwrap_err();
        assert!(matches!(err, ApiError::Upstream { ref message } if message == "Match not found"));
        assert!(err.is_transport());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn legacy_lists_and_pass_through_records() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/seriesList/secret")
            .with_status(200)
            .with_body(
                json!({"status": true, "message": "ok", "data": [
                    {"series_id": 3, "series": "IPL 2024", "series_status": "live"},
                    "junk"
                ]})
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("POST", "/teamRanking/secret")
            .match_body(Matcher::Json(json!({"type": "odi"})))
            .with_status(200)
            .with_body(
                json!({"status": 1, "data": [
                    {"rank": "1", "team_name": "India", "rating": 121},
                    {"rank": 2, "team": "Australia"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("POST", "/matchFancy/secret")
            .with_status(200)
            .with_body(json!({"status": true, "data": {"lines": [1, 2]}}).to_string())
            .create_async()
            .await;

        let api = crictez(&server);
        assert_eq!(api.provider_name(), "crictez");

        let series = api.series_list().await.unwrap().data;
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "IPL 2024");
        assert_eq!(series[0].status, "live");

        let ranking = api.team_ranking("odi").await.unwrap().data;
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].rank, 1);
        assert_eq!(ranking[0].team, "India");
        assert_eq!(ranking[1].team, "Australia");
        assert_eq!(ranking[1].rating, 0);

        let fancy = api.match_fancy("8").await.unwrap();
        assert_eq!(fancy.data, json!({"lines": [1, 2]}));
    }

    #[tokio::test]
    async fn blank_ids_resolve_to_nothing_without_a_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({"data": [{"id": 999, "localteam": {"name": "Unrelated FC"}}]}).to_string())
            .expect(0)
            .create_async()
            .await;

        let api = sportmonks(&server);
        let info = api.match_info("").await.unwrap();
        assert!(info.status);
        assert!(info.is_degraded());
        assert_eq!(info.data, None);
        assert_eq!(info.message, "match info needs an id");

        assert_eq!(api.live_match("  ").await.unwrap().data, None);
        assert_eq!(api.news_detail("").await.unwrap().data, None);
        assert!(api.upcoming_matches_by_series("").await.unwrap().data.is_empty());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn ids_with_url_syntax_stay_inside_one_segment() {
        let mut server = Server::new_async().await;
        let list = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let record = server
            .mock("GET", "/fixtures/7%3Finclude=x%23y")
            .match_query(Matcher::UrlEncoded("api_token".into(), "secret".into()))
            .with_status(200)
            .with_body(json!({"data": {"id": 7, "localteam": {"name": "Ireland"}}}).to_string())
            .create_async()
            .await;

        let info = sportmonks(&server).match_info("7?include=x#y").await.unwrap().data.unwrap();
        assert_eq!(info.home.name, "Ireland");
        record.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn legacy_squad_with_both_id_spellings_keeps_players() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/squadByMatchId/secret")
            .with_status(200)
            .with_body(
                json!({"status": true, "data": [
                    {"id": 1, "player_id": 1, "name": "Kohli", "player_name": "Virat Kohli"},
                    {"player_id": 2, "player_name": "Bumrah", "play_role": "Bowler"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let squad = crictez(&server).squad("5").await.unwrap().data;
        assert_eq!(squad.len(), 2);
        assert_eq!((squad[0].id.as_str(), squad[0].name.as_str()), ("1", "Kohli"));
        assert_eq!(squad[1].name, "Bumrah");
        assert_eq!(squad[1].role, "Bowler");
    }
}
