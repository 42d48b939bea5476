use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::provider::{Credential, Method, Request};
use log::{debug, trace};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// Single-shot JSON over HTTP with the configured credential attached.
/// No retries, no backoff.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    api_token: String,
    credential: Credential,
    timeout: Duration,
}

impl Transport {
    pub fn new(config: &ApiConfig, credential: Credential) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent("crictui/0.1 (terminal cricket dashboard)")
            .build()
            .map_err(|e| ApiError::Config(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_token: config.api_token.clone(),
            credential,
            timeout: config.timeout,
        })
    }

    pub async fn send(&self, request: &Request) -> ApiResult<Value> {
        match request.method {
            Method::Get => self.call(request.endpoint, &request.segments, &request.params).await,
            Method::Post => {
                let body: Map<String, Value> = request
                    .params
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect();
                self.post(request.endpoint, &request.segments, &Value::Object(body)).await
            }
        }
    }

    /// GET `{base}/{endpoint}/{segments}?{params}` with the credential appended.
    pub async fn call(
        &self,
        endpoint: &str,
        segments: &[String],
        params: &BTreeMap<String, String>,
    ) -> ApiResult<Value> {
        let url = self.url(endpoint, segments, params)?;
        self.execute("GET", self.client.get(url.clone()), &url).await
    }

    /// POST a JSON body to `{base}/{endpoint}/{segments}` with the credential appended.
    pub async fn post(&self, endpoint: &str, segments: &[String], body: &Value) -> ApiResult<Value> {
        let url = self.url(endpoint, segments, &BTreeMap::new())?;
        self.execute("POST", self.client.post(url.clone()).json(body), &url).await
    }

    /// `endpoint` may hold several fixed parts ("a/b"). Each of `segments`
    /// is encoded as a single path segment, so `/`, `?` and `#` stay inside it.
    pub fn url(
        &self,
        endpoint: &str,
        segments: &[String],
        params: &BTreeMap<String, String>,
    ) -> ApiResult<Url> {
        let invalid = |reason: &dyn std::fmt::Display| {
            ApiError::Config(format!("invalid url {}: {reason}", self.redact(&self.base_url)))
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e))?;
        {
            let mut path = url.path_segments_mut().map_err(|()| invalid(&"not a base url"))?;
            path.pop_if_empty();
            path.extend(endpoint.split('/').filter(|part| !part.is_empty()));
            path.extend(segments);
            if self.credential == Credential::PathSegment {
                path.push(&self.api_token);
            }
        }

        let credential_param = match self.credential {
            Credential::Query { name } => Some(name),
            Credential::PathSegment => None,
        };
        if !params.is_empty() || credential_param.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            if let Some(name) = credential_param {
                pairs.append_pair(name, &self.api_token);
            }
        }

        Ok(url)
    }

    async fn execute(&self, method: &str, builder: RequestBuilder, url: &Url) -> ApiResult<Value> {
        let shown = self.redact(url.as_str());
        debug!("{method} {shown}");

        let response = builder
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network { url: shown.clone(), source: e.without_url() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url: shown, status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network { url: shown.clone(), source: e.without_url() })?;
        trace!("{shown} -> {body}");

        serde_json::from_str(&body).map_err(|e| ApiError::Parse { url: shown, source: e })
    }

    fn redact(&self, url: &str) -> String {
        if self.api_token.is_empty() {
            url.to_owned()
        } else {
            url.replace(&self.api_token, "***")
        }
    }
}
