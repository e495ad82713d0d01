//! HTTP flow store
//!
//! Talks to the remote flow store API. Before each call the session token
//! is refreshed when it is about to expire; a failed refresh logs the
//! session out and the call goes ahead without credentials, leaving the
//! store to refuse it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use flow_graph::FlowDocument;

use crate::config::ClientConfig;
use crate::constants::routes;
use crate::error::{ClientError, Result};
use crate::session::{now_millis, Session};
use crate::store::FlowStore;
use crate::types::{
    is_empty_answer, FlowMeta, FlowRecord, RunResult, SaveRequest, SaveResponse, SetActiveRequest,
    TestRequest,
};

/// Flow store reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpFlowStore {
    config: ClientConfig,
    session: Arc<Session>,
    client: Client,
}

impl HttpFlowStore {
    pub fn new(config: ClientConfig, session: Arc<Session>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            session,
            client,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Refresh the token if it expires soon
    ///
    /// Never fails: on any refresh error the session is cleared.
    pub async fn refresh_session(&self) {
        if !self.session.needs_refresh(now_millis()) {
            return;
        }
        match self.fetch_token().await {
            Ok(token) => match self.session.login(&token) {
                Ok(()) => log::debug!("Session token refreshed"),
                Err(e) => {
                    log::warn!("Refreshed token rejected, logging out: {}", e);
                    self.session.logout();
                }
            },
            Err(e) => {
                log::warn!("Token refresh failed, logging out: {}", e);
                self.session.logout();
            }
        }
    }

    async fn fetch_token(&self) -> Result<String> {
        let response = self
            .authorized(self.client.get(self.config.endpoint(routes::TOKEN_REFRESH)))
            .send()
            .await?;
        let body = checked(response).await?.text().await?;
        token_from_body(&body)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a privileged request and decode its JSON answer
    async fn call(&self, request: RequestBuilder) -> Result<Value> {
        self.refresh_session().await;
        let response = self.authorized(request).send().await?;
        Ok(checked(response).await?.json().await?)
    }

    fn flows_url(&self, suffix: &str) -> String {
        format!("{}{}", self.config.endpoint(routes::FLOWS), suffix)
    }

    /// URL of a named flow route; each segment is percent-encoded
    fn flow_url(&self, segments: &[&str]) -> Result<Url> {
        let base = self.config.endpoint(routes::FLOWS);
        let mut url = Url::parse(&base)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn non-success statuses into errors
async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Decode an answer, mapping the store's `{}` to `None`
fn optional<T: DeserializeOwned>(value: Value) -> Result<Option<T>> {
    if is_empty_answer(&value) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Decode a summary list, mapping the store's `{}` to an empty list
fn meta_list(value: Value) -> Result<Vec<FlowMeta>> {
    if is_empty_answer(&value) {
        return Ok(Vec::new());
    }
    if !value.is_array() {
        return Err(ClientError::invalid_response(format!(
            "expected a list of flows, got {}",
            value
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Token from a refresh answer: a JSON string, an object holding
/// `token`/`access_token`, or the bare token text
fn token_from_body(body: &str) -> Result<String> {
    let token = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(token)) => token,
        Ok(Value::Object(map)) => ["token", "access_token"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(String::from)
            .ok_or_else(|| ClientError::invalid_response("token answer holds no token"))?,
        _ => body.trim().to_string(),
    };
    if token.is_empty() {
        return Err(ClientError::invalid_response("empty token"));
    }
    Ok(token)
}

#[async_trait]
impl FlowStore for HttpFlowStore {
    async fn list(&self) -> Result<Vec<FlowMeta>> {
        meta_list(self.call(self.client.get(self.flows_url(""))).await?)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<FlowRecord>> {
        let url = self.flow_url(&[name])?;
        optional(self.call(self.client.get(url)).await?)
    }

    async fn get_by_name_and_revision(&self, name: &str, rev: i64) -> Result<Option<FlowRecord>> {
        let url = self.flow_url(&[name])?;
        let request = self.client.get(url).query(&[("rev", rev)]);
        optional(self.call(request).await?)
    }

    async fn get_meta_by_name(&self, name: &str) -> Result<Option<FlowMeta>> {
        let request = self.client.get(self.flows_url("")).query(&[("name", name)]);
        Ok(meta_list(self.call(request).await?)?.into_iter().next())
    }

    async fn save(&self, name: &str, payload: &Value, flow: &FlowDocument) -> Result<SaveResponse> {
        let body = SaveRequest {
            name: name.to_string(),
            payload: payload.clone(),
            flow: flow.to_value()?,
        };
        let answer = self
            .call(self.client.post(self.flows_url("/")).json(&body))
            .await?;
        if let Some(error) = answer.get("error").and_then(Value::as_str) {
            return Err(ClientError::invalid_response(error));
        }
        let saved: SaveResponse = serde_json::from_value(answer)?;
        log::info!("Saved flow '{}' rev {}", name, saved.rev);
        Ok(saved)
    }

    async fn set_active(&self, name: &str, rev: i64) -> Result<()> {
        let url = self.flow_url(&[name, "setactive"])?;
        self.call(self.client.post(url).json(&SetActiveRequest { rev }))
            .await?;
        log::info!("Activated flow '{}' rev {}", name, rev);
        Ok(())
    }

    async fn test(&self, payload: &Value, flow: &FlowDocument) -> Result<RunResult> {
        let body = TestRequest {
            payload: payload.clone(),
            flow: flow.to_value()?,
        };
        let url = self.config.endpoint(routes::FLOW_TEST);

        // The store answers with the flow's own status code, so the run
        // envelope is read whatever the status.
        self.refresh_session().await;
        let response = self
            .authorized(self.client.post(url).json(&body))
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        match serde_json::from_str::<RunResult>(&text) {
            Ok(result) => Ok(result.with_status(status.as_u16())),
            Err(_) if !status.is_success() => Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::token_with;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_store() -> (MockServer, HttpFlowStore) {
        let mock_server = MockServer::start().await;
        let config = ClientConfig {
            api_url: mock_server.uri(),
            timeout_secs: 5,
            ..ClientConfig::default()
        };
        let store = HttpFlowStore::new(config, Arc::new(Session::default())).unwrap();
        (mock_server, store)
    }

    fn empty_flow() -> FlowDocument {
        FlowDocument::from_value(json!({"id": "flows@1.0.0", "nodes": {}})).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty_answer() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("GET"))
            .and(path("/flows"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_meta_by_name() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("GET"))
            .and(path("/flows"))
            .and(query_param("name", "orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "orders", "latest_rev": 3, "active_rev": 2}
            ])))
            .mount(&mock_server)
            .await;

        let meta = store.get_meta_by_name("orders").await.unwrap().unwrap();
        assert_eq!(meta.latest_rev, 3);
        assert_eq!(meta.active_rev, 2);
    }

    #[tokio::test]
    async fn test_get_by_revision() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("GET"))
            .and(path("/flows/orders"))
            .and(query_param("rev", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "orders", "rev": 2, "payload": {},
                "flow": {"id": "flows@1.0.0", "nodes": {}}, "timestamp": 10
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flows/missing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let record = store.get_by_name_and_revision("orders", 2).await.unwrap().unwrap();
        assert_eq!(record.rev, 2);
        assert!(store.get_by_name("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_sends_body_and_bearer() {
        let (mock_server, store) = setup_store().await;
        let token = token_with(json!({"exp": now_millis() + 3_600_000}));
        store.session().login(&token).unwrap();

        Mock::given(method("POST"))
            .and(path("/flows/"))
            .and(header("authorization", format!("Bearer {}", token).as_str()))
            .and(body_json(json!({
                "name": "orders",
                "payload": {"items": []},
                "flow": {"id": "flows@1.0.0", "nodes": {}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rev": 4})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let saved = store
            .save("orders", &json!({"items": []}), &empty_flow())
            .await
            .unwrap();
        assert_eq!(saved.rev, 4);
    }

    #[tokio::test]
    async fn test_set_active() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("POST"))
            .and(path("/flows/orders/setactive"))
            .and(body_json(json!({"rev": 2})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"name": "orders", "new_active": 2})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        store.set_active("orders", 2).await.unwrap();
    }

    #[tokio::test]
    async fn test_dry_run() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("POST"))
            .and(path("/flowtest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "Missing input", "rev": -1, "timestamp": 1
            })))
            .mount(&mock_server)
            .await;

        let result = store.test(&json!({}), &empty_flow()).await.unwrap();
        assert_eq!(result.rev, -1);
        assert_eq!(result.status, 200);
        assert_eq!(result.error.as_deref(), Some("Missing input"));
    }

    #[tokio::test]
    async fn test_dry_run_keeps_flow_status() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("POST"))
            .and(path("/flowtest"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "data": {"msg": "nope"}, "rev": -1, "timestamp": 1
            })))
            .mount(&mock_server)
            .await;

        let result = store.test(&json!({}), &empty_flow()).await.unwrap();
        assert_eq!(result.status, 404);
        assert_eq!(result.data, Some(json!({"msg": "nope"})));
    }

    #[tokio::test]
    async fn test_dry_run_refused() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("POST"))
            .and(path("/flowtest"))
            .respond_with(ResponseTemplate::new(401).set_body_string("login required"))
            .mount(&mock_server)
            .await;

        let err = store.test(&json!({}), &empty_flow()).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_flow_name_is_escaped() {
        let (mock_server, store) = setup_store().await;
        Mock::given(method("GET"))
            .and(path("/flows/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "orders", "rev": 1, "payload": {},
                "flow": {"id": "flows@1.0.0", "nodes": {}}, "timestamp": 10
            })))
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flows/orders%3Frev=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/flows/a%2Fb/setactive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert!(store.get_by_name("orders?rev=1").await.unwrap().is_none());
        store.set_active("a/b", 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_near_expiry() {
        let (mock_server, store) = setup_store().await;
        let old = token_with(json!({"exp": now_millis() + 30_000}));
        let fresh = token_with(json!({"exp": now_millis() + 3_600_000}));
        store.session().login(&old).unwrap();

        Mock::given(method("GET"))
            .and(path("/users/token"))
            .and(header("authorization", format!("Bearer {}", old).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": fresh.clone()})))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flows"))
            .and(header("authorization", format!("Bearer {}", fresh).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        store.list().await.unwrap();
        assert_eq!(store.session().token(), Some(fresh));
    }

    #[tokio::test]
    async fn test_failed_refresh_logs_out() {
        let (mock_server, store) = setup_store().await;
        store
            .session()
            .login(&token_with(json!({"exp": now_millis() + 1_000})))
            .unwrap();

        Mock::given(method("GET"))
            .and(path("/users/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flows"))
            .respond_with(ResponseTemplate::new(401).set_body_string("login required"))
            .mount(&mock_server)
            .await;

        let err = store.list().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!store.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_no_refresh_when_token_is_fresh() {
        let (mock_server, store) = setup_store().await;
        store
            .session()
            .login(&token_with(json!({"exp": now_millis() + 3_600_000})))
            .unwrap();

        Mock::given(method("GET"))
            .and(path("/users/token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flows"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        store.list().await.unwrap();
    }

    #[test]
    fn test_token_from_body() {
        assert_eq!(token_from_body("\"abc\"").unwrap(), "abc");
        assert_eq!(token_from_body(r#"{"access_token": "abc"}"#).unwrap(), "abc");
        assert_eq!(token_from_body("abc.def.ghi\n").unwrap(), "abc.def.ghi");
        assert!(token_from_body("{}").is_err());
        assert!(token_from_body("").is_err());
    }
}
