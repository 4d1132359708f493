// ============================================================================
// SUPABASE CLIENT - Auth (GoTrue) + tables (PostgREST) over HTTP
// ============================================================================
// Session persistence and auth-change events are handled in-process: the
// auth endpoints never push, so every sign-in, refresh and sign-out is
// announced to listeners from here.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::error::{PortalError, Result};
use crate::models::{AuthChange, AuthEvent, Session};
use crate::services::backend::{Backend, Query};
use crate::state::reactivity::{Listeners, Subscription};
use crate::utils::{load_json, save_json, KeyValueStore, AUTH_TOKEN_KEY};

/// Backend client for a Supabase project
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    store: Rc<dyn KeyValueStore>,
    session: RefCell<Option<Session>>,
    listeners: Listeners<AuthChange>,
}

impl SupabaseClient {
    /// Build the client, restoring any session persisted by a previous page load
    pub fn new(config: &AppConfig, store: Rc<dyn KeyValueStore>) -> Self {
        let session = load_json::<Session>(store.as_ref(), AUTH_TOKEN_KEY);
        if session.is_some() {
            log::info!("🔑 Persisted session found");
        }

        Self {
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
            store,
            session: RefCell::new(session),
            listeners: Listeners::new(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Access token of the current session, anon key otherwise
    fn bearer(&self) -> String {
        match self.session.borrow().as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.anon_key.clone(),
        }
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", self.bearer()))
    }

    fn table_request(&self, builder: RequestBuilder, query: &Query) -> RequestBuilder {
        let params = query.to_params();
        self.with_headers(builder).query(
            params
                .iter()
                .map(|(column, filter)| (column.as_str(), filter.as_str())),
        )
    }

    /// Store the session, persist it and announce the change
    fn set_session(&self, event: AuthEvent, session: Option<Session>) {
        *self.session.borrow_mut() = session.clone();

        let persisted = match &session {
            Some(session) => save_json(self.store.as_ref(), AUTH_TOKEN_KEY, session),
            None => self.store.remove(AUTH_TOKEN_KEY),
        };
        if let Err(e) = persisted {
            log::error!("❌ Could not persist session: {}", e);
        }

        self.listeners.emit(&AuthChange::new(event, session));
    }

    /// Current session, refreshed first when its access token has expired
    ///
    /// Only a rejected refresh token ends the session. Server or network
    /// failures are returned and the stored session is kept for a retry.
    async fn ensure_fresh_session(&self) -> Result<Option<Session>> {
        let current = self.session.borrow().clone();
        let Some(expired) = due_for_refresh(current.clone(), now()) else {
            return Ok(current);
        };

        log::info!("🔄 Session expired, refreshing token...");
        let refreshed = self
            .token_grant(
                "refresh_token",
                &json!({ "refresh_token": expired.refresh_token }),
            )
            .await;

        let current = self.session.borrow().clone();
        match refresh_outcome(&expired.refresh_token, current.as_ref(), refreshed) {
            RefreshOutcome::Store(fresh) => {
                self.set_session(AuthEvent::TokenRefreshed, Some(fresh.clone()));
                Ok(Some(fresh))
            }
            RefreshOutcome::Superseded => Ok(current),
            RefreshOutcome::SignOut(e) => {
                log::warn!("⚠️ Refresh token rejected, dropping session: {}", e);
                self.set_session(AuthEvent::SignedOut, None);
                Ok(None)
            }
            RefreshOutcome::Keep(e) => {
                log::error!("❌ Token refresh failed, keeping session: {}", e);
                Err(e)
            }
        }
    }

    async fn token_grant(&self, grant_type: &str, body: &Value) -> Result<Session> {
        let url = format!("{}?grant_type={}", self.auth_url("token"), grant_type);

        let response = Request::post(&url)
            .header("apikey", &self.anon_key)
            .json(body)?
            .send()
            .await?;

        if !response.ok() {
            return Err(match response.status() {
                400 | 401 | 422 => {
                    let body = response.text().await.unwrap_or_default();
                    PortalError::Auth(
                        error_message(&body)
                            .unwrap_or_else(|| "Invalid login credentials".to_string()),
                    )
                }
                _ => http_error(response).await,
            });
        }

        let session = response.json::<Session>().await?;
        Ok(session.stamped(now()))
    }
}

#[async_trait(?Send)]
impl Backend for SupabaseClient {
    async fn get_session(&self) -> Result<Option<Session>> {
        self.ensure_fresh_session().await
    }

    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthChange)>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let session = self
            .token_grant("password", &json!({ "email": email, "password": password }))
            .await?;

        log::info!("✅ Signed in as {}", session.user.id);
        self.set_session(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let token = self.session.borrow().as_ref().map(|s| s.access_token.clone());

        let revoked = match token {
            Some(token) => {
                let sent = Request::post(&self.auth_url("logout"))
                    .header("apikey", &self.anon_key)
                    .header("Authorization", &format!("Bearer {}", token))
                    .send()
                    .await;
                match sent {
                    Ok(response) if response.ok() => Ok(()),
                    Ok(response) => Err(http_error(response).await),
                    Err(e) => Err(PortalError::from(e)),
                }
            }
            None => Ok(()),
        };

        // Local session goes away even when the revoke failed
        self.set_session(AuthEvent::SignedOut, None);
        revoked
    }

    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        self.ensure_fresh_session().await?;
        let builder = Request::get(&self.rest_url(query.table_name())).query([("select", "*")]);
        let response = self.table_request(builder, query).send().await?;
        rows(response).await
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>> {
        self.ensure_fresh_session().await?;
        let builder = Request::patch(&self.rest_url(query.table_name()))
            .header("Prefer", "return=representation");
        let response = self.table_request(builder, query).json(&patch)?.send().await?;
        rows(response).await
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Value>> {
        self.ensure_fresh_session().await?;
        let builder = Request::delete(&self.rest_url(query.table_name()))
            .header("Prefer", "return=representation");
        let response = self.table_request(builder, query).send().await?;
        rows(response).await
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// The stored session when its access token needs a refresh
fn due_for_refresh(current: Option<Session>, now: i64) -> Option<Session> {
    current.filter(|session| session.is_expired(now))
}

/// What to do with the stored session once a refresh attempt resolved
#[derive(Debug, PartialEq)]
enum RefreshOutcome {
    Store(Session),
    /// Another refresh or a sign-out replaced the session meanwhile
    Superseded,
    SignOut(PortalError),
    Keep(PortalError),
}

fn refresh_outcome(
    used_token: &str,
    current: Option<&Session>,
    refreshed: Result<Session>,
) -> RefreshOutcome {
    if current.map(|session| session.refresh_token.as_str()) != Some(used_token) {
        return RefreshOutcome::Superseded;
    }
    match refreshed {
        Ok(fresh) => RefreshOutcome::Store(fresh),
        Err(e @ PortalError::Auth(_)) => RefreshOutcome::SignOut(e),
        Err(e) => RefreshOutcome::Keep(e),
    }
}

async fn rows(response: Response) -> Result<Vec<Value>> {
    if !response.ok() {
        return Err(http_error(response).await);
    }
    Ok(response.json::<Vec<Value>>().await?)
}

async fn http_error(response: Response) -> PortalError {
    let status = response.status();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();
    PortalError::Http {
        status,
        message: error_message(&body).unwrap_or(status_text),
    }
}

/// Human-readable message from a GoTrue or PostgREST error body
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
