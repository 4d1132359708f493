//! In-memory stand-ins for the browser and the backend, used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::{json, Value};

use crate::error::{PortalError, Result};
use crate::models::{AuthChange, AuthEvent, AuthUser, Session};
use crate::services::backend::{Backend, Query};
use crate::services::navigation::Navigator;
use crate::state::reactivity::{Listeners, Subscription};
use crate::utils::{KeyValueStore, TimerHost};

pub fn session_for(user_id: &str) -> Session {
    Session {
        access_token: format!("access-{}", user_id),
        refresh_token: format!("refresh-{}", user_id),
        token_type: "bearer".to_string(),
        expires_in: 3600,
        expires_at: None,
        user: AuthUser {
            id: user_id.to_string(),
            email: None,
        },
    }
}

pub fn user_row(id: &str, branch_id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "branch_id": branch_id,
        "name": name,
        "title": "Personel",
        "avatar_url": "",
        "break": false
    })
}

pub fn product_row(id: i64, branch_id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "branch_id": branch_id,
        "name": name,
        "image_url": "",
        "quantity": 10,
        "expiry_date": "2025-01-31"
    })
}

// ----------------------------------------------------------------------------
// Key/value store
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    removals: RefCell<HashMap<String, usize>>,
}

impl MemoryStore {
    /// Removals that actually deleted an entry
    pub fn removals(&self, key: &str) -> usize {
        self.removals.borrow().get(key).copied().unwrap_or(0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.entries.borrow_mut().remove(key).is_some() {
            *self.removals.borrow_mut().entry(key.to_string()).or_insert(0) += 1;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Backend
// ----------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeBackend {
    accounts: RefCell<HashMap<String, (String, String)>>,
    session: RefCell<Option<Session>>,
    tables: RefCell<HashMap<String, Vec<Value>>>,
    failing: RefCell<Vec<(String, Option<String>)>>,
    fail_sign_out: Cell<bool>,
    gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    session_gate: RefCell<Option<oneshot::Receiver<()>>>,
    listeners: Listeners<AuthChange>,
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn add_account(&self, email: &str, password: &str, user_id: &str) {
        self.accounts
            .borrow_mut()
            .insert(email.to_string(), (password.to_string(), user_id.to_string()));
    }

    pub fn insert(&self, table: &str, row: Value) {
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.borrow().get(table).cloned().unwrap_or_default()
    }

    /// Make every query on `table` fail, or only those filtering on `column`
    pub fn fail_queries(&self, table: &str, column: Option<&str>) {
        self.failing
            .borrow_mut()
            .push((table.to_string(), column.map(str::to_string)));
    }

    pub fn heal(&self) {
        self.failing.borrow_mut().clear();
    }

    pub fn fail_sign_out(&self) {
        self.fail_sign_out.set(true);
    }

    /// Session the backend already holds, as after a page reload
    pub fn restore_session(&self, session: Session) {
        *self.session.borrow_mut() = Some(session);
    }

    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        *self.session.borrow_mut() = session.clone();
        self.listeners.emit(&AuthChange::new(event, session));
    }

    /// Hold the next select until the returned sender fires
    pub fn gate_next_select(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.borrow_mut().push_back(gate);
        release
    }

    /// Hold the next `get_session` answer; it still reports the session
    /// current at call time, like a request already in flight
    pub fn gate_get_session(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.session_gate.borrow_mut() = Some(gate);
        release
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn check(&self, query: &Query) -> Result<()> {
        let failing = self.failing.borrow().iter().any(|(table, column)| {
            table == query.table_name()
                && column.as_ref().map_or(true, |column| {
                    query.filters().iter().any(|(filtered, _)| filtered == column)
                })
        });
        if failing {
            return Err(PortalError::Http {
                status: 500,
                message: format!("{} unavailable", query.table_name()),
            });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn get_session(&self) -> Result<Option<Session>> {
        let current = self.session.borrow().clone();
        let gate = self.session_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(current)
    }

    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthChange)>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let user_id = match self.accounts.borrow().get(email) {
            Some((expected, user_id)) if expected == password => user_id.clone(),
            _ => return Err(PortalError::Auth("Invalid login credentials".to_string())),
        };
        let session = session_for(&user_id);
        self.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        if self.fail_sign_out.get() {
            return Err(PortalError::Network("connection reset".to_string()));
        }
        self.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    async fn select(&self, query: &Query) -> Result<Vec<Value>> {
        let gate = self.gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.check(query)?;

        Ok(self
            .rows(query.table_name())
            .into_iter()
            .filter(|row| query.matches(row))
            .collect())
    }

    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>> {
        self.check(query)?;

        let mut tables = self.tables.borrow_mut();
        let mut updated = Vec::new();
        for row in tables.entry(query.table_name().to_string()).or_default() {
            if !query.matches(row) {
                continue;
            }
            if let (Some(row), Some(patch)) = (row.as_object_mut(), patch.as_object()) {
                for (column, value) in patch {
                    row.insert(column.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Value>> {
        self.check(query)?;

        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(query.table_name().to_string()).or_default();
        let (deleted, kept): (Vec<Value>, Vec<Value>) =
            rows.drain(..).partition(|row| query.matches(row));
        *rows = kept;
        Ok(deleted)
    }
}

// ----------------------------------------------------------------------------
// Timers + navigation
// ----------------------------------------------------------------------------

struct PendingTimer {
    due_ms: u64,
    cancelled: Rc<Cell<bool>>,
    callback: Box<dyn FnOnce()>,
}

/// Virtual clock; timers fire only from `advance`
#[derive(Default)]
pub struct ManualTimers {
    now_ms: Cell<u64>,
    pending: RefCell<Vec<PendingTimer>>,
}

pub struct ManualTimeout {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTimeout {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualTimers {
    pub fn advance(&self, ms: u64) {
        let now = self.now_ms.get() + ms;
        self.now_ms.set(now);

        let due: Vec<PendingTimer> = {
            let mut pending = self.pending.borrow_mut();
            let (due, waiting): (Vec<PendingTimer>, Vec<PendingTimer>) =
                pending.drain(..).partition(|timer| timer.due_ms <= now);
            *pending = waiting;
            due
        };
        for timer in due {
            if !timer.cancelled.get() {
                (timer.callback)();
            }
        }
    }
}

impl TimerHost for ManualTimers {
    type Handle = ManualTimeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> ManualTimeout {
        let cancelled = Rc::new(Cell::new(false));
        self.pending.borrow_mut().push(PendingTimer {
            due_ms: self.now_ms.get() + u64::from(delay_ms),
            cancelled: cancelled.clone(),
            callback,
        });
        ManualTimeout { cancelled }
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.borrow_mut().push(path.to_string());
    }
}
