// ============================================================================
// SESSION MANAGER - Who is logged in, and what backend data that implies
// ============================================================================
// Phases: Unauthenticated -> ProfilePending -> TeamPending -> Ready
//         (any fetch error -> Failed, any session loss -> Unauthenticated)
//
// Every session change bumps `generation`. Fetch results resolving for an
// older generation, or after the manager was unmounted, are dropped.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::task::{LocalSpawn, LocalSpawnExt};
use serde_json::{json, Value};

use crate::error::{PortalError, Result};
use crate::models::{AuthChange, Product, Session, User};
use crate::services::backend::{Backend, Query};
use crate::state::reactivity::{Listeners, Subscription};
use crate::utils::{
    load_json, save_json, KeyValueStore, TABLE_INVENTORY, TABLE_SHIFTS, TABLE_USERS,
    USER_CACHE_KEY,
};

/// Step of the profile/team chain that failed
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FetchStage {
    Profile,
    Team,
}

/// Progress of session resolution
#[derive(Clone, PartialEq, Debug, Default)]
pub enum AuthPhase {
    #[default]
    Unauthenticated,
    ProfilePending,
    TeamPending,
    Ready,
    /// Terminal until the next session change or `refresh()`
    Failed { stage: FetchStage, message: String },
}

/// Read-only view of the manager state handed to the UI
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub team: Vec<User>,
    pub phase: AuthPhase,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn is_cleared(&self) -> bool {
        self.session.is_none()
            && self.user.is_none()
            && self.team.is_empty()
            && self.phase == AuthPhase::Unauthenticated
    }
}

struct Shared {
    backend: Rc<dyn Backend>,
    store: Rc<dyn KeyValueStore>,
    spawner: Rc<dyn LocalSpawn>,
    state: RefCell<SessionSnapshot>,
    generation: Cell<u64>,
    disposed: Cell<bool>,
    changes: Listeners<()>,
}

impl Shared {
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        if let Err(e) = self.spawner.spawn_local(task) {
            log::error!("❌ Could not spawn session task: {:?}", e);
        }
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.disposed.get() && self.generation.get() == generation
    }

    /// Mutate state, then notify listeners once the borrow is released
    fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut SessionSnapshot),
    {
        mutate(&mut self.state.borrow_mut());
        self.changes.emit(&());
    }

    /// Drop session, user, team and the cached user; no-op when already clear
    fn reset(&self) {
        let was_cleared = self.state.borrow().is_cleared();
        if self.store.get(USER_CACHE_KEY).is_some() {
            if let Err(e) = self.store.remove(USER_CACHE_KEY) {
                log::error!("❌ Could not clear cached user: {}", e);
            }
        }
        if !was_cleared {
            self.update(|state| *state = SessionSnapshot::default());
        }
    }

    fn fail(&self, stage: FetchStage, error: &PortalError) {
        let message = error.to_string();
        self.update(|state| state.phase = AuthPhase::Failed { stage, message });
    }

    /// Entry point for every session change, eager or notified
    fn apply_session(this: &Rc<Self>, session: Option<Session>) {
        let generation = this.next_generation();

        match session {
            Some(session) => {
                let user_id = session.user.id.trim().to_string();
                this.update(|state| {
                    // A different account must not inherit the previous roster
                    if state.user.as_ref().is_some_and(|user| user.id != user_id) {
                        state.user = None;
                        state.team.clear();
                    }
                    state.session = Some(session);
                    state.phase = AuthPhase::ProfilePending;
                });
                this.spawn(load_profile(Rc::downgrade(this), generation, user_id));
            }
            None => {
                log::info!("👋 Session ended, clearing user and team");
                this.reset();
            }
        }
    }
}

/// Fetch the user row, then the branch roster; each step checks the generation
async fn load_profile(shared: Weak<Shared>, generation: u64, user_id: String) {
    let Some(backend) = shared.upgrade().map(|s| s.backend.clone()) else {
        return;
    };

    let profile = backend
        .select_single(&Query::table(TABLE_USERS).eq("id", &user_id))
        .await
        .and_then(|row| serde_json::from_value::<User>(row).map_err(PortalError::from));

    let Some(this) = shared.upgrade() else { return };
    if !this.is_current(generation) {
        log::debug!("⏭️ Discarding stale profile for {}", user_id);
        return;
    }

    let user = match profile {
        Ok(user) => user,
        Err(e) => {
            log::error!("❌ Error fetching user details: {}", e);
            this.fail(FetchStage::Profile, &e);
            return;
        }
    };

    if let Err(e) = save_json(this.store.as_ref(), USER_CACHE_KEY, &user) {
        log::error!("❌ Could not cache user: {}", e);
    }
    let branch_id = user.branch_id.clone();
    this.update(|state| {
        state.user = Some(user);
        state.phase = AuthPhase::TeamPending;
    });
    drop(this);

    let team = backend
        .select(&Query::table(TABLE_USERS).eq("branch_id", &branch_id))
        .await
        .and_then(|rows| {
            serde_json::from_value::<Vec<User>>(Value::Array(rows)).map_err(PortalError::from)
        });

    let Some(this) = shared.upgrade() else { return };
    if !this.is_current(generation) {
        log::debug!("⏭️ Discarding stale team for branch {}", branch_id);
        return;
    }

    match team {
        Ok(team) => {
            log::info!("✅ Team loaded: {} members in branch {}", team.len(), branch_id);
            this.update(|state| {
                state.team = team;
                state.phase = AuthPhase::Ready;
            });
        }
        Err(e) => {
            log::error!("❌ Error fetching branch details: {}", e);
            this.fail(FetchStage::Team, &e);
        }
    }
}

/// Keeps the manager wired to the backend; dropping it unmounts
#[must_use = "dropping the guard unmounts the session manager"]
pub struct MountGuard {
    shared: Weak<Shared>,
    _auth_changes: Subscription,
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.disposed.set(true);
            shared.next_generation();
            log::debug!("🔌 Session manager unmounted");
        }
    }
}

/// Session/authorization context shared by the UI
#[derive(Clone)]
pub struct SessionManager {
    shared: Rc<Shared>,
}

impl PartialEq for SessionManager {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl SessionManager {
    /// Build the manager; the cached user (if any) is visible immediately
    pub fn new(
        backend: Rc<dyn Backend>,
        store: Rc<dyn KeyValueStore>,
        spawner: Rc<dyn LocalSpawn>,
    ) -> Self {
        let user = load_json::<User>(store.as_ref(), USER_CACHE_KEY);

        Self {
            shared: Rc::new(Shared {
                backend,
                store,
                spawner,
                state: RefCell::new(SessionSnapshot {
                    user,
                    ..SessionSnapshot::default()
                }),
                generation: Cell::new(0),
                disposed: Cell::new(false),
                changes: Listeners::new(),
            }),
        }
    }

    /// Request the current session once and follow session changes
    pub fn mount(&self) -> MountGuard {
        self.shared.disposed.set(false);

        let weak = Rc::downgrade(&self.shared);
        let auth_changes = self
            .shared
            .backend
            .on_auth_state_change(Box::new(move |change: &AuthChange| {
                if let Some(shared) = weak.upgrade() {
                    log::info!("🔐 Auth state change: {:?}", change.event);
                    Shared::apply_session(&shared, change.session.clone());
                }
            }));

        // Covers page reloads, where no change notification fires
        let generation = self.shared.generation.get();
        let weak = Rc::downgrade(&self.shared);
        let backend = self.shared.backend.clone();
        self.shared.spawn(async move {
            let current = backend.get_session().await;
            let Some(shared) = weak.upgrade() else { return };
            if !shared.is_current(generation) {
                log::debug!("⏭️ Session changed while restoring, ignoring restored session");
                return;
            }
            match current {
                Ok(session) => Shared::apply_session(&shared, session),
                Err(e) => log::error!("❌ Error restoring session: {}", e),
            }
        });

        MountGuard {
            shared: Rc::downgrade(&self.shared),
            _auth_changes: auth_changes,
        }
    }

    /// Notified after every state change
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.shared.changes.subscribe(move |_| listener())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.state.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.shared.state.borrow().session.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.shared.state.borrow().user.clone()
    }

    pub fn team(&self) -> Vec<User> {
        self.shared.state.borrow().team.clone()
    }

    pub fn phase(&self) -> AuthPhase {
        self.shared.state.borrow().phase.clone()
    }

    /// Password sign-in; state is filled in by the resulting session change,
    /// not by the time this returns
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        log::info!("🔐 Signing in {}", email);
        match self
            .shared
            .backend
            .sign_in_with_password(email, password)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("❌ Login failed: {}", e);
                Err(e)
            }
        }
    }

    /// Revoke the session remotely (best effort), then clear local state
    pub async fn logout(&self) -> Result<()> {
        log::info!("👋 Logout");
        let revoked = self.shared.backend.sign_out().await;
        if let Err(e) = &revoked {
            log::warn!("⚠️ Session revoke failed, clearing locally anyway: {}", e);
        }

        self.shared.next_generation();
        self.shared.reset();
        revoked
    }

    /// Re-run the profile/team chain for the current session
    pub fn refresh(&self) {
        let session = self.session();
        if session.is_none() {
            log::warn!("⚠️ Refresh requested without a session");
            return;
        }
        Shared::apply_session(&self.shared, session);
    }

    /// Set `shift` for one user on one day
    pub async fn set_team_shift(&self, user_id: &str, day: &str, new_shift: &str) -> Result<()> {
        let query = Query::table(TABLE_SHIFTS).eq("user_id", user_id).eq("day", day);

        match self
            .shared
            .backend
            .update(&query, json!({ "shift": new_shift }))
            .await
        {
            Ok(rows) => {
                log::info!("✅ Shift updated for {} on {}: {} row(s)", user_id, day, rows.len());
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Error updating shift: {}", e);
                Err(e)
            }
        }
    }

    /// Delete an inventory item; any failure surfaces as `InventoryNotDeleted`
    pub async fn delete_inventory(&self, id: i64) -> Result<()> {
        let query = Query::table(TABLE_INVENTORY).eq("id", id);

        match self.shared.backend.delete(&query).await {
            Ok(rows) if !rows.is_empty() => {
                log::info!("🗑️ Inventory item {} deleted", id);
                Ok(())
            }
            Ok(_) => {
                log::error!("❌ Inventory item {} not found", id);
                Err(PortalError::InventoryNotDeleted(id))
            }
            Err(e) => {
                log::error!("❌ Error deleting inventory item {}: {}", id, e);
                Err(PortalError::InventoryNotDeleted(id))
            }
        }
    }

    /// Every inventory row of the signed-in user's branch; empty when the
    /// user or branch is unknown, or when the backend fails
    pub async fn fetch_inventory(&self) -> Vec<Product> {
        let branch_id = match self.user() {
            Some(user) if user.has_branch() => user.branch_id,
            _ => {
                log::error!("❌ No user or branch id available for inventory");
                return Vec::new();
            }
        };

        let rows = match self
            .shared
            .backend
            .select(&Query::table(TABLE_INVENTORY).eq("branch_id", &branch_id))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("❌ Error fetching inventory: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_value::<Vec<Product>>(Value::Array(rows)) {
            Ok(products) => products,
            Err(e) => {
                log::error!("❌ Unreadable inventory rows: {}", e);
                Vec::new()
            }
        }
    }
}
