// ============================================================================
// BACKEND - Auth + table access consumed by the session manager
// ============================================================================
// Browser: `SupabaseClient`. Tests: in-memory fake.
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{PortalError, Result};
use crate::models::{AuthChange, Session};
use crate::state::reactivity::Subscription;

/// Table query with equality filters only
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    filters: Vec<(String, String)>,
}

impl Query {
    pub fn table(name: &str) -> Self {
        Self {
            table: name.to_string(),
            filters: Vec::new(),
        }
    }

    /// Add `column = value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// PostgREST query-string pairs (`column=eq.value`)
    pub fn to_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{}", value)))
            .collect()
    }

    /// Whether a JSON row satisfies every filter
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|(column, expected)| {
            match row.get(column) {
                Some(Value::String(s)) => s == expected,
                Some(Value::Null) | None => false,
                Some(other) => other.to_string() == *expected,
            }
        })
    }
}

/// Remote auth + data service
#[async_trait(?Send)]
pub trait Backend {
    /// Current session, restored from persistence when the page reloads
    async fn get_session(&self) -> Result<Option<Session>>;

    /// Listen to session changes until the subscription is dropped
    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthChange)>) -> Subscription;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    async fn sign_out(&self) -> Result<()>;

    async fn select(&self, query: &Query) -> Result<Vec<Value>>;

    /// Select that fails unless exactly one row matches
    async fn select_single(&self, query: &Query) -> Result<Value> {
        let mut rows = self.select(query).await?;
        if rows.len() != 1 {
            return Err(PortalError::NotSingleRow(rows.len()));
        }
        Ok(rows.remove(0))
    }

    /// Patch matching rows, returning them after the update
    async fn update(&self, query: &Query, patch: Value) -> Result<Vec<Value>>;

    /// Delete matching rows, returning the deleted rows
    async fn delete(&self, query: &Query) -> Result<Vec<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_use_postgrest_eq() {
        let query = Query::table("shifts").eq("user_id", "u-1").eq("day", "monday");

        assert_eq!(query.table_name(), "shifts");
        assert_eq!(
            query.to_params(),
            vec![
                ("user_id".to_string(), "eq.u-1".to_string()),
                ("day".to_string(), "eq.monday".to_string()),
            ]
        );
    }

    #[test]
    fn test_matches_strings_and_numbers() {
        let row = json!({"id": 42, "branch_id": "b-1", "note": null});

        assert!(Query::table("inventory").eq("id", 42).matches(&row));
        assert!(Query::table("inventory").eq("branch_id", "b-1").eq("id", 42).matches(&row));
        assert!(!Query::table("inventory").eq("id", 43).matches(&row));
        assert!(!Query::table("inventory").eq("note", "null").matches(&row));
        assert!(!Query::table("inventory").eq("missing", "x").matches(&row));
    }
}
