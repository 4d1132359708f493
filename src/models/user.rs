use serde::{Deserialize, Serialize};

/// Staff member row from the `users` table
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: String,
    pub branch_id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(rename = "break", default)]
    pub on_break: bool,
}

impl User {
    /// A user without a branch cannot resolve team or inventory scope
    pub fn has_branch(&self) -> bool {
        !self.branch_id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_column_maps_to_on_break() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "branch_id": "b-1",
            "name": "Ayşe",
            "title": "Kasiyer",
            "avatar_url": "https://cdn.example/a.png",
            "break": true
        }))
        .unwrap();

        assert!(user.on_break);
        assert_eq!(serde_json::to_value(&user).unwrap()["break"], true);
    }

    #[test]
    fn test_missing_optional_columns_default() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-2",
            "branch_id": " ",
            "name": "Mehmet"
        }))
        .unwrap();

        assert_eq!(user.title, "");
        assert!(!user.on_break);
        assert!(!user.has_branch());
    }
}
