//! User types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Numeric-looking id, assigned sequentially from "1".
    #[schema(example = "14")]
    pub id: String,
    /// Display name.
    #[schema(example = "Zoe")]
    pub name: String,
    /// Age in whole years. Absent when the user was added without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 30)]
    pub age: Option<i64>,
}

impl User {
    /// Create a user record with a known age.
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: Some(age),
        }
    }

    /// Numeric value of the id, used for ordering. Non-numeric ids sort last.
    pub fn numeric_id(&self) -> u64 {
        self.id.parse().unwrap_or(u64::MAX)
    }

    /// Overwrite every field present in the patch.
    ///
    /// The id is not part of [`UserPatch`], so a record always keeps the id
    /// it is stored under.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
    }
}

/// Partial update for a user. Keys other than `name` and `age`, including
/// `id`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct UserPatch {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New age.
    #[serde(default)]
    pub age: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_ignores_unknown_keys() {
        let patch: UserPatch =
            serde_json::from_value(json!({"age": 99, "favourite_colour": "green"})).unwrap();
        assert_eq!(patch.age, Some(99));
        assert_eq!(patch.name, None);
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut user = User::new("9", "Charles", 34);
        user.apply(UserPatch {
            name: None,
            age: Some(99),
        });
        assert_eq!(user, User::new("9", "Charles", 99));
    }

    #[test]
    fn missing_age_is_omitted_from_json() {
        let user = User {
            id: "14".to_string(),
            name: "Zoe".to_string(),
            age: None,
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"id": "14", "name": "Zoe"})
        );
    }

    #[test]
    fn numeric_id_orders_numerically() {
        assert!(User::new("2", "a", 1).numeric_id() < User::new("10", "b", 1).numeric_id());
        assert_eq!(User::new("x", "c", 1).numeric_id(), u64::MAX);
    }
}
