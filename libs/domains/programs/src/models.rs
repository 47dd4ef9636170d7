use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A program row as the hosted store returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Program {
    pub id: Uuid,
    #[schema(example = "Spring cohort")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Program {
    pub const TABLE: &'static str = "programs";
    pub const TAG: &'static str = "programs";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_postgrest_row() {
        let program: Program = serde_json::from_value(serde_json::json!({
            "id": "0b5f3c1e-7d6a-4b8e-9a53-1f2f0b6d8c11",
            "title": "Spring cohort",
            "description": null,
            "is_active": true,
            "created_at": "2024-03-01T10:15:30.123456+00:00",
            "extra_column": 1
        }))
        .unwrap();

        assert_eq!(program.title, "Spring cohort");
        assert!(program.description.is_none());
        assert!(program.is_active);
    }
}
