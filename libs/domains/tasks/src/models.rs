use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Minimum length of a trimmed title, in characters.
pub const MIN_TITLE_LEN: usize = 3;

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Store-generated identifier, opaque to clients
    #[schema(example = "65f1c0ffee0123456789abcd")]
    pub id: String,
    /// Title as submitted
    #[schema(example = "Buy milk")]
    pub title: String,
    pub completed: bool,
}

/// Request body for `POST /tasks`.
///
/// A missing or `null` title is read as `""` so it fails validation with a
/// field error instead of a deserialization error. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_title"))]
    #[schema(example = "Buy milk", min_length = 3)]
    pub title: String,
}

impl CreateTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Partial update applied by a repository. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTask {
    pub completed: Option<bool>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().chars().count() < MIN_TITLE_LEN {
        let mut err = ValidationError::new("title_too_short");
        err.message = Some(Cow::Borrowed(
            "Title must be at least 3 characters after trimming",
        ));
        err.add_param(Cow::Borrowed("min"), &MIN_TITLE_LEN);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> CreateTask {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_title_rule_counts_trimmed_chars() {
        assert!(CreateTask::new("Buy milk").validate().is_ok());
        assert!(CreateTask::new("abc").validate().is_ok());
        assert!(CreateTask::new("  ab  ").validate().is_err());
        assert!(CreateTask::new("   ").validate().is_err());
        // three scalar values, more than three bytes
        assert!(CreateTask::new("äöü").validate().is_ok());
    }

    #[test]
    fn test_validation_error_code() {
        let errors = CreateTask::new("ab").validate().unwrap_err();
        let field = &errors.field_errors()["title"];
        assert_eq!(field[0].code, "title_too_short");
    }

    #[test]
    fn test_missing_and_null_title_become_empty() {
        assert_eq!(parse(json!({})).title, "");
        assert_eq!(parse(json!({ "title": null })).title, "");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let input = parse(json!({ "title": "Walk dog", "completed": true }));
        assert_eq!(input.title, "Walk dog");
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task {
            id: "1".into(),
            title: "Buy milk".into(),
            completed: false,
        };
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({ "id": "1", "title": "Buy milk", "completed": false })
        );
    }
}
