//! Import validation
//!
//! Checks that an untrusted, already-decoded JSON value has the shape of a
//! registry before it is merged. Only types are checked: a negative font
//! size or a malformed color token is accepted.

use serde_json::{Map, Value};
use thiserror::Error;

/// JSON type names used in validation messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    String,
    Number,
    Object,
    StringOrAbsent,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Expected::String => "a string",
            Expected::Number => "a number",
            Expected::Object => "an object",
            Expected::StringOrAbsent => "a string or absent",
        };
        write!(f, "{}", name)
    }
}

/// The first shape violation found in an import
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: field '{field}' must be {expected}", record_label(.id))]
pub struct ValidationError {
    /// Id of the offending record, `None` when the top level is wrong
    pub id: Option<String>,
    /// Dotted path of the offending field within the record
    pub field: String,
    pub expected: Expected,
}

fn record_label(id: &Option<String>) -> String {
    match id {
        Some(id) => format!("record '{}'", id),
        None => "import".to_string(),
    }
}

const RECORD_STRINGS: [&str; 3] = ["name", "content", "styleSheet"];
const STYLE_NUMBERS: [&str; 5] = [
    "fontSize",
    "lineHeight",
    "marginH",
    "marginV",
    "paragraphSpace",
];
const STYLE_STRINGS: [&str; 2] = ["paper", "themeColor"];
const STYLE_FONTS: [&str; 2] = ["fontCJK", "fontEN"];

/// Validate a decoded value as a registry
///
/// The value must be an object whose every entry is a well-typed
/// document record. Stops at the first violation.
pub fn validate_registry(value: &Value) -> Result<(), ValidationError> {
    let Some(records) = value.as_object() else {
        return Err(ValidationError {
            id: None,
            field: "<root>".to_string(),
            expected: Expected::Object,
        });
    };

    for (id, record) in records {
        validate_record(record).map_err(|(field, expected)| ValidationError {
            id: Some(id.clone()),
            field,
            expected,
        })?;
    }

    Ok(())
}

type FieldError = (String, Expected);

fn validate_record(record: &Value) -> Result<(), FieldError> {
    let Some(record) = record.as_object() else {
        return Err(("<record>".to_string(), Expected::Object));
    };

    for field in RECORD_STRINGS {
        require(record, field, "", Value::is_string, Expected::String)?;
    }

    let styles = require_object(record, "styles", "")?;

    match record.get("updatedAt") {
        None | Some(Value::String(_)) => {}
        Some(_) => return Err(("updatedAt".to_string(), Expected::StringOrAbsent)),
    }

    for field in STYLE_NUMBERS {
        require(styles, field, "styles.", Value::is_number, Expected::Number)?;
    }
    for field in STYLE_STRINGS {
        require(styles, field, "styles.", Value::is_string, Expected::String)?;
    }
    for field in STYLE_FONTS {
        let font = require_object(styles, field, "styles.")?;
        let prefix = format!("styles.{}.", field);
        require(font, "name", &prefix, Value::is_string, Expected::String)?;
    }

    Ok(())
}

fn require(
    object: &Map<String, Value>,
    field: &str,
    prefix: &str,
    check: fn(&Value) -> bool,
    expected: Expected,
) -> Result<(), FieldError> {
    match object.get(field) {
        Some(value) if check(value) => Ok(()),
        _ => Err((format!("{}{}", prefix, field), expected)),
    }
}

fn require_object<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    prefix: &str,
) -> Result<&'a Map<String, Value>, FieldError> {
    object
        .get(field)
        .and_then(Value::as_object)
        .ok_or_else(|| (format!("{}{}", prefix, field), Expected::Object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> Value {
        json!({
            "name": "Resume",
            "content": "# Hi",
            "styleSheet": "h1 { color: red; }",
            "styles": {
                "fontSize": 15,
                "lineHeight": 1.3,
                "marginH": 45,
                "marginV": 45,
                "paragraphSpace": 5,
                "paper": "A4",
                "themeColor": "#377bb5",
                "fontCJK": { "name": "华康宋体", "fontFamily": "HKST" },
                "fontEN": { "name": "Minion Pro" }
            },
            "updatedAt": "1700000000000"
        })
    }

    fn field_error(value: &Value) -> (String, Expected) {
        let err = validate_registry(value).unwrap_err();
        (err.field, err.expected)
    }

    #[test]
    fn test_valid_registry() {
        let value = json!({ "1": valid_record(), "2": valid_record() });
        assert!(validate_registry(&value).is_ok());
    }

    #[test]
    fn test_empty_object_is_valid() {
        assert!(validate_registry(&json!({})).is_ok());
    }

    #[test]
    fn test_updated_at_may_be_absent() {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove("updatedAt");
        assert!(validate_registry(&json!({ "1": record })).is_ok());
    }

    #[test]
    fn test_updated_at_must_not_be_null_or_number() {
        let mut record = valid_record();
        record["updatedAt"] = Value::Null;
        assert_eq!(
            field_error(&json!({ "1": record.clone() })),
            ("updatedAt".to_string(), Expected::StringOrAbsent)
        );

        record["updatedAt"] = json!(1700000000000u64);
        assert_eq!(
            field_error(&json!({ "1": record })).1,
            Expected::StringOrAbsent
        );
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = validate_registry(&json!([valid_record()])).unwrap_err();
        assert!(err.id.is_none());
        assert_eq!(err.expected, Expected::Object);

        assert!(validate_registry(&Value::Null).is_err());
    }

    #[test]
    fn test_font_size_as_string_rejected() {
        let mut record = valid_record();
        record["styles"]["fontSize"] = json!("15");

        let err = validate_registry(&json!({ "1": valid_record(), "2": record })).unwrap_err();
        assert_eq!(err.id.as_deref(), Some("2"));
        assert_eq!(err.field, "styles.fontSize");
        assert_eq!(err.expected, Expected::Number);
    }

    #[test]
    fn test_missing_record_string() {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove("styleSheet");
        assert_eq!(
            field_error(&json!({ "1": record })),
            ("styleSheet".to_string(), Expected::String)
        );
    }

    #[test]
    fn test_styles_must_be_object() {
        let mut record = valid_record();
        record["styles"] = json!("big");
        assert_eq!(
            field_error(&json!({ "1": record })),
            ("styles".to_string(), Expected::Object)
        );
    }

    #[test]
    fn test_font_name_must_be_string() {
        let mut record = valid_record();
        record["styles"]["fontEN"]["name"] = json!(12);
        assert_eq!(
            field_error(&json!({ "1": record })),
            ("styles.fontEN.name".to_string(), Expected::String)
        );

        let mut record = valid_record();
        record["styles"]["fontCJK"] = json!("Song");
        assert_eq!(
            field_error(&json!({ "1": record })),
            ("styles.fontCJK".to_string(), Expected::Object)
        );
    }

    #[test]
    fn test_record_must_be_object() {
        assert_eq!(
            field_error(&json!({ "1": "resume" })),
            ("<record>".to_string(), Expected::Object)
        );
    }

    #[test]
    fn test_semantic_values_not_checked() {
        let mut record = valid_record();
        record["styles"]["fontSize"] = json!(-3);
        record["styles"]["themeColor"] = json!("not a color");
        record["styles"]["paper"] = json!("");
        assert!(validate_registry(&json!({ "1": record })).is_ok());
    }

    #[test]
    fn test_error_display() {
        let mut record = valid_record();
        record["styles"]["marginV"] = json!(true);
        let err = validate_registry(&json!({ "42": record })).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("record '42'"));
        assert!(msg.contains("styles.marginV"));
        assert!(msg.contains("a number"));
    }
}
