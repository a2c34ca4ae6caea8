//! The logic tree schema:
//!
//! ```text
//! node := { condition?: string, action?: string,
//!           then?: node | [node], else?: node }   (no other keys)
//! ```

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.path)
    }
}

/// Check `value` against the node schema, stopping at the first violation.
pub fn check_schema(value: &Value, path: &str) -> Result<(), SchemaViolation> {
    let Value::Object(fields) = value else {
        return Err(SchemaViolation {
            path: path.to_string(),
            message: format!("{} is not of type 'object'", type_name(value)),
        });
    };

    for (key, field) in fields {
        match key.as_str() {
            "condition" | "action" => {
                if !field.is_string() {
                    return Err(SchemaViolation {
                        path: format!("{path}.{key}"),
                        message: format!("{} is not of type 'string'", type_name(field)),
                    });
                }
            }
            "then" => match field {
                Value::Array(children) => {
                    for (i, child) in children.iter().enumerate() {
                        check_schema(child, &format!("{path}.then[{i}]"))?;
                    }
                }
                child => check_schema(child, &format!("{path}.then"))?,
            },
            "else" => check_schema(field, &format!("{path}.else"))?,
            other => {
                return Err(SchemaViolation {
                    path: path.to_string(),
                    message: format!("additional property '{other}' is not allowed"),
                });
            }
        }
    }

    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_all_node_shapes() {
        let value = json!({
            "condition": "If approved",
            "then": [
                {"condition": "If paid", "action": "Close"},
                {"condition": "If pending", "then": {"action": "Wait"}}
            ],
            "else": {"action": "Deny"}
        });
        assert_eq!(check_schema(&value, "root"), Ok(()));
        assert_eq!(check_schema(&json!({}), "root"), Ok(()));
    }

    #[test]
    fn rejects_non_object_root() {
        let err = check_schema(&json!([{"action": "Go"}]), "root").unwrap_err();
        assert_eq!(err.path, "root");
        assert!(err.message.contains("array"));
    }

    #[test]
    fn rejects_unknown_keys_deep_in_tree() {
        let value = json!({
            "condition": "If a",
            "then": [{"action": "Go"}, {"action": "Stop", "priority": 1}]
        });
        let err = check_schema(&value, "root").unwrap_err();
        assert_eq!(err.path, "root.then[1]");
        assert!(err.message.contains("'priority'"));
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        let err = check_schema(&json!({"condition": 42}), "root").unwrap_err();
        assert_eq!(err.path, "root.condition");

        let err = check_schema(&json!({"else": [{"action": "Go"}]}), "root").unwrap_err();
        assert_eq!(err.path, "root.else");

        let err = check_schema(&json!({"then": "Go"}), "root").unwrap_err();
        assert_eq!(err.path, "root.then");
    }
}
