use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// A JSON-safe scalar cell value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Integral finite numbers become `Int`, NaN and infinities become `Null`.
    pub fn from_number(number: f64) -> Value {
        if !number.is_finite() {
            Value::Null
        } else if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
            Value::Int(number as i64)
        } else {
            Value::Float(number)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text a value is compared and displayed by; `None` for null.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            value => Some(value.to_string()),
        }
    }

    /// Blank text counts as missing, like an empty spreadsheet cell.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_number(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_json_safe() {
        assert_eq!(Value::from_number(3.0), Value::Int(3));
        assert_eq!(Value::from_number(-0.5), Value::Float(-0.5));
        assert_eq!(Value::from_number(f64::NAN), Value::Null);
        assert_eq!(Value::from_number(f64::INFINITY), Value::Null);
    }

    #[test]
    fn serializes_untagged() {
        let values = vec![Value::Null, Value::Int(7), Value::Float(1.5), Value::from("Hà Nội")];
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[null,7,1.5,"Hà Nội"]"#);
    }

    #[test]
    fn text_forms() {
        assert_eq!(Value::Int(2024).as_text().as_deref(), Some("2024"));
        assert_eq!(Value::Null.as_text(), None);
        assert!(Value::from("  ").is_blank());
        assert!(!Value::Int(0).is_blank());
        assert_eq!(Value::from(None::<&str>), Value::Null);
    }
}
