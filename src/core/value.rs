use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

/// A single cell of a query result, or a bound statement parameter.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
}

impl Value {
    /// Converts a `NUMERIC` cell. Whole numbers (scale 0) stay integers so that
    /// `EXTRACT(YEAR ...)` reads as `2024`, not `2024.0`.
    pub fn from_decimal(d: Decimal) -> Self {
        if d.scale() == 0 {
            if let Some(i) = d.to_i64() {
                return Self::Integer(i);
            }
        }
        match d.to_f64() {
            Some(f) => Self::Float(f),
            None => Self::Text(d.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    return true;
                }
                (a - b).abs() < f64::EPSILON
            }
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::TimestampTz(a), Self::TimestampTz(b)) => a == b,
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                (*i as f64 - f).abs() < f64::EPSILON
            }
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Integer(i) => serializer.serialize_i64(*i),
            // JSON has no NaN/Infinity
            Self::Float(f) if !f.is_finite() => serializer.serialize_none(),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Date(d) => d.serialize(serializer),
            Self::Timestamp(ts) => ts.serialize(serializer),
            Self::TimestampTz(ts) => ts.serialize(serializer),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::Integer(42), Value::Integer(42));
        assert_eq!(Value::Float(150.0), Value::Integer(150));
        assert_ne!(Value::Integer(1), Value::Integer(2));
        assert_ne!(Value::Text("1".into()), Value::Integer(1));
    }

    #[test]
    fn test_decimal_scale_zero_is_integer() {
        let year = Decimal::from_str("2024").unwrap();
        assert_eq!(Value::from_decimal(year), Value::Integer(2024));
        assert!(matches!(Value::from_decimal(year), Value::Integer(_)));
    }

    #[test]
    fn test_decimal_with_scale_is_float() {
        let total = Decimal::from_str("300.00").unwrap();
        let value = Value::from_decimal(total);
        assert!(matches!(value, Value::Float(_)));
        assert_eq!(value.as_f64(), Some(300.0));

        let avg = Decimal::from_str("123.45").unwrap();
        let avg = Value::from_decimal(avg).as_f64().unwrap();
        assert!((avg - 123.45).abs() < 1e-9);
    }

    #[test]
    fn test_serialize_json() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let values = vec![
            Value::Null,
            Value::Integer(2),
            Value::Float(150.0),
            Value::Text("Warsaw".into()),
            Value::Boolean(true),
            Value::Date(date),
            Value::Float(f64::NAN),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,2,150.0,"Warsaw",true,"2024-03-15",null]"#);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("Paid")), Value::Text("Paid".into()));
    }
}
