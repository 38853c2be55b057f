//! Datatype names and the coercion of raw message values into typed variants
//!
//! The downstream client expects payloads already shaped for the datatype
//! named on the message. `coerce` is the single entry point: it resolves the
//! datatype name (including `"<Type> Array"` forms) and converts a raw JSON
//! value, usually the string typed into the node's form, into a [`Variant`].

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use opcua::types::{LocalizedText, NodeId, QualifiedName, UAString};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::{ARRAY_SUFFIX, DEFAULT_LOCALE};
use crate::error::CoercionError;

/// Built-in scalar datatypes a node can be configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    String,
    LocalizedText,
    DateTime,
    NodeId,
    QualifiedName,
    ByteString,
    Guid,
}

impl DataType {
    pub const ALL: [DataType; 18] = [
        DataType::Boolean,
        DataType::SByte,
        DataType::Byte,
        DataType::Int16,
        DataType::UInt16,
        DataType::Int32,
        DataType::UInt32,
        DataType::Int64,
        DataType::UInt64,
        DataType::Float,
        DataType::Double,
        DataType::String,
        DataType::LocalizedText,
        DataType::DateTime,
        DataType::NodeId,
        DataType::QualifiedName,
        DataType::ByteString,
        DataType::Guid,
    ];

    /// Canonical name as shown in the node form
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "Boolean",
            DataType::SByte => "SByte",
            DataType::Byte => "Byte",
            DataType::Int16 => "Int16",
            DataType::UInt16 => "UInt16",
            DataType::Int32 => "Int32",
            DataType::UInt32 => "UInt32",
            DataType::Int64 => "Int64",
            DataType::UInt64 => "UInt64",
            DataType::Float => "Float",
            DataType::Double => "Double",
            DataType::String => "String",
            DataType::LocalizedText => "LocalizedText",
            DataType::DateTime => "DateTime",
            DataType::NodeId => "NodeId",
            DataType::QualifiedName => "QualifiedName",
            DataType::ByteString => "ByteString",
            DataType::Guid => "Guid",
        }
    }

    /// Resolve a scalar datatype name, accepting the `Int8`/`UInt8` aliases
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int8" => Some(DataType::SByte),
            "UInt8" => Some(DataType::Byte),
            _ => Self::ALL.iter().copied().find(|dt| dt.name() == name),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed datatype name: scalar type plus array flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeTag {
    pub data_type: DataType,
    pub is_array: bool,
}

impl FromStr for TypeTag {
    type Err = CoercionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let (scalar, is_array) = match name.strip_suffix(ARRAY_SUFFIX) {
            Some(scalar) => (scalar.trim_end(), true),
            None => (name, false),
        };
        DataType::from_name(scalar)
            .map(|data_type| TypeTag { data_type, is_array })
            .ok_or_else(|| CoercionError::UnknownDataType(s.to_string()))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}{}", self.data_type, ARRAY_SUFFIX)
        } else {
            write!(f, "{}", self.data_type)
        }
    }
}

/// Text of a stack string, empty when null
pub(crate) fn ua_text(s: &UAString) -> &str {
    s.as_ref()
}

/// `"2:Temperature"` or plain `"Temperature"` (namespace 0)
fn qualified_name(s: &str) -> Result<QualifiedName, &'static str> {
    let (namespace_index, name) = match s.split_once(':') {
        Some((ns, name)) => match ns.trim().parse::<u16>() {
            Ok(namespace_index) => (namespace_index, name),
            Err(_) => (0, s),
        },
        None => (0, s),
    };
    if name.is_empty() {
        return Err("empty name");
    }
    Ok(QualifiedName::new(namespace_index, name))
}

/// `{ "locale": "en", "text": "..." }`, locale optional
fn localized_text(name: &str, raw: &Value) -> Result<LocalizedText, CoercionError> {
    let text = raw
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| CoercionError::invalid(name, raw, "missing text"))?;
    let locale = raw.get("locale").and_then(Value::as_str).unwrap_or(DEFAULT_LOCALE);
    Ok(LocalizedText::new(locale, text))
}

/// A value already shaped for one datatype
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Boolean(bool),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    String(String),
    LocalizedText(LocalizedText),
    DateTime(DateTime<Utc>),
    NodeId(NodeId),
    QualifiedName(QualifiedName),
    ByteString(Vec<u8>),
    Guid(Uuid),
    Array(DataType, Vec<Variant>),
}

impl Variant {
    /// Datatype of the value, element type for arrays
    pub fn data_type(&self) -> DataType {
        match self {
            Variant::Boolean(_) => DataType::Boolean,
            Variant::SByte(_) => DataType::SByte,
            Variant::Byte(_) => DataType::Byte,
            Variant::Int16(_) => DataType::Int16,
            Variant::UInt16(_) => DataType::UInt16,
            Variant::Int32(_) => DataType::Int32,
            Variant::UInt32(_) => DataType::UInt32,
            Variant::Int64(_) => DataType::Int64,
            Variant::UInt64(_) => DataType::UInt64,
            Variant::Float(_) => DataType::Float,
            Variant::Double(_) => DataType::Double,
            Variant::String(_) => DataType::String,
            Variant::LocalizedText(_) => DataType::LocalizedText,
            Variant::DateTime(_) => DataType::DateTime,
            Variant::NodeId(_) => DataType::NodeId,
            Variant::QualifiedName(_) => DataType::QualifiedName,
            Variant::ByteString(_) => DataType::ByteString,
            Variant::Guid(_) => DataType::Guid,
            Variant::Array(dt, _) => *dt,
        }
    }

    /// JSON form carried as message payload
    pub fn to_json(&self) -> Value {
        match self {
            Variant::Boolean(v) => Value::Bool(*v),
            Variant::SByte(v) => Value::from(*v),
            Variant::Byte(v) => Value::from(*v),
            Variant::Int16(v) => Value::from(*v),
            Variant::UInt16(v) => Value::from(*v),
            Variant::Int32(v) => Value::from(*v),
            Variant::UInt32(v) => Value::from(*v),
            Variant::Int64(v) => Value::from(*v),
            Variant::UInt64(v) => Value::from(*v),
            // Widen through the shortest decimal form so 66.6f32 stays 66.6
            Variant::Float(v) => {
                let widened = v.to_string().parse::<f64>().unwrap_or(f64::from(*v));
                Value::from(widened)
            }
            Variant::Double(v) => Value::from(*v),
            Variant::String(v) => Value::String(v.clone()),
            Variant::LocalizedText(v) => {
                json!({ "locale": ua_text(&v.locale), "text": ua_text(&v.text) })
            }
            Variant::DateTime(v) => Value::String(v.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Variant::NodeId(v) => Value::String(v.to_string()),
            Variant::QualifiedName(v) => {
                json!({ "namespaceIndex": v.namespace_index, "name": ua_text(&v.name) })
            }
            Variant::ByteString(v) => Value::String(STANDARD.encode(v)),
            Variant::Guid(v) => Value::String(v.to_string()),
            Variant::Array(_, items) => Value::Array(items.iter().map(Variant::to_json).collect()),
        }
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Convert `raw` into the representation expected for `datatype`
pub fn coerce(datatype: &str, raw: &Value) -> Result<Variant, CoercionError> {
    let tag: TypeTag = datatype.parse()?;
    if !tag.is_array {
        return coerce_scalar(tag.data_type, raw);
    }

    let items = match raw {
        Value::Array(items) => items.clone(),
        Value::String(s) if s.trim_start().starts_with('[') => {
            serde_json::from_str::<Vec<Value>>(s)
                .map_err(|e| CoercionError::invalid(datatype, s, e))?
        }
        Value::String(s) => s
            .split(',')
            .map(|part| Value::String(part.trim().to_string()))
            .collect(),
        other => vec![other.clone()],
    };

    let elements = items
        .iter()
        .map(|item| coerce_scalar(tag.data_type, item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Variant::Array(tag.data_type, elements))
}

/// Convenience form for values typed as text in a node form
pub fn coerce_str(datatype: &str, raw: &str) -> Result<Variant, CoercionError> {
    coerce(datatype, &Value::String(raw.to_string()))
}

fn coerce_scalar(dt: DataType, raw: &Value) -> Result<Variant, CoercionError> {
    let name = dt.name();
    let text = |v: &Value| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let variant = match dt {
        DataType::Boolean => Variant::Boolean(boolean(name, raw)?),
        DataType::SByte => Variant::SByte(integer(name, raw)?),
        DataType::Byte => Variant::Byte(integer(name, raw)?),
        DataType::Int16 => Variant::Int16(integer(name, raw)?),
        DataType::UInt16 => Variant::UInt16(integer(name, raw)?),
        DataType::Int32 => Variant::Int32(integer(name, raw)?),
        DataType::UInt32 => Variant::UInt32(integer(name, raw)?),
        DataType::Int64 => Variant::Int64(integer(name, raw)?),
        DataType::UInt64 => Variant::UInt64(integer(name, raw)?),
        DataType::Float => {
            let narrow = float(name, raw)? as f32;
            if !narrow.is_finite() {
                return Err(CoercionError::invalid(name, text(raw), "out of range"));
            }
            Variant::Float(narrow)
        }
        DataType::Double => Variant::Double(float(name, raw)?),
        DataType::String => match raw {
            Value::Null => return Err(CoercionError::invalid(name, "null", "no value")),
            other => Variant::String(text(other)),
        },
        DataType::LocalizedText => match raw {
            Value::String(s) => Variant::LocalizedText(LocalizedText::new(DEFAULT_LOCALE, s)),
            Value::Object(_) => Variant::LocalizedText(localized_text(name, raw)?),
            other => return Err(CoercionError::invalid(name, other, "expected text")),
        },
        DataType::DateTime => Variant::DateTime(date_time(name, raw)?),
        DataType::NodeId => match raw {
            Value::String(s) => Variant::NodeId(
                NodeId::from_str(s.trim()).map_err(|_| CoercionError::InvalidNodeId(s.clone()))?,
            ),
            other => return Err(CoercionError::invalid(name, other, "expected node id string")),
        },
        DataType::QualifiedName => match raw {
            Value::String(s) => Variant::QualifiedName(
                qualified_name(s).map_err(|e| CoercionError::invalid(name, s, e))?,
            ),
            other => return Err(CoercionError::invalid(name, other, "expected text")),
        },
        DataType::ByteString => match raw {
            Value::String(s) => Variant::ByteString(
                STANDARD.decode(s.trim()).map_err(|e| CoercionError::invalid(name, s, e))?,
            ),
            Value::Array(items) => Variant::ByteString(
                items
                    .iter()
                    .map(|item| integer::<u8>(name, item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            other => {
                return Err(CoercionError::invalid(name, other, "expected base64 text or byte list"))
            }
        },
        DataType::Guid => match raw {
            Value::String(s) => Variant::Guid(
                Uuid::parse_str(s.trim()).map_err(|e| CoercionError::invalid(name, s, e))?,
            ),
            other => return Err(CoercionError::invalid(name, other, "expected guid string")),
        },
    };
    Ok(variant)
}

fn boolean(name: &str, raw: &Value) -> Result<bool, CoercionError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(CoercionError::invalid(name, s, "expected true/false")),
        },
        other => Err(CoercionError::invalid(name, other, "expected true/false")),
    }
}

fn integer<T: TryFrom<i128>>(name: &str, raw: &Value) -> Result<T, CoercionError> {
    let wide: i128 = match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i as i128
            } else if let Some(u) = n.as_u64() {
                u as i128
            } else {
                whole(name, n.as_f64().unwrap_or(f64::NAN), raw)?
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            match trimmed.parse::<i128>() {
                Ok(v) => v,
                Err(_) => {
                    let f = trimmed
                        .parse::<f64>()
                        .map_err(|_| CoercionError::invalid(name, s, "not a number"))?;
                    whole(name, f, raw)?
                }
            }
        }
        other => return Err(CoercionError::invalid(name, other, "not a number")),
    };

    T::try_from(wide).map_err(|_| CoercionError::invalid(name, wide, "out of range"))
}

fn whole(name: &str, f: f64, raw: &Value) -> Result<i128, CoercionError> {
    if f.is_finite() && f.fract() == 0.0 {
        Ok(f as i128)
    } else {
        Err(CoercionError::invalid(name, raw, "not an integer"))
    }
}

fn float(name: &str, raw: &Value) -> Result<f64, CoercionError> {
    let value = match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CoercionError::invalid(name, n, "not a number"))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoercionError::invalid(name, s, "not a number"))?,
        other => return Err(CoercionError::invalid(name, other, "not a number")),
    };
    // JSON has no NaN or infinity, the payload would turn into null
    if !value.is_finite() {
        return Err(CoercionError::invalid(name, raw, "not a finite number"));
    }
    Ok(value)
}

fn date_time(name: &str, raw: &Value) -> Result<DateTime<Utc>, CoercionError> {
    let from_millis = |ms: i64| {
        Utc.timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| CoercionError::invalid(name, ms, "timestamp out of range"))
    };

    match raw {
        Value::Number(n) => match n.as_i64() {
            Some(ms) => from_millis(ms),
            None => Err(CoercionError::invalid(name, n, "expected epoch milliseconds")),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(ms) = trimmed.parse::<i64>() {
                return from_millis(ms);
            }
            DateTime::parse_from_rfc3339(trimmed)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| CoercionError::invalid(name, s, e))
        }
        other => Err(CoercionError::invalid(name, other, "expected date")),
    }
}
