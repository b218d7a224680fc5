//! Serde helpers for the Zabbix wire format.
//!
//! The Zabbix API encodes every number as a JSON string (`"value_type": "3"`),
//! while hand-written fixtures and some proxies send plain numbers. These
//! helpers accept both.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// Deserializes a string or number into a `String`.
pub fn stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_string())
}

/// Deserializes an optional string or number into an `Option<String>`.
pub fn opt_stringly<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

/// Deserializes an optional integer sent as a string or number.
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::Int(i)) => Ok(Some(i)),
        Some(StringOrNumber::Float(f)) => Ok(Some(f as i64)),
        Some(StringOrNumber::Str(s)) if s.is_empty() => Ok(None),
        Some(StringOrNumber::Str(s)) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer '{}'", s))),
    }
}

/// (De)serialization of small enum codes (`"0"`, `"1"`, ...).
pub mod code {
    use super::*;

    /// Serialize a code as its decimal string, the way Zabbix sends it.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Copy + Into<u8>,
        S: Serializer,
    {
        let code: u8 = (*value).into();
        serializer.serialize_str(&code.to_string())
    }

    /// Deserialize a code sent either as a string or a number.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: From<u8>,
        D: Deserializer<'de>,
    {
        let raw = StringOrNumber::deserialize(deserializer)?.into_string();
        raw.trim()
            .parse::<u8>()
            .map(T::from)
            .map_err(|_| serde::de::Error::custom(format!("invalid code '{}'", raw)))
    }
}

/// (De)serialization of `"0"`/`"1"` flags as `bool`.
pub mod flag {
    use super::*;

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = StringOrNumber::deserialize(deserializer)?.into_string();
        Ok(raw.trim() == "1")
    }
}
