//! Field decoders for request bodies that arrive either as urlencoded forms
//! or as JSON. Every stored field is text, so JSON numbers and booleans are
//! kept in their text form.

use std::fmt;

use serde::{
    de::{self, Visitor},
    Deserializer,
};

enum Field {
    Text(String),
    Number { text: String, zero: bool },
    Flag(bool),
}

impl Field {
    fn is_falsy(&self) -> bool {
        match self {
            Field::Text(text) => text.is_empty(),
            Field::Number { zero, .. } => *zero,
            Field::Flag(flag) => !flag,
        }
    }

    fn into_text(self) -> String {
        match self {
            Field::Text(text) => text,
            Field::Number { text, .. } => text,
            Field::Flag(flag) => flag.to_string(),
        }
    }
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Option<Field>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(Field::Text(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(Field::Text(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(Field::Number { text: v.to_string(), zero: v == 0 }))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(Field::Number { text: v.to_string(), zero: v == 0 }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        let text = if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
            format!("{v:.0}")
        } else {
            v.to_string()
        };
        Ok(Some(Field::Number { text, zero: v == 0.0 || v.is_nan() }))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Some(Field::Flag(v)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(FieldVisitor)
    }
}

/// Keeps any scalar as text. `null` becomes `None`.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer.deserialize_any(FieldVisitor)?.map(Field::into_text))
}

/// Like [`lenient`], but empty strings, zero and `false` also become `None`.
/// The string `"0"` is kept.
pub fn truthy<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_any(FieldVisitor)?
        .filter(|field| !field.is_falsy())
        .map(Field::into_text))
}
