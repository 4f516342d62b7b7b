//! Structured service prices.
//!
//! A service has a price for a regular master and, optionally, a different
//! price for a top master. On the wire the admin form sends the prices as a
//! JSON-encoded string (`"{\"master\":\"1500\"}"`); older rows used a
//! `default` key instead of `master`. Everything is normalised here, at the
//! API boundary, into [`Prices`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Maximum length of a single price label.
pub const MAX_PRICE_LEN: usize = 50;

/// A price label as displayed on the price list, e.g. `"1500"` or `"от 2000"`.
///
/// Always non-empty, trimmed, and at most [`MAX_PRICE_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Money(String);

impl Money {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::field("prices", "Цена не может быть пустой"));
        }
        if trimmed.chars().count() > MAX_PRICE_LEN {
            return Err(CoreError::field(
                "prices",
                format!("Цена должна быть не длиннее {MAX_PRICE_LEN} символов"),
            ));
        }
        Ok(Money(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accept a JSON string or number. Numbers keep their decimal text.
    fn from_value(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::String(s) => Money::new(s),
            Value::Number(n) => Money::new(&n.to_string()),
            _ => Err(CoreError::field(
                "prices",
                "Цена должна быть строкой или числом",
            )),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Money::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Prices of a single service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prices {
    pub master: Money,
    #[serde(rename = "topMaster", skip_serializing_if = "Option::is_none")]
    pub top_master: Option<Money>,
}

impl Prices {
    pub fn new(master: Money, top_master: Option<Money>) -> Self {
        Self { master, top_master }
    }

    /// Parse prices from whatever shape the client sent.
    ///
    /// Accepts an object, or a string containing a JSON object. A `default`
    /// key is treated as `master` when `master` is absent. An empty
    /// `topMaster` (`""` or `null`) means "no top master price".
    pub fn parse(value: &Value) -> Result<Self, CoreError> {
        match value {
            Value::String(encoded) => {
                let decoded: Value = serde_json::from_str(encoded).map_err(|_| {
                    CoreError::field("prices", "Поле prices должно быть корректным JSON")
                })?;
                if decoded.is_string() {
                    return Err(CoreError::field(
                        "prices",
                        "Поле prices должно быть JSON-объектом",
                    ));
                }
                Prices::parse(&decoded)
            }
            Value::Object(map) => {
                let master = map
                    .get("master")
                    .or_else(|| map.get("default"))
                    .ok_or_else(|| CoreError::field("prices", "Не указана цена мастера"))?;
                let master = Money::from_value(master)?;

                let top_master = match map.get("topMaster") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) if s.trim().is_empty() => None,
                    Some(other) => Some(Money::from_value(other)?),
                };

                Ok(Prices { master, top_master })
            }
            _ => Err(CoreError::field(
                "prices",
                "Поле prices должно быть JSON-объектом",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Prices {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Prices::parse(&value).map_err(serde::de::Error::custom)
    }
}
