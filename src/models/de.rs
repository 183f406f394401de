use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Id {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Int(i64),
    Float(f64),
}

pub(super) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

/// Integer field that some backends send as a float; fractions are rounded.
pub(super) fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Numeric::deserialize(deserializer)? {
        Numeric::Int(value) => Ok(value),
        Numeric::Float(value) if value.is_finite() && value.abs() < i64::MAX as f64 => {
            Ok(value.round() as i64)
        }
        Numeric::Float(value) => Err(D::Error::custom(format!(
            "{} is out of range for a whole number",
            value
        ))),
    }
}
