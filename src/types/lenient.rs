//! Deserializers for fields that clients send either as JSON numbers or as
//! numeric strings.

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

pub fn int_or_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => n,
        Scalar::Text(s) => s.trim().parse::<i64>().map_err(D::Error::custom)?,
    };
    i32::try_from(value).map_err(D::Error::custom)
}

pub fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => Ok(n.to_string()),
        Scalar::Text(s) => Ok(s),
    }
}
