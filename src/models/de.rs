//! Field-level deserializers for drupal.org's REST payloads, which serialize
//! most scalars (node ids, status ids, timestamps) as JSON strings.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeQuoted<T> {
    Raw(T),
    Quoted(String),
}

fn parse<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    match MaybeQuoted::<T>::deserialize(deserializer)? {
        MaybeQuoted::Raw(value) => Ok(value),
        MaybeQuoted::Quoted(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

pub fn string_or_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    parse(deserializer)
}

pub fn string_or_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    parse(deserializer)
}

/// Unreadable status ids become 0, which classifies as closed downstream.
pub fn string_or_u32_lossy<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse(deserializer).unwrap_or(0))
}
