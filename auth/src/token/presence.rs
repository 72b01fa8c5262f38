//! Field presence rule shared by [`Header`](super::Header) and
//! [`ClaimSet`](super::ClaimSet).
//!
//! A value is on the wire only when it is present and non-default. On the way
//! in, `null`, `0` and `""` all decode to `None`, so "not asserted" never turns
//! into "asserted as zero".

use serde::Deserialize;
use serde::Deserializer;

pub(crate) fn timestamp_unset(value: &Option<i64>) -> bool {
    !matches!(value, Some(t) if *t != 0)
}

pub(crate) fn text_unset(value: &Option<String>) -> bool {
    !matches!(value, Some(s) if !s.is_empty())
}

pub(crate) fn timestamp_or_unset<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.filter(|t| *t != 0))
}

pub(crate) fn text_or_unset<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

pub(crate) fn normalize_timestamp(value: i64) -> Option<i64> {
    (value != 0).then_some(value)
}

pub(crate) fn normalize_text(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
