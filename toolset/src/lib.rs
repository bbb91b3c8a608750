use std::borrow::Cow;

use serde::{de, Deserialize, Deserializer};
use url::Url;

/// Exchanges send prices and quantities as decimal strings to keep precision.
pub fn deser_float_from_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<f64, D::Error> {
    let string_value = Cow::<str>::deserialize(deserializer)?;
    string_value.as_ref().trim().parse().map_err(de::Error::custom)
}

/// A float encoded as a string, for positional payloads where
/// `deserialize_with` cannot be attached to a field.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StringFloat(#[serde(deserialize_with = "deser_float_from_string")] pub f64);

pub fn deserialize_url<'de, D: Deserializer<'de>>(deser: D) -> Result<Url, D::Error> {
    let s = Cow::<str>::deserialize(deser)?;
    s.as_ref().parse().map_err(de::Error::custom)
}
