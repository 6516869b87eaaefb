//! Shared Serde deserializers
//!
//! YAML and the `Env` provider both type scalars, so a settings value such as
//! `41` or `true` arrives as a number or boolean. Text fields take it back as
//! its string form:
//! - `"41 42"` → `"41 42"`
//! - `41` → `"41"`
//! - `true` → `"true"`

use serde::{Deserialize, Deserializer};

/// Deserialize a string field that also accepts numbers and booleans
///
/// # Example
/// ```ignore
/// #[derive(Deserialize)]
/// struct Settings {
///     #[serde(deserialize_with = "deserialize_string_flexible")]
///     initial_codes: String,
/// }
/// ```
pub fn deserialize_string_flexible<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        String(String),
        Int(i64),
        UInt(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::String(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::UInt(u) => u.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}
