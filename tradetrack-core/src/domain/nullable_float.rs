//! Serde adapter that writes non-finite floats as `null` and reads `null`
//! back as NaN.
//!
//! JSON has no NaN, and serde_json refuses to deserialize `null` into `f64`.
//! A lenient parse can leave NaN in a ledger, which must still survive a
//! save/load cycle.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
