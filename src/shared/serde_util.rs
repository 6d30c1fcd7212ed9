//! Custom serde helpers for backend wire formats.

/// Deserializes a Unix-millis number into `DateTime<Utc>`.
///
/// The REST envelope's `timestamp` and each history sample's `time` are epoch
/// milliseconds. Some responses carry them as floats (`1700000000000.0`).
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        if !millis.is_finite() {
            return Err(serde::de::Error::custom(format!("Invalid timestamp: {}", millis)));
        }
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.timestamp_millis())
    }
}
