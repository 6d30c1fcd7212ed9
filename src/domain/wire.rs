//! Wire envelope shared by every REST endpoint: `{ "data": ..., "timestamp": ms }`.

use super::Snapshot;
use crate::shared::serde_util::timestamp_ms;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(with = "timestamp_ms")]
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Snapshot<U> {
        Snapshot {
            data: f(self.data),
            timestamp: self.timestamp,
        }
    }

    /// Convert the payload into its domain type, keeping the timestamp.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Snapshot<U>, E> {
        Ok(Snapshot {
            data: f(self.data)?,
            timestamp: self.timestamp,
        })
    }
}
