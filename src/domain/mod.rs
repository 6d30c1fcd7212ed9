//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, display-ready)
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `TryFrom` conversions with validation
//! - `state.rs`: State containers with update methods (for feed-driven data)
//! - `client.rs`: Sub-client with HTTP methods

pub mod asset;
pub mod history;
pub mod live;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A REST payload together with the server timestamp it was produced at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Snapshot<U> {
        Snapshot {
            data: f(self.data),
            timestamp: self.timestamp,
        }
    }
}
