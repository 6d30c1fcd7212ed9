//! Routes: `/rates` (catalog) and `/rates/{id}` (detail).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::shared::AssetId;

const ROOT: &str = "/rates";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Catalog,
    Detail(AssetId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Catalog => ROOT.to_string(),
            Route::Detail(id) => format!("{}/{}", ROOT, urlencoding::encode(id.as_str())),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    /// Query string and trailing slash are ignored; the id segment is
    /// percent-decoded.
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let unknown = || RouteError::Unknown(path.to_string());
        let path_only = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path_only.trim_end_matches('/');

        let rest = trimmed.strip_prefix(ROOT).ok_or_else(unknown)?;
        if rest.is_empty() {
            return Ok(Route::Catalog);
        }

        let id = rest.strip_prefix('/').ok_or_else(unknown)?;
        if id.is_empty() || id.contains('/') {
            return Err(unknown());
        }
        let decoded = urlencoding::decode(id).map_err(|_| unknown())?;
        Ok(Route::Detail(AssetId::from(decoded.into_owned())))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
