use thiserror::Error;
use url::Url;

pub const DEFAULT_ORIGIN: &str = "https://cms1.creatorsmela.com";
pub const DEFAULT_VERIFY_PATH: &str = "/api/verify";

const API_PREFIX: &str = "/api";

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid backend origin {origin:?}: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
    #[error("backend origin must be an http(s) url: {0}")]
    UnsupportedOrigin(String),
}

/// Forwards application paths under `/api/` to the backend origin.
///
/// `/api/verify` maps to `{origin}/verify`; paths outside the prefix are
/// joined to the origin unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoute {
    origin: Url,
}

impl ApiRoute {
    pub fn new(origin: &str) -> Result<Self, RouteError> {
        let origin_url = Url::parse(origin.trim()).map_err(|source| RouteError::InvalidOrigin {
            origin: origin.to_string(),
            source,
        })?;
        if origin_url.cannot_be_a_base() || !matches!(origin_url.scheme(), "http" | "https") {
            return Err(RouteError::UnsupportedOrigin(origin.to_string()));
        }
        Ok(Self { origin: origin_url })
    }

    pub fn resolve(&self, path: &str) -> Url {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let forwarded = forwarded_path(path);

        let mut url = self.origin.clone();
        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}{forwarded}"));
        url.set_query(query);
        url
    }
}

fn forwarded_path(path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    match path.strip_prefix(API_PREFIX) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path,
    }
}
