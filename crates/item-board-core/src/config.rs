//! API Configuration
//!
//! Where the REST API lives. Computed once at startup and passed down
//! explicitly.

use reqwest::Url;

use crate::error::ConfigError;
use crate::models::ItemId;

/// Default API base when the page has no `api` query parameter
pub const DEFAULT_API_BASE: &str = "/api/v1";

/// Query parameter overriding the API base
pub const API_QUERY_PARAM: &str = "api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    /// Base with one trailing slash stripped
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// From the value of the `api` query parameter (missing or empty = default)
    pub fn from_query_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::new(v),
            _ => Self::default(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn is_absolute(&self) -> bool {
        Url::parse(&self.base).is_ok()
    }

    /// Resolve a relative base against the page origin
    pub fn resolve(&self, origin: &str) -> Result<Self, ConfigError> {
        if self.is_absolute() {
            return Ok(self.clone());
        }
        let origin_url = Url::parse(origin).map_err(|e| ConfigError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;
        let joined = origin_url.join(&self.base).map_err(|e| ConfigError::InvalidBase {
            base: self.base.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(joined.to_string()))
    }

    /// `scheme://host:port` of an absolute base
    pub fn origin(&self) -> Option<String> {
        Url::parse(&self.base).ok().map(|u| u.origin().ascii_serialization())
    }

    pub fn items_url(&self) -> String {
        format!("{}/items", self.base)
    }

    pub fn item_url(&self) -> String {
        format!("{}/item", self.base)
    }

    pub fn item_id_url(&self, id: &ItemId) -> String {
        format!("{}/item/{}", self.base, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base() {
        let cfg = ApiConfig::from_query_param(None);
        assert_eq!(cfg.base(), "/api/v1");
        assert_eq!(ApiConfig::from_query_param(Some("")), cfg);
    }

    #[test]
    fn test_query_param_trailing_slash_stripped() {
        let cfg = ApiConfig::from_query_param(Some("http://localhost:8080/api/v2/"));
        assert_eq!(cfg.base(), "http://localhost:8080/api/v2");
        assert_eq!(cfg.items_url(), "http://localhost:8080/api/v2/items");
        assert_eq!(cfg.item_url(), "http://localhost:8080/api/v2/item");
        assert_eq!(
            cfg.item_id_url(&ItemId::Number(3)),
            "http://localhost:8080/api/v2/item/3"
        );
    }

    #[test]
    fn test_only_one_trailing_slash_stripped() {
        assert_eq!(ApiConfig::new("/api//").base(), "/api/");
    }

    #[test]
    fn test_resolve_relative_against_origin() {
        let cfg = ApiConfig::default().resolve("http://localhost:5173").unwrap();
        assert_eq!(cfg.base(), "http://localhost:5173/api/v1");
        assert!(cfg.is_absolute());
        assert_eq!(cfg.origin().as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn test_resolve_keeps_absolute_base() {
        let cfg = ApiConfig::new("https://api.example.com/v1");
        assert_eq!(cfg.resolve("http://localhost:5173").unwrap(), cfg);
    }

    #[test]
    fn test_resolve_rejects_bad_origin() {
        let err = ApiConfig::default().resolve("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { .. }));
    }
}
