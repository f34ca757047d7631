//! Fetching the story datasets
//!
//! Both documents are loaded once at startup, stops first. Loading is fail
//! fast: the first failure is returned and nothing after it is fetched.

use crate::{core::config::DataConfig, data::geojson::GeoJson, MapError, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Why a document could not be loaded
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadCause {
    /// The server answered with a non-success status code
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),

    #[error("invalid JSON: {0}")]
    Parse(String),
}

impl LoadCause {
    /// Tail of the user-facing load error message
    pub(crate) fn message_suffix(&self) -> String {
        match self {
            LoadCause::Status(status) => format!(" (HTTP {})", status),
            other => format!(": {}", other),
        }
    }
}

/// Source of raw JSON documents addressed by path
#[async_trait(?Send)]
pub trait DocumentFetcher {
    async fn fetch(&self, path: &str) -> std::result::Result<Value, LoadCause>;
}

/// HTTP GET fetcher backed by reqwest. Relative paths resolve against the base URL.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Option<reqwest::Url>,
}

impl HttpFetcher {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base_url = base_url
            .map(reqwest::Url::parse)
            .transpose()
            .map_err(|e| MapError::Config(format!("invalid data base URL: {}", e)))?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| MapError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &DataConfig) -> Result<Self> {
        Self::new(config.base_url.as_deref())
    }

    pub fn resolve(&self, path: &str) -> std::result::Result<reqwest::Url, LoadCause> {
        let url = match &self.base_url {
            Some(base) => base.join(path),
            None => reqwest::Url::parse(path),
        };
        url.map_err(|e| LoadCause::Network(format!("invalid URL {}: {}", path, e)))
    }
}

#[async_trait(?Send)]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> std::result::Result<Value, LoadCause> {
        let url = self.resolve(path)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadCause::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LoadCause::Status(response.status().as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LoadCause::Parse(e.to_string()))
    }
}

/// A loaded document, kept verbatim for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub path: String,
    pub document: Value,
}

impl Dataset {
    pub fn new(path: impl Into<String>, document: Value) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    /// Typed view of the document
    pub fn parse(&self) -> Result<GeoJson> {
        GeoJson::from_value(&self.document)
    }
}

/// The two documents the story is built from
#[derive(Debug, Clone, PartialEq)]
pub struct StoryData {
    pub stops: Dataset,
    pub buildings: Dataset,
}

pub async fn load_document(fetcher: &dyn DocumentFetcher, path: &str) -> Result<Dataset> {
    match fetcher.fetch(path).await {
        Ok(document) => {
            log::info!("loaded {}", path);
            Ok(Dataset::new(path, document))
        }
        Err(cause) => Err(MapError::Load {
            path: path.to_string(),
            cause,
        }),
    }
}

/// Loads stops, then buildings
pub async fn load_story_data(fetcher: &dyn DocumentFetcher, config: &DataConfig) -> Result<StoryData> {
    let stops = load_document(fetcher, &config.stops_path).await?;
    let buildings = load_document(fetcher, &config.buildings_path).await?;
    Ok(StoryData { stops, buildings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::StaticFetcher;
    use serde_json::json;

    #[test]
    fn test_error_messages() {
        let status = MapError::Load {
            path: "data/stops.geojson".to_string(),
            cause: LoadCause::Status(404),
        };
        assert_eq!(status.to_string(), "Failed to load data/stops.geojson (HTTP 404)");

        let network = MapError::Load {
            path: "data/uw_buildings.geojson".to_string(),
            cause: LoadCause::Network("connection refused".to_string()),
        };
        assert_eq!(
            network.to_string(),
            "Failed to load data/uw_buildings.geojson: connection refused"
        );
    }

    #[test]
    fn test_resolve_against_base() {
        let fetcher = HttpFetcher::new(Some("https://example.org/story/index.html")).unwrap();
        assert_eq!(
            fetcher.resolve("data/stops.geojson").unwrap().as_str(),
            "https://example.org/story/data/stops.geojson"
        );

        let bare = HttpFetcher::new(None).unwrap();
        assert!(matches!(bare.resolve("data/stops.geojson"), Err(LoadCause::Network(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(HttpFetcher::new(Some("not a url")), Err(MapError::Config(_))));
    }

    #[tokio::test]
    async fn test_load_in_order() {
        let fetcher = StaticFetcher::new()
            .with_document("data/stops.geojson", json!({"type": "FeatureCollection", "features": []}))
            .with_document("data/uw_buildings.geojson", json!({"type": "FeatureCollection", "features": []}));

        let data = load_story_data(&fetcher, &DataConfig::default()).await.unwrap();
        assert_eq!(data.stops.path, "data/stops.geojson");
        assert_eq!(data.buildings.path, "data/uw_buildings.geojson");
        assert_eq!(
            fetcher.requests(),
            vec!["data/stops.geojson".to_string(), "data/uw_buildings.geojson".to_string()]
        );
    }

    #[tokio::test]
    async fn test_first_failure_stops_loading() {
        let fetcher = StaticFetcher::new()
            .with_failure("data/stops.geojson", LoadCause::Status(500))
            .with_document("data/uw_buildings.geojson", json!({"type": "FeatureCollection", "features": []}));

        let err = load_story_data(&fetcher, &DataConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("data/stops.geojson"));
        assert_eq!(fetcher.requests(), vec!["data/stops.geojson".to_string()]);
    }
}
