//! Harness Configuration
//!
//! Loaded from a TOML file; every key is optional. Relative folders are
//! resolved against the directory holding the config file.

use std::path::{Path, PathBuf};

use item_board_core::ApiConfig;
use serde::Deserialize;

use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reporter {
    /// One JUnit XML file per spec
    Junit,
    /// Log lines only
    Spec,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReporterOptions {
    /// Report path template, `[hash]` is replaced by the report's content hash
    pub mocha_file: String,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            mocha_file: "reports/junit-[hash].xml".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Recorded in report properties
    pub default_browser: String,
    pub spec_pattern: String,
    pub screenshot_on_run_failure: bool,
    pub screenshots_folder: PathBuf,
    /// Write the full step transcript of each spec
    pub video: bool,
    pub videos_folder: PathBuf,
    /// When on, the API must share the origin of `base_url`, and TLS
    /// certificates are verified
    pub web_security: bool,
    pub reporter: Reporter,
    pub reporter_options: ReporterOptions,
    /// Where the app is served; relative API bases resolve against it
    pub base_url: String,
    /// Same meaning as the app's `api` query parameter
    pub api: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            default_browser: "chrome".to_string(),
            spec_pattern: "specs/**/*.e2e.toml".to_string(),
            screenshot_on_run_failure: true,
            screenshots_folder: PathBuf::from("reports/screenshots"),
            video: false,
            videos_folder: PathBuf::from("reports/videos"),
            web_security: false,
            reporter: Reporter::Junit,
            reporter_options: ReporterOptions::default(),
            base_url: "http://localhost:5173".to_string(),
            api: None,
        }
    }
}

impl HarnessConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Self::parse(&raw, path)
    }

    pub fn parse(raw: &str, path: &Path) -> Result<Self> {
        toml::from_str(raw).map_err(|source| HarnessError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute API configuration, checked against the web security setting
    pub fn api_config(&self) -> Result<ApiConfig> {
        let api = ApiConfig::from_query_param(self.api.as_deref()).resolve(&self.base_url)?;
        if self.web_security {
            let base = ApiConfig::new(self.base_url.as_str()).origin().unwrap_or_default();
            let api_origin = api.origin().unwrap_or_default();
            if api_origin != base {
                return Err(HarnessError::CrossOrigin {
                    api: api_origin,
                    base,
                });
            }
        }
        Ok(api)
    }
}
