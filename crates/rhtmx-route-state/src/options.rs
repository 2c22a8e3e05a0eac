//! Router options read by the state utilities
//!
//! A snapshot of [`RouterOptions`] is taken once per call and handed to the
//! route tree. Only the build-relevant subset ([`BuildOptions`]) reaches
//! path building.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How trailing slashes are handled when building and matching paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlashMode {
    /// Keep whatever the route definition says
    #[default]
    Default,
    /// Never emit a trailing slash
    Never,
    /// Always emit a trailing slash
    Always,
}

/// How undeclared query parameters are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryParamsMode {
    /// Only declared query params are allowed
    #[default]
    Default,
    /// Declared query params are required to match exactly
    Strict,
    /// Any query param is accepted and kept
    Loose,
}

/// Array encoding in query strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// `?a=1&a=2`
    #[default]
    None,
    /// `?a[]=1&a[]=2`
    Brackets,
    /// `?a[0]=1&a[1]=2`
    Index,
}

/// Boolean encoding in query strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BooleanFormat {
    /// `?a=true`
    #[default]
    None,
    /// `?a` for true, omitted for false
    EmptyTrue,
    /// `?a=✓` / `?a=✗`
    Unicode,
}

/// Null encoding in query strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullFormat {
    /// `?a`
    #[default]
    Default,
    /// `?a=`
    String,
    /// Null params are dropped
    Hidden,
}

/// Query string formatting options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParamsOptions {
    #[serde(default)]
    pub array_format: ArrayFormat,
    #[serde(default)]
    pub boolean_format: BooleanFormat,
    #[serde(default)]
    pub null_format: NullFormat,
}

/// How URL params are encoded when building paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UrlParamsEncoding {
    #[default]
    Default,
    Uri,
    UriComponent,
    None,
}

/// Options snapshot used for matching and building paths
///
/// # Examples
///
/// ```
/// use rhtmx_route_state::{RouterOptions, TrailingSlashMode};
///
/// let options = RouterOptions::from_toml_str(r#"
///     trailing_slash_mode = "never"
///     rewrite_path_on_match = false
/// "#).unwrap();
///
/// assert_eq!(options.trailing_slash_mode, TrailingSlashMode::Never);
/// assert!(!options.rewrite_path_on_match);
/// assert!(!options.case_sensitive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterOptions {
    #[serde(default)]
    pub trailing_slash_mode: TrailingSlashMode,

    #[serde(default)]
    pub query_params_mode: QueryParamsMode,

    #[serde(default)]
    pub query_params: QueryParamsOptions,

    /// Whether a matched state gets its path rebuilt from name + params
    /// (default: true)
    #[serde(default = "default_true")]
    pub rewrite_path_on_match: bool,

    /// Whether static segments match case-sensitively (default: false)
    #[serde(default = "default_false")]
    pub case_sensitive: bool,

    /// Whether a trailing slash must match exactly (default: false)
    #[serde(default = "default_false")]
    pub strict_trailing_slash: bool,

    #[serde(default)]
    pub url_params_encoding: UrlParamsEncoding,
}

/// Subset of [`RouterOptions`] passed to path building
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub trailing_slash_mode: TrailingSlashMode,
    pub query_params_mode: QueryParamsMode,
    pub query_params: QueryParamsOptions,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            trailing_slash_mode: TrailingSlashMode::default(),
            query_params_mode: QueryParamsMode::default(),
            query_params: QueryParamsOptions::default(),
            rewrite_path_on_match: default_true(),
            case_sensitive: default_false(),
            strict_trailing_slash: default_false(),
            url_params_encoding: UrlParamsEncoding::default(),
        }
    }
}

impl RouterOptions {
    /// Parses options from TOML, filling unset fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse router options")
    }

    /// Extracts the options path building depends on
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            trailing_slash_mode: self.trailing_slash_mode,
            query_params_mode: self.query_params_mode,
            query_params: self.query_params,
        }
    }

    pub fn with_rewrite_path_on_match(mut self, rewrite: bool) -> Self {
        self.rewrite_path_on_match = rewrite;
        self
    }

    pub fn with_trailing_slash_mode(mut self, mode: TrailingSlashMode) -> Self {
        self.trailing_slash_mode = mode;
        self
    }

    pub fn with_query_params_mode(mut self, mode: QueryParamsMode) -> Self {
        self.query_params_mode = mode;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

// Default values
fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}
