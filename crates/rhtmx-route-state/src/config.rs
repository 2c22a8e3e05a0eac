// File: src/config.rs
// Purpose: Route definition config (default params, codecs, forwarding)

use crate::Params;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::trace;

/// Params → params transform used as a route encoder or decoder
///
/// The returned map fully replaces the input; it is not merged back.
pub type ParamsTransform = Arc<dyn Fn(Params) -> Params + Send + Sync>;

/// Per-route configuration consumed by the state utilities
///
/// # Examples
///
/// ```
/// use rhtmx_route_state::{Params, RouteConfig};
///
/// let config = RouteConfig::new()
///     .with_forward("old", "new")
///     .with_default_params("new", [("page", "1")]);
///
/// let forwarded = config.forward_state("old", Params::new());
/// assert_eq!(forwarded.name, "new");
/// assert_eq!(forwarded.params.get("page"), Some(&"1".to_string()));
/// ```
#[derive(Clone, Default)]
pub struct RouteConfig {
    /// Default params per route name
    pub default_params: HashMap<String, Params>,
    /// Params encoders per route name, applied before building a path
    pub encoders: HashMap<String, ParamsTransform>,
    /// Params decoders per route name, applied after matching a path
    pub decoders: HashMap<String, ParamsTransform>,
    /// Route name → route name it forwards to
    pub forward_map: HashMap<String, String>,
}

/// Declarative part of [`RouteConfig`] as found in a TOML file
#[derive(Debug, Default, Deserialize)]
struct RouteConfigFile {
    #[serde(default)]
    default_params: HashMap<String, Params>,

    #[serde(default)]
    forward_map: HashMap<String, String>,
}

/// Route name and params after forwarding and default merging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardedState {
    pub name: String,
    pub params: Params,
}

impl RouteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the declarative config (`default_params`, `forward_map`) from TOML
    ///
    /// ```toml
    /// [default_params.users]
    /// page = "1"
    ///
    /// [forward_map]
    /// "legacy.users" = "users"
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RouteConfigFile =
            toml::from_str(content).context("Failed to parse route config")?;

        Ok(Self {
            default_params: file.default_params,
            forward_map: file.forward_map,
            ..Self::default()
        })
    }

    /// Loads the declarative config from a TOML file
    ///
    /// A missing file yields an empty config.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read route config: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid route config: {}", path.display()))
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Sets the default params of a route
    pub fn with_default_params<I, K, V>(mut self, route: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.default_params.insert(route.into(), params);
        self
    }

    /// Sets the params encoder of a route
    pub fn with_encoder<F>(mut self, route: impl Into<String>, encoder: F) -> Self
    where
        F: Fn(Params) -> Params + Send + Sync + 'static,
    {
        self.encoders.insert(route.into(), Arc::new(encoder));
        self
    }

    /// Sets the params decoder of a route
    pub fn with_decoder<F>(mut self, route: impl Into<String>, decoder: F) -> Self
    where
        F: Fn(Params) -> Params + Send + Sync + 'static,
    {
        self.decoders.insert(route.into(), Arc::new(decoder));
        self
    }

    /// Forwards `from` to `to`
    pub fn with_forward(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.forward_map.insert(from.into(), to.into());
        self
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Merges the route's default params under `params` (supplied params win)
    pub fn params_with_defaults(&self, route: &str, params: &Params) -> Params {
        let mut merged = self.default_params.get(route).cloned().unwrap_or_default();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Runs the route's encoder, or returns the params untouched
    pub fn encode(&self, route: &str, params: Params) -> Params {
        match self.encoders.get(route) {
            Some(encoder) => {
                trace!(route, "encoding params");
                encoder(params)
            }
            None => params,
        }
    }

    /// Runs the route's decoder, or returns the params untouched
    pub fn decode(&self, route: &str, params: Params) -> Params {
        match self.decoders.get(route) {
            Some(decoder) => {
                trace!(route, "decoding params");
                decoder(params)
            }
            None => params,
        }
    }

    /// Resolves forwarding for a route and merges its default params
    ///
    /// Precedence, lowest first: defaults of `route_name`, defaults of the
    /// forwarded name, `route_params`. Forwarding follows a single hop.
    pub fn forward_state(&self, route_name: &str, route_params: Params) -> ForwardedState {
        let name = self
            .forward_map
            .get(route_name)
            .cloned()
            .unwrap_or_else(|| route_name.to_string());

        if name != route_name {
            trace!(from = route_name, to = %name, "forwarding route");
        }

        let mut params = self
            .default_params
            .get(route_name)
            .cloned()
            .unwrap_or_default();
        if let Some(defaults) = self.default_params.get(&name) {
            params.extend(defaults.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        params.extend(route_params);

        ForwardedState { name, params }
    }
}

impl fmt::Debug for RouteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut encoders: Vec<&String> = self.encoders.keys().collect();
        let mut decoders: Vec<&String> = self.decoders.keys().collect();
        encoders.sort();
        decoders.sort();

        f.debug_struct("RouteConfig")
            .field("default_params", &self.default_params)
            .field("encoders", &encoders)
            .field("decoders", &decoders)
            .field("forward_map", &self.forward_map)
            .finish()
    }
}
