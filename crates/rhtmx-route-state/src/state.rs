//! Route state types
//!
//! A [`RouteState`] is a fully resolved, named route with its parameter
//! bindings. States are built by the router and never mutated afterwards.

use crate::Params;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a parameter was read from when a path matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// Path parameter (`/users/:id`)
    Url,
    /// Query parameter (`?page`)
    Query,
}

/// Match metadata: segment name → parameter name → parameter source
pub type ParamMeta = BTreeMap<String, BTreeMap<String, ParamSource>>;

/// Metadata attached to a state by the router
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateMeta {
    /// State id stamped by the router's state builder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Parameter metadata copied from the path match
    #[serde(default)]
    pub params: ParamMeta,
    /// Why matching was invoked (e.g. `popstate`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl StateMeta {
    /// Creates metadata from match parameter metadata
    pub fn from_params(params: ParamMeta) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Sets the match source tag
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }
}

/// A named route with its parameter bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteState {
    /// Dotted route name, e.g. `users.view`
    pub name: String,
    /// Parameter bindings
    #[serde(default)]
    pub params: Params,
    /// Path this state was built or matched from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Router metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<StateMeta>,
}

impl RouteState {
    /// Creates a state with no path and no metadata
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_route_state::{Params, RouteState};
    ///
    /// let state = RouteState::new("home", Params::new());
    /// assert_eq!(state.name, "home");
    /// assert!(state.path.is_none());
    /// ```
    pub fn new(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
            path: None,
            meta: None,
        }
    }

    /// Sets the path of this state
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the metadata of this state
    pub fn with_meta(mut self, meta: StateMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Gets a single parameter value
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Serializes this state to a JSON string (history entries, logs)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a state previously produced by [`RouteState::to_json`]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Result of matching a path against the route tree
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Name of the matched route
    pub name: String,
    /// Raw (not yet decoded) parameters
    pub params: Params,
    /// Parameter metadata of the matched segments
    pub meta: ParamMeta,
}

/// Checks whether `child` sits below `parent` in the dotted route namespace
///
/// The child name must be the parent name followed by `.` and at least one
/// more character, and every parent param must have the same value in the
/// child. The child may carry extra params. The route tree is not consulted.
///
/// # Examples
///
/// ```
/// use rhtmx_route_state::{are_states_descendants, Params, RouteState};
///
/// let parent = RouteState::new("users", Params::new());
/// let child = RouteState::new("users.view", Params::new());
///
/// assert!(are_states_descendants(&parent, &child));
/// assert!(!are_states_descendants(&child, &parent));
/// ```
pub fn are_states_descendants(parent: &RouteState, child: &RouteState) -> bool {
    let extends_parent = child
        .name
        .strip_prefix(parent.name.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|rest| !rest.is_empty());

    if !extends_parent {
        return false;
    }

    parent
        .params
        .iter()
        .all(|(key, value)| child.params.get(key) == Some(value))
}
