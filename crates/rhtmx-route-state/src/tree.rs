//! Route tree contract
//!
//! The tree owns route definitions: it splits route names into segments,
//! builds paths, builds states and matches paths. The state utilities only
//! delegate to it, so any segment tree can sit behind these traits.

use crate::options::{BuildOptions, RouterOptions};
use crate::state::{MatchResult, RouteState};
use crate::Params;
use anyhow::Result;

/// One segment of a dotted route name (`users` in `users.view`)
pub trait Segment {
    /// URL parameter names declared by this segment's own path fragment
    fn url_params(&self) -> &[String];
}

/// Hierarchical route definitions addressed by dotted route names
///
/// Errors returned by the fallible methods reach callers of the state
/// utilities unchanged.
pub trait RouteTree {
    type Segment: Segment;

    /// Segments composing `name`, root-most first
    ///
    /// Returns an empty list when the name is not defined.
    fn segments_by_name(&self, name: &str) -> Vec<&Self::Segment>;

    /// Builds the path of route `name` from already encoded params
    fn build_path(&self, name: &str, params: &Params, options: &BuildOptions) -> Result<String>;

    /// Builds the state of route `name`
    fn build_state(&self, name: &str, params: &Params) -> Result<RouteState>;

    /// Matches `path` against the defined routes
    fn match_path(&self, path: &str, options: &RouterOptions) -> Option<MatchResult>;

    /// Replaces the root path (used to declare app-wide query params)
    fn set_path(&mut self, path: &str);
}
