//! # RHTMX Route State
//!
//! Route state utilities for client-side routers. Given a router that owns a
//! route tree, a route configuration and (maybe) an active state, this crate
//! answers the questions navigation code keeps asking:
//! - Is `users.view` with `{ id: 1 }` the active route, or one of its ancestors?
//! - Do two states describe the same route?
//! - Is one state a descendant of another (`users` → `users.view`)?
//! - Which path does a route name + params build to?
//! - Which state does an incoming path match?
//!
//! ## Composition
//!
//! The route tree itself (segment parsing, path building, path matching) is a
//! collaborator behind the [`RouteTree`] trait. A router exposes the tree, the
//! [`RouteConfig`], the [`RouterOptions`] and the active state through
//! [`RouterContext`], and every `RouterContext` gets the
//! [`RouteStateUtils`] methods for free.
//!
//! ## Example
//!
//! ```
//! use rhtmx_route_state::{ActiveOptions, Params, RouteState, RouteStateUtils, Router};
//! # use rhtmx_route_state::{BuildOptions, MatchResult, RouterOptions, RouteTree, Segment};
//! # struct Flat;
//! # struct NoSegment;
//! # impl Segment for NoSegment { fn url_params(&self) -> &[String] { &[] } }
//! # impl RouteTree for Flat {
//! #     type Segment = NoSegment;
//! #     fn segments_by_name(&self, _: &str) -> Vec<&NoSegment> { Vec::new() }
//! #     fn build_path(&self, name: &str, _: &Params, _: &BuildOptions) -> anyhow::Result<String> {
//! #         Ok(format!("/{name}"))
//! #     }
//! #     fn build_state(&self, name: &str, params: &Params) -> anyhow::Result<RouteState> {
//! #         Ok(RouteState::new(name, params.clone()))
//! #     }
//! #     fn match_path(&self, _: &str, _: &RouterOptions) -> Option<MatchResult> { None }
//! #     fn set_path(&mut self, _: &str) {}
//! # }
//!
//! let mut router = Router::new(Flat);
//! router.set_state(Some(RouteState::new("users.view", Params::new())));
//!
//! assert!(router.is_active("users", &Params::new(), ActiveOptions::default()));
//! assert!(!router.is_active("users", &Params::new(), ActiveOptions::strict()));
//! ```

use std::collections::HashMap;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod options;
mod router;
pub mod state;
pub mod tree;
mod utils;

pub use config::{ForwardedState, ParamsTransform, RouteConfig};
pub use options::{
    ArrayFormat, BooleanFormat, BuildOptions, NullFormat, QueryParamsMode, QueryParamsOptions,
    RouterOptions, TrailingSlashMode, UrlParamsEncoding,
};
pub use router::{Router, RouterContext};
pub use state::{are_states_descendants, MatchResult, ParamMeta, ParamSource, RouteState, StateMeta};
pub use tree::{RouteTree, Segment};
pub use utils::{ActiveOptions, RouteStateUtils};

/// Parameter bindings of a route, keyed by parameter name
pub type Params = HashMap<String, String>;

/// Reserved route name for paths that did not match any registered route
///
/// States carrying this name keep their original path in the `path` param,
/// which [`RouteStateUtils::build_path`] hands back verbatim.
pub const UNKNOWN_ROUTE: &str = "@@rhtmx/UNKNOWN_ROUTE";
