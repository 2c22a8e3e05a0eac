use crate::router::RouterContext;
use crate::state::{self, RouteState, StateMeta};
use crate::tree::{RouteTree, Segment};
use crate::{Params, UNKNOWN_ROUTE};
use anyhow::{Context, Result};
use tracing::{debug, trace};

/// How [`RouteStateUtils::is_active`] compares a route against the active state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveOptions {
    /// Only an equal state counts, ancestors of the active state do not
    /// (default: false)
    pub strict_equality: bool,
    /// Compare URL params only (default: true)
    pub ignore_query_params: bool,
}

impl Default for ActiveOptions {
    fn default() -> Self {
        Self {
            strict_equality: false,
            ignore_query_params: true,
        }
    }
}

impl ActiveOptions {
    /// Default options with strict equality turned on
    pub fn strict() -> Self {
        Self {
            strict_equality: true,
            ..Self::default()
        }
    }

    pub fn with_strict_equality(mut self, strict: bool) -> Self {
        self.strict_equality = strict;
        self
    }

    pub fn with_ignore_query_params(mut self, ignore: bool) -> Self {
        self.ignore_query_params = ignore;
        self
    }
}

/// Route state utilities available on every [`RouterContext`]
///
/// All methods are synchronous and read the router's config, options and
/// active state once per call. Only [`set_root_path`](Self::set_root_path)
/// writes to the router.
pub trait RouteStateUtils: RouterContext {
    /// Checks whether `name` + `params` describes the active state
    ///
    /// Without an active state this is `false`. With strict equality, or when
    /// the active state has the same name, the candidate must equal the
    /// active state; otherwise the candidate must be an ancestor of it.
    fn is_active(&self, name: &str, params: &Params, options: ActiveOptions) -> bool {
        let Some(active) = self.state() else {
            return false;
        };

        let candidate = self.make_state(name, params.clone(), None, None);

        if options.strict_equality || active.name == name {
            self.are_states_equal(&candidate, active, options.ignore_query_params)
        } else {
            self.are_states_descendants(&candidate, active)
        }
    }

    /// Compares two states
    ///
    /// The compared parameter names are the URL params declared by the route
    /// tree (`ignore_query_params`) or every key of each state's params. The
    /// name lists must have the same length, and every name from `state1`'s
    /// list must map to the same value (or be absent) in both states.
    fn are_states_equal(
        &self,
        state1: &RouteState,
        state2: &RouteState,
        ignore_query_params: bool,
    ) -> bool {
        if state1.name != state2.name {
            return false;
        }

        let param_names = |state: &RouteState| -> Vec<String> {
            if ignore_query_params {
                url_params(self.root_node(), &state.name)
            } else {
                state.params.keys().cloned().collect()
            }
        };

        let state1_params = param_names(state1);
        let state2_params = param_names(state2);

        state1_params.len() == state2_params.len()
            && state1_params
                .iter()
                .all(|p| state1.params.get(p) == state2.params.get(p))
    }

    /// Checks whether `child_state` sits below `parent_state`
    ///
    /// See [`are_states_descendants`](crate::are_states_descendants).
    fn are_states_descendants(&self, parent_state: &RouteState, child_state: &RouteState) -> bool {
        state::are_states_descendants(parent_state, child_state)
    }

    /// Builds the path of `route` with `params`
    ///
    /// The unknown route hands back its `path` param verbatim. Other routes
    /// get their default params merged under `params`, go through their
    /// encoder, then through the tree's path builder.
    fn build_path(&self, route: &str, params: &Params) -> Result<String> {
        if route == UNKNOWN_ROUTE {
            return params
                .get("path")
                .cloned()
                .context("Unknown route state has no `path` param");
        }

        let config = self.config();
        let params_with_default = config.params_with_defaults(route, params);
        let encoded_params = config.encode(route, params_with_default);
        let build_options = self.options().build_options();

        trace!(route, "building path");
        self.root_node()
            .build_path(route, &encoded_params, &build_options)
    }

    /// Builds the state of `route_name`, following forwarding
    fn build_state(&self, route_name: &str, route_params: Params) -> Result<RouteState> {
        let forwarded = self.config().forward_state(route_name, route_params);

        self.root_node()
            .build_state(&forwarded.name, &forwarded.params)
    }

    /// Matches `path` against the route tree
    ///
    /// Returns `Ok(None)` when nothing matches. A matched route has its params
    /// decoded and forwarded; the resulting path is the input path when
    /// `rewrite_path_on_match` is off, otherwise the path rebuilt from the
    /// forwarded name and params. `source` records why matching ran.
    fn match_path(&self, path: &str, source: Option<&str>) -> Result<Option<RouteState>> {
        let options = self.options();

        let Some(matched) = self.root_node().match_path(path, &options) else {
            debug!(path, "no route matched");
            return Ok(None);
        };

        let decoded_params = self.config().decode(&matched.name, matched.params);
        let forwarded = self.config().forward_state(&matched.name, decoded_params);

        let built_path = if options.rewrite_path_on_match {
            self.build_path(&forwarded.name, &forwarded.params)?
        } else {
            path.to_string()
        };

        debug!(path, route = %forwarded.name, "route matched");

        let meta = StateMeta::from_params(matched.meta).with_source(source.map(str::to_string));

        Ok(Some(self.make_state(
            &forwarded.name,
            forwarded.params,
            Some(built_path),
            Some(meta),
        )))
    }

    /// Replaces the tree's root path
    ///
    /// Low level: meant for declaring app-wide query params (`?lang`). The
    /// path is not validated here.
    fn set_root_path(&mut self, root_path: &str) {
        debug!(root_path, "setting root path");
        self.root_node_mut().set_path(root_path);
    }
}

impl<R: RouterContext + ?Sized> RouteStateUtils for R {}

/// URL param names declared along `name`, in segment order, duplicates kept
fn url_params<T: RouteTree>(tree: &T, name: &str) -> Vec<String> {
    tree.segments_by_name(name)
        .into_iter()
        .flat_map(|segment| segment.url_params().iter().cloned())
        .collect()
}
