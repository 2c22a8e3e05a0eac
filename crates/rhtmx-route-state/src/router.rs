use crate::config::RouteConfig;
use crate::options::RouterOptions;
use crate::state::{RouteState, StateMeta};
use crate::tree::RouteTree;
use crate::Params;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// What a router exposes to the state utilities
///
/// Implementing this trait is enough to get every
/// [`RouteStateUtils`](crate::RouteStateUtils) method on the router.
pub trait RouterContext {
    type Tree: RouteTree;

    /// Route tree holding the route definitions
    fn root_node(&self) -> &Self::Tree;

    /// Mutable access to the route tree
    fn root_node_mut(&mut self) -> &mut Self::Tree;

    /// Per-route configuration
    fn config(&self) -> &RouteConfig;

    /// Snapshot of the current options
    fn options(&self) -> RouterOptions;

    /// Currently active state, if any
    fn state(&self) -> Option<&RouteState>;

    /// Builds a state without registering it as active
    fn make_state(
        &self,
        name: &str,
        params: Params,
        path: Option<String>,
        meta: Option<StateMeta>,
    ) -> RouteState;
}

/// Router holding a route tree, its configuration and the active state
///
/// # Examples
///
/// ```
/// use rhtmx_route_state::{Params, RouteConfig, Router, RouterContext, RouterOptions, StateMeta};
/// # use rhtmx_route_state::{BuildOptions, MatchResult, RouteState, RouteTree, Segment};
/// # struct Empty;
/// # struct NoSegment;
/// # impl Segment for NoSegment { fn url_params(&self) -> &[String] { &[] } }
/// # impl RouteTree for Empty {
/// #     type Segment = NoSegment;
/// #     fn segments_by_name(&self, _: &str) -> Vec<&NoSegment> { Vec::new() }
/// #     fn build_path(&self, _: &str, _: &Params, _: &BuildOptions) -> anyhow::Result<String> {
/// #         anyhow::bail!("empty tree")
/// #     }
/// #     fn build_state(&self, _: &str, _: &Params) -> anyhow::Result<RouteState> {
/// #         anyhow::bail!("empty tree")
/// #     }
/// #     fn match_path(&self, _: &str, _: &RouterOptions) -> Option<MatchResult> { None }
/// #     fn set_path(&mut self, _: &str) {}
/// # }
///
/// let router = Router::new(Empty)
///     .with_config(RouteConfig::new().with_forward("old", "new"))
///     .with_options(RouterOptions::default().with_rewrite_path_on_match(false));
///
/// let first = router.make_state("home", Params::new(), None, Some(StateMeta::default()));
/// let second = router.make_state("home", Params::new(), None, Some(StateMeta::default()));
/// assert!(first.meta.unwrap().id < second.meta.unwrap().id);
/// ```
pub struct Router<T: RouteTree> {
    tree: T,
    config: RouteConfig,
    options: RouterOptions,
    state: Option<RouteState>,
    state_id: AtomicU64,
}

impl<T: RouteTree> Router<T> {
    /// Creates a router over `tree` with empty config and default options
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            config: RouteConfig::default(),
            options: RouterOptions::default(),
            state: None,
            state_id: AtomicU64::new(0),
        }
    }

    // ========================================================================
    // Functional Builder Methods
    // ========================================================================

    pub fn with_config(mut self, config: RouteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_state(mut self, state: RouteState) -> Self {
        self.state = Some(state);
        self
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Replaces the active state (`None` clears it)
    pub fn set_state(&mut self, state: Option<RouteState>) {
        debug!(
            state = state.as_ref().map(|s| s.name.as_str()).unwrap_or("<none>"),
            "active state changed"
        );
        self.state = state;
    }

    pub fn set_options(&mut self, options: RouterOptions) {
        self.options = options;
    }

    pub fn config_mut(&mut self) -> &mut RouteConfig {
        &mut self.config
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }
}

impl<T: RouteTree> RouterContext for Router<T> {
    type Tree = T;

    fn root_node(&self) -> &T {
        &self.tree
    }

    fn root_node_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    fn config(&self) -> &RouteConfig {
        &self.config
    }

    fn options(&self) -> RouterOptions {
        self.options.clone()
    }

    fn state(&self) -> Option<&RouteState> {
        self.state.as_ref()
    }

    /// Stamps a fresh id into `meta` when metadata is given
    fn make_state(
        &self,
        name: &str,
        params: Params,
        path: Option<String>,
        meta: Option<StateMeta>,
    ) -> RouteState {
        let meta = meta.map(|meta| StateMeta {
            id: Some(self.state_id.fetch_add(1, Ordering::Relaxed) + 1),
            ..meta
        });

        RouteState {
            name: name.to_string(),
            params,
            path,
            meta,
        }
    }
}
