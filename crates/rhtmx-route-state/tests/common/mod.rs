//! Shared fixtures for the integration tests
//!
//! `FakeTree` is a small in-memory route tree: each dotted route name owns a
//! path fragment like `/:id` or `/list?page`, and a route's full path is the
//! concatenation of its ancestors' fragments.

#![allow(dead_code)]

use anyhow::{bail, Result};
use rhtmx_route_state::{
    BuildOptions, MatchResult, ParamMeta, ParamSource, Params, QueryParamsMode, RouteState,
    RouteTree, RouterOptions, Segment, StateMeta, TrailingSlashMode,
};
use std::collections::BTreeMap;

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone)]
pub struct FakeSegment {
    pub name: String,
    pub path_parts: Vec<String>,
    pub url_params: Vec<String>,
    pub query_params: Vec<String>,
}

impl Segment for FakeSegment {
    fn url_params(&self) -> &[String] {
        &self.url_params
    }
}

#[derive(Debug, Default)]
pub struct FakeTree {
    pub root_path: String,
    segments: Vec<FakeSegment>,
}

fn split_query(path: &str) -> (&str, &str) {
    match path.split_once('?') {
        Some((path, query)) => (path, query),
        None => (path, ""),
    }
}

fn query_names(query: &str) -> Vec<String> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl FakeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds route `name` owning `fragment`; its parent must already exist
    pub fn with_route(mut self, name: &str, fragment: &str) -> Self {
        let (path, query) = split_query(fragment);
        let path_parts: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let url_params = path_parts
            .iter()
            .filter_map(|part| part.strip_prefix(':'))
            .map(str::to_string)
            .collect();

        self.segments.push(FakeSegment {
            name: name.to_string(),
            path_parts,
            url_params,
            query_params: query_names(query),
        });
        self
    }

    fn chain(&self, name: &str) -> Vec<&FakeSegment> {
        let parts: Vec<&str> = name.split('.').collect();
        let mut chain = Vec::with_capacity(parts.len());

        for depth in 1..=parts.len() {
            let prefix = parts[..depth].join(".");
            match self.segments.iter().find(|s| s.name == prefix) {
                Some(segment) => chain.push(segment),
                None => return Vec::new(),
            }
        }

        chain
    }

    fn root_query_params(&self) -> Vec<String> {
        query_names(split_query(&self.root_path).1)
    }

    fn declared_query_params(&self, chain: &[&FakeSegment]) -> Vec<String> {
        chain
            .iter()
            .flat_map(|s| s.query_params.iter().cloned())
            .chain(self.root_query_params())
            .collect()
    }

    fn meta_for(&self, chain: &[&FakeSegment]) -> ParamMeta {
        let mut meta = ParamMeta::new();
        for segment in chain {
            let mut entry = BTreeMap::new();
            for p in &segment.url_params {
                entry.insert(p.clone(), ParamSource::Url);
            }
            for p in &segment.query_params {
                entry.insert(p.clone(), ParamSource::Query);
            }
            meta.insert(segment.name.clone(), entry);
        }
        meta
    }

    fn try_match(
        &self,
        chain: &[&FakeSegment],
        path_parts: &[&str],
        options: &RouterOptions,
    ) -> Option<Params> {
        let pattern: Vec<&str> = chain
            .iter()
            .flat_map(|s| s.path_parts.iter().map(String::as_str))
            .collect();

        if pattern.len() != path_parts.len() {
            return None;
        }

        let mut params = Params::new();
        for (pattern_part, path_part) in pattern.iter().zip(path_parts) {
            match pattern_part.strip_prefix(':') {
                Some(name) => {
                    params.insert(name.to_string(), path_part.to_string());
                }
                None => {
                    let same = if options.case_sensitive {
                        pattern_part == path_part
                    } else {
                        pattern_part.eq_ignore_ascii_case(path_part)
                    };
                    if !same {
                        return None;
                    }
                }
            }
        }
        Some(params)
    }
}

impl RouteTree for FakeTree {
    type Segment = FakeSegment;

    fn segments_by_name(&self, name: &str) -> Vec<&FakeSegment> {
        self.chain(name)
    }

    fn build_path(&self, name: &str, params: &Params, options: &BuildOptions) -> Result<String> {
        let chain = self.chain(name);
        if chain.is_empty() {
            bail!("Route '{name}' not found");
        }

        let mut path = String::new();
        for part in chain.iter().flat_map(|s| s.path_parts.iter()) {
            let value = match part.strip_prefix(':') {
                Some(param) => match params.get(param) {
                    Some(value) => value.as_str(),
                    None => bail!("Cannot build path for '{name}': missing parameter '{param}'"),
                },
                None => part.as_str(),
            };
            path.push('/');
            path.push_str(value);
        }

        match options.trailing_slash_mode {
            TrailingSlashMode::Always => path.push('/'),
            TrailingSlashMode::Default | TrailingSlashMode::Never => {}
        }
        if path.is_empty() {
            path.push('/');
        }

        let query: Vec<String> = self
            .declared_query_params(&chain)
            .into_iter()
            .filter_map(|q| params.get(&q).map(|v| format!("{q}={v}")))
            .collect();

        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        Ok(path)
    }

    fn build_state(&self, name: &str, params: &Params) -> Result<RouteState> {
        let chain = self.chain(name);
        if chain.is_empty() {
            bail!("Route '{name}' not found");
        }

        Ok(RouteState::new(name, params.clone())
            .with_meta(StateMeta::from_params(self.meta_for(&chain))))
    }

    fn match_path(&self, path: &str, options: &RouterOptions) -> Option<MatchResult> {
        let (path, query) = split_query(path);
        if options.strict_trailing_slash && path.len() > 1 && path.ends_with('/') {
            return None;
        }
        let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        // Static segments win over params at equal depth
        let mut candidates: Vec<(Vec<&FakeSegment>, Params)> = self
            .segments
            .iter()
            .map(|s| self.chain(&s.name))
            .filter_map(|chain| {
                let params = self.try_match(&chain, &path_parts, options)?;
                Some((chain, params))
            })
            .collect();
        candidates.sort_by_key(|(_, params)| params.len());

        let (chain, mut params) = candidates.into_iter().next()?;
        let declared = self.declared_query_params(&chain);

        for pair in query.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if declared.iter().any(|d| d == key) {
                params.insert(key.to_string(), value.to_string());
            } else {
                match options.query_params_mode {
                    QueryParamsMode::Strict => return None,
                    QueryParamsMode::Loose => {
                        params.insert(key.to_string(), value.to_string());
                    }
                    QueryParamsMode::Default => {}
                }
            }
        }

        let name = chain.last()?.name.clone();
        Some(MatchResult {
            name,
            params,
            meta: self.meta_for(&chain),
        })
    }

    fn set_path(&mut self, path: &str) {
        self.root_path = path.to_string();
    }
}

/// Route tree used by most tests
///
/// | name              | path                   |
/// |-------------------|------------------------|
/// | `home`            | `/home`                |
/// | `users`           | `/users?sort`          |
/// | `users.view`      | `/users/:id`           |
/// | `users.view.edit` | `/users/:id/edit`      |
/// | `users.list`      | `/users/list?page`     |
/// | `section`         | `/section/:section`    |
/// | `section.item`    | `/section/:section/:id`|
/// | `legacy`          | `/legacy/:uid`         |
pub fn app_tree() -> FakeTree {
    FakeTree::new()
        .with_route("home", "/home")
        .with_route("users", "/users?sort")
        .with_route("users.view", "/:id")
        .with_route("users.view.edit", "/edit")
        .with_route("users.list", "/list?page")
        .with_route("section", "/section/:section")
        .with_route("section.item", "/:id")
        .with_route("legacy", "/legacy/:uid")
}
