//! Route trie nodes
//!
//! A [`RouteNode`] tree is produced by [`crate::build`] and never mutated
//! afterwards; a rescan yields a brand-new tree.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One node of the route trie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteNode {
    pub(crate) static_children: BTreeMap<String, RouteNode>,
    pub(crate) param_child: Option<Box<ParamChild>>,
    pub(crate) wildcard_child: Option<Box<WildcardChild>>,
    pub(crate) exclude_from_path: bool,
    pub(crate) accept: bool,
    pub(crate) names: BTreeMap<String, PathBuf>,
    pub(crate) stacks: BTreeMap<String, Vec<PathBuf>>,
}

/// Child capturing exactly one segment: `[id]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamChild {
    pub name: String,
    pub node: RouteNode,
}

/// Child capturing every remaining segment: `[...slug]` / `[[...slug]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardChild {
    pub name: String,
    pub optional: bool,
    pub node: RouteNode,
}

/// An acceptable node as seen from the URL space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Pattern in matcher syntax: `/users/:id`, `/docs/*slug?`
    pub pattern: String,
    /// Names a match ending here carries (deepest wins)
    pub names: BTreeMap<String, PathBuf>,
    /// Stacks a match ending here carries (root first)
    pub stacks: BTreeMap<String, Vec<PathBuf>>,
}

impl RouteNode {
    /// Children keyed by their raw directory name, grouping directories included
    pub fn static_children(&self) -> &BTreeMap<String, RouteNode> {
        &self.static_children
    }

    pub fn static_child(&self, segment: &str) -> Option<&RouteNode> {
        self.static_children.get(segment)
    }

    pub fn param_child(&self) -> Option<&ParamChild> {
        self.param_child.as_deref()
    }

    pub fn wildcard_child(&self) -> Option<&WildcardChild> {
        self.wildcard_child.as_deref()
    }

    /// Grouping directory contributing nothing to the URL
    pub fn is_excluded(&self) -> bool {
        self.exclude_from_path
    }

    /// A match may terminate here
    pub fn is_accept(&self) -> bool {
        self.accept
    }

    pub fn names(&self) -> &BTreeMap<String, PathBuf> {
        &self.names
    }

    pub fn stacks(&self) -> &BTreeMap<String, Vec<PathBuf>> {
        &self.stacks
    }

    /// Excluded static children, in key order
    pub(crate) fn excluded_children(&self) -> impl Iterator<Item = (&String, &RouteNode)> {
        self.static_children
            .iter()
            .filter(|(_, child)| child.exclude_from_path)
    }

    /// Whether this node closes a match without consuming a segment:
    /// it accepts, or one of its grouping children does
    pub(crate) fn closes_in_place(&self) -> bool {
        self.accept
            || self
                .excluded_children()
                .any(|(_, child)| child.closes_in_place())
    }

    /// Total number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        1 + self
            .static_children
            .values()
            .map(RouteNode::node_count)
            .sum::<usize>()
            + self
                .param_child
                .as_ref()
                .map_or(0, |child| child.node.node_count())
            + self
                .wildcard_child
                .as_ref()
                .map_or(0, |child| child.node.node_count())
    }

    /// Lists every acceptable node, sorted by pattern
    ///
    /// ```
    /// use fsroute::{build, BuildConfig, MemoryFileSystem};
    ///
    /// let fs = MemoryFileSystem::new()
    ///     .with_file("app/page.tsx")
    ///     .with_file("app/users/[id]/page.tsx");
    /// let tree = build(&fs, "app", &BuildConfig::app_router()).unwrap();
    ///
    /// let patterns: Vec<String> = tree.routes().into_iter().map(|r| r.pattern).collect();
    /// assert_eq!(patterns, vec!["/", "/users/:id"]);
    /// ```
    pub fn routes(&self) -> Vec<RouteEntry> {
        let mut out = Vec::new();
        self.collect_routes(String::new(), &BTreeMap::new(), &BTreeMap::new(), &mut out);
        out.sort_by(|a, b| a.pattern.cmp(&b.pattern));
        out
    }

    fn collect_routes(
        &self,
        pattern: String,
        names: &BTreeMap<String, PathBuf>,
        stacks: &BTreeMap<String, Vec<PathBuf>>,
        out: &mut Vec<RouteEntry>,
    ) {
        let mut names = names.clone();
        names.extend(self.names.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut stacks = stacks.clone();
        for (key, paths) in &self.stacks {
            stacks
                .entry(key.clone())
                .or_default()
                .extend(paths.iter().cloned());
        }

        if self.accept {
            out.push(RouteEntry {
                pattern: display_pattern(&pattern),
                names: names.clone(),
                stacks: stacks.clone(),
            });
        }

        for (key, child) in &self.static_children {
            let child_pattern = if child.exclude_from_path {
                pattern.clone()
            } else {
                format!("{pattern}/{key}")
            };
            child.collect_routes(child_pattern, &names, &stacks, out);
        }

        if let Some(param) = &self.param_child {
            param
                .node
                .collect_routes(format!("{pattern}/:{}", param.name), &names, &stacks, out);
        }

        if let Some(wildcard) = &self.wildcard_child {
            wildcard.node.collect_routes(
                format!("{pattern}{}", wildcard_fragment(wildcard)),
                &names,
                &stacks,
                out,
            );
        }
    }
}

/// `/*name` or `/*name?`
pub(crate) fn wildcard_fragment(wildcard: &WildcardChild) -> String {
    if wildcard.optional {
        format!("/*{}?", wildcard.name)
    } else {
        format!("/*{}", wildcard.name)
    }
}

/// Empty pattern renders as the root
pub(crate) fn display_pattern(pattern: &str) -> String {
    if pattern.is_empty() {
        "/".to_string()
    } else {
        pattern.to_string()
    }
}
