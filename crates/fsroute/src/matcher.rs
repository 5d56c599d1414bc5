//! Backtracking path resolution over a built route tree
//!
//! The search is depth-first with a fixed branch order at every node:
//!
//! 1. **Static** child whose key equals the current segment
//! 2. **Param** child, binding one segment
//! 3. **Wildcard** child, binding every remaining segment
//! 4. **Grouping** (excluded) children, consuming nothing
//!
//! The first successful path wins; there is no scoring.
//!
//! Accumulated state is never mutated. Each entered node pushes a
//! [`Trail`] frame on the call stack that borrows its parent frame; a
//! failed branch simply returns and its frame is gone. The result is
//! folded from the trail, root to leaf, only once a match succeeds.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::node::{display_pattern, RouteNode};
use crate::path::{decode_lossless, segments};

/// Outcome of resolving one request path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Matched pattern: `/users/:id`, `/docs/*slug`, `/` for the root
    pub pattern: String,
    /// Percent-decoded captures keyed by parameter name
    pub params: HashMap<String, String>,
    /// Single contributions, the deepest node along the path winning
    pub names: BTreeMap<String, PathBuf>,
    /// Ordered contributions, root first
    pub stacks: BTreeMap<String, Vec<PathBuf>>,
}

impl MatchResult {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn name(&self, property: &str) -> Option<&Path> {
        self.names.get(property).map(PathBuf::as_path)
    }

    /// Stack contents, empty when no node along the path contributed
    pub fn stack(&self, property: &str) -> &[PathBuf] {
        self.stacks
            .get(property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Resolves `path` against the tree rooted at `root`
///
/// Returns `None` when no acceptable node is reachable. Never fails:
/// undecodable captures are bound as raw text.
pub fn match_path(root: &RouteNode, path: &str) -> Option<MatchResult> {
    let matcher = Matcher {
        segments: segments(path).collect(),
    };
    let trail = Trail {
        parent: None,
        node: root,
        step: Step::Root,
        binding: None,
    };

    let result = matcher.descend(&trail, 0);
    match &result {
        Some(m) => debug!(path, pattern = %m.pattern, "route matched"),
        None => debug!(path, "no route matched"),
    }
    result
}

impl RouteNode {
    /// Resolves `path` against this tree, see [`match_path`]
    pub fn match_path(&self, path: &str) -> Option<MatchResult> {
        match_path(self, path)
    }
}

/// How a frame was entered; renders its pattern fragment
#[derive(Debug, Clone, Copy)]
enum Step<'t> {
    Root,
    Static(&'t str),
    Param(&'t str),
    Wildcard { name: &'t str, optional: bool },
    Group,
}

/// One entered node, linked to the frame that entered it
struct Trail<'t> {
    parent: Option<&'t Trail<'t>>,
    node: &'t RouteNode,
    step: Step<'t>,
    binding: Option<(&'t str, String)>,
}

struct Matcher<'p> {
    segments: Vec<&'p str>,
}

impl Matcher<'_> {
    fn descend(&self, trail: &Trail<'_>, index: usize) -> Option<MatchResult> {
        let node = trail.node;

        if index == self.segments.len() {
            if node.accept {
                return Some(finish(trail));
            }

            // An optional wildcard closes with zero segments and binds nothing
            if let Some(wildcard) = node.wildcard_child.as_deref().filter(|w| w.optional) {
                let step = Step::Wildcard {
                    name: wildcard.name.as_str(),
                    optional: true,
                };
                if let Some(found) = self.enter(trail, &wildcard.node, step, None, index) {
                    return Some(found);
                }
            }

            return self.try_groups(trail, index);
        }

        let segment = self.segments[index];

        if let Some((key, child)) = node
            .static_children
            .get_key_value(segment)
            .filter(|(_, child)| !child.exclude_from_path)
        {
            let step = Step::Static(key.as_str());
            if let Some(found) = self.enter(trail, child, step, None, index + 1) {
                return Some(found);
            }
        }

        if let Some(param) = node.param_child.as_deref() {
            let binding = (param.name.as_str(), decode_lossless(segment));
            let step = Step::Param(param.name.as_str());
            if let Some(found) = self.enter(trail, &param.node, step, Some(binding), index + 1) {
                return Some(found);
            }
        }

        if let Some(wildcard) = node.wildcard_child.as_deref() {
            let rest = self.segments[index..].join("/");
            let binding = (wildcard.name.as_str(), decode_lossless(&rest));
            let step = Step::Wildcard {
                name: wildcard.name.as_str(),
                optional: wildcard.optional,
            };
            let end = self.segments.len();
            if let Some(found) = self.enter(trail, &wildcard.node, step, Some(binding), end) {
                return Some(found);
            }
        }

        self.try_groups(trail, index)
    }

    /// Grouping children are entered without consuming a segment
    fn try_groups(&self, trail: &Trail<'_>, index: usize) -> Option<MatchResult> {
        trail
            .node
            .excluded_children()
            .find_map(|(_, child)| self.enter(trail, child, Step::Group, None, index))
    }

    fn enter<'t>(
        &self,
        parent: &'t Trail<'t>,
        node: &'t RouteNode,
        step: Step<'t>,
        binding: Option<(&'t str, String)>,
        index: usize,
    ) -> Option<MatchResult> {
        trace!(?step, index, "trying branch");
        let frame = Trail {
            parent: Some(parent),
            node,
            step,
            binding,
        };
        self.descend(&frame, index)
    }
}

/// Folds a successful trail into a result, root first
fn finish(leaf: &Trail<'_>) -> MatchResult {
    let mut frames = Vec::new();
    let mut cursor = Some(leaf);
    while let Some(frame) = cursor {
        frames.push(frame);
        cursor = frame.parent;
    }

    let mut result = MatchResult::default();
    for frame in frames.into_iter().rev() {
        match frame.step {
            Step::Root | Step::Group => {}
            Step::Static(literal) => {
                result.pattern.push('/');
                result.pattern.push_str(literal);
            }
            Step::Param(name) => {
                result.pattern.push_str("/:");
                result.pattern.push_str(name);
            }
            Step::Wildcard { name, optional } => {
                result.pattern.push_str("/*");
                result.pattern.push_str(name);
                if optional {
                    result.pattern.push('?');
                }
            }
        }

        if let Some((name, value)) = &frame.binding {
            result.params.insert(name.to_string(), value.clone());
        }

        let node = frame.node;
        result
            .names
            .extend(node.names.iter().map(|(k, v)| (k.clone(), v.clone())));
        for (key, paths) in &node.stacks {
            result
                .stacks
                .entry(key.clone())
                .or_default()
                .extend(paths.iter().cloned());
        }
    }

    result.pattern = display_pattern(&result.pattern);
    result
}
