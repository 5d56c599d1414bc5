//! Build-time ambiguity check

use tracing::warn;

use crate::error::{Result, RouteError};
use crate::node::{display_pattern, wildcard_fragment, RouteNode};

/// Rejects trees where one URL would resolve through two grouping branches
///
/// Under each parent, at most one excluded static child may close a match
/// without consuming a segment (it accepts, directly or through its own
/// grouping children). Children are visited whatever the outcome at the
/// current level; the first violation found is returned.
pub fn validate(node: &RouteNode) -> Result<()> {
    validate_at(node, "")
}

fn validate_at(node: &RouteNode, prefix: &str) -> Result<()> {
    let closing: Vec<String> = node
        .excluded_children()
        .filter(|(_, child)| child.closes_in_place())
        .map(|(key, _)| key.clone())
        .collect();

    let mut first_error = None;

    if closing.len() > 1 {
        let at = display_pattern(prefix);
        warn!(at = %at, branches = ?closing, "ambiguous grouping directories");
        first_error = Some(RouteError::Ambiguous {
            at,
            branches: closing,
        });
    }

    let mut children: Vec<(String, &RouteNode)> = node
        .static_children
        .iter()
        .map(|(key, child)| {
            let child_prefix = if child.exclude_from_path {
                prefix.to_string()
            } else {
                format!("{prefix}/{key}")
            };
            (child_prefix, child)
        })
        .collect();

    if let Some(param) = &node.param_child {
        children.push((format!("{prefix}/:{}", param.name), &param.node));
    }
    if let Some(wildcard) = &node.wildcard_child {
        children.push((format!("{prefix}{}", wildcard_fragment(wildcard)), &wildcard.node));
    }

    for (child_prefix, child) in children {
        if let Err(err) = validate_at(child, &child_prefix) {
            first_error.get_or_insert(err);
        }
    }

    first_error.map_or(Ok(()), Err)
}
