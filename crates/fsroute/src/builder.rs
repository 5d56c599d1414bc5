//! Directory walk producing a [`RouteNode`] tree

use std::path::Path;

use tracing::{debug, info, trace};

use crate::config::{first_match, BuildConfig, CompiledRule};
use crate::error::{Result, RouteError};
use crate::fs::{DirEntry, EntryKind, FileSystem};
use crate::node::{display_pattern, ParamChild, RouteNode, WildcardChild};
use crate::segment::{parse_segment, SegmentKind};
use crate::validate::validate;

/// Builds and validates the route tree rooted at `root`
///
/// Directories become trie nodes according to their segment form; files
/// are annotated onto their directory's node by the first matching rule
/// in `config`. Entries are visited in name order, so rebuilding an
/// unchanged directory yields an identical tree.
///
/// # Errors
///
/// - [`RouteError::Io`] when the filesystem port fails
/// - [`RouteError::ConflictingSegment`] for competing dynamic siblings
/// - [`RouteError::Ambiguous`] when two grouping branches resolve one URL
/// - [`RouteError::Config`] for an invalid rule pattern
///
/// # Examples
///
/// ```
/// use fsroute::{build, BuildConfig, MemoryFileSystem};
///
/// let fs = MemoryFileSystem::new().with_file("app/users/[id]/page.tsx");
/// let tree = build(&fs, "app", &BuildConfig::app_router()).unwrap();
///
/// let m = tree.match_path("/users/42").unwrap();
/// assert_eq!(m.pattern, "/users/:id");
/// assert_eq!(m.param("id"), Some("42"));
/// ```
pub fn build<F>(fs: &F, root: impl AsRef<Path>, config: &BuildConfig) -> Result<RouteNode>
where
    F: FileSystem + ?Sized,
{
    let root = root.as_ref();
    let tree = build_unchecked(fs, root, config)?;
    validate(&tree)?;

    info!(
        root = %root.display(),
        backend = fs.name(),
        routes = tree.routes().len(),
        nodes = tree.node_count(),
        "route tree built"
    );
    Ok(tree)
}

/// Builds without running the ambiguity check
pub(crate) fn build_unchecked<F>(
    fs: &F,
    root: impl AsRef<Path>,
    config: &BuildConfig,
) -> Result<RouteNode>
where
    F: FileSystem + ?Sized,
{
    let rules = config.compile()?;
    let mut tree = RouteNode::default();
    scan_dir(fs, root.as_ref(), &rules, &mut tree, "")?;
    Ok(tree)
}

fn scan_dir<F>(
    fs: &F,
    dir: &Path,
    rules: &[CompiledRule<'_>],
    node: &mut RouteNode,
    prefix: &str,
) -> Result<()>
where
    F: FileSystem + ?Sized,
{
    let mut entries = fs.read_dir(dir).map_err(|source| RouteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(dir = %dir.display(), entries = entries.len(), "scanning directory");

    for entry in entries {
        match entry.kind {
            EntryKind::Directory => {
                let (child, child_prefix) = child_for(node, &entry.name, prefix)?;
                scan_dir(fs, &entry.path, rules, child, &child_prefix)?;
            }
            EntryKind::File => annotate(node, &entry, rules),
            EntryKind::Other => trace!(path = %entry.path.display(), "skipping entry"),
        }
    }

    Ok(())
}

/// Finds or creates the child a directory routes into
///
/// Returns the child together with its URL prefix (used for diagnostics).
fn child_for<'n>(
    node: &'n mut RouteNode,
    dir_name: &str,
    prefix: &str,
) -> Result<(&'n mut RouteNode, String)> {
    let segment = parse_segment(dir_name);

    match segment.kind {
        SegmentKind::Static => {
            let child = node.static_children.entry(dir_name.to_string()).or_default();
            Ok((child, format!("{prefix}/{dir_name}")))
        }
        SegmentKind::Exclude => {
            let child = node
                .static_children
                .entry(dir_name.to_string())
                .or_insert_with(|| RouteNode {
                    exclude_from_path: true,
                    ..RouteNode::default()
                });
            Ok((child, prefix.to_string()))
        }
        SegmentKind::Param => {
            if let Some(existing) = &node.param_child {
                if existing.name != segment.name {
                    return Err(RouteError::ConflictingSegment {
                        at: display_pattern(prefix),
                        existing: format!("[{}]", existing.name),
                        found: dir_name.to_string(),
                    });
                }
            }

            let child_prefix = format!("{prefix}/:{}", segment.name);
            let param = node.param_child.get_or_insert_with(|| {
                Box::new(ParamChild {
                    name: segment.name,
                    node: RouteNode::default(),
                })
            });
            Ok((&mut param.node, child_prefix))
        }
        SegmentKind::Wildcard => {
            if let Some(existing) = &node.wildcard_child {
                if existing.name != segment.name || existing.optional != segment.optional {
                    let existing = if existing.optional {
                        format!("[[...{}]]", existing.name)
                    } else {
                        format!("[...{}]", existing.name)
                    };
                    return Err(RouteError::ConflictingSegment {
                        at: display_pattern(prefix),
                        existing,
                        found: dir_name.to_string(),
                    });
                }
            }

            let child_prefix = if segment.optional {
                format!("{prefix}/*{}?", segment.name)
            } else {
                format!("{prefix}/*{}", segment.name)
            };
            let wildcard = node.wildcard_child.get_or_insert_with(|| {
                Box::new(WildcardChild {
                    name: segment.name,
                    optional: segment.optional,
                    node: RouteNode::default(),
                })
            });
            Ok((&mut wildcard.node, child_prefix))
        }
    }
}

/// Records a file on its directory's node per the first matching rule
fn annotate(node: &mut RouteNode, entry: &DirEntry, rules: &[CompiledRule<'_>]) {
    let Some(rule) = first_match(rules, &entry.name) else {
        trace!(file = %entry.path.display(), "no rule matches");
        return;
    };

    if rule.stack {
        node.stacks
            .entry(rule.property.clone())
            .or_default()
            .push(entry.path.clone());
    } else {
        node.names.insert(rule.property.clone(), entry.path.clone());
    }

    if rule.accept {
        node.accept = true;
    }
}
