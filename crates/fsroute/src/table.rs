//! Versioned holder for the live route tree
//!
//! Readers take a lock-free snapshot with [`RouteTable::load`]; a rebuild
//! produces a brand-new tree and publishes it with one atomic swap, so a
//! match in flight keeps the tree it started with.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::builder::build;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::matcher::MatchResult;
use crate::node::RouteNode;

/// A tree together with the version it was published as
#[derive(Debug)]
struct Published {
    version: u64,
    tree: Arc<RouteNode>,
}

/// The current route tree plus a version counter
#[derive(Debug)]
pub struct RouteTable {
    current: ArcSwap<Published>,
}

impl RouteTable {
    /// Wraps an initial tree as version 1
    pub fn new(tree: RouteNode) -> Self {
        Self {
            current: ArcSwap::from_pointee(Published {
                version: 1,
                tree: Arc::new(tree),
            }),
        }
    }

    /// Builds the initial tree from disk or any other port
    pub fn build<F>(fs: &F, root: impl AsRef<Path>, config: &BuildConfig) -> Result<Self>
    where
        F: FileSystem + ?Sized,
    {
        build(fs, root, config).map(Self::new)
    }

    /// Snapshot of the current tree
    pub fn load(&self) -> Arc<RouteNode> {
        Arc::clone(&self.current.load().tree)
    }

    pub fn version(&self) -> u64 {
        self.current.load().version
    }

    /// Snapshot of the current tree with the version it was published as
    pub fn load_versioned(&self) -> (u64, Arc<RouteNode>) {
        let current = self.current.load();
        (current.version, Arc::clone(&current.tree))
    }

    /// Publishes `tree`, returning its version
    ///
    /// Version and tree are swapped in as one value, so concurrent
    /// callers each get the version their own tree was published under.
    pub fn replace(&self, tree: RouteNode) -> u64 {
        let tree = Arc::new(tree);
        let previous = self.current.rcu(|current| Published {
            version: current.version + 1,
            tree: Arc::clone(&tree),
        });
        previous.version + 1
    }

    /// Rebuilds from `root` and publishes the result
    ///
    /// On failure the previous tree stays live and the error is returned.
    pub fn rebuild<F>(&self, fs: &F, root: impl AsRef<Path>, config: &BuildConfig) -> Result<u64>
    where
        F: FileSystem + ?Sized,
    {
        match build(fs, root, config) {
            Ok(tree) => {
                let version = self.replace(tree);
                info!(version, "route table updated");
                Ok(version)
            }
            Err(err) => {
                warn!(version = self.version(), error = %err, "rebuild failed, keeping current routes");
                Err(err)
            }
        }
    }

    /// Resolves `path` against the current tree
    pub fn match_path(&self, path: &str) -> Option<MatchResult> {
        self.current.load().tree.match_path(path)
    }
}
