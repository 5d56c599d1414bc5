//! # fsroute
//!
//! Derives a URL-dispatch trie from a directory layout and resolves request
//! paths against it.
//!
//! - Static segments (`about/`)
//! - Dynamic segments (`[id]/` → `/users/:id`)
//! - Catch-all segments (`[...slug]/` → `/docs/*slug`)
//! - Optional catch-all segments (`[[...slug]]/` → `/docs/*slug?`)
//! - Grouping directories (`(marketing)/`) that add nothing to the URL
//!
//! What a *file* means is up to the caller: a [`BuildConfig`] maps file-name
//! globs to properties that are either single names (deepest directory
//! wins) or stacks (collected root first), and says which files make their
//! directory routable.
//!
//! ## Matching Order
//!
//! At every node the matcher tries, in this order, and backtracks on failure:
//!
//! 1. **Static** child equal to the segment
//! 2. **Param** child
//! 3. **Wildcard** child (consumes the rest of the path)
//! 4. **Grouping** children (consume nothing)
//!
//! ## Example
//!
//! ```
//! use fsroute::{build, BuildConfig, MemoryFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("app/layout.tsx")
//!     .with_file("app/(shop)/products/[id]/page.tsx")
//!     .with_file("app/docs/[[...slug]]/page.tsx");
//!
//! let tree = build(&fs, "app", &BuildConfig::app_router()).unwrap();
//!
//! let m = tree.match_path("/products/42").unwrap();
//! assert_eq!(m.pattern, "/products/:id");
//! assert_eq!(m.param("id"), Some("42"));
//! assert_eq!(m.stack("layouts"), [Path::new("app/layout.tsx").to_path_buf()]);
//!
//! let m = tree.match_path("/docs").unwrap();
//! assert_eq!(m.pattern, "/docs/*slug?");
//! assert_eq!(m.param("slug"), None);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod builder;
pub mod config;
mod error;
pub mod fs;
mod matcher;
mod node;
pub mod path;
pub mod segment;
mod table;
mod validate;

pub use builder::build;
pub use config::{BuildConfig, FileRule};
pub use error::{Result, RouteError};
pub use fs::{DirEntry, EntryKind, FileSystem, MemoryFileSystem, OsFileSystem};
pub use matcher::{match_path, MatchResult};
pub use node::{ParamChild, RouteEntry, RouteNode, WildcardChild};
pub use segment::{parse_segment, Segment, SegmentKind};
pub use table::RouteTable;
pub use validate::validate;
