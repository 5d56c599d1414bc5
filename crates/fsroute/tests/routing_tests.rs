//! Integration tests for fsroute
//!
//! Organized by feature area:
//! - Static routes and contribution merging
//! - Params and wildcards
//! - Grouping directories and ambiguity
//! - Backtracking isolation
//! - Rebuilds (in-memory and on disk)

use fsroute::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};

fn app(files: &[&str]) -> RouteNode {
    let fs = MemoryFileSystem::new().with_dir("app").with_files(files);
    build(&fs, "app", &BuildConfig::app_router()).unwrap()
}

fn paths(items: &[&str]) -> Vec<PathBuf> {
    items.iter().map(PathBuf::from).collect()
}

// ============================================================================
// Static routes
// ============================================================================

#[test]
fn test_static_route_merges_every_ancestor() {
    let root = app(&[
        "app/layout.tsx",
        "app/middleware.ts",
        "app/error.tsx",
        "app/dashboard/layout.tsx",
        "app/dashboard/settings/layout.tsx",
        "app/dashboard/settings/error.tsx",
        "app/dashboard/settings/page.tsx",
    ]);

    let m = root.match_path("/dashboard/settings").unwrap();
    assert_eq!(m.pattern, "/dashboard/settings");
    assert!(m.params.is_empty());
    assert_eq!(
        m.stack("layouts"),
        paths(&[
            "app/layout.tsx",
            "app/dashboard/layout.tsx",
            "app/dashboard/settings/layout.tsx",
        ])
        .as_slice()
    );
    assert_eq!(m.stack("middleware"), paths(&["app/middleware.ts"]).as_slice());
    assert_eq!(m.name("error"), Some(Path::new("app/dashboard/settings/error.tsx")));
    assert_eq!(m.name("page"), Some(Path::new("app/dashboard/settings/page.tsx")));
}

#[rstest]
#[case("/about")]
#[case("/about/")]
#[case("//about")]
fn test_static_route_path_forms(#[case] path: &str) {
    let root = app(&["app/about/page.tsx"]);
    assert_eq!(root.match_path(path).unwrap().pattern, "/about");
}

#[test]
fn test_unknown_path_is_none() {
    let root = app(&["app/page.tsx", "app/about/page.tsx"]);
    assert!(root.match_path("/contact").is_none());
    assert!(root.match_path("/about/team").is_none());
}

// ============================================================================
// Params and wildcards
// ============================================================================

#[test]
fn test_param_capture() {
    let root = app(&["app/users/[id]/page.tsx"]);
    let m = root.match_path("/users/42").unwrap();
    assert_eq!(m.param("id"), Some("42"));
    assert_eq!(m.pattern, "/users/:id");
}

#[test]
fn test_backslash_is_segment_text() {
    let root = app(&["app/users/[id]/page.tsx", "app/files/[...path]/page.tsx"]);

    let m = root.match_path("/users/a\\b").unwrap();
    assert_eq!(m.pattern, "/users/:id");
    assert_eq!(m.param("id"), Some("a\\b"));

    let m = root.match_path("/files/dir\\x.txt").unwrap();
    assert_eq!(m.param("path"), Some("dir\\x.txt"));

    assert!(root.match_path("\\users\\42").is_none());
}

#[test]
fn test_param_is_percent_decoded() {
    let root = app(&["app/users/[id]/page.tsx"]);
    let m = root.match_path("/users/j%C3%BCrgen%20k").unwrap();
    assert_eq!(m.param("id"), Some("jürgen k"));
}

#[test]
fn test_required_wildcard() {
    let root = app(&["app/files/[...path]/page.tsx"]);

    let m = root.match_path("/files/a/b/c").unwrap();
    assert_eq!(m.param("path"), Some("a/b/c"));
    assert_eq!(m.pattern, "/files/*path");

    assert!(root.match_path("/files").is_none());
}

#[test]
fn test_optional_wildcard() {
    let root = app(&["app/files/[[...path]]/page.tsx"]);

    let m = root.match_path("/files").unwrap();
    assert!(!m.params.contains_key("path"));
    assert_eq!(m.pattern, "/files/*path?");

    let m = root.match_path("/files/a").unwrap();
    assert_eq!(m.param("path"), Some("a"));
}

#[test]
fn test_wildcard_node_contributions() {
    let root = app(&[
        "app/docs/layout.tsx",
        "app/docs/[...slug]/layout.tsx",
        "app/docs/[...slug]/page.tsx",
    ]);
    let m = root.match_path("/docs/guide/intro").unwrap();
    assert_eq!(
        m.stack("layouts"),
        paths(&["app/docs/layout.tsx", "app/docs/[...slug]/layout.tsx"]).as_slice()
    );
}

#[test]
fn test_multiple_params() {
    let root = app(&["app/shop/[category]/[item]/page.tsx"]);
    let m = root.match_path("/shop/electronics/laptop").unwrap();
    assert_eq!(m.pattern, "/shop/:category/:item");
    assert_eq!(m.param("category"), Some("electronics"));
    assert_eq!(m.param("item"), Some("laptop"));
}

// ============================================================================
// Grouping directories
// ============================================================================

#[test]
fn test_group_page_reachable_at_root() {
    let root = app(&["app/(group)/page.tsx"]);

    let m = root.match_path("/").unwrap();
    assert_eq!(m.pattern, "/");
    assert_eq!(m.name("page"), Some(Path::new("app/(group)/page.tsx")));

    assert!(root.match_path("/group").is_none());
    assert!(root.match_path("/group/").is_none());
}

#[test]
fn test_groups_share_a_url_level() {
    let root = app(&[
        "app/(marketing)/layout.tsx",
        "app/(marketing)/about/page.tsx",
        "app/(shop)/layout.tsx",
        "app/(shop)/cart/page.tsx",
    ]);

    let m = root.match_path("/about").unwrap();
    assert_eq!(m.stack("layouts"), paths(&["app/(marketing)/layout.tsx"]).as_slice());

    let m = root.match_path("/cart").unwrap();
    assert_eq!(m.pattern, "/cart");
    assert_eq!(m.stack("layouts"), paths(&["app/(shop)/layout.tsx"]).as_slice());
}

#[test]
fn test_ambiguous_groups_fail_at_build_time() {
    let fs = MemoryFileSystem::new()
        .with_file("app/(a)/page.tsx")
        .with_file("app/(b)/page.tsx");

    let err = build(&fs, "app", &BuildConfig::app_router()).unwrap_err();
    match &err {
        RouteError::Ambiguous { at, branches } => {
            assert_eq!(at, "/");
            assert_eq!(branches, &vec!["(a)".to_string(), "(b)".to_string()]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
    assert!(err.to_string().contains("(a), (b)"));
}

#[test]
fn test_static_beats_group_at_same_level() {
    let root = app(&["app/about/page.tsx", "app/(alt)/about/page.tsx"]);
    let m = root.match_path("/about").unwrap();
    assert_eq!(m.name("page"), Some(Path::new("app/about/page.tsx")));
}

#[test]
fn test_group_reached_after_static_dead_end() {
    let root = app(&["app/blog/layout.tsx", "app/(docs)/blog/intro/page.tsx"]);
    let m = root.match_path("/blog/intro").unwrap();
    assert_eq!(m.pattern, "/blog/intro");
    // The abandoned `app/blog` branch contributes nothing
    assert!(m.stack("layouts").is_empty());
}

// ============================================================================
// Backtracking isolation
// ============================================================================

#[test]
fn test_static_and_param_siblings() {
    let root = app(&[
        "app/users/settings/layout.tsx",
        "app/users/settings/error.tsx",
        "app/users/settings/page.tsx",
        "app/users/[id]/page.tsx",
    ]);

    let m = root.match_path("/users/settings").unwrap();
    assert_eq!(m.pattern, "/users/settings");
    assert!(m.params.is_empty());
    assert_eq!(m.name("page"), Some(Path::new("app/users/settings/page.tsx")));

    let m = root.match_path("/users/42").unwrap();
    assert_eq!(m.pattern, "/users/:id");
    assert_eq!(m.param("id"), Some("42"));
    assert_eq!(m.name("page"), Some(Path::new("app/users/[id]/page.tsx")));
    assert_eq!(m.name("error"), None);
    assert!(m.stack("layouts").is_empty());
}

#[test]
fn test_failed_param_attempt_unbinds() {
    let root = app(&[
        "app/[lang]/about/page.tsx",
        "app/[...rest]/page.tsx",
    ]);
    let m = root.match_path("/en/contact").unwrap();
    assert_eq!(m.pattern, "/*rest");
    assert_eq!(m.param("rest"), Some("en/contact"));
    assert!(!m.params.contains_key("lang"));
}

// ============================================================================
// Route listing
// ============================================================================

#[test]
fn test_routes_listing() {
    let root = app(&[
        "app/page.tsx",
        "app/(shop)/cart/page.tsx",
        "app/users/[id]/page.tsx",
        "app/docs/[[...slug]]/page.tsx",
        "app/files/[...path]/route.ts",
        "app/users/layout.tsx",
    ]);

    let patterns: Vec<String> = root.routes().into_iter().map(|r| r.pattern).collect();
    assert_eq!(
        patterns,
        vec!["/", "/cart", "/docs/*slug?", "/files/*path", "/users/:id"]
    );

    let users = root
        .routes()
        .into_iter()
        .find(|r| r.pattern == "/users/:id")
        .unwrap();
    assert_eq!(users.stacks["layouts"], paths(&["app/users/layout.tsx"]));
}

// ============================================================================
// Rebuilds
// ============================================================================

#[test]
fn test_rebuild_is_idempotent() {
    let fs = MemoryFileSystem::new().with_files([
        "app/layout.tsx",
        "app/b.middleware.ts",
        "app/middleware.ts",
        "app/users/[id]/page.tsx",
        "app/(g)/about/page.tsx",
        "app/docs/[[...slug]]/page.tsx",
    ]);
    let config = BuildConfig::app_router().with_rule(FileRule::stack("*.middleware.ts", "middleware"));

    let first = build(&fs, "app", &config).unwrap();
    let second = build(&fs, "app", &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.routes(), second.routes());
}

#[test]
fn test_build_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for file in [
        "layout.tsx",
        "page.tsx",
        "users/[id]/page.tsx",
        "(admin)/dashboard/page.tsx",
    ] {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "").unwrap();
    }

    let tree = build(&OsFileSystem, root, &BuildConfig::app_router()).unwrap();

    let m = tree.match_path("/users/7").unwrap();
    assert_eq!(m.param("id"), Some("7"));
    assert_eq!(m.name("page"), Some(root.join("users/[id]/page.tsx").as_path()));
    assert_eq!(m.stack("layouts"), &[root.join("layout.tsx")]);

    assert!(tree.match_path("/dashboard").is_some());

    let again = build(&OsFileSystem, root, &BuildConfig::app_router()).unwrap();
    assert_eq!(tree, again);
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("routes.toml");
    std::fs::write(
        &config_path,
        r#"
        [[rules]]
        pattern = "+page.*"
        property = "page"
        accept = true

        [[rules]]
        pattern = "+layout.*"
        property = "layouts"
        stack = true
        "#,
    )
    .unwrap();
    let config = BuildConfig::from_file(&config_path).unwrap();

    let fs = MemoryFileSystem::new()
        .with_file("routes/+layout.svelte")
        .with_file("routes/blog/[slug]/+page.svelte")
        .with_file("routes/blog/page.svelte");
    let tree = build(&fs, "routes", &config).unwrap();

    let m = tree.match_path("/blog/hello").unwrap();
    assert_eq!(m.pattern, "/blog/:slug");
    assert_eq!(m.stack("layouts"), paths(&["routes/+layout.svelte"]).as_slice());
    assert!(tree.match_path("/blog").is_none());
}

#[test]
fn test_route_table_publishes_rebuild() {
    let config = BuildConfig::app_router();
    let before = MemoryFileSystem::new().with_file("app/page.tsx");
    let after = MemoryFileSystem::new()
        .with_file("app/page.tsx")
        .with_file("app/blog/[slug]/page.tsx");

    let table = RouteTable::build(&before, "app", &config).unwrap();
    assert!(table.match_path("/blog/x").is_none());

    let version = table.rebuild(&after, "app", &config).unwrap();
    assert_eq!(version, 2);
    assert_eq!(table.match_path("/blog/x").unwrap().param("slug"), Some("x"));
}
