use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use fsroute::{build, OsFileSystem, RouteEntry};

use super::load_config;

pub fn execute(dir: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let tree = build(&OsFileSystem, dir, &config)
        .with_context(|| format!("Failed to build routes from {}", dir.display()))?;

    let routes = tree.routes();
    println!("{}", format!("{} routes", routes.len()).green().bold());
    println!();

    for route in &routes {
        print!("{}", render_route(route));
    }

    Ok(())
}

/// Pattern on its own line, then one indented line per named file
pub fn render_route(route: &RouteEntry) -> String {
    let mut out = format!("{}\n", route.pattern.cyan());
    for (property, path) in &route.names {
        out.push_str(&format!("    {property}: {}\n", path.display()));
    }
    out
}
