use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use fsroute::{build, MatchResult, OsFileSystem};

use super::load_config;

/// Resolves each path and prints the outcome; returns how many missed
pub fn execute(dir: &Path, paths: &[String], config: Option<&Path>) -> Result<usize> {
    let config = load_config(config)?;
    let tree = build(&OsFileSystem, dir, &config)
        .with_context(|| format!("Failed to build routes from {}", dir.display()))?;

    let mut unmatched = 0;
    for path in paths {
        match tree.match_path(path) {
            Some(found) => print!("{}", render_match(path, &found)),
            None => {
                unmatched += 1;
                println!("{} {}", path.bold(), "no match".red());
            }
        }
    }

    Ok(unmatched)
}

/// Human-readable match: pattern, then params, names and stacks sorted by key
pub fn render_match(path: &str, found: &MatchResult) -> String {
    let mut out = format!("{} -> {}\n", path.bold(), found.pattern.green());

    let mut params: Vec<_> = found.params.iter().collect();
    params.sort();
    for (name, value) in params {
        out.push_str(&format!("    :{name} = {value:?}\n"));
    }

    for (property, path) in &found.names {
        out.push_str(&format!("    {property}: {}\n", path.display()));
    }

    for (property, paths) in &found.stacks {
        out.push_str(&format!("    {property}:\n"));
        for path in paths {
            out.push_str(&format!("      - {}\n", path.display()));
        }
    }

    out
}
