use std::path::Path;

use anyhow::Result;
#[cfg(feature = "watch")]
use anyhow::Context;
use colored::Colorize;

#[cfg(feature = "watch")]
pub fn execute(dir: &Path, config: Option<&Path>) -> Result<()> {
    use std::sync::mpsc;
    use std::time::Duration;

    use fsroute::{OsFileSystem, RouteTable};
    use notify::{Event, EventKind, RecursiveMode, Watcher};
    use tracing::{error, info};

    use super::load_config;

    let config = load_config(config)?;
    let table = RouteTable::build(&OsFileSystem, dir, &config)
        .with_context(|| format!("Failed to build routes from {}", dir.display()))?;
    info!(
        version = table.version(),
        routes = table.load().routes().len(),
        "initial route tree ready"
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            // Only structural changes can alter the tree
            if matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(_)
            ) {
                let _ = tx.send(event);
            }
        }
        Err(e) => error!("Watch error: {:?}", e),
    })?;
    watcher.watch(dir, RecursiveMode::Recursive)?;

    println!("  {} Watching: {}", "👀".cyan(), dir.display());

    let debounce = Duration::from_millis(200);
    while let Ok(event) = rx.recv() {
        // Batch bursts of events (editors, git checkouts) into one rebuild
        let mut changed = event.paths.len();
        while let Ok(more) = rx.recv_timeout(debounce) {
            changed += more.paths.len();
        }

        info!(paths = changed, "change detected, rebuilding routes");
        match table.rebuild(&OsFileSystem, dir, &config) {
            Ok(_) => {
                let (version, tree) = table.load_versioned();
                let routes = tree.routes();
                println!(
                    "{} v{} - {} routes",
                    "✓".green(),
                    version,
                    routes.len()
                );
            }
            Err(e) => {
                eprintln!(
                    "{} Rebuild failed, still serving v{}: {}",
                    "❌".red(),
                    table.version(),
                    e
                );
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "watch"))]
pub fn execute(_dir: &Path, _config: Option<&Path>) -> Result<()> {
    println!("{}", "⚠ Watch mode not available".yellow());
    println!();
    println!("Watch mode requires the 'watch' feature.");
    println!("Rebuild with: cargo build --features watch");
    Ok(())
}
