//! Paver CLI - incremental build tool for mod content
//!
//! Usage: paver <COMMAND>
//!
//! Commands:
//!   build   Scan the source tree, copy/convert what changed, remove stale outputs
//!   clean   Remove outputs with no corresponding source file

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use paver::cli::{Cli, Commands};
use paver::engine::BuildEvent;
use paver::{engine, prompt, CommandConverter, OutputStore, Source};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            source,
            output,
            converter,
            yes,
            dry_run,
        } => cmd_build(
            &source,
            &output,
            &converter,
            yes,
            dry_run,
            cli.json,
            cli.verbose,
        ),
        Commands::Clean {
            source,
            output,
            yes,
            dry_run,
        } => cmd_clean(&source, &output, yes, dry_run, cli.json),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_build(
    source_root: &Path,
    output_root: &Path,
    converter_path: &Path,
    yes: bool,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let source = Source::new(source_root);
    source.ensure_valid()?;

    let store = OutputStore::new(output_root);
    store.ensure_exists()?;

    if !json {
        println!("🧱 Paver Build");
        println!("Source: {}", source_root.display());
        println!("Output: {}", output_root.display());
        if dry_run {
            println!("Mode: Dry run");
        }
        println!();
    }

    let task = source.scan()?;
    let previous = store.load_manifest()?;

    if !json {
        println!(
            "✓ Scanned {} files ({} copy, {} convert)",
            task.len(),
            task.copy.len(),
            task.convert.len()
        );
    }

    if dry_run {
        let plan = engine::plan(&task, &previous, &store)?;

        if json {
            let event = serde_json::json!({
                "event": "plan",
                "copy": plan.copy.len(),
                "convert": plan.convert.len(),
                "skip": plan.skip.len(),
                "remove": plan.remove.len(),
            });
            println!("{}", serde_json::to_string(&event)?);
        } else {
            for path in &plan.copy {
                println!("  + would copy {path}");
            }
            for path in &plan.convert {
                println!("  ~ would convert {path}");
            }
            for path in &plan.remove {
                println!("  - would remove {path}");
            }
            println!();
            println!(
                "Summary: {} to copy, {} to convert, {} unchanged, {} to remove",
                plan.copy.len(),
                plan.convert.len(),
                plan.skip.len(),
                plan.remove.len()
            );
            if plan.is_noop() {
                println!("Nothing to do.");
            }
        }
        return Ok(());
    }

    let converter = CommandConverter::new(converter_path);
    let (manifest, report) = engine::execute(
        &source,
        &task,
        &previous,
        &store,
        &converter,
        |event| {
            if json {
                return;
            }
            match event {
                BuildEvent::Copied { path } => println!("  + copied {path}"),
                BuildEvent::Converted { path, output } => {
                    println!("  ~ converted {path} -> {output}")
                }
                BuildEvent::Skipped { path } => {
                    if verbose > 0 {
                        println!("  = unchanged {path}");
                    }
                }
            }
        },
    )?;

    let stale = store.stale_paths(&task)?;
    let mut removed = 0usize;
    if !stale.is_empty() {
        let message = format!("Remove {} stale output file(s)?", stale.len());
        if prompt::confirm(yes, &message)? {
            for path in &stale {
                store.remove(path)?;
                if !json {
                    println!("  - removed {path}");
                }
            }
            removed = stale.len();
        } else if !json {
            println!("  keeping {} stale file(s)", stale.len());
        }
    }

    // Best effort: the artifacts on disk are worth more than the bookkeeping,
    // so a failed manifest write is reported but does not fail the build.
    if let Err(err) = store.store_manifest(&manifest) {
        eprintln!("⚠ warning: could not write manifest: {err}");
    }

    if json {
        let event = serde_json::json!({
            "event": "build",
            "copied": report.copied.len(),
            "converted": report.converted.len(),
            "skipped": report.skipped.len(),
            "removed": removed,
        });
        println!("{}", serde_json::to_string(&event)?);
    } else {
        println!();
        println!(
            "Summary: {} copied, {} converted, {} unchanged, {} removed",
            report.copied.len(),
            report.converted.len(),
            report.skipped.len(),
            removed
        );
    }

    Ok(())
}

fn cmd_clean(
    source_root: &Path,
    output_root: &Path,
    yes: bool,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let source = Source::new(source_root);
    source.ensure_valid()?;

    if !json {
        println!("🧹 Paver Clean");
        println!("Source: {}", source_root.display());
        println!("Output: {}", output_root.display());
        println!();
    }

    if !output_root.exists() {
        if json {
            println!("{}", serde_json::json!({ "event": "clean", "removed": 0 }));
        } else {
            println!("Output directory does not exist; nothing to clean.");
        }
        return Ok(());
    }

    let store = OutputStore::new(output_root);
    store.ensure_exists()?;

    let task = source.scan()?;
    let stale = store.stale_paths(&task)?;

    if stale.is_empty() {
        if json {
            println!("{}", serde_json::to_string(&serde_json::json!({
                "event": "clean",
                "removed": 0,
            }))?);
        } else {
            println!("No stale outputs.");
        }
        return Ok(());
    }

    if !json {
        for path in &stale {
            println!("  - {path}");
        }
        println!();
    }

    if dry_run {
        if json {
            let event = serde_json::json!({
                "event": "clean",
                "dry_run": true,
                "stale": stale.len(),
            });
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("Dry run: {} stale file(s) would be removed", stale.len());
        }
        return Ok(());
    }

    let message = format!("Remove {} stale output file(s)?", stale.len());
    if !prompt::confirm(yes, &message)? {
        anyhow::bail!(paver::PaverError::Aborted);
    }

    for path in &stale {
        store.remove(path)?;
    }

    if json {
        let event = serde_json::json!({
            "event": "clean",
            "removed": stale.len(),
        });
        println!("{}", serde_json::to_string(&event)?);
    } else {
        println!("Removed {} stale file(s)", stale.len());
    }

    Ok(())
}
