//! Workspace chores: `cargo run -p somaview-xtask -- <task>`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use somaview::options::Options;

#[derive(Parser)]
#[command(about = "Build tasks for the somaview workspace")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Write the options JSON schema (drives settings UIs).
    Schema {
        /// Output file.
        out: PathBuf,
    },
    /// Write the default options as a TOML preset.
    Preset {
        /// Output file.
        out: PathBuf,
    },
}

fn write(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().task {
        Task::Schema { out } => {
            let schema = serde_json::to_string_pretty(&Options::json_schema())?;
            write(&out, &schema)
        }
        Task::Preset { out } => Options::default()
            .save(&out)
            .with_context(|| format!("saving preset to {}", out.display())),
    }
}
