//! # oorb-build
//!
//! Build orchestrator for the oorb Fortran orbit-computation library
//! and its Python binding.
//!
//! ## Usage
//!
//! ```bash
//! oorb-build build         # configure + make + stage the binding
//! oorb-build version       # print the deduced project version
//! oorb-build metadata      # emit packaging metadata JSON
//! oorb-build preflight     # verify the host toolchain
//! oorb-build clean         # remove the staging directory
//! ```
//!
//! The orbit computation itself lives in the Fortran codebase; this
//! tool only sequences its build and relocates the compiled binding.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod build;
mod clean;
mod exec;
mod layout;
mod metadata;
mod preflight;
mod version;
mod workdir;

#[derive(Parser)]
#[command(name = "oorb-build")]
#[command(about = "Build orchestrator for the oorb orbit-computation library")]
struct Cli {
    /// Path to the oorb source tree
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure, build, and stage the Python binding
    Build {
        /// Staging directory name under python/
        #[arg(long, default_value = layout::DEFAULT_BUILD_BASE)]
        build_base: String,
        /// Interpreter to build the binding against (default: python3 on PATH)
        #[arg(long)]
        python: Option<String>,
    },
    /// Print the deduced project version
    Version,
    /// Emit packaging metadata JSON into the staging directory
    Metadata {
        /// Staging directory name under python/
        #[arg(long, default_value = layout::DEFAULT_BUILD_BASE)]
        build_base: String,
        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Verify the host toolchain and binding sources
    Preflight,
    /// Remove the staging directory (never the native build/ tree)
    Clean {
        /// Staging directory name under python/
        #[arg(long, default_value = layout::DEFAULT_BUILD_BASE)]
        build_base: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let runner = exec::SystemRunner;

    match cli.command {
        Command::Build { build_base, python } => {
            let cfg = build::BuildConfig {
                root: cli.root,
                build_base,
                python,
            };
            let dest = build::run(&runner, &cfg)?;
            println!("\n=== Build complete ===");
            println!("  Artifact: {}", dest.display());
        }
        Command::Version => {
            println!("{}", version::deduce(&runner, &cli.root)?);
        }
        Command::Metadata { build_base, stdout } => {
            let meta = metadata::generate(&runner, &cli.root)?;
            if stdout {
                println!("{}", serde_json::to_string_pretty(&meta)?);
            } else {
                let layout = layout::Layout::new(&cli.root, &build_base);
                let path = layout.staging_dir().join("metadata.json");
                metadata::write(&meta, &path)?;
                println!("  Wrote {}", path.display());
            }
        }
        Command::Preflight => preflight::check(&runner, &cli.root)?,
        Command::Clean { build_base } => {
            clean::clean(&layout::Layout::new(&cli.root, &build_base))?;
        }
    }

    Ok(())
}
