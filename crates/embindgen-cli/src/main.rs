//! embindgen CLI - Binding and declaration generator
//!
//! Commands:
//! - `embindgen generate` - Run every export in an embindgen.toml manifest
//! - `embindgen emit` - Run one export from command-line arguments
//! - `embindgen check` - Validate a manifest and its definition

use clap::{Parser, Subcommand};
use logging::LogLevel;
use std::path::PathBuf;

mod generate;
mod logging;
mod manifest;

#[derive(Parser)]
#[command(name = "embindgen")]
#[command(author, version, about = "Generate embind registrations, TypeScript declarations and docs", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every export declared in a manifest
    Generate {
        /// Path to embindgen.toml (default: ./embindgen.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Run a single export
    Emit {
        /// Path to the JSON definition document
        #[arg(short, long)]
        definition: PathBuf,

        /// Export type (ts, c++, md)
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Template file containing the ${DATA} placeholder
        #[arg(long)]
        template: Option<PathBuf>,

        /// Name of the EMSCRIPTEN_BINDINGS block
        #[arg(long)]
        interface_name: Option<String>,

        /// Name of the TypeScript container interface
        #[arg(long, default_value = "Module")]
        container_name: String,
    },

    /// Validate a manifest and its definition document
    Check {
        /// Path to embindgen.toml (default: ./embindgen.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level);

    match cli.command {
        Commands::Generate { manifest } => {
            generate::run(manifest).await?;
        }
        Commands::Emit {
            definition,
            kind,
            output,
            template,
            interface_name,
            container_name,
        } => {
            generate::emit(generate::EmitOptions {
                definition,
                kind,
                output,
                template,
                interface_name,
                container_name,
            })
            .await?;
        }
        Commands::Check { manifest } => {
            manifest::check(manifest)?;
        }
    }

    Ok(())
}
