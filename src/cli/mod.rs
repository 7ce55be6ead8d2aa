use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use devops_inventory::ParseOptions;

mod format;
mod servers;
mod show;
mod validate;

#[derive(Parser)]
#[command(
    name = "devops-inventory",
    version,
    about = "Agent DevOps inventory parser and validator"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show project information
    #[arg(long)]
    about: bool,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output
    Json,
}

#[derive(Subcommand)]
#[command(next_display_order = None)]
enum Commands {
    /// Validate inventory files (required fields, PORT values)
    Validate {
        /// Inventory files or directories containing .agent-devops.env [default: .]
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Report malformed PROVIDER_/SERVER_ keys instead of skipping them
        #[arg(long)]
        strict: bool,
    },
    /// Print the parsed inventory as JSON
    Show {
        /// Inventory file or directory [default: .]
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Report malformed PROVIDER_/SERVER_ keys instead of skipping them
        #[arg(long)]
        strict: bool,
    },
    /// List servers matching all given filters
    #[command(alias = "find")]
    Servers {
        /// Inventory file or directory [default: .]
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Match SERVER_<id>_ENV
        #[arg(long)]
        env: Option<String>,
        /// Match SERVER_<id>_ROLE
        #[arg(long)]
        role: Option<String>,
        /// Match SERVER_<id>_PROVIDER
        #[arg(long)]
        provider: Option<String>,
        /// Match SERVER_<id>_STATUS
        #[arg(long)]
        status: Option<String>,
        /// Match one entry of SERVER_<id>_TAGS
        #[arg(long)]
        tag: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Rewrite an inventory file in canonical form
    #[command(alias = "fmt")]
    Format {
        /// Inventory file or directory [default: .]
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Check formatting without modifying the file (exit 1 if not canonical)
        #[arg(long)]
        check: bool,
        /// Rewrite even if unrecognized fields would be dropped or invalid records filled in
        #[arg(long)]
        allow_lossy: bool,
    },
}

pub fn run(cli: Cli) {
    if cli.about {
        print_about();
        return;
    }

    match cli.command {
        Some(Commands::Validate {
            paths,
            format,
            strict,
        }) => validate::run(paths, format, options(strict)),
        Some(Commands::Show { path, strict }) => show::run(path, options(strict)),
        Some(Commands::Servers {
            path,
            env,
            role,
            provider,
            status,
            tag,
            format,
        }) => {
            let filter = devops_inventory::ServerFilter {
                env,
                role,
                provider,
                status,
                tag,
            };
            servers::run(path, filter, format)
        }
        Some(Commands::Format {
            path,
            check,
            allow_lossy,
        }) => format::run(path, check, allow_lossy),
        None => {
            eprintln!("Usage: devops-inventory <command> [args]");
            eprintln!("Run `devops-inventory --help` for details.");
            std::process::exit(1);
        }
    }
}

fn options(strict: bool) -> ParseOptions {
    ParseOptions { strict }
}

fn print_about() {
    println!(
        "devops-inventory: Agent DevOps Inventory Tool\n\
         ├─ version:    {}\n\
         ├─ author:     {}\n\
         ├─ source:     {}\n\
         └─ licence:    {} https://www.apache.org/licenses/LICENSE-2.0",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_REPOSITORY"),
        env!("CARGO_PKG_LICENSE"),
    );
}

/// Read and parse an inventory, exiting with a message on failure.
fn load(
    command: &str,
    path: &std::path::Path,
    options: ParseOptions,
) -> (
    devops_inventory::Inventory,
    Vec<devops_inventory::ValidationError>,
) {
    match devops_inventory::read_inventory(path, &options) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("devops-inventory {command}: {e}");
            std::process::exit(1);
        }
    }
}
