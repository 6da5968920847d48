pub mod commands;

use clap::{Parser, Subcommand};
use gamedeck_core::ProductId;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "gamedeck",
    about = "Gamedeck catalog operator CLI",
    long_about = "Manage the gamedeck database and browse or edit the game catalog \
                  through the HTTP API.",
    after_help = "Examples:\n  gamedeck doctor --json\n  gamedeck list --search ch\n  \
                  gamedeck delete 9 --yes"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations")]
    Migrate,
    #[command(about = "Load the demo catalog (idempotent)")]
    Seed,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, auth readiness, and database connectivity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "List one page of the catalog, optionally filtered by name")]
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    #[command(about = "Show a single game")]
    Show { id: ProductId },
    #[command(about = "Create a game")]
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        detail: String,
        #[arg(long = "cover", default_value = "")]
        coverimage: String,
    },
    #[command(about = "Edit a game; omitted fields keep their current value")]
    Edit {
        id: ProductId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        detail: Option<String>,
        #[arg(long = "cover")]
        coverimage: Option<String>,
    },
    #[command(about = "Delete a game after confirmation")]
    Delete {
        id: ProductId,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::List { search, page } => commands::catalog::list(search, page),
        Command::Show { id } => commands::catalog::show(id),
        Command::Add { name, detail, coverimage } => {
            commands::catalog::add(commands::catalog::FieldEdits {
                name: Some(name),
                detail: Some(detail),
                coverimage: Some(coverimage),
            })
        }
        Command::Edit { id, name, detail, coverimage } => {
            commands::catalog::edit(id, commands::catalog::FieldEdits { name, detail, coverimage })
        }
        Command::Delete { id, yes } => commands::catalog::delete(id, yes),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
