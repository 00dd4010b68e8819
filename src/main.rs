use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use rickmorty_explorer::commands::{characters, routes, slug};
use rickmorty_explorer::models::{CharacterGender, CharacterStatus, SearchFilters};
use rickmorty_explorer::routes::{APP_DESCRIPTION, APP_NAME};
use rickmorty_explorer::state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "rickmorty",
    version,
    about = APP_DESCRIPTION,
    before_help = APP_NAME
)]
struct Cli {
    /// Path to a settings JSON file (defaults to the user config dir).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the route slug for a display name.
    Slug {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Print the search name guessed from a slug.
    Unslug { slug: String },
    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Commands that talk to the character API.
#[derive(Subcommand, Debug)]
enum RemoteCommand {
    /// List every character name in the remote listing.
    Names {
        /// Print unique route slugs instead of display names.
        #[arg(long)]
        slugs: bool,
    },
    /// Fetch one character by id.
    Character { id: u32 },
    /// Fetch several characters by id.
    Characters {
        #[arg(required = true)]
        ids: Vec<u32>,
    },
    /// Resolve a name route such as `rick-sanchez`.
    ByName { slug: String },
    /// Search characters with the API's filters.
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long, value_enum)]
        gender: Option<GenderArg>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Total number of characters, or the fallback when the API is down.
    Total {
        #[arg(long)]
        fallback: Option<u64>,
    },
    /// Routes to pre-render.
    Routes {
        #[command(subcommand)]
        kind: RoutesKind,
    },
}

#[derive(Subcommand, Debug)]
enum RoutesKind {
    /// `/characters/{id}` for every id.
    Ids {
        #[arg(long)]
        fallback: Option<u64>,
    },
    /// `/characters/name/{slug}` for every listed name.
    Names,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum StatusArg {
    Alive,
    Dead,
    Unknown,
}

impl From<StatusArg> for CharacterStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Alive => CharacterStatus::Alive,
            StatusArg::Dead => CharacterStatus::Dead,
            StatusArg::Unknown => CharacterStatus::Unknown,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum GenderArg {
    Female,
    Male,
    Genderless,
    Unknown,
}

impl From<GenderArg> for CharacterGender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Female => CharacterGender::Female,
            GenderArg::Male => CharacterGender::Male,
            GenderArg::Genderless => CharacterGender::Genderless,
            GenderArg::Unknown => CharacterGender::Unknown,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    rickmorty_explorer::init_logging();

    match run(Cli::parse()).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Slug { name } => print_json(&slug::slug(&name)),
        Command::Unslug { slug: s } => print_json(&slug::unslug(&s)),
        Command::Remote(command) => {
            let state = AppState::new(cli.config).context("failed to build API client")?;
            run_remote(&state, command).await
        }
    }
}

async fn run_remote(state: &AppState, command: RemoteCommand) -> Result<()> {
    match command {
        RemoteCommand::Names { slugs: false } => {
            print_json(&characters::names(&state.client).await)
        }
        RemoteCommand::Names { slugs: true } => {
            print_json(&rickmorty_explorer::routes::name_params(&state.client).await)
        }
        RemoteCommand::Character { id } => print_json(&characters::character(state, id).await?),
        RemoteCommand::Characters { ids } => {
            print_json(&characters::characters(state, &ids).await?)
        }
        RemoteCommand::ByName { slug: s } => {
            print_json(&characters::by_name(&state.client, &s).await?)
        }
        RemoteCommand::Search {
            name,
            status,
            species,
            kind,
            gender,
            page,
        } => {
            let filters = SearchFilters {
                name,
                status: status.map(Into::into),
                species,
                kind,
                gender: gender.map(Into::into),
                page,
            };
            print_json(&characters::search(state, &filters).await?)
        }
        RemoteCommand::Total { fallback } => print_json(&characters::total(state, fallback).await),
        RemoteCommand::Routes {
            kind: RoutesKind::Ids { fallback },
        } => print_json(&routes::id_routes(state, fallback).await),
        RemoteCommand::Routes {
            kind: RoutesKind::Names,
        } => print_json(&routes::name_routes(&state.client).await),
    }
}
