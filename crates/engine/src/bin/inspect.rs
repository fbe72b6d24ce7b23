//! Inspection CLI for the world store.
//!
//! Every command except `params` issues one store request and prints the result:
//! - `locations [--type <t>]`, `location <slug>` - travel map nodes
//! - `items [--type <t> | --search <text>]`, `npcs`, `npc <slug>`, `nations`, `scenarios [--quest-type <q>]`
//! - `profiles`, `party` - player-side tables
//! - `history [--limit <n>]` - newest world history entries
//! - `set-npc-image <slug> <path>` - patch one NPC portrait
//! - `schema <table>` - column names seen on one row
//! - `select <table> [--eq c=v] [--where c=op.v] [--ilike c=p] [--in c=a,b] [--is-null c]` - ad-hoc filtered read
//! - `update <table> --set c=v --eq c=v` - ad-hoc targeted update
//! - `params <string>` - parse a `key:value, ...` string (no store access)
//!
//! `--anon` reads with the restricted key to check what row-level policy
//! lets an unprivileged client see.
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use wayfarer_domain::{LocationSlug, NpcSlug};
use wayfarer_engine::infrastructure::config::CredentialTier;
use wayfarer_engine::infrastructure::logging::{
    init_logging, load_dotenv_from_repo_root, log_directives,
};
use wayfarer_engine::infrastructure::ports::{CompareOp, SortDirection, TablePatch, TableQuery};
use wayfarer_engine::infrastructure::rest_store::RestStore;
use wayfarer_engine::use_cases::{Inspect, InspectCommand, Report};

#[derive(Parser)]
#[command(name = "wayfarer-inspect")]
#[command(about = "Inspect and patch rows in the Wayfarer world store")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use the restricted anon key instead of the service key
    #[arg(long, global = true)]
    anon: bool,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List locations
    Locations {
        /// Only locations of this type
        #[arg(long = "type")]
        location_type: Option<String>,
    },
    /// Show one location
    Location { slug: String },
    /// List items
    Items {
        /// Only items of this type
        #[arg(long = "type")]
        item_type: Option<String>,
        /// Only items whose name contains this text
        #[arg(long, conflicts_with = "item_type")]
        search: Option<String>,
    },
    /// List all NPCs
    Npcs,
    /// Show one NPC
    Npc { slug: String },
    /// Point an NPC's image at a new asset path
    SetNpcImage { slug: String, image: String },
    /// List all nations
    Nations,
    /// List scenarios
    Scenarios {
        /// Only these quest types (repeatable)
        #[arg(long = "quest-type")]
        quest_types: Vec<String>,
    },
    /// List user profiles
    Profiles,
    /// List party members
    Party,
    /// Newest world history entries
    History {
        #[arg(short, long)]
        limit: Option<i64>,
    },
    /// Print the columns of a table
    Schema { table: String },
    /// Ad-hoc read against any table
    Select {
        table: String,
        /// Comma-separated column list
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Equality filter `column=value` (repeatable)
        #[arg(long = "eq")]
        equals: Vec<String>,
        /// Comparison filter `column=op.value`, op one of eq/neq/gt/gte/lt/lte (repeatable)
        #[arg(long = "where")]
        compare: Vec<String>,
        /// Case-insensitive pattern filter `column=pattern` (repeatable)
        #[arg(long)]
        ilike: Vec<String>,
        /// Set membership filter `column=a,b,c` (repeatable)
        #[arg(long = "in")]
        within: Vec<String>,
        /// Rows where `column` is null (repeatable)
        #[arg(long)]
        is_null: Vec<String>,
        /// Order by `column` or `column:desc`
        #[arg(long)]
        order: Option<String>,
        /// Sort nulls last in the ordered column
        #[arg(long, requires = "order")]
        nulls_last: bool,
        #[arg(long)]
        limit: Option<u32>,
        /// Require exactly one matching row
        #[arg(long)]
        single: bool,
    },
    /// Targeted update against any table
    Update {
        table: String,
        /// Column assignment `column=value` (repeatable); JSON values are kept typed
        #[arg(long = "set", required = true)]
        assignments: Vec<String>,
        /// Equality filter `column=value` (repeatable, at least one)
        #[arg(long = "eq", required = true)]
        equals: Vec<String>,
    },
    /// Parse a parameter string such as "hp:50, crit:0.2"
    Params { input: String },
}

/// What a parsed command needs to produce its report.
#[derive(Debug, PartialEq)]
enum Request {
    /// Answered without touching the store.
    Offline(Report),
    Store(InspectCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    init_logging(&log_directives(level, false), true);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let report = match to_request(cli.command)? {
        Request::Offline(report) => report,
        Request::Store(command) => {
            load_dotenv_from_repo_root();
            let tier = if cli.anon {
                CredentialTier::Anon
            } else {
                CredentialTier::Service
            };
            let store = RestStore::from_env(tier).context("world store is not configured")?;
            tracing::debug!(%tier, "Connected to world store");
            Inspect::new(Arc::new(store)).execute(command).await?
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn to_request(command: Commands) -> Result<Request> {
    let command = match command {
        Commands::Params { input } => return Ok(Request::Offline(Report::params(&input))),
        command => command,
    };
    Ok(Request::Store(to_command(command)?))
}

fn to_command(command: Commands) -> Result<InspectCommand> {
    Ok(match command {
        Commands::Locations { location_type } => InspectCommand::Locations { location_type },
        Commands::Location { slug } => InspectCommand::Location {
            slug: LocationSlug::new(slug),
        },
        Commands::Items { item_type, search } => InspectCommand::Items { item_type, search },
        Commands::Npcs => InspectCommand::Npcs,
        Commands::Npc { slug } => InspectCommand::Npc {
            slug: NpcSlug::new(slug),
        },
        Commands::SetNpcImage { slug, image } => InspectCommand::SetNpcImage {
            slug: NpcSlug::new(slug),
            image,
        },
        Commands::Nations => InspectCommand::Nations,
        Commands::Scenarios { quest_types } => InspectCommand::Scenarios { quest_types },
        Commands::Profiles => InspectCommand::Profiles,
        Commands::Party => InspectCommand::Party,
        Commands::History { limit } => InspectCommand::History { limit },
        Commands::Schema { table } => InspectCommand::Schema { table },
        Commands::Params { input } => bail!("'params {input}' does not read the store"),
        Commands::Select {
            table,
            columns,
            equals,
            compare,
            ilike,
            within,
            is_null,
            order,
            nulls_last,
            limit,
            single,
        } => {
            let mut query = TableQuery::on(table).columns(columns);
            for filter in &equals {
                let (column, value) = split_filter(filter)?;
                query = query.eq(column, value);
            }
            for filter in &compare {
                let (column, condition) = split_filter(filter)?;
                let Some((op, value)) = condition.split_once('.') else {
                    bail!("filter '{filter}' is not of the form column=op.value");
                };
                let op = op.parse::<CompareOp>().map_err(anyhow::Error::msg)?;
                query = query.compare(column, op, value);
            }
            for filter in &ilike {
                let (column, pattern) = split_filter(filter)?;
                query = query.ilike(column, pattern);
            }
            for filter in &within {
                let (column, values) = split_filter(filter)?;
                query = query.within(column, values.split(',').map(str::trim));
            }
            for column in &is_null {
                query = query.is_null(column.as_str());
            }
            if let Some(order) = order {
                query = match order.split_once(':') {
                    Some((column, "desc")) => query.order_by(column, SortDirection::Descending),
                    Some((column, "asc")) => query.order_by(column, SortDirection::Ascending),
                    Some((_, other)) => bail!("unknown sort direction '{other}'"),
                    None => query.order_by(order.as_str(), SortDirection::Ascending),
                };
                if nulls_last {
                    query = query.nulls_last();
                }
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            if single {
                query = query.single();
            }
            InspectCommand::Select(query)
        }
        Commands::Update {
            table,
            assignments,
            equals,
        } => {
            let mut patch = TablePatch::new(table);
            for assignment in &assignments {
                let (column, raw) = split_filter(assignment)?;
                let value = serde_json::from_str::<Value>(raw)
                    .unwrap_or_else(|_| Value::String(raw.to_string()));
                patch = patch.set(column, value);
            }
            for filter in &equals {
                let (column, value) = split_filter(filter)?;
                patch = patch.eq(column, value);
            }
            InspectCommand::Update(patch)
        }
    })
}

fn split_filter(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => Ok((column.trim(), value)),
        _ => bail!("filter '{raw}' is not of the form column=value"),
    }
}
