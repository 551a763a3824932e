/*
 * whoopr - list and fetch WHOOP data
 *
 * SPDX-License-Identifier: Apache-2.0
 */
use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use whoop::prelude::*;
use zeroize::Zeroizing;

use crate::output::{Output, OutputFormat};

pub mod common;
pub mod cycle;
pub mod recovery;
pub mod sleep;
pub mod sport;
pub mod user;
pub mod workout;

/// Largest page size the WHOOP api accepts
const MAX_PAGE_LIMIT: u32 = 25;

#[derive(Parser, Debug)]
#[command(name = "whoopr")]
#[command(author, version, about = "whoopr: list and fetch WHOOP cycles, recovery, sleep, and workouts", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// API base URL. Default: environment `WHOOP_URL` or <https://api.prod.whoop.com/developer/>
    #[arg(short = 'u', long, env = "WHOOP_URL")]
    pub url: Option<String>,

    /// OAuth access token. Obtaining the token is outside the scope of this tool.
    #[arg(long, env = "WHOOP_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Write output to file (default: stdout)
    #[arg(short = 'o', long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// JSON output (default)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Table output format
    #[arg(short, long, global = true)]
    pub table: bool,

    /// Quiet mode - suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (repeat for more: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global=true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Physiological cycles
    #[command(alias = "cycles")]
    Cycle(CycleArgs),

    /// Recovery scores
    Recovery(RecoveryArgs),

    /// Sleep activities
    Sleep(SleepArgs),

    /// Workout activities
    #[command(alias = "workouts")]
    Workout(WorkoutArgs),

    /// Profile and body measurements of the authenticated user
    User(UserArgs),

    /// Known sport ids (no network access)
    #[command(alias = "sports")]
    Sport(SportArgs),
}

#[derive(Args, Debug)]
pub struct CycleArgs {
    #[command(subcommand)]
    pub command: CycleCommands,
}

#[derive(Subcommand, Debug)]
pub enum CycleCommands {
    /// List cycles, newest first
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },
    /// Get a cycle by id
    Get { cycle_id: i64 },
}

#[derive(Args, Debug)]
pub struct RecoveryArgs {
    #[command(subcommand)]
    pub command: RecoveryCommands,
}

#[derive(Subcommand, Debug)]
pub enum RecoveryCommands {
    /// List recoveries, newest first
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },
    /// Get the recovery for a cycle
    Get { cycle_id: i64 },
}

#[derive(Args, Debug)]
pub struct SleepArgs {
    #[command(subcommand)]
    pub command: SleepCommands,
}

#[derive(Subcommand, Debug)]
pub enum SleepCommands {
    /// List sleep activities, newest first
    List {
        #[command(flatten)]
        pagination: PaginationArgs,

        /// Only show naps
        #[arg(long, conflicts_with = "no_naps")]
        naps: bool,

        /// Hide naps
        #[arg(long)]
        no_naps: bool,
    },
    /// Get a sleep activity by id
    Get { sleep_id: i64 },
}

#[derive(Args, Debug)]
pub struct WorkoutArgs {
    #[command(subcommand)]
    pub command: WorkoutCommands,
}

#[derive(Subcommand, Debug)]
pub enum WorkoutCommands {
    /// List workouts, newest first
    List {
        #[command(flatten)]
        pagination: PaginationArgs,

        /// Only show workouts with this sport id
        #[arg(long)]
        sport: Option<i32>,
    },
    /// Get a workout by id
    Get { workout_id: i64 },
}

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Basic profile: name and email
    Profile,
    /// Height, weight, and max heart rate
    Body,
}

#[derive(Args, Debug)]
pub struct SportArgs {
    /// Look up a single sport id
    pub sport_id: Option<i32>,
}

#[derive(Args, Debug)]
pub struct PaginationArgs {
    /// Only records starting at or after this time (RFC 3339, e.g. 2022-04-24T00:00:00Z)
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// Only records ending before this time (RFC 3339)
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,

    /// page size (max 25)
    #[arg(long, default_value = "10")]
    pub limit: u32,

    /// continue from the `next_token` of a previous page
    #[arg(long)]
    pub next_token: Option<String>,

    /// collect all results from all pages
    #[arg(long)]
    pub all: bool,
}

impl PaginationArgs {
    /// Converts the flags to request parameters.
    pub fn to_params(&self) -> Result<RequestParams> {
        if matches!((self.start, self.end), (Some(start), Some(end)) if end < start) {
            bail!("--end must not be before --start");
        }
        let mut params = RequestParams::new().limit(pagination_limit(self));
        if let Some(start) = self.start {
            params = params.start(start);
        }
        if let Some(end) = self.end {
            params = params.end(end);
        }
        if let Some(token) = &self.next_token {
            params = params.next_token(token.clone());
        }
        Ok(params)
    }
}

pub struct AppContext {
    pub client: WhoopClient,
    pub output: Output,
}

pub async fn run(cli: Cli) -> Result<()> {
    let output = Output::new(resolve_output_format(&cli), cli.output.clone());

    if let Commands::Sport(args) = &cli.command {
        return sport::handle(&output, args);
    }

    let ctx = AppContext {
        client: build_client(&cli)?,
        output,
    };

    let result = match cli.command {
        Commands::Cycle(args) => cycle::handle(&ctx, args).await,
        Commands::Recovery(args) => recovery::handle(&ctx, args).await,
        Commands::Sleep(args) => sleep::handle(&ctx, args).await,
        Commands::Workout(args) => workout::handle(&ctx, args).await,
        Commands::User(args) => user::handle(&ctx, args).await,
        Commands::Sport(_) => Ok(()),
    };
    debug!(rate = ?ctx.client.rate_limit(), metrics = %ctx.client.http_metrics(), "done");
    result
}

fn resolve_output_format(cli: &Cli) -> OutputFormat {
    if cli.quiet {
        OutputFormat::Quiet
    } else if cli.pretty {
        if cli.table {
            warn!("--pretty conflicts with --table. Using json pretty format");
        }
        OutputFormat::Pretty
    } else if cli.json {
        if cli.table {
            warn!("--json conflicts with --table. Using json format");
        }
        OutputFormat::Json
    } else if cli.table {
        OutputFormat::Table
    } else {
        OutputFormat::Json
    }
}

fn build_client(cli: &Cli) -> Result<WhoopClient> {
    let mut config = ClientConfig::default();
    if let Some(url) = &cli.url {
        config = config.base_url(url);
    }
    let Some(token) = cli.token.as_deref() else {
        bail!("missing access token: set WHOOP_ACCESS_TOKEN or pass --token");
    };
    let token = Zeroizing::new(token.to_string());
    Ok(WhoopClient::with_access_token(token.as_str(), config)?)
}

pub fn pagination_limit(pagination: &PaginationArgs) -> u32 {
    if pagination.all {
        MAX_PAGE_LIMIT
    } else {
        pagination.limit.clamp(1, MAX_PAGE_LIMIT)
    }
}
