use broodstats::cache::CacheConfig;
use broodstats::cli::{self, Command};
use broodstats::types::GatewayId;
use broodstats::{BroodStats, logger};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "broodstats", version, about = "StarCraft: Remastered ladder statistics")]
struct Cli {
    /// off, error, warn, info, debug or trace
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: String,

    /// Base URL of the ladder web API
    #[arg(long, global = true)]
    host: Option<String>,

    /// Bearer credential for the API
    #[arg(long, global = true)]
    token: Option<String>,

    /// Path to a config file (otherwise broodstats.toml is searched for)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream the global 1v1 leaderboard as CSV
    Rankings {
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Display every ranking on the account owning a toon
    PlayerRankings { toon: String, gateway: GatewayId },
    /// Display the toons on an account
    PlayerProfiles { toon: String, gateway: GatewayId },
    /// Display account information
    AccountInfo { toon: String, gateway: GatewayId },
    /// Display per-map win rates for the current season
    PlayerStats { toon: String, gateway: GatewayId },
    /// Display match history for a player, newest first
    MatchHistory {
        toon: String,
        gateway: GatewayId,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Search players by name on the current global leaderboard
    PlayerSearch { query: String },
    /// Display online user counts per gateway
    OnlineUsers,
    /// Download every available replay for an account
    DumpReplays {
        toon: String,
        gateway: GatewayId,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Deserialize, Default)]
struct AppConfig {
    host: Option<String>,
    token: Option<String>,
}

/// Precedence: CLI > environment > config files > defaults.
fn load_config(cli_config: Option<&PathBuf>) -> AppConfig {
    let mut cfg = AppConfig::default();

    let mut paths: Vec<PathBuf> = Vec::new();
    if let Some(p) = cli_config {
        paths.push(p.clone());
    }
    if let Ok(p) = std::env::var("BROODSTATS_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        paths.push(PathBuf::from(home).join(".config").join("broodstats.toml"));
    }
    if let Ok(cur) = std::env::current_dir() {
        paths.push(cur.join("broodstats.toml"));
    }

    for path in paths {
        if !path.exists() {
            continue;
        }
        if let Ok(text) = std::fs::read_to_string(&path) {
            if let Ok(file_cfg) = toml::from_str::<AppConfig>(&text) {
                if cfg.host.is_none() {
                    cfg.host = file_cfg.host;
                }
                if cfg.token.is_none() {
                    cfg.token = file_cfg.token;
                }
            }
        }
    }

    if cfg.host.is_none() {
        cfg.host = std::env::var("BROODSTATS_HOST").ok();
    }
    if cfg.token.is_none() {
        cfg.token = std::env::var("BROODSTATS_TOKEN").ok();
    }
    cfg
}

fn to_command(commands: Commands) -> Command {
    match commands {
        Commands::Rankings { limit } => Command::Rankings { limit },
        Commands::PlayerRankings { toon, gateway } => Command::PlayerRankings { toon, gateway },
        Commands::PlayerProfiles { toon, gateway } => Command::PlayerProfiles { toon, gateway },
        Commands::AccountInfo { toon, gateway } => Command::AccountInfo { toon, gateway },
        Commands::PlayerStats { toon, gateway } => Command::PlayerStats { toon, gateway },
        Commands::MatchHistory { toon, gateway, limit } => {
            Command::MatchHistory { toon, gateway, limit }
        }
        Commands::PlayerSearch { query } => Command::PlayerSearch { query },
        Commands::OnlineUsers => Command::OnlineUsers,
        Commands::DumpReplays { toon, gateway, out } => Command::DumpReplays { toon, gateway, out },
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level: LevelFilter = match cli.log_level.parse() {
        Ok(level) => level,
        Err(_) => {
            eprintln!("invalid log level: {}", cli.log_level);
            std::process::exit(2);
        }
    };
    if let Err(e) = logger::init(level) {
        eprintln!("failed to initialize logging: {e}");
        std::process::exit(2);
    }

    let file_cfg = load_config(cli.config.as_ref());
    let host = cli.host.or(file_cfg.host);
    let token = cli.token.or(file_cfg.token);

    let Some(host) = host else {
        eprintln!("no API host configured; pass --host, set BROODSTATS_HOST, or add it to broodstats.toml");
        std::process::exit(2);
    };

    let gb = BroodStats::connect(host, token, CacheConfig::default());

    if let Err(e) = cli::run(&gb, to_command(cli.command)).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
