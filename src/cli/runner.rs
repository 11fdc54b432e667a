use crate::cli::command::Command;
use crate::cli::util;
use crate::client::{BroodStats, GatewayLookup, LeaderboardLookup};
use crate::errors::ApiError;
use crate::types::{GLOBAL_GATEWAY_ID, GameMode};
use std::path::PathBuf;

/// Executes one command against the client, printing to stdout. Failures
/// propagate to the caller; each command surface owns its own presentation
/// and there is no global error handler.
pub async fn run(gb: &BroodStats, cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Rankings { limit } => rankings(gb, limit).await,
        Command::PlayerRankings { toon, gateway } => player_rankings(gb, &toon, gateway).await,
        Command::PlayerProfiles { toon, gateway } => player_profiles(gb, &toon, gateway).await,
        Command::AccountInfo { toon, gateway } => account_info(gb, &toon, gateway).await,
        Command::PlayerStats { toon, gateway } => player_stats(gb, &toon, gateway).await,
        Command::MatchHistory { toon, gateway, limit } => {
            match_history(gb, toon, gateway, limit).await
        }
        Command::PlayerSearch { query } => player_search(gb, &query).await,
        Command::OnlineUsers => online_users(gb).await,
        Command::DumpReplays { toon, gateway, out } => dump_replays(gb, toon, gateway, out).await,
    }
}

async fn rankings(gb: &BroodStats, limit: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    println!("toon,tier,rating,featureRace,wins,losses,gateway");
    let mut rankings = gb.rankings(LeaderboardLookup::default(), 0, limit);
    while let Some(r) = rankings.next().await? {
        let gateway = gb.gateway(GatewayLookup::Id(r.gateway_id)).map(|g| g.name).unwrap_or("??");
        println!(
            "{},{:?},{},{},{},{},{}",
            r.toon, r.tier, r.rating, r.feature_race, r.wins, r.losses, gateway
        );
    }
    Ok(())
}

async fn player_rankings(
    gb: &BroodStats,
    toon: &str,
    gateway: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let account = gb
        .account_rankings_by_toon(toon, GatewayLookup::Id(gateway), LeaderboardLookup::default())
        .await?;

    println!("aurora_id={} leaderboard_id={}", account.aurora_id, account.leaderboard_id);
    for r in &account.rankings {
        let gateway = gb.gateway(GatewayLookup::Id(r.gateway_id)).map(|g| g.name).unwrap_or("??");
        println!(
            "  {} rank {} ({:?}, {} rating, {}) {}-{} on {}",
            r.toon, r.rank, r.tier, r.rating, r.feature_race, r.wins, r.losses, gateway
        );
    }
    Ok(())
}

async fn player_profiles(
    gb: &BroodStats,
    toon: &str,
    gateway: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let account = gb.full_account(toon, GatewayLookup::Id(gateway)).await?;
    println!("found {} profiles for {toon}\n", account.profiles.len());
    for profile in &account.profiles {
        let name =
            gb.gateway(GatewayLookup::Id(profile.gateway_id)).map(|g| g.name).unwrap_or("??");
        println!("\t{} on {} ({})", profile.toon, name, profile.gateway_id);
    }
    Ok(())
}

async fn account_info(
    gb: &BroodStats,
    toon: &str,
    gateway: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let account = gb.full_account(toon, GatewayLookup::Id(gateway)).await?;
    println!("battle_tag={}", account.battle_tag);
    println!("aurora_id={}", account.aurora_id);
    println!("country={}", account.country_code.as_deref().unwrap_or("??"));
    println!("flags={}", account.flags.join(", "));
    println!("profiles:");
    for profile in &account.profiles {
        match profile.games_last_week {
            Some(games) => println!("  {} ({} games last week)", profile.toon, games),
            None => println!("  {}", profile.toon),
        }
    }
    Ok(())
}

async fn player_stats(
    gb: &BroodStats,
    toon: &str,
    gateway: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = gb.map_stats_by_toon(toon, GatewayLookup::Id(gateway)).await?;
    let Some(by_season) = stats.get(&GameMode::OneVsOne) else {
        println!("no stats found");
        return Ok(());
    };
    let season = gb.current_season().await?;
    let Some(by_map) = by_season.get(&season) else {
        println!("no stats found for season {season}");
        return Ok(());
    };

    let maps = gb.maps().await?;
    for (map_id, by_race) in by_map {
        let display_name = maps
            .iter()
            .find(|m| m.md5.eq_ignore_ascii_case(map_id))
            .map_or(map_id.as_str(), |m| m.display_name.as_str());
        for (race, s) in by_race {
            if s.games == 0 {
                continue;
            }
            println!(
                "{display_name} as {}: {}/{} won ({:.1}%), global {}/{} ({:.1}%)",
                race.as_str(),
                s.wins,
                s.games,
                s.win_ratio().unwrap_or(0.0) * 100.0,
                s.global_wins,
                s.global_games,
                s.global_win_ratio().unwrap_or(0.0) * 100.0,
            );
        }
    }
    Ok(())
}

async fn match_history(
    gb: &BroodStats,
    toon: String,
    gateway: u16,
    limit: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history =
        gb.match_history(toon, GatewayLookup::Id(gateway), LeaderboardLookup::default(), limit);

    while let Some(m) = history.next().await? {
        let this_player = m.this_player();
        let opponent = m.opponent();
        let delta = this_player.and_then(|p| p.profile_info.as_ref()).map(|i| i.points.delta);
        let points = match delta {
            Some(d) if d > 0 => format!("+{d}"),
            Some(d) => d.to_string(),
            None => "?".to_string(),
        };
        let when = m
            .timestamp
            .map_or_else(|| "unknown time".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        println!(
            "[{when}] (as {:7}) {:4} ({points:>4}) vs {} ({})",
            this_player.map_or("??", |p| p.race.as_str()),
            this_player.map_or("??", |p| p.result.as_str()),
            opponent.map_or("??", |p| p.toon.as_str()),
            opponent.map_or("??", |p| p.race.as_str()),
        );
    }
    Ok(())
}

async fn player_search(gb: &BroodStats, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    for result in gb.player_search(query).await? {
        let gateway =
            gb.gateway(GatewayLookup::Id(result.gateway_id)).map(|g| g.name).unwrap_or("??");
        println!(
            "rank {} {} ({}) on {} with {} points",
            result.rank, result.name, result.battletag, gateway, result.points
        );
    }
    Ok(())
}

async fn online_users(gb: &BroodStats) -> Result<(), Box<dyn std::error::Error>> {
    for gateway in gb.gateways() {
        let users = gb.online_users(GatewayLookup::Id(gateway.id)).await?;
        println!("{} ({}): {users}", gateway.name, gateway.id);
    }
    Ok(())
}

async fn dump_replays(
    gb: &BroodStats,
    toon: String,
    gateway: u16,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let account = gb.full_account(&toon, GatewayLookup::Id(gateway)).await?;
    let out_root = out.unwrap_or_else(|| PathBuf::from(&toon));
    let client = reqwest::Client::new();

    let profile_names: Vec<&str> =
        account.profiles.iter().map(|p| p.toon.as_str()).collect();
    println!("found {} profiles: [{}]", account.profiles.len(), profile_names.join(", "));

    let mut boards: Vec<_> = gb
        .leaderboards()
        .await?
        .into_iter()
        .filter(|b| b.game_mode == GameMode::OneVsOne && b.gateway.id == GLOBAL_GATEWAY_ID)
        .collect();
    boards.sort_by(|a, b| b.season_id.cmp(&a.season_id));

    for profile in &account.profiles {
        for board in &boards {
            let rankings = match gb
                .account_rankings_by_toon(
                    &profile.toon,
                    GatewayLookup::Id(profile.gateway_id),
                    LeaderboardLookup::Id(board.id),
                )
                .await
            {
                Ok(rankings) => rankings,
                // No ranking for this season; nothing to collect.
                Err(ApiError::EntityNotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            };
            let Some(ranking) = rankings.requested_ranking() else {
                continue;
            };

            println!(
                "found {} matches played during season {} for {}, collecting replays",
                ranking.total_games_played(),
                board.season_id,
                profile.toon
            );

            let dir = out_root.join(&profile.toon).join(format!("Season_{}", board.season_id));
            let mut history = gb.match_history(
                profile.toon.clone(),
                GatewayLookup::Id(profile.gateway_id),
                LeaderboardLookup::Id(board.id),
                None,
            );

            while let Some(m) = history.next().await? {
                let name = util::format_replay_name(&m);
                // Skip already-downloaded files so an interrupted run can
                // resume.
                if util::file_exists(&dir.join(&name)).await {
                    continue;
                }
                let replays = gb.replays(&m.id).await?;
                if let Some(replay) = replays.last_uploaded() {
                    util::download_into_directory(&client, &replay.url, &dir, &name).await?;
                    println!("downloaded {name}");
                }
            }
        }
    }
    Ok(())
}
