use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use league::config::db::DbProfile;
use league::config::league::{ClientConfig, LeagueConfig};
use league::domain::pairing::Pairing;
use league::errors::domain::DomainError;
use league::repos::{LeagueStore, SeaStore};
use league::services::{LeagueService, RoundStart};
use league::telemetry;
use league::{PackGeneratorClient, ScryfallClient};

#[derive(Clone, ValueEnum)]
enum Db {
    Postgres,
    SqliteMemory,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "league")]
#[command(about = "Operator console for the progression league")]
struct Cli {
    /// Backing database
    #[arg(long, value_enum, default_value = "postgres", global = true)]
    db: Db,

    /// SQLite file path (defaults to LEAGUE_SQLITE_FILE, then league.sqlite)
    #[arg(long, global = true)]
    file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Join the league, or rejoin after dropping
    Join { player: String },
    /// Drop from the league, forfeiting an open pairing
    Drop { player: String },
    /// Report the player's result for the current round
    Report {
        player: String,
        wins: i32,
        losses: i32,
        #[arg(default_value_t = 0)]
        draws: i32,
    },
    /// Start a league with the given set
    StartRound { set: String },
    /// Move to the next round and unlock the given set
    AdvanceRound { set: String },
    EndLeague {
        #[arg(long = "as")]
        requester: String,
    },
    /// Schedule a pairing in the current round
    Pair {
        player1: String,
        player2: String,
        #[arg(long = "as")]
        requester: String,
    },
    /// List a player's card pool
    Pool { player: String },
    Balance { player: String },
    /// List the unlocked sets
    Sets,
    Ban {
        card: String,
        #[arg(long = "as")]
        requester: String,
    },
    Unban {
        card: String,
        #[arg(long = "as")]
        requester: String,
    },
    Bans,
    /// Grant admin rights; without --as the grant is unchecked (first admin)
    GrantAdmin {
        target: String,
        #[arg(long = "as")]
        requester: Option<String>,
    },
    GrantWilds {
        player: String,
        #[arg(long, default_value_t = 0)]
        cards: i32,
        #[arg(long, default_value_t = 0)]
        packs: i32,
        #[arg(long = "as")]
        requester: String,
    },
    /// Resolve a card name within the unlocked sets
    FindCard { name: String },
    RedeemCard { player: String, name: String },
    RedeemPacks {
        player: String,
        set: String,
        #[arg(default_value_t = 1)]
        count: i32,
    },
}

async fn build_service(profile: &DbProfile) -> Result<LeagueService, DomainError> {
    let league_config = LeagueConfig::from_env()?;
    let client_config = ClientConfig::from_env()?;

    let store = SeaStore::connect(profile).await?;
    let packs = PackGeneratorClient::new(
        client_config.pack_generator_url.clone(),
        client_config.http_timeout,
    )?;
    let lookup = ScryfallClient::new(
        client_config.card_lookup_url.clone(),
        client_config.http_timeout,
    )?;

    Ok(LeagueService::new(
        Arc::new(store),
        Arc::new(packs),
        Arc::new(lookup),
        league_config,
    ))
}

fn print_round(start: &RoundStart) {
    println!("Round {} started.", start.round);
    for (player, cards) in &start.pools {
        println!("  {player}: {} new cards", cards.len());
    }
}

async fn run(service: &LeagueService, command: Command) -> Result<(), DomainError> {
    match command {
        Command::Join { player } => {
            let joined = service.join_league(&player).await?;
            println!(
                "{} is in the league ({} wild cards, {} wild packs).",
                joined.id, joined.wild_cards, joined.wild_packs
            );
        }
        Command::Drop { player } => {
            service.drop_player(&player).await?;
            println!("{player} dropped from the league.");
        }
        Command::Report {
            player,
            wins,
            losses,
            draws,
        } => {
            let pairing = service.report_match(&player, wins, losses, draws).await?;
            println!(
                "Round {}: {} {}-{}-{} {}",
                pairing.round,
                pairing.player1,
                pairing.wins1,
                pairing.wins2,
                pairing.draws,
                pairing.player2
            );
        }
        Command::StartRound { set } => print_round(&service.start_round(&set).await?),
        Command::AdvanceRound { set } => print_round(&service.advance_round(&set).await?),
        Command::EndLeague { requester } => {
            service.end_league(&requester).await?;
            println!("League ended.");
        }
        Command::Pair {
            player1,
            player2,
            requester,
        } => {
            let round = service.store().get_round().await?;
            let pairing = Pairing::scheduled(round, player1, player2);
            service
                .store_pairings(&requester, std::slice::from_ref(&pairing))
                .await?;
            println!(
                "Round {round}: {} vs {}",
                pairing.player1, pairing.player2
            );
        }
        Command::Pool { player } => {
            for entry in service.get_player_cards(&player).await? {
                println!(
                    "{}x {} ({} {})",
                    entry.count, entry.name, entry.set_code, entry.collector_number
                );
            }
        }
        Command::Balance { player } => {
            let balance = service.get_player_balance(&player).await?;
            println!(
                "{} wild cards, {} wild packs",
                balance.wild_cards, balance.wild_packs
            );
        }
        Command::Sets => {
            for set in service.get_sets().await? {
                println!("{set}");
            }
        }
        Command::Ban { card, requester } => {
            service.ban_card(&requester, &card).await?;
            println!("{card} is banned.");
        }
        Command::Unban { card, requester } => {
            service.unban_card(&requester, &card).await?;
            println!("{card} is no longer banned.");
        }
        Command::Bans => {
            for card in service.get_banned_cards().await? {
                println!("{card}");
            }
        }
        Command::GrantAdmin { target, requester } => {
            match requester {
                Some(requester) => service.make_admin(&requester, &target).await?,
                None => service.store().make_admin(&target).await?,
            }
            println!("{target} is now an admin.");
        }
        Command::GrantWilds {
            player,
            cards,
            packs,
            requester,
        } => {
            service
                .grant_wilds(&requester, &player, cards, packs)
                .await?;
            println!("Granted {player} {cards} wild cards and {packs} wild packs.");
        }
        Command::FindCard { name } => {
            let found = service.find_card(&name).await?;
            println!(
                "{} ({} {})",
                found.name, found.set_code, found.collector_number
            );
        }
        Command::RedeemCard { player, name } => {
            let copy = service.redeem_wild_card(&player, &name).await?;
            println!(
                "{player} redeemed {} ({} {}).",
                copy.name, copy.set_code, copy.collector_number
            );
        }
        Command::RedeemPacks { player, set, count } => {
            let copies = service.redeem_wild_packs(&player, &set, count).await?;
            println!("{player} opened {count} {set} packs:");
            for copy in copies {
                println!("  {} ({} {})", copy.name, copy.set_code, copy.collector_number);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    let cli = Cli::parse();
    let profile = match cli.db {
        Db::Postgres => DbProfile::Postgres,
        Db::SqliteMemory => DbProfile::SqliteMemory,
        Db::SqliteFile => DbProfile::SqliteFile { file: cli.file },
    };

    let result = match build_service(&profile).await {
        Ok(service) => run(&service, cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_infra() {
                tracing::error!(error = %e, "command failed");
            }
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
