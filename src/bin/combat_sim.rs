//! Headless Combat Simulator
//!
//! Plays a combat with a greedy auto-pilot and prints a summary. Used for
//! balance smoke tests of cards and enemies.

use clap::Parser;
use forgebound::cards::{CardInstance, SlotType};
use forgebound::combat::{CombatOutcome, CombatSession, PlayerStats};
use forgebound::core::CombatConfig;
use forgebound::effects::EffectRegistry;
use forgebound::enemy::{bestiary, EnemyData};
use forgebound::forge::{Forge, WeaponSlots};
use forgebound::Catalog;
use serde::Serialize;
use std::path::PathBuf;

/// Headless Combat Simulator - greedy auto-pilot against one enemy
#[derive(Parser, Debug)]
#[command(name = "combat_sim")]
#[command(about = "Play a combat with a greedy auto-pilot and report the result")]
struct Args {
    /// Enemy id (built-in roster, or one loaded with --enemies)
    #[arg(long, default_value = "training_dummy")]
    enemy: String,

    /// TOML file with extra enemies
    #[arg(long)]
    enemies: Option<PathBuf>,

    /// TOML file with combat config overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before calling it a draw
    #[arg(long, default_value_t = 30)]
    turns: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct SimResult {
    outcome: String,
    enemy: String,
    turns: u32,
    weapons_crafted: u32,
    player_hp: u32,
    player_max_hp: u32,
    enemy_hp: u32,
    enemy_max_hp: u32,
    gold: u32,
    events: usize,
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("forgebound=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> forgebound::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };

    let enemy = find_enemy(&args)?;
    let enemy_name = enemy.name.clone();
    let catalog = Catalog::builtin();
    let deck = catalog.starter_deck()?;
    let registry = EffectRegistry::builtin_with(&config);

    let mut session = CombatSession::start(
        PlayerStats::default(),
        deck,
        enemy,
        catalog,
        registry,
        config,
        seed,
    )?;

    let mut crafted = 0;
    while session.outcome() == CombatOutcome::Ongoing && session.turn() <= args.turns {
        while let Some(weapon) = best_weapon(&session) {
            for card in weapon {
                session.move_card_to_slot(card.instance_id, card.slot())?;
            }
            session.craft_and_resolve()?;
            crafted += 1;
            if session.outcome() != CombatOutcome::Ongoing {
                break;
            }
        }
        if session.outcome() != CombatOutcome::Ongoing {
            break;
        }
        session.end_turn()?;
    }

    let outcome = match session.outcome() {
        CombatOutcome::Ongoing => "Draw".to_string(),
        other => format!("{:?}", other),
    };
    let result = SimResult {
        outcome,
        enemy: enemy_name,
        turns: session.turn(),
        weapons_crafted: crafted,
        player_hp: session.player().hp,
        player_max_hp: session.player().max_hp,
        enemy_hp: session.enemy().current_hp,
        enemy_max_hp: session.enemy().max_hp,
        gold: session.player().gold,
        events: session.history().len(),
        seed,
    };

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&result)?;
            println!("{}", json);
        }
        _ => {
            println!("Combat Result");
            println!("=============");
            println!("Enemy: {}", result.enemy);
            println!("Outcome: {}", result.outcome);
            println!("Turns: {}", result.turns);
            println!("Weapons crafted: {}", result.weapons_crafted);
            println!("Player HP: {}/{}", result.player_hp, result.player_max_hp);
            println!("Enemy HP: {}/{}", result.enemy_hp, result.enemy_max_hp);
            println!("Gold: {}", result.gold);
            println!("Seed: {}", result.seed);
        }
    }
    Ok(())
}

fn find_enemy(args: &Args) -> forgebound::Result<EnemyData> {
    if let Some(path) = &args.enemies {
        let loaded = bestiary::from_file(path)?;
        if let Some(enemy) = loaded.into_iter().find(|e| e.id == args.enemy) {
            return Ok(enemy);
        }
    }
    bestiary::by_id(&args.enemy).ok_or_else(|| {
        forgebound::ForgeError::InvalidContent(format!("unknown enemy: {}", args.enemy))
    })
}

/// The affordable weapon from the current hand with the best damage plus block
fn best_weapon(session: &CombatSession) -> Option<Vec<CardInstance>> {
    let player = session.player();
    let of_type = |slot: SlotType| -> Vec<&CardInstance> {
        session
            .hand()
            .iter()
            .filter(|c| c.slot() == slot && !c.is_unplayable())
            .collect()
    };
    if player.disarmed {
        return None;
    }

    let handles = of_type(SlotType::Handle);
    let heads = of_type(SlotType::Head);
    let mut decos: Vec<Option<&CardInstance>> = of_type(SlotType::Deco).into_iter().map(Some).collect();
    decos.push(None);

    let forge = Forge::new(session.registry());
    let mut best: Option<(u32, Vec<CardInstance>)> = None;

    for handle in &handles {
        for head in &heads {
            for deco in &decos {
                let mut slots = WeaponSlots::new();
                let mut cards = vec![(*handle).clone(), (*head).clone()];
                if let Some(deco) = deco {
                    cards.push((*deco).clone());
                }
                for card in &cards {
                    slots.place(card.clone());
                }

                let weapon = forge.forge(&slots, player, session.enemy(), session.bonuses());
                if weapon.total_cost > player.energy {
                    continue;
                }
                if let Some(limit) = player.cost_limit {
                    if weapon.total_cost > limit as f32 {
                        continue;
                    }
                }
                let score = weapon.damage * weapon.hit_count + weapon.block;
                if score == 0 {
                    continue;
                }
                if best.as_ref().map_or(true, |(s, _)| score > *s) {
                    best = Some((score, cards));
                }
            }
        }
    }

    best.map(|(_, cards)| cards)
}
