//! Built-in enemies and TOML enemy loading

use serde::Deserialize;
use std::path::Path;

use crate::core::error::{ForgeError, Result};
use crate::enemy::data::{EnemyData, EnemyTier, EnemyTrait, Intent, IntentFlavor, IntentType};

/// Top-level structure of an enemies TOML file
#[derive(Debug, Deserialize)]
struct EnemiesFile {
    #[serde(default)]
    enemies: Vec<EnemyData>,
}

/// Parse enemies from TOML content.
///
/// Every enemy is validated; one bad record rejects the whole file.
pub fn from_toml(content: &str) -> Result<Vec<EnemyData>> {
    let file: EnemiesFile = toml::from_str(content)?;
    let mut enemies = Vec::with_capacity(file.enemies.len());
    for mut enemy in file.enemies {
        enemy.validate().map_err(ForgeError::InvalidContent)?;
        enemy.prepare_for_combat();
        enemies.push(enemy);
    }
    tracing::info!("Loaded {} enemies", enemies.len());
    Ok(enemies)
}

/// Load enemies from a TOML file
pub fn from_file(path: &Path) -> Result<Vec<EnemyData>> {
    let content = std::fs::read_to_string(path)?;
    from_toml(&content)
}

/// Every built-in enemy
pub fn all() -> Vec<EnemyData> {
    vec![
        training_dummy(),
        thorn_golem(),
        iron_colossus(),
        goblin_cutpurse(),
        rune_wraith(),
        hammerhead(),
        deus_ex_machina(),
        corrupted_smith(),
        mimic_anvil(),
        kobold_scrapper(),
        shadow_assassin(),
    ]
}

/// Look up a built-in enemy by id
pub fn by_id(id: &str) -> Option<EnemyData> {
    all().into_iter().find(|e| e.id == id)
}

pub fn training_dummy() -> EnemyData {
    EnemyData::new(
        "training_dummy",
        "Training Dummy",
        EnemyTier::Common,
        30,
        vec![
            Intent::attack(6),
            Intent::new(IntentType::Defend, 5, "Braces"),
            Intent::attack(8),
        ],
    )
}

pub fn thorn_golem() -> EnemyData {
    EnemyData::new(
        "thorn_golem",
        "Thorn Golem",
        EnemyTier::Common,
        45,
        vec![
            Intent::attack(7),
            Intent::new(IntentType::Defend, 8, "Bristles"),
        ],
    )
    .with_traits(&[EnemyTrait::Thorns])
}

pub fn iron_colossus() -> EnemyData {
    EnemyData::new(
        "iron_colossus",
        "Iron Colossus",
        EnemyTier::Elite,
        90,
        vec![
            Intent::attack(12),
            Intent::new(IntentType::Buff, 3, "Gains strength"),
            Intent::attack(9),
        ],
    )
    .with_traits(&[EnemyTrait::DamageCap])
}

pub fn goblin_cutpurse() -> EnemyData {
    EnemyData::new(
        "goblin_cutpurse",
        "Goblin Cutpurse",
        EnemyTier::Common,
        28,
        vec![
            Intent::new(IntentType::Attack, 3, "Stab x2"),
            Intent::new(IntentType::Wait, 0, "Counts coins"),
        ],
    )
    .with_traits(&[EnemyTrait::Thievery])
}

pub fn rune_wraith() -> EnemyData {
    EnemyData::new(
        "rune_wraith",
        "Rune Wraith",
        EnemyTier::Elite,
        60,
        vec![
            Intent::attack(8),
            Intent::new(IntentType::Debuff, 2, "Curses your pack"),
        ],
    )
    .with_traits(&[EnemyTrait::ReactiveToRare])
}

pub fn hammerhead() -> EnemyData {
    EnemyData::new(
        "hammerhead",
        "Hammerhead",
        EnemyTier::Elite,
        70,
        vec![
            Intent::attack(10),
            Intent::new(IntentType::Debuff, 1, "Dents a handle"),
            Intent::new(IntentType::Defend, 10, "Hunkers down"),
        ],
    )
}

pub fn deus_ex_machina() -> EnemyData {
    EnemyData::new(
        "deus_ex_machina",
        "Deus Ex Machina",
        EnemyTier::Boss,
        150,
        vec![
            Intent::new(IntentType::Debuff, 2, "Imposes a cost limit")
                .with_flavor(IntentFlavor::CostLimit),
            Intent::new(IntentType::Attack, 5, "Gear storm x3"),
            Intent::new(IntentType::Debuff, 2, "Clogs the works"),
            Intent::attack(18),
        ],
    )
}

pub fn corrupted_smith() -> EnemyData {
    EnemyData::new(
        "corrupted_smith",
        "Corrupted Smith",
        EnemyTier::Boss,
        130,
        vec![
            Intent::attack(12),
            Intent::new(IntentType::Special, 0, "Disarms you").with_flavor(IntentFlavor::Disarm),
            Intent::new(IntentType::Buff, 4, "Stokes the forge for strength"),
            Intent::attack(16),
        ],
    )
}

pub fn mimic_anvil() -> EnemyData {
    EnemyData::new(
        "mimic_anvil",
        "Mimic Anvil",
        EnemyTier::Elite,
        65,
        vec![
            Intent::new(IntentType::Defend, 12, "Plays dead"),
            Intent::new(IntentType::Special, 0, "Reflects the blows it took")
                .with_flavor(IntentFlavor::Reflect),
            Intent::attack(9),
        ],
    )
}

pub fn kobold_scrapper() -> EnemyData {
    EnemyData::new(
        "kobold_scrapper",
        "Kobold Scrapper",
        EnemyTier::Common,
        32,
        vec![
            Intent::attack(5),
            Intent::new(IntentType::Buff, 0, "Sharpens scrap").with_flavor(IntentFlavor::Strength),
            Intent::new(IntentType::Attack, 3, "Scrap flurry x2"),
        ],
    )
}

pub fn shadow_assassin() -> EnemyData {
    EnemyData::new(
        "shadow_assassin",
        "Shadow Assassin",
        EnemyTier::Elite,
        55,
        vec![
            Intent::new(IntentType::Buff, 3, "Fades into shadow"),
            Intent::new(IntentType::Attack, 4, "Blade dance x3"),
            Intent::new(IntentType::Debuff, 1, "Poisoned caltrops"),
        ],
    )
}
