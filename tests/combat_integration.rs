//! Combat session integration tests
//!
//! Full turns through `CombatSession`: slotting, crafting, ending the turn
//! and the scripted enemies acting on the player.

use forgebound::cards::ids::*;
use forgebound::cards::{Catalog, SlotType};
use forgebound::combat::{CombatEvent, CombatOutcome, CombatSession, Phase, PlayerStats};
use forgebound::core::{CombatConfig, ForgeError};
use forgebound::effects::EffectRegistry;
use forgebound::enemy::{bestiary, EnemyData, Intent, IntentFlavor, IntentType};

fn start(ids: &[u32], enemy: EnemyData, player: PlayerStats) -> CombatSession {
    let catalog = Catalog::builtin();
    let cards = ids.iter().map(|id| catalog.instantiate(*id).unwrap()).collect();
    let config = CombatConfig::default();
    let registry = EffectRegistry::builtin_with(&config);
    CombatSession::start(player, cards, enemy, catalog, registry, config, 2024).unwrap()
}

fn slot(session: &mut CombatSession, card: u32) {
    let card = session
        .hand()
        .iter()
        .find(|c| c.id() == card)
        .unwrap_or_else(|| panic!("card {} not in hand", card));
    let (id, slot) = (card.instance_id, card.slot());
    session.move_card_to_slot(id, slot).unwrap();
}

fn forge(session: &mut CombatSession, cards: &[u32]) {
    for card in cards {
        slot(session, *card);
    }
    session.craft_and_resolve().unwrap();
}

fn enemy_with(id: &str, intents: Vec<Intent>) -> EnemyData {
    let mut enemy = bestiary::training_dummy();
    enemy.id = id.to_string();
    enemy.intents = intents;
    enemy.behavior = None;
    enemy
}

/// Starter deck, fresh combat: 101 + 103 takes 6 HP and 2 energy
#[test]
fn test_starter_deck_basic_attack() {
    let mut session = start(&[WOODEN_HANDLE, IRON_BLADE], bestiary::training_dummy(), PlayerStats::default());
    assert_eq!(session.phase(), Phase::PlayerAction);
    forge(&mut session, &[WOODEN_HANDLE, IRON_BLADE]);
    assert_eq!(session.enemy().current_hp, 24);
    assert_eq!(session.player().energy, 1.0);
}

/// A rejected craft leaves the session exactly as it was
#[test]
fn test_rejected_craft_changes_nothing() {
    let mut session = start(
        &[TWIN_GRIP, METEOR_BLADE],
        bestiary::training_dummy(),
        PlayerStats::default(),
    );
    slot(&mut session, TWIN_GRIP);
    slot(&mut session, METEOR_BLADE);
    let player = session.player().clone();
    let enemy = session.enemy().clone();
    let piles = session.piles().clone();

    let err = session.craft_and_resolve().unwrap_err();
    assert_eq!(err, ForgeError::InsufficientEnergy { cost: 4.0, energy: 3.0 });
    assert_eq!(session.player(), &player);
    assert_eq!(session.enemy(), &enemy);
    assert_eq!(session.piles(), &piles);
    assert!(session.slots().is_complete());
}

/// A stunned enemy loses one stun stack and nothing else happens
#[test]
fn test_stunned_enemy_skips_turn() {
    let mut session = start(
        &[THUNDER_GRIP, IRON_BLADE],
        bestiary::training_dummy(),
        PlayerStats::default(),
    );
    forge(&mut session, &[THUNDER_GRIP, IRON_BLADE]);
    assert_eq!(session.enemy().statuses.stunned, 1);
    let index = session.enemy().current_intent_index;

    let outcome = session.end_turn().unwrap();
    assert!(outcome.stunned);
    assert!(outcome.intent.is_none());
    assert_eq!(session.enemy().statuses.stunned, 0);
    assert_eq!(session.enemy().current_intent_index, index);
    assert_eq!(session.player().hp, 50);
    assert_eq!(session.turn(), 2);
}

/// Time stopper stuns and also skips the following intent
#[test]
fn test_time_stopper_skips_an_intent() {
    let mut session = start(
        &[WOODEN_HANDLE, TIME_STOPPER],
        bestiary::training_dummy(),
        PlayerStats::default(),
    );
    forge(&mut session, &[WOODEN_HANDLE, TIME_STOPPER]);
    session.end_turn().unwrap();
    assert_eq!(session.enemy().current_intent_index, 1);
    // turn 2: dummy defends instead of attacking
    session.end_turn().unwrap();
    assert_eq!(session.player().hp, 50);
    assert_eq!(session.enemy().current_intent_index, 2);
}

/// Block gained this turn soaks the enemy attack, then resets at draw
#[test]
fn test_block_absorbs_then_resets() {
    let mut session = start(&[GUARD_GRIP, BUCKLER_PLATE], bestiary::training_dummy(), PlayerStats::default());
    forge(&mut session, &[GUARD_GRIP, BUCKLER_PLATE]);
    assert_eq!(session.player().block, 5);
    session.end_turn().unwrap();
    // 6 damage, 5 blocked
    assert_eq!(session.player().hp, 49);
    assert_eq!(session.player().block, 0);
}

/// The player dies during the enemy turn: combat is lost and stays lost
#[test]
fn test_player_death_is_terminal() {
    let enemy = enemy_with("crusher", vec![Intent::attack(99)]);
    let mut session = start(&[WOODEN_HANDLE], enemy, PlayerStats::default());
    let outcome = session.end_turn().unwrap();
    assert_eq!(outcome.events.last(), Some(&CombatEvent::CombatLost));
    assert_eq!(session.outcome(), CombatOutcome::Lost);
    assert_eq!(session.phase(), Phase::Lost);
    assert_eq!(session.craft_and_resolve().unwrap_err(), ForgeError::CombatOver);
}

/// Hammerhead permanently raises the cost of a handle in the deck
#[test]
fn test_hammerhead_raises_handle_cost() {
    let mut enemy = bestiary::hammerhead();
    enemy.intents = vec![Intent::new(IntentType::Debuff, 1, "Dents a handle")];
    let mut session = start(&[WOODEN_HANDLE, IRON_BLADE], enemy, PlayerStats::default());
    session.end_turn().unwrap();
    let handle = session.hand().iter().find(|c| c.id() == WOODEN_HANDLE).unwrap();
    assert_eq!(handle.cost(), 2.0);
    assert_eq!(session.catalog().get(WOODEN_HANDLE).unwrap().cost, 1.0);
}

/// Hammerhead with no handle anywhere does nothing
#[test]
fn test_hammerhead_without_handles() {
    let mut enemy = bestiary::hammerhead();
    enemy.intents = vec![Intent::new(IntentType::Debuff, 1, "Dents a handle")];
    let mut session = start(&[IRON_BLADE], enemy, PlayerStats::default());
    session.end_turn().unwrap();
    assert_eq!(session.piles().total(), 1);
    assert_eq!(session.player().hp, 50);
}

/// Deus ex machina caps weapon cost for the next turn only
#[test]
fn test_deus_cost_limit() {
    let mut session = start(
        &[TWIN_GRIP, IRON_BLADE, WOODEN_HANDLE],
        bestiary::deus_ex_machina(),
        PlayerStats::default(),
    );
    session.end_turn().unwrap();
    assert_eq!(session.player().cost_limit, Some(2));

    slot(&mut session, TWIN_GRIP);
    slot(&mut session, IRON_BLADE);
    assert_eq!(
        session.craft_and_resolve().unwrap_err(),
        ForgeError::CostLimitExceeded { cost: 3.0, limit: 2 }
    );
    slot(&mut session, WOODEN_HANDLE);
    session.craft_and_resolve().unwrap();

    session.end_turn().unwrap();
    assert_eq!(session.player().cost_limit, None);
}

/// Corrupted smith's special locks the head slot for a turn
#[test]
fn test_corrupted_smith_disarms() {
    let mut enemy = bestiary::corrupted_smith();
    enemy.intents = vec![Intent::new(IntentType::Special, 0, "Disarms you"), Intent::attack(1)];
    let mut session = start(&[WOODEN_HANDLE, IRON_BLADE], enemy, PlayerStats::default());
    session.end_turn().unwrap();
    assert!(session.player().disarmed);

    let head = session.hand().iter().find(|c| c.id() == IRON_BLADE).unwrap().instance_id;
    assert_eq!(session.move_card_to_slot(head, SlotType::Head), Err(ForgeError::Disarmed));
    slot(&mut session, WOODEN_HANDLE);
}

/// Mimic anvil reflects the damage it took this turn
#[test]
fn test_mimic_reflects_damage_taken() {
    let mut enemy = bestiary::mimic_anvil();
    enemy.intents = vec![Intent::new(IntentType::Special, 0, "Reflects the blows it took")];
    let mut session = start(&[WOODEN_HANDLE, IRON_BLADE], enemy, PlayerStats::default());
    forge(&mut session, &[WOODEN_HANDLE, IRON_BLADE]);
    session.end_turn().unwrap();
    assert_eq!(session.player().hp, 44);
}

/// Kobold strength lands on its next attack and is then spent
#[test]
fn test_kobold_strength_is_spent() {
    let mut enemy = bestiary::kobold_scrapper();
    enemy.intents = vec![
        Intent::new(IntentType::Buff, 0, "Sharpens scrap").with_flavor(IntentFlavor::Strength),
        Intent::attack(5),
    ];
    let mut session = start(&[WOODEN_HANDLE], enemy, PlayerStats::default());
    session.end_turn().unwrap();
    let strength = session.enemy().statuses.strength;
    assert!((1..=3).contains(&strength));
    session.end_turn().unwrap();
    assert_eq!(session.player().hp, 50 - 5 - strength);
    assert_eq!(session.enemy().statuses.strength, 0);
}

/// A kobold buff that is not about strength heals instead of rolling
#[test]
fn test_kobold_heal_buff_heals() {
    let mut enemy = bestiary::kobold_scrapper();
    enemy.intents = vec![Intent::new(IntentType::Buff, 4, "Patches itself up")];
    let mut session = start(&[WOODEN_HANDLE, IRON_BLADE], enemy, PlayerStats::default());
    forge(&mut session, &[WOODEN_HANDLE, IRON_BLADE]);
    assert_eq!(session.enemy().current_hp, 32 - 6);
    session.end_turn().unwrap();
    assert_eq!(session.enemy().current_hp, 32 - 2);
    assert_eq!(session.enemy().statuses.strength, 0);
}

/// Generic debuffs shuffle unplayable junk into the discard pile
#[test]
fn test_junk_injection() {
    let enemy = enemy_with("polluter", vec![Intent::new(IntentType::Debuff, 2, "Spews slag")]);
    let mut session = start(&[WOODEN_HANDLE], enemy, PlayerStats::default());
    session.end_turn().unwrap();
    let junk: Vec<_> = session
        .hand()
        .iter()
        .filter(|c| c.id() == RUSTED_SCRAP)
        .collect();
    assert_eq!(junk.len(), 2);
    let id = junk[0].instance_id;
    assert_eq!(session.move_card_to_slot(id, SlotType::Junk), Err(ForgeError::Unplayable(RUSTED_SCRAP)));
}

/// Thieves take gold when their hits get through
#[test]
fn test_thievery() {
    let mut player = PlayerStats::default();
    player.gold = 12;
    let enemy = bestiary::goblin_cutpurse();
    let mut session = start(&[WOODEN_HANDLE], enemy, player);
    session.end_turn().unwrap();
    // two stabs, five gold each
    assert_eq!(session.player().gold, 2);
}

/// Winning ends the combat; finish hands the deck back without echoes
#[test]
fn test_win_and_finish() {
    let mut enemy = bestiary::training_dummy();
    enemy.max_hp = 5;
    let mut session = start(&[WOODEN_HANDLE, IRON_BLADE, ECHO_PRISM], enemy, PlayerStats::default());
    forge(&mut session, &[WOODEN_HANDLE, IRON_BLADE, ECHO_PRISM]);
    assert_eq!(session.outcome(), CombatOutcome::Won);
    assert_eq!(session.phase(), Phase::Won);
    assert!(session.piles().draw.iter().any(|c| c.id() == WEAPON_ECHO));

    let (_, cards) = session.finish();
    assert_eq!(cards.len(), 3);
    assert!(cards.iter().all(|c| c.id() != WEAPON_ECHO));
}

/// The convenience constructor uses the starter deck and a full hand
#[test]
fn test_start_combat_defaults() {
    let session = CombatSession::start_combat(bestiary::training_dummy()).unwrap();
    assert_eq!(session.hand().len(), 5);
    assert_eq!(session.piles().total(), 10);
    assert_eq!(session.player().energy, 3.0);
}
