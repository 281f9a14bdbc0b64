//! Weapon prediction
//!
//! The forge is pure: it reads the slots and the combat context and returns
//! what the weapon would do, without touching anything. The UI calls it on
//! every change for live prediction and the resolver calls it once more when
//! the weapon is committed.

use serde::{Deserialize, Serialize};

use crate::combat::player::{PlayerStats, SessionBonuses};
use crate::core::types::{floor_mul, Energy};
use crate::effects::registry::{EffectAction, EffectRegistry, ForgeRule};
use crate::enemy::data::EnemyData;
use crate::forge::slots::WeaponSlots;

/// What a weapon will do if crafted now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftedWeapon {
    pub total_cost: Energy,
    pub damage: u32,
    pub block: u32,
    pub hit_count: u32,
    /// Special effects the slotted cards will trigger
    pub effects: Vec<EffectAction>,
}

impl CraftedWeapon {
    /// Nothing to craft: a handle or a head is missing
    pub fn zero() -> Self {
        Self {
            total_cost: 0.0,
            damage: 0,
            block: 0,
            hit_count: 1,
            effects: Vec::new(),
        }
    }
}

/// Computes weapon predictions from the registry's forge rules
#[derive(Debug, Clone, Copy)]
pub struct Forge<'a> {
    registry: &'a EffectRegistry,
}

impl<'a> Forge<'a> {
    pub fn new(registry: &'a EffectRegistry) -> Self {
        Self { registry }
    }

    /// Predict the weapon in `slots`.
    ///
    /// Handles with a display multiplier (the gambler's handle) are shown at
    /// that fixed multiplier; the real roll only happens on resolution, so the
    /// prediction can differ from the damage actually dealt.
    pub fn forge(
        &self,
        slots: &WeaponSlots,
        player: &PlayerStats,
        enemy: &EnemyData,
        bonuses: &SessionBonuses,
    ) -> CraftedWeapon {
        self.forge_with_multiplier(slots, player, enemy, bonuses, None)
    }

    /// Same as [`Forge::forge`], with the handle multiplier forced to `multiplier`
    pub fn forge_with_multiplier(
        &self,
        slots: &WeaponSlots,
        player: &PlayerStats,
        enemy: &EnemyData,
        bonuses: &SessionBonuses,
        multiplier: Option<f32>,
    ) -> CraftedWeapon {
        let (Some(handle), Some(head)) = (slots.handle.as_ref(), slots.head.as_ref()) else {
            return CraftedWeapon::zero();
        };
        let deco = slots.deco.as_ref();
        let rules: Vec<ForgeRule> = self.registry.forge_rules_for(slots).collect();
        let has = |wanted: ForgeRule| rules.contains(&wanted);

        let mut total_cost = handle.cost() + head.cost() + deco.map_or(0.0, |d| d.cost());
        let base_value = head.value() + deco.map_or(0.0, |d| d.value());

        let display_multiplier = rules.iter().find_map(|rule| match rule {
            ForgeRule::DisplayMultiplier(m) => Some(*m),
            _ => None,
        });
        let handle_multiplier = multiplier.or(display_multiplier).unwrap_or(handle.value());
        let final_value = (base_value * handle_multiplier).floor().max(0.0) as u32;

        if has(ForgeRule::ZeroCost) {
            total_cost = 0.0;
        }

        let mut damage = final_value;
        let mut block = 0;
        let mut hit_count = 1;

        let damage_is_block = has(ForgeRule::DamageEqualsPlayerBlock);
        if damage_is_block {
            damage = player.block;
        }

        if has(ForgeRule::ConvertToBlock) {
            block = final_value;
            if !damage_is_block {
                damage = 0;
            }
        }

        for rule in &rules {
            if let ForgeRule::HitCount(n) = rule {
                hit_count = *n;
            }
        }

        // Additive modifiers, in registration order
        for rule in &rules {
            match *rule {
                ForgeRule::BonusPerEnemyStatus { kind, per_stack } => {
                    damage += enemy.statuses.get(kind) * per_stack;
                }
                ForgeRule::BonusFromPlayerBlock(factor) => {
                    damage += floor_mul(player.block, factor);
                }
                ForgeRule::BonusPerWeaponUsed(per_weapon) => {
                    damage += per_weapon * player.weapons_used_this_turn;
                }
                ForgeRule::DoubleBlock => {
                    if block > 0 {
                        block *= 2;
                    }
                }
                ForgeRule::UtilityOnly => damage = 0,
                ForgeRule::CrystalBonus => damage += bonuses.growing_crystal_bonus,
                ForgeRule::DisplayMultiplier(_)
                | ForgeRule::ZeroCost
                | ForgeRule::DamageEqualsPlayerBlock
                | ForgeRule::ConvertToBlock
                | ForgeRule::HitCount(_) => {}
            }
        }

        CraftedWeapon {
            total_cost,
            damage,
            block,
            hit_count,
            effects: self.registry.actions_for(slots),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ids::*;
    use crate::cards::Catalog;
    use crate::enemy::bestiary;

    struct Bench {
        catalog: Catalog,
        registry: EffectRegistry,
        player: PlayerStats,
        enemy: EnemyData,
        bonuses: SessionBonuses,
    }

    impl Bench {
        fn new() -> Self {
            Self {
                catalog: Catalog::builtin(),
                registry: EffectRegistry::builtin(),
                player: PlayerStats::new(50, 3),
                enemy: bestiary::training_dummy(),
                bonuses: SessionBonuses::default(),
            }
        }

        fn forge(&self, ids: &[u32]) -> CraftedWeapon {
            let mut slots = WeaponSlots::new();
            for id in ids {
                slots.place(self.catalog.instantiate(*id).unwrap());
            }
            Forge::new(&self.registry).forge(&slots, &self.player, &self.enemy, &self.bonuses)
        }
    }

    #[test]
    fn test_missing_head_is_zero_weapon() {
        let bench = Bench::new();
        assert_eq!(bench.forge(&[WOODEN_HANDLE]), CraftedWeapon::zero());
        assert_eq!(bench.forge(&[IRON_BLADE, WHETSTONE]), CraftedWeapon::zero());
    }

    #[test]
    fn test_basic_weapon() {
        let weapon = Bench::new().forge(&[WOODEN_HANDLE, IRON_BLADE]);
        assert_eq!(weapon.total_cost, 2.0);
        assert_eq!(weapon.damage, 6);
        assert_eq!(weapon.block, 0);
        assert_eq!(weapon.hit_count, 1);
    }

    #[test]
    fn test_deco_adds_before_multiplier() {
        // (6 + 2) * 1.5 = 12
        let weapon = Bench::new().forge(&[PAIN_GRIP, IRON_BLADE, WHETSTONE]);
        assert_eq!(weapon.damage, 12);
        assert_eq!(weapon.total_cost, 1.0);
    }

    #[test]
    fn test_multiplier_floors() {
        // 5 * 1.5 = 7.5 -> 7
        let weapon = Bench::new().forge(&[PAIN_GRIP, BUCKLER_PLATE]);
        assert_eq!(weapon.block, 7);
        assert_eq!(weapon.damage, 0);
    }

    #[test]
    fn test_defensive_combo() {
        let weapon = Bench::new().forge(&[GUARD_GRIP, BUCKLER_PLATE]);
        assert_eq!(weapon.block, 5);
        assert_eq!(weapon.damage, 0);
    }

    #[test]
    fn test_spiked_shield_uses_player_block() {
        let mut bench = Bench::new();
        bench.player.block = 9;
        let weapon = bench.forge(&[WOODEN_HANDLE, SPIKED_SHIELD]);
        assert_eq!(weapon.damage, 9);
        assert_eq!(weapon.block, 0);
    }

    #[test]
    fn test_spiked_shield_with_guard_grip_keeps_both() {
        let mut bench = Bench::new();
        bench.player.block = 4;
        let weapon = bench.forge(&[GUARD_GRIP, SPIKED_SHIELD, WHETSTONE]);
        // block from value (0 + 2) * 1, damage from current block
        assert_eq!(weapon.block, 2);
        assert_eq!(weapon.damage, 4);
    }

    #[test]
    fn test_philosophers_stone_zero_cost() {
        let weapon = Bench::new().forge(&[TWIN_GRIP, METEOR_BLADE, PHILOSOPHERS_STONE]);
        assert_eq!(weapon.total_cost, 0.0);
        assert_eq!(weapon.damage, 20);
    }

    #[test]
    fn test_gambler_displays_fixed_multiplier() {
        let weapon = Bench::new().forge(&[GAMBLERS_HANDLE, IRON_BLADE]);
        assert_eq!(weapon.damage, 12);
    }

    #[test]
    fn test_twin_fang_hit_count() {
        let weapon = Bench::new().forge(&[WOODEN_HANDLE, TWIN_FANG]);
        assert_eq!(weapon.hit_count, 2);
    }

    #[test]
    fn test_status_bonuses() {
        let mut bench = Bench::new();
        bench.enemy.statuses.bleed = 3;
        bench.enemy.statuses.poison = 5;
        assert_eq!(bench.forge(&[WOODEN_HANDLE, HEMORRHAGE_BLADE]).damage, 4 + 3);
        assert_eq!(bench.forge(&[WOODEN_HANDLE, TOXIC_FANG]).damage, 3 + 5);
    }

    #[test]
    fn test_bulwark_rune_half_block() {
        let mut bench = Bench::new();
        bench.player.block = 7;
        assert_eq!(bench.forge(&[WOODEN_HANDLE, IRON_BLADE, BULWARK_RUNE]).damage, 6 + 3);
    }

    #[test]
    fn test_momentum_counts_weapons_used() {
        let mut bench = Bench::new();
        bench.player.weapons_used_this_turn = 2;
        assert_eq!(bench.forge(&[WOODEN_HANDLE, MOMENTUM_BLADE]).damage, 3 + 4);
    }

    #[test]
    fn test_fortress_rune_doubles_block_only_when_positive() {
        let bench = Bench::new();
        let defensive = bench.forge(&[GUARD_GRIP, BUCKLER_PLATE, FORTRESS_RUNE]);
        assert_eq!(defensive.block, 10);
        let offensive = bench.forge(&[WOODEN_HANDLE, IRON_BLADE, FORTRESS_RUNE]);
        assert_eq!(offensive.block, 0);
        assert_eq!(offensive.damage, 6);
    }

    #[test]
    fn test_time_stopper_utility_only() {
        let weapon = Bench::new().forge(&[WOODEN_HANDLE, TIME_STOPPER, WHETSTONE]);
        assert_eq!(weapon.damage, 0);
        assert!(weapon.effects.contains(&EffectAction::SkipIntent));
    }

    #[test]
    fn test_crystal_bonus_from_session() {
        let mut bench = Bench::new();
        bench.bonuses.growing_crystal_bonus = 6;
        assert_eq!(bench.forge(&[WOODEN_HANDLE, IRON_BLADE, GROWING_CRYSTAL]).damage, 12);
    }

    #[test]
    fn test_forge_is_repeatable() {
        let bench = Bench::new();
        let a = bench.forge(&[GAMBLERS_HANDLE, SERRATED_EDGE, SMOKE_CHARM]);
        let b = bench.forge(&[GAMBLERS_HANDLE, SERRATED_EDGE, SMOKE_CHARM]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_forced_multiplier() {
        let bench = Bench::new();
        let mut slots = WeaponSlots::new();
        slots.place(bench.catalog.instantiate(GAMBLERS_HANDLE).unwrap());
        slots.place(bench.catalog.instantiate(IRON_BLADE).unwrap());
        let weapon = Forge::new(&bench.registry).forge_with_multiplier(
            &slots,
            &bench.player,
            &bench.enemy,
            &bench.bonuses,
            Some(3.0),
        );
        assert_eq!(weapon.damage, 18);
    }
}
