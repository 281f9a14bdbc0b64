//! Catalog ids for cards whose behavior the engine knows about

use crate::core::types::CardId;

// Starter
pub const WOODEN_HANDLE: CardId = 101;
pub const GUARD_GRIP: CardId = 102;
pub const IRON_BLADE: CardId = 103;
pub const BUCKLER_PLATE: CardId = 104;
pub const WHETSTONE: CardId = 105;
pub const LUCKY_TASSEL: CardId = 106;

// Common
pub const HEAVY_GRIP: CardId = 201;
pub const SERRATED_EDGE: CardId = 203;
pub const SCHOLARS_RIBBON: CardId = 204;
pub const VENOM_VIAL: CardId = 205;
pub const BREAKER_GRIP: CardId = 206;
pub const SPIKED_SHIELD: CardId = 207;
pub const SPARK_GEM: CardId = 208;
pub const HEMORRHAGE_BLADE: CardId = 209;
pub const BULWARK_RUNE: CardId = 210;
pub const OVERCHARGE_CORE: CardId = 211;
pub const QUICK_GRIP: CardId = 212;
pub const TOXIC_FANG: CardId = 213;
pub const DULLING_HAMMER: CardId = 214;
pub const SCHOLARS_EDGE: CardId = 215;
pub const FEATHER_GRIP: CardId = 218;
pub const SMOKE_CHARM: CardId = 219;

// Rare
pub const TWIN_GRIP: CardId = 301;
pub const VAMPIRIC_GRIP: CardId = 302;
pub const FLAME_BLADE: CardId = 303;
pub const RECKLESS_CLEAVER: CardId = 304;
pub const ECHO_PRISM: CardId = 305;
pub const TWIN_FANG: CardId = 306;
pub const GOLDEN_GRIP: CardId = 307;
pub const MOLTEN_BLADE: CardId = 308;
pub const GAMBLERS_HANDLE: CardId = 309;
pub const MOMENTUM_BLADE: CardId = 310;
pub const FORTRESS_RUNE: CardId = 311;
pub const RENDING_SAW: CardId = 312;
pub const EFFICIENT_EDGE: CardId = 313;
pub const BLOOD_BLADE: CardId = 314;
pub const PIERCING_GRIP: CardId = 317;
pub const PAIN_GRIP: CardId = 318;
pub const EMBER_CHARM: CardId = 319;
pub const MASOCHISTS_CHARM: CardId = 320;

// Legend
pub const THUNDER_GRIP: CardId = 401;
pub const METEOR_BLADE: CardId = 402;
pub const PHILOSOPHERS_STONE: CardId = 403;
pub const DEMON_BLADE: CardId = 404;
pub const INFINITE_LOOP_GRIP: CardId = 405;
pub const TIME_STOPPER: CardId = 406;
pub const GROWING_CRYSTAL: CardId = 407;
pub const CONCUSSION_HAMMER: CardId = 408;
pub const EXECUTIONERS_AXE: CardId = 409;
pub const PHANTOM_GRIP: CardId = 412;
pub const BERSERKER_RUNE: CardId = 413;

// Generated
pub const WEAPON_ECHO: CardId = 801;
pub const RUSTED_SCRAP: CardId = 901;
