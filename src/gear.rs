//! Static stat tables: boss stat blocks and per-boss weapon accuracy/max hits
//!
//! Accuracy and max hits depend on the target (type bonuses, Twisted Bow magic
//! scaling, salve/slayer-free raid setups), so every weapon has one entry per boss.

use crate::combat_stats::{DefaultCombatStats, DefenceBonuses};

/// Accuracy roll and max hit of one weapon against one opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponProfile {
    pub attack_roll: u32,
    pub max_hit: u32,
}

/// Raw (level 0 invocation, no path) monster stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterProfile {
    pub name: &'static str,
    pub base_hp: u32,
    pub defence_level: u32,
    pub magic_level: u32,
    pub bonuses: DefenceBonuses,
}

impl MonsterProfile {
    pub fn combat_stats(&self) -> DefaultCombatStats {
        DefaultCombatStats::new(self.defence_level, self.magic_level, self.bonuses)
    }
}

pub mod akkha {
    use super::*;

    pub const BOSS: MonsterProfile = MonsterProfile {
        name: "Akkha",
        base_hp: 400,
        defence_level: 80,
        magic_level: 100,
        bonuses: DefenceBonuses { stab: 60, slash: 120, crush: 120, magic: 10, ranged: 60 },
    };

    pub const SHADOW: MonsterProfile = MonsterProfile {
        name: "Akkha's Shadow",
        base_hp: 70,
        defence_level: 30,
        magic_level: 30,
        bonuses: DefenceBonuses { stab: 0, slash: 0, crush: 0, magic: 0, ranged: 0 },
    };

    pub const TUMEKENS_SHADOW: WeaponProfile = WeaponProfile { attack_roll: 58_000, max_hit: 68 };
    pub const ZARYTE_CROSSBOW: WeaponProfile = WeaponProfile { attack_roll: 42_000, max_hit: 48 };
}

pub mod baba {
    use super::*;

    pub const BOSS: MonsterProfile = MonsterProfile {
        name: "Ba-Ba",
        base_hp: 380,
        defence_level: 80,
        magic_level: 100,
        bonuses: DefenceBonuses { stab: 80, slash: 160, crush: 240, magic: 280, ranged: 200 },
    };

    pub const BABOON_THROWER: MonsterProfile = MonsterProfile {
        name: "Baboon Thrower",
        base_hp: 1,
        defence_level: 1,
        magic_level: 1,
        bonuses: DefenceBonuses { stab: 0, slash: 0, crush: 0, magic: 0, ranged: 0 },
    };

    pub const OSMUMTENS_FANG: WeaponProfile = WeaponProfile { attack_roll: 48_000, max_hit: 55 };
    pub const SCYTHE_OF_VITUR: WeaponProfile = WeaponProfile { attack_roll: 44_000, max_hit: 62 };
    pub const BANDOS_GODSWORD: WeaponProfile = WeaponProfile { attack_roll: 40_000, max_hit: 66 };
    pub const ZARYTE_CROSSBOW: WeaponProfile = WeaponProfile { attack_roll: 42_000, max_hit: 48 };
    pub const TOXIC_BLOWPIPE: WeaponProfile = WeaponProfile { attack_roll: 30_000, max_hit: 30 };
}

pub mod zebak {
    use super::*;

    pub const BOSS: MonsterProfile = MonsterProfile {
        name: "Zebak",
        base_hp: 580,
        defence_level: 70,
        magic_level: 100,
        bonuses: DefenceBonuses { stab: 160, slash: 160, crush: 160, magic: 200, ranged: 110 },
    };

    /// Zebak's defence cannot be drained below this level
    pub const DEFENCE_FLOOR: u32 = 50;

    pub const TWISTED_BOW: WeaponProfile = WeaponProfile { attack_roll: 55_000, max_hit: 72 };
    pub const DRAGON_WARHAMMER: WeaponProfile = WeaponProfile { attack_roll: 38_000, max_hit: 62 };
    pub const ZARYTE_CROSSBOW: WeaponProfile = WeaponProfile { attack_roll: 42_000, max_hit: 48 };
    pub const TOXIC_BLOWPIPE: WeaponProfile = WeaponProfile { attack_roll: 30_000, max_hit: 30 };
}

/// The player is never attacked; these only exist to satisfy the entity model
pub const PLAYER: MonsterProfile = MonsterProfile {
    name: "Player",
    base_hp: 99,
    defence_level: 99,
    magic_level: 99,
    bonuses: DefenceBonuses { stab: 0, slash: 0, crush: 0, magic: 0, ranged: 0 },
};
