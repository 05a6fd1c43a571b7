//! Weapons and their special attacks

use crate::accuracy::{resolve_attack, roll_damage};
use crate::combat_stats::AttackStyle;
use crate::entity::CombatEntity;
use crate::simulation::FastRng;

pub const TUMEKENS_SHADOW: &str = "Tumeken's Shadow";
pub const TWISTED_BOW: &str = "Twisted Bow";
pub const OSMUMTENS_FANG: &str = "Osmumten's Fang";
pub const SCYTHE_OF_VITUR: &str = "Scythe of Vitur";
pub const ZARYTE_CROSSBOW: &str = "Zaryte Crossbow";
pub const BANDOS_GODSWORD: &str = "Bandos Godsword";
pub const DRAGON_WARHAMMER: &str = "Dragon Warhammer";
pub const TOXIC_BLOWPIPE: &str = "Toxic Blowpipe";

/// Anything the player can swing at a target
pub trait Weapon {
    fn name(&self) -> &str;

    /// Ticks between swings
    fn attack_speed(&self) -> u32;

    fn style(&self) -> AttackStyle;

    /// Resolve a normal attack against `target`, returning the damage dealt
    fn attack(&self, target: &dyn CombatEntity, rng: &mut FastRng) -> u32;
}

/// Weapon with a special attack that draws from the shared energy pool
pub trait SpecWeapon: Weapon {
    fn special_attack_cost(&self) -> f64;

    /// Resolve the special attack. May mutate the target beyond damage
    /// (defence drains); the returned damage is applied by the caller.
    fn spec(&self, target: &mut dyn CombatEntity, rng: &mut FastRng) -> u32;
}

/// Weapon with a flat accuracy roll and a uniform damage roll
#[derive(Debug, Clone, PartialEq)]
pub struct StandardWeapon {
    pub name: &'static str,
    pub attack_speed: u32,
    pub style: AttackStyle,
    pub attack_roll: u32,
    pub max_hit: u32,
}

impl StandardWeapon {
    pub const fn new(
        name: &'static str,
        attack_speed: u32,
        style: AttackStyle,
        attack_roll: u32,
        max_hit: u32,
    ) -> Self {
        Self {
            name,
            attack_speed,
            style,
            attack_roll,
            max_hit,
        }
    }

    pub fn tumekens_shadow(attack_roll: u32, max_hit: u32) -> Self {
        Self::new(TUMEKENS_SHADOW, 5, AttackStyle::Magic, attack_roll, max_hit)
    }

    pub fn twisted_bow(attack_roll: u32, max_hit: u32) -> Self {
        Self::new(TWISTED_BOW, 5, AttackStyle::Ranged, attack_roll, max_hit)
    }

    pub fn osmumtens_fang(attack_roll: u32, max_hit: u32) -> Self {
        Self::new(OSMUMTENS_FANG, 5, AttackStyle::Stab, attack_roll, max_hit)
    }

    pub fn scythe_of_vitur(attack_roll: u32, max_hit: u32) -> Self {
        Self::new(SCYTHE_OF_VITUR, 5, AttackStyle::Slash, attack_roll, max_hit)
    }

    /// Normal attack with a custom accuracy and damage rule
    fn strike<F>(
        &self,
        attack_roll: u32,
        target: &dyn CombatEntity,
        rng: &mut FastRng,
        on_hit: F,
    ) -> u32
    where
        F: FnOnce(&mut FastRng) -> u32,
    {
        let defence_roll = target.defence_roll(self.style);
        resolve_attack(attack_roll, defence_roll, rng, on_hit)
    }
}

impl Weapon for StandardWeapon {
    fn name(&self) -> &str {
        self.name
    }

    fn attack_speed(&self) -> u32 {
        self.attack_speed
    }

    fn style(&self) -> AttackStyle {
        self.style
    }

    fn attack(&self, target: &dyn CombatEntity, rng: &mut FastRng) -> u32 {
        let max_hit = self.max_hit;
        self.strike(self.attack_roll, target, rng, |rng| roll_damage(max_hit, rng))
    }
}

/// Spec weapons swing normally exactly like their base weapon
macro_rules! base_weapon {
    ($ty:ty) => {
        impl Weapon for $ty {
            fn name(&self) -> &str {
                self.base.name
            }

            fn attack_speed(&self) -> u32 {
                self.base.attack_speed
            }

            fn style(&self) -> AttackStyle {
                self.base.style
            }

            fn attack(&self, target: &dyn CombatEntity, rng: &mut FastRng) -> u32 {
                self.base.attack(target, rng)
            }
        }
    };
}

/// Zaryte crossbow: the special attack guarantees an enchanted ruby bolt effect,
/// dealing a share of the target's current hitpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ZaryteCrossbow {
    base: StandardWeapon,
}

impl ZaryteCrossbow {
    pub const SPEC_COST: f64 = 75.0;
    /// Ruby bolt damage cap inside the raid
    pub const RUBY_CAP: u32 = 110;

    pub fn new(attack_roll: u32, max_hit: u32) -> Self {
        Self {
            base: StandardWeapon::new(
                ZARYTE_CROSSBOW,
                5,
                AttackStyle::Ranged,
                attack_roll,
                max_hit,
            ),
        }
    }

    /// 22% of `hitpoints`, capped at 110
    pub fn ruby_damage(hitpoints: u32) -> u32 {
        (hitpoints * 22 / 100).min(Self::RUBY_CAP)
    }
}

base_weapon!(ZaryteCrossbow);

impl SpecWeapon for ZaryteCrossbow {
    fn special_attack_cost(&self) -> f64 {
        Self::SPEC_COST
    }

    fn spec(&self, target: &mut dyn CombatEntity, rng: &mut FastRng) -> u32 {
        let damage = Self::ruby_damage(target.hitpoints());
        self.base.strike(self.base.attack_roll * 2, &*target, rng, |_| damage)
    }
}

/// Bandos godsword: accurate spec that drains defence by the damage dealt
#[derive(Debug, Clone, PartialEq)]
pub struct BandosGodsword {
    base: StandardWeapon,
}

impl BandosGodsword {
    pub const SPEC_COST: f64 = 50.0;

    pub fn new(attack_roll: u32, max_hit: u32) -> Self {
        Self {
            base: StandardWeapon::new(BANDOS_GODSWORD, 6, AttackStyle::Slash, attack_roll, max_hit),
        }
    }
}

base_weapon!(BandosGodsword);

impl SpecWeapon for BandosGodsword {
    fn special_attack_cost(&self) -> f64 {
        Self::SPEC_COST
    }

    fn spec(&self, target: &mut dyn CombatEntity, rng: &mut FastRng) -> u32 {
        let max_hit = self.base.max_hit;
        let damage = self.base.strike(self.base.attack_roll * 2, &*target, rng, |rng| {
            roll_damage(max_hit, rng) * 121 / 100
        });
        if damage > 0 {
            target.drain_defence(damage);
        }
        damage
    }
}

/// Dragon warhammer: heavy hit that lowers defence by 30% on success
#[derive(Debug, Clone, PartialEq)]
pub struct DragonWarhammer {
    base: StandardWeapon,
}

impl DragonWarhammer {
    pub const SPEC_COST: f64 = 50.0;

    pub fn new(attack_roll: u32, max_hit: u32) -> Self {
        Self {
            base: StandardWeapon::new(
                DRAGON_WARHAMMER,
                6,
                AttackStyle::Crush,
                attack_roll,
                max_hit,
            ),
        }
    }
}

base_weapon!(DragonWarhammer);

impl SpecWeapon for DragonWarhammer {
    fn special_attack_cost(&self) -> f64 {
        Self::SPEC_COST
    }

    fn spec(&self, target: &mut dyn CombatEntity, rng: &mut FastRng) -> u32 {
        let max_hit = self.base.max_hit;
        let damage = self.base.strike(self.base.attack_roll, &*target, rng, |rng| {
            roll_damage(max_hit, rng) * 3 / 2
        });
        if damage > 0 {
            let drain = target.defence_level() * 3 / 10;
            target.drain_defence(drain);
        }
        damage
    }
}

/// Toxic blowpipe: fast, accurate spec with a 50% damage boost
#[derive(Debug, Clone, PartialEq)]
pub struct ToxicBlowpipe {
    base: StandardWeapon,
}

impl ToxicBlowpipe {
    pub const SPEC_COST: f64 = 50.0;

    pub fn new(attack_roll: u32, max_hit: u32) -> Self {
        Self {
            base: StandardWeapon::new(TOXIC_BLOWPIPE, 2, AttackStyle::Ranged, attack_roll, max_hit),
        }
    }
}

base_weapon!(ToxicBlowpipe);

impl SpecWeapon for ToxicBlowpipe {
    fn special_attack_cost(&self) -> f64 {
        Self::SPEC_COST
    }

    fn spec(&self, target: &mut dyn CombatEntity, rng: &mut FastRng) -> u32 {
        let max_hit = self.base.max_hit;
        self.base.strike(self.base.attack_roll * 2, &*target, rng, |rng| {
            roll_damage(max_hit, rng) * 3 / 2
        })
    }
}
