//! Combat entity state shared by the player, the bosses and their adds

use crate::combat_stats::{AttackStyle, CombatStats};
use crate::error::SimError;
use crate::resources::{Health, SpecialAttackEnergy};
use crate::tick::Tick;

/// Highest supported path level
pub const MAX_PATH_LEVEL: u32 = 6;

/// Mutable state every combatant carries
pub struct EntityState {
    pub name: String,
    pub health: Health,
    pub energy: SpecialAttackEnergy,
    pub stats: Box<dyn CombatStats>,
    /// Lightbearer equipped: special energy regenerates twice as fast
    pub has_lightbearer: bool,
    /// Tick at which the current energy regeneration window started
    pub regen_start: Option<Tick>,
    last_attack_tick: Tick,
    attack_delay: u32,
}

impl EntityState {
    pub fn new(name: impl Into<String>, hitpoints: u32, stats: Box<dyn CombatStats>) -> Self {
        Self {
            name: name.into(),
            health: Health::new(hitpoints),
            energy: SpecialAttackEnergy::full(),
            stats,
            has_lightbearer: false,
            regen_start: None,
            last_attack_tick: Tick::ZERO,
            attack_delay: 0,
        }
    }

    pub fn with_lightbearer(mut self, has_lightbearer: bool) -> Self {
        self.has_lightbearer = has_lightbearer;
        self
    }

    /// Start the attack cooldown: the next swing is allowed `delay` ticks after `tick`
    pub fn set_attack_cooldown(&mut self, tick: Tick, delay: u32) {
        self.last_attack_tick = tick;
        self.attack_delay = delay;
    }

    #[inline(always)]
    pub fn next_attack_tick(&self) -> Tick {
        self.last_attack_tick + self.attack_delay
    }
}

impl std::fmt::Debug for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityState")
            .field("name", &self.name)
            .field("health", &self.health.current())
            .field("energy", &self.energy.current())
            .field("defence_level", &self.stats.defence_level())
            .field("has_lightbearer", &self.has_lightbearer)
            .field("regen_start", &self.regen_start)
            .field("next_attack_tick", &self.next_attack_tick())
            .finish()
    }
}

/// Capability set shared by every combatant.
///
/// Implementors only provide access to their `EntityState`; bosses override the
/// handful of methods whose behaviour depends on their phase.
pub trait CombatEntity {
    fn state(&self) -> &EntityState;
    fn state_mut(&mut self) -> &mut EntityState;

    fn name(&self) -> &str {
        &self.state().name
    }

    fn hitpoints(&self) -> u32 {
        self.state().health.current()
    }

    fn is_alive(&self) -> bool {
        !self.state().health.is_depleted()
    }

    fn can_attack(&self, tick: Tick) -> bool {
        self.is_alive() && tick >= self.state().next_attack_tick()
    }

    /// Whether the player may target this entity on `tick`
    fn is_attackable(&self, _tick: Tick) -> bool {
        self.is_alive()
    }

    /// Apply `damage`, returning how much was actually removed
    fn take_damage(&mut self, damage: u32) -> u32 {
        self.state_mut().health.take_damage(damage)
    }

    fn defence_roll(&self, style: AttackStyle) -> u32 {
        self.state().stats.defence_roll(style)
    }

    fn defence_level(&self) -> u32 {
        self.state().stats.defence_level()
    }

    fn drain_defence(&mut self, amount: u32) {
        self.state_mut().stats.drain_defence(amount);
    }

    fn special_energy(&self) -> &SpecialAttackEnergy {
        &self.state().energy
    }
}

/// Tombs of Amascut monster: hitpoints scale with invocation and path level
#[derive(Debug)]
pub struct ToaEntity {
    state: EntityState,
}

impl ToaEntity {
    /// Monster whose hitpoints are scaled from `base_hp`
    pub fn scaled(
        name: impl Into<String>,
        base_hp: u32,
        invocation: u32,
        path: u32,
        stats: Box<dyn CombatStats>,
    ) -> Result<Self, SimError> {
        let hitpoints = scaled_hitpoints(base_hp, invocation, path)?;
        Ok(Self::fixed(name, hitpoints, stats))
    }

    /// Monster with an exact hitpoint value, no raid scaling
    pub fn fixed(name: impl Into<String>, hitpoints: u32, stats: Box<dyn CombatStats>) -> Self {
        Self {
            state: EntityState::new(name, hitpoints, stats),
        }
    }
}

impl CombatEntity for ToaEntity {
    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }
}

pub fn validate_invocation(invocation: u32) -> Result<(), SimError> {
    if invocation % 5 != 0 {
        return Err(SimError::InvalidInvocation(invocation));
    }
    Ok(())
}

pub fn validate_path(path: u32) -> Result<(), SimError> {
    if path > MAX_PATH_LEVEL {
        return Err(SimError::InvalidPath(path));
    }
    Ok(())
}

/// Invocation hitpoint multiplier: +2% per 5 invocation levels
pub fn invocation_multiplier(invocation: u32) -> f64 {
    1.0 + 0.02 * (invocation / 5) as f64
}

/// Path hitpoint multiplier: 1.08 for the first path, +5% for every path after
pub fn path_multiplier(path: u32) -> f64 {
    match path {
        0 => 1.0,
        1 => 1.08,
        p => 1.08 + 0.05 * (p - 1) as f64,
    }
}

/// Scaled hitpoints of a raid monster.
///
/// Each multiplication is truncated before the next is applied; the result is
/// rounded to the nearest 10.
pub fn scaled_hitpoints(base_hp: u32, invocation: u32, path: u32) -> Result<u32, SimError> {
    validate_invocation(invocation)?;
    validate_path(path)?;

    let after_invocation = (base_hp as f64 * invocation_multiplier(invocation)) as u32;
    let after_path = (after_invocation as f64 * path_multiplier(path)) as u32;
    Ok((after_path as f64 / 10.0).round() as u32 * 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_stats::{DefaultCombatStats, DefenceBonuses};

    fn dummy(hp: u32) -> ToaEntity {
        let stats = DefaultCombatStats::new(1, 1, DefenceBonuses::default());
        ToaEntity::fixed("Dummy", hp, Box::new(stats))
    }

    #[test]
    fn test_scaled_hitpoints_zebak_like() {
        let hp = scaled_hitpoints(580, 150, 2).unwrap();
        assert!(hp > 580);
        assert_eq!(hp % 10, 0);
        // 580 * 1.6 = 928, 928 * 1.13 = 1048.64 -> 1048 -> 1050
        assert_eq!(hp, 1050);
        assert_eq!(scaled_hitpoints(580, 150, 2).unwrap(), hp);
    }

    #[test]
    fn test_scaled_hitpoints_unscaled() {
        assert_eq!(scaled_hitpoints(400, 0, 0).unwrap(), 400);
        // 380 * 1.08 = 410.4 -> 410
        assert_eq!(scaled_hitpoints(380, 0, 1).unwrap(), 410);
    }

    #[test]
    fn test_scaling_rejects_invalid_levels() {
        assert_eq!(scaled_hitpoints(580, 152, 2), Err(SimError::InvalidInvocation(152)));
        assert_eq!(scaled_hitpoints(580, 150, 7), Err(SimError::InvalidPath(7)));
    }

    #[test]
    fn test_path_multiplier() {
        assert_eq!(path_multiplier(0), 1.0);
        assert_eq!(path_multiplier(1), 1.08);
        assert!((path_multiplier(6) - 1.33).abs() < 1e-9);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut e = dummy(10);
        assert!(e.can_attack(Tick(0)));
        e.state_mut().set_attack_cooldown(Tick(4), 5);
        assert!(!e.can_attack(Tick(8)));
        assert!(e.can_attack(Tick(9)));
    }

    #[test]
    fn test_dead_entity_cannot_attack() {
        let mut e = dummy(10);
        assert_eq!(e.take_damage(25), 10);
        assert!(!e.is_alive());
        assert!(!e.can_attack(Tick(100)));
        assert!(!e.is_attackable(Tick(100)));
    }
}
