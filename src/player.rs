//! The player: a combat entity with consumables and spec bookkeeping

use crate::config::LoadoutConfig;
use crate::entity::{CombatEntity, EntityState};
use crate::error::SimError;
use crate::gear;
use crate::simulation::FastRng;
use crate::stats::SpecTracker;
use crate::tick::Tick;
use crate::weapon::{SpecWeapon, Weapon};
use tracing::trace;

/// Ticks between surge potion doses
pub const SURGE_POTION_COOLDOWN: u32 = 500;
/// Energy restored by a surge potion
pub const SURGE_POTION_RESTORE: u32 = 25;
/// Ticks liquid adrenaline halves special attack costs for
pub const LIQUID_ADRENALINE_DURATION: u32 = 250;
/// Energy restored when an add is finished off
pub const ADD_KILL_RESTORE: u32 = 15;

#[derive(Debug)]
pub struct Player {
    state: EntityState,
    surge_potions: bool,
    last_surge: Option<Tick>,
    liquid_adrenaline: bool,
    adrenaline_start: Option<Tick>,
    specs: SpecTracker,
}

impl Player {
    pub fn new(has_lightbearer: bool, surge_potions: bool, liquid_adrenaline: bool) -> Self {
        let state = EntityState::new(
            gear::PLAYER.name,
            gear::PLAYER.base_hp,
            Box::new(gear::PLAYER.combat_stats()),
        )
        .with_lightbearer(has_lightbearer);

        Self {
            state,
            surge_potions,
            last_surge: None,
            liquid_adrenaline,
            adrenaline_start: None,
            specs: SpecTracker::new(),
        }
    }

    pub fn from_config(config: &LoadoutConfig) -> Self {
        Self::new(config.lightbearer, config.surge_potions, config.liquid_adrenaline)
    }

    pub fn spec_tracker(&self) -> &SpecTracker {
        &self.specs
    }

    pub fn into_spec_tracker(self) -> SpecTracker {
        self.specs
    }

    /// Whether liquid adrenaline is still halving spec costs on `tick`
    pub fn is_adrenaline_active(&self, tick: Tick) -> bool {
        self.adrenaline_start
            .is_some_and(|start| tick.since(start) < LIQUID_ADRENALINE_DURATION)
    }

    /// Cost of a spec on `tick`: halved (not rounded) while adrenaline is active
    pub fn effective_spec_cost(&self, tick: Tick, base_cost: f64) -> f64 {
        if self.is_adrenaline_active(tick) {
            base_cost / 2.0
        } else {
            base_cost
        }
    }

    /// Drink a surge potion. Returns whether it was actually consumed.
    pub fn drink_surge_pot(&mut self, tick: Tick) -> bool {
        if !self.surge_potions || !self.state.energy.is_regenerating() {
            return false;
        }
        if let Some(last) = self.last_surge {
            if tick.since(last) < SURGE_POTION_COOLDOWN {
                return false;
            }
        }
        self.last_surge = Some(tick);
        self.state.energy.regenerate(SURGE_POTION_RESTORE);
        trace!(%tick, energy = self.state.energy.current(), "surge potion");
        true
    }

    /// Drink liquid adrenaline, usable once per fight
    pub fn drink_liquid_adrenaline(&mut self, tick: Tick) -> bool {
        if !self.liquid_adrenaline || self.adrenaline_start.is_some() {
            return false;
        }
        self.adrenaline_start = Some(tick);
        trace!(%tick, "liquid adrenaline");
        true
    }

    /// Top up consumables before a spec and report whether it can be afforded
    fn ready_spec(&mut self, tick: Tick, base_cost: f64) -> bool {
        self.drink_liquid_adrenaline(tick);
        let cost = self.effective_spec_cost(tick, base_cost);
        if !self.state.energy.can_use_special(cost) {
            self.drink_surge_pot(tick);
        }
        self.state.energy.can_use_special(cost)
    }

    /// Swing at `target` if the attack cooldown allows it.
    ///
    /// Falls back to `normal` when no spec is wanted or energy is short.
    /// Returns the damage the target actually took.
    pub fn attack(
        &mut self,
        tick: Tick,
        target: &mut dyn CombatEntity,
        normal: &dyn Weapon,
        spec: Option<&dyn SpecWeapon>,
        should_spec: bool,
        rng: &mut FastRng,
    ) -> Result<u32, SimError> {
        if !self.can_attack(tick) {
            return Ok(0);
        }

        let damage = match spec.filter(|_| should_spec) {
            Some(weapon) if self.ready_spec(tick, weapon.special_attack_cost()) => {
                let cost = self.effective_spec_cost(tick, weapon.special_attack_cost());
                self.state.energy.consume(cost)?;
                self.specs.record(weapon.name());
                self.state.set_attack_cooldown(tick, weapon.attack_speed());
                let damage = weapon.spec(target, rng);
                trace!(%tick, weapon = weapon.name(), cost, damage, target = target.name(), "spec");
                damage
            }
            _ => {
                self.state.set_attack_cooldown(tick, normal.attack_speed());
                let damage = normal.attack(&*target, rng);
                trace!(%tick, weapon = normal.name(), damage, target = target.name(), "attack");
                damage
            }
        };

        Ok(target.take_damage(damage))
    }

    /// Guaranteed kill on a weak add with a 1-tick swing; killing it restores energy.
    /// Returns whether the add was killed.
    pub fn finish_add(&mut self, tick: Tick, add: &mut dyn CombatEntity) -> bool {
        if !self.can_attack(tick) || !add.is_alive() {
            return false;
        }
        self.state.set_attack_cooldown(tick, 1);
        let lethal = add.hitpoints();
        add.take_damage(lethal);
        if add.is_alive() {
            return false;
        }
        self.state.energy.regenerate(ADD_KILL_RESTORE);
        trace!(%tick, add = add.name(), energy = self.state.energy.current(), "add killed");
        true
    }
}

impl CombatEntity for Player {
    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_stats::{DefaultCombatStats, DefenceBonuses};
    use crate::entity::ToaEntity;
    use crate::weapon::{StandardWeapon, ZaryteCrossbow, ZARYTE_CROSSBOW};

    fn target(hp: u32) -> ToaEntity {
        let open = DefenceBonuses { stab: -64, slash: -64, crush: -64, magic: -64, ranged: -64 };
        ToaEntity::fixed("Target", hp, Box::new(DefaultCombatStats::new(1, 1, open)))
    }

    fn drain_to(player: &mut Player, energy: f64) {
        let current = player.special_energy().current();
        player.state_mut().energy.consume(current - energy).unwrap();
    }

    #[test]
    fn test_surge_potion_rules() {
        let mut p = Player::new(false, true, false);
        // Full energy: not allowed
        assert!(!p.drink_surge_pot(Tick(0)));

        drain_to(&mut p, 50.0);
        assert!(p.drink_surge_pot(Tick(10)));
        assert_eq!(p.special_energy().current(), 75.0);

        assert!(!p.drink_surge_pot(Tick(509)));
        assert!(p.drink_surge_pot(Tick(510)));
        assert_eq!(p.special_energy().current(), 100.0);
    }

    #[test]
    fn test_surge_potion_disabled() {
        let mut p = Player::new(false, false, false);
        drain_to(&mut p, 10.0);
        assert!(!p.drink_surge_pot(Tick(0)));
        assert_eq!(p.special_energy().current(), 10.0);
    }

    #[test]
    fn test_liquid_adrenaline_once() {
        let mut p = Player::new(false, false, true);
        assert!(p.drink_liquid_adrenaline(Tick(5)));
        assert!(!p.drink_liquid_adrenaline(Tick(600)));
        assert_eq!(p.effective_spec_cost(Tick(5), 75.0), 37.5);
        assert_eq!(p.effective_spec_cost(Tick(254), 75.0), 37.5);
        assert_eq!(p.effective_spec_cost(Tick(255), 75.0), 75.0);
    }

    #[test]
    fn test_liquid_adrenaline_disabled() {
        let mut p = Player::new(false, false, false);
        assert!(!p.drink_liquid_adrenaline(Tick(1)));
        assert_eq!(p.effective_spec_cost(Tick(1), 50.0), 50.0);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut rng = FastRng::new(1);
        let mut p = Player::new(false, false, false);
        let mut t = target(10_000);
        let bow = StandardWeapon::twisted_bow(50_000, 70);

        p.attack(Tick(0), &mut t, &bow, None, false, &mut rng).unwrap();
        let hp_after_first = t.hitpoints();
        for tick in 1..5 {
            assert_eq!(p.attack(Tick(tick), &mut t, &bow, None, false, &mut rng).unwrap(), 0);
        }
        assert_eq!(t.hitpoints(), hp_after_first);
        assert!(p.can_attack(Tick(5)));
    }

    #[test]
    fn test_spec_consumes_energy_and_records() {
        let mut rng = FastRng::new(2);
        let mut p = Player::new(false, false, false);
        let mut t = target(1000);
        let bow = StandardWeapon::twisted_bow(50_000, 70);
        let zcb = ZaryteCrossbow::new(42_000, 48);

        p.attack(Tick(1), &mut t, &bow, Some(&zcb), true, &mut rng).unwrap();
        assert_eq!(p.special_energy().current(), 25.0);
        assert_eq!(p.spec_tracker().count(ZARYTE_CROSSBOW), 1);

        // Not enough energy left: falls back to the normal weapon
        p.attack(Tick(6), &mut t, &bow, Some(&zcb), true, &mut rng).unwrap();
        assert_eq!(p.special_energy().current(), 25.0);
        assert_eq!(p.spec_tracker().total(), 1);
    }

    #[test]
    fn test_spec_with_adrenaline_is_half_price() {
        let mut rng = FastRng::new(3);
        let mut p = Player::new(false, false, true);
        let mut t = target(1000);
        let bow = StandardWeapon::twisted_bow(50_000, 70);
        let zcb = ZaryteCrossbow::new(42_000, 48);

        p.attack(Tick(1), &mut t, &bow, Some(&zcb), true, &mut rng).unwrap();
        p.attack(Tick(6), &mut t, &bow, Some(&zcb), true, &mut rng).unwrap();
        assert_eq!(p.special_energy().current(), 25.0);
        assert_eq!(p.spec_tracker().total(), 2);
    }

    #[test]
    fn test_surge_enables_extra_spec() {
        let mut rng = FastRng::new(4);
        let mut p = Player::new(false, true, false);
        let mut t = target(1000);
        let bow = StandardWeapon::twisted_bow(50_000, 70);
        let zcb = ZaryteCrossbow::new(42_000, 48);

        p.attack(Tick(1), &mut t, &bow, Some(&zcb), true, &mut rng).unwrap();
        p.state_mut().energy.regenerate(25);
        p.attack(Tick(6), &mut t, &bow, Some(&zcb), true, &mut rng).unwrap();
        // 50 + 25 from the potion, then 75 spent
        assert_eq!(p.special_energy().current(), 0.0);
        assert_eq!(p.spec_tracker().total(), 2);
    }

    #[test]
    fn test_finish_add() {
        let mut p = Player::new(false, false, false);
        drain_to(&mut p, 40.0);
        let mut add = target(1);
        assert!(p.finish_add(Tick(3), &mut add));
        assert!(!add.is_alive());
        assert_eq!(p.special_energy().current(), 55.0);
        // One tick swing
        assert!(!p.can_attack(Tick(3)));
        assert!(p.can_attack(Tick(4)));
        assert!(!p.finish_add(Tick(4), &mut add));
    }
}
