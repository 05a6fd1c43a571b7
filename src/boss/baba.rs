//! Ba-Ba: boulder invulnerability at health thresholds and baboon thrower adds

use super::BossFight;
use crate::combat_stats::MonsterScaled;
use crate::config::MeleeWeapon;
use crate::entity::{CombatEntity, EntityState, ToaEntity};
use crate::error::SimError;
use crate::gear;
use crate::player::Player;
use crate::simulation::FastRng;
use crate::strategy::{BabaStrategy, SpecStrategy};
use crate::tick::Tick;
use std::collections::BTreeSet;
use tracing::debug;

/// Health percentages (of the starting hitpoints) that start a boulder phase
pub const BOULDER_THRESHOLDS: [u32; 2] = [66, 33];
/// Ticks a boulder phase lasts, counting the trigger tick
pub const BOULDER_DURATION: u32 = 21;
/// The only tick baboon throwers spawn on
pub const THROWER_SPAWN_TICK: Tick = Tick(37);
/// Throwers per spawn
pub const THROWER_COUNT: usize = 2;

#[derive(Debug)]
pub struct Baba {
    entity: ToaEntity,
    initial_hp: u32,
    invocation: u32,
    throwers: Vec<ToaEntity>,
    boulder_start: Option<Tick>,
    triggered: BTreeSet<u32>,
}

impl Baba {
    pub fn new(invocation: u32, path: u32) -> Result<Self, SimError> {
        let profile = gear::baba::BOSS;
        let entity = ToaEntity::scaled(
            profile.name,
            profile.base_hp,
            invocation,
            path,
            Box::new(MonsterScaled::new(profile.combat_stats(), invocation)),
        )?;

        Ok(Self {
            initial_hp: entity.hitpoints(),
            entity,
            invocation,
            throwers: Vec::new(),
            boulder_start: None,
            triggered: BTreeSet::new(),
        })
    }

    pub fn initial_hp(&self) -> u32 {
        self.initial_hp
    }

    pub fn throwers(&self) -> &[ToaEntity] {
        &self.throwers
    }

    /// First living thrower, if any
    pub fn living_thrower_mut(&mut self) -> Option<&mut ToaEntity> {
        self.throwers.iter_mut().find(|t| t.is_alive())
    }

    /// Thresholds that have already fired
    pub fn triggered_thresholds(&self) -> &BTreeSet<u32> {
        &self.triggered
    }

    pub fn in_boulder_phase(&self, tick: Tick) -> bool {
        self.boulder_start
            .is_some_and(|start| tick >= start && tick.since(start) < BOULDER_DURATION)
    }

    /// Fire every threshold the current health has crossed for the first time.
    /// Several thresholds crossed at once start a single boulder phase.
    pub fn maybe_start_boulder_phase(&mut self, tick: Tick) -> bool {
        if !self.is_alive() {
            return false;
        }

        let hp = self.hitpoints() as u64;
        let crossed: Vec<u32> = BOULDER_THRESHOLDS
            .iter()
            .copied()
            .filter(|pct| !self.triggered.contains(pct))
            .filter(|&pct| hp * 100 <= self.initial_hp as u64 * pct as u64)
            .collect();
        if crossed.is_empty() {
            return false;
        }

        self.triggered.extend(crossed.iter().copied());
        self.boulder_start = Some(tick);
        debug!(%tick, hp, thresholds = ?crossed, "boulder phase started");
        true
    }

    /// Drop the boulder phase once it has run its course
    pub fn update_boulder_phase(&mut self, tick: Tick) {
        if let Some(start) = self.boulder_start {
            if tick.since(start) >= BOULDER_DURATION {
                self.boulder_start = None;
                debug!(%tick, "boulder phase ended");
            }
        }
    }

    /// Spawn throwers on the spawn tick; earlier throwers are kept
    pub fn spawn_throwers(&mut self, tick: Tick) -> bool {
        if tick != THROWER_SPAWN_TICK {
            return false;
        }

        let profile = gear::baba::BABOON_THROWER;
        for _ in 0..THROWER_COUNT {
            self.throwers.push(ToaEntity::fixed(
                profile.name,
                profile.base_hp,
                Box::new(MonsterScaled::new(profile.combat_stats(), self.invocation)),
            ));
        }
        debug!(
            %tick,
            count = THROWER_COUNT,
            total = self.throwers.len(),
            "baboon throwers spawned"
        );
        true
    }
}

impl CombatEntity for Baba {
    fn state(&self) -> &EntityState {
        self.entity.state()
    }

    fn state_mut(&mut self) -> &mut EntityState {
        self.entity.state_mut()
    }

    fn is_attackable(&self, tick: Tick) -> bool {
        self.is_alive() && !self.in_boulder_phase(tick)
    }
}

pub struct BabaFight {
    player: Player,
    baba: Baba,
    strategy: BabaStrategy,
}

impl BabaFight {
    pub fn new(player: Player, baba: Baba, main_weapon: MeleeWeapon) -> Self {
        let strategy = BabaStrategy::new(main_weapon, &baba);
        Self { player, baba, strategy }
    }

    pub fn baba(&self) -> &Baba {
        &self.baba
    }

    pub fn into_player(self) -> Player {
        self.player
    }
}

impl BossFight for BabaFight {
    fn on_tick(&mut self, tick: Tick, rng: &mut FastRng) -> Result<(), SimError> {
        self.baba.update_boulder_phase(tick);
        self.baba.spawn_throwers(tick);
        self.baba.maybe_start_boulder_phase(tick);

        // Throwers take priority, boulders or not
        if let Some(thrower) = self.baba.living_thrower_mut() {
            self.player.finish_add(tick, thrower);
            return Ok(());
        }

        if self.baba.is_attackable(tick) {
            let selection = self.strategy.select_weapons(tick, &self.baba);
            self.player.attack(
                tick,
                &mut self.baba,
                selection.normal,
                selection.spec,
                selection.should_spec,
                rng,
            )?;
        }
        Ok(())
    }

    fn boss(&self) -> &dyn CombatEntity {
        &self.baba
    }

    fn player(&self) -> &Player {
        &self.player
    }

    fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_baba() {
        let baba = Baba::new(300, 2).unwrap();
        // 380 * 2.2 = 836, 836 * 1.13 = 944.68 -> 944 -> 940
        assert_eq!(baba.initial_hp(), 940);
        assert!(baba.is_attackable(Tick(0)));
        assert!(baba.throwers().is_empty());
    }

    #[test]
    fn test_boulder_window() {
        let mut baba = Baba::new(300, 2).unwrap();
        assert!(!baba.maybe_start_boulder_phase(Tick(50)));

        // 620 * 100 <= 940 * 66
        baba.take_damage(320);
        assert!(baba.maybe_start_boulder_phase(Tick(50)));
        for t in 50..=70 {
            baba.update_boulder_phase(Tick(t));
            assert!(!baba.is_attackable(Tick(t)), "tick {t}");
        }
        baba.update_boulder_phase(Tick(71));
        assert!(baba.is_attackable(Tick(71)));
    }

    #[test]
    fn test_thresholds_fire_once() {
        let mut baba = Baba::new(300, 2).unwrap();
        baba.take_damage(320);
        assert!(baba.maybe_start_boulder_phase(Tick(10)));
        assert!(!baba.maybe_start_boulder_phase(Tick(40)));
        assert_eq!(baba.triggered_thresholds().iter().copied().collect::<Vec<_>>(), vec![66]);

        baba.take_damage(320);
        assert!(baba.maybe_start_boulder_phase(Tick(100)));
        assert!(!baba.maybe_start_boulder_phase(Tick(200)));
        assert_eq!(baba.triggered_thresholds().len(), 2);
    }

    #[test]
    fn test_thresholds_crossed_together() {
        let mut baba = Baba::new(300, 2).unwrap();
        baba.take_damage(700);
        assert!(baba.maybe_start_boulder_phase(Tick(5)));
        assert_eq!(baba.triggered_thresholds().len(), 2);
        assert!(baba.in_boulder_phase(Tick(5)));
    }

    #[test]
    fn test_thrower_spawn() {
        let mut baba = Baba::new(300, 2).unwrap();
        assert!(!baba.spawn_throwers(Tick(36)));
        assert!(baba.spawn_throwers(Tick(37)));
        assert!(!baba.spawn_throwers(Tick(38)));
        assert_eq!(baba.throwers().len(), 2);
        assert!(baba.throwers().iter().all(|t| t.hitpoints() == 1));

        // Repeat calls on the spawn tick pile up
        assert!(baba.spawn_throwers(Tick(37)));
        assert_eq!(baba.throwers().len(), 4);
    }

    #[test]
    fn test_throwers_targeted_first() {
        let mut rng = FastRng::new(9);
        let baba = Baba::new(300, 2).unwrap();
        let mut fight = BabaFight::new(Player::new(false, false, false), baba, MeleeWeapon::Fang);
        fight.on_tick(Tick(37), &mut rng).unwrap();
        assert_eq!(fight.baba().throwers().iter().filter(|t| t.is_alive()).count(), 1);
        assert_eq!(fight.baba().hitpoints(), 940);

        fight.on_tick(Tick(38), &mut rng).unwrap();
        assert!(fight.baba().throwers().iter().all(|t| !t.is_alive()));
        assert_eq!(fight.baba().hitpoints(), 940);
    }

    #[test]
    fn test_throwers_killed_during_boulder_phase() {
        let mut rng = FastRng::new(4);
        let mut baba = Baba::new(300, 2).unwrap();
        baba.take_damage(320);
        assert!(baba.maybe_start_boulder_phase(Tick(30)));

        let mut player = Player::new(false, false, false);
        player.state_mut().energy.consume(50.0).unwrap();
        let mut fight = BabaFight::new(player, baba, MeleeWeapon::Fang);

        fight.on_tick(Tick(37), &mut rng).unwrap();
        assert!(!fight.baba().is_attackable(Tick(37)));
        assert_eq!(fight.baba().throwers().len(), 2);
        assert_eq!(fight.baba().throwers().iter().filter(|t| t.is_alive()).count(), 1);
        assert_eq!(fight.player().special_energy().current(), 65.0);

        fight.on_tick(Tick(38), &mut rng).unwrap();
        assert!(fight.baba().throwers().iter().all(|t| !t.is_alive()));
        assert_eq!(fight.player().special_energy().current(), 80.0);

        // Boulder still up: the boss is left alone until it ends
        for t in 39..=50 {
            fight.on_tick(Tick(t), &mut rng).unwrap();
            assert!(!fight.baba().is_attackable(Tick(t)));
        }
        assert_eq!(fight.baba().hitpoints(), 620);
        assert!(fight.baba().is_attackable(Tick(51)));
    }
}
