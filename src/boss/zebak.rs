//! Zebak: no phases, defence drains stop at a floor

use super::BossFight;
use crate::combat_stats::{DrainCapped, MonsterScaled};
use crate::entity::{CombatEntity, EntityState, ToaEntity};
use crate::error::SimError;
use crate::gear;
use crate::player::Player;
use crate::simulation::FastRng;
use crate::strategy::{SpecStrategy, ZebakStrategy};
use crate::tick::Tick;

#[derive(Debug)]
pub struct Zebak {
    entity: ToaEntity,
}

impl Zebak {
    pub fn new(invocation: u32, path: u32) -> Result<Self, SimError> {
        let profile = gear::zebak::BOSS;
        let stats = DrainCapped::new(
            MonsterScaled::new(profile.combat_stats(), invocation),
            gear::zebak::DEFENCE_FLOOR,
        );
        let entity = ToaEntity::scaled(
            profile.name,
            profile.base_hp,
            invocation,
            path,
            Box::new(stats),
        )?;
        Ok(Self { entity })
    }

    pub fn should_zcb_spec(&self) -> bool {
        self.hitpoints() > 500
    }
}

impl CombatEntity for Zebak {
    fn state(&self) -> &EntityState {
        self.entity.state()
    }

    fn state_mut(&mut self) -> &mut EntityState {
        self.entity.state_mut()
    }
}

pub struct ZebakFight {
    player: Player,
    zebak: Zebak,
    strategy: ZebakStrategy,
}

impl ZebakFight {
    pub fn new(player: Player, zebak: Zebak) -> Self {
        let strategy = ZebakStrategy::new(&zebak);
        Self { player, zebak, strategy }
    }

    pub fn zebak(&self) -> &Zebak {
        &self.zebak
    }

    pub fn into_player(self) -> Player {
        self.player
    }
}

impl BossFight for ZebakFight {
    fn on_tick(&mut self, tick: Tick, rng: &mut FastRng) -> Result<(), SimError> {
        if !self.zebak.is_attackable(tick) {
            return Ok(());
        }
        let selection = self.strategy.select_weapons(tick, &self.zebak);
        self.player.attack(
            tick,
            &mut self.zebak,
            selection.normal,
            selection.spec,
            selection.should_spec,
            rng,
        )?;
        Ok(())
    }

    fn boss(&self) -> &dyn CombatEntity {
        &self.zebak
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
    use crate::combat_stats::AttackStyle;

    #[test]
    fn test_scaled_zebak() {
        let zebak = Zebak::new(300, 2).unwrap();
        // 580 * 2.2 = 1276, 1276 * 1.13 = 1441.88 -> 1441 -> 1440
        assert_eq!(zebak.hitpoints(), 1440);
        assert!(zebak.should_zcb_spec());
        // (70 + 9) * (110 + 64) * 2.2
        assert_eq!(zebak.defence_roll(AttackStyle::Ranged), 30241);
    }

    #[test]
    fn test_defence_drain_floor() {
        let mut zebak = Zebak::new(300, 2).unwrap();
        zebak.drain_defence(100);
        assert_eq!(zebak.defence_level(), 50);
        zebak.drain_defence(5);
        assert_eq!(zebak.defence_level(), 50);
    }

    #[test]
    fn test_zcb_threshold() {
        let mut zebak = Zebak::new(0, 0).unwrap();
        zebak.take_damage(80);
        assert_eq!(zebak.hitpoints(), 500);
        assert!(!zebak.should_zcb_spec());
    }
}
