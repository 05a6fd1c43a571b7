//! Boss encounters: per-boss phase state machines and the fights that drive them

mod akkha;
mod baba;
mod zebak;

pub use akkha::{Akkha, AkkhaFight, AkkhaShadow};
pub use baba::{Baba, BabaFight};
pub use zebak::{Zebak, ZebakFight};

use crate::config::{BossKind, LoadoutConfig};
use crate::entity::CombatEntity;
use crate::error::SimError;
use crate::player::Player;
use crate::simulation::FastRng;
use crate::tick::Tick;

/// One player-versus-boss encounter, advanced a tick at a time
pub trait BossFight {
    /// Run the boss script and the player's action for `tick`
    fn on_tick(&mut self, tick: Tick, rng: &mut FastRng) -> Result<(), SimError>;

    fn boss(&self) -> &dyn CombatEntity;

    fn player(&self) -> &Player;

    fn player_mut(&mut self) -> &mut Player;

    fn is_fight_over(&self) -> bool {
        !self.boss().is_alive()
    }
}

/// Closed set of supported encounters
pub enum Encounter {
    Akkha(AkkhaFight),
    Baba(BabaFight),
    Zebak(ZebakFight),
}

impl Encounter {
    /// Build a fresh encounter (boss, strategy and player) for a loadout
    pub fn from_config(config: &LoadoutConfig) -> Result<Self, SimError> {
        config.validate()?;
        let player = Player::from_config(config);
        let encounter = match config.boss {
            BossKind::Akkha => {
                let akkha = Akkha::new(config.invocation, config.path)?;
                Encounter::Akkha(AkkhaFight::new(player, akkha))
            }
            BossKind::Baba => Encounter::Baba(BabaFight::new(
                player,
                Baba::new(config.invocation, config.path)?,
                config.melee,
            )),
            BossKind::Zebak => {
                let zebak = Zebak::new(config.invocation, config.path)?;
                Encounter::Zebak(ZebakFight::new(player, zebak))
            }
        };
        Ok(encounter)
    }

    pub fn into_player(self) -> Player {
        match self {
            Encounter::Akkha(fight) => fight.into_player(),
            Encounter::Baba(fight) => fight.into_player(),
            Encounter::Zebak(fight) => fight.into_player(),
        }
    }

    fn fight(&self) -> &dyn BossFight {
        match self {
            Encounter::Akkha(fight) => fight,
            Encounter::Baba(fight) => fight,
            Encounter::Zebak(fight) => fight,
        }
    }

    fn fight_mut(&mut self) -> &mut dyn BossFight {
        match self {
            Encounter::Akkha(fight) => fight,
            Encounter::Baba(fight) => fight,
            Encounter::Zebak(fight) => fight,
        }
    }
}

impl BossFight for Encounter {
    fn on_tick(&mut self, tick: Tick, rng: &mut FastRng) -> Result<(), SimError> {
        self.fight_mut().on_tick(tick, rng)
    }

    fn boss(&self) -> &dyn CombatEntity {
        self.fight().boss()
    }

    fn player(&self) -> &Player {
        self.fight().player()
    }

    fn player_mut(&mut self) -> &mut Player {
        self.fight_mut().player_mut()
    }
}
