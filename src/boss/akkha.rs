//! Akkha: five damage phases split by shadow adds, plus recurring memory windows

use super::BossFight;
use crate::combat_stats::MonsterScaled;
use crate::entity::{
    scaled_hitpoints, validate_invocation, validate_path, CombatEntity, EntityState, ToaEntity,
};
use crate::error::SimError;
use crate::gear;
use crate::player::Player;
use crate::simulation::FastRng;
use crate::strategy::{AkkhaStrategy, SpecStrategy};
use crate::tick::Tick;
use crate::weapon::ZaryteCrossbow;
use tracing::debug;

/// Number of damage phases; a shadow spawns between each
pub const PHASES: u32 = 5;
/// Ticks between a shadow spawning and it becoming attackable
pub const SHADOW_SPAWN_DELAY: u32 = 6;
/// Ticks from the end of one memory window to the start of the next
pub const MEMORY_INTERVAL: u32 = 101;

/// Shadow add spawned at each phase boundary
#[derive(Debug)]
pub struct AkkhaShadow {
    entity: ToaEntity,
    attackable_from: Tick,
    spawned_at_hp: u32,
}

impl AkkhaShadow {
    pub fn attackable_from(&self) -> Tick {
        self.attackable_from
    }

    /// Akkha's hitpoints when this shadow appeared
    pub fn spawned_at_hp(&self) -> u32 {
        self.spawned_at_hp
    }
}

impl CombatEntity for AkkhaShadow {
    fn state(&self) -> &EntityState {
        self.entity.state()
    }

    fn state_mut(&mut self) -> &mut EntityState {
        self.entity.state_mut()
    }

    fn is_attackable(&self, tick: Tick) -> bool {
        self.is_alive() && tick >= self.attackable_from
    }
}

#[derive(Debug)]
pub struct Akkha {
    entity: ToaEntity,
    invocation: u32,
    max_health: u32,
    phase_size: u32,
    shadow_hp: u32,
    /// Most recent shadow, kept after death so its spawn HP marks the top of the phase
    shadow: Option<AkkhaShadow>,
    memory_length: u32,
    memory_start: Option<Tick>,
    last_memory_end: Tick,
}

impl Akkha {
    pub fn new(invocation: u32, path: u32) -> Result<Self, SimError> {
        let hitpoints = scaled_hitpoints(gear::akkha::BOSS.base_hp, invocation, path)?;
        Self::with_hitpoints(hitpoints, invocation, path)
    }

    /// Akkha with an exact starting hitpoint value; invocation and path still scale
    /// defence, shadows and memory windows
    pub fn with_hitpoints(hitpoints: u32, invocation: u32, path: u32) -> Result<Self, SimError> {
        validate_invocation(invocation)?;
        validate_path(path)?;

        let profile = gear::akkha::BOSS;
        let entity = ToaEntity::fixed(
            profile.name,
            hitpoints,
            Box::new(MonsterScaled::new(profile.combat_stats(), invocation)),
        );

        Ok(Self {
            entity,
            invocation,
            max_health: hitpoints,
            phase_size: hitpoints / PHASES,
            shadow_hp: scaled_hitpoints(gear::akkha::SHADOW.base_hp, invocation, path)?,
            shadow: None,
            memory_length: (4 + path / 2) * 4 + 1,
            memory_start: None,
            last_memory_end: Tick::ZERO,
        })
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn phase_size(&self) -> u32 {
        self.phase_size
    }

    pub fn memory_length(&self) -> u32 {
        self.memory_length
    }

    pub fn shadow(&self) -> Option<&AkkhaShadow> {
        self.shadow.as_ref()
    }

    pub fn is_shadow_alive(&self) -> bool {
        self.shadow.as_ref().is_some_and(|s| s.is_alive())
    }

    /// Hitpoints at the top of the current phase
    fn top_of_phase(&self) -> u32 {
        self.shadow.as_ref().map_or(self.max_health, |s| s.spawned_at_hp)
    }

    /// Most damage a single hit may deal before reaching the next phase boundary
    pub fn max_damage_to_cap(&self) -> u32 {
        let hp = self.hitpoints();
        if self.phase_size == 0 {
            return hp;
        }
        if hp == self.top_of_phase() {
            self.phase_size
        } else {
            hp % self.phase_size
        }
    }

    /// Spawn a shadow when Akkha sits on a fresh phase boundary.
    /// Returns whether one was spawned.
    pub fn maybe_proc_shadow(&mut self, tick: Tick) -> bool {
        let hp = self.hitpoints();
        if !self.is_alive()
            || self.phase_size == 0
            || hp % self.phase_size != 0
            || hp == self.top_of_phase()
        {
            return false;
        }

        let profile = gear::akkha::SHADOW;
        let entity = ToaEntity::fixed(
            profile.name,
            self.shadow_hp,
            Box::new(MonsterScaled::new(profile.combat_stats(), self.invocation)),
        );
        let attackable_from = tick + SHADOW_SPAWN_DELAY;
        debug!(
            %tick,
            akkha_hp = hp,
            shadow_hp = self.shadow_hp,
            %attackable_from,
            "shadow spawned"
        );
        self.shadow = Some(AkkhaShadow {
            entity,
            attackable_from,
            spawned_at_hp: hp,
        });
        true
    }

    pub fn in_memory_phase(&self, tick: Tick) -> bool {
        self.memory_start
            .is_some_and(|start| tick >= start && tick.since(start) < self.memory_length)
    }

    /// Close an expired memory window and open the next one when due
    pub fn update_memory_phase(&mut self, tick: Tick) {
        if let Some(start) = self.memory_start {
            if tick.since(start) < self.memory_length {
                return;
            }
            self.last_memory_end = start + self.memory_length;
            self.memory_start = None;
            debug!(%tick, "memory phase ended");
        }
        if tick.since(self.last_memory_end) >= MEMORY_INTERVAL {
            self.memory_start = Some(tick);
            debug!(%tick, length = self.memory_length, "memory phase started");
        }
    }

    /// Whether a crossbow spec is worth spending now
    pub fn should_zcb_spec(&self) -> bool {
        let hp = self.hitpoints();
        if hp >= 500 {
            self.max_damage_to_cap() > ZaryteCrossbow::RUBY_CAP
        } else {
            hp > 320
        }
    }
}

impl CombatEntity for Akkha {
    fn state(&self) -> &EntityState {
        self.entity.state()
    }

    fn state_mut(&mut self) -> &mut EntityState {
        self.entity.state_mut()
    }

    fn is_attackable(&self, tick: Tick) -> bool {
        self.is_alive() && !self.is_shadow_alive() && !self.in_memory_phase(tick)
    }

    fn take_damage(&mut self, damage: u32) -> u32 {
        let capped = damage.min(self.max_damage_to_cap());
        self.entity.take_damage(capped)
    }
}

pub struct AkkhaFight {
    player: Player,
    akkha: Akkha,
    strategy: AkkhaStrategy,
}

impl AkkhaFight {
    pub fn new(player: Player, akkha: Akkha) -> Self {
        Self {
            player,
            akkha,
            strategy: AkkhaStrategy::new(),
        }
    }

    pub fn akkha(&self) -> &Akkha {
        &self.akkha
    }

    pub fn into_player(self) -> Player {
        self.player
    }
}

impl BossFight for AkkhaFight {
    fn on_tick(&mut self, tick: Tick, rng: &mut FastRng) -> Result<(), SimError> {
        self.akkha.update_memory_phase(tick);
        self.akkha.maybe_proc_shadow(tick);

        let selection = self.strategy.select_weapons(tick, &self.akkha);
        if let Some(shadow) = self.akkha.shadow.as_mut().filter(|s| s.is_alive()) {
            if shadow.is_attackable(tick) {
                self.player.attack(tick, shadow, selection.normal, None, false, rng)?;
                if !shadow.is_alive() {
                    debug!(%tick, "shadow killed");
                }
            }
        } else if self.akkha.is_attackable(tick) {
            self.player.attack(
                tick,
                &mut self.akkha,
                selection.normal,
                selection.spec,
                selection.should_spec,
                rng,
            )?;
        }
        Ok(())
    }

    fn boss(&self) -> &dyn CombatEntity {
        &self.akkha
    }

    fn player(&self) -> &Player {
        &self.player
    }

    fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
