//! Core simulation engine: the tick loop and the Monte Carlo runners

use crate::boss::{BossFight, Encounter};
use crate::config::LoadoutConfig;
use crate::entity::{CombatEntity, EntityState};
use crate::error::SimError;
use crate::resources::SpecialAttackEnergy;
use crate::stats::{AggregatedStats, SimResult};
use crate::tick::Tick;
use rayon::prelude::*;
use tracing::trace;

/// Hard limit on fight length
pub const MAX_TICKS: u32 = 700;
/// Ticks between energy restores without a Lightbearer
pub const REGEN_INTERVAL: u32 = 50;
/// Ticks between energy restores with a Lightbearer
pub const LIGHTBEARER_REGEN_INTERVAL: u32 = 25;

/// Fast RNG wrapper for better performance
#[derive(Clone)]
pub struct FastRng {
    inner: fastrand::Rng,
}

impl FastRng {
    #[inline(always)]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform in [0, 1)
    #[inline(always)]
    pub fn f64(&mut self) -> f64 {
        self.inner.f64()
    }

    /// Uniform in [low, high]
    #[inline(always)]
    pub fn gen_range_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.inner.u32(low..=high)
    }
}

#[inline(always)]
fn regen_interval(state: &EntityState) -> u32 {
    if state.has_lightbearer {
        LIGHTBEARER_REGEN_INTERVAL
    } else {
        REGEN_INTERVAL
    }
}

/// Advance the special energy regeneration window of `state` by one tick
fn regenerate_energy(state: &mut EntityState, tick: Tick) {
    if !state.energy.is_regenerating() {
        state.regen_start = None;
        return;
    }

    match state.regen_start {
        None => state.regen_start = Some(tick),
        Some(start) => {
            let elapsed = tick.since(start);
            if elapsed > 0 && elapsed % regen_interval(state) == 0 {
                state.energy.regenerate(SpecialAttackEnergy::DEFAULT_REGEN);
                trace!(%tick, energy = state.energy.current(), "energy regenerated");
            }
        }
    }
}

/// Drives one fight tick by tick
pub struct CombatSimulator<F: BossFight> {
    fight: F,
    tick: Tick,
}

impl<F: BossFight> CombatSimulator<F> {
    pub fn new(fight: F) -> Self {
        Self { fight, tick: Tick::ZERO }
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn fight(&self) -> &F {
        &self.fight
    }

    pub fn into_fight(self) -> F {
        self.fight
    }

    /// Regenerate energy, let the fight act, then advance the clock
    pub fn simulate_tick(&mut self, rng: &mut FastRng) -> Result<(), SimError> {
        let tick = self.tick;
        regenerate_energy(self.fight.player_mut().state_mut(), tick);
        self.fight.on_tick(tick, rng)?;
        self.tick += 1;
        Ok(())
    }

    /// Run until the boss dies. Returns the number of ticks the fight took.
    pub fn run_simulation(&mut self, rng: &mut FastRng) -> Result<u32, SimError> {
        while !self.fight.is_fight_over() {
            if self.tick.value() >= MAX_TICKS {
                return Err(SimError::Timeout { limit: MAX_TICKS });
            }
            self.simulate_tick(rng)?;
        }
        Ok(self.tick.value())
    }
}

/// Run a single simulation with a random seed
pub fn run_simulation(config: &LoadoutConfig) -> Result<SimResult, SimError> {
    let mut rng = FastRng::new(rand::random::<u64>());
    run_simulation_with_rng(config, &mut rng)
}

/// Run a single simulation with a specific seed
pub fn run_simulation_with_seed(config: &LoadoutConfig, seed: u64) -> Result<SimResult, SimError> {
    let mut rng = FastRng::new(seed);
    run_simulation_with_rng(config, &mut rng)
}

/// Run a single simulation with a specific RNG
pub fn run_simulation_with_rng(
    config: &LoadoutConfig,
    rng: &mut FastRng,
) -> Result<SimResult, SimError> {
    let mut simulator = CombatSimulator::new(Encounter::from_config(config)?);
    let ticks = simulator.run_simulation(rng)?;
    let specs = simulator.into_fight().into_player().into_spec_tracker();
    Ok(SimResult { ticks, specs })
}

/// Run multiple simulations in parallel; iteration `i` is seeded with `base_seed + i`
pub fn run_simulations_parallel(
    config: &LoadoutConfig,
    count: usize,
    base_seed: u64,
) -> Result<Vec<SimResult>, SimError> {
    (0..count)
        .into_par_iter()
        .map(|i| run_simulation_with_seed(config, base_seed.wrapping_add(i as u64)))
        .collect()
}

/// Run multiple simulations sequentially from one RNG stream
pub fn run_simulations_sequential(
    config: &LoadoutConfig,
    count: usize,
    seed: u64,
) -> Result<Vec<SimResult>, SimError> {
    let mut rng = FastRng::new(seed);
    (0..count)
        .map(|_| run_simulation_with_rng(config, &mut rng))
        .collect()
}

/// Run simulations and return aggregated stats
pub fn run_and_aggregate(
    config: &LoadoutConfig,
    count: usize,
    parallel: bool,
    seed: Option<u64>,
) -> Result<AggregatedStats, SimError> {
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    let results = if parallel {
        run_simulations_parallel(config, count, seed)?
    } else {
        run_simulations_sequential(config, count, seed)?
    };

    Ok(AggregatedStats::from_results(&results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_stats::{DefaultCombatStats, DefenceBonuses};
    use crate::config::BossKind;
    use crate::entity::ToaEntity;
    use crate::player::Player;

    /// Fight where nothing ever happens
    struct IdleFight {
        player: Player,
        boss: ToaEntity,
    }

    impl IdleFight {
        fn new(lightbearer: bool) -> Self {
            Self {
                player: Player::new(lightbearer, false, false),
                boss: ToaEntity::fixed(
                    "Dummy",
                    100,
                    Box::new(DefaultCombatStats::new(1, 1, DefenceBonuses::default())),
                ),
            }
        }
    }

    impl BossFight for IdleFight {
        fn on_tick(&mut self, _tick: Tick, _rng: &mut FastRng) -> Result<(), SimError> {
            Ok(())
        }

        fn boss(&self) -> &dyn CombatEntity {
            &self.boss
        }

        fn player(&self) -> &Player {
            &self.player
        }

        fn player_mut(&mut self) -> &mut Player {
            &mut self.player
        }
    }

    fn energy_after(lightbearer: bool, ticks: u32) -> f64 {
        let mut rng = FastRng::new(0);
        let mut fight = IdleFight::new(lightbearer);
        fight.player.state_mut().energy.consume(50.0).unwrap();
        let mut sim = CombatSimulator::new(fight);
        for _ in 0..ticks {
            sim.simulate_tick(&mut rng).unwrap();
        }
        sim.fight().player().special_energy().current()
    }

    #[test]
    fn test_energy_regen_interval() {
        // Window starts on tick 0; restores land on ticks 50, 100, ...
        assert_eq!(energy_after(false, 50), 50.0);
        assert_eq!(energy_after(false, 51), 60.0);
        assert_eq!(energy_after(false, 101), 70.0);
    }

    #[test]
    fn test_energy_regen_lightbearer() {
        assert_eq!(energy_after(true, 25), 50.0);
        assert_eq!(energy_after(true, 26), 60.0);
        assert_eq!(energy_after(true, 51), 70.0);
    }

    #[test]
    fn test_full_energy_clears_window() {
        let mut rng = FastRng::new(0);
        let mut sim = CombatSimulator::new(IdleFight::new(false));
        sim.simulate_tick(&mut rng).unwrap();
        assert_eq!(sim.fight().player().state().regen_start, None);
        assert_eq!(sim.tick(), Tick(1));
    }

    #[test]
    fn test_timeout() {
        let mut rng = FastRng::new(0);
        let mut sim = CombatSimulator::new(IdleFight::new(false));
        assert_eq!(sim.run_simulation(&mut rng), Err(SimError::Timeout { limit: MAX_TICKS }));
        assert_eq!(sim.tick(), Tick(MAX_TICKS));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = LoadoutConfig {
            boss: BossKind::Zebak,
            ..LoadoutConfig::default()
        };
        let a = run_simulation_with_seed(&config, 42).unwrap();
        let b = run_simulation_with_seed(&config, 42).unwrap();
        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.specs, b.specs);
    }

    #[test]
    fn test_parallel_matches_seeded_runs() {
        let config = LoadoutConfig {
            boss: BossKind::Akkha,
            ..LoadoutConfig::default()
        };
        let results = run_simulations_parallel(&config, 4, 100).unwrap();
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.ticks, run_simulation_with_seed(&config, 100 + i as u64).unwrap().ticks);
        }
    }

    #[test]
    fn test_aggregate_counts_iterations() {
        let config = LoadoutConfig::default();
        let stats = run_and_aggregate(&config, 20, false, Some(7)).unwrap();
        assert_eq!(stats.iterations, 20);
        assert!(stats.min_ticks <= stats.max_ticks);
        assert!(stats.max_ticks < MAX_TICKS);
    }

    #[test]
    fn test_invalid_config_propagates() {
        let config = LoadoutConfig {
            invocation: 303,
            ..LoadoutConfig::default()
        };
        assert_eq!(
            run_simulation_with_seed(&config, 1).unwrap_err(),
            SimError::InvalidInvocation(303)
        );
    }
}
