use toa_sim::boss::{Akkha, Baba, BabaFight, BossFight, Encounter, Zebak};
use toa_sim::config::{BossKind, LoadoutConfig, MeleeWeapon};
use toa_sim::entity::CombatEntity;
use toa_sim::player::Player;
use toa_sim::simulation::{
    run_and_aggregate, run_simulation_with_seed, CombatSimulator, FastRng, MAX_TICKS,
};
use toa_sim::tick::Tick;

fn loadout(boss: BossKind) -> LoadoutConfig {
    LoadoutConfig {
        boss,
        ..LoadoutConfig::default()
    }
}

#[test]
fn every_boss_dies_before_the_tick_limit() {
    for boss in BossKind::ALL {
        for seed in 0..10 {
            let mut rng = FastRng::new(seed);
            let mut sim = CombatSimulator::new(Encounter::from_config(&loadout(boss)).unwrap());
            let ticks = sim.run_simulation(&mut rng).unwrap();
            assert!(ticks > 0 && ticks < MAX_TICKS, "{boss} seed {seed}: {ticks} ticks");
            assert_eq!(sim.fight().boss().hitpoints(), 0);
            assert!(sim.fight().is_fight_over());
        }
    }
}

#[test]
fn every_flag_combination_completes() {
    for boss in BossKind::ALL {
        for config in loadout(boss).flag_combinations() {
            let result = run_simulation_with_seed(&config, 11).unwrap();
            assert!(result.ticks < MAX_TICKS);
        }
    }
}

#[test]
fn scythe_works_against_baba() {
    let config = LoadoutConfig {
        boss: BossKind::Baba,
        melee: MeleeWeapon::Scythe,
        ..LoadoutConfig::default()
    };
    let stats = run_and_aggregate(&config, 25, true, Some(3)).unwrap();
    assert_eq!(stats.iterations, 25);
    assert!(stats.max_ticks < MAX_TICKS);
}

#[test]
fn specs_are_recorded() {
    let config = LoadoutConfig {
        boss: BossKind::Zebak,
        liquid_adrenaline: true,
        surge_potions: true,
        ..LoadoutConfig::default()
    };
    let stats = run_and_aggregate(&config, 50, false, Some(5)).unwrap();
    assert!(stats.spec_totals.total() > 0);
    let avg_sum: f64 = stats.spec_averages.values().sum();
    assert!((avg_sum - stats.spec_totals.total() as f64 / 50.0).abs() < 1e-9);
}

#[test]
fn akkha_caps_damage_until_the_shadow_spawns() {
    let mut akkha = Akkha::with_hitpoints(1470, 300, 2).unwrap();
    assert_eq!(akkha.take_damage(400), 294);
    assert_eq!(akkha.hitpoints(), 1176);
    assert_eq!(akkha.take_damage(400), 0);
    assert_eq!(akkha.hitpoints(), 1176);

    assert!(akkha.maybe_proc_shadow(Tick(20)));
    assert!(!akkha.is_attackable(Tick(20)));
    assert_eq!(akkha.max_damage_to_cap(), 294);
}

#[test]
fn baba_boulder_blocks_attacks_for_twenty_one_ticks() {
    let mut baba = Baba::new(300, 2).unwrap();
    let initial = baba.initial_hp();
    baba.take_damage(initial - initial * 66 / 100);
    assert!(baba.maybe_start_boulder_phase(Tick(80)));
    assert!((80..=100).all(|t| !baba.is_attackable(Tick(t))));
    assert!(baba.is_attackable(Tick(101)));
    // Same threshold never fires again
    assert!(!baba.maybe_start_boulder_phase(Tick(101)));
}

#[test]
fn baba_throwers_spawn_on_tick_37() {
    let mut rng = FastRng::new(1);
    let mut fight = BabaFight::new(
        Player::new(false, false, false),
        Baba::new(300, 2).unwrap(),
        MeleeWeapon::Fang,
    );
    for t in 0..37 {
        fight.on_tick(Tick(t), &mut rng).unwrap();
        assert!(fight.baba().throwers().is_empty());
    }
    fight.on_tick(Tick(37), &mut rng).unwrap();
    assert_eq!(fight.baba().throwers().len(), 2);
}

#[test]
fn zebak_defence_floors_at_fifty() {
    let mut zebak = Zebak::new(300, 2).unwrap();
    assert_eq!(zebak.defence_level(), 70);
    zebak.drain_defence(100);
    assert_eq!(zebak.defence_level(), 50);
}
