//! Accuracy and damage rolls: the only source of randomness in a fight

use crate::simulation::FastRng;

/// Chance for an attack roll to beat a defence roll
pub fn calculate_hit_chance(attack_roll: u32, defence_roll: u32) -> f64 {
    let att = attack_roll as f64;
    let def = defence_roll as f64;
    if attack_roll > defence_roll {
        1.0 - (def + 2.0) / (2.0 * (att + 1.0))
    } else {
        att / (2.0 * (def + 1.0))
    }
}

/// Roll against `hit_chance`
#[inline(always)]
pub fn does_attack_hit(hit_chance: f64, rng: &mut FastRng) -> bool {
    rng.f64() <= hit_chance
}

/// Damage of a successful hit: `max(1, uniform[1, max_hit] - 1)`
#[inline(always)]
pub fn roll_damage(max_hit: u32, rng: &mut FastRng) -> u32 {
    if max_hit == 0 {
        return 0;
    }
    rng.gen_range_inclusive(1, max_hit).saturating_sub(1).max(1)
}

/// One complete attack: a single hit check, then `on_hit` decides the damage
#[inline]
pub fn resolve_attack<F>(attack_roll: u32, defence_roll: u32, rng: &mut FastRng, on_hit: F) -> u32
where
    F: FnOnce(&mut FastRng) -> u32,
{
    let hit_chance = calculate_hit_chance(attack_roll, defence_roll);
    if does_attack_hit(hit_chance, rng) {
        on_hit(rng)
    } else {
        0
    }
}
