//! Debug script to print scaled boss stats for a given raid level

use std::env;
use toa_sim::boss::{Akkha, Baba, Zebak};
use toa_sim::combat_stats::AttackStyle;
use toa_sim::config::{DEFAULT_INVOCATION, DEFAULT_PATH};
use toa_sim::entity::{invocation_multiplier, path_multiplier, CombatEntity};
use toa_sim::error::SimError;

const STYLES: [AttackStyle; 5] = [
    AttackStyle::Stab,
    AttackStyle::Slash,
    AttackStyle::Crush,
    AttackStyle::Magic,
    AttackStyle::Ranged,
];

fn print_boss(boss: &dyn CombatEntity) {
    println!("{}:", boss.name());
    println!("  HP:      {}", boss.hitpoints());
    println!("  Defence: {}", boss.defence_level());
    for style in STYLES {
        println!("  {:<8} {}", format!("{:?}:", style), boss.defence_roll(style));
    }
}

fn print_all(invocation: u32, path: u32) -> Result<(), SimError> {
    println!("\n=== INVOCATION {} / PATH {} ===", invocation, path);
    println!(
        "HP multipliers: invocation {:.2}, path {:.2}",
        invocation_multiplier(invocation),
        path_multiplier(path)
    );

    let akkha = Akkha::new(invocation, path)?;
    print_boss(&akkha);
    println!("  Phase size:    {}", akkha.phase_size());
    println!("  Memory window: {} ticks", akkha.memory_length());

    print_boss(&Baba::new(invocation, path)?);
    print_boss(&Zebak::new(invocation, path)?);
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let parse = |i: usize, default: u32| -> u32 {
        match args.get(i).map(|s| s.parse::<u32>()) {
            Some(Ok(v)) => v,
            Some(Err(e)) => {
                eprintln!("Invalid argument {:?}: {}", args[i], e);
                std::process::exit(1);
            }
            None => default,
        }
    };
    let invocation = parse(1, DEFAULT_INVOCATION);
    let path = parse(2, DEFAULT_PATH);

    if let Err(e) = print_all(invocation, path) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
