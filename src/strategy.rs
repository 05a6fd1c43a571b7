//! Per-boss weapon and special attack selection

use crate::boss::{Akkha, Baba, Zebak};
use crate::config::MeleeWeapon;
use crate::entity::CombatEntity;
use crate::gear;
use crate::tick::Tick;
use crate::weapon::{
    BandosGodsword, DragonWarhammer, SpecWeapon, StandardWeapon, ToxicBlowpipe, Weapon,
    ZaryteCrossbow,
};

/// Defence that must be drained before the drain spec is dropped
pub const DRAIN_TARGET: u32 = 13;

/// What the player swings on a given tick
pub struct WeaponSelection<'a> {
    pub normal: &'a dyn Weapon,
    pub spec: Option<&'a dyn SpecWeapon>,
    pub should_spec: bool,
}

impl<'a> WeaponSelection<'a> {
    /// Selection that specs whenever a spec weapon was chosen, except on tick 0
    fn new(tick: Tick, normal: &'a dyn Weapon, spec: Option<&'a dyn SpecWeapon>) -> Self {
        Self {
            normal,
            spec,
            should_spec: tick != Tick::ZERO && spec.is_some(),
        }
    }

    pub fn spec_name(&self) -> Option<&str> {
        self.spec.map(|w| w.name())
    }
}

/// Decision policy for one boss
pub trait SpecStrategy<B: ?Sized> {
    fn select_weapons(&self, tick: Tick, boss: &B) -> WeaponSelection<'_>;
}

/// Drain spec phase: little defence drained so far and the boss is above half health
fn wants_defence_drain(initial_defence: u32, initial_hp: u32, boss: &dyn CombatEntity) -> bool {
    let drained = initial_defence.saturating_sub(boss.defence_level());
    drained < DRAIN_TARGET && boss.hitpoints() as u64 * 2 > initial_hp as u64
}

/// Shadow the whole fight, crossbow specs whenever a ruby bolt is worth it
pub struct AkkhaStrategy {
    shadow: StandardWeapon,
    zcb: ZaryteCrossbow,
}

impl AkkhaStrategy {
    pub fn new() -> Self {
        let shadow = gear::akkha::TUMEKENS_SHADOW;
        let zcb = gear::akkha::ZARYTE_CROSSBOW;
        Self {
            shadow: StandardWeapon::tumekens_shadow(shadow.attack_roll, shadow.max_hit),
            zcb: ZaryteCrossbow::new(zcb.attack_roll, zcb.max_hit),
        }
    }
}

impl Default for AkkhaStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecStrategy<Akkha> for AkkhaStrategy {
    fn select_weapons(&self, tick: Tick, boss: &Akkha) -> WeaponSelection<'_> {
        let spec: &dyn SpecWeapon = &self.zcb;
        let mut selection = WeaponSelection::new(tick, &self.shadow, Some(spec));
        selection.should_spec &= boss.should_zcb_spec();
        selection
    }
}

/// Melee main weapon; Bandos godsword to drain, then crossbow, then blowpipe
pub struct BabaStrategy {
    main_weapon: StandardWeapon,
    bgs: BandosGodsword,
    zcb: ZaryteCrossbow,
    blowpipe: ToxicBlowpipe,
    initial_defence: u32,
    initial_hp: u32,
}

impl BabaStrategy {
    pub fn new(main_weapon: MeleeWeapon, boss: &Baba) -> Self {
        let main_weapon = match main_weapon {
            MeleeWeapon::Fang => {
                let p = gear::baba::OSMUMTENS_FANG;
                StandardWeapon::osmumtens_fang(p.attack_roll, p.max_hit)
            }
            MeleeWeapon::Scythe => {
                let p = gear::baba::SCYTHE_OF_VITUR;
                StandardWeapon::scythe_of_vitur(p.attack_roll, p.max_hit)
            }
        };
        let bgs = gear::baba::BANDOS_GODSWORD;
        let zcb = gear::baba::ZARYTE_CROSSBOW;
        let blowpipe = gear::baba::TOXIC_BLOWPIPE;

        Self {
            main_weapon,
            bgs: BandosGodsword::new(bgs.attack_roll, bgs.max_hit),
            zcb: ZaryteCrossbow::new(zcb.attack_roll, zcb.max_hit),
            blowpipe: ToxicBlowpipe::new(blowpipe.attack_roll, blowpipe.max_hit),
            initial_defence: boss.defence_level(),
            initial_hp: boss.hitpoints(),
        }
    }

    pub fn main_weapon(&self) -> &StandardWeapon {
        &self.main_weapon
    }
}

impl SpecStrategy<Baba> for BabaStrategy {
    fn select_weapons(&self, tick: Tick, boss: &Baba) -> WeaponSelection<'_> {
        let draining = wants_defence_drain(self.initial_defence, self.initial_hp, boss);
        let spec: &dyn SpecWeapon = if draining {
            &self.bgs
        } else if boss.hitpoints() >= 500 {
            &self.zcb
        } else {
            &self.blowpipe
        };
        WeaponSelection::new(tick, &self.main_weapon, Some(spec))
    }
}

/// Twisted bow; warhammer to drain, crossbow above 500 HP, blowpipe to finish
pub struct ZebakStrategy {
    tbow: StandardWeapon,
    dwh: DragonWarhammer,
    zcb: ZaryteCrossbow,
    blowpipe: ToxicBlowpipe,
    initial_defence: u32,
    initial_hp: u32,
}

impl ZebakStrategy {
    pub fn new(boss: &Zebak) -> Self {
        let tbow = gear::zebak::TWISTED_BOW;
        let dwh = gear::zebak::DRAGON_WARHAMMER;
        let zcb = gear::zebak::ZARYTE_CROSSBOW;
        let blowpipe = gear::zebak::TOXIC_BLOWPIPE;

        Self {
            tbow: StandardWeapon::twisted_bow(tbow.attack_roll, tbow.max_hit),
            dwh: DragonWarhammer::new(dwh.attack_roll, dwh.max_hit),
            zcb: ZaryteCrossbow::new(zcb.attack_roll, zcb.max_hit),
            blowpipe: ToxicBlowpipe::new(blowpipe.attack_roll, blowpipe.max_hit),
            initial_defence: boss.defence_level(),
            initial_hp: boss.hitpoints(),
        }
    }
}

impl SpecStrategy<Zebak> for ZebakStrategy {
    fn select_weapons(&self, tick: Tick, boss: &Zebak) -> WeaponSelection<'_> {
        let draining = wants_defence_drain(self.initial_defence, self.initial_hp, boss);
        let spec: &dyn SpecWeapon = if draining {
            &self.dwh
        } else if boss.should_zcb_spec() {
            &self.zcb
        } else {
            &self.blowpipe
        };
        WeaponSelection::new(tick, &self.tbow, Some(spec))
    }
}
