//! Defensive stat blocks and the decorators that scale or floor them

/// Attack style, used to pick which defence bonus applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackStyle {
    Stab,
    Slash,
    Crush,
    Magic,
    Ranged,
}

/// Per-style defence bonuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefenceBonuses {
    pub stab: i32,
    pub slash: i32,
    pub crush: i32,
    pub magic: i32,
    pub ranged: i32,
}

impl DefenceBonuses {
    pub fn get(&self, style: AttackStyle) -> i32 {
        match style {
            AttackStyle::Stab => self.stab,
            AttackStyle::Slash => self.slash,
            AttackStyle::Crush => self.crush,
            AttackStyle::Magic => self.magic,
            AttackStyle::Ranged => self.ranged,
        }
    }
}

/// Anything that can produce a defence roll against an incoming attack
pub trait CombatStats {
    fn defence_roll(&self, style: AttackStyle) -> u32;

    /// Current (possibly drained) defence level
    fn defence_level(&self) -> u32;

    /// Lower the defence level by `amount`
    fn drain_defence(&mut self, amount: u32);
}

/// Plain level + bonus stat block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultCombatStats {
    pub defence_level: u32,
    pub magic_level: u32,
    pub bonuses: DefenceBonuses,
}

impl DefaultCombatStats {
    pub fn new(defence_level: u32, magic_level: u32, bonuses: DefenceBonuses) -> Self {
        Self {
            defence_level,
            magic_level,
            bonuses,
        }
    }
}

impl CombatStats for DefaultCombatStats {
    fn defence_roll(&self, style: AttackStyle) -> u32 {
        // Magic is defended with the magic level, everything else with defence
        let level = match style {
            AttackStyle::Magic => self.magic_level,
            _ => self.defence_level,
        } as i64;
        let bonus = self.bonuses.get(style) as i64;
        ((level + 9) * (bonus + 64)).max(0) as u32
    }

    fn defence_level(&self) -> u32 {
        self.defence_level
    }

    fn drain_defence(&mut self, amount: u32) {
        self.defence_level = self.defence_level.saturating_sub(amount);
    }
}

/// Raid-level scaling of a monster's defence roll.
///
/// The wrapped roll is multiplied by `1 + invocation / 500 * 2` and truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterScaled<S> {
    inner: S,
    invocation: u32,
}

impl<S: CombatStats> MonsterScaled<S> {
    /// Callers validate `invocation` (see `entity::validate_invocation`)
    pub fn new(inner: S, invocation: u32) -> Self {
        Self { inner, invocation }
    }

    pub fn multiplier(&self) -> f64 {
        1.0 + self.invocation as f64 / 500.0 * 2.0
    }
}

impl<S: CombatStats> CombatStats for MonsterScaled<S> {
    fn defence_roll(&self, style: AttackStyle) -> u32 {
        (self.inner.defence_roll(style) as f64 * self.multiplier()) as u32
    }

    fn defence_level(&self) -> u32 {
        self.inner.defence_level()
    }

    fn drain_defence(&mut self, amount: u32) {
        self.inner.drain_defence(amount);
    }
}

/// Defence that can be drained, but never below `floor`
#[derive(Debug, Clone, PartialEq)]
pub struct DrainCapped<S> {
    inner: S,
    floor: u32,
}

impl<S: CombatStats> DrainCapped<S> {
    pub fn new(inner: S, floor: u32) -> Self {
        Self { inner, floor }
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }
}

impl<S: CombatStats> CombatStats for DrainCapped<S> {
    fn defence_roll(&self, style: AttackStyle) -> u32 {
        self.inner.defence_roll(style)
    }

    fn defence_level(&self) -> u32 {
        self.inner.defence_level()
    }

    fn drain_defence(&mut self, amount: u32) {
        let headroom = self.inner.defence_level().saturating_sub(self.floor);
        self.inner.drain_defence(amount.min(headroom));
    }
}
