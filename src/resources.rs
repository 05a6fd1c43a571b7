//! Bounded combat resources: hitpoints and special attack energy

use crate::error::SimError;

/// Hitpoints of a combat entity. Never drops below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
}

impl Health {
    pub fn new(value: u32) -> Self {
        Self { current: value }
    }

    #[inline(always)]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline(always)]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Remove `damage` hitpoints, clamping at zero. Returns the amount actually removed.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let applied = damage.min(self.current);
        self.current -= applied;
        applied
    }
}

/// Special attack energy, kept within 0..=100.
///
/// Stored as a float because liquid adrenaline halves costs to fractional values
/// (a 75% spec costs 37.5% while the buff is active).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialAttackEnergy {
    current: f64,
}

impl SpecialAttackEnergy {
    pub const MAX: f64 = 100.0;
    pub const DEFAULT_REGEN: u32 = 10;

    pub fn new(value: f64) -> Result<Self, SimError> {
        if !value.is_finite() || !(0.0..=Self::MAX).contains(&value) {
            return Err(SimError::EnergyOutOfRange(value));
        }
        Ok(Self { current: value })
    }

    pub fn full() -> Self {
        Self { current: Self::MAX }
    }

    #[inline(always)]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline(always)]
    pub fn is_regenerating(&self) -> bool {
        self.current < Self::MAX
    }

    #[inline(always)]
    pub fn can_use_special(&self, cost: f64) -> bool {
        self.current >= cost
    }

    /// Spend `amount` energy. Fails without touching the pool if `amount` is
    /// negative, not finite, or larger than what is available.
    pub fn consume(&mut self, amount: f64) -> Result<(), SimError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(SimError::InvalidEnergyAmount(amount));
        }
        if amount > self.current {
            return Err(SimError::InsufficientEnergy {
                requested: amount,
                available: self.current,
            });
        }
        self.current -= amount;
        Ok(())
    }

    /// Restore `amount` energy, capped at 100
    pub fn regenerate(&mut self, amount: u32) {
        self.current = (self.current + amount as f64).min(Self::MAX);
    }
}

impl Default for SpecialAttackEnergy {
    fn default() -> Self {
        Self::full()
    }
}
