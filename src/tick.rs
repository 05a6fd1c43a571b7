//! Discrete simulation time

use serde::Serialize;
use std::fmt;
use std::ops::{Add, AddAssign};

/// Game tick (roughly 0.6 seconds of real time)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Tick(pub u32);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Real-time seconds represented by one tick
    pub const SECONDS: f64 = 0.6;

    #[inline(always)]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Ticks elapsed since `earlier`, zero if `earlier` lies in the future
    #[inline(always)]
    pub fn since(self, earlier: Tick) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u32> for Tick {
    type Output = Tick;

    fn add(self, rhs: u32) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl AddAssign<u32> for Tick {
    fn add_assign(&mut self, rhs: u32) {
        self.0 += rhs;
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
