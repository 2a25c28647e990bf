//! Arithmetic human-verification challenge.
//!
//! The question/answer logic only — presentation and session state
//! belong to whatever frontend drives this. Operands are small (1..=20)
//! and the operation table is addition and multiplication, so every
//! answer fits comfortably in a form field.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

// A concrete, seedable PRNG for determinism in tests.
type SmallRng = Xoshiro256StarStar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOp {
    Add,
    Mul,
}

impl ChallengeOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ChallengeOp::Add => "+",
            ChallengeOp::Mul => "×",
        }
    }

    fn apply(&self, a: u32, b: u32) -> u32 {
        match self {
            ChallengeOp::Add => a + b,
            ChallengeOp::Mul => a * b,
        }
    }
}

/// One generated question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    a: u32,
    b: u32,
    op: ChallengeOp,
}

impl Challenge {
    /// Generates a challenge from entropy.
    pub fn random() -> Self {
        Self::with_rng(&mut SmallRng::from_entropy())
    }

    /// Generates a reproducible challenge from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(&mut SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: &mut SmallRng) -> Self {
        let a = rng.gen_range(1..=20);
        let b = rng.gen_range(1..=20);
        let op = if rng.gen_bool(0.5) {
            ChallengeOp::Add
        } else {
            ChallengeOp::Mul
        };
        Self { a, b, op }
    }

    pub fn question(&self) -> String {
        format!("What is {} {} {}?", self.a, self.op.symbol(), self.b)
    }

    pub fn answer(&self) -> u32 {
        self.op.apply(self.a, self.b)
    }

    pub fn check(&self, answer: u32) -> bool {
        answer == self.answer()
    }
}
