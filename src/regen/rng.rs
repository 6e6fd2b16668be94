//! The game's linear congruential generator.
//!
//! Draw order is part of the save format: every item is replayed from its
//! stored seed, so each call here must consume exactly the values the game
//! consumed.

const MULTIPLIER: u32 = 0x015A_4E35;
const INCREMENT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiabloRng {
    seed: u32,
}

impl DiabloRng {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Steps the generator and returns the new raw state.
    pub fn advance(&mut self) -> u32 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.seed
    }

    pub fn discard(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    /// Absolute value of the signed state. `i32::MIN` comes back unchanged.
    pub fn advance_rng(&mut self) -> i32 {
        (self.advance() as i32).wrapping_abs()
    }

    /// Value in `0..v` for `v > 0`, 0 otherwise.
    ///
    /// Small bounds use the high 16 bits, large bounds the whole state. When
    /// the state hits `i32::MIN` the result is negative; callers that index
    /// with it must check.
    pub fn generate_rnd(&mut self, v: i32) -> i32 {
        if v <= 0 {
            return 0;
        }
        if v <= 0x7FFF {
            return (self.advance_rng() >> 16) % v;
        }
        self.advance_rng() % v
    }

    /// True with probability 1/`one_in`.
    pub fn flip_coin(&mut self, one_in: i32) -> bool {
        self.generate_rnd(one_in) == 0
    }
}
