// Copyright 2023-2026 Andrew Conway.
// This file is part of RankVote.
// RankVote is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// RankVote is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with RankVote.  If not, see <https://www.gnu.org/licenses/>.


//! The source of pseudo-random numbers used for drawing lots in ties, and for filling blank preferences.
//! It is passed explicitly into a count so that a count can be repeated exactly given the same seed.


use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

pub struct Randomness {
    rng : ChaCha20Rng,
}

impl Randomness {
    /// A reproducible source of randomness.
    /// ```
    /// use rankvote::random_util::Randomness;
    /// let mut r1 = Randomness::seeded(42);
    /// let mut r2 = Randomness::seeded(42);
    /// assert_eq!(r1.draw_lot(),r2.draw_lot());
    /// ```
    pub fn seeded(seed:u64) -> Self { Randomness{ rng: ChaCha20Rng::seed_from_u64(seed) } }
    /// A source seeded by the operating system. Counts with random elements will not be repeatable.
    pub fn from_entropy() -> Self { Randomness{ rng: ChaCha20Rng::from_os_rng() } }

    /// A random number used to order candidates that could not otherwise be separated.
    pub fn draw_lot(&mut self) -> u64 { self.rng.random() }

    /// Choose uniformly from the options, or None if there are no options.
    /// ```
    /// use rankvote::random_util::Randomness;
    /// let mut randomness = Randomness::seeded(1);
    /// assert_eq!(None,randomness.choose::<usize>(&[]));
    /// assert_eq!(Some(7),randomness.choose(&[7]));
    /// ```
    pub fn choose<T:Copy>(&mut self,options:&[T]) -> Option<T> {
        if options.is_empty() { None } else { Some(options[self.rng.random_range(0..options.len())]) }
    }
}

impl Default for Randomness {
    fn default() -> Self { Randomness::from_entropy() }
}

#[cfg(test)]
mod tests {
    use super::Randomness;

    #[test]
    fn choose_is_roughly_uniform() {
        let mut randomness = Randomness::seeded(7);
        let mut counts = [0usize;3];
        for _ in 0..3000 {
            let chosen = randomness.choose(&[0,1,2]).unwrap();
            counts[chosen]+=1;
        }
        for count in counts {
            assert!(count>800 && count<1200,"Uneven counts {:?}",counts);
        }
    }
}
