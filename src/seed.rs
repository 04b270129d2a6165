//! Reproducible seeding for randomized batteries
//!
//! A battery run draws its randomness from a [`ChaCha8Rng`] whose whole
//! state derives from a block of seed words filled once from OS entropy.
//! The words are printed before any other test output, so a failure seen
//! in an unattended run can be replayed bit-for-bit by feeding the logged
//! words back through [`SeedMaterial::from_words`]. There is no automated
//! replay tool; the printed line is the supported manual mechanism.

use std::io::{self, Write};
use std::mem;

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of 32-bit words needed to cover the generator's seed, rounded up.
pub const SEED_WORDS: usize =
    (mem::size_of::<<ChaCha8Rng as SeedableRng>::Seed>() + 3) / mem::size_of::<u32>();

/// The exact bits used to initialize the battery's random generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMaterial {
    words: [u32; SEED_WORDS],
}

impl SeedMaterial {
    /// Fill fresh seed words from the OS entropy source.
    ///
    /// Entropy failure is not a recognized condition; if the OS source
    /// fails, this panics inside `rand` and the run is over.
    pub fn from_entropy() -> Self {
        let mut words = [0u32; SEED_WORDS];
        for word in &mut words {
            *word = OsRng.next_u32();
        }
        Self { words }
    }

    /// Rebuild seed material from previously logged words.
    pub fn from_words(words: [u32; SEED_WORDS]) -> Self {
        Self { words }
    }

    /// The seed words, in the order they are logged and consumed.
    pub fn words(&self) -> &[u32; SEED_WORDS] {
        &self.words
    }

    /// Print the randomized-run banner and the seed words.
    ///
    /// Emitted before any other test output: three lines warning that the
    /// run is randomized and that failures must be reported rather than
    /// rerun, then `Seed vector: ` followed by every word in decimal,
    /// comma-separated with a trailing comma.
    pub fn announce<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "This is a randomized test.")?;
        writeln!(out, "DO NOT IGNORE/RERUN ANY FAILURES.")?;
        writeln!(out, "You must report them to the maintainers.")?;
        writeln!(out)?;
        write!(out, "Seed vector: ")?;
        for word in &self.words {
            write!(out, "{word},")?;
        }
        writeln!(out)?;
        out.flush()
    }

    /// Deterministically seed a generator from these exact words.
    pub fn rng(&self) -> ChaCha8Rng {
        let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
        for (chunk, word) in seed.chunks_exact_mut(4).zip(&self.words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        ChaCha8Rng::from_seed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_words_cover_the_generator_seed() {
        assert_eq!(SEED_WORDS, 8);
    }

    #[test]
    fn same_words_yield_identical_streams() {
        let material = SeedMaterial::from_words([1, 2, 3, 4, 5, 6, 7, 8]);
        let mut a = material.rng();
        let mut b = material.clone().rng();
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_words_yield_different_streams() {
        let mut a = SeedMaterial::from_words([1, 2, 3, 4, 5, 6, 7, 8]).rng();
        let mut b = SeedMaterial::from_words([8, 7, 6, 5, 4, 3, 2, 1]).rng();
        let left: Vec<u64> = (0..4).map(|_| a.next_u64()).collect();
        let right: Vec<u64> = (0..4).map(|_| b.next_u64()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn announce_prints_banner_then_seed_vector() {
        let material = SeedMaterial::from_words([1, 2, 3, 4, 5, 6, 7, 8]);
        let mut out = Vec::new();
        material.announce(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "This is a randomized test.");
        assert_eq!(lines[1], "DO NOT IGNORE/RERUN ANY FAILURES.");
        assert_eq!(lines[2], "You must report them to the maintainers.");
        assert!(text.ends_with("Seed vector: 1,2,3,4,5,6,7,8,\n"));
    }

    #[test]
    fn entropy_material_is_usable() {
        // Not a randomness-quality test; only that the plumbing holds.
        let material = SeedMaterial::from_entropy();
        let mut rng = material.rng();
        rng.next_u64();
    }
}
