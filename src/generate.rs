//! Random batch inputs in the [`batch`](crate::batch) text format.
//!
//! Each case draws a cell count in `[min_cells, max_cells]` and an integer
//! threshold `d` in `[1, max_radius]`. Cells get ids `1..=n`, integer
//! coordinates in `[0, 10·d]`, and one to five distinct peptides of five
//! amino-acid letters. The same seed always yields the same text.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

const AMINO_ACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";
const PEPTIDE_LEN: usize = 5;
const MAX_PEPTIDES: usize = 5;

/// Parameters for [`generate_batch`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of cases.
    pub cases: usize,
    /// Smallest cell count per case.
    pub min_cells: usize,
    /// Largest cell count per case.
    pub max_cells: usize,
    /// Largest distance threshold (at least 1).
    pub max_radius: u32,
    /// RNG seed.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cases: 1,
            min_cells: 1,
            max_cells: 20,
            max_radius: 5,
            seed: 42,
        }
    }
}

/// Produce a complete batch input.
pub fn generate_batch(config: &GeneratorConfig) -> Result<String> {
    if config.min_cells > config.max_cells {
        return Err(Error::InvalidParameter {
            name: "min_cells",
            message: "must not exceed max_cells",
        });
    }
    if config.max_radius == 0 {
        return Err(Error::InvalidParameter {
            name: "max_radius",
            message: "must be at least 1",
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut out = format!("{}\n", config.cases);

    for _ in 0..config.cases {
        let n = rng.random_range(config.min_cells..=config.max_cells);
        let d = rng.random_range(1..=config.max_radius);
        let extent = u64::from(d) * 10;
        out.push_str(&format!("{n} {d}\n"));

        for id in 1..=n {
            let x = rng.random_range(0..=extent);
            let y = rng.random_range(0..=extent);
            let peptides = random_peptides(&mut rng);
            out.push_str(&format!("{id} {x} {y} {}\n", peptides.join(" ")));
        }
    }

    Ok(out)
}

fn random_peptides(rng: &mut impl Rng) -> Vec<String> {
    let count = rng.random_range(1..=MAX_PEPTIDES);
    let mut peptides: Vec<String> = Vec::with_capacity(count);
    while peptides.len() < count {
        let peptide: String = (0..PEPTIDE_LEN)
            .map(|_| AMINO_ACIDS[rng.random_range(0..AMINO_ACIDS.len())] as char)
            .collect();
        if !peptides.contains(&peptide) {
            peptides.push(peptide);
        }
    }
    peptides
}
