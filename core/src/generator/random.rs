use ndarray::Array2;

use super::*;

/// Seeded uniform mine placement. The cells protected by the configured
/// [`FirstRevealSafety`] are withheld from the candidate pool, everything else
/// is a shuffle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    first_reveal: Pos,
    safety: FirstRevealSafety,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, first_reveal: Pos, safety: FirstRevealSafety) -> Self {
        Self {
            seed,
            first_reveal,
            safety,
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;
        use FirstRevealSafety::*;

        let total = config.total_cells();
        let size = config.size();

        // Degrade the safety level when the board cannot honor it. A valid
        // config always leaves at least one safe cell, so `Safe` always fits.
        let safety = match self.safety {
            ZeroNeighborhood => {
                let zone = 1 + neighbors(self.first_reveal, size).count() as CellCount;
                if config.mines + zone > total {
                    log::warn!(
                        "Cannot keep the first-reveal neighborhood clear ({} mines on {} cells), \
                         falling back to a safe first cell only",
                        config.mines,
                        total
                    );
                    Safe
                } else {
                    ZeroNeighborhood
                }
            }
            other => other,
        };

        let excluded: Vec<Pos> = match safety {
            None => Vec::new(),
            Safe => vec![self.first_reveal],
            ZeroNeighborhood => std::iter::once(self.first_reveal)
                .chain(neighbors(self.first_reveal, size))
                .collect(),
        };

        let mut candidates: Vec<Pos> = positions(size)
            .filter(|pos| !excluded.contains(pos))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        candidates.shuffle(&mut rng);

        let mut mine_mask: Array2<bool> = Array2::default(size.grid());
        for &pos in candidates.iter().take(config.mines as usize) {
            mine_mask[pos.grid()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated layout holds {} mines, requested {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let config = GameConfig::new(8, 8, 10).unwrap();
        let layout =
            RandomLayoutGenerator::new(7, (0, 0), FirstRevealSafety::None).generate(config);
        assert_eq!(layout.mine_count(), 10);
    }

    #[test]
    fn zero_neighborhood_keeps_first_reveal_clear() {
        let config = GameConfig::new(8, 8, 10).unwrap();
        for seed in 0..50 {
            let layout =
                RandomLayoutGenerator::new(seed, (3, 3), FirstRevealSafety::ZeroNeighborhood)
                    .generate(config);
            assert!(!layout.contains_mine((3, 3)));
            assert_eq!(layout.adjacent_mines((3, 3)), 0);
            assert_eq!(layout.mine_count(), 10);
        }
    }

    #[test]
    fn crowded_board_degrades_to_safe_cell_only() {
        // 3x3 with 7 mines cannot spare a whole neighborhood but can spare
        // the revealed cell itself.
        let config = GameConfig::new(3, 3, 7).unwrap();
        for seed in 0..20 {
            let layout =
                RandomLayoutGenerator::new(seed, (1, 1), FirstRevealSafety::ZeroNeighborhood)
                    .generate(config);
            assert!(!layout.contains_mine((1, 1)));
            assert_eq!(layout.mine_count(), 7);
        }
    }

    #[test]
    fn same_seed_reproduces_the_layout() {
        let config = GameConfig::new(16, 16, 40).unwrap();
        let a = RandomLayoutGenerator::new(42, (0, 0), FirstRevealSafety::ZeroNeighborhood)
            .generate(config);
        let b = RandomLayoutGenerator::new(42, (0, 0), FirstRevealSafety::ZeroNeighborhood)
            .generate(config);
        assert_eq!(a, b);
    }
}
