use crate::*;
pub use random::*;

mod random;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How strongly the generator protects the first-revealed cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FirstRevealSafety {
    /// No protection, the first reveal may hit a mine.
    None,
    /// The first-revealed cell itself is mine-free.
    Safe,
    /// The first-revealed cell and all its neighbors are mine-free, so the
    /// first reveal always opens a zero region.
    ZeroNeighborhood,
}
