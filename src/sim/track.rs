//! Constrained-random track generation
//!
//! A track is a fixed-length run of cells, each either a platform or a gap.
//! Generation guarantees the run is survivable: it starts on a platform and a
//! gap is never followed by another gap, so a double jump always clears one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// One discrete position along the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// A hole; landing here ends the session
    Gap,
    /// Solid ground
    Platform,
}

/// The full ordered cell sequence for one session.
///
/// Immutable once built; a session replaces the whole track on reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    cells: Vec<CellKind>,
}

impl Track {
    /// Generate a track of `length` cells from the supplied RNG.
    ///
    /// Cell 0 is always a platform. Any cell after a platform is a uniform
    /// coin flip; any cell after a gap is forced back to a platform.
    pub fn generate(length: u32, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::EmptyTrack);
        }

        let mut cells = Vec::with_capacity(length as usize);
        cells.push(CellKind::Platform);
        for i in 1..length as usize {
            let cell = if cells[i - 1] == CellKind::Gap {
                CellKind::Platform
            } else if rng.random_bool(0.5) {
                CellKind::Gap
            } else {
                CellKind::Platform
            };
            cells.push(cell);
        }

        Ok(Self { cells })
    }

    /// Build a track from an explicit cell layout, validating the same
    /// structural rules `generate` guarantees.
    pub fn from_cells(cells: Vec<CellKind>) -> Result<Self, ConfigError> {
        if cells.is_empty() {
            return Err(ConfigError::EmptyTrack);
        }
        if cells[0] == CellKind::Gap {
            return Err(ConfigError::GapAtStart);
        }
        for i in 1..cells.len() {
            if cells[i] == CellKind::Gap && cells[i - 1] == CellKind::Gap {
                return Err(ConfigError::AdjacentGaps(i));
            }
        }
        Ok(Self { cells })
    }

    /// Number of cells
    pub fn len(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `index`, or `None` past the end of the track
    pub fn cell(&self, index: u32) -> Option<CellKind> {
        self.cells.get(index as usize).copied()
    }

    /// Iterate cells in track order
    pub fn cells(&self) -> impl Iterator<Item = CellKind> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn holds_invariants(track: &Track) -> bool {
        track.cell(0) == Some(CellKind::Platform)
            && track
                .cells()
                .zip(track.cells().skip(1))
                .all(|(prev, cur)| prev != CellKind::Gap || cur == CellKind::Platform)
    }

    #[test]
    fn test_generate_rejects_zero_length() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(Track::generate(0, &mut rng), Err(ConfigError::EmptyTrack));
    }

    #[test]
    fn test_generate_length_one() {
        let mut rng = Pcg32::seed_from_u64(1);
        let track = Track::generate(1, &mut rng).unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(track.cell(0), Some(CellKind::Platform));
    }

    #[test]
    fn test_generate_deterministic_per_seed() {
        let a = Track::generate(50, &mut Pcg32::seed_from_u64(42)).unwrap();
        let b = Track::generate(50, &mut Pcg32::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cell_past_end_is_none() {
        let mut rng = Pcg32::seed_from_u64(7);
        let track = Track::generate(10, &mut rng).unwrap();
        assert_eq!(track.cell(10), None);
    }

    #[test]
    fn test_from_cells_validation() {
        use CellKind::*;
        assert!(Track::from_cells(vec![Platform, Gap, Platform]).is_ok());
        assert_eq!(Track::from_cells(vec![]), Err(ConfigError::EmptyTrack));
        assert_eq!(
            Track::from_cells(vec![Gap, Platform]),
            Err(ConfigError::GapAtStart)
        );
        assert_eq!(
            Track::from_cells(vec![Platform, Gap, Gap, Platform]),
            Err(ConfigError::AdjacentGaps(2))
        );
    }

    proptest! {
        #[test]
        fn prop_generated_tracks_hold_invariants(seed: u64, length in 1u32..256) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let track = Track::generate(length, &mut rng).unwrap();
            prop_assert_eq!(track.len(), length);
            prop_assert!(holds_invariants(&track));
        }
    }
}
