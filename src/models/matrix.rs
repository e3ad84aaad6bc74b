use crate::error::{Error, Result};

/// Side length of a version 1 symbol
pub const VERSION_1_SIDE: usize = 21;

/// Modules added per side for each version step
pub const MODULES_PER_VERSION_STEP: usize = 4;

/// Largest QR version (177x177 modules)
pub const MAX_VERSION: u32 = 40;

/// Square grid of QR modules (true = dark), bit-packed row-major.
///
/// Created empty for a version and filled by an encoder. Rendering only reads
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    version: u32,
    side: usize,
    data: Vec<u8>,
}

impl ModuleMatrix {
    /// Create an all-light matrix sized for `version`.
    pub fn new(version: u32) -> Result<Self> {
        let side = Self::side_for_version(version)?;
        let bytes_needed = (side * side).div_ceil(8);
        Ok(Self {
            version,
            side,
            data: vec![0; bytes_needed],
        })
    }

    /// Modules per side for a version: `21 + (version - 1) * 4`.
    ///
    /// Versions outside `1..=MAX_VERSION` fail with [`Error::InvalidVersion`].
    pub fn side_for_version(version: u32) -> Result<usize> {
        if !(1..=MAX_VERSION).contains(&version) {
            return Err(Error::InvalidVersion(version));
        }
        Ok(VERSION_1_SIDE + (version as usize - 1) * MODULES_PER_VERSION_STEP)
    }

    /// QR version this matrix was built for
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Modules per side
    pub fn side(&self) -> usize {
        self.side
    }

    /// Module at (row, col). Out-of-range positions read as light.
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.side || col >= self.side {
            return false;
        }
        let index = row * self.side + col;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set module at (row, col). Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        if row >= self.side || col >= self.side {
            return;
        }
        let index = row * self.side + col;
        let byte_index = index / 8;
        let bit_index = index % 8;
        if dark {
            self.data[byte_index] |= 1 << bit_index;
        } else {
            self.data[byte_index] &= !(1 << bit_index);
        }
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_for_version() {
        assert_eq!(ModuleMatrix::side_for_version(1).unwrap(), 21);
        assert_eq!(ModuleMatrix::side_for_version(2).unwrap(), 25);
        assert_eq!(ModuleMatrix::side_for_version(40).unwrap(), 177);
        for v in 1..=MAX_VERSION {
            assert_eq!(
                ModuleMatrix::side_for_version(v).unwrap(),
                21 + (v as usize - 1) * 4
            );
        }
    }

    #[test]
    fn test_invalid_version() {
        assert!(matches!(ModuleMatrix::new(0), Err(Error::InvalidVersion(0))));
    }

    #[test]
    fn test_version_above_max() {
        assert!(ModuleMatrix::new(MAX_VERSION).is_ok());
        for v in [MAX_VERSION + 1, 100_000, u32::MAX] {
            assert!(matches!(ModuleMatrix::new(v), Err(Error::InvalidVersion(got)) if got == v));
            assert!(matches!(
                ModuleMatrix::side_for_version(v),
                Err(Error::InvalidVersion(_))
            ));
        }
    }

    #[test]
    fn test_new_matrix_is_light() {
        let matrix = ModuleMatrix::new(3).unwrap();
        assert_eq!(matrix.version(), 3);
        assert_eq!(matrix.side(), 29);
        assert_eq!(matrix.dark_count(), 0);
        assert!(!matrix.get(28, 28));
    }

    #[test]
    fn test_set_get() {
        let mut matrix = ModuleMatrix::new(1).unwrap();
        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(4, 3));

        matrix.set(20, 20, true);
        assert!(matrix.get(20, 20));
        assert_eq!(matrix.dark_count(), 2);

        matrix.set(3, 4, false);
        assert!(!matrix.get(3, 4));
        assert_eq!(matrix.dark_count(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = ModuleMatrix::new(1).unwrap();
        matrix.set(21, 0, true); // Should not panic
        matrix.set(0, 21, true);
        assert!(!matrix.get(21, 0));
        assert_eq!(matrix.dark_count(), 0);
    }
}
