use crate::ArityError;
use core::ops::Index;

/// Named entries of the timing table, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Slot {
    /// Reset pulse, bus held low
    Reset1,
    /// Release until the presence sample
    Reset2,
    /// Remainder of the presence window
    Reset3,
    /// Read slot start, bus held low
    Read1,
    /// Release until the bit sample
    Read2,
    /// Remainder of the read slot
    Read3,
    /// Write slot start, bus held low
    Write1,
    /// Bus at the bit level
    Write2,
    /// Recovery, bus released
    Write3,
}

/// Microsecond delays for every phase of reset, read and write.
///
/// Values are taken as given. Nothing stops a caller from configuring
/// timings a device cannot follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Timings {
    raw: [u32; Self::LEN],
}

impl Timings {
    /// Number of entries in the table
    pub const LEN: usize = 9;

    /// Standard speed timings
    pub const STANDARD: Timings = Timings {
        raw: [480, 40, 420, 5, 5, 40, 10, 50, 10],
    };

    pub fn as_slice(&self) -> &[u32] {
        &self.raw
    }

    /// Overwrite the whole table, or nothing if `values` has the wrong length
    pub fn set(&mut self, values: &[u32]) -> Result<(), ArityError> {
        *self = Self::try_from(values)?;
        Ok(())
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl From<[u32; Self::LEN]> for Timings {
    fn from(raw: [u32; Self::LEN]) -> Self {
        Timings { raw }
    }
}

impl TryFrom<&[u32]> for Timings {
    type Error = ArityError;

    fn try_from(values: &[u32]) -> Result<Self, Self::Error> {
        let raw = <[u32; Self::LEN]>::try_from(values).map_err(|_| ArityError {
            expected: Self::LEN,
            found: values.len(),
        })?;
        Ok(Timings { raw })
    }
}

impl Index<Slot> for Timings {
    type Output = u32;

    fn index(&self, slot: Slot) -> &Self::Output {
        &self.raw[slot as usize]
    }
}
