use crate::critical::InterruptGuard;
use crate::{ArityError, Error, IoWire, Slot, Timings};
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use log::{debug, trace};

/// Bit-banged 1-Wire master on a single line.
///
/// Every operation blocks the caller for its full slot time. Pulses that need
/// two edges a few microseconds apart run with interrupts masked.
pub struct Driver<W: IoWire> {
    io_wire: W,
    timings: Timings,
}

impl<E: Debug, W: IoWire<Error = E>> Driver<W> {
    pub fn new(io_wire: W) -> Self {
        Self::with_timings(io_wire, Timings::default())
    }

    pub fn with_timings(io_wire: W, timings: Timings) -> Self {
        Driver { io_wire, timings }
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Replaces all nine timings at once; takes effect from the next operation
    pub fn set_timings(&mut self, values: &[u32]) -> Result<(), ArityError> {
        self.timings.set(values)?;
        debug!("timings set to {:?}", self.timings.as_slice());
        Ok(())
    }

    /// Gives the wire back
    pub fn release(self) -> W {
        self.io_wire
    }

    pub fn reset_write_read(
        &mut self,
        delay: &mut impl DelayNs,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Error<E>> {
        self.ensure_presence(delay)?;
        self.write_bytes(delay, write)?;
        self.read_bytes(delay, read)?;
        Ok(())
    }

    pub fn reset_read_only(
        &mut self,
        delay: &mut impl DelayNs,
        read: &mut [u8],
    ) -> Result<(), Error<E>> {
        self.ensure_presence(delay)?;
        self.read_bytes(delay, read)?;
        Ok(())
    }

    pub fn reset_write_only(
        &mut self,
        delay: &mut impl DelayNs,
        write: &[u8],
    ) -> Result<(), Error<E>> {
        self.ensure_presence(delay)?;
        self.write_bytes(delay, write)?;
        Ok(())
    }

    /// Performs a reset and listens for a presence pulse.
    /// Returns Ok(true) if at least one device pulled the line low in
    /// the sample window. No retries.
    pub fn reset(&mut self, delay: &mut impl DelayNs) -> Result<bool, Error<E>> {
        self.set_low()?;
        delay.delay_us(self.timings[Slot::Reset1]);

        let presence = {
            let _cli = InterruptGuard::enter();
            self.set_high()?;
            delay.delay_us(self.timings[Slot::Reset2]);
            self.is_low()?
        };

        delay.delay_us(self.timings[Slot::Reset3]);
        trace!("reset, presence: {}", presence);
        Ok(presence)
    }

    /// Like [`Driver::reset`], but an empty bus is an error
    pub fn ensure_presence(&mut self, delay: &mut impl DelayNs) -> Result<(), Error<E>> {
        if self.reset(delay)? {
            Ok(())
        } else {
            Err(Error::NoPresence)
        }
    }

    pub fn read_bytes(&mut self, delay: &mut impl DelayNs, dst: &mut [u8]) -> Result<(), E> {
        for d in dst.iter_mut() {
            *d = self.read_byte(delay)?;
        }
        trace!("read {:02x?}", dst);
        Ok(())
    }

    /// Eight read slots, least significant bit first
    pub fn read_byte(&mut self, delay: &mut impl DelayNs) -> Result<u8, E> {
        let mut byte = 0_u8;
        for i in 0..8 {
            if self.read_bit(delay)? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    pub fn read_bit(&mut self, delay: &mut impl DelayNs) -> Result<bool, E> {
        self.set_high()?;

        let val = {
            let _cli = InterruptGuard::enter();
            self.set_low()?;
            delay.delay_us(self.timings[Slot::Read1]);
            self.set_high()?;
            delay.delay_us(self.timings[Slot::Read2]);
            self.is_high()?
        };

        delay.delay_us(self.timings[Slot::Read3]);
        Ok(val)
    }

    pub fn write_bytes(&mut self, delay: &mut impl DelayNs, bytes: &[u8]) -> Result<(), E> {
        for b in bytes {
            self.write_byte(delay, *b)?;
        }
        trace!("wrote {:02x?}", bytes);
        Ok(())
    }

    /// Eight write slots, least significant bit first.
    ///
    /// Only eight bits ever go on the wire; narrow wider values with `as u8`.
    pub fn write_byte(&mut self, delay: &mut impl DelayNs, byte: u8) -> Result<(), E> {
        let mut byte = byte;
        for _ in 0..8 {
            self.write_bit(delay, (byte & 0x01) == 0x01)?;
            byte >>= 1;
        }
        Ok(())
    }

    /// The level held during WRITE2 is what encodes the bit: a one releases
    /// the line right after the start edge, a zero keeps it low.
    pub fn write_bit(&mut self, delay: &mut impl DelayNs, high: bool) -> Result<(), E> {
        let _cli = InterruptGuard::enter();
        self.set_low()?;
        delay.delay_us(self.timings[Slot::Write1]);
        self.io_wire.set_level(high)?;
        delay.delay_us(self.timings[Slot::Write2]);
        self.set_high()?;
        delay.delay_us(self.timings[Slot::Write3]);
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn set_high(&mut self) -> Result<(), E> {
        self.io_wire.set_high()
    }

    #[inline(always)]
    pub(crate) fn set_low(&mut self) -> Result<(), E> {
        self.io_wire.set_low()
    }

    #[inline(always)]
    pub(crate) fn is_high(&mut self) -> Result<bool, E> {
        self.io_wire.is_high()
    }

    #[inline(always)]
    pub(crate) fn is_low(&mut self) -> Result<bool, E> {
        self.io_wire.is_low()
    }
}
