use embedded_hal::delay::DelayNs;

/// Free-running microsecond counter
pub trait MicrosClock {
    /// Current counter value. Allowed to wrap around.
    fn now_us(&self) -> u32;
}

impl<C: MicrosClock> MicrosClock for &C {
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }
}

/// Delay that spins on a [`MicrosClock`] instead of yielding.
///
/// Sleep primitives are far too coarse for 1-Wire slots, so this burns the
/// CPU for the whole wait. It blocks everything else on the core, interrupts
/// aside, and should only be used for short bus delays.
pub struct BusyWait<C> {
    clock: C,
}

impl<C: MicrosClock> BusyWait<C> {
    pub fn new(clock: C) -> Self {
        BusyWait { clock }
    }

    pub fn release(self) -> C {
        self.clock
    }

    #[inline(always)]
    pub fn spin_us(&self, us: u32) {
        let start = self.clock.now_us();
        // difference based, survives counter wrap
        while self.clock.now_us().wrapping_sub(start) < us {
            core::hint::spin_loop();
        }
    }
}

impl<C: MicrosClock> DelayNs for BusyWait<C> {
    fn delay_ns(&mut self, ns: u32) {
        self.spin_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.spin_us(us);
    }
}
