//! Simulated bus for driver tests: a virtual microsecond clock, a wire that
//! records every level it is driven to, and scripted device responses.

use crate::{IoWire, Slot, Timings};
use core::{
    cell::{Cell, RefCell},
    convert::Infallible,
};
use embedded_hal::delay::DelayNs;
use std::{collections::VecDeque, rc::Rc, vec::Vec};

#[derive(Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    fn advance(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

/// Delay that only moves the virtual clock
pub struct SimDelay {
    clock: Clock,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(ns.div_ceil(1_000) as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.advance(us as u64);
    }
}

#[derive(Default)]
struct State {
    driven_low: bool,
    /// (time, high) for every drive call
    drives: Vec<(u64, bool)>,
    /// (time, sensed high) for every read
    samples: Vec<(u64, bool)>,
    /// Levels a device forces on upcoming reads; `false` pulls the line low
    responses: VecDeque<bool>,
}

/// Open-drain line with a pull-up; a device can only pull it low
#[derive(Clone)]
pub struct SimWire {
    clock: Clock,
    state: Rc<RefCell<State>>,
}

impl SimWire {
    pub fn new() -> (Self, SimDelay) {
        let clock = Clock::default();
        let wire = SimWire {
            clock: clock.clone(),
            state: Rc::default(),
        };
        (wire, SimDelay { clock })
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Queue device behaviour for the next reads, one entry per read
    pub fn respond(&self, levels: &[bool]) {
        self.state.borrow_mut().responses.extend(levels.iter().copied());
    }

    pub fn drives(&self) -> Vec<(u64, bool)> {
        self.state.borrow().drives.clone()
    }

    pub fn samples(&self) -> Vec<(u64, bool)> {
        self.state.borrow().samples.clone()
    }

    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.drives.clear();
        state.samples.clear();
        state.responses.clear();
    }

    /// (start, duration) of every interval the master held the line low,
    /// repeated drives to the same level merged
    pub fn low_pulses(&self) -> Vec<(u64, u64)> {
        let mut pulses = Vec::new();
        let mut started = None;
        for (at, high) in self.drives() {
            match (started, high) {
                (None, false) => started = Some(at),
                (Some(start), true) => {
                    pulses.push((start, at - start));
                    started = None;
                }
                _ => {}
            }
        }
        pulses
    }

    /// Bits the master wrote, told apart by low pulse width
    pub fn written_bits(&self, timings: &Timings) -> Vec<bool> {
        self.low_pulses()
            .into_iter()
            .map(|(_, width)| width <= timings[Slot::Write1] as u64)
            .collect()
    }
}

impl IoWire for SimWire {
    type Error = Infallible;

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut state = self.state.borrow_mut();
        let device_high = state.responses.pop_front().unwrap_or(true);
        let high = !state.driven_low && device_high;
        state.samples.push((self.clock.now(), high));
        Ok(high)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.driven_low = true;
        state.drives.push((self.clock.now(), false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.driven_low = false;
        state.drives.push((self.clock.now(), true));
        Ok(())
    }
}
