#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

mod crc;
mod critical;
mod delay;
mod driver;
mod iowire;
mod result;
#[cfg(test)]
mod sim;
mod timings;

pub use crc::{check_crc8, crc8, crc8_update};
pub use delay::{BusyWait, MicrosClock};
pub use driver::Driver;
pub use iowire::{Inverted, IoWire};
pub use result::{ArityError, Error};
pub use timings::{Slot, Timings};
