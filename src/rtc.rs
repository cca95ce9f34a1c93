/*!
The interface between [`DateTime`](crate::DateTime) values and RTC
hardware.

This crate deliberately contains no bus code. A chip driver brings its
own I²C or SPI transport and implements [`Rtc`] on top of it; what this
module provides is the part every such driver shares, namely the
[`TimeRegisters`] image that maps the chips' common seven-register BCD
layout to and from a `DateTime`.
*/

use crate::{bcd, datetime::DateTime};

/// A real-time clock that can be set and read.
///
/// The error type is the implementor's own, typically the underlying bus
/// error. Methods take `&mut self` because talking to a chip usually
/// means driving a bus peripheral.
pub trait Rtc {
    /// The error produced by the underlying transport.
    type Error;

    /// Initializes the device. Called once before any other method.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Sets the clock to the given value.
    fn adjust(&mut self, dt: &DateTime) -> Result<(), Self::Error>;

    /// Reads the current time.
    fn now(&mut self) -> Result<DateTime, Self::Error>;

    /// Reports whether the oscillator is running.
    fn is_running(&mut self) -> Result<bool, Self::Error>;

    /// Reports whether the device lost power since the clock was last
    /// set, meaning [`now`](Rtc::now) cannot be trusted until
    /// [`adjust`](Rtc::adjust) is called.
    fn lost_power(&mut self) -> Result<bool, Self::Error>;
}

/// The seven-byte BCD register image common to the supported chip
/// families.
///
/// The layout, in register order, is `[second, minute, hour, weekday,
/// day, month, year]`, each field in BCD and the year stored as an
/// offset from 2000. Chip-specific control bits (oscillator halt,
/// century, 12/24-hour mode) are the driver's business; this type
/// assumes they have been masked off before decoding and are zero after
/// encoding.
///
/// # Example
///
/// ```
/// use rtclib::{DateTime, TimeRegisters};
///
/// let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
/// let regs = TimeRegisters::encode(&dt);
/// assert_eq!(regs.0, [0x56, 0x34, 0x18, 0x04, 0x16, 0x04, 0x20]);
/// assert_eq!(regs.decode(), dt);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeRegisters(pub [u8; 7]);

impl TimeRegisters {
    /// Encodes a `DateTime` into the register image, computing the
    /// weekday register from the date.
    pub fn encode(dt: &DateTime) -> TimeRegisters {
        trace!("encoding {dt:?} into time registers");
        TimeRegisters([
            bcd::bin2bcd(dt.second()),
            bcd::bin2bcd(dt.minute()),
            bcd::bin2bcd(dt.hour()),
            bcd::bin2bcd(dt.weekday()),
            bcd::bin2bcd(dt.day()),
            bcd::bin2bcd(dt.month()),
            bcd::bin2bcd((dt.year() % 100) as u8),
        ])
    }

    /// Decodes the register image into a `DateTime`.
    ///
    /// The weekday register is ignored; the weekday of the result is
    /// derived from the date, so a chip with a misprogrammed weekday
    /// register still reads consistently. As everywhere else, a garbage
    /// image decodes to a garbage `DateTime` for
    /// [`is_valid`](DateTime::is_valid) to flag, never to a panic.
    pub fn decode(&self) -> DateTime {
        let TimeRegisters([second, minute, hour, _, day, month, year]) =
            *self;
        let dt = DateTime::new(
            2000 + bcd::bcd2bin(year) as u16,
            bcd::bcd2bin(month),
            bcd::bcd2bin(day),
            bcd::bcd2bin(hour),
            bcd::bcd2bin(minute),
            bcd::bcd2bin(second),
        );
        trace!("decoded time registers {:02x?} to {dt:?}", self.0);
        dt
    }
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    #[test]
    fn register_roundtrip() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        let regs = TimeRegisters::encode(&dt);
        assert_eq!(regs.0, [0x56, 0x34, 0x18, 0x04, 0x16, 0x04, 0x20]);
        assert_eq!(regs.decode(), dt);
    }

    #[test]
    fn decode_ignores_weekday_register() {
        let mut regs =
            TimeRegisters::encode(&DateTime::new(2020, 4, 16, 18, 34, 56));
        regs.0[3] = 0x01;
        assert_eq!(regs.decode().weekday(), 4);
    }

    #[test]
    fn garbage_registers_decode_invalid() {
        let regs = TimeRegisters([0xff; 7]);
        assert!(!regs.decode().is_valid());
    }

    quickcheck::quickcheck! {
        fn prop_register_roundtrip(dt: DateTime) -> bool {
            TimeRegisters::encode(&dt).decode() == dt
        }
    }

    /// A fake chip backed by a register array, the way a driver test
    /// harness would stub out the bus.
    struct FakeRtc {
        registers: TimeRegisters,
        running: bool,
        power_was_lost: bool,
        log: Vec<&'static str>,
    }

    impl FakeRtc {
        fn new() -> FakeRtc {
            FakeRtc {
                registers: TimeRegisters([0; 7]),
                running: false,
                power_was_lost: true,
                log: Vec::new(),
            }
        }
    }

    impl Rtc for FakeRtc {
        type Error = core::convert::Infallible;

        fn begin(&mut self) -> Result<(), Self::Error> {
            self.log.push("begin");
            Ok(())
        }

        fn adjust(&mut self, dt: &DateTime) -> Result<(), Self::Error> {
            self.log.push("adjust");
            self.registers = TimeRegisters::encode(dt);
            self.running = true;
            self.power_was_lost = false;
            Ok(())
        }

        fn now(&mut self) -> Result<DateTime, Self::Error> {
            self.log.push("now");
            Ok(self.registers.decode())
        }

        fn is_running(&mut self) -> Result<bool, Self::Error> {
            Ok(self.running)
        }

        fn lost_power(&mut self) -> Result<bool, Self::Error> {
            Ok(self.power_was_lost)
        }
    }

    #[test]
    fn driver_flow() {
        let mut rtc = FakeRtc::new();
        rtc.begin().unwrap();
        assert!(rtc.lost_power().unwrap());
        assert!(!rtc.is_running().unwrap());

        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        rtc.adjust(&dt).unwrap();
        assert!(!rtc.lost_power().unwrap());
        assert!(rtc.is_running().unwrap());
        assert_eq!(rtc.now().unwrap(), dt);

        assert_eq!(rtc.log, ["begin", "adjust", "now"]);
    }
}
