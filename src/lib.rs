/*!
rtclib provides the civil-time value types and calendar math shared by
real-time-clock (RTC) drivers.

The two principal types in this crate are [`DateTime`], a broken-down
civil timestamp in the years 2000 through 2099, and [`TimeSpan`], a signed
duration with second precision. Around them sit the conversions every RTC
driver needs: civil fields to and from a linear second count
([`DateTime::unix_time`]), day-of-week computation, binary⇄BCD conversion
at the register boundary ([`bcd`]), and fixed-width textual formatting and
parsing.

# Examples

Convert between civil fields and Unix time:

```
use rtclib::DateTime;

let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
assert!(dt.is_valid());
assert_eq!(dt.unix_time(), 1_587_062_096);
assert_eq!(DateTime::from_unix_time(1_587_062_096), dt);
```

Do arithmetic with durations:

```
use rtclib::{DateTime, TimeSpan, ToTimeSpan};

let dt = DateTime::new(2020, 2, 28, 23, 0, 0);
let later = dt + 2.hours();
// 2020 is a leap year, so this lands on February 29.
assert_eq!(later, DateTime::new(2020, 2, 29, 1, 0, 0));
assert_eq!(later - dt, TimeSpan::from_seconds(7200));
```

Format a timestamp without allocating:

```
use rtclib::{DateTime, TimestampFormat};

let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
assert_eq!(dt.timestamp(TimestampFormat::Full), "2020-04-16T18:34:56");

let mut buf = String::from("DDD, DD MMM YYYY hh:mm:ss");
dt.format(buf.as_mut_str());
assert_eq!(buf, "Thu, 16 Apr 2020 18:34:56");
```

# Validity

Unlike most datetime libraries, construction of a [`DateTime`] never
fails and never clamps. RTC hardware can hand back any bit pattern at
all (a dead coin cell is enough), and drivers want to read first and
judge later. A tuple like February 31st flows through construction,
arithmetic and comparison untouched; [`DateTime::is_valid`] is the one
and only validity gate. No operation in this crate panics, whatever the
input.

# Usage

rtclib is `no_std` and never allocates. It works on stable Rust 1.70 or
newer.

# Crate features

* **std** (enabled by default) -
  Currently only used to implement the `std::error::Error` trait for
  this crate's error type.
* **logging** -
  Emits messages at the hardware register boundary via the [`log`]
  crate facade.
* **serde** -
  Implements `Serialize` and `Deserialize` for [`DateTime`] (as an
  ISO 8601 string) and [`TimeSpan`] (as its total seconds).

[`log`]: https://docs.rs/log
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use crate::{
    datetime::{DateTime, SECONDS_FROM_1970_TO_2000},
    error::Error,
    fmt::{TimestampFormat, TimestampString},
    rtc::{Rtc, TimeRegisters},
    timespan::{TimeSpan, ToTimeSpan},
};

#[macro_use]
mod logging;

pub mod bcd;
mod calendar;
mod datetime;
mod error;
mod fmt;
pub mod rtc;
mod timespan;
