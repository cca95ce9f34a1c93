use crate::{
    calendar,
    error::Error,
    fmt::{TimestampFormat, TimestampString},
    timespan::TimeSpan,
};

/// The number of seconds from 1970-01-01 to 2000-01-01.
///
/// This constant relates Unix time to this crate's internal
/// "seconds-time": `unix_time() == seconds_time() +
/// SECONDS_FROM_1970_TO_2000` for every `DateTime`.
pub const SECONDS_FROM_1970_TO_2000: u32 = 946_684_800;

/// A broken-down civil timestamp in the years 2000 through 2099.
///
/// A `DateTime` corresponds to a (year, month, day, hour, minute, second)
/// tuple with no notion of time zone, daylight saving time or leap
/// seconds. It is the value type RTC chip drivers read from and write to
/// the hardware, and the unit software-emulated clocks keep as their
/// baseline.
///
/// # Construction never fails
///
/// None of the constructors validate or clamp their input. An RTC with a
/// drained backup battery will happily report February 31st, and drivers
/// need to be able to represent what the chip said before deciding what
/// to do about it. A `DateTime` holding an impossible tuple behaves like
/// any other under arithmetic, comparison and formatting;
/// [`DateTime::is_valid`] is the one validity gate, and years outside
/// 2000–2099 are always invalid.
///
/// # Comparisons
///
/// `DateTime` values compare lexicographically by their civil fields,
/// which for valid values agrees exactly with comparing
/// [`unix_time`](DateTime::unix_time):
///
/// ```
/// use rtclib::DateTime;
///
/// let d1 = DateTime::new(2024, 3, 11, 0, 0, 0);
/// let d2 = DateTime::new(2025, 1, 31, 0, 0, 0);
/// assert!(d1 < d2);
/// assert!(d1.unix_time() < d2.unix_time());
/// ```
///
/// # Arithmetic
///
/// Adding or subtracting a [`TimeSpan`] goes through Unix time and wraps
/// on 32-bit overflow, as does subtracting two `DateTime`s:
///
/// ```
/// use rtclib::{DateTime, TimeSpan, ToTimeSpan};
///
/// let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
/// assert_eq!(dt + 1.days(), DateTime::new(2020, 4, 17, 18, 34, 56));
/// assert_eq!(
///     dt - DateTime::new(2020, 4, 15, 18, 34, 56),
///     TimeSpan::new(1, 0, 0, 0),
/// );
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DateTime {
    // Derived comparison order relies on this field order.
    year_offset: u8,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl DateTime {
    /// The earliest representable valid value, 2000-01-01 00:00:00.
    ///
    /// This is also the `Default` value.
    pub const MIN: DateTime = DateTime::new(2000, 1, 1, 0, 0, 0);

    /// The latest representable valid value, 2099-12-31 23:59:59.
    pub const MAX: DateTime = DateTime::new(2099, 12, 31, 23, 59, 59);

    /// Creates a new `DateTime` from its civil fields.
    ///
    /// A `year` of 2000 or greater is normalized by subtracting 2000; a
    /// smaller value is taken as an already-normalized offset from 2000.
    /// So `DateTime::new(2020, …)` and `DateTime::new(20, …)` denote the
    /// same instant. No other normalization or range checking happens:
    /// an impossible tuple is stored as given and flagged only by
    /// [`DateTime::is_valid`].
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
    /// assert_eq!(dt.year(), 2020);
    /// assert_eq!(dt.month(), 4);
    /// assert_eq!(dt.day(), 16);
    /// assert!(dt.is_valid());
    ///
    /// // February 31st constructs fine and fails validation.
    /// let bogus = DateTime::new(2020, 2, 31, 0, 0, 0);
    /// assert!(!bogus.is_valid());
    /// ```
    #[inline]
    pub const fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> DateTime {
        let year_offset =
            if year >= 2000 { (year - 2000) as u8 } else { year as u8 };
        DateTime { year_offset, month, day, hour, minute, second }
    }

    /// Creates a new `DateTime` from a count of seconds since
    /// 1970-01-01 00:00:00, i.e. [Unix time].
    ///
    /// Two departures from Unix time proper: the count is unsigned, so
    /// there is no year-2038 problem, and the epoch is at 00:00:00 in
    /// whatever zone the caller runs their clock in, since this crate has
    /// no notion of time zones.
    ///
    /// The subtraction of the 1970→2000 offset wraps, so a count before
    /// 2000-01-01 produces an invalid `DateTime` rather than a panic.
    ///
    /// [Unix time]: https://en.wikipedia.org/wiki/Unix_time
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// let dt = DateTime::from_unix_time(946_684_800);
    /// assert_eq!(dt, DateTime::new(2000, 1, 1, 0, 0, 0));
    ///
    /// let dt = DateTime::from_unix_time(1_587_062_096);
    /// assert_eq!(dt, DateTime::new(2020, 4, 16, 18, 34, 56));
    /// ```
    #[inline]
    pub const fn from_unix_time(unix: u32) -> DateTime {
        let seconds = unix.wrapping_sub(SECONDS_FROM_1970_TO_2000);
        let (year_offset, month, day, hour, minute, second) =
            calendar::civil_from_seconds(seconds);
        DateTime { year_offset, month, day, hour, minute, second }
    }

    /// Creates a new `DateTime` from the compiler's build-time strings.
    ///
    /// The expected formats are the ones C compilers put in `__DATE__`
    /// and `__TIME__`, e.g. `"Apr 16 2020"` and `"18:34:56"`. The day of
    /// the month is space-padded in that format (`"Apr  6 2020"`); that
    /// reads correctly here. The month is resolved from the first three
    /// letters of its English abbreviation.
    ///
    /// Parsing is positional and lenient: missing or non-digit
    /// characters read as zero, and an unrecognized month abbreviation
    /// stores month zero. Either way the result fails
    /// [`DateTime::is_valid`] rather than panicking.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// let dt = DateTime::from_build_time("Dec 26 2009", "12:34:56");
    /// assert_eq!(dt, DateTime::new(2009, 12, 26, 12, 34, 56));
    /// ```
    pub fn from_build_time(date: &str, time: &str) -> DateTime {
        let date = date.as_bytes();
        let time = time.as_bytes();
        // Jan Feb Mar Apr May Jun Jul Aug Sep Oct Nov Dec
        let month = match date.first().copied().unwrap_or(0) {
            b'J' => {
                if date.get(1) == Some(&b'a') {
                    1
                } else if date.get(2) == Some(&b'n') {
                    6
                } else {
                    7
                }
            }
            b'F' => 2,
            b'A' => {
                if date.get(2) == Some(&b'r') {
                    4
                } else {
                    8
                }
            }
            b'M' => {
                if date.get(2) == Some(&b'r') {
                    3
                } else {
                    5
                }
            }
            b'S' => 9,
            b'O' => 10,
            b'N' => 11,
            b'D' => 12,
            _ => 0,
        };
        DateTime {
            year_offset: conv2d(date, 9),
            month,
            day: conv2d(date, 4),
            hour: conv2d(time, 0),
            minute: conv2d(time, 3),
            second: conv2d(time, 6),
        }
    }

    /// Creates a new `DateTime` from an ISO 8601 combined string such as
    /// `"2020-06-25T15:29:37"`.
    ///
    /// The parse is a positional overwrite of the template
    /// `"2000-01-01T00:00:00"`: however many bytes the input supplies
    /// replace the leading bytes of the template, and the fields are then
    /// read from their fixed offsets. A shorter input therefore fills in
    /// only the leading fields. Only the two-digit year offset is
    /// honored; the century digits are ignored, so the year must be in
    /// 2000–2099 for the result to mean what the string said.
    ///
    /// For a checked parse of exactly this format, use the `FromStr`
    /// implementation (`"…".parse::<DateTime>()`) instead.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// let dt = DateTime::from_iso8601("2020-06-25T15:29:37");
    /// assert_eq!(dt, DateTime::new(2020, 6, 25, 15, 29, 37));
    ///
    /// // A truncated input overwrites only the leading fields.
    /// let dt = DateTime::from_iso8601("2020-06");
    /// assert_eq!(dt, DateTime::new(2020, 6, 1, 0, 0, 0));
    /// ```
    pub fn from_iso8601(s: &str) -> DateTime {
        let mut template = *b"2000-01-01T00:00:00";
        let s = s.as_bytes();
        let n = s.len().min(template.len());
        template[..n].copy_from_slice(&s[..n]);
        DateTime {
            year_offset: conv2d(&template, 2),
            month: conv2d(&template, 5),
            day: conv2d(&template, 8),
            hour: conv2d(&template, 11),
            minute: conv2d(&template, 14),
            second: conv2d(&template, 17),
        }
    }

    /// Returns the full Gregorian year, e.g. `2020`.
    #[inline]
    pub const fn year(&self) -> u16 {
        2000 + self.year_offset as u16
    }

    /// Returns the month, `1..=12` for a valid value.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month, `1..=31` for a valid value.
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the hour, `0..=23` for a valid value.
    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute, `0..=59` for a valid value.
    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the second, `0..=59` for a valid value.
    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Returns the hour on a 12-hour clock, `1..=12`.
    ///
    /// Midnight and noon both return 12; [`DateTime::is_pm`] tells them
    /// apart.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// assert_eq!(DateTime::new(2020, 1, 1, 0, 0, 0).twelve_hour(), 12);
    /// assert_eq!(DateTime::new(2020, 1, 1, 12, 0, 0).twelve_hour(), 12);
    /// assert_eq!(DateTime::new(2020, 1, 1, 13, 0, 0).twelve_hour(), 1);
    /// ```
    #[inline]
    pub const fn twelve_hour(&self) -> u8 {
        if self.hour == 0 || self.hour == 12 {
            12
        } else if self.hour > 12 {
            self.hour - 12
        } else {
            self.hour
        }
    }

    /// Returns true in the afternoon, i.e. for hours `12..=23`.
    #[inline]
    pub const fn is_pm(&self) -> bool {
        self.hour >= 12
    }

    /// Returns the day of the week, with 0=Sunday through 6=Saturday.
    ///
    /// # Example
    ///
    /// 2000-01-01 was a Saturday:
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// assert_eq!(DateTime::new(2000, 1, 1, 0, 0, 0).weekday(), 6);
    /// assert_eq!(DateTime::new(2000, 1, 2, 0, 0, 0).weekday(), 0);
    /// ```
    #[inline]
    pub const fn weekday(&self) -> u8 {
        calendar::day_of_week(self.year(), self.month, self.day)
    }

    /// Returns this value as a count of seconds since
    /// 1970-01-01 00:00:00.
    ///
    /// This is the converse of [`DateTime::from_unix_time`]. For an
    /// invalid value the count is garbage, though still a fixed function
    /// of the fields.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// let dt = DateTime::new(2000, 1, 1, 0, 0, 0);
    /// assert_eq!(dt.unix_time(), 946_684_800);
    /// ```
    #[inline]
    pub const fn unix_time(&self) -> u32 {
        self.seconds_time().wrapping_add(SECONDS_FROM_1970_TO_2000)
    }

    /// Returns this value as a count of seconds since
    /// 2000-01-01 00:00:00, this crate's internal epoch.
    ///
    /// `unix_time() == seconds_time() + SECONDS_FROM_1970_TO_2000`.
    #[inline]
    pub const fn seconds_time(&self) -> u32 {
        let days =
            calendar::days_since_epoch(self.year(), self.month, self.day);
        calendar::time_to_seconds(days, self.hour, self.minute, self.second)
    }

    /// Returns true when this value denotes a real calendar date and
    /// clock time in 2000-01-01 through 2099-12-31.
    ///
    /// This is the sole validity signal in the crate: a year offset of
    /// 100 or more fails immediately, and everything else is checked by
    /// round-tripping through [`unix_time`](DateTime::unix_time) and
    /// comparing all six fields. Impossible day-of-month/month
    /// combinations shift under the round trip and so compare unequal.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// assert!(DateTime::new(2000, 2, 29, 0, 0, 0).is_valid());
    /// assert!(!DateTime::new(2001, 2, 29, 0, 0, 0).is_valid());
    /// assert!(!DateTime::new(2100, 1, 1, 0, 0, 0).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        if self.year_offset >= 100 {
            return false;
        }
        *self == DateTime::from_unix_time(self.unix_time())
    }

    /// Renders this value in one of the predefined
    /// [`TimestampFormat`]s, without allocating.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::{DateTime, TimestampFormat};
    ///
    /// let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
    /// assert_eq!(dt.timestamp(TimestampFormat::Full), "2020-04-16T18:34:56");
    /// assert_eq!(dt.timestamp(TimestampFormat::Date), "2020-04-16");
    /// assert_eq!(dt.timestamp(TimestampFormat::Time), "18:34:56");
    /// ```
    pub fn timestamp(&self, format: TimestampFormat) -> TimestampString {
        use core::fmt::Write;

        let mut buf = TimestampString::new();
        let result = match format {
            TimestampFormat::Time => write!(
                buf,
                "{:02}:{:02}:{:02}",
                self.hour, self.minute, self.second
            ),
            TimestampFormat::Date => write!(
                buf,
                "{}-{:02}-{:02}",
                self.year(),
                self.month,
                self.day
            ),
            TimestampFormat::Full => write!(
                buf,
                "{}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year(),
                self.month,
                self.day,
                self.hour,
                self.minute,
                self.second
            ),
        };
        // The buffer is sized for the numeric maximum of every field.
        debug_assert!(result.is_ok());
        buf
    }

    /// Writes this value into a caller-provided template, in place.
    ///
    /// The template may contain any of the following fixed-width tokens,
    /// each of which is overwritten byte-for-byte; everything else is
    /// left untouched:
    ///
    /// | token  | output                                          |
    /// |--------|-------------------------------------------------|
    /// | `YYYY` | the 4-digit year (`2000`–`2099`)                |
    /// | `YY`   | the 2-digit year (`00`–`99`)                    |
    /// | `MM`   | the 2-digit month (`01`–`12`)                   |
    /// | `MMM`  | the abbreviated month name (`Jan`–`Dec`)        |
    /// | `DD`   | the 2-digit day (`01`–`31`)                     |
    /// | `DDD`  | the abbreviated weekday name (`Sun`–`Sat`)      |
    /// | `hh`   | the 2-digit hour (`00`–`23`, or `01`–`12`)      |
    /// | `mm`   | the 2-digit minute (`00`–`59`)                  |
    /// | `ss`   | the 2-digit second (`00`–`59`)                  |
    /// | `AP`   | `AM` or `PM`                                    |
    /// | `ap`   | `am` or `pm`                                    |
    ///
    /// If `AP` or `ap` appears anywhere in the template, `hh` renders on
    /// a 12-hour clock, with midnight and noon both rendering as `12`.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
    ///
    /// let mut buf = String::from("DDD, DD MMM YYYY hh:mm:ss");
    /// dt.format(buf.as_mut_str());
    /// assert_eq!(buf, "Thu, 16 Apr 2020 18:34:56");
    ///
    /// let mut buf = String::from("hh:mm ap");
    /// dt.format(buf.as_mut_str());
    /// assert_eq!(buf, "06:34 pm");
    /// ```
    pub fn format(&self, template: &mut str) {
        // SAFETY: `render_template` only overwrites bytes that match
        // all-ASCII tokens, and only writes ASCII, so the buffer remains
        // valid UTF-8.
        crate::fmt::render_template(self, unsafe {
            template.as_bytes_mut()
        });
    }
}

/// Converts the two decimal digits at `bytes[i..i + 2]` to a number.
///
/// Mirrors the leniency the build-string and ISO parsers have always
/// had: a non-digit in the tens place reads as zero, a missing or
/// non-digit ones place contributes garbage, and nothing panics.
fn conv2d(bytes: &[u8], i: usize) -> u8 {
    let tens = match bytes.get(i) {
        Some(&b) if b.is_ascii_digit() => b - b'0',
        _ => 0,
    };
    let ones = match bytes.get(i + 1) {
        Some(&b) => b.wrapping_sub(b'0'),
        None => 0,
    };
    (10 * tens).wrapping_add(ones)
}

impl Default for DateTime {
    fn default() -> DateTime {
        DateTime::MIN
    }
}

/// Parses the exact format `YYYY-MM-DDThh:mm:ss`, strictly.
///
/// Unlike [`DateTime::from_iso8601`], this rejects inputs of the wrong
/// length, with misplaced separators, or with non-digit field characters.
/// The parsed value itself is still only checked for shape; run
/// [`DateTime::is_valid`] to reject tuples like `2025-02-29`.
impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime, Error> {
        const TEMPLATE: &[u8] = b"0000-00-00T00:00:00";

        let bytes = s.as_bytes();
        if bytes.len() != TEMPLATE.len() {
            return Err(Error::parse(
                "expected a datetime of the form YYYY-MM-DDThh:mm:ss",
                bytes.len().min(TEMPLATE.len()),
            ));
        }
        for (i, (&got, &want)) in bytes.iter().zip(TEMPLATE).enumerate() {
            match want {
                b'0' if !got.is_ascii_digit() => {
                    return Err(Error::parse("expected a digit", i));
                }
                b'-' | b'T' | b':' if got != want => {
                    return Err(Error::parse(
                        "expected a separator of the form YYYY-MM-DDThh:mm:ss",
                        i,
                    ));
                }
                _ => {}
            }
        }
        let century = conv2d(bytes, 0);
        let year = (century as u16) * 100 + (conv2d(bytes, 2) as u16);
        Ok(DateTime::new(
            year,
            conv2d(bytes, 5),
            conv2d(bytes, 8),
            conv2d(bytes, 11),
            conv2d(bytes, 14),
            conv2d(bytes, 17),
        ))
    }
}

/// Renders the full ISO 8601 combined form, `2020-04-16T18:34:56`.
impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(
            self.timestamp(TimestampFormat::Full).as_str(),
            f,
        )
    }
}

impl core::fmt::Debug for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "DateTime({self})")
    }
}

/// Adds a span to a datetime. Wraps on 32-bit overflow of the underlying
/// Unix time.
impl core::ops::Add<TimeSpan> for DateTime {
    type Output = DateTime;

    #[inline]
    fn add(self, span: TimeSpan) -> DateTime {
        DateTime::from_unix_time(
            self.unix_time().wrapping_add(span.total_seconds() as u32),
        )
    }
}

/// Subtracts a span from a datetime. Wraps on 32-bit overflow of the
/// underlying Unix time.
impl core::ops::Sub<TimeSpan> for DateTime {
    type Output = DateTime;

    #[inline]
    fn sub(self, span: TimeSpan) -> DateTime {
        DateTime::from_unix_time(
            self.unix_time().wrapping_sub(span.total_seconds() as u32),
        )
    }
}

/// Computes the span between two datetimes.
///
/// The result is negative when the subtrahend is later. Differences
/// beyond the 32-bit second range (about 68 years) wrap.
impl core::ops::Sub for DateTime {
    type Output = TimeSpan;

    #[inline]
    fn sub(self, rhs: DateTime) -> TimeSpan {
        TimeSpan::from_seconds(
            self.unix_time().wrapping_sub(rhs.unix_time()) as i32,
        )
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DateTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime, D::Error> {
        struct DateTimeVisitor;

        impl<'de> serde::de::Visitor<'de> for DateTimeVisitor {
            type Value = DateTime;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a datetime string of the form YYYY-MM-DDThh:mm:ss")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                value: &str,
            ) -> Result<DateTime, E> {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(DateTimeVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for DateTime {
    /// Generates uniformly bogus-free values: every generated `DateTime`
    /// is valid.
    fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
        use quickcheck::Arbitrary;

        let year_offset = u8::arbitrary(g) % 100;
        let leap = year_offset % 4 == 0;
        let month = u8::arbitrary(g) % 12 + 1;
        let days_in_month = match month {
            2 => 28 + leap as u8,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        };
        let day = u8::arbitrary(g) % days_in_month + 1;
        DateTime::new(
            2000 + year_offset as u16,
            month,
            day,
            u8::arbitrary(g) % 24,
            u8::arbitrary(g) % 60,
            u8::arbitrary(g) % 60,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::string::{String, ToString};

    use crate::{TimeSpan, ToTimeSpan};

    use super::*;

    #[test]
    fn epoch_anchor() {
        let _ = env_logger::try_init();

        let dt = DateTime::new(2000, 1, 1, 0, 0, 0);
        assert_eq!(dt.unix_time(), 946_684_800);
        assert_eq!(dt.seconds_time(), 0);
        assert_eq!(DateTime::from_unix_time(946_684_800), dt);
        assert_eq!(dt, DateTime::MIN);
        assert_eq!(dt, DateTime::default());
    }

    #[test]
    fn known_unix_times() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        assert_eq!(dt.unix_time(), 1_587_062_096);
        assert_eq!(dt.seconds_time(), 640_377_296);
        assert_eq!(DateTime::from_unix_time(1_587_062_096), dt);

        assert_eq!(
            DateTime::MAX.unix_time(),
            DateTime::new(2100, 1, 1, 0, 0, 0).unix_time() - 1,
        );
    }

    #[test]
    fn two_digit_year_is_an_offset() {
        assert_eq!(
            DateTime::new(20, 4, 16, 18, 34, 56),
            DateTime::new(2020, 4, 16, 18, 34, 56),
        );
    }

    #[test]
    fn weekday_anchors() {
        assert_eq!(DateTime::new(2000, 1, 1, 0, 0, 0).weekday(), 6);
        assert_eq!(DateTime::new(2000, 1, 2, 0, 0, 0).weekday(), 0);
        assert_eq!(DateTime::new(2020, 4, 16, 0, 0, 0).weekday(), 4);
    }

    #[test]
    fn leap_year_validity() {
        assert!(DateTime::new(2000, 2, 29, 0, 0, 0).is_valid());
        assert!(!DateTime::new(2001, 2, 29, 0, 0, 0).is_valid());
        assert!(DateTime::new(2096, 2, 29, 0, 0, 0).is_valid());
        assert!(!DateTime::new(2099, 2, 29, 0, 0, 0).is_valid());
    }

    #[test]
    fn invalid_tuples_flagged_not_rejected() {
        assert!(!DateTime::new(2020, 4, 31, 0, 0, 0).is_valid());
        assert!(!DateTime::new(2020, 13, 1, 0, 0, 0).is_valid());
        assert!(!DateTime::new(2020, 0, 1, 0, 0, 0).is_valid());
        assert!(!DateTime::new(2020, 1, 0, 0, 0, 0).is_valid());
        assert!(!DateTime::new(2020, 1, 1, 24, 0, 0).is_valid());
        assert!(!DateTime::new(2020, 1, 1, 0, 60, 0).is_valid());
        assert!(!DateTime::new(2020, 1, 1, 0, 0, 60).is_valid());
        assert!(!DateTime::new(2100, 1, 1, 0, 0, 0).is_valid());
        // The value is still inspectable.
        assert_eq!(DateTime::new(2020, 4, 31, 0, 0, 0).day(), 31);
    }

    #[test]
    fn pre_epoch_unix_time_is_invalid() {
        assert!(!DateTime::from_unix_time(0).is_valid());
        assert!(!DateTime::from_unix_time(946_684_799).is_valid());
        assert!(DateTime::from_unix_time(946_684_800).is_valid());
    }

    #[test]
    fn build_time_all_months() {
        let months = [
            ("Jan", 1),
            ("Feb", 2),
            ("Mar", 3),
            ("Apr", 4),
            ("May", 5),
            ("Jun", 6),
            ("Jul", 7),
            ("Aug", 8),
            ("Sep", 9),
            ("Oct", 10),
            ("Nov", 11),
            ("Dec", 12),
        ];
        for (name, number) in months {
            let date = std::format!("{name} 16 2020");
            let got = DateTime::from_build_time(&date, "18:34:56");
            assert_eq!(
                got,
                DateTime::new(2020, number, 16, 18, 34, 56),
                "for month {name}",
            );
        }
    }

    #[test]
    fn build_time_space_padded_day() {
        let dt = DateTime::from_build_time("Apr  6 2020", "08:04:02");
        assert_eq!(dt, DateTime::new(2020, 4, 6, 8, 4, 2));
    }

    #[test]
    fn build_time_garbage_is_invalid() {
        assert!(!DateTime::from_build_time("", "").is_valid());
        assert!(!DateTime::from_build_time("Xyz 01 2020", "00:00:00")
            .is_valid());
    }

    #[test]
    fn iso8601_lenient() {
        assert_eq!(
            DateTime::from_iso8601("2020-06-25T15:29:37"),
            DateTime::new(2020, 6, 25, 15, 29, 37),
        );
        // Truncated inputs fill in only the leading fields.
        assert_eq!(
            DateTime::from_iso8601("2020-06"),
            DateTime::new(2020, 6, 1, 0, 0, 0),
        );
        assert_eq!(DateTime::from_iso8601(""), DateTime::MIN);
        // Bytes past the template length are ignored.
        assert_eq!(
            DateTime::from_iso8601("2020-06-25T15:29:37.123456789Z"),
            DateTime::new(2020, 6, 25, 15, 29, 37),
        );
        // Only the two-digit year offset is honored.
        assert_eq!(
            DateTime::from_iso8601("1999-06-25T15:29:37"),
            DateTime::new(2099, 6, 25, 15, 29, 37),
        );
    }

    #[test]
    fn from_str_strict() {
        let dt: DateTime = "2020-04-16T18:34:56".parse().unwrap();
        assert_eq!(dt, DateTime::new(2020, 4, 16, 18, 34, 56));

        assert!("2020-04-16".parse::<DateTime>().is_err());
        assert!("2020-04-16 18:34:56".parse::<DateTime>().is_err());
        assert!("2020-4-16T18:34:56".parse::<DateTime>().is_err());
        assert!("2020-04-16T18:34:5x".parse::<DateTime>().is_err());
        assert!("".parse::<DateTime>().is_err());

        // Shape-checked only: impossible dates still parse and are left
        // to `is_valid`.
        let dt: DateTime = "2025-02-29T00:00:00".parse().unwrap();
        assert!(!dt.is_valid());
    }

    #[test]
    fn comparisons() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        assert_eq!(dt, DateTime::new(2020, 4, 16, 18, 34, 56));
        assert_ne!(dt, DateTime::new(2020, 4, 16, 18, 34, 57));

        assert!(DateTime::new(2020, 4, 16, 18, 34, 56) < DateTime::new(2020, 4, 16, 18, 34, 57));
        assert!(DateTime::new(2020, 4, 16, 18, 34, 56) < DateTime::new(2020, 4, 16, 18, 35, 0));
        assert!(DateTime::new(2020, 12, 31, 23, 59, 59) < DateTime::new(2021, 1, 1, 0, 0, 0));
        assert!(DateTime::MIN < DateTime::MAX);
    }

    #[test]
    fn arithmetic() {
        let dt = DateTime::new(2020, 2, 28, 23, 0, 0);
        assert_eq!(dt + 2.hours(), DateTime::new(2020, 2, 29, 1, 0, 0));
        assert_eq!(
            dt + TimeSpan::new(2, 0, 0, 0),
            DateTime::new(2020, 3, 1, 23, 0, 0),
        );
        assert_eq!(dt - 1.days(), DateTime::new(2020, 2, 27, 23, 0, 0));

        // Subtraction is signed in both directions, and February 29
        // sits inside this gap: 25 hours, not 1.
        let later = DateTime::new(2020, 3, 1, 0, 0, 0);
        assert_eq!(later - dt, TimeSpan::from_seconds(90_000));
        assert_eq!(dt - later, TimeSpan::from_seconds(-90_000));

        // In a common year the same civil gap is a single hour.
        let dt = DateTime::new(2021, 2, 28, 23, 0, 0);
        let later = DateTime::new(2021, 3, 1, 0, 0, 0);
        assert_eq!(later - dt, TimeSpan::from_seconds(3_600));
        assert_eq!(dt - later, TimeSpan::from_seconds(-3_600));
    }

    #[test]
    fn year_boundary_arithmetic() {
        let dt = DateTime::new(2020, 12, 31, 23, 59, 59);
        assert_eq!(dt + 1.seconds(), DateTime::new(2021, 1, 1, 0, 0, 0));
        assert_eq!(
            DateTime::new(2021, 1, 1, 0, 0, 0) - 1.seconds(),
            dt,
        );
    }

    #[test]
    fn display_and_debug() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        assert_eq!(dt.to_string(), "2020-04-16T18:34:56");
        assert_eq!(
            std::format!("{dt:?}"),
            "DateTime(2020-04-16T18:34:56)",
        );
    }

    #[test]
    fn timestamp_formats() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        assert_eq!(
            dt.timestamp(TimestampFormat::Full),
            "2020-04-16T18:34:56"
        );
        assert_eq!(dt.timestamp(TimestampFormat::Date), "2020-04-16");
        assert_eq!(dt.timestamp(TimestampFormat::Time), "18:34:56");

        // Zero padding.
        let dt = DateTime::new(2004, 1, 2, 3, 4, 5);
        assert_eq!(
            dt.timestamp(TimestampFormat::Full),
            "2004-01-02T03:04:05"
        );
    }

    #[test]
    fn timestamp_of_garbage_does_not_truncate() {
        let dt = DateTime::new(255, 255, 255, 255, 255, 255);
        assert_eq!(
            dt.timestamp(TimestampFormat::Full),
            "2255-255-255T255:255:255"
        );
    }

    #[test]
    fn format_template() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);

        let mut buf = String::from("DDD, DD MMM YYYY hh:mm:ss");
        dt.format(buf.as_mut_str());
        assert_eq!(buf, "Thu, 16 Apr 2020 18:34:56");

        let mut buf = String::from("YY-MM-DD");
        dt.format(buf.as_mut_str());
        assert_eq!(buf, "20-04-16");

        // Untouched characters survive, including non-token uppercase.
        let mut buf = String::from("day DD of MMM (Y2K+YY)");
        dt.format(buf.as_mut_str());
        assert_eq!(buf, "day 16 of Apr (Y2K+20)");
    }

    #[test]
    fn format_twelve_hour_mode() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        let mut buf = String::from("hh:mm:ss AP");
        dt.format(buf.as_mut_str());
        assert_eq!(buf, "06:34:56 PM");

        let mut buf = String::from("hh:mm:ss ap");
        DateTime::new(2020, 4, 16, 9, 5, 0).format(buf.as_mut_str());
        assert_eq!(buf, "09:05:00 am");

        // Midnight and noon both render as 12.
        let mut buf = String::from("hh AP");
        DateTime::new(2020, 4, 16, 0, 0, 0).format(buf.as_mut_str());
        assert_eq!(buf, "12 AM");
        let mut buf = String::from("hh AP");
        DateTime::new(2020, 4, 16, 12, 0, 0).format(buf.as_mut_str());
        assert_eq!(buf, "12 PM");

        // Without a meridiem token, hh stays on the 24-hour clock.
        let mut buf = String::from("hh");
        dt.format(buf.as_mut_str());
        assert_eq!(buf, "18");
    }

    #[test]
    fn format_preserves_multibyte_surroundings() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        let mut buf = String::from("🕒 hh:mm");
        dt.format(buf.as_mut_str());
        assert_eq!(buf, "🕒 18:34");
    }

    quickcheck::quickcheck! {
        fn prop_unix_time_roundtrip(dt: DateTime) -> bool {
            dt.is_valid()
                && DateTime::from_unix_time(dt.unix_time()) == dt
        }

        fn prop_ordering_matches_unix_time(
            dt1: DateTime,
            dt2: DateTime
        ) -> bool {
            ((dt1 < dt2) == (dt1.unix_time() < dt2.unix_time()))
                && ((dt1 == dt2) == (dt1.unix_time() == dt2.unix_time()))
        }

        fn prop_add_then_sub(dt: DateTime, span: TimeSpan) -> bool {
            (dt + span) - span == dt
        }

        fn prop_difference_restores(dt1: DateTime, dt2: DateTime) -> bool {
            dt2 + (dt1 - dt2) == dt1
        }

        fn prop_weekday_advances_daily(dt: DateTime) -> bool {
            let next = dt + TimeSpan::new(1, 0, 0, 0);
            next.weekday() == (dt.weekday() + 1) % 7
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let dt = DateTime::new(2020, 4, 16, 18, 34, 56);
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2020-04-16T18:34:56\"");
        let got: DateTime = serde_json::from_str(&json).unwrap();
        assert_eq!(got, dt);

        assert!(
            serde_json::from_str::<DateTime>("\"2020-04-16\"").is_err()
        );

        let span = TimeSpan::new(1, 2, 3, 4);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, "93784");
        let got: TimeSpan = serde_json::from_str(&json).unwrap();
        assert_eq!(got, span);
    }
}
