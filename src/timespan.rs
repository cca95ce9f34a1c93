use crate::fmt::TimestampString;

/// A signed span of time with second precision.
///
/// A `TimeSpan` is a thin wrapper around a signed 32-bit count of seconds,
/// which is the sole source of truth. The [`days`](TimeSpan::days),
/// [`hours`](TimeSpan::hours), [`minutes`](TimeSpan::minutes) and
/// [`seconds`](TimeSpan::seconds) accessors are derived from it on every
/// call, never stored.
///
/// # Negative spans
///
/// The decomposed accessors use truncating (toward zero) division, the
/// same convention a C `int32_t` uses. That means every component of a
/// negative span is negative or zero:
///
/// ```
/// use rtclib::TimeSpan;
///
/// let span = TimeSpan::from_seconds(-93_784);
/// assert_eq!(span.days(), -1);
/// assert_eq!(span.hours(), -2);
/// assert_eq!(span.minutes(), -3);
/// assert_eq!(span.seconds(), -4);
/// ```
///
/// # Overflow
///
/// The `+` and `-` operators wrap on 32-bit overflow, matching the
/// storage the RTC driver lineage of this crate has always used. Use
/// [`TimeSpan::checked_add`] and [`TimeSpan::checked_sub`] when overflow
/// should be surfaced instead.
///
/// # Example
///
/// ```
/// use rtclib::TimeSpan;
///
/// let span = TimeSpan::new(1, 2, 3, 4);
/// assert_eq!(span.total_seconds(), 93_784);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimeSpan {
    seconds: i32,
}

impl TimeSpan {
    /// A span of zero length.
    pub const ZERO: TimeSpan = TimeSpan::from_seconds(0);

    /// Creates a new `TimeSpan` from a number of days, hours, minutes and
    /// seconds.
    ///
    /// The components are simply summed into a total second count; they
    /// do not need to be "in range" of one another. `TimeSpan::new(0, 0,
    /// 90, 0)` is a perfectly good hour and a half.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::TimeSpan;
    ///
    /// let span = TimeSpan::new(0, 3, 45, 0);
    /// assert_eq!(span.total_seconds(), 13_500);
    /// ```
    #[inline]
    pub const fn new(
        days: i16,
        hours: i8,
        minutes: i8,
        seconds: i8,
    ) -> TimeSpan {
        TimeSpan {
            seconds: (days as i32)
                .wrapping_mul(86_400)
                .wrapping_add((hours as i32).wrapping_mul(3_600))
                .wrapping_add((minutes as i32).wrapping_mul(60))
                .wrapping_add(seconds as i32),
        }
    }

    /// Creates a new `TimeSpan` directly from a signed total of seconds.
    #[inline]
    pub const fn from_seconds(seconds: i32) -> TimeSpan {
        TimeSpan { seconds }
    }

    /// Returns the whole-day component of this span.
    #[inline]
    pub const fn days(self) -> i16 {
        (self.seconds / 86_400) as i16
    }

    /// Returns the hour component of this span, in `-23..=23`.
    ///
    /// This is not the total number of hours; the days are excluded.
    #[inline]
    pub const fn hours(self) -> i8 {
        (self.seconds / 3_600 % 24) as i8
    }

    /// Returns the minute component of this span, in `-59..=59`.
    #[inline]
    pub const fn minutes(self) -> i8 {
        (self.seconds / 60 % 60) as i8
    }

    /// Returns the second component of this span, in `-59..=59`.
    #[inline]
    pub const fn seconds(self) -> i8 {
        (self.seconds % 60) as i8
    }

    /// Returns the total number of seconds in this span.
    ///
    /// This is the single stored value that every other accessor is
    /// derived from.
    #[inline]
    pub const fn total_seconds(self) -> i32 {
        self.seconds
    }

    /// Adds two spans, returning `None` on 32-bit overflow.
    #[inline]
    pub const fn checked_add(self, rhs: TimeSpan) -> Option<TimeSpan> {
        match self.seconds.checked_add(rhs.seconds) {
            Some(seconds) => Some(TimeSpan { seconds }),
            None => None,
        }
    }

    /// Subtracts a span, returning `None` on 32-bit overflow.
    #[inline]
    pub const fn checked_sub(self, rhs: TimeSpan) -> Option<TimeSpan> {
        match self.seconds.checked_sub(rhs.seconds) {
            Some(seconds) => Some(TimeSpan { seconds }),
            None => None,
        }
    }
}

/// Adds two spans. Wraps on 32-bit overflow.
impl core::ops::Add for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn add(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan { seconds: self.seconds.wrapping_add(rhs.seconds) }
    }
}

/// Subtracts one span from another. Wraps on 32-bit overflow.
impl core::ops::Sub for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn sub(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan { seconds: self.seconds.wrapping_sub(rhs.seconds) }
    }
}

/// Negates a span. `i32::MIN` wraps to itself.
impl core::ops::Neg for TimeSpan {
    type Output = TimeSpan;

    #[inline]
    fn neg(self) -> TimeSpan {
        TimeSpan { seconds: self.seconds.wrapping_neg() }
    }
}

/// Renders the decomposed form, e.g. `1d 2h 3m 4s`.
impl core::fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use core::fmt::Write;

        // Render into a stack buffer first so that the formatter's
        // width and alignment options apply to the whole string. The
        // buffer is sized for the worst case, so these writes cannot
        // actually fail.
        let mut buf = TimestampString::new();
        if self.seconds < 0 {
            write!(buf, "-")?;
        }
        let days = self.days().unsigned_abs();
        let hours = self.hours().unsigned_abs();
        let minutes = self.minutes().unsigned_abs();
        let seconds = self.seconds().unsigned_abs();
        if days > 0 {
            write!(buf, "{days}d ")?;
        }
        if days > 0 || hours > 0 {
            write!(buf, "{hours}h ")?;
        }
        if days > 0 || hours > 0 || minutes > 0 {
            write!(buf, "{minutes}m ")?;
        }
        write!(buf, "{seconds}s")?;
        f.write_str(buf.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TimeSpan {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.seconds)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TimeSpan {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<TimeSpan, D::Error> {
        let seconds = <i32 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(TimeSpan::from_seconds(seconds))
    }
}

/// A trait for enabling concise `TimeSpan` construction from integer
/// literals.
///
/// # Example
///
/// ```
/// use rtclib::{TimeSpan, ToTimeSpan};
///
/// assert_eq!(2.days(), TimeSpan::new(2, 0, 0, 0));
/// assert_eq!(3.hours(), TimeSpan::from_seconds(10_800));
/// assert_eq!(90.minutes(), TimeSpan::from_seconds(5_400));
/// ```
pub trait ToTimeSpan: Sized {
    /// Creates a span of this many days.
    fn days(self) -> TimeSpan;

    /// Creates a span of this many hours.
    fn hours(self) -> TimeSpan;

    /// Creates a span of this many minutes.
    fn minutes(self) -> TimeSpan;

    /// Creates a span of this many seconds.
    fn seconds(self) -> TimeSpan;
}

macro_rules! impl_to_timespan {
    ($($ty:ty),*) => {
        $(
            impl ToTimeSpan for $ty {
                #[inline]
                fn days(self) -> TimeSpan {
                    TimeSpan::from_seconds(
                        (self as i32).wrapping_mul(86_400),
                    )
                }

                #[inline]
                fn hours(self) -> TimeSpan {
                    TimeSpan::from_seconds(
                        (self as i32).wrapping_mul(3_600),
                    )
                }

                #[inline]
                fn minutes(self) -> TimeSpan {
                    TimeSpan::from_seconds((self as i32).wrapping_mul(60))
                }

                #[inline]
                fn seconds(self) -> TimeSpan {
                    TimeSpan::from_seconds(self as i32)
                }
            }
        )*
    };
}

impl_to_timespan!(i8, i16, i32);

#[cfg(test)]
impl quickcheck::Arbitrary for TimeSpan {
    fn arbitrary(g: &mut quickcheck::Gen) -> TimeSpan {
        use quickcheck::Arbitrary;
        TimeSpan::from_seconds(i32::arbitrary(g))
    }

    fn shrink(&self) -> std::boxed::Box<dyn Iterator<Item = TimeSpan>> {
        use quickcheck::Arbitrary;
        std::boxed::Box::new(
            self.seconds.shrink().map(TimeSpan::from_seconds),
        )
    }
}
