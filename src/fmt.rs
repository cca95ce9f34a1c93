/*!
Fixed-width textual formatting support.

Nothing in this module allocates. Predefined timestamps render into a
[`TimestampString`], a small stack buffer sized for the worst case a
garbage register image can produce, and the user-template formatter
overwrites the caller's buffer in place.
*/

use crate::datetime::DateTime;

pub(crate) const WEEKDAY_NAMES: &[u8; 21] = b"SunMonTueWedThuFriSat";
pub(crate) const MONTH_NAMES: &[u8; 36] =
    b"JanFebMarAprMayJunJulAugSepOctNovDec";

/// The predefined formats understood by
/// [`DateTime::timestamp`](crate::DateTime::timestamp).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimestampFormat {
    /// The date only: `YYYY-MM-DD`.
    Date,
    /// The time only: `hh:mm:ss`.
    Time,
    /// Both, ISO 8601 combined: `YYYY-MM-DDThh:mm:ss`.
    Full,
}

/// A fixed-capacity string on the stack, as returned by
/// [`DateTime::timestamp`](crate::DateTime::timestamp).
///
/// The capacity is an implementation detail; it is sized so that even a
/// `DateTime` full of out-of-range fields formats without truncation.
/// Compare it against `&str` directly, `Display` it, or take
/// [`as_str`](TimestampString::as_str).
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct TimestampString {
    /// Always valid UTF-8 in `0..len`. Only ever ASCII in practice, but
    /// nothing below depends on that.
    bytes: [u8; TimestampString::CAPACITY],
    len: u8,
}

impl TimestampString {
    /// Enough for `u16-u8-u8Tu8:u8:u8` with every field at its numeric
    /// maximum, e.g. `2255-255-255T255:255:255`.
    const CAPACITY: usize = 24;

    /// Creates a new empty string.
    pub(crate) const fn new() -> TimestampString {
        TimestampString { bytes: [0; TimestampString::CAPACITY], len: 0 }
    }

    /// Appends `s`, returning `false` without writing anything when the
    /// capacity would be exceeded.
    pub(crate) fn push_str(&mut self, s: &str) -> bool {
        let len = usize::from(self.len);
        let Some(new_len) = len.checked_add(s.len()) else { return false };
        if new_len > TimestampString::CAPACITY {
            return false;
        }
        self.bytes[len..new_len].copy_from_slice(s.as_bytes());
        // new_len <= CAPACITY < 256, so the narrowing is lossless.
        self.len = new_len as u8;
        true
    }

    /// Returns this timestamp as a string slice.
    pub fn as_str(&self) -> &str {
        // Every write path appends an entire `&str`, so the prefix is
        // valid UTF-8 by construction.
        core::str::from_utf8(&self.bytes[..usize::from(self.len)])
            .unwrap_or_default()
    }
}

impl core::fmt::Write for TimestampString {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.push_str(s) {
            Ok(())
        } else {
            Err(core::fmt::Error)
        }
    }
}

impl core::fmt::Display for TimestampString {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self.as_str(), f)
    }
}

impl core::fmt::Debug for TimestampString {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for TimestampString {
    fn eq(&self, rhs: &str) -> bool {
        self.as_str() == rhs
    }
}

impl PartialEq<&str> for TimestampString {
    fn eq(&self, rhs: &&str) -> bool {
        self.as_str() == *rhs
    }
}

impl PartialEq<TimestampString> for str {
    fn eq(&self, rhs: &TimestampString) -> bool {
        self == rhs.as_str()
    }
}

impl PartialEq<TimestampString> for &str {
    fn eq(&self, rhs: &TimestampString) -> bool {
        *self == rhs.as_str()
    }
}

/// Performs the in-place token substitution behind
/// [`DateTime::format`](crate::DateTime::format).
///
/// Tokens are fixed width and replaced byte-for-byte, so the buffer never
/// grows or shrinks. An `AP` or `ap` occurrence anywhere in the template
/// switches `hh` into 12-hour mode.
pub(crate) fn render_template(dt: &DateTime, buf: &mut [u8]) {
    let twelve_hour_mode =
        buf.windows(2).any(|w| w == b"AP" || w == b"ap");
    let hour = if twelve_hour_mode { dt.twelve_hour() } else { dt.hour() };
    let is_pm = dt.is_pm();
    let year2 = (dt.year() % 100) as u8;

    let len = buf.len();
    let mut i = 0;
    while i + 1 < len {
        let (a, b) = (buf[i], buf[i + 1]);
        let c = buf.get(i + 2).copied().unwrap_or(0);
        let d = buf.get(i + 3).copied().unwrap_or(0);

        if a == b'h' && b == b'h' {
            write2(&mut buf[i..], hour);
        }
        if a == b'm' && b == b'm' {
            write2(&mut buf[i..], dt.minute());
        }
        if a == b's' && b == b's' {
            write2(&mut buf[i..], dt.second());
        }
        if a == b'D' && b == b'D' && c == b'D' {
            // weekday() is always in 0..=6, even for garbage dates.
            let at = 3 * usize::from(dt.weekday());
            buf[i..i + 3].copy_from_slice(&WEEKDAY_NAMES[at..at + 3]);
        } else if a == b'D' && b == b'D' {
            write2(&mut buf[i..], dt.day());
        }
        if a == b'M' && b == b'M' && c == b'M' {
            // A garbage month has no name; the token is left as-is.
            if (1..=12).contains(&dt.month()) {
                let at = 3 * usize::from(dt.month() - 1);
                buf[i..i + 3].copy_from_slice(&MONTH_NAMES[at..at + 3]);
            }
        } else if a == b'M' && b == b'M' {
            write2(&mut buf[i..], dt.month());
        }
        if a == b'Y' && b == b'Y' && c == b'Y' && d == b'Y' {
            buf[i] = b'2';
            buf[i + 1] = b'0';
            write2(&mut buf[i + 2..], year2);
        } else if a == b'Y' && b == b'Y' {
            write2(&mut buf[i..], year2);
        }
        if a == b'A' && b == b'P' {
            buf[i] = if is_pm { b'P' } else { b'A' };
            buf[i + 1] = b'M';
        } else if a == b'a' && b == b'p' {
            buf[i] = if is_pm { b'p' } else { b'a' };
            buf[i + 1] = b'm';
        }

        i += 1;
    }
}

/// Overwrites two bytes with a zero-padded decimal. Values above 99 leak
/// a non-digit into the tens place, faithfully to the garbage-in
/// contract; the arithmetic still cannot overflow a byte.
#[inline]
fn write2(buf: &mut [u8], value: u8) {
    buf[0] = b'0'.wrapping_add(value / 10);
    buf[1] = b'0'.wrapping_add(value % 10);
}

#[cfg(test)]
mod tests {
    use core::fmt::Write;

    use super::*;

    #[test]
    fn push_str_respects_capacity() {
        let mut s = TimestampString::new();
        assert!(s.push_str("2020-04-16T18:34:56"));
        assert_eq!(s, "2020-04-16T18:34:56");
        assert!(s.push_str("xxxxx"));
        assert!(!s.push_str("y"));
        assert_eq!(s.as_str().len(), 24);
    }

    #[test]
    fn fmt_write() {
        let mut s = TimestampString::new();
        assert!(write!(s, "{:02}:{:02}:{:02}", 1, 2, 3).is_ok());
        assert_eq!(s, "01:02:03");
    }
}
