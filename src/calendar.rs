/*!
The core calendar algorithms on plain primitive integers.

Everything here assumes the 2000–2099 window, where "divisible by 4" alone
decides leap years and no century exception is needed. Years are handled
as offsets from 2000. The epoch for the linear day and second counts is
2000-01-01.

These routines are total: out-of-range inputs produce garbage rather than
panics. Arithmetic wraps where the inputs could overflow it, and table
lookups are guarded, so a hostile register image can never take the crate
down. Callers that care run the result through the round-trip validity
check in `DateTime::is_valid`.
*/

/// Days per month, January through November.
///
/// December is never a "prior month" within the same year, so the sum in
/// `days_since_epoch` has no use for its length.
const DAYS_IN_MONTH: [u8; 11] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30];

/// Returns true if and only if the given year offset from 2000 is a leap
/// year.
///
/// Valid for offsets `0..=99`, where divisibility by 4 is the whole rule.
#[inline]
pub(crate) const fn is_leap_year(year_offset: u8) -> bool {
    year_offset % 4 == 0
}

/// Returns the number of days in the given month (`1..=12`), accounting
/// for leap-year February.
///
/// Returns `0` for an out-of-range month so that garbage can never index
/// out of bounds.
#[inline]
pub(crate) const fn days_in_month(month: u8, leap: bool) -> u8 {
    if month == 2 {
        28 + leap as u8
    } else if month == 12 {
        31
    } else if month >= 1 && month <= 11 {
        DAYS_IN_MONTH[(month - 1) as usize]
    } else {
        0
    }
}

/// Returns the number of days elapsed from 2000-01-01 to the given civil
/// date.
///
/// A `year >= 2000` is normalized by subtracting 2000; a smaller value is
/// taken as an already-normalized offset. 2000-01-01 itself maps to `0`.
pub(crate) const fn days_since_epoch(year: u16, month: u8, day: u8) -> u16 {
    let y = if year >= 2000 { year - 2000 } else { year };
    let mut days = day as u16;
    let mut m = 1;
    while m < month {
        days = days.wrapping_add(days_in_month(m, false) as u16);
        m += 1;
    }
    // The u8 truncation preserves divisibility by 4.
    if month > 2 && is_leap_year(y as u8) {
        days = days.wrapping_add(1);
    }
    days.wrapping_add(365u16.wrapping_mul(y))
        .wrapping_add((y + 3) / 4)
        .wrapping_sub(1)
}

/// Combines a day count with a clock time into a count of seconds.
#[inline]
pub(crate) const fn time_to_seconds(days: u16, h: u8, m: u8, s: u8) -> u32 {
    ((days as u32)
        .wrapping_mul(24)
        .wrapping_add(h as u32)
        .wrapping_mul(60)
        .wrapping_add(m as u32))
    .wrapping_mul(60)
    .wrapping_add(s as u32)
}

/// Decomposes a count of seconds since 2000-01-01 into civil fields.
///
/// Returns `(year_offset, month, day, hour, minute, second)`. The inverse
/// of `days_since_epoch` plus `time_to_seconds`. The year offset exceeds
/// 99 for inputs past 2099-12-31; the caller's validity check flags those.
pub(crate) const fn civil_from_seconds(
    seconds: u32,
) -> (u8, u8, u8, u8, u8, u8) {
    let mut t = seconds;
    let second = (t % 60) as u8;
    t /= 60;
    let minute = (t % 60) as u8;
    t /= 60;
    let hour = (t % 24) as u8;
    // The full u32 range spans fewer than 2^16 days, so this cannot wrap.
    let mut days = (t / 24) as u16;

    let mut year_offset: u8 = 0;
    let mut leap;
    loop {
        leap = is_leap_year(year_offset);
        let year_days = 365 + leap as u16;
        if days < year_days {
            break;
        }
        days -= year_days;
        year_offset = year_offset.wrapping_add(1);
    }

    let mut month: u8 = 1;
    while month < 12 {
        let month_days = days_in_month(month, leap) as u16;
        if days < month_days {
            break;
        }
        days -= month_days;
        month += 1;
    }
    let day = (days + 1) as u8;

    (year_offset, month, day, hour, minute, second)
}

/// Returns the day of the week for the given civil date, with
/// 0=Sunday through 6=Saturday.
///
/// The anchor is that 2000-01-01, day zero of the epoch, was a Saturday.
#[inline]
pub(crate) const fn day_of_week(year: u16, month: u8, day: u8) -> u8 {
    ((days_since_epoch(year, month, day).wrapping_add(6)) % 7) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_anchor() {
        assert_eq!(days_since_epoch(2000, 1, 1), 0);
        assert_eq!(days_since_epoch(2000, 1, 2), 1);
        assert_eq!(days_since_epoch(2000, 3, 1), 60);
        assert_eq!(days_since_epoch(2001, 1, 1), 366);
        assert_eq!(days_since_epoch(2002, 1, 1), 731);
    }

    #[test]
    fn year_offset_and_full_year_agree() {
        assert_eq!(days_since_epoch(20, 4, 16), days_since_epoch(2020, 4, 16));
    }

    #[test]
    fn weekday_anchors() {
        // 2000-01-01 was a Saturday.
        assert_eq!(day_of_week(2000, 1, 1), 6);
        assert_eq!(day_of_week(2000, 1, 2), 0);
        assert_eq!(day_of_week(2020, 4, 16), 4); // a Thursday
        assert_eq!(day_of_week(2099, 12, 31), 4); // also a Thursday
    }

    #[test]
    fn leap_years_in_window() {
        assert!(is_leap_year(0));
        assert!(!is_leap_year(1));
        assert!(!is_leap_year(2));
        assert!(!is_leap_year(3));
        assert!(is_leap_year(4));
        assert!(is_leap_year(96));
        assert!(!is_leap_year(99));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(1, false), 31);
        assert_eq!(days_in_month(2, false), 28);
        assert_eq!(days_in_month(2, true), 29);
        assert_eq!(days_in_month(4, false), 30);
        assert_eq!(days_in_month(12, false), 31);
        // Out-of-range months have zero days rather than a panic.
        assert_eq!(days_in_month(0, false), 0);
        assert_eq!(days_in_month(13, true), 0);
    }

    #[test]
    fn roundtrip_all_dates_in_window() {
        for year_offset in 0..=99u8 {
            let leap = is_leap_year(year_offset);
            for month in 1..=12u8 {
                for day in 1..=days_in_month(month, leap) {
                    let days = days_since_epoch(
                        2000 + year_offset as u16,
                        month,
                        day,
                    );
                    let seconds = time_to_seconds(days, 0, 0, 0);
                    let got = civil_from_seconds(seconds);
                    assert_eq!(
                        (year_offset, month, day, 0, 0, 0),
                        got,
                        "for {}-{:02}-{:02}",
                        2000 + year_offset as u16,
                        month,
                        day,
                    );
                }
            }
        }
    }

    #[test]
    fn roundtrip_seconds_of_day() {
        for second_of_day in [0u32, 1, 59, 60, 3599, 3600, 43_200, 86_399] {
            let (y, mo, d, h, mi, s) = civil_from_seconds(second_of_day);
            assert_eq!((y, mo, d), (0, 1, 1));
            let got =
                time_to_seconds(days_since_epoch(2000, mo, d), h, mi, s);
            assert_eq!(second_of_day, got);
        }
    }

    #[test]
    fn garbage_in_garbage_out_without_panic() {
        // None of these are meaningful, but none of them may panic.
        let _ = days_since_epoch(1999, 13, 255);
        let _ = days_since_epoch(65535, 0, 0);
        let _ = time_to_seconds(65535, 255, 255, 255);
        let _ = civil_from_seconds(u32::MAX);
        let _ = day_of_week(2000, 99, 99);
    }
}
