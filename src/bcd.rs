/*!
Binary⇄BCD conversion at the hardware register boundary.

Every RTC chip this crate's consumers talk to stores its time fields in
binary-coded decimal: each 4-bit nibble holds one decimal digit, so the
binary value `59` is stored as `0x59`. These two routines are the entire
codec. They are correct for values in `0..=99`; outside that range they
produce garbage without panicking, consistent with the rest of the crate.
*/

/// Converts a binary value in `0..=99` to its BCD encoding.
///
/// # Example
///
/// ```
/// use rtclib::bcd;
///
/// assert_eq!(bcd::bin2bcd(59), 0x59);
/// assert_eq!(bcd::bin2bcd(7), 0x07);
/// ```
#[inline]
pub const fn bin2bcd(v: u8) -> u8 {
    v.wrapping_add(6 * (v / 10))
}

/// Converts a BCD-encoded value back to binary.
///
/// # Example
///
/// ```
/// use rtclib::bcd;
///
/// assert_eq!(bcd::bcd2bin(0x59), 59);
/// assert_eq!(bcd::bcd2bin(0x07), 7);
/// ```
#[inline]
pub const fn bcd2bin(v: u8) -> u8 {
    v.wrapping_sub(6 * (v >> 4))
}
