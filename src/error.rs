/// An error that can occur in this crate.
///
/// The only fallible operations in rtclib are the strict text parsers,
/// such as the `FromStr` implementation on [`DateTime`](crate::DateTime).
/// The lenient constructors inherited from the RTC driver lineage never
/// fail; they produce a value whose defects are detectable via
/// [`DateTime::is_valid`](crate::DateTime::is_valid) instead.
///
/// # Design
///
/// This crate follows the "one error type" pattern: a single opaque
/// `Error` for every fallible operation, with `Display` as the main
/// introspection mechanism. Since rtclib never allocates, the payload is
/// limited to static messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum ErrorKind {
    /// An error parsing a datetime from text.
    Parse {
        /// A static description of what went wrong.
        msg: &'static str,
        /// The byte offset in the input at which parsing failed.
        offset: usize,
    },
}

impl Error {
    /// Creates a new parse error at the given input offset.
    pub(crate) fn parse(msg: &'static str, offset: usize) -> Error {
        Error { kind: ErrorKind::Parse { msg, offset } }
    }

    /// Returns true when this error came from parsing text.
    ///
    /// # Example
    ///
    /// ```
    /// use rtclib::DateTime;
    ///
    /// let err = "2020-04-16Z18:34:56".parse::<DateTime>().unwrap_err();
    /// assert!(err.is_parse());
    /// ```
    pub fn is_parse(&self) -> bool {
        matches!(self.kind, ErrorKind::Parse { .. })
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind {
            ErrorKind::Parse { msg, offset } => {
                write!(f, "{msg} (at byte offset {offset})")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
