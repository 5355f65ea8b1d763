//! The element types a `CharBuf` can hold.

use core::fmt::{self, Write};
use core::hash::Hash;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// One unit of text: a byte, a UTF-16 unit or a UTF-32 unit.
///
/// Units are compared and copied as plain integers; no Unicode validation
/// happens anywhere in the buffer. Only the `Debug` and `Display` renderings
/// decode them.
pub trait CodeUnit: sealed::Sealed + Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    /// The terminator written after the last unit.
    const NUL: Self;

    /// A terminated view of the empty text, used before any storage exists.
    const EMPTY: &'static [Self];

    /// Writes `units` as a quoted, escaped string literal.
    fn fmt_debug(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl CodeUnit for u8 {
    const NUL: Self = 0;
    const EMPTY: &'static [Self] = &[0];

    fn fmt_debug(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for chunk in units.utf8_chunks() {
            for c in chunk.valid().chars() {
                write!(f, "{}", c.escape_debug())?;
            }
            for byte in chunk.invalid() {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        f.write_char('"')
    }
}

impl CodeUnit for u16 {
    const NUL: Self = 0;
    const EMPTY: &'static [Self] = &[0];

    fn fmt_debug(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(c) => write!(f, "{}", c.escape_debug())?,
                Err(err) => write!(f, "\\u{{{:04x}}}", err.unpaired_surrogate())?,
            }
        }
        f.write_char('"')
    }
}

impl CodeUnit for u32 {
    const NUL: Self = 0;
    const EMPTY: &'static [Self] = &[0];

    fn fmt_debug(units: &[Self], f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for &unit in units {
            match char::from_u32(unit) {
                Some(c) => write!(f, "{}", c.escape_debug())?,
                None => write!(f, "\\u{{{unit:x}}}")?,
            }
        }
        f.write_char('"')
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::format;
    use alloc::string::String;

    struct Debugged<'a, C>(&'a [C]);

    impl<C: CodeUnit> fmt::Debug for Debugged<'_, C> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            C::fmt_debug(self.0, f)
        }
    }

    fn debug<C: CodeUnit>(units: &[C]) -> String {
        format!("{:?}", Debugged(units))
    }

    #[test]
    fn test_terminators() {
        assert_eq!(u8::EMPTY, [u8::NUL]);
        assert_eq!(u16::EMPTY, [u16::NUL]);
        assert_eq!(u32::EMPTY, [u32::NUL]);
    }

    #[test]
    fn test_debug_escapes() {
        assert_eq!(debug(b"a\"b\n"), r#""a\"b\n""#);
        assert_eq!(debug(&[b'o', b'k', 0xff]), r#""ok\xff""#);
        assert_eq!(debug(&[0x68u16, 0xd800]), r#""h\u{d800}""#);
        assert_eq!(debug(&[0x1f600u32, 0x11_0000]), "\"\u{1f600}\\u{110000}\"");
    }
}
