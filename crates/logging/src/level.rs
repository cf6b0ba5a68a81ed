//! crates/logging/src/level.rs
//! Coercion of heterogeneous numeric and textual inputs into an alert ordinal.

/// A level supplied from outside the type system's reach: any integer width,
/// a decimal string, or raw bytes holding a decimal string.
///
/// Every input funnels through [`LevelValue::to_ordinal`], which normalises
/// to a 64-bit unsigned value and truncates to the 8-bit ordinal stored by
/// [`Alert`](crate::Alert). Truncation wraps: `-1` becomes 255 and `300`
/// becomes 44.
///
/// # Examples
///
/// ```
/// use logging::LevelValue;
///
/// assert_eq!(LevelValue::from(5u32).to_ordinal(), Some(5));
/// assert_eq!(LevelValue::from(-1i8).to_ordinal(), Some(255));
/// assert_eq!(LevelValue::from("12").to_ordinal(), Some(12));
/// assert_eq!(LevelValue::from("notanumber").to_ordinal(), None);
/// assert_eq!(LevelValue::from(1.5f64).to_ordinal(), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LevelValue<'a> {
    /// A signed integer of any width, widened to 64 bits.
    Signed(i64),
    /// An unsigned integer of any width, widened to 64 bits.
    Unsigned(u64),
    /// Text holding a base-10 integer.
    Text(&'a str),
    /// Bytes holding a base-10 integer.
    Bytes(&'a [u8]),
    /// A value that has no integer reading; coercion leaves targets unchanged.
    Unsupported,
}

impl LevelValue<'_> {
    /// Normalises the value to an 8-bit ordinal.
    ///
    /// Returns `None` for [`LevelValue::Unsupported`] and for text that does
    /// not scan as a base-10 integer. Callers treat `None` as "leave the
    /// target alone".
    #[must_use]
    pub fn to_ordinal(self) -> Option<u8> {
        let wide = match self {
            Self::Signed(value) => value as u64,
            Self::Unsigned(value) => value,
            Self::Text(text) => scan_decimal(text)?,
            Self::Bytes(bytes) => scan_decimal(std::str::from_utf8(bytes).ok()?)?,
            Self::Unsupported => return None,
        };
        Some(wide as u8)
    }
}

/// Scans a trimmed base-10 integer, accepting a leading sign.
///
/// Negative text follows the signed path so `"-1"` wraps like `-1i64`.
fn scan_decimal(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if let Ok(unsigned) = trimmed.parse::<u64>() {
        return Some(unsigned);
    }
    trimmed.parse::<i64>().ok().map(|signed| signed as u64)
}

macro_rules! level_from_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LevelValue<'_> {
                fn from(value: $ty) -> Self {
                    Self::Signed(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! level_from_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LevelValue<'_> {
                fn from(value: $ty) -> Self {
                    Self::Unsigned(u64::from(value))
                }
            }
        )*
    };
}

macro_rules! level_unsupported {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LevelValue<'_> {
                fn from(_: $ty) -> Self {
                    Self::Unsupported
                }
            }
        )*
    };
}

level_from_signed!(i8, i16, i32, i64);
level_from_unsigned!(u8, u16, u32, u64);
level_unsupported!(bool, char, f32, f64);

impl From<isize> for LevelValue<'_> {
    fn from(value: isize) -> Self {
        Self::Signed(value as i64)
    }
}

impl From<usize> for LevelValue<'_> {
    fn from(value: usize) -> Self {
        Self::Unsigned(value as u64)
    }
}

impl<'a> From<&'a str> for LevelValue<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for LevelValue<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for LevelValue<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for LevelValue<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a Vec<u8>> for LevelValue<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes.as_slice())
    }
}

impl From<&crate::Alert> for LevelValue<'_> {
    fn from(alert: &crate::Alert) -> Self {
        Self::Unsigned(u64::from(alert.get()))
    }
}
