use std::time::Duration;

use crate::error::CastError;

/// A scalar that can be read from the raw string value of an environment
/// variable.
///
/// `TYPE_NAME` is what failure messages call the target type, so it should
/// stay short and stable (`"u64"`, `"Duration"`).
pub trait FromEnvStr: Sized {
    const TYPE_NAME: &'static str;

    fn from_env_str(s: &str) -> Result<Self, CastError>;
}

impl FromEnvStr for String {
    const TYPE_NAME: &'static str = "string";

    fn from_env_str(s: &str) -> Result<Self, CastError> {
        Ok(s.to_string())
    }
}

macro_rules! impl_from_env_str_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnvStr for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_env_str(s: &str) -> Result<Self, CastError> {
                    Ok(s.parse::<$ty>()?)
                }
            }
        )*
    };
}

macro_rules! impl_from_env_str_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromEnvStr for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_env_str(s: &str) -> Result<Self, CastError> {
                    // `str::parse` takes a leading `+` for unsigned types too.
                    if s.starts_with('+') {
                        return Err(CastError::UnexpectedSign(s.to_string()));
                    }
                    Ok(s.parse::<$ty>()?)
                }
            }
        )*
    };
}

// Platform-width kinds parse straight into their own width, so an
// out-of-range value fails instead of being narrowed.
impl_from_env_str_signed!(i32, i64, isize);
impl_from_env_str_unsigned!(u16, u32, u64, usize);

/// Overflowing literals such as `1e400` are rejected rather than read as
/// infinity. Explicit `inf`/`infinity` spellings are still accepted.
impl FromEnvStr for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_env_str(s: &str) -> Result<Self, CastError> {
        let v = s.parse::<f64>()?;
        if v.is_infinite() && !is_infinity_literal(s) {
            return Err(CastError::FloatOutOfRange(s.to_string()));
        }
        Ok(v)
    }
}

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf")
        || unsigned.eq_ignore_ascii_case("infinity")
}

impl FromEnvStr for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_env_str(s: &str) -> Result<Self, CastError> {
        match s {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(CastError::Bool(s.to_string())),
        }
    }
}

/// Raw nanosecond count. There is no unit suffix grammar: `"5s"` is rejected.
impl FromEnvStr for Duration {
    const TYPE_NAME: &'static str = "Duration";

    fn from_env_str(s: &str) -> Result<Self, CastError> {
        let nanos = i64::from_env_str(s)?;
        u64::try_from(nanos)
            .map(Duration::from_nanos)
            .map_err(|_| CastError::NegativeDuration(nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_identity() {
        assert_eq!(String::from_env_str("").unwrap(), "");
        assert_eq!(String::from_env_str(" spaced ").unwrap(), " spaced ");
    }

    #[test]
    fn empty_string_rejected_for_non_text_kinds() {
        assert!(i32::from_env_str("").is_err());
        assert!(i64::from_env_str("").is_err());
        assert!(isize::from_env_str("").is_err());
        assert!(u32::from_env_str("").is_err());
        assert!(u64::from_env_str("").is_err());
        assert!(usize::from_env_str("").is_err());
        assert!(f64::from_env_str("").is_err());
        assert!(bool::from_env_str("").is_err());
        assert!(Duration::from_env_str("").is_err());
    }

    #[test]
    fn signed_integers() {
        assert_eq!(i64::from_env_str("-42").unwrap(), -42);
        assert_eq!(i64::from_env_str("+7").unwrap(), 7);
        assert_eq!(
            i64::from_env_str("9223372036854775807").unwrap(),
            i64::MAX
        );
        assert!(matches!(
            i64::from_env_str("9223372036854775808"),
            Err(CastError::Int(_))
        ));
        assert!(i32::from_env_str("2147483648").is_err());
        assert!(isize::from_env_str("12abc").is_err());
    }

    #[test]
    fn unsigned_integers_reject_negative() {
        assert_eq!(u64::from_env_str("18446744073709551615").unwrap(), u64::MAX);
        assert!(u64::from_env_str("-1").is_err());
        assert!(usize::from_env_str("-1").is_err());
        assert_eq!(
            u64::from_env_str("+5"),
            Err(CastError::UnexpectedSign("+5".to_string()))
        );
        assert_eq!(
            usize::from_env_str("+5"),
            Err(CastError::UnexpectedSign("+5".to_string()))
        );
        assert_eq!(i64::from_env_str("+5").unwrap(), 5);
        assert_eq!(u16::from_env_str("8080").unwrap(), 8080);
        assert!(u16::from_env_str("65536").is_err());
    }

    #[test]
    fn platform_unsigned_is_range_checked() {
        let above = (usize::MAX as u128 + 1).to_string();
        assert!(u64::from_env_str("4294967296").is_ok());
        assert!(matches!(
            usize::from_env_str(&above),
            Err(CastError::Int(_))
        ));
        assert_eq!(
            usize::from_env_str(&usize::MAX.to_string()).unwrap(),
            usize::MAX
        );
    }

    #[test]
    fn floats() {
        assert_eq!(f64::from_env_str("1.5").unwrap(), 1.5);
        assert_eq!(f64::from_env_str("-2e3").unwrap(), -2000.0);
        assert!(matches!(
            f64::from_env_str("1.5.0"),
            Err(CastError::Float(_))
        ));
        // No hex-float literals.
        assert!(matches!(
            f64::from_env_str("0x1p-2"),
            Err(CastError::Float(_))
        ));
    }

    #[test]
    fn float_overflow_is_rejected() {
        assert_eq!(
            f64::from_env_str("1e400"),
            Err(CastError::FloatOutOfRange("1e400".to_string()))
        );
        assert_eq!(
            f64::from_env_str("-1e400"),
            Err(CastError::FloatOutOfRange("-1e400".to_string()))
        );
        assert_eq!(f64::from_env_str("inf").unwrap(), f64::INFINITY);
        assert_eq!(f64::from_env_str("-Infinity").unwrap(), f64::NEG_INFINITY);
        assert_eq!(f64::from_env_str("+INF").unwrap(), f64::INFINITY);
        assert_eq!(f64::from_env_str("1e308").unwrap(), 1e308);
    }

    #[test]
    fn bool_literals() {
        for truthy in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(bool::from_env_str(truthy).unwrap(), "{truthy}");
        }
        for falsy in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!bool::from_env_str(falsy).unwrap(), "{falsy}");
        }
        for bad in ["yes", "no", "tRuE", "2", " true"] {
            assert_eq!(
                bool::from_env_str(bad),
                Err(CastError::Bool(bad.to_string()))
            );
        }
    }

    #[test]
    fn duration_is_nanosecond_count() {
        assert_eq!(
            Duration::from_env_str("5000000000").unwrap(),
            Duration::from_secs(5)
        );
        assert_eq!(Duration::from_env_str("0").unwrap(), Duration::ZERO);
        assert!(matches!(
            Duration::from_env_str("5s"),
            Err(CastError::Int(_))
        ));
        assert_eq!(
            Duration::from_env_str("-1"),
            Err(CastError::NegativeDuration(-1))
        );
    }

    #[test]
    fn canonical_rendering_round_trips() {
        assert_eq!(i64::from_env_str(&i64::MIN.to_string()).unwrap(), i64::MIN);
        assert_eq!(f64::from_env_str(&0.1f64.to_string()).unwrap(), 0.1);
        assert!(bool::from_env_str(&true.to_string()).unwrap());
    }
}
