use fastnum::{
    D256,
    decimal::{Context, RoundingMode},
};

/// Number of fractional digits all exchange amounts are carried at.
pub const WEI_DECIMALS: i16 = 18;

/// 18-decimal fixed-scale amount.
///
/// Wraps a 256-bit decimal; constructors and arithmetic keep the value at
/// [`WEI_DECIMALS`] fractional digits with floor rounding.
///
/// Parsing an empty or malformed string yields [`Wei::ZERO`], so blank user
/// input flows through the selector graph as zero rather than an error.
/// Division has no panicking form: [`Wei::checked_div`] returns `None` for a
/// zero denominator and callers decide what "no price available" means.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, derive_more::Debug)]
#[debug("{_0}")]
pub struct Wei(D256);

impl Wei {
    pub const ZERO: Wei = Wei(D256::ZERO);
    pub const ONE: Wei = Wei(D256::ONE);

    /// Parses a plain decimal string ("1.5", "0.002").
    /// Empty or invalid input yields [`Wei::ZERO`].
    pub fn from_dec_str(s: &str) -> Self {
        D256::from_str(s.trim(), context())
            .map(|d| Self(d.rescale(WEI_DECIMALS)))
            .unwrap_or(Self::ZERO)
    }

    /// Parses an optional decimal string, treating `None` as zero.
    pub fn from_opt(s: Option<&str>) -> Self {
        s.map(Self::from_dec_str).unwrap_or(Self::ZERO)
    }

    /// Parses a raw fixed-point integer string counting units of 10^-18,
    /// as reported by the subgraph for amounts and sizes.
    pub fn from_units(s: &str) -> Self {
        D256::from_str(s.trim(), context())
            .map(|units| Self((units / unit_scale()).rescale(WEI_DECIMALS)))
            .unwrap_or(Self::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.0.is_zero() && !self.0.is_negative()
    }

    /// Division returning `None` when the denominator is zero.
    pub fn checked_div(self, rhs: Wei) -> Option<Wei> {
        if rhs.0.is_zero() {
            None
        } else {
            Some(Self((self.0 / rhs.0).rescale(WEI_DECIMALS)))
        }
    }
}

impl From<u64> for Wei {
    fn from(value: u64) -> Self {
        Self(D256::from(value).rescale(WEI_DECIMALS))
    }
}

impl std::ops::Add for Wei {
    type Output = Wei;

    fn add(self, rhs: Wei) -> Wei {
        Self((self.0 + rhs.0).rescale(WEI_DECIMALS))
    }
}

impl std::ops::Sub for Wei {
    type Output = Wei;

    fn sub(self, rhs: Wei) -> Wei {
        Self((self.0 - rhs.0).rescale(WEI_DECIMALS))
    }
}

impl std::ops::Mul for Wei {
    type Output = Wei;

    fn mul(self, rhs: Wei) -> Wei {
        Self((self.0 * rhs.0).rescale(WEI_DECIMALS))
    }
}

impl std::fmt::Display for Wei {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

fn context() -> Context {
    Context::default().with_rounding_mode(RoundingMode::Floor)
}

fn unit_scale() -> D256 {
    fastnum::dec256!(1000000000000000000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_zero() {
        assert_eq!(Wei::from_dec_str(""), Wei::ZERO);
        assert_eq!(Wei::from_dec_str("   "), Wei::ZERO);
        assert_eq!(Wei::from_dec_str("not a number"), Wei::ZERO);
        assert_eq!(Wei::from_opt(None), Wei::ZERO);
        assert_eq!(Wei::from_opt(Some("2.5")), Wei::from_dec_str("2.5"));
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(
            Wei::from_units("1000000000000000000"),
            Wei::from_dec_str("1")
        );
        assert_eq!(
            Wei::from_units("1500000000000000000"),
            Wei::from_dec_str("1.5")
        );
        assert_eq!(
            Wei::from_units("-2000000000000000000"),
            Wei::from_dec_str("-2")
        );
        assert_eq!(Wei::from_units(""), Wei::ZERO);
    }

    #[test]
    fn test_arithmetic() {
        let a = Wei::from_dec_str("10");
        let b = Wei::from_dec_str("4");
        assert_eq!(a + b, Wei::from_dec_str("14"));
        assert_eq!(a - b, Wei::from_dec_str("6"));
        assert_eq!(a * b, Wei::from_dec_str("40"));
        assert_eq!(a.checked_div(b), Some(Wei::from_dec_str("2.5")));
    }

    #[test]
    fn test_division_by_zero_is_unavailable() {
        assert_eq!(Wei::from_dec_str("10").checked_div(Wei::ZERO), None);
        assert_eq!(Wei::ZERO.checked_div(Wei::ZERO), None);
    }

    #[test]
    fn test_comparisons() {
        let a = Wei::from_dec_str("1.000000000000000001");
        let b = Wei::from_dec_str("1");
        assert!(a > b);
        assert!(b < a);
        assert!(Wei::from_dec_str("5") == Wei::from_dec_str("5.0"));
        assert!(Wei::from_dec_str("0.1").is_positive());
        assert!(!Wei::from_dec_str("-0.1").is_positive());
        assert!(Wei::ZERO.is_zero());
    }
}
