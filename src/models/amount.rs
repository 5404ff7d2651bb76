//! Token amounts in base units
//!
//! Amounts are stored as raw `U256` base units together with the decimal count
//! of the token they belong to. Parsing and formatting are pure string work on
//! the decimal digits, so no precision is lost for any decimal count.

use alloy::primitives::U256;
use std::fmt;

/// Decimal count of the pool's LP token
pub const LP_DECIMALS: u8 = 18;

/// Largest decimal count accepted when parsing
const MAX_DECIMALS: u8 = 77;

/// An amount of some token, in that token's base units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount {
    raw: U256,
    decimals: u8,
}

/// Errors from parsing a human amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    /// Empty input
    Empty,
    /// Not a non-negative decimal number
    InvalidFormat(String),
    /// More fractional digits than the token supports
    TooPrecise { input: String, decimals: u8 },
    /// Does not fit in 256 bits
    Overflow(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "amount is empty"),
            Self::InvalidFormat(s) => write!(f, "invalid amount: '{}'", s),
            Self::TooPrecise { input, decimals } => write!(
                f,
                "amount '{}' has more than {} decimal places",
                input, decimals
            ),
            Self::Overflow(s) => write!(f, "amount '{}' is too large", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

impl TokenAmount {
    /// Wrap a raw base-unit value
    pub const fn from_raw(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// An LP token amount
    pub const fn lp(raw: U256) -> Self {
        Self::from_raw(raw, LP_DECIMALS)
    }

    /// Zero in a token with the given decimals
    pub const fn zero(decimals: u8) -> Self {
        Self::from_raw(U256::ZERO, decimals)
    }

    /// Raw base units
    pub const fn raw(&self) -> U256 {
        self.raw
    }

    /// Decimal count
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Parse a human amount ("1000", "1.5", ".25") into base units
    ///
    /// Scales by the token's own decimal count.
    pub fn parse(input: &str, decimals: u8) -> Result<Self, AmountParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }
        if decimals > MAX_DECIMALS {
            return Err(AmountParseError::Overflow(s.to_string()));
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > decimals as usize {
            return Err(AmountParseError::TooPrecise {
                input: s.to_string(),
                decimals,
            });
        }

        let mut digits = String::with_capacity(whole.len() + decimals as usize);
        digits.push_str(whole);
        digits.push_str(fraction);
        for _ in fraction.len()..decimals as usize {
            digits.push('0');
        }
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero(decimals));
        }

        let raw = U256::from_str_radix(digits, 10)
            .map_err(|_| AmountParseError::Overflow(s.to_string()))?;
        Ok(Self { raw, decimals })
    }

    /// Format with a trailing token symbol, e.g. "1000.0 TKA"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{} {}", self, symbol)
    }
}

impl fmt::Display for TokenAmount {
    /// Decimal rendering with at least one fractional digit ("0.0", "1.5")
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.raw.to_string();
        let decimals = self.decimals as usize;

        let (whole, fraction) = if digits.len() > decimals {
            let split = digits.len() - decimals;
            (digits[..split].to_string(), digits[split..].to_string())
        } else {
            ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
        };

        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            write!(f, "{}.0", whole)
        } else {
            write!(f, "{}.{}", whole, fraction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_uses_token_decimals() {
        let six = TokenAmount::parse("1000", 6).unwrap();
        assert_eq!(six.raw(), U256::from(1_000_000_000u64));

        let eighteen = TokenAmount::parse("1000", 18).unwrap();
        assert_eq!(
            eighteen.raw(),
            U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64))
        );
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(TokenAmount::parse("1.5", 2).unwrap().raw(), U256::from(150u64));
        assert_eq!(TokenAmount::parse(".25", 2).unwrap().raw(), U256::from(25u64));
        assert_eq!(TokenAmount::parse("2.", 0).unwrap().raw(), U256::from(2u64));
        assert_eq!(TokenAmount::parse("1.50", 1).unwrap().raw(), U256::from(15u64));
    }

    #[test]
    fn test_parse_zero() {
        assert!(TokenAmount::parse("0", 18).unwrap().is_zero());
        assert!(TokenAmount::parse("0.000", 6).unwrap().is_zero());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(TokenAmount::parse("  ", 18), Err(AmountParseError::Empty));
        assert!(matches!(
            TokenAmount::parse("-1", 18),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            TokenAmount::parse("1.2.3", 18),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            TokenAmount::parse(".", 18),
            Err(AmountParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            TokenAmount::parse("0.123", 2),
            Err(AmountParseError::TooPrecise { .. })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "9".repeat(80);
        assert!(matches!(
            TokenAmount::parse(&huge, 0),
            Err(AmountParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(TokenAmount::zero(18).to_string(), "0.0");
        assert_eq!(TokenAmount::zero(0).to_string(), "0.0");
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        let amount = TokenAmount::from_raw(U256::from(1_000_000_000u64), 6);
        assert_eq!(amount.to_string(), "1000.0");

        let amount = TokenAmount::from_raw(U256::from(1_500_000u64), 6);
        assert_eq!(amount.to_string(), "1.5");
    }

    #[test]
    fn test_display_small_values_keep_precision() {
        let one_wei = TokenAmount::lp(U256::from(1u64));
        assert_eq!(one_wei.to_string(), "0.000000000000000001");

        let lp = TokenAmount::lp(U256::from(1000u64));
        assert_eq!(lp.to_string(), "0.000000000000001");
    }

    #[test]
    fn test_format_with_symbol() {
        let amount = TokenAmount::parse("42.5", 8).unwrap();
        assert_eq!(amount.format_with_symbol("TKB"), "42.5 TKB");
    }
}
