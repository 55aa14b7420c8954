use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

use crate::normalize::NormalizeError;

pub const DEFAULT_CURRENCY_MARKER: &str = "USD";

/// Signed amount with exactly two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedAmount(Decimal);

impl FixedAmount {
    pub const SCALE: u32 = 2;

    /// `None` when the magnitude leaves no room for two fractional digits
    /// in the 96-bit mantissa (roughly 7.9e26 and above).
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        let mut fixed =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven);
        fixed.rescale(Self::SCALE);
        if fixed.scale() != Self::SCALE {
            return None;
        }
        if fixed.is_zero() {
            fixed.set_sign_positive(true);
        }
        Some(Self(fixed))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_refund(&self) -> bool {
        self.0.is_sign_negative()
    }
}

impl fmt::Display for FixedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for FixedAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Strips currency notation noise and parses what remains as a decimal numeral.
#[derive(Debug, Clone)]
pub struct AmountNormalizer {
    marker: Option<Regex>,
}

impl AmountNormalizer {
    pub fn new(currency_marker: &str) -> Self {
        let marker = if currency_marker.trim().is_empty() {
            None
        } else {
            let marker = currency_marker.trim();
            match RegexBuilder::new(&regex::escape(marker))
                .case_insensitive(true)
                .build()
            {
                Ok(regex) => Some(regex),
                Err(error) => {
                    tracing::warn!(
                        marker,
                        %error,
                        "currency marker could not be compiled; marker stripping disabled"
                    );
                    None
                }
            }
        };
        Self { marker }
    }

    pub fn normalize(&self, text: &str) -> Result<FixedAmount, NormalizeError> {
        let invalid = || NormalizeError::InvalidAmount {
            input: text.to_string(),
        };

        let trimmed = text.trim();
        let without_marker = match &self.marker {
            Some(marker) => marker.replace_all(trimmed, "").into_owned(),
            None => trimmed.to_string(),
        };
        let stripped = without_marker.replace(['$', ','], "");
        let numeral = stripped.trim();
        if numeral.is_empty() || !decimal_numeral().is_match(numeral) {
            return Err(invalid());
        }

        let value = Decimal::from_str(&expand_numeral(numeral)).map_err(|_| invalid())?;
        FixedAmount::from_decimal(value).ok_or_else(invalid)
    }
}

impl Default for AmountNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_MARKER)
    }
}

pub fn normalize_amount(text: &str) -> Result<FixedAmount, NormalizeError> {
    static DEFAULT: OnceLock<AmountNormalizer> = OnceLock::new();
    DEFAULT.get_or_init(AmountNormalizer::default).normalize(text)
}

fn decimal_numeral() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("invalid numeral regex")
    })
}

/// Rewrites `.5` / `5.` / `+5` into the plain `[-]whole[.fraction]` form.
fn expand_numeral(numeral: &str) -> String {
    let (negative, unsigned) = match numeral.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, numeral.strip_prefix('+').unwrap_or(numeral)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let whole = if whole.is_empty() { "0" } else { whole };
    let sign = if negative { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}
