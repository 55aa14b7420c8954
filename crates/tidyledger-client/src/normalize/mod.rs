pub mod amount;
pub mod catalog;
pub mod date;
pub mod merchant;

use thiserror::Error;

pub use amount::{AmountNormalizer, FixedAmount, normalize_amount};
pub use catalog::{AliasEntry, AliasFamily, CanonicalCatalog, FamilyKind, canonicalize};
pub use date::{format_iso_date, normalize_date};
pub use merchant::{
    CleanMerchant, MatchMethod, MerchantId, MerchantMatch, MerchantResolution, MerchantResolver,
    UnresolvedReason,
};

/// Record-local normalization failure. Never aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("`{input}` is not a recognized calendar date")]
    InvalidDate { input: String },
    #[error("`{input}` is not a valid amount")]
    InvalidAmount { input: String },
}

impl NormalizeError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidAmount { .. } => "invalid_amount",
        }
    }

    pub fn input(&self) -> &str {
        match self {
            Self::InvalidDate { input } | Self::InvalidAmount { input } => input,
        }
    }
}
