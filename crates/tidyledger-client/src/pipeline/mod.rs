pub(crate) mod batch;
pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod sink;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::{
    AmountNormalizer, CanonicalCatalog, CleanMerchant, FixedAmount, MatchMethod, MerchantId,
    MerchantResolution, MerchantResolver, NormalizeError, normalize_date,
};

/// One input row as read from the source. Any text, including empty, is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based data row number (the header row is not counted).
    pub row: usize,
    pub date_text: String,
    pub merchant_text: String,
    pub amount_text: String,
}

impl RawRecord {
    pub fn new(row: usize, date_text: &str, merchant_text: &str, amount_text: &str) -> Self {
        Self {
            row,
            date_text: date_text.to_string(),
            merchant_text: merchant_text.to_string(),
            amount_text: amount_text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRecord {
    pub date: NaiveDate,
    pub merchant: CleanMerchant,
    pub amount: FixedAmount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningSummary {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub date_errors: usize,
    pub amount_errors: usize,
    pub merchant_unresolved: usize,
    pub merchant_fuzzy_matches: usize,
    /// Distinct canonical identifiers in the kept output; excludes the unresolved sentinel.
    pub merchants: BTreeSet<MerchantId>,
}

impl CleaningSummary {
    pub fn dropped_rows(&self) -> usize {
        self.date_errors + self.amount_errors
    }
}

/// A dropped row and the first field that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    pub row: usize,
    pub error: NormalizeError,
}

impl RowRejection {
    pub fn field(&self) -> &'static str {
        match self.error {
            NormalizeError::InvalidDate { .. } => "date",
            NormalizeError::InvalidAmount { .. } => "amount",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CleaningOutcome {
    pub records: Vec<CleanRecord>,
    pub rejections: Vec<RowRejection>,
    pub summary: CleaningSummary,
}

/// Applies the three normalizers to each record independently.
#[derive(Debug, Clone)]
pub struct CleaningPipeline<'a> {
    resolver: MerchantResolver<'a>,
    amounts: AmountNormalizer,
}

impl<'a> CleaningPipeline<'a> {
    pub fn new(catalog: &'a CanonicalCatalog) -> Self {
        Self {
            resolver: MerchantResolver::new(catalog),
            amounts: AmountNormalizer::default(),
        }
    }

    pub fn with_max_edit_distance(mut self, max_edit_distance: Option<usize>) -> Self {
        self.resolver = self.resolver.with_max_edit_distance(max_edit_distance);
        self
    }

    pub fn with_amount_normalizer(mut self, amounts: AmountNormalizer) -> Self {
        self.amounts = amounts;
        self
    }

    pub fn resolver(&self) -> &MerchantResolver<'a> {
        &self.resolver
    }

    pub fn clean_record(&self, record: &RawRecord) -> Result<CleanRecord, NormalizeError> {
        self.clean_with_resolution(record).map(|(clean, _)| clean)
    }

    pub fn clean(&self, records: &[RawRecord]) -> CleaningOutcome {
        let mut outcome = CleaningOutcome::default();
        outcome.summary.total_rows = records.len();

        for record in records {
            match self.clean_with_resolution(record) {
                Ok((clean, resolution)) => {
                    let summary = &mut outcome.summary;
                    match &clean.merchant {
                        CleanMerchant::Canonical(id) => {
                            summary.merchants.insert(id.clone());
                        }
                        CleanMerchant::Unresolved => {
                            summary.merchant_unresolved += 1;
                            tracing::debug!(
                                row = record.row,
                                merchant = %record.merchant_text,
                                "merchant left unresolved"
                            );
                        }
                    }
                    if let MerchantResolution::Matched(found) = &resolution
                        && matches!(found.method, MatchMethod::EditDistance { .. })
                    {
                        summary.merchant_fuzzy_matches += 1;
                    }
                    summary.kept_rows += 1;
                    outcome.records.push(clean);
                }
                Err(error) => {
                    match error {
                        NormalizeError::InvalidDate { .. } => outcome.summary.date_errors += 1,
                        NormalizeError::InvalidAmount { .. } => {
                            outcome.summary.amount_errors += 1
                        }
                    }
                    tracing::debug!(
                        row = record.row,
                        code = error.code(),
                        input = error.input(),
                        "dropped record"
                    );
                    outcome.rejections.push(RowRejection {
                        row: record.row,
                        error,
                    });
                }
            }
        }

        outcome
    }

    /// Date is checked before amount, so a row failing both reports the date.
    fn clean_with_resolution(
        &self,
        record: &RawRecord,
    ) -> Result<(CleanRecord, MerchantResolution<'a>), NormalizeError> {
        let date = normalize_date(&record.date_text)?;
        let amount = self.amounts.normalize(&record.amount_text)?;
        let resolution = self.resolver.explain(&record.merchant_text);
        let clean = CleanRecord {
            date,
            merchant: resolution.merchant(),
            amount,
        };
        Ok((clean, resolution))
    }
}
