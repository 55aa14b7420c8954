use std::path::Path;

use crate::commands::common::catalog_entry_row;
use crate::config::load_config;
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::{AmountInspection, DateInspection, InspectData, MerchantInspection};
use crate::normalize::date::detect_date;
use crate::normalize::{
    AmountNormalizer, CanonicalCatalog, MatchMethod, MerchantResolution, MerchantResolver,
    UnresolvedReason, format_iso_date,
};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct InspectOptions<'a> {
    pub date: Option<String>,
    pub merchant: Option<String>,
    pub amount: Option<String>,
    pub max_edit_distance: Option<usize>,
    pub home_override: Option<&'a Path>,
}

pub fn run(
    date: Option<String>,
    merchant: Option<String>,
    amount: Option<String>,
    max_edit_distance: Option<usize>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(InspectOptions {
        date,
        merchant,
        amount,
        max_edit_distance,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: InspectOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.date.is_none() && options.merchant.is_none() && options.amount.is_none() {
        return Err(ClientError::invalid_argument_for_command(
            "Nothing to inspect. Pass at least one of `--date`, `--merchant`, or `--amount`.",
            Some("inspect"),
        ));
    }

    let config = load_config(options.home_override)?.with_overrides(options.max_edit_distance);
    let catalog = CanonicalCatalog::builtin();
    let resolver =
        MerchantResolver::new(&catalog).with_max_edit_distance(config.max_edit_distance);
    let amounts = AmountNormalizer::new(&config.currency_marker);

    let data = InspectData {
        date: options.date.map(|text| inspect_date(&text)),
        merchant: options.merchant.map(|text| inspect_merchant(&resolver, &text)),
        amount: options.amount.map(|text| inspect_amount(&amounts, &text)),
    };

    success(CommandName::Inspect, data)
}

fn inspect_date(text: &str) -> DateInspection {
    match detect_date(text) {
        Ok((date, format)) => DateInspection {
            input: text.to_string(),
            ok: true,
            value: Some(format_iso_date(&date)),
            format: Some(format.as_str().to_string()),
            error_code: None,
        },
        Err(error) => DateInspection {
            input: text.to_string(),
            ok: false,
            value: None,
            format: None,
            error_code: Some(error.code().to_string()),
        },
    }
}

fn inspect_amount(amounts: &AmountNormalizer, text: &str) -> AmountInspection {
    match amounts.normalize(text) {
        Ok(amount) => AmountInspection {
            input: text.to_string(),
            ok: true,
            value: Some(amount.to_string()),
            refund: Some(amount.is_refund()),
            error_code: None,
        },
        Err(error) => AmountInspection {
            input: text.to_string(),
            ok: false,
            value: None,
            refund: None,
            error_code: Some(error.code().to_string()),
        },
    }
}

fn inspect_merchant(resolver: &MerchantResolver<'_>, text: &str) -> MerchantInspection {
    let resolution = resolver.explain(text);
    let mut inspection = MerchantInspection {
        input: text.to_string(),
        key: resolution.key().to_string(),
        merchant: resolution.merchant().to_string(),
        resolved: matches!(resolution, MerchantResolution::Matched(_)),
        method: None,
        distance: None,
        matched: None,
        unresolved_reason: None,
        nearest: None,
        max_edit_distance: resolver.max_edit_distance(),
    };

    match &resolution {
        MerchantResolution::Matched(found) => {
            inspection.method = Some(found.method.as_str().to_string());
            if let MatchMethod::EditDistance { distance } = found.method {
                inspection.distance = Some(distance);
            }
            inspection.matched = Some(catalog_entry_row(found.entry));
        }
        MerchantResolution::Unresolved(reason) => {
            inspection.unresolved_reason = Some(reason.as_str().to_string());
            if let UnresolvedReason::BeyondMaxDistance {
                nearest, distance, ..
            } = reason
            {
                inspection.distance = Some(*distance);
                inspection.nearest = Some(catalog_entry_row(nearest));
            }
        }
    }

    inspection
}
