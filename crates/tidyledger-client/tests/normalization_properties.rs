use proptest::prelude::*;
use tidyledger_client::normalize::{
    CanonicalCatalog, CleanMerchant, MerchantResolver, canonicalize, format_iso_date,
    normalize_amount, normalize_date,
};

proptest! {
    #[test]
    fn canonicalization_is_idempotent(text in "\\PC{0,40}") {
        let once = canonicalize(&text);
        prop_assert_eq!(canonicalize(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn resolution_is_deterministic(text in "\\PC{0,40}") {
        let catalog = CanonicalCatalog::builtin();
        let resolver = MerchantResolver::new(&catalog);
        prop_assert_eq!(resolver.resolve(&text), resolver.resolve(&text));
    }

    #[test]
    fn fallback_is_total_without_a_threshold(text in "[A-Za-z0-9 *#.-]{1,30}") {
        let catalog = CanonicalCatalog::builtin();
        let resolver = MerchantResolver::new(&catalog);
        let resolved = resolver.resolve(&text);
        prop_assert_eq!(resolved.is_unresolved(), canonicalize(&text).is_empty());
        if let CleanMerchant::Canonical(id) = &resolved {
            prop_assert!(catalog.identifiers().contains(id));
        }
    }

    #[test]
    fn date_normalization_is_deterministic_and_stable(text in "\\PC{0,20}") {
        let first = normalize_date(&text);
        prop_assert_eq!(first.clone(), normalize_date(&text));
        if let Ok(date) = first {
            let iso = format_iso_date(&date);
            prop_assert_eq!(normalize_date(&iso), Ok(date));
        }
    }

    #[test]
    fn valid_calendar_dates_survive_every_numeric_notation(
        year in 2000i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let short_year = year - 2000;
        for text in [
            format!("{year}-{month}-{day}"),
            format!("{month}/{day}/{year}"),
            format!("{day}-{month}-{short_year:02}"),
        ] {
            let parsed = normalize_date(&text);
            prop_assert!(parsed.is_ok(), "input: {}", text);
            if let Ok(date) = parsed {
                prop_assert_eq!(
                    format_iso_date(&date),
                    format!("{year:04}-{month:02}-{day:02}")
                );
            }
        }
    }

    #[test]
    fn normalized_amounts_are_fixed_points(cents in -10_000_000i64..10_000_000) {
        let text = format!("USD {:.2}", cents as f64 / 100.0);
        let first = normalize_amount(&text);
        prop_assert!(first.is_ok(), "input: {}", text);
        if let Ok(amount) = first {
            let rendered = amount.to_string();
            prop_assert_eq!(rendered.split('.').nth(1).map(str::len), Some(2));
            prop_assert_eq!(normalize_amount(&rendered), Ok(amount));
        }
    }
}
