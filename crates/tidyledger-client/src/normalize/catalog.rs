use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Canonical merchant identifier emitted in cleaned output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MerchantId(String);

impl MerchantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyKind {
    /// Every variant collapses to the family key.
    Brand,
    /// Each variant maps to the family's first listed name.
    SingleLocation,
}

impl FamilyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::SingleLocation => "single_location",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AliasFamily {
    pub key: &'static str,
    pub kind: FamilyKind,
    pub variants: &'static [&'static str],
}

const fn brand(key: &'static str, variants: &'static [&'static str]) -> AliasFamily {
    AliasFamily {
        key,
        kind: FamilyKind::Brand,
        variants,
    }
}

const fn single(key: &'static str, variants: &'static [&'static str]) -> AliasFamily {
    AliasFamily {
        key,
        kind: FamilyKind::SingleLocation,
        variants,
    }
}

/// Declaration order is resolution priority: earlier families win ties.
pub const BUILTIN_FAMILIES: [AliasFamily; 27] = [
    brand("UBER", &["UBER", "Uber", "Uber Technologies", "UBER EATS", "UBER *TRIP"]),
    brand("STARBUCKS", &["Starbucks", "STARBUCKS", "Starbucks Coffee"]),
    brand("AMAZON", &["Amazon", "AMZN", "Amazon Marketplace"]),
    brand("WALMART", &["Walmart", "WAL-MART", "Walmart Supercenter"]),
    brand("TARGET", &["Target", "TARGET", "Target Store"]),
    brand("MCDONALDS", &["McDonalds", "McDonald's", "MCD"]),
    brand("SHELL", &["Shell", "Shell Oil", "SHELL GAS"]),
    brand("LYFT", &["Lyft", "LYFT RIDE"]),
    brand("SPOTIFY", &["Spotify", "SPOTIFY", "Spotify Pmnt"]),
    brand("NETFLIX", &["Netflix", "NETFLIX", "Netflix.com"]),
    brand("APPLE", &["Apple", "APPLE.COM/BILL", "Apple Services"]),
    brand("GOOGLE", &["Google", "GOOGLE *SERVICES", "Google Play"]),
    brand("DOORDASH", &["DoorDash", "DOORDASH", "DOORDASH*ORDER"]),
    brand("INSTACART", &["Instacart", "INSTACART"]),
    brand("AIRBNB", &["Airbnb", "AIRBNB", "AIRBNB PAY"]),
    brand("COSTCO", &["Costco", "COSTCO WHOLESALE"]),
    // restaurants
    single("OLIVE_GARDEN", &["Olive Garden"]),
    single("CHIPOTLE", &["Chipotle"]),
    single("PANDA_EXPRESS", &["Panda Express"]),
    single("SUSHI_HOUSE", &["Sushi House"]),
    // retail
    single("BEST_BUY", &["Best Buy"]),
    single("HOME_DEPOT", &["Home Depot"]),
    single("LOWES", &["LOWE'S"]),
    single("MACYS", &["Macy's"]),
    // services
    single("CITY_UTILITIES", &["City Utilities"]),
    single("GYM_MEMBERSHIP", &["Gym Membership"]),
    single("CAR_WASH_PRO", &["Car Wash Pro"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    /// Position in the flattened table; lower wins ties.
    pub priority: usize,
    pub family: &'static str,
    pub kind: FamilyKind,
    pub canonical_base: String,
    pub canonical_output: MerchantId,
}

/// Flattened alias table. Immutable once built; entries are ordered by `priority`.
#[derive(Debug, Clone)]
pub struct CanonicalCatalog {
    entries: Vec<AliasEntry>,
    family_count: usize,
}

impl CanonicalCatalog {
    pub fn builtin() -> Self {
        Self::from_families(&BUILTIN_FAMILIES)
    }

    pub fn from_families(families: &[AliasFamily]) -> Self {
        let mut entries = Vec::new();

        for family in families {
            let output = match family.kind {
                FamilyKind::Brand => family.key.to_string(),
                FamilyKind::SingleLocation => family
                    .variants
                    .first()
                    .map(|name| name.to_uppercase())
                    .unwrap_or_else(|| family.key.to_string()),
            };

            for variant in family.variants {
                let canonical_base = canonicalize(variant);
                if canonical_base.is_empty() {
                    continue;
                }
                entries.push(AliasEntry {
                    priority: entries.len(),
                    family: family.key,
                    kind: family.kind,
                    canonical_base,
                    canonical_output: MerchantId(output.clone()),
                });
            }
        }

        Self {
            entries,
            family_count: families.len(),
        }
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn family_count(&self) -> usize {
        self.family_count
    }

    pub fn identifiers(&self) -> BTreeSet<&MerchantId> {
        self.entries
            .iter()
            .map(|entry| &entry.canonical_output)
            .collect()
    }
}

/// Upper-cases and keeps only ASCII letters and digits.
pub fn canonicalize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|character| character.is_ascii_uppercase() || character.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{AliasFamily, CanonicalCatalog, FamilyKind, canonicalize};

    #[test]
    fn canonicalize_strips_everything_but_ascii_alphanumerics() {
        assert_eq!(canonicalize("  Uber *Trip #12 "), "UBERTRIP12");
        assert_eq!(canonicalize("McDonald's"), "MCDONALDS");
        assert_eq!(canonicalize("APPLE.COM/BILL"), "APPLECOMBILL");
        assert_eq!(canonicalize("*** ()"), "");
    }

    #[test]
    fn brand_variants_collapse_and_single_locations_keep_their_name() {
        let catalog = CanonicalCatalog::builtin();
        let outputs = catalog
            .entries()
            .iter()
            .filter(|entry| entry.family == "UBER")
            .map(|entry| entry.canonical_output.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(outputs, vec!["UBER"; 5]);

        let lowes = catalog
            .entries()
            .iter()
            .find(|entry| entry.family == "LOWES");
        assert!(lowes.is_some());
        if let Some(entry) = lowes {
            assert_eq!(entry.canonical_base, "LOWES");
            assert_eq!(entry.canonical_output.as_str(), "LOWE'S");
            assert_eq!(entry.kind, FamilyKind::SingleLocation);
        }
    }

    #[test]
    fn priorities_follow_declaration_order() {
        let catalog = CanonicalCatalog::builtin();
        assert_eq!(catalog.len(), 58);
        assert_eq!(catalog.family_count(), 27);
        for (index, entry) in catalog.entries().iter().enumerate() {
            assert_eq!(entry.priority, index);
        }
        assert_eq!(catalog.identifiers().len(), 27);
    }

    #[test]
    fn variants_without_alphanumerics_are_skipped() {
        static FAMILIES: [AliasFamily; 1] = [AliasFamily {
            key: "NOISE",
            kind: FamilyKind::Brand,
            variants: &["***", "Noise Co"],
        }];

        let catalog = CanonicalCatalog::from_families(&FAMILIES);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].priority, 0);
        assert_eq!(catalog.entries()[0].canonical_base, "NOISECO");
    }
}
