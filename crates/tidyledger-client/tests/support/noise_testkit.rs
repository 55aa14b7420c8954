use tidyledger_client::normalize::catalog::BUILTIN_FAMILIES;
use tidyledger_client::normalize::{AliasFamily, FamilyKind};

pub const PREFIXES: [&str; 6] = ["", "# ", "PAYPAL*", "SQ*", "POS ", "ACH "];
pub const SUFFIXES: [&str; 7] = ["", " INC", " LTD", ".COM", " (ONLINE)", " [AUTO]", " *PMT"];
pub const SYMBOL_NOISE: [&str; 5] = [".*", "?", "+", "()", "[]"];

#[derive(Debug, Clone)]
pub struct NoisyCase {
    pub input: String,
    pub expected: String,
}

pub fn expected_output(family: &AliasFamily) -> String {
    match family.kind {
        FamilyKind::Brand => family.key.to_string(),
        FamilyKind::SingleLocation => family
            .variants
            .first()
            .map(|name| name.to_uppercase())
            .unwrap_or_default(),
    }
}

pub fn title_case(text: &str) -> String {
    let mut rendered = String::with_capacity(text.len());
    let mut at_word_start = true;
    for character in text.chars() {
        if at_word_start {
            rendered.extend(character.to_uppercase());
        } else {
            rendered.extend(character.to_lowercase());
        }
        at_word_start = !character.is_alphabetic();
    }
    rendered
}

/// Every alias under every casing, wrapped in every prefix and suffix.
pub fn decorated_cases() -> Vec<NoisyCase> {
    let mut cases = Vec::new();
    for family in &BUILTIN_FAMILIES {
        let expected = expected_output(family);
        for variant in family.variants {
            let casings = [
                variant.to_string(),
                variant.to_uppercase(),
                variant.to_lowercase(),
                title_case(variant),
            ];
            for casing in &casings {
                for prefix in PREFIXES {
                    for suffix in SUFFIXES {
                        cases.push(NoisyCase {
                            input: format!("{prefix}{casing}{suffix}"),
                            expected: expected.clone(),
                        });
                    }
                }
            }
        }
    }
    cases
}

/// Punctuation noise before, after, and inside each alias, plus padded whitespace.
pub fn symbol_noise_cases() -> Vec<NoisyCase> {
    let mut cases = Vec::new();
    for family in &BUILTIN_FAMILIES {
        let expected = expected_output(family);
        for variant in family.variants {
            let middle = variant.len() / 2;
            for noise in SYMBOL_NOISE {
                for input in [
                    format!("{variant}{noise}"),
                    format!("{noise}{variant}"),
                    format!("{}{noise}{}", &variant[..middle], &variant[middle..]),
                ] {
                    cases.push(NoisyCase {
                        input,
                        expected: expected.clone(),
                    });
                }
            }
            cases.push(NoisyCase {
                input: format!("  {}  ", variant.replace(' ', "   ")),
                expected: expected.clone(),
            });
        }
    }
    cases
}

/// The first alias of each family with one letter or digit dropped.
pub fn deletion_typo_cases() -> Vec<NoisyCase> {
    let mut cases = Vec::new();
    for family in &BUILTIN_FAMILIES {
        let expected = expected_output(family);
        let Some(name) = family.variants.first() else {
            continue;
        };
        for (index, character) in name.char_indices() {
            if !character.is_ascii_alphanumeric() {
                continue;
            }
            let mut typo = name.to_string();
            typo.remove(index);
            cases.push(NoisyCase {
                input: typo,
                expected: expected.clone(),
            });
        }
    }
    cases
}
