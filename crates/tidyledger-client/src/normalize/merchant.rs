use std::fmt;

use serde::{Serialize, Serializer};

use crate::normalize::catalog::{AliasEntry, CanonicalCatalog, canonicalize};

pub use crate::normalize::catalog::MerchantId;

pub const UNRESOLVED_LABEL: &str = "UNRESOLVED";

/// Merchant column of a cleaned record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CleanMerchant {
    Canonical(MerchantId),
    Unresolved,
}

impl CleanMerchant {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Canonical(id) => id.as_str(),
            Self::Unresolved => UNRESOLVED_LABEL,
        }
    }

    pub fn canonical(&self) -> Option<&MerchantId> {
        match self {
            Self::Canonical(id) => Some(id),
            Self::Unresolved => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }
}

impl fmt::Display for CleanMerchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CleanMerchant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    Containment,
    EditDistance { distance: usize },
}

impl MatchMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Containment => "containment",
            Self::EditDistance { .. } => "edit_distance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantMatch<'a> {
    pub key: String,
    pub entry: &'a AliasEntry,
    pub method: MatchMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason<'a> {
    EmptyKey,
    EmptyCatalog { key: String },
    BeyondMaxDistance {
        key: String,
        nearest: &'a AliasEntry,
        distance: usize,
        max_distance: usize,
    },
}

impl UnresolvedReason<'_> {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyKey => "empty_key",
            Self::EmptyCatalog { .. } => "empty_catalog",
            Self::BeyondMaxDistance { .. } => "beyond_max_distance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerchantResolution<'a> {
    Matched(MerchantMatch<'a>),
    Unresolved(UnresolvedReason<'a>),
}

impl MerchantResolution<'_> {
    pub fn merchant(&self) -> CleanMerchant {
        match self {
            Self::Matched(found) => {
                CleanMerchant::Canonical(found.entry.canonical_output.clone())
            }
            Self::Unresolved(_) => CleanMerchant::Unresolved,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Matched(found) => found.key.as_str(),
            Self::Unresolved(UnresolvedReason::EmptyKey) => "",
            Self::Unresolved(
                UnresolvedReason::EmptyCatalog { key }
                | UnresolvedReason::BeyondMaxDistance { key, .. },
            ) => key.as_str(),
        }
    }
}

/// Maps noisy merchant text onto a [`CanonicalCatalog`].
///
/// Resolution is layered: the longest catalog base contained in the canonicalized input wins;
/// if none is contained, the base with the smallest Levenshtein distance wins. Ties in either
/// layer go to the entry with the lower priority. Without a `max_edit_distance` the fallback
/// always produces a merchant for a non-empty key.
#[derive(Debug, Clone, Copy)]
pub struct MerchantResolver<'a> {
    catalog: &'a CanonicalCatalog,
    max_edit_distance: Option<usize>,
}

impl<'a> MerchantResolver<'a> {
    pub fn new(catalog: &'a CanonicalCatalog) -> Self {
        Self {
            catalog,
            max_edit_distance: None,
        }
    }

    pub fn with_max_edit_distance(mut self, max_edit_distance: Option<usize>) -> Self {
        self.max_edit_distance = max_edit_distance;
        self
    }

    pub fn max_edit_distance(&self) -> Option<usize> {
        self.max_edit_distance
    }

    pub fn resolve(&self, text: &str) -> CleanMerchant {
        self.explain(text).merchant()
    }

    pub fn explain(&self, text: &str) -> MerchantResolution<'a> {
        let key = canonicalize(text);
        if key.is_empty() {
            return MerchantResolution::Unresolved(UnresolvedReason::EmptyKey);
        }

        if let Some(entry) = self.longest_contained(&key) {
            return MerchantResolution::Matched(MerchantMatch {
                key,
                entry,
                method: MatchMethod::Containment,
            });
        }

        let Some((nearest, distance)) = self.nearest(&key) else {
            return MerchantResolution::Unresolved(UnresolvedReason::EmptyCatalog { key });
        };

        if let Some(max_distance) = self.max_edit_distance
            && distance > max_distance
        {
            return MerchantResolution::Unresolved(UnresolvedReason::BeyondMaxDistance {
                key,
                nearest,
                distance,
                max_distance,
            });
        }

        MerchantResolution::Matched(MerchantMatch {
            key,
            entry: nearest,
            method: MatchMethod::EditDistance { distance },
        })
    }

    fn longest_contained(&self, key: &str) -> Option<&'a AliasEntry> {
        let mut best: Option<&'a AliasEntry> = None;
        for entry in self.catalog.entries() {
            if !key.contains(entry.canonical_base.as_str()) {
                continue;
            }
            let replaces = match best {
                Some(current) => outranks(
                    entry,
                    entry.canonical_base.len(),
                    current,
                    current.canonical_base.len(),
                    |candidate, incumbent| candidate > incumbent,
                ),
                None => true,
            };
            if replaces {
                best = Some(entry);
            }
        }
        best
    }

    fn nearest(&self, key: &str) -> Option<(&'a AliasEntry, usize)> {
        let mut best: Option<(&'a AliasEntry, usize)> = None;
        for entry in self.catalog.entries() {
            let distance = levenshtein_distance(key, &entry.canonical_base);
            let replaces = match best {
                Some((current, current_distance)) => outranks(
                    entry,
                    distance,
                    current,
                    current_distance,
                    |candidate, incumbent| candidate < incumbent,
                ),
                None => true,
            };
            if replaces {
                best = Some((entry, distance));
            }
        }
        best
    }
}

/// A candidate replaces the incumbent only on a strictly better score, or on an equal score with
/// a lower priority.
fn outranks(
    candidate: &AliasEntry,
    candidate_score: usize,
    incumbent: &AliasEntry,
    incumbent_score: usize,
    better: impl Fn(usize, usize) -> bool,
) -> bool {
    if better(candidate_score, incumbent_score) {
        return true;
    }
    candidate_score == incumbent_score && candidate.priority < incumbent.priority
}

pub fn levenshtein_distance(left: &str, right: &str) -> usize {
    if left == right {
        return 0;
    }

    if left.is_empty() {
        return right.chars().count();
    }

    if right.is_empty() {
        return left.chars().count();
    }

    let right_chars = right.chars().collect::<Vec<char>>();
    let mut previous = (0..=right_chars.len()).collect::<Vec<usize>>();

    for (left_index, left_char) in left.chars().enumerate() {
        let mut current = vec![left_index + 1];

        for (right_index, right_char) in right_chars.iter().enumerate() {
            let insertion = current[right_index] + 1;
            let deletion = previous[right_index + 1] + 1;
            let substitution = previous[right_index] + usize::from(left_char != *right_char);
            current.push(insertion.min(deletion).min(substitution));
        }

        previous = current;
    }

    previous[right_chars.len()]
}
