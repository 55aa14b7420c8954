use crate::contracts::types::{CatalogEntryRow, CleanIssue};
use crate::normalize::AliasEntry;
use crate::pipeline::RowRejection;

pub(crate) fn catalog_entry_row(entry: &AliasEntry) -> CatalogEntryRow {
    CatalogEntryRow {
        priority: entry.priority,
        family: entry.family.to_string(),
        kind: entry.kind.as_str().to_string(),
        canonical_base: entry.canonical_base.clone(),
        canonical_output: entry.canonical_output.to_string(),
    }
}

pub(crate) fn clean_issue(rejection: &RowRejection) -> CleanIssue {
    CleanIssue {
        row: rejection.row,
        field: rejection.field().to_string(),
        code: rejection.error.code().to_string(),
        received: rejection.error.input().to_string(),
    }
}
