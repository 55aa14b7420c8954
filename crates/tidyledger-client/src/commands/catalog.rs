use crate::ClientResult;
use crate::commands::common::catalog_entry_row;
use crate::contracts::envelope::{CommandName, SuccessEnvelope, success};
use crate::contracts::types::CatalogData;
use crate::normalize::CanonicalCatalog;

pub fn run() -> ClientResult<SuccessEnvelope> {
    let catalog = CanonicalCatalog::builtin();
    let data = CatalogData {
        family_count: catalog.family_count(),
        entry_count: catalog.len(),
        identifiers: catalog
            .identifiers()
            .into_iter()
            .map(|id| id.to_string())
            .collect(),
        entries: catalog.entries().iter().map(catalog_entry_row).collect(),
    };
    success(CommandName::Catalog, data)
}
