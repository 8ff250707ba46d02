use scraper::Html;

use crate::dom::{any_match, selector};
use crate::models::Dialect;
use crate::selectors::SelectorTable;

// Modern if any card-layout marker is present, legacy otherwise. Legacy is
// also the answer for a page with no markers at all; the legacy sections
// then report their own "not found" values.
pub fn detect(doc: &Html, table: &SelectorTable) -> Dialect {
    if any_match(doc, &table.modern.markers) {
        Dialect::Modern
    } else {
        Dialect::Legacy
    }
}

pub fn has_resume_markers(doc: &Html, table: &SelectorTable) -> bool {
    if any_match(doc, &table.modern.markers) {
        return true;
    }
    selector(&format!(".{}", table.legacy.line))
        .is_some_and(|sel| doc.select(&sel).next().is_some())
}
