use chrono::{DateTime, Utc};
use scraper::Html;

use crate::assemble::{assemble, ExtractedFields};
use crate::detect::detect;
use crate::legacy;
use crate::models::{Dialect, ResumeRecord};
use crate::modern;
use crate::selectors::SelectorTable;

pub struct ResumeExtractor {
    table: SelectorTable,
}

impl ResumeExtractor {
    pub fn new(table: SelectorTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SelectorTable {
        &self.table
    }

    pub fn fields(&self, doc: &Html) -> ExtractedFields {
        let dialect = detect(doc, &self.table);
        tracing::info!(dialect = dialect.as_str(), "detected profile layout");
        match dialect {
            Dialect::Modern => ExtractedFields::Modern(modern::extract(doc, &self.table.modern)),
            Dialect::Legacy => ExtractedFields::Legacy(legacy::extract(doc, &self.table.legacy)),
        }
    }

    pub fn extract_at(&self, doc: &Html, timestamp: DateTime<Utc>) -> ResumeRecord {
        assemble(&self.fields(doc), timestamp)
    }

    pub fn extract(&self, doc: &Html) -> ResumeRecord {
        self.extract_at(doc, Utc::now())
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::new(SelectorTable::default())
    }
}
