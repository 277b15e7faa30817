//! View filter over extracted results.

use super::record::ParsedRecord;

/// Case-insensitive text search combined with an optional operator match.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    search: String,
    operator: Option<String>,
}

impl ResultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substring searched in the display phone, name and email.
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_lowercase();
        self
    }

    /// Exact operator id to keep.
    pub fn with_operator(mut self, operator: &str) -> Self {
        self.operator = Some(operator.to_string()).filter(|op| !op.is_empty());
        self
    }

    pub fn matches(&self, record: &ParsedRecord) -> bool {
        let matches_search = [
            record.display_phone(),
            record.name_or_sentinel(),
            record.email_or_sentinel(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.search));

        let matches_operator = self
            .operator
            .as_deref()
            .map_or(true, |op| record.operator_id() == op);

        matches_search && matches_operator
    }

    pub fn apply<'r>(&self, records: &'r [ParsedRecord]) -> Vec<&'r ParsedRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
