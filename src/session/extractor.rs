//! Bulk extraction over spreadsheet rows.

use super::record::ParsedRecord;
use crate::clock::Clock;
use crate::domain::{
    EmailMatcher, FieldMatcher, NameMatcher, OperatorTable, PhoneNumberMatcher, TextCleaner,
};
use log::{debug, info};

/// Turns cell text into classified [`ParsedRecord`]s.
///
/// Holds a borrowed operator table; the matchers themselves are stateless.
pub struct Extractor<'t> {
    table: &'t OperatorTable,
    phones: PhoneNumberMatcher,
    names: NameMatcher,
    emails: EmailMatcher,
}

impl<'t> Extractor<'t> {
    pub fn new(table: &'t OperatorTable) -> Self {
        Self {
            table,
            phones: PhoneNumberMatcher::new(),
            names: NameMatcher::new(),
            emails: EmailMatcher::new(),
        }
    }

    /// Extracts and classifies the first phone number in `content`.
    ///
    /// Name and email are looked up independently. Returns `None` when the
    /// text holds no phone number, even if a name or email was found.
    pub fn parse_cell(&self, content: &str, clock: &dyn Clock) -> Option<ParsedRecord> {
        let cleaned = TextCleaner::collapse_whitespace(content);

        let Some(phone) = self.phones.normalize(&cleaned) else {
            debug!("no phone number in '{}'", cleaned);
            return None;
        };

        let name = self.names.find_first(&cleaned).map(str::to_string);
        let email = self.emails.find_first(&cleaned).map(str::to_string);
        let classification = self.table.classify_national(&phone.normalized);
        let display_phone = PhoneNumberMatcher::format_display(&phone.normalized);

        Some(ParsedRecord::new(
            cleaned,
            phone.raw_digits,
            phone.normalized,
            display_phone,
            name,
            email,
            classification,
            clock.now(),
        ))
    }

    /// Processes rows in order, reading only the first cell of each.
    ///
    /// Row 0 is a header and always skipped. `progress` receives an integer
    /// percentage after every data row; values never decrease and the last
    /// one is always 100.
    pub fn process_rows<F>(
        &self,
        rows: &[Vec<String>],
        clock: &dyn Clock,
        mut progress: F,
    ) -> Vec<ParsedRecord>
    where
        F: FnMut(u8),
    {
        let total = rows.len().saturating_sub(1);
        let mut records = Vec::new();

        for (done, row) in rows.iter().skip(1).enumerate() {
            match row.first().filter(|cell| !cell.is_empty()) {
                Some(cell) => {
                    if let Some(record) = self.parse_cell(cell, clock) {
                        records.push(record);
                    }
                }
                None => debug!("row {} has no first cell, skipped", done + 1),
            }
            progress(percent(done + 1, total));
        }

        if total == 0 {
            progress(100);
        }

        info!(
            "extracted {} record(s) from {} data row(s)",
            records.len(),
            total
        );
        records
    }
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done * 100 + total / 2) / total).min(100) as u8
}
