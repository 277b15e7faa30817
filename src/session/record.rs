//! Record types produced by the bulk extractor and the single validator.
//!
//! Records are immutable once built: fields are private and only readable
//! through accessors.

use crate::domain::contact::or_not_provided;
use crate::domain::Classification;

pub const STATUS_VALID: &str = "Valid";
pub const STATUS_INVALID: &str = "Invalid";

/// Renders a validity flag as the status label used in tables and exports.
pub fn status_label(is_valid: bool) -> &'static str {
    if is_valid {
        STATUS_VALID
    } else {
        STATUS_INVALID
    }
}

/// One phone number extracted from a spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    original_text: String,
    raw_phone_digits: String,
    normalized_phone: String,
    display_phone: String,
    name: Option<String>,
    email: Option<String>,
    operator_id: String,
    operator_name: String,
    is_valid: bool,
    processed_at: String,
}

impl ParsedRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        original_text: String,
        raw_phone_digits: String,
        normalized_phone: String,
        display_phone: String,
        name: Option<String>,
        email: Option<String>,
        classification: Classification,
        processed_at: String,
    ) -> Self {
        Self {
            original_text,
            raw_phone_digits,
            normalized_phone,
            display_phone,
            name,
            email,
            operator_id: classification.operator_id,
            operator_name: classification.operator_name,
            is_valid: classification.is_valid,
            processed_at,
        }
    }

    /// Cell text after whitespace normalization.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Digits of the matched substring before trunk-prefix rewriting.
    pub fn raw_phone_digits(&self) -> &str {
        &self.raw_phone_digits
    }

    pub fn normalized_phone(&self) -> &str {
        &self.normalized_phone
    }

    pub fn display_phone(&self) -> &str {
        &self.display_phone
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Name, or the "not provided" sentinel.
    pub fn name_or_sentinel(&self) -> &str {
        or_not_provided(self.name())
    }

    /// Email, or the "not provided" sentinel.
    pub fn email_or_sentinel(&self) -> &str {
        or_not_provided(self.email())
    }

    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn status(&self) -> &'static str {
        status_label(self.is_valid)
    }

    pub fn processed_at(&self) -> &str {
        &self.processed_at
    }
}

/// One manual validation, as kept in the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRecord {
    country_prefix: String,
    raw_digits: String,
    full_number: String,
    operator_name: String,
    is_valid: bool,
    processed_at: String,
}

impl ValidationRecord {
    pub(crate) fn new(
        country_prefix: String,
        raw_digits: String,
        full_number: String,
        operator_name: String,
        is_valid: bool,
        processed_at: String,
    ) -> Self {
        Self {
            country_prefix,
            raw_digits,
            full_number,
            operator_name,
            is_valid,
            processed_at,
        }
    }

    pub fn country_prefix(&self) -> &str {
        &self.country_prefix
    }

    /// The digits exactly as the user entered them.
    pub fn raw_digits(&self) -> &str {
        &self.raw_digits
    }

    pub fn full_number(&self) -> &str {
        &self.full_number
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn status(&self) -> &'static str {
        status_label(self.is_valid)
    }

    pub fn processed_at(&self) -> &str {
        &self.processed_at
    }
}
