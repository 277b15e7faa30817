//! Phone number extraction and operator classification for spreadsheet text.
//!
//! This library finds a Russian phone number (plus an optional Cyrillic full
//! name and email) in free-form cell text, normalizes it to `7` followed by
//! ten digits, and classifies it against an ordered table of operator
//! patterns.
//!
//! # Features
//!
//! - **Bulk extraction**: first cell of every data row, header skipped
//! - **Single validation**: digits checked against one selected operator
//! - **Operator rules**: built-in table or a JSON rules file
//! - **Interchange files**: CSV export of results and history, history import
//!
//! # Architecture
//!
//! - [`domain`]: Matchers and the operator rule table
//! - [`session`]: Record assembly, result filtering and session state
//! - [`interchange`]: Delimited text reading and writing
//! - [`clock`]: Timestamp source
//! - [`error`]: Error handling
//!
//! # Quick Start
//!
//! ```
//! use numsift::{Extractor, FixedClock, OperatorTable};
//!
//! let table = OperatorTable::builtin();
//! let extractor = Extractor::new(&table);
//! let clock = FixedClock::new("16.10.2026, 09:30:00", "2026-10-16");
//!
//! let record = extractor
//!     .parse_cell("Иванов Иван 8(923)456-78-90 ivan@mail.ru", &clock)
//!     .unwrap();
//! assert_eq!(record.display_phone(), "+7 (923) 456-78-90");
//! assert_eq!(record.operator_id(), "megafon");
//! assert!(record.is_valid());
//! ```
//!
//! ## Single validation
//!
//! ```
//! use numsift::{FixedClock, OperatorTable, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = OperatorTable::builtin();
//! let mut session = Session::new(&table);
//! let clock = FixedClock::new("16.10.2026, 09:30:00", "2026-10-16");
//!
//! let record = session.validate("+7", "mts", "9876543210", &clock)?;
//! assert!(!record.is_valid());
//! assert_eq!(session.history().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod domain;
pub mod error;
pub mod interchange;
pub mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    Classification, EmailMatcher, FieldMatcher, NameMatcher, OperatorRule, OperatorScope,
    OperatorTable, PhoneNumberMatcher,
};
pub use error::{NumsiftError, NumsiftResult};
pub use interchange::DelimitedConfig;
pub use session::{Extractor, ParsedRecord, ResultFilter, Session, ValidationRecord};
