//! Member roster: single-member management and spreadsheet import.

pub mod import;
pub mod service;

pub use import::{FIRST_DATA_ROW, HEADER_ROW, ImportOutcome, MembersImport, TabularMembersImport};
pub use service::MemberService;
