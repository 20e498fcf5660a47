//! Bulk member import from spreadsheet-shaped rows.
//!
//! ## Summary
//! The sheet layout follows the church's roster export: four banner rows,
//! the column header on row 5, and one member per row from row 6 onward.
//! Row numbers in error messages are the 1-based spreadsheet rows so that
//! users can find the offending line.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ServiceResult;
use crate::model::{Member, MemberId};
use crate::repository::MemberRepository;

/// 1-based row holding the column names.
pub const HEADER_ROW: usize = 5;
/// 1-based row of the first member.
pub const FIRST_DATA_ROW: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub imported: usize,
    pub row_errors: Vec<String>,
}

impl ImportOutcome {
    fn failed(row_errors: Vec<String>) -> Self {
        Self {
            success: false,
            imported: 0,
            row_errors,
        }
    }
}

pub trait MembersImport {
    /// Applies the import. Either every row is written or none is.
    ///
    /// ## Errors
    /// Returns an error only when the repository fails; invalid rows are
    /// reported through [`ImportOutcome::row_errors`].
    fn save(&mut self) -> ServiceResult<ImportOutcome>;
}

/// ## Summary
/// Imports members from a grid of string cells.
///
/// An `id` column, when present and filled, updates the stored member with
/// that id; otherwise a new member is created. Unknown columns are ignored
/// and fully blank rows are skipped.
pub struct TabularMembersImport {
    members: Arc<dyn MemberRepository>,
    rows: Vec<Vec<String>>,
}

impl TabularMembersImport {
    #[must_use]
    pub fn new(members: Arc<dyn MemberRepository>, rows: Vec<Vec<String>>) -> Self {
        Self { members, rows }
    }

    fn header(&self) -> Option<Vec<String>> {
        let header: Vec<String> = self
            .rows
            .get(HEADER_ROW - 1)?
            .iter()
            .map(|cell| normalize_column(cell))
            .collect();
        header.iter().any(|name| !name.is_empty()).then_some(header)
    }

    fn load_member(
        &self,
        header: &[String],
        cells: &[String],
    ) -> ServiceResult<Result<Member, Vec<String>>> {
        let row: HashMap<&str, &str> = header
            .iter()
            .zip(cells)
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        let mut member = match row.get("id").map(|id| id.trim()).filter(|id| !id.is_empty()) {
            Some(raw) => match raw.parse::<MemberId>() {
                Ok(id) => self
                    .members
                    .get(id)?
                    .unwrap_or_else(|| Member::blank(id)),
                Err(_) => return Ok(Err(vec!["Id is invalid".to_string()])),
            },
            None => Member::blank(MemberId::generate()),
        };

        for (name, value) in &row {
            if *name != "id" {
                member.assign(name, value);
            }
        }

        let errors = member.validation_errors();
        Ok(if errors.is_empty() {
            Ok(member)
        } else {
            Err(errors)
        })
    }
}

impl MembersImport for TabularMembersImport {
    #[tracing::instrument(skip(self), fields(rows = self.rows.len()))]
    fn save(&mut self) -> ServiceResult<ImportOutcome> {
        let Some(header) = self.header() else {
            return Ok(ImportOutcome::failed(vec![format!(
                "Row {HEADER_ROW}: header row is missing"
            )]));
        };

        let mut loaded = Vec::new();
        let mut row_errors = Vec::new();
        for (offset, cells) in self.rows.iter().skip(FIRST_DATA_ROW - 1).enumerate() {
            if cells.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let row_number = FIRST_DATA_ROW + offset;
            match self.load_member(&header, cells)? {
                Ok(member) => loaded.push(member),
                Err(messages) => row_errors.extend(
                    messages
                        .into_iter()
                        .map(|message| format!("Row {row_number}: {message}")),
                ),
            }
        }

        if !row_errors.is_empty() {
            tracing::warn!(errors = row_errors.len(), "Member import rejected");
            return Ok(ImportOutcome::failed(row_errors));
        }

        let imported = loaded.len();
        self.members.upsert_all(loaded)?;
        tracing::info!(imported, "Members imported");
        Ok(ImportOutcome {
            success: true,
            imported,
            row_errors,
        })
    }
}

/// `" First Name "` becomes `first_name`.
fn normalize_column(cell: &str) -> String {
    cell.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
