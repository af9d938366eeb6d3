// src/process/project.rs
use tracing::debug;

use crate::process::normalize::{extract_first_name, normalize_email, normalize_phone};
use crate::process::raw_table::RawTable;
use crate::schema::{ColumnRoleMap, ColumnSource, OutputRecord, OutputTable};

/// Build the fixed five-column table from `raw`, one record per source row.
/// Absent roles yield empty strings.
pub fn project(raw: &RawTable, roles: &ColumnRoleMap) -> OutputTable {
    let records = (0..raw.row_count())
        .map(|row| OutputRecord {
            first_name: extract_first_name(value(raw, &roles.name, row)),
            last_name: value(raw, &roles.last_name_source, row).to_string(),
            email: normalize_email(value(raw, &roles.email, row)),
            phone: normalize_phone(value(raw, &roles.phone, row)),
            status: String::new(),
        })
        .collect();

    OutputTable::new(records)
}

fn value<'a>(raw: &'a RawTable, source: &ColumnSource, row: usize) -> &'a str {
    source.index().map(|col| raw.cell(row, col)).unwrap_or("")
}

/// Drop row 0 when all of its fields are empty. Only the leading row is
/// checked; blank rows further down are kept. Returns whether a row was removed.
pub fn prune_leading_artifact(table: &mut OutputTable) -> bool {
    if table.records.first().is_some_and(OutputRecord::is_blank) {
        table.records.remove(0);
        debug!("dropped blank leading row");
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::reader::TextEncoding;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
            encoding: TextEncoding::Utf8,
        }
    }

    fn clean(table: &RawTable) -> OutputTable {
        let roles = ColumnRoleMap::resolve(&table.headers);
        let mut out = project(table, &roles);
        prune_leading_artifact(&mut out);
        out
    }

    #[test]
    fn test_projects_vendor_row() {
        let table = raw(
            &["Name", "Address", "Email_Address", "Phone_Number", "salary"],
            &[&[
                "Mary-Anne O'Brien",
                "Smith",
                " A@B.COM ",
                "1-555-123-4567",
                "90000",
            ]],
        );
        let out = clean(&table);
        assert_eq!(
            out.records,
            vec![OutputRecord {
                first_name: "Mary-Anne".into(),
                last_name: "Smith".into(),
                email: "a@b.com".into(),
                phone: "5551234567".into(),
                status: "".into(),
            }]
        );
    }

    #[test]
    fn test_last_name_is_verbatim() {
        let table = raw(&["address"], &[&["  van der BERG "]]);
        let out = clean(&table);
        assert_eq!(out.records[0].last_name, "  van der BERG ");
    }

    #[test]
    fn test_absent_roles_fill_empty() {
        let table = raw(&["name", "score"], &[&["ann lee", "7"], &["bo", "3"]]);
        let out = clean(&table);
        assert_eq!(out.len(), 2);
        for rec in &out.records {
            assert_eq!(rec.last_name, "");
            assert_eq!(rec.email, "");
            assert_eq!(rec.phone, "");
            assert_eq!(rec.status, "");
        }
        assert_eq!(out.records[1].first_name, "Bo");
    }

    #[test]
    fn test_only_leading_blank_row_is_pruned() {
        let table = raw(
            &["Name", "Email"],
            &[
                &["", ""],
                &["ann", "ann@x.io"],
                &["", "  "],
                &["bo", "bo@x.io"],
                &["", ""],
            ],
        );
        let out = clean(&table);
        assert_eq!(out.len(), 4);
        assert_eq!(out.records[0].first_name, "Ann");
        assert!(out.records[1].is_blank());
        assert!(out.records[3].is_blank());
    }

    #[test]
    fn test_pruning_uses_normalized_values() {
        // punctuation-only phone normalizes to empty, so the row is blank
        let table = raw(&["name", "phone"], &[&["   ", "--"], &["ann", "555"]]);
        let out = clean(&table);
        assert_eq!(out.len(), 1);
        assert_eq!(out.records[0].phone, "555");
    }

    #[test]
    fn test_pruning_applies_once() {
        let mut out = OutputTable::new(vec![OutputRecord::default(); 2]);
        assert!(prune_leading_artifact(&mut out));
        assert_eq!(out.len(), 1);

        let mut empty = OutputTable::default();
        assert!(!prune_leading_artifact(&mut empty));
    }

    #[test]
    fn test_unmapped_columns_only_still_counts_rows() {
        let table = raw(&["match_score"], &[&["1"], &["2"]]);
        let out = clean(&table);
        // every row is blank, but only the first is dropped
        assert_eq!(out.len(), 1);
    }
}
