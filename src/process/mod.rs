// src/process/mod.rs
pub mod merge;
pub mod normalize;
pub mod project;
pub mod raw_table;
pub mod reader;
pub mod write;

use tracing::warn;

use crate::schema::{ColumnRoleMap, OutputTable};

pub use merge::merge_tables;
pub use project::{project, prune_leading_artifact};
pub use raw_table::RawTable;
pub use reader::{load_csv_any, load_csv_bytes, TextEncoding};
pub use write::to_csv_bytes;

/// Resolve `raw`'s columns, project every row onto the output schema and
/// drop a blank leading row.
pub fn clean_table(raw: &RawTable) -> OutputTable {
    let roles = ColumnRoleMap::resolve(&raw.headers);
    let missing = roles.unresolved();
    if !missing.is_empty() {
        warn!(?missing, headers = ?raw.headers, "no source column for some roles");
    }

    let mut out = project(raw, &roles);
    prune_leading_artifact(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_test_logging;

    #[test]
    fn test_clean_vendor_export() {
        init_test_logging();
        let content = "\
Name,Address,Email_Address,Phone_Number,match_score,desired_salary
,,,,,
mary-anne o'brien,Smith, A@B.COM ,1-555-123-4567,0.93,90000
JOHN DOE,Doe,john@EXAMPLE.com,(555) 987-6543,0.71,
,,,,,
";
        let raw = load_csv_bytes(content.as_bytes()).unwrap();
        assert_eq!(raw.row_count(), 4);

        let out = clean_table(&raw);
        assert_eq!(out.len(), 3);
        assert_eq!(
            out.records[0].fields(),
            ["Mary-Anne", "Smith", "a@b.com", "5551234567", ""]
        );
        assert_eq!(
            out.records[1].fields(),
            ["John", "Doe", "john@example.com", "5559876543", ""]
        );
        assert!(out.records[2].is_blank());
    }

    #[test]
    fn test_clean_plain_email_and_phone_columns() {
        let raw = load_csv_bytes(b"name,email,phone\nann,ANN@X.IO,555 0100\n").unwrap();
        let out = clean_table(&raw);
        assert_eq!(out.records[0].fields(), ["Ann", "", "ann@x.io", "5550100", ""]);
    }
}
