use crate::schema::OutputTable;

/// Concatenate cleaned tables in the given order, keeping each table's row order.
pub fn merge_tables<'a, I>(tables: I) -> OutputTable
where
    I: IntoIterator<Item = &'a OutputTable>,
{
    let records = tables
        .into_iter()
        .flat_map(|t| t.records.iter().cloned())
        .collect();
    OutputTable::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OutputRecord;

    fn table(names: &[&str]) -> OutputTable {
        OutputTable::new(
            names
                .iter()
                .map(|n| OutputRecord {
                    first_name: n.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn test_merge_preserves_file_and_row_order() {
        let a = table(&["A1", "A2", "A3"]);
        let b = table(&["B1", "B2"]);
        let merged = merge_tables([&a, &b]);
        assert_eq!(merged.len(), a.len() + b.len());
        let names: Vec<&str> = merged
            .records
            .iter()
            .map(|r| r.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["A1", "A2", "A3", "B1", "B2"]);
    }

    #[test]
    fn test_merge_with_empty_tables() {
        let empty = OutputTable::default();
        let b = table(&["B1"]);
        assert_eq!(merge_tables([&empty, &b, &empty]), b);
        assert!(merge_tables(std::iter::empty()).is_empty());
    }
}
