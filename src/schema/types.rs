// src/schema/types.rs
use std::fmt;

/// Column names of every cleaned table, in output order.
pub const OUTPUT_COLUMNS: [&str; 5] = ["First Name", "Last Name", "Email", "Phone", "Status"];

/// Semantic categories that vendor columns are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Name,
    /// Vendor exports carry the last name in their `address` column.
    LastNameSource,
    Email,
    Phone,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Name, Role::LastNameSource, Role::Email, Role::Phone];

    /// Lowercase vendor column names accepted for this role, highest precedence first.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Role::Name => &["name"],
            Role::LastNameSource => &["address"],
            Role::Email => &["email_address", "email"],
            Role::Phone => &["phone_number", "phone"],
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Name => "name",
            Role::LastNameSource => "last_name_source",
            Role::Email => "email",
            Role::Phone => "phone",
        };
        f.write_str(s)
    }
}

/// One cleaned contact row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Reserved for the downstream recruiting system; always empty here.
    pub status: String,
}

impl OutputRecord {
    /// Field values in `OUTPUT_COLUMNS` order.
    pub fn fields(&self) -> [&str; 5] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.status.as_str(),
        ]
    }

    pub fn is_blank(&self) -> bool {
        self.fields().iter().all(|f| f.is_empty())
    }
}

/// Ordered cleaned rows. The column set is fixed by `OutputRecord`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    pub records: Vec<OutputRecord>,
}

impl OutputTable {
    pub fn new(records: Vec<OutputRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` rows (or fewer), for display.
    pub fn head(&self, n: usize) -> &[OutputRecord] {
        &self.records[..n.min(self.records.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_record() {
        assert!(OutputRecord::default().is_blank());
        let rec = OutputRecord {
            phone: "5551234567".into(),
            ..Default::default()
        };
        assert!(!rec.is_blank());
        assert_eq!(rec.fields()[3], "5551234567");
    }

    #[test]
    fn test_head_clamps_to_len() {
        let table = OutputTable::new(vec![OutputRecord::default(); 3]);
        assert_eq!(table.head(20).len(), 3);
        assert_eq!(table.head(2).len(), 2);
        assert!(OutputTable::default().head(20).is_empty());
    }

    #[test]
    fn test_role_synonym_precedence() {
        assert_eq!(Role::Email.synonyms()[0], "email_address");
        assert_eq!(Role::Phone.synonyms()[0], "phone_number");
        assert_eq!(Role::LastNameSource.to_string(), "last_name_source");
    }
}
