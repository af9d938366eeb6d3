// src/schema/resolve.rs
use std::collections::HashMap;
use tracing::debug;

use crate::schema::types::Role;

/// Where a role's values come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// A column of the raw table, by position and original-case header.
    Column { index: usize, name: String },
    /// No matching column; the output column is all empty strings.
    Absent,
}

impl ColumnSource {
    pub fn index(&self) -> Option<usize> {
        match self {
            ColumnSource::Column { index, .. } => Some(*index),
            ColumnSource::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ColumnSource::Absent)
    }
}

/// Resolved source column for every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoleMap {
    pub name: ColumnSource,
    pub last_name_source: ColumnSource,
    pub email: ColumnSource,
    pub phone: ColumnSource,
}

impl ColumnRoleMap {
    /// Match `headers` case-insensitively against each role's synonyms.
    /// When two headers lowercase to the same key, the later one wins.
    pub fn resolve(headers: &[String]) -> Self {
        let lowered: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_lowercase(), i))
            .collect();

        let pick = |role: Role| {
            let source = role
                .synonyms()
                .iter()
                .find_map(|syn| lowered.get(*syn))
                .map(|&index| ColumnSource::Column {
                    index,
                    name: headers[index].clone(),
                })
                .unwrap_or(ColumnSource::Absent);
            debug!(%role, ?source, "resolved role");
            source
        };

        Self {
            name: pick(Role::Name),
            last_name_source: pick(Role::LastNameSource),
            email: pick(Role::Email),
            phone: pick(Role::Phone),
        }
    }

    pub fn get(&self, role: Role) -> &ColumnSource {
        match role {
            Role::Name => &self.name,
            Role::LastNameSource => &self.last_name_source,
            Role::Email => &self.email,
            Role::Phone => &self.phone,
        }
    }

    /// Roles with no matching column.
    pub fn unresolved(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|r| self.get(*r).is_absent())
            .collect()
    }
}
