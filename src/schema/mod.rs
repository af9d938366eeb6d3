pub mod resolve;
pub mod types;

pub use resolve::{ColumnRoleMap, ColumnSource};
pub use types::{OutputRecord, OutputTable, Role, OUTPUT_COLUMNS};
