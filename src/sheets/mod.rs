pub mod client;
pub mod types;
pub mod values;

pub use client::SheetsClient;
pub use types::{load_grid, parse_grid, project_members, ValueRange};
pub use values::SheetsError;
