//! Enums shared by every stored row of the link service.

pub mod row_status;
pub mod visibility;

pub use row_status::RowStatus;
pub use visibility::Visibility;
