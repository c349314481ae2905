//! Cell addressing and scalar values

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::CellValue;
