//! Reading tests - verify that the XLSX reader interprets hand-built packages.

mod data_types;
mod dates;
mod sheets;
