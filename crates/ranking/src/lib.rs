pub mod dto;
pub mod editor;
pub mod export;
pub mod models;
pub mod table;
pub mod tag;

pub use models::{Program, Report, ReportName, Round, Student};
pub use table::{Column, RankingRow, RankingTable, ReportCell, build_table};
pub use tag::TagKind;
