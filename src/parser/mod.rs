pub mod field_parser;

pub use field_parser::{parse_record, Category, Record, SUMMARY_TOKEN_LIMIT};
