pub mod field_parser;
