pub mod struct_schema;

pub use struct_schema::generate_struct_schema;
