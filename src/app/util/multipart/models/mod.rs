pub mod file_properties;
pub mod form_parts;
