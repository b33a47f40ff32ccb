use std::collections::HashMap;

use super::file_properties::FileProperties;

/// Text fields and the uploaded file of one multipart body.
#[derive(Debug, Default)]
pub struct FormParts {
    pub fields: HashMap<String, String>,
    pub file: Option<FileProperties>,
}

impl FormParts {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|value| value.as_str())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}
