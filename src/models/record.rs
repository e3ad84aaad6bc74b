use std::collections::BTreeMap;

/// Key of the title field
pub const TITLE: &str = "Title";
/// Key of the user name field
pub const USER_NAME: &str = "UserName";
/// Key of the password field
pub const PASSWORD: &str = "Password";
/// Key of the URL field
pub const URL: &str = "URL";
/// Key of the notes field
pub const NOTES: &str = "Notes";
/// Reserved key holding a one-time-password seed (`key=<secret>`)
pub const OTP: &str = "otp";

/// A credential record: an id plus a map from field key to stored text.
///
/// Fields iterate in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    id: String,
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(key, value);
        self
    }

    /// Insert or replace a field
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Record id, used by `{REF:..@I:..}` lookups
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stored text of a field, if present
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Whether the field is absent or stores empty text
    pub fn is_field_empty(&self, key: &str) -> bool {
        self.field(key).is_none_or(str::is_empty)
    }

    /// Raw title text, empty when the record has none
    pub fn title(&self) -> &str {
        self.field(TITLE).unwrap_or_default()
    }

    /// All fields in key order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
