use crate::models::Record;
use crate::models::record::{NOTES, PASSWORD, TITLE, URL, USER_NAME};

/// Localized display labels for the well-known fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Label for `Title`
    pub title: String,
    /// Label for `UserName`
    pub user_name: String,
    /// Label for `Password`
    pub password: String,
    /// Label for `URL`
    pub url: String,
    /// Label for `Notes`
    pub notes: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Title".into(),
            user_name: "User Name".into(),
            password: "Password".into(),
            url: "URL".into(),
            notes: "Notes".into(),
        }
    }
}

/// One selectable field: its menu-escaped label and its record key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// Display label, `&` escaped as `&&`
    pub label: String,
    /// Key to pass back to the resolver
    pub key: String,
}

impl Labels {
    /// Localized label for a well-known key, otherwise the key itself
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        match key {
            TITLE => self.title.as_str(),
            USER_NAME => self.user_name.as_str(),
            PASSWORD => self.password.as_str(),
            URL => self.url.as_str(),
            NOTES => self.notes.as_str(),
            _ => key,
        }
    }

    /// Non-empty fields of `record`, stably sorted by escaped label.
    pub fn list_fields(&self, record: &Record) -> Vec<FieldEntry> {
        let mut entries: Vec<FieldEntry> = record
            .fields()
            .filter(|(key, _)| !record.is_field_empty(key))
            .map(|(key, _)| FieldEntry {
                label: escape_menu_text(self.translate(key)),
                key: key.to_owned(),
            })
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        entries
    }
}

/// [`Labels::translate`] with the default labels
pub fn translate_label(key: &str) -> String {
    Labels::default().translate(key).to_owned()
}

/// [`Labels::list_fields`] with the default labels
pub fn list_fields(record: &Record) -> Vec<FieldEntry> {
    Labels::default().list_fields(record)
}

/// Double every `&` so it is not taken as a menu accelerator marker.
pub fn escape_menu_text(label: &str) -> String {
    label.replace('&', "&&")
}
