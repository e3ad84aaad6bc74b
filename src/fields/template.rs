//! Placeholder expansion for stored field text.
//!
//! The resolver only depends on [`TemplateContext`]. [`ReferenceResolver`]
//! covers the placeholders credential stores commonly use:
//!
//! - `{TITLE}`, `{USERNAME}`, `{PASSWORD}`, `{URL}`, `{NOTES}` on the same record
//! - `{S:<name>}` for a custom field on the same record
//! - `{REF:<W>@<S>:<value>}` for field `W` of the first record whose field `S`
//!   matches `value`, with `W`/`S` one of `T`, `U`, `P`, `A`, `N`, `I` (id)
//!
//! Anything else between braces is kept verbatim.

use crate::error::TemplateError;
use crate::models::Record;
use crate::models::record::{NOTES, PASSWORD, TITLE, URL, USER_NAME};

/// Maximum nesting of placeholder expansion before a reference is treated as
/// recursive
pub const MAX_EXPANSION_DEPTH: usize = 12;

/// Expands placeholders in stored text in the context of a record.
pub trait TemplateContext {
    /// Return `text` with every placeholder substituted.
    fn expand(&self, text: &str, record: &Record) -> Result<String, TemplateError>;
}

/// Context that returns text unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl TemplateContext for Verbatim {
    fn expand(&self, text: &str, _record: &Record) -> Result<String, TemplateError> {
        Ok(text.to_owned())
    }
}

/// Field selector inside a `{REF:...}` placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefField {
    Field(&'static str),
    Id,
}

impl RefField {
    fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            return None;
        };
        match letter.to_ascii_uppercase() {
            'T' => Some(RefField::Field(TITLE)),
            'U' => Some(RefField::Field(USER_NAME)),
            'P' => Some(RefField::Field(PASSWORD)),
            'A' => Some(RefField::Field(URL)),
            'N' => Some(RefField::Field(NOTES)),
            'I' => Some(RefField::Id),
            _ => None,
        }
    }
}

/// Expands same-record placeholders and cross-record references over a set of
/// records.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    records: &'a [Record],
}

impl<'a> ReferenceResolver<'a> {
    /// Resolver searching `records` for `{REF:...}` targets
    pub fn new(records: &'a [Record]) -> Self {
        Self { records }
    }

    fn expand_at(
        &self,
        text: &str,
        record: &Record,
        depth: usize,
    ) -> Result<String, TemplateError> {
        if depth > MAX_EXPANSION_DEPTH {
            return Err(TemplateError::Recursion(text.to_owned()));
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                return Ok(out);
            };
            let token = &after[..close];
            match self.lookup(token, record, depth)? {
                Some(value) => out.push_str(&value),
                None => {
                    out.push('{');
                    out.push_str(token);
                    out.push('}');
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn lookup(
        &self,
        token: &str,
        record: &Record,
        depth: usize,
    ) -> Result<Option<String>, TemplateError> {
        let upper = token.to_ascii_uppercase();

        if upper.starts_with("REF:") {
            return self.lookup_reference(token, &token[4..], depth).map(Some);
        }
        if upper.starts_with("S:") {
            let name = &token[2..];
            return match record.field(name) {
                Some(raw) => self.expand_at(raw, record, depth + 1).map(Some),
                None => Ok(None),
            };
        }

        let key = match upper.as_str() {
            "TITLE" => TITLE,
            "USERNAME" => USER_NAME,
            "PASSWORD" => PASSWORD,
            "URL" => URL,
            "NOTES" => NOTES,
            _ => return Ok(None),
        };
        let raw = record.field(key).unwrap_or_default();
        self.expand_at(raw, record, depth + 1).map(Some)
    }

    fn lookup_reference(
        &self,
        token: &str,
        body: &str,
        depth: usize,
    ) -> Result<String, TemplateError> {
        let malformed = || TemplateError::Malformed(token.to_owned());
        let (wanted, search) = body.split_once('@').ok_or_else(malformed)?;
        let (scan, value) = search.split_once(':').ok_or_else(malformed)?;
        let wanted = RefField::from_code(wanted).ok_or_else(malformed)?;
        let scan = RefField::from_code(scan).ok_or_else(malformed)?;

        let target = self
            .find(scan, value)
            .ok_or_else(|| TemplateError::TargetNotFound(token.to_owned()))?;

        match wanted {
            RefField::Id => Ok(target.id().to_owned()),
            RefField::Field(key) => {
                let raw = target.field(key).unwrap_or_default();
                self.expand_at(raw, target, depth + 1)
            }
        }
    }

    /// First record whose `scan` field matches `value`. Ids compare
    /// case-insensitively; text fields match on a case-insensitive substring.
    fn find(&self, scan: RefField, value: &str) -> Option<&'a Record> {
        match scan {
            RefField::Id => self
                .records
                .iter()
                .find(|r| r.id().eq_ignore_ascii_case(value)),
            RefField::Field(key) => {
                let needle = value.to_lowercase();
                self.records.iter().find(|r| {
                    r.field(key)
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
                })
            }
        }
    }
}

impl TemplateContext for ReferenceResolver<'_> {
    fn expand(&self, text: &str, record: &Record) -> Result<String, TemplateError> {
        self.expand_at(text, record, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Vec<Record> {
        vec![
            Record::new("A1B2")
                .with_field(TITLE, "Mail")
                .with_field(USER_NAME, "alice")
                .with_field(PASSWORD, "s3cret"),
            Record::new("C3D4")
                .with_field(TITLE, "Mail alias")
                .with_field(USER_NAME, "{REF:U@I:A1B2}")
                .with_field(PASSWORD, "{REF:P@T:mail}")
                .with_field("Pin", "{S:Other}-{USERNAME}")
                .with_field("Other", "x"),
        ]
    }

    #[test]
    fn test_verbatim() {
        let record = Record::new("r");
        assert_eq!(Verbatim.expand("{TITLE}", &record).unwrap(), "{TITLE}");
    }

    #[test]
    fn test_same_record_placeholders() {
        let records = store();
        let resolver = ReferenceResolver::new(&records);
        let text = resolver
            .expand("{title}: {UserName}/{PASSWORD}", &records[0])
            .unwrap();
        assert_eq!(text, "Mail: alice/s3cret");
    }

    #[test]
    fn test_custom_field_and_nested_reference() {
        let records = store();
        let resolver = ReferenceResolver::new(&records);
        let pin = records[1].field("Pin").unwrap();
        assert_eq!(resolver.expand(pin, &records[1]).unwrap(), "x-alice");
    }

    #[test]
    fn test_reference_by_id_and_title() {
        let records = store();
        let resolver = ReferenceResolver::new(&records);
        let expand = |text: &str| resolver.expand(text, &records[1]).unwrap();
        assert_eq!(expand("{REF:U@I:a1b2}"), "alice");
        assert_eq!(expand("{REF:P@T:mail}"), "s3cret");
        assert_eq!(expand("{REF:I@U:ALICE}"), "A1B2");
    }

    #[test]
    fn test_unknown_placeholders_kept() {
        let records = store();
        let resolver = ReferenceResolver::new(&records);
        let text = resolver
            .expand("{DB_DIR} {S:Missing} {open", &records[0])
            .unwrap();
        assert_eq!(text, "{DB_DIR} {S:Missing} {open");
    }

    #[test]
    fn test_self_reference_is_recursion() {
        let records = vec![Record::new("loop").with_field(PASSWORD, "a{PASSWORD}")];
        let resolver = ReferenceResolver::new(&records);
        let err = resolver.expand("{PASSWORD}", &records[0]).unwrap_err();
        assert!(matches!(err, TemplateError::Recursion(_)));
    }

    #[test]
    fn test_cyclic_reference_is_recursion() {
        let records = vec![
            Record::new("one").with_field(PASSWORD, "{REF:P@I:two}"),
            Record::new("two").with_field(PASSWORD, "{REF:P@I:one}"),
        ];
        let resolver = ReferenceResolver::new(&records);
        let err = resolver.expand("{PASSWORD}", &records[0]).unwrap_err();
        assert!(matches!(err, TemplateError::Recursion(_)));
    }

    #[test]
    fn test_missing_and_malformed_references() {
        let records = store();
        let resolver = ReferenceResolver::new(&records);
        assert_eq!(
            resolver.expand("{REF:P@I:nope}", &records[0]),
            Err(TemplateError::TargetNotFound("REF:P@I:nope".into()))
        );
        assert_eq!(
            resolver.expand("{REF:P}", &records[0]),
            Err(TemplateError::Malformed("REF:P".into()))
        );
        assert_eq!(
            resolver.expand("{REF:X@I:A1B2}", &records[0]),
            Err(TemplateError::Malformed("REF:X@I:A1B2".into()))
        );
    }
}
