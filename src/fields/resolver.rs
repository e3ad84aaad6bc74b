use super::catalog::Labels;
use super::template::TemplateContext;
use crate::error::{Error, Result};
use crate::models::Record;
use crate::models::record::{OTP, TITLE};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// Marker an OTP field value starts with when it holds a bare secret
pub const OTP_SECRET_PREFIX: &str = "key=";

/// A field resolved to the exact text to encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Record key of the field
    pub key: String,
    /// Translated label (not menu-escaped)
    pub display_label: String,
    /// Fully expanded text, OTP rewrite applied
    pub payload: String,
}

/// Resolve `key` on `record` with the default labels.
pub fn resolve<C>(record: &Record, key: &str, context: &C) -> Result<ResolvedField>
where
    C: TemplateContext + ?Sized,
{
    resolve_with_labels(record, key, context, &Labels::default())
}

/// Resolve `key` on `record`: read, expand placeholders, then rewrite an OTP
/// secret into an `otpauth://` URI.
pub fn resolve_with_labels<C>(
    record: &Record,
    key: &str,
    context: &C,
    labels: &Labels,
) -> Result<ResolvedField>
where
    C: TemplateContext + ?Sized,
{
    let raw = record
        .field(key)
        .ok_or_else(|| Error::FieldNotFound(key.to_owned()))?;
    let expanded = context.expand(raw, record)?;

    let payload = if key == OTP && expanded.starts_with(OTP_SECRET_PREFIX) {
        let title = context.expand(record.field(TITLE).unwrap_or_default(), record)?;
        log::debug!("rewriting OTP secret of record {} as otpauth URI", record.id());
        otpauth_uri(&title, &expanded)
    } else {
        expanded
    };

    Ok(ResolvedField {
        key: key.to_owned(),
        display_label: labels.translate(key).to_owned(),
        payload,
    })
}

/// Build `otpauth://totp/{title}?secret={secret}`.
///
/// Every title byte outside `[A-Za-z0-9]` is percent-encoded. The secret is
/// `value` with the first occurrence of `key=` removed, wherever it appears.
pub fn otpauth_uri(title: &str, value: &str) -> String {
    let secret = value.replacen(OTP_SECRET_PREFIX, "", 1);
    format!(
        "otpauth://totp/{}?secret={}",
        utf8_percent_encode(title, NON_ALPHANUMERIC),
        secret
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateError;
    use crate::fields::template::{ReferenceResolver, Verbatim};
    use crate::models::record::{PASSWORD, USER_NAME};

    struct Failing;

    impl TemplateContext for Failing {
        fn expand(
            &self,
            text: &str,
            _record: &Record,
        ) -> std::result::Result<String, TemplateError> {
            Err(TemplateError::TargetNotFound(text.to_owned()))
        }
    }

    #[test]
    fn test_otp_rewrite() {
        let record = Record::new("r")
            .with_field(TITLE, "My Site")
            .with_field(OTP, "key=ABC123");
        let resolved = resolve(&record, OTP, &Verbatim).unwrap();
        assert_eq!(resolved.payload, "otpauth://totp/My%20Site?secret=ABC123");
        assert_eq!(resolved.key, "otp");
        assert_eq!(resolved.display_label, "otp");
    }

    #[test]
    fn test_otp_title_escaping() {
        assert_eq!(
            otpauth_uri("A&B Co.", "key=S"),
            "otpauth://totp/A%26B%20Co%2E?secret=S"
        );
        assert_eq!(
            otpauth_uri("a-b_c~d", "key=S"),
            "otpauth://totp/a%2Db%5Fc%7Ed?secret=S"
        );
        assert_eq!(otpauth_uri("Ü", "key=S"), "otpauth://totp/%C3%9C?secret=S");
    }

    #[test]
    fn test_otp_removes_first_occurrence_only() {
        assert_eq!(
            otpauth_uri("T", "key=ABCkey=DEF"),
            "otpauth://totp/T?secret=ABCkey=DEF"
        );
    }

    #[test]
    fn test_otp_without_prefix_untouched() {
        let record = Record::new("r")
            .with_field(TITLE, "Site")
            .with_field(OTP, "otpauth://totp/Site?secret=XYZ");
        let resolved = resolve(&record, OTP, &Verbatim).unwrap();
        assert_eq!(resolved.payload, "otpauth://totp/Site?secret=XYZ");
    }

    #[test]
    fn test_non_otp_field_never_rewritten() {
        let record = Record::new("r")
            .with_field(TITLE, "Site")
            .with_field(PASSWORD, "key=ABC123")
            .with_field("OTP", "key=ABC123");
        for key in [PASSWORD, "OTP"] {
            let resolved = resolve(&record, key, &Verbatim).unwrap();
            assert_eq!(resolved.payload, "key=ABC123", "{key}");
        }
    }

    #[test]
    fn test_otp_uses_expanded_values() {
        let records = vec![
            Record::new("src")
                .with_field(TITLE, "Bank {USERNAME}")
                .with_field(USER_NAME, "bob")
                .with_field(PASSWORD, "key=JBSWY3DP")
                .with_field(OTP, "{PASSWORD}"),
        ];
        let resolver = ReferenceResolver::new(&records);
        let resolved = resolve(&records[0], OTP, &resolver).unwrap();
        assert_eq!(resolved.payload, "otpauth://totp/Bank%20bob?secret=JBSWY3DP");
    }

    #[test]
    fn test_display_label_translated() {
        let record = Record::new("r").with_field(USER_NAME, "alice");
        let resolved = resolve(&record, USER_NAME, &Verbatim).unwrap();
        assert_eq!(resolved.display_label, "User Name");
        assert_eq!(resolved.payload, "alice");
    }

    #[test]
    fn test_empty_payload_allowed() {
        let record = Record::new("r").with_field("Empty", "");
        assert_eq!(resolve(&record, "Empty", &Verbatim).unwrap().payload, "");
    }

    #[test]
    fn test_missing_field() {
        let record = Record::new("r").with_field(TITLE, "Site");
        let err = resolve(&record, "Nope", &Verbatim).unwrap_err();
        assert!(matches!(err, Error::FieldNotFound(ref k) if k == "Nope"));
    }

    #[test]
    fn test_template_failure_propagates() {
        let record = Record::new("r").with_field(PASSWORD, "{REF:P@I:x}");
        let err = resolve(&record, PASSWORD, &Failing).unwrap_err();
        assert!(matches!(
            err,
            Error::TemplateResolution(TemplateError::TargetNotFound(_))
        ));
    }
}
