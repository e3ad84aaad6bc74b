//! Credential fields: listing, placeholder expansion and payload resolution

/// Field listing and label translation
pub mod catalog;
/// Field key → payload text
pub mod resolver;
/// Placeholder expansion
pub mod template;

pub use catalog::{FieldEntry, Labels, escape_menu_text, list_fields, translate_label};
pub use resolver::{ResolvedField, otpauth_uri, resolve, resolve_with_labels};
pub use template::{ReferenceResolver, TemplateContext, Verbatim};
