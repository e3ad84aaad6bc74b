//! credential_qr - show credential record fields as QR codes
//!
//! Lists the fields of a record, resolves the selected one into the exact text
//! to encode (placeholder expansion, `otpauth://` rewrite for OTP secrets),
//! encodes it and rasterizes the module matrix into an image the caller can
//! display, print or save.
//!
//! ```
//! use credential_qr::{QrFieldView, Record, Verbatim};
//!
//! let record = Record::new("1")
//!     .with_field("Title", "My Site")
//!     .with_field("otp", "key=JBSWY3DPEHPK3PXP");
//!
//! let view = QrFieldView::new();
//! let keys: Vec<String> = view.fields(&record).into_iter().map(|f| f.key).collect();
//! assert_eq!(keys, ["Title", "otp"]);
//!
//! let shown = view.show(&record, "otp", &Verbatim).unwrap();
//! assert_eq!(shown.field.payload, "otpauth://totp/My%20Site?secret=JBSWY3DPEHPK3PXP");
//! assert_eq!(shown.window_title(), "My Site - otp");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment-driven render settings
pub mod config;
/// Payload text → module matrix
pub mod encoder;
/// Error types
pub mod error;
/// Field listing, placeholder expansion and payload resolution
pub mod fields;
/// Core data structures (ModuleMatrix, Record, ECLevel, Rect)
pub mod models;
/// Rasterization and layout
pub mod render;
/// Command-line helpers (argument parsing, terminal preview)
pub mod tools;

pub use config::RenderConfig;
pub use encoder::{QrCodeEncoder, QrEncoder};
pub use error::{Error, Result, TemplateError};
pub use fields::{FieldEntry, Labels, ReferenceResolver, ResolvedField, TemplateContext, Verbatim};
pub use models::{ECLevel, ModuleMatrix, Record, Rect};
pub use render::RasterImage;

/// A resolved field together with its rendered code
#[derive(Debug, Clone)]
pub struct FieldQr {
    /// Field key, label and payload
    pub field: ResolvedField,
    /// Expanded, trimmed record title (the raw title if expansion failed)
    pub title: String,
    /// Rendered code
    pub image: RasterImage,
}

impl FieldQr {
    /// Window or page caption: `"<title> - <label>"`, skipping empty parts
    pub fn window_title(&self) -> String {
        render::caption(&[self.title.as_str(), self.field.display_label.as_str()])
    }
}

/// Resolve → encode → render pipeline with its settings
#[derive(Debug, Clone)]
pub struct QrFieldView<E = QrCodeEncoder> {
    encoder: E,
    config: RenderConfig,
    labels: Labels,
}

impl QrFieldView<QrCodeEncoder> {
    /// Pipeline with default settings and the `qrcode`-backed encoder
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Pipeline with the given settings
    pub fn with_config(config: RenderConfig) -> Self {
        Self::with_encoder(QrCodeEncoder, config)
    }
}

impl Default for QrFieldView<QrCodeEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: QrEncoder> QrFieldView<E> {
    /// Pipeline with a custom encoder
    pub fn with_encoder(encoder: E, config: RenderConfig) -> Self {
        Self {
            encoder,
            config,
            labels: Labels::default(),
        }
    }

    /// Replace the well-known field labels
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Current settings
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Selectable fields of `record`, sorted by label
    pub fn fields(&self, record: &Record) -> Vec<FieldEntry> {
        self.labels.list_fields(record)
    }

    /// Resolve, encode and render field `key` of `record`.
    ///
    /// Failures are logged with their kind; callers show
    /// [`Error::user_message`] to the user.
    pub fn show<C>(&self, record: &Record, key: &str, context: &C) -> Result<FieldQr>
    where
        C: TemplateContext + ?Sized,
    {
        self.try_show(record, key, context).inspect_err(|err| {
            log::warn!("field {key:?} of record {} not shown: {err}", record.id());
        })
    }

    /// Resolve and encode field `key` of `record` without rendering it.
    ///
    /// Failures are logged like [`QrFieldView::show`].
    pub fn encode_field<C>(
        &self,
        record: &Record,
        key: &str,
        context: &C,
    ) -> Result<(ResolvedField, ModuleMatrix)>
    where
        C: TemplateContext + ?Sized,
    {
        self.try_encode(record, key, context).inspect_err(|err| {
            log::warn!("field {key:?} of record {} not encoded: {err}", record.id());
        })
    }

    fn try_encode<C>(
        &self,
        record: &Record,
        key: &str,
        context: &C,
    ) -> Result<(ResolvedField, ModuleMatrix)>
    where
        C: TemplateContext + ?Sized,
    {
        let field = fields::resolve_with_labels(record, key, context, &self.labels)?;
        let matrix = self.encoder.encode(&field.payload, self.config.ec_level)?;
        Ok((field, matrix))
    }

    fn try_show<C>(&self, record: &Record, key: &str, context: &C) -> Result<FieldQr>
    where
        C: TemplateContext + ?Sized,
    {
        let (field, matrix) = self.try_encode(record, key, context)?;
        let image = render::render(
            &matrix,
            self.config.pixels_per_module,
            self.config.dark,
            self.config.light,
        )?;
        let title = display_title(record, context);

        log::debug!(
            "rendered field {key:?} as version {} at {}px",
            matrix.version(),
            image.width()
        );
        Ok(FieldQr {
            field,
            title,
            image,
        })
    }
}

/// Caption title: expanded and trimmed, or the raw trimmed title when the
/// context cannot expand it.
fn display_title<C>(record: &Record, context: &C) -> String
where
    C: TemplateContext + ?Sized,
{
    match context.expand(record.title(), record) {
        Ok(title) => title.trim().to_owned(),
        Err(err) => {
            log::debug!("title of record {} kept unexpanded: {err}", record.id());
            record.title().trim().to_owned()
        }
    }
}

/// Resolve, encode and render with default settings.
pub fn show_field_qr<C>(record: &Record, key: &str, context: &C) -> Result<FieldQr>
where
    C: TemplateContext + ?Sized,
{
    QrFieldView::new().show(record, key, context)
}
