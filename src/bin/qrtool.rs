use clap::{Args, Parser, Subcommand};
use credential_qr::tools::{parse_field_arg, record_from_fields, render_terminal};
use credential_qr::{ECLevel, QrFieldView, Record, ReferenceResolver, RenderConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "Show credential fields as QR codes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RecordArgs {
    /// Record field as Key=Value (repeatable)
    #[arg(long = "field", value_parser = parse_field_arg)]
    fields: Vec<(String, String)>,
    /// Record id used by {REF:..@I:..} placeholders
    #[arg(long, default_value = "cli")]
    id: String,
}

impl RecordArgs {
    fn record(&self) -> Record {
        record_from_fields(&self.id, self.fields.iter().cloned())
    }
}

#[derive(Subcommand)]
enum Command {
    /// List the fields that can be shown, sorted by label
    Fields {
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Print the resolved payload and a terminal preview of its code
    Show {
        #[command(flatten)]
        record: RecordArgs,
        /// Field key to show
        #[arg(long)]
        key: String,
        /// Error correction level (L, M, Q, H)
        #[arg(long)]
        ec: Option<ECLevel>,
    },
    /// Render a field and save it as PNG
    Export {
        #[command(flatten)]
        record: RecordArgs,
        /// Field key to export
        #[arg(long)]
        key: String,
        /// Output PNG path
        #[arg(long)]
        out: PathBuf,
        /// Pixels per module
        #[arg(long)]
        scale: Option<u32>,
        /// Error correction level (L, M, Q, H)
        #[arg(long)]
        ec: Option<ECLevel>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default()).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Fields { record } => fields_cmd(&record.record()),
        Command::Show { record, key, ec } => show_cmd(&record.record(), &key, ec),
        Command::Export {
            record,
            key,
            out,
            scale,
            ec,
        } => export_cmd(&record.record(), &key, &out, scale, ec),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.user_message());
            eprintln!("  cause: {err}");
            ExitCode::FAILURE
        }
    }
}

fn config_with(scale: Option<u32>, ec: Option<ECLevel>) -> RenderConfig {
    let mut config = *RenderConfig::env_defaults();
    if let Some(scale) = scale {
        config.pixels_per_module = scale;
    }
    if let Some(ec) = ec {
        config.ec_level = ec;
    }
    config
}

fn fields_cmd(record: &Record) -> credential_qr::Result<()> {
    let view = QrFieldView::with_config(config_with(None, None));
    for entry in view.fields(record) {
        println!("{}\t{}", entry.label, entry.key);
    }
    Ok(())
}

fn show_cmd(record: &Record, key: &str, ec: Option<ECLevel>) -> credential_qr::Result<()> {
    let view = QrFieldView::with_config(config_with(None, ec));
    let records = std::slice::from_ref(record);
    let resolver = ReferenceResolver::new(records);

    let (field, matrix) = view.encode_field(record, key, &resolver)?;
    let ec_level = view.config().ec_level;

    println!("{}", field.payload);
    println!(
        "version {} ({}x{} modules), EC level {} (~{}% recoverable)",
        matrix.version(),
        matrix.side(),
        matrix.side(),
        ec_level,
        ec_level.recovery_percent()
    );
    print!("{}", render_terminal(&matrix));
    Ok(())
}

fn export_cmd(
    record: &Record,
    key: &str,
    out: &std::path::Path,
    scale: Option<u32>,
    ec: Option<ECLevel>,
) -> credential_qr::Result<()> {
    let view = QrFieldView::with_config(config_with(scale, ec));
    let records = std::slice::from_ref(record);
    let resolver = ReferenceResolver::new(records);

    let shown = view.show(record, key, &resolver)?;
    shown.image.save_png(out)?;
    println!(
        "{}: {}x{} px -> {}",
        shown.window_title(),
        shown.image.width(),
        shown.image.height(),
        out.display()
    );
    Ok(())
}
