use crate::models::{ModuleMatrix, Record};

/// Light modules drawn around the symbol in terminal previews
pub const TERMINAL_QUIET_ZONE: usize = 2;

/// Parse a `Key=Value` command-line argument. The value may contain `=`.
pub fn parse_field_arg(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected Key=Value, got {arg:?}")),
    }
}

/// Build a record from parsed `Key=Value` pairs.
pub fn record_from_fields<I>(id: &str, fields: I) -> Record
where
    I: IntoIterator<Item = (String, String)>,
{
    fields
        .into_iter()
        .fold(Record::new(id), |record, (key, value)| record.with_field(key, value))
}

/// Draw a matrix with half-block characters, two module rows per text line.
///
/// Dark modules are drawn as blank cells and light modules as filled blocks,
/// which reads correctly on the usual dark terminal background.
pub fn render_terminal(matrix: &ModuleMatrix) -> String {
    let quiet = TERMINAL_QUIET_ZONE as isize;
    let span = matrix.side() as isize + 2 * quiet;
    let dark_at = |row: isize, col: isize| {
        let (r, c) = (row - quiet, col - quiet);
        r >= 0 && c >= 0 && matrix.get(r as usize, c as usize)
    };

    let mut out = String::new();
    for row in (0..span).step_by(2) {
        for col in 0..span {
            let top = dark_at(row, col);
            let bottom = row + 1 < span && dark_at(row + 1, col);
            out.push(match (top, bottom) {
                (true, true) => ' ',
                (true, false) => '▄',
                (false, true) => '▀',
                (false, false) => '█',
            });
        }
        out.push('\n');
    }
    out
}
