//! Plain-text rendering of the current view for stdout
//!
//! Used for `--stdout`, for the print-and-quit key and whenever stdout is not
//! a terminal. "Fluff" adds ANSI colours: a background per header, a
//! foreground per data column alternating by column index, and a red
//! background for fake columns.

use crate::model::{DomainState, FAKE_VALUE};
use unicode_width::UnicodeWidthStr;

const RESET: &str = "\x1b[0m";

const HEADER_FAKE: &str = "\x1b[48;5;1m";
const HEADER_EVEN: &str = "\x1b[48;5;22m";
const HEADER_ODD: &str = "\x1b[48;5;18m";

const DATA_FAKE: &str = "\x1b[48;5;9m";
const DATA_EVEN: &str = "\x1b[38;5;46m";
const DATA_ODD: &str = "\x1b[38;5;117m";

/// Columns are padded to their widest cell plus this many spaces
const PADDING: usize = 2;

fn colour(is_header: bool, col: usize, is_fake: bool) -> &'static str {
    match (is_header, is_fake, col % 2 == 0) {
        (true, true, _) => HEADER_FAKE,
        (true, false, true) => HEADER_EVEN,
        (true, false, false) => HEADER_ODD,
        (false, true, _) => DATA_FAKE,
        (false, false, true) => DATA_EVEN,
        (false, false, false) => DATA_ODD,
    }
}

fn push_cell(out: &mut String, value: &str, width: usize, prefix: Option<&str>) {
    if let Some(prefix) = prefix {
        out.push_str(prefix);
    }
    out.push_str(value);
    let pad = width.saturating_sub(value.width());
    out.extend(std::iter::repeat(' ').take(pad));
    if prefix.is_some() {
        out.push_str(RESET);
    }
}

/// Render the header line plus one line per view entry
pub fn render_table(domain: &DomainState, fluff: bool) -> String {
    let headers = &domain.config.column_headers;

    let columns: Vec<Vec<&str>> = headers
        .iter()
        .map(|header| {
            domain
                .view
                .iter()
                .map(|&entry| domain.table.value(header, entry).unwrap_or(FAKE_VALUE))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .zip(&columns)
        .map(|(header, values)| {
            values
                .iter()
                .map(|v| v.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                + PADDING
        })
        .collect();

    let mut out = String::new();

    for (col, header) in headers.iter().enumerate() {
        let prefix = fluff.then(|| colour(true, col, domain.is_fake(header)));
        push_cell(&mut out, header, widths[col], prefix);
    }
    out.push('\n');

    for row in 0..domain.view.len() {
        for (col, header) in headers.iter().enumerate() {
            let prefix = fluff.then(|| colour(false, col, domain.is_fake(header)));
            push_cell(&mut out, columns[col][row], widths[col], prefix);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConfigSource, ParseMode, PresetStore, RawTable};

    fn domain(input: &str) -> DomainState {
        let table = RawTable::parse(input, ParseMode::Whitespace);
        DomainState::initialize(table, PresetStore::new("presets"), ConfigSource::Default)
            .unwrap()
    }

    #[test]
    fn test_plain_output_pads_columns() {
        let domain = domain("ID NAME\n1 alice\n22 bob\n");

        assert_eq!(
            render_table(&domain, false),
            "ID  NAME   \n1   alice  \n22  bob    \n"
        );
    }

    #[test]
    fn test_plain_output_uses_display_width() {
        let domain = domain("A B\n日本 x\n");

        // "日本" is four columns wide
        assert_eq!(render_table(&domain, false), "A     B  \n日本  x  \n");
    }

    #[test]
    fn test_fluff_colours_every_cell() {
        let mut domain = domain("A B\n1 2\n");
        domain.config.add_column("GONE");
        domain.refresh();

        let out = render_table(&domain, true);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("\x1b[48;5;22mA  \x1b[0m\x1b[48;5;18mB  \x1b[0m"));
        assert!(lines[0].ends_with("\x1b[48;5;1mGONE     \x1b[0m"));
        assert!(lines[1].starts_with("\x1b[38;5;46m1  \x1b[0m\x1b[38;5;117m2  \x1b[0m"));
        assert!(lines[1].ends_with("\x1b[48;5;9mNO DATA  \x1b[0m"));
    }

    #[test]
    fn test_filtered_out_rows_are_not_printed() {
        let mut domain = domain("A\nx\ny\n");
        domain.config.set_filter("A", Some("y"), None).unwrap();
        domain.refresh();

        assert_eq!(render_table(&domain, false), "A  \ny  \n");
    }
}
