//! Delimited text (CSV/TSV) reader and writer.

use crate::error::{NumsiftError, NumsiftResult};
use std::io::{self, Write};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone)]
pub struct DelimitedConfig {
    pub delimiter: char,
    pub quote: char,
    pub write_bom: bool,
}

impl Default for DelimitedConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            write_bom: true,
        }
    }
}

impl DelimitedConfig {
    pub fn csv() -> Self {
        Self::default()
    }

    pub fn tsv() -> Self {
        Self {
            delimiter: '\t',
            ..Self::default()
        }
    }

    pub fn semicolon() -> Self {
        Self {
            delimiter: ';',
            ..Self::default()
        }
    }

    pub fn with_write_bom(mut self, write_bom: bool) -> Self {
        self.write_bom = write_bom;
        self
    }
}

/// Decodes `bytes` into rows of cells.
///
/// A leading UTF-8 BOM is skipped. Rows end at LF, CRLF or a bare CR.
/// Quoted fields may contain delimiters,
/// doubled quotes and line breaks. A blank line decodes to an empty row.
/// Fails on invalid UTF-8 or an unterminated quoted field; nothing is
/// returned on failure.
pub fn read_rows(
    bytes: &[u8],
    source_name: &str,
    config: &DelimitedConfig,
) -> NumsiftResult<Vec<Vec<String>>> {
    let bytes = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let line = bytes[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count() + 1;
        NumsiftError::Decode {
            source_name: source_name.to_string(),
            line,
            reason: "invalid UTF-8".to_string(),
        }
    })?;

    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_start = true;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == config.quote {
                if chars.peek() == Some(&config.quote) {
                    // Escaped (doubled) quote
                    current.push(c);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                if c == '\n' || (c == '\r' && chars.peek() != Some(&'\n')) {
                    line += 1;
                }
                current.push(c);
            }
            continue;
        }

        match c {
            // CRLF is one break; a bare CR (classic Mac export) ends the row too.
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if !fields.is_empty() || !current.is_empty() || !field_start {
                    fields.push(std::mem::take(&mut current));
                }
                rows.push(std::mem::take(&mut fields));
                field_start = true;
                line += 1;
            }
            c if c == config.delimiter => {
                fields.push(std::mem::take(&mut current));
                field_start = true;
            }
            c if c == config.quote && field_start && current.is_empty() => {
                in_quotes = true;
                quote_line = line;
                field_start = false;
            }
            _ => {
                current.push(c);
                field_start = false;
            }
        }
    }

    if in_quotes {
        return Err(NumsiftError::Decode {
            source_name: source_name.to_string(),
            line: quote_line,
            reason: "unterminated quoted field".to_string(),
        });
    }

    if !fields.is_empty() || !current.is_empty() || !field_start {
        fields.push(current);
        rows.push(fields);
    }

    Ok(rows)
}

/// Encodes `rows`, quoting fields that contain the delimiter, the quote
/// character or a line break. Rows end with CRLF.
pub fn write_rows<W: Write>(
    rows: &[Vec<String>],
    writer: &mut W,
    config: &DelimitedConfig,
) -> io::Result<()> {
    if config.write_bom {
        writer.write_all(&UTF8_BOM)?;
    }

    let quote = config.quote.to_string();
    let escaped_quote = quote.repeat(2);

    for row in rows {
        for (col_idx, field) in row.iter().enumerate() {
            if col_idx > 0 {
                write!(writer, "{}", config.delimiter)?;
            }

            let needs_quote = field.contains(config.delimiter)
                || field.contains(config.quote)
                || field.contains('\n')
                || field.contains('\r');

            if needs_quote {
                write!(
                    writer,
                    "{q}{}{q}",
                    field.replace(&quote, &escaped_quote),
                    q = config.quote
                )?;
            } else {
                writer.write_all(field.as_bytes())?;
            }
        }
        writer.write_all(b"\r\n")?;
    }

    Ok(())
}
