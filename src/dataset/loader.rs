// Delimited Text Loader
//
// Reads a delimited text file (CSV by default) into a Dataset. The first
// non-blank line is the header. Fields may be wrapped in the quote character,
// in which case delimiters inside are kept and a doubled quote stands for one
// literal quote. Records do not span lines.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::{Dataset, DatasetError};

/// Options controlling how delimited text is split into fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field separator
    pub delimiter: char,
    /// Quote character for fields containing the delimiter
    pub quote: char,
    /// Strip surrounding whitespace from unquoted fields
    pub trim: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        LoaderOptions {
            delimiter: ',',
            quote: '"',
            trim: true,
        }
    }
}

/// Load a delimited file from disk
pub fn load_file(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_delimited(&text, options)?;
    debug!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.header().len(),
        path.display()
    );
    Ok(dataset)
}

/// Split delimited text into a Dataset
pub fn parse_delimited(text: &str, options: &LoaderOptions) -> Result<Dataset, DatasetError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut header: Option<Vec<String>> = None;
    let mut records = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            if header.is_some() {
                warn!("skipping blank line {}", line_no);
            }
            continue;
        }

        let fields = split_record(line, options, line_no)?;
        match &header {
            None => {
                header = Some(fields.into_iter().map(|f| f.trim().to_string()).collect());
            }
            Some(columns) => {
                if fields.len() != columns.len() {
                    return Err(DatasetError::RaggedRow {
                        line: line_no,
                        expected: columns.len(),
                        found: fields.len(),
                    });
                }
                records.push(fields);
            }
        }
    }

    let header = header.ok_or(DatasetError::Empty)?;
    Dataset::new(header, records)
}

/// Split one line into fields
fn split_record(line: &str, options: &LoaderOptions, line_no: usize) -> Result<Vec<String>, DatasetError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == options.quote {
                if chars.peek() == Some(&options.quote) {
                    chars.next();
                    field.push(ch);
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == options.delimiter {
            fields.push(finish_field(&mut field, quoted, options));
            quoted = false;
        } else if ch == options.quote && field.trim().is_empty() {
            // Opening quote; leading whitespace before it is dropped
            field.clear();
            quoted = true;
            in_quotes = true;
        } else {
            field.push(ch);
        }
    }

    if in_quotes {
        return Err(DatasetError::UnterminatedQuote { line: line_no });
    }
    fields.push(finish_field(&mut field, quoted, options));
    Ok(fields)
}

fn finish_field(field: &mut String, quoted: bool, options: &LoaderOptions) -> String {
    let value = std::mem::take(field);
    if options.trim && !quoted {
        value.trim().to_string()
    } else if quoted {
        // Whitespace between the closing quote and the delimiter is not data
        value.trim_end().to_string()
    } else {
        value
    }
}
