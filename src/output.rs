//! Flat text layout for enumeration results
//!
//! ```text
//! m: 3
//! p: 2
//! 3
//! 0,0,1
//! 0,1,1
//! 1,1,1
//! ```
//!
//! Line 1 holds the matrix size, line 2 the field size, line 3 the number of
//! polynomials, followed by one row per polynomial with its coefficients
//! comma-separated, lowest degree first.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::enumeration::Enumeration;
use crate::error::{CirculantError, Result};
use crate::polynomial::Polynomial;

/// Contents of a file in the text layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredRepresentatives {
    pub matrix_size: usize,
    pub field_size: u64,
    pub representatives: Vec<Polynomial>,
}

impl From<Enumeration> for StoredRepresentatives {
    fn from(enumeration: Enumeration) -> Self {
        Self {
            matrix_size: enumeration.matrix_size,
            field_size: enumeration.field_size,
            representatives: enumeration.representatives,
        }
    }
}

/// Writes an enumeration result in the text layout.
pub fn write_representatives<W: Write>(writer: &mut W, enumeration: &Enumeration) -> Result<()> {
    writeln!(writer, "m: {}", enumeration.matrix_size)?;
    writeln!(writer, "p: {}", enumeration.field_size)?;
    writeln!(writer, "{}", enumeration.representatives.len())?;
    for poly in &enumeration.representatives {
        writeln!(writer, "{}", poly)?;
    }
    Ok(())
}

/// Writes an enumeration result to `path`, replacing any existing file.
pub fn save_to_file<P: AsRef<Path>>(path: P, enumeration: &Enumeration) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_representatives(&mut writer, enumeration)?;
    writer.flush()?;
    info!(
        "wrote {} polynomials to {}",
        enumeration.representatives.len(),
        path.display()
    );
    Ok(())
}

fn parse_error(line: usize, message: impl Into<String>) -> CirculantError {
    CirculantError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_header<T: std::str::FromStr>(text: Option<&str>, line: usize, key: &str) -> Result<T> {
    let text = text.ok_or_else(|| parse_error(line, format!("missing '{}:' header", key)))?;
    let value = text
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| parse_error(line, format!("expected '{}: <value>'", key)))?;
    value
        .trim()
        .parse()
        .map_err(|_| parse_error(line, format!("invalid value for '{}'", key)))
}

/// Parses the text layout
///
/// Trailing blank lines are ignored.
///
/// # Errors
/// * `Parse` for malformed headers or rows, rows of the wrong length, and a
///   count line that disagrees with the number of rows
/// * `IoError` if reading fails
pub fn read_representatives<R: BufRead>(reader: R) -> Result<StoredRepresentatives> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let matrix_size: usize = parse_header(lines.first().map(String::as_str), 1, "m")?;
    let field_size: u64 = parse_header(lines.get(1).map(String::as_str), 2, "p")?;
    let count: usize = lines
        .get(2)
        .ok_or_else(|| parse_error(3, "missing polynomial count"))?
        .trim()
        .parse()
        .map_err(|_| parse_error(3, "invalid polynomial count"))?;

    let mut representatives = Vec::with_capacity(count);
    for (offset, row) in lines.iter().skip(3).enumerate() {
        let line = offset + 4;
        let coefficients = row
            .split(',')
            .map(|c| c.trim().parse::<u64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| parse_error(line, "invalid coefficient"))?;
        if coefficients.len() != matrix_size {
            return Err(parse_error(
                line,
                format!(
                    "expected {} coefficients, found {}",
                    matrix_size,
                    coefficients.len()
                ),
            ));
        }
        representatives.push(Polynomial::new(coefficients));
    }

    if representatives.len() != count {
        return Err(parse_error(
            3,
            format!(
                "count line says {} polynomials, found {}",
                count,
                representatives.len()
            ),
        ));
    }

    Ok(StoredRepresentatives {
        matrix_size,
        field_size,
        representatives,
    })
}

/// Reads a file in the text layout.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<StoredRepresentatives> {
    read_representatives(BufReader::new(File::open(path)?))
}
