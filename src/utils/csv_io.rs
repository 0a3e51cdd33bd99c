//! Whole-buffer CSV files with a UTF-8 byte-order mark.

use std::fs;
use std::path::Path;

/// Byte-order mark prepended to every CSV file for spreadsheet compatibility.
pub const UTF8_BOM: &str = "\u{feff}";

/// Write `header` and `rows` to `path` in one shot, BOM first.
pub fn write_csv_with_bom<P, R, S>(path: P, header: &[&str], rows: R) -> Result<(), csv::Error>
where
    P: AsRef<Path>,
    R: IntoIterator,
    R::Item: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_writer(UTF8_BOM.as_bytes().to_vec());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    fs::write(path, buffer)?;
    Ok(())
}

/// Read a CSV file written by [`write_csv_with_bom`], returning the header and rows.
///
/// A leading BOM is optional.
pub fn read_csv_with_bom<P: AsRef<Path>>(
    path: P,
) -> Result<(Vec<String>, Vec<Vec<String>>), csv::Error> {
    let content = fs::read_to_string(path)?;
    let body = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(body.as_bytes());

    let header = reader.headers()?.iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(String::from).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok((header, rows))
}
