use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{CountryRecord, ALL_COLUMNS};
use super::DataError;

/// Write `rows` to `path`, choosing CSV or JSON from the extension.
/// The written file loads back with [`super::loader::load_file`].
pub fn export_file(path: &Path, rows: &[&CountryRecord]) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match ext.as_str() {
        "csv" => write_csv(file, rows),
        "json" => write_json(file, rows),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }?;
    log::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// CSV with the same header as the input files. The header is written even
/// when `rows` is empty.
pub fn write_csv<W: Write>(out: W, rows: &[&CountryRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(ALL_COLUMNS).context("writing CSV header")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Records-oriented JSON array.
pub fn write_json<W: Write>(out: W, rows: &[&CountryRecord]) -> Result<()> {
    serde_json::to_writer_pretty(out, rows).context("writing JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::fallback_records;
    use crate::data::loader::{parse_json, read_csv};

    #[test]
    fn csv_header_matches_input_layout() {
        let records = fallback_records();
        let rows: Vec<&CountryRecord> = records.iter().take(1).collect();
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, ALL_COLUMNS.join(","));
    }

    #[test]
    fn empty_view_still_writes_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap().trim_end(), ALL_COLUMNS.join(","));
        assert!(read_csv(buf.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn missing_optionals_survive_csv_and_json() {
        let rec = CountryRecord {
            country: "Cuba".into(),
            total_cells: 5,
            gsm: 5,
            umts: 0,
            lte: 0,
            nr: 0,
            population_millions: None,
            latitude: None,
            longitude: None,
            region: Some("Caribbean".into()),
        };

        let mut csv_buf = Vec::new();
        write_csv(&mut csv_buf, &[&rec]).unwrap();
        assert_eq!(read_csv(csv_buf.as_slice()).unwrap(), vec![rec.clone()]);

        let mut json_buf = Vec::new();
        write_json(&mut json_buf, &[&rec]).unwrap();
        let text = String::from_utf8(json_buf).unwrap();
        assert_eq!(parse_json(&text).unwrap(), vec![rec]);
    }
}
