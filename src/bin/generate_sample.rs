//! Write the built-in ten-country table as `.parquet`, `.csv` and `.json`
//! files so every loader format has a fixture to open.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use techcomview::data::export::export_file;
use techcomview::data::fallback::fallback_records;
use techcomview::data::model::CountryRecord;

fn counts(records: &[CountryRecord], f: impl Fn(&CountryRecord) -> u64) -> Arc<UInt64Array> {
    Arc::new(UInt64Array::from(records.iter().map(f).collect::<Vec<_>>()))
}

fn floats(
    records: &[CountryRecord],
    f: impl Fn(&CountryRecord) -> Option<f64>,
) -> Arc<Float64Array> {
    Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
}

fn write_parquet(records: &[CountryRecord], path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("total_cells", DataType::UInt64, false),
        Field::new("gsm", DataType::UInt64, false),
        Field::new("umts", DataType::UInt64, false),
        Field::new("lte", DataType::UInt64, false),
        Field::new("nr", DataType::UInt64, false),
        Field::new("population_millions", DataType::Float64, true),
        Field::new("latitude", DataType::Float64, true),
        Field::new("longitude", DataType::Float64, true),
        Field::new("region", DataType::Utf8, true),
    ]));

    let country = StringArray::from(records.iter().map(|r| r.country.as_str()).collect::<Vec<_>>());
    let region = StringArray::from(records.iter().map(|r| r.region.as_deref()).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(country),
            counts(records, |r| r.total_cells),
            counts(records, |r| r.gsm),
            counts(records, |r| r.umts),
            counts(records, |r| r.lte),
            counts(records, |r| r.nr),
            floats(records, |r| r.population_millions),
            floats(records, |r| r.latitude),
            floats(records, |r| r.longitude),
            Arc::new(region),
        ],
    )
    .context("building record batch")?;
    arrow::util::pretty::print_batches(&[batch.clone()]).context("printing batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = Path::new("data/samples");
    std::fs::create_dir_all(out_dir).context("creating output directory")?;

    let records = fallback_records();
    let rows: Vec<&CountryRecord> = records.iter().collect();

    write_parquet(&records, &out_dir.join("towers.parquet"))?;
    export_file(&out_dir.join("towers.csv"), &rows)?;
    export_file(&out_dir.join("towers.json"), &rows)?;

    println!(
        "Wrote {} countries to {}/towers.{{parquet,csv,json}}",
        records.len(),
        out_dir.display()
    );
    Ok(())
}
