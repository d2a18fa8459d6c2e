//! Tabular boundary: raw listings in, classified listings out, using Polars

use crate::record::{ClassifiedRecord, RawRecord, Record};
use anyhow::Context;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Column names shared by the raw and classified tables
pub mod columns {
    pub const NAME: &str = "Name";
    pub const LOCATION: &str = "Location";
    pub const RATE: &str = "Rate";
    pub const REVIEW: &str = "Review";
    pub const CATEGORY: &str = "Category";
    pub const DISCOUNT: &str = "Discount";
    pub const MINIMUM_PURCHASE: &str = "Minimum Purchase";
    pub const CSAT: &str = "CSAT";
    pub const NORMALIZED_CSAT: &str = "Normalized_CSAT";
    pub const CLUSTER: &str = "Cluster";
    pub const CLASS: &str = "Class";
}

/// Load a scraped listing CSV.
///
/// Every column is read as text so that mixed-script digits reach the
/// cleaner untouched. Empty cells become absent values.
pub fn load_raw_batch(file_path: impl AsRef<Path>) -> crate::Result<Vec<RawRecord>> {
    let file_path = file_path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(PathBuf::from(file_path)))?
        .finish()
        .with_context(|| format!("failed to read {}", file_path.display()))?;

    let records = raw_records_from_frame(&df)?;
    info!(path = %file_path.display(), rows = records.len(), "loaded raw batch");
    Ok(records)
}

/// Convert a frame holding the raw listing columns into records.
pub fn raw_records_from_frame(df: &DataFrame) -> crate::Result<Vec<RawRecord>> {
    let name = text_column(df, columns::NAME)?;
    let location = text_column(df, columns::LOCATION)?;
    let rate = text_column(df, columns::RATE)?;
    let review = text_column(df, columns::REVIEW)?;
    let category = text_column(df, columns::CATEGORY)?;
    let discount = text_column(df, columns::DISCOUNT)?;
    let minimum_purchase = text_column(df, columns::MINIMUM_PURCHASE)?;

    Ok((0..df.height())
        .map(|i| RawRecord {
            name: name[i].clone(),
            location: location[i].clone(),
            rate: rate[i].clone(),
            review: review[i].clone(),
            category: category[i].clone(),
            discount: discount[i].clone(),
            minimum_purchase: minimum_purchase[i].clone(),
        })
        .collect())
}

fn text_column(df: &DataFrame, name: &str) -> crate::Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .with_context(|| format!("input is missing column '{name}'"))?
        .cast(&DataType::String)?;

    Ok(series
        .str()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_empty()).map(str::to_string))
        .collect())
}

/// Cleaned snapshot with only the identifying and rating columns.
pub fn cleaned_frame(records: &[Record]) -> crate::Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new(
            columns::NAME,
            records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ),
        Series::new(
            columns::LOCATION,
            records.iter().map(|r| r.location.as_str()).collect::<Vec<_>>(),
        ),
        Series::new(columns::RATE, records.iter().map(|r| r.rate).collect::<Vec<_>>()),
        Series::new(columns::REVIEW, records.iter().map(|r| r.review).collect::<Vec<_>>()),
    ])?;
    Ok(df)
}

/// Final table with every cleaned column plus score, cluster and class.
pub fn classified_frame(records: &[ClassifiedRecord]) -> crate::Result<DataFrame> {
    let base: Vec<&Record> = records.iter().map(|r| &r.scored.record).collect();

    let df = DataFrame::new(vec![
        Series::new(
            columns::NAME,
            base.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ),
        Series::new(
            columns::LOCATION,
            base.iter().map(|r| r.location.as_str()).collect::<Vec<_>>(),
        ),
        Series::new(columns::RATE, base.iter().map(|r| r.rate).collect::<Vec<_>>()),
        Series::new(columns::REVIEW, base.iter().map(|r| r.review).collect::<Vec<_>>()),
        Series::new(
            columns::CATEGORY,
            base.iter().map(|r| r.category.as_str()).collect::<Vec<_>>(),
        ),
        Series::new(
            columns::DISCOUNT,
            base.iter().map(|r| r.discount).collect::<Vec<_>>(),
        ),
        Series::new(
            columns::MINIMUM_PURCHASE,
            base.iter().map(|r| r.minimum_purchase).collect::<Vec<_>>(),
        ),
        Series::new(
            columns::CSAT,
            records.iter().map(|r| r.scored.csat).collect::<Vec<_>>(),
        ),
        Series::new(
            columns::NORMALIZED_CSAT,
            records
                .iter()
                .map(|r| r.scored.normalized_csat)
                .collect::<Vec<_>>(),
        ),
        Series::new(
            columns::CLUSTER,
            records.iter().map(|r| r.cluster as u32).collect::<Vec<_>>(),
        ),
        Series::new(
            columns::CLASS,
            records.iter().map(|r| r.class.as_str()).collect::<Vec<_>>(),
        ),
    ])?;
    Ok(df)
}

/// Write a frame as CSV with a header row.
pub fn write_csv(df: &mut DataFrame, file_path: impl AsRef<Path>) -> crate::Result<()> {
    let file_path = file_path.as_ref();
    let file = File::create(file_path)
        .with_context(|| format!("failed to create {}", file_path.display()))?;
    CsvWriter::new(file).include_header(true).finish(df)?;

    info!(path = %file_path.display(), rows = df.height(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Name,Location,Rate,Review,Category,Discount,Minimum Purchase").unwrap();
        writeln!(file, "Kebab House,Center,۴.۵,,Iranian,No Discount,\"12,000 Toman\"").unwrap();
        writeln!(file, "Pizza Roma,North,جدید,۱۲,,20% off,\"50,000 Toman\"").unwrap();
        writeln!(file, "Burger Hub,,3.8,120,Fast Food,10% off,0").unwrap();
        file
    }

    #[test]
    fn test_load_raw_batch() {
        let test_file = create_test_csv();
        let records = load_raw_batch(test_file.path()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].rate.as_deref(), Some("۴.۵"));
        assert_eq!(records[0].review, None);
        assert_eq!(records[0].minimum_purchase.as_deref(), Some("12,000 Toman"));
        assert_eq!(records[1].category, None);
        assert_eq!(records[2].location, None);
        assert_eq!(records[2].minimum_purchase.as_deref(), Some("0"));
    }

    #[test]
    fn test_missing_column_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Name,Rate").unwrap();
        writeln!(file, "A,4.0").unwrap();

        assert!(load_raw_batch(file.path()).is_err());
    }

    #[test]
    fn test_cleaned_frame_columns() {
        let records = vec![Record {
            name: "A".to_string(),
            location: "B".to_string(),
            rate: 4.0,
            review: 3,
            category: "C".to_string(),
            discount: true,
            minimum_purchase: 10,
        }];

        let df = cleaned_frame(&records).unwrap();
        assert_eq!(df.get_column_names(), &["Name", "Location", "Rate", "Review"]);
        assert_eq!(df.height(), 1);
    }
}
