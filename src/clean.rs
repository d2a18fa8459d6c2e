//! Record cleaning: missing values, digit normalization, type coercion and
//! duplicate removal

use crate::config::PipelineConfig;
use crate::digits::normalize_digits;
use crate::error::ParseError;
use crate::record::{RawRecord, Record};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, info};

static NON_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9]+").unwrap());

/// Review text used when a listing has no review count.
const DEFAULT_REVIEW: &str = "0";

/// Summary of what the cleaner removed from a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningStats {
    pub input_records: usize,
    /// Records dropped because Rate was absent
    pub missing_rate: usize,
    /// Records dropped because Rate held the "newly listed" sentinel
    pub new_listings: usize,
    pub duplicates: usize,
    pub output_records: usize,
}

/// Clean a raw batch.
///
/// Records without a usable Rate are dropped, the remaining fields are
/// coerced to their typed form and exact duplicates are removed, keeping the
/// first occurrence. Any field that cannot be coerced aborts the batch.
pub fn clean_batch(
    raw: &[RawRecord],
    config: &PipelineConfig,
) -> Result<(Vec<Record>, CleaningStats), ParseError> {
    let mut stats = CleaningStats {
        input_records: raw.len(),
        ..Default::default()
    };

    let mut cleaned = Vec::with_capacity(raw.len());
    for (index, record) in raw.iter().enumerate() {
        match clean_record(index, record, config)? {
            RecordOutcome::Kept(record) => cleaned.push(record),
            RecordOutcome::MissingRate => stats.missing_rate += 1,
            RecordOutcome::NewListing => stats.new_listings += 1,
        }
    }

    let before = cleaned.len();
    let cleaned = remove_duplicates(cleaned);
    stats.duplicates = before - cleaned.len();
    stats.output_records = cleaned.len();

    info!(
        input = stats.input_records,
        output = stats.output_records,
        missing_rate = stats.missing_rate,
        new_listings = stats.new_listings,
        duplicates = stats.duplicates,
        "cleaned batch"
    );

    Ok((cleaned, stats))
}

enum RecordOutcome {
    Kept(Record),
    MissingRate,
    NewListing,
}

fn clean_record(
    index: usize,
    raw: &RawRecord,
    config: &PipelineConfig,
) -> Result<RecordOutcome, ParseError> {
    let review_text = raw.review.as_deref().unwrap_or(DEFAULT_REVIEW);
    let category = raw
        .category
        .clone()
        .unwrap_or_else(|| config.default_category.clone());

    let Some(rate_text) = raw.rate.as_deref() else {
        return Ok(RecordOutcome::MissingRate);
    };

    let minimum_purchase = parse_minimum_purchase(index, raw.minimum_purchase.as_deref())?;
    let discount = raw.discount.as_deref() != Some(config.no_discount_text.as_str());

    let rate_text = normalize_digits(rate_text.trim());
    let rate_text = (rate_text != config.new_listing_rate.as_str()).then_some(rate_text);
    let review = parse_review(index, &normalize_digits(review_text.trim()))?;

    let Some(rate_text) = rate_text else {
        debug!(index, "dropping newly listed record");
        return Ok(RecordOutcome::NewListing);
    };
    let rate = parse_rate(index, &rate_text)?;

    let name = raw.name.clone().ok_or(ParseError::MissingField {
        index,
        field: "Name",
    })?;

    Ok(RecordOutcome::Kept(Record {
        name,
        location: raw.location.clone().unwrap_or_default(),
        rate,
        review,
        category,
        discount,
        minimum_purchase,
    }))
}

/// Extract the amount from free text such as `"12,000 Toman"` by keeping
/// every digit and discarding everything else.
pub fn parse_minimum_purchase(index: usize, text: Option<&str>) -> Result<u64, ParseError> {
    let field = "Minimum Purchase";
    let text = text.ok_or(ParseError::MissingField { index, field })?;
    let normalized = normalize_digits(text);
    let digits = NON_DIGITS.replace_all(&normalized, "");

    if digits.is_empty() {
        return Err(ParseError::NoDigits {
            index,
            field,
            value: text.to_string(),
        });
    }

    digits.parse().map_err(|_| ParseError::InvalidNumber {
        index,
        field,
        value: text.to_string(),
    })
}

fn parse_rate(index: usize, text: &str) -> Result<f64, ParseError> {
    text.parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            index,
            field: "Rate",
            value: text.to_string(),
        })
}

fn parse_review(index: usize, text: &str) -> Result<u64, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidNumber {
        index,
        field: "Review",
        value: text.to_string(),
    })
}

/// Identity of a record for duplicate detection. Floats compare by bit
/// pattern with the sign of zero dropped, so `0.0` and `-0.0` match.
#[derive(PartialEq, Eq, Hash)]
struct RecordKey<'a> {
    name: &'a str,
    location: &'a str,
    rate: u64,
    review: u64,
    category: &'a str,
    discount: bool,
    minimum_purchase: u64,
}

impl<'a> From<&'a Record> for RecordKey<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            name: &record.name,
            location: &record.location,
            rate: (record.rate + 0.0).to_bits(),
            review: record.review,
            category: &record.category,
            discount: record.discount,
            minimum_purchase: record.minimum_purchase,
        }
    }
}

/// Drop exact duplicates, keeping the first occurrence of each record.
pub fn remove_duplicates(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::with_capacity(records.len());
    let keep: Vec<bool> = records
        .iter()
        .map(|record| seen.insert(RecordKey::from(record)))
        .collect();

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}
