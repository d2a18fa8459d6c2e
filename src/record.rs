//! Restaurant records at each stage of the pipeline

use std::fmt;

/// One scraped listing as text, before cleaning. `None` marks an absent cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub name: Option<String>,
    pub location: Option<String>,
    pub rate: Option<String>,
    pub review: Option<String>,
    pub category: Option<String>,
    pub discount: Option<String>,
    pub minimum_purchase: Option<String>,
}

/// A validated listing produced by the cleaning stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub location: String,
    pub rate: f64,
    pub review: u64,
    pub category: String,
    pub discount: bool,
    pub minimum_purchase: u64,
}

#[cfg(test)]
impl Record {
    /// Render the record back into raw text form.
    ///
    /// `no_discount_text` is the sentinel the cleaner maps to `discount = false`.
    /// Cleaning the result yields the same record again.
    pub fn to_raw(&self, no_discount_text: &str) -> RawRecord {
        let discount = if self.discount {
            "Discount".to_string()
        } else {
            no_discount_text.to_string()
        };

        RawRecord {
            name: Some(self.name.clone()),
            location: Some(self.location.clone()),
            rate: Some(self.rate.to_string()),
            review: Some(self.review.to_string()),
            category: Some(self.category.clone()),
            discount: Some(discount),
            minimum_purchase: Some(self.minimum_purchase.to_string()),
        }
    }
}

/// A cleaned record with its composite satisfaction score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: Record,
    /// Rate min-max scaled over the batch
    pub rate_normalized: f64,
    /// Review count min-max scaled over the batch
    pub review_normalized: f64,
    pub csat: f64,
    pub normalized_csat: f64,
}

/// Ordinal satisfaction tier, `A` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    E,
    D,
    C,
    B,
    A,
    /// Score outside the classification bounds
    Unknown,
}

impl Class {
    /// Tiers in interval order, lowest first.
    pub const ORDERED: [Class; 5] = [Class::E, Class::D, Class::C, Class::B, Class::A];

    pub fn as_str(&self) -> &'static str {
        match self {
            Class::A => "A",
            Class::B => "B",
            Class::C => "C",
            Class::D => "D",
            Class::E => "E",
            Class::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final output row: a scored record with its cluster label and tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub scored: ScoredRecord,
    pub cluster: usize,
    pub class: Class,
}
