//! Notes and chart series that place an application among past outcomes.

use crate::adapters::dataset::LoanDataset;
use crate::core::currency::round_to;
use crate::domain::model::{ApplicationForm, BinaryField, LoanRecord, LoanStatus};
use crate::utils::error::{FormError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const HISTOGRAM_BIN_WIDTH: f64 = 2500.0;

static NON_AMOUNT_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("amount filter pattern"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub x: Vec<f64>,
    pub y: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsNotes {
    pub pre_approval: String,
    pub line_of_credit: String,
    pub negative_amortization: String,
    pub interest_only: String,
    pub upfront_charges: String,
    pub income: String,
    pub credit_score: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsReport {
    pub status: LoanStatus,
    pub generated_at: DateTime<Utc>,
    pub records_considered: usize,
    pub notes: ResultsNotes,
    pub upfront_charges_data: HistogramSeries,
    pub income_data: HistogramSeries,
    pub credit_score_data: HistogramSeries,
}

pub struct ResultsProvider<'a> {
    dataset: &'a LoanDataset,
    status: LoanStatus,
    application: &'a ApplicationForm,
}

impl<'a> ResultsProvider<'a> {
    pub fn new(dataset: &'a LoanDataset, status: LoanStatus, application: &'a ApplicationForm) -> Self {
        Self {
            dataset,
            status,
            application,
        }
    }

    fn status_text(&self) -> &'static str {
        self.status.label()
    }

    fn subset(&self) -> impl Iterator<Item = &'a LoanRecord> + 'a {
        let dataset: &'a LoanDataset = self.dataset;
        dataset.with_status(self.status)
    }

    /// Share (%) of same-status files whose flag matches the application, rounded to 2 places.
    /// Rows with no value for the flag are left out of the denominator.
    pub fn binary_distribution_percentage(&self, field: BinaryField) -> f64 {
        let wanted = f64::from(self.application.flag(field));
        let (matching, total) = self
            .subset()
            .filter_map(|record| present(field.of(record)))
            .fold((0usize, 0usize), |(matching, total), value| {
                (matching + usize::from(value == wanted), total + 1)
            });
        percentage(matching, total, 2)
    }

    fn flag_note(&self, field: BinaryField, affirmative: &str, negative: &str) -> String {
        let phrase = if self.application.flag(field) == 1 {
            affirmative
        } else {
            negative
        };
        format!(
            "{}% of {} files {}",
            format_percentage(self.binary_distribution_percentage(field)),
            self.status_text(),
            phrase
        )
    }

    pub fn pre_approval_notes(&self) -> String {
        self.flag_note(BinaryField::PreApproval, "are pre approved", "are not pre approved")
    }

    pub fn line_of_credit_notes(&self) -> String {
        self.flag_note(
            BinaryField::LineOfCredit,
            "are a line of credit",
            "are not a line of credit",
        )
    }

    pub fn negative_amortization_notes(&self) -> String {
        self.flag_note(
            BinaryField::NegativeAmortization,
            "have negative amortization",
            "do not have negative amortization",
        )
    }

    pub fn interest_only_notes(&self) -> String {
        self.flag_note(
            BinaryField::InterestOnly,
            "are interest only",
            "are not interest only",
        )
    }

    fn amount_note(
        &self,
        field_name: &str,
        display: &str,
        select: fn(&LoanRecord) -> Option<f64>,
        subject: &str,
    ) -> Result<String> {
        let amount = parse_amount(field_name, display)?;
        let (matching, total) = self.subset().fold((0usize, 0usize), |(matching, total), record| {
            let hit = present(select(record)) == Some(amount);
            (matching + usize::from(hit), total + 1)
        });

        let share = if matching == 0 {
            "0".to_string()
        } else {
            format_percentage(percentage(matching, total, 4))
        };
        Ok(format!("{}% of {} {} {}", share, self.status_text(), subject, display))
    }

    pub fn upfront_charges_notes(&self) -> Result<String> {
        self.amount_note(
            "upfront_charges",
            &self.application.upfront_charges,
            |record| record.upfront_charges,
            "applications have an upfront charge of",
        )
    }

    pub fn income_notes(&self) -> Result<String> {
        self.amount_note(
            "income",
            &self.application.income,
            |record| record.income,
            "applicants have an income of",
        )
    }

    pub fn credit_score_notes(&self) -> String {
        let score = f64::from(self.application.credit_score);
        let (matching, total) = self.subset().fold((0usize, 0usize), |(matching, total), record| {
            let hit = present(record.credit_score) == Some(score);
            (matching + usize::from(hit), total + 1)
        });
        format!(
            "{}% of applicants have a credit score of {}",
            format_percentage(percentage(matching, total, 2)),
            self.application.credit_score
        )
    }

    pub fn upfront_charges_data(&self) -> HistogramSeries {
        histogram(self.subset().filter_map(|record| present(record.upfront_charges)))
    }

    pub fn income_data(&self) -> HistogramSeries {
        histogram(self.subset().filter_map(|record| present(record.income)))
    }

    /// Distinct credit scores in ascending order with their counts.
    pub fn credit_score_data(&self) -> HistogramSeries {
        let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
        for score in self.subset().filter_map(|record| present(record.credit_score)) {
            *counts.entry(score.round() as i64).or_default() += 1;
        }
        HistogramSeries {
            x: counts.keys().map(|&score| score as f64).collect(),
            y: counts.into_values().collect(),
        }
    }

    pub fn report(&self) -> Result<ResultsReport> {
        let notes = ResultsNotes {
            pre_approval: self.pre_approval_notes(),
            line_of_credit: self.line_of_credit_notes(),
            negative_amortization: self.negative_amortization_notes(),
            interest_only: self.interest_only_notes(),
            upfront_charges: self.upfront_charges_notes()?,
            income: self.income_notes()?,
            credit_score: self.credit_score_notes(),
        };

        Ok(ResultsReport {
            status: self.status,
            generated_at: Utc::now(),
            records_considered: self.subset().count(),
            notes,
            upfront_charges_data: self.upfront_charges_data(),
            income_data: self.income_data(),
            credit_score_data: self.credit_score_data(),
        })
    }
}

/// NaN cells count as missing.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn percentage(matching: usize, total: usize, precision: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(matching as f64 / total as f64 * 100.0, precision)
}

/// Whole numbers keep one decimal place (`100.0`), others print as-is (`72.5`).
pub fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Keeps digits and dots only, so `"$2,500.00"` reads as `2500`.
pub fn parse_amount(field_name: &str, display: &str) -> Result<f64> {
    let cleaned = NON_AMOUNT_CHARS.replace_all(display, "");
    cleaned
        .parse::<f64>()
        .map_err(|_| FormError::ValidationError {
            message: format!("{} '{}' is not an amount", field_name, display),
        })
}

/// Counts values into `HISTOGRAM_BIN_WIDTH` buckets whose edges run from 0 up to,
/// but not including, the truncated maximum. Buckets are `(left, right]` except the
/// first, which also holds its left edge; values past the last edge are dropped.
pub fn histogram<I: IntoIterator<Item = f64>>(values: I) -> HistogramSeries {
    let values: Vec<f64> = values.into_iter().collect();
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut edges = Vec::new();
    let limit = max.trunc();
    let mut edge = 0.0;
    while edge < limit {
        edges.push(edge);
        edge += HISTOGRAM_BIN_WIDTH;
    }

    if edges.len() < 2 {
        return HistogramSeries {
            x: Vec::new(),
            y: Vec::new(),
        };
    }

    let mut counts = vec![0u64; edges.len() - 1];
    for value in values {
        if let Some(bucket) = bucket_index(value, counts.len()) {
            counts[bucket] += 1;
        }
    }

    HistogramSeries {
        x: edges[..edges.len() - 1].to_vec(),
        y: counts,
    }
}

/// Bucket `i` covers `(i * width, (i + 1) * width]`; bucket 0 also takes 0 itself.
fn bucket_index(value: f64, buckets: usize) -> Option<usize> {
    if value.is_nan() || value < 0.0 {
        return None;
    }
    let index = if value == 0.0 {
        0
    } else {
        (value / HISTOGRAM_BIN_WIDTH).ceil() as usize - 1
    };
    (index < buckets).then_some(index)
}
