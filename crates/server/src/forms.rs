//! Typed validation of form submissions.
//!
//! Every field arrives as a raw string; nothing reaches the store or the
//! arithmetic until it has been converted here. Blank amount fields mean
//! zero (including `tax` — consistent with `processing-fee`); blank
//! required fields are enumerated failures.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use finance_tracker_core::{NewCashEntry, NewStockTransaction};

/// A form field that failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("field '{0}' must not be empty")]
    Empty(&'static str),

    #[error("field '{0}' must be a number")]
    InvalidNumber(&'static str),

    #[error("field '{0}' must be a date in YYYY-MM-DD form")]
    InvalidDate(&'static str),
}

// ── Cash ────────────────────────────────────────────────────────────

/// Raw `POST /cash` submission.
#[derive(Debug, Deserialize)]
pub struct CashForm {
    #[serde(rename = "taiwanese-dollars", default)]
    pub taiwanese_dollars: String,
    #[serde(rename = "us-dollars", default)]
    pub us_dollars: String,
    pub note: String,
    pub date: String,
}

impl TryFrom<CashForm> for NewCashEntry {
    type Error = FormError;

    fn try_from(form: CashForm) -> Result<Self, FormError> {
        Ok(NewCashEntry {
            twd_amount: parse_amount(&form.taiwanese_dollars, "taiwanese-dollars")?,
            usd_amount: parse_amount(&form.us_dollars, "us-dollars")?,
            note: form.note,
            date: parse_date(&form.date, "date")?,
        })
    }
}

/// Raw `POST /cash_delete` submission.
#[derive(Debug, Deserialize)]
pub struct DeleteCashForm {
    pub id: i64,
}

// ── Stock ───────────────────────────────────────────────────────────

/// Raw `POST /stock` submission.
#[derive(Debug, Deserialize)]
pub struct StockForm {
    #[serde(rename = "stock-id")]
    pub stock_id: String,
    #[serde(rename = "stock-num")]
    pub stock_num: String,
    #[serde(rename = "stock-price")]
    pub stock_price: String,
    #[serde(rename = "processing-fee", default)]
    pub processing_fee: String,
    #[serde(default)]
    pub tax: String,
    pub date: String,
}

impl TryFrom<StockForm> for NewStockTransaction {
    type Error = FormError;

    fn try_from(form: StockForm) -> Result<Self, FormError> {
        let ticker = form.stock_id.trim();
        if ticker.is_empty() {
            return Err(FormError::Empty("stock-id"));
        }
        Ok(NewStockTransaction {
            ticker: ticker.to_string(),
            shares: parse_required_int(&form.stock_num, "stock-num")?,
            unit_price: parse_required(&form.stock_price, "stock-price")?,
            fee: parse_amount(&form.processing_fee, "processing-fee")?,
            tax: parse_amount(&form.tax, "tax")?,
            date: parse_date(&form.date, "date")?,
        })
    }
}

// ── Field parsers ───────────────────────────────────────────────────

/// Optional amount: blank means zero.
fn parse_amount(value: &str, field: &'static str) -> Result<f64, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse().map_err(|_| FormError::InvalidNumber(field))
}

/// Required amount: blank is a failure.
fn parse_required(value: &str, field: &'static str) -> Result<f64, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Empty(field));
    }
    trimmed.parse().map_err(|_| FormError::InvalidNumber(field))
}

/// Required signed integer (share counts).
fn parse_required_int(value: &str, field: &'static str) -> Result<i64, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Empty(field));
    }
    trimmed.parse().map_err(|_| FormError::InvalidNumber(field))
}

fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| FormError::InvalidDate(field))
}
