//! Period and date-window reports over the order store.

use super::order_service::OrderService;
use crate::error::ErrorKind;
use crate::model::{MenuItemId, OrderedItemsByPeriod, Period};
use crate::order_actor::OrderError;
use chrono::{Datelike, Month, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::instrument;

/// Input format of report dates.
pub const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReportError {
    #[error("Invalid period {0:?}, expected \"day\" or \"month\"")]
    InvalidPeriod(String),

    #[error("Invalid month {0:?}")]
    InvalidMonth(String),

    #[error("A month is required for the day period")]
    MissingMonth,

    #[error("A year is required for the month period")]
    MissingYear,

    #[error("The month period takes a year, not a month")]
    ConflictingParameters,

    #[error("Invalid date {0:?}, expected DD.MM.YYYY")]
    InvalidDate(String),

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    /// An ordered product has no menu entry to name it by.
    #[error("Unrecognized menu item: {0}")]
    UnrecognizedItem(MenuItemId),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Order(e) => e.kind(),
            Self::UnrecognizedItem(_) => ErrorKind::Internal,
            _ => ErrorKind::Validation,
        }
    }
}

/// A period report request that passed the parameter rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodQuery {
    pub period: Period,
    pub year: i32,
    /// Set for [`Period::Day`] only.
    pub month: Option<Month>,
}

/// Applies the parameter rules of the period report.
///
/// | period | month | year | outcome |
/// |--------|-------|------|---------|
/// | other | any | any | `InvalidPeriod` |
/// | day | absent | any | `MissingMonth` |
/// | day | present | absent or 0 | year is `current_year` |
/// | month | any | absent or 0 | `MissingYear` |
/// | month | present | present | `ConflictingParameters` |
pub fn resolve_period(
    period: &str,
    month: Option<&str>,
    year: Option<i32>,
    current_year: i32,
) -> Result<PeriodQuery, ReportError> {
    let year = year.filter(|y| *y != 0);
    match period.trim().to_lowercase().as_str() {
        "day" => {
            let month = parse_month(month.ok_or(ReportError::MissingMonth)?)?;
            Ok(PeriodQuery {
                period: Period::Day,
                year: year.unwrap_or(current_year),
                month: Some(month),
            })
        }
        "month" => {
            let year = year.ok_or(ReportError::MissingYear)?;
            if month.is_some() {
                return Err(ReportError::ConflictingParameters);
            }
            Ok(PeriodQuery {
                period: Period::Month,
                year,
                month: None,
            })
        }
        _ => Err(ReportError::InvalidPeriod(period.to_string())),
    }
}

/// Full English month name, any case.
pub fn parse_month(raw: &str) -> Result<Month, ReportError> {
    let wanted = raw.trim();
    std::iter::successors(Some(Month::January), |m| Some(m.succ()))
        .take(12)
        .find(|m| m.name().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ReportError::InvalidMonth(raw.to_string()))
}

/// Parses `DD.MM.YYYY`.
pub fn parse_report_date(raw: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(raw.trim(), REPORT_DATE_FORMAT)
        .map_err(|_| ReportError::InvalidDate(raw.to_string()))
}

impl OrderService {
    /// Units ordered in closed orders, per day of a month or per month of a year.
    /// See [`resolve_period`] for the parameter rules.
    #[instrument(skip(self))]
    pub async fn ordered_items_by_period(
        &self,
        period: &str,
        month: Option<&str>,
        year: Option<i32>,
    ) -> Result<OrderedItemsByPeriod, ReportError> {
        let query = resolve_period(period, month, year, self.now().year())?;
        let month_number = query.month.map(|m| m.number_from_month());
        let ordered_items = self
            .orders
            .closed_units_by_period(query.year, month_number)
            .await?;
        Ok(OrderedItemsByPeriod {
            period: query.period,
            month: query.month.map(|m| m.name().to_string()),
            year: query.year,
            ordered_items,
        })
    }

    /// Units per menu item name over orders created within the inclusive bounds.
    #[instrument(skip(self))]
    pub async fn ordered_menu_items_count(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<BTreeMap<String, u64>, ReportError> {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(ReportError::EndBeforeStart { start, end });
            }
        }
        let counts = self.orders.item_counts(start, end).await?;
        let menu = self.menu_snapshot().await?;

        let mut by_name = BTreeMap::new();
        for (product_id, units) in counts {
            let item = menu
                .get(&product_id)
                .ok_or(ReportError::UnrecognizedItem(product_id))?;
            let count = by_name.entry(item.name.clone()).or_insert(0);
            *count = u64::saturating_add(*count, units);
        }
        Ok(by_name)
    }
}
