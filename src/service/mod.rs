//! # Services
//!
//! The order lifecycle and the reports built on order history. Services hold clients,
//! never stores: all state lives in the actors.

pub mod order_service;
pub mod reports;

pub use order_service::{parse_order_id, top_sellers, Clock, OrderService};
pub use reports::{
    parse_month, parse_report_date, resolve_period, PeriodQuery, ReportError,
    REPORT_DATE_FORMAT,
};
