//! # Batch Coordinator
//!
//! Creates many orders at once. Each draft goes through
//! [`OrderService::create_order`] on its own task; one bad draft never fails the batch.
//!
//! ```text
//! create_orders(drafts)
//!   ├─ spawn one task per draft (bounded by a semaphore)
//!   │    ├─ create_order(draft)          (outside the lock)
//!   │    ├─ order_revenue(id)            (outside the lock)
//!   │    └─ record report                (under the lock)
//!   ├─ join all tasks
//!   └─ InventoryClient::usage(created ids)  (one query)
//! ```
//!
//! Reports come back in completion order.

use crate::clients::InventoryClient;
use crate::error::ErrorKind;
use crate::model::{
    BatchOutcome, BatchResponse, BatchSummary, OrderDraft, OrderId, OrderReport,
};
use crate::order_actor::OrderError;
use crate::service::OrderService;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, instrument, warn};

const UNHANDLED_REASON: &str = "unhandled reason";

/// Runs order creation for a list of drafts with bounded concurrency.
#[derive(Clone)]
pub struct BatchCoordinator {
    orders: OrderService,
    inventory: InventoryClient,
    permits: Arc<Semaphore>,
}

#[derive(Default)]
struct Tally {
    accepted: usize,
    rejected: usize,
    total_revenue: Decimal,
    reports: Vec<OrderReport>,
    created: Vec<OrderId>,
    /// Positions in the submitted list that already have a report.
    reported: BTreeSet<usize>,
}

type SharedTally = Arc<Mutex<Tally>>;

impl Tally {
    fn accept(&mut self, index: usize, id: OrderId, report: OrderReport) {
        self.reported.insert(index);
        self.accepted += 1;
        self.total_revenue = self.total_revenue.saturating_add(report.total);
        self.created.push(id);
        self.reports.push(report);
    }

    fn reject(&mut self, index: usize, report: OrderReport) {
        self.reported.insert(index);
        self.rejected += 1;
        self.reports.push(report);
    }

    /// Rejects every submitted draft that has no report yet. Returns how many there were.
    fn reject_unreported(&mut self, names: Vec<String>) -> usize {
        let mut filled = 0;
        for (index, customer_name) in names.into_iter().enumerate() {
            if !self.reported.contains(&index) {
                self.reject(index, rejected(customer_name, UNHANDLED_REASON));
                filled += 1;
            }
        }
        filled
    }
}

fn record(tally: &SharedTally, update: impl FnOnce(&mut Tally)) {
    let mut guard = tally.lock().unwrap_or_else(PoisonError::into_inner);
    update(&mut guard);
}

impl BatchCoordinator {
    /// `concurrency` is the number of drafts processed at the same time; at least one.
    pub fn new(orders: OrderService, inventory: InventoryClient, concurrency: usize) -> Self {
        Self {
            orders,
            inventory,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Creates every draft it can. Fails only when the final inventory query fails.
    #[instrument(skip(self, drafts), fields(drafts = drafts.len()))]
    pub async fn create_orders(
        &self,
        drafts: Vec<OrderDraft>,
    ) -> Result<BatchResponse, OrderError> {
        let total_orders = drafts.len();
        let tally: SharedTally = Arc::new(Mutex::new(Tally::default()));
        let mut tasks = JoinSet::new();
        let mut names = Vec::with_capacity(total_orders);

        for (index, draft) in drafts.into_iter().enumerate() {
            names.push(draft.customer_name.clone());
            let orders = self.orders.clone();
            let permits = Arc::clone(&self.permits);
            let tally = Arc::clone(&tally);
            tasks.spawn(async move {
                // Never closed while the coordinator is alive.
                let Ok(_permit) = permits.acquire_owned().await else {
                    return;
                };
                process(orders, index, draft, &tally).await;
            });
        }

        let mut panicked = 0usize;
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Batch task failed");
                panicked += 1;
            }
        }

        let mut tally = {
            let mut guard = tally.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };

        // A task that died before recording anything is still owed a report.
        let missing = tally.reject_unreported(names);
        if missing > 0 {
            warn!(missing, panicked, "Reported unfinished drafts as rejected");
        }

        let inventory_updates = if tally.created.is_empty() {
            Vec::new()
        } else {
            self.inventory.usage(tally.created.clone()).await?
        };

        info!(
            accepted = tally.accepted,
            rejected = tally.rejected,
            revenue = %tally.total_revenue,
            "Batch processed"
        );
        Ok(BatchResponse {
            order_reports: tally.reports,
            summary: BatchSummary {
                total_orders,
                accepted: tally.accepted,
                rejected: tally.rejected,
                total_revenue: tally.total_revenue,
                inventory_updates,
            },
        })
    }
}

async fn process(orders: OrderService, index: usize, draft: OrderDraft, tally: &SharedTally) {
    let customer_name = draft.customer_name.clone();
    let id = match orders.create_order(draft).await {
        Ok(id) => id,
        Err(e) => {
            let reason = rejection_reason(&e);
            warn!(customer = %customer_name, error = %e, reason, "Order rejected");
            record(tally, |t| t.reject(index, rejected(customer_name, reason)));
            return;
        }
    };

    let (total, reason) = match orders.order_revenue(id).await {
        Ok(total) => (total, None),
        Err(e) => {
            warn!(order_id = %id, error = %e, "Revenue unavailable for accepted order");
            (Decimal::ZERO, Some(format!("revenue unavailable: {e}")))
        }
    };
    let report = OrderReport {
        order_id: Some(id),
        customer_name,
        status: BatchOutcome::Accepted,
        total,
        reason,
    };
    record(tally, |t| t.accept(index, id, report));
}

fn rejected(customer_name: String, reason: &str) -> OrderReport {
    OrderReport {
        order_id: None,
        customer_name,
        status: BatchOutcome::Rejected,
        total: Decimal::ZERO,
        reason: Some(reason.to_string()),
    }
}

/// Caller-facing reason for a rejected draft, chosen by error kind first.
pub fn rejection_reason(error: &OrderError) -> &'static str {
    match error.kind() {
        ErrorKind::Conflict => "insufficient inventory",
        ErrorKind::Validation => match error {
            OrderError::EmptyCustomerName => "empty customer name",
            OrderError::UnknownMenuItem(_) => "non-existing menu item provided",
            OrderError::NonPositiveQuantity { .. } => "non-positive product quantity provided",
            OrderError::QuantityTooLarge { .. } => "product quantity too large",
            _ => UNHANDLED_REASON,
        },
        ErrorKind::State | ErrorKind::NotFound | ErrorKind::Internal => UNHANDLED_REASON,
    }
}
