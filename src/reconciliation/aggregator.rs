//! Accumulator for the per-method transaction fan-out.

use std::collections::{HashMap, HashSet};

use log::debug;
use rust_decimal::Decimal;

use crate::gateway::MethodTransactions;

/// Combines the results of N independent per-method transaction fetches into
/// session totals.
///
/// Both the running sum and the order-id union are commutative and
/// associative, so completion order never changes the final totals. The
/// aggregator itself is not synchronized: the caller must feed completions
/// one at a time (the service drains them from a single task).
#[derive(Debug)]
pub struct TransactionAggregator {
    pending: usize,
    total_sales: Decimal,
    unique_order_ids: HashSet<String>,
    method_totals: HashMap<String, Decimal>,
}

impl TransactionAggregator {
    pub fn new(pending: usize) -> Self {
        Self {
            pending,
            total_sales: Decimal::ZERO,
            unique_order_ids: HashSet::new(),
            method_totals: HashMap::new(),
        }
    }

    /// Applies one successful completion: adds the amount, unions the order
    /// ids, records the per-method total and decrements the pending counter.
    pub fn record(&mut self, method_id: &str, transactions: MethodTransactions) {
        self.total_sales += transactions.total_amount;
        self.unique_order_ids.extend(transactions.order_ids);
        self.method_totals
            .insert(method_id.to_string(), transactions.total_amount);
        self.complete_one(method_id);
    }

    /// Applies one failed completion: the method counts as zero and the
    /// counter still decrements, so a lost fetch cannot wedge the session.
    pub fn record_failure(&mut self, method_id: &str) {
        self.method_totals
            .insert(method_id.to_string(), Decimal::ZERO);
        self.complete_one(method_id);
    }

    fn complete_one(&mut self, method_id: &str) {
        self.pending = self.pending.saturating_sub(1);
        debug!(
            "transactions for mode {} aggregated, {} fetch(es) pending",
            method_id, self.pending
        );
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }

    /// Final only once `is_complete()` holds.
    pub fn total_sales(&self) -> Decimal {
        self.total_sales
    }

    /// Count of distinct order ids seen across all methods.
    pub fn total_orders(&self) -> usize {
        self.unique_order_ids.len()
    }

    pub fn method_total(&self, method_id: &str) -> Decimal {
        self.method_totals
            .get(method_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
