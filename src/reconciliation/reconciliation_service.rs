//! Session-close coordinator: loads payment methods and session data, fans
//! out the per-method transaction queries, tracks the cashier's physical
//! counts and drives the close call.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::context::SessionContext;
use crate::gateway::{BackendGateway, CloseSessionRequest, GatewayError};
use crate::reconciliation::aggregator::TransactionAggregator;
use crate::reconciliation::reconciliation_errors::ReconciliationError;
use crate::reconciliation::reconciliation_model::{
    EngineState, ReconciliationLine, SessionSummary,
};

pub struct ReconciliationService {
    gateway: Arc<dyn BackendGateway>,
    context: Arc<SessionContext>,
    state: EngineState,
    summary: Option<SessionSummary>,
}

impl ReconciliationService {
    pub fn new(gateway: Arc<dyn BackendGateway>, context: Arc<SessionContext>) -> Self {
        Self {
            gateway,
            context,
            state: EngineState::Idle,
            summary: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// `None` until `load` has run.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Runs the full pipeline up to `Ready`.
    ///
    /// Payment-method and session-data failures degrade (empty list, zero
    /// amounts) instead of aborting; only a missing active session is fatal.
    /// `cashier_name` is the locally known name, used when the backend omits
    /// one.
    pub async fn load(&mut self, cashier_name: &str) -> Result<(), ReconciliationError> {
        let session_id = self
            .context
            .active_session_id()
            .ok_or(ReconciliationError::NoActiveSession)?;

        self.state = EngineState::LoadingPaymentMethods;
        let methods = match self.gateway.fetch_payment_methods().await {
            Ok(methods) => methods,
            Err(error) => {
                warn!("payment modes unavailable, continuing without any: {error}");
                Vec::new()
            }
        };

        self.state = EngineState::LoadingSessionData;
        let mut summary = SessionSummary::new(session_id, cashier_name.to_string());
        match self.gateway.fetch_session(session_id).await {
            Ok(details) => {
                summary.opening_amount = details.opening_amount;
                summary.opened_at = details.opened_at;
                if !details.cashier_name.is_empty() {
                    summary.cashier_name = details.cashier_name;
                }
            }
            Err(error) => {
                warn!("session {session_id} details unavailable, continuing with zero amounts: {error}");
            }
        }
        summary.lines = methods
            .iter()
            .cloned()
            .map(ReconciliationLine::new)
            .collect();

        self.state = EngineState::AggregatingTransactions;
        let mut aggregator = TransactionAggregator::new(methods.len());

        // One concurrent fetch per method. Draining the set from this single
        // task serializes completions, so the accumulator and the pending
        // counter never see interleaved updates.
        let mut completions = FuturesUnordered::new();
        for method in &methods {
            let gateway = Arc::clone(&self.gateway);
            let method_id = method.id.clone();
            completions.push(async move {
                let result = gateway
                    .fetch_transactions_for_method(session_id, &method_id)
                    .await;
                (method_id, result)
            });
        }

        while let Some((method_id, result)) = completions.next().await {
            match result {
                Ok(transactions) => {
                    if let Some(line) = summary.line_for_method_mut(&method_id) {
                        line.set_system_amount(transactions.total_amount);
                    }
                    aggregator.record(&method_id, transactions);
                }
                Err(error) => {
                    warn!("transactions for mode {method_id} unavailable, counted as zero: {error}");
                    if let Some(line) = summary.line_for_method_mut(&method_id) {
                        line.set_system_amount(Decimal::ZERO);
                    }
                    aggregator.record_failure(&method_id);
                }
            }
        }

        debug_assert!(aggregator.is_complete());
        summary.total_sales = aggregator.total_sales();
        summary.total_orders = aggregator.total_orders();
        debug!(
            "session {session_id} aggregation final: {} sales across {} orders",
            summary.total_sales, summary.total_orders
        );

        self.summary = Some(summary);
        self.state = EngineState::Ready;
        Ok(())
    }

    /// Updates one line's counted amount (`None` clears the field) and
    /// recomputes that line's difference. Never re-triggers aggregation.
    /// Returns false when the method is unknown.
    pub fn set_actual_amount(&mut self, method_id: &str, amount: Option<Decimal>) -> bool {
        match self
            .summary
            .as_mut()
            .and_then(|summary| summary.line_for_method_mut(method_id))
        {
            Some(line) => {
                line.set_actual_amount(amount);
                true
            }
            None => false,
        }
    }

    /// Validates every counted amount, sends the close request, and on
    /// success clears the active session id.
    ///
    /// Validation failures and gateway failures both leave the engine in
    /// `Ready` with all counts intact so the cashier can correct and retry.
    pub async fn close(&mut self, notes: &str) -> Result<(), ReconciliationError> {
        if self.state != EngineState::Ready {
            return Err(ReconciliationError::NotReady);
        }
        let summary = self
            .summary
            .as_mut()
            .ok_or(ReconciliationError::NotReady)?;

        let mut closing_amount = Decimal::ZERO;
        let mut expected_amount = Decimal::ZERO;
        let mut payment_mode_amounts = HashMap::new();
        let mut expected_payment_mode_amounts = HashMap::new();

        for line in &summary.lines {
            let actual = line
                .actual_amount()
                .ok_or_else(|| ReconciliationError::MissingCount(line.method.name.clone()))?;
            if actual < Decimal::ZERO {
                return Err(ReconciliationError::NegativeCount(line.method.name.clone()));
            }

            closing_amount += actual;
            expected_amount += line.system_amount();
            payment_mode_amounts.insert(line.method.name.clone(), actual);
            expected_payment_mode_amounts.insert(line.method.name.clone(), line.system_amount());
        }

        summary.notes = notes.to_string();
        let request = CloseSessionRequest {
            closing_amount,
            expected_amount,
            payment_mode_amounts,
            expected_payment_mode_amounts,
            notes: summary.notes.clone(),
        };
        let session_id = summary.session_id;

        self.state = EngineState::Closing;
        match self.gateway.close_session(session_id, &request).await {
            Ok(()) => {
                self.state = EngineState::Closed;
                self.context.clear_active_session_id();
                debug!("session {session_id} closed, counted {closing_amount} against {expected_amount}");
                Ok(())
            }
            Err(GatewayError::ApiLogic(message)) => {
                self.state = EngineState::Ready;
                Err(ReconciliationError::CloseRejected(message))
            }
            Err(error) => {
                self.state = EngineState::Ready;
                Err(error.into())
            }
        }
    }
}
