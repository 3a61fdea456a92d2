pub mod aggregator;
pub mod reconciliation_errors;
pub mod reconciliation_model;
pub mod reconciliation_service;


pub use aggregator::TransactionAggregator;
pub use reconciliation_errors::ReconciliationError;
pub use reconciliation_model::{EngineState, ReconciliationLine, SessionSummary};
pub use reconciliation_service::ReconciliationService;
