//! PaymentRepository trait definition.
//!
//! The ledger is written by an external billing flow; this service only
//! reads it to decide trial eligibility. `create` exists for wiring tests
//! and backfills.

use dailylog_types::error::RepositoryError;
use dailylog_types::payment::PaymentRecord;
use uuid::Uuid;

/// Repository trait for the payment ledger.
pub trait PaymentRepository: Send + Sync {
    /// Append a ledger entry.
    fn create(
        &self,
        record: &PaymentRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// A user's ledger entries, newest first (record id descending), with
    /// id-cursor pagination.
    fn find_by_user_id(
        &self,
        user_id: &Uuid,
        cursor: Option<Uuid>,
        size: i64,
    ) -> impl std::future::Future<Output = Result<Vec<PaymentRecord>, RepositoryError>> + Send;
}
