//! Trial entitlement gate.

use chrono::Utc;
use dailylog_types::error::DiaryError;
use tracing::{debug, info};
use uuid::Uuid;

use crate::repository::{PaymentRepository, UserRepository};

/// Applies the trial-count decrement after a diary is written.
///
/// The read-payment-then-decrement sequence is not atomic with diary
/// creation; concurrent writes from the same user can race. The store's
/// single-row write is the only atomicity relied upon.
pub struct EntitlementService<P: PaymentRepository, U: UserRepository> {
    payment_repo: P,
    user_repo: U,
}

impl<P: PaymentRepository, U: UserRepository> EntitlementService<P, U> {
    pub fn new(payment_repo: P, user_repo: U) -> Self {
        Self {
            payment_repo,
            user_repo,
        }
    }

    /// Decrement the user's free trial count unless an unexpired payment
    /// record covers today.
    pub async fn apply_after_write(&self, user_id: &Uuid) -> Result<(), DiaryError> {
        let latest = self
            .payment_repo
            .find_by_user_id(user_id, None, 1)
            .await?
            .into_iter()
            .next();

        let today = Utc::now().date_naive();
        if let Some(record) = latest {
            if record.covers(today) {
                debug!(user_id = %user_id, end_date = %record.end_date, "Payment covers today, trial untouched");
                return Ok(());
            }
        }

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DiaryError::UserNotFound)?;
        user.free_trial_count -= 1;
        user.updated_at = Utc::now();
        self.user_repo.update(&user).await?;

        info!(user_id = %user_id, remaining = user.free_trial_count, "Free trial decremented");
        Ok(())
    }
}
