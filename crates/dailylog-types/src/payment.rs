//! Payment ledger types.
//!
//! Read-only in this service; payment records are written by an external
//! billing flow and consulted only to decide trial eligibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Subscription plan tier attached to a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanGrade {
    OneDiaryOneDay,
}

impl fmt::Display for PlanGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanGrade::OneDiaryOneDay => write!(f, "one_diary_one_day"),
        }
    }
}

impl FromStr for PlanGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_diary_one_day" => Ok(PlanGrade::OneDiaryOneDay),
            other => Err(format!("invalid plan grade: '{other}'")),
        }
    }
}

/// A single entry in the payment ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pay_date: DateTime<Utc>,
    pub grade: PlanGrade,
    /// First day the payment covers.
    pub start_date: NaiveDate,
    /// Last day the payment covers, inclusive.
    pub end_date: NaiveDate,
    pub price: i64,
    pub log: Option<String>,
}

impl PaymentRecord {
    /// Whether this record still covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.end_date >= date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(end: NaiveDate) -> PaymentRecord {
        PaymentRecord {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            pay_date: Utc::now(),
            grade: PlanGrade::OneDiaryOneDay,
            start_date: end.pred_opt().unwrap(),
            end_date: end,
            price: 4900,
            log: None,
        }
    }

    #[test]
    fn test_covers_is_inclusive_of_end_date() {
        let today = Utc::now().date_naive();
        assert!(record(today).covers(today));
        assert!(record(today.succ_opt().unwrap()).covers(today));
        assert!(!record(today.pred_opt().unwrap()).covers(today));
    }

    #[test]
    fn test_plan_grade_roundtrip() {
        let parsed: PlanGrade = PlanGrade::OneDiaryOneDay.to_string().parse().unwrap();
        assert_eq!(parsed, PlanGrade::OneDiaryOneDay);
    }
}
