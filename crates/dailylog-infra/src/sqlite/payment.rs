//! SQLite payment ledger implementation.
//!
//! Read-mostly: the billing flow appends rows out of band and this
//! service only consults the newest record per user.

use dailylog_core::repository::PaymentRepository;
use dailylog_types::error::RepositoryError;
use dailylog_types::payment::{PaymentRecord, PlanGrade};
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_date, format_datetime, parse_date, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `PaymentRepository`.
pub struct SqlitePaymentRepository {
    pool: DatabasePool,
}

impl SqlitePaymentRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain PaymentRecord.
struct PaymentRow {
    id: String,
    user_id: String,
    pay_date: String,
    grade: String,
    start_date: String,
    end_date: String,
    price: i64,
    log: Option<String>,
}

impl PaymentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            pay_date: row.try_get("pay_date")?,
            grade: row.try_get("grade")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            price: row.try_get("price")?,
            log: row.try_get("log")?,
        })
    }

    fn into_record(self) -> Result<PaymentRecord, RepositoryError> {
        let grade: PlanGrade = self.grade.parse().map_err(RepositoryError::Query)?;
        Ok(PaymentRecord {
            id: parse_uuid(&self.id, "payment id")?,
            user_id: parse_uuid(&self.user_id, "user_id")?,
            pay_date: parse_datetime(&self.pay_date)?,
            grade,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            price: self.price,
            log: self.log,
        })
    }
}

impl PaymentRepository for SqlitePaymentRepository {
    async fn create(&self, record: &PaymentRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO payment_logs (id, user_id, pay_date, grade, start_date, end_date, price, log)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(record.id.to_string())
        .bind(record.user_id.to_string())
        .bind(format_datetime(&record.pay_date))
        .bind(record.grade.to_string())
        .bind(format_date(&record.start_date))
        .bind(format_date(&record.end_date))
        .bind(record.price)
        .bind(&record.log)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: &Uuid,
        cursor: Option<Uuid>,
        size: i64,
    ) -> Result<Vec<PaymentRecord>, RepositoryError> {
        let rows = match cursor {
            Some(cursor) => {
                sqlx::query(
                    "SELECT * FROM payment_logs WHERE user_id = ? AND id < ? ORDER BY id DESC LIMIT ?",
                )
                .bind(user_id.to_string())
                .bind(cursor.to_string())
                .bind(size)
                .fetch_all(&self.pool.reader)
                .await
            }
            None => {
                sqlx::query("SELECT * FROM payment_logs WHERE user_id = ? ORDER BY id DESC LIMIT ?")
                    .bind(user_id.to_string())
                    .bind(size)
                    .fetch_all(&self.pool.reader)
                    .await
            }
        }
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let payment_row =
                PaymentRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            records.push(payment_row.into_record()?);
        }

        Ok(records)
    }
}
