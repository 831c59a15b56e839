//! SurrealDB implementation of [`HistoryRepository`].

use chrono::NaiveDate;
use rollcall_core::Result;
use rollcall_core::models::summary::{CreateDaySummary, DaySummary};
use rollcall_core::repository::{HistoryFilter, HistoryRepository, PaginatedResult, Pagination};
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Deserialize)]
struct DaySummaryRow {
    record_id: String,
    date: String,
    class_id: String,
    class_name: String,
    subject_code: String,
    total_students: u32,
    present: u32,
    absent: u32,
    late: u32,
}

impl DaySummaryRow {
    fn try_into_summary(self) -> std::result::Result<DaySummary, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid summary UUID: {e}")))?;
        let class_id = Uuid::parse_str(&self.class_id)
            .map_err(|e| DbError::Corrupt(format!("invalid class UUID: {e}")))?;
        let date = self
            .date
            .parse::<NaiveDate>()
            .map_err(|e| DbError::Corrupt(format!("invalid summary date: {e}")))?;
        Ok(DaySummary {
            id,
            date,
            class_id,
            class_name: self.class_name,
            subject_code: self.subject_code,
            total_students: self.total_students,
            present: self.present,
            absent: self.absent,
            late: self.late,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the day-summary archive.
#[derive(Clone)]
pub struct SurrealHistoryRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealHistoryRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Render the WHERE clause for a filter; bindings are attached by
    /// the caller for exactly the same set of conditions.
    fn where_clause(filter: &HistoryFilter) -> String {
        let mut conditions: Vec<&str> = Vec::new();
        if filter.class_id.is_some() {
            conditions.push("class_id = $class_id");
        }
        if filter.query.is_some() {
            conditions.push(
                "(string::lowercase(class_name) CONTAINS $query \
                 OR string::lowercase(subject_code) CONTAINS $query)",
            );
        }
        if filter.from.is_some() {
            conditions.push("date >= $from");
        }
        if filter.to.is_some() {
            conditions.push("date <= $to");
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }
}

impl<C: Connection> HistoryRepository for SurrealHistoryRepository<C> {
    async fn append(&self, input: CreateDaySummary) -> Result<DaySummary> {
        let id = Uuid::new_v4();

        self.db
            .query(
                "CREATE type::record('day_summary', $id) SET \
                 date = $date, \
                 class_id = $class_id, \
                 class_name = $class_name, \
                 subject_code = $subject_code, \
                 total_students = $total_students, \
                 present = $present, \
                 absent = $absent, \
                 late = $late",
            )
            .bind(("id", id.to_string()))
            .bind(("date", input.date.to_string()))
            .bind(("class_id", input.class_id.to_string()))
            .bind(("class_name", input.class_name.clone()))
            .bind(("subject_code", input.subject_code.clone()))
            .bind(("total_students", input.total_students))
            .bind(("present", input.present))
            .bind(("absent", input.absent))
            .bind(("late", input.late))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        Ok(DaySummary {
            id,
            date: input.date,
            class_id: input.class_id,
            class_name: input.class_name,
            subject_code: input.subject_code,
            total_students: input.total_students,
            present: input.present,
            absent: input.absent,
            late: input.late,
        })
    }

    async fn list(
        &self,
        filter: HistoryFilter,
        pagination: Pagination,
    ) -> Result<PaginatedResult<DaySummary>> {
        let where_sql = Self::where_clause(&filter);

        let mut count_query = self.db.query(format!(
            "SELECT count() AS total FROM day_summary {where_sql} GROUP ALL"
        ));
        let mut list_query = self.db.query(format!(
            "SELECT meta::id(id) AS record_id, * FROM day_summary {where_sql} \
             ORDER BY date DESC LIMIT $limit START $offset"
        ));

        if let Some(class_id) = filter.class_id {
            count_query = count_query.bind(("class_id", class_id.to_string()));
            list_query = list_query.bind(("class_id", class_id.to_string()));
        }
        if let Some(query) = filter.query {
            let needle = query.to_lowercase();
            count_query = count_query.bind(("query", needle.clone()));
            list_query = list_query.bind(("query", needle));
        }
        if let Some(from) = filter.from {
            count_query = count_query.bind(("from", from.to_string()));
            list_query = list_query.bind(("from", from.to_string()));
        }
        if let Some(to) = filter.to {
            count_query = count_query.bind(("to", to.to_string()));
            list_query = list_query.bind(("to", to.to_string()));
        }

        let mut count_result = count_query.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut list_result = list_query
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<DaySummaryRow> = list_result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(DaySummaryRow::try_into_summary)
            .collect::<std::result::Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
