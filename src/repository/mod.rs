pub mod account;
pub mod branch;
pub mod encounter;
pub mod medication;
pub mod patient;
pub mod provider;
pub mod referral;

pub use account::AccountRepository;
pub use branch::BranchRepository;
pub use encounter::EncounterRepository;
pub use lab_test::LabTestRepository;
pub use medication::MedicationRepository;
pub use patient::PatientRepository;
pub use provider::ProviderRepository;
pub use referral::ReferralRepository;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use crate::models::Table;
use crate::query::{build_paged_statements, PageQuery, Paginated, Scalar};

/// Shared list fetch: a count of the filtered set followed by a bounded
/// select. The two statements are independent round trips; under
/// concurrent writes the total and the page may reflect different
/// instants, which is accepted.
pub(crate) async fn fetch_paginated<E>(pool: &PgPool, query: &PageQuery) -> Result<Paginated<E>>
where
    E: Table + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let statements = build_paged_statements::<E>(query);

    let mut count_query = sqlx::query_scalar::<_, i64>(&statements.count_sql);
    for value in &statements.binds {
        count_query = match value {
            Scalar::Bool(b) => count_query.bind(*b),
            Scalar::Number(n) => count_query.bind(*n),
            Scalar::Text(s) => count_query.bind(s.as_str()),
        };
    }
    let total = count_query.fetch_one(pool).await?;

    let mut select_query = sqlx::query_as::<_, E>(&statements.select_sql);
    for value in &statements.binds {
        select_query = match value {
            Scalar::Bool(b) => select_query.bind(*b),
            Scalar::Number(n) => select_query.bind(*n),
            Scalar::Text(s) => select_query.bind(s.as_str()),
        };
    }
    let rows = select_query.fetch_all(pool).await?;

    Ok(Paginated::new(rows, total, query))
}
