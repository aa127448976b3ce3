use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::academic_years::dtos::{
    AcademicYearResponseDto, CreateAcademicYearDto, UpdateAcademicYearDto,
};
use crate::features::academic_years::models::AcademicYearRecord;
use crate::shared::archive::{set_archived, ArchivableTable};
use crate::shared::filters::Conditions;
use crate::shared::types::ReferenceListQuery;

const ACADEMIC_YEAR_SELECT: &str = r#"
    SELECT
        y.id, y.name, y.start_year, y.end_year, y.is_current, y.status, y.archived,
        y.created_at, y.updated_at,
        (SELECT COUNT(*) FROM students s WHERE s.academic_year_id = y.id AND s.archived = FALSE) AS students_count
    FROM academic_years y
"#;

/// Serializes current-year switches until the transaction ends. The mode
/// conflicts with itself and with row writes, so it must be taken before the
/// transaction writes to `academic_years`.
async fn lock_for_switch(conn: &mut PgConnection) -> Result<()> {
    sqlx::query("LOCK TABLE academic_years IN SHARE ROW EXCLUSIVE MODE")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Clear the flag on every other year, then set it on `id`.
///
/// Must run inside the caller's transaction so readers never observe two
/// current years, or none while a switch is in flight. Concurrent switches
/// queue on the table lock instead of colliding on the one-current index.
async fn make_current(conn: &mut PgConnection, id: Uuid) -> Result<()> {
    lock_for_switch(conn).await?;

    sqlx::query(
        r#"
        UPDATE academic_years
        SET is_current = FALSE, updated_at = NOW()
        WHERE is_current = TRUE AND id <> $1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await
    .map_err(map_write_error)?;

    let result = sqlx::query(
        r#"
        UPDATE academic_years
        SET is_current = TRUE, updated_at = NOW()
        WHERE id = $1 AND archived = FALSE
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Academic year"));
    }

    Ok(())
}

/// Service for academic year operations
pub struct AcademicYearService {
    pool: PgPool,
}

impl AcademicYearService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List academic years, newest first
    pub async fn list(&self, query: &ReferenceListQuery) -> Result<Vec<AcademicYearResponseDto>> {
        let mut qb = QueryBuilder::<Postgres>::new(ACADEMIC_YEAR_SELECT);
        Conditions::new(&mut qb)
            .archived("y.archived", query.archived())
            .search(&["y.name"], query.search.as_deref());
        qb.push(" ORDER BY y.start_year DESC, y.name ASC");

        let rows = qb
            .build_query_as::<AcademicYearRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list academic years: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(AcademicYearResponseDto::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<AcademicYearResponseDto> {
        let mut qb = QueryBuilder::<Postgres>::new(ACADEMIC_YEAR_SELECT);
        Conditions::new(&mut qb)
            .archived("y.archived", false)
            .eq("y.id", Some(id));

        qb.build_query_as::<AcademicYearRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get academic year: {:?}", e);
                AppError::Database(e)
            })?
            .map(AcademicYearResponseDto::from)
            .ok_or_else(|| AppError::not_found("Academic year"))
    }

    /// The live year flagged current
    pub async fn current(&self) -> Result<AcademicYearResponseDto> {
        let mut qb = QueryBuilder::<Postgres>::new(ACADEMIC_YEAR_SELECT);
        qb.push(" WHERE y.is_current = TRUE AND y.archived = FALSE");

        qb.build_query_as::<AcademicYearRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get current academic year: {:?}", e);
                AppError::Database(e)
            })?
            .map(AcademicYearResponseDto::from)
            .ok_or_else(|| AppError::not_found("Current academic year"))
    }

    pub async fn create(&self, dto: CreateAcademicYearDto) -> Result<AcademicYearResponseDto> {
        let mut tx = self.pool.begin().await?;
        if dto.is_current {
            lock_for_switch(&mut tx).await?;
        }

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO academic_years (name, start_year, end_year, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.start_year)
        .bind(dto.end_year)
        .bind(dto.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if dto.is_current {
            make_current(&mut tx, id).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Academic year created: id={}, name={}, current={}",
            id,
            dto.name,
            dto.is_current
        );

        self.get(id).await
    }

    pub async fn update(&self, id: Uuid, dto: UpdateAcademicYearDto) -> Result<AcademicYearResponseDto> {
        let mut tx = self.pool.begin().await?;
        if dto.is_current == Some(true) {
            lock_for_switch(&mut tx).await?;
        }

        let result = sqlx::query(
            r#"
            UPDATE academic_years
            SET name = COALESCE($1, name),
                start_year = COALESCE($2, start_year),
                end_year = COALESCE($3, end_year),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $5 AND archived = FALSE
            "#,
        )
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.start_year)
        .bind(dto.end_year)
        .bind(dto.status)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Academic year"));
        }

        match dto.is_current {
            Some(true) => make_current(&mut tx, id).await?,
            Some(false) => {
                sqlx::query(
                    "UPDATE academic_years SET is_current = FALSE, updated_at = NOW() WHERE id = $1",
                )
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(map_write_error)?;
            }
            None => {}
        }

        tx.commit().await?;

        self.get(id).await
    }

    /// Make `id` the only current year
    pub async fn set_current(&self, id: Uuid) -> Result<AcademicYearResponseDto> {
        let mut tx = self.pool.begin().await?;
        make_current(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Current academic year set: id={}", id);

        self.get(id).await
    }

    /// Soft delete. An archived year is never current.
    pub async fn archive(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE academic_years
            SET archived = TRUE, is_current = FALSE, updated_at = NOW()
            WHERE id = $1 AND archived = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Academic year"));
        }

        tracing::info!("Academic year {} archived", id);
        Ok(())
    }

    pub async fn restore(&self, id: Uuid) -> Result<AcademicYearResponseDto> {
        set_archived(&self.pool, ArchivableTable::AcademicYears, id, false).await?;
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::academic_years::models::AcademicYearStatus;
    use std::sync::Arc;
    use tokio::task::JoinSet;

    fn create_dto(start_year: i32, is_current: bool) -> CreateAcademicYearDto {
        CreateAcademicYearDto {
            name: format!("{}-{}", start_year, start_year + 1),
            start_year,
            end_year: start_year + 1,
            is_current,
            status: AcademicYearStatus::Upcoming,
        }
    }

    async fn current_count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM academic_years WHERE is_current")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_exactly_one_current_after_switches(pool: PgPool) {
        let service = AcademicYearService::new(pool.clone());
        let first = service.create(create_dto(2023, true)).await.unwrap();
        let second = service.create(create_dto(2024, true)).await.unwrap();
        let third = service.create(create_dto(2025, false)).await.unwrap();

        assert_eq!(current_count(&pool).await, 1);
        assert_eq!(service.current().await.unwrap().id, second.id);

        service.set_current(first.id).await.unwrap();
        assert_eq!(current_count(&pool).await, 1);
        assert_eq!(service.current().await.unwrap().id, first.id);

        service
            .update(
                third.id,
                UpdateAcademicYearDto {
                    name: None,
                    start_year: None,
                    end_year: None,
                    is_current: Some(true),
                    status: Some(AcademicYearStatus::Active),
                },
            )
            .await
            .unwrap();
        assert_eq!(current_count(&pool).await, 1);
        let current = service.current().await.unwrap();
        assert_eq!(current.id, third.id);
        assert_eq!(current.status, AcademicYearStatus::Active);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_failed_switch_keeps_previous_current(pool: PgPool) {
        let service = AcademicYearService::new(pool.clone());
        let year = service.create(create_dto(2024, true)).await.unwrap();

        assert!(matches!(
            service.set_current(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(service.current().await.unwrap().id, year.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_archiving_current_year_clears_flag(pool: PgPool) {
        let service = AcademicYearService::new(pool.clone());
        let year = service.create(create_dto(2024, true)).await.unwrap();

        service.archive(year.id).await.unwrap();
        assert_eq!(current_count(&pool).await, 0);
        assert!(matches!(service.current().await, Err(AppError::NotFound(_))));

        let restored = service.restore(year.id).await.unwrap();
        assert!(!restored.is_current);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_switches_all_succeed(pool: PgPool) {
        let service = Arc::new(AcademicYearService::new(pool.clone()));
        let mut ids = Vec::new();
        for offset in 0..12 {
            ids.push(service.create(create_dto(2030 + offset, false)).await.unwrap().id);
        }

        let mut tasks = JoinSet::new();
        for id in ids.iter().copied() {
            let service = Arc::clone(&service);
            tasks.spawn(async move { service.set_current(id).await.map(|year| year.id) });
        }

        let mut switched = 0;
        while let Some(joined) = tasks.join_next().await {
            let result = joined.unwrap();
            assert!(result.is_ok(), "switch failed: {:?}", result.err());
            switched += 1;
        }
        assert_eq!(switched, ids.len());

        assert_eq!(current_count(&pool).await, 1);
        let current = service.current().await.unwrap();
        assert!(ids.contains(&current.id));
    }
}
