use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::departments::dtos::{
    CreateDepartmentDto, DepartmentResponseDto, UpdateDepartmentDto,
};
use crate::features::departments::models::DepartmentRecord;
use crate::shared::archive::{set_archived, ArchivableTable};
use crate::shared::filters::Conditions;
use crate::shared::types::ReferenceListQuery;

const DEPARTMENT_SELECT: &str = r#"
    SELECT
        d.id, d.name, d.code, d.description, d.archived, d.created_at, d.updated_at,
        (SELECT COUNT(*) FROM courses c WHERE c.department_id = d.id AND c.archived = FALSE) AS courses_count,
        (SELECT COUNT(*) FROM students s WHERE s.department_id = d.id AND s.archived = FALSE) AS students_count,
        (SELECT COUNT(*) FROM faculty f WHERE f.department_id = d.id AND f.archived = FALSE) AS faculty_count
    FROM departments d
"#;

/// Service for department operations
pub struct DepartmentService {
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List departments, live or archived, ordered by name
    pub async fn list(&self, query: &ReferenceListQuery) -> Result<Vec<DepartmentResponseDto>> {
        let mut qb = QueryBuilder::<Postgres>::new(DEPARTMENT_SELECT);
        Conditions::new(&mut qb)
            .archived("d.archived", query.archived())
            .search(&["d.name", "d.code"], query.search.as_deref());
        qb.push(" ORDER BY d.name ASC");

        let rows = qb
            .build_query_as::<DepartmentRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list departments: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(DepartmentResponseDto::from).collect())
    }

    /// Get a live department by id
    pub async fn get(&self, id: Uuid) -> Result<DepartmentResponseDto> {
        self.fetch(id, false).await
    }

    async fn fetch(&self, id: Uuid, archived: bool) -> Result<DepartmentResponseDto> {
        let mut qb = QueryBuilder::<Postgres>::new(DEPARTMENT_SELECT);
        Conditions::new(&mut qb)
            .archived("d.archived", archived)
            .eq("d.id", Some(id));

        qb.build_query_as::<DepartmentRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get department: {:?}", e);
                AppError::Database(e)
            })?
            .map(DepartmentResponseDto::from)
            .ok_or_else(|| AppError::not_found("Department"))
    }

    pub async fn create(&self, dto: CreateDepartmentDto) -> Result<DepartmentResponseDto> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO departments (name, code, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.code.trim())
        .bind(dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        tracing::info!("Department created: id={}, code={}", id, dto.code);

        self.get(id).await
    }

    pub async fn update(&self, id: Uuid, dto: UpdateDepartmentDto) -> Result<DepartmentResponseDto> {
        let result = sqlx::query(
            r#"
            UPDATE departments
            SET name = COALESCE($1, name),
                code = COALESCE($2, code),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $4 AND archived = FALSE
            "#,
        )
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.code.as_deref().map(str::trim))
        .bind(dto.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Department"));
        }

        self.get(id).await
    }

    /// Soft delete
    pub async fn archive(&self, id: Uuid) -> Result<()> {
        set_archived(&self.pool, ArchivableTable::Departments, id, true).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<DepartmentResponseDto> {
        set_archived(&self.pool, ArchivableTable::Departments, id, false).await?;
        self.get(id).await
    }

    /// Archived department lookup, used by tests of the restore round trip
    #[cfg(test)]
    pub async fn get_archived(&self, id: Uuid) -> Result<DepartmentResponseDto> {
        self.fetch(id, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(code: &str) -> CreateDepartmentDto {
        CreateDepartmentDto {
            name: "College of Computing".to_string(),
            code: code.to_string(),
            description: Some("Computer Science and IT".to_string()),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_archive_then_restore_round_trip(pool: PgPool) {
        let service = DepartmentService::new(pool);
        let created = service.create(create_dto("CCS")).await.unwrap();

        service.archive(created.id).await.unwrap();
        assert!(matches!(service.get(created.id).await, Err(AppError::NotFound(_))));
        let listed = service.list(&ReferenceListQuery::default()).await.unwrap();
        assert!(listed.iter().all(|d| d.id != created.id));
        assert!(service.get_archived(created.id).await.is_ok());

        let restored = service.restore(created.id).await.unwrap();
        assert_eq!(restored.id, created.id);
        assert_eq!(restored.name, created.name);
        assert_eq!(restored.code, created.code);
        assert!(!restored.archived);

        let archive_view = service
            .list(&ReferenceListQuery {
                archived: Some(true),
                search: None,
            })
            .await
            .unwrap();
        assert!(archive_view.iter().all(|d| d.id != created.id));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_code_is_a_field_error(pool: PgPool) {
        let service = DepartmentService::new(pool);
        service.create(create_dto("CCS")).await.unwrap();

        match service.create(create_dto("CCS")).await {
            Err(AppError::Validation(fields)) => assert!(fields.contains_key("code")),
            other => panic!("expected validation error, got {:?}", other.map(|d| d.id)),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_restore_of_live_department_is_not_found(pool: PgPool) {
        let service = DepartmentService::new(pool);
        let created = service.create(create_dto("CCS")).await.unwrap();

        assert!(matches!(
            service.restore(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
