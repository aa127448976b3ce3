use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::courses::dtos::{
    CourseListQuery, CourseResponseDto, CreateCourseDto, UpdateCourseDto,
};
use crate::features::courses::models::CourseRecord;
use crate::shared::archive::{set_archived, ArchivableTable};
use crate::shared::filters::Conditions;

const COURSE_SELECT: &str = r#"
    SELECT
        c.id, c.name, c.code, c.department_id, d.name AS department_name,
        c.credits, c.description, c.archived, c.created_at, c.updated_at,
        (SELECT COUNT(*) FROM students s WHERE s.course_id = c.id AND s.archived = FALSE) AS students_count
    FROM courses c
    LEFT JOIN departments d ON d.id = c.department_id
"#;

/// Service for course operations
pub struct CourseService {
    pool: PgPool,
}

impl CourseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &CourseListQuery) -> Result<Vec<CourseResponseDto>> {
        let mut qb = QueryBuilder::<Postgres>::new(COURSE_SELECT);
        Conditions::new(&mut qb)
            .archived("c.archived", query.archived.unwrap_or(false))
            .eq("c.department_id", query.department_id)
            .search(&["c.name", "c.code"], query.search.as_deref());
        qb.push(" ORDER BY c.name ASC");

        let rows = qb
            .build_query_as::<CourseRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list courses: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(CourseResponseDto::from).collect())
    }

    /// Get a live course by id
    pub async fn get(&self, id: Uuid) -> Result<CourseResponseDto> {
        let mut qb = QueryBuilder::<Postgres>::new(COURSE_SELECT);
        Conditions::new(&mut qb)
            .archived("c.archived", false)
            .eq("c.id", Some(id));

        qb.build_query_as::<CourseRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get course: {:?}", e);
                AppError::Database(e)
            })?
            .map(CourseResponseDto::from)
            .ok_or_else(|| AppError::not_found("Course"))
    }

    pub async fn create(&self, dto: CreateCourseDto) -> Result<CourseResponseDto> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO courses (name, code, department_id, credits, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.code.trim())
        .bind(dto.department_id)
        .bind(dto.credits)
        .bind(dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        tracing::info!("Course created: id={}, code={}", id, dto.code);

        self.get(id).await
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCourseDto) -> Result<CourseResponseDto> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET name = COALESCE($1, name),
                code = COALESCE($2, code),
                department_id = COALESCE($3, department_id),
                credits = COALESCE($4, credits),
                description = COALESCE($5, description),
                updated_at = NOW()
            WHERE id = $6 AND archived = FALSE
            "#,
        )
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.code.as_deref().map(str::trim))
        .bind(dto.department_id)
        .bind(dto.credits)
        .bind(dto.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course"));
        }

        self.get(id).await
    }

    /// Soft delete
    pub async fn archive(&self, id: Uuid) -> Result<()> {
        set_archived(&self.pool, ArchivableTable::Courses, id, true).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<CourseResponseDto> {
        set_archived(&self.pool, ArchivableTable::Courses, id, false).await?;
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(department_id: Option<Uuid>) -> CreateCourseDto {
        CreateCourseDto {
            name: "BS Information Technology".to_string(),
            code: "BSIT".to_string(),
            department_id,
            credits: 3,
            description: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_department_is_a_field_error(pool: PgPool) {
        let service = CourseService::new(pool);

        match service.create(create_dto(Some(Uuid::new_v4()))).await {
            Err(AppError::Validation(fields)) => assert!(fields.contains_key("department_id")),
            other => panic!("expected validation error, got {:?}", other.map(|c| c.id)),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_course_without_department_reads_unknown(pool: PgPool) {
        let service = CourseService::new(pool);
        let created = service.create(create_dto(None)).await.unwrap();

        assert_eq!(created.department_name, "Unknown");
        assert_eq!(created.students_count, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_archived_course_leaves_default_list(pool: PgPool) {
        let service = CourseService::new(pool);
        let created = service.create(create_dto(None)).await.unwrap();
        service.archive(created.id).await.unwrap();

        let live = service.list(&CourseListQuery::default()).await.unwrap();
        assert!(live.iter().all(|c| c.id != created.id));

        let archive = service
            .list(&CourseListQuery {
                archived: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(archive.iter().any(|c| c.id == created.id));
    }
}
