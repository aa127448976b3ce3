use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::faculty::dtos::{
    CreateFacultyDto, FacultyFilterParams, FacultyResponseDto, FacultyStatsDto, UpdateFacultyDto,
};
use crate::features::faculty::models::FacultyRecord;
use crate::features::users::models::{NewUser, UserRole};
use crate::features::users::services::{create_account, update_account, AccountChanges};
use crate::shared::archive::{set_archived, ArchivableTable};
use crate::shared::filters::{filtered_query, Conditions};
use crate::shared::types::{PaginationMeta, PaginationQuery};

const FACULTY_COLUMNS: &str = r#"
    SELECT
        f.id, f.user_id, u.name AS user_name, u.email AS user_email, f.employee_id,
        f.department_id, d.name AS department_name,
        f.position, f.employment_type, f.salary, f.hire_date, f.phone, f.address,
        f.specialization, f.archived, f.created_at, f.updated_at
"#;

const FACULTY_FROM: &str = r#"
    FROM faculty f
    JOIN users u ON u.id = f.user_id
    LEFT JOIN departments d ON d.id = f.department_id
"#;

/// Service for faculty operations
pub struct FacultyService {
    pool: PgPool,
}

impl FacultyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self, filter: &FacultyFilterParams) -> Result<i64> {
        let mut qb = filtered_query(&format!("SELECT COUNT(*) {}", FACULTY_FROM), filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count faculty: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn list(
        &self,
        filter: &FacultyFilterParams,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<FacultyResponseDto>, PaginationMeta)> {
        let total = self.count(filter).await?;

        let mut qb = filtered_query(&format!("{}{}", FACULTY_COLUMNS, FACULTY_FROM), filter);
        qb.push(" ORDER BY f.created_at DESC, f.id")
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = qb
            .build_query_as::<FacultyRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list faculty: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((
            rows.into_iter().map(FacultyResponseDto::from).collect(),
            pagination.meta(total),
        ))
    }

    /// Every matching faculty member, for statistics and exports
    pub async fn records(&self, filter: &FacultyFilterParams) -> Result<Vec<FacultyRecord>> {
        let mut qb = filtered_query(&format!("{}{}", FACULTY_COLUMNS, FACULTY_FROM), filter);
        qb.push(" ORDER BY f.created_at DESC, f.id");

        qb.build_query_as::<FacultyRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load faculty records: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn stats(&self, filter: &FacultyFilterParams) -> Result<FacultyStatsDto> {
        let records = self.records(filter).await?;
        Ok(FacultyStatsDto::from_records(&records))
    }

    pub async fn get(&self, id: Uuid) -> Result<FacultyResponseDto> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("{}{}", FACULTY_COLUMNS, FACULTY_FROM));
        Conditions::new(&mut qb)
            .archived("f.archived", false)
            .eq("f.id", Some(id));

        qb.build_query_as::<FacultyRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get faculty: {:?}", e);
                AppError::Database(e)
            })?
            .map(FacultyResponseDto::from)
            .ok_or_else(|| AppError::not_found("Faculty"))
    }

    /// Create the account and the faculty record in one transaction
    pub async fn create(&self, dto: CreateFacultyDto) -> Result<FacultyResponseDto> {
        let mut tx = self.pool.begin().await?;

        let user = create_account(
            &mut tx,
            NewUser {
                name: &dto.name,
                email: &dto.email,
                password: &dto.password,
                role: UserRole::Faculty,
            },
        )
        .await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO faculty (
                user_id, employee_id, department_id, position, employment_type, salary,
                hire_date, phone, address, specialization
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(user.id)
        .bind(dto.employee_id.trim())
        .bind(dto.department_id)
        .bind(dto.position.as_deref().map(str::trim))
        .bind(dto.employment_type)
        .bind(dto.salary.map(|s| s.round_dp(2)))
        .bind(dto.hire_date)
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(dto.address.as_deref())
        .bind(dto.specialization.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        tracing::info!(
            "Faculty created: id={}, employee_id={}, employment_type={}",
            id,
            dto.employee_id,
            dto.employment_type
        );

        self.get(id).await
    }

    pub async fn update(&self, id: Uuid, dto: UpdateFacultyDto) -> Result<FacultyResponseDto> {
        let mut tx = self.pool.begin().await?;

        let user_id: Uuid = sqlx::query_scalar(
            "SELECT user_id FROM faculty WHERE id = $1 AND archived = FALSE FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Faculty"))?;

        update_account(
            &mut tx,
            user_id,
            AccountChanges {
                name: dto.name.as_deref(),
                email: dto.email.as_deref(),
                password: dto.password.as_deref(),
            },
        )
        .await?;

        sqlx::query(
            r#"
            UPDATE faculty
            SET employee_id = COALESCE($1, employee_id),
                department_id = COALESCE($2, department_id),
                position = COALESCE($3, position),
                employment_type = COALESCE($4, employment_type),
                salary = COALESCE($5, salary),
                hire_date = COALESCE($6, hire_date),
                phone = COALESCE($7, phone),
                address = COALESCE($8, address),
                specialization = COALESCE($9, specialization),
                updated_at = NOW()
            WHERE id = $10
            "#,
        )
        .bind(dto.employee_id.as_deref().map(str::trim))
        .bind(dto.department_id)
        .bind(dto.position.as_deref().map(str::trim))
        .bind(dto.employment_type)
        .bind(dto.salary.map(|s| s.round_dp(2)))
        .bind(dto.hire_date)
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(dto.address.as_deref())
        .bind(dto.specialization.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        self.get(id).await
    }

    /// Soft delete; the paired account is kept
    pub async fn archive(&self, id: Uuid) -> Result<()> {
        set_archived(&self.pool, ArchivableTable::Faculty, id, true).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<FacultyResponseDto> {
        set_archived(&self.pool, ArchivableTable::Faculty, id, false).await?;
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::faculty::models::EmploymentType;
    use rust_decimal::Decimal;

    fn create_dto(employee_id: &str, salary: Option<i64>) -> CreateFacultyDto {
        CreateFacultyDto {
            name: format!("Faculty {}", employee_id),
            email: format!("{}@example.edu", employee_id.to_lowercase()),
            password: "password123".to_string(),
            employee_id: employee_id.to_string(),
            department_id: None,
            position: Some("Instructor".to_string()),
            employment_type: EmploymentType::FullTime,
            salary: salary.map(Decimal::from),
            hire_date: None,
            phone: None,
            address: None,
            specialization: None,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_average_salary_skips_missing(pool: PgPool) {
        let service = FacultyService::new(pool);
        for (employee_id, salary) in [("E-1", Some(50_000)), ("E-2", None), ("E-3", Some(70_000))] {
            service.create(create_dto(employee_id, salary)).await.unwrap();
        }

        let stats = service.stats(&FacultyFilterParams::default()).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_salary, Decimal::new(6_000_000, 2));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_employee_id_is_a_field_error(pool: PgPool) {
        let service = FacultyService::new(pool);
        service.create(create_dto("E-1", None)).await.unwrap();

        let mut dto = create_dto("E-1", None);
        dto.email = "other@example.edu".to_string();
        match service.create(dto).await {
            Err(AppError::Validation(fields)) => assert!(fields.contains_key("employee_id")),
            other => panic!("expected validation error, got {:?}", other.map(|f| f.id)),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_changes_account_and_record(pool: PgPool) {
        let service = FacultyService::new(pool);
        let created = service.create(create_dto("E-1", None)).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateFacultyDto {
                    name: Some("Dr. Maria Reyes".to_string()),
                    employment_type: Some(EmploymentType::Contract),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Dr. Maria Reyes");
        assert_eq!(updated.employment_type, EmploymentType::Contract);
        assert_eq!(updated.position.as_deref(), Some("Instructor"));
    }
}
