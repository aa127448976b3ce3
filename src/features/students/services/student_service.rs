use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::database::map_write_error;
use crate::core::error::{AppError, Result};
use crate::features::students::dtos::{
    CreateStudentDto, StudentFilterParams, StudentResponseDto, StudentStatsDto, UpdateStudentDto,
};
use crate::features::students::models::{StudentCategory, StudentDocuments, StudentRecord};
use crate::features::users::models::{NewUser, UserRole};
use crate::features::users::services::{create_account, update_account, AccountChanges};
use crate::shared::archive::{set_archived, ArchivableTable};
use crate::shared::filters::{filtered_query, Conditions};
use crate::shared::types::{PaginationMeta, PaginationQuery};

const STUDENT_COLUMNS: &str = r#"
    SELECT
        s.id, s.user_id, u.name AS user_name, u.email AS user_email, s.student_id,
        s.course_id, c.name AS course_name,
        s.department_id, d.name AS department_name,
        s.academic_year_id, y.name AS academic_year_name,
        s.category, s.enrollment_date, s.year_level, s.phone, s.address,
        s.date_of_birth, s.gender,
        s.id_photo, s.birth_certificate, s.report_card, s.permanent_record,
        s.good_moral_certificate, s.certificate_of_completion, s.honorable_dismissal,
        s.transcript_of_records, s.subject_descriptions, s.previous_school_id,
        s.clearance, s.readmission_slip, s.grade_slip, s.medical_certificate,
        s.proof_of_residency,
        s.archived, s.created_at, s.updated_at
"#;

const STUDENT_FROM: &str = r#"
    FROM students s
    JOIN users u ON u.id = s.user_id
    LEFT JOIN courses c ON c.id = s.course_id
    LEFT JOIN departments d ON d.id = s.department_id
    LEFT JOIN academic_years y ON y.id = s.academic_year_id
"#;

/// Service for student operations
pub struct StudentService {
    pool: PgPool,
}

impl StudentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Number of students matching the filter, before pagination
    pub async fn count(&self, filter: &StudentFilterParams) -> Result<i64> {
        let mut qb = filtered_query(&format!("SELECT COUNT(*) {}", STUDENT_FROM), filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count students: {:?}", e);
                AppError::Database(e)
            })
    }

    /// One page of matching students, newest first
    pub async fn list(
        &self,
        filter: &StudentFilterParams,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<StudentResponseDto>, PaginationMeta)> {
        let total = self.count(filter).await?;

        let mut qb = filtered_query(&format!("{}{}", STUDENT_COLUMNS, STUDENT_FROM), filter);
        qb.push(" ORDER BY s.created_at DESC, s.id")
            .push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let rows = qb
            .build_query_as::<StudentRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list students: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((
            rows.into_iter().map(StudentResponseDto::from).collect(),
            pagination.meta(total),
        ))
    }

    /// Every matching student, for statistics and exports
    pub async fn records(&self, filter: &StudentFilterParams) -> Result<Vec<StudentRecord>> {
        let mut qb = filtered_query(&format!("{}{}", STUDENT_COLUMNS, STUDENT_FROM), filter);
        qb.push(" ORDER BY s.created_at DESC, s.id");

        qb.build_query_as::<StudentRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load student records: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn stats(&self, filter: &StudentFilterParams) -> Result<StudentStatsDto> {
        let records = self.records(filter).await?;
        Ok(StudentStatsDto::from_records(&records))
    }

    /// Get a live student by id
    pub async fn get(&self, id: Uuid) -> Result<StudentResponseDto> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("{}{}", STUDENT_COLUMNS, STUDENT_FROM));
        Conditions::new(&mut qb)
            .archived("s.archived", false)
            .eq("s.id", Some(id));

        qb.build_query_as::<StudentRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get student: {:?}", e);
                AppError::Database(e)
            })?
            .map(StudentResponseDto::from)
            .ok_or_else(|| AppError::not_found("Student"))
    }

    /// Create the account and the student record in one transaction
    pub async fn create(&self, dto: CreateStudentDto) -> Result<StudentResponseDto> {
        dto.documents.check_applicable(dto.category)?;

        let mut tx = self.pool.begin().await?;

        let user = create_account(
            &mut tx,
            NewUser {
                name: &dto.name,
                email: &dto.email,
                password: &dto.password,
                role: UserRole::Student,
            },
        )
        .await?;

        let docs = &dto.documents;
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO students (
                user_id, student_id, course_id, department_id, academic_year_id, category,
                enrollment_date, year_level, phone, address, date_of_birth, gender,
                id_photo, birth_certificate, report_card, permanent_record,
                good_moral_certificate, certificate_of_completion, honorable_dismissal,
                transcript_of_records, subject_descriptions, previous_school_id,
                clearance, readmission_slip, grade_slip, medical_certificate, proof_of_residency
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27
            )
            RETURNING id
            "#,
        )
        .bind(user.id)
        .bind(dto.student_id.trim())
        .bind(dto.course_id)
        .bind(dto.department_id)
        .bind(dto.academic_year_id)
        .bind(dto.category)
        .bind(dto.enrollment_date)
        .bind(dto.year_level)
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(dto.address.as_deref())
        .bind(dto.date_of_birth)
        .bind(dto.gender.as_deref())
        .bind(docs.id_photo.as_deref())
        .bind(docs.birth_certificate.as_deref())
        .bind(docs.report_card.as_deref())
        .bind(docs.permanent_record.as_deref())
        .bind(docs.good_moral_certificate.as_deref())
        .bind(docs.certificate_of_completion.as_deref())
        .bind(docs.honorable_dismissal.as_deref())
        .bind(docs.transcript_of_records.as_deref())
        .bind(docs.subject_descriptions.as_deref())
        .bind(docs.previous_school_id.as_deref())
        .bind(docs.clearance.as_deref())
        .bind(docs.readmission_slip.as_deref())
        .bind(docs.grade_slip.as_deref())
        .bind(docs.medical_certificate.as_deref())
        .bind(docs.proof_of_residency.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        tracing::info!(
            "Student created: id={}, student_id={}, category={}",
            id,
            dto.student_id,
            dto.category
        );

        self.get(id).await
    }

    pub async fn update(&self, id: Uuid, dto: UpdateStudentDto) -> Result<StudentResponseDto> {
        let mut tx = self.pool.begin().await?;

        let (user_id, stored_category): (Uuid, StudentCategory) = sqlx::query_as(
            "SELECT user_id, category FROM students WHERE id = $1 AND archived = FALSE FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Student"))?;

        let category = dto.category.unwrap_or(stored_category);
        dto.documents.check_applicable(category)?;

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

        let docs = &dto.documents;
        sqlx::query(
            r#"
            UPDATE students
            SET student_id = COALESCE($1, student_id),
                course_id = COALESCE($2, course_id),
                department_id = COALESCE($3, department_id),
                academic_year_id = COALESCE($4, academic_year_id),
                category = COALESCE($5, category),
                enrollment_date = COALESCE($6, enrollment_date),
                year_level = COALESCE($7, year_level),
                phone = COALESCE($8, phone),
                address = COALESCE($9, address),
                date_of_birth = COALESCE($10, date_of_birth),
                gender = COALESCE($11, gender),
                id_photo = COALESCE($12, id_photo),
                birth_certificate = COALESCE($13, birth_certificate),
                report_card = COALESCE($14, report_card),
                permanent_record = COALESCE($15, permanent_record),
                good_moral_certificate = COALESCE($16, good_moral_certificate),
                certificate_of_completion = COALESCE($17, certificate_of_completion),
                honorable_dismissal = COALESCE($18, honorable_dismissal),
                transcript_of_records = COALESCE($19, transcript_of_records),
                subject_descriptions = COALESCE($20, subject_descriptions),
                previous_school_id = COALESCE($21, previous_school_id),
                clearance = COALESCE($22, clearance),
                readmission_slip = COALESCE($23, readmission_slip),
                grade_slip = COALESCE($24, grade_slip),
                medical_certificate = COALESCE($25, medical_certificate),
                proof_of_residency = COALESCE($26, proof_of_residency),
                updated_at = NOW()
            WHERE id = $27
            "#,
        )
        .bind(dto.student_id.as_deref().map(str::trim))
        .bind(dto.course_id)
        .bind(dto.department_id)
        .bind(dto.academic_year_id)
        .bind(dto.category)
        .bind(dto.enrollment_date)
        .bind(dto.year_level)
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(dto.address.as_deref())
        .bind(dto.date_of_birth)
        .bind(dto.gender.as_deref())
        .bind(docs.id_photo.as_deref())
        .bind(docs.birth_certificate.as_deref())
        .bind(docs.report_card.as_deref())
        .bind(docs.permanent_record.as_deref())
        .bind(docs.good_moral_certificate.as_deref())
        .bind(docs.certificate_of_completion.as_deref())
        .bind(docs.honorable_dismissal.as_deref())
        .bind(docs.transcript_of_records.as_deref())
        .bind(docs.subject_descriptions.as_deref())
        .bind(docs.previous_school_id.as_deref())
        .bind(docs.clearance.as_deref())
        .bind(docs.readmission_slip.as_deref())
        .bind(docs.grade_slip.as_deref())
        .bind(docs.medical_certificate.as_deref())
        .bind(docs.proof_of_residency.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_write_error)?;

        // Stored documents of the old category do not carry over
        if category != stored_category {
            let assignments = StudentDocuments::inapplicable_to(category)
                .into_iter()
                .map(|column| format!("{} = NULL", column))
                .collect::<Vec<_>>()
                .join(", ");
            sqlx::query(&format!(
                "UPDATE students SET {} WHERE id = $1",
                assignments
            ))
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error)?;

            tracing::info!(
                "Student {} moved from {} to {}; inapplicable documents cleared",
                id,
                stored_category,
                category
            );
        }

        tx.commit().await?;

        self.get(id).await
    }

    /// Soft delete; the paired account is kept
    pub async fn archive(&self, id: Uuid) -> Result<()> {
        set_archived(&self.pool, ArchivableTable::Students, id, true).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<StudentResponseDto> {
        set_archived(&self.pool, ArchivableTable::Students, id, false).await?;
        self.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::departments::dtos::CreateDepartmentDto;
    use crate::features::departments::DepartmentService;
    use crate::shared::aggregation::tests::sorted;

    fn create_dto(student_id: &str, category: StudentCategory, department_id: Option<Uuid>) -> CreateStudentDto {
        CreateStudentDto {
            name: format!("Student {}", student_id),
            email: format!("{}@example.edu", student_id.to_lowercase()),
            password: "password123".to_string(),
            student_id: student_id.to_string(),
            course_id: None,
            department_id,
            academic_year_id: None,
            category,
            enrollment_date: None,
            year_level: Some(1),
            phone: None,
            address: None,
            date_of_birth: None,
            gender: None,
            documents: Default::default(),
        }
    }

    async fn seed(pool: &PgPool) -> StudentService {
        let department = DepartmentService::new(pool.clone())
            .create(CreateDepartmentDto {
                name: "CS".to_string(),
                code: "CS".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let service = StudentService::new(pool.clone());
        for (student_id, category, department_id) in [
            ("S-001", StudentCategory::Freshman, Some(department.id)),
            ("S-002", StudentCategory::Regular, Some(department.id)),
            ("S-003", StudentCategory::Freshman, None),
        ] {
            service
                .create(create_dto(student_id, category, department_id))
                .await
                .unwrap();
        }
        service
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_stats_group_with_unknown_bucket(pool: PgPool) {
        let service = seed(&pool).await;

        let stats = service.stats(&StudentFilterParams::default()).await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(
            sorted(stats.by_category),
            vec![("freshman".to_string(), 2), ("regular".to_string(), 1)]
        );
        assert_eq!(
            sorted(stats.by_department),
            vec![("CS".to_string(), 2), ("Unknown".to_string(), 1)]
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_pagination_total_counts_filtered_rows(pool: PgPool) {
        let service = seed(&pool).await;

        let filter = StudentFilterParams {
            category: Some(StudentCategory::Freshman),
            ..Default::default()
        };
        let (page, meta) = service
            .list(&filter, &PaginationQuery { page: 1, limit: 1 })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(meta.total, 2);
        assert_eq!(meta.pages, 2);

        let filter = StudentFilterParams {
            search: Some("s-00".to_string()),
            ..Default::default()
        };
        assert_eq!(service.count(&filter).await.unwrap(), 3);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_archive_and_restore_student(pool: PgPool) {
        let service = seed(&pool).await;
        let (page, _) = service
            .list(&StudentFilterParams::default(), &PaginationQuery::default())
            .await
            .unwrap();
        let target = page[0].clone();

        service.archive(target.id).await.unwrap();
        assert_eq!(service.count(&StudentFilterParams::default()).await.unwrap(), 2);
        let archive_view = StudentFilterParams {
            archived: Some(true),
            ..Default::default()
        };
        assert_eq!(service.count(&archive_view).await.unwrap(), 1);

        let restored = service.restore(target.id).await.unwrap();
        assert_eq!(restored.student_id, target.student_id);
        assert_eq!(restored.email, target.email);
        assert_eq!(service.count(&archive_view).await.unwrap(), 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_email_rolls_back_student(pool: PgPool) {
        let service = seed(&pool).await;

        let mut dto = create_dto("S-004", StudentCategory::Regular, None);
        dto.email = "s-001@example.edu".to_string();
        match service.create(dto).await {
            Err(AppError::Validation(fields)) => assert!(fields.contains_key("email")),
            other => panic!("expected validation error, got {:?}", other.map(|s| s.id)),
        }
        assert_eq!(service.count(&StudentFilterParams::default()).await.unwrap(), 3);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_category_change_clears_inapplicable_documents(pool: PgPool) {
        let service = StudentService::new(pool.clone());
        let mut dto = create_dto("T-001", StudentCategory::Transferee, None);
        dto.documents.honorable_dismissal = Some("students/t1/hd.jpg".to_string());
        dto.documents.id_photo = Some("students/t1/id.jpg".to_string());
        let created = service.create(dto).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdateStudentDto {
                    category: Some(StudentCategory::Regular),
                    documents: StudentDocuments {
                        clearance: Some("students/t1/clearance.jpg".to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category, StudentCategory::Regular);
        assert_eq!(updated.documents.honorable_dismissal, None);
        assert_eq!(updated.documents.id_photo.as_deref(), Some("students/t1/id.jpg"));
        assert_eq!(
            updated.documents.clearance.as_deref(),
            Some("students/t1/clearance.jpg")
        );
        assert!(updated
            .documents
            .check_applicable(StudentCategory::Regular)
            .is_ok());
    }
}
