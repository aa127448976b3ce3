//! Soft-delete toggling shared by every archivable table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Tables carrying an `archived` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivableTable {
    Departments,
    Courses,
    AcademicYears,
    Students,
    Faculty,
}

impl ArchivableTable {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ArchivableTable::Departments => "departments",
            ArchivableTable::Courses => "courses",
            ArchivableTable::AcademicYears => "academic_years",
            ArchivableTable::Students => "students",
            ArchivableTable::Faculty => "faculty",
        }
    }

    /// Display name used in `<Entity> not found`
    pub fn entity_name(&self) -> &'static str {
        match self {
            ArchivableTable::Departments => "Department",
            ArchivableTable::Courses => "Course",
            ArchivableTable::AcademicYears => "Academic year",
            ArchivableTable::Students => "Student",
            ArchivableTable::Faculty => "Faculty",
        }
    }
}

fn toggle_sql(table: ArchivableTable) -> String {
    format!(
        "UPDATE {} SET archived = $1, updated_at = NOW() WHERE id = $2 AND archived = $3",
        table.as_sql()
    )
}

/// Flip the archive flag of a row currently on the other side.
///
/// Archiving only matches live rows and restoring only matches archived
/// rows; anything else is reported as not found.
pub async fn set_archived(
    pool: &PgPool,
    table: ArchivableTable,
    id: Uuid,
    archived: bool,
) -> Result<()> {
    let result = sqlx::query(&toggle_sql(table))
        .bind(archived)
        .bind(id)
        .bind(!archived)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to set archived={} on {} {}: {:?}", archived, table.as_sql(), id, e);
            AppError::Database(e)
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(table.entity_name()));
    }

    tracing::info!(
        "{} {} {}",
        table.entity_name(),
        id,
        if archived { "archived" } else { "restored" }
    );

    Ok(())
}
