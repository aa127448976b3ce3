use std::sync::Arc;

use chrono::Utc;
use minijinja::context;

use crate::core::error::Result;
use crate::features::exports::dtos::{ExportFile, ExportFormat, ExportKind};
use crate::features::exports::renderers::csv::{enrollment_csv, faculty_csv, students_csv};
use crate::features::exports::renderers::pdf::PdfConverter;
use crate::features::exports::renderers::ExportError;
use crate::features::faculty::dtos::{FacultyFilterParams, FacultyResponseDto, FacultyStatsDto};
use crate::features::faculty::FacultyService;
use crate::features::students::dtos::{StudentFilterParams, StudentResponseDto, StudentStatsDto};
use crate::features::students::models::StudentRecord;
use crate::features::students::StudentService;
use crate::shared::aggregation::{group_counts, label_or_unknown, GroupCount};
use crate::shared::templates::render_template;

/// Renders filtered record sets as CSV or PDF attachments
pub struct ExportService {
    students: Arc<StudentService>,
    faculty: Arc<FacultyService>,
    pdf: PdfConverter,
    institution_name: String,
}

impl ExportService {
    pub fn new(
        students: Arc<StudentService>,
        faculty: Arc<FacultyService>,
        pdf: PdfConverter,
        institution_name: String,
    ) -> Self {
        Self {
            students,
            faculty,
            pdf,
            institution_name,
        }
    }

    pub async fn students(
        &self,
        format: ExportFormat,
        filter: &StudentFilterParams,
    ) -> Result<ExportFile> {
        let records = self.students.records(filter).await?;

        let body = match format {
            ExportFormat::Excel => students_csv(&records).into_bytes(),
            ExportFormat::Pdf => {
                let statistics = StudentStatsDto::from_records(&records);
                let total = records.len();
                let rows: Vec<StudentResponseDto> =
                    records.into_iter().map(StudentResponseDto::from).collect();
                let html = render_template(
                    "students.html",
                    &context! {
                        title => ExportKind::Students.title(),
                        institution => &self.institution_name,
                        generated_at => generated_at(),
                        total => total,
                        rows => rows,
                        statistics => statistics,
                    },
                )
                .map_err(ExportError::from)?;
                self.pdf.convert(&html).await?
            }
        };

        Ok(self.file(ExportKind::Students, format, body))
    }

    pub async fn faculty(
        &self,
        format: ExportFormat,
        filter: &FacultyFilterParams,
    ) -> Result<ExportFile> {
        let records = self.faculty.records(filter).await?;

        let body = match format {
            ExportFormat::Excel => faculty_csv(&records).into_bytes(),
            ExportFormat::Pdf => {
                let statistics = FacultyStatsDto::from_records(&records);
                let total = records.len();
                let rows: Vec<FacultyResponseDto> =
                    records.into_iter().map(FacultyResponseDto::from).collect();
                let html = render_template(
                    "faculty.html",
                    &context! {
                        title => ExportKind::Faculty.title(),
                        institution => &self.institution_name,
                        generated_at => generated_at(),
                        total => total,
                        rows => rows,
                        statistics => statistics,
                    },
                )
                .map_err(ExportError::from)?;
                self.pdf.convert(&html).await?
            }
        };

        Ok(self.file(ExportKind::Faculty, format, body))
    }

    /// Students with course and year, plus per-course and per-year summaries
    pub async fn enrollment(
        &self,
        format: ExportFormat,
        filter: &StudentFilterParams,
    ) -> Result<ExportFile> {
        let records = self.students.records(filter).await?;
        let (by_course, by_academic_year) = enrollment_summaries(&records);

        let body = match format {
            ExportFormat::Excel => enrollment_csv(&records, &by_course, &by_academic_year).into_bytes(),
            ExportFormat::Pdf => {
                let total = records.len();
                let rows: Vec<StudentResponseDto> =
                    records.into_iter().map(StudentResponseDto::from).collect();
                let html = render_template(
                    "enrollment.html",
                    &context! {
                        title => ExportKind::Enrollment.title(),
                        institution => &self.institution_name,
                        generated_at => generated_at(),
                        total => total,
                        rows => rows,
                        by_course => by_course,
                        by_academic_year => by_academic_year,
                    },
                )
                .map_err(ExportError::from)?;
                self.pdf.convert(&html).await?
            }
        };

        Ok(self.file(ExportKind::Enrollment, format, body))
    }

    fn file(&self, kind: ExportKind, format: ExportFormat, body: Vec<u8>) -> ExportFile {
        let file = ExportFile::new(kind, format, Utc::now().date_naive(), body);
        tracing::info!(
            "Export rendered: {} ({} bytes)",
            file.filename,
            file.body.len()
        );
        file
    }
}

fn generated_at() -> String {
    Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

fn enrollment_summaries(records: &[StudentRecord]) -> (Vec<GroupCount>, Vec<GroupCount>) {
    (
        group_counts(records, |s| label_or_unknown(s.course_name.as_deref())),
        group_counts(records, |s| label_or_unknown(s.academic_year_name.as_deref())),
    )
}
