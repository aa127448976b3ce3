//! CSV bodies for the `excel` export format.
//!
//! Every field is double-quoted with embedded quotes doubled, rows end in
//! CRLF, and missing values are written as `N/A`. The body starts with a
//! UTF-8 byte order mark so spreadsheet applications pick the right
//! encoding.

use crate::features::faculty::models::FacultyRecord;
use crate::features::students::models::StudentRecord;
use crate::shared::aggregation::GroupCount;
use crate::shared::constants::NOT_AVAILABLE;

const BOM: &str = "\u{feff}";

/// Row-oriented CSV builder
#[derive(Debug, Default)]
pub struct CsvWriter {
    out: String,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self {
            out: BOM.to_string(),
        }
    }

    pub fn row<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.out.push('"');
            self.out.push_str(&field.as_ref().replace('"', "\"\""));
            self.out.push('"');
        }
        self.out.push_str("\r\n");
        self
    }

    pub fn blank_line(&mut self) -> &mut Self {
        self.out.push_str("\r\n");
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Present value or `N/A`; blank strings count as missing
pub fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn display_or_na<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

pub fn students_csv(records: &[StudentRecord]) -> String {
    let mut csv = CsvWriter::new();
    csv.row([
        "Student ID",
        "Name",
        "Email",
        "Category",
        "Department",
        "Course",
        "Academic Year",
        "Year Level",
        "Enrollment Date",
        "Phone",
        "Gender",
        "Documents Submitted",
    ]);

    for s in records {
        csv.row([
            s.student_id.clone(),
            s.user_name.clone(),
            s.user_email.clone(),
            s.category.to_string(),
            or_na(s.department_name.as_deref()),
            or_na(s.course_name.as_deref()),
            or_na(s.academic_year_name.as_deref()),
            display_or_na(s.year_level),
            display_or_na(s.enrollment_date),
            or_na(s.phone.as_deref()),
            or_na(s.gender.as_deref()),
            s.documents.submitted().to_string(),
        ]);
    }

    csv.finish()
}

pub fn faculty_csv(records: &[FacultyRecord]) -> String {
    let mut csv = CsvWriter::new();
    csv.row([
        "Employee ID",
        "Name",
        "Email",
        "Department",
        "Position",
        "Employment Type",
        "Salary",
        "Hire Date",
        "Phone",
        "Specialization",
    ]);

    for f in records {
        csv.row([
            f.employee_id.clone(),
            f.user_name.clone(),
            f.user_email.clone(),
            or_na(f.department_name.as_deref()),
            or_na(f.position.as_deref()),
            f.employment_type.to_string(),
            display_or_na(f.salary.map(|s| s.round_dp(2))),
            display_or_na(f.hire_date),
            or_na(f.phone.as_deref()),
            or_na(f.specialization.as_deref()),
        ]);
    }

    csv.finish()
}

/// Enrollment listing followed by per-course and per-year summary blocks
pub fn enrollment_csv(
    records: &[StudentRecord],
    by_course: &[GroupCount],
    by_academic_year: &[GroupCount],
) -> String {
    let mut csv = CsvWriter::new();
    csv.row([
        "Student ID",
        "Name",
        "Course",
        "Academic Year",
        "Category",
        "Year Level",
        "Enrollment Date",
    ]);

    for s in records {
        csv.row([
            s.student_id.clone(),
            s.user_name.clone(),
            or_na(s.course_name.as_deref()),
            or_na(s.academic_year_name.as_deref()),
            s.category.to_string(),
            display_or_na(s.year_level),
            display_or_na(s.enrollment_date),
        ]);
    }

    csv.blank_line().row(["Course", "Students"]);
    for group in by_course {
        csv.row([group.label.clone(), group.count.to_string()]);
    }

    csv.blank_line().row(["Academic Year", "Students"]);
    for group in by_academic_year {
        csv.row([group.label.clone(), group.count.to_string()]);
    }

    csv.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::faculty::dtos::tests::bare_record as bare_faculty;
    use crate::features::students::dtos::tests::bare_record as bare_student;
    use rust_decimal::Decimal;

    fn lines(csv: &str) -> Vec<&str> {
        csv.trim_start_matches(BOM).split("\r\n").collect()
    }

    #[test]
    fn test_quoting_doubles_embedded_quotes() {
        let mut csv = CsvWriter::new();
        csv.row(["plain", "with \"quotes\"", "a,b"]);
        assert_eq!(
            lines(&csv.finish())[0],
            r#""plain","with ""quotes""","a,b""#
        );
    }

    #[test]
    fn test_student_without_department_renders_na() {
        let record = StudentRecord {
            student_id: "2024-0001".to_string(),
            user_name: "Ana Santos".to_string(),
            user_email: "ana@example.edu".to_string(),
            phone: Some("09171234567".to_string()),
            ..bare_student()
        };

        let csv = students_csv(&[record]);
        let rows = lines(&csv);

        assert!(csv.starts_with(BOM));
        assert!(rows[0].starts_with(r#""Student ID","Name","Email""#));
        assert_eq!(
            rows[1],
            r#""2024-0001","Ana Santos","ana@example.edu","freshman","N/A","N/A","N/A","N/A","N/A","09171234567","N/A","0""#
        );
    }

    #[test]
    fn test_faculty_row_uses_stored_salary() {
        let record = FacultyRecord {
            salary: Some(Decimal::new(455_000, 1)),
            ..bare_faculty()
        };
        let csv = faculty_csv(&[record]);
        let row = lines(&csv)[1].to_string();
        assert!(row.contains(r#""45500.0""#), "{}", row);
        assert!(row.contains(r#""full_time""#));
    }

    #[test]
    fn test_enrollment_summary_blocks() {
        let by_course = vec![GroupCount {
            label: "BSCS".to_string(),
            count: 2,
        }];
        let by_year = vec![GroupCount {
            label: "Unknown".to_string(),
            count: 2,
        }];
        let csv = enrollment_csv(&[bare_student(), bare_student()], &by_course, &by_year);
        let rows = lines(&csv);

        assert_eq!(rows[3], "");
        assert_eq!(rows[4], r#""Course","Students""#);
        assert_eq!(rows[5], r#""BSCS","2""#);
        assert_eq!(rows[7], r#""Academic Year","Students""#);
        assert_eq!(rows[8], r#""Unknown","2""#);
    }
}
