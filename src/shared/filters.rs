//! WHERE-clause composition shared by list, statistics, report and export
//! queries.
//!
//! Equality filters narrow the set only when present, the free-text search is
//! an OR across its columns, and every query is pinned to one side of the
//! soft-delete flag.

use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Appends `WHERE` / `AND` conditions to a query under construction
pub struct Conditions<'q, 'b> {
    qb: &'b mut QueryBuilder<'q, Postgres>,
    has_where: bool,
}

impl<'q, 'b> Conditions<'q, 'b> {
    pub fn new(qb: &'b mut QueryBuilder<'q, Postgres>) -> Self {
        Self {
            qb,
            has_where: false,
        }
    }

    fn next_clause(&mut self) -> &mut QueryBuilder<'q, Postgres> {
        if self.has_where {
            self.qb.push(" AND ");
        } else {
            self.qb.push(" WHERE ");
            self.has_where = true;
        }
        &mut *self.qb
    }

    /// Restrict to archived rows (archive view) or to live rows
    pub fn archived(&mut self, column: &str, archived: bool) -> &mut Self {
        self.next_clause()
            .push(column)
            .push(if archived { " = TRUE" } else { " = FALSE" });
        self
    }

    /// `column = value` when a value is supplied, nothing otherwise
    pub fn eq<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'q + Encode<'q, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.next_clause().push(column).push(" = ").push_bind(value);
        }
        self
    }

    /// Case-insensitive substring match on any of `columns`
    pub fn search(&mut self, columns: &[&str], term: Option<&str>) -> &mut Self {
        let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
            return self;
        };
        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(term));
        let qb = self.next_clause();
        qb.push("(");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
        }
        qb.push(")");
        self
    }
}

/// Escape LIKE wildcards so user input only ever matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Shape shared by every entity filter DTO
pub trait FilterSpec {
    fn apply(&self, conditions: &mut Conditions<'_, '_>);
}

/// Start a query with `prefix` and the filter's WHERE clause
pub fn filtered_query<'q, F: FilterSpec>(prefix: &str, filter: &F) -> QueryBuilder<'q, Postgres> {
    let mut qb = QueryBuilder::new(prefix);
    filter.apply(&mut Conditions::new(&mut qb));
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_no_filters_only_pins_archive_flag() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM students s");
        Conditions::new(&mut qb)
            .archived("s.archived", false)
            .eq::<Uuid>("s.department_id", None)
            .search(&["u.name"], None);
        assert_eq!(qb.sql(), "SELECT * FROM students s WHERE s.archived = FALSE");
    }

    #[test]
    fn test_equality_filters_are_anded() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM students s");
        Conditions::new(&mut qb)
            .archived("s.archived", true)
            .eq("s.department_id", Some(Uuid::nil()))
            .eq("s.course_id", Some(Uuid::nil()));
        assert_eq!(
            qb.sql(),
            "SELECT * FROM students s WHERE s.archived = TRUE AND s.department_id = $1 AND s.course_id = $2"
        );
    }

    #[test]
    fn test_search_is_an_or_group() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM students s");
        Conditions::new(&mut qb)
            .archived("s.archived", false)
            .search(&["u.name", "u.email", "s.student_id"], Some("  ana "))
            .eq("s.course_id", Some(Uuid::nil()));
        assert_eq!(
            qb.sql(),
            "SELECT * FROM students s WHERE s.archived = FALSE AND (u.name ILIKE $1 OR u.email ILIKE $2 OR s.student_id ILIKE $3) AND s.course_id = $4"
        );
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1");
        Conditions::new(&mut qb).search(&["u.name"], Some("   "));
        assert_eq!(qb.sql(), "SELECT 1");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
