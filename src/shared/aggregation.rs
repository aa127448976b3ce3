//! Grouped counts and averages for statistics, reports and exports.
//!
//! Every statistics path resolves related display names through
//! [`resolve_or_unknown`], so a row with a missing relation is counted under
//! the `"Unknown"` label instead of failing the whole computation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::UNKNOWN_LABEL;

/// One bucket of a grouped count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupCount {
    pub label: String,
    pub count: i64,
}

/// Resolve a field of an optional relation to a display string.
///
/// A missing relation, or a blank value, resolves to `"Unknown"`.
pub fn resolve_or_unknown<R: ?Sized>(relation: Option<&R>, field: impl FnOnce(&R) -> &str) -> String {
    match relation.map(field).map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNKNOWN_LABEL.to_string(),
    }
}

/// Shorthand for the common flat case: an optional joined display name
pub fn label_or_unknown(name: Option<&str>) -> String {
    resolve_or_unknown(name, |s| s)
}

/// Count items per label, in the order labels are first seen.
pub fn group_counts<I, T, F>(items: I, mut label: F) -> Vec<GroupCount>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupCount> = Vec::new();

    for item in items {
        let key = label(&item);
        match index.get(&key) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupCount { label: key, count: 1 });
            }
        }
    }

    groups
}

/// Mean of the present values, rounded to 2 decimal places. Zero when there
/// are no present values.
pub fn average_non_null<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((Decimal::ZERO, 0u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return Decimal::ZERO;
    }

    (sum / Decimal::from(count)).round_dp(2)
}

/// Total of all bucket counts
pub fn total_of(groups: &[GroupCount]) -> i64 {
    groups.iter().map(|g| g.count).sum()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use fake::faker::company::en::Buzzword;
    use fake::Fake;

    /// Groups sorted by label, for order-insensitive comparisons
    pub(crate) fn sorted(mut groups: Vec<GroupCount>) -> Vec<(String, i64)> {
        groups.sort_by(|a, b| a.label.cmp(&b.label));
        groups.into_iter().map(|g| (g.label, g.count)).collect()
    }

    struct Row {
        category: &'static str,
        department: Option<String>,
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            Row {
                category: "freshman",
                department: Some("CS".to_string()),
            },
            Row {
                category: "regular",
                department: Some("CS".to_string()),
            },
            Row {
                category: "freshman",
                department: None,
            },
        ]
    }

    #[test]
    fn test_group_by_own_enum_field() {
        let groups = group_counts(sample_rows(), |r| r.category.to_string());
        assert_eq!(
            sorted(groups),
            vec![("freshman".to_string(), 2), ("regular".to_string(), 1)]
        );
    }

    #[test]
    fn test_group_by_relation_uses_unknown_bucket() {
        let groups = group_counts(sample_rows(), |r| label_or_unknown(r.department.as_deref()));
        assert_eq!(
            sorted(groups),
            vec![("CS".to_string(), 2), ("Unknown".to_string(), 1)]
        );
    }

    #[test]
    fn test_resolve_or_unknown() {
        struct Department {
            name: String,
        }
        let cs = Department {
            name: "Computer Science".to_string(),
        };
        let blank = Department {
            name: "   ".to_string(),
        };

        assert_eq!(resolve_or_unknown(Some(&cs), |d| d.name.as_str()), "Computer Science");
        assert_eq!(resolve_or_unknown(None::<&Department>, |d| d.name.as_str()), "Unknown");
        assert_eq!(resolve_or_unknown(Some(&blank), |d| d.name.as_str()), "Unknown");
    }

    #[test]
    fn test_group_counts_sum_to_total() {
        let rows: Vec<Option<String>> = (0..200)
            .map(|i| {
                if i % 7 == 0 {
                    None
                } else {
                    Some(Buzzword().fake::<String>())
                }
            })
            .collect();

        let groups = group_counts(rows.iter(), |d| label_or_unknown(d.as_deref()));

        assert_eq!(total_of(&groups), rows.len() as i64);
        let unknown = groups.iter().find(|g| g.label == UNKNOWN_LABEL).unwrap();
        assert_eq!(unknown.count, rows.iter().filter(|d| d.is_none()).count() as i64);
    }

    #[test]
    fn test_group_counts_empty() {
        let groups = group_counts(Vec::<Row>::new(), |r| r.category.to_string());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_average_ignores_missing_values() {
        let average = average_non_null([
            Some(Decimal::from(50_000)),
            None,
            Some(Decimal::from(70_000)),
        ]);
        assert_eq!(average, Decimal::new(6_000_000, 2));
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_non_null(Vec::new()), Decimal::ZERO);
        assert_eq!(average_non_null([None, None]), Decimal::ZERO);
    }

    #[test]
    fn test_average_rounds_to_two_places() {
        let average = average_non_null([
            Some(Decimal::from(10)),
            Some(Decimal::from(10)),
            Some(Decimal::from(11)),
        ]);
        assert_eq!(average, Decimal::new(1033, 2));
    }
}
