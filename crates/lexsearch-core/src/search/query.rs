//! Typed filter predicates for query composition
//!
//! Each present filter becomes one conjunctive, parameterized WHERE
//! fragment. Values travel as bound parameters only, so no filter input
//! is ever interpolated into SQL text.

use chrono::NaiveDate;
use rusqlite::types::Value;

/// Optional structured filters for hybrid search
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Exact subject-matter match
    pub subject_matter: Option<String>,
    /// Exact process-type match
    pub process_type: Option<String>,
    /// Rulings carrying at least one of these tag names
    pub tags: Vec<String>,
    /// Decision date lower bound, inclusive
    pub date_from: Option<NaiveDate>,
    /// Decision date upper bound, inclusive
    pub date_to: Option<NaiveDate>,
}

/// One filter kind, compiled to a parameterized SQL fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    SubjectMatter(String),
    ProcessType(String),
    DateFrom(NaiveDate),
    DateTo(NaiveDate),
    /// Semi-join against the ruling-tag association by tag name
    AnyTag(Vec<String>),
}

impl Predicate {
    /// Lower a filter set into its predicate list (absent filters produce none)
    pub fn from_filters(filters: &SearchFilters) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(ref v) = filters.subject_matter {
            predicates.push(Predicate::SubjectMatter(v.clone()));
        }
        if let Some(ref v) = filters.process_type {
            predicates.push(Predicate::ProcessType(v.clone()));
        }
        if let Some(d) = filters.date_from {
            predicates.push(Predicate::DateFrom(d));
        }
        if let Some(d) = filters.date_to {
            predicates.push(Predicate::DateTo(d));
        }
        if !filters.tags.is_empty() {
            predicates.push(Predicate::AnyTag(filters.tags.clone()));
        }
        predicates
    }

    /// SQL fragment plus its bound parameter values.
    ///
    /// Placeholders are sequential `?`; the caller controls overall order.
    /// Dates compare as ISO-8601 text, which sorts chronologically.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        match self {
            Predicate::SubjectMatter(v) => (
                "r.subject_matter = ?".to_string(),
                vec![Value::Text(v.clone())],
            ),
            Predicate::ProcessType(v) => (
                "r.process_type = ?".to_string(),
                vec![Value::Text(v.clone())],
            ),
            Predicate::DateFrom(d) => (
                "r.decision_date >= ?".to_string(),
                vec![Value::Text(d.to_string())],
            ),
            Predicate::DateTo(d) => (
                "r.decision_date <= ?".to_string(),
                vec![Value::Text(d.to_string())],
            ),
            Predicate::AnyTag(names) => {
                let placeholders = vec!["?"; names.len()].join(", ");
                (
                    format!(
                        "r.id IN (SELECT rt.ruling_id FROM ruling_tags rt \
                         JOIN tags t ON t.id = rt.tag_id \
                         WHERE t.name IN ({placeholders}))"
                    ),
                    names.iter().map(|n| Value::Text(n.clone())).collect(),
                )
            }
        }
    }
}

/// Compose predicates into one conjunctive WHERE clause
pub fn compose_where(predicates: &[Predicate]) -> (String, Vec<Value>) {
    if predicates.is_empty() {
        return ("1=1".to_string(), Vec::new());
    }

    let mut fragments = Vec::with_capacity(predicates.len());
    let mut params = Vec::new();
    for predicate in predicates {
        let (fragment, mut values) = predicate.to_sql();
        fragments.push(fragment);
        params.append(&mut values);
    }
    (fragments.join(" AND "), params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters_composes_tautology() {
        let (clause, params) = compose_where(&[]);
        assert_eq!(clause, "1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn test_from_filters_skips_absent() {
        let filters = SearchFilters {
            subject_matter: Some("CIVIL".to_string()),
            ..Default::default()
        };
        let predicates = Predicate::from_filters(&filters);
        assert_eq!(
            predicates,
            vec![Predicate::SubjectMatter("CIVIL".to_string())]
        );
    }

    #[test]
    fn test_conjunction_order_and_param_count() {
        let filters = SearchFilters {
            subject_matter: Some("LABORAL".to_string()),
            process_type: Some("ACCION DE AMPARO".to_string()),
            tags: vec!["DESPIDO".to_string(), "PREAVISO".to_string()],
            date_from: NaiveDate::from_ymd_opt(2023, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2023, 12, 31),
        };
        let (clause, params) = compose_where(&Predicate::from_filters(&filters));

        assert_eq!(clause.matches(" AND ").count(), 4);
        assert!(clause.contains("r.subject_matter = ?"));
        assert!(clause.contains("r.decision_date >= ?"));
        assert!(clause.contains("t.name IN (?, ?)"));
        // One param per scalar filter plus one per tag name
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn test_date_params_are_iso() {
        let (_, params) =
            Predicate::DateFrom(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()).to_sql();
        assert_eq!(params, vec![Value::Text("2024-03-09".to_string())]);
    }

    #[test]
    fn test_tag_values_are_bound_not_interpolated() {
        let hostile = "x'); DROP TABLE rulings; --".to_string();
        let (clause, params) = Predicate::AnyTag(vec![hostile.clone()]).to_sql();
        assert!(!clause.contains("DROP TABLE"));
        assert_eq!(params, vec![Value::Text(hostile)]);
    }
}
