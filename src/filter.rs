use crate::models::SurveyRow;

/// Sentinel filter value meaning "apply no predicate for this dimension".
pub const ALL_FILTER: &str = "All";

/// Narrow a row collection by institution and/or survey type. Passing
/// `None` or the `"All"` sentinel disables that predicate; active
/// predicates are exact string matches combined with AND.
pub fn filter_rows(
    rows: &[SurveyRow],
    institution: Option<&str>,
    survey_type: Option<&str>,
) -> Vec<SurveyRow> {
    let institution = institution.filter(|v| *v != ALL_FILTER);
    let survey_type = survey_type.filter(|v| *v != ALL_FILTER);

    rows.iter()
        .filter(|row| match institution {
            Some(wanted) => row.institution.as_deref() == Some(wanted),
            None => true,
        })
        .filter(|row| match survey_type {
            Some(wanted) => row.survey_type.as_deref() == Some(wanted),
            None => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, institution: Option<&str>, survey_type: Option<&str>) -> SurveyRow {
        SurveyRow {
            id: id.to_string(),
            institution: institution.map(str::to_string),
            survey_type: survey_type.map(str::to_string),
            ..SurveyRow::default()
        }
    }

    #[test]
    fn no_predicates_returns_everything() {
        let rows = vec![row("a", Some("Acme"), None), row("b", None, None)];
        assert_eq!(filter_rows(&rows, None, None).len(), 2);
        assert_eq!(filter_rows(&rows, Some(ALL_FILTER), Some(ALL_FILTER)).len(), 2);
    }

    #[test]
    fn institution_predicate_is_exact_match() {
        let rows = vec![
            row("a", Some("Acme"), None),
            row("b", Some("acme"), None),
            row("c", None, None),
        ];
        let filtered = filter_rows(&rows, Some("Acme"), None);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn predicates_combine_with_and() {
        let rows = vec![
            row("a", Some("Acme"), Some("baseline")),
            row("b", Some("Acme"), Some("followup")),
            row("c", Some("Globex"), Some("baseline")),
        ];
        let filtered = filter_rows(&rows, Some("Acme"), Some("baseline"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn every_result_satisfies_active_predicates() {
        let rows = vec![
            row("a", Some("Acme"), Some("baseline")),
            row("b", Some("Globex"), Some("baseline")),
            row("c", Some("Acme"), None),
        ];
        for filtered in filter_rows(&rows, Some("Acme"), None) {
            assert_eq!(filtered.institution.as_deref(), Some("Acme"));
        }
    }

    #[test]
    fn empty_result_is_valid() {
        let rows = vec![row("a", Some("Acme"), None)];
        assert!(filter_rows(&rows, Some("Initech"), None).is_empty());
    }
}
