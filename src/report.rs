use std::fmt::Write;

use crate::aggregate;
use crate::models::{CategoryBreakdown, SurveyRow};

fn category_section(output: &mut String, title: &str, caption: &str, data: &CategoryBreakdown) {
    let _ = writeln!(output, "## {title}");
    let _ = writeln!(output, "{caption}");
    let _ = writeln!(output);

    if data.labels.is_empty() {
        let _ = writeln!(output, "No responses for this question.");
    } else {
        for (words, value) in data.labels.iter().zip(data.values.iter()) {
            let _ = writeln!(output, "- {} ({:.0}% of responses)", words.join(" "), value);
        }
    }
    let _ = writeln!(output);
}

/// Render every dashboard section as markdown for the chosen filter
/// scope. This is the text counterpart of the chart dashboard: it only
/// consumes the reducers' documented output shapes.
pub fn build_report(
    institution: Option<&str>,
    survey_type: Option<&str>,
    rows: &[SurveyRow],
) -> String {
    let kpi = aggregate::summary_kpi(rows);
    let maturity = aggregate::maturity_profile(rows);
    let time = aggregate::time_distribution(rows);
    let tools = aggregate::tool_usage(rows);
    let workflows = aggregate::workflow_ranking(rows);

    let mut output = String::new();
    let institution_label = institution.unwrap_or("all institutions");
    let survey_type_label = survey_type.unwrap_or("all survey types");

    let _ = writeln!(output, "# Survey Results Dashboard");
    let _ = writeln!(
        output,
        "Scope: {institution_label}, {survey_type_label} ({} responses)",
        kpi.total_participants
    );
    let _ = writeln!(output);

    let _ = writeln!(output, "## Key Indicators");
    let _ = writeln!(output, "- Participants: {}", kpi.total_participants);
    let _ = writeln!(output, "- Average familiarity: {:.2}", kpi.avg_familiarity);
    let _ = writeln!(
        output,
        "- Strength: {} ({:.2})",
        kpi.strength.label, kpi.strength.value
    );
    let _ = writeln!(output, "- Gap: {} ({:.2})", kpi.gap.label, kpi.gap.value);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Maturity Profile");
    let _ = writeln!(output, "{}", maturity.caption);
    let _ = writeln!(output);
    for (label, value) in maturity.labels.iter().zip(maturity.values.iter()) {
        let _ = writeln!(output, "- {label}: {value:.1}");
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Time on Operational Tasks");
    let _ = writeln!(output, "{}", time.caption);
    let _ = writeln!(output);
    if time.labels.is_empty() {
        let _ = writeln!(output, "No time-allocation answers.");
    } else {
        for (label, value) in time.labels.iter().zip(time.values.iter()) {
            let _ = writeln!(output, "- {label}: {value}");
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Tools in Use");
    let _ = writeln!(output, "{}", tools.caption);
    let _ = writeln!(output);
    for (label, value) in tools.labels.iter().zip(tools.values.iter()) {
        let _ = writeln!(output, "- {label}: {value:.0}% of respondents");
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Workflow Ranking");
    if workflows.is_empty() {
        let _ = writeln!(output, "No workflows reported.");
    } else {
        let _ = writeln!(output, "| Rank | Workflow | Votes | Pain | Frequency |");
        let _ = writeln!(output, "| ---- | -------- | ----- | ---- | --------- |");
        for entry in &workflows {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {:.1} | {} |",
                entry.rank, entry.name, entry.votes, entry.pain, entry.freq
            );
        }
    }
    let _ = writeln!(output);

    category_section(
        &mut output,
        "Leader Needs",
        "Top needs identified by AI leaders.",
        &aggregate::leader_needs_breakdown(rows),
    );
    category_section(
        &mut output,
        "Main Benefits",
        "Most mentioned benefits.",
        &aggregate::benefit_breakdown(rows),
    );
    category_section(
        &mut output,
        "Main Concerns",
        "Most mentioned concerns.",
        &aggregate::concern_breakdown(rows),
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SpecificAnswers, WorkflowItem};

    #[test]
    fn report_covers_every_section() {
        let rows = vec![SurveyRow {
            id: "r1".to_string(),
            institution: Some("Acme".to_string()),
            familiarity: Some(4.0),
            llm_knowledge: Some(4.0),
            time_allocation: Some("0-25".to_string()),
            leader_needs: Some("Training".to_string()),
            main_benefit: Some("Speed".to_string()),
            main_concern: Some("Accuracy".to_string()),
            specific_answers: Some(SpecificAnswers {
                tools_used: vec!["Claude".to_string()],
            }),
            workflows: Some(vec![WorkflowItem {
                name: "Draft email".to_string(),
                pain: "4".to_string(),
                freq: "D".to_string(),
            }]),
            ..SurveyRow::default()
        }];

        let report = build_report(Some("Acme"), None, &rows);
        assert!(report.contains("# Survey Results Dashboard"));
        assert!(report.contains("Scope: Acme, all survey types (1 responses)"));
        assert!(report.contains("## Key Indicators"));
        assert!(report.contains("## Maturity Profile"));
        assert!(report.contains("## Time on Operational Tasks"));
        assert!(report.contains("## Tools in Use"));
        assert!(report.contains("| 1 | Draft email | 1 | 4.0 | Daily |"));
        assert!(report.contains("## Leader Needs"));
        assert!(report.contains("## Main Benefits"));
        assert!(report.contains("## Main Concerns"));
    }

    #[test]
    fn empty_rows_produce_a_complete_empty_report() {
        let report = build_report(None, None, &[]);
        assert!(report.contains("Scope: all institutions, all survey types (0 responses)"));
        assert!(report.contains("Strength: N/A (0.00)"));
        assert!(report.contains("No workflows reported."));
        assert!(report.contains("No responses for this question."));
        assert!(report.contains("No time-allocation answers."));
    }
}
