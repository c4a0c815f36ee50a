use std::collections::HashMap;

use crate::fields::RatingField;
use crate::models::{
    CategoryBreakdown, FieldHighlight, MaturityProfile, SummaryKpi, SurveyRow, TimeDistribution,
    ToolUsage, WorkflowRanking,
};

const WORKFLOW_RANKING_LIMIT: usize = 15;
const CATEGORY_LIMIT: usize = 5;
const CATEGORY_KEY_LEN: usize = 30;

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Grouping accumulator that remembers insertion order so that ties on
/// count resolve to whichever key was seen first.
struct Tally {
    order: usize,
    count: usize,
}

fn bump(counts: &mut HashMap<String, Tally>, key: String) {
    let next = counts.len();
    counts
        .entry(key)
        .or_insert(Tally {
            order: next,
            count: 0,
        })
        .count += 1;
}

fn rank_by_count(counts: HashMap<String, Tally>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, Tally)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.1.order.cmp(&b.1.order)));
    entries
        .into_iter()
        .map(|(label, tally)| (label, tally.count))
        .collect()
}

fn empty_highlight() -> FieldHighlight {
    FieldHighlight {
        value: 0.0,
        label: "N/A".to_string(),
    }
}

/// Headline dashboard numbers: participant count, average familiarity,
/// and the best/worst rating fields by mean.
pub fn summary_kpi(rows: &[SurveyRow]) -> SummaryKpi {
    let familiarity: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.familiarity.filter(|v| v.is_finite()))
        .collect();
    let avg_familiarity = mean(&familiarity).map(round2).unwrap_or(0.0);

    // Fields with no valid observations drop out of the candidate set
    // entirely instead of competing with an average of 0.
    let mut candidates: Vec<(RatingField, f64)> = Vec::new();
    for field in RatingField::ALL {
        let values: Vec<f64> = rows.iter().filter_map(|row| field.value(row)).collect();
        if let Some(avg) = mean(&values) {
            candidates.push((field, avg));
        }
    }
    // Stable sort: ties keep the fixed field order.
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let highlight = |entry: Option<&(RatingField, f64)>| {
        entry
            .map(|(field, avg)| FieldHighlight {
                value: round2(*avg),
                label: field.kpi_label().to_string(),
            })
            .unwrap_or_else(empty_highlight)
    };

    SummaryKpi {
        total_participants: rows.len(),
        avg_familiarity,
        strength: highlight(candidates.first()),
        gap: highlight(candidates.last()),
    }
}

/// Per-field means for the maturity radar. Always emits all eleven axes
/// in fixed order; sparse fields show as 0 rather than disappearing.
pub fn maturity_profile(rows: &[SurveyRow]) -> MaturityProfile {
    let mut labels = Vec::with_capacity(RatingField::ALL.len());
    let mut values = Vec::with_capacity(RatingField::ALL.len());

    for field in RatingField::ALL {
        let observed: Vec<f64> = rows.iter().filter_map(|row| field.value(row)).collect();
        labels.push(field.maturity_label().to_string());
        values.push(mean(&observed).map(round1).unwrap_or(0.0));
    }

    MaturityProfile {
        labels,
        values,
        caption: "Team AI maturity metrics rated on a 1 to 5 scale.".to_string(),
    }
}

/// Distribution of respondents across time-allocation buckets, with a
/// caption for the share of the whole team in the "0-25" bucket.
pub fn time_distribution(rows: &[SurveyRow]) -> TimeDistribution {
    let mut buckets: HashMap<String, usize> = HashMap::new();
    for row in rows {
        if let Some(bucket) = row.time_allocation.as_deref().filter(|b| !b.is_empty()) {
            *buckets.entry(bucket.to_string()).or_insert(0) += 1;
        }
    }

    let mut labels: Vec<String> = buckets.keys().cloned().collect();
    labels.sort();
    let values: Vec<usize> = labels.iter().map(|label| buckets[label]).collect();

    // Share is measured against every input row, bucketed or not.
    let under_25 = buckets.get("0-25").copied().unwrap_or(0);
    let share = percent(under_25, rows.len()).round() as i64;
    let caption = format!(
        "{share}% of the team spends less than 25% of their time on operational tasks."
    );

    TimeDistribution {
        labels,
        values,
        caption,
    }
}

/// Tool mentions across the nested tool lists, as a percentage of all
/// respondents. A row naming three tools counts once toward each.
pub fn tool_usage(rows: &[SurveyRow]) -> ToolUsage {
    let mut counts: HashMap<String, Tally> = HashMap::new();
    for row in rows {
        if let Some(answers) = &row.specific_answers {
            for tool in &answers.tools_used {
                bump(&mut counts, tool.clone());
            }
        }
    }

    let ranked = rank_by_count(counts);
    let labels: Vec<String> = ranked.iter().map(|(name, _)| name.clone()).collect();
    let values: Vec<f64> = ranked
        .iter()
        .map(|(_, count)| percent(*count, rows.len()))
        .collect();

    let caption = match ranked.first() {
        Some((name, count)) => format!(
            "{} is the most used tool ({}%).",
            name,
            percent(*count, rows.len()).round() as i64
        ),
        None => "N/A is the most used tool (0%).".to_string(),
    };

    ToolUsage {
        labels,
        values,
        caption,
    }
}

struct WorkflowTally {
    order: usize,
    votes: usize,
    pain_sum: f64,
    freq: String,
}

fn frequency_word(code: &str) -> String {
    match code {
        "D" => "Daily".to_string(),
        "S" => "Weekly".to_string(),
        "M" => "Monthly".to_string(),
        other => other.to_string(),
    }
}

/// Top-15 workflows by vote count. Every list entry counts one vote,
/// pain levels average per workflow, and the last entry seen for a name
/// decides its frequency.
pub fn workflow_ranking(rows: &[SurveyRow]) -> Vec<WorkflowRanking> {
    let mut tallies: HashMap<String, WorkflowTally> = HashMap::new();

    for row in rows {
        let Some(workflows) = &row.workflows else {
            continue;
        };
        for item in workflows {
            let next = tallies.len();
            let tally = tallies.entry(item.name.clone()).or_insert(WorkflowTally {
                order: next,
                votes: 0,
                pain_sum: 0.0,
                freq: String::new(),
            });
            tally.votes += 1;
            // Unparseable pain still lands in the denominator as a 0.
            tally.pain_sum += item.pain.trim().parse::<f64>().unwrap_or(0.0);
            tally.freq = item.freq.clone();
        }
    }

    let mut ranked: Vec<(String, WorkflowTally)> = tallies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.votes.cmp(&a.1.votes).then(a.1.order.cmp(&b.1.order)));
    ranked.truncate(WORKFLOW_RANKING_LIMIT);

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (name, tally))| WorkflowRanking {
            rank: index + 1,
            name,
            votes: tally.votes,
            pain: round1(tally.pain_sum / tally.votes as f64),
            freq: frequency_word(&tally.freq),
        })
        .collect()
}

fn breakdown(counts: HashMap<String, Tally>, total: usize) -> CategoryBreakdown {
    let mut ranked = rank_by_count(counts);
    ranked.truncate(CATEGORY_LIMIT);

    CategoryBreakdown {
        labels: ranked
            .iter()
            .map(|(label, _)| label.split_whitespace().map(str::to_string).collect())
            .collect(),
        values: ranked
            .iter()
            .map(|(_, count)| percent(*count, total))
            .collect(),
    }
}

/// Leader-needs answers are pipe-delimited tag lists; one row can feed
/// several tag counters.
pub fn leader_needs_breakdown(rows: &[SurveyRow]) -> CategoryBreakdown {
    let mut counts: HashMap<String, Tally> = HashMap::new();
    for row in rows {
        let Some(raw) = row.leader_needs.as_deref() else {
            continue;
        };
        for tag in raw.split('|').map(str::trim).filter(|tag| !tag.is_empty()) {
            bump(&mut counts, tag.to_string());
        }
    }
    breakdown(counts, rows.len())
}

/// Single-answer free text grouped by its first 30 characters. Distinct
/// long answers sharing a prefix merge into one bucket.
fn prefix_breakdown(
    rows: &[SurveyRow],
    field: fn(&SurveyRow) -> Option<&str>,
) -> CategoryBreakdown {
    let mut counts: HashMap<String, Tally> = HashMap::new();
    for row in rows {
        let Some(text) = field(row).filter(|t| !t.is_empty()) else {
            continue;
        };
        let key: String = text.chars().take(CATEGORY_KEY_LEN).collect();
        bump(&mut counts, key);
    }
    breakdown(counts, rows.len())
}

pub fn benefit_breakdown(rows: &[SurveyRow]) -> CategoryBreakdown {
    prefix_breakdown(rows, |row| row.main_benefit.as_deref())
}

pub fn concern_breakdown(rows: &[SurveyRow]) -> CategoryBreakdown {
    prefix_breakdown(rows, |row| row.main_concern.as_deref())
}
