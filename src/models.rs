use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One survey respondent's full answer set, as delivered by the data
/// provider. Nested JSON fields are already normalized to structured
/// values before a row reaches the aggregation engine.
#[derive(Debug, Clone, Default)]
pub struct SurveyRow {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub institution: Option<String>,
    pub survey_type: Option<String>,
    pub time_allocation: Option<String>,
    pub familiarity: Option<f64>,
    pub llm_knowledge: Option<f64>,
    pub prompt_knowledge: Option<f64>,
    pub agent_knowledge: Option<f64>,
    pub org_guidelines: Option<f64>,
    pub org_tool_access: Option<f64>,
    pub org_leadership_push: Option<f64>,
    pub trust_curiosity: Option<f64>,
    pub replacement_concern: Option<f64>,
    pub privacy_concern: Option<f64>,
    pub learning_capacity: Option<f64>,
    pub team_receptive: Option<f64>,
    pub leader_needs: Option<String>,
    pub main_benefit: Option<String>,
    pub main_concern: Option<String>,
    pub specific_answers: Option<SpecificAnswers>,
    pub workflows: Option<Vec<WorkflowItem>>,
}

/// One workflow entry nested in a row. `pain` is a numeric string (1-5)
/// and `freq` is a single-letter code: D daily, S weekly, M monthly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowItem {
    pub name: String,
    #[serde(default)]
    pub pain: String,
    #[serde(default)]
    pub freq: String,
}

/// Container for answers specific to one survey template. Only the tool
/// list matters to the aggregation engine; other keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecificAnswers {
    #[serde(default)]
    pub tools_used: Vec<String>,
}

/// A JSONB field that may arrive either structured or as a JSON-encoded
/// string, depending on how the row was ingested. `normalize` resolves
/// both variants; malformed content becomes `None` rather than an error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonField<T> {
    Structured(T),
    Encoded(String),
}

impl<T: DeserializeOwned> JsonField<T> {
    pub fn normalize(self) -> Option<T> {
        match self {
            JsonField::Structured(value) => Some(value),
            JsonField::Encoded(raw) => serde_json::from_str(&raw).ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldHighlight {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryKpi {
    pub total_participants: usize,
    pub avg_familiarity: f64,
    pub strength: FieldHighlight,
    pub gap: FieldHighlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaturityProfile {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeDistribution {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolUsage {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowRanking {
    pub rank: usize,
    pub name: String,
    pub votes: usize,
    pub pain: f64,
    pub freq: String,
}

/// Top-5 breakdown of one free-text category. Labels are pre-split into
/// words so chart consumers can wrap them over multiple lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub labels: Vec<Vec<String>>,
    pub values: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_field_accepts_structured_value() {
        let raw = serde_json::json!([{ "name": "Draft email", "pain": "4", "freq": "D" }]);
        let field: JsonField<Vec<WorkflowItem>> = serde_json::from_value(raw).unwrap();
        let items = field.normalize().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Draft email");
    }

    #[test]
    fn json_field_accepts_encoded_string() {
        let raw = serde_json::json!("{\"tools_used\":[\"Claude\",\"Copilot\"]}");
        let field: JsonField<SpecificAnswers> = serde_json::from_value(raw).unwrap();
        let answers = field.normalize().unwrap();
        assert_eq!(answers.tools_used, vec!["Claude", "Copilot"]);
    }

    #[test]
    fn json_field_rejects_garbage_quietly() {
        let raw = serde_json::json!("not json at all");
        let field: JsonField<SpecificAnswers> = serde_json::from_value(raw).unwrap();
        assert!(field.normalize().is_none());
    }

    #[test]
    fn specific_answers_tolerates_missing_tool_list() {
        let raw = serde_json::json!({ "workflow_ranking": ["a", "b"] });
        let field: JsonField<SpecificAnswers> = serde_json::from_value(raw).unwrap();
        let answers = field.normalize().unwrap();
        assert!(answers.tools_used.is_empty());
    }
}
