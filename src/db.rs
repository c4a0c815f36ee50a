use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{JsonField, SpecificAnswers, SurveyRow, WorkflowItem};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Decode a JSONB column that may hold either a structured value or a
/// JSON-encoded string, the two shapes survey ingestion produces.
fn parse_json_field<T: DeserializeOwned>(value: Option<serde_json::Value>) -> Option<T> {
    let field: JsonField<T> = serde_json::from_value(value?).ok()?;
    field.normalize()
}

fn decode_row(row: &sqlx::postgres::PgRow) -> SurveyRow {
    SurveyRow {
        id: row.get("id"),
        created_at: row.get::<Option<DateTime<Utc>>, _>("created_at"),
        institution: row.get("institution"),
        survey_type: row.get("survey_type"),
        time_allocation: row.get("time_allocation"),
        familiarity: row.get("familiarity"),
        llm_knowledge: row.get("llm_knowledge"),
        prompt_knowledge: row.get("prompt_knowledge"),
        agent_knowledge: row.get("agent_knowledge"),
        org_guidelines: row.get("org_guidelines"),
        org_tool_access: row.get("org_tool_access"),
        org_leadership_push: row.get("org_leadership_push"),
        trust_curiosity: row.get("trust_curiosity"),
        replacement_concern: row.get("replacement_concern"),
        privacy_concern: row.get("privacy_concern"),
        learning_capacity: row.get("learning_capacity"),
        team_receptive: row.get("team_receptive"),
        leader_needs: row.get("leader_needs"),
        main_benefit: row.get("main_benefit"),
        main_concern: row.get("main_concern"),
        specific_answers: parse_json_field::<SpecificAnswers>(row.get("specific_answers")),
        workflows: parse_json_field::<Vec<WorkflowItem>>(row.get("workflows")),
    }
}

/// Fetch every survey response with nested JSON fields normalized, ready
/// for the in-memory filter and aggregation stages.
pub async fn fetch_responses(pool: &PgPool) -> anyhow::Result<Vec<SurveyRow>> {
    let records = sqlx::query("SELECT * FROM survey_dashboard.responses ORDER BY created_at")
        .fetch_all(pool)
        .await?;

    Ok(records.iter().map(decode_row).collect())
}

async fn distinct_values(pool: &PgPool, column: &str) -> anyhow::Result<Vec<String>> {
    let query = format!(
        "SELECT DISTINCT {column} AS value FROM survey_dashboard.responses \
         WHERE {column} IS NOT NULL ORDER BY value"
    );
    let records = sqlx::query(&query).fetch_all(pool).await?;

    let mut values = vec![crate::filter::ALL_FILTER.to_string()];
    for record in records {
        values.push(record.get("value"));
    }
    Ok(values)
}

/// Distinct institution names prefixed with the "All" sentinel, in the
/// order a dropdown would show them.
pub async fn list_institutions(pool: &PgPool) -> anyhow::Result<Vec<String>> {
    distinct_values(pool, "institution").await
}

pub async fn list_survey_types(pool: &PgPool) -> anyhow::Result<Vec<String>> {
    distinct_values(pool, "survey_type").await
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let responses = vec![
        (
            "seed-001",
            "Banco Central",
            "baseline",
            "0-25",
            Some(4.0),
            Some(4.0),
            Some(3.0),
            Some(2.0),
            "Training budget|Clear use cases",
            "Saves time on routine drafting",
            "Data privacy when pasting client records",
            serde_json::json!({ "tools_used": ["ChatGPT", "Copilot"] }),
            serde_json::json!([
                { "name": "Draft email", "pain": "4", "freq": "D" },
                { "name": "Monthly reporting", "pain": "5", "freq": "M" }
            ]),
        ),
        (
            "seed-002",
            "Banco Central",
            "baseline",
            "25-50",
            Some(3.0),
            Some(3.0),
            Some(2.0),
            Some(2.0),
            "Training budget",
            "Faster document summaries",
            "Model accuracy on financial terms",
            serde_json::json!({ "tools_used": ["ChatGPT"] }),
            serde_json::json!([
                { "name": "Draft email", "pain": "3", "freq": "D" }
            ]),
        ),
        (
            "seed-003",
            "Universidad Andina",
            "followup",
            "0-25",
            Some(5.0),
            Some(5.0),
            Some(4.0),
            Some(3.0),
            "Clear use cases|Hands-on workshops",
            "Saves time on routine drafting",
            "Students outsourcing their thinking",
            serde_json::json!({ "tools_used": ["Claude", "ChatGPT"] }),
            serde_json::json!([
                { "name": "Grading rubrics", "pain": "4", "freq": "S" }
            ]),
        ),
    ];

    for (
        id,
        institution,
        survey_type,
        time_allocation,
        familiarity,
        llm_knowledge,
        prompt_knowledge,
        org_guidelines,
        leader_needs,
        main_benefit,
        main_concern,
        specific_answers,
        workflows,
    ) in responses
    {
        sqlx::query(
            r#"
            INSERT INTO survey_dashboard.responses
            (id, institution, survey_type, time_allocation, familiarity,
             llm_knowledge, prompt_knowledge, org_guidelines,
             leader_needs, main_benefit, main_concern,
             specific_answers, workflows)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(institution)
        .bind(survey_type)
        .bind(time_allocation)
        .bind(familiarity)
        .bind(llm_knowledge)
        .bind(prompt_knowledge)
        .bind(org_guidelines)
        .bind(leader_needs)
        .bind(main_benefit)
        .bind(main_concern)
        .bind(specific_answers)
        .bind(workflows)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        institution: Option<String>,
        survey_type: Option<String>,
        time_allocation: Option<String>,
        familiarity: Option<f64>,
        llm_knowledge: Option<f64>,
        prompt_knowledge: Option<f64>,
        agent_knowledge: Option<f64>,
        org_guidelines: Option<f64>,
        org_tool_access: Option<f64>,
        org_leadership_push: Option<f64>,
        trust_curiosity: Option<f64>,
        replacement_concern: Option<f64>,
        privacy_concern: Option<f64>,
        learning_capacity: Option<f64>,
        team_receptive: Option<f64>,
        leader_needs: Option<String>,
        main_benefit: Option<String>,
        main_concern: Option<String>,
        // JSON-encoded in the CSV; stored verbatim and normalized on read.
        specific_answers: Option<String>,
        workflows: Option<String>,
        id: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let id = row
            .id
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO survey_dashboard.responses
            (id, institution, survey_type, time_allocation, familiarity,
             llm_knowledge, prompt_knowledge, agent_knowledge,
             org_guidelines, org_tool_access, org_leadership_push,
             trust_curiosity, replacement_concern, privacy_concern,
             learning_capacity, team_receptive,
             leader_needs, main_benefit, main_concern,
             specific_answers, workflows)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, $18, $19,
                    $20::jsonb, $21::jsonb)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(&row.institution)
        .bind(&row.survey_type)
        .bind(&row.time_allocation)
        .bind(row.familiarity)
        .bind(row.llm_knowledge)
        .bind(row.prompt_knowledge)
        .bind(row.agent_knowledge)
        .bind(row.org_guidelines)
        .bind(row.org_tool_access)
        .bind(row.org_leadership_push)
        .bind(row.trust_curiosity)
        .bind(row.replacement_concern)
        .bind(row.privacy_concern)
        .bind(row.learning_capacity)
        .bind(row.team_receptive)
        .bind(&row.leader_needs)
        .bind(&row.main_benefit)
        .bind(&row.main_concern)
        .bind(&row.specific_answers)
        .bind(&row.workflows)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
