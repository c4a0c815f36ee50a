use crate::models::SurveyRow;

/// The fixed set of 1-5 rating fields behind the strength/gap KPIs and
/// the maturity radar. Both views iterate `ALL` so the field order and
/// labels cannot drift between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingField {
    LlmKnowledge,
    PromptKnowledge,
    AgentKnowledge,
    OrgGuidelines,
    OrgToolAccess,
    OrgLeadershipPush,
    TrustCuriosity,
    ReplacementConcern,
    PrivacyConcern,
    LearningCapacity,
    TeamReceptive,
}

impl RatingField {
    pub const ALL: [RatingField; 11] = [
        RatingField::LlmKnowledge,
        RatingField::PromptKnowledge,
        RatingField::AgentKnowledge,
        RatingField::OrgGuidelines,
        RatingField::OrgToolAccess,
        RatingField::OrgLeadershipPush,
        RatingField::TrustCuriosity,
        RatingField::ReplacementConcern,
        RatingField::PrivacyConcern,
        RatingField::LearningCapacity,
        RatingField::TeamReceptive,
    ];

    /// Short label used on the KPI cards.
    pub fn kpi_label(self) -> &'static str {
        match self {
            RatingField::LlmKnowledge => "LLM Knowledge",
            RatingField::PromptKnowledge => "Prompt Engineering",
            RatingField::AgentKnowledge => "AI Agent Knowledge",
            RatingField::OrgGuidelines => "Clear Guidelines",
            RatingField::OrgToolAccess => "Tool Access",
            RatingField::OrgLeadershipPush => "Leadership Push",
            RatingField::TrustCuriosity => "Trust/Curiosity",
            RatingField::ReplacementConcern => "Replacement Concern",
            RatingField::PrivacyConcern => "Privacy Concern",
            RatingField::LearningCapacity => "Learning Curve",
            RatingField::TeamReceptive => "Receptive Team",
        }
    }

    /// Axis label used on the maturity radar.
    pub fn maturity_label(self) -> &'static str {
        match self {
            RatingField::LlmKnowledge => "LLM Knowledge",
            RatingField::PromptKnowledge => "Prompt Engineering",
            RatingField::AgentKnowledge => "AI Agent Understanding",
            RatingField::OrgGuidelines => "Clear AI Guidelines",
            RatingField::OrgToolAccess => "Access to Tools",
            RatingField::OrgLeadershipPush => "Leadership Push",
            RatingField::TrustCuriosity => "Trust/Curiosity",
            RatingField::ReplacementConcern => "Replacement Concern",
            RatingField::PrivacyConcern => "Privacy Concern",
            RatingField::LearningCapacity => "Capacity to Learn",
            RatingField::TeamReceptive => "Team Receptiveness",
        }
    }

    /// The raw value for this field on one row, if the respondent
    /// answered with a finite number.
    pub fn value(self, row: &SurveyRow) -> Option<f64> {
        let value = match self {
            RatingField::LlmKnowledge => row.llm_knowledge,
            RatingField::PromptKnowledge => row.prompt_knowledge,
            RatingField::AgentKnowledge => row.agent_knowledge,
            RatingField::OrgGuidelines => row.org_guidelines,
            RatingField::OrgToolAccess => row.org_tool_access,
            RatingField::OrgLeadershipPush => row.org_leadership_push,
            RatingField::TrustCuriosity => row.trust_curiosity,
            RatingField::ReplacementConcern => row.replacement_concern,
            RatingField::PrivacyConcern => row.privacy_concern,
            RatingField::LearningCapacity => row.learning_capacity,
            RatingField::TeamReceptive => row.team_receptive,
        };
        value.filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_list_is_fixed_at_eleven() {
        assert_eq!(RatingField::ALL.len(), 11);
        assert_eq!(RatingField::ALL[0], RatingField::LlmKnowledge);
        assert_eq!(RatingField::ALL[10], RatingField::TeamReceptive);
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let row = SurveyRow {
            llm_knowledge: Some(f64::NAN),
            prompt_knowledge: Some(3.0),
            ..SurveyRow::default()
        };
        assert_eq!(RatingField::LlmKnowledge.value(&row), None);
        assert_eq!(RatingField::PromptKnowledge.value(&row), Some(3.0));
    }
}
