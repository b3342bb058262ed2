use serde::Serialize;

/// A recipe parsed from a single cuisine envelope, ready to be persisted by the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDraft {
    pub title: String,
    pub servings_count: Option<u32>,
    pub servings_text: String,
    pub working_time_minutes: Option<u32>,
    /// Always exactly one step; the content is not split any further
    pub steps: Vec<StepDraft>,
}

impl RecipeDraft {
    /// Instruction text of the (single) cooking step
    pub fn instruction_text(&self) -> &str {
        self.steps
            .first()
            .map(|step| step.instruction.as_str())
            .unwrap_or_default()
    }

    /// All ingredients in first-occurrence order
    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientDraft> {
        self.steps.iter().flat_map(|step| step.ingredients.iter())
    }
}

/// One cooking step: instruction prose plus the ingredients tagged inside it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepDraft {
    pub instruction: String,
    pub ingredients: Vec<IngredientDraft>,
}

/// A single ingredient line decomposed into amount, unit, food and note
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngredientDraft {
    /// Non-negative; 0 when the quantity could not be parsed
    pub amount: f64,
    /// Never `Some("")`, blank units are stored as `None`
    pub unit: Option<String>,
    pub food: String,
    pub note: String,
    /// The verbatim `\ing...` span this ingredient came from
    pub original_text: String,
}
