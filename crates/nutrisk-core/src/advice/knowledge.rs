use crate::advice::Advisor;
use crate::error::NutriskError;

/// Fixed advisory snippets keyed by a lowercase phrase to look for in the prompt.
const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    (
        "critical allergy alert",
        "Allergy: this product contains an ingredient you declared an allergy to. Avoid it \
         entirely, check labels for other names of the same allergen, and seek medical help \
         if you have already eaten it and feel unwell.",
    ),
    (
        "diabetes warning",
        "Blood sugar: the sugar content is high for someone managing diabetes. Prefer products \
         with under 5g of sugar per 100g, pair occasional treats with fibre or protein, and \
         choose whole grains over refined carbohydrates.",
    ),
    (
        "cholesterol warning",
        "Cholesterol: the fat content is high. Keep portions small, prefer foods rich in \
         unsaturated fats such as nuts, seeds and olive oil, and limit fried and baked snacks.",
    ),
    (
        "high sodium warning",
        "Blood pressure: the sodium content is high. Look for low-sodium versions, balance the \
         day with fresh vegetables and fruit, and avoid adding extra salt.",
    ),
    (
        "safe to consume",
        "No conflicts were found with your profile. Enjoy in moderation as part of a balanced \
         diet with plenty of vegetables, whole grains and water.",
    ),
];

const UNAVAILABLE: &str = "Personalized recommendations are currently unavailable. Please \
consult a healthcare professional for personalized advice.";

/// Offline advisor that answers from a small built-in knowledge base.
///
/// Every entry whose phrase appears in the prompt contributes one paragraph,
/// in knowledge-base order.
#[derive(Debug, Default, Clone, Copy)]
pub struct KnowledgeBaseAdvisor;

impl KnowledgeBaseAdvisor {
    pub fn new() -> Self {
        KnowledgeBaseAdvisor
    }

    pub fn lookup(&self, query: &str) -> String {
        let lower = query.to_lowercase();
        let paragraphs: Vec<&str> = KNOWLEDGE_BASE
            .iter()
            .filter(|(phrase, _)| lower.contains(phrase))
            .map(|(_, text)| *text)
            .collect();
        if paragraphs.is_empty() {
            UNAVAILABLE.to_string()
        } else {
            paragraphs.join("\n\n")
        }
    }
}

impl Advisor for KnowledgeBaseAdvisor {
    fn advise(&self, prompt: &str) -> Result<String, NutriskError> {
        Ok(self.lookup(prompt))
    }

    fn backend_name(&self) -> &str {
        "knowledge-base"
    }
}
