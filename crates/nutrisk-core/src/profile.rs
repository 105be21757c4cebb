use crate::error::NutriskError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A user's self-declared allergies, medical conditions, and dietary
/// restrictions, as consumed by the scorer.
///
/// Each list keeps declaration order and holds no blank or
/// case-insensitively duplicate entries when built through [`HealthProfile::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

impl HealthProfile {
    pub fn new<A, C, R>(allergies: A, health_conditions: C, dietary_restrictions: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        HealthProfile {
            allergies: dedup_entries(allergies),
            health_conditions: dedup_entries(health_conditions),
            dietary_restrictions: dedup_entries(dietary_restrictions),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allergies.is_empty()
            && self.health_conditions.is_empty()
            && self.dietary_restrictions.is_empty()
    }
}

/// The health profile as the app persists it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub additional_allergens: Vec<String>,
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Option<String>,
}

impl StoredProfile {
    /// Flatten into the scorer's shape.
    ///
    /// Allergies are the union of declared allergies, additional allergens and
    /// disliked ingredients, in that order. The single dietary preference is
    /// appended to any explicit restrictions.
    pub fn flatten(&self) -> HealthProfile {
        let allergies = self
            .allergies
            .iter()
            .chain(&self.additional_allergens)
            .chain(&self.disliked_ingredients)
            .cloned();
        let restrictions = self
            .dietary_restrictions
            .iter()
            .chain(&self.dietary_preferences)
            .cloned();
        HealthProfile::new(allergies, self.health_conditions.clone(), restrictions)
    }
}

/// Load a stored profile from a JSON file.
///
/// A document that is JSON `null` means no profile has been saved yet.
pub fn load_profile(path: &Path) -> Result<Option<HealthProfile>, NutriskError> {
    let content = std::fs::read_to_string(path).map_err(|e| NutriskError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let stored: Option<StoredProfile> =
        serde_json::from_str(&content).map_err(|e| NutriskError::ProfileLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(stored.map(|s| s.flatten()))
}

/// Parse a stored profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<Option<HealthProfile>, NutriskError> {
    let stored: Option<StoredProfile> = serde_json::from_str(json)
        .map_err(|e| NutriskError::ProfileInvalid(e.to_string()))?;
    Ok(stored.map(|s| s.flatten()))
}

fn dedup_entries<I>(entries: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for entry in entries {
        let entry: String = entry.into();
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }
    out
}
