pub mod engine;
pub mod outcome;

pub use engine::{assess, evaluate, Evaluation};
pub use outcome::{safety_score, RiskFinding, RiskLevel, RiskReport};
