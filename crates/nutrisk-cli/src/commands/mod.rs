pub mod analyze;
pub mod ingest;
pub mod meals;
pub mod metrics;
pub mod profile;
pub mod rules;
pub mod score;
