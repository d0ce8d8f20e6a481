//! Capacity-based activity recommendations.

use serde::{Deserialize, Serialize};

use super::capacity::BioState;

/// Kind of work suited to a capacity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    DeepWork,
    Admin,
    Rest,
}

impl Recommendation {
    pub fn for_capacity(total_capacity: f64) -> Self {
        if total_capacity > 0.8 {
            Recommendation::DeepWork
        } else if total_capacity < 0.3 {
            Recommendation::Rest
        } else {
            Recommendation::Admin
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Recommendation::DeepWork => "Deep Work / High Focus (Coding, Math)",
            Recommendation::Admin => "Admin / Low Stakes (Email, Meetings)",
            Recommendation::Rest => "Rest / Recovery (NSDR, Sleep)",
        }
    }
}

/// Freshness and circadian sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityComponents {
    pub freshness: f64,
    pub circadian: f64,
}

/// Capacity snapshot for one user, ready for display or encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub user: String,
    pub status: String,
    pub capacity_score: f64,
    pub components: CapacityComponents,
    pub recommendation: String,
}

impl CapacityReport {
    pub fn new(user: impl Into<String>, status: impl Into<String>, state: &BioState) -> Self {
        Self {
            user: user.into(),
            status: status.into(),
            capacity_score: state.total_capacity,
            components: CapacityComponents {
                freshness: state.freshness,
                circadian: state.circadian,
            },
            recommendation: Recommendation::for_capacity(state.total_capacity)
                .description()
                .to_string(),
        }
    }
}
