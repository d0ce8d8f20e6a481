//! Effort-vs-capacity fit labels.

use serde::{Deserialize, Serialize};

/// Qualitative match between a task's effort and its assigned capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitScore {
    #[serde(rename = "Perfect")]
    Perfect,
    #[serde(rename = "Challenging")]
    Challenging,
    #[serde(rename = "Burnout Risk")]
    BurnoutRisk,
    /// The task could not be placed anywhere in the horizon
    #[serde(rename = "No Time/Energy")]
    NoTimeEnergy,
}

impl FitScore {
    /// Compare `capacity` against effort normalized from 1-10 to 0.1-1.0.
    pub fn judge(effort: u8, capacity: f64) -> Self {
        let diff = capacity - effort as f64 / 10.0;

        if diff >= -0.1 {
            FitScore::Perfect
        } else if diff > -0.3 {
            FitScore::Challenging
        } else {
            FitScore::BurnoutRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitScore::Perfect => "Perfect",
            FitScore::Challenging => "Challenging",
            FitScore::BurnoutRisk => "Burnout Risk",
            FitScore::NoTimeEnergy => "No Time/Energy",
        }
    }
}

impl std::fmt::Display for FitScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_table() {
        assert_eq!(FitScore::judge(10, 0.90), FitScore::Perfect);
        assert_eq!(FitScore::judge(10, 0.80), FitScore::Challenging);
        assert_eq!(FitScore::judge(10, 0.69), FitScore::BurnoutRisk);
    }

    #[test]
    fn test_minus_point_three_is_burnout() {
        // 0.7 - 1.0 lands at or just below -0.3 in f64
        assert_eq!(FitScore::judge(10, 0.70), FitScore::BurnoutRisk);
        assert_eq!(FitScore::judge(5, 0.2), FitScore::BurnoutRisk);
    }

    #[test]
    fn test_capacity_above_effort_is_perfect() {
        assert_eq!(FitScore::judge(2, 0.5), FitScore::Perfect);
        assert_eq!(FitScore::judge(1, 0.0), FitScore::Perfect);
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(
            serde_json::to_string(&FitScore::BurnoutRisk).unwrap(),
            "\"Burnout Risk\""
        );
        assert_eq!(
            serde_json::to_string(&FitScore::NoTimeEnergy).unwrap(),
            "\"No Time/Energy\""
        );
        assert_eq!(FitScore::Challenging.to_string(), "Challenging");
    }
}
