use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::schemas::build::BuildConfiguration;

/// Heuristic scores per workload, each within `0..=100`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerformanceScore {
    pub gaming: u32,
    pub workstation: u32,
    pub general: u32,
}

impl PerformanceScore {
    pub fn average(&self) -> f64 {
        f64::from(self.gaming + self.workstation + self.general) / 3.0
    }
}

/// Ordered by severity: `Compatible < Warning < Incompatible`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityStatus {
    Compatible,
    Warning,
    Incompatible,
}

impl Default for CompatibilityStatus {
    fn default() -> Self {
        Self::Compatible
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CompatibilityResult {
    pub status: CompatibilityStatus,
    pub issues: Vec<String>,
}

impl CompatibilityResult {
    /// Record an issue. The status only ever moves towards more severe.
    pub fn flag(&mut self, status: CompatibilityStatus, issue: String) {
        self.status = self.status.max(status);
        self.issues.push(issue);
    }
}

/// How the selected PSU compares with the estimated draw.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsuRating {
    Good,
    Acceptable,
    Insufficient,
}

impl Display for PsuRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Good => "Good",
                Self::Acceptable => "Acceptable",
                Self::Insufficient => "Insufficient",
            }
        )
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerConsumption {
    /// Estimated system draw in watts.
    pub estimated: u32,
    /// Suggested PSU wattage.
    pub recommended: u32,
    pub recommendation: String,
    /// Only present when the build has a PSU.
    pub rating: Option<PsuRating>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u32,
    pub performance: PerformanceScore,
    pub compatibility: CompatibilityResult,
    pub power_consumption: PowerConsumption,
    pub price_efficiency: u32,
    pub recommendations: Vec<String>,
}

/// What a recommended build is meant for.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Gaming,
    Office,
    Creator,
    Budget,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Self::Gaming, Self::Office, Self::Creator, Self::Budget];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Gaming => "Gaming",
            Self::Office => "Office",
            Self::Creator => "Creator",
            Self::Budget => "Budget",
        }
    }

    /// Office and budget builds rely on integrated graphics.
    pub fn wants_discrete_gpu(&self) -> bool {
        matches!(self, Self::Gaming | Self::Creator)
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaming" => Ok(Self::Gaming),
            "office" => Ok(Self::Office),
            "creator" => Ok(Self::Creator),
            "budget" => Ok(Self::Budget),
            _ => bail!("no such preset: {}", s),
        }
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title().to_ascii_lowercase())
    }
}

/// Price tier of a recommended build.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Budget,
    Mid,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Self::Budget, Self::Mid, Self::High];

    /// Position within a price-sorted list that this tier picks from.
    pub fn quantile(&self) -> f64 {
        match self {
            Self::Budget => 0.15,
            Self::Mid => 0.5,
            Self::High => 0.85,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Mid => "Mid-range",
            Self::High => "High-end",
        }
    }

    pub fn is_high(&self) -> bool {
        *self == Self::High
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SuggestedBuild {
    pub label: String,
    pub total: f64,
    pub config: BuildConfiguration,
}

#[cfg(test)]
mod tests {
    use super::{CompatibilityResult, CompatibilityStatus, Preset};
    use std::str::FromStr;

    #[test]
    fn test_status_only_escalates() {
        let mut result = CompatibilityResult::default();
        assert_eq!(result.status, CompatibilityStatus::Compatible);

        result.flag(CompatibilityStatus::Warning, "first".into());
        result.flag(CompatibilityStatus::Compatible, "second".into());
        assert_eq!(result.status, CompatibilityStatus::Warning);
        assert_eq!(result.issues.len(), 2);

        result.flag(CompatibilityStatus::Incompatible, "third".into());
        result.flag(CompatibilityStatus::Warning, "fourth".into());
        assert_eq!(result.status, CompatibilityStatus::Incompatible);
    }

    #[test]
    fn test_preset_names() {
        for preset in Preset::ALL.iter() {
            assert_eq!(&Preset::from_str(&preset.to_string()).unwrap(), preset);
        }
        assert_eq!(Preset::from_str("Gaming").unwrap(), Preset::Gaming);
        assert!(Preset::from_str("server").is_err());
        assert!(!Preset::Office.wants_discrete_gpu());
    }
}
