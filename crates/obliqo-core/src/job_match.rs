//! Server-computed match results for a job: fit score, decision, and the
//! explainability breakdown behind it. The client only reads these.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::job::{normalize_job, Job, NormalizedJob};

/// Recommendation attached to every job match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Apply,
    Wait,
    Skip,
    Avoid,
}

impl Decision {
    pub const ALL: [Decision; 4] = [
        Decision::Apply,
        Decision::Wait,
        Decision::Skip,
        Decision::Avoid,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Apply => "Apply",
            Decision::Wait => "Wait",
            Decision::Skip => "Skip",
            Decision::Avoid => "Avoid",
        }
    }

    /// One-line explanation suitable for a legend.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Decision::Apply => "strong fit, apply now",
            Decision::Wait => "close fit, close a few gaps first",
            Decision::Skip => "weak fit for your current profile",
            Decision::Avoid => "poor fit or high risk",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = String;

    /// Case-insensitive, so command-line input like `apply` works.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decision::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown decision '{s}' (expected Apply, Wait, Skip, or Avoid)"))
    }
}

/// A missing skill annotated with importance and learning resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    /// `High`, `Medium`, or `Low`.
    pub importance: String,
    pub estimated_learning_time: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainabilityBreakdown {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub risk_factors: Vec<String>,
    pub strengths: Vec<String>,
    pub skill_gaps: Vec<SkillGap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    pub job: Job,
    /// Compatibility between profile and job, 0 to 100.
    pub fit_score: f64,
    pub decision: Decision,
    pub decision_reason: String,
    pub explanation: ExplainabilityBreakdown,
    /// `Low`, `Medium`, or `High`.
    pub competition_level: String,
    /// `Positive`, `Neutral`, or `Negative`.
    pub career_impact: String,
}

impl JobMatch {
    /// The job's canonical display fields.
    #[must_use]
    pub fn normalized(&self) -> NormalizedJob {
        normalize_job(&self.job)
    }

    #[must_use]
    pub fn fit_band(&self) -> FitBand {
        FitBand::from_score(self.fit_score)
    }
}

/// Coarse bucket of a fit score, used to pick display emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitBand {
    Strong,
    Moderate,
    Weak,
    Poor,
}

impl FitBand {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            FitBand::Strong
        } else if score >= 60.0 {
            FitBand::Moderate
        } else if score >= 40.0 {
            FitBand::Weak
        } else {
            FitBand::Poor
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FitBand::Strong => "strong",
            FitBand::Moderate => "moderate",
            FitBand::Weak => "weak",
            FitBand::Poor => "poor",
        }
    }
}

/// Count-up animation for a fit score.
///
/// Yields the value to display on each frame: the running total floored to a
/// whole number, ending with the exact score. Dropping the iterator cancels
/// the animation.
#[derive(Debug, Clone)]
pub struct ScoreCounter {
    target: f64,
    increment: f64,
    current: f64,
    frames: u32,
    done: bool,
}

impl ScoreCounter {
    pub const STEPS: u32 = 60;
    pub const DURATION: Duration = Duration::from_millis(1_000);

    #[must_use]
    pub fn new(score: f64) -> Self {
        let target = score.clamp(0.0, 100.0);
        Self {
            target,
            increment: target / f64::from(Self::STEPS),
            current: 0.0,
            frames: 0,
            done: false,
        }
    }

    /// Delay between frames.
    #[must_use]
    pub fn frame_interval() -> Duration {
        Self::DURATION / Self::STEPS
    }
}

impl Iterator for ScoreCounter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        self.frames += 1;
        // Float accumulation can land just short of the target on the last step.
        if self.current >= self.target || self.frames >= Self::STEPS {
            self.done = true;
            Some(self.target)
        } else {
            Some(self.current.floor())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_parses_case_insensitively() {
        assert_eq!("apply".parse::<Decision>().unwrap(), Decision::Apply);
        assert_eq!("AVOID".parse::<Decision>().unwrap(), Decision::Avoid);
        assert!("maybe".parse::<Decision>().is_err());
    }

    #[test]
    fn decision_round_trips_wire_names() {
        for decision in Decision::ALL {
            let value = serde_json::to_value(decision).unwrap();
            assert_eq!(value, serde_json::json!(decision.as_str()));
        }
    }

    #[test]
    fn fit_band_thresholds() {
        assert_eq!(FitBand::from_score(75.0), FitBand::Strong);
        assert_eq!(FitBand::from_score(74.9), FitBand::Moderate);
        assert_eq!(FitBand::from_score(60.0), FitBand::Moderate);
        assert_eq!(FitBand::from_score(40.0), FitBand::Weak);
        assert_eq!(FitBand::from_score(39.9), FitBand::Poor);
    }

    #[test]
    fn score_counter_ends_on_exact_score() {
        let frames: Vec<f64> = ScoreCounter::new(82.5).collect();
        assert!(frames.len() <= ScoreCounter::STEPS as usize);
        assert!((frames.last().copied().unwrap() - 82.5).abs() < f64::EPSILON);
        assert!(frames.windows(2).all(|w| w[0] <= w[1]), "frames must not go backwards");
    }

    #[test]
    fn score_counter_zero_score_is_single_frame() {
        let frames: Vec<f64> = ScoreCounter::new(0.0).collect();
        assert_eq!(frames, vec![0.0]);
    }

    #[test]
    fn frame_interval_splits_duration() {
        assert_eq!(ScoreCounter::frame_interval(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn job_match_deserializes_from_api_shape() {
        let value = serde_json::json!({
            "job": { "JobTitles": "Data Intern", "Company_Name": "Globex" },
            "fit_score": 81.0,
            "decision": "Apply",
            "decision_reason": "Strong skill overlap",
            "explanation": {
                "matched_skills": ["SQL"],
                "missing_skills": ["Tableau"],
                "risk_factors": [],
                "strengths": ["Analytics"],
                "skill_gaps": [{
                    "skill": "Tableau",
                    "importance": "Medium",
                    "estimated_learning_time": "2 weeks",
                    "resources": ["Tableau docs"]
                }]
            },
            "competition_level": "High",
            "career_impact": "Positive"
        });
        let m: JobMatch = serde_json::from_value(value).unwrap();
        assert_eq!(m.decision, Decision::Apply);
        assert_eq!(m.fit_band(), FitBand::Strong);
        assert_eq!(m.normalized().title, "Data Intern");
        assert_eq!(m.explanation.skill_gaps[0].skill, "Tableau");
    }
}
