//! Per-run measurements and batch reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use despair_core::GameConfig;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "condition", rename_all = "snake_case")]
pub enum Termination {
    /// Every enemy in the dungeon was defeated.
    GameOver { score: i64 },
    /// The party was wiped out.
    WaveOver,
    /// The step budget ran out first.
    MaxSteps,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::GameOver { score } => write!(f, "dungeon cleared with stress {}", score),
            Termination::WaveOver => write!(f, "heroes party was wiped out"),
            Termination::MaxSteps => write!(f, "max number of steps reached"),
        }
    }
}

/// Measurements of one simulated session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunData {
    pub seed: u64,
    pub n_steps: usize,
    /// Ledger value after every step.
    pub stress_trace: Vec<i64>,
    /// Stress accumulated over each combat encounter, in fight order.
    pub encounters_stress_delta: Vec<i64>,
    pub encounters_desc: Vec<String>,
    pub termination: Termination,
}

impl RunData {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            n_steps: 0,
            stress_trace: Vec::new(),
            encounters_stress_delta: Vec::new(),
            encounters_desc: Vec::new(),
            termination: Termination::MaxSteps,
        }
    }

    pub fn final_stress(&self) -> i64 {
        self.stress_trace.last().copied().unwrap_or_default()
    }
}

/// Aggregates over a batch of runs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub runs: usize,
    pub cleared: usize,
    pub wiped: usize,
    pub timed_out: usize,
    pub mean_final_stress: f64,
    pub mean_steps: f64,
}

impl RunSummary {
    pub fn from_runs(runs: &[RunData]) -> Self {
        if runs.is_empty() {
            return Self::default();
        }
        let count = |f: fn(&Termination) -> bool| runs.iter().filter(|r| f(&r.termination)).count();
        let total = runs.len() as f64;

        Self {
            runs: runs.len(),
            cleared: count(|t| matches!(t, Termination::GameOver { .. })),
            wiped: count(|t| matches!(t, Termination::WaveOver)),
            timed_out: count(|t| matches!(t, Termination::MaxSteps)),
            mean_final_stress: runs.iter().map(|r| r.final_stress() as f64).sum::<f64>() / total,
            mean_steps: runs.iter().map(|r| r.n_steps as f64).sum::<f64>() / total,
        }
    }
}

/// Everything a batch of simulations produced, ready for JSON export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Label of the players that drove the runs, e.g. `random` or `ai`.
    pub players: String,
    pub config: GameConfig,
    pub summary: RunSummary,
    pub runs: Vec<RunData>,
}

impl SimulationReport {
    pub fn new(players: impl Into<String>, config: GameConfig, runs: Vec<RunData>) -> Self {
        Self {
            players: players.into(),
            config,
            summary: RunSummary::from_runs(&runs),
            runs,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(termination: Termination, trace: Vec<i64>) -> RunData {
        RunData {
            n_steps: trace.len(),
            stress_trace: trace,
            termination,
            ..RunData::new(0)
        }
    }

    #[test]
    fn summary_counts_terminations() {
        let runs = vec![
            run(Termination::GameOver { score: 40 }, vec![10, 40]),
            run(Termination::WaveOver, vec![100, 200, 300]),
            run(Termination::MaxSteps, vec![0]),
        ];
        let summary = RunSummary::from_runs(&runs);
        assert_eq!(summary.runs, 3);
        assert_eq!(summary.cleared, 1);
        assert_eq!(summary.wiped, 1);
        assert_eq!(summary.timed_out, 1);
        assert_eq!(summary.mean_final_stress, 340.0 / 3.0);
        assert_eq!(summary.mean_steps, 2.0);
    }

    #[test]
    fn empty_batch_has_zero_summary() {
        assert_eq!(RunSummary::from_runs(&[]), RunSummary::default());
    }

    #[test]
    fn termination_is_tagged_in_json() {
        let json = serde_json::to_string(&Termination::GameOver { score: 7 }).unwrap();
        assert_eq!(json, r#"{"condition":"game_over","score":7}"#);
        let json = serde_json::to_string(&Termination::MaxSteps).unwrap();
        assert_eq!(json, r#"{"condition":"max_steps"}"#);
    }

    #[test]
    fn report_json_carries_config_and_runs() {
        let report = SimulationReport::new(
            "random",
            GameConfig::default(),
            vec![run(Termination::WaveOver, vec![5])],
        );
        let json = report.to_json().unwrap();
        let parsed: SimulationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
        assert!(json.contains("\"hero_dies\": 100"));
    }
}
