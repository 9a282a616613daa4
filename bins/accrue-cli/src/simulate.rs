//! Replays a [`SimulationConfig`] against a keeper driven by a manual clock.

use std::sync::Arc;

use accrue_core::error::AccrualError;
use accrue_core::fixed::{format_fixed, parse_fixed};
use accrue_core::traits::{Clock, CompoundingRate};
use accrue_keeper::{ManualClock, SharedKeeper, TracingSink};
use serde::Serialize;
use tracing::debug;

use crate::config::{SimulationConfig, Step};

/// Outcome of one replayed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub at: u64,
    pub action: &'static str,
    /// Accrued value after the step, as a decimal string.
    pub current_rate: String,
    /// Stored (checkpointed) value after the step, as a decimal string.
    pub stored_rate: String,
    pub last_update: u64,
    pub period: u64,
}

/// Run every step in order. Stops at the first failing step.
pub fn run(sim: &SimulationConfig) -> Result<Vec<StepReport>, AccrualError> {
    let clock = Arc::new(ManualClock::new(sim.start));
    let keeper = SharedKeeper::init(
        parse_fixed(&sim.initial_rate)?,
        sim.period,
        Arc::clone(&clock),
        TracingSink,
    );

    let mut reports = Vec::with_capacity(sim.steps.len());
    for step in &sim.steps {
        clock.set(step.at());
        match step {
            Step::Query { .. } => {}
            Step::Checkpoint { .. } => {
                keeper.checkpoint()?;
            }
            Step::Accrue { .. } => {
                keeper.accrue()?;
            }
            Step::SetRate { rate, .. } => keeper.set_rate(parse_fixed(rate)?)?,
            Step::SetPeriod { period, .. } => keeper.set_period(*period)?,
        }
        let report = report(step, &keeper)?;
        debug!(at = report.at, action = report.action, current_rate = %report.current_rate, "step");
        reports.push(report);
    }
    Ok(reports)
}

fn report<C: Clock>(step: &Step, keeper: &SharedKeeper<C, TracingSink>) -> Result<StepReport, AccrualError> {
    let state = keeper.state();
    Ok(StepReport {
        at: step.at(),
        action: step.action(),
        current_rate: format_fixed(keeper.current_rate()?),
        stored_rate: format_fixed(state.current_rate),
        last_update: state.last_update,
        period: state.period,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 86_400;

    fn sim(steps: Vec<Step>) -> SimulationConfig {
        SimulationConfig {
            initial_rate: "1.0001".into(),
            period: DAY,
            start: 0,
            steps,
        }
    }

    #[test]
    fn query_after_three_days() {
        let reports = run(&sim(vec![Step::Query { at: 3 * DAY }])).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].current_rate, "1.000300030001");
        assert_eq!(reports[0].stored_rate, "1.0");
        assert_eq!(reports[0].last_update, 0);
    }

    #[test]
    fn rate_change_mid_schedule() {
        let reports = run(&sim(vec![
            Step::SetRate { at: DAY, rate: "2".into() },
            Step::Query { at: 2 * DAY },
        ]))
        .unwrap();
        assert_eq!(reports[0].stored_rate, "1.0001");
        assert_eq!(reports[1].current_rate, "2.0002");
    }

    #[test]
    fn frozen_period_holds_value() {
        let reports = run(&sim(vec![
            Step::SetPeriod { at: DAY, period: 0 },
            Step::Query { at: 50 * DAY },
        ]))
        .unwrap();
        assert_eq!(reports[1].current_rate, "1.0001");
        assert_eq!(reports[1].period, 0);
    }

    #[test]
    fn accrue_keeps_remainder() {
        let reports = run(&sim(vec![Step::Accrue { at: DAY + DAY / 2 }])).unwrap();
        assert_eq!(reports[0].last_update, DAY);
        assert_eq!(reports[0].stored_rate, "1.0001");
    }

    #[test]
    fn checkpoints_every_half_day_keep_accruing() {
        let steps = (1..=20).map(|i| Step::Checkpoint { at: i * DAY / 2 }).collect();
        let reports = run(&sim(steps)).unwrap();
        let last = reports.last().unwrap();
        assert_eq!(last.last_update, 10 * DAY);
        assert_eq!(last.stored_rate, "1.00100045012002100252021");
        assert_eq!(last.current_rate, last.stored_rate);
    }

    #[test]
    fn overflow_stops_the_run() {
        let mut s = sim(vec![Step::Query { at: 1_000 * DAY }]);
        s.initial_rate = "1000".into();
        assert_eq!(run(&s), Err(AccrualError::ArithmeticOverflow));
    }

    #[test]
    fn report_serializes_to_json() {
        let reports = run(&sim(vec![Step::Checkpoint { at: DAY }])).unwrap();
        let json = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(json["action"], "checkpoint");
        assert_eq!(json["current_rate"], "1.0001");
    }
}
