//! Plan profile: prints the grid and trial counts without running trials

use super::Profile;
use crate::grid::SamplingPlan;
use crate::output::{Cell, RowSink};
use crate::Result;

pub struct PlanProfile {
    plan: SamplingPlan,
}

impl PlanProfile {
    pub fn new(plan: SamplingPlan) -> Self {
        Self { plan }
    }
}

impl Profile for PlanProfile {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Stream", "Trials"]
    }

    fn run(&mut self, sink: &mut dyn RowSink) -> Result<()> {
        for point in self.plan.points() {
            sink.row(&[Cell::Int(point.stream_length), Cell::Int(point.num_trials)])?;
        }
        tracing::info!(
            points = self.plan.len(),
            updates = %crate::util::time::format_count(self.plan.total_updates()),
            "plan complete"
        );
        Ok(())
    }
}
