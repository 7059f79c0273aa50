//! Log-spaced sampling grids and trial budgets
//!
//! Every profiling driver walks stream lengths on the same logarithmic grid
//! and sizes its inner repetition loop from the same trial schedule, so that
//! results from different sketch profiles line up point for point.
//!
//! # Components
//!
//! - **stepper**: next point of the power series `2^(i / ppo)` and point counts
//! - **budget**: log2-linear interpolation of the number of trials
//! - **plan**: the two combined into an iterable sampling plan
//!
//! # Example
//!
//! ```
//! use sketchbench::grid::{next_point, SamplingPlan, TrialBudget, TrialPolicy};
//!
//! let mut p = 1;
//! let mut series = Vec::new();
//! while p <= 64 {
//!     series.push(p);
//!     p = next_point(2, p);
//! }
//! assert_eq!(series, vec![1, 2, 3, 4, 6, 8, 11, 16, 23, 32, 45, 64]);
//!
//! let plan = SamplingPlan::new(0, 23, 16, TrialPolicy::Budget(TrialBudget::new(0.0, 23.0, 8.0, 16.0)));
//! let first = plan.points().next().unwrap();
//! assert_eq!(first.stream_length, 1);
//! assert_eq!(first.num_trials, 65536);
//! ```

pub mod budget;
pub mod plan;
pub mod stepper;

pub use budget::{num_trials, TrialBudget};
pub use plan::{PlanPoint, SamplingPlan, TrialPolicy};
pub use stepper::{count_points, next_point, GridPoints};
