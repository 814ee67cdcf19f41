mod lock_evaluator;
mod mutation_planner;

pub use lock_evaluator::LockEvaluator;
pub use mutation_planner::{MutationPlanner, PolicyViolation, LINE_STEP};
