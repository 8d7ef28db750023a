//! 博客生成流水线
//!
//! Router -> (Research) -> Planner -> Writers -> Merge -> PlanImages -> Materialize

pub mod context;
pub mod images;
pub mod merger;
pub mod planner;
pub mod research;
pub mod router;
pub mod stage;
pub mod state;
pub mod workflow;
pub mod writer;
