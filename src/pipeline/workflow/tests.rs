use super::*;
use chrono::NaiveDate;

fn state() -> BlogState {
    BlogState::new(
        "Binary search trees",
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        3650,
    )
}

#[test]
fn test_router_branches_to_research_when_needed() {
    let mut s = state();
    s.needs_research = true;
    assert_eq!(next_stage(Stage::Router, &s), Stage::Research);
}

#[test]
fn test_router_branches_past_research_for_closed_book() {
    let s = state();
    assert_eq!(next_stage(Stage::Router, &s), Stage::Planner);
}

#[test]
fn test_linear_chain_after_planner() {
    let s = state();
    assert_eq!(next_stage(Stage::Research, &s), Stage::Planner);
    assert_eq!(next_stage(Stage::Planner, &s), Stage::Writers);
    assert_eq!(next_stage(Stage::Writers, &s), Stage::Merge);
    assert_eq!(next_stage(Stage::Merge, &s), Stage::PlanImages);
    assert_eq!(next_stage(Stage::PlanImages, &s), Stage::Materialize);
    assert_eq!(next_stage(Stage::Materialize, &s), Stage::Done);
}

#[test]
fn test_full_run_terminates_within_default_step_budget() {
    // 最长路径: Router -> Research -> Planner -> Writers -> Merge
    //           -> PlanImages -> Materialize -> Done
    let mut s = state();
    s.needs_research = true;
    let mut stage = Stage::Router;
    let mut steps = 0;
    while stage != Stage::Done {
        steps += 1;
        assert!(steps <= 50, "工作流未收敛");
        stage = next_stage(stage, &s);
    }
    assert_eq!(steps, 7);
}

#[tokio::test]
async fn test_launch_rejects_empty_topic() {
    let config = crate::config::Config::default();
    let result = launch(config).await;
    assert!(result.is_err());
}
