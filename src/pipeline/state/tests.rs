use crate::pipeline::state::BlogState;
use chrono::NaiveDate;

fn state() -> BlogState {
    BlogState::new(
        "Binary search trees",
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        30,
    )
}

#[test]
fn test_new_state_has_empty_collections() {
    let state = state();
    assert!(state.queries.is_empty());
    assert!(state.evidence.is_empty());
    assert!(state.plan.is_none());
    assert!(state.sections.is_empty());
    assert!(state.image_specs.is_empty());
    assert!(state.merged_md.is_empty());
    assert!(state.final_md.is_empty());
}

#[test]
fn test_append_sections_is_union_not_overwrite() {
    let mut state = state();

    state.append_sections(vec![(2, "## B".to_string())]);
    state.append_sections(vec![(1, "## A".to_string())]);
    // 同一id再次写入也保留 - 多重集合语义
    state.append_sections(vec![(2, "## B'".to_string())]);

    assert_eq!(state.sections.len(), 3);
    assert!(state.sections.contains(&(2, "## B".to_string())));
    assert!(state.sections.contains(&(2, "## B'".to_string())));
}

#[test]
fn test_append_sections_order_commutes_as_multiset() {
    let mut forward = state();
    forward.append_sections(vec![(1, "a".to_string())]);
    forward.append_sections(vec![(2, "b".to_string())]);

    let mut reverse = state();
    reverse.append_sections(vec![(2, "b".to_string())]);
    reverse.append_sections(vec![(1, "a".to_string())]);

    let mut left = forward.sections.clone();
    let mut right = reverse.sections.clone();
    left.sort();
    right.sort();
    assert_eq!(left, right);
}
