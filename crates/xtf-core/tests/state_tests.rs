use xtf_core::{State, Timestamp, Value, XtfError};

fn build(
    position_desired: Vec<f64>,
    velocity_desired: Vec<f64>,
    position_actual: Vec<f64>,
) -> Result<State, XtfError> {
    State::new(
        position_desired,
        velocity_desired,
        vec![],
        position_actual,
        vec![],
        vec![],
        0,
        Timestamp::new(10, 500),
    )
}

#[test]
fn first_non_empty_sequence_fixes_the_dimension() {
    let state = build(vec![0.0, 1.0], vec![0.5, 0.5], vec![]).expect("consistent");
    assert_eq!(state.dimension(), 2);
    assert_eq!(state.position_desired(), &[0.0, 1.0]);
    assert_eq!(state.position_actual(), &[] as &[f64]);
}

#[test]
fn later_sequences_may_be_empty_but_not_shorter() {
    let err = build(vec![0.0, 1.0], vec![], vec![0.5]).expect_err("mismatched");
    assert!(matches!(err, XtfError::Validation(_)));

    let err = build(vec![0.0], vec![0.1, 0.2], vec![]).expect_err("mismatched");
    assert!(matches!(err, XtfError::Validation(_)));
}

#[test]
fn all_empty_sequences_are_a_valid_timing_only_sample() {
    let state = build(vec![], vec![], vec![]).expect("degenerate state");
    assert_eq!(state.dimension(), 0);
    assert_eq!(state.stamp(), Timestamp::new(10, 500));
}

#[test]
fn extras_are_assignable_and_listable() {
    let mut state = build(vec![0.0], vec![], vec![]).expect("state");
    state
        .extras
        .insert("confidence".to_string(), Value::Double(0.9));
    state
        .extras
        .insert("source".to_string(), Value::from("imu"));

    let mut names = state.extra_names();
    names.sort_unstable();
    assert_eq!(names, vec!["confidence", "source"]);
    assert_eq!(
        state.extras["confidence"].as_double().expect("double"),
        0.9
    );
}
