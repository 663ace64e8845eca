use xtf_core::{
    parse_trajectory_xml, read_trajectory, trajectory_to_xml, write_trajectory, Schema, State,
    Timestamp, TimingMode, Trajectory, TrajectoryKind, Value, WriteMode, XtfError,
};

fn joint_sample(sequence: i64, position: Vec<f64>) -> State {
    State::new(
        position,
        vec![],
        vec![],
        vec![],
        vec![],
        vec![],
        sequence,
        Timestamp::default(),
    )
    .expect("consistent state")
}

fn demo_joint_trajectory() -> Trajectory {
    Trajectory::with_states(
        "t1",
        TrajectoryKind::Generated,
        TimingMode::Untimed,
        "arm",
        "gen",
        Schema::Joint {
            joint_names: vec!["j0".to_string(), "j1".to_string()],
        },
        vec!["demo".to_string()],
        vec![
            joint_sample(0, vec![0.0, 1.0]),
            joint_sample(1, vec![0.5, 1.5]),
        ],
    )
    .expect("valid trajectory")
}

#[test]
fn joint_round_trip_is_field_exact() {
    let trajectory = demo_joint_trajectory();
    let xml = trajectory_to_xml(&trajectory, WriteMode::Indented).expect("encode");
    let decoded = parse_trajectory_xml(&xml).expect("decode");

    assert_eq!(decoded.uid(), "t1");
    assert_eq!(decoded.robot(), "arm");
    assert_eq!(decoded.generator(), "gen");
    assert_eq!(decoded.timing(), TimingMode::Untimed);
    assert_eq!(decoded.kind(), TrajectoryKind::Generated);
    assert_eq!(decoded.tags(), &["demo"]);
    match decoded.schema() {
        Schema::Joint { joint_names } => assert_eq!(joint_names, &["j0", "j1"]),
        other => panic!("expected joint schema, got {other:?}"),
    }
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].position_desired(), &[0.0, 1.0]);
    assert_eq!(decoded[1].position_desired(), &[0.5, 1.5]);
    assert_eq!(decoded[1].velocity_actual(), &[] as &[f64]);

    assert_eq!(decoded, trajectory);
}

#[test]
fn pose_round_trip_preserves_every_extra_kind() {
    let mut state = State::new(
        vec![0.1, 0.2, 0.3, 0.0, 0.0, 0.0, 1.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![],
        vec![0.1, 0.2, 0.31, 0.0, 0.0, 0.0, 1.0],
        vec![],
        vec![],
        42,
        Timestamp::new(1_700_000_000, 125_000_000),
    )
    .expect("pose state");
    state.extras.insert("valid".to_string(), Value::Boolean(true));
    state.extras.insert("retries".to_string(), Value::Integer(-4));
    state.extras.insert("score".to_string(), Value::Double(2.5));
    state
        .extras
        .insert("note".to_string(), Value::String("reach target".to_string()));
    state.extras.insert(
        "contact".to_string(),
        Value::BooleanList(vec![true, false, true]),
    );
    state
        .extras
        .insert("ids".to_string(), Value::IntegerList(vec![1, 2, 3]));
    state
        .extras
        .insert("weights".to_string(), Value::DoubleList(vec![0.5, -1.25]));
    state.extras.insert(
        "frames".to_string(),
        Value::StringList(vec!["world".to_string(), "tool".to_string()]),
    );

    let trajectory = Trajectory::with_states(
        "pose-rt",
        TrajectoryKind::Recorded,
        TimingMode::Timed,
        "base",
        "rec",
        Schema::Pose {
            root_frame: "world".to_string(),
            target_frame: "tool".to_string(),
        },
        vec!["a".to_string(), "b".to_string()],
        vec![state],
    )
    .expect("valid trajectory");

    for mode in [WriteMode::Compact, WriteMode::Indented] {
        let xml = trajectory_to_xml(&trajectory, mode).expect("encode");
        let decoded = parse_trajectory_xml(&xml).expect("decode");
        assert_eq!(decoded, trajectory);
        assert_eq!(
            decoded[0].extras["ids"].as_integer_list().expect("ids"),
            &[1, 2, 3]
        );
        assert_eq!(
            decoded[0].extras["note"].as_string().expect("note"),
            "reach target"
        );
    }
}

#[test]
fn compact_and_indented_differ_only_in_whitespace() {
    let trajectory = demo_joint_trajectory();
    let compact = trajectory_to_xml(&trajectory, WriteMode::Compact).expect("compact");
    let indented = trajectory_to_xml(&trajectory, WriteMode::Indented).expect("indented");
    assert_ne!(compact, indented);

    let squeeze = |s: &str| s.split_whitespace().collect::<String>();
    assert_eq!(squeeze(&compact), squeeze(&indented));

    assert_eq!(
        parse_trajectory_xml(&compact).expect("decode compact"),
        parse_trajectory_xml(&indented).expect("decode indented"),
    );
}

#[test]
fn empty_tag_list_round_trips_as_empty() {
    let trajectory = Trajectory::new(
        "untagged",
        TrajectoryKind::Generated,
        TimingMode::Untimed,
        "arm",
        "gen",
        Schema::Joint {
            joint_names: vec!["j0".to_string()],
        },
        vec![],
    );
    let xml = trajectory_to_xml(&trajectory, WriteMode::Compact).expect("encode");
    assert!(xml.contains("<tags/>"), "document was {xml}");
    let decoded = parse_trajectory_xml(&xml).expect("decode");
    assert!(decoded.tags().is_empty());
    assert!(decoded.is_empty());
}

#[test]
fn timing_only_states_round_trip() {
    let trajectory = Trajectory::with_states(
        "degenerate",
        TrajectoryKind::Recorded,
        TimingMode::Timed,
        "arm",
        "probe",
        Schema::Joint {
            joint_names: vec!["j0".to_string(), "j1".to_string()],
        },
        vec![],
        vec![
            joint_sample(0, vec![]),
            joint_sample(1, vec![0.0, 1.0]),
        ],
    )
    .expect("degenerate states are valid");

    let xml = trajectory_to_xml(&trajectory, WriteMode::Indented).expect("encode");
    let decoded = parse_trajectory_xml(&xml).expect("decode");
    assert_eq!(decoded, trajectory);
    assert_eq!(decoded[0].dimension(), 0);
    assert_eq!(decoded[1].dimension(), 2);
}

#[test]
fn file_round_trip_through_a_temp_directory() {
    let trajectory = demo_joint_trajectory();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("demo.xtf");

    write_trajectory(&trajectory, &path, WriteMode::Indented).expect("write");
    let decoded = read_trajectory(&path).expect("read");
    assert_eq!(decoded, trajectory);
}

#[test]
fn reading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_trajectory(dir.path().join("absent.xtf")).expect_err("missing file");
    assert!(matches!(err, XtfError::Io(_)));
}
