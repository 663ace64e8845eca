//! Trajectory container: header metadata, a fixed schema, and its states.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::XtfError;
use crate::state::State;
use crate::tokens;

/// Dimension of a Cartesian pose sample: `[x, y, z, qx, qy, qz, qw]`.
pub const POSE_DIMENSION: usize = 7;

/// Whether state stamps carry meaningful timing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingMode {
    Timed,
    Untimed,
}

impl TimingMode {
    pub fn token(&self) -> &'static str {
        match self {
            TimingMode::Timed => "timed",
            TimingMode::Untimed => "untimed",
        }
    }

    /// Case-sensitive match against the `timing` attribute literals.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "timed" => Some(TimingMode::Timed),
            "untimed" => Some(TimingMode::Untimed),
            _ => None,
        }
    }
}

/// How the trajectory came to be: planned by a generator or sampled from a
/// running robot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryKind {
    Generated,
    Recorded,
}

impl TrajectoryKind {
    pub fn token(&self) -> &'static str {
        match self {
            TrajectoryKind::Generated => "generated",
            TrajectoryKind::Recorded => "recorded",
        }
    }

    /// Case-sensitive match against the `traj_type` attribute literals.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "generated" => Some(TrajectoryKind::Generated),
            "recorded" => Some(TrajectoryKind::Recorded),
            _ => None,
        }
    }
}

/// Space the per-state kinematic vectors live in, selected at construction
/// and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Schema {
    /// One value per named joint.
    Joint { joint_names: Vec<String> },
    /// A fixed 7-dof pose between two named reference frames.
    Pose {
        root_frame: String,
        target_frame: String,
    },
}

impl Schema {
    /// Dimension every non-empty state must have under this schema.
    pub fn expected_dimension(&self) -> usize {
        match self {
            Schema::Joint { joint_names } => joint_names.len(),
            Schema::Pose { .. } => POSE_DIMENSION,
        }
    }

    /// Canonical `data_type` attribute literal.
    pub fn data_type_token(&self) -> &'static str {
        match self {
            Schema::Joint { .. } => "joint",
            Schema::Pose { .. } => "pose",
        }
    }
}

/// An ordered sequence of [`State`]s plus header metadata.
///
/// The schema is fixed when the trajectory is built; every mutation that
/// adds states re-checks the schema's dimension rule first, and a rejected
/// state leaves the trajectory untouched. States with dimension zero are
/// degenerate timing-only samples and are always accepted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    uid: String,
    robot: String,
    generator: String,
    tags: Vec<String>,
    timing: TimingMode,
    kind: TrajectoryKind,
    schema: Schema,
    states: Vec<State>,
}

impl Trajectory {
    /// Header-only constructor; states are appended later through
    /// [`Trajectory::push`].
    pub fn new(
        uid: impl Into<String>,
        kind: TrajectoryKind,
        timing: TimingMode,
        robot: impl Into<String>,
        generator: impl Into<String>,
        schema: Schema,
        tags: Vec<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            robot: robot.into(),
            generator: generator.into(),
            tags,
            timing,
            kind,
            schema,
            states: Vec::new(),
        }
    }

    /// Bulk constructor: validates every supplied state against the schema
    /// before anything is stored. The first mismatch fails with the index of
    /// the offending state and nothing is constructed.
    #[allow(clippy::too_many_arguments)]
    pub fn with_states(
        uid: impl Into<String>,
        kind: TrajectoryKind,
        timing: TimingMode,
        robot: impl Into<String>,
        generator: impl Into<String>,
        schema: Schema,
        tags: Vec<String>,
        states: Vec<State>,
    ) -> Result<Self, XtfError> {
        let mut trajectory = Self::new(uid, kind, timing, robot, generator, schema, tags);
        for (index, state) in states.iter().enumerate() {
            if let Some(message) = trajectory.dimension_error(state) {
                return Err(XtfError::Validation(format!("state {index}: {message}")));
            }
        }
        trajectory.states = states;
        Ok(trajectory)
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn robot(&self) -> &str {
        &self.robot
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn timing(&self) -> TimingMode {
        self.timing
    }

    pub fn kind(&self) -> TrajectoryKind {
        self.kind
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Dimension required of every non-empty state.
    pub fn expected_dimension(&self) -> usize {
        self.schema.expected_dimension()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Append a state after validating it against the schema. On failure the
    /// trajectory is left unchanged.
    pub fn push(&mut self, state: State) -> Result<(), XtfError> {
        if let Some(message) = self.dimension_error(&state) {
            return Err(XtfError::Validation(message));
        }
        self.states.push(state);
        Ok(())
    }

    /// Bounds-checked indexed read.
    pub fn at(&self, index: usize) -> Result<&State, XtfError> {
        self.states.get(index).ok_or(XtfError::IndexOutOfRange {
            index,
            len: self.states.len(),
        })
    }

    /// Bounds-checked mutable read. The state's kinematic fields stay
    /// private, so this grants access to its extras only.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut State, XtfError> {
        let len = self.states.len();
        self.states
            .get_mut(index)
            .ok_or(XtfError::IndexOutOfRange { index, len })
    }

    fn dimension_error(&self, state: &State) -> Option<String> {
        let dimension = state.dimension();
        if dimension == 0 || dimension == self.schema.expected_dimension() {
            return None;
        }
        Some(match &self.schema {
            Schema::Joint { joint_names } => format!(
                "state dimension {dimension} does not match {} joint names",
                joint_names.len()
            ),
            Schema::Pose { .. } => format!(
                "pose state dimension {dimension} is not {POSE_DIMENSION} doubles [x, y, z, qx, qy, qz, qw]"
            ),
        })
    }
}

impl Index<usize> for Trajectory {
    type Output = State;

    fn index(&self, index: usize) -> &State {
        &self.states[index]
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TrajectoryKind::Generated => "Generated",
            TrajectoryKind::Recorded => "Recorded",
        };
        let space = match self.schema {
            Schema::Joint { .. } => "Joint",
            Schema::Pose { .. } => "Pose",
        };
        writeln!(f, "{kind} {space} Trajectory:")?;
        writeln!(f, "UID: {}", self.uid)?;
        match &self.schema {
            Schema::Joint { joint_names } => {
                writeln!(f, "Joint names: {}", tokens::join(joint_names.iter()))?;
            }
            Schema::Pose {
                root_frame,
                target_frame,
            } => {
                writeln!(f, "Root frame: {root_frame}")?;
                writeln!(f, "Target frame: {target_frame}")?;
            }
        }
        writeln!(f, "Robot: {}", self.robot)?;
        writeln!(f, "Generator: {}", self.generator)?;
        writeln!(f, "Timing: {}", self.timing.token())?;
        write!(f, "Tags: {}", tokens::join(self.tags.iter()))?;
        for state in &self.states {
            write!(f, "\n---\n{state}")?;
        }
        Ok(())
    }
}
