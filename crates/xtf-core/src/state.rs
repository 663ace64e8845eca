//! One sampled trajectory state: desired/actual kinematics plus typed extras.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::XtfError;
use crate::tokens;
use crate::value::Value;

/// Wall-clock stamp of a state, split into seconds and nanoseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub secs: u64,
    pub nsecs: u64,
}

impl Timestamp {
    pub fn new(secs: u64, nsecs: u64) -> Self {
        Self { secs, nsecs }
    }
}

/// A single trajectory sample.
///
/// The six kinematic sequences are independently optional, but every
/// non-empty one must share one length. That shared length is the state's
/// dimension; a state with all six empty has dimension zero and carries
/// timing and extras only.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct State {
    position_desired: Vec<f64>,
    velocity_desired: Vec<f64>,
    acceleration_desired: Vec<f64>,
    position_actual: Vec<f64>,
    velocity_actual: Vec<f64>,
    acceleration_actual: Vec<f64>,
    sequence: i64,
    stamp: Timestamp,
    dimension: usize,
    /// Named metadata attached to this state. Keys are unique; order is not
    /// meaningful.
    pub extras: HashMap<String, Value>,
}

impl State {
    /// Build a state from its six kinematic sequences.
    ///
    /// Scans the sequences in a fixed order (desired position, velocity,
    /// acceleration, then the actual three); the first non-empty one fixes
    /// the dimension, and every later non-empty one must match it.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position_desired: Vec<f64>,
        velocity_desired: Vec<f64>,
        acceleration_desired: Vec<f64>,
        position_actual: Vec<f64>,
        velocity_actual: Vec<f64>,
        acceleration_actual: Vec<f64>,
        sequence: i64,
        stamp: Timestamp,
    ) -> Result<Self, XtfError> {
        let mut dimension = 0usize;
        for sequence_field in [
            &position_desired,
            &velocity_desired,
            &acceleration_desired,
            &position_actual,
            &velocity_actual,
            &acceleration_actual,
        ] {
            if sequence_field.is_empty() {
                continue;
            }
            if dimension == 0 {
                dimension = sequence_field.len();
            } else if sequence_field.len() != dimension {
                return Err(XtfError::Validation(
                    "inconsistent trajectory state fields".to_string(),
                ));
            }
        }
        Ok(Self {
            position_desired,
            velocity_desired,
            acceleration_desired,
            position_actual,
            velocity_actual,
            acceleration_actual,
            sequence,
            stamp,
            dimension,
            extras: HashMap::new(),
        })
    }

    pub fn position_desired(&self) -> &[f64] {
        &self.position_desired
    }

    pub fn velocity_desired(&self) -> &[f64] {
        &self.velocity_desired
    }

    pub fn acceleration_desired(&self) -> &[f64] {
        &self.acceleration_desired
    }

    pub fn position_actual(&self) -> &[f64] {
        &self.position_actual
    }

    pub fn velocity_actual(&self) -> &[f64] {
        &self.velocity_actual
    }

    pub fn acceleration_actual(&self) -> &[f64] {
        &self.acceleration_actual
    }

    pub fn sequence(&self) -> i64 {
        self.sequence
    }

    pub fn stamp(&self) -> Timestamp {
        self.stamp
    }

    /// Shared length of the non-empty kinematic sequences, zero if all six
    /// are empty.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Names of the attached extras, each exactly once, in no defined order.
    pub fn extra_names(&self) -> Vec<&str> {
        self.extras.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "State #{} at:", self.sequence)?;
        writeln!(f, "secs: {}", self.stamp.secs)?;
        writeln!(f, "nsecs: {}", self.stamp.nsecs)?;
        writeln!(f, "desired:")?;
        writeln!(f, "position: {}", tokens::join(self.position_desired.iter()))?;
        writeln!(f, "velocity: {}", tokens::join(self.velocity_desired.iter()))?;
        writeln!(
            f,
            "acceleration: {}",
            tokens::join(self.acceleration_desired.iter())
        )?;
        writeln!(f, "actual:")?;
        writeln!(f, "position: {}", tokens::join(self.position_actual.iter()))?;
        writeln!(f, "velocity: {}", tokens::join(self.velocity_actual.iter()))?;
        writeln!(
            f,
            "acceleration: {}",
            tokens::join(self.acceleration_actual.iter())
        )?;
        write!(f, "extras:")?;
        for (name, value) in &self.extras {
            write!(f, "\nkey: {name} {value}")?;
        }
        Ok(())
    }
}
