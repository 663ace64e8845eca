//! xtf-core: typed data model and XML codec for the XTF trajectory
//! exchange format.
//!
//! XTF stores robot motion data as an XML document: per-state desired and
//! actual kinematics in either joint space or Cartesian pose space, with
//! typed extensible metadata. This crate provides the data model
//! ([`Value`], [`State`], [`Trajectory`]) and the codec that round-trips it
//! through the documented grammar.
//!
//! # Example
//!
//! ```rust
//! use xtf_core::{
//!     parse_trajectory_xml, trajectory_to_xml, Schema, State, Timestamp, TimingMode,
//!     Trajectory, TrajectoryKind, WriteMode,
//! };
//!
//! let mut trajectory = Trajectory::new(
//!     "demo-1",
//!     TrajectoryKind::Generated,
//!     TimingMode::Untimed,
//!     "arm",
//!     "planner",
//!     Schema::Joint {
//!         joint_names: vec!["j0".to_string(), "j1".to_string()],
//!     },
//!     vec!["demo".to_string()],
//! );
//! let state = State::new(
//!     vec![0.0, 1.0],
//!     vec![],
//!     vec![],
//!     vec![],
//!     vec![],
//!     vec![],
//!     0,
//!     Timestamp::new(0, 0),
//! )
//! .expect("consistent state");
//! trajectory.push(state).expect("dimension matches schema");
//!
//! let xml = trajectory_to_xml(&trajectory, WriteMode::Indented).expect("encode");
//! let decoded = parse_trajectory_xml(&xml).expect("decode");
//! assert_eq!(decoded, trajectory);
//! ```

pub mod codec;
pub mod error;
pub mod state;
pub mod tokens;
pub mod trajectory;
pub mod tree;
pub mod value;

pub use codec::{
    decode_element, encode_element, parse_trajectory_xml, read_trajectory, trajectory_to_xml,
    write_trajectory,
};
pub use error::{Result, XtfError};
pub use state::{State, Timestamp};
pub use trajectory::{Schema, TimingMode, Trajectory, TrajectoryKind, POSE_DIMENSION};
pub use tree::{Element, WriteMode};
pub use value::{Value, ValueKind};
