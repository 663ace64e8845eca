//! Parser and exporter between [`Trajectory`] values and XTF documents.
//!
//! The grammar: a `trajectory` root with a `uid` attribute; an `info` child
//! with `robot`/`generator` attributes, a `type` child carrying the
//! `timing`/`traj_type`/`data_type` literals and the schema fields
//! (`joint_names`, or `root_frame` plus `target_frame`), and a `tags` child;
//! then a `states` child with one `state` element per sample. Each `state`
//! has `sequence`/`secs`/`nsecs` attributes, `desired` and `actual` children
//! holding `position`/`velocity`/`acceleration` comma lists, and any number
//! of `extra` elements with `name`/`type`/`value` attributes.
//!
//! Decoding is all-or-nothing: the first structural failure aborts with
//! [`XtfError::Format`] and a schema/dimension mismatch aborts with
//! [`XtfError::Validation`]; no partial trajectory is ever returned.

use std::path::Path;
use std::str::FromStr;

use hashbrown::HashMap;
use log::debug;

use crate::error::XtfError;
use crate::state::{State, Timestamp};
use crate::tokens;
use crate::trajectory::{Schema, TimingMode, Trajectory, TrajectoryKind};
use crate::tree::{Element, WriteMode};
use crate::value::{Value, ValueKind};

/// Decode a parsed XTF document into a validated trajectory.
///
/// State list positions follow document order; the `sequence` attribute is
/// carried through as data but does not reorder anything.
pub fn decode_element(root: &Element) -> Result<Trajectory, XtfError> {
    if root.tag() != "trajectory" {
        return Err(XtfError::Format(format!(
            "root element is '{}', expected 'trajectory'",
            root.tag()
        )));
    }
    let uid = tokens::clean(
        root.attribute("uid")
            .ok_or_else(|| missing("'uid' attribute on trajectory element"))?,
    );
    if uid.is_empty() {
        return Err(XtfError::Format(
            "'uid' attribute on trajectory element is blank".to_string(),
        ));
    }

    let info = root
        .child("info")
        .ok_or_else(|| missing("'info' element"))?;
    let robot = tokens::clean(
        info.attribute("robot")
            .ok_or_else(|| missing("'robot' attribute on info element"))?,
    );
    let generator = tokens::clean(
        info.attribute("generator")
            .ok_or_else(|| missing("'generator' attribute on info element"))?,
    );

    let type_element = info
        .child("type")
        .ok_or_else(|| missing("'type' element"))?;
    let timing_token = required_attribute(type_element, "timing", "type")?;
    let timing = TimingMode::from_token(&timing_token)
        .ok_or_else(|| XtfError::Format(format!("invalid timing type '{timing_token}'")))?;
    let kind_token = required_attribute(type_element, "traj_type", "type")?;
    let kind = TrajectoryKind::from_token(&kind_token)
        .ok_or_else(|| XtfError::Format(format!("invalid trajectory type '{kind_token}'")))?;
    let data_token = required_attribute(type_element, "data_type", "type")?;
    let schema = match data_token.as_str() {
        "joint" => {
            let names_element = type_element
                .child("joint_names")
                .ok_or_else(|| missing("'joint_names' element for joint data"))?;
            let joint_names = tokens::split(names_element.text());
            if joint_names.is_empty() {
                return Err(XtfError::Format(
                    "'joint_names' element is blank".to_string(),
                ));
            }
            Schema::Joint { joint_names }
        }
        "pose" => Schema::Pose {
            root_frame: required_text(type_element, "root_frame")?,
            target_frame: required_text(type_element, "target_frame")?,
        },
        other => {
            return Err(XtfError::Format(format!(
                "invalid trajectory data type '{other}'"
            )))
        }
    };

    // An absent or blank tags element is tolerated and reads as "no tags".
    let tags = match info.child("tags") {
        Some(tags_element) => tokens::split(tags_element.text()),
        None => {
            debug!("trajectory '{uid}' has no tags element");
            Vec::new()
        }
    };

    let states_element = root
        .child("states")
        .ok_or_else(|| missing("'states' element"))?;
    let mut states = Vec::new();
    for state_element in states_element.children("state") {
        states.push(decode_state(state_element)?);
    }

    let trajectory =
        Trajectory::with_states(uid, kind, timing, robot, generator, schema, tags, states)?;
    debug!(
        "decoded {} trajectory '{}' with {} states",
        trajectory.schema().data_type_token(),
        trajectory.uid(),
        trajectory.len()
    );
    Ok(trajectory)
}

/// Parse XTF document text.
pub fn parse_trajectory_xml(xml: &str) -> Result<Trajectory, XtfError> {
    decode_element(&Element::parse_document(xml)?)
}

/// Read and decode an XTF file.
pub fn read_trajectory(path: impl AsRef<Path>) -> Result<Trajectory, XtfError> {
    decode_element(&Element::read_from_path(path)?)
}

/// Build the XML document tree for a trajectory.
pub fn encode_element(trajectory: &Trajectory) -> Element {
    let mut root = Element::new("trajectory");
    root.set_attribute("uid", trajectory.uid());

    let mut info = Element::new("info");
    info.set_attribute("robot", trajectory.robot());
    info.set_attribute("generator", trajectory.generator());

    let mut type_element = Element::new("type");
    type_element.set_attribute("traj_type", trajectory.kind().token());
    type_element.set_attribute("timing", trajectory.timing().token());
    type_element.set_attribute("data_type", trajectory.schema().data_type_token());
    match trajectory.schema() {
        Schema::Joint { joint_names } => {
            let mut names = Element::new("joint_names");
            names.set_text(tokens::join(joint_names.iter()));
            type_element.push_child(names);
        }
        Schema::Pose {
            root_frame,
            target_frame,
        } => {
            let mut frame = Element::new("root_frame");
            frame.set_text(root_frame.clone());
            type_element.push_child(frame);
            let mut frame = Element::new("target_frame");
            frame.set_text(target_frame.clone());
            type_element.push_child(frame);
        }
    }
    info.push_child(type_element);

    // The tags element is always present, even when empty.
    let mut tags = Element::new("tags");
    tags.set_text(tokens::join(trajectory.tags().iter()));
    info.push_child(tags);
    root.push_child(info);

    let mut states = Element::new("states");
    states.set_attribute("length", trajectory.len().to_string());
    for state in trajectory.states() {
        states.push_child(encode_state(state));
    }
    root.push_child(states);
    root
}

/// Serialize a trajectory to XTF document text.
pub fn trajectory_to_xml(trajectory: &Trajectory, mode: WriteMode) -> Result<String, XtfError> {
    encode_element(trajectory).to_document_string(mode)
}

/// Encode and write an XTF file.
pub fn write_trajectory(
    trajectory: &Trajectory,
    path: impl AsRef<Path>,
    mode: WriteMode,
) -> Result<(), XtfError> {
    encode_element(trajectory).write_to_path(path, mode)
}

fn missing(what: &str) -> XtfError {
    XtfError::Format(format!("missing {what}"))
}

fn required_attribute(element: &Element, name: &str, owner: &str) -> Result<String, XtfError> {
    Ok(tokens::clean(element.attribute(name).ok_or_else(|| {
        missing(&format!("'{name}' attribute on {owner} element"))
    })?))
}

fn required_text(parent: &Element, tag: &str) -> Result<String, XtfError> {
    let element = parent
        .child(tag)
        .ok_or_else(|| missing(&format!("'{tag}' element")))?;
    let text = tokens::clean(element.text());
    if text.is_empty() {
        return Err(XtfError::Format(format!("'{tag}' element is blank")));
    }
    Ok(text)
}

fn decode_state(element: &Element) -> Result<State, XtfError> {
    let sequence: i64 = required_integer(element, "sequence")?;
    let secs: u64 = required_integer(element, "secs")?;
    let nsecs: u64 = required_integer(element, "nsecs")?;

    let [position_desired, velocity_desired, acceleration_desired] =
        kinematic_fields(element.child("desired"))?;
    let [position_actual, velocity_actual, acceleration_actual] =
        kinematic_fields(element.child("actual"))?;

    let mut extras = HashMap::new();
    for extra_element in element.children("extra") {
        let (name, value) = decode_extra(extra_element)?;
        extras.insert(name, value);
    }

    let mut state = State::new(
        position_desired,
        velocity_desired,
        acceleration_desired,
        position_actual,
        velocity_actual,
        acceleration_actual,
        sequence,
        Timestamp::new(secs, nsecs),
    )?;
    state.extras = extras;
    Ok(state)
}

fn required_integer<T: FromStr>(element: &Element, name: &str) -> Result<T, XtfError> {
    let raw = required_attribute(element, name, "state")?;
    raw.parse::<T>()
        .map_err(|_| XtfError::Format(format!("invalid '{name}' attribute '{raw}'")))
}

/// Read position/velocity/acceleration under a `desired`/`actual` node.
/// An absent container, absent field, or blank field yields an empty
/// sequence for that field only.
fn kinematic_fields(parent: Option<&Element>) -> Result<[Vec<f64>; 3], XtfError> {
    let mut fields: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    let Some(parent) = parent else {
        return Ok(fields);
    };
    for (slot, tag) in fields
        .iter_mut()
        .zip(["position", "velocity", "acceleration"])
    {
        if let Some(element) = parent.child(tag) {
            *slot = tokens::parse_doubles(element.text())?;
        }
    }
    Ok(fields)
}

fn decode_extra(element: &Element) -> Result<(String, Value), XtfError> {
    let name = element
        .attribute("name")
        .ok_or_else(|| missing("'name' attribute on extra element"))?
        .to_string();
    let type_token = element
        .attribute("type")
        .ok_or_else(|| missing("'type' attribute on extra element"))?;
    let raw = element
        .attribute("value")
        .ok_or_else(|| missing("'value' attribute on extra element"))?;
    let kind = ValueKind::from_token(type_token)
        .ok_or_else(|| XtfError::Format(format!("invalid extra type '{type_token}'")))?;
    let value = match kind {
        ValueKind::Boolean => Value::Boolean(tokens::parse_bool(&tokens::clean(raw))),
        ValueKind::Integer => {
            let cleaned = tokens::clean(raw);
            Value::Integer(cleaned.parse::<i64>().map_err(|_| {
                XtfError::Format(format!("invalid integer extra value '{cleaned}'"))
            })?)
        }
        ValueKind::Double => {
            let cleaned = tokens::clean(raw);
            Value::Double(cleaned.parse::<f64>().map_err(|_| {
                XtfError::Format(format!("invalid double extra value '{cleaned}'"))
            })?)
        }
        ValueKind::String => Value::String(raw.to_string()),
        ValueKind::BooleanList => Value::BooleanList(tokens::parse_bools(raw)),
        ValueKind::IntegerList => Value::IntegerList(tokens::parse_integers(raw)?),
        ValueKind::DoubleList => Value::DoubleList(tokens::parse_doubles(raw)?),
        ValueKind::StringList => Value::StringList(tokens::split(raw)),
    };
    Ok((name, value))
}

fn encode_state(state: &State) -> Element {
    let mut element = Element::new("state");
    element.set_attribute("sequence", state.sequence().to_string());
    element.set_attribute("secs", state.stamp().secs.to_string());
    element.set_attribute("nsecs", state.stamp().nsecs.to_string());

    let mut desired = Element::new("desired");
    push_field(&mut desired, "position", state.position_desired());
    push_field(&mut desired, "velocity", state.velocity_desired());
    push_field(&mut desired, "acceleration", state.acceleration_desired());
    element.push_child(desired);

    let mut actual = Element::new("actual");
    push_field(&mut actual, "position", state.position_actual());
    push_field(&mut actual, "velocity", state.velocity_actual());
    push_field(&mut actual, "acceleration", state.acceleration_actual());
    element.push_child(actual);

    // Sorted by name so output is deterministic.
    let mut extras: Vec<(&str, &Value)> = state
        .extras
        .iter()
        .map(|(name, value)| (name.as_str(), value))
        .collect();
    extras.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in extras {
        let mut extra = Element::new("extra");
        extra.set_attribute("name", name);
        extra.set_attribute("type", value.type_token());
        extra.set_attribute("value", value.rendered());
        element.push_child(extra);
    }
    element
}

fn push_field(parent: &mut Element, tag: &str, values: &[f64]) {
    let mut field = Element::new(tag);
    field.set_text(tokens::join(values.iter()));
    parent.push_child(field);
}
