//! Two-level dispatch table: project byte → class byte → decoder.
//!
//! The table is populated once when the core is constructed and read-only
//! afterwards, so worker tasks share it through an `Arc` without further
//! synchronization. Decoders are plain function pointers; every supported
//! (project, class) pair gets one entry, and each entry carries
//! human-readable names used only in diagnostic comments.

mod ardrone3;
mod common;

use std::collections::HashMap;

use crate::commands::project;
use crate::emitter::Emitter;
use crate::error::TelemetryError;
use crate::types::NetworkFrame;

/// Outcome of a class decoder that did not fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// The command id was recognized and its event(s) emitted.
    Matched,
    /// The class has no handler for this command id.
    NoHandler,
}

/// A handler that recognized its command id but failed part-way through.
///
/// `context` names the command being decoded (e.g. `"AttitudeChanged"`) so
/// the resulting error event can say which handler gave up.
#[derive(Debug)]
pub struct HandlerFault {
    pub context: &'static str,
    pub source: TelemetryError,
}

impl HandlerFault {
    pub fn new(context: &'static str, source: TelemetryError) -> Self {
        Self { context, source }
    }
}

/// Three-way decoder result: matched, no handler, or fault-with-context.
pub type DecodeResult = Result<Decoded, HandlerFault>;

/// Adapter for the pervasive `.map_err(fault("SomeCommand"))?` pattern in
/// the class decoders.
pub(crate) fn fault(context: &'static str) -> impl FnOnce(TelemetryError) -> HandlerFault {
    move |source| HandlerFault::new(context, source)
}

type ClassDecoder = fn(&Emitter, u8, &NetworkFrame) -> DecodeResult;

/// One (project, class) dispatch entry.
#[derive(Clone, Copy)]
pub struct ClassEntry {
    /// Human-readable project name, diagnostics only.
    pub project_name: &'static str,
    /// Human-readable class name, diagnostics only.
    pub class_name: &'static str,
    decoder: ClassDecoder,
}

impl ClassEntry {
    /// Run the class decoder for one frame.
    pub fn decode(&self, emitter: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
        (self.decoder)(emitter, command_id, frame)
    }
}

/// All classes of one project.
pub struct ProjectEntry {
    /// Human-readable project name, diagnostics only.
    pub name: &'static str,
    classes: HashMap<u8, ClassEntry>,
}

impl ProjectEntry {
    /// Look up the decoder entry for a class byte.
    pub fn class(&self, class: u8) -> Option<&ClassEntry> {
        self.classes.get(&class)
    }
}

/// The full project → class → decoder mapping.
pub struct DispatchTable {
    projects: HashMap<u8, ProjectEntry>,
}

impl DispatchTable {
    /// Build the table with every supported class registered.
    pub fn new() -> Self {
        let mut projects = HashMap::new();
        projects.insert(project::COMMON, common_project());
        projects.insert(project::ARDRONE3, ardrone3_project());
        Self { projects }
    }

    /// Look up a project byte.
    pub fn project(&self, project: u8) -> Option<&ProjectEntry> {
        self.projects.get(&project)
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

fn class_entry(
    project_name: &'static str,
    class_name: &'static str,
    decoder: ClassDecoder,
) -> ClassEntry {
    ClassEntry { project_name, class_name, decoder }
}

fn common_project() -> ProjectEntry {
    use crate::commands::common as class;

    const NAME: &str = "Common";
    let mut classes = HashMap::new();
    classes.insert(class::NETWORK, class_entry(NAME, "Network", common::network));
    classes.insert(class::SETTINGS_STATE, class_entry(NAME, "SettingsState", common::settings_state));
    classes.insert(class::COMMON_STATE, class_entry(NAME, "CommonState", common::common_state));
    classes.insert(class::MAVLINK_STATE, class_entry(NAME, "MavlinkState", common::mavlink_state));
    classes.insert(
        class::CAMERA_SETTINGS_STATE,
        class_entry(NAME, "CameraSettingsState", common::camera_settings_state),
    );
    classes.insert(
        class::FLIGHT_PLAN_STATE,
        class_entry(NAME, "FlightPlanState", common::flight_plan_state),
    );
    classes.insert(
        class::ARLIBS_VERSIONS_STATE,
        class_entry(NAME, "ARLibsVersionsState", common::arlibs_versions_state),
    );
    classes.insert(
        class::FLIGHT_PLAN_EVENT,
        class_entry(NAME, "FlightPlanEvent", common::flight_plan_event),
    );
    ProjectEntry { name: NAME, classes }
}

fn ardrone3_project() -> ProjectEntry {
    use crate::commands::ardrone3 as class;

    const NAME: &str = "ARDrone3";
    let mut classes = HashMap::new();
    classes.insert(class::CAMERA, class_entry(NAME, "Camera", ardrone3::camera));
    classes.insert(
        class::PILOTING_STATE,
        class_entry(NAME, "PilotingState", ardrone3::piloting_state),
    );
    classes.insert(
        class::PILOTING_SETTINGS_STATE,
        class_entry(NAME, "PilotingSettingsState", ardrone3::piloting_settings_state),
    );
    classes.insert(
        class::NETWORK_SETTINGS_STATE,
        class_entry(NAME, "NetworkSettingsState", ardrone3::network_settings_state),
    );
    classes.insert(
        class::SPEED_SETTINGS_STATE,
        class_entry(NAME, "SpeedSettingsState", ardrone3::speed_settings_state),
    );
    classes.insert(class::NETWORK_STATE, class_entry(NAME, "NetworkState", ardrone3::network_state));
    classes.insert(
        class::PICTURE_SETTINGS_STATE,
        class_entry(NAME, "PictureSettingsState", ardrone3::picture_settings_state),
    );
    classes.insert(
        class::GPS_SETTINGS_STATE,
        class_entry(NAME, "GPSSettingsState", ardrone3::gps_settings_state),
    );
    classes.insert(class::CAMERA_STATE, class_entry(NAME, "CameraState", ardrone3::camera_state));
    ProjectEntry { name: NAME, classes }
}
