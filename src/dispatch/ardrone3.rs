//! Class decoders for the ARDrone3 project: flight state, piloting and
//! speed settings, wifi, pictures, and GPS home handling.

use serde::Serialize;

use super::{fault, DecodeResult, Decoded, HandlerFault};
use crate::commands::ardrone3::{network_state as net_cmd, picture_settings_state as pic_cmd};
use crate::commands::ardrone3::piloting_state as piloting_cmd;
use crate::decode::{parse_null_termed_string, FieldReader};
use crate::emitter::Emitter;
use crate::error::TelemetryError;
use crate::events;
use crate::types::NetworkFrame;

// Flight states map straight to their own event titles; they are a big
// enough deal to be separate events instead of one enum payload.
const FLYING_STATE_TITLES: &[&str] = &[
    events::LANDED,
    events::TAKINGOFF,
    events::HOVERING,
    events::FLYING,
    events::LANDING,
    events::EMERGENCY,
];

const ALERT_STATES: &[&str] =
    &["none", "user", "cut_out", "critical_battery", "low_battery", "too_much_angle"];

const NAVIGATE_HOME_STATES: &[&str] = &["available", "inProgress", "unavailable", "pending"];

const NAVIGATE_HOME_REASONS: &[&str] =
    &["userRequest", "connectionLost", "lowBattery", "finished", "stopped", "disabled", "enabled"];

#[derive(Serialize)]
struct AlertState {
    state: &'static str,
}

#[derive(Serialize)]
struct NavigateHomeState {
    state: &'static str,
    reason: &'static str,
}

#[derive(Serialize)]
struct Position {
    lat: f64,
    lon: f64,
    alt: f64,
}

#[derive(Serialize)]
struct Speed {
    #[serde(rename = "speedX")]
    speed_x: f64,
    #[serde(rename = "speedY")]
    speed_y: f64,
    #[serde(rename = "speedZ")]
    speed_z: f64,
}

#[derive(Serialize)]
struct Attitude {
    roll: f32,
    pitch: f32,
    yaw: f32,
}

#[derive(Serialize)]
struct AutoTakeoffMode {
    state: bool,
}

#[derive(Serialize)]
struct Altitude {
    altitude: f64,
}

/// Device state in the air: GPS position, attitude, speed, and the gross
/// flying state.
pub(super) fn piloting_state(e: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
    let mut fields = FieldReader::new(frame.payload());
    match command_id {
        piloting_cmd::FLAT_TRIM_CHANGED => {
            // No args. Very often.
            e.send_empty_telemetry(events::FLATTRIM).map_err(fault("FlatTrimChanged"))?;
        }
        piloting_cmd::FLYING_STATE_CHANGED => {
            let ctx = "FlyingStateChanged";
            let title = fields.read_enum(FLYING_STATE_TITLES).map_err(fault(ctx))?;
            e.send_empty_telemetry(title).map_err(fault(ctx))?;
        }
        piloting_cmd::ALERT_STATE_CHANGED => {
            let ctx = "AlertStateChanged";
            let state = fields.read_enum(ALERT_STATES).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::ALERTSTATE, &AlertState { state })
                .map_err(fault(ctx))?;
        }
        piloting_cmd::NAVIGATE_HOME_STATE_CHANGED => {
            let ctx = "NavigateHomeStateChanged";
            let state = fields.read_enum(NAVIGATE_HOME_STATES).map_err(fault(ctx))?;
            let reason = fields.read_enum(NAVIGATE_HOME_REASONS).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::NAVIGATEHOMESTATE, &NavigateHomeState {
                state,
                reason,
            })
            .map_err(fault(ctx))?;
        }
        piloting_cmd::POSITION_CHANGED => {
            let ctx = "PositionChanged";
            let record = Position {
                lat: fields.read_f64().map_err(fault(ctx))?,
                lon: fields.read_f64().map_err(fault(ctx))?,
                alt: fields.read_f64().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, events::GPS, &record).map_err(fault(ctx))?;
        }
        piloting_cmd::SPEED_CHANGED => {
            let ctx = "SpeedChanged";
            let record = Speed {
                speed_x: fields.read_f64().map_err(fault(ctx))?,
                speed_y: fields.read_f64().map_err(fault(ctx))?,
                speed_z: fields.read_f64().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, events::SPEED, &record).map_err(fault(ctx))?;
        }
        piloting_cmd::ATTITUDE_CHANGED => {
            let ctx = "AttitudeChanged";
            let record = Attitude {
                roll: fields.read_f32().map_err(fault(ctx))?,
                pitch: fields.read_f32().map_err(fault(ctx))?,
                yaw: fields.read_f32().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, events::ATTITUDE, &record).map_err(fault(ctx))?;
        }
        piloting_cmd::AUTO_TAKEOFF_MODE_CHANGED => {
            let ctx = "AutoTakeoffModeChanged";
            let state = fields.read_bool().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::AUTOTAKEOFFMODE, &AutoTakeoffMode { state })
                .map_err(fault(ctx))?;
        }
        piloting_cmd::ALTITUDE_CHANGED => {
            let ctx = "AltitudeChanged";
            let altitude = fields.read_f64().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::ALTITUDE, &Altitude { altitude })
                .map_err(fault(ctx))?;
        }
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct SettingRange {
    current: f32,
    min: f32,
    max: f32,
}

impl SettingRange {
    fn read(fields: &mut FieldReader<'_>, ctx: &'static str) -> Result<Self, HandlerFault> {
        Ok(Self {
            current: fields.read_f32().map_err(fault(ctx))?,
            min: fields.read_f32().map_err(fault(ctx))?,
            max: fields.read_f32().map_err(fault(ctx))?,
        })
    }
}

#[derive(Serialize)]
struct AbsolutControl {
    on: u8,
}

#[derive(Serialize)]
struct NoFlyOverMaxDistance {
    #[serde(rename = "shouldNotFlyOver")]
    should_not_fly_over: u8,
}

/// Maxima, minima, and boolean switches like "obey max height". Several
/// draft autonomous-flight settings are reserved but unimplemented in the
/// firmware; those report as errors rather than unknowns.
pub(super) fn piloting_settings_state(
    e: &Emitter,
    command_id: u8,
    frame: &NetworkFrame,
) -> DecodeResult {
    let mut fields = FieldReader::new(frame.payload());
    match command_id {
        0 => {
            let ctx = "MaxAltitudeChanged";
            let record = SettingRange::read(&mut fields, ctx)?;
            e.send_json_telemetry(frame, events::MAXALTITUDECHANGED, &record).map_err(fault(ctx))?;
        }
        1 => {
            let ctx = "MaxTiltChanged";
            let record = SettingRange::read(&mut fields, ctx)?;
            e.send_json_telemetry(frame, events::MAXTILTCHANGED, &record).map_err(fault(ctx))?;
        }
        2 => {
            let ctx = "AbsolutControlChanged";
            let on = fields.read_u8().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::ABSOLUTCONTROLCHANGED, &AbsolutControl { on })
                .map_err(fault(ctx))?;
        }
        3 => {
            let ctx = "MaxDistanceChanged";
            let record = SettingRange::read(&mut fields, ctx)?;
            e.send_json_telemetry(frame, events::MAXDISTANCECHANGED, &record).map_err(fault(ctx))?;
        }
        4 => {
            let ctx = "NoFlyOverMaxDistanceChanged";
            let should_not_fly_over = fields.read_u8().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::NOFLYOVERMAXDISTANCECHANGED, &NoFlyOverMaxDistance {
                should_not_fly_over,
            })
            .map_err(fault(ctx))?;
        }
        5 => {
            return Err(HandlerFault::new(
                "AutonomousFlightMaxHorizontalSpeed",
                TelemetryError::NotImplementedInFirmware,
            ));
        }
        6 => {
            return Err(HandlerFault::new(
                "AutonomousFlightMaxVerticalSpeed",
                TelemetryError::NotImplementedInFirmware,
            ));
        }
        7 => {
            return Err(HandlerFault::new(
                "AutonomousFlightMaxHorizontalAcceleration",
                TelemetryError::NotImplementedInFirmware,
            ));
        }
        8 => {
            return Err(HandlerFault::new(
                "AutonomousFlightMaxVerticalAcceleration",
                TelemetryError::NotImplementedInFirmware,
            ));
        }
        9 => {
            return Err(HandlerFault::new(
                "AutonomousFlightMaxRotationSpeed",
                TelemetryError::NotImplementedInFirmware,
            ));
        }
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct Present {
    present: u8,
}

/// Vertical/rotation speed envelopes and the hull/outdoor switches.
pub(super) fn speed_settings_state(
    e: &Emitter,
    command_id: u8,
    frame: &NetworkFrame,
) -> DecodeResult {
    let mut fields = FieldReader::new(frame.payload());
    match command_id {
        0 => {
            let ctx = "MaxVerticalSpeedChanged";
            let record = SettingRange::read(&mut fields, ctx)?;
            e.send_json_telemetry(frame, events::MAXVERTICALSPEEDCHANGED, &record)
                .map_err(fault(ctx))?;
        }
        1 => {
            let ctx = "MaxRotationSpeedChanged";
            let record = SettingRange::read(&mut fields, ctx)?;
            e.send_json_telemetry(frame, events::MAXROTATIONSPEEDCHANGED, &record)
                .map_err(fault(ctx))?;
        }
        2 => {
            let ctx = "HullProtectionChanged";
            let present = fields.read_u8().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::HULLPROTECTIONCHANGED, &Present { present })
                .map_err(fault(ctx))?;
        }
        3 => {
            let ctx = "OutdoorChanged";
            let present = fields.read_u8().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::OUTDOORCHANGED, &Present { present })
                .map_err(fault(ctx))?;
        }
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct WifiSelection {
    #[serde(rename = "type")]
    kind: &'static str,
    band: &'static str,
    channel: u8,
}

/// Feedback for wifi band/channel selection commands.
pub(super) fn network_settings_state(
    e: &Emitter,
    command_id: u8,
    frame: &NetworkFrame,
) -> DecodeResult {
    if command_id != 0 {
        return Ok(Decoded::NoHandler);
    }
    let ctx = "WifiSelectionChanged";
    let mut fields = FieldReader::new(frame.payload());
    let kind =
        fields.read_enum(&["auto_all", "auto_2_4ghz", "auto_5ghz", "all"]).map_err(fault(ctx))?;
    let band = fields.read_enum(&["2_4ghz", "5ghz", "all"]).map_err(fault(ctx))?;
    let channel = fields.read_u8().map_err(fault(ctx))?;
    e.send_json_telemetry(frame, events::NETWORKSETTINGSSTATE, &WifiSelection {
        kind,
        band,
        channel,
    })
    .map_err(fault(ctx))?;
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct WifiScanEntry {
    ssid: String,
    rssi: i16,
    band: &'static str,
    channel: u8,
}

#[derive(Serialize)]
struct WifiAuthChannel {
    band: &'static str,
    channel: u8,
    in_or_out: u8,
    #[serde(rename = "allowedOutside")]
    allowed_outside: bool,
    #[serde(rename = "allowedInside")]
    allowed_inside: bool,
}

/// Wifi scan results; one event per scanned network, each burst closed by
/// an end marker.
pub(super) fn network_state(e: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
    match command_id {
        net_cmd::WIFI_SCAN_LIST_CHANGED => {
            let ctx = "WifiScanListChanged";
            let (ssid, rest) = parse_null_termed_string(frame.payload()).map_err(fault(ctx))?;
            let mut fields = FieldReader::new(rest);
            let rssi = fields.read_i16().map_err(fault(ctx))?;
            let band = fields.read_enum(&["2_4ghz", "5ghz"]).map_err(fault(ctx))?;
            let channel = fields.read_u8().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::WIFISCANLISTCHANGED, &WifiScanEntry {
                ssid,
                rssi,
                band,
                channel,
            })
            .map_err(fault(ctx))?;
        }
        net_cmd::ALL_WIFI_SCAN_CHANGED => {
            e.send_empty_telemetry(events::ALLWIFISCANCHANGED).map_err(fault("AllWifiScanChanged"))?;
        }
        net_cmd::WIFI_AUTH_CHANNEL_LIST_CHANGED => {
            let ctx = "WifiAuthChannelListChanged";
            let mut fields = FieldReader::new(frame.payload());
            let band = fields.read_enum(&["2_4ghz", "5ghz"]).map_err(fault(ctx))?;
            let channel = fields.read_u8().map_err(fault(ctx))?;
            let in_or_out = fields.read_u8().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::WIFIAUTHCHANNELLISTCHANGED, &WifiAuthChannel {
                band,
                channel,
                in_or_out,
                allowed_outside: (in_or_out & 1) != 0,
                allowed_inside: (in_or_out & 2) != 0,
            })
            .map_err(fault(ctx))?;
        }
        net_cmd::ALL_WIFI_AUTH_CHANNEL_CHANGED => {
            e.send_empty_telemetry(events::ALLWIFIAUTHCHANNELCHANGED)
                .map_err(fault("AllWifiAuthChannelChanged"))?;
        }
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct PictureFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ValueRange {
    value: f32,
    min: f32,
    max: f32,
}

#[derive(Serialize)]
struct TimeLapse {
    enabled: bool,
    interval: f32,
    #[serde(rename = "minInterval")]
    min_interval: f32,
    #[serde(rename = "maxInterval")]
    max_interval: f32,
}

#[derive(Serialize)]
struct VideoAutoRecord {
    enabled: bool,
    mass_storage_id: u8,
}

/// Confirmations of user-set camera parameters.
pub(super) fn picture_settings_state(
    e: &Emitter,
    command_id: u8,
    frame: &NetworkFrame,
) -> DecodeResult {
    let mut fields = FieldReader::new(frame.payload());
    match command_id {
        pic_cmd::PICTURE_FORMAT_CHANGED => {
            let ctx = "PictureFormatChanged";
            let kind = fields.read_enum(&["raw", "jpeg", "snapshot"]).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::PICTUREFORMATCHANGED, &PictureFormat { kind })
                .map_err(fault(ctx))?;
        }
        pic_cmd::AUTO_WHITE_BALANCE_CHANGED => {
            let ctx = "AutoWhiteBalanceChanged";
            let kind = fields
                .read_enum(&["auto", "tungsten", "daylight", "cloudy", "cool_white"])
                .map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::AUTOWHITEBALANCECHANGED, &PictureFormat { kind })
                .map_err(fault(ctx))?;
        }
        pic_cmd::EXPOSITION_CHANGED | pic_cmd::SATURATION_CHANGED => {
            // Identical shape except for the dispatch title.
            let (title, ctx) = if command_id == pic_cmd::EXPOSITION_CHANGED {
                (events::EXPOSITIONCHANGED, "ExpositionChanged")
            } else {
                (events::SATURATIONCHANGED, "SaturationChanged")
            };
            let record = ValueRange {
                value: fields.read_f32().map_err(fault(ctx))?,
                min: fields.read_f32().map_err(fault(ctx))?,
                max: fields.read_f32().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, title, &record).map_err(fault(ctx))?;
        }
        pic_cmd::TIMELAPSE_CHANGED => {
            let ctx = "TimeLapseChanged";
            let record = TimeLapse {
                enabled: fields.read_bool().map_err(fault(ctx))?,
                interval: fields.read_f32().map_err(fault(ctx))?,
                min_interval: fields.read_f32().map_err(fault(ctx))?,
                max_interval: fields.read_f32().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, events::TIMELAPSECHANGED, &record).map_err(fault(ctx))?;
        }
        pic_cmd::VIDEO_AUTORECORD_CHANGED => {
            let ctx = "VideoAutoRecordChanged";
            let record = VideoAutoRecord {
                enabled: fields.read_bool().map_err(fault(ctx))?,
                mass_storage_id: fields.read_u8().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, events::VIDEOAUTORECORDCHANGED, &record)
                .map_err(fault(ctx))?;
        }
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct HomePosition {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

#[derive(Serialize)]
struct GpsFix {
    fixed: bool,
}

#[derive(Serialize)]
struct GpsUpdateState {
    state: &'static str,
}

#[derive(Serialize)]
struct HomeType {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ReturnHomeDelay {
    delay: u16,
}

/// Return-home position and GPS status.
pub(super) fn gps_settings_state(
    e: &Emitter,
    command_id: u8,
    frame: &NetworkFrame,
) -> DecodeResult {
    let mut fields = FieldReader::new(frame.payload());
    match command_id {
        0 | 1 => {
            let (title, ctx) = if command_id == 0 {
                (events::SETHOMECHANGED, "SetHomeChanged")
            } else {
                (events::RESETHOMECHANGED, "ResetHomeChanged")
            };
            let record = HomePosition {
                latitude: fields.read_f64().map_err(fault(ctx))?,
                longitude: fields.read_f64().map_err(fault(ctx))?,
                altitude: fields.read_f64().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, title, &record).map_err(fault(ctx))?;
        }
        2 => {
            let ctx = "GPSFixStateChanged";
            let fixed = fields.read_bool().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::GPSFIXSTATECHANGED, &GpsFix { fixed })
                .map_err(fault(ctx))?;
        }
        3 => {
            let ctx = "GPSUpdateStateChanged";
            let state =
                fields.read_enum(&["updated", "inProgress", "failed"]).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::GPSUPDATESTATECHANGED, &GpsUpdateState { state })
                .map_err(fault(ctx))?;
        }
        4 => {
            // User preference; the drone's effective home type may differ.
            let ctx = "HomeTypeChanged";
            let kind = fields.read_enum(&["TAKEOFF", "PILOT"]).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::HOMETYPECHANGED, &HomeType { kind })
                .map_err(fault(ctx))?;
        }
        5 => {
            let ctx = "ReturnHomeDelayChanged";
            let delay = fields.read_u16().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::RETURNHOMEDELAYCHANGED, &ReturnHomeDelay { delay })
                .map_err(fault(ctx))?;
        }
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct CameraOrientation {
    tilt: i8,
    pan: i8,
}

/// Current camera orientation.
pub(super) fn camera_state(e: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
    if command_id != 0 {
        return Ok(Decoded::NoHandler);
    }
    let ctx = "CameraState";
    let mut fields = FieldReader::new(frame.payload());
    let record = CameraOrientation {
        tilt: fields.read_i8().map_err(fault(ctx))?,
        pan: fields.read_i8().map_err(fault(ctx))?,
    };
    e.send_json_telemetry(frame, events::CAMERASTATE, &record).map_err(fault(ctx))?;
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct OrientationEcho {
    tilt: u8,
    pan: u8,
}

/// The Camera class carries instructions *to* the drone, yet the device has
/// been seen sending them back. Decode defensively instead of dropping them
/// on the floor.
pub(super) fn camera(e: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
    if command_id != 0 {
        return Ok(Decoded::NoHandler);
    }
    let ctx = "Orientation";
    let mut fields = FieldReader::new(frame.payload());
    let record = OrientationEcho {
        tilt: fields.read_u8().map_err(fault(ctx))?,
        pan: fields.read_u8().map_err(fault(ctx))?,
    };
    e.send_json_telemetry(frame, events::ORIENTATION, &record).map_err(fault(ctx))?;
    Ok(Decoded::Matched)
}
