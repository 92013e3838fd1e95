//! Class decoders for the Common project: device-internal state like
//! settings, battery level, storage, date/time, and library versions.

use serde::Serialize;

use super::{fault, DecodeResult, Decoded};
use crate::commands::common::common_state as cmd;
use crate::decode::{decode_enum, parse_null_termed_string, FieldReader};
use crate::emitter::Emitter;
use crate::events;
use crate::types::NetworkFrame;

const SENSOR_NAMES: &[&str] =
    &["IMU", "barometer", "ultrasound", "GPS", "magnetometer", "vertical_camera"];

// Models from the shared product table; mostly irrelevant to a Bebop but
// the command lives in Common.
const PRODUCT_MODELS: &[&str] = &[
    "RS_TRAVIS", "RS_MARS", "RS_SWAT", "RS_MCLANE", "RS_BLAZE", "RS_ORAK", "RS_NEWZ", "JS_DIESEL",
    "JS_BUZZ", "JS_MAX", "JS_JETT", "JS_TUKTUK",
];

#[derive(Serialize)]
struct Battery {
    battery: u8,
}

#[derive(Serialize)]
struct MassStorage {
    mass_storage_id: u8,
    name: String,
}

#[derive(Serialize)]
struct MassStorageInfo {
    mass_storage_id: u8,
    size: u32,
    used_size: u32,
    plugged: u8,
    full: u8,
    internal: u8,
}

#[derive(Serialize)]
struct CurrentDate {
    date: String,
}

#[derive(Serialize)]
struct CurrentTime {
    time: String,
}

#[derive(Serialize)]
struct MassStorageRemaining {
    free_space: u32,
    rec_time: u16,
    photo_remaining: u32,
}

#[derive(Serialize)]
struct WifiSignal {
    rssi: i16,
}

#[derive(Serialize)]
struct SensorState {
    #[serde(rename = "sensorName")]
    sensor_name: &'static str,
    #[serde(rename = "sensorState")]
    sensor_state: bool,
}

#[derive(Serialize)]
struct DroneModel {
    model: &'static str,
}

#[derive(Serialize)]
struct CountryCodes {
    #[serde(rename = "countryCodes")]
    country_codes: String,
}

/// Internal states: settings, battery level, storage, date/time.
pub(super) fn common_state(e: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
    let mut fields = FieldReader::new(frame.payload());
    match command_id {
        cmd::ALL_STATES_CHANGED => {
            // Burst marker after a settings dump; useful to subscribers as a
            // sync point even though it carries nothing.
            e.send_empty_telemetry(events::ALLSTATESCHANGED).map_err(fault("AllStatesChanged"))?;
        }
        cmd::BATTERY_STATE_CHANGED => {
            // Percentage acc. to docs, should be 0-100.
            let ctx = "BatteryStateChanged";
            let battery = fields.read_u8().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::BATTERY, &Battery { battery })
                .map_err(fault(ctx))?;
        }
        cmd::MASS_STORAGE_STATE_LIST_CHANGED => {
            let ctx = "MassStorageStateListChanged";
            let mass_storage_id = fields.read_u8().map_err(fault(ctx))?;
            // No length prefix; the volume name runs to end-of-frame.
            let name = String::from_utf8_lossy(fields.remaining()).into_owned();
            e.send_json_telemetry(frame, events::MASSSTORAGE, &MassStorage { mass_storage_id, name })
                .map_err(fault(ctx))?;
        }
        cmd::MASS_STORAGE_INFO_STATE_LIST_CHANGED => {
            let ctx = "MassStorageInfoStateListChanged";
            let record = MassStorageInfo {
                mass_storage_id: fields.read_u8().map_err(fault(ctx))?,
                size: fields.read_u32().map_err(fault(ctx))?,
                used_size: fields.read_u32().map_err(fault(ctx))?,
                plugged: fields.read_u8().map_err(fault(ctx))?,
                full: fields.read_u8().map_err(fault(ctx))?,
                internal: fields.read_u8().map_err(fault(ctx))?,
            };
            // Frames carry a long undocumented suffix after these fields;
            // treated as reserved.
            e.send_json_telemetry(frame, events::MASSSTORAGEINFO, &record).map_err(fault(ctx))?;
        }
        cmd::CURRENT_DATE_CHANGED => {
            let ctx = "CurrentDateChanged";
            // ISO-8601 date.
            let (date, _) = parse_null_termed_string(frame.payload()).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::CURRENTDATE, &CurrentDate { date })
                .map_err(fault(ctx))?;
        }
        cmd::CURRENT_TIME_CHANGED => {
            let ctx = "CurrentTimeChanged";
            // ISO-8601 time.
            let (time, _) = parse_null_termed_string(frame.payload()).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::CURRENTTIME, &CurrentTime { time })
                .map_err(fault(ctx))?;
        }
        cmd::MASS_STORAGE_INFO_REMAINING_LIST_CHANGED => {
            let ctx = "MassStorageInfoRemainingListChanged";
            let record = MassStorageRemaining {
                free_space: fields.read_u32().map_err(fault(ctx))?,
                rec_time: fields.read_u16().map_err(fault(ctx))?,
                photo_remaining: fields.read_u32().map_err(fault(ctx))?,
            };
            e.send_json_telemetry(frame, events::MASSSTORAGEINFOREMAINING, &record)
                .map_err(fault(ctx))?;
        }
        cmd::WIFI_SIGNAL_CHANGED => {
            let ctx = "WifiSignalChanged";
            // dbm
            let rssi = fields.read_i16().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::WIFISIGNAL, &WifiSignal { rssi })
                .map_err(fault(ctx))?;
        }
        cmd::SENSORS_STATES_LIST_CHANGED => {
            let ctx = "SensorStatesListChanged";
            let sensor_name = fields.read_enum(SENSOR_NAMES).map_err(fault(ctx))?;
            let sensor_state = fields.read_bool().map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::SENSORSTATES, &SensorState {
                sensor_name,
                sensor_state,
            })
            .map_err(fault(ctx))?;
        }
        cmd::PRODUCT_MODEL => {
            let ctx = "ProductModel";
            let model = fields.read_enum(PRODUCT_MODELS).map_err(fault(ctx))?;
            e.send_json_telemetry(frame, events::DRONEMODEL, &DroneModel { model })
                .map_err(fault(ctx))?;
        }
        cmd::COUNTRY_LIST_KNOWN => {
            let ctx = "CountryListKnown";
            let country_codes = String::from_utf8_lossy(frame.payload()).into_owned();
            e.send_json_telemetry(frame, events::COUNTRYCODES, &CountryCodes { country_codes })
                .map_err(fault(ctx))?;
        }
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

/// Single-command class: the device announcing a disconnect.
pub(super) fn network(e: &Emitter, command_id: u8, _frame: &NetworkFrame) -> DecodeResult {
    if command_id != 0 {
        return Ok(Decoded::NoHandler);
    }
    e.send_empty_telemetry(events::NETWORKDISCONNECT).map_err(fault("NetworkDisconnect"))?;
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct MavlinkFilePlaying {
    state: &'static str,
    filepath: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Playing state of a mavlink flight plan.
pub(super) fn mavlink_state(e: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
    if command_id != 0 {
        return Ok(Decoded::NoHandler);
    }
    let ctx = "MavlinkFilePlayingStateChanged";
    let mut fields = FieldReader::new(frame.payload());
    let state = fields.read_enum(&["playing", "stopped", "paused"]).map_err(fault(ctx))?;
    let (filepath, rest) = parse_null_termed_string(fields.remaining()).map_err(fault(ctx))?;
    // The plan type must be the final field; trailing bytes make this an
    // enum-size fault.
    let kind = decode_enum(rest, &["flightPlan", "mapMyHouse"]).map_err(fault(ctx))?;
    e.send_json_telemetry(frame, events::MAVLINKFILEPLAYING, &MavlinkFilePlaying {
        state,
        filepath,
        kind,
    })
    .map_err(fault(ctx))?;
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct CameraSettings {
    fov: f32,
    #[serde(rename = "panMax")]
    pan_max: f32,
    #[serde(rename = "panMin")]
    pan_min: f32,
    #[serde(rename = "tiltMax")]
    tilt_max: f32,
    // Wire name is "tileMin"; subscribers match on it as-is.
    #[serde(rename = "tileMin")]
    tilt_min: f32,
}

/// Camera envelope reported at connection time.
pub(super) fn camera_settings_state(
    e: &Emitter,
    command_id: u8,
    frame: &NetworkFrame,
) -> DecodeResult {
    if command_id != 0 {
        return Ok(Decoded::NoHandler);
    }
    let ctx = "CameraSettingsState";
    let mut fields = FieldReader::new(frame.payload());
    let record = CameraSettings {
        fov: fields.read_f32().map_err(fault(ctx))?,
        pan_max: fields.read_f32().map_err(fault(ctx))?,
        pan_min: fields.read_f32().map_err(fault(ctx))?,
        tilt_max: fields.read_f32().map_err(fault(ctx))?,
        tilt_min: fields.read_f32().map_err(fault(ctx))?,
    };
    e.send_json_telemetry(frame, events::CAMERASETTINGSSTATE, &record).map_err(fault(ctx))?;
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct FlightPlanAvailability {
    #[serde(rename = "availabilityState")]
    availability_state: u8,
}

/// Flight plan availability; the device dumps this regularly.
pub(super) fn flight_plan_state(e: &Emitter, command_id: u8, frame: &NetworkFrame) -> DecodeResult {
    if command_id != 0 {
        return Ok(Decoded::NoHandler);
    }
    let ctx = "AvailabilityStateChanged";
    let mut fields = FieldReader::new(frame.payload());
    let availability_state = fields.read_u8().map_err(fault(ctx))?;
    e.send_json_telemetry(frame, events::AVAILABILITYSTATECHANGED, &FlightPlanAvailability {
        availability_state,
    })
    .map_err(fault(ctx))?;
    Ok(Decoded::Matched)
}

/// Flight plan lifecycle events.
pub(super) fn flight_plan_event(e: &Emitter, command_id: u8, _frame: &NetworkFrame) -> DecodeResult {
    match command_id {
        // Event of flight plan start error
        0 => e.send_empty_telemetry(events::STARTINGERROREVENT).map_err(fault("StartingErrorEvent"))?,
        // Bridle speed of the drone
        1 => e.send_empty_telemetry(events::SPEEDBRIDLEEVENT).map_err(fault("SpeedBridleEvent"))?,
        _ => return Ok(Decoded::NoHandler),
    }
    Ok(Decoded::Matched)
}

#[derive(Serialize)]
struct LibVersion {
    // Legacy wire key; downstream consumers match on the capitalized form.
    #[serde(rename = "Version")]
    version: String,
}

/// The device volunteers SDK library versions sometimes.
pub(super) fn arlibs_versions_state(
    e: &Emitter,
    command_id: u8,
    frame: &NetworkFrame,
) -> DecodeResult {
    let (title, ctx) = match command_id {
        0 => (events::CONTROLLERLIBVERSION, "ControllerLibARCommandsVersion"),
        1 => (events::SKYCONTROLLERLIBVERSION, "SkyControllerLibARCommandsVersion"),
        2 => (events::DEVICELIBVERSION, "DeviceLibARCommandsVersion"),
        _ => return Ok(Decoded::NoHandler),
    };
    let (version, _) = parse_null_termed_string(frame.payload()).map_err(fault(ctx))?;
    e.send_json_telemetry(frame, title, &LibVersion { version }).map_err(fault(ctx))?;
    Ok(Decoded::Matched)
}

/// Firmware settings dump. Not interpreted yet; reported as unknown so the
/// raw frames stay observable.
pub(super) fn settings_state(_e: &Emitter, _command_id: u8, _frame: &NetworkFrame) -> DecodeResult {
    Ok(Decoded::NoHandler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::TELEMETRY_CHANNEL_CAPACITY;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    fn test_emitter() -> (Emitter, mpsc::Receiver<crate::TelemetryPacket>) {
        let (tx, rx) = mpsc::channel(TELEMETRY_CHANNEL_CAPACITY);
        (Emitter::new(tx, CancellationToken::new()), rx)
    }

    fn frame(header: [u8; 4], payload: &[u8]) -> NetworkFrame {
        let mut data = header.to_vec();
        data.extend_from_slice(payload);
        NetworkFrame::new(data)
    }

    #[tokio::test]
    async fn battery_percentage_decodes() {
        let (e, mut rx) = test_emitter();
        let frame = frame([0, 5, 1, 0], &[85]);
        let result = common_state(&e, cmd::BATTERY_STATE_CHANGED, &frame);
        assert!(matches!(result, Ok(Decoded::Matched)));

        let packet = rx.try_recv().unwrap();
        assert_eq!(packet.title, events::BATTERY);
        assert_eq!(packet.payload, br#"{"battery":85}"#);
    }

    #[tokio::test]
    async fn truncated_battery_frame_faults() {
        let (e, mut rx) = test_emitter();
        let frame = frame([0, 5, 1, 0], &[]);
        let err = common_state(&e, cmd::BATTERY_STATE_CHANGED, &frame).unwrap_err();
        assert_eq!(err.context, "BatteryStateChanged");
        assert!(err.source.is_decode_fault());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn mass_storage_name_runs_to_end_of_frame() {
        let (e, mut rx) = test_emitter();
        let frame = frame([0, 5, 2, 0], b"\x02internal");
        common_state(&e, cmd::MASS_STORAGE_STATE_LIST_CHANGED, &frame).unwrap();

        let packet = rx.try_recv().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&packet.payload).unwrap();
        assert_eq!(value["mass_storage_id"], 2);
        assert_eq!(value["name"], "internal");
    }

    #[tokio::test]
    async fn mass_storage_info_ignores_reserved_suffix() {
        let (e, mut rx) = test_emitter();
        let mut payload = vec![1u8];
        payload.extend_from_slice(&8_000_000u32.to_le_bytes());
        payload.extend_from_slice(&2_000_000u32.to_le_bytes());
        payload.extend_from_slice(&[1, 0, 1]);
        payload.extend_from_slice(&[0xEE; 50]); // reserved tail
        let frame = frame([0, 5, 3, 0], &payload);
        common_state(&e, cmd::MASS_STORAGE_INFO_STATE_LIST_CHANGED, &frame).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&rx.try_recv().unwrap().payload).unwrap();
        assert_eq!(value["size"], 8_000_000);
        assert_eq!(value["used_size"], 2_000_000);
        assert_eq!(value["plugged"], 1);
        assert_eq!(value["internal"], 1);
    }

    #[tokio::test]
    async fn sensor_states_reads_enum_then_flag() {
        let (e, mut rx) = test_emitter();
        let mut payload = 4u32.to_le_bytes().to_vec(); // magnetometer
        payload.push(1);
        let frame = frame([0, 5, 8, 0], &payload);
        common_state(&e, cmd::SENSORS_STATES_LIST_CHANGED, &frame).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&rx.try_recv().unwrap().payload).unwrap();
        assert_eq!(value["sensorName"], "magnetometer");
        assert_eq!(value["sensorState"], true);
    }

    #[tokio::test]
    async fn mavlink_state_parses_three_fields() {
        let (e, mut rx) = test_emitter();
        let mut payload = 0u32.to_le_bytes().to_vec(); // playing
        payload.extend_from_slice(b"/data/plan.mavlink\0");
        payload.extend_from_slice(&1u32.to_le_bytes()); // mapMyHouse
        let frame = frame([0, 12, 0, 0], &payload);
        mavlink_state(&e, 0, &frame).unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&rx.try_recv().unwrap().payload).unwrap();
        assert_eq!(value["state"], "playing");
        assert_eq!(value["filepath"], "/data/plan.mavlink");
        assert_eq!(value["type"], "mapMyHouse");
    }

    #[tokio::test]
    async fn mavlink_trailing_bytes_are_an_enum_fault() {
        let (e, _rx) = test_emitter();
        let mut payload = 0u32.to_le_bytes().to_vec();
        payload.extend_from_slice(b"/plan\0");
        payload.extend_from_slice(&1u32.to_le_bytes());
        payload.push(0xFF); // junk after the type enum
        let frame = frame([0, 12, 0, 0], &payload);
        let err = mavlink_state(&e, 0, &frame).unwrap_err();
        assert!(matches!(err.source, crate::TelemetryError::EnumBadSize { len: 5 }));
    }

    #[tokio::test]
    async fn lib_versions_use_legacy_key() {
        let (e, mut rx) = test_emitter();
        let frame = frame([0, 18, 2, 0], b"3.1.0\0");
        arlibs_versions_state(&e, 2, &frame).unwrap();

        let packet = rx.try_recv().unwrap();
        assert_eq!(packet.title, events::DEVICELIBVERSION);
        assert_eq!(packet.payload, br#"{"Version":"3.1.0"}"#);
    }

    #[tokio::test]
    async fn settings_state_stays_unhandled() {
        let (e, mut rx) = test_emitter();
        let frame = frame([0, 3, 0, 0], &[]);
        assert!(matches!(settings_state(&e, 0, &frame), Ok(Decoded::NoHandler)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unlisted_command_is_no_handler() {
        let (e, _rx) = test_emitter();
        let frame = frame([0, 5, 0x63, 0], &[]);
        assert!(matches!(common_state(&e, 0x63, &frame), Ok(Decoded::NoHandler)));
    }
}
