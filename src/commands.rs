//! Project/Class/Command taxonomy constants.
//!
//! The three-level command namespace used by the drone SDK: the project byte
//! narrows to a device family, the class byte to a subsystem, and the command
//! id (low byte of a 16-bit little-endian field) to a specific event. Byte
//! values here mirror the SDK command headers and must not be renumbered.

/// Project (device family) bytes.
pub mod project {
    /// Features shared by every SDK product.
    pub const COMMON: u8 = 0;
    /// Bebop-family quadcopters.
    pub const ARDRONE3: u8 = 1;
}

/// Class bytes within the Common project.
pub mod common {
    pub const NETWORK: u8 = 0;
    pub const SETTINGS_STATE: u8 = 3;
    pub const COMMON_STATE: u8 = 5;
    pub const MAVLINK_STATE: u8 = 12;
    pub const CAMERA_SETTINGS_STATE: u8 = 15;
    pub const FLIGHT_PLAN_STATE: u8 = 17;
    pub const ARLIBS_VERSIONS_STATE: u8 = 18;
    pub const FLIGHT_PLAN_EVENT: u8 = 19;

    /// Command ids within Common/CommonState.
    pub mod common_state {
        pub const ALL_STATES_CHANGED: u8 = 0;
        pub const BATTERY_STATE_CHANGED: u8 = 1;
        pub const MASS_STORAGE_STATE_LIST_CHANGED: u8 = 2;
        pub const MASS_STORAGE_INFO_STATE_LIST_CHANGED: u8 = 3;
        pub const CURRENT_DATE_CHANGED: u8 = 4;
        pub const CURRENT_TIME_CHANGED: u8 = 5;
        pub const MASS_STORAGE_INFO_REMAINING_LIST_CHANGED: u8 = 6;
        pub const WIFI_SIGNAL_CHANGED: u8 = 7;
        pub const SENSORS_STATES_LIST_CHANGED: u8 = 8;
        pub const PRODUCT_MODEL: u8 = 9;
        pub const COUNTRY_LIST_KNOWN: u8 = 10;
    }
}

/// Class bytes within the ARDrone3 project.
pub mod ardrone3 {
    pub const CAMERA: u8 = 1;
    pub const PILOTING_STATE: u8 = 4;
    pub const PILOTING_SETTINGS_STATE: u8 = 6;
    pub const NETWORK_SETTINGS_STATE: u8 = 10;
    pub const SPEED_SETTINGS_STATE: u8 = 12;
    pub const NETWORK_STATE: u8 = 14;
    pub const PICTURE_SETTINGS_STATE: u8 = 20;
    pub const GPS_SETTINGS_STATE: u8 = 24;
    pub const CAMERA_STATE: u8 = 25;

    /// Command ids within ARDrone3/PilotingState.
    pub mod piloting_state {
        pub const FLAT_TRIM_CHANGED: u8 = 0;
        pub const FLYING_STATE_CHANGED: u8 = 1;
        pub const ALERT_STATE_CHANGED: u8 = 2;
        pub const NAVIGATE_HOME_STATE_CHANGED: u8 = 3;
        pub const POSITION_CHANGED: u8 = 4;
        pub const SPEED_CHANGED: u8 = 5;
        pub const ATTITUDE_CHANGED: u8 = 6;
        pub const AUTO_TAKEOFF_MODE_CHANGED: u8 = 7;
        pub const ALTITUDE_CHANGED: u8 = 8;
    }

    /// Command ids within ARDrone3/NetworkState.
    pub mod network_state {
        pub const WIFI_SCAN_LIST_CHANGED: u8 = 0;
        pub const ALL_WIFI_SCAN_CHANGED: u8 = 1;
        pub const WIFI_AUTH_CHANNEL_LIST_CHANGED: u8 = 2;
        pub const ALL_WIFI_AUTH_CHANNEL_CHANGED: u8 = 3;
    }

    /// Command ids within ARDrone3/PictureSettingsState.
    pub mod picture_settings_state {
        pub const PICTURE_FORMAT_CHANGED: u8 = 0;
        pub const AUTO_WHITE_BALANCE_CHANGED: u8 = 1;
        pub const EXPOSITION_CHANGED: u8 = 2;
        pub const SATURATION_CHANGED: u8 = 3;
        pub const TIMELAPSE_CHANGED: u8 = 4;
        pub const VIDEO_AUTORECORD_CHANGED: u8 = 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_bytes_match_the_sdk_header() {
        // Spot checks against the wire captures the decoders were written
        // from; renumbering any of these breaks frame routing.
        assert_eq!(project::COMMON, 0);
        assert_eq!(project::ARDRONE3, 1);
        assert_eq!(common::COMMON_STATE, 5);
        assert_eq!(ardrone3::PILOTING_STATE, 4);
        assert_eq!(ardrone3::piloting_state::ATTITUDE_CHANGED, 6);
        assert_eq!(common::common_state::BATTERY_STATE_CHANGED, 1);
    }
}
