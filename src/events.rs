//! Event title vocabulary.
//!
//! Every packet emitted on the telemetry channel carries one of these titles.
//! The `bebop:` prefix keeps the names from colliding with other subsystems'
//! event vocabularies, and the closed set decouples subscribers from the raw
//! Project/Class/Command byte codes.

/// Raw frame whose command id had no handler within a known class.
pub const UNKNOWN: &str = "bebop:unknown";
/// Raw frame whose project byte is not in the dispatch table.
pub const UNKNOWN_PROJECT: &str = "bebop:unknownProject";
/// A decoder or delivery fault, with the offending frame attached.
pub const ERROR: &str = "bebop:error";

// Gross flight state; important enough that this enum got broken out into
// one title per state.
pub const LANDED: &str = "bebop:landed";
pub const TAKINGOFF: &str = "bebop:takingoff";
pub const HOVERING: &str = "bebop:hovering";
pub const FLYING: &str = "bebop:flying";
pub const LANDING: &str = "bebop:landing";
pub const EMERGENCY: &str = "bebop:emergency";

// Camera
pub const ALLSTATESCHANGED: &str = "bebop:allstateschanged";
pub const CAMERASTATE: &str = "bebop:camerastate";
pub const CAMERASETTINGSSTATE: &str = "bebop:camerasettingsstate";
pub const PICTUREFORMATCHANGED: &str = "bebop:pictureformatchanged";
pub const AUTOWHITEBALANCECHANGED: &str = "bebop:autowhitebalancechanged";
pub const EXPOSITIONCHANGED: &str = "bebop:expositionchanged";
pub const SATURATIONCHANGED: &str = "bebop:saturationchanged";
pub const TIMELAPSECHANGED: &str = "bebop:timelapsechanged";
pub const VIDEOAUTORECORDCHANGED: &str = "bebop:videoautorecordchanged";

// The Camera command set are instructions *to* the drone but the device has
// been seen echoing them back; a defensive title covers that.
pub const ORIENTATION: &str = "bebop:orientation";

// Behaviour
pub const MAXALTITUDECHANGED: &str = "bebop:maxaltitudechanged";
pub const MAXTILTCHANGED: &str = "bebop:maxtiltchanged";
pub const ABSOLUTCONTROLCHANGED: &str = "bebop:absolutcontrolchanged";
pub const MAXDISTANCECHANGED: &str = "bebop:maxdistancechanged";
pub const NOFLYOVERMAXDISTANCECHANGED: &str = "bebop:noflyovermaxdistancechanged";
pub const MAXVERTICALSPEEDCHANGED: &str = "bebop:maxverticalspeedchanged";
pub const MAXROTATIONSPEEDCHANGED: &str = "bebop:maxrotationspeedchanged";
pub const HULLPROTECTIONCHANGED: &str = "bebop:hullprotectionchanged";
pub const OUTDOORCHANGED: &str = "bebop:outdoorchanged";
pub const FLATTRIM: &str = "bebop:flattrim";
pub const NAVIGATEHOMESTATE: &str = "bebop:navigatehomestate";
pub const ALERTSTATE: &str = "bebop:alertstate";
pub const AUTOTAKEOFFMODE: &str = "bebop:autotakeoffmode";
pub const NETWORKSETTINGSSTATE: &str = "bebop:networksettingsstate";
pub const MAVLINKFILEPLAYING: &str = "bebop:mavlinkfileplaying";
pub const AVAILABILITYSTATECHANGED: &str = "bebop:availabilitystatechanged";
pub const STARTINGERROREVENT: &str = "bebop:startingerrorevent";
pub const SPEEDBRIDLEEVENT: &str = "bebop:speedbridleevent";
pub const SETHOMECHANGED: &str = "bebop:sethomechanged";
pub const RESETHOMECHANGED: &str = "bebop:resethomechanged";
pub const GPSFIXSTATECHANGED: &str = "bebop:gpsfixstatechanged";
pub const GPSUPDATESTATECHANGED: &str = "bebop:gpsupdatestatechanged";
pub const HOMETYPECHANGED: &str = "bebop:hometypechanged";
pub const RETURNHOMEDELAYCHANGED: &str = "bebop:returnhomedelaychanged";

// Network
pub const NETWORKDISCONNECT: &str = "bebop:networkdisconnect";
pub const WIFISCANLISTCHANGED: &str = "bebop:wifiscanlistchanged";
pub const ALLWIFISCANCHANGED: &str = "bebop:allwifiscanchanged";
pub const WIFIAUTHCHANNELLISTCHANGED: &str = "bebop:wifiauthchannellistchanged";
pub const ALLWIFIAUTHCHANNELCHANGED: &str = "bebop:allwifiauthchannelchanged";

// Assets
pub const BATTERY: &str = "bebop:battery";
pub const MASSSTORAGE: &str = "bebop:massstorage";
pub const MASSSTORAGEINFO: &str = "bebop:massstorageinfo";
pub const MASSSTORAGEINFOREMAINING: &str = "bebop:massstorageinforemaining";
pub const SENSORSTATES: &str = "bebop:sensorstates";

// Factoids
pub const CURRENTDATE: &str = "bebop:currentdate";
pub const CURRENTTIME: &str = "bebop:currenttime";
pub const DRONEMODEL: &str = "bebop:dronemodel";
pub const COUNTRYCODES: &str = "bebop:countrycodes";
pub const CONTROLLERLIBVERSION: &str = "bebop:controllerlibversion";
pub const SKYCONTROLLERLIBVERSION: &str = "bebop:skycontrollerlibversion";
pub const DEVICELIBVERSION: &str = "bebop:devicelibversion";

// Extrospective telemetry
pub const GPS: &str = "bebop:gps";
pub const SPEED: &str = "bebop:speed";
pub const ATTITUDE: &str = "bebop:attitude";
pub const ALTITUDE: &str = "bebop:altitude";
pub const WIFISIGNAL: &str = "bebop:wifisignal";

/// Every title this crate can emit. Lets downstream event routers check
/// whether an event name belongs to this subsystem.
pub const PACKET_TYPES: &[&str] = &[
    UNKNOWN,
    UNKNOWN_PROJECT,
    ERROR,
    LANDED,
    TAKINGOFF,
    HOVERING,
    FLYING,
    LANDING,
    EMERGENCY,
    ALLSTATESCHANGED,
    CAMERASTATE,
    CAMERASETTINGSSTATE,
    PICTUREFORMATCHANGED,
    AUTOWHITEBALANCECHANGED,
    EXPOSITIONCHANGED,
    SATURATIONCHANGED,
    TIMELAPSECHANGED,
    VIDEOAUTORECORDCHANGED,
    ORIENTATION,
    MAXALTITUDECHANGED,
    MAXTILTCHANGED,
    ABSOLUTCONTROLCHANGED,
    MAXDISTANCECHANGED,
    NOFLYOVERMAXDISTANCECHANGED,
    MAXVERTICALSPEEDCHANGED,
    MAXROTATIONSPEEDCHANGED,
    HULLPROTECTIONCHANGED,
    OUTDOORCHANGED,
    FLATTRIM,
    NAVIGATEHOMESTATE,
    ALERTSTATE,
    AUTOTAKEOFFMODE,
    NETWORKSETTINGSSTATE,
    MAVLINKFILEPLAYING,
    AVAILABILITYSTATECHANGED,
    STARTINGERROREVENT,
    SPEEDBRIDLEEVENT,
    SETHOMECHANGED,
    RESETHOMECHANGED,
    GPSFIXSTATECHANGED,
    GPSUPDATESTATECHANGED,
    HOMETYPECHANGED,
    RETURNHOMEDELAYCHANGED,
    NETWORKDISCONNECT,
    WIFISCANLISTCHANGED,
    ALLWIFISCANCHANGED,
    WIFIAUTHCHANNELLISTCHANGED,
    ALLWIFIAUTHCHANNELCHANGED,
    BATTERY,
    MASSSTORAGE,
    MASSSTORAGEINFO,
    MASSSTORAGEINFOREMAINING,
    SENSORSTATES,
    CURRENTDATE,
    CURRENTTIME,
    DRONEMODEL,
    COUNTRYCODES,
    CONTROLLERLIBVERSION,
    SKYCONTROLLERLIBVERSION,
    DEVICELIBVERSION,
    GPS,
    SPEED,
    ATTITUDE,
    ALTITUDE,
    WIFISIGNAL,
];

/// Returns true when `title` is part of this crate's event vocabulary.
pub fn is_known_title(title: &str) -> bool {
    PACKET_TYPES.contains(&title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_title_carries_the_subsystem_prefix() {
        for title in PACKET_TYPES {
            assert!(title.starts_with("bebop:"), "unprefixed title: {}", title);
        }
    }

    #[test]
    fn vocabulary_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for title in PACKET_TYPES {
            assert!(seen.insert(title), "duplicate title: {}", title);
        }
    }

    #[test]
    fn membership_check_works() {
        assert!(is_known_title(BATTERY));
        assert!(is_known_title(UNKNOWN_PROJECT));
        assert!(!is_known_title("bebop:nonsense"));
        assert!(!is_known_title("battery"));
    }
}
