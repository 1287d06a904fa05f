use tracing::debug;

use crate::adb::client::DeviceBridge;
use crate::adb::device;
use crate::config::AdbConfig;
use crate::process::best_effort;

#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    /// `serial` is set when the table names an online emulator.
    Ready { serial: Option<String> },
    NotReady,
}

/// Decides from `adb devices` output whether a virtual device is reachable.
pub struct DeviceMonitor {
    emulator_marker: String,
    ready_marker: String,
}

impl DeviceMonitor {
    pub fn new(config: &AdbConfig) -> Self {
        Self {
            emulator_marker: config.emulator_marker.clone(),
            ready_marker: config.ready_marker.clone(),
        }
    }

    /// Both markers must appear somewhere in the output.
    pub fn is_ready_output(&self, output: &str) -> bool {
        output.contains(&self.emulator_marker) && output.contains(&self.ready_marker)
    }

    /// Any failure to query the bridge counts as not ready.
    pub fn readiness(&self, bridge: &dyn DeviceBridge) -> Readiness {
        let Some(output) = best_effort("adb devices", bridge.devices()) else {
            return Readiness::NotReady;
        };
        if self.is_ready_output(&output) {
            let serial = device::online_emulator(&output);
            debug!("device ready ({:?})", serial);
            Readiness::Ready { serial }
        } else {
            for d in device::parse_device_list(&output) {
                debug!("not ready: {} is {}", d.serial, d.state);
            }
            Readiness::NotReady
        }
    }

    pub fn is_device_ready(&self, bridge: &dyn DeviceBridge) -> bool {
        matches!(self.readiness(bridge), Readiness::Ready { .. })
    }
}
