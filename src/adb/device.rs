use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceState {
    Online,
    Offline,
    Unauthorized,
    Unknown(String),
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "device"),
            Self::Offline => write!(f, "offline"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Unknown(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionType {
    Usb,
    Tcp,
    Emulator,
}

/// One row of the `adb devices` table.
#[derive(Debug, Clone)]
pub struct Device {
    pub serial: String,
    pub state: DeviceState,
    pub connection_type: ConnectionType,
}

impl Device {
    pub fn is_online_emulator(&self) -> bool {
        self.connection_type == ConnectionType::Emulator && self.state == DeviceState::Online
    }
}

pub fn parse_device_list(output: &str) -> Vec<Device> {
    let mut devices = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("List of") || line.starts_with('*') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(serial), Some(state_str)) = (parts.next(), parts.next()) else {
            continue;
        };

        let state = match state_str {
            "device" => DeviceState::Online,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            other => DeviceState::Unknown(other.to_string()),
        };

        let connection_type = if serial.starts_with("emulator-") {
            ConnectionType::Emulator
        } else if serial.contains(':') {
            ConnectionType::Tcp
        } else {
            ConnectionType::Usb
        };

        devices.push(Device {
            serial: serial.to_string(),
            state,
            connection_type,
        });
    }

    devices
}

/// Serial of the first emulator that is attached and online.
pub fn online_emulator(output: &str) -> Option<String> {
    parse_device_list(output)
        .into_iter()
        .find(Device::is_online_emulator)
        .map(|d| d.serial)
}
