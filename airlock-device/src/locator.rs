//! Device locator - compose the controller base URL
//!
//! Pure string composition, no network traffic. A property may carry its own
//! controller address; otherwise the configured default applies.

use airlock_core::DeviceAddress;

/// Compiled-in fallback, used when neither the property nor the environment
/// supplies an address.
pub const DEFAULT_DEVICE_ADDR: &str = "192.168.1.100";

/// Controllers listen on plain HTTP port 80 unless configured otherwise.
pub const DEVICE_PORT: u16 = 80;

const DEVICE_ADDR_ENV: &str = "AIRLOCK_DEVICE_ADDR";

/// Default controller address: `AIRLOCK_DEVICE_ADDR` if set, else the
/// compiled-in fallback.
pub fn default_address() -> String {
    std::env::var(DEVICE_ADDR_ENV).unwrap_or_else(|_| DEFAULT_DEVICE_ADDR.to_string())
}

/// Base URL for commands, `http://<address>:<port>`. The property override
/// wins when present; the port defaults to 80. Always returns a value.
pub fn base_url(device: Option<&DeviceAddress>, default_address: &str) -> String {
    let address = device
        .map(|d| d.address.as_str())
        .filter(|a| !a.is_empty())
        .unwrap_or(default_address);
    let port = device.and_then(|d| d.port).unwrap_or(DEVICE_PORT);
    format!("http://{address}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_address_wins() {
        let device = DeviceAddress {
            address: "10.0.0.5".to_string(),
            port: None,
        };
        assert_eq!(base_url(Some(&device), "192.168.1.100"), "http://10.0.0.5:80");
    }

    #[test]
    fn override_port_is_honoured() {
        let device = DeviceAddress {
            address: "10.0.0.5".to_string(),
            port: Some(8080),
        };
        assert_eq!(
            base_url(Some(&device), "192.168.1.100"),
            "http://10.0.0.5:8080"
        );
    }

    #[test]
    fn missing_override_falls_back_to_default() {
        assert_eq!(base_url(None, "192.168.1.100"), "http://192.168.1.100:80");
    }

    #[test]
    fn empty_override_address_falls_back_to_default() {
        let device = DeviceAddress {
            address: String::new(),
            port: None,
        };
        assert_eq!(
            base_url(Some(&device), "192.168.1.100"),
            "http://192.168.1.100:80"
        );
    }
}
