//! Device capability signals.
//!
//! Everything here is best effort: a signal that can't be read is left as
//! `None` (or `false`) and the tuner treats it as a capability hint.

use std::env;
use std::sync::LazyLock;

use regex::Regex;

/// Assumed core count / memory when the platform doesn't report one.
const DEFAULT_CORES: u32 = 4;
const DEFAULT_MEMORY_GB: f32 = 4.0;

static MOBILE_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)android|webos|iphone|ipad|ipod|blackberry|iemobile|opera mini")
        .expect("mobile agent pattern compiles")
});

/// Read-only inputs used to classify the device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSignals {
    pub hardware_concurrency: Option<u32>,
    pub device_memory_gb: Option<f32>,
    pub user_agent: String,
    /// True-colour output is our stand-in for a capable graphics API
    pub graphics_available: bool,
    pub reduced_motion: bool,
}

impl DeviceSignals {
    /// Reads the signals from the current process environment.
    pub fn probe(reduced_motion: bool) -> Self {
        let signals = Self {
            hardware_concurrency: std::thread::available_parallelism()
                .ok()
                .and_then(|n| u32::try_from(n.get()).ok()),
            device_memory_gb: read_memory_gb(),
            user_agent: terminal_agent(),
            graphics_available: env::var("COLORTERM")
                .map(|v| supports_truecolor(&v))
                .unwrap_or(false),
            reduced_motion,
        };
        tracing::debug!(?signals, "Probed device signals");
        signals
    }

    pub fn cores_or_default(&self) -> u32 {
        self.hardware_concurrency.unwrap_or(DEFAULT_CORES)
    }

    pub fn memory_gb_or_default(&self) -> f32 {
        self.device_memory_gb.unwrap_or(DEFAULT_MEMORY_GB)
    }

    pub fn is_mobile(&self) -> bool {
        is_mobile_agent(&self.user_agent)
    }
}

/// Mobile heuristic over an agent string.
pub fn is_mobile_agent(agent: &str) -> bool {
    MOBILE_AGENT.is_match(agent)
}

fn supports_truecolor(colorterm: &str) -> bool {
    matches!(
        colorterm.to_ascii_lowercase().as_str(),
        "truecolor" | "24bit"
    )
}

/// Builds an agent-like string from the terminal environment.
fn terminal_agent() -> String {
    let mut parts = Vec::new();
    for key in ["TERM_PROGRAM", "TERM"] {
        if let Ok(value) = env::var(key) {
            if !value.is_empty() {
                parts.push(value);
            }
        }
    }
    // Termux and other Android shells export ANDROID_ROOT.
    if env::var_os("ANDROID_ROOT").is_some() {
        parts.push("Android".to_string());
    }
    parts.join(" ")
}

#[cfg(target_os = "linux")]
fn read_memory_gb() -> Option<f32> {
    let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
    parse_meminfo_gb(&meminfo)
}

#[cfg(not(target_os = "linux"))]
fn read_memory_gb() -> Option<f32> {
    None
}

/// Extracts `MemTotal` (kB) from /proc/meminfo contents, in GB.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_meminfo_gb(meminfo: &str) -> Option<f32> {
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kb: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some((kb / (1024.0 * 1024.0)) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_agents() {
        assert!(is_mobile_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(is_mobile_agent("xterm-256color ANDROID"));
        assert!(is_mobile_agent("Opera Mini/8.0"));
        assert!(!is_mobile_agent("iTerm.app xterm-256color"));
        assert!(!is_mobile_agent(""));
    }

    #[test]
    fn test_truecolor_detection() {
        assert!(supports_truecolor("truecolor"));
        assert!(supports_truecolor("24BIT"));
        assert!(!supports_truecolor("yes"));
    }

    #[test]
    fn test_parse_meminfo() {
        let meminfo = "MemTotal:       16777216 kB\nMemFree:         1234 kB\n";
        assert_eq!(parse_meminfo_gb(meminfo), Some(16.0));
        assert_eq!(parse_meminfo_gb("MemFree: 12 kB"), None);
        assert_eq!(parse_meminfo_gb("MemTotal: lots kB"), None);
    }

    #[test]
    fn test_defaults_for_missing_signals() {
        let signals = DeviceSignals {
            hardware_concurrency: None,
            device_memory_gb: None,
            user_agent: String::new(),
            graphics_available: false,
            reduced_motion: false,
        };
        assert_eq!(signals.cores_or_default(), 4);
        assert_eq!(signals.memory_gb_or_default(), 4.0);
        assert!(!signals.is_mobile());
    }
}
