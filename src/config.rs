//! Capture configuration.
//!
//! Built from command-line flags, then overridden by environment variables.

/// Environment variable naming the interface to capture on.
pub const ENV_INTERFACE: &str = "SNIFFER_INTERFACE";
/// Environment variable enabling payload output.
pub const ENV_DISPLAY_DATA: &str = "SNIFFER_DISPLAY_DATA";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Restrict capture to this interface; `None` captures on all of them
    pub interface: Option<String>,
    /// Whether consumers render transport/application payload bytes
    pub display_data: bool,
    /// Raise the default log level
    pub verbose: bool,
}

impl CaptureConfig {
    pub fn new(interface: Option<String>, display_data: bool, verbose: bool) -> Self {
        Self {
            interface,
            display_data,
            verbose,
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// The interface variable only applies when no interface was given on
    /// the command line; an empty value means all interfaces.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.interface.is_none() {
            if let Some(val) = lookup(ENV_INTERFACE) {
                let val = val.trim();
                if !val.is_empty() {
                    self.interface = Some(val.to_string());
                }
            }
        }

        if let Some(val) = lookup(ENV_DISPLAY_DATA) {
            self.display_data = parse_flag(&val);
        }

        self
    }

    /// Default tracing filter when `RUST_LOG` is not set.
    pub fn tracing_filter(&self) -> &'static str {
        if self.verbose {
            "packet_sniffer=debug,info"
        } else {
            "warn"
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
