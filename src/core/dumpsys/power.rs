use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wakefulness {
    Awake,
    Asleep,
    Other(String),
}

impl Wakefulness {
    fn from_dump(value: &str) -> Self {
        match value {
            "Awake" => Self::Awake,
            "Asleep" => Self::Asleep,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_awake(&self) -> bool {
        matches!(self, Self::Awake)
    }
}

impl std::fmt::Display for Wakefulness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Awake => write!(f, "Awake"),
            Self::Asleep => write!(f, "Asleep"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Screen-relevant slice of a `dumpsys power` dump, parsed fresh on every
/// call since the device can change state between invocations.
#[derive(Debug, Clone)]
pub struct PowerState {
    pub wakefulness: Wakefulness,
    /// `mUserActivityTimeoutOverrideFromWindowManager`; -1 means no override.
    pub timeout_override: i64,
}

impl PowerState {
    /// Any override other than -1 means the keyguard is holding the screen.
    pub fn is_locked(&self) -> bool {
        self.timeout_override != -1
    }
}

pub fn parse_power_state(input: &str) -> Result<PowerState> {
    let wake_re = Regex::new(r"(?m)^\s*mWakefulness=(\S+)")?;
    let override_re =
        Regex::new(r"(?m)^\s*mUserActivityTimeoutOverrideFromWindowManager=(-?\d+)")?;

    let wakefulness = wake_re
        .captures(input)
        .map(|caps| Wakefulness::from_dump(&caps[1]))
        .context("dumpsys power output has no mWakefulness line")?;

    let timeout_override = override_re
        .captures(input)
        .and_then(|caps| caps[1].parse().ok())
        .context("dumpsys power output has no mUserActivityTimeoutOverrideFromWindowManager line")?;

    Ok(PowerState {
        wakefulness,
        timeout_override,
    })
}
