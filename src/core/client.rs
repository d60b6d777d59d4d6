use anyhow::{bail, Result};
use tracing::debug;

use crate::core::cmd::{AdbRunner, CommandRunner};
use crate::core::dumpsys::power::{self, PowerState};
use crate::core::input::KeyCode;
use crate::core::ps;

/// Wrapper around one adb binary. Each method is a single request/response
/// cycle against the external process; nothing is cached between calls.
/// Calls against different serials are independent; callers serialize calls
/// against the same serial themselves if they need ordering.
pub struct AdbClient<R = AdbRunner> {
    adb_bin: String,
    timeout_ms: u64,
    runner: R,
}

impl AdbClient {
    pub fn new(adb_bin: impl Into<String>, timeout_ms: u64) -> Self {
        Self::with_runner(adb_bin, timeout_ms, AdbRunner)
    }
}

impl<R: CommandRunner> AdbClient<R> {
    pub fn with_runner(adb_bin: impl Into<String>, timeout_ms: u64, runner: R) -> Self {
        Self {
            adb_bin: adb_bin.into(),
            timeout_ms,
            runner,
        }
    }

    /// Run `adb -s <device> shell <command...>` and return trimmed stdout.
    /// A non-zero exit propagates as an error with stderr attached.
    pub async fn shell(&self, device: &str, command: &[&str]) -> Result<String> {
        let mut args = vec!["-s", device, "shell"];
        args.extend_from_slice(command);

        debug!(target: "droidctl::adb", "adb -s {} shell {}", device, command.join(" "));

        let out = self.runner.run(&self.adb_bin, &args, self.timeout_ms).await?;
        if !out.status.success() {
            bail!(
                "adb shell `{}` failed on {}: {}",
                command.join(" "),
                device,
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }

    /// Pid of the first running process whose name contains `package`.
    /// `None` means "process absent", never an error.
    pub async fn pidof(&self, device: &str, package: &str) -> Result<Option<u32>> {
        let listing = self.shell(device, &["ps"]).await?;
        Ok(ps::find_pid(&listing, package))
    }

    pub async fn power_state(&self, device: &str) -> Result<PowerState> {
        let raw = self.shell(device, &["dumpsys", "power"]).await?;
        power::parse_power_state(&raw)
    }

    /// Wake and unlock the screen with the minimum key events for the
    /// current power state:
    ///
    /// - asleep: press power
    /// - locked (timeout override != -1): press menu, after power if both
    ///
    /// A dump without the expected fields is an error, not a silent no-op.
    pub async fn unlock_screen(&self, device: &str) -> Result<()> {
        let state = self.power_state(device).await?;
        debug!(target: "droidctl::adb", "power state on {}: {:?}", device, state);

        if !state.wakefulness.is_awake() {
            self.key_event(device, KeyCode::Power).await?;
        }
        if state.is_locked() {
            self.key_event(device, KeyCode::Menu).await?;
        }

        Ok(())
    }

    pub async fn key_event(&self, device: &str, key: KeyCode) -> Result<()> {
        self.shell(device, &["input", "keyevent", key.as_str()]).await?;
        Ok(())
    }

    /// Serials of attached devices in state `device`, from `adb devices`.
    pub async fn devices(&self) -> Result<Vec<String>> {
        let out = self
            .runner
            .run(&self.adb_bin, &["devices"], self.timeout_ms)
            .await?;
        if !out.status.success() {
            bail!(
                "adb devices failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }

        let raw = String::from_utf8_lossy(&out.stdout).to_string();
        let serials = raw
            .lines()
            .filter_map(|line| {
                if line.trim().is_empty() || line.starts_with("List of devices") {
                    return None;
                }
                let mut cols = line.split_whitespace();
                let serial = cols.next()?;
                match cols.next() {
                    Some("device") => Some(serial.to_string()),
                    _ => None,
                }
            })
            .collect();

        Ok(serials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Output};

    /// Replays queued stdout fixtures and records every invocation, in
    /// order. Stands in for the adb binary.
    struct ScriptedRunner {
        responses: RefCell<VecDeque<String>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: RefCell::new(responses.iter().map(|s| s.to_string()).collect()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(
            &self,
            _program: &str,
            args: &[&str],
            _timeout_ms: u64,
        ) -> impl Future<Output = Result<Output>> {
            self.calls.borrow_mut().push(args.join(" "));
            let stdout = self.responses.borrow_mut().pop_front().unwrap_or_default();
            async move {
                Ok(Output {
                    status: ExitStatus::from_raw(0),
                    stdout: stdout.into_bytes(),
                    stderr: Vec::new(),
                })
            }
        }
    }

    fn client(responses: &[&str]) -> AdbClient<ScriptedRunner> {
        AdbClient::with_runner("adb", 5000, ScriptedRunner::new(responses))
    }

    fn power_dump(wakefulness: &str, timeout_override: &str) -> String {
        format!(
            "
        mWakefulness={}
        mWakefulnessChanging=false
        mWakeLockSummary=0x0
        mUserActivitySummary=0x1
        mUserActivityTimeoutOverrideFromWindowManager={}
        mUserInactiveOverrideFromWindowManager=false
      ",
            wakefulness, timeout_override
        )
    }

    async fn unlock_calls(wakefulness: &str, timeout_override: &str) -> Vec<String> {
        let dump = power_dump(wakefulness, timeout_override);
        let client = client(&[dump.as_str()]);
        client.unlock_screen("mockEmulator").await.unwrap();
        client.runner.calls.into_inner()
    }

    #[tokio::test]
    async fn test_awake_unlocked_presses_nothing() {
        let calls = unlock_calls("Awake", "-1").await;
        assert_eq!(calls, vec!["-s mockEmulator shell dumpsys power"]);
    }

    #[tokio::test]
    async fn test_asleep_locked_presses_power_then_menu() {
        let calls = unlock_calls("Asleep", "10000").await;
        assert_eq!(
            calls,
            vec![
                "-s mockEmulator shell dumpsys power",
                "-s mockEmulator shell input keyevent KEYCODE_POWER",
                "-s mockEmulator shell input keyevent KEYCODE_MENU",
            ]
        );
    }

    #[tokio::test]
    async fn test_awake_locked_presses_only_menu() {
        let calls = unlock_calls("Awake", "10000").await;
        assert_eq!(
            calls,
            vec![
                "-s mockEmulator shell dumpsys power",
                "-s mockEmulator shell input keyevent KEYCODE_MENU",
            ]
        );
    }

    #[tokio::test]
    async fn test_asleep_unlocked_presses_only_power() {
        let calls = unlock_calls("Asleep", "-1").await;
        assert_eq!(
            calls,
            vec![
                "-s mockEmulator shell dumpsys power",
                "-s mockEmulator shell input keyevent KEYCODE_POWER",
            ]
        );
    }

    #[tokio::test]
    async fn test_unlock_fails_on_unrecognized_dump() {
        let client = client(&["no power manager here"]);
        let err = client.unlock_screen("mockEmulator").await.unwrap_err();
        assert!(err.to_string().contains("mWakefulness"));
        // and no key event went out
        assert_eq!(client.runner.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_pidof_parses_listing() {
        let ps = "USER PID PPID VSIZE RSS WCHAN PC NAME\n\
            u0_a7 1969 1288 1594388 89840 SyS_epoll_ 00000000 S com.google.android.gms.persistent\n\
            u0_a7 2160 1288 1650456 103664 SyS_epoll_ 00000000 S com.google.android.gms\n";
        let client = client(&[ps]);
        let pid = client.pidof("emulator-5554", "com.google.android.gms").await.unwrap();
        assert_eq!(pid, Some(2160));
        assert_eq!(
            client.runner.calls.into_inner(),
            vec!["-s emulator-5554 shell ps"]
        );
    }

    #[tokio::test]
    async fn test_pidof_empty_output_is_none() {
        let client = client(&[""]);
        let pid = client.pidof("emulator-5554", "com.google.android.gms").await.unwrap();
        assert_eq!(pid, None);
    }

    #[tokio::test]
    async fn test_devices_skips_header_and_offline() {
        let client = client(&["List of devices attached\n\
            emulator-5554\tdevice\n\
            0a388e93\toffline\n\
            \n"]);
        let serials = client.devices().await.unwrap();
        assert_eq!(serials, vec!["emulator-5554"]);
    }
}
