use anyhow::{Context, Result};
use std::future::Future;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command as TokioCommand;

/// Seam between command construction and process execution; tests swap the
/// real binary for a scripted double.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout_ms: u64,
    ) -> impl Future<Output = Result<Output>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdbRunner;

impl CommandRunner for AdbRunner {
    async fn run(&self, program: &str, args: &[&str], timeout_ms: u64) -> Result<Output> {
        let invocation = TokioCommand::new(program).args(args).output();

        tokio::time::timeout(Duration::from_millis(timeout_ms), invocation)
            .await
            .with_context(|| {
                format!(
                    "`{} {}` did not finish within {} ms",
                    program,
                    args.join(" "),
                    timeout_ms
                )
            })?
            .with_context(|| format!("Could not spawn {}; is it on PATH?", program))
    }
}
