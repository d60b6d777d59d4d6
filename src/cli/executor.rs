use super::{app::*, output};
use crate::core::client::AdbClient;
use crate::core::config::Settings;
use crate::{Context, Result};

pub async fn execute(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(adb) = cli.adb {
        settings.adb_bin = adb;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        settings.timeout_ms = timeout_ms;
    }

    let device = cli.serial.or_else(|| settings.device.clone());
    let client = AdbClient::new(settings.adb_bin, settings.timeout_ms);

    match cli.command {
        Commands::Devices => {
            let serials = client.devices().await?;
            if serials.is_empty() {
                println!("No devices attached");
            }
            for serial in serials {
                println!("{}", serial);
            }
        }

        Commands::Pidof { package } => {
            let device = require_device(device)?;
            match client.pidof(&device, &package).await? {
                Some(pid) => println!("{}", pid),
                None => println!("No process matching '{}'", package),
            }
        }

        Commands::UnlockScreen => {
            let device = require_device(device)?;
            client.unlock_screen(&device).await?;
            output::print_success("Screen is awake and unlocked");
        }

        Commands::PowerState => {
            let device = require_device(device)?;
            let state = client.power_state(&device).await?;
            output::print_power_state(&state);
        }

        Commands::Shell { command } => {
            let device = require_device(device)?;
            let args: Vec<&str> = command.iter().map(String::as_str).collect();
            let stdout = client.shell(&device, &args).await?;
            println!("{}", stdout);
        }
    }

    Ok(())
}

fn require_device(device: Option<String>) -> Result<String> {
    device.context("No device serial given (pass -s or set `device` in the config file)")
}
