use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "droidctl")]
#[command(version, about = "Drive an Android device through the adb CLI")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Device serial (falls back to `device` in the config file)
    #[arg(short, long, global = true)]
    pub serial: Option<String>,

    /// Path to the adb binary
    #[arg(long, global = true)]
    pub adb: Option<String>,

    /// TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Per-invocation timeout for adb commands
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    Devices,

    Pidof {
        package: String,
    },

    UnlockScreen,

    PowerState,

    Shell {
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}
