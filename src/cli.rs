use clap::Parser;
use std::path::PathBuf;

// Build version with UI backend info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "UI:     eframe/egui 0.33\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Node-graph canvas editor
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Open the Journey Builder tab first instead of the Workflow Builder
    #[arg(short = 'j', long = "journey")]
    pub journey: bool,

    /// Start with empty canvases instead of the seeded demo graphs
    #[arg(short = 'e', long = "empty")]
    pub empty: bool,

    /// Start maximized
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Enable debug logging to file (default: flowpad.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
