use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "numintel")]
#[command(about = "Phone-number intelligence aggregator with map rendering and simulated live tracking")]
#[command(version)]
pub struct Cli {
    /// Create default configuration file at ./config/numintel.toml
    #[arg(long)]
    pub init: bool,

    /// Phone number (with country code) to track once, skipping the
    /// interactive menu
    #[arg(short, long)]
    pub number: Option<String>,

    /// With --number: also run live tracking for this many seconds after
    /// the one-shot lookup
    #[arg(short = 'd', long, value_name = "SECONDS")]
    pub duration: Option<u64>,

    /// Directory map artifacts are written to (overrides config)
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Verbose logging (use -v for detailed, -vv for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Export execution logs to a file (specify file path)
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(number) = &self.number {
            if number.trim().is_empty() {
                return Err("Phone number cannot be empty".to_string());
            }
        }
        if let Some(duration) = self.duration {
            if self.number.is_none() {
                return Err("--duration requires --number".to_string());
            }
            if duration == 0 {
                return Err("Duration must be greater than 0".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_requires_number() {
        let cli = Cli::parse_from(["numintel", "--duration", "30"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let cli = Cli::parse_from(["numintel", "--number", "+15550100", "--duration", "0"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_one_shot_args_accepted() {
        let cli = Cli::parse_from(["numintel", "-n", "+1 555 0100", "-d", "30", "-vv"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.verbose, 2);
    }
}
