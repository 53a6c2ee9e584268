pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

pub const DEFAULT_INPUT_PATH: &str = "students_data_2.0.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "students.json";

/// Settings for one run after defaults, the TOML file and flags are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_path: String,
    pub output_path: String,
    pub delimiter: u8,
    pub monitor: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            delimiter: b',',
            monitor: false,
        }
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_delimiter("delimiter", self.delimiter as char)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use super::RunConfig;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "roster-etl")]
    #[command(about = "Converts a student CSV export into a JSON roster")]
    pub struct CliConfig {
        /// Input CSV file [default: students_data_2.0.csv]
        #[arg(long, global = true)]
        pub input: Option<String>,

        /// Output / roster JSON file [default: students.json]
        #[arg(long, global = true)]
        pub output: Option<String>,

        /// Field delimiter of the input file [default: ,]
        #[arg(long)]
        pub delimiter: Option<char>,

        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON lines")]
        pub json_logs: bool,

        #[arg(long, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Convert the CSV export into the JSON roster (default)
        Convert,
        /// Show the students in the roster
        List {
            /// Case-insensitive match on name or course
            #[arg(long)]
            search: Option<String>,
            /// Only show this gender
            #[arg(long)]
            gender: Option<String>,
        },
        /// Append a student to the roster
        Add {
            #[arg(long)]
            student_id: String,
            #[arg(long)]
            name: String,
            #[arg(long)]
            gender: String,
            #[arg(long)]
            email: String,
            #[arg(long, default_value = "")]
            course: String,
            #[arg(long, default_value = "")]
            year: String,
            #[arg(long, default_value = "")]
            university: String,
        },
        /// Remove a student from the roster by id
        Remove { student_id: String },
    }

    impl CliConfig {
        /// Merges built-in defaults, the optional TOML file and flags, in that order.
        pub fn resolve(&self) -> Result<RunConfig> {
            let mut config = RunConfig::default();

            if let Some(path) = &self.config {
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                file_config.apply_to(&mut config)?;
                tracing::debug!("Loaded configuration from {}", path);
            }

            if let Some(input) = &self.input {
                config.input_path = input.clone();
            }
            if let Some(output) = &self.output {
                config.output_path = output.clone();
            }
            if let Some(delimiter) = self.delimiter {
                config.delimiter = validation::validate_delimiter("--delimiter", delimiter)?;
            }
            config.monitor |= self.monitor;

            config.validate()?;
            Ok(config)
        }
    }

}
