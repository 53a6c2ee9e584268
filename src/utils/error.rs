use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Project,
    Write,
    Roster,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::Project => "project",
            Stage::Write => "write",
            Stage::Roster => "roster",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Missing column '{column}' in row {row}")]
    MissingField { column: String, row: usize },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: String },

    #[error("Roster file not found: {path}")]
    RosterNotFound { path: String },

    #[error("Roster file {path} is not a valid student list: {message}")]
    RosterFormat { path: String, message: String },
}

impl EtlError {
    pub fn stage(&self) -> Stage {
        match self {
            EtlError::InputNotFound { .. }
            | EtlError::Read { .. }
            | EtlError::Parse(_)
            | EtlError::MissingHeader => Stage::Load,
            EtlError::MissingField { .. } => Stage::Project,
            EtlError::Write { .. } | EtlError::Serialization(_) => Stage::Write,
            EtlError::Config { .. } | EtlError::InvalidConfigValue { .. } => Stage::Config,
            EtlError::Validation { .. }
            | EtlError::StudentNotFound { .. }
            | EtlError::RosterNotFound { .. }
            | EtlError::RosterFormat { .. } => Stage::Roster,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        format!("{} stage failed: {}", self.stage(), self)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::InputNotFound { .. } => {
                "Check that the input CSV exists or pass its location with --input"
            }
            EtlError::Read { .. } => "Check the input file permissions",
            EtlError::Parse(_) | EtlError::MissingHeader => {
                "Make sure the input is delimited text with a header row and a consistent column count"
            }
            EtlError::MissingField { .. } => {
                "The header must contain: Student ID, Full Name, Gender, Gmail, Program, Year Level, University"
            }
            EtlError::Write { .. } => {
                "Check that the output directory exists and is writable"
            }
            EtlError::Serialization(_) => "The dataset could not be encoded as JSON",
            EtlError::Config { .. } | EtlError::InvalidConfigValue { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            EtlError::Validation { .. } => "Correct the highlighted field and try again",
            EtlError::StudentNotFound { .. } => "Run `list` to see the student ids on file",
            EtlError::RosterNotFound { .. } => {
                "Run the conversion first to create the roster, or point --output at an existing one"
            }
            EtlError::RosterFormat { .. } => {
                "Regenerate the roster by running the conversion again"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.stage() {
            Stage::Config => 2,
            Stage::Write => 3,
            Stage::Load | Stage::Project | Stage::Roster => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
