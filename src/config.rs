use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::ReconError;

pub const DEFAULT_THREADS: usize = 10;
pub const DEFAULT_TIMEOUT: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputType {
    Csv,
    #[default]
    Json,
    Stdout,
}

impl OutputType {
    /// Output file used when no `--outfile` is given. Console output has none.
    pub fn default_file(&self) -> Option<PathBuf> {
        match self {
            OutputType::Csv => Some(PathBuf::from("ntlmrecon.csv")),
            OutputType::Json => Some(PathBuf::from("ntlmrecon.json")),
            OutputType::Stdout => None,
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

/// Settings for a single invocation. Built once from the command line and
/// only ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: Option<String>,
    pub infile: Option<PathBuf>,
    pub wordlist: Option<PathBuf>,
    pub threads: usize,
    pub output_type: OutputType,
    pub outfile: Option<PathBuf>,
    pub random_user_agent: bool,
    /// Accepted for compatibility, has no effect on the scan.
    pub force_all: bool,
    pub shuffle: bool,
    pub force: bool,
    pub proxy: Option<String>,
    pub silent: bool,
    pub timeout: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: None,
            infile: None,
            wordlist: None,
            threads: DEFAULT_THREADS,
            output_type: OutputType::default(),
            outfile: None,
            random_user_agent: false,
            force_all: false,
            shuffle: false,
            force: false,
            proxy: None,
            silent: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ReconError> {
        if self.input.is_none() && self.infile.is_none() {
            return Err(ReconError::MissingInput);
        }
        Ok(())
    }

    /// The file records end up in, or `None` when printing to the console.
    pub fn resolved_outfile(&self) -> Option<PathBuf> {
        match self.output_type {
            OutputType::Stdout => None,
            _ => self.outfile.clone().or_else(|| self.output_type.default_file()),
        }
    }
}
