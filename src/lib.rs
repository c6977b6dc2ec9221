#[derive(Debug)]
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";

    pub fn wrap(text: &str, color: &str) -> String {
        format!("{}{}{}", color, text, Self::RESET)
    }
}

#[macro_export]
macro_rules! msg {
    ( $( $x:tt )* ) => {
        {
            println!("{} {}", $crate::Color::wrap("[+]", $crate::Color::GREEN), format!($($x)*));
        }
    };
}

/// Diagnostics go to stderr so they never interleave with records printed on stdout.
#[macro_export]
macro_rules! err {
    ( $( $x:tt )* ) => {
        {
            eprintln!("{} {}", $crate::Color::wrap("[-]", $crate::Color::RED), format!($($x)*));
        }
    };
}

#[macro_export]
macro_rules! log {
    ( $( $x:tt )* ) => {
        {
            println!("{} {}", $crate::Color::wrap("[*]", &format!("{}{}", $crate::Color::BOLD, $crate::Color::YELLOW)), format!($($x)*));
        }
    };
}

pub mod config;
pub mod error;
pub mod input;
pub mod ntlm;
pub mod output;
pub mod probe;
pub mod runner;
pub mod scanner;
pub mod wordlist;

pub use config::{OutputType, RunConfig};
pub use error::ReconError;
pub use probe::{Discovery, NtlmProbe, Probe};
pub use runner::{run, run_with_probe, RunSummary};
