use std::path::PathBuf;

use clap::Parser;
use ntlmrecon::config::{DEFAULT_THREADS, DEFAULT_TIMEOUT};
use ntlmrecon::{err, log, Color, OutputType, ReconError, RunConfig};

#[derive(Parser, Debug)]
#[command(about = "Enumerate information from NTLM authentication enabled web endpoints")]
struct Args {
    /// Pass input as an IP address, URL or CIDR to enumerate NTLM endpoints
    #[arg(short, long)]
    input: Option<String>,

    /// Pass input from a local file
    #[arg(short = 'I', long)]
    infile: Option<PathBuf>,

    /// Override the internal wordlist with a custom wordlist
    #[arg(long)]
    wordlist: Option<PathBuf>,

    /// Set number of threads
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Output type
    #[arg(short = 'o', long, value_enum, default_value_t = OutputType::Json)]
    output_type: OutputType,

    /// Set output file name
    #[arg(short = 'O', long)]
    outfile: Option<PathBuf>,

    /// Randomize user agents when sending requests
    #[arg(long)]
    random_user_agent: bool,

    /// Force enumerate all endpoints even if a valid endpoint is found for a URL
    #[arg(long)]
    force_all: bool,

    /// Break order of the input files
    #[arg(long)]
    shuffle: bool,

    /// Force replace output file if it already exists
    #[arg(short, long)]
    force: bool,

    /// Use a proxy to connect to the target
    #[arg(short, long)]
    proxy: Option<String>,

    /// Suppress all output except errors
    #[arg(short, long)]
    silent: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT)]
    timeout: u64,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            infile: args.infile,
            wordlist: args.wordlist,
            threads: args.threads,
            output_type: args.output_type,
            outfile: args.outfile,
            random_user_agent: args.random_user_agent,
            force_all: args.force_all,
            shuffle: args.shuffle,
            force: args.force,
            proxy: args.proxy,
            silent: args.silent,
            timeout: args.timeout,
        }
    }
}

fn main() {
    let config = RunConfig::from(Args::parse());

    match ntlmrecon::run(&config) {
        Ok(summary) => {
            if !config.silent {
                log!(
                    "Done: {} target(s), {} request(s), {} endpoint(s) found",
                    summary.targets,
                    summary.probes,
                    Color::wrap(&summary.discoveries.to_string(), Color::CYAN)
                );
            }
        }
        Err(ReconError::MissingInput) => err!("{}", ReconError::MissingInput),
        Err(e) => {
            err!("{}", e);
            std::process::exit(1);
        }
    }
}
