use std::fs;

use crate::config::RunConfig;
use crate::error::ReconError;
use crate::input;
use crate::output::Sink;
use crate::probe::{NtlmProbe, Probe};
use crate::scanner::Scanner;
use crate::wordlist;
use crate::Color;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub targets: usize,
    pub probes: usize,
    pub discoveries: usize,
}

/// Runs a full scan with the real NTLM probe.
pub fn run(config: &RunConfig) -> Result<RunSummary, ReconError> {
    config.validate()?;
    let probe = NtlmProbe::new(config)?;
    run_with_probe(config, &probe)
}

pub fn run_with_probe<P>(config: &RunConfig, probe: &P) -> Result<RunSummary, ReconError>
where
    P: Probe + ?Sized,
{
    config.validate()?;

    let outfile = config.resolved_outfile();
    if let Some(path) = &outfile {
        if path.exists() && !config.force {
            fs::remove_file(path).map_err(|source| ReconError::StaleOutput {
                path: path.clone(),
                source,
            })?;
        }
    }

    let targets = match (&config.input, &config.infile) {
        (Some(token), _) => input::targets_from_input(token, config.shuffle),
        (None, Some(path)) => input::targets_from_file(path, config.shuffle),
        (None, None) => Vec::new(),
    };

    let words = wordlist::resolve(config.wordlist.as_deref())?;

    let mut summary = RunSummary::default();
    if targets.is_empty() {
        if !config.silent {
            log!("No valid targets found, nothing to do");
        }
        return Ok(summary);
    }

    let scanner = Scanner::new(config.threads)?;
    let sink = Sink::new(config.output_type, outfile, config.silent);

    if !config.silent {
        msg!(
            "Scanning {} target(s) using {} threads",
            targets.len(),
            Color::wrap(&scanner.workers().to_string(), Color::YELLOW)
        );
    }

    for target in &targets {
        let found = scanner.scan(target, &words, probe, config.silent);
        summary.targets += 1;
        summary.probes += words.len();
        if found.is_empty() {
            continue;
        }
        summary.discoveries += found.len();
        sink.write(&found)?;
    }

    Ok(summary)
}
