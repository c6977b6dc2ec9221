use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::config::OutputType;
use crate::error::ReconError;
use crate::probe::Discovery;
use crate::Color;

pub const CSV_HEADER: [&str; 6] = [
    "URL",
    "AD Domain Name",
    "Server Name",
    "DNS Domain Name",
    "FQDN",
    "Parent DNS Domain",
];

pub fn write_json<W: Write>(writer: &mut W, records: &[Discovery]) -> Result<(), ReconError> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, records: &[Discovery], with_header: bool) -> Result<(), ReconError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    if with_header {
        wtr.write_record(CSV_HEADER)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Where a run's discoveries go.
#[derive(Debug)]
pub struct Sink {
    output_type: OutputType,
    path: Option<PathBuf>,
    silent: bool,
}

impl Sink {
    pub fn new(output_type: OutputType, path: Option<PathBuf>, silent: bool) -> Self {
        Self { output_type, path, silent }
    }

    /// Writes one target's batch. A file that already exists is appended to,
    /// otherwise it is created, with the csv header if applicable.
    pub fn write(&self, records: &[Discovery]) -> Result<(), ReconError> {
        if records.is_empty() {
            return Ok(());
        }

        let path = match (self.output_type, &self.path) {
            (OutputType::Stdout, _) | (_, None) => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                return write_json(&mut lock, records);
            }
            (_, Some(path)) => path,
        };

        let existed = path.exists();
        let opened = if existed {
            OpenOptions::new().append(true).open(path)
        } else {
            File::create(path)
        };
        let file = opened.map_err(|source| ReconError::Output { path: path.clone(), source })?;

        let result = match self.output_type {
            OutputType::Csv => write_csv(file, records, !existed),
            _ => write_json(&mut BufWriter::new(file), records),
        };
        result.map_err(|e| match e {
            ReconError::Io(source) => ReconError::Output { path: path.clone(), source },
            other => other,
        })?;

        if !self.silent {
            msg!(
                "Output saved to {} ({})",
                Color::wrap(&path.display().to_string(), Color::GREEN),
                self.output_type
            );
        }
        Ok(())
    }
}
