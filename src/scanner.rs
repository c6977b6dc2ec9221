use std::sync::Mutex;

use crossbeam_channel as channel;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::ReconError;
use crate::probe::{Discovery, Probe};
use crate::Color;

/// Joins `base` with every wordlist entry, in wordlist order.
pub fn expand(base: &str, wordlist: &[String]) -> Vec<String> {
    wordlist
        .iter()
        .map(|word| format!("{}/{}", base, word.trim_start_matches('/')))
        .collect()
}

/// Fixed set of workers shared by every target of a run.
#[derive(Debug)]
pub struct Scanner {
    pool: ThreadPool,
    workers: usize,
}

impl Scanner {
    pub fn new(threads: usize) -> Result<Self, ReconError> {
        let workers = threads.max(1);
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Probes every wordlist entry on `base` and returns the hits once all
    /// probes for this target are done.
    pub fn scan<P>(&self, base: &str, wordlist: &[String], probe: &P, silent: bool) -> Vec<Discovery>
    where
        P: Probe + ?Sized,
    {
        if !silent {
            msg!(
                "Brute-forcing {} endpoints on {}",
                wordlist.len(),
                Color::wrap(base, Color::BOLD)
            );
        }

        let urls = expand(base, wordlist);
        if urls.is_empty() {
            return Vec::new();
        }

        // The queue holds the whole expansion so filling it never waits on a worker.
        let (tx, rx) = channel::bounded::<String>(urls.len());
        for url in urls {
            if tx.send(url).is_err() {
                break;
            }
        }
        drop(tx);

        let found = Mutex::new(Vec::new());
        let workers = self.workers.min(rx.len());
        self.pool.scope(|s| {
            for _ in 0..workers {
                s.spawn(|_| {
                    while let Ok(url) = rx.recv() {
                        if let Some(discovery) = probe.probe(&url) {
                            if let Ok(mut found) = found.lock() {
                                found.push(discovery);
                            }
                        }
                    }
                });
            }
        });

        found.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
