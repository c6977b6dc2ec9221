use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use ipnetwork::Ipv4Network;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

static CIDR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}(/([0-9]|[1-2][0-9]|3[0-2]))?$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:http(s)?://)?[\w.-]+(?:\.[\w.-]+)+[\w\-._~:/?#\[\]@!$&'()*+,;=.]+$").unwrap()
});

static HOST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$",
    )
    .unwrap()
});

/// Shape of a raw input token. Variants are listed in matching precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Cidr,
    Url,
    Host,
}

const PRECEDENCE: [TokenKind; 3] = [TokenKind::Cidr, TokenKind::Url, TokenKind::Host];

impl TokenKind {
    pub fn matches(&self, token: &str) -> bool {
        match self {
            TokenKind::Cidr => CIDR_REGEX.is_match(token),
            TokenKind::Url => URL_REGEX.is_match(token),
            TokenKind::Host => HOST_REGEX.is_match(token),
        }
    }

    /// First kind the token satisfies, if any.
    pub fn identify(token: &str) -> Option<TokenKind> {
        PRECEDENCE.into_iter().find(|kind| kind.matches(token))
    }

    fn targets(&self, token: &str) -> Vec<String> {
        match self {
            TokenKind::Cidr => cidr_to_targets(token),
            TokenKind::Url => {
                if token.starts_with("http://") || token.starts_with("https://") {
                    vec![token.to_string()]
                } else {
                    vec![format!("https://{}", token)]
                }
            }
            TokenKind::Host => vec![format!("https://{}", token)],
        }
    }
}

fn cidr_to_targets(cidr: &str) -> Vec<String> {
    match cidr.parse::<Ipv4Network>() {
        Ok(network) => network.iter().map(|ip| format!("https://{}", ip)).collect(),
        Err(e) => {
            err!("That's not a valid IP address or CIDR: {}", e);
            Vec::new()
        }
    }
}

/// Turns one trimmed token into its base targets. Unrecognized tokens yield nothing.
pub fn classify(token: &str) -> Vec<String> {
    match TokenKind::identify(token) {
        Some(kind) => kind.targets(token),
        None => Vec::new(),
    }
}

pub fn targets_from_input(token: &str, shuffle: bool) -> Vec<String> {
    let mut targets = classify(token.trim());
    if shuffle {
        targets.shuffle(&mut rand::thread_rng());
    }
    targets
}

/// Reads newline separated tokens. A missing or unreadable file is reported
/// and gives an empty list.
pub fn targets_from_file(path: &Path, shuffle: bool) -> Vec<String> {
    let mut targets = match read_targets(path) {
        Ok(targets) => targets,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            err!("Input file specified by you does not exist. Please check file path and location.");
            return Vec::new();
        }
        Err(e) => {
            err!("Unable to open the file {}: {}. Please check file path and permissions!", path.display(), e);
            return Vec::new();
        }
    };

    if shuffle {
        targets.shuffle(&mut rand::thread_rng());
    }
    targets
}

fn read_targets(path: &Path) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut targets = Vec::new();
    for (number, line) in reader.split(b'\n').enumerate() {
        let line = match String::from_utf8(line?) {
            Ok(line) => line,
            Err(_) => {
                err!("Skipping line {} of {}: not valid UTF-8", number + 1, path.display());
                continue;
            }
        };
        let token = line.trim();
        if !token.is_empty() {
            targets.extend(classify(token));
        }
    }
    Ok(targets)
}
