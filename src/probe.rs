use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use reqwest::{header, Proxy};
use serde::Serialize;

use crate::config::RunConfig;
use crate::error::ReconError;
use crate::ntlm::{Challenge, NTLM};
use crate::Color;

const USER_AGENTS: [&str; 8] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.80",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:95.0) Gecko/20100101 Firefox/95.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko",
];

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// One endpoint that answered with an NTLM challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub url: String,
    pub domain: String,
    pub server: String,
    pub dns_domain: String,
    pub fqdn: String,
    pub parent: String,
}

impl Discovery {
    pub fn from_challenge(url: &str, challenge: Challenge) -> Self {
        Self {
            url: url.to_string(),
            domain: challenge.nb_domain.unwrap_or(challenge.target_name),
            server: challenge.nb_computer.unwrap_or_default(),
            dns_domain: challenge.dns_domain.unwrap_or_default(),
            fqdn: challenge.dns_computer.unwrap_or_default(),
            parent: challenge.dns_tree.unwrap_or_default(),
        }
    }
}

/// Checks a single URL. `None` covers every kind of miss: no NTLM offered,
/// an unparseable challenge or a transport error.
pub trait Probe: Sync {
    fn probe(&self, url: &str) -> Option<Discovery>;
}

impl<F> Probe for F
where
    F: Fn(&str) -> Option<Discovery> + Sync,
{
    fn probe(&self, url: &str) -> Option<Discovery> {
        self(url)
    }
}

#[derive(Debug)]
pub struct NtlmProbe {
    http_client: Client,
    negotiate: String,
    random_user_agent: bool,
    silent: bool,
}

impl NtlmProbe {
    pub fn new(config: &RunConfig) -> Result<Self, ReconError> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(config.timeout))
            .redirect(reqwest::redirect::Policy::none());

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(Proxy::all(proxy)?);
        }

        Ok(Self {
            http_client: builder.build()?,
            negotiate: NTLM::negotiate_header(),
            random_user_agent: config.random_user_agent,
            silent: config.silent,
        })
    }

    fn challenge_token(response: &reqwest::blocking::Response) -> Option<String> {
        response
            .headers()
            .get_all(header::WWW_AUTHENTICATE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|value| value.trim().strip_prefix("NTLM ").map(str::to_string))
    }
}

impl Probe for NtlmProbe {
    fn probe(&self, url: &str) -> Option<Discovery> {
        let mut request = self
            .http_client
            .get(url)
            .header(header::AUTHORIZATION, self.negotiate.as_str());
        if self.random_user_agent {
            request = request.header(header::USER_AGENT, random_user_agent());
        }

        let response = request.send().ok()?;
        let token = Self::challenge_token(&response)?;

        match NTLM::parse_challenge(&token) {
            Ok(challenge) => {
                if !self.silent {
                    msg!("FOUND NTLM - {}", Color::wrap(url, Color::CYAN));
                }
                Some(Discovery::from_challenge(url, challenge))
            }
            Err(e) => {
                if !self.silent {
                    log!("Ignoring malformed challenge from {}: {}", url, e);
                }
                None
            }
        }
    }
}
