use base64::prelude::*;
use thiserror::Error;

const SIGNATURE: &[u8; 8] = b"NTLMSSP\0";
const NEGOTIATE_MESSAGE: u32 = 1;
const CHALLENGE_MESSAGE: u32 = 2;

const NEGOTIATE_UNICODE: u32 = 0x0000_0001;
const NEGOTIATE_OEM: u32 = 0x0000_0002;
const REQUEST_TARGET: u32 = 0x0000_0004;
const NEGOTIATE_NTLM: u32 = 0x0000_0200;
const NEGOTIATE_ALWAYS_SIGN: u32 = 0x0000_8000;
const NEGOTIATE_EXTENDED_SESSIONSECURITY: u32 = 0x0008_0000;
const NEGOTIATE_128: u32 = 0x2000_0000;
const NEGOTIATE_56: u32 = 0x8000_0000;

// AV_PAIR identifiers carried in the challenge TargetInfo block.
const AV_EOL: u16 = 0;
const AV_NB_COMPUTER_NAME: u16 = 1;
const AV_NB_DOMAIN_NAME: u16 = 2;
const AV_DNS_COMPUTER_NAME: u16 = 3;
const AV_DNS_DOMAIN_NAME: u16 = 4;
const AV_DNS_TREE_NAME: u16 = 5;

#[derive(Debug, Error)]
pub enum NtlmError {
    #[error("Not a base64 encoded string: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Challenge truncated")]
    Truncated,
    #[error("Missing NTLMSSP signature")]
    BadSignature,
    #[error("Expected a challenge message, got type {0}")]
    UnexpectedType(u32),
    #[error("Could not decode UTF-16 field")]
    Utf16,
}

/// Identity fields a server leaks in its Type-2 challenge.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub target_name: String,
    pub nb_computer: Option<String>,
    pub nb_domain: Option<String>,
    pub dns_computer: Option<String>,
    pub dns_domain: Option<String>,
    pub dns_tree: Option<String>,
}

#[derive(Debug)]
pub struct NTLM;

impl NTLM {
    /// Type-1 message ready to go in an `Authorization` header.
    pub fn negotiate_header() -> String {
        let flags = NEGOTIATE_UNICODE
            | NEGOTIATE_OEM
            | REQUEST_TARGET
            | NEGOTIATE_NTLM
            | NEGOTIATE_ALWAYS_SIGN
            | NEGOTIATE_EXTENDED_SESSIONSECURITY
            | NEGOTIATE_128
            | NEGOTIATE_56;

        let mut raw = Vec::with_capacity(32);
        raw.extend_from_slice(SIGNATURE);
        raw.extend_from_slice(&NEGOTIATE_MESSAGE.to_le_bytes());
        raw.extend_from_slice(&flags.to_le_bytes());
        // empty domain and workstation security buffers
        raw.extend_from_slice(&[0u8; 16]);

        format!("NTLM {}", BASE64_STANDARD.encode(raw))
    }

    /// Parses the base64 token following `NTLM ` in a `WWW-Authenticate` header.
    pub fn parse_challenge(ntlm_response: &str) -> Result<Challenge, NtlmError> {
        let raw = BASE64_STANDARD.decode(ntlm_response.trim())?;
        if raw.len() < 32 {
            return Err(NtlmError::Truncated);
        }
        if &raw[..8] != SIGNATURE {
            return Err(NtlmError::BadSignature);
        }
        let message_type = read_u32(&raw, 8)?;
        if message_type != CHALLENGE_MESSAGE {
            return Err(NtlmError::UnexpectedType(message_type));
        }

        let mut challenge = Challenge {
            target_name: utf16_string(security_buffer(&raw, 12)?)?,
            ..Default::default()
        };

        // Old servers stop after the reserved field and send no TargetInfo.
        if raw.len() < 48 {
            return Ok(challenge);
        }

        let mut info = security_buffer(&raw, 40)?;
        while info.len() >= 4 {
            let id = u16::from_le_bytes([info[0], info[1]]);
            let len = u16::from_le_bytes([info[2], info[3]]) as usize;
            if id == AV_EOL {
                break;
            }
            let value = info.get(4..4 + len).ok_or(NtlmError::Truncated)?;
            let slot = match id {
                AV_NB_COMPUTER_NAME => &mut challenge.nb_computer,
                AV_NB_DOMAIN_NAME => &mut challenge.nb_domain,
                AV_DNS_COMPUTER_NAME => &mut challenge.dns_computer,
                AV_DNS_DOMAIN_NAME => &mut challenge.dns_domain,
                AV_DNS_TREE_NAME => &mut challenge.dns_tree,
                _ => {
                    info = &info[4 + len..];
                    continue;
                }
            };
            *slot = Some(utf16_string(value)?);
            info = &info[4 + len..];
        }

        Ok(challenge)
    }
}

fn read_u32(raw: &[u8], offset: usize) -> Result<u32, NtlmError> {
    raw.get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(NtlmError::Truncated)
}

/// Resolves a (len, max_len, offset) descriptor to the bytes it points at.
fn security_buffer(raw: &[u8], at: usize) -> Result<&[u8], NtlmError> {
    let header = raw.get(at..at + 8).ok_or(NtlmError::Truncated)?;
    let len = u16::from_le_bytes([header[0], header[1]]) as usize;
    let offset = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    if len == 0 {
        return Ok(&[]);
    }
    raw.get(offset..offset + len).ok_or(NtlmError::Truncated)
}

fn utf16_string(bytes: &[u8]) -> Result<String, NtlmError> {
    if bytes.len() % 2 != 0 {
        return Err(NtlmError::Utf16);
    }
    String::from_utf16(
        &bytes
            .chunks(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<_>>(),
    )
    .map_err(|_| NtlmError::Utf16)
}
