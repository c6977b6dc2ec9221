use std::fs;
use std::path::Path;

use crate::error::ReconError;

/// Paths commonly protected by NTLM on Exchange, Lync/Skype, ADFS and IIS hosts.
pub const INTERNAL_WORDLIST: [&str; 50] = [
    "/abs",
    "/adfs/services/trust/2005/windowstransport",
    "/adfs/ls/wia",
    "/aspnet_client/",
    "/Autodiscover",
    "/Autodiscover/AutodiscoverService.svc/root",
    "/Autodiscover/Autodiscover.xml",
    "/AutoUpdate/",
    "/CertEnroll/",
    "/CertProv",
    "/CertSrv/",
    "/Conf/",
    "/debug/",
    "/deviceupdatefiles_ext/",
    "/deviceupdatefiles_int/",
    "/dialin",
    "/ecp/",
    "/Etc/",
    "/EWS/",
    "/EWS/Exchange.asmx",
    "/Exchange/",
    "/Exchweb/",
    "/GroupExpansion/",
    "/HybridConfig",
    "/iwa/authenticated.aspx",
    "/iwa/iwa_test.aspx",
    "/mapi/",
    "/mcx",
    "/meet",
    "/Microsoft-Server-ActiveSync/",
    "/OAB/",
    "/ocsp/",
    "/owa/",
    "/PersistentChat",
    "/PhoneConferencing/",
    "/PowerShell/",
    "/Public/",
    "/Reach/sip.svc",
    "/RequestHandler/",
    "/RequestHandlerExt",
    "/RequestHandlerExt/",
    "/Rgs/",
    "/RgsClients",
    "/Rpc/",
    "/RpcWithCert/",
    "/scheduler",
    "/Ucwa",
    "/UnifiedMessaging/",
    "/WebTicket",
    "/WebTicket/WebTicketService.svc",
];

pub fn default_wordlist() -> Vec<String> {
    INTERNAL_WORDLIST.iter().map(|word| word.to_string()).collect()
}

/// Replaces the built-in list entirely with the lines of `path`. Blank lines
/// are kept and probe the target root.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>, ReconError> {
    let content = fs::read_to_string(path).map_err(|source| ReconError::Wordlist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.lines().map(String::from).collect())
}

pub fn resolve(path: Option<&Path>) -> Result<Vec<String>, ReconError> {
    match path {
        Some(path) => load_wordlist(path),
        None => Ok(default_wordlist()),
    }
}
