use std::{fmt, path::Path};

use crate::model::taxonomy::Ruleset;

/// Which component of the packet pipeline wrote the log being watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Proxy,
    Server,
    Unknown,
}

impl Role {
    const NAMED: [(&'static str, Role); 3] = [
        ("client", Role::Client),
        ("proxy", Role::Proxy),
        ("server", Role::Server),
    ];

    /// Infer the role from the log's file name (case-insensitive).
    ///
    /// A prefix match beats a substring match, so `server_from_client.log`
    /// is a server log. Within each pass client is tried before proxy before
    /// server.
    pub fn infer(path: &Path) -> Self {
        let name = path
            .file_name()
            .unwrap_or(path.as_os_str())
            .to_string_lossy()
            .to_ascii_lowercase();

        Self::NAMED
            .iter()
            .find(|(key, _)| name.starts_with(key))
            .or_else(|| Self::NAMED.iter().find(|(key, _)| name.contains(key)))
            .map(|(_, role)| *role)
            .unwrap_or(Role::Unknown)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Proxy => "Proxy",
            Role::Server => "Server",
            Role::Unknown => "System",
        }
    }

    /// Category set used when the user does not pick one.
    pub fn default_ruleset(self) -> Ruleset {
        match self {
            Role::Proxy => Ruleset::Proxy,
            Role::Client | Role::Server | Role::Unknown => Ruleset::Default,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(s: &str) -> Role {
        Role::infer(Path::new(s))
    }

    #[test]
    fn prefix_names() {
        assert_eq!(infer("client.log"), Role::Client);
        assert_eq!(infer("proxy_run2.txt"), Role::Proxy);
        assert_eq!(infer("server"), Role::Server);
    }

    #[test]
    fn only_the_file_name_counts() {
        assert_eq!(infer("/var/log/server/client.log"), Role::Client);
        assert_eq!(infer("/home/proxy/events.log"), Role::Unknown);
    }

    #[test]
    fn substring_when_no_prefix() {
        assert_eq!(infer("logs/run1-proxy.log"), Role::Proxy);
        assert_eq!(infer("udp_server_out.txt"), Role::Server);
    }

    #[test]
    fn prefix_wins_over_earlier_substring() {
        assert_eq!(infer("server_from_client.log"), Role::Server);
        assert_eq!(infer("proxy-client-side.log"), Role::Proxy);
    }

    #[test]
    fn substring_order_is_client_proxy_server() {
        assert_eq!(infer("run_server_proxy.log"), Role::Proxy);
        assert_eq!(infer("x_server_client.log"), Role::Client);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(infer("Client.LOG"), Role::Client);
        assert_eq!(infer("PROXY.log"), Role::Proxy);
    }

    #[test]
    fn unknown_falls_back_to_system_and_default_ruleset() {
        let role = infer("events.log");
        assert_eq!(role, Role::Unknown);
        assert_eq!(role.to_string(), "System");
        assert_eq!(role.default_ruleset(), Ruleset::Default);
    }

    #[test]
    fn proxy_gets_proxy_ruleset() {
        assert_eq!(Role::Proxy.default_ruleset(), Ruleset::Proxy);
        assert_eq!(Role::Client.default_ruleset(), Ruleset::Default);
        assert_eq!(Role::Server.default_ruleset(), Ruleset::Default);
    }
}
