use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MailAddress {
    pub name: Option<String>,
    pub addr: String,
}

impl MailAddress {
    /// Build a normalized address, or `None` when nothing is left after trimming
    pub fn new(name: Option<&str>, addr: &str, lowercase: bool) -> Option<Self> {
        let addr = addr.trim().trim_start_matches('<').trim_end_matches('>').trim();
        if addr.is_empty() {
            return None;
        }

        let addr = if lowercase {
            addr.to_lowercase()
        } else {
            addr.to_string()
        };

        // Remove surrounding quotes from name
        let name = name
            .map(|n| n.trim().trim_matches('"').trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Some(Self { name, addr })
    }
}

/// One archive entry, reduced to the headers the graph needs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Message {
    /// Position in the archive (0-based)
    pub index: usize,
    pub from: Option<MailAddress>,
    #[serde(default)]
    pub to: Vec<MailAddress>,
    #[serde(default)]
    pub cc: Vec<MailAddress>,
    #[serde(default)]
    pub resent_to: Vec<MailAddress>,
    #[serde(default)]
    pub resent_cc: Vec<MailAddress>,
    pub subject: Option<String>,
    pub message_id: Option<String>,
    /// RFC 3339
    pub date: Option<String>,
}

impl Message {
    pub fn sender(&self) -> Option<&str> {
        self.from.as_ref().map(|a| a.addr.as_str())
    }

    /// All recipient headers in order: To, Cc, Resent-To, Resent-Cc
    pub fn recipients(&self) -> impl Iterator<Item = &MailAddress> {
        self.to
            .iter()
            .chain(&self.cc)
            .chain(&self.resent_to)
            .chain(&self.resent_cc)
    }

    pub fn subject_display(&self) -> &str {
        self.subject.as_deref().unwrap_or("(no subject)")
    }
}
