use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use mail_parser::mailbox::mbox::MessageIterator;
use mail_parser::{Addr, Address, HeaderName, HeaderValue, MessageParser};

use super::types::{MailAddress, Message};
use crate::error::ArchiveError;

/// Lazy reader over a single-file mbox archive.
/// Yields one `Message` per entry in archive order; a malformed entry is
/// returned as an error and the caller decides whether to stop. Input that
/// has content but no `From ` separator line yields a single error.
pub struct ArchiveReader<R: BufRead> {
    entries: MessageIterator<R>,
    index: usize,
    lowercase: bool,
    /// Set until the first entry shows up, if the input is not blank
    unseparated: bool,
}

impl ArchiveReader<BufReader<File>> {
    pub fn open(path: &Path, lowercase: bool) -> Result<Self, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), lowercase))
    }
}

impl<R: BufRead> ArchiveReader<R> {
    pub fn new(mut reader: R, lowercase: bool) -> Self {
        // Peek without consuming; a read error counts as content
        let unseparated = reader
            .fill_buf()
            .map(|buf| buf.iter().any(|b| !b.is_ascii_whitespace()))
            .unwrap_or(true);
        Self {
            entries: MessageIterator::new(reader),
            index: 0,
            lowercase,
            unseparated,
        }
    }
}

impl<R: BufRead> Iterator for ArchiveReader<R> {
    type Item = Result<Message, ArchiveError>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(entry) = self.entries.next() else {
            if std::mem::take(&mut self.unseparated) {
                return Some(Err(ArchiveError::Malformed {
                    index: 0,
                    reason: "no mbox \"From \" separator line",
                }));
            }
            return None;
        };
        self.unseparated = false;
        let index = self.index;
        self.index += 1;

        Some(match entry {
            Ok(raw) => parse_message(index, raw.contents(), self.lowercase),
            Err(_) => Err(ArchiveError::Malformed {
                index,
                reason: "unreadable entry",
            }),
        })
    }
}

/// Parse one raw RFC 5322 message into a `Message`.
/// An entry with neither a sender nor a recipient address is malformed.
pub fn parse_message(index: usize, raw: &[u8], lowercase: bool) -> Result<Message, ArchiveError> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or(ArchiveError::Malformed {
            index,
            reason: "not a message",
        })?;

    let mut message = Message {
        index,
        subject: parsed.subject().map(str::to_string),
        message_id: parsed.message_id().map(str::to_string),
        date: parsed.date().map(|d| d.to_rfc3339()),
        ..Default::default()
    };

    // A header may appear more than once; every instance counts
    for header in parsed.headers() {
        let HeaderValue::Address(address) = &header.value else {
            continue;
        };
        let target = match header.name {
            HeaderName::From => {
                if message.from.is_none() {
                    message.from = collect_addresses(address, lowercase).into_iter().next();
                }
                continue;
            }
            HeaderName::To => &mut message.to,
            HeaderName::Cc => &mut message.cc,
            HeaderName::ResentTo => &mut message.resent_to,
            HeaderName::ResentCc => &mut message.resent_cc,
            _ => continue,
        };
        target.extend(collect_addresses(address, lowercase));
    }

    if message.from.is_none() && message.recipients().next().is_none() {
        return Err(ArchiveError::Malformed {
            index,
            reason: "no address headers",
        });
    }

    Ok(message)
}

/// Flatten an address list or group list; entries without an address are dropped
fn collect_addresses(address: &Address, lowercase: bool) -> Vec<MailAddress> {
    let to_mail = |addr: &Addr| {
        addr.address
            .as_deref()
            .and_then(|a| MailAddress::new(addr.name.as_deref(), a, lowercase))
    };

    match address {
        Address::List(list) => list.iter().filter_map(to_mail).collect(),
        Address::Group(groups) => groups
            .iter()
            .flat_map(|g| g.addresses.iter())
            .filter_map(to_mail)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const ARCHIVE: &str = "From alice@example.com Mon Jan  1 00:00:00 2001
From: Alice Smith <Alice@Example.com>
To: bob@example.com, \"Carol\" <carol@example.com>
Cc: dave@example.com
Subject: Budget

Numbers attached.

From bob@example.com Tue Jan  2 00:00:00 2001
From: bob@example.com
To: alice@example.com
Resent-To: erin@example.com
Resent-Cc: Team: frank@example.com, grace@example.com;
Subject: Re: Budget

Looks fine.
";

    #[test]
    fn test_reads_entries_in_order() {
        let messages: Vec<Message> = ArchiveReader::new(Cursor::new(ARCHIVE), true)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(messages.len(), 2);

        let first = &messages[0];
        assert_eq!(first.index, 0);
        assert_eq!(first.sender(), Some("alice@example.com"));
        assert_eq!(first.from.as_ref().unwrap().name.as_deref(), Some("Alice Smith"));
        let to: Vec<&str> = first.to.iter().map(|a| a.addr.as_str()).collect();
        assert_eq!(to, ["bob@example.com", "carol@example.com"]);
        assert_eq!(first.cc.len(), 1);
        assert_eq!(first.subject.as_deref(), Some("Budget"));

        let second = &messages[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.resent_to.len(), 1);
        let group: Vec<&str> = second.resent_cc.iter().map(|a| a.addr.as_str()).collect();
        assert_eq!(group, ["frank@example.com", "grace@example.com"]);
        assert_eq!(second.recipients().count(), 4);
    }

    #[test]
    fn test_open_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ARCHIVE.as_bytes()).unwrap();

        let reader = ArchiveReader::open(file.path(), true).unwrap();
        assert_eq!(reader.count(), 2);
    }

    #[test]
    fn test_missing_archive_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such.mbox");
        match ArchiveReader::open(&missing, true) {
            Err(ArchiveError::Io { path, .. }) => assert_eq!(path, missing),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_repeated_recipient_headers_are_merged() {
        let raw = b"From: a@x\r\nTo: b@x\r\nTo: c@x\r\nSubject: hi\r\n\r\nbody\r\n";
        let msg = parse_message(7, raw, true).unwrap();
        assert_eq!(msg.index, 7);
        let to: Vec<&str> = msg.to.iter().map(|a| a.addr.as_str()).collect();
        assert_eq!(to, ["b@x", "c@x"]);
    }

    fn read_all(archive: &[u8]) -> Vec<Result<Message, ArchiveError>> {
        ArchiveReader::new(Cursor::new(archive.to_vec()), true).collect()
    }

    #[test]
    fn test_garbage_entry_is_malformed() {
        let archive = b"From a Mon Jan  1 00:00:00 2001
From: a@x
To: b@x

ok

From junk Mon Jan  1 00:00:00 2001
\x00\x01\x02\xff garbage without headers

From b Mon Jan  1 00:00:00 2001
From: b@x
To: a@x

later
";
        let results = read_all(archive);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().sender(), Some("a@x"));
        assert!(matches!(results[1], Err(ArchiveError::Malformed { index: 1, .. })));
        assert_eq!(results[2].as_ref().unwrap().sender(), Some("b@x"));
    }

    #[test]
    fn test_empty_entry_is_malformed() {
        let archive = b"From a Mon Jan  1 00:00:00 2001

From b Mon Jan  1 00:00:00 2001
From: b@x
To: a@x

hi
";
        let results = read_all(archive);
        assert!(matches!(results[0], Err(ArchiveError::Malformed { index: 0, .. })));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_content_without_separator_is_malformed() {
        let results = read_all(b"From: a@x\nTo: b@x\n\nbody\n");
        assert_eq!(results.len(), 1);
        match &results[0] {
            Err(e @ ArchiveError::Malformed { index: 0, .. }) => {
                assert!(e.to_string().contains("separator"))
            }
            other => panic!("expected malformed archive, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_input_has_no_entries() {
        assert!(read_all(b"").is_empty());
        assert!(read_all(b"\n  \n").is_empty());
    }

    #[test]
    fn test_headers_without_addresses_are_malformed() {
        let raw = b"Subject: orphan\r\nDate: Mon, 1 Jan 2001 00:00:00 +0000\r\n\r\nbody\r\n";
        assert!(matches!(
            parse_message(3, raw, true),
            Err(ArchiveError::Malformed { index: 3, .. })
        ));

        // Recipients alone are enough to be a message
        let raw = b"To: b@x\r\nSubject: anonymous\r\n\r\nbody\r\n";
        assert!(parse_message(4, raw, true).unwrap().from.is_none());
    }
}
