//! DNS record set and the stored record blob format.
//!
//! Blob grammar: sections `<LABEL>: <v1>, <v2>, ...` in the fixed order
//! NS, A, MX, DMARC, TXT, SOA, joined with `" ::: "`. The DMARC section only
//! appears when MX records exist. A set without any section is stored as `"None"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between blob sections.
pub const DNS_BLOB_DELIMITER: &str = " ::: ";

/// Stored blob when no record type returned anything.
pub const DNS_BLOB_EMPTY: &str = "None";

/// DMARC section text when MX is configured but `_dmarc.<domain>` has no record.
pub const MISSING_DMARC_EXPLANATION: &str = "MX configured without a DMARC record";

const VALUE_SEPARATOR: &str = ", ";

/// Record types collected for every domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    Ns,
    A,
    Mx,
    Txt,
    Soa,
}

impl DnsRecordType {
    /// Collection order; MX precedes the DMARC lookup it gates.
    pub const ALL: [Self; 5] = [Self::Ns, Self::A, Self::Mx, Self::Txt, Self::Soa];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ns => "NS",
            Self::A => "A",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Soa => "SOA",
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DNS records gathered for one domain. Empty vectors mean the type is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordSet {
    pub ns: Vec<String>,
    pub a: Vec<String>,
    pub mx: Vec<String>,
    pub txt: Vec<String>,
    pub soa: Vec<String>,
    pub dmarc: Option<String>,
}

impl DnsRecordSet {
    #[must_use]
    pub fn records(&self, record_type: DnsRecordType) -> &[String] {
        match record_type {
            DnsRecordType::Ns => &self.ns,
            DnsRecordType::A => &self.a,
            DnsRecordType::Mx => &self.mx,
            DnsRecordType::Txt => &self.txt,
            DnsRecordType::Soa => &self.soa,
        }
    }

    pub fn set_records(&mut self, record_type: DnsRecordType, values: Vec<String>) {
        match record_type {
            DnsRecordType::Ns => self.ns = values,
            DnsRecordType::A => self.a = values,
            DnsRecordType::Mx => self.mx = values,
            DnsRecordType::Txt => self.txt = values,
            DnsRecordType::Soa => self.soa = values,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        DnsRecordType::ALL
            .iter()
            .all(|t| self.records(*t).is_empty())
    }

    /// Serialize into the stored blob.
    #[must_use]
    pub fn to_blob(&self) -> String {
        let mut sections: Vec<String> = Vec::new();
        let mut push = |label: &str, values: &[String]| {
            if !values.is_empty() {
                sections.push(format!("{label}: {}", values.join(VALUE_SEPARATOR)));
            }
        };

        push("NS", &self.ns);
        push("A", &self.a);
        push("MX", &self.mx);
        if !self.mx.is_empty() {
            let dmarc = self
                .dmarc
                .clone()
                .unwrap_or_else(|| MISSING_DMARC_EXPLANATION.to_string());
            push("DMARC", &[dmarc]);
        }
        push("TXT", &self.txt);
        push("SOA", &self.soa);

        if sections.is_empty() {
            DNS_BLOB_EMPTY.to_string()
        } else {
            sections.join(DNS_BLOB_DELIMITER)
        }
    }

    /// Parse a blob produced by [`to_blob`](Self::to_blob).
    ///
    /// Unknown section labels are ignored. Values that themselves contain `", "`
    /// cannot be told apart from multiple values and come back split.
    #[must_use]
    pub fn parse_blob(blob: &str) -> Self {
        let mut set = Self::default();
        let blob = blob.trim();
        if blob.is_empty() || blob == DNS_BLOB_EMPTY {
            return set;
        }

        for section in blob.split(DNS_BLOB_DELIMITER) {
            let Some((label, value)) = section.split_once(": ") else {
                continue;
            };
            let values = || {
                value
                    .split(VALUE_SEPARATOR)
                    .map(str::to_string)
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
            };
            match label.trim() {
                "NS" => set.ns = values(),
                "A" => set.a = values(),
                "MX" => set.mx = values(),
                "TXT" => set.txt = values(),
                "SOA" => set.soa = values(),
                "DMARC" if value != MISSING_DMARC_EXPLANATION => {
                    set.dmarc = Some(value.to_string());
                }
                _ => {}
            }
        }
        set
    }
}

/// Split a stored blob into display sections (`"NS: ..."`, `"A: ..."`).
#[must_use]
pub fn dns_blob_sections(blob: &str) -> Vec<String> {
    let blob = blob.trim();
    if blob.is_empty() || blob == DNS_BLOB_EMPTY {
        return Vec::new();
    }
    blob.split(DNS_BLOB_DELIMITER)
        .map(str::to_string)
        .collect()
}
