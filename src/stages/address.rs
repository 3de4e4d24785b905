use crate::error::ValidationError;
use crate::sheet::Sheet;
use crate::stages::Stage;
use std::collections::HashSet;

/// Literal separator between address tokens in a `hosts` cell.
pub const HOST_SEPARATOR: &str = ", ";

/// Lexical IPv4 check: four dot-separated groups of 1-3 decimal digits.
/// Groups are not bounded to 0-255; existing master sheets were accepted
/// under this permissive form, so tightening it would reject old data.
pub fn is_ipv4_literal(token: &str) -> bool {
    let mut groups = 0;
    for group in token.split('.') {
        if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        groups += 1;
    }
    groups == 4
}

/// Lexical IPv6 check: exactly eight colon-separated groups of 1-4 hex
/// digits. `::` compression is not supported (known limitation).
pub fn is_ipv6_literal(token: &str) -> bool {
    let mut groups = 0;
    for group in token.split(':') {
        if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
            return false;
        }
        groups += 1;
    }
    groups == 8
}

/// Validates every address token in the batch, in row order and then token
/// order within each row's `hosts` cell.
///
/// Per token: lexical form first, then intra-batch uniqueness, then (when a
/// master sheet was loaded) uniqueness against all previously accumulated
/// hosts. The first failure aborts; rows are reported 1-based.
pub struct AddressValidator {
    master_hosts: HashSet<String>,
}

impl Default for AddressValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressValidator {
    pub fn new() -> Self {
        Self {
            master_hosts: HashSet::new(),
        }
    }

    pub fn with_master_hosts(master_hosts: HashSet<String>) -> Self {
        Self { master_hosts }
    }
}

impl Stage for AddressValidator {
    fn name(&self) -> &str {
        "address"
    }

    fn run(&self, sheet: &mut Sheet) -> Result<(), ValidationError> {
        let Some(hosts_index) = sheet.column_index("hosts") else {
            return Ok(());
        };

        let mut seen: HashSet<&str> = HashSet::new();
        for (row_index, row) in sheet.rows().iter().enumerate() {
            let row_number = row_index + 1;
            let cell = row.get(hosts_index).map(String::as_str).unwrap_or("");

            for host in cell.split(HOST_SEPARATOR) {
                if !is_ipv4_literal(host) && !is_ipv6_literal(host) {
                    return Err(ValidationError::InvalidAddress {
                        host: host.to_string(),
                        row: row_number,
                    });
                }

                if !seen.insert(host) {
                    return Err(ValidationError::DuplicateInBatch {
                        host: host.to_string(),
                        row: row_number,
                    });
                }

                if self.master_hosts.contains(host) {
                    return Err(ValidationError::DuplicateInMaster {
                        host: host.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ipv4() {
        assert!(is_ipv4_literal("10.0.0.1"));
        assert!(is_ipv4_literal("192.168.1.1"));
    }

    #[test]
    fn ipv4_check_is_lexical_only() {
        // Out-of-range groups still pass the permissive pattern.
        assert!(is_ipv4_literal("999.999.999.999"));
    }

    #[test]
    fn rejects_malformed_ipv4() {
        assert!(!is_ipv4_literal("10.0.0.1.2"));
        assert!(!is_ipv4_literal("10.0.0"));
        assert!(!is_ipv4_literal("10.0.0."));
        assert!(!is_ipv4_literal("1000.0.0.1"));
        assert!(!is_ipv4_literal("not-an-ip"));
        assert!(!is_ipv4_literal(""));
    }

    #[test]
    fn accepts_full_form_ipv6() {
        assert!(is_ipv6_literal("2001:0db8:0000:0000:0000:0000:0000:0001"));
        assert!(is_ipv6_literal("fe80:1:2:3:4:5:6:7"));
    }

    #[test]
    fn rejects_compressed_or_malformed_ipv6() {
        assert!(!is_ipv6_literal("2001:db8::1"));
        assert!(!is_ipv6_literal("2001:0db8:0000:0000:0000:0000:0001"));
        assert!(!is_ipv6_literal("2001:0db8:0000:0000:0000:0000:0000:00001"));
        assert!(!is_ipv6_literal("gggg:0db8:0000:0000:0000:0000:0000:0001"));
    }
}
