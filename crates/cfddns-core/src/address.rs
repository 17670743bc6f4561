//! IPv4 literal syntax check

/// Returns true iff `ip` is four `.`-separated groups of 1 to 3 ASCII digits
///
/// Octet range is deliberately not checked: `999.999.999.999` passes.
pub fn is_ipv4(ip: &str) -> bool {
    let mut groups = 0;

    for group in ip.split('.') {
        groups += 1;
        if groups > 4 || group.is_empty() || group.len() > 3 {
            return false;
        }
        if !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }

    groups == 4
}
