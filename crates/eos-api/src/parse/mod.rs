// Text-output parsers
//
// Pure functions over the `output` field of text-format command results.
// Several EOS show commands have no JSON model, so membership, LACP mode,
// SNMP state and most running-config derived settings are scraped here.

/// Compile a pattern once and hand out a `&'static Regex`.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        #[allow(clippy::expect_used)]
        static RE: std::sync::LazyLock<::regex::Regex> = std::sync::LazyLock::new(|| {
            ::regex::Regex::new($re).expect("failed compiling pattern, this is a bug")
        });
        &*RE
    }};
}

pub mod port_channel;
pub mod running_config;
pub mod snmp;

/// Order interface names by prefix, then numerically by each index
/// (`Ethernet2` before `Ethernet10`, `Ethernet1/2` before `Ethernet1/10`).
pub fn interface_order(a: &str, b: &str) -> std::cmp::Ordering {
    fn key(name: &str) -> (&str, Vec<u64>) {
        let split = name.find(|c: char| c.is_ascii_digit()).unwrap_or(name.len());
        let (prefix, rest) = name.split_at(split);
        let indices = rest
            .split(|c: char| !c.is_ascii_digit())
            .filter_map(|n| n.parse().ok())
            .collect();
        (prefix, indices)
    }
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_order_is_numeric() {
        let mut names = vec!["Ethernet10", "Ethernet2", "Ethernet1/10", "Ethernet1/2", "Ethernet1"];
        names.sort_by(|a, b| interface_order(a, b));
        assert_eq!(
            names,
            vec!["Ethernet1", "Ethernet1/2", "Ethernet1/10", "Ethernet2", "Ethernet10"]
        );
    }
}
