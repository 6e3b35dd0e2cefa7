//! Node names.

use std::fmt;

use convert_case::{Case, Casing};

/// Is a character allowed in a node name?
fn valid_nodename_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// A display name for a node, used in tree dumps and JSON snapshots.
/// Names are snake case ASCII: `[a-z0-9_]+`.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct NodeName {
    /// Stored node name string.
    name: String,
}

impl NodeName {
    /// Munge a string into a valid node name by converting it to snake case
    /// and dropping everything else. A string with nothing left becomes
    /// `node`.
    pub fn convert(name: &str) -> Self {
        let raw = name.to_case(Case::Snake);
        let filtered: String = raw.chars().filter(|x| valid_nodename_char(*x)).collect();
        let name = if filtered.is_empty() {
            "node".to_string()
        } else {
            filtered
        };
        Self { name }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodename_convert() {
        assert_eq!(NodeName::convert("Foo"), "foo");
        assert_eq!(NodeName::convert("FilledBox"), "filled_box");
        assert_eq!(NodeName::convert("FooBar Voing"), "foo_bar_voing");
        assert_eq!(NodeName::convert(""), "node");
        assert_eq!(NodeName::convert("!!!"), "node");
    }
}
