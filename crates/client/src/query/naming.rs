//! `MixedCaps` identifier segmentation and `lowerCamelCase` field naming.
//!
//! Declaration-style field names (`ClientMutationID`) are split into words,
//! checked against a fixed initialism table, and re-joined as the GraphQL
//! field name (`clientMutationId`).
//!
//! The initialism table is a hand-maintained, closed list. Adding or removing
//! an entry silently changes the field names this crate generates, so any
//! amendment is a breaking change and must be called out in the changelog.

/// Initialisms recognized during segmentation, sorted for binary search.
///
/// Only entries that are highly unlikely to be ordinary words belong here.
/// `ID` is fine; `AND` is not.
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "RSS", "SLA", "SMTP", "SQL", "SSH", "TCP",
    "TLS", "TTL", "UDP", "UI", "UID", "URI", "URL", "UTF8", "UUID", "VM", "XML", "XMPP", "XSRF",
    "XSS",
];

/// An identifier name broken up into its constituent words.
///
/// Initialisms are stored upper-cased; casing is applied at join time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Words(Vec<String>);

impl Words {
    /// The words as plain strings, in order.
    #[cfg(test)]
    fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Express the name in `lowerCamelCase`.
    ///
    /// The first word is fully lower-cased; every later word gets an
    /// upper-cased first character and a lower-cased remainder. Initialisms
    /// therefore render as `Id`/`Url` mid-name and `id`/`url` in first
    /// position.
    pub(crate) fn to_lower_camel_case(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.0.iter().enumerate() {
            if i == 0 {
                out.push_str(&word.to_lowercase());
                continue;
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        }
        out
    }
}

/// Parse a `MixedCaps` identifier into words.
///
/// Word boundaries are lower→Upper transitions and the end of an upper-case
/// run followed by a lower-case letter, with `IDs` protected as the plural
/// form of the `ID` initialism. Each word is checked against
/// [`INITIALISMS`], including a two-way split for adjacent initialisms
/// (`APIURL` → `API`, `URL`).
pub(crate) fn split_mixed_caps(name: &str) -> Words {
    let runes: Vec<char> = name.chars().collect();
    let mut words = Vec::new();

    let mut w = 0; // Index of start of word.
    let mut i = 0; // Scan index.
    while i < runes.len() {
        let mut eow = false; // Whether we hit the end of a word.
        if i + 1 == runes.len() {
            eow = true;
        } else if runes[i].is_lowercase() && runes[i + 1].is_uppercase() {
            // lower -> Upper.
            eow = true;
        } else if i + 2 < runes.len()
            && runes[i].is_uppercase()
            && runes[i + 1].is_uppercase()
            && runes[i + 2].is_lowercase()
        {
            // Upper -> Upper,lower. End of acronym, followed by a word.
            eow = runes[i..i + 3] != ['I', 'D', 's'];
        }
        i += 1;
        if !eow {
            continue;
        }

        // [w, i) is a word.
        let word: String = runes[w..i].iter().collect();
        if let Some(initialism) = as_initialism(&word) {
            words.push(initialism.to_string());
        } else if let Some((first, second)) = as_two_initialisms(&word) {
            words.push(first.to_string());
            words.push(second.to_string());
        } else {
            words.push(word);
        }
        w = i;
    }

    Words(words)
}

/// Derive the GraphQL field name for a declaration-style identifier.
pub(crate) fn to_graphql_name(name: &str) -> String {
    split_mixed_caps(name).to_lower_camel_case()
}

/// The canonical (upper-case) form of `word` if it is a known initialism.
fn as_initialism(word: &str) -> Option<&'static str> {
    let upper = word.to_uppercase();
    INITIALISMS
        .binary_search(&upper.as_str())
        .ok()
        .map(|idx| INITIALISMS[idx])
}

/// Split `word` into two adjacent initialisms, if possible.
///
/// Every split point is scanned left to right with a minimum of two
/// characters per side; the first point where both halves match wins.
fn as_two_initialisms(word: &str) -> Option<(&'static str, &'static str)> {
    let upper = word.to_uppercase();
    if upper.len() < 4 {
        return None;
    }
    for split in 2..=upper.len() - 2 {
        if !upper.is_char_boundary(split) {
            continue;
        }
        let (head, tail) = upper.split_at(split);
        if let (Some(first), Some(second)) = (as_initialism(head), as_initialism(tail)) {
            return Some((first, second));
        }
    }
    None
}
