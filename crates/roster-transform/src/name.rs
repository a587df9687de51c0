//! Free-text name fragments: injury token split, role headers, depth ordinals.

use roster_model::InjuryStatus;

const DASHES: &[char] = &['-', '\u{2013}', '\u{2014}'];

/// Split a trailing injury marker off a raw name fragment.
///
/// Recognised forms, each checked against the known token set:
/// `"Jane Doe (Q)"`, `"Jane Doe - O"` and `"Jane Doe Q"`. When nothing matches
/// the whole fragment is the name and the status is [`InjuryStatus::Active`].
pub fn split_name_injury(fragment: &str) -> (String, InjuryStatus) {
    let text = fragment.trim();

    if let Some(head) = text.strip_suffix(')')
        && let Some(open) = head.rfind('(')
    {
        let name = head[..open].trim();
        if !name.is_empty()
            && let Some(status) = InjuryStatus::from_token(&head[open + 1..])
        {
            return (name.to_string(), status);
        }
        return (text.to_string(), InjuryStatus::Active);
    }

    if let Some(dash) = text.rfind(DASHES) {
        let name = text[..dash].trim();
        let dash_len = text[dash..].chars().next().map_or(1, char::len_utf8);
        let tail = text[dash + dash_len..].trim();
        if !name.is_empty()
            && !tail.contains(' ')
            && let Some(status) = InjuryStatus::from_token(tail)
        {
            return (name.to_string(), status);
        }
    }

    if let Some((name, tail)) = text.rsplit_once(' ') {
        let name = name.trim();
        if !name.is_empty()
            && let Some(status) = InjuryStatus::from_token(tail)
        {
            return (name.to_string(), status);
        }
    }

    (text.to_string(), InjuryStatus::Active)
}

/// Role label at the start of a header cell: one to four ASCII capitals not
/// followed by a letter (`"QB"`, `"LDE"`, `"WR 1"`). `"Offense"` is not a role.
pub fn role_from_header(header: &str) -> Option<String> {
    let header = header.trim();
    let run = header
        .chars()
        .take_while(char::is_ascii_uppercase)
        .count();
    if run == 0 || run > 4 {
        return None;
    }
    match header[run..].chars().next() {
        Some(next) if next.is_alphabetic() => None,
        _ => Some(header[..run].to_string()),
    }
}

/// English ordinal for a 1-based depth rank: `1st`, `2nd`, `3rd`, `4th`, `11th`, `22nd`.
pub fn ordinal(rank: usize) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}
