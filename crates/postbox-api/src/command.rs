/// What a `/send-message` text asks for.
///
/// `history N` reads the N newest messages; every other text, including
/// malformed `history ...` commands, is new message content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    History(u64),
    Post(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(text: &'a str) -> Self {
        match parse_history(text) {
            Some(count) => Command::History(count),
            None => Command::Post(text),
        }
    }
}

/// `history`, at least one whitespace character, then ASCII digits to the end.
fn parse_history(text: &str) -> Option<u64> {
    let rest = text.strip_prefix("history")?;
    let digits = rest.trim_start();

    if digits.len() == rest.len()
        || digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    // All digits, so parsing only fails on overflow
    Some(digits.parse().unwrap_or(u64::MAX))
}
