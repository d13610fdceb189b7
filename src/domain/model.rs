use std::fmt;

/// A numeric user ID of 5 to 15 ASCII digits.
///
/// Only [`Identifier::parse`] builds one, so holding an `Identifier` means the
/// shape check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub const MIN_LEN: usize = 5;
    pub const MAX_LEN: usize = 15;

    pub fn parse(candidate: &str) -> Option<Self> {
        let len = candidate.len();
        let digits_only = candidate.bytes().all(|b| b.is_ascii_digit());

        if digits_only && (Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            Some(Self(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Success {
        /// ID as echoed by the service, falling back to the queried one.
        id: String,
        banned: bool,
        ban_code: String,
        message: String,
        credits_url: String,
    },
    /// The service answered but `status` was not `"success"`.
    ApiError { message: String },
    /// Network, HTTP status or decoding failure.
    TransportError { detail: String },
}

/// What the transport should send back for one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Instruction text for bad input, sent without a parse mode.
    Plain(String),
    /// Rendered lookup outcome, already escaped for MarkdownV2.
    Markdown(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Plain(text) | Reply::Markdown(text) => text,
        }
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Reply::Markdown(_))
    }
}
