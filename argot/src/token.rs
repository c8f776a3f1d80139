/// A lexical unit produced by the tokenizer.
#[derive(Clone, Debug)]
pub enum Token {
    Name(String),
    Value(ValueToken),
}

#[derive(Clone, Debug)]
pub struct ValueToken {
    pub text: String,
    /// Came from `--name=value`.
    pub explicitly_assigned: bool,
    /// Came after a `--` terminator.
    pub forced: bool,
    /// Produced by splitting on an option's separator character.
    pub from_separator: bool,
}

impl Token {
    pub fn name(text: impl Into<String>) -> Self {
        Token::Name(text.into())
    }
    pub fn value(text: impl Into<String>) -> Self {
        Self::value_with(text, false, false, false)
    }
    pub fn assigned(text: impl Into<String>) -> Self {
        Self::value_with(text, true, false, false)
    }
    pub fn forced(text: impl Into<String>) -> Self {
        Self::value_with(text, false, true, false)
    }
    pub fn from_separator(text: impl Into<String>) -> Self {
        Self::value_with(text, false, false, true)
    }
    fn value_with(
        text: impl Into<String>,
        explicitly_assigned: bool,
        forced: bool,
        from_separator: bool,
    ) -> Self {
        Token::Value(ValueToken {
            text: text.into(),
            explicitly_assigned,
            forced,
            from_separator,
        })
    }

    pub fn text(&self) -> &str {
        match self {
            Token::Name(text) => text,
            Token::Value(v) => &v.text,
        }
    }
    pub fn is_name(&self) -> bool {
        matches!(self, Token::Name(_))
    }
    pub fn is_value(&self) -> bool {
        matches!(self, Token::Value(_))
    }
    pub fn is_forced(&self) -> bool {
        matches!(self, Token::Value(v) if v.forced)
    }
    pub fn is_from_separator(&self) -> bool {
        matches!(self, Token::Value(v) if v.from_separator)
    }
    pub fn is_explicitly_assigned(&self) -> bool {
        matches!(self, Token::Value(v) if v.explicitly_assigned)
    }
}

// Provenance flags other than `forced` don't take part in equality.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Token::Name(a), Token::Name(b)) => a == b,
            (Token::Value(a), Token::Value(b)) => a.text == b.text && a.forced == b.forced,
            _ => false,
        }
    }
}
impl Eq for Token {}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
