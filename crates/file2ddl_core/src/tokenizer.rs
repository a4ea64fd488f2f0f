use std::fmt;

/// Which quote character, if any, suppresses delimiter splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteMode {
    #[default]
    None,
    Single,
    Double,
}

impl QuoteMode {
    pub const fn quote_char(&self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Single => Some('\''),
            Self::Double => Some('"'),
        }
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

/// Splits a single line into fields.
///
/// Quoting is deliberately simple: every occurrence of the quote character
/// toggles the quoted state and is dropped from the output, there is no
/// escaping. A quote left open at the end of the line keeps the remainder of
/// the line in the last field.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    pub delimiter: char,
    pub quote: QuoteMode,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            delimiter: ',',
            quote: QuoteMode::None,
        }
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("delimiter", &self.delimiter)
            .field("quote", &self.quote.to_string())
            .finish()
    }
}

impl Tokenizer {
    pub const fn new(delimiter: char, quote: QuoteMode) -> Self {
        Tokenizer { delimiter, quote }
    }

    pub fn tokenize(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        self.tokenize_into(line, &mut fields);
        fields
    }

    /// Tokenize `line`, replacing the contents of `fields`.
    pub fn tokenize_into(&self, line: &str, fields: &mut Vec<String>) {
        fields.clear();

        let quote = match self.quote.quote_char() {
            Some(quote) => quote,
            None => {
                fields.extend(line.split(self.delimiter).map(String::from));
                return;
            }
        };

        let mut in_quote = false;
        let mut current = String::new();

        for ch in line.chars() {
            if ch == quote {
                in_quote = !in_quote;
            } else if ch == self.delimiter && !in_quote {
                fields.push(std::mem::take(&mut current));
            } else {
                current.push(ch);
            }
        }

        // Last field is always emitted, even with an open quote.
        fields.push(current);
    }
}
