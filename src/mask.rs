//! Input masks.
//!
//! A mask string is a small DSL: `{d}` is a digit, `{D}` a non-digit, `{w}` a
//! word character, `{W}` a non-word character, and any other character is a
//! literal that the formatter inserts by itself. Masks are compiled once when
//! the `pattern` attribute is set and reused on every keystroke.

use serde::{Deserialize, Serialize};

// ============================================================================
// TOKENS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskToken {
    Digit,
    NonDigit,
    WordChar,
    NonWordChar,
    Literal(char),
}

impl MaskToken {
    fn from_class(class: char) -> Option<Self> {
        match class {
            'd' => Some(Self::Digit),
            'D' => Some(Self::NonDigit),
            'w' => Some(Self::WordChar),
            'W' => Some(Self::NonWordChar),
            _ => None,
        }
    }

    pub fn accepts(&self, c: char) -> bool {
        let is_word = c.is_alphanumeric() || c == '_';
        match self {
            Self::Digit => c.is_ascii_digit(),
            Self::NonDigit => !c.is_ascii_digit(),
            Self::WordChar => is_word,
            Self::NonWordChar => !is_word,
            Self::Literal(l) => *l == c,
        }
    }
}

// ============================================================================
// MASK
// ============================================================================

/// A compiled mask. The empty mask accepts everything and formats nothing.
///
/// ```rust
/// use formtree::mask::Mask;
/// let mask = Mask::compile("{d}{d}-{d}{d}");
/// let formatted = mask.format("1234", 4);
/// assert_eq!(formatted.value, "12-34");
/// assert_eq!(formatted.cursor, 5);
/// assert!(mask.is_satisfied_by("12-34"));
/// assert!(!mask.is_satisfied_by("12-a4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Mask {
    source: String,
    tokens: Vec<MaskToken>,
}

/// Result of running raw input through a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub value: String,
    /// Cursor position in the formatted value, tracking the logical position
    /// the cursor had in the raw input.
    pub cursor: usize,
    /// Every token of the mask has been filled.
    pub complete: bool,
    /// No input character was rejected and none was left over.
    pub consistent: bool,
}

impl Mask {
    pub fn compile(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            let class = match (chars[i], chars.get(i + 1), chars.get(i + 2)) {
                ('{', Some(&c), Some('}')) => MaskToken::from_class(c),
                _ => None,
            };
            match class {
                Some(token) => {
                    tokens.push(token);
                    i += 3;
                }
                None => {
                    tokens.push(MaskToken::Literal(chars[i]));
                    i += 1;
                }
            }
        }
        Self {
            source: source.to_string(),
            tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[MaskToken] {
        &self.tokens
    }

    /// Formats raw input against the mask.
    ///
    /// Input is consumed left to right. Literal tokens are inserted
    /// automatically, and a typed character equal to the literal is absorbed
    /// into it. Once every class token is filled, the literals that close the
    /// mask are appended too. Formatting stops at the first character a class
    /// token rejects; that character and everything after it are kept
    /// verbatim so nothing the user typed is lost. `cursor` is a character
    /// offset into `input`.
    pub fn format(&self, input: &str, cursor: usize) -> Formatted {
        if self.is_empty() {
            return Formatted {
                value: input.to_string(),
                cursor,
                complete: true,
                consistent: true,
            };
        }

        let chars: Vec<char> = input.chars().collect();
        let mut value = String::with_capacity(self.source.len());
        let mut written = 0;
        let mut pos = 0;
        let mut filled = 0;
        let mut rejected = false;
        let mut new_cursor = (cursor == 0).then_some(0);

        for token in &self.tokens {
            let Some(&next) = chars.get(pos) else { break };
            match token {
                MaskToken::Literal(literal) => {
                    value.push(*literal);
                    written += 1;
                    if next == *literal {
                        pos += 1;
                        if pos == cursor {
                            new_cursor = Some(written);
                        }
                    }
                }
                class if class.accepts(next) => {
                    value.push(next);
                    written += 1;
                    pos += 1;
                    if pos == cursor {
                        new_cursor = Some(written);
                    }
                }
                _ => {
                    rejected = true;
                    break;
                }
            }
            filled += 1;
        }

        let closing = &self.tokens[filled..];
        let only_literals = closing.iter().all(|t| matches!(t, MaskToken::Literal(_)));
        if !rejected && pos > 0 && pos == chars.len() && only_literals {
            for token in closing {
                if let MaskToken::Literal(literal) = token {
                    value.push(*literal);
                    written += 1;
                }
            }
            filled = self.tokens.len();
            if cursor >= chars.len() {
                new_cursor = Some(written);
            }
        }

        let overflow = pos < chars.len();
        for c in &chars[pos..] {
            value.push(*c);
            written += 1;
            pos += 1;
            if pos == cursor {
                new_cursor = Some(written);
            }
        }

        Formatted {
            value,
            cursor: new_cursor.unwrap_or(written),
            complete: filled == self.tokens.len(),
            consistent: !rejected && !overflow,
        }
    }

    /// True when `value` fills the whole mask with no rejected or leftover
    /// characters.
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        let formatted = self.format(value, 0);
        formatted.complete && formatted.consistent
    }
}

impl From<String> for Mask {
    fn from(source: String) -> Self {
        Mask::compile(&source)
    }
}

impl From<Mask> for String {
    fn from(mask: Mask) -> Self {
        mask.source
    }
}
