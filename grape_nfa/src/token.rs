use std::fmt;
use std::ops::Index;

/// A 256-entry membership table for a character class. `class[b]` is
/// `true` when byte `b` is a member.
///
/// A negated class starts out full and has each listed byte removed, so
/// the table always describes the bytes that actually match.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteClass {
    bitmap: [bool; 256],
    negated: bool,
}

impl ByteClass {
    /// Create an empty class that matches nothing.
    pub fn new() -> Self {
        ByteClass { bitmap: [false; 256], negated: false }
    }

    /// Create a negated class. It matches every byte until members are
    /// inserted, each of which is then excluded.
    pub fn negated() -> Self {
        ByteClass { bitmap: [true; 256], negated: true }
    }

    /// `\d`
    pub fn digit() -> Self {
        let mut class = ByteClass::new();
        class.insert_range(b'0', b'9');
        class
    }

    /// `\w`
    pub fn word() -> Self {
        let mut class = ByteClass::new();
        class.insert_range(b'0', b'9');
        class.insert_range(b'a', b'z');
        class.insert_range(b'A', b'Z');
        class.insert(b'_');
        class
    }

    /// `.`, which matches every byte except `\n`.
    pub fn any_except_newline() -> Self {
        let mut class = ByteClass::new();
        class.insert_range(0x00, b'\n' - 1);
        class.insert_range(b'\n' + 1, 0xFF);
        class
    }

    /// List a byte in this class. For a negated class this removes the
    /// byte from the set of matching bytes.
    pub fn insert(&mut self, byte: u8) {
        self.bitmap[usize::from(byte)] = !self.negated;
    }

    /// List every byte in `start..=end`.
    pub fn insert_range(&mut self, start: u8, end: u8) {
        for byte in start..=end {
            self.insert(byte);
        }
    }

    /// Whether `byte` matches this class.
    pub fn contains(&self, byte: u8) -> bool {
        self.bitmap[usize::from(byte)]
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Iterate over the bytes that match, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&byte| self.contains(byte))
    }

    /// The number of matching bytes.
    pub fn len(&self) -> usize {
        self.bitmap.iter().filter(|&&member| member).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ByteClass {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u8> for ByteClass {
    type Output = bool;

    fn index(&self, byte: u8) -> &bool {
        &self.bitmap[usize::from(byte)]
    }
}

/// Classes are printed as byte ranges, which is far more readable than 256
/// booleans. A negated class lists the bytes it excludes after a `^`, the
/// way it was written in the pattern.
impl fmt::Debug for ByteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negated = self.negated;
        write!(f, "ByteClass([{}", if negated { "^" } else { "" })?;
        let mut first = true;
        let mut bytes =
            (0..=u8::MAX).filter(|&byte| self.contains(byte) != negated).peekable();
        while let Some(start) = bytes.next() {
            let mut end = start;
            while end != u8::MAX && bytes.peek() == Some(&(end + 1)) {
                end = bytes.next().unwrap_or(end);
            }
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            if start == end {
                write!(f, "{:?}", char::from(start))?;
            } else {
                write!(f, "{:?}-{:?}", char::from(start), char::from(end))?;
            }
        }
        write!(f, "])")
    }
}

/// One lexical unit of a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    CharClass(ByteClass),
    Star,
    Plus,
    Question,
    Concat,
    Alt,
    LParen,
    RParen,
    /// Any byte except `\n`. The tokenizer spells `.` as an explicit
    /// [`Token::CharClass`], but the compiler accepts this form as well.
    Dot,
}

/// The operator tokens, used when reporting which operator was missing its
/// operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Star,
    Plus,
    Question,
    Concat,
    Alt,
}

impl Operator {
    /// How many fragments the operator consumes from the operand stack.
    pub fn arity(self) -> usize {
        match self {
            Operator::Star | Operator::Plus | Operator::Question => 1,
            Operator::Concat | Operator::Alt => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Star => "star (*)",
            Operator::Plus => "plus (+)",
            Operator::Question => "question (?)",
            Operator::Concat => "concatenation",
            Operator::Alt => "alternation (|)",
        };
        f.write_str(name)
    }
}

impl Token {
    /// Returns the operator this token stands for, if any.
    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Token::Star => Some(Operator::Star),
            Token::Plus => Some(Operator::Plus),
            Token::Question => Some(Operator::Question),
            Token::Concat => Some(Operator::Concat),
            Token::Alt => Some(Operator::Alt),
            Token::Literal(_)
            | Token::CharClass(_)
            | Token::LParen
            | Token::RParen
            | Token::Dot => None,
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Literal(_) | Token::CharClass(_) | Token::Dot)
    }

    pub fn is_operator(&self) -> bool {
        self.as_operator().is_some()
    }

    pub fn is_postfix_unary(&self) -> bool {
        matches!(self, Token::Star | Token::Plus | Token::Question)
    }

    /// Binding strength of an operator. Every operator is left
    /// associative; non-operators have precedence 0.
    pub fn precedence(&self) -> u8 {
        match self {
            Token::Star | Token::Plus | Token::Question => 3,
            Token::Concat => 2,
            Token::Alt => 1,
            _ => 0,
        }
    }

    /// Whether an expression may end with this token.
    pub fn can_end_expr(&self) -> bool {
        self.is_operand() || self.is_postfix_unary() || *self == Token::RParen
    }

    /// Whether an expression may begin with this token.
    pub fn can_begin_expr(&self) -> bool {
        self.is_operand() || *self == Token::LParen
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(byte) => {
                write!(f, "{}", std::ascii::escape_default(*byte))
            }
            Token::CharClass(class) => {
                write!(f, "[{} bytes", class.len())?;
                if class.is_negated() {
                    write!(f, ", negated")?;
                }
                write!(f, "]")
            }
            Token::Star => f.write_str("*"),
            Token::Plus => f.write_str("+"),
            Token::Question => f.write_str("?"),
            Token::Concat => f.write_str("·"),
            Token::Alt => f.write_str("|"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Dot => f.write_str("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_insert() {
        let mut class = ByteClass::new();
        class.insert(b'a');
        class.insert(b'c');
        assert!(class.contains(b'a'));
        assert!(!class.contains(b'b'));
        assert!(class[b'c']);
        assert_eq!(class.len(), 2);
        assert_eq!(class.iter().collect::<Vec<u8>>(), vec![b'a', b'c']);
    }

    #[test]
    fn test_negated_class_clears_members() {
        let mut class = ByteClass::negated();
        assert_eq!(class.len(), 256);
        class.insert(b'a');
        assert!(class.is_negated());
        assert!(!class.contains(b'a'));
        assert!(class.contains(b'b'));
        assert!(class.contains(0xFF));
        assert_eq!(class.len(), 255);
    }

    #[test]
    fn test_perl_classes() {
        let digit = ByteClass::digit();
        assert_eq!(digit.len(), 10);
        assert!(digit.contains(b'7'));
        assert!(!digit.contains(b'a'));

        let word = ByteClass::word();
        assert_eq!(word.len(), 63);
        assert!(word.contains(b'_'));
        assert!(word.contains(b'Z'));
        assert!(!word.contains(b'-'));
    }

    #[test]
    fn test_dot_class() {
        let dot = ByteClass::any_except_newline();
        assert_eq!(dot.len(), 255);
        assert!(!dot.contains(b'\n'));
        assert!(dot.contains(0x00));
        assert!(dot.contains(0xFF));
        assert!(!dot.is_negated());
    }

    #[test]
    fn test_class_debug_ranges() {
        let got = format!("{:?}", ByteClass::digit());
        assert_eq!(got, "ByteClass(['0'-'9'])");
    }

    #[test]
    fn test_negated_class_debug_lists_excluded_bytes() {
        let mut class = ByteClass::negated();
        class.insert(b'a');
        class.insert(b'b');
        class.insert(b'x');
        assert_eq!(format!("{:?}", class), "ByteClass([^'a'-'b', 'x'])");
        assert_eq!(format!("{:?}", ByteClass::negated()), "ByteClass([^])");
    }

    #[test]
    fn test_precedence_order() {
        assert!(Token::Star.precedence() > Token::Concat.precedence());
        assert!(Token::Concat.precedence() > Token::Alt.precedence());
        assert_eq!(Token::Plus.precedence(), Token::Question.precedence());
        assert_eq!(Token::LParen.precedence(), 0);
    }

    #[test]
    fn test_expression_boundaries() {
        assert!(Token::Literal(b'a').can_end_expr());
        assert!(Token::RParen.can_end_expr());
        assert!(Token::Star.can_end_expr());
        assert!(!Token::Alt.can_end_expr());
        assert!(!Token::LParen.can_end_expr());

        assert!(Token::Dot.can_begin_expr());
        assert!(Token::LParen.can_begin_expr());
        assert!(!Token::Star.can_begin_expr());
        assert!(!Token::RParen.can_begin_expr());
    }

    #[test]
    fn test_operator_arity() {
        assert_eq!(Token::Alt.as_operator().map(Operator::arity), Some(2));
        assert_eq!(Token::Plus.as_operator().map(Operator::arity), Some(1));
        assert_eq!(Token::LParen.as_operator(), None);
    }
}
