//! Symbol kinds for WIQL.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! Keywords are matched case-insensitively.

use logos::Logos;

use crate::Error;

/// All token and node kinds. Tokens first, then trivia, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Keywords ---
    #[token("select", ignore(case))]
    Select = 0,

    #[token("from", ignore(case))]
    From,

    #[token("where", ignore(case))]
    Where,

    #[regex(r"order[ \t\r\n]+by", ignore(case))]
    OrderBy,

    #[token("asc", ignore(case))]
    Asc,

    #[token("desc", ignore(case))]
    Desc,

    /// `ASOF`, also accepted as `AS OF`.
    #[regex(r"as[ \t\r\n]*of", ignore(case))]
    Asof,

    #[token("not", ignore(case))]
    Not,

    #[token("ever", ignore(case))]
    Ever,

    #[token("in", ignore(case))]
    In,

    #[token("like", ignore(case))]
    Like,

    #[token("under", ignore(case))]
    Under,

    #[regex(r"work[ \t\r\n]*items", ignore(case))]
    WorkItems,

    #[regex(r"work[ \t\r\n]*item[ \t\r\n]*links", ignore(case))]
    WorkItemLinks,

    #[token("and", ignore(case))]
    And,

    #[token("or", ignore(case))]
    Or,

    #[token("contains", ignore(case))]
    Contains,

    #[token("words", ignore(case))]
    Words,

    #[token("group", ignore(case))]
    Group,

    #[token("true", ignore(case))]
    True,

    #[token("false", ignore(case))]
    False,

    // --- Operators and punctuation ---
    #[token(")")]
    RParen,

    #[token("(")]
    LParen,

    /// Unpaired `]`.
    #[token("]")]
    RSqBracket,

    /// Unpaired `[`. A closed `[...]` lexes as `Identifier`.
    #[token("[")]
    LSqBracket,

    #[token(",")]
    Comma,

    #[token("=")]
    Equals,

    #[token("<>")]
    #[token("!=")]
    NotEquals,

    #[token(">")]
    GreaterThan,

    #[token("<")]
    LessThan,

    #[token(">=")]
    GreaterOrEq,

    #[token("<=")]
    LessOrEq,

    #[token("-")]
    Minus,

    #[token("+")]
    Plus,

    // --- Literals and identifiers ---
    /// Coalesced unrecognized characters
    UnexpectedToken,

    #[regex(r"'(?:[^'\n]|'')*'", priority = 3)]
    #[regex(r#""(?:[^"\n]|"")*""#, priority = 3)]
    Str,

    /// String literal missing its closing quote.
    #[regex(r"'(?:[^'\n]|'')*", priority = 2, allow_greedy = true)]
    #[regex(r#""(?:[^"\n]|"")*"#, priority = 2, allow_greedy = true)]
    NonterminatingString,

    /// Field name, bracketed (`[Assigned To]`) or bare (`System.State`).
    /// Defined after keywords so they take precedence.
    #[regex(r"\[[^\]\n]*\]")]
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*")]
    Identifier,

    #[regex(r"[0-9]+")]
    Digits,

    /// Macro such as `@Me` or `@Today`.
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*")]
    Variable,

    // --- Link query keywords ---
    #[token("mode", ignore(case))]
    Mode,

    #[token("mustcontain", ignore(case))]
    MustContain,

    #[token("maycontain", ignore(case))]
    MayContain,

    #[token("doesnotcontain", ignore(case))]
    DoesNotContain,

    #[token("[source]", ignore(case))]
    #[token("source", ignore(case))]
    Source,

    #[token("[target]", ignore(case))]
    #[token("target", ignore(case))]
    Target,

    #[token(".")]
    Dot,

    #[token("recursive", ignore(case))]
    Recursive,

    #[token("returnmatchingchildren", ignore(case))]
    ReturnMatchingChildren,

    /// End of input. Synthesized by the lexer driver, never matched.
    Eof,

    // --- Trivia (dropped by the lexer driver) ---
    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    // --- Node kinds (non-terminals) ---
    Number,
    Field,
    ContainsWords,
    InGroup,
    DateTime,
    OrderByFieldList,
    FieldList,
    ConditionalOperator,
    Value,
    ValueList,
    LogicalExpression,
    ConditionalExpression,
    FlatSelect,
    SourcePrefix,
    TargetPrefix,
    LinkCondition,
    LinkExpression,
    LinkOrderByFieldList,
    OneHopSelect,
    RecursiveSelect,

    // Must be last - used for bounds checking in `from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Converts a raw discriminant back into a kind.
    pub fn from_raw(raw: u16) -> Result<SyntaxKind, Error> {
        if raw >= __LAST as u16 {
            return Err(Error::UnknownSymbolKind(raw));
        }
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        Ok(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
    }

    /// A primitive lexical terminal: produced directly by the lexer.
    ///
    /// EOF is a terminal too, but it is synthesized after lexing and carries
    /// the preceding token, so it is not a primitive token kind.
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < (Eof as u16)
    }

    /// Any terminal, EOF included.
    #[inline]
    pub fn is_terminal(self) -> bool {
        (self as u16) <= (Eof as u16)
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        kind_sets::TRIVIA.contains(self)
    }

    /// Composite kind built by the parser.
    #[inline]
    pub fn is_node(self) -> bool {
        (self as u16) >= (Number as u16) && self != __LAST
    }

    /// Recoverable lexical error markers.
    #[inline]
    pub fn is_error(self) -> bool {
        kind_sets::LEXICAL_ERRORS.contains(self)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Select
                | From
                | Where
                | OrderBy
                | Asc
                | Desc
                | Asof
                | Not
                | Ever
                | In
                | Like
                | Under
                | WorkItems
                | WorkItemLinks
                | And
                | Or
                | Contains
                | Words
                | Group
                | True
                | False
                | Mode
                | MustContain
                | MayContain
                | DoesNotContain
                | Source
                | Target
                | Recursive
                | ReturnMatchingChildren
        )
    }

    /// Stable diagnostic name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Select => "Select",
            From => "From",
            Where => "Where",
            OrderBy => "OrderBy",
            Asc => "Asc",
            Desc => "Desc",
            Asof => "Asof",
            Not => "Not",
            Ever => "Ever",
            In => "In",
            Like => "Like",
            Under => "Under",
            WorkItems => "WorkItems",
            WorkItemLinks => "WorkItemLinks",
            And => "And",
            Or => "Or",
            Contains => "Contains",
            Words => "Words",
            Group => "Group",
            True => "True",
            False => "False",
            RParen => "RParen",
            LParen => "LParen",
            RSqBracket => "RSqBracket",
            LSqBracket => "LSqBracket",
            Comma => "Comma",
            Equals => "Equals",
            NotEquals => "NotEquals",
            GreaterThan => "GreaterThan",
            LessThan => "LessThan",
            GreaterOrEq => "GreaterOrEq",
            LessOrEq => "LessOrEq",
            Minus => "Minus",
            Plus => "Plus",
            UnexpectedToken => "UnexpectedToken",
            Str => "String",
            NonterminatingString => "NonterminatingString",
            Identifier => "Identifier",
            Digits => "Digits",
            Variable => "Variable",
            Mode => "Mode",
            MustContain => "MustContain",
            MayContain => "MayContain",
            DoesNotContain => "DoesNotContain",
            Source => "Source",
            Target => "Target",
            Dot => "Dot",
            Recursive => "Recursive",
            ReturnMatchingChildren => "ReturnMatchingChildren",
            Eof => "EOF",
            Whitespace => "Whitespace",
            Newline => "Newline",
            Number => "Number",
            Field => "Field",
            ContainsWords => "ContainsWords",
            InGroup => "InGroup",
            DateTime => "DateTime",
            OrderByFieldList => "OrderByFieldList",
            FieldList => "FieldList",
            ConditionalOperator => "ConditionalOperator",
            Value => "Value",
            ValueList => "ValueList",
            LogicalExpression => "LogicalExpression",
            ConditionalExpression => "ConditionalExpression",
            FlatSelect => "FlatSelect",
            SourcePrefix => "SourcePrefix",
            TargetPrefix => "TargetPrefix",
            LinkCondition => "LinkCondition",
            LinkExpression => "LinkExpression",
            LinkOrderByFieldList => "LinkOrderByFieldList",
            OneHopSelect => "OneHopSelect",
            RecursiveSelect => "RecursiveSelect",
            __LAST => "__LAST",
        }
    }

    /// Canonical spelling of fixed-text terminals, `None` for kinds whose text varies.
    pub fn canonical_text(self) -> Option<&'static str> {
        let text = match self {
            Select => "SELECT",
            From => "FROM",
            Where => "WHERE",
            OrderBy => "ORDER BY",
            Asc => "ASC",
            Desc => "DESC",
            Asof => "ASOF",
            Not => "NOT",
            Ever => "EVER",
            In => "IN",
            Like => "LIKE",
            Under => "UNDER",
            WorkItems => "WorkItems",
            WorkItemLinks => "WorkItemLinks",
            And => "AND",
            Or => "OR",
            Contains => "CONTAINS",
            Words => "WORDS",
            Group => "GROUP",
            True => "True",
            False => "False",
            RParen => ")",
            LParen => "(",
            RSqBracket => "]",
            LSqBracket => "[",
            Comma => ",",
            Equals => "=",
            NotEquals => "<>",
            GreaterThan => ">",
            LessThan => "<",
            GreaterOrEq => ">=",
            LessOrEq => "<=",
            Minus => "-",
            Plus => "+",
            Mode => "MODE",
            MustContain => "MustContain",
            MayContain => "MayContain",
            DoesNotContain => "DoesNotContain",
            Source => "[Source]",
            Target => "[Target]",
            Dot => ".",
            Recursive => "Recursive",
            ReturnMatchingChildren => "ReturnMatchingChildren",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable description for diagnostics: `` `ORDER BY` ``, `string`, `field`.
    pub fn describe(self) -> String {
        if let Some(text) = self.canonical_text() {
            return format!("`{}`", text);
        }
        let text = match self {
            UnexpectedToken => "unrecognized input",
            Str => "string",
            NonterminatingString => "unterminated string",
            Identifier => "field name",
            Digits => "number",
            Variable => "variable",
            Eof => "end of query",
            Whitespace | Newline => "whitespace",
            Number => "number",
            Field => "field",
            Value => "value",
            DateTime => "date",
            _ => self.name(),
        };
        text.to_string()
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for SyntaxKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Stable name for a raw kind value. Fails for values that are not a kind.
pub fn kind_name(raw: u16) -> Result<&'static str, Error> {
    SyntaxKind::from_raw(raw).map(SyntaxKind::name)
}

/// 128-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KindSet(u128);

impl KindSet {
    /// Creates an empty kind set.
    pub const EMPTY: KindSet = KindSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds KindSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        KindSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds KindSet capacity");
        KindSet(1 << kind)
    }

    /// All kinds with discriminant in `start..=end`.
    #[inline]
    pub const fn range(start: SyntaxKind, end: SyntaxKind) -> Self {
        let mut bits = 0u128;
        let mut kind = start as u16;
        while kind <= end as u16 {
            bits |= 1 << kind;
            kind += 1;
        }
        KindSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: KindSet) -> KindSet {
        KindSet(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = SyntaxKind> {
        (0..__LAST as u16)
            .filter(move |i| self.0 & (1 << i) != 0)
            .filter_map(|i| SyntaxKind::from_raw(i).ok())
    }
}

impl std::fmt::Debug for KindSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Pre-defined kind sets for roles and the parser.
pub mod kind_sets {
    use super::*;

    /// Abstract category: every primitive lexical terminal.
    pub const ANY_TOKEN: KindSet = KindSet::range(Select, ReturnMatchingChildren);

    /// Abstract category: every composite node.
    pub const ANY_NODE: KindSet = KindSet::range(Number, RecursiveSelect);

    pub const ASC_DESC: KindSet = KindSet::new(&[Asc, Desc]);
    pub const EVER_NOT: KindSet = KindSet::new(&[Ever, Not]);
    pub const AND_OR: KindSet = KindSet::new(&[And, Or]);
    pub const PLUS_MINUS: KindSet = KindSet::new(&[Plus, Minus]);
    pub const LINK_PREFIX: KindSet = KindSet::new(&[SourcePrefix, TargetPrefix]);
    pub const LINK_MODE: KindSet = KindSet::new(&[MustContain, MayContain, DoesNotContain]);

    /// Everything that can fill `ConditionalOperator.conditionToken`.
    pub const CONDITION_TOKENS: KindSet = KindSet::new(&[
        Equals,
        NotEquals,
        GreaterThan,
        GreaterOrEq,
        LessThan,
        LessOrEq,
        Contains,
        ContainsWords,
        Like,
        Under,
        InGroup,
        Ever,
    ]);

    /// Single-token comparison operators.
    pub const COMPARISON_OPERATORS: KindSet = KindSet::new(&[
        Equals,
        NotEquals,
        GreaterThan,
        GreaterOrEq,
        LessThan,
        LessOrEq,
        Like,
        Under,
    ]);

    /// Everything that can fill `Value.value`.
    pub const VALUE_KINDS: KindSet =
        KindSet::new(&[Number, Str, DateTime, Variable, True, False, Field]);

    /// FIRST set of a value.
    pub const VALUE_FIRST: KindSet =
        KindSet::new(&[Digits, Minus, Str, Variable, True, False, Identifier]);

    pub const TRIVIA: KindSet = KindSet::new(&[Whitespace, Newline]);
    pub const LEXICAL_ERRORS: KindSet = KindSet::new(&[UnexpectedToken, NonterminatingString]);
}
