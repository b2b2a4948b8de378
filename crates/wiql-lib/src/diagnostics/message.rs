use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Priority rationale:
/// - Lexical errors poison everything parsed after them
/// - Unclosed parentheses are structural and swallow the rest of the query
/// - Expected-something errors are root causes the user should fix first
/// - Misplaced syntax is a specific mistake at a location
/// - Semantic errors assume valid syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexical
    UnterminatedString,
    UnrecognizedToken,

    // Structural
    UnclosedParen,

    // User omitted something required
    UnexpectedEof,
    ExpectedSelect,
    ExpectedField,
    ExpectedFrom,
    ExpectedSource,
    ExpectedCondition,
    ExpectedOperator,
    ExpectedValue,
    ExpectedDate,
    ExpectedMode,
    ExpectedToken,

    // User wrote something that doesn't belong
    ModeInFlatQuery,
    TrailingInput,
    UnexpectedToken,

    // Valid syntax, invalid semantics
    UnknownField,
    DuplicateField,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DuplicateField => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when both point at the same place.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof
                | Self::ExpectedSelect
                | Self::ExpectedField
                | Self::ExpectedFrom
                | Self::ExpectedSource
                | Self::ExpectedCondition
                | Self::ExpectedOperator
                | Self::ExpectedValue
                | Self::ExpectedDate
                | Self::ExpectedMode
                | Self::ExpectedToken
        )
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedField => Some("e.g., `[System.Id]` or `System.State`"),
            Self::ExpectedSource => Some("e.g., `FROM WorkItems`"),
            Self::ExpectedDate => Some("e.g., `ASOF '2024-01-31'`"),
            Self::ExpectedMode => Some(
                "use `MustContain`, `MayContain`, `DoesNotContain` or `Recursive`",
            ),
            Self::ModeInFlatQuery => Some("use `FROM WorkItemLinks` for link queries"),
            Self::UnterminatedString => Some("close the string with a matching quote"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string literal",
            Self::UnrecognizedToken => "unrecognized input",

            Self::UnclosedParen => "missing closing `)`",

            Self::UnexpectedEof => "unexpected end of query",
            Self::ExpectedSelect => "expected `SELECT`",
            Self::ExpectedField => "expected a field",
            Self::ExpectedFrom => "expected `FROM`",
            Self::ExpectedSource => "expected `WorkItems` or `WorkItemLinks`",
            Self::ExpectedCondition => "expected a condition",
            Self::ExpectedOperator => "expected a comparison operator",
            Self::ExpectedValue => "expected a value",
            Self::ExpectedDate => "expected a date string",
            Self::ExpectedMode => "expected a link mode",
            Self::ExpectedToken => "expected token",

            Self::ModeInFlatQuery => "`MODE` is only valid in `WorkItemLinks` queries",
            Self::TrailingInput => "unexpected input after end of query",
            Self::UnexpectedToken => "unexpected token",

            Self::UnknownField => "unknown field",
            Self::DuplicateField => "duplicate field",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnexpectedEof => format!("{}; {{}}", self.fallback_message()),
            Self::ExpectedToken => "expected {}".to_string(),
            Self::UnknownField => "`{}` is not a known field".to_string(),
            Self::DuplicateField => "field `{}` is selected more than once".to_string(),
            kind if kind.is_root_cause_error() => format!("{}, {{}}", self.fallback_message()),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
