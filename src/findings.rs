//! Findings reported while exporting tokens.
//!
//! Findings never interrupt an export. Each one names the token it concerns
//! and carries everything the reporter needs to print it.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Note,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnresolvedToken,
    NonOpaqueColor,
    DeprecatedToken,
    UndefinedValue,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnresolvedToken => write!(f, "unresolved-token"),
            Rule::NonOpaqueColor => write!(f, "non-opaque-color"),
            Rule::DeprecatedToken => write!(f, "deprecated-token"),
            Rule::UndefinedValue => write!(f, "undefined-value"),
        }
    }
}

// ============================================================
// Finding Types
// ============================================================

/// No candidate of the token applies in the active context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedTokenFinding {
    pub token_name: String,
    /// `dimension=tag` pairs of the context that was tried.
    pub context: Vec<String>,
}

/// A color whose alpha is not 1; exported as if opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct NonOpaqueColorFinding {
    pub token_name: String,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedTokenFinding {
    pub token_name: String,
    pub message: String,
    pub replacement: Option<String>,
    hint: Option<String>,
}

impl DeprecatedTokenFinding {
    pub fn new(
        token_name: impl Into<String>,
        message: impl Into<String>,
        replacement: Option<String>,
    ) -> Self {
        let hint = replacement
            .as_ref()
            .map(|name| format!("use `{}` instead", name));
        Self {
            token_name: token_name.into(),
            message: message.into(),
            replacement,
            hint,
        }
    }
}

/// The selected value is explicitly undefined, so the token has no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedValueFinding {
    pub token_name: String,
}

// ============================================================
// Finding Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    UnresolvedToken(UnresolvedTokenFinding),
    NonOpaqueColor(NonOpaqueColorFinding),
    DeprecatedToken(DeprecatedTokenFinding),
    UndefinedValue(UndefinedValueFinding),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Uniform view of a finding for the reporter.
#[enum_dispatch]
pub trait Report {
    /// Alias of the token the finding is about.
    fn token_name(&self) -> &str;

    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    fn hint(&self) -> Option<&str> {
        None
    }
}

impl Report for UnresolvedTokenFinding {
    fn token_name(&self) -> &str {
        &self.token_name
    }

    fn message(&self) -> String {
        if self.context.is_empty() {
            "no value applies in the active context".to_string()
        } else {
            format!("no value applies for {}", self.context.join(", "))
        }
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::UnresolvedToken
    }
}

impl Report for NonOpaqueColorFinding {
    fn token_name(&self) -> &str {
        &self.token_name
    }

    fn message(&self) -> String {
        format!("alpha {} dropped; exported as opaque", self.alpha)
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::NonOpaqueColor
    }
}

impl Report for DeprecatedTokenFinding {
    fn token_name(&self) -> &str {
        &self.token_name
    }

    fn message(&self) -> String {
        if self.message.is_empty() {
            "token is deprecated".to_string()
        } else {
            self.message.clone()
        }
    }

    fn report_severity(&self) -> Severity {
        Severity::Warning
    }

    fn report_rule(&self) -> Rule {
        Rule::DeprecatedToken
    }

    fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl Report for UndefinedValueFinding {
    fn token_name(&self) -> &str {
        &self.token_name
    }

    fn message(&self) -> String {
        "value is undefined in the active context".to_string()
    }

    fn report_severity(&self) -> Severity {
        Severity::Note
    }

    fn report_rule(&self) -> Rule {
        Rule::UndefinedValue
    }
}
