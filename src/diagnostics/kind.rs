//! Diagnostic kinds and core types.
//!
//! Mirrors rustc's diagnostic levels for familiar UX.

/// The severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A hard error - something is definitely wrong.
    Error,
    /// A warning - something is probably wrong or suboptimal.
    Warning,
}

impl DiagnosticKind {
    /// Get the display prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
        }
    }
}

/// A diagnostic message with code, message, and optional context.
///
/// Diagnostic codes follow the pattern:
/// - `ZP0xx` - Configuration issues
/// - `ZP2xx` - Threading and nesting issues
/// - `ZP3xx` - Capacity issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub kind: DiagnosticKind,
    /// Diagnostic code (e.g., "ZP001").
    pub code: &'static str,
    /// Primary message.
    pub message: &'static str,
    /// Optional additional context.
    pub note: Option<&'static str>,
    /// Optional fix suggestion.
    pub help: Option<&'static str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub const fn error(code: &'static str, message: &'static str) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            code,
            message,
            note: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic.
    pub const fn warning(code: &'static str, message: &'static str) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            code,
            message,
            note: None,
            help: None,
        }
    }

    /// Add a note to this diagnostic.
    pub const fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    /// Add a help message to this diagnostic.
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.kind.prefix(), self.message)
    }
}

// =============================================================================
// ZP0xx - Configuration
// =============================================================================

/// ZP001: Invalid configuration replaced by defaults.
pub const ZP001: Diagnostic = Diagnostic::warning(
    "ZP001",
    "invalid profiler configuration, using defaults"
).with_note("ring capacity must be at least 2, zones per frame in 1..=u32::MAX, smoothing in (0, 1], spike clamp >= 1")
 .with_help("use Profiler::try_new() to get the validation error instead");

// =============================================================================
// ZP2xx - Threading and nesting
// =============================================================================

/// ZP201: Frames driven from more than one thread.
pub const ZP201: Diagnostic = Diagnostic::warning(
    "ZP201",
    "begin_frame() called from a second thread"
).with_note("the frame ring assumes a single writer; frame boundaries may interleave")
 .with_help("drive frames from one thread and only take snapshots elsewhere");

/// ZP202: Zone open across a frame boundary.
pub const ZP202: Diagnostic = Diagnostic::warning(
    "ZP202",
    "zone still open when a new frame began"
).with_note("the zone will be recorded into the new frame with its original depth")
 .with_help("close every zone before calling begin_frame()");

// =============================================================================
// ZP3xx - Capacity
// =============================================================================

/// ZP301: Zone name table full.
pub const ZP301: Diagnostic = Diagnostic::error(
    "ZP301",
    "zone name table is full"
).with_note("every zone id is in use; further names share the last id")
 .with_help("register names once per call site instead of building them dynamically");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ZP201.to_string(),
            "[ZP201] warning: begin_frame() called from a second thread"
        );
        assert_eq!(ZP301.kind, DiagnosticKind::Error);
        assert!(ZP001.help.is_some());
    }
}
