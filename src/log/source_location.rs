use std::{fmt, panic::Location};

/// Call site of a log record.
///
/// Built either from the `file!()`/`line!()`/`module_path!()` triple by the
/// logging macros, or from [`SourceLocation::caller`] inside `#[track_caller]`
/// functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    /// Module path of the call site, when known.
    pub module: Option<&'static str>,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(file: &'static str, line: u32, module: &'static str) -> Self {
        Self {
            file,
            line,
            module: Some(module),
        }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
            module: None,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.module {
            Some(module) => write!(f, "{} - {}() - Line {}", self.file, module, self.line),
            None => write!(f, "{} - Line {}", self.file, self.line),
        }
    }
}
