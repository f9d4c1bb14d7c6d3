// Error types for page analysis
//
// Every fatal condition is scoped to a single file: the caller reports it as a
// build failure for that file and keeps processing the others.

use std::fmt;
use thiserror::Error;

/// 1-based line/column position inside the original file text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Compute the location of a byte offset in `source`.
    ///
    /// Columns count characters, not bytes. Offsets past the end clamp to the end.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while offset > 0 && !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{id}:{location}: duplicate `{macro_name}()` call in <script setup>")]
    DuplicateMacro {
        id: String,
        macro_name: String,
        location: Location,
    },

    #[error(
        "{id}:{location}: `{macro_name}()` in <script setup> cannot reference locally declared variables ({identifier}) because it will be hoisted outside of the component"
    )]
    InvalidScopeReference {
        id: String,
        macro_name: String,
        identifier: String,
        location: Location,
    },

    #[error("{id}:{location}: `{macro_name}()` expects an object literal, found {found}")]
    InvalidRouteRecord {
        id: String,
        macro_name: String,
        found: String,
        location: Location,
    },

    #[error("{id}:{location}: {message}")]
    Parse {
        id: String,
        message: String,
        location: Location,
    },

    #[error("{id}:{location}: `{name}` is reserved for the generated loaders export")]
    ReservedExport {
        id: String,
        name: String,
        location: Location,
    },

    #[error("{id}: unsupported script language '{lang}'")]
    UnsupportedLanguage { id: String, lang: String },

    #[error("invalid edit {start}..{end}: {reason}")]
    Edit {
        start: usize,
        end: usize,
        reason: String,
    },
}

impl ExtractError {
    /// Location of the failure in the original file, when one applies
    pub fn location(&self) -> Option<Location> {
        match self {
            ExtractError::DuplicateMacro { location, .. }
            | ExtractError::InvalidScopeReference { location, .. }
            | ExtractError::InvalidRouteRecord { location, .. }
            | ExtractError::Parse { location, .. }
            | ExtractError::ReservedExport { location, .. } => Some(*location),
            ExtractError::UnsupportedLanguage { .. } | ExtractError::Edit { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
