//! Language identifiers and their source-file extensions.
//!
//! The table is closed: every supported language is an enum variant with a fixed
//! extension list. The token `all` is reserved and disables extension filtering.
//!
//! # Examples
//!
//! ```
//! use srcbundle::language::{Language, LanguageFilter};
//!
//! let filter = LanguageFilter::parse("Python").unwrap();
//! assert_eq!(filter, LanguageFilter::Only(Language::Python));
//! assert!(filter.accepts(".py"));
//! assert!(!filter.accepts(".txt"));
//! ```

use crate::error::{BundleError, BundleResult};

/// Token meaning "no extension filter".
pub const ALL_TOKEN: &str = "all";

/// A language the bundler knows how to select files for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    CSharp,
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
    C,
    Go,
    Rust,
    Html,
    Css,
    Sql,
}

impl Language {
    /// Every known language, in listing order.
    pub const ALL: [Language; 12] = [
        Language::CSharp,
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Cpp,
        Language::C,
        Language::Go,
        Language::Rust,
        Language::Html,
        Language::Css,
        Language::Sql,
    ];

    /// Canonical identifier accepted on the command line.
    ///
    /// ```
    /// use srcbundle::language::Language;
    ///
    /// assert_eq!(Language::CSharp.identifier(), "csharp");
    /// assert_eq!(Language::Cpp.identifier(), "cpp");
    /// ```
    pub fn identifier(&self) -> &'static str {
        match self {
            Language::CSharp => "csharp",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Html => "html",
            Language::Css => "css",
            Language::Sql => "sql",
        }
    }

    /// Extensions (lowercase, with leading dot) selected for this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::CSharp => &[".cs"],
            Language::Python => &[".py"],
            Language::JavaScript => &[".js", ".jsx"],
            Language::TypeScript => &[".ts", ".tsx"],
            Language::Java => &[".java"],
            Language::Cpp => &[".cpp", ".cc", ".h", ".hpp"],
            Language::C => &[".c", ".h"],
            Language::Go => &[".go"],
            Language::Rust => &[".rs"],
            Language::Html => &[".html", ".htm"],
            Language::Css => &[".css"],
            Language::Sql => &[".sql"],
        }
    }

    /// Looks up a language by identifier or alias, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        let lowered = token.trim().to_lowercase();
        let language = match lowered.as_str() {
            "csharp" | "c#" | "cs" => Language::CSharp,
            "python" | "py" => Language::Python,
            "javascript" | "js" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "java" => Language::Java,
            "cpp" | "c++" => Language::Cpp,
            "c" => Language::C,
            "go" => Language::Go,
            "rust" | "rs" => Language::Rust,
            "html" => Language::Html,
            "css" => Language::Css,
            "sql" => Language::Sql,
            _ => return None,
        };
        Some(language)
    }
}

/// The extension filter applied by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFilter {
    /// Keep every file regardless of extension.
    All,
    /// Keep only files whose extension belongs to the language.
    Only(Language),
}

impl LanguageFilter {
    /// Resolves a user-supplied language token.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::UnsupportedLanguage`] carrying the original token when it
    /// is neither `all` nor a known identifier.
    pub fn parse(token: &str) -> BundleResult<Self> {
        if token.trim().eq_ignore_ascii_case(ALL_TOKEN) {
            return Ok(LanguageFilter::All);
        }
        Language::from_token(token)
            .map(LanguageFilter::Only)
            .ok_or_else(|| BundleError::UnsupportedLanguage(token.to_string()))
    }

    /// Returns true if a file with this extension passes the filter.
    pub fn accepts(&self, extension: &str) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(language) => language.extensions().contains(&extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_token_is_case_insensitive() {
        assert_eq!(LanguageFilter::parse("all").unwrap(), LanguageFilter::All);
        assert_eq!(LanguageFilter::parse("ALL").unwrap(), LanguageFilter::All);
        assert_eq!(LanguageFilter::parse("All").unwrap(), LanguageFilter::All);
    }

    #[test]
    fn test_known_tokens_resolve() {
        assert_eq!(
            LanguageFilter::parse("CSharp").unwrap(),
            LanguageFilter::Only(Language::CSharp)
        );
        assert_eq!(
            LanguageFilter::parse("c++").unwrap(),
            LanguageFilter::Only(Language::Cpp)
        );
        assert_eq!(
            LanguageFilter::parse("py").unwrap(),
            LanguageFilter::Only(Language::Python)
        );
    }

    #[test]
    fn test_unknown_token_names_itself() {
        let err = LanguageFilter::parse("ruby").unwrap_err();
        match err {
            BundleError::UnsupportedLanguage(token) => assert_eq!(token, "ruby"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_all_accepts_anything() {
        assert!(LanguageFilter::All.accepts(".py"));
        assert!(LanguageFilter::All.accepts(""));
        assert!(LanguageFilter::All.accepts(".whatever"));
    }

    #[test]
    fn test_only_matches_exact_extension() {
        let cpp = LanguageFilter::Only(Language::Cpp);
        assert!(cpp.accepts(".cpp"));
        assert!(cpp.accepts(".hpp"));
        assert!(!cpp.accepts("cpp"));
        assert!(!cpp.accepts(".CPP"));
        assert!(!cpp.accepts(".py"));
    }

    #[test]
    fn test_every_language_round_trips_through_identifier() {
        for language in Language::ALL {
            assert_eq!(Language::from_token(language.identifier()), Some(language));
            assert!(!language.extensions().is_empty());
            for ext in language.extensions() {
                assert!(ext.starts_with('.'));
                assert_eq!(*ext, ext.to_lowercase());
            }
        }
    }
}
