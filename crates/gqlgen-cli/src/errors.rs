use colored::*;
use gqlgen_syntax::{Loc, ParseError, ParseErrorKind};
use std::fmt;
use std::fmt::Write;

/// Enhanced error with context and suggestions
pub struct EnhancedError {
    pub message: String,
    pub loc: Option<Loc>,
    pub width: usize,
    pub file: Option<String>,
    pub source: Option<String>,
    pub suggestion: Option<String>,
    pub help: Option<String>,
}

impl EnhancedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            loc: None,
            width: 1,
            file: None,
            source: None,
            suggestion: None,
            help: None,
        }
    }

    pub fn with_loc(mut self, loc: Loc, width: usize) -> Self {
        self.loc = Some(loc);
        self.width = width.max(1);
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Display the error on stderr with colored output and context
    pub fn display(&self) {
        eprint!("{}", self.render());
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_report(&mut out)
            .expect("Formatting into a String");
        out
    }

    fn write_report(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "{} {}", "error:".red().bold(), self.message.bold())?;

        if let Some(loc) = &self.loc {
            let file = self.file.as_deref().unwrap_or("<stdin>");
            writeln!(
                out,
                "  {} {}:{}:{}",
                "-->".blue().bold(),
                file,
                loc.display_line(),
                loc.display_column()
            )?;
        }

        if let (Some(source), Some(loc)) = (&self.source, &self.loc) {
            writeln!(out)?;
            self.write_source_excerpt(out, source, *loc)?;
        }

        if let Some(suggestion) = &self.suggestion {
            writeln!(out)?;
            writeln!(out, "{} {}", "suggestion:".green().bold(), suggestion)?;
        }

        if let Some(help) = &self.help {
            writeln!(out)?;
            writeln!(out, "{} {}", "help:".cyan().bold(), help)?;
        }

        Ok(())
    }

    fn write_source_excerpt(&self, out: &mut String, source: &str, loc: Loc) -> fmt::Result {
        let lines: Vec<&str> = source.lines().collect();

        // EOF after a trailing newline sits one past the last line
        let line_idx = loc.line.min(lines.len().saturating_sub(1));
        let Some(line) = lines.get(line_idx) else {
            return Ok(());
        };

        let start = line_idx.saturating_sub(2);
        let end = (line_idx + 3).min(lines.len());
        let width = end.to_string().len();

        for (i, text) in lines.iter().enumerate().take(end).skip(start) {
            let number = i + 1;
            if i != line_idx {
                writeln!(
                    out,
                    "{:>width$} {} {}",
                    number.to_string().dimmed(),
                    "|".blue().bold(),
                    text,
                    width = width
                )?;
                continue;
            }

            writeln!(
                out,
                "{:>width$} {} {}",
                number.to_string().blue().bold(),
                "|".blue().bold(),
                line,
                width = width
            )?;

            let column = if loc.line == line_idx {
                loc.column
            } else {
                line.chars().count()
            };
            writeln!(
                out,
                "{:>width$} {} {}{}",
                "",
                "|".blue().bold(),
                " ".repeat(column),
                "^".repeat(self.width).red().bold(),
                width = width
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for EnhancedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnhancedError: {}", self.message)
    }
}

impl std::error::Error for EnhancedError {}

/// Turn a schema syntax error into an EnhancedError pointing at the
/// innermost failure.
pub fn enhance_parse_error(err: &ParseError, file: Option<String>, source: &str) -> EnhancedError {
    let cause = err.root_cause();
    let mut enhanced = EnhancedError::new(format!("Parse error: {}", err))
        .with_loc(cause.loc(), cause.token.width())
        .with_source(source);

    if let Some(file) = file {
        enhanced = enhanced.with_file(file);
    }

    match &cause.kind {
        ParseErrorKind::LexError { .. } => enhanced
            .with_suggestion("Remove the invalid character")
            .with_help("Names may only contain letters and underscores"),
        ParseErrorKind::MismatchedBrackets => enhanced
            .with_suggestion("Close list types with ']', as in [String] or [String!]!"),
        ParseErrorKind::UnexpectedToken { expected } if expected.starts_with("a definition") => {
            enhanced.with_help("Definitions start with 'type', 'input', 'schema' or 'directive'")
        }
        ParseErrorKind::UnexpectedToken { .. } => enhanced
            .with_suggestion("Check that every '{' and '(' is closed and every field has a ': Type'"),
        ParseErrorKind::Premature { .. } => enhanced,
    }
}

/// Convert anyhow::Error to EnhancedError with suggestions
pub fn enhance_error(err: anyhow::Error) -> EnhancedError {
    let message = format!("{:#}", err);
    let mut enhanced = EnhancedError::new(message.clone());

    if message.contains("GOPACKAGE") {
        enhanced = enhanced
            .with_suggestion("Pass --package <name> or add `package = \"<name>\"` to .gqlgenrc.toml");
    } else if message.contains("not a valid Go package name") {
        enhanced = enhanced.with_help("Go package names use letters, digits and underscores");
    } else if message.contains("Failed to read schema") {
        enhanced = enhanced.with_help("Pass a schema file path, or pipe the schema on stdin");
    } else if message.contains("not valid TOML") {
        enhanced = enhanced.with_help(
            "Supported keys: package, sort, resolve_directive, root_types",
        );
    }

    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlgen_syntax::parse_str;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_points_at_root_cause() {
        plain();
        let source = "type Query {\n  ping: [String\n}";
        let err = parse_str(source).unwrap_err();

        let rendered = enhance_parse_error(&err, Some("schema.graphql".to_string()), source).render();

        assert!(rendered.starts_with("error: Parse error: stopped parsing prematurely"));
        assert!(rendered.contains("--> schema.graphql:3:1"));
        assert!(rendered.contains("3 | }\n"));
        assert!(rendered.contains("  | ^\n"));
        assert!(rendered.contains("suggestion: Close list types"));
    }

    #[test]
    fn test_render_without_location() {
        plain();
        let rendered = EnhancedError::new("boom").with_help("try again").render();

        assert_eq!(rendered, "error: boom\n\nhelp: try again\n");
    }

    #[test]
    fn test_eof_after_trailing_newline() {
        plain();
        let source = "type Query {\n";
        let err = parse_str(source).unwrap_err();

        let rendered = enhance_parse_error(&err, None, source).render();

        assert!(rendered.contains("--> <stdin>:2:1"));
        assert!(rendered.contains("1 | type Query {\n"));
    }

    #[test]
    fn test_enhance_missing_package() {
        let err = anyhow::anyhow!("either the GOPACKAGE environment variable must be set");
        let enhanced = enhance_error(err);

        assert!(enhanced.suggestion.is_some());
        assert!(enhanced.help.is_none());
    }
}
