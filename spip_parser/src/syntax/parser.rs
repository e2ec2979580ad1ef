//! The concrete template parser
//!
//! `TemplateParser` owns the cursor, drives the character classifier
//! through the `Parser` trait, and enforces the resource limits the
//! grammar builders cannot see. Grammar failures backtrack and degrade
//! to literal text; only input and resource limits abort the parse.

use std::collections::VecDeque;

use crate::config::compile_time::scanner::MAX_TEMPLATE_SIZE;
use crate::config::compile_time::syntax::{
    MAX_CONTEXT_STACK_DEPTH, MAX_ERROR_HISTORY, MAX_NODE_COUNT, MAX_PARSE_DEPTH,
};
use crate::config::{ParserPreferences, ScannerPreferences};
use crate::grammar::ast::nodes::Document;
use crate::grammar::builders::{
    parse_nodes_until, BuildError, ParseCheckpoint, Parser, StopAt,
};
use crate::logging::codes;
use crate::scanner::{classify, opening_construct, ConstructOpener, Cursor};
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Capabilities, Scan, ScannedToken, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success, log_warning};

/// Parse a template into a document
pub fn parse_template(input: &str) -> SyntaxResult<Document> {
    TemplateParser::new(input).parse_document()
}

/// Stateful parser over one template
pub struct TemplateParser<'a> {
    cursor: Cursor<'a>,
    /// Every token the classifier accepted, in order
    emitted: Vec<ScannedToken>,
    /// Recovered construct failures, oldest first
    error_history: VecDeque<BuildError>,
    /// Innermost construct contexts, capped for diagnostics
    context_stack: Vec<&'static str>,
    depth: usize,
    node_count: usize,
    fatal: Option<SyntaxError>,
    scanner_prefs: ScannerPreferences,
    parser_prefs: ParserPreferences,
}

impl<'a> TemplateParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_preferences(
            input,
            ScannerPreferences::default(),
            ParserPreferences::default(),
        )
    }

    /// Build a parser with explicit preferences instead of the
    /// environment-derived defaults
    pub fn with_preferences(
        input: &'a str,
        scanner_prefs: ScannerPreferences,
        parser_prefs: ParserPreferences,
    ) -> Self {
        Self {
            cursor: Cursor::new(input),
            emitted: Vec::new(),
            error_history: VecDeque::new(),
            context_stack: Vec::new(),
            depth: 0,
            node_count: 0,
            fatal: None,
            scanner_prefs,
            parser_prefs,
        }
    }

    /// Parse the whole template
    pub fn parse_document(&mut self) -> SyntaxResult<Document> {
        let input = self.cursor.input();
        if input.len() > MAX_TEMPLATE_SIZE {
            let error = SyntaxError::template_too_large(input.len(), MAX_TEMPLATE_SIZE);
            log_error!(error.error_code(), &error.to_string(), "size" => input.len());
            return Err(error);
        }
        if input.is_empty() {
            log_warning!("Empty template", "code" => codes::template::EMPTY_TEMPLATE);
            return Ok(Document::new(Vec::new(), Span::dummy()));
        }

        let start = self.cursor.position();
        match parse_nodes_until(self, StopAt::EndOfInput) {
            Ok(nodes) => {
                let span = Span::new(start, self.cursor.position());
                log_success!(codes::success::SCAN_COMPLETE, "Character classification complete",
                    "tokens" => self.emitted.len()
                );
                log_success!(codes::success::AST_CONSTRUCTION_COMPLETE, "Template parsed",
                    "nodes" => nodes.len(),
                    "fallbacks" => self.error_history.len()
                );
                Ok(Document::new(nodes, span))
            }
            Err(error) => {
                if let Some(fatal) = self.fatal.take() {
                    log_error!(fatal.error_code(), &fatal.to_string());
                    Err(fatal)
                } else {
                    let internal = SyntaxError::internal_parser_error(error.to_string());
                    log_error!(internal.error_code(), &internal.to_string());
                    Err(internal)
                }
            }
        }
    }

    /// Every token the classifier accepted during the parse
    pub fn emitted_tokens(&self) -> &[ScannedToken] {
        &self.emitted
    }

    /// Construct failures that degraded to literal text
    pub fn error_history(&self) -> impl Iterator<Item = &BuildError> {
        self.error_history.iter()
    }

    fn scan(&mut self, caps: Capabilities) -> Option<ScannedToken> {
        match classify(&mut self.cursor, caps) {
            Scan::Accept(token) => {
                if self.scanner_prefs.trace_classification {
                    log_debug!("Token classified",
                        "kind" => format!("{:?}", token.kind),
                        "span" => token.span
                    );
                }
                self.emitted.push(token);
                Some(token)
            }
            Scan::Decline => None,
        }
    }

    /// A grammar mismatch, decorated per the diagnostic preferences
    fn grammar_error(&self, mut message: String) -> BuildError {
        if self.scanner_prefs.include_position_in_errors {
            message.push_str(&format!(" at {}", self.cursor.position()));
        }
        if self.parser_prefs.include_context_in_errors {
            if let Some(context) = self.context_stack.last() {
                message.push_str(&format!(" in {}", context));
            }
        }
        BuildError::grammar(message)
    }
}

impl Parser for TemplateParser<'_> {
    fn scan_content_char(&mut self) -> Option<char> {
        let token = self.scan(Capabilities::content_only())?;
        debug_assert_eq!(token.kind, TokenKind::ContentChar);
        token.span.slice(self.cursor.input()).chars().next()
    }

    fn scan_structural_ws(&mut self) -> Option<Span> {
        self.scan(Capabilities::whitespace_only()).map(|t| t.span)
    }

    fn scan_param_open(&mut self) -> Option<Span> {
        self.scan(Capabilities::param_open_only()).map(|t| t.span)
    }

    fn peek_char(&self) -> Option<char> {
        self.cursor.peek()
    }

    fn peek_char_at(&self, n: usize) -> Option<char> {
        self.cursor.peek_at(n)
    }

    fn next_char(&mut self) -> Option<char> {
        self.cursor.advance()
    }

    fn at_str(&self, prefix: &str) -> bool {
        self.cursor.starts_with(prefix)
    }

    fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    fn current_position(&self) -> Position {
        self.cursor.position()
    }

    fn current_opener(&self) -> Option<ConstructOpener> {
        opening_construct(&self.cursor)
    }

    fn expect_char(&mut self, expected: char) -> Result<(), BuildError> {
        match self.cursor.peek() {
            Some(c) if c == expected => {
                self.cursor.advance();
                Ok(())
            }
            found => Err(self.grammar_error(format!(
                "expected {:?}, found {:?}",
                expected, found
            ))),
        }
    }

    fn expect_str(&mut self, expected: &str) -> Result<(), BuildError> {
        if self.cursor.starts_with(expected) {
            self.cursor.advance_by(expected.chars().count());
            Ok(())
        } else {
            Err(self.grammar_error(format!("expected {:?}", expected)))
        }
    }

    fn checkpoint(&self) -> ParseCheckpoint {
        ParseCheckpoint {
            position: self.cursor.checkpoint(),
            emitted_len: self.emitted.len(),
        }
    }

    fn restore(&mut self, checkpoint: ParseCheckpoint) {
        self.cursor.restore(checkpoint.position);
        self.emitted.truncate(checkpoint.emitted_len);
    }

    fn note_fallback(&mut self, error: &BuildError) {
        if self.parser_prefs.log_construct_fallbacks {
            log_debug!("Construct fell back to literal text",
                "reason" => error,
                "position" => self.cursor.position()
            );
        }
        if !self.parser_prefs.collect_error_history {
            return;
        }
        if self.error_history.len() >= MAX_ERROR_HISTORY {
            self.error_history.pop_front();
        }
        self.error_history.push_back(error.clone());
    }

    fn enter_context(&mut self, context: &'static str) -> Result<(), BuildError> {
        if self.depth >= MAX_PARSE_DEPTH {
            let fatal =
                SyntaxError::max_parse_depth(MAX_PARSE_DEPTH, context, self.cursor.position());
            self.fatal = Some(fatal);
            return Err(BuildError::new(
                codes::syntax::MAX_RECURSION_DEPTH,
                format!("maximum parse depth reached in {}", context),
            ));
        }
        self.depth += 1;
        if self.depth <= MAX_CONTEXT_STACK_DEPTH {
            self.context_stack.push(context);
        }
        Ok(())
    }

    fn exit_context(&mut self) {
        if self.depth == 0 {
            return;
        }
        if self.depth <= MAX_CONTEXT_STACK_DEPTH {
            self.context_stack.pop();
        }
        self.depth -= 1;
    }

    fn note_node(&mut self) -> Result<(), BuildError> {
        self.node_count += 1;
        if self.node_count > MAX_NODE_COUNT {
            self.fatal = Some(SyntaxError::node_limit_exceeded(MAX_NODE_COUNT));
            return Err(BuildError::new(
                codes::syntax::NODE_LIMIT_EXCEEDED,
                "node limit exceeded",
            ));
        }
        Ok(())
    }

    fn is_poisoned(&self) -> bool {
        self.fatal.is_some()
    }
}
