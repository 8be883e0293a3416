/// Parser for the DOT dialect subset describing ancestry graphs.
///
/// The accepted grammar covers directed-graph documents only:
///
/// ```text
/// document   := 'strict'? 'digraph' ID? '{' statement* '}'
/// statement  := ID attr-list?                       vertex declaration
///             | ID ('->' ID)+ attr-list?            edge chain
///             | ('node'|'edge'|'graph') attr-list   defaults, ignored
///             | ID '=' ID                           assignment, ignored
/// attr-list  := '[' (ID '=' ID (',' ID '=' ID)*)? ']'
/// ```
///
/// Identifiers are bare words (`[A-Za-z0-9_.]+`) or double-quoted strings;
/// quotes are stripped and `\"` / `\\` escapes honored. Keywords are matched
/// case-insensitively, as in DOT. Statement separators (`;`) are optional,
/// whitespace is insignificant, and `//`, `#`, and `/* */` comments are
/// skipped. Undirected edges (`--`), subgraphs, and ports are rejected.
///
/// Parsing is total over the document: every statement is processed once, in
/// textual order. An identifier first seen on either side of an edge becomes
/// an attribute-less vertex (implicit declaration); a re-declared vertex has
/// its attributes merged, later values overriding earlier ones key by key.
///
/// On failure no partial graph escapes: the single [`ParseError`] carries
/// the 1-based line and column of the offending token.
use std::collections::BTreeMap;

use crate::graph::{DotGraph, GraphError};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// A malformed-input error, positioned at the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line of the offending token or character.
    pub line: u32,
    /// 1-based column of the offending token or character.
    pub column: u32,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// The ways a document can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that cannot begin any token.
    InvalidCharacter(char),
    /// A quoted string with no closing `"` before end of input.
    UnterminatedString,
    /// A `/* ... */` comment with no closing `*/` before end of input.
    UnterminatedComment,
    /// A well-formed token in a position the grammar does not allow.
    UnexpectedToken {
        /// Display form of the token that was found.
        found: String,
        /// What the grammar needed instead.
        expected: &'static str,
    },
    /// The document ended in the middle of a construct.
    UnexpectedEof {
        /// What the grammar needed instead.
        expected: &'static str,
    },
    /// Syntax that exists in full DOT but is outside the supported subset.
    Unsupported(&'static str),
    /// A graph-model error surfaced while populating the graph.
    Graph(GraphError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.kind
        )
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorKind::InvalidCharacter(c) => write!(f, "unexpected character {c:?}"),
            ParseErrorKind::UnterminatedString => write!(f, "unterminated quoted string"),
            ParseErrorKind::UnterminatedComment => write!(f, "unterminated block comment"),
            ParseErrorKind::UnexpectedToken { found, expected } => {
                write!(f, "found {found}, expected {expected}")
            }
            ParseErrorKind::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            ParseErrorKind::Unsupported(what) => write!(f, "unsupported syntax: {what}"),
            ParseErrorKind::Graph(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

fn err(line: u32, column: u32, kind: ParseErrorKind) -> ParseError {
    ParseError { line, column, kind }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// A bare word or quoted string. `quoted` distinguishes `"node"` (a
    /// plain identifier) from `node` (a candidate keyword).
    Ident { text: String, quoted: bool },
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Equals,
    Comma,
    Semicolon,
    Arrow,
}

/// Display form used in "found X, expected Y" messages.
fn token_display(token: &Token) -> String {
    match token {
        Token::Ident { text, .. } => format!("{text:?}"),
        Token::LBrace => "\"{\"".to_owned(),
        Token::RBrace => "\"}\"".to_owned(),
        Token::LBracket => "\"[\"".to_owned(),
        Token::RBracket => "\"]\"".to_owned(),
        Token::Equals => "\"=\"".to_owned(),
        Token::Comma => "\",\"".to_owned(),
        Token::Semicolon => "\";\"".to_owned(),
        Token::Arrow => "\"->\"".to_owned(),
    }
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    line: u32,
    column: u32,
}

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Discards the remainder of the current line.
    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Discards a `/* ... */` body. The opening `/*` is already consumed;
    /// `line`/`column` point at it for error reporting.
    fn skip_block_comment(&mut self, line: u32, column: u32) -> Result<(), ParseError> {
        loop {
            match self.bump() {
                None => return Err(err(line, column, ParseErrorKind::UnterminatedComment)),
                Some('*') => {
                    if self.peek() == Some('/') {
                        self.bump();
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
        }
    }

    /// Scans a quoted string. The opening `"` is not yet consumed;
    /// `line`/`column` point at it.
    fn scan_quoted(&mut self, line: u32, column: u32) -> Result<String, ParseError> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(err(line, column, ParseErrorKind::UnterminatedString)),
                Some('"') => return Ok(text),
                Some('\\') => match self.bump() {
                    None => return Err(err(line, column, ParseErrorKind::UnterminatedString)),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    // Unknown escapes pass through verbatim, as DOT does.
                    Some(c) => {
                        text.push('\\');
                        text.push(c);
                    }
                },
                Some(c) => text.push(c),
            }
        }
    }

    /// Scans a bare word; the first character is known to qualify.
    fn scan_bare(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_char(c) {
                break;
            }
            self.bump();
            text.push(c);
        }
        text
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Tokenizes the whole document. Returns the tokens plus the position just
/// past the last character, used for end-of-input errors.
fn tokenize(input: &str) -> Result<(Vec<Spanned>, u32, u32), ParseError> {
    let mut lx = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        while matches!(lx.peek(), Some(c) if c.is_whitespace()) {
            lx.bump();
        }

        let (line, column) = (lx.line, lx.column);
        let Some(c) = lx.peek() else {
            return Ok((tokens, line, column));
        };

        let mut push = |token: Token| {
            tokens.push(Spanned {
                token,
                line,
                column,
            });
        };

        match c {
            '{' => {
                lx.bump();
                push(Token::LBrace);
            }
            '}' => {
                lx.bump();
                push(Token::RBrace);
            }
            '[' => {
                lx.bump();
                push(Token::LBracket);
            }
            ']' => {
                lx.bump();
                push(Token::RBracket);
            }
            '=' => {
                lx.bump();
                push(Token::Equals);
            }
            ',' => {
                lx.bump();
                push(Token::Comma);
            }
            ';' => {
                lx.bump();
                push(Token::Semicolon);
            }
            '#' => lx.skip_line(),
            '/' => {
                lx.bump();
                match lx.peek() {
                    Some('/') => lx.skip_line(),
                    Some('*') => {
                        lx.bump();
                        lx.skip_block_comment(line, column)?;
                    }
                    Some(_) | None => {
                        return Err(err(line, column, ParseErrorKind::InvalidCharacter('/')));
                    }
                }
            }
            '-' => {
                lx.bump();
                match lx.peek() {
                    Some('>') => {
                        lx.bump();
                        push(Token::Arrow);
                    }
                    Some('-') => {
                        return Err(err(
                            line,
                            column,
                            ParseErrorKind::Unsupported(
                                "undirected edge operator \"--\" (directed graphs only)",
                            ),
                        ));
                    }
                    Some(_) | None => {
                        return Err(err(line, column, ParseErrorKind::InvalidCharacter('-')));
                    }
                }
            }
            ':' => {
                return Err(err(line, column, ParseErrorKind::Unsupported("port syntax")));
            }
            '"' => {
                let text = lx.scan_quoted(line, column)?;
                push(Token::Ident { text, quoted: true });
            }
            c if is_ident_char(c) => {
                let text = lx.scan_bare();
                push(Token::Ident {
                    text,
                    quoted: false,
                });
            }
            other => {
                return Err(err(line, column, ParseErrorKind::InvalidCharacter(other)));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parses a DOT document into a [`DotGraph`].
///
/// # Errors
///
/// Returns a [`ParseError`] positioned at the offending token when the
/// document does not conform to the supported subset grammar.
pub fn parse_dot(input: &str) -> Result<DotGraph, ParseError> {
    let (tokens, eof_line, eof_column) = tokenize(input)?;
    Parser {
        tokens,
        pos: 0,
        eof_line,
        eof_column,
    }
    .parse_document()
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    eof_line: u32,
    eof_column: u32,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_is(&self, want: &Token) -> bool {
        self.peek().is_some_and(|sp| sp.token == *want)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let sp = self.tokens.get(self.pos).cloned();
        if sp.is_some() {
            self.pos += 1;
        }
        sp
    }

    fn unexpected(sp: &Spanned, expected: &'static str) -> ParseError {
        err(
            sp.line,
            sp.column,
            ParseErrorKind::UnexpectedToken {
                found: token_display(&sp.token),
                expected,
            },
        )
    }

    fn eof(&self, expected: &'static str) -> ParseError {
        err(
            self.eof_line,
            self.eof_column,
            ParseErrorKind::UnexpectedEof { expected },
        )
    }

    fn expect(&mut self, want: &Token, expected: &'static str) -> Result<(), ParseError> {
        match self.advance() {
            Some(sp) if sp.token == *want => Ok(()),
            Some(sp) => Err(Self::unexpected(&sp, expected)),
            None => Err(self.eof(expected)),
        }
    }

    /// Consumes an identifier token (bare or quoted) and returns its text
    /// with the token position.
    fn expect_ident(&mut self, expected: &'static str) -> Result<(String, u32, u32), ParseError> {
        match self.advance() {
            Some(sp) => {
                if let Token::Ident { text, .. } = sp.token {
                    Ok((text, sp.line, sp.column))
                } else {
                    Err(Self::unexpected(&sp, expected))
                }
            }
            None => Err(self.eof(expected)),
        }
    }

    // -- document ----------------------------------------------------------

    fn parse_document(mut self) -> Result<DotGraph, ParseError> {
        self.parse_header()?;
        self.expect(&Token::LBrace, "\"{\"")?;

        let mut graph = DotGraph::new();
        loop {
            match self.peek() {
                None => return Err(self.eof("a statement or \"}\"")),
                Some(sp) if sp.token == Token::RBrace => {
                    self.advance();
                    break;
                }
                Some(sp) if sp.token == Token::Semicolon => {
                    self.advance();
                }
                Some(_) => self.parse_statement(&mut graph)?,
            }
        }

        if let Some(sp) = self.peek() {
            return Err(Self::unexpected(sp, "end of input"));
        }
        Ok(graph)
    }

    /// Consumes `strict? digraph ID?`.
    fn parse_header(&mut self) -> Result<(), ParseError> {
        if self.peek_is_bare_keyword("strict") {
            self.advance();
        }

        match self.advance() {
            None => Err(self.eof("\"digraph\"")),
            Some(sp) => {
                let is_digraph = matches!(
                    &sp.token,
                    Token::Ident { text, quoted: false } if text.eq_ignore_ascii_case("digraph")
                );
                if is_digraph {
                    // Optional graph name, discarded.
                    if matches!(self.peek(), Some(p) if matches!(p.token, Token::Ident { .. })) {
                        self.advance();
                    }
                    return Ok(());
                }

                let is_undirected = matches!(
                    &sp.token,
                    Token::Ident { text, quoted: false } if text.eq_ignore_ascii_case("graph")
                );
                if is_undirected {
                    return Err(err(
                        sp.line,
                        sp.column,
                        ParseErrorKind::Unsupported(
                            "undirected \"graph\" documents (directed graphs only)",
                        ),
                    ));
                }

                Err(Self::unexpected(&sp, "\"digraph\""))
            }
        }
    }

    fn peek_is_bare_keyword(&self, kw: &str) -> bool {
        matches!(
            self.peek(),
            Some(sp) if matches!(
                &sp.token,
                Token::Ident { text, quoted: false } if text.eq_ignore_ascii_case(kw)
            )
        )
    }

    // -- statements --------------------------------------------------------

    fn parse_statement(&mut self, graph: &mut DotGraph) -> Result<(), ParseError> {
        let Some(sp) = self.advance() else {
            return Err(self.eof("a statement"));
        };
        let (line, column) = (sp.line, sp.column);

        let Token::Ident { text, quoted } = sp.token else {
            return Err(Self::unexpected(&sp, "an identifier"));
        };

        if !quoted && text.eq_ignore_ascii_case("subgraph") {
            return Err(err(line, column, ParseErrorKind::Unsupported("subgraphs")));
        }

        // `node`/`edge`/`graph` default-attribute statements carry display
        // hints only; parse and discard.
        let is_defaults_keyword = !quoted
            && ["node", "edge", "graph"]
                .iter()
                .any(|kw| text.eq_ignore_ascii_case(kw));
        if is_defaults_keyword && self.peek_is(&Token::LBracket) {
            self.parse_attr_list()?;
            return Ok(());
        }

        if self.peek_is(&Token::Equals) {
            // Top-level `ID = value` assignment (rankdir and friends): no
            // bearing on graph structure, discarded.
            self.advance();
            self.expect_ident("an attribute value")?;
            return Ok(());
        }

        if self.peek_is(&Token::Arrow) {
            return self.parse_edge_chain(graph, text, line, column);
        }

        // Vertex declaration, with or without attributes.
        let attrs = if self.peek_is(&Token::LBracket) {
            self.parse_attr_list()?
        } else {
            BTreeMap::new()
        };
        graph.add_vertex(&text, attrs);
        Ok(())
    }

    /// Consumes `(-> ID)+ attr-list?` after the chain's first identifier and
    /// appends one edge per arrow. Every identifier in the chain is declared
    /// implicitly; edge attributes are not semantically used and are
    /// discarded.
    fn parse_edge_chain(
        &mut self,
        graph: &mut DotGraph,
        first: String,
        line: u32,
        column: u32,
    ) -> Result<(), ParseError> {
        let mut chain = vec![first];
        while self.peek_is(&Token::Arrow) {
            self.advance();
            let (id, _, _) = self.expect_ident("an identifier after \"->\"")?;
            chain.push(id);
        }

        if self.peek_is(&Token::LBracket) {
            self.parse_attr_list()?;
        }

        for id in &chain {
            graph.add_vertex(id, BTreeMap::new());
        }
        for pair in chain.windows(2) {
            graph
                .add_edge(&pair[0], &pair[1])
                .map_err(|e| err(line, column, ParseErrorKind::Graph(e)))?;
        }
        Ok(())
    }

    /// Consumes `[ ID = ID (, ID = ID)* ]`, tolerating the empty list.
    fn parse_attr_list(&mut self) -> Result<BTreeMap<String, String>, ParseError> {
        self.expect(&Token::LBracket, "\"[\"")?;

        let mut attrs = BTreeMap::new();
        if self.peek_is(&Token::RBracket) {
            self.advance();
            return Ok(attrs);
        }

        loop {
            let (key, _, _) = self.expect_ident("an attribute name")?;
            self.expect(&Token::Equals, "\"=\"")?;
            let (value, _, _) = self.expect_ident("an attribute value")?;
            attrs.insert(key, value);

            if self.peek_is(&Token::Comma) {
                self.advance();
                continue;
            }
            if self.peek_is(&Token::RBracket) {
                self.advance();
                return Ok(attrs);
            }
            return Err(match self.advance() {
                Some(sp) => Self::unexpected(&sp, "\",\" or \"]\""),
                None => self.eof("\"]\""),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn parse(input: &str) -> DotGraph {
        parse_dot(input).expect("document should parse")
    }

    fn parse_err(input: &str) -> ParseError {
        parse_dot(input).expect_err("document should fail to parse")
    }

    fn display_of(g: &DotGraph, id: &str) -> String {
        let idx = g.vertex_index(id).expect("vertex must exist");
        g.vertex(idx).expect("weight must exist").display_name().to_owned()
    }

    // -----------------------------------------------------------------------
    // Vertex declarations
    // -----------------------------------------------------------------------

    #[test]
    fn vertex_only_document_round_trips() {
        let g = parse("digraph { a; b; c }");
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 0);
        for id in ["a", "b", "c"] {
            let idx = g.vertex_index(id).expect("declared vertex retrievable");
            assert!(g.predecessors(idx).is_empty());
            assert!(g.successors(idx).is_empty());
        }
    }

    #[test]
    fn semicolons_are_optional() {
        let g = parse("digraph {\n  a\n  b\n}");
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn vertex_attributes_are_stored() {
        let g = parse(r#"digraph { x [label="Aerys II The Mad", born=262] }"#);
        let idx = g.vertex_index("x").expect("x");
        let v = g.vertex(idx).expect("weight");
        assert_eq!(v.display_name(), "Aerys II The Mad");
        assert_eq!(v.attrs.get("born").map(String::as_str), Some("262"));
    }

    #[test]
    fn quoted_value_has_quotes_stripped() {
        let g = parse(r#"digraph { x [label="foo"] }"#);
        assert_eq!(display_of(&g, "x"), "foo");
    }

    #[test]
    fn later_declaration_overrides_label() {
        let g = parse(r#"digraph { x [label="foo"]  x [label="bar"] }"#);
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(display_of(&g, "x"), "bar");
    }

    #[test]
    fn quoted_identifiers_are_plain_identifiers() {
        let g = parse(r#"digraph { "Aerys II" -> "Rhaegar" }"#);
        assert!(g.vertex_index("Aerys II").is_some());
        assert!(g.vertex_index("Rhaegar").is_some());
    }

    #[test]
    fn escaped_quotes_survive_in_attribute_values() {
        let g = parse(r#"digraph { x [label="the \"Mad\" king"] }"#);
        assert_eq!(display_of(&g, "x"), "the \"Mad\" king");
    }

    #[test]
    fn empty_attr_list_is_tolerated() {
        let g = parse("digraph { x [] }");
        let idx = g.vertex_index("x").expect("x");
        assert!(g.vertex(idx).expect("weight").attrs.is_empty());
    }

    // -----------------------------------------------------------------------
    // Edge declarations
    // -----------------------------------------------------------------------

    #[test]
    fn edge_implicitly_declares_both_endpoints() {
        let g = parse("digraph { p -> q }");
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        let p = g.vertex_index("p").expect("p");
        let q = g.vertex_index("q").expect("q");
        assert!(g.successors(p).contains(&q));
    }

    #[test]
    fn edge_chain_appends_one_edge_per_arrow() {
        let g = parse("digraph { a -> b -> c -> d }");
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn edge_attributes_are_discarded() {
        let g = parse(r#"digraph { a -> b [style=dotted] }"#);
        assert_eq!(g.edge_count(), 1);
        let a = g.vertex_index("a").expect("a");
        assert!(g.vertex(a).expect("weight").attrs.is_empty());
    }

    #[test]
    fn implicit_endpoint_merges_with_later_declaration() {
        let g = parse(r#"digraph { p -> q  q [label="Queen"] }"#);
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(display_of(&g, "q"), "Queen");
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let g = parse("digraph { a -> b; a -> b }");
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn self_loop_parses() {
        let g = parse("digraph { a -> a }");
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.edge_count(), 1);
    }

    // -----------------------------------------------------------------------
    // Header forms
    // -----------------------------------------------------------------------

    #[test]
    fn named_digraph_parses() {
        let g = parse("digraph family { a -> b }");
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn strict_digraph_parses() {
        let g = parse("strict digraph { a -> b }");
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let g = parse("DiGraph G { a }");
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn empty_digraph_parses() {
        let g = parse("digraph {}");
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    // -----------------------------------------------------------------------
    // Ignored constructs
    // -----------------------------------------------------------------------

    #[test]
    fn comments_are_ignored() {
        let g = parse(
            "digraph { // line comment\n  a -> b /* block\n  comment */ # hash comment\n  c\n}",
        );
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn defaults_statements_leave_the_graph_untouched() {
        let g = parse("digraph { node [shape=box]; edge [style=dotted]; a -> b }");
        assert_eq!(g.vertex_count(), 2);
        assert!(g.vertex_index("node").is_none());
        assert!(g.vertex_index("edge").is_none());
    }

    #[test]
    fn toplevel_assignments_are_discarded() {
        let g = parse("digraph { rankdir=LR; a -> b }");
        assert_eq!(g.vertex_count(), 2);
        assert!(g.vertex_index("rankdir").is_none());
    }

    #[test]
    fn bare_node_keyword_without_brackets_is_a_vertex() {
        // Only `node [...]` is the defaults form; a lone `node` is an id.
        let g = parse("digraph { node }");
        assert!(g.vertex_index("node").is_some());
    }

    // -----------------------------------------------------------------------
    // Malformed documents
    // -----------------------------------------------------------------------

    #[test]
    fn missing_digraph_keyword_is_rejected() {
        let e = parse_err("{ a -> b }");
        assert!(matches!(
            e.kind,
            ParseErrorKind::UnexpectedToken { expected, .. } if expected == "\"digraph\""
        ));
    }

    #[test]
    fn undirected_graph_header_is_rejected() {
        let e = parse_err("graph { a -- b }");
        assert!(matches!(e.kind, ParseErrorKind::Unsupported(_)));
    }

    #[test]
    fn undirected_edge_operator_is_rejected() {
        let e = parse_err("digraph { a -- b }");
        assert!(matches!(e.kind, ParseErrorKind::Unsupported(_)));
    }

    #[test]
    fn dangling_arrow_is_rejected() {
        let e = parse_err("digraph {\n  a -> ;\n}");
        assert_eq!(e.line, 2);
        assert!(matches!(
            e.kind,
            ParseErrorKind::UnexpectedToken { expected, .. }
                if expected == "an identifier after \"->\""
        ));
    }

    #[test]
    fn unterminated_attr_list_is_rejected() {
        let e = parse_err(r#"digraph { x [label="foo" }"#);
        assert!(matches!(
            e.kind,
            ParseErrorKind::UnexpectedToken { expected, .. } if expected == "\",\" or \"]\""
        ));
    }

    #[test]
    fn attr_without_value_is_rejected() {
        let e = parse_err("digraph { x [label] }");
        assert!(matches!(
            e.kind,
            ParseErrorKind::UnexpectedToken { expected, .. } if expected == "\"=\""
        ));
    }

    #[test]
    fn unterminated_string_is_rejected() {
        let e = parse_err("digraph { x [label=\"foo] }");
        assert_eq!(e.kind, ParseErrorKind::UnterminatedString);
    }

    #[test]
    fn unterminated_block_comment_is_rejected() {
        let e = parse_err("digraph { a /* never closed");
        assert_eq!(e.kind, ParseErrorKind::UnterminatedComment);
    }

    #[test]
    fn missing_closing_brace_is_rejected() {
        let e = parse_err("digraph { a -> b");
        assert!(matches!(e.kind, ParseErrorKind::UnexpectedEof { .. }));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let e = parse_err("digraph { a } b");
        assert!(matches!(
            e.kind,
            ParseErrorKind::UnexpectedToken { expected, .. } if expected == "end of input"
        ));
    }

    #[test]
    fn invalid_character_reports_position() {
        let e = parse_err("digraph {\n@\n}");
        assert_eq!(e.line, 2);
        assert_eq!(e.column, 1);
        assert_eq!(e.kind, ParseErrorKind::InvalidCharacter('@'));
    }

    #[test]
    fn subgraphs_are_rejected() {
        let e = parse_err("digraph { subgraph cluster0 { a } }");
        assert!(matches!(e.kind, ParseErrorKind::Unsupported(_)));
    }

    #[test]
    fn error_display_carries_position_and_token() {
        let e = parse_err("digraph {\n  a -> ;\n}");
        let msg = e.to_string();
        assert!(msg.contains("line 2"), "message: {msg}");
        assert!(msg.contains("\";\""), "message: {msg}");
    }

    #[test]
    fn no_partial_graph_escapes_a_failed_parse() {
        // The failure happens after two good statements; the caller still
        // sees only the error.
        let result = parse_dot("digraph { a -> b; c -> d; e -- f }");
        assert!(result.is_err());
    }
}
