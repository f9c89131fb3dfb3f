//! tree construction
//!
//! [Parser] consumes a document line by line. Each normalized line is either
//! - a section header `[a.b.c]`, which moves the cursor to that section (creating
//!   missing sections on the way), or
//! - an assignment `key = value`, which appends a node to the section under the cursor.
//!
//! Grammar violations never stop the parser. They mark the document invalid, get
//! recorded as an [Issue] and the next line is processed as usual.
use crate::literal;
use crate::node::Node;
use crate::normalize::normalize;

/// Line-by-line OMFL parser
///
/// Holds all state of a single parse: the tree built so far, the current section and
/// the issues seen.
#[derive(Debug)]
pub struct Parser {
    root: Node,
    /// Key path from the root to the current section
    cursor: Vec<String>,
    issues: Vec<Issue>,
    line: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            cursor: Vec::new(),
            issues: Vec::new(),
            line: 0,
        }
    }

    /// Process the next raw line of input
    pub fn parse_line(&mut self, raw: &str) {
        self.line += 1;

        let line = normalize(raw);
        if line.is_empty() {
            return;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if let Err(kind) = self.open_section(line) {
                mark_invalid(&mut self.root, &[]);
                self.log(kind);
            }
        } else if let Err(kinds) = self.assign(line) {
            mark_invalid(&mut self.root, &self.cursor);
            for kind in kinds {
                self.log(kind);
            }
        }
    }

    pub fn finish(self) -> Parsed {
        Parsed {
            root: self.root,
            issues: ParseIssues {
                issues: self.issues,
            },
        }
    }

    fn log(&mut self, kind: IssueKind) {
        let issue = Issue::new(self.line, kind);
        tracing::debug!(?issue, "issue found");
        self.issues.push(issue);
    }

    /// Handle a `[a.b.c]` header; segments always resolve from the root
    fn open_section(&mut self, header: &str) -> Result<(), IssueKind> {
        let body = &header[1..header.len() - 1];

        if body.is_empty() {
            return Err(IssueKind::EmptySectionHeader);
        }
        if let Some(invalid) = body.chars().find(|&c| c != '.' && !is_name_char(c)) {
            return Err(IssueKind::InvalidSectionChar(invalid));
        }

        let segments: Vec<&str> = body.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(IssueKind::EmptySectionSegment(body.to_owned()));
        }

        let mut section = &mut self.root;
        for segment in &segments {
            section = section_entry(section, segment)?;
        }

        tracing::trace!(section = body, "entered section");
        self.cursor = segments.into_iter().map(str::to_owned).collect();
        Ok(())
    }

    /// Handle a `key = value` line
    fn assign(&mut self, line: &str) -> Result<(), Vec<IssueKind>> {
        let (key, value) = split_assignment(line).map_err(|kind| vec![kind])?;

        let mut section = &mut self.root;
        for segment in &self.cursor {
            section = section_entry(section, segment).map_err(|kind| vec![kind])?;
        }

        let Some(members) = section.members_mut() else {
            return Err(vec![IssueKind::DuplicateKey(key.to_owned())]);
        };
        if members.contains_key(key) {
            return Err(vec![IssueKind::DuplicateKey(key.to_owned())]);
        }

        let mut rejected = Vec::new();
        let node = literal::parse_value(key, value, &mut rejected);
        let valid = node.as_ref().is_some_and(Node::is_valid);
        if let Some(node) = node {
            members.insert(key.to_owned(), node);
        }

        if valid {
            Ok(())
        } else {
            Err(rejected)
        }
    }
}

/// Descend into the section `key` below `parent`, creating it when absent
fn section_entry<'a>(parent: &'a mut Node, key: &str) -> Result<&'a mut Node, IssueKind> {
    let Some(members) = parent.members_mut() else {
        return Err(IssueKind::SectionKeyConflict(key.to_owned()));
    };

    let child = members
        .entry(key.to_owned())
        .or_insert_with(|| Node::section(key));

    if !child.is_section() {
        return Err(IssueKind::SectionKeyConflict(key.to_owned()));
    }

    Ok(child)
}

/// Clear the validity of the root and every section along `path`
fn mark_invalid(root: &mut Node, path: &[String]) {
    root.invalidate();

    let mut section = root;
    for segment in path {
        let Some(child) = section
            .members_mut()
            .and_then(|members| members.get_mut(segment))
        else {
            return;
        };
        child.invalidate();
        section = child;
    }
}

/// Split `key = value`
///
/// The key ends at the first space or `=`. Only spaces and a single `=` may follow
/// before the value starts.
fn split_assignment(line: &str) -> Result<(&str, &str), IssueKind> {
    let key_end = line
        .find(|c: char| c == ' ' || c == '=')
        .ok_or(IssueKind::MissingAssignment)?;
    let key = &line[..key_end];

    if key.is_empty() {
        return Err(IssueKind::EmptyKey);
    }
    if let Some(invalid) = key.chars().find(|&c| !is_name_char(c)) {
        return Err(IssueKind::InvalidKeyChar(invalid));
    }

    let rest = line[key_end..].trim_start_matches(' ');
    let Some(rest) = rest.strip_prefix('=') else {
        return Err(IssueKind::MissingAssignment);
    };

    let value = rest.trim_start_matches(' ');
    if value.is_empty() {
        return Err(IssueKind::EmptyValue(key.to_owned()));
    }

    Ok((key, value))
}

/// Allowed in keys and section names
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Result of a complete parse
#[derive(Debug)]
pub struct Parsed {
    /// Document root; [Node::is_valid] is the document validity
    pub root: Node,
    pub issues: ParseIssues,
}

impl Parsed {
    /// The root when the document is valid, the issues otherwise
    pub fn into_result(self) -> Result<Node, ParseIssues> {
        if self.root.is_valid() {
            Ok(self.root)
        } else {
            Err(self.issues)
        }
    }
}

/// Parse a complete document
///
/// Never fails; check [Node::is_valid] on the returned root.
pub fn parse(text: &str) -> Node {
    parse_report(text).root
}

/// Parse a complete document and keep the recorded issues
pub fn parse_report(text: &str) -> Parsed {
    let mut parser = Parser::new();
    for line in text.lines() {
        parser.parse_line(line);
    }
    parser.finish()
}

/// All issues of one parse
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParseIssues {
    issues: Vec<Issue>,
}

impl ParseIssues {
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParseIssues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::error::Error for ParseIssues {}

impl std::fmt::Display for ParseIssues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.issues.as_slice() {
            [] => f.write_str("invalid document"),
            [issue] => write!(f, "{issue}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

/// One grammar violation
#[derive(derive_new::new, Debug, Clone, PartialEq)]
pub struct Issue {
    /// 1-based line number
    pub line: usize,
    pub kind: IssueKind,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IssueKind {
    #[error("empty section header")]
    EmptySectionHeader,
    #[error("empty segment in section header [{0}]")]
    EmptySectionSegment(String),
    #[error("invalid character {0:?} in section header")]
    InvalidSectionChar(char),
    #[error("section {0:?} collides with an existing value")]
    SectionKeyConflict(String),
    #[error("expected `key = value`")]
    MissingAssignment,
    #[error("empty key")]
    EmptyKey,
    #[error("invalid character {0:?} in key")]
    InvalidKeyChar(char),
    #[error("missing value for key {0:?}")]
    EmptyValue(String),
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),
    #[error("invalid value {0}")]
    InvalidValue(String),
    #[error("arrays nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<IssueKind> {
        parse_report(text)
            .issues
            .iter()
            .map(|issue| issue.kind.clone())
            .collect()
    }

    #[test]
    fn assignments_at_root() {
        let root = parse("a = 1\nb=\"two\"\nc   =   true");
        assert!(root.is_valid());
        assert_eq!(root.get("a").as_int(), Ok(1));
        assert_eq!(root.get("b").as_string(), Ok("two"));
        assert_eq!(root.get("c").as_bool(), Ok(true));
    }

    #[test]
    fn dotted_header_creates_nested_sections() {
        let root = parse("[a.b]\nx = 1");
        assert!(root.is_valid());
        assert!(root.get("a").is_section());
        assert!(root.get("a.b").is_section());
        assert_eq!(root.get("a.b.x").as_int(), Ok(1));
        assert_eq!(root.get("a.b").key(), "b");
    }

    #[test]
    fn headers_reuse_existing_sections() {
        let root = parse("[a]\nx = 1\n[a.b]\ny = 2\n[a]\nz = 3");
        assert!(root.is_valid());
        assert_eq!(root.len(), 1);
        let keys: Vec<_> = root.get("a").children().map(Node::key).collect();
        assert_eq!(keys, vec!["x", "b", "z"]);
    }

    #[test]
    fn headers_resolve_from_root() {
        let root = parse("[a]\n[b]\nx = 1");
        assert_eq!(root.get("b.x").as_int(), Ok(1));
        assert!(!root.get("a.b").is_section());
    }

    #[test]
    fn duplicate_key_invalidates() {
        let parsed = parse_report("x = 1\nx = 2");
        assert!(!parsed.root.is_valid());
        assert_eq!(parsed.root.get("x").as_int(), Ok(1));
        assert_eq!(
            parsed.issues.iter().cloned().collect::<Vec<_>>(),
            vec![Issue::new(2, IssueKind::DuplicateKey("x".into()))]
        );
    }

    #[test]
    fn same_key_in_different_sections_is_fine() {
        let root = parse("x = 1\n[s]\nx = 2");
        assert!(root.is_valid());
        assert_eq!(root.get("s.x").as_int(), Ok(2));
    }

    #[test]
    fn header_colliding_with_value() {
        let root = parse("a = 1\n[a]\nb = 2");
        assert!(!root.is_valid());
        assert_eq!(root.get("a").as_int(), Ok(1));
        // cursor stays at the root
        assert_eq!(root.get("b").as_int(), Ok(2));

        let root = parse("[a]\n[a]\n");
        assert!(root.is_valid());

        let root = parse("[s]\na = 1\n[s.a]");
        assert!(!root.is_valid());
    }

    #[test]
    fn assignment_to_existing_section_name() {
        assert_eq!(
            kinds("[a]\n[b]\na = 1"),
            vec![] as Vec<IssueKind>,
            "a lives at the root, b is current"
        );
        assert_eq!(
            kinds("[a.b]\n[a]\nb = 1"),
            vec![IssueKind::DuplicateKey("b".into())]
        );
        assert_eq!(
            kinds("[a]\n[]\nx = 1\nx = 2"),
            vec![
                IssueKind::EmptySectionHeader,
                IssueKind::DuplicateKey("x".into())
            ],
            "a rejected header keeps the cursor"
        );
    }

    #[test]
    fn malformed_headers() {
        assert_eq!(kinds("[]"), vec![IssueKind::EmptySectionHeader]);
        assert_eq!(
            kinds("[.a]"),
            vec![IssueKind::EmptySectionSegment(".a".into())]
        );
        assert_eq!(
            kinds("[a.]"),
            vec![IssueKind::EmptySectionSegment("a.".into())]
        );
        assert_eq!(
            kinds("[a..b]"),
            vec![IssueKind::EmptySectionSegment("a..b".into())]
        );
        assert_eq!(kinds("[a b]"), vec![IssueKind::InvalidSectionChar(' ')]);
        assert_eq!(kinds("[a$]"), vec![IssueKind::InvalidSectionChar('$')]);
        assert!(!parse("[a.b").is_valid());
    }

    #[test]
    fn rejected_header_creates_nothing() {
        let root = parse("[a.b$]\nx = 1");
        assert!(!root.is_valid());
        assert!(!root.get("a").is_section());
        assert_eq!(root.get("x").as_int(), Ok(1));
    }

    #[test]
    fn malformed_assignments() {
        assert_eq!(kinds("key"), vec![IssueKind::MissingAssignment]);
        assert_eq!(kinds("key value"), vec![IssueKind::MissingAssignment]);
        assert_eq!(kinds("= 1"), vec![IssueKind::EmptyKey]);
        assert_eq!(kinds("k =   "), vec![IssueKind::EmptyValue("k".into())]);
        assert_eq!(kinds("k.x = 1"), vec![IssueKind::InvalidKeyChar('.')]);
        assert_eq!(kinds("k = = 1"), vec![IssueKind::InvalidValue("= 1".into())]);
        assert_eq!(kinds("k = .5"), vec![IssueKind::InvalidValue(".5".into())]);
    }

    #[test]
    fn overflowing_literals_invalidate() {
        let float = format!("{}.0", "9".repeat(60));
        let parsed = parse_report(&format!("[s]\nf = {float}\ni = 99999999999"));
        assert!(!parsed.root.is_valid());
        assert!(!parsed.root.get("s").is_valid());
        assert_eq!(parsed.root.get("s.f").kind(), crate::Kind::Missing);
        assert_eq!(
            parsed.issues.iter().cloned().collect::<Vec<_>>(),
            vec![
                Issue::new(2, IssueKind::InvalidValue(float)),
                Issue::new(3, IssueKind::InvalidValue("99999999999".into()))
            ]
        );
    }

    #[test]
    fn deep_nesting_is_reported() {
        let depth = 10_000;
        let parsed = parse_report(&format!(
            "k = {}{}\nnext = 1",
            "[".repeat(depth),
            "]".repeat(depth)
        ));
        assert!(!parsed.root.is_valid());
        assert!(parsed.root.get("k").is_array());
        assert_eq!(parsed.root.get("next").as_int(), Ok(1));
        assert_eq!(
            parsed.issues.iter().cloned().collect::<Vec<_>>(),
            vec![Issue::new(1, IssueKind::NestingTooDeep(crate::MAX_DEPTH))]
        );
    }

    #[test]
    fn key_charset() {
        let root = parse("snake_case = 1\nkebab-case = 2\nDigits123 = 3");
        assert!(root.is_valid());
        assert_eq!(root.get("kebab-case").as_int(), Ok(2));
    }

    #[test]
    fn parsing_continues_after_errors() {
        let parsed = parse_report("a = 1\nb = oops\n[c]\nd = [1, ?]\ne = 5");
        assert!(!parsed.root.is_valid());
        assert_eq!(parsed.root.get("a").as_int(), Ok(1));
        assert!(!parsed.root.get("b").is_string());
        assert_eq!(parsed.root.get("c.e").as_int(), Ok(5));
        assert_eq!(parsed.root.get("c.d")[0].as_int(), Ok(1));
        assert!(!parsed.root.get("c").is_valid());
        assert!(!parsed.root.get("c.d").is_valid());

        let lines: Vec<_> = parsed.issues.iter().map(|issue| issue.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let root = parse("# header\n\n   \nk = \"a#b\" # trailing\n");
        assert!(root.is_valid());
        assert_eq!(root.get("k").as_string(), Ok("a#b"));
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn crlf_line_endings() {
        let root = parse("[s]\r\nk = 1\r\n");
        assert!(root.is_valid());
        assert_eq!(root.get("s.k").as_int(), Ok(1));
    }

    #[test]
    fn empty_document_is_valid() {
        let parsed = parse_report("");
        assert!(parsed.root.is_valid());
        assert!(parsed.root.is_empty());
        assert!(parsed.issues.is_empty());
        assert!(parsed.into_result().is_ok());
    }

    #[test]
    fn into_result_reports_issues() {
        let issues = parse_report("a = 1\nb\nc = x")
            .into_result()
            .expect_err("must be invalid");
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues.to_string(),
            "line 2: expected `key = value` (and 1 more)"
        );
    }

    #[test]
    fn parser_is_reusable_line_by_line() {
        let mut parser = Parser::new();
        parser.parse_line("[server]");
        parser.parse_line("port = 8080");
        let root = parser.finish().root;
        assert_eq!(root.get("server.port").as_int(), Ok(8080));
    }
}
