pub(crate) mod grammar;

use crate::error;
use crate::nesting::{Nesting, NestingTracker};
use crate::syntax::{NodeData, NodeId, SyntaxKind, SyntaxTree};
use crate::Error;

/// Parse weft templates into a [`SyntaxTree`].
///
/// The parser walks raw byte positions with a hand-written recursive-descent
/// reader for each construct. Readers attach children to a movable "current
/// node" kept on a stack over an arena of nodes, so recovery paths can
/// rewind the tree and the input position together.
///
/// ## Example
///
/// ```rust
/// use weft_parser::Parser;
///
/// let tree = Parser::new("hello $name, today is $cap($day)").parse();
///
/// // Check that there are no errors. These are not part of the tree.
/// assert_eq!(0, tree.errors().len());
/// ```
///
/// Reading of individual constructs can be switched off, which leaves their
/// text to be read as literal runs:
///
/// ```rust
/// use weft_parser::Parser;
///
/// let tree = Parser::new("$upper(x)").allow_functions(false).parse();
/// assert!(tree.errors().is_empty());
/// ```
#[derive(Debug)]
pub struct Parser<'input> {
    source: &'input str,
    /// 0-based offset of the next unread byte.
    pos: usize,
    /// The in-progress tree.
    builder: TreeBuilder,
    /// The list of syntax errors we've accumulated so far.
    errors: Vec<Error>,
    /// Recovered constructs worth flagging, but never fatal.
    warnings: Vec<Error>,
    /// Depth accounting for nested calls and at-expressions.
    nesting: NestingTracker,
    limit_reported: bool,
    pub(crate) allow_tokens: bool,
    pub(crate) allow_functions: bool,
    pub(crate) allow_at_expressions: bool,
    strict: bool,
    halted: bool,
    root_kind: SyntaxKind,
}

/// Deep nesting recurses once per call or at-expression; 500 keeps a
/// comfortable margin under default thread stacks.
const DEFAULT_NESTING_LIMIT: usize = 500;

impl<'input> Parser<'input> {
    /// Create a new instance of a parser given an input string.
    pub fn new(source: &'input str) -> Self {
        Self {
            source,
            pos: 0,
            builder: TreeBuilder::default(),
            errors: Vec::new(),
            warnings: Vec::new(),
            nesting: NestingTracker::new(DEFAULT_NESTING_LIMIT),
            limit_reported: false,
            allow_tokens: true,
            allow_functions: true,
            allow_at_expressions: true,
            strict: false,
            halted: false,
            root_kind: SyntaxKind::Root,
        }
    }

    /// Configure whether `$name` token references are read. When off, their
    /// text is read as literal runs.
    pub fn allow_tokens(mut self, allow: bool) -> Self {
        self.allow_tokens = allow;
        self
    }

    /// Configure whether `$name(…)` calls are read. When off, `$name` still
    /// reads as a token reference (when those are allowed) and the
    /// parenthesized part as literal text.
    pub fn allow_functions(mut self, allow: bool) -> Self {
        self.allow_functions = allow;
        self
    }

    /// Configure whether `@(…)` at-expressions are read.
    pub fn allow_at_expressions(mut self, allow: bool) -> Self {
        self.allow_at_expressions = allow;
        self
    }

    /// Stop at the first recorded error instead of recovering. The error is
    /// still reported on the resulting tree.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Configure the nesting limit to use while parsing.
    pub fn nesting_limit(mut self, limit: usize) -> Self {
        self.nesting = NestingTracker::new(limit);
        self
    }

    /// Configure the kind of the root node.
    pub fn root_kind(mut self, kind: SyntaxKind) -> Self {
        self.root_kind = kind;
        self
    }

    /// Parse the input.
    pub fn parse(mut self) -> SyntaxTree {
        self.builder.start(self.root_kind, 1, None);
        while self.pos < self.source.len() && !self.halted {
            if !grammar::expression(&mut self) {
                let (data, len) = self.current_char();
                let start = self.pos + 1;
                self.push_err(Error::with_range(
                    error::UNEXPECTED_CHARACTER,
                    data,
                    start,
                    self.pos + len,
                ));
                self.pos += len;
            }
        }
        let end = self.pos;
        let root = self.builder.finish_root(end);
        SyntaxTree {
            source: self.source.to_string(),
            nodes: self.builder.nodes,
            root,
            errors: self.errors,
            warnings: self.warnings,
            nesting: self.nesting,
        }
    }

    // Cursor helpers.

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.byte_at(self.pos + offset)
    }

    pub(crate) fn byte_at(&self, pos: usize) -> Option<u8> {
        self.source.as_bytes().get(pos).copied()
    }

    /// Length of the run of identifier bytes starting `offset` bytes ahead.
    pub(crate) fn ident_len(&self, offset: usize) -> usize {
        let bytes = &self.source.as_bytes()[(self.pos + offset).min(self.source.len())..];
        bytes
            .iter()
            .take_while(|&&b| grammar::is_ident(b))
            .count()
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'input str {
        &self.source[start..end]
    }

    pub(crate) fn source_len(&self) -> usize {
        self.source.len()
    }

    /// The character at the current position and its length in bytes.
    pub(crate) fn current_char(&self) -> (String, usize) {
        match self.source[self.pos..].chars().next() {
            Some(c) => (c.to_string(), c.len_utf8()),
            None => (String::new(), 1),
        }
    }

    pub(crate) fn halted(&self) -> bool {
        self.halted
    }

    /// Kind of the node children are currently attached to. Text stop sets
    /// depend on this.
    pub(crate) fn context(&self) -> SyntaxKind {
        self.builder.current_kind()
    }

    /// Push an error to the parser's error Vec. In strict mode the first
    /// error halts the parse; later errors are discarded.
    pub(crate) fn push_err(&mut self, err: Error) {
        if self.halted {
            return;
        }
        self.errors.push(err);
        if self.strict {
            self.halted = true;
        }
    }

    pub(crate) fn push_warn(&mut self, warn: Error) {
        self.warnings.push(warn);
    }

    /// Enter one level of nesting for `kind`, unless the nesting limit has
    /// been reached. The limit is reported as an error once.
    pub(crate) fn enter_nested(&mut self, kind: Nesting) -> bool {
        if self.nesting.try_enter(kind) {
            return true;
        }
        if !self.limit_reported {
            self.limit_reported = true;
            let pos = self.pos + 1;
            self.push_err(Error::with_range(
                error::NESTING_LIMIT,
                String::new(),
                pos,
                pos,
            ));
        }
        false
    }

    pub(crate) fn exit_nested(&mut self, kind: Nesting) {
        self.nesting.exit(kind);
    }

    // Tree helpers.

    /// Start a node at the current position and make it current.
    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start(kind, self.pos + 1, None);
    }

    /// Start a node carrying a value, such as a call with its function name.
    pub(crate) fn start_node_named(&mut self, kind: SyntaxKind, value: String) {
        self.builder.start(kind, self.pos + 1, Some(value));
    }

    /// Finish the current node, ending at 1-indexed inclusive byte `end`,
    /// and attach it to its parent.
    pub(crate) fn finish_node(&mut self, end: usize) {
        self.builder.finish(end);
    }

    /// Finish the current node if it has children; drop it otherwise.
    pub(crate) fn finish_node_nonempty(&mut self, end: usize) {
        self.builder.finish_nonempty(end);
    }

    /// Attach a leaf carrying a literal value to the current node.
    pub(crate) fn leaf_value(&mut self, kind: SyntaxKind, start: usize, end: usize, value: String) {
        self.builder.leaf(kind, start, end, Some(value));
    }

    /// Attach an empty leaf at the current position.
    pub(crate) fn empty_leaf(&mut self, kind: SyntaxKind) {
        self.builder.leaf(kind, self.pos + 1, self.pos, None);
    }

    /// Capture the tree and cursor state for a later [`Parser::restore`].
    pub(crate) fn mark(&self) -> Mark {
        self.builder.mark(self.pos)
    }

    /// Roll the tree and cursor back to a [`Mark`], discarding every node
    /// created since.
    pub(crate) fn restore(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.builder.restore(mark);
    }
}

/// Snapshot of the builder and cursor, used to re-read recovered constructs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    nodes_len: usize,
    stack_len: usize,
    top_children: usize,
    pos: usize,
}

impl Mark {
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }
}

/// Arena-backed tree builder with a stack of open nodes. Children attach to
/// their parent when a node finishes, so an abandoned node leaves no trace.
#[derive(Debug, Default)]
struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    fn start(&mut self, kind: SyntaxKind, start: usize, value: Option<String>) {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            start,
            end: start,
            value,
            children: Vec::new(),
        });
        self.stack.push(id);
    }

    fn finish(&mut self, end: usize) {
        let id = self.stack.pop().expect("finish without an open node");
        self.nodes[id.index()].end = end;
        if let Some(&parent) = self.stack.last() {
            self.nodes[parent.index()].children.push(id);
        }
    }

    fn finish_nonempty(&mut self, end: usize) {
        let id = *self.stack.last().expect("finish without an open node");
        if self.nodes[id.index()].children.is_empty() {
            self.stack.pop();
            self.nodes.truncate(id.index());
        } else {
            self.finish(end);
        }
    }

    fn finish_root(&mut self, end: usize) -> NodeId {
        let id = self.stack.pop().expect("finish without an open node");
        self.nodes[id.index()].end = end;
        id
    }

    fn leaf(&mut self, kind: SyntaxKind, start: usize, end: usize, value: Option<String>) {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            start,
            end,
            value,
            children: Vec::new(),
        });
        let parent = *self.stack.last().expect("leaf without an open node");
        self.nodes[parent.index()].children.push(id);
    }

    fn current_kind(&self) -> SyntaxKind {
        let id = *self.stack.last().expect("no open node");
        self.nodes[id.index()].kind
    }

    fn mark(&self, pos: usize) -> Mark {
        let top = *self.stack.last().expect("no open node");
        Mark {
            nodes_len: self.nodes.len(),
            stack_len: self.stack.len(),
            top_children: self.nodes[top.index()].children.len(),
            pos,
        }
    }

    fn restore(&mut self, mark: Mark) {
        self.nodes.truncate(mark.nodes_len);
        self.stack.truncate(mark.stack_len);
        if let Some(&top) = self.stack.last() {
            self.nodes[top.index()].children.truncate(mark.top_children);
        }
    }
}
