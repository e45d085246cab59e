use crate::Error;
use crate::NestingTracker;
use std::fmt;

/// The kind of a node in a template syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root container for a whole template.
    Root,
    /// A literal run of text.
    Text,
    /// `$c` where `c` is one of the special characters; yields the literal
    /// character.
    Escape,
    /// `$name`, a token reference.
    Token,
    /// `(…)`, a literal region that protects its content from argument
    /// splitting.
    StringLit,
    /// `$name(…)`, a function call. The node value is the function name and
    /// the children are `Argument` nodes.
    Call,
    /// One space-delimited argument of a call.
    Argument,
    /// `@(…)`, an at-expression. Children alternate `AtKey` and `AtValue`.
    AtExpr,
    /// The key part of an at-expression entry.
    AtKey,
    /// The value part of an at-expression entry.
    AtValue,
}

impl SyntaxKind {
    pub(crate) fn dump_name(self) -> &'static str {
        match self {
            SyntaxKind::Root => "ROOT",
            SyntaxKind::Text => "TEXT",
            SyntaxKind::Escape => "ESCAPE",
            SyntaxKind::Token => "TOKEN",
            SyntaxKind::StringLit => "STRING",
            SyntaxKind::Call => "CALL",
            SyntaxKind::Argument => "ARGUMENT",
            SyntaxKind::AtExpr => "AT_EXPRESSION",
            SyntaxKind::AtKey => "AT_KEY",
            SyntaxKind::AtValue => "AT_VALUE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) value: Option<String>,
    pub(crate) children: Vec<NodeId>,
}

/// A syntax tree produced by [`Parser::parse`], together with the errors and
/// warnings recorded along the way.
///
/// Nodes live in an arena owned by the tree and are visited through
/// [`SyntaxNode`] handles starting from [`SyntaxTree::root`]. Node ranges are
/// 1-indexed inclusive byte positions into [`SyntaxTree::source`].
///
/// [`Parser::parse`]: crate::Parser::parse
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
    pub(crate) errors: Vec<Error>,
    pub(crate) warnings: Vec<Error>,
    pub(crate) nesting: NestingTracker,
}

impl SyntaxTree {
    /// The template text this tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root node of the tree.
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            id: self.root,
        }
    }

    /// Get a reference to the tree's errors.
    pub fn errors(&self) -> &[Error] {
        self.errors.as_ref()
    }

    /// Get a reference to the tree's warnings. Warnings flag recovered
    /// constructs and are never fatal.
    pub fn warnings(&self) -> &[Error] {
        self.warnings.as_ref()
    }

    /// Whether any errors were recorded. Trees with errors evaluate to empty
    /// output downstream.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Utilization of the parser's nesting limit while this tree was
    /// built.
    pub fn nesting(&self) -> NestingTracker {
        self.nesting
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn print(f: &mut fmt::Formatter<'_>, indent: usize, node: SyntaxNode<'_>) -> fmt::Result {
            write!(f, "{:indent$}", "", indent = indent)?;
            write!(
                f,
                "{}@{}..{}",
                node.kind().dump_name(),
                node.start(),
                node.end()
            )?;
            match node.value() {
                Some(value) => writeln!(f, " {value:?}")?,
                None => writeln!(f)?,
            }
            for child in node.children() {
                print(f, indent + 2, child)?;
            }
            Ok(())
        }

        print(f, 0, self.root())?;
        for err in &self.errors {
            writeln!(f, "{err:?}")?;
        }
        for warn in &self.warnings {
            writeln!(
                f,
                "WARNING@{}:{} {:?} {}",
                warn.start, warn.end, warn.message, warn.data
            )?;
        }
        Ok(())
    }
}

/// A handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    fn data(&self) -> &'a NodeData {
        self.tree.node(self.id)
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    /// First byte of the node, 1-indexed.
    pub fn start(&self) -> usize {
        self.data().start
    }

    /// Last byte of the node, 1-indexed inclusive. An empty node reports
    /// `end < start`.
    pub fn end(&self) -> usize {
        self.data().end
    }

    /// The literal value carried by leaf nodes (`Text`, `Escape`) and the
    /// function name of `Call` and `Token` nodes.
    pub fn value(&self) -> Option<&'a str> {
        self.data().value.as_deref()
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| SyntaxNode { tree, id })
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}..{}",
            self.kind().dump_name(),
            self.start(),
            self.end()
        )
    }
}
