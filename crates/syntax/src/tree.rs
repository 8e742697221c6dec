//! Read-only traversal interface over a concrete syntax tree.
//!
//! The resolver only ever walks a tree snapshot for a single document
//! revision. Node handles are cheap copies that borrow the tree, so they
//! cannot outlive the revision they were resolved from.

use zen_primitives::{CharIdx, Range};

/// Which nodes touching a position are entered during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
	/// Enter nodes that end at the position (the character before it).
	Before,
	/// Enter only nodes that strictly surround the position.
	Around,
	/// Enter nodes that start at the position (the character after it).
	After,
}

impl Side {
	/// Returns true if a node spanning `range` is entered when resolving `pos`.
	#[inline]
	pub fn enters(self, range: Range, pos: CharIdx) -> bool {
		match self {
			Side::Before => range.from < pos && range.to >= pos,
			Side::Around => range.from < pos && range.to > pos,
			Side::After => range.from <= pos && range.to > pos,
		}
	}
}

/// Grammar a node belongs to.
///
/// Stylesheet subtrees may be mounted inside markup trees, in which case
/// both layers are active at positions inside the mounted subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
	Markup,
	Stylesheet,
	Other,
}

/// A node handle inside a tree snapshot.
pub trait SyntaxNode: Copy {
	/// Node type name, such as `OpenTag` or `Declaration`.
	fn name(&self) -> &'static str;

	/// Span of the node in the document.
	fn range(&self) -> Range;

	/// Grammar layer of the node.
	fn layer(&self) -> Layer;

	fn parent(&self) -> Option<Self>;

	fn first_child(&self) -> Option<Self>;

	fn last_child(&self) -> Option<Self>;

	fn next_sibling(&self) -> Option<Self>;

	#[inline]
	fn from(&self) -> CharIdx {
		self.range().from
	}

	#[inline]
	fn to(&self) -> CharIdx {
		self.range().to
	}

	#[inline]
	fn is(&self, name: &str) -> bool {
		self.name() == name
	}

	/// Iterates over direct children in document order.
	fn children(&self) -> Children<Self> {
		Children {
			next: self.first_child(),
		}
	}

	/// Returns the first direct child named `name`.
	fn child(&self, name: &str) -> Option<Self> {
		self.children().find(|c| c.is(name))
	}

	/// Iterates over direct children named `name`.
	fn children_named<'n>(&self, name: &'n str) -> impl Iterator<Item = Self> + 'n
	where
		Self: 'n,
	{
		self.children().filter(move |c| c.is(name))
	}

	/// Iterates from this node up to the root, starting with the node itself.
	fn ancestors(&self) -> Ancestors<Self> {
		Ancestors { next: Some(*self) }
	}
}

/// Iterator over the direct children of a node.
#[derive(Debug, Clone)]
pub struct Children<N> {
	next: Option<N>,
}

impl<N: SyntaxNode> Iterator for Children<N> {
	type Item = N;

	fn next(&mut self) -> Option<N> {
		let node = self.next?;
		self.next = node.next_sibling();
		Some(node)
	}
}

/// Iterator from a node up to the root.
#[derive(Debug, Clone)]
pub struct Ancestors<N> {
	next: Option<N>,
}

impl<N: SyntaxNode> Iterator for Ancestors<N> {
	type Item = N;

	fn next(&mut self) -> Option<N> {
		let node = self.next?;
		self.next = node.parent();
		Some(node)
	}
}

/// A syntax tree snapshot for one document revision.
pub trait SyntaxTree {
	type Node<'a>: SyntaxNode
	where
		Self: 'a;

	/// Returns the root node covering the whole document.
	fn root(&self) -> Self::Node<'_>;

	/// Returns the innermost node entered at `pos` with the given `side`.
	///
	/// Falls back to the root when no child is entered.
	fn resolve(&self, pos: CharIdx, side: Side) -> Self::Node<'_> {
		let mut node = self.root();
		'descend: loop {
			for child in node.children() {
				if side.enters(child.range(), pos) {
					node = child;
					continue 'descend;
				}
			}
			return node;
		}
	}

	/// Returns true if `layer` is active at `pos`: the node before `pos` or
	/// one of its ancestors belongs to that grammar.
	fn is_active_at(&self, layer: Layer, pos: CharIdx) -> bool {
		self.resolve(pos, Side::Before)
			.ancestors()
			.any(|node| node.layer() == layer)
	}

	/// Returns the grammar of the root node.
	fn top_layer(&self) -> Layer {
		self.root().layer()
	}
}
