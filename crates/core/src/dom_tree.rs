use scraper::{Html, Node};

/// Index of a node inside a [`DomTree`].
pub type NodeId = usize;

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document root.
    Document,
    /// An element with its lowercase tag name and attributes in source order.
    Element { tag_name: String, attrs: Vec<(String, String)> },
    /// Literal text content.
    Text(String),
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct DomNode {
    pub kind: NodeKind,
    /// Parent node ID (if any)
    pub parent_id: Option<NodeId>,
    /// Child node IDs in document order
    pub child_ids: Vec<NodeId>,
}

impl DomNode {
    /// Tag name for element nodes.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    /// Attribute value for element nodes.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Text for text nodes.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An index arena holding a parsed document.
///
/// Nodes are stored in document (pre-)order, so node IDs compare the same
/// way their nodes appear in the source. Each node has at most one parent
/// and child lists only point forward, so the tree cannot contain cycles.
/// Doctypes, comments, and processing instructions are not kept.
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<DomNode>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Copy a parsed scraper document into the arena.
    pub fn from_html(html: &Html) -> Self {
        let mut tree = Self::new();
        let mut stack = vec![(html.tree.root(), None)];

        while let Some((node, parent_id)) = stack.pop() {
            let kind = match node.value() {
                Node::Document | Node::Fragment => NodeKind::Document,
                Node::Element(el) => NodeKind::Element {
                    tag_name: el.name().to_lowercase(),
                    attrs: el.attrs().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                },
                Node::Text(text) => NodeKind::Text(text.to_string()),
                _ => continue,
            };

            let node_id = tree.add_node(DomNode { kind, parent_id, child_ids: Vec::new() });
            for child in node.children().rev() {
                stack.push((child, Some(node_id)));
            }
        }

        tree
    }

    /// Add a node, linking it to its parent
    fn add_node(&mut self, node: DomNode) -> NodeId {
        let node_id = self.nodes.len();
        if let Some(parent) = node.parent_id.and_then(|id| self.nodes.get_mut(id)) {
            parent.child_ids.push(node_id);
        }
        self.nodes.push(node);
        node_id
    }

    /// The document root, if the tree holds anything
    pub fn root(&self) -> Option<NodeId> {
        self.nodes
            .first()
            .filter(|node| node.kind == NodeKind::Document)
            .map(|_| 0)
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&DomNode> {
        self.nodes.get(id)
    }

    /// Get the parent of a node
    pub fn get_parent(&self, node_id: NodeId) -> Option<&DomNode> {
        let node = self.nodes.get(node_id)?;
        let parent_id = node.parent_id?;
        self.nodes.get(parent_id)
    }

    /// Children of a node in document order
    pub fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes.get(node_id).map(|n| n.child_ids.as_slice()).unwrap_or(&[])
    }

    /// Pre-order walk of the subtree rooted at `node_id`, the node included.
    pub fn descendants(&self, node_id: NodeId) -> Descendants<'_> {
        let stack = if node_id < self.nodes.len() { vec![node_id] } else { Vec::new() };
        Descendants { tree: self, stack, skip: None }
    }

    /// Like [`descendants`](Self::descendants) but never enters a node for
    /// which `skip` returns true, nor anything beneath it.
    pub fn descendants_skipping<'a>(&'a self, node_id: NodeId, skip: &'a dyn Fn(NodeId) -> bool) -> Descendants<'a> {
        let mut walk = self.descendants(node_id);
        walk.skip = Some(skip);
        walk
    }

    /// First element (document order) with the given tag name.
    pub fn find_first(&self, tag_name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(tag_name)))
    }

    /// Get the total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Iterator returned by [`DomTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
    skip: Option<&'a dyn Fn(NodeId) -> bool>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let id = self.stack.pop()?;
            if self.skip.is_some_and(|skip| skip(id)) {
                continue;
            }
            self.stack.extend(self.tree.children(id).iter().rev());
            return Some(id);
        }
    }
}

/// Parse markup and build its arena
pub fn build_dom_tree(html: &str) -> DomTree {
    DomTree::from_html(&Html::parse_document(html))
}
