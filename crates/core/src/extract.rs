use crate::dom_tree::{DomNode, DomTree, NodeId};
use crate::normalize::normalize_text;
use crate::parse::Document;
use crate::{GleanError, Result};

/// Tags whose subtrees never contribute to the extracted text
pub const NOISE_TAGS: &[&str] = &["script", "style", "nav", "footer", "aside"];

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Element names pruned (with their descendants) before selection
    pub noise_tags: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { noise_tags: NOISE_TAGS.iter().map(|t| t.to_string()).collect() }
    }
}

/// Which landmark supplied the primary content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Article,
    Main,
    Body,
}

impl RegionKind {
    /// Selection order, highest priority first
    const PRIORITY: [RegionKind; 3] = [RegionKind::Article, RegionKind::Main, RegionKind::Body];

    pub fn tag_name(self) -> &'static str {
        match self {
            RegionKind::Article => "article",
            RegionKind::Main => "main",
            RegionKind::Body => "body",
        }
    }
}

/// The result of content extraction
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Normalized plain text of the primary region
    pub text: String,
    /// The landmark the text came from
    pub region: RegionKind,
    /// Number of arena nodes skipped as noise
    pub pruned_nodes: usize,
}

/// Set of arena nodes excluded from selection and text collection.
///
/// Computed once from the tree without mutating it. A node is in the set
/// when it, or any ancestor, is a noise element.
#[derive(Debug, Clone)]
pub struct PrunedSet {
    mask: Vec<bool>,
    count: usize,
}

impl PrunedSet {
    pub fn contains(&self, id: NodeId) -> bool {
        self.mask.get(id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Mark every noise element and its descendants
pub fn prune_noise(tree: &DomTree, noise_tags: &[String]) -> PrunedSet {
    let mut mask = vec![false; tree.len()];
    let mut count = 0;

    // Ids are in pre-order, so a parent is always decided before its children.
    for id in 0..tree.len() {
        let Some(node) = tree.get_node(id) else { continue };

        let inherited = node.parent_id.is_some_and(|parent| mask[parent]);
        let is_noise = node
            .tag_name()
            .is_some_and(|tag| noise_tags.iter().any(|noise| noise.eq_ignore_ascii_case(tag)));

        if inherited || is_noise {
            mask[id] = true;
            count += 1;
        }
    }

    PrunedSet { mask, count }
}

/// Pick the primary content node: first surviving `article`, else first
/// surviving `main`, else the declared `body`.
pub fn select_primary(doc: &Document, pruned: &PrunedSet) -> Result<(NodeId, RegionKind)> {
    let tree = doc.tree();

    for region in RegionKind::PRIORITY {
        let found = match region {
            RegionKind::Body => doc.body().filter(|id| !pruned.contains(*id)),
            _ => first_unpruned(tree, region.tag_name(), pruned),
        };

        if let Some(id) = found {
            return Ok((id, region));
        }
    }

    Err(GleanError::NoContentRegion)
}

fn first_unpruned(tree: &DomTree, tag_name: &str, pruned: &PrunedSet) -> Option<NodeId> {
    (0..tree.len()).find(|&id| {
        !pruned.contains(id)
            && tree
                .get_node(id)
                .and_then(DomNode::tag_name)
                .is_some_and(|t| t == tag_name)
    })
}

/// Concatenate the text nodes under `node_id` in document order,
/// skipping pruned subtrees. No separators are inserted.
pub fn collect_text(tree: &DomTree, node_id: NodeId, pruned: &PrunedSet) -> String {
    let skip = |id: NodeId| pruned.contains(id);
    tree.descendants_skipping(node_id, &skip)
        .filter_map(|id| tree.get_node(id).and_then(DomNode::text))
        .collect()
}

/// Extract main content from a document
pub fn extract_content(doc: &Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    let tree = doc.tree();
    let pruned = prune_noise(tree, &config.noise_tags);
    let (node_id, region) = select_primary(doc, &pruned)?;

    let raw = collect_text(tree, node_id, &pruned);
    let text = normalize_text(&raw);

    tracing::debug!(
        stage = "extract",
        region = region.tag_name(),
        pruned = pruned.len(),
        chars = text.len(),
        "selected primary content"
    );

    Ok(ExtractedContent { text, region, pruned_nodes: pruned.len() })
}
