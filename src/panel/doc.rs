use egui::Color32;

use crate::model::{NodePtr, SType};

/// What clicking a document link does: navigate to a node or submit a
/// query through the search channel.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkAction {
    Node(NodePtr),
    Search(String),
}

/// One inline fragment of a document line. The view layer maps each
/// variant onto an egui widget; the builders never touch egui directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Italic(String),
    /// Preformatted multi-line text, clickable as a node link.
    Pre { text: String, action: LinkAction },
    /// Clickable node text; `scale` enlarges short labels.
    NodeText {
        text: String,
        action: LinkAction,
        scale: f32,
    },
    /// De-emphasized full text shown under a truncated title.
    Small(String),
    /// Arrow name with the relation title as hover tooltip.
    ArrowLabel { label: String, kind: SType },
    /// Dotted hierarchy prefix in front of a satellite line.
    SatellitePrefix(String),
    /// Generic clickable label (chapter links, cone shortcuts).
    Link { label: String, action: LinkAction },
    /// External link opened outside the app.
    Url(String),
    Image(String),
    /// Repeated-item marker replacing a duplicated line start.
    Ditto,
    /// Paragraph break inside a card.
    Break,
    ContextHint(String),
    /// Seen-it checkbox; checking it fires the progress side channel.
    ProgressMark { nptr: NodePtr, chapcontext: String },
    /// Recency-coloured chip in the activity view.
    HeatChip {
        label: String,
        action: LinkAction,
        fg: Color32,
        bg: Color32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        action: Option<LinkAction>,
    },
    /// A flowing line of inlines outside any card.
    Line(Vec<Inline>),
    /// A bordered card grouping one result.
    Card(Vec<Inline>),
    /// Titled ordered list (centrality tables).
    List { title: String, items: Vec<String> },
    Placeholder(String),
}

/// The structured text half of a panel, mirrored by the canvas scene.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Document {
        Document::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// Character-safe prefix; byte slicing would split multi-byte runes.
pub fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
