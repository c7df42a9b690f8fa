//! Wire protocol for the graph server's `/searchN4L` endpoint.
//!
//! Every reply is one envelope: a mode tag in `Response` plus a
//! mode-specific `Content` payload, decoded lazily once the tag is known.
//! Payload field names follow the server verbatim; the serde renames are
//! the contract.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::BrowseError;
use crate::model::{Coords, NodePtr};

/// Reserved arrow pointer: "then" continuation inside a story path.
pub const ARROW_THEN: i64 = 2;
/// Reserved arrow pointer: "previous" back-reference inside a story path.
pub const ARROW_PREVIOUS: i64 = 3;

/// Top-level reply envelope. `Content` stays untyped until the tag
/// dispatch decides which payload shape to decode it as.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Content", default)]
    pub content: Value,
    #[serde(rename = "Time", default)]
    pub time: String,
    #[serde(rename = "Ambient", default)]
    pub ambient: Value,
    #[serde(rename = "Intent", default)]
    pub intent: Value,
}

impl Envelope {
    pub fn tag(&self) -> ResponseTag {
        ResponseTag::parse(&self.response)
    }

    /// Ambient commentary line, when the server sent one.
    pub fn ambient_text(&self) -> Option<&str> {
        self.ambient.as_str().filter(|s| !s.is_empty())
    }

    /// Inferred-intent line, when the server sent one.
    pub fn intent_text(&self) -> Option<&str> {
        self.intent.as_str().filter(|s| !s.is_empty())
    }
}

/// Closed set of reply modes. Unknown tags are preserved so the view can
/// fall back to a bare header without losing the string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseTag {
    Orbits,
    ConePaths,
    PathSolve,
    Sequence,
    PageMap,
    Toc,
    Arrows,
    Stat,
    Other(String),
}

impl ResponseTag {
    pub fn parse(tag: &str) -> ResponseTag {
        match tag {
            "Orbits" => ResponseTag::Orbits,
            "ConePaths" => ResponseTag::ConePaths,
            "PathSolve" => ResponseTag::PathSolve,
            "Sequence" => ResponseTag::Sequence,
            "PageMap" => ResponseTag::PageMap,
            "TOC" => ResponseTag::Toc,
            "Arrows" => ResponseTag::Arrows,
            "STAT" => ResponseTag::Stat,
            other => ResponseTag::Other(other.to_string()),
        }
    }
}

/// Decode an untyped payload into its mode-specific shape. Any mismatch is
/// a malformed response, handled by degrading to a header-only panel.
pub fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, BrowseError> {
    serde_json::from_value(value.clone()).map_err(|e| BrowseError::Malformed(e.to_string()))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Path payloads (ConePaths / PathSolve / Sequence)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One entry of a path line. Entries alternate node (even index) and arrow
/// (odd index); which fields are meaningful depends on the position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(rename = "NPtr", default)]
    pub nptr: NodePtr,
    /// Arrow pointer, meaningful on odd entries only.
    #[serde(rename = "Arr", default)]
    pub arr: i64,
    #[serde(rename = "STindex", default)]
    pub st_index: i64,
    #[serde(rename = "Line", default)]
    pub line: i64,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Chp", default)]
    pub chp: String,
    #[serde(rename = "Ctx", default)]
    pub ctx: String,
    #[serde(rename = "XYZ", default)]
    pub xyz: Coords,
}

/// A single path: alternating node/arrow entries with possible gaps.
pub type PathLine = Vec<Option<PathItem>>;
/// A bundle of paths sharing one root.
pub type PathSet = Vec<Option<PathLine>>;

/// One rooted cone: the root node, optional centrality data, and the paths
/// fanning out from it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConeHead {
    #[serde(rename = "RootNode", default)]
    pub root_node: NodePtr,
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Between-ness centrality lines, present for path solutions.
    #[serde(rename = "BTWC", default)]
    pub btwc: Option<Vec<String>>,
    #[serde(rename = "SuperNodes", default)]
    pub supernodes: Option<Vec<String>>,
    #[serde(rename = "Paths", default)]
    pub paths: PathSet,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Page map / table of contents
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Annotated page of notes: a title, its ambient context, and the note
/// lines as path sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageView {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Context", default)]
    pub context: String,
    #[serde(rename = "Notes", default)]
    pub notes: PathSet,
}

/// A located text fragment in a chapter listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Loc {
    #[serde(rename = "Text", default)]
    pub text: String,
    #[serde(rename = "XYZ", default)]
    pub xyz: Coords,
}

/// One chapter of the table of contents, with its context words grouped by
/// scope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterBlock {
    #[serde(rename = "Chapter", default)]
    pub chapter: String,
    #[serde(rename = "XYZ", default)]
    pub xyz: Coords,
    /// Context words in every section of the chapter.
    #[serde(rename = "Common", default)]
    pub common: Option<Vec<Loc>>,
    /// Context words in a single section only.
    #[serde(rename = "Single", default)]
    pub single: Option<Vec<Loc>>,
    /// All remaining context words.
    #[serde(rename = "Context", default)]
    pub context: Option<Vec<Loc>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Usage statistics / arrow directory / status
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Per-section recency and frequency record for the activity view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionStat {
    #[serde(rename = "Section", default)]
    pub section: String,
    #[serde(rename = "Last", default)]
    pub last: String,
    /// Seconds since the item was last visited.
    #[serde(rename = "Pdelta", default)]
    pub pdelta: f64,
    #[serde(rename = "Ndelta", default)]
    pub ndelta: f64,
    #[serde(rename = "Freq", default)]
    pub freq: f64,
    #[serde(rename = "NPtr", default)]
    pub nptr: NodePtr,
    #[serde(rename = "XYZ", default)]
    pub xyz: Coords,
}

/// One arrow definition with its inverse, from the arrow directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArrowSpec {
    #[serde(rename = "ArrPtr", default)]
    pub arr_ptr: i64,
    /// Signed relation offset of the forward arrow, −3..=3.
    #[serde(rename = "ASTtype", default)]
    pub ast_type: i64,
    #[serde(rename = "Short", default)]
    pub short: String,
    #[serde(rename = "Long", default)]
    pub long: String,
    #[serde(rename = "InvPtr", default)]
    pub inv_ptr: i64,
    #[serde(rename = "ISTtype", default)]
    pub ist_type: i64,
    #[serde(rename = "InvS", default)]
    pub inv_s: String,
    #[serde(rename = "InvL", default)]
    pub inv_l: String,
}

/// Health probe payload from `/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub server_status: String,
    #[serde(default)]
    pub database_status: String,
}
