//! Orbit/Edge data model for the semantic graph.
//!
//! A node carries an **orbit**: seven fixed slots of typed edges, one
//! slot per relation kind. The seven kinds are centered on a neutral
//! "near/similar" axis; the signed offset from the center picks an
//! inverse pair of relations, or the symmetric center itself.

pub mod classify;

use serde::Deserialize;
use std::fmt;

/// Number of relation slots in a node's orbit.
pub const ORBIT_SLOTS: usize = 7;

/// Index of the neutral "near" relation at the center of the taxonomy.
pub const ST_ZERO: i64 = 3;

/// Identity of a node: server-assigned (size-class, in-class pointer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct NodePtr {
    #[serde(rename = "Class", default)]
    pub class: i64,
    #[serde(rename = "CPtr", default)]
    pub cptr: i64,
}

impl fmt::Display for NodePtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.class, self.cptr)
    }
}

/// A 3D layout coordinate supplied by the server. Immutable once received;
/// the renderer only projects it, never rewrites it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Coords {
    #[serde(rename = "X", default)]
    pub x: f64,
    #[serde(rename = "Y", default)]
    pub y: f64,
    #[serde(rename = "Z", default)]
    pub z: f64,
}

impl Coords {
    pub const ORIGIN: Coords = Coords { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin doubles as the "no previous point" sentinel in path
    /// traversal, matching the wire protocol's convention.
    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SType — the closed 7-member relation taxonomy
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Relation type of an edge, indexed 0..=6 with the neutral kind at 3.
///
/// The six non-neutral members form three inverse pairs sharing an axis:
/// property-expression (0/6), containment (1/5), causal order (2/4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SType {
    /// −3: is a property expressed by
    ExpressedBy,
    /// −2: is contained by
    ContainedBy,
    /// −1: comes from
    ComesFrom,
    /// 0: is near / similar to (self-inverse)
    Near,
    /// +1: leads to
    LeadsTo,
    /// +2: contains
    Contains,
    /// +3: expresses property
    Expresses,
}

impl SType {
    pub const ALL: [SType; ORBIT_SLOTS] = [
        SType::ExpressedBy,
        SType::ContainedBy,
        SType::ComesFrom,
        SType::Near,
        SType::LeadsTo,
        SType::Contains,
        SType::Expresses,
    ];

    /// Decode a wire relation index. Anything outside 0..=6 is a schema
    /// violation and must abort the panel build.
    pub fn from_index(index: i64) -> Option<SType> {
        match index {
            0 => Some(SType::ExpressedBy),
            1 => Some(SType::ContainedBy),
            2 => Some(SType::ComesFrom),
            3 => Some(SType::Near),
            4 => Some(SType::LeadsTo),
            5 => Some(SType::Contains),
            6 => Some(SType::Expresses),
            _ => None,
        }
    }

    /// Decode a signed relation offset (−3..=3), as used by arrow lookups.
    pub fn from_offset(offset: i64) -> Option<SType> {
        SType::from_index(offset + ST_ZERO)
    }

    pub fn index(self) -> usize {
        match self {
            SType::ExpressedBy => 0,
            SType::ContainedBy => 1,
            SType::ComesFrom => 2,
            SType::Near => 3,
            SType::LeadsTo => 4,
            SType::Contains => 5,
            SType::Expresses => 6,
        }
    }

    /// Signed offset from the neutral center: −3..=3.
    pub fn offset(self) -> i64 {
        self.index() as i64 - ST_ZERO
    }

    /// The paired inverse kind; `Near` is its own inverse.
    pub fn inverse(self) -> SType {
        SType::ALL[ORBIT_SLOTS - 1 - self.index()]
    }

    /// Stable display title, used for the legend and hover tooltips.
    pub fn title(self) -> &'static str {
        match self {
            SType::ExpressedBy => "is a property expressed by",
            SType::ContainedBy => "is contained by",
            SType::ComesFrom => "comes from",
            SType::Near => "is near/similar to",
            SType::LeadsTo => "leads to",
            SType::Contains => "contains",
            SType::Expresses => "expresses property",
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Edges and node events
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One typed link from a focal node to a neighbour. Holds only a `(class,
/// cptr)` reference to the destination, resolved by the server; the
/// renderer never owns or mutates the far node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrbitEdge {
    /// Hierarchy nesting depth, used for indentation in path listings.
    #[serde(rename = "Radius", default)]
    pub radius: i64,
    /// Forward arrow label; `None` renders as a broken-arrow marker.
    #[serde(rename = "Arrow", default)]
    pub arrow: Option<String>,
    #[serde(rename = "STindex", default)]
    pub st_index: i64,
    #[serde(rename = "Dst", default)]
    pub dst: NodePtr,
    /// Context hint string for the link.
    #[serde(rename = "Ctx", default)]
    pub ctx: String,
    /// Text of the destination node.
    #[serde(rename = "Text", default)]
    pub text: String,
    /// Destination coordinate.
    #[serde(rename = "XYZ", default)]
    pub xyz: Coords,
    /// Origin coordinate of the edge (the focal end).
    #[serde(rename = "OOO", default)]
    pub ooo: Coords,
}

impl OrbitEdge {
    pub fn arrow_label(&self) -> &str {
        self.arrow.as_deref().unwrap_or("broken arrow")
    }
}

fn empty_orbits() -> [Option<Vec<OrbitEdge>>; ORBIT_SLOTS] {
    std::array::from_fn(|_| None)
}

/// A graph vertex as rendered: label text, identity, layout coordinate,
/// provenance labels, and the seven-slot orbit of typed edges.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeEvent {
    #[serde(rename = "Text", default)]
    pub text: String,
    #[serde(rename = "Chap", default)]
    pub chap: String,
    #[serde(rename = "Context", default)]
    pub context: String,
    #[serde(rename = "NPtr", default)]
    pub nptr: NodePtr,
    #[serde(rename = "XYZ", default)]
    pub xyz: Coords,
    /// One slot per relation kind; a slot the server omitted is `None`.
    /// A slot never mixes relation types.
    #[serde(rename = "Orbits", default = "empty_orbits")]
    pub orbits: [Option<Vec<OrbitEdge>>; ORBIT_SLOTS],
}

impl Default for NodeEvent {
    fn default() -> Self {
        Self {
            text: String::new(),
            chap: String::new(),
            context: String::new(),
            nptr: NodePtr::default(),
            xyz: Coords::ORIGIN,
            orbits: empty_orbits(),
        }
    }
}

impl NodeEvent {
    /// Ordered edge sequence for one orbit slot; empty when omitted.
    pub fn orbit(&self, kind: SType) -> &[OrbitEdge] {
        self.orbits[kind.index()].as_deref().unwrap_or(&[])
    }
}

/// True iff both directions of a relation axis are populated, i.e. the
/// node sits in the middle of a cone. Used only to decide whether to
/// offer a jump-to-cone shortcut, never to alter rendering.
pub fn is_mid_cone(bwd: &[OrbitEdge], fwd: &[OrbitEdge]) -> bool {
    !bwd.is_empty() && !fwd.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_indices_round_trip() {
        for kind in SType::ALL {
            assert_eq!(SType::from_index(kind.index() as i64), Some(kind));
            assert_eq!(SType::from_offset(kind.offset()), Some(kind));
        }
    }

    #[test]
    fn out_of_range_indices_rejected() {
        assert_eq!(SType::from_index(-1), None);
        assert_eq!(SType::from_index(7), None);
        assert_eq!(SType::from_offset(4), None);
        assert_eq!(SType::from_offset(-4), None);
    }

    #[test]
    fn inverse_pairs_share_an_axis() {
        assert_eq!(SType::Expresses.inverse(), SType::ExpressedBy);
        assert_eq!(SType::Contains.inverse(), SType::ContainedBy);
        assert_eq!(SType::LeadsTo.inverse(), SType::ComesFrom);
        assert_eq!(SType::Near.inverse(), SType::Near);
        for kind in SType::ALL {
            assert_eq!(kind.inverse().offset(), -kind.offset());
            assert_eq!(kind.inverse().inverse(), kind);
        }
    }

    #[test]
    fn mid_cone_requires_both_directions() {
        let edge = OrbitEdge::default();
        assert!(is_mid_cone(&[edge.clone()], &[edge.clone()]));
        assert!(!is_mid_cone(&[], &[edge.clone()]));
        assert!(!is_mid_cone(&[edge], &[]));
        assert!(!is_mid_cone(&[], &[]));
    }

    #[test]
    fn missing_orbit_slot_is_empty() {
        let event = NodeEvent::default();
        for kind in SType::ALL {
            assert!(event.orbit(kind).is_empty());
        }
    }

    #[test]
    fn node_event_decodes_from_wire_shape() {
        let json = r#"{
            "Text": "gravity",
            "Chap": "physics",
            "Context": "forces",
            "NPtr": { "Class": 2, "CPtr": 17 },
            "XYZ": { "X": 0.1, "Y": 0.2, "Z": 0.3 },
            "Orbits": [null, null, null, null,
                [{ "Arrow": "leads to", "STindex": 4,
                   "Dst": { "Class": 2, "CPtr": 18 },
                   "Radius": 0, "Ctx": "", "Text": "falling",
                   "XYZ": { "X": 1, "Y": 0, "Z": 0 },
                   "OOO": { "X": 0.1, "Y": 0.2, "Z": 0.3 } }],
                null, null]
        }"#;
        let event: NodeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.nptr.to_string(), "(2,17)");
        assert_eq!(event.orbit(SType::LeadsTo).len(), 1);
        assert_eq!(event.orbit(SType::LeadsTo)[0].text, "falling");
        assert!(event.orbit(SType::ComesFrom).is_empty());
    }
}
