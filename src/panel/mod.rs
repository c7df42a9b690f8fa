//! Panel builders: turn a reply envelope into a document plus a canvas
//! scene, one builder per response mode, dispatched by tag.

pub mod arrows;
pub mod cones;
pub mod doc;
pub mod notes;
pub mod orbit;
pub mod paths;
pub mod seq;
pub mod stats;
pub mod toc;

use crate::error::BrowseError;
use crate::model::classify::is_math;
use crate::model::NodeEvent;
use crate::panel::doc::{truncate_chars, Document};
use crate::render::scene::Scene;
use crate::wire::{
    decode, ArrowSpec, ChapterBlock, ConeHead, Envelope, PageView, ResponseTag, SectionStat,
};

const DEFAULT_TITLE: &str = "Orbit graph browser";

/// Normalize a context phrase for query splicing.
pub fn ctx_splice(s: &str) -> String {
    s.replace(" . ", ".")
}

/// A fully built view: header title, document half, canvas half.
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub document: Document,
    pub scene: Scene,
}

impl Panel {
    fn header_only(title: String) -> Panel {
        Panel {
            title,
            document: Document::new(),
            scene: Scene::new(),
        }
    }
}

/// Clip long titles; bracketed markup is left whole so delimiters never
/// get cut in half.
fn finish_title(title: &str) -> String {
    if title.chars().count() < 60 || is_math(title) {
        title.to_string()
    } else {
        format!("{}...", truncate_chars(title, 60))
    }
}

fn fallback_title(tag: &ResponseTag, env: &Envelope) -> String {
    match tag {
        ResponseTag::Orbits => env.time.clone(),
        ResponseTag::ConePaths => "Local cone paths".to_string(),
        ResponseTag::PathSolve => "Path solutions".to_string(),
        ResponseTag::Sequence => "Story sequences ... ".to_string(),
        ResponseTag::PageMap => "Page notes about ".to_string(),
        ResponseTag::Toc => "Table of contents".to_string(),
        ResponseTag::Arrows => "Arrow lookup".to_string(),
        ResponseTag::Stat | ResponseTag::Other(_) => DEFAULT_TITLE.to_string(),
    }
}

/// Build the panel for one reply.
///
/// A payload that fails to decode degrades to a header-only panel with a
/// warning in the log. A relation index outside the taxonomy aborts the
/// build instead: a partially drawn panel would misrepresent the graph.
pub fn build_panel(env: &Envelope) -> Result<Panel, BrowseError> {
    let tag = env.tag();

    macro_rules! payload {
        ($ty:ty) => {
            match decode::<$ty>(&env.content) {
                Ok(content) => content,
                Err(err) => {
                    log::warn!("degrading {:?} panel to header only: {}", tag, err);
                    return Ok(Panel::header_only(finish_title(&fallback_title(
                        &tag, env,
                    ))));
                }
            }
        };
    }

    let mut document = Document::new();
    let mut scene = Scene::new();

    let title = match &tag {
        ResponseTag::Orbits => {
            let content = payload!(Vec<NodeEvent>);
            scene.grid();
            orbit::build_orbits(&mut document, &mut scene, &content)?;
            content
                .first()
                .map(|e| e.text.clone())
                .unwrap_or_else(|| env.time.clone())
        }
        ResponseTag::ConePaths => {
            let content = payload!(Vec<ConeHead>);
            scene.grid();
            cones::build_cones(&mut document, &mut scene, &content)?;
            "Local cone paths".to_string()
        }
        ResponseTag::PathSolve => {
            let content = payload!(Vec<ConeHead>);
            scene.grid();
            cones::build_cones(&mut document, &mut scene, &content)?;
            "Path solutions".to_string()
        }
        ResponseTag::Sequence => {
            let content = payload!(Vec<NodeEvent>);
            scene.grid();
            seq::build_sequence(&mut document, &mut scene, &content)?;
            match content.first() {
                Some(first) => format!("Story sequences ... {}", first.chap),
                None => "Story sequences ... ".to_string(),
            }
        }
        ResponseTag::PageMap => {
            let content = payload!(PageView);
            scene.grid();
            notes::build_page_map(&mut document, &mut scene, &content)?;
            format!("Page notes about {}", content.title)
        }
        ResponseTag::Toc => {
            let content = payload!(Vec<ChapterBlock>);
            scene.grid();
            toc::build_toc(&mut document, &mut scene, &content)?;
            "Table of contents".to_string()
        }
        ResponseTag::Arrows => {
            let content = payload!(Vec<ArrowSpec>);
            scene.grid();
            arrows::build_arrows(&mut document, &mut scene, &content)?;
            "Arrow lookup".to_string()
        }
        ResponseTag::Stat => {
            let content = payload!(Vec<SectionStat>);
            scene.grid();
            stats::build_stats(&mut document, &mut scene, &content)?;
            DEFAULT_TITLE.to_string()
        }
        ResponseTag::Other(other) => {
            log::warn!("unhandled response tag {:?}", other);
            DEFAULT_TITLE.to_string()
        }
    };

    Ok(Panel {
        title: finish_title(&title),
        document,
        scene,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::doc::Block;
    use crate::render::scene::DrawCmd;
    use serde_json::json;

    fn envelope(tag: &str, content: serde_json::Value) -> Envelope {
        serde_json::from_value(json!({
            "Response": tag,
            "Content": content,
            "Time": "Saturday afternoon",
        }))
        .unwrap()
    }

    #[test]
    fn empty_orbits_reply_gives_placeholder_over_bare_grid() {
        let panel = build_panel(&envelope("Orbits", json!([]))).unwrap();
        assert_eq!(panel.title, "Saturday afternoon");
        assert!(matches!(panel.document.blocks[0], Block::Placeholder(_)));
        assert!(panel
            .scene
            .cmds
            .iter()
            .all(|c| matches!(c, DrawCmd::Line { .. })));
        assert!(!panel.scene.cmds.is_empty());
    }

    #[test]
    fn orbits_title_comes_from_first_node() {
        let panel = build_panel(&envelope(
            "Orbits",
            json!([{ "Text": "gravity", "NPtr": { "Class": 1, "CPtr": 1 } }]),
        ))
        .unwrap();
        assert_eq!(panel.title, "gravity");
    }

    #[test]
    fn unknown_tag_keeps_default_header_without_body() {
        let panel = build_panel(&envelope("Mystery", json!(null))).unwrap();
        assert_eq!(panel.title, DEFAULT_TITLE);
        assert!(panel.document.blocks.is_empty());
        assert!(panel.scene.cmds.is_empty());
    }

    #[test]
    fn malformed_payload_degrades_to_header_only() {
        let panel = build_panel(&envelope("TOC", json!("not a list"))).unwrap();
        assert_eq!(panel.title, "Table of contents");
        assert!(panel.document.blocks.is_empty());
        assert!(panel.scene.cmds.is_empty());
    }

    #[test]
    fn schema_violation_aborts_instead_of_degrading() {
        let bad = envelope(
            "ConePaths",
            json!([{
                "RootNode": { "Class": 1, "CPtr": 1 },
                "Title": "t",
                "Paths": [[
                    { "Name": "a", "NPtr": { "Class": 1, "CPtr": 1 },
                      "XYZ": { "X": 0.1, "Y": 0.0, "Z": 0.0 } },
                    { "Name": "bad", "STindex": 9, "Arr": 1 }
                ]]
            }]),
        );
        assert!(matches!(build_panel(&bad), Err(BrowseError::Schema(9))));
    }

    #[test]
    fn long_titles_are_clipped_unless_bracketed() {
        let long = "t".repeat(80);
        let panel = build_panel(&envelope(
            "Orbits",
            json!([{ "Text": long, "NPtr": { "Class": 1, "CPtr": 1 } }]),
        ))
        .unwrap();
        assert_eq!(panel.title.chars().count(), 63);
        assert!(panel.title.ends_with("..."));

        let bracketed = format!("f(x) {}", "t".repeat(80));
        let panel = build_panel(&envelope(
            "Orbits",
            json!([{ "Text": bracketed, "NPtr": { "Class": 1, "CPtr": 1 } }]),
        ))
        .unwrap();
        assert!(!panel.title.ends_with("..."));
    }

    #[test]
    fn arrow_directory_builds_fanned_scene() {
        let panel = build_panel(&envelope(
            "Arrows",
            json!([{
                "ArrPtr": 40, "ASTtype": 1, "Short": "lt", "Long": "leads to",
                "InvPtr": 41, "ISTtype": -1, "InvS": "cf", "InvL": "comes from"
            }]),
        ))
        .unwrap();
        assert_eq!(panel.title, "Arrow lookup");
        let arrows = panel
            .scene
            .cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Arrow { .. }))
            .count();
        assert_eq!(arrows, 2);
    }

    #[test]
    fn page_map_title_names_the_page() {
        let panel = build_panel(&envelope(
            "PageMap",
            json!({ "Title": "biology", "Context": "", "Notes": [] }),
        ))
        .unwrap();
        assert_eq!(panel.title, "Page notes about biology");
    }

    #[test]
    fn splice_collapses_spaced_dots() {
        assert_eq!(ctx_splice("a . b . c"), "a.b.c");
        assert_eq!(ctx_splice("plain"), "plain");
    }
}
