use egui::Color32;

use crate::error::BrowseError;
use crate::model::{Coords, SType, ST_ZERO};
use crate::panel::doc::{truncate_chars, Block, Document, Inline, LinkAction};
use crate::render::scene::Scene;
use crate::wire::{PathSet, ARROW_PREVIOUS, ARROW_THEN};

/// Graphics accumulator threaded through a path traversal: the previous
/// node's coordinate and the signed offset of the arrow just crossed.
/// Both survive across paths; the point resets to the origin sentinel at
/// each path's final node.
struct Trail {
    last: Coords,
    last_offset: i64,
}

/// Render a set of alternating node/arrow paths as cards plus canvas
/// trails. Entries alternate by their original index, so a gap is skipped
/// without flipping the node/arrow parity of what follows.
pub fn print_paths(
    doc: &mut Document,
    scene: &mut Scene,
    paths: &PathSet,
) -> Result<(), BrowseError> {
    let mut trail = Trail {
        last: Coords::ORIGIN,
        last_offset: 0,
    };

    for path in paths.iter().flatten() {
        let mut card: Vec<Inline> = Vec::new();

        for (i, entry) in path.iter().enumerate() {
            let item = match entry {
                Some(item) => item,
                None => continue,
            };

            if i % 2 == 0 {
                let this = item.xyz;
                scene.connect(trail.last_offset, this, trail.last);

                trail.last = if i < path.len() - 1 {
                    this
                } else {
                    Coords::ORIGIN
                };

                scene.event(this);
                scene.label(this, truncate_chars(&item.name, 25), 12.0, Color32::BLACK);

                let action = LinkAction::Node(item.nptr);
                if item.name.contains('\n') {
                    card.push(Inline::Pre {
                        text: item.name.clone(),
                        action,
                    });
                } else {
                    let scale = if item.name.chars().count() < 20 { 1.5 } else { 1.0 };
                    card.push(Inline::NodeText {
                        text: item.name.clone(),
                        action,
                        scale,
                    });
                }
            } else {
                let kind =
                    SType::from_index(item.st_index).ok_or(BrowseError::Schema(item.st_index))?;
                trail.last_offset = item.st_index - ST_ZERO;

                if item.arr == ARROW_THEN || item.arr == ARROW_PREVIOUS {
                    card.push(Inline::Break);
                }
                card.push(Inline::ArrowLabel {
                    label: format!("( {} )  ", item.name),
                    kind,
                });
            }
        }

        if !card.is_empty() {
            doc.push(Block::Card(card));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodePtr;
    use crate::render::scene::DrawCmd;
    use crate::wire::PathItem;

    fn node(name: &str, x: f64) -> Option<PathItem> {
        Some(PathItem {
            nptr: NodePtr { class: 1, cptr: 1 },
            name: name.to_string(),
            xyz: Coords::new(x, 0.0, 0.0),
            ..PathItem::default()
        })
    }

    fn arrow(name: &str, st_index: i64, arr: i64) -> Option<PathItem> {
        Some(PathItem {
            name: name.to_string(),
            st_index,
            arr,
            ..PathItem::default()
        })
    }

    #[test]
    fn three_node_path_yields_one_card_and_two_links() {
        let paths: PathSet = vec![Some(vec![
            node("a", 0.1),
            arrow("leads to", 4, 40),
            node("b", 0.2),
            arrow("leads to", 4, 40),
            node("c", 0.3),
        ])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_paths(&mut doc, &mut scene, &paths).unwrap();

        assert_eq!(doc.blocks.len(), 1);
        match &doc.blocks[0] {
            Block::Card(inlines) => {
                let nodes = inlines
                    .iter()
                    .filter(|i| matches!(i, Inline::NodeText { .. }))
                    .count();
                let arrows = inlines
                    .iter()
                    .filter(|i| matches!(i, Inline::ArrowLabel { .. }))
                    .count();
                assert_eq!(nodes, 3);
                assert_eq!(arrows, 2);
            }
            other => panic!("expected card, got {:?}", other),
        }

        // Three discs and labels, two connecting arrows; the first node
        // has no predecessor so draws no link.
        let discs = scene
            .cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Disc { .. }))
            .count();
        let links = scene
            .cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Arrow { .. }))
            .count();
        assert_eq!(discs, 3);
        assert_eq!(links, 2);
    }

    #[test]
    fn gaps_keep_parity_of_later_entries() {
        let paths: PathSet = vec![Some(vec![
            node("a", 0.1),
            None,
            node("b", 0.2),
        ])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_paths(&mut doc, &mut scene, &paths).unwrap();
        match &doc.blocks[0] {
            Block::Card(inlines) => {
                // Both surviving entries sit at even indices, so both
                // render as nodes.
                assert_eq!(inlines.len(), 2);
                assert!(inlines
                    .iter()
                    .all(|i| matches!(i, Inline::NodeText { .. })));
            }
            other => panic!("expected card, got {:?}", other),
        }
    }

    #[test]
    fn reserved_sequence_arrows_break_the_paragraph() {
        let paths: PathSet = vec![Some(vec![
            node("a", 0.1),
            arrow("then", 4, ARROW_THEN),
            node("b", 0.2),
        ])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_paths(&mut doc, &mut scene, &paths).unwrap();
        match &doc.blocks[0] {
            Block::Card(inlines) => {
                assert!(inlines.contains(&Inline::Break));
            }
            other => panic!("expected card, got {:?}", other),
        }
    }

    #[test]
    fn bad_relation_index_aborts_the_build() {
        let paths: PathSet = vec![Some(vec![node("a", 0.1), arrow("bad", 9, 40)])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        assert_eq!(
            print_paths(&mut doc, &mut scene, &paths),
            Err(BrowseError::Schema(9))
        );
    }

    #[test]
    fn preformatted_nodes_render_as_pre() {
        let paths: PathSet = vec![Some(vec![node("line one\nline two", 0.1)])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_paths(&mut doc, &mut scene, &paths).unwrap();
        match &doc.blocks[0] {
            Block::Card(inlines) => {
                assert!(matches!(inlines[0], Inline::Pre { .. }));
            }
            other => panic!("expected card, got {:?}", other),
        }
    }
}
