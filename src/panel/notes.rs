use egui::Color32;

use crate::error::BrowseError;
use crate::model::{Coords, SType, ST_ZERO};
use crate::panel::doc::{truncate_chars, Block, Document, Inline, LinkAction};
use crate::render::scene::Scene;
use crate::wire::{PageView, PathSet, ARROW_PREVIOUS, ARROW_THEN};

/// Annotated chapter page: heading plus the note lines.
pub fn build_page_map(
    doc: &mut Document,
    scene: &mut Scene,
    page: &PageView,
) -> Result<(), BrowseError> {
    doc.push(Block::Heading {
        level: 3,
        text: "* Chapter Notes: ".to_string(),
        action: None,
    });
    print_notes(doc, scene, &page.notes)
}

/// Render note lines as cards. Consecutive lines starting with the same
/// node collapse into one card, the repeat replaced by a ditto marker;
/// the canvas still draws every occurrence so trails stay complete.
pub fn print_notes(
    doc: &mut Document,
    scene: &mut Scene,
    notes: &PathSet,
) -> Result<(), BrowseError> {
    let mut last = Coords::ORIGIN;
    // Carries the offset of the last arrow seen across line boundaries.
    // Starts at +3, so a cross-line link before any arrow draws in the
    // property-expression style.
    let mut offset: i64 = ST_ZERO;
    let mut registered_first: Option<Coords> = None;
    let mut last_line_start = String::new();
    let mut last_chtxt: Option<String> = None;
    let mut card: Option<Vec<Inline>> = None;

    for line in notes.iter().flatten() {
        for (i, entry) in line.iter().enumerate() {
            let item = match entry {
                Some(item) => item,
                None => continue,
            };

            if i % 2 == 0 {
                let this = item.xyz;

                if i == 0 {
                    if let Some(prev) = registered_first {
                        scene.connect(offset, prev, this);
                    }
                } else {
                    scene.connect(offset, last, this);
                }
                last = this;

                scene.event(this);
                scene.label(this, truncate_chars(&item.name, 25), 12.0, Color32::BLACK);

                if i == 0 {
                    let repeated = item.name == last_line_start && card.is_some();
                    if repeated {
                        if let Some(buf) = card.as_mut() {
                            buf.push(Inline::Break);
                            buf.push(Inline::Ditto);
                        }
                        continue;
                    }

                    registered_first = Some(this);
                    if let Some(buf) = card.take() {
                        doc.push(Block::Card(buf));
                    }

                    let mut line_intro = vec![Inline::Text(format!("At line {}", item.line))];
                    let chtxt = format!("{}:{}", item.chp, item.ctx);
                    if chtxt.chars().count() > 4 && last_chtxt.as_deref() != Some(&chtxt) {
                        line_intro.push(Inline::Italic(format!("  From: \"{}\"", chtxt)));
                    }
                    last_chtxt = Some(chtxt);
                    doc.push(Block::Line(line_intro));

                    card = Some(Vec::new());
                    last_line_start = item.name.clone();
                }

                let buf = card.get_or_insert_with(Vec::new);
                let action = LinkAction::Node(item.nptr);
                if item.name.contains('\n') {
                    buf.push(Inline::Pre {
                        text: item.name.clone(),
                        action,
                    });
                } else {
                    buf.push(Inline::NodeText {
                        text: item.name.clone(),
                        action,
                        scale: 1.0,
                    });
                }
                buf.push(Inline::ProgressMark {
                    nptr: item.nptr,
                    chapcontext: format!("{}:{}", item.chp, item.ctx),
                });
            } else {
                let kind =
                    SType::from_index(item.st_index).ok_or(BrowseError::Schema(item.st_index))?;
                offset = item.st_index - ST_ZERO;

                let buf = card.get_or_insert_with(Vec::new);
                if item.arr == ARROW_THEN || item.arr == ARROW_PREVIOUS {
                    buf.push(Inline::Break);
                }
                buf.push(Inline::ArrowLabel {
                    label: format!("( {} )  ", item.name),
                    kind,
                });
            }
        }
    }

    if let Some(buf) = card.take() {
        doc.push(Block::Card(buf));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodePtr;
    use crate::wire::PathItem;

    fn node(name: &str, line_no: i64, chp: &str, ctx: &str) -> Option<PathItem> {
        Some(PathItem {
            nptr: NodePtr { class: 1, cptr: 2 },
            name: name.to_string(),
            line: line_no,
            chp: chp.to_string(),
            ctx: ctx.to_string(),
            xyz: Coords::new(0.2, 0.1, 0.0),
            ..PathItem::default()
        })
    }

    fn arrow(name: &str, st_index: i64) -> Option<PathItem> {
        Some(PathItem {
            name: name.to_string(),
            st_index,
            ..PathItem::default()
        })
    }

    fn cards(doc: &Document) -> Vec<&Vec<Inline>> {
        doc.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Card(inlines) => Some(inlines),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn repeated_line_start_collapses_to_ditto() {
        let notes: PathSet = vec![
            Some(vec![node("topic", 1, "chapter", "ctx"), arrow("leads to", 4), node("first", 1, "chapter", "ctx")]),
            Some(vec![node("topic", 2, "chapter", "ctx"), arrow("leads to", 4), node("second", 2, "chapter", "ctx")]),
        ];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_notes(&mut doc, &mut scene, &notes).unwrap();

        // Both lines share one card; the repeat is a ditto marker.
        let found = cards(&doc);
        assert_eq!(found.len(), 1);
        assert!(found[0].contains(&Inline::Ditto));
        let named: Vec<_> = found[0]
            .iter()
            .filter_map(|i| match i {
                Inline::NodeText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(named, vec!["topic", "first", "second"]);
    }

    #[test]
    fn chapter_context_shown_once_until_it_changes() {
        let notes: PathSet = vec![
            Some(vec![node("a", 1, "chapter", "ctx")]),
            Some(vec![node("b", 2, "chapter", "ctx")]),
            Some(vec![node("c", 3, "other", "ctx")]),
        ];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_notes(&mut doc, &mut scene, &notes).unwrap();

        let intros: Vec<_> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Line(inlines) => Some(inlines),
                _ => None,
            })
            .collect();
        assert_eq!(intros.len(), 3);
        assert!(intros[0].iter().any(|i| matches!(i, Inline::Italic(_))));
        assert!(!intros[1].iter().any(|i| matches!(i, Inline::Italic(_))));
        assert!(intros[2].iter().any(|i| matches!(i, Inline::Italic(_))));
    }

    #[test]
    fn short_chapter_context_is_never_shown() {
        let notes: PathSet = vec![Some(vec![node("a", 1, "c", "x")])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_notes(&mut doc, &mut scene, &notes).unwrap();
        // "c:x" is 3 chars, under the display threshold.
        assert!(!doc
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Line(inlines) if inlines.iter().any(|i| matches!(i, Inline::Italic(_))))));
    }

    #[test]
    fn line_numbers_appear_in_intros() {
        let notes: PathSet = vec![Some(vec![node("a", 42, "chapter", "ctx")])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        print_notes(&mut doc, &mut scene, &notes).unwrap();
        assert!(doc.blocks.iter().any(|b| matches!(
            b,
            Block::Line(inlines) if inlines.contains(&Inline::Text("At line 42".to_string()))
        )));
    }

    #[test]
    fn bad_relation_index_aborts() {
        let notes: PathSet = vec![Some(vec![node("a", 1, "chapter", "ctx"), arrow("x", -1)])];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        assert_eq!(
            print_notes(&mut doc, &mut scene, &notes),
            Err(BrowseError::Schema(-1))
        );
    }
}
