use crate::error::BrowseError;
use crate::panel::doc::{truncate_chars, Block, Document, LinkAction};
use crate::panel::paths::print_paths;
use crate::render::scene::Scene;
use crate::wire::ConeHead;

/// Cone view, shared by local cones and path solutions: one titled group
/// of path cards per root, with centrality tables when the solver sent
/// them.
pub fn build_cones(
    doc: &mut Document,
    scene: &mut Scene,
    content: &[ConeHead],
) -> Result<(), BrowseError> {
    for head in content {
        doc.push(Block::Heading {
            level: 2,
            text: format!("{}..", truncate_chars(&head.title, 50)),
            action: Some(LinkAction::Node(head.root_node)),
        });

        print_paths(doc, scene, &head.paths)?;

        if let Some(btwc) = &head.btwc {
            doc.push(Block::List {
                title: "Betweenness Centrality Rank".to_string(),
                items: btwc.clone(),
            });
            doc.push(Block::List {
                title: "Supernode summary".to_string(),
                items: head.supernodes.clone().unwrap_or_default(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coords, NodePtr};
    use crate::wire::{PathItem, PathSet};

    fn head(title: &str, btwc: Option<Vec<String>>) -> ConeHead {
        let paths: PathSet = vec![Some(vec![Some(PathItem {
            nptr: NodePtr { class: 1, cptr: 1 },
            name: "start".to_string(),
            xyz: Coords::new(0.1, 0.0, 0.0),
            ..PathItem::default()
        })])];
        ConeHead {
            root_node: NodePtr { class: 1, cptr: 1 },
            title: title.to_string(),
            btwc,
            supernodes: btwc_supernodes(),
            paths,
        }
    }

    fn btwc_supernodes() -> Option<Vec<String>> {
        Some(vec!["supernode a".to_string()])
    }

    #[test]
    fn each_root_gets_heading_and_cards() {
        let mut doc = Document::new();
        let mut scene = Scene::new();
        build_cones(&mut doc, &mut scene, &[head("root title", None)]).unwrap();
        assert!(matches!(
            &doc.blocks[0],
            Block::Heading { text, .. } if text == "root title.."
        ));
        assert!(doc.blocks.iter().any(|b| matches!(b, Block::Card(_))));
        assert!(!doc.blocks.iter().any(|b| matches!(b, Block::List { .. })));
    }

    #[test]
    fn centrality_tables_follow_the_paths() {
        let mut doc = Document::new();
        let mut scene = Scene::new();
        let ranked = head("solved", Some(vec!["1st".to_string(), "2nd".to_string()]));
        build_cones(&mut doc, &mut scene, &[ranked]).unwrap();
        let lists: Vec<_> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::List { title, items } => Some((title.as_str(), items.len())),
                _ => None,
            })
            .collect();
        assert_eq!(
            lists,
            vec![("Betweenness Centrality Rank", 2), ("Supernode summary", 1)]
        );
    }

    #[test]
    fn long_titles_are_clipped() {
        let mut doc = Document::new();
        let mut scene = Scene::new();
        let long = "x".repeat(80);
        build_cones(&mut doc, &mut scene, &[head(&long, None)]).unwrap();
        match &doc.blocks[0] {
            Block::Heading { text, .. } => assert_eq!(text.chars().count(), 52),
            other => panic!("expected heading, got {:?}", other),
        }
    }
}
