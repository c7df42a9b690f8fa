use crate::error::BrowseError;
use crate::panel::ctx_splice;
use crate::panel::doc::{Block, Document, Inline, LinkAction};
use crate::render::scene::Scene;
use crate::render::GREY;
use crate::wire::{ChapterBlock, Loc};

/// Table of contents: one card per chapter with its context word groups,
/// mirrored on the canvas as a chapter node with context satellites.
pub fn build_toc(
    doc: &mut Document,
    scene: &mut Scene,
    content: &[ChapterBlock],
) -> Result<(), BrowseError> {
    doc.push(Block::Heading {
        level: 3,
        text: "Table of contents and contexts".to_string(),
        action: None,
    });

    for (idx, chapter) in content.iter().enumerate() {
        let mut card: Vec<Inline> = Vec::new();

        card.push(Inline::Link {
            label: format!("{}. {}", idx + 1, chapter.chapter),
            action: LinkAction::Search(format!("\\notes \\chapter \"{}\"", chapter.chapter)),
        });

        scene.event(chapter.xyz);
        scene.label(chapter.xyz, &chapter.chapter, 12.0, GREY);

        if let Some(group) = &chapter.context {
            for ctx in group {
                push_context_link(&mut card, "Context Set/Grouping:: ", ctx);
                scene.concept(ctx.xyz);
                scene.contains(chapter.xyz, ctx.xyz);
            }
        }

        if let Some(group) = &chapter.single {
            for ctx in group {
                push_context_link(&mut card, "Intentionally emph:: ", ctx);
                scene.thing(ctx.xyz);
                scene.near(chapter.xyz, ctx.xyz);
            }
        }

        if let Some(group) = &chapter.common {
            for ctx in group {
                push_context_link(&mut card, "Ambient context:: ", ctx);
                scene.thing(ctx.xyz);
                scene.near(chapter.xyz, ctx.xyz);
            }
        }

        doc.push(Block::Card(card));
    }

    Ok(())
}

fn push_context_link(card: &mut Vec<Inline>, prefix: &str, ctx: &Loc) {
    card.push(Inline::Break);
    card.push(Inline::Link {
        label: format!("{}{}", prefix, ctx.text),
        action: LinkAction::Search(format!("any \\context {}", ctx_splice(&ctx.text))),
    });
}
