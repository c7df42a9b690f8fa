use crate::error::BrowseError;
use crate::model::NodeEvent;
use crate::panel::ctx_splice;
use crate::panel::doc::{Block, Document, Inline, LinkAction};
use crate::panel::orbit::{plot_graphics, push_cone_shortcuts};
use crate::render::scene::Scene;

/// Story sequence view: a chapter heading, then one numbered card per
/// story item, with consecutive items linked up on the canvas.
pub fn build_sequence(
    doc: &mut Document,
    scene: &mut Scene,
    content: &[NodeEvent],
) -> Result<(), BrowseError> {
    let mut last_xyz = None;

    for (idx, story) in content.iter().enumerate() {
        if idx == 0 {
            doc.push(Block::Heading {
                level: 2,
                text: story.chap.clone(),
                action: None,
            });
            doc.push(Block::Line(vec![Inline::Text(format!(
                "In the context:   {}",
                story.context
            ))]));
        }

        show_sequence_item(doc, story, idx + 1)?;
        plot_graphics(scene, story, last_xyz);
        last_xyz = Some(story.xyz);
    }

    Ok(())
}

/// One story card: numbered text, progress mark, cone shortcuts and a
/// trailing context link. Satellite lines are left to the orbit view.
fn show_sequence_item(
    doc: &mut Document,
    event: &NodeEvent,
    counter: usize,
) -> Result<(), BrowseError> {
    let mut card: Vec<Inline> = Vec::new();

    let text = format!("{}. {}", counter, event.text);
    let action = LinkAction::Node(event.nptr);

    if text.contains('\n') {
        card.push(Inline::Pre { text, action });
    } else {
        card.push(Inline::NodeText {
            text: format!("{}    ", text),
            action,
            scale: 1.0,
        });
    }

    card.push(Inline::ProgressMark {
        nptr: event.nptr,
        chapcontext: format!("{}:{}", event.chap, event.context),
    });

    push_cone_shortcuts(&mut card, event);

    card.push(Inline::Italic(", . . . context ".to_string()));
    card.push(Inline::Link {
        label: format!("\"{}\"", event.context),
        action: LinkAction::Search(format!(
            "any \\context \"{}\"",
            ctx_splice(&event.context)
        )),
    });

    doc.push(Block::Card(card));
    Ok(())
}
