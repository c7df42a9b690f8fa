use egui::Color32;

use crate::error::BrowseError;
use crate::model::classify::{is_image, is_math, is_url};
use crate::model::{is_mid_cone, Coords, NodeEvent, OrbitEdge, SType};
use crate::panel::doc::{truncate_chars, Block, Document, Inline, LinkAction};
use crate::panel::ctx_splice;
use crate::render::scene::Scene;

/// Satellite display order: property axes first, the neutral kind, then
/// containment, then causal order.
const LINK_ORDER: [SType; 7] = [
    SType::ExpressedBy,
    SType::Expresses,
    SType::Near,
    SType::ContainedBy,
    SType::Contains,
    SType::ComesFrom,
    SType::LeadsTo,
];

/// Cone jump shortcuts: label, arrow number, and the two orbit slots that
/// must both be populated for the node to sit mid-cone on that axis.
const CONE_SHORTCUTS: [(&str, i64, SType, SType); 4] = [
    ("[LT]", 1, SType::ComesFrom, SType::LeadsTo),
    ("[CN]", 2, SType::ContainedBy, SType::Contains),
    ("[EP]", 3, SType::ExpressedBy, SType::Expresses),
    ("[NR]", 0, SType::Near, SType::Near),
];

/// Default orbit view: one card and one canvas cluster per result node.
pub fn build_orbits(
    doc: &mut Document,
    scene: &mut Scene,
    content: &[NodeEvent],
) -> Result<(), BrowseError> {
    if content.is_empty() {
        doc.push(Block::Placeholder("No result".to_string()));
        return Ok(());
    }
    for event in content {
        show_node_event(doc, event, 0, "")?;
        plot_graphics(scene, event, None);
    }
    Ok(())
}

/// Full card for one node: title text, root helpline, progress mark, cone
/// shortcuts and the satellite link lines.
pub fn show_node_event(
    doc: &mut Document,
    event: &NodeEvent,
    counter: usize,
    skiparrow: &str,
) -> Result<(), BrowseError> {
    let mut card: Vec<Inline> = Vec::new();

    let text = if counter == 0 {
        format!("--> {}", event.text)
    } else {
        format!("{}. {}", counter, event.text)
    };
    let action = LinkAction::Node(event.nptr);

    if text.contains('\n') {
        card.push(Inline::Pre { text, action });
    } else if !is_math(&event.text) {
        card.push(Inline::NodeText {
            text: format!("{}...", truncate_chars(&event.text, 70)),
            action,
            scale: 1.0,
        });
        card.push(Inline::Small(text));
    } else {
        card.push(Inline::NodeText {
            text,
            action,
            scale: 1.0,
        });
    }

    if counter == 0 {
        card.push(Inline::Italic(format!(
            "with NPtr {}, in chapter ",
            event.nptr
        )));
        card.push(Inline::Link {
            label: format!("\"{}\"", event.chap),
            action: LinkAction::Search(format!("any \\chapter \"{}\"", event.chap)),
        });
        card.push(Inline::Italic(", context ".to_string()));
        card.push(Inline::Link {
            label: format!("\"{}\"", event.context),
            action: LinkAction::Search(format!(
                "any \\context \"{}\"",
                ctx_splice(&event.context)
            )),
        });
    }

    card.push(Inline::ProgressMark {
        nptr: event.nptr,
        chapcontext: format!("{}:{}", event.chap, event.context),
    });

    push_cone_shortcuts(&mut card, event);

    for kind in LINK_ORDER {
        add_link_orbits(&mut card, event, kind, skiparrow)?;
    }

    doc.push(Block::Card(card));
    Ok(())
}

/// Jump-to-cone links, one per relation axis the node sits mid-cone on.
pub fn push_cone_shortcuts(card: &mut Vec<Inline>, event: &NodeEvent) {
    for (label, arrow, bwd, fwd) in CONE_SHORTCUTS {
        if is_mid_cone(event.orbit(bwd), event.orbit(fwd)) {
            card.push(Inline::Link {
                label: label.to_string(),
                action: LinkAction::Search(format!(
                    "\\from {} \\arrow {} \\limit 30",
                    event.nptr, arrow
                )),
            });
        }
    }
}

/// Satellite lines for one orbit slot, filtered by the arrow to skip.
/// Property-expressed satellites whose focal text is an image reference
/// also get the image itself.
fn add_link_orbits(
    card: &mut Vec<Inline>,
    event: &NodeEvent,
    kind: SType,
    skiparrow: &str,
) -> Result<(), BrowseError> {
    for edge in event.orbit(kind) {
        if edge.arrow.as_deref() == Some(skiparrow) {
            continue;
        }
        card.push(Inline::Break);
        print_link(card, edge, &event.chap)?;
        if kind == SType::ExpressedBy && is_image(&event.text, edge.arrow_label()) {
            card.push(Inline::Image(event.text.clone()));
        }
    }
    Ok(())
}

/// One satellite line: hierarchy prefix, arrow label, then the linked
/// text in whichever shape it classifies as.
pub fn print_link(card: &mut Vec<Inline>, edge: &OrbitEdge, chap: &str) -> Result<(), BrowseError> {
    let kind = SType::from_index(edge.st_index).ok_or(BrowseError::Schema(edge.st_index))?;
    let arrow = edge.arrow_label();

    let mut prefix = " . .  \u{2560}\u{2550}\u{25b9}  ".to_string();
    for _ in 0..edge.radius {
        prefix = format!(" . . . . . {}", prefix);
    }
    if edge.radius == 2 {
        prefix = format!(" . . . . . . .  \u{2551} . . .  {}", prefix);
    }
    card.push(Inline::SatellitePrefix(prefix));

    card.push(Inline::ArrowLabel {
        label: format!(" ( {} )  ", arrow),
        kind,
    });

    if edge.text.contains('\n') {
        card.push(Inline::Pre {
            text: edge.text.clone(),
            action: LinkAction::Node(edge.dst),
        });
    } else {
        if is_url(&edge.text, arrow) {
            card.push(Inline::Url(edge.text.clone()));
        } else if is_image(&edge.text, arrow) {
            card.push(Inline::Image(edge.text.clone()));
            card.push(Inline::Text(edge.text.clone()));
        } else {
            let scale = if edge.text.chars().count() < 20 { 2.0 } else { 1.0 };
            card.push(Inline::NodeText {
                text: edge.text.clone(),
                action: LinkAction::Node(edge.dst),
                scale,
            });
        }
        card.push(Inline::ProgressMark {
            nptr: edge.dst,
            chapcontext: format!("{}:{}", chap, edge.ctx),
        });
    }

    if !edge.ctx.is_empty() {
        card.push(Inline::ContextHint(format!(" context hints: {}", edge.ctx)));
    }

    Ok(())
}

/// Canvas cluster for one node: its disc and label, an optional link-up
/// arrow from the previous node, and every orbit satellite with the arrow
/// direction following the relation sign.
pub fn plot_graphics(scene: &mut Scene, event: &NodeEvent, link_from: Option<Coords>) {
    let this = event.xyz;
    scene.event(this);
    scene.label(this, truncate_chars(&event.text, 25), 12.0, Color32::BLACK);

    if let Some(last) = link_from {
        scene.leads_to(last, this);
    }

    for edge in event.orbit(SType::LeadsTo) {
        scene.event(edge.xyz);
        scene.leads_to(edge.ooo, edge.xyz);
    }
    for edge in event.orbit(SType::ComesFrom) {
        scene.event(edge.xyz);
        scene.leads_to(edge.xyz, edge.ooo);
    }
    for edge in event.orbit(SType::Contains) {
        scene.thing(edge.xyz);
        scene.contains(edge.ooo, edge.xyz);
    }
    for edge in event.orbit(SType::ContainedBy) {
        scene.thing(edge.xyz);
        scene.contains(edge.xyz, edge.ooo);
    }
    for edge in event.orbit(SType::Expresses) {
        scene.concept(edge.xyz);
        scene.expresses(edge.ooo, edge.xyz);
    }
    for edge in event.orbit(SType::ExpressedBy) {
        scene.concept(edge.xyz);
        scene.expresses(edge.xyz, edge.ooo);
    }
    for edge in event.orbit(SType::Near) {
        scene.event(edge.xyz);
        scene.near(edge.ooo, edge.xyz);
    }
}
