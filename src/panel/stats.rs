use egui::Color32;

use crate::error::BrowseError;
use crate::panel::doc::{Block, Document, Inline, LinkAction};
use crate::render::scene::Scene;
use crate::render::GREY;
use crate::wire::SectionStat;

/// Most recent visit considered "hot".
const HOTTEST_SECS: f64 = 100.0;
/// A week-old visit is fully cold.
const COLDEST_SECS: f64 = 3600.0 * 24.0 * 7.0 - HOTTEST_SECS;
/// Hue span of the heat ramp, warm red down to cold blue.
const HUE_SPAN: f64 = 230.0;

/// Recency/frequency colour for an activity chip. Hue tracks how long
/// ago the item was seen, lightness rises with visit count.
pub fn heat_colour(freq: f64, pdelta: f64, saturation: f64) -> Color32 {
    let hue = (((pdelta - HOTTEST_SECS) / COLDEST_SECS) * HUE_SPAN).clamp(0.0, HUE_SPAN);
    let lightness = (40.0 + freq * 2.0).min(100.0);
    hsl_to_rgb(hue, saturation, lightness)
}

/// Convert hue (degrees), saturation and lightness (percent) to RGB.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Color32 {
    let s = s / 100.0;
    let l = l / 100.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(to8(r1), to8(g1), to8(b1))
}

/// Activity tracker: one card per section, with heat-coloured chips for
/// the individual visits recorded under it.
pub fn build_stats(
    doc: &mut Document,
    scene: &mut Scene,
    content: &[SectionStat],
) -> Result<(), BrowseError> {
    doc.push(Block::Heading {
        level: 3,
        text: "Progress tracker".to_string(),
        action: None,
    });

    let mut counter = 0;
    let mut last_section = String::new();
    let mut card: Option<Vec<Inline>> = None;

    for stat in content {
        if stat.section != last_section || card.is_none() {
            counter += 1;
            last_section = stat.section.clone();
            if let Some(buf) = card.take() {
                doc.push(Block::Card(buf));
            }

            let buf = vec![
                Inline::Link {
                    label: format!("{}. {}", counter, stat.section),
                    action: LinkAction::Search(format!("\\notes \"{}\"", stat.section)),
                },
                Inline::Break,
                Inline::Italic(format!("Last viewed at {}", stat.last)),
                Inline::Italic(format!("  total viewing count = {}", stat.freq)),
                Inline::Break,
            ];
            card = Some(buf);

            scene.concept(stat.xyz);
            scene.label(stat.xyz, &stat.section, 12.0, GREY);
        } else if let Some(buf) = card.as_mut() {
            let (label, action) = if stat.nptr.class < 0 {
                (
                    "browse".to_string(),
                    LinkAction::Search(format!("any \\chapter \"{}\"", stat.section)),
                )
            } else {
                (
                    stat.nptr.to_string(),
                    LinkAction::Search(stat.nptr.to_string()),
                )
            };
            buf.push(Inline::HeatChip {
                label,
                action,
                fg: heat_colour(stat.freq, stat.pdelta, 70.0),
                bg: heat_colour(stat.freq, stat.pdelta, 100.0),
            });
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
    use crate::model::{Coords, NodePtr};

    fn stat(section: &str, class: i64, cptr: i64) -> SectionStat {
        SectionStat {
            section: section.to_string(),
            last: "2026-08-29".to_string(),
            pdelta: 500.0,
            ndelta: 0.0,
            freq: 3.0,
            nptr: NodePtr { class, cptr },
            xyz: Coords::new(0.2, 0.2, 0.0),
        }
    }

    #[test]
    fn recent_visits_are_warmer_than_old_ones() {
        let recent = heat_colour(1.0, 200.0, 100.0);
        let old = heat_colour(1.0, 500000.0, 100.0);
        // Warm end of the ramp is red-heavy, cold end blue-heavy.
        assert!(recent.r() > recent.b());
        assert!(old.b() > old.r());
    }

    #[test]
    fn heat_hue_clamps_at_both_ends() {
        assert_eq!(heat_colour(1.0, 0.0, 70.0), heat_colour(1.0, 100.0, 70.0));
        assert_eq!(
            heat_colour(1.0, 1e9, 70.0),
            heat_colour(1.0, 3600.0 * 24.0 * 7.0, 70.0)
        );
    }

    #[test]
    fn frequency_lightens_without_overflowing() {
        let light = heat_colour(50.0, 200.0, 70.0);
        let lighter = heat_colour(500.0, 200.0, 70.0);
        // At freq 30 and beyond lightness caps at white-ish.
        assert_eq!(lighter, heat_colour(30.0, 200.0, 70.0));
        let dim = heat_colour(0.0, 200.0, 70.0);
        assert!(light.r() as u32 + light.g() as u32 >= dim.r() as u32 + dim.g() as u32);
    }

    #[test]
    fn sections_group_into_cards_with_chips() {
        let content = vec![
            stat("alpha", -1, 0),
            stat("alpha", 2, 5),
            stat("alpha", -1, 0),
            stat("beta", 1, 1),
        ];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        build_stats(&mut doc, &mut scene, &content).unwrap();

        let cards: Vec<_> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Card(inlines) => Some(inlines),
                _ => None,
            })
            .collect();
        assert_eq!(cards.len(), 2);

        let chips: Vec<_> = cards[0]
            .iter()
            .filter_map(|i| match i {
                Inline::HeatChip { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(chips, vec!["(2,5)", "browse"]);
        assert!(cards[1].iter().all(|i| !matches!(i, Inline::HeatChip { .. })));
    }

    #[test]
    fn unresolved_chips_browse_their_chapter() {
        let content = vec![stat("alpha", 1, 1), stat("alpha", -1, 0)];
        let mut doc = Document::new();
        let mut scene = Scene::new();
        build_stats(&mut doc, &mut scene, &content).unwrap();
        assert!(doc.blocks.iter().any(|b| matches!(
            b,
            Block::Card(inlines) if inlines.iter().any(|i| matches!(
                i,
                Inline::HeatChip { action: LinkAction::Search(q), .. }
                    if q == "any \\chapter \"alpha\""
            ))
        )));
    }
}
