use crate::error::BrowseError;
use crate::panel::doc::{Block, Document, Inline};
use crate::render::scene::Scene;
use crate::wire::ArrowSpec;

/// Arrow directory: each definition fans out as a forward/backward arrow
/// pair on the canvas, with the pointers and names listed below.
pub fn build_arrows(
    doc: &mut Document,
    scene: &mut Scene,
    content: &[ArrowSpec],
) -> Result<(), BrowseError> {
    doc.push(Block::Heading {
        level: 3,
        text: "Arrows".to_string(),
        action: None,
    });

    if content.is_empty() {
        return Ok(());
    }

    let angle_increment = std::f64::consts::PI / content.len() as f64;
    let mut angle = 0.0;

    for arrow in content {
        if !(-3..=3).contains(&arrow.ast_type) {
            return Err(BrowseError::Schema(arrow.ast_type));
        }
        scene.arrow_pair(angle, arrow.ast_type, &arrow.long, &arrow.inv_l);
        angle += angle_increment;

        doc.push(Block::Line(vec![Inline::Text(format!(
            "ArrowPtr = {} (STtype: {})",
            arrow.arr_ptr, arrow.ast_type
        ))]));
        doc.push(Block::Line(vec![Inline::Text(format!(
            "Long name: ({})",
            arrow.long
        ))]));
        doc.push(Block::Line(vec![Inline::Text(format!(
            "Short alias: ({})",
            arrow.short
        ))]));

        doc.push(Block::Line(vec![Inline::Text(format!(
            "ArrowPtr = {}. (STtype: {})",
            arrow.inv_ptr, arrow.ist_type
        ))]));
        doc.push(Block::Line(vec![Inline::Text(format!(
            "Short: {}",
            arrow.inv_s
        ))]));
        doc.push(Block::Line(vec![Inline::Text(format!(
            "Long: {}",
            arrow.inv_l
        ))]));
    }

    Ok(())
}
