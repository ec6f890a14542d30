use crate::model::{ResolvedNode, SelectOption};

/// Marker prepended once per depth level in the selection list.
const DEPTH_MARKER: &str = "— ";

/// Flatten an already-built (unpruned) forest into the linear list backing
/// the "choose a parent" control.
///
/// Pre-order, depth-first, in the forest's established sibling order, so
/// the list reads in the same order the menu renders. Top-level entries
/// carry no prefix; each level below adds one marker.
pub fn flatten_for_selection(forest: &[ResolvedNode]) -> Vec<SelectOption> {
    let mut options = Vec::new();
    push_level(forest, "", &mut options);
    options
}

fn push_level(siblings: &[ResolvedNode], prefix: &str, out: &mut Vec<SelectOption>) {
    for node in siblings {
        out.push(SelectOption {
            id: node.id,
            label: format!("{prefix}{}", node.label),
        });
        let child_prefix = format!("{DEPTH_MARKER}{prefix}");
        push_level(&node.children, &child_prefix, out);
    }
}
