//! Debug utilities for inspecting render trees.

use std::fmt::Write;

use crate::render_node::{NodeFlags, RenderNode};

/// Formats the render tree as an indented outline, one node per line.
pub fn format_render_tree(root: &RenderNode) -> String {
    let mut output = String::new();
    output.push_str("=== Render Tree ===\n");
    format_node(root, 0, &mut output);
    output
}

fn format_node(node: &RenderNode, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(
        output,
        "{indent}[{}] {:?} at ({:.1}, {:.1}) size ({:.1}x{:.1})",
        node.key,
        node.kind,
        node.position.x,
        node.position.y,
        node.size.width,
        node.size.height
    );
    if let Some(run) = &node.text {
        let _ = write!(output, " \"{}\"", run.value);
    }
    let flags = flag_names(node.flags);
    if !flags.is_empty() {
        let _ = write!(output, " {{{}}}", flags.join(", "));
    }
    if node.handler.is_some() {
        output.push_str(" +handler");
    }
    output.push('\n');

    for child in &node.children {
        format_node(child, depth + 1, output);
    }
}

fn flag_names(flags: NodeFlags) -> Vec<&'static str> {
    flags
        .iter_names()
        .map(|(name, _)| match name {
            "CLIP" => "clip",
            "CAN_SCROLL" => "scroll",
            "SHADOW" => "shadow",
            "FOCUSABLE" => "focusable",
            other => other,
        })
        .collect()
}

/// Logs the render tree at debug level.
pub fn log_render_tree(root: &RenderNode) {
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("\n{}", format_render_tree(root));
    }
}

/// Logs a one-line summary of a pass: node count and root size.
pub fn log_pass_summary(root: &RenderNode) {
    log::debug!(
        "layout produced {} nodes, root {:.1}x{:.1}",
        root.count(),
        root.size.width,
        root.size.height
    );
}

#[cfg(test)]
#[path = "tests/debug_tests.rs"]
mod tests;
