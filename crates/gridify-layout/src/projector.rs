#![forbid(unsafe_code)]

//! Code Projector: markup and stylesheet text mirroring the current layout.
//!
//! Both projections are pure functions of `(configuration, items)`. Items
//! appear in store insertion order and are keyed by their 1-based position
//! (`item-1`, `item-2`, ...), never by their identifier, so the output is
//! stable across sessions.
//!
//! ```text
//! <div class="grid-container">
//!   <div class="grid-item item-1">Item 1</div>
//! </div>
//! ```

use std::fmt::Write as _;

use gridify_core::GridConfiguration;
use serde::Serialize;

use crate::item::GridItem;

/// Class carried by the wrapper element.
pub const CONTAINER_CLASS: &str = "grid-container";

/// Class shared by every child element.
pub const ITEM_CLASS: &str = "grid-item";

/// Both text outputs, ready for a clipboard/export surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeProjection {
    pub markup: String,
    pub stylesheet: String,
}

/// Positional class for the item at zero-based `index`.
#[must_use]
pub fn item_class(index: usize) -> String {
    format!("item-{}", index + 1)
}

/// Project both outputs.
#[must_use]
pub fn project(config: &GridConfiguration, items: &[GridItem]) -> CodeProjection {
    CodeProjection {
        markup: project_markup(items),
        stylesheet: project_stylesheet(config, items),
    }
}

/// Wrapper element with one child per item.
#[must_use]
pub fn project_markup(items: &[GridItem]) -> String {
    let mut out = String::with_capacity(64 + items.len() * 64);
    // Writing into a String cannot fail.
    let _ = writeln!(out, r#"<div class="{CONTAINER_CLASS}">"#);
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"  <div class="{ITEM_CLASS} {}">{}</div>"#,
            item_class(index),
            escape_text(&item.label)
        );
    }
    out.push_str("</div>\n");
    out
}

/// Container rule followed by one rule per item, separated by blank lines.
#[must_use]
pub fn project_stylesheet(config: &GridConfiguration, items: &[GridItem]) -> String {
    let mut out = String::with_capacity(160 + items.len() * 200);
    let _ = write!(
        out,
        ".{CONTAINER_CLASS} {{\n  display: grid;\n  grid-template-columns: repeat({}, 1fr);\n  grid-template-rows: repeat({}, 1fr);\n  gap: {}px;\n}}\n",
        config.columns(),
        config.rows(),
        config.gap()
    );
    for (index, item) in items.iter().enumerate() {
        out.push('\n');
        out.push_str(&item_rule(index, item));
    }
    out
}

fn item_rule(index: usize, item: &GridItem) -> String {
    format!(
        ".{ITEM_CLASS}.{} {{\n  grid-column: {} / {};\n  grid-row: {} / {};\n  background-color: {};\n  display: flex;\n  align-items: center;\n  justify-content: center;\n}}\n",
        item_class(index),
        item.col_start(),
        item.col_end(),
        item.row_start(),
        item.row_end(),
        item.color
    )
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
