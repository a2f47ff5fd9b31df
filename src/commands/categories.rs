use calgrid_core::category::CATEGORY_STYLES;

use crate::render::{paint, Render};

pub fn run() {
    for style in &CATEGORY_STYLES {
        println!(
            "  {}  {:<10} {}",
            paint(style.color, "●"),
            style.category.as_str(),
            style.category.render()
        );
    }
}
