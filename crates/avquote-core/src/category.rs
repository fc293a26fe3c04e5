//! # Category Ordering
//!
//! Display grouping for BOQ lines. Pure presentation: nothing here feeds
//! back into [`crate::pricing`], so reordering can never change a total.
//!
//! ```text
//! input order:   Speakers, Display, Custom Widget, Display, Mounts
//!                    │
//!                    ▼  group by label (first appearance wins)
//! groups:        Speakers[1], Display[2], Custom Widget[1], Mounts[1]
//!                    │
//!                    ▼  stable sort by CATEGORY_ORDER, unknown last
//! display:       Display[2], Speakers[1], Mounts[1], Custom Widget[1]
//! ```

/// Label used for items with a blank category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Fixed display order of known categories.
pub const CATEGORY_ORDER: &[&str] = &[
    "Display",
    "Video Conferencing & Cameras",
    "Video Distribution & Switching",
    "Audio - Microphones",
    "Audio - DSP & Amplification",
    "Audio - Speakers",
    "Control System & Environmental",
    "Acoustic Treatment",
    "Cabling & Infrastructure",
    "Mounts & Racks",
    "Accessories & Services",
];

/// Maps a raw category label to the label shown in the document.
pub fn display_category(category: &str) -> &str {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED
    } else {
        trimmed
    }
}

/// Position in [`CATEGORY_ORDER`]; unknown labels share the last slot.
pub fn category_priority(category: &str) -> usize {
    CATEGORY_ORDER
        .iter()
        .position(|known| *known == category)
        .unwrap_or(CATEGORY_ORDER.len())
}

/// Items sharing one display category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a, T> {
    pub name: String,
    pub items: Vec<&'a T>,
}

/// Groups `items` by category and orders the groups for display.
///
/// Items keep their input order inside a group. Groups are stably sorted by
/// [`category_priority`], so unknown categories stay in first-seen order
/// after all known ones.
pub fn group_by_category<'a, T, F>(items: &'a [T], category_of: F) -> Vec<CategoryGroup<'a, T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: Vec<CategoryGroup<'a, T>> = Vec::new();

    for item in items {
        let name = display_category(category_of(item));
        match groups.iter_mut().find(|group| group.name == name) {
            Some(group) => group.items.push(item),
            None => groups.push(CategoryGroup {
                name: name.to_string(),
                items: vec![item],
            }),
        }
    }

    groups.sort_by_key(|group| category_priority(&group.name));
    groups
}
