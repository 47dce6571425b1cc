//! Home page composition.
//!
//! The home page is a markdown document listing every installed
//! chapter: title, abstract, and a launch link appended to each
//! abstract. A `{{chapters-abstract}}` placeholder marks where the
//! listing goes in the template.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use gallery_chapter::InstalledChapter;

/// Placeholder the chapter listing replaces in the home template.
pub const CHAPTERS_PLACEHOLDER: &str = "{{chapters-abstract}}";

/// Default home template used when the application ships none.
pub const DEFAULT_HOME_TEMPLATE: &str = "\
# {{title}}

{{description}}

{{chapters-abstract}}
";

/// Substitute `{{key}}` placeholders in a markdown source.
#[must_use]
pub fn apply_placeholders(src: &str, placeholders: &BTreeMap<String, String>) -> String {
    let mut out = src.to_owned();
    for (key, value) in placeholders {
        out = out.replace(key, value);
    }
    out
}

/// Append a working navigation link to a chapter abstract.
#[must_use]
pub fn patch_abstract_with_link(nav: &str, abstract_md: &str) -> String {
    format!("{abstract_md}\n👉 Launch it from [here](@nav{nav}).")
}

/// Compose the home page from a template and the chapter list.
///
/// Replaces [`CHAPTERS_PLACEHOLDER`] with the chapter listing; a
/// template without the placeholder gets the listing appended.
#[must_use]
pub fn compose_home_page(template: &str, chapters: &[InstalledChapter]) -> String {
    let mut listing = String::new();
    for chapter in chapters {
        let _ = writeln!(
            listing,
            "### {}\n\n{}\n",
            chapter.title(),
            patch_abstract_with_link(chapter.nav(), chapter.abstract_md())
        );
    }
    let listing = listing.trim_end();

    if template.contains(CHAPTERS_PLACEHOLDER) {
        template.replace(CHAPTERS_PLACEHOLDER, listing)
    } else {
        format!("{template}\n\n{listing}")
    }
}
