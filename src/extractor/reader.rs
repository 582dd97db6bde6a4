//! Reader mode: boilerplate stripped, links numbered inline in a flowing
//! transcript.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node, Selector};

use super::filters::{
    collapse_whitespace, heading_marker, is_navigation_text, should_include_image,
    should_include_link,
};
use super::full::image_record;
use super::locator::locate_reader_root;
use super::Extraction;
use crate::domain::{Image, Link};
use crate::resolver;

const MIN_TEXT_CHARS: usize = 10;
const MIN_PARAGRAPH_CHARS: usize = 20;

pub(super) fn extract_reader(
    doc: &Html,
    base_url: &str,
    reader_selectors: &[Selector],
    remove_selectors: &[Selector],
) -> Extraction {
    // Boilerplate removal happens on a copy; node ids carry over to it.
    let mut working = doc.clone();
    let root_id = locate_reader_root(&working, reader_selectors).id();
    strip_boilerplate(&mut working, root_id, remove_selectors);

    let mut walk = ReaderWalk::new(base_url);
    if let Some(root) = working.tree.get(root_id).and_then(ElementRef::wrap) {
        walk.children(root);
    }

    let images = collect_images(doc, base_url);
    let mut body = walk.out;
    if walk.inline_open {
        body.push_str("\n\n");
    }
    if !images.is_empty() {
        body.push_str("\n--- Images ---\n\n");
        for image in &images {
            body.push_str(&format!(
                "🖼️ [img{}] {}\n    {}\n\n",
                image.number,
                image.display_alt(),
                image.resolved_url
            ));
        }
    }

    Extraction {
        body,
        links: walk.links,
        images,
    }
}

fn strip_boilerplate(working: &mut Html, root_id: NodeId, remove_selectors: &[Selector]) {
    let doomed: Vec<NodeId> = match working.tree.get(root_id).and_then(ElementRef::wrap) {
        Some(root) => remove_selectors
            .iter()
            .flat_map(|selector| root.select(selector).map(|el| el.id()))
            .filter(|id| *id != root_id)
            .collect(),
        None => Vec::new(),
    };

    for id in doomed {
        if let Some(mut node) = working.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Images come from the whole original document, not the stripped copy.
fn collect_images(doc: &Html, base_url: &str) -> Vec<Image> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "img")
        .filter(|el| {
            let alt = el.value().attr("alt").unwrap_or_default();
            let src = el.value().attr("src").unwrap_or_default();
            should_include_image(alt, src)
        })
        .filter_map(|el| image_record(el, base_url))
        .enumerate()
        .map(|(i, mut image)| {
            image.number = i + 1;
            image
        })
        .collect()
}

struct ReaderWalk<'b> {
    base_url: &'b str,
    out: String,
    links: Vec<Link>,
    /// Standalone link text was written without a closing paragraph break
    inline_open: bool,
}

impl<'b> ReaderWalk<'b> {
    fn new(base_url: &'b str) -> Self {
        Self {
            base_url,
            out: String::new(),
            links: Vec::new(),
            inline_open: false,
        }
    }

    fn children(&mut self, el: ElementRef<'_>) {
        for child in el.children().filter_map(ElementRef::wrap) {
            self.visit(child);
        }
    }

    fn visit(&mut self, el: ElementRef<'_>) {
        let name = el.value().name();
        if let Some(marker) = heading_marker(name) {
            if self.passes_block_checks(el, MIN_TEXT_CHARS) {
                let text = self.inline_text(el);
                self.block(format!("{} {}", marker, text));
            }
            return;
        }

        match name {
            "p" => {
                let long_enough = self.passes_block_checks(el, MIN_PARAGRAPH_CHARS + 1);
                // Short paragraphs survive when they carry a usable link.
                let carries_link = self.passes_block_checks(el, MIN_TEXT_CHARS)
                    && el
                        .descendants()
                        .filter_map(ElementRef::wrap)
                        .any(|a| a.value().name() == "a" && self.accept(a).is_some());
                if long_enough || carries_link {
                    let text = self.inline_text(el);
                    self.block(text);
                }
            }
            "blockquote" => {
                if self.passes_block_checks(el, MIN_TEXT_CHARS) {
                    let text = self.inline_text(el);
                    self.block(format!("> {}", text));
                }
            }
            "ul" | "ol" => self.list(el),
            "a" => self.standalone_anchor(el),
            _ => self.children(el),
        }
    }

    fn list(&mut self, list: ElementRef<'_>) {
        if !self.passes_block_checks(list, MIN_TEXT_CHARS) {
            return;
        }

        self.close_inline();
        for item in list
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "li")
        {
            if !self.passes_block_checks(item, MIN_TEXT_CHARS + 1) {
                continue;
            }
            let text = self.inline_text(item);
            self.out.push_str(&format!("- {}\n", text));
        }
        self.out.push('\n');
    }

    fn standalone_anchor(&mut self, anchor: ElementRef<'_>) {
        let text = collapse_whitespace(&anchor.text().collect::<String>());
        if text.chars().count() < MIN_TEXT_CHARS {
            return;
        }
        if let Some(number) = self.number_link(anchor) {
            self.out.push_str(&format!("{} [{}] ", text, number));
            self.inline_open = true;
        }
    }

    /// Block-level length and navigation-word test on the element's text.
    fn passes_block_checks(&self, el: ElementRef<'_>, min_chars: usize) -> bool {
        let text = collapse_whitespace(&el.text().collect::<String>());
        text.chars().count() >= min_chars && !is_navigation_text(&text)
    }

    /// Render an element's text with `[n]` after every accepted anchor.
    fn inline_text(&mut self, el: ElementRef<'_>) -> String {
        let mut raw = String::new();
        self.inline_into(el, &mut raw);
        collapse_whitespace(&raw)
    }

    fn inline_into(&mut self, el: ElementRef<'_>, raw: &mut String) {
        for child in el.children() {
            match child.value() {
                Node::Text(text) => raw.push_str(text),
                Node::Element(element) => {
                    let Some(child_el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if element.name() == "a" {
                        raw.push_str(&child_el.text().collect::<String>());
                        if let Some(number) = self.number_link(child_el) {
                            raw.push_str(&format!(" [{}]", number));
                        }
                    } else {
                        self.inline_into(child_el, raw);
                    }
                }
                _ => {}
            }
        }
    }

    /// Filter an anchor without numbering it.
    fn accept(&self, anchor: ElementRef<'_>) -> Option<(String, String, String)> {
        let href = anchor.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }

        let text = collapse_whitespace(&anchor.text().collect::<String>());
        if !should_include_link(&text, href) {
            return None;
        }

        let resolved = resolver::resolve(self.base_url, href);
        if !resolver::is_navigable(&resolved) {
            return None;
        }

        Some((text, href.to_string(), resolved))
    }

    fn number_link(&mut self, anchor: ElementRef<'_>) -> Option<usize> {
        let (text, href, resolved_url) = self.accept(anchor)?;
        let number = self.links.len() + 1;
        self.links.push(Link {
            number,
            text: if text.is_empty() {
                resolved_url.clone()
            } else {
                text
            },
            href,
            is_image_target: resolver::is_image_url(&resolved_url),
            resolved_url,
        });
        Some(number)
    }

    fn block(&mut self, text: String) {
        self.close_inline();
        self.out.push_str(&text);
        self.out.push_str("\n\n");
    }

    fn close_inline(&mut self) {
        if self.inline_open {
            self.out.push_str("\n\n");
            self.inline_open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://site.example/page";

    fn run(html: &str) -> Extraction {
        let doc = Html::parse_document(html);
        let reader: Vec<Selector> = ["article", "main"]
            .iter()
            .map(|s| Selector::parse(s).unwrap())
            .collect();
        let remove: Vec<Selector> = ["nav", "footer", ".ad"]
            .iter()
            .map(|s| Selector::parse(s).unwrap())
            .collect();
        extract_reader(&doc, BASE, &reader, &remove)
    }

    #[test]
    fn test_inline_link_marker() {
        let out = run("<h1>Title</h1><p>Read <a href=\"/x\">more</a> here.</p>");

        assert!(out.body.contains("Read more [1] here."));
        assert_eq!(out.links.len(), 1);
        assert_eq!(out.links[0].resolved_url, "https://site.example/x");
    }

    #[test]
    fn test_short_text_and_navigation_are_dropped() {
        let out = run(concat!(
            "<h2>Tiny</h2>",
            "<h2>A heading that is long enough</h2>",
            "<p>Short one.</p>",
            "<p>Please subscribe to our newsletter for updates.</p>",
            "<p>This paragraph is comfortably over the limit.</p>"
        ));

        assert_eq!(
            out.body,
            "## A heading that is long enough\n\nThis paragraph is comfortably over the limit.\n\n"
        );
    }

    #[test]
    fn test_boilerplate_removed_from_working_copy_only() {
        let html = concat!(
            "<body><article>",
            "<nav><a href=\"/elsewhere\">Elsewhere entirely</a></nav>",
            "<p>The article body is what we want to read.</p>",
            "<div class=\"ad\"><p>Buy this wonderful product today please.</p></div>",
            "</article><footer><img src=\"/team.jpg\" alt=\"Team\"></footer></body>"
        );
        let doc = Html::parse_document(html);
        let reader = vec![Selector::parse("article").unwrap()];
        let remove = vec![
            Selector::parse("nav").unwrap(),
            Selector::parse(".ad").unwrap(),
        ];
        let out = extract_reader(&doc, BASE, &reader, &remove);

        assert_eq!(out.body.matches("The article body").count(), 1);
        assert!(!out.body.contains("Buy this"));
        assert!(out.links.is_empty());

        // Images come from the original, unstripped document
        assert_eq!(out.images.len(), 1);
        assert!(out.body.contains("--- Images ---"));

        let nav = Selector::parse("nav").unwrap();
        assert_eq!(doc.select(&nav).count(), 1);
    }

    #[test]
    fn test_skip_patterns_reject_links() {
        let out = run(concat!(
            "<p>Reach us by <a href=\"mailto:hi@site.example\">electronic mail</a> ",
            "or read <a href=\"/guide\">the guide</a> or the <a href=\"/about/team\">team</a> ",
            "or jump to <a href=\"#top\">the top</a>.</p>"
        ));

        assert_eq!(out.links.len(), 1);
        assert_eq!(out.links[0].text, "the guide");
        assert!(out.body.contains("read the guide [1] or the team or jump"));
    }

    #[test]
    fn test_lists_render_items_and_blank_line() {
        let out = run(concat!(
            "<ul><li>First list item here</li><li>tiny</li>",
            "<li>Second item, see <a href=\"/docs\">docs</a></li></ul>",
            "<p>Paragraph after the list is long.</p>"
        ));

        assert_eq!(
            out.body,
            concat!(
                "- First list item here\n",
                "- Second item, see docs [1]\n",
                "\n",
                "Paragraph after the list is long.\n\n"
            )
        );
    }

    #[test]
    fn test_standalone_anchor_and_blockquote() {
        let out = run(concat!(
            "<div><a href=\"/story\">A standalone story link</a></div>",
            "<blockquote>Quoted words from someone wise.</blockquote>"
        ));

        assert_eq!(
            out.body,
            "A standalone story link [1] \n\n> Quoted words from someone wise.\n\n"
        );
    }

    #[test]
    fn test_image_filter_and_numbering() {
        let out = run(concat!(
            "<p>Some article paragraph text long enough.</p>",
            "<img src=\"/static/logo.png\" alt=\"Site\">",
            "<img src=\"/photos/lake.jpg\" alt=\"Lake\">",
            "<img src=\"/photos/hill.webp\">"
        ));

        assert_eq!(out.images.len(), 2);
        assert_eq!(out.images[0].alt_text, "Lake");
        assert_eq!(out.images[1].number, 2);
        assert!(out.body.contains("🖼️ [img1] Lake\n    https://site.example/photos/lake.jpg\n\n"));
        assert!(out.body.contains("🖼️ [img2] No description\n"));
    }

    #[test]
    fn test_numbering_is_repeatable() {
        let html = "<p>One <a href=\"/a\">alpha link</a> two <a href=\"/b\">beta link</a> end.</p>";
        assert_eq!(run(html).links, run(html).links);
    }
}
