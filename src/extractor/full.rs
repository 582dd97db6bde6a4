//! Full mode: unmodified prose plus a separate numbered link and image index.

use scraper::ElementRef;

use super::filters::{collapse_whitespace, heading_marker};
use super::Extraction;
use crate::domain::{Image, Link, MediaType};
use crate::resolver;

pub(super) fn extract_full(root: ElementRef<'_>, base_url: &str) -> Extraction {
    let images = collect_images(root, base_url);
    let links = collect_links(root, base_url);

    let mut body = String::new();
    for el in root.descendants().filter_map(ElementRef::wrap) {
        let name = el.value().name();
        let marker = heading_marker(name);
        if marker.is_none() && name != "p" {
            continue;
        }

        let text = collapse_whitespace(&el.text().collect::<String>());
        if text.is_empty() {
            continue;
        }

        match marker {
            Some(marker) => body.push_str(&format!("{} {}\n\n", marker, text)),
            None => body.push_str(&format!("{}\n\n", text)),
        }
    }

    if !images.is_empty() {
        body.push_str("\n--- 🖼️ Images ---\n\n");
        for image in &images {
            let indicator = if image.is_linked { "🔗🖼️" } else { "🖼️" };
            body.push_str(&format!(
                "{} [img{}] {}\n    {}\n\n",
                indicator,
                image.number,
                image.display_alt(),
                image.resolved_url
            ));
        }
    }

    Extraction {
        body,
        links,
        images,
    }
}

fn collect_images(root: ElementRef<'_>, base_url: &str) -> Vec<Image> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "img")
        .filter_map(|el| image_record(el, base_url))
        .enumerate()
        .map(|(i, mut image)| {
            image.number = i + 1;
            image
        })
        .collect()
}

fn collect_links(root: ElementRef<'_>, base_url: &str) -> Vec<Link> {
    let mut links = Vec::new();

    for anchor in root
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
    {
        let Some(href) = anchor.value().attr("href").filter(|h| !h.trim().is_empty()) else {
            continue;
        };

        let resolved_url = resolver::resolve(base_url, href.trim());
        if !resolver::is_navigable(&resolved_url) {
            continue;
        }

        links.push(Link {
            number: links.len() + 1,
            text: anchor_text(anchor, href),
            href: href.to_string(),
            is_image_target: resolver::is_image_url(&resolved_url),
            resolved_url,
        });
    }

    links
}

/// Own text, else the alt text of a contained image, else the raw href.
fn anchor_text(anchor: ElementRef<'_>, href: &str) -> String {
    let text = collapse_whitespace(&anchor.text().collect::<String>());
    if !text.is_empty() {
        return text;
    }

    let image = anchor
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "img");

    match image.and_then(|img| img.value().attr("alt")) {
        Some(alt) if !alt.trim().is_empty() => format!("🖼️ {}", alt.trim()),
        _ if image.is_some() => "🖼️ Image link".to_string(),
        _ => href.to_string(),
    }
}

/// Build an unnumbered image record for an `img` element with a usable `src`.
pub(super) fn image_record(img: ElementRef<'_>, base_url: &str) -> Option<Image> {
    let src = resolver::clean_url(img.value().attr("src")?);
    if src.is_empty() {
        return None;
    }

    let enclosing = img
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a");
    let link_url = enclosing
        .and_then(|a| a.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .map(|href| resolver::resolve(base_url, href.trim()))
        .filter(|url| resolver::is_navigable(url));

    Some(Image {
        number: 0,
        resolved_url: resolver::resolve(base_url, &src),
        alt_text: img.value().attr("alt").unwrap_or_default().trim().to_string(),
        media_type: MediaType::from_url(&src),
        is_linked: enclosing.is_some(),
        link_url,
    })
}
