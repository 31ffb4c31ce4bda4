use crate::error::SourceError;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use voiddocs_core::chunk::{Element, PageOutline};

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref MAIN: Selector = Selector::parse("main").expect("valid selector");
    static ref BLOCKS: Selector = Selector::parse("h1, h2, h3, p").expect("valid selector");
}

fn text_of(el: ElementRef<'_>) -> String { el.text().collect::<String>().trim().to_string() }

/// Extract the document title and the heading/paragraph stream of the first `<main>`.
pub fn parse_page(html: &str) -> Result<PageOutline, SourceError> {
    let doc = Html::parse_document(html);
    let title = doc.select(&TITLE).next().map(text_of).filter(|t| !t.is_empty());
    let main = doc.select(&MAIN).next().ok_or(SourceError::NoMainContent)?;

    let elements = main
        .select(&BLOCKS)
        .filter_map(|el| {
            let text = text_of(el);
            match el.value().name() {
                "p" => Some(Element::Paragraph(text)),
                "h1" => Some(Element::Heading { level: 1, text }),
                "h2" => Some(Element::Heading { level: 2, text }),
                "h3" => Some(Element::Heading { level: 3, text }),
                _ => None,
            }
        })
        .collect();

    Ok(PageOutline { title, elements })
}
