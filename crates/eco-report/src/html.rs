//! XHTML rendering of a [`PrintDocument`].

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{
    CHECK_MARK, CHECKLIST_COLUMNS, CONCLUSION_HEADING, ChecklistRow, FOOTER, IDENTITY_HEADING,
    PHOTOS_HEADING, PrintDocument, REGULATION_HEADER, SignatureBlock, TITLE, UNSIGNED,
};

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

const STYLE: &str = "\
body { font-family: 'Times New Roman', serif; font-size: 11pt; margin: 2cm; }
.regulation { text-align: right; font-size: 8pt; }
.title { text-align: center; font-weight: bold; }
table { width: 100%; border-collapse: collapse; margin-bottom: 1em; }
td, th { border: 1px solid #000; padding: 4px; vertical-align: top; }
td.mark { text-align: center; width: 3em; }
tr.section td { font-weight: bold; background: #eee; }
.photos img { max-width: 45%; margin: 4px; }
.signatures { display: flex; justify-content: space-between; margin-top: 3em; }
.signature { width: 45%; text-align: center; }
.signature img { height: 5em; }
.unsigned { height: 5em; line-height: 5em; color: #999; }
.footer { margin-top: 3em; font-size: 8pt; font-style: italic; text-align: center; }
";

/// Render the document as a standalone XHTML page.
pub fn render_html(document: &PrintDocument) -> Result<String> {
    let mut buffer = Vec::new();
    write_html(&mut buffer, document)?;
    String::from_utf8(buffer).context("rendered document is not UTF-8")
}

/// Write the document as XHTML to `out`.
pub fn write_html<W: Write>(out: W, document: &PrintDocument) -> Result<()> {
    let mut xml = Writer::new_with_indent(out, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut html = BytesStart::new("html");
    html.push_attribute(("xmlns", XHTML_NS));
    html.push_attribute(("lang", "id"));
    xml.write_event(Event::Start(html))?;

    xml.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "UTF-8"));
    xml.write_event(Event::Empty(meta))?;
    write_text_element(&mut xml, "title", &format!("Berita Acara {}", document.record_id))?;
    write_text_element(&mut xml, "style", STYLE)?;
    xml.write_event(Event::End(BytesEnd::new("head")))?;

    let mut body = BytesStart::new("body");
    body.push_attribute(("id", "printable-ba"));
    xml.write_event(Event::Start(body))?;

    start_div(&mut xml, "regulation")?;
    for line in REGULATION_HEADER {
        write_text_element(&mut xml, "p", line)?;
    }
    end(&mut xml, "div")?;

    start_div(&mut xml, "title")?;
    for line in TITLE {
        write_text_element(&mut xml, "p", line)?;
    }
    write_text_element(&mut xml, "p", &document.number)?;
    end(&mut xml, "div")?;

    write_text_element(&mut xml, "p", &document.opening)?;

    write_identity(&mut xml, document)?;
    write_checklist(&mut xml, document)?;

    write_text_element(&mut xml, "h3", CONCLUSION_HEADING)?;
    write_text_element(&mut xml, "p", &document.conclusion)?;

    if !document.photos.is_empty() {
        start_div(&mut xml, "photos")?;
        write_text_element(&mut xml, "h3", PHOTOS_HEADING)?;
        for (index, photo) in document.photos.iter().enumerate() {
            xml.write_event(Event::Start(BytesStart::new("figure")))?;
            write_image(&mut xml, photo, &format!("Dokumentasi {index}"))?;
            write_text_element(&mut xml, "figcaption", &PrintDocument::photo_caption(index))?;
            end(&mut xml, "figure")?;
        }
        end(&mut xml, "div")?;
    }

    start_div(&mut xml, "signatures")?;
    for block in &document.signatures {
        write_signature(&mut xml, block)?;
    }
    end(&mut xml, "div")?;

    start_div(&mut xml, "footer")?;
    xml.write_event(Event::Text(BytesText::new(FOOTER)))?;
    end(&mut xml, "div")?;

    end(&mut xml, "body")?;
    end(&mut xml, "html")?;
    Ok(())
}

fn write_identity<W: Write>(xml: &mut Writer<W>, document: &PrintDocument) -> Result<()> {
    write_text_element(xml, "h3", IDENTITY_HEADING)?;
    xml.write_event(Event::Start(BytesStart::new("table")))?;
    xml.write_event(Event::Start(BytesStart::new("tbody")))?;
    for row in &document.identity {
        xml.write_event(Event::Start(BytesStart::new("tr")))?;
        write_text_element(xml, "td", row.label)?;
        write_text_element(xml, "td", &row.value)?;
        end(xml, "tr")?;
    }
    end(xml, "tbody")?;
    end(xml, "table")
}

fn write_checklist<W: Write>(xml: &mut Writer<W>, document: &PrintDocument) -> Result<()> {
    write_text_element(xml, "h3", &document.checklist_heading)?;
    xml.write_event(Event::Start(BytesStart::new("table")))?;

    xml.write_event(Event::Start(BytesStart::new("thead")))?;
    xml.write_event(Event::Start(BytesStart::new("tr")))?;
    for column in CHECKLIST_COLUMNS {
        write_text_element(xml, "th", column)?;
    }
    end(xml, "tr")?;
    end(xml, "thead")?;

    xml.write_event(Event::Start(BytesStart::new("tbody")))?;
    for row in &document.checklist {
        match row {
            ChecklistRow::Section { label } => {
                let mut tr = BytesStart::new("tr");
                tr.push_attribute(("class", "section"));
                xml.write_event(Event::Start(tr))?;
                let mut td = BytesStart::new("td");
                td.push_attribute(("colspan", "5"));
                xml.write_event(Event::Start(td))?;
                xml.write_event(Event::Text(BytesText::new(label)))?;
                end(xml, "td")?;
                end(xml, "tr")?;
            }
            ChecklistRow::Item {
                number,
                label,
                answer,
                remark,
            } => {
                xml.write_event(Event::Start(BytesStart::new("tr")))?;
                write_text_element(xml, "td", &number.to_string())?;
                write_text_element(xml, "td", label)?;
                write_mark(xml, *answer == Some(true))?;
                write_mark(xml, *answer == Some(false))?;
                write_text_element(xml, "td", remark)?;
                end(xml, "tr")?;
            }
        }
    }
    end(xml, "tbody")?;
    end(xml, "table")
}

fn write_mark<W: Write>(xml: &mut Writer<W>, checked: bool) -> Result<()> {
    let mut td = BytesStart::new("td");
    td.push_attribute(("class", "mark"));
    if checked {
        xml.write_event(Event::Start(td))?;
        xml.write_event(Event::Text(BytesText::new(CHECK_MARK)))?;
        end(xml, "td")
    } else {
        xml.write_event(Event::Empty(td))?;
        Ok(())
    }
}

fn write_signature<W: Write>(xml: &mut Writer<W>, block: &SignatureBlock) -> Result<()> {
    start_div(xml, "signature")?;
    write_text_element(xml, "p", block.party)?;
    write_text_element(xml, "p", block.role)?;
    match &block.image {
        Some(image) => write_image(xml, image, "Tanda tangan")?,
        None => {
            start_div(xml, "unsigned")?;
            xml.write_event(Event::Text(BytesText::new(UNSIGNED)))?;
            end(xml, "div")?;
        }
    }
    write_text_element(xml, "p", &block.name)?;
    write_text_element(xml, "p", &block.detail)?;
    end(xml, "div")
}

fn write_image<W: Write>(xml: &mut Writer<W>, src: &str, alt: &str) -> Result<()> {
    let mut img = BytesStart::new("img");
    img.push_attribute(("src", src));
    img.push_attribute(("alt", alt));
    xml.write_event(Event::Empty(img))?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn start_div<W: Write>(xml: &mut Writer<W>, class: &str) -> Result<()> {
    let mut div = BytesStart::new("div");
    div.push_attribute(("class", class));
    xml.write_event(Event::Start(div))?;
    Ok(())
}

fn end<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
