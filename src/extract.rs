//! Streaming extraction of a work's content and metadata.
//!
//! Archived work pages carry the renderable chapters inside a
//! `div#chapters` block and everything a reader needs to know about the
//! work inside a `div.meta` block (title heading, author links, a
//! `dl.tags` tag list, a summary blockquote). This module walks the
//! tokenizer's event stream once, re-serializing the content block
//! verbatim and scraping the metadata block into a [`WorkMetadata`],
//! while dropping the surrounding site chrome.

use log::debug;
use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};

use crate::error::Result;
use crate::markup;
use crate::work::{DEFAULT_AUTHOR, Work, WorkMetadata};

/// Tag-group label whose entries are work statistics, not tags.
const STATS_LABEL: &str = "Stats:";

/// Which block of the document the extractor is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// Site chrome around the recognized blocks; nothing is kept.
    Chrome,
    /// Inside the metadata block (`div.meta`).
    Meta,
    /// Inside the content block (`div#chapters`).
    Content,
}

/// The field the shared text buffer is currently accumulating for.
/// At most one capture is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Idle,
    Summary,
    Title,
    Author,
    TagLabel,
    TagEntry,
}

struct Extractor {
    region: Region,
    /// Divs opened inside the metadata block beyond the one that
    /// established it, so the matching close is recognized. Never
    /// decremented below zero.
    meta_depth: usize,
    capture: Capture,
    in_tag_list: bool,
    /// Label of the current tag group, e.g. `"Fandoms:"`.
    tag_group: String,
    /// Shared field-capture buffer, cleared when a capture starts.
    buf: String,
    /// Re-serialized content, accumulated while inside the content
    /// block and handed over when the document body closes.
    body: String,
    out_body: String,
    metadata: WorkMetadata,
}

/// Run the extraction state machine over one complete document.
pub(crate) fn extract_work(html: &str) -> Result<Work> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.expand_empty_elements = false;
    // Archived pages are not always well formed; take whatever end tags
    // come and leave structure tracking to the state machine.
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut extractor = Extractor::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(e.name().as_ref());
                extractor.open_tag(&name, &e);
            }
            Ok(Event::End(e)) => {
                let name = tag_name(e.name().as_ref());
                extractor.close_tag(&name);
            }
            Ok(Event::Empty(e)) => {
                let name = tag_name(e.name().as_ref());
                extractor.void_tag(&name, &e);
            }
            Ok(Event::Text(e)) => extractor.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::CData(e)) => extractor.text(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::GeneralRef(e)) => extractor.reference(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::Comment(e)) => extractor.comment(&String::from_utf8_lossy(e.as_ref())),
            Ok(Event::Decl(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(extractor.finish())
}

impl Extractor {
    fn new() -> Self {
        Self {
            region: Region::Chrome,
            meta_depth: 0,
            capture: Capture::Idle,
            in_tag_list: false,
            tag_group: String::new(),
            buf: String::new(),
            body: String::new(),
            out_body: String::new(),
            metadata: WorkMetadata::default(),
        }
    }

    /// Start-tag rules, first match wins. Unmatched tags are appended
    /// to the body inside the content block and dropped elsewhere.
    fn open_tag(&mut self, name: &str, e: &BytesStart) {
        if name == "div" && attr_value(e, "class").as_deref() == Some("meta")
            && self.region != Region::Content
        {
            debug!("entered metadata block");
            self.region = Region::Meta;
            self.meta_depth = 0;
        } else if name == "div" && self.region == Region::Meta {
            // End tags carry no attributes, so count extra divs to find
            // the close that actually leaves the metadata block.
            self.meta_depth += 1;
            debug!("metadata depth is {}", self.meta_depth);
        } else if name == "blockquote"
            && self.region == Region::Meta
            && self.metadata.summary.is_empty()
        {
            self.begin_capture(Capture::Summary);
        } else if name == "div" && attr_value(e, "id").as_deref() == Some("chapters") {
            debug!("entered content block");
            self.region = Region::Content;
            self.body.clear();
        } else if name == "dl" && attr_value(e, "class").as_deref() == Some("tags") {
            self.in_tag_list = true;
        } else if name == "dt" && self.in_tag_list {
            self.begin_capture(Capture::TagLabel);
        } else if name == "dd" && self.in_tag_list {
            self.begin_capture(Capture::TagEntry);
        } else if name == "a" && self.capture == Capture::TagEntry {
            // Each link restarts the capture; only the most recent
            // anchor's text survives to the dd close.
            self.buf.clear();
        } else if name == "a" && attr_value(e, "rel").as_deref() == Some("author") {
            self.begin_capture(Capture::Author);
        } else if name == "h1" && self.region == Region::Meta {
            self.begin_capture(Capture::Title);
        } else if self.region == Region::Content {
            self.body.push_str(&markup::start_tag(name, &attrs_of(e)));
        }
    }

    /// End-tag rules, first match wins.
    fn close_tag(&mut self, name: &str) {
        if name == "div" && self.region == Region::Meta {
            if self.meta_depth == 0 {
                self.region = Region::Chrome;
                debug!("left metadata block");
                // Anonymous works have no byline at all.
                if self.metadata.authors.is_empty() {
                    self.metadata.authors.push(DEFAULT_AUTHOR.to_string());
                }
            } else {
                self.meta_depth -= 1;
                debug!("metadata depth is {}", self.meta_depth);
            }
        } else if name == "blockquote" && self.capture == Capture::Summary {
            self.capture = Capture::Idle;
            self.metadata.summary = self.buf.trim().to_string();
            debug!("set summary: {}", self.metadata.summary);
        } else if name == "body" {
            self.out_body = std::mem::take(&mut self.body);
            if self.region == Region::Content {
                self.region = Region::Chrome;
            }
        } else if name == "dl" && self.in_tag_list {
            self.in_tag_list = false;
        } else if name == "dt" && self.capture == Capture::TagLabel {
            self.capture = Capture::Idle;
            self.tag_group = self.buf.trim().to_string();
            debug!("tag group: {}", self.tag_group);
        } else if name == "dd" && self.capture == Capture::TagEntry {
            self.capture = Capture::Idle;
            if self.tag_group == STATS_LABEL {
                self.scan_stats();
            }
        } else if name == "a" && self.capture == Capture::TagEntry {
            if self.tag_group != STATS_LABEL {
                let text = markup::unescape_text(self.buf.trim());
                let tag = format!("{}{}", self.tag_group, text);
                debug!("adding tag: {tag}");
                self.metadata.tags.push(tag);
            }
        } else if name == "a" && self.capture == Capture::Author {
            self.capture = Capture::Idle;
            let author = self.buf.trim().to_string();
            debug!("adding author: {author}");
            self.metadata.authors.push(author);
        } else if name == "h1" && self.capture == Capture::Title {
            self.capture = Capture::Idle;
            self.metadata.title = self.buf.trim().to_string();
            debug!("set title: {}", self.metadata.title);
        } else if self.region == Region::Content {
            self.body.push_str(&markup::end_tag(name));
        }
    }

    /// Self-closing tags are kept only inside the content block.
    fn void_tag(&mut self, name: &str, e: &BytesStart) {
        if self.region == Region::Content {
            self.body.push_str(&markup::empty_tag(name, &attrs_of(e)));
        }
    }

    /// Raw text goes to whichever sink is active: the field-capture
    /// buffer during a capture, the body inside the content block, and
    /// nowhere otherwise.
    fn text(&mut self, data: &str) {
        if self.capture != Capture::Idle {
            self.buf.push_str(data);
        } else if self.region == Region::Content {
            self.body.push_str(data);
        }
    }

    /// Comments land in the active sink like text, re-wrapped, even
    /// inside field captures.
    fn comment(&mut self, data: &str) {
        self.text(&format!("<!--{data}-->"));
    }

    /// Entity and character references are kept in their source escape
    /// form (`&amp;`, `&#38;`, `&#x26;`).
    fn reference(&mut self, content: &str) {
        self.text(&format!("&{content};"));
    }

    fn begin_capture(&mut self, capture: Capture) {
        self.buf.clear();
        self.capture = capture;
    }

    /// The stats entry is a line-per-stat block; the `Published` line
    /// ends with the publish date.
    fn scan_stats(&mut self) {
        for line in self.buf.trim().lines() {
            if line.contains("Published") {
                if let Some(token) = line.split_whitespace().last() {
                    debug!("set date: {token}");
                    self.metadata.date = token.to_string();
                }
                break;
            }
        }
    }

    fn finish(self) -> Work {
        Work {
            body: self.out_body,
            metadata: self.metadata,
        }
    }
}

/// Element name, lowercased. Archived pages mix cases freely.
fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

/// Decoded value of one attribute, if present.
fn attr_value(e: &BytesStart, name: &str) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.as_ref().eq_ignore_ascii_case(name.as_bytes()) {
            Some(decode_attr_value(&attr))
        } else {
            None
        }
    })
}

/// All attributes in source order, names lowercased, values decoded.
fn attrs_of(e: &BytesStart) -> Vec<markup::Attr> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = tag_name(attr.key.as_ref());
            (key, Some(decode_attr_value(&attr)))
        })
        .collect()
}

fn decode_attr_value(attr: &Attribute<'_>) -> String {
    markup::unescape_text(&String::from_utf8_lossy(&attr.value))
}
