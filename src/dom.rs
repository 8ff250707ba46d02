use anyhow::Result;
use scraper::{ElementRef, Html, Node, Selector};
use std::thread;
use std::time::Duration;

use crate::classify::{non_empty, normalize_ws};

pub const WAIT_ATTEMPTS: u32 = 20;
pub const WAIT_DELAY: Duration = Duration::from_millis(500);

pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(selector = css, error = %e, "skipping invalid selector");
            None
        }
    }
}

pub fn text_of(el: ElementRef) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

pub fn own_text(el: ElementRef) -> String {
    let own: Vec<&str> = el
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect();
    normalize_ws(&own.join(" "))
}

// Skill tags truncate their visible text; the title attribute carries the full name.
pub fn tag_text(el: ElementRef) -> Option<String> {
    el.value()
        .attr("title")
        .and_then(non_empty)
        .or_else(|| non_empty(&text_of(el)))
}

pub fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn carries_class(el: ElementRef, class: &str) -> bool {
    has_class(el, class) || el.descendants().filter_map(ElementRef::wrap).any(|d| has_class(d, class))
}

pub fn inside_class(el: ElementRef, class: &str) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| has_class(a, class))
}

pub fn first_text(scope: ElementRef, candidates: &[String]) -> Option<String> {
    candidates.iter().find_map(|css| {
        let sel = selector(css)?;
        scope
            .select(&sel)
            .find_map(|el| non_empty(&text_of(el)))
    })
}

pub fn select_all<'a>(scope: ElementRef<'a>, candidates: &[String]) -> Vec<ElementRef<'a>> {
    for css in candidates {
        let Some(sel) = selector(css) else { continue };
        let found: Vec<_> = scope.select(&sel).collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

pub fn first_element<'a>(scope: ElementRef<'a>, candidates: &[String]) -> Option<ElementRef<'a>> {
    select_all(scope, candidates).into_iter().next()
}

pub fn any_match(doc: &Html, candidates: &[String]) -> bool {
    candidates
        .iter()
        .filter_map(|css| selector(css))
        .any(|sel| doc.select(&sel).next().is_some())
}

// Poll `load` until `ready` accepts the document. Fixed attempt budget and
// fixed delay; `None` once the budget is spent.
pub fn wait_for<L, R>(mut load: L, ready: R, attempts: u32, delay: Duration) -> Result<Option<Html>>
where
    L: FnMut() -> Result<Html>,
    R: Fn(&Html) -> bool,
{
    for attempt in 1..=attempts {
        let doc = load()?;
        if ready(&doc) {
            tracing::debug!(attempt, "resume markers present");
            return Ok(Some(doc));
        }
        tracing::debug!(attempt, attempts, "resume markers not present yet");
        if attempt < attempts {
            thread::sleep(delay);
        }
    }
    Ok(None)
}

pub fn cleaned_html(doc: &Html) -> String {
    let mut html = doc.root_element().html();
    for tag in ["script", "style", "noscript"] {
        html = strip_tag_blocks(&html, tag);
    }
    html = strip_comments(&html);
    let collapsed: Vec<&str> = html.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    collapsed.join(" ").replace("> <", "><")
}

fn strip_tag_blocks(html: &str, tag: &str) -> String {
    let open_pat = format!("<{}", tag.to_ascii_lowercase());
    let close_pat = format!("</{}>", tag.to_ascii_lowercase());
    let lower = html.to_ascii_lowercase();

    let mut out = String::new();
    let mut i = 0usize;
    while let Some(rel_start) = lower[i..].find(&open_pat) {
        let start = i + rel_start;
        let after_open = start + open_pat.len();
        let Some(rel_end) = lower[after_open..].find(&close_pat) else { break };
        out.push_str(&html[i..start]);
        i = after_open + rel_end + close_pat.len();
    }
    out.push_str(&html[i..]);
    out
}

fn strip_comments(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        let Some(len) = rest[start..].find("-->") else { break };
        out.push_str(&rest[..start]);
        rest = &rest[start + len + 3..];
    }
    out.push_str(rest);
    out
}
