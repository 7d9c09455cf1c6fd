//! Textual inlining of CSS/JS assets into a prototype document.
//!
//! Collect-and-append: every `.css` asset goes into one `<style>` block in the
//! head, every `.js` asset into `<script>` blocks before the body closes. The
//! `<link>`/`<script src>` tags that pointed at an inlined asset are removed;
//! references to anything else are left as written.
//!
//! Matching is pattern based, not a parse. It accepts single or double quotes,
//! an optional `./` prefix, and both `<script src=.../>` and
//! `<script src=...></script>`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use regex::{Captures, Regex};
use tracing::warn;

/// Produce a self-contained document from `document` and its sibling `assets`
/// (file name → text). Assets that are neither CSS nor JS are ignored.
pub fn inline_assets(document: &str, assets: &BTreeMap<String, String>) -> String {
    let mut styles: Vec<(&str, &str)> = Vec::new();
    let mut scripts: Vec<(&str, &str)> = Vec::new();

    for (name, content) in assets {
        match extension(name).as_deref() {
            Some("css") => styles.push((name.as_str(), content.as_str())),
            Some("js") => scripts.push((name.as_str(), content.as_str())),
            _ => {}
        }
    }

    scripts.sort_by(|a, b| script_order(a.0, b.0));

    let mut html = document.to_string();

    if !styles.is_empty() {
        for (name, _) in &styles {
            html = strip_stylesheet_links(&html, name);
        }
        let css: String = styles
            .iter()
            .map(|(name, content)| format!("\n/* {} */\n{}\n", name, content))
            .collect();
        html = insert_styles(&html, &css);
    }

    if !scripts.is_empty() {
        for (name, _) in &scripts {
            html = strip_script_tags(&html, name);
        }
        let js = scripts
            .iter()
            .map(|(name, content)| format!("<!-- {} --><script>{}</script>", name, content))
            .collect::<Vec<_>>()
            .join("\n");
        html = insert_scripts(&html, &js);
    }

    html
}

/// Data files load before the code that reads them.
fn script_order(a: &str, b: &str) -> Ordering {
    (!a.contains("data"), a).cmp(&(!b.contains("data"), b))
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Quoted attribute value naming exactly `name`, opened and closed by the
/// same quote character.
fn quoted_reference(name: &str) -> String {
    let name = regex::escape(name);
    format!(r#"(?:"(?:\./)?{name}"|'(?:\./)?{name}')"#)
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Skipping reference pattern {}: {}", pattern, e);
            None
        }
    }
}

fn strip_stylesheet_links(html: &str, name: &str) -> String {
    let pattern = format!(r#"(?i)<link\b[^>]*\shref\s*=\s*{}[^>]*>"#, quoted_reference(name));
    let Some(re) = compile(&pattern) else {
        return html.to_string();
    };

    re.replace_all(html, |caps: &Captures| {
        let tag = &caps[0];
        if tag.to_ascii_lowercase().contains("stylesheet") {
            String::new()
        } else {
            tag.to_string()
        }
    })
    .into_owned()
}

fn strip_script_tags(html: &str, name: &str) -> String {
    let pattern = format!(
        r#"(?is)<script\b[^>]*?\ssrc\s*=\s*{}[^>]*?(?:/>|>\s*</script\s*>)"#,
        quoted_reference(name)
    );
    let Some(re) = compile(&pattern) else {
        return html.to_string();
    };

    re.replace_all(html, "").into_owned()
}

fn insert_styles(html: &str, css: &str) -> String {
    let style = format!("<style>{}</style>", css);
    let lower = html.to_ascii_lowercase();

    if let Some(idx) = lower.find("</head>") {
        splice(html, idx, &style)
    } else if let Some(idx) = lower.find("<body") {
        splice(html, idx, &format!("<head>{}</head>", style))
    } else {
        format!("{}{}", style, html)
    }
}

fn insert_scripts(html: &str, js: &str) -> String {
    let block = format!("{}\n", js);
    let lower = html.to_ascii_lowercase();

    match lower.rfind("</body>").or_else(|| lower.rfind("</html>")) {
        Some(idx) => splice(html, idx, &block),
        None => format!("{}{}", html, block),
    }
}

fn splice(html: &str, idx: usize, insert: &str) -> String {
    let mut out = String::with_capacity(html.len() + insert.len());
    out.push_str(&html[..idx]);
    out.push_str(insert);
    out.push_str(&html[idx..]);
    out
}
