//! Markdown to HTML conversion for page content.
//!
//! Code fences are pulled out of the event stream and rendered as copyable
//! snippets. Everything else goes through pulldown-cmark's HTML writer.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use serde::Serialize;

/// Language assumed for fences without an info string.
pub const DEFAULT_SNIPPET_LANGUAGE: &str = "bash";

/// `key="value"`, `key='value'` or `key=value` pairs in a fence info string.
static FENCE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w-]*)=(?:"([^"]*)"|'([^']*)'|(\S+))"#).unwrap()
});

/// Copyable code snippet extracted from a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snippet {
    /// Position of the snippet within its page.
    pub index: usize,
    /// Language label.
    pub language: String,
    /// Optional caption shown above the code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw code, exactly what gets copied.
    pub code: String,
}

/// Rendered markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    /// HTML body.
    pub html: String,
    /// Snippets in document order.
    pub snippets: Vec<Snippet>,
}

/// Split a fence info string into language and attributes.
///
/// `bash title="Install Node.js with nvm"` yields `("bash", {title: ...})`.
/// The first token is the language unless it is itself an attribute.
pub(crate) fn parse_fence_info(info: &str) -> (Option<String>, HashMap<String, String>) {
    let info = info.trim();
    let language = info
        .split_whitespace()
        .next()
        .filter(|token| !token.contains('='))
        .map(str::to_owned);

    let attrs = FENCE_ATTR_RE
        .captures_iter(info)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_owned();
            let value = caps.get(2).or(caps.get(3)).or(caps.get(4))?.as_str();
            Some((key, value.to_owned()))
        })
        .collect();

    (language, attrs)
}

/// Render one snippet as HTML.
///
/// `copied` selects the button label; a freshly rendered snippet is never copied.
pub fn render_snippet(snippet: &Snippet, copied: bool, out: &mut String) {
    let index = snippet.index;
    let language = encode_text(&snippet.language);

    out.push_str(r#"<div class="snippet">"#);
    if let Some(title) = &snippet.title {
        write!(
            out,
            r#"<div class="snippet-header"><span>{}</span><span class="snippet-lang">{language}</span></div>"#,
            encode_text(title)
        )
        .unwrap();
    }

    let pre_class = if snippet.title.is_some() {
        "snippet-pre titled"
    } else {
        "snippet-pre"
    };
    let (state, label) = if copied {
        ("true", "Copied")
    } else {
        ("false", "Copy")
    };

    write!(
        out,
        r#"<div class="snippet-body"><pre class="{pre_class}"><code class="language-{}">{}</code></pre><button type="button" class="snippet-copy" data-snippet="{index}" data-copied="{state}"><span class="snippet-copy-label">{label}</span><span class="sr-only">Copy code</span></button></div></div>"#,
        encode_double_quoted_attribute(&snippet.language),
        encode_text(&snippet.code),
    )
    .unwrap();
}

/// Convert markdown to HTML, collecting code fences as snippets.
pub fn render_markdown(source: &str) -> RenderedMarkdown {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;

    let mut snippets = Vec::new();
    let mut events = Vec::new();
    let mut pending: Option<(Option<String>, HashMap<String, String>, String)> = None;

    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let (language, attrs) = match kind {
                    CodeBlockKind::Fenced(info) => parse_fence_info(&info),
                    CodeBlockKind::Indented => (None, HashMap::new()),
                };
                pending = Some((language, attrs, String::new()));
            }
            Event::Text(text) if pending.is_some() => {
                if let Some((_, _, code)) = pending.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                let Some((language, mut attrs, code)) = pending.take() else {
                    continue;
                };
                let snippet = Snippet {
                    index: snippets.len(),
                    language: language.unwrap_or_else(|| DEFAULT_SNIPPET_LANGUAGE.to_owned()),
                    title: attrs.remove("title"),
                    code: code.strip_suffix('\n').unwrap_or(&code).to_owned(),
                };
                let mut block = String::new();
                render_snippet(&snippet, false, &mut block);
                events.push(Event::Html(CowStr::from(block)));
                snippets.push(snippet);
            }
            other => events.push(other),
        }
    }

    let mut html_out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut html_out, events.into_iter());

    RenderedMarkdown {
        html: html_out,
        snippets,
    }
}
