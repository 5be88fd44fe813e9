//! Markup for the list dialog, escaped by construction.
//!
//! [`Html`] can only be built from escaped text, from elements whose tag and
//! attribute names are `'static` literals, or by joining other `Html`
//! values. User content (names, descriptions, tags, words) therefore never
//! reaches the output unescaped.

use crate::types::WordList;
use std::fmt;

/// Words shown in a card preview.
pub const PREVIEW_WORDS: usize = 10;

/// A markup fragment that is safe to embed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    /// Escaped text node.
    #[must_use]
    pub fn text(s: &str) -> Self {
        let mut out = String::with_capacity(s.len());
        escape_into(&mut out, s);
        Self(out)
    }

    /// `<tag a="v"...>children</tag>`; attribute values are escaped.
    #[must_use]
    pub fn element<I>(tag: &'static str, attrs: &[(&'static str, &str)], children: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut out = String::new();
        out.push('<');
        out.push_str(tag);
        for (name, value) in attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(&mut out, value);
            out.push('"');
        }
        out.push('>');
        for child in children {
            out.push_str(&child.0);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        Self(out)
    }

    /// Concatenate fragments.
    #[must_use]
    pub fn join<I: IntoIterator<Item = Self>>(parts: I) -> Self {
        Self(parts.into_iter().map(|h| h.0).collect())
    }

    /// Rendered markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rendered markup, owned.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

fn action(name: &'static str, id: &str, label: &str) -> Html {
    Html::element(
        "button",
        &[("type", "button"), ("data-action", name), ("data-list-id", id)],
        [Html::text(label)],
    )
}

/// Card for one list.
#[must_use]
pub fn render_list_card(list: &WordList) -> Html {
    let count = format!("{} words", list.len());
    let mut preview = list
        .words
        .iter()
        .take(PREVIEW_WORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    if list.len() > PREVIEW_WORDS {
        preview.push_str(" …");
    }

    let mut body = vec![Html::element(
        "header",
        &[],
        [
            Html::element("h3", &[("class", "list-name")], [Html::text(&list.name)]),
            Html::element("span", &[("class", "word-count")], [Html::text(&count)]),
        ],
    )];
    if !list.description.is_empty() {
        body.push(Html::element(
            "p",
            &[("class", "description")],
            [Html::text(&list.description)],
        ));
    }
    if !list.tags.is_empty() {
        body.push(Html::element(
            "ul",
            &[("class", "tags")],
            list.tags
                .iter()
                .map(|t| Html::element("li", &[("class", "tag")], [Html::text(t)])),
        ));
    }
    body.push(Html::element("p", &[("class", "preview")], [Html::text(&preview)]));
    body.push(Html::element(
        "footer",
        &[],
        [
            action("use", &list.id, "Use"),
            action("edit", &list.id, "Edit"),
            action("export", &list.id, "Export"),
            action("delete", &list.id, "Delete"),
        ],
    ));

    Html::element("article", &[("class", "word-list"), ("data-list-id", list.id.as_str())], body)
}

/// Section with every card, or an empty-state message.
#[must_use]
pub fn render_list_overview(lists: &[WordList]) -> Html {
    let body = if lists.is_empty() {
        Html::element("p", &[("class", "empty")], [Html::text("No custom lists yet.")])
    } else {
        Html::join(lists.iter().map(render_list_card))
    };
    Html::element("section", &[("class", "custom-lists")], [body])
}
