//! Structured glossary content as a closed tagged tree.
//!
//! Every node kind the lookup client renders is one variant of
//! [`ContentNode`]; serialization to the client's JSON shape lives in
//! [`ContentNode::to_value`].

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Element tags a styled container may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerTag {
    Span,
    Div,
    ListItem,
    OrderedList,
    UnorderedList,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeadCell,
    TableCell,
}

impl ContainerTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerTag::Span => "span",
            ContainerTag::Div => "div",
            ContainerTag::ListItem => "li",
            ContainerTag::OrderedList => "ol",
            ContainerTag::UnorderedList => "ul",
            ContainerTag::Table => "table",
            ContainerTag::TableHead => "thead",
            ContainerTag::TableBody => "tbody",
            ContainerTag::TableRow => "tr",
            ContainerTag::TableHeadCell => "th",
            ContainerTag::TableCell => "td",
        }
    }

    fn parse(tag: &str) -> Option<Self> {
        Some(match tag {
            "span" => ContainerTag::Span,
            "div" => ContainerTag::Div,
            "li" => ContainerTag::ListItem,
            "ol" => ContainerTag::OrderedList,
            "ul" => ContainerTag::UnorderedList,
            "table" => ContainerTag::Table,
            "thead" => ContainerTag::TableHead,
            "tbody" => ContainerTag::TableBody,
            "tr" => ContainerTag::TableRow,
            "th" => ContainerTag::TableHeadCell,
            "td" => ContainerTag::TableCell,
            _ => return None,
        })
    }
}

/// Inline style of a container. Empty fields are not serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub font_style: Option<String>,
    pub font_weight: Option<String>,
    pub font_size: Option<String>,
    pub text_decoration_line: Vec<String>,
    pub vertical_align: Option<String>,
    pub text_align: Option<String>,
    pub margin_top: i64,
    pub margin_left: i64,
    pub margin_right: i64,
    pub margin_bottom: i64,
    pub list_style_type: Option<String>,
}

impl Style {
    fn to_map(&self) -> Map<String, Value> {
        fn put(style: &mut Map<String, Value>, key: &str, value: &Option<String>) {
            if let Some(v) = value {
                style.insert(key.to_string(), json!(v));
            }
        }

        let mut style = Map::new();
        put(&mut style, "fontStyle", &self.font_style);
        put(&mut style, "fontWeight", &self.font_weight);
        put(&mut style, "fontSize", &self.font_size);
        if !self.text_decoration_line.is_empty() {
            style.insert("textDecorationLine".to_string(), json!(self.text_decoration_line));
        }
        put(&mut style, "verticalAlign", &self.vertical_align);
        put(&mut style, "textAlign", &self.text_align);
        for (key, value) in [
            ("marginTop", self.margin_top),
            ("marginLeft", self.margin_left),
            ("marginRight", self.margin_right),
            ("marginBottom", self.margin_bottom),
        ] {
            if value != 0 {
                style.insert(key.to_string(), json!(value));
            }
        }
        put(&mut style, "listStyleType", &self.list_style_type);
        style
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
        let int = |key: &str| map.get(key).and_then(Value::as_i64).unwrap_or(0);
        Self {
            font_style: text("fontStyle"),
            font_weight: text("fontWeight"),
            font_size: text("fontSize"),
            text_decoration_line: map
                .get("textDecorationLine")
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default(),
            vertical_align: text("verticalAlign"),
            text_align: text("textAlign"),
            margin_top: int("marginTop"),
            margin_left: int("marginLeft"),
            margin_right: int("marginRight"),
            margin_bottom: int("marginBottom"),
            list_style_type: text("listStyleType"),
        }
    }
}

/// Language, data attributes and style shared by container nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attr {
    pub lang: Option<String>,
    pub data: IndexMap<String, String>,
    pub style: Style,
}

impl Attr {
    pub fn lang(lang: &str) -> Self {
        Self {
            lang: Some(lang.to_string()),
            ..Self::default()
        }
    }

    /// Attribute carrying only `data-content`.
    pub fn data_content(name: &str) -> Self {
        let mut attr = Self::default();
        attr.data.insert("content".to_string(), name.to_string());
        attr
    }

    pub fn text_align(align: &str) -> Self {
        let mut attr = Self::default();
        attr.style.text_align = Some(align.to_string());
        attr
    }

    pub fn italic() -> Self {
        let mut attr = Self::default();
        attr.style.font_style = Some("italic".to_string());
        attr
    }

    fn write_into(&self, node: &mut Map<String, Value>) {
        if let Some(lang) = &self.lang {
            node.insert("lang".to_string(), json!(lang));
        }
        if !self.data.is_empty() {
            node.insert("data".to_string(), json!(self.data));
        }
        let style = self.style.to_map();
        if !style.is_empty() {
            node.insert("style".to_string(), Value::Object(style));
        }
    }

    fn read_from(map: &Map<String, Value>) -> Self {
        Self {
            lang: map.get("lang").and_then(Value::as_str).map(str::to_string),
            data: map
                .get("data")
                .and_then(Value::as_object)
                .map(|d| {
                    d.iter()
                        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                        .collect()
                })
                .unwrap_or_default(),
            style: map
                .get("style")
                .and_then(Value::as_object)
                .map(Style::from_map)
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// One node of a structured-content tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Text(String),
    /// An ordered run of sibling nodes.
    Sequence(Vec<ContentNode>),
    Container {
        tag: ContainerTag,
        attr: Attr,
        content: Box<ContentNode>,
    },
    /// A link that runs a dictionary lookup for `query`.
    Link {
        query: String,
        lang: Option<String>,
        content: Box<ContentNode>,
    },
    /// Base text with a phonetic annotation.
    Ruby {
        base: Box<ContentNode>,
        ruby: String,
        lang: Option<String>,
    },
}

impl From<&str> for ContentNode {
    fn from(text: &str) -> Self {
        ContentNode::Text(text.to_string())
    }
}

impl From<String> for ContentNode {
    fn from(text: String) -> Self {
        ContentNode::Text(text)
    }
}

impl ContentNode {
    pub fn to_value(&self) -> Value {
        match self {
            ContentNode::Text(text) => json!(text),
            ContentNode::Sequence(nodes) => {
                Value::Array(nodes.iter().map(ContentNode::to_value).collect())
            }
            ContentNode::Container { tag, attr, content } => {
                let mut node = Map::new();
                node.insert("tag".to_string(), json!(tag.as_str()));
                node.insert("content".to_string(), content.to_value());
                attr.write_into(&mut node);
                Value::Object(node)
            }
            ContentNode::Link {
                query,
                lang,
                content,
            } => {
                let mut node = Map::new();
                node.insert("tag".to_string(), json!("a"));
                node.insert(
                    "href".to_string(),
                    json!(format!("?query={}&wildcards=off", query)),
                );
                node.insert("content".to_string(), content.to_value());
                if let Some(lang) = lang {
                    node.insert("lang".to_string(), json!(lang));
                }
                Value::Object(node)
            }
            ContentNode::Ruby { base, ruby, lang } => {
                let mut node = Map::new();
                node.insert("tag".to_string(), json!("ruby"));
                node.insert(
                    "content".to_string(),
                    json!([
                        base.to_value(),
                        {"tag": "rp", "content": "("},
                        {"tag": "rt", "content": ruby},
                        {"tag": "rp", "content": ")"},
                    ]),
                );
                if let Some(lang) = lang {
                    node.insert("lang".to_string(), json!(lang));
                }
                Value::Object(node)
            }
        }
    }

    /// Rebuild a tree from its JSON shape. Unknown objects degrade to text.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => ContentNode::Text(text.clone()),
            Value::Array(items) => ContentNode::Sequence(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => {
                let tag = map.get("tag").and_then(Value::as_str).unwrap_or_default();
                let content = map.get("content").map(Self::from_value).unwrap_or(ContentNode::Sequence(vec![]));
                let lang = map.get("lang").and_then(Value::as_str).map(str::to_string);
                match tag {
                    "a" => {
                        let href = map.get("href").and_then(Value::as_str).unwrap_or_default();
                        let query = href
                            .strip_prefix("?query=")
                            .and_then(|q| q.strip_suffix("&wildcards=off"))
                            .unwrap_or(href)
                            .to_string();
                        ContentNode::Link {
                            query,
                            lang,
                            content: Box::new(content),
                        }
                    }
                    "ruby" => {
                        let parts = map.get("content").and_then(Value::as_array);
                        let base = parts
                            .and_then(|p| p.first())
                            .map(Self::from_value)
                            .unwrap_or(ContentNode::Sequence(vec![]));
                        let ruby = parts
                            .and_then(|p| p.get(2))
                            .and_then(|rt| rt.get("content"))
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string();
                        ContentNode::Ruby {
                            base: Box::new(base),
                            ruby,
                            lang,
                        }
                    }
                    other => match ContainerTag::parse(other) {
                        Some(tag) => ContentNode::Container {
                            tag,
                            attr: Attr::read_from(map),
                            content: Box::new(content),
                        },
                        None => ContentNode::Text(value.to_string()),
                    },
                }
            }
            other => ContentNode::Text(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Merge adjacent text runs; a single remaining node stands alone.
pub fn reduce(contents: Vec<ContentNode>) -> ContentNode {
    if contents.len() == 1 {
        if let Some(only) = contents.into_iter().next() {
            return only;
        }
        return ContentNode::Sequence(vec![]);
    }
    let mut merged = Vec::new();
    let mut accumulator = String::new();
    for node in contents {
        match node {
            ContentNode::Text(text) => accumulator.push_str(&text),
            other => {
                if !accumulator.is_empty() {
                    merged.push(ContentNode::Text(std::mem::take(&mut accumulator)));
                }
                merged.push(other);
            }
        }
    }
    if !accumulator.is_empty() {
        merged.push(ContentNode::Text(accumulator));
    }
    if merged.len() == 1 {
        merged.remove(0)
    } else {
        ContentNode::Sequence(merged)
    }
}

pub fn container(tag: ContainerTag, attr: Attr, contents: Vec<ContentNode>) -> ContentNode {
    ContentNode::Container {
        tag,
        attr,
        content: Box::new(reduce(contents)),
    }
}

pub fn span(attr: Attr, contents: Vec<ContentNode>) -> ContentNode {
    container(ContainerTag::Span, attr, contents)
}

pub fn list_item(attr: Attr, contents: Vec<ContentNode>) -> ContentNode {
    container(ContainerTag::ListItem, attr, contents)
}

pub fn unordered_list(attr: Attr, contents: Vec<ContentNode>) -> ContentNode {
    container(ContainerTag::UnorderedList, attr, contents)
}

/// Lookup link whose visible text is the query itself.
pub fn internal_link(lang: Option<&str>, query: &str) -> ContentNode {
    ContentNode::Link {
        query: query.to_string(),
        lang: lang.map(str::to_string),
        content: Box::new(ContentNode::Text(query.to_string())),
    }
}

pub fn ruby(lang: Option<&str>, ruby: &str, contents: Vec<ContentNode>) -> ContentNode {
    ContentNode::Ruby {
        base: Box::new(reduce(contents)),
        ruby: ruby.to_string(),
        lang: lang.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_merges_adjacent_text() {
        let link = internal_link(None, "本");
        let reduced = reduce(vec!["see".into(), ": ".into(), link.clone(), "!".into()]);
        assert_eq!(
            reduced,
            ContentNode::Sequence(vec!["see: ".into(), link, "!".into()])
        );
    }

    #[test]
    fn test_reduce_single_and_text_only() {
        assert_eq!(reduce(vec!["a".into()]), ContentNode::Text("a".to_string()));
        assert_eq!(reduce(vec!["a".into(), "b".into()]), ContentNode::Text("ab".to_string()));
    }

    #[test]
    fn test_container_serialization() {
        let mut attr = Attr::data_content("glossary");
        attr.lang = Some("en".to_string());
        attr.style.list_style_type = Some("circle".to_string());
        let list = unordered_list(attr, vec![list_item(Attr::default(), vec!["book".into()])]);
        assert_eq!(
            list.to_value(),
            json!({
                "tag": "ul",
                "content": {"tag": "li", "content": "book"},
                "lang": "en",
                "data": {"content": "glossary"},
                "style": {"listStyleType": "circle"},
            })
        );
    }

    #[test]
    fn test_link_serialization() {
        assert_eq!(
            internal_link(Some("ja"), "本").to_value(),
            json!({"tag": "a", "href": "?query=本&wildcards=off", "content": "本", "lang": "ja"})
        );
    }

    #[test]
    fn test_ruby_serialization() {
        let node = ruby(None, "ほん", vec!["本".into()]);
        assert_eq!(
            node.to_value(),
            json!({"tag": "ruby", "content": [
                "本",
                {"tag": "rp", "content": "("},
                {"tag": "rt", "content": "ほん"},
                {"tag": "rp", "content": ")"},
            ]})
        );
    }

    #[test]
    fn test_from_value_restores_tree() {
        let mut attr = Attr::text_align("center");
        attr.style.margin_top = 2;
        let tree = container(
            ContainerTag::TableRow,
            Attr::default(),
            vec![
                container(ContainerTag::TableCell, attr, vec!["㊒".into()]),
                span(Attr::italic(), vec![internal_link(Some("ja"), "元")]),
                ruby(Some("ja"), "もと", vec!["元".into()]),
            ],
        );
        assert_eq!(ContentNode::from_value(&tree.to_value()), tree);
    }
}
