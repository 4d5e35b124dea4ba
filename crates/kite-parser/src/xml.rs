use kite_core::KiteError;
use roxmltree::{Document, Node};

#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElementNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElementNode {
    /// Tag name without namespace prefix.
    pub name: String,
    pub prefix: Option<String>,
    /// In document order; namespace declarations are not attributes.
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElementNode>,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    /// Local name without namespace prefix.
    pub name: String,
    pub prefix: Option<String>,
    pub value: String,
}

impl XmlAttribute {
    /// `prefix:name` as written in the source, or just `name`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }
}

impl XmlElementNode {
    /// Looks an attribute up by its qualified (`x:Name`) spelling.
    pub fn attr(&self, qualified: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.qualified_name() == qualified)
            .map(|attribute| attribute.value.as_str())
    }
}

pub fn parse_xml_document(source: &str) -> Result<XmlDocument, KiteError> {
    let document = Document::parse(source.trim_start_matches('\u{feff}'))
        .map_err(|error| KiteError::new("XML_PARSE_ERROR", error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(KiteError::new(
            "XML_ROOT_MISSING",
            "XML document must contain a root element.",
        ));
    };

    Ok(XmlDocument {
        root: parse_element(&document, root),
    })
}

fn parse_element(document: &Document<'_>, node: Node<'_, '_>) -> XmlElementNode {
    let attributes = node
        .attributes()
        .map(|attribute| XmlAttribute {
            name: attribute.name().to_string(),
            prefix: attribute
                .namespace()
                .and_then(|uri| node.lookup_prefix(uri))
                .map(str::to_string),
            value: attribute.value().to_string(),
        })
        .collect();

    let children = node
        .children()
        .filter(|child| child.is_element())
        .map(|child| parse_element(document, child))
        .collect();

    XmlElementNode {
        name: node.tag_name().name().to_string(),
        prefix: node
            .tag_name()
            .namespace()
            .and_then(|uri| node.lookup_prefix(uri))
            .map(str::to_string),
        attributes,
        children,
        line: document.text_pos_at(node.range().start).row,
    }
}
