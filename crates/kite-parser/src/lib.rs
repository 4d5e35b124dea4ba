pub mod csharp;
pub mod literal;
pub mod xml;

pub use csharp::{
    find_window_class, scan_statements, split_initializer, strip_comments, CodeEvent, EdgeShape,
    Owner, ScanMode,
};
pub use literal::normalize_literal;
pub use xml::{parse_xml_document, XmlAttribute, XmlDocument, XmlElementNode};
