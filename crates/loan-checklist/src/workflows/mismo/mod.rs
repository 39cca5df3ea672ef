//! MISMO 3.4 XML import into the checklist domain model.

mod mapping;
mod node;
mod normalizer;
mod parser;

pub use node::XmlElement;

use crate::workflows::checklist::domain::Deal;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MismoImportError {
    #[error("failed to read MISMO file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid MISMO XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

pub struct MismoDealImporter;

impl MismoDealImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Deal, MismoImportError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading MISMO file");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Deal, MismoImportError> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        Self::from_xml(&xml)
    }

    /// Parses the document and extracts the deal. Any XML error aborts the import.
    pub fn from_xml(xml: &str) -> Result<Deal, MismoImportError> {
        let document = roxmltree::Document::parse(xml.trim_start_matches('\u{feff}'))?;
        Ok(Self::from_element(&document.root_element()))
    }

    /// Extracts a deal from any element tree, such as one built by another XML reader.
    pub fn from_element<E: XmlElement>(root: &E) -> Deal {
        parser::extract_deal(root)
    }
}
