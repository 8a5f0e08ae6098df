use std::{collections::HashMap, str::FromStr};

use anyhow::{bail, Result};
use quick_xml::{events::BytesStart, Reader};

use crate::error::GraphError;

use super::{element_name, XmlReaderExtensions};

#[derive(Debug)]
pub(crate) struct Attributes {
    element: String,
    data: HashMap<String, String>,
}

impl Attributes {
    /// Creates a new Attributes object by parsing out all the attributes of the
    /// specified tag. Syntactically broken attributes make the document
    /// malformed.
    pub(crate) fn new(tag: &BytesStart<'_>, xml_reader: &Reader<&[u8]>) -> Result<Self, GraphError> {
        let mut data = HashMap::new();

        for attr in tag.attributes() {
            let attr = attr.map_err(|e| xml_reader.malformed(e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| xml_reader.malformed(e))?;
            data.insert(key, value.trim().to_string());
        }

        Ok(Self {
            element: element_name(tag),
            data,
        })
    }

    /// Gets a mandatory attribute and parses it.
    pub(crate) fn get<T: FromStr>(&self, key: &str) -> Result<T> {
        let Some(value) = self.data.get(key) else {
            bail!(
                "Mandatory attribute '{key}' was missing on the '{}' element",
                self.element
            );
        };

        match value.parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => bail!(
                "Could not parse '{value}' from attribute '{key}' into {}",
                std::any::type_name::<T>()
            ),
        }
    }
}
