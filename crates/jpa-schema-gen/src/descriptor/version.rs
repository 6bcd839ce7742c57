//! Lightweight descriptor version detection.
//!
//! Reads only as far as the root start element and returns its `version`
//! attribute. The file is not required to be schema-valid for any
//! particular descriptor version at this point.

use crate::error::{Result, SchemaGenError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// Detect the descriptor version token of the file at `path`.
pub fn detect_version(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SchemaGenError::DescriptorNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader =
        Reader::from_file(path).map_err(|e| SchemaGenError::malformed(path, e))?;
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                // First element is the document root.
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| SchemaGenError::malformed(path, e))?;
                    if attr.key.local_name().as_ref() == b"version" {
                        let value = String::from_utf8_lossy(attr.value.as_ref()).into_owned();
                        if value.is_empty() {
                            break;
                        }
                        return Ok(value);
                    }
                }
                return Err(SchemaGenError::DescriptorVersionMissing {
                    path: path.to_path_buf(),
                });
            }
            Ok(Event::Eof) => {
                return Err(SchemaGenError::malformed(path, "no root element found"));
            }
            Ok(_) => {}
            Err(e) => return Err(SchemaGenError::malformed(path, e)),
        }
        buf.clear();
    }
}
