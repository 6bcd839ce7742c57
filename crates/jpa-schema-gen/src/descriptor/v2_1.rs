//! Persistence descriptor model for version 2.1.

use super::model::{PersistenceDescriptor, PersistenceModel, PersistenceUnit};
use crate::error::{Result, SchemaGenError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Descriptor model for JPA 2.1 `persistence.xml` files.
#[derive(Debug, Default)]
pub struct Model21;

impl Model21 {
    pub fn new() -> Self {
        Self
    }
}

impl PersistenceModel for Model21 {
    fn version(&self) -> &'static str {
        "2.1"
    }

    fn load(&self, path: &Path) -> Result<PersistenceDescriptor> {
        if !path.exists() {
            return Err(SchemaGenError::DescriptorNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut reader =
            Reader::from_file(path).map_err(|e| SchemaGenError::malformed(path, e))?;
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut units = Vec::new();
        let mut current: Option<PersistenceUnit> = None;
        let mut capture: Option<Capture> = None;
        let mut seen_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if !seen_root {
                        check_root(path, &e)?;
                        seen_root = true;
                    } else {
                        match e.local_name().as_ref() {
                            b"persistence-unit" if current.is_none() => {
                                current = Some(read_unit_attrs(path, &e)?);
                            }
                            b"provider" if current.is_some() => {
                                capture = Some(Capture::Provider);
                            }
                            b"class" if current.is_some() => {
                                capture = Some(Capture::Class);
                            }
                            _ => {}
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    if !seen_root {
                        check_root(path, &e)?;
                        seen_root = true;
                        break;
                    } else if e.local_name().as_ref() == b"persistence-unit"
                        && current.is_none()
                    {
                        units.push(read_unit_attrs(path, &e)?);
                    }
                }
                Ok(Event::Text(t)) => {
                    if let (Some(capture), Some(unit)) = (capture.as_ref(), current.as_mut()) {
                        let text = String::from_utf8_lossy(&t).trim().to_string();
                        if !text.is_empty() {
                            match capture {
                                Capture::Provider => unit.provider = Some(text),
                                Capture::Class => unit.classes.push(text),
                            }
                        }
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"persistence-unit" => {
                        if let Some(unit) = current.take() {
                            units.push(unit);
                        }
                    }
                    b"provider" | b"class" => capture = None,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(SchemaGenError::malformed(path, e)),
            }
            buf.clear();
        }

        if !seen_root {
            return Err(SchemaGenError::malformed(path, "no root element found"));
        }

        Ok(PersistenceDescriptor {
            version: self.version().to_string(),
            units,
        })
    }
}

enum Capture {
    Provider,
    Class,
}

fn check_root(path: &Path, e: &BytesStart<'_>) -> Result<()> {
    if e.local_name().as_ref() != b"persistence" {
        return Err(SchemaGenError::parse(
            path,
            format!(
                "expected root element 'persistence', found '{}'",
                String::from_utf8_lossy(e.local_name().as_ref())
            ),
        ));
    }
    Ok(())
}

fn read_unit_attrs(path: &Path, e: &BytesStart<'_>) -> Result<PersistenceUnit> {
    let mut unit = PersistenceUnit::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| SchemaGenError::malformed(path, e))?;
        let value = String::from_utf8_lossy(attr.value.as_ref()).into_owned();
        match attr.key.local_name().as_ref() {
            b"name" => unit.name = value,
            b"transaction-type" => unit.transaction_type = Some(value),
            _ => {}
        }
    }
    if unit.name.is_empty() {
        return Err(SchemaGenError::parse(
            path,
            "persistence-unit element has no name attribute",
        ));
    }
    Ok(unit)
}
