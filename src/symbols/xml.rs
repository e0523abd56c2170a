//! Declarations from Doxygen XML compound documents.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::config::normalize_source_path;
use crate::error::{DoxError, Result};
use crate::models::SymbolEntry;

fn xml_error(path: &Path, detail: impl std::fmt::Display) -> DoxError {
    DoxError::Xml {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// State of the `<memberdef>` being read.
#[derive(Default)]
struct Member {
    line: Option<u32>,
    args: Option<String>,
    in_args: bool,
}

/// Collect the `<memberdef>` nodes of `xml` located in `file_path`.
///
/// `file_path` is compared after normalizing `<location file=..>` with
/// `marker`. Members without an `<argsstring>` get an empty parameter list.
/// The result is sorted by declaration line.
pub fn read_declarations(
    xml: &str,
    doc_path: &Path,
    file_path: &str,
    marker: &str,
) -> Result<Vec<SymbolEntry>> {
    let mut reader = Reader::from_str(xml);
    let mut member: Option<Member> = None;
    let mut entries = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            xml_error(
                doc_path,
                format!("at position {}: {e}", reader.error_position()),
            )
        })?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"memberdef" => member = Some(Member::default()),
                b"location" => {
                    if let Some(m) = member.as_mut() {
                        read_location(&e, m, doc_path, file_path, marker)?;
                    }
                }
                b"argsstring" => {
                    if let Some(m) = member.as_mut() {
                        m.in_args = true;
                        m.args.get_or_insert_with(String::new);
                    }
                }
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(m) = member.as_mut() {
                    if e.name().as_ref() == b"location" {
                        read_location(&e, m, doc_path, file_path, marker)?;
                    }
                }
            }
            Event::Text(t) => {
                if let Some(m) = member.as_mut().filter(|m| m.in_args) {
                    let text = t.unescape().map_err(|e| xml_error(doc_path, e))?;
                    m.args.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::CData(t) => {
                if let Some(m) = member.as_mut().filter(|m| m.in_args) {
                    let raw = t.into_inner();
                    m.args
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(&raw));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"argsstring" => {
                    if let Some(m) = member.as_mut() {
                        m.in_args = false;
                    }
                }
                b"memberdef" => {
                    if let Some(Member {
                        line: Some(line),
                        args,
                        ..
                    }) = member.take()
                    {
                        entries.push(SymbolEntry {
                            declaration_line: line,
                            parameter_list: args.unwrap_or_default(),
                        });
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    entries.sort();
    Ok(entries)
}

/// Record the line of a `<location>` whose file is `file_path`; first match wins.
fn read_location(
    e: &BytesStart<'_>,
    member: &mut Member,
    doc_path: &Path,
    file_path: &str,
    marker: &str,
) -> Result<()> {
    if member.line.is_some() {
        return Ok(());
    }

    let mut file = None;
    let mut line = None;
    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(doc_path, err))?;
        match attr.key.as_ref() {
            b"file" => {
                let value = attr.unescape_value().map_err(|err| xml_error(doc_path, err))?;
                file = Some(value.into_owned());
            }
            b"line" => {
                let value = attr.unescape_value().map_err(|err| xml_error(doc_path, err))?;
                line = value.trim().parse::<u32>().ok();
            }
            _ => {}
        }
    }

    if let (Some(file), Some(line)) = (file, line) {
        if normalize_source_path(&file, marker) == file_path {
            member.line = Some(line);
        }
    }
    Ok(())
}
