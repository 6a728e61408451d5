//! Module header scanning.
//!
//! Finds the first `module <name>` header in a source and recovers its
//! parameter and port lists line by line, without a grammar. Each block scan
//! leaves the medium positioned at the start of the line that ended its
//! block, so the next scan classifies that line again.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::cursor::LineCursor;
use crate::extract::{ParameterExtractor, PortExtractor};
use crate::tokens::{self, classify, lex_line};
use crate::{BlockKind, Error, Language, Module, Parameter, Port, Result};

pub struct ModuleScanner<R> {
    cursor: LineCursor<R>,
}

impl<R: BufRead + Seek> ModuleScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            cursor: LineCursor::new(reader),
        }
    }

    /// Scan for the first module header. `Ok(None)` when the source declares
    /// no module at all.
    pub fn scan(&mut self) -> Result<Option<Module>> {
        self.cursor.rewind()?;

        while let Some(line) = self.cursor.consume_line()? {
            let Some(name) = tokens::module_name(line) else {
                continue;
            };
            debug!(
                "Found module header '{}' at line {}",
                name,
                self.cursor.line_number()
            );

            // the header line may itself open a block
            self.cursor.unread_line()?;
            let parameters = scan_parameters(&mut self.cursor)?;
            let ports = scan_ports(&mut self.cursor)?;
            debug!(
                "Module '{}': {} parameter(s), {} port(s)",
                name,
                parameters.len(),
                ports.len()
            );

            return Module::new(&name, parameters, ports).map(Some);
        }

        debug!("No module header found");
        Ok(None)
    }

    /// First `` `timescale `` directive anywhere in the source.
    pub fn scan_timescale(&mut self) -> Result<Option<String>> {
        self.cursor.rewind()?;

        while let Some(line) = self.cursor.consume_line()? {
            if let Some(timescale) = tokens::timescale(line) {
                return Ok(Some(timescale));
            }
        }
        Ok(None)
    }
}

fn end_of_input<R: BufRead + Seek>(cursor: &LineCursor<R>, block: BlockKind) -> Error {
    Error::MalformedSource {
        block,
        line: cursor.line_number(),
    }
}

/// Scan the optional `#( ... )` parameter block.
///
/// Starts at the line before the candidate block. If a port opener or a `;`
/// shows up before any `#(`, the module has no parameter block and the medium
/// is left at that line.
pub fn scan_parameters<R: BufRead + Seek>(cursor: &mut LineCursor<R>) -> Result<Vec<Parameter>> {
    loop {
        let Some(line) = cursor.consume_line()? else {
            return Err(end_of_input(cursor, BlockKind::Parameter));
        };

        match classify(line) {
            Some(found) if found.param_begin => {
                cursor.unread_line()?;
                break;
            }
            Some(found) if found.port_begin || found.declaration_ends => {
                debug!("No parameter block before line {}", cursor.line_number());
                cursor.unread_line()?;
                return Ok(Vec::new());
            }
            _ => {}
        }
    }

    let mut extractor = ParameterExtractor::new();
    let mut parameters = Vec::new();
    loop {
        let Some(line) = cursor.consume_line()? else {
            return Err(end_of_input(cursor, BlockKind::Parameter));
        };

        let found = classify(line);
        extractor.feed(&lex_line(line)?, &mut parameters)?;

        if found.map_or(false, |found| found.block_closes >= 1) {
            debug!("Parameter block ends at line {}", cursor.line_number());
            cursor.unread_line()?;
            return Ok(parameters);
        }
    }
}

/// Scan the port list `( ... )`.
///
/// Starts where [`scan_parameters`] left the medium. A `;` before any port
/// opener means the module has no port list.
pub fn scan_ports<R: BufRead + Seek>(cursor: &mut LineCursor<R>) -> Result<Vec<Port>> {
    loop {
        let Some(line) = cursor.consume_line()? else {
            return Err(end_of_input(cursor, BlockKind::Port));
        };

        match classify(line) {
            Some(found) if found.port_begin => {
                cursor.unread_line()?;
                break;
            }
            Some(found) if found.declaration_ends => {
                debug!("No port list before line {}", cursor.line_number());
                cursor.unread_line()?;
                return Ok(Vec::new());
            }
            _ => {}
        }
    }

    let mut extractor = PortExtractor::new();
    let mut ports = Vec::new();
    let mut opening_line = true;
    loop {
        let Some(line) = cursor.consume_line()? else {
            return Err(end_of_input(cursor, BlockKind::Port));
        };

        let found = classify(line);
        extractor.feed(&lex_line(line)?, &mut ports)?;

        let ends = match found {
            Some(found) if opening_line => found.closes_opened_port_block(),
            Some(found) => found.ends_port_block(),
            None => false,
        };
        if ends {
            debug!("Port block ends at line {}", cursor.line_number());
            cursor.unread_line()?;
            return Ok(ports);
        }
        opening_line = false;
    }
}

/// A scanned source file: its module plus file-level properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedFile {
    pub language: Language,
    pub timescale: Option<String>,
    pub module: Module,
}

/// Scan a `.v`/`.sv` file for its first module and `` `timescale ``.
pub fn scan_file(path: &Path) -> Result<Option<ScannedFile>> {
    let language = Language::from_path(path).ok_or_else(|| {
        Error::invalid_spec(
            &path.display().to_string(),
            "expected a .v or .sv file extension",
        )
    })?;

    let file = File::open(path).map_err(Error::UnreadableSource)?;
    let mut scanner = ModuleScanner::new(BufReader::new(file));

    let Some(module) = scanner.scan()? else {
        return Ok(None);
    };
    let timescale = scanner.scan_timescale()?;

    Ok(Some(ScannedFile {
        language,
        timescale,
        module,
    }))
}
