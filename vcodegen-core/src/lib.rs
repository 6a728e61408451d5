pub mod align;
pub mod cursor;
pub mod emitter;
pub mod extract;
pub mod module;
pub mod parameter;
pub mod port;
pub mod render;
pub mod scanner;
pub mod tokens;

use std::io;
use std::path::Path;

use serde::Serialize;

pub use align::{align, Indent};
pub use cursor::LineCursor;
pub use emitter::DeclarationEmitter;
pub use module::{Module, Ports};
pub use parameter::Parameter;
pub use port::{strip_direction_suffix, Port, WidthDeclaration};
pub use render::{FileOptions, ModuleFile, Testbench};
pub use scanner::{scan_file, ModuleScanner, ScannedFile};
pub use tokens::{classify, BlockTokens};

pub type Result<T> = std::result::Result<T, Error>;

/// The header block a scan was inside of when the source ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Parameter,
    Port,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Parameter => write!(f, "parameter"),
            BlockKind::Port => write!(f, "port"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// A compact `name[#width]` / `name[=default]` description was rejected.
    InvalidSpec { description: String, reason: String },
    /// A block scan reached the end of the source before the block closed.
    /// `line` is the 1-based number of the last line read.
    MalformedSource { block: BlockKind, line: usize },
    UnreadableSource(io::Error),
    UnwritableSink(io::Error),
}

impl Error {
    pub fn invalid_spec(description: &str, reason: impl Into<String>) -> Self {
        Error::InvalidSpec {
            description: description.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidSpec {
                description,
                reason,
            } => write!(f, "Invalid description '{}': {}", description, reason),
            Error::MalformedSource { block, line } => write!(
                f,
                "Syntax error: {} block detection reached end of input after line {}",
                block, line
            ),
            Error::UnreadableSource(err) => write!(f, "Failed to read source: {}", err),
            Error::UnwritableSink(err) => write!(f, "Failed to write output: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnreadableSource(err) | Error::UnwritableSink(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
    Inout,
}

impl PortDirection {
    /// Emission order: inputs, then outputs, then inouts.
    pub const ALL: [PortDirection; 3] = [
        PortDirection::Input,
        PortDirection::Output,
        PortDirection::Inout,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::Inout => "inout",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "input" => Some(PortDirection::Input),
            "output" => Some(PortDirection::Output),
            "inout" => Some(PortDirection::Inout),
            _ => None,
        }
    }
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Target HDL. Only affects file naming and variable keywords, never scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Verilog,
    SystemVerilog,
}

impl Language {
    pub fn file_extension(self) -> &'static str {
        match self {
            Language::Verilog => "v",
            Language::SystemVerilog => "sv",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "v" => Some(Language::Verilog),
            "sv" => Some(Language::SystemVerilog),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Keyword for a declared register (`output reg` / `output logic`).
    pub fn register_keyword(self) -> &'static str {
        match self {
            Language::Verilog => "reg",
            Language::SystemVerilog => "logic",
        }
    }

    /// Keyword for a testbench variable wired to a port of the given direction.
    pub fn variable_keyword(self, direction: PortDirection) -> &'static str {
        match (self, direction) {
            (Language::SystemVerilog, _) => "logic",
            (Language::Verilog, PortDirection::Input) => "reg",
            (Language::Verilog, PortDirection::Output | PortDirection::Inout) => "wire",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Verilog => write!(f, "Verilog"),
            Language::SystemVerilog => write!(f, "SystemVerilog"),
        }
    }
}
