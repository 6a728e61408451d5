//! Rendering of module declarations and instantiations.
//!
//! Every declaration line goes through [`Indent::align`] so identifiers line
//! up at the configured column. Emission is format-only: nothing here reads
//! or compares existing files.

use std::io::Write;

use crate::{Error, Indent, Language, Module, Port, PortDirection, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationEmitter {
    indent: Indent,
    language: Language,
    output_reg: bool,
    strip_io_suffix: bool,
}

impl DeclarationEmitter {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent,
            language: Language::Verilog,
            output_reg: false,
            strip_io_suffix: true,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Declare outputs as registers (`output reg` / `output logic`).
    pub fn with_output_reg(mut self, output_reg: bool) -> Self {
        self.output_reg = output_reg;
        self
    }

    /// Drop `_i`/`_o`-style suffixes from connection names.
    pub fn with_strip_io_suffix(mut self, strip_io_suffix: bool) -> Self {
        self.strip_io_suffix = strip_io_suffix;
        self
    }

    /// `output reg [7:0] data_o`, aligned, without separator.
    pub fn port_declaration(&self, port: &Port) -> String {
        let mut fields = vec![port.direction().keyword().to_string()];
        if self.output_reg && port.direction() == PortDirection::Output {
            fields.push(self.language.register_keyword().to_string());
        }
        if let Some(width) = port.width() {
            fields.push(width.text());
        }
        fields.push(port.identifier().to_string());
        self.indent.align(&fields)
    }

    /// Testbench variable wired to `port`, e.g. `reg [7:0] data;`.
    pub fn variable_declaration(&self, port: &Port) -> String {
        let mut fields = vec![self.language.variable_keyword(port.direction()).to_string()];
        if let Some(width) = port.width() {
            fields.push(width.text());
        }
        fields.push(port.connection_name(self.strip_io_suffix).to_string());
        format!("{};", self.indent.align(&fields))
    }

    pub fn render_declaration(&self, module: &Module) -> String {
        let mut text = format!("module {}", module.name());

        if !module.parameters().is_empty() {
            text.push_str(" #(\n");
            let lines: Vec<String> = module
                .parameters()
                .iter()
                .map(|parameter| {
                    self.indent
                        .align(&["parameter".to_string(), parameter.declaration()])
                })
                .collect();
            push_list(&mut text, "\t", &lines);
            text.push(')');
        }

        let ports: Vec<String> = module
            .ports()
            .iter()
            .map(|port| self.port_declaration(port))
            .collect();
        if ports.is_empty() {
            text.push_str(" ();\n");
        } else {
            text.push_str(" (\n");
            push_list(&mut text, "\t", &ports);
            text.push_str(");\n");
        }

        text.push_str("\nendmodule\n");
        text
    }

    /// Instantiation of `module` named `instance_name`, every line prefixed
    /// with `line_prefix`.
    pub fn render_instance(
        &self,
        module: &Module,
        instance_name: &str,
        line_prefix: &str,
    ) -> String {
        let mut text = format!("{}{}", line_prefix, module.name());
        let nested_prefix = format!("{}\t", line_prefix);

        if !module.parameters().is_empty() {
            text.push_str(" #(\n");
            let overrides: Vec<String> = module
                .parameters()
                .iter()
                .map(|parameter| {
                    self.named_connection(parameter.identifier(), parameter.override_value())
                })
                .collect();
            push_list(&mut text, &nested_prefix, &overrides);
            text.push_str(line_prefix);
            text.push(')');
        }

        let connections: Vec<String> = module
            .ports()
            .iter()
            .map(|port| {
                self.named_connection(port.identifier(), port.connection_name(self.strip_io_suffix))
            })
            .collect();
        if connections.is_empty() {
            text.push_str(&format!(" {} ();\n", instance_name));
        } else {
            text.push_str(&format!(" {} (\n", instance_name));
            push_list(&mut text, &nested_prefix, &connections);
            text.push_str(line_prefix);
            text.push_str(");\n");
        }
        text
    }

    pub fn render_instantiation(&self, module: &Module) -> String {
        self.render_instance(module, &default_instance_name(module), "")
    }

    fn named_connection(&self, name: &str, connection: &str) -> String {
        self.indent
            .align(&[format!(".{}", name), format!("({})", connection)])
    }

    pub fn emit_declaration<W: Write>(&self, module: &Module, sink: &mut W) -> Result<()> {
        write_text(sink, &self.render_declaration(module))
    }

    pub fn emit_instantiation<W: Write>(&self, module: &Module, sink: &mut W) -> Result<()> {
        write_text(sink, &self.render_instantiation(module))
    }
}

impl Default for DeclarationEmitter {
    fn default() -> Self {
        Self::new(Indent::default())
    }
}

pub fn default_instance_name(module: &Module) -> String {
    format!("{}_inst", module.name())
}

/// One entry per line, comma-terminated except the last.
fn push_list(text: &mut String, prefix: &str, entries: &[String]) {
    for (i, entry) in entries.iter().enumerate() {
        text.push_str(prefix);
        text.push_str(entry);
        if i + 1 < entries.len() {
            text.push(',');
        }
        text.push('\n');
    }
}

pub(crate) fn write_text<W: Write>(sink: &mut W, text: &str) -> Result<()> {
    sink.write_all(text.as_bytes())
        .and_then(|()| sink.flush())
        .map_err(Error::UnwritableSink)
}
