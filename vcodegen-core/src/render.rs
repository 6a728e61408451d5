//! Whole-file rendering: module skeletons and testbenches.

use std::io::Write;

use crate::emitter::write_text;
use crate::{DeclarationEmitter, Indent, Language, Module, PortDirection, Result};

/// Options shared by module and testbench files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    pub language: Language,
    /// `unit/precision`, written as a `` `timescale `` line when set.
    pub timescale: Option<String>,
    pub include_guards: bool,
    pub output_reg: bool,
    pub indent: Indent,
    pub strip_io_suffix: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            language: Language::Verilog,
            timescale: None,
            include_guards: false,
            output_reg: false,
            indent: Indent::default(),
            strip_io_suffix: true,
        }
    }
}

impl FileOptions {
    pub fn emitter(&self) -> DeclarationEmitter {
        DeclarationEmitter::new(self.indent)
            .with_language(self.language)
            .with_output_reg(self.output_reg)
            .with_strip_io_suffix(self.strip_io_suffix)
    }

    fn push_timescale(&self, text: &mut String) {
        if let Some(timescale) = &self.timescale {
            text.push_str(&format!("`timescale {}\n\n", timescale));
        }
    }
}

/// Source file declaring a single module.
pub struct ModuleFile<'a> {
    module: &'a Module,
    options: &'a FileOptions,
}

impl<'a> ModuleFile<'a> {
    pub fn new(module: &'a Module, options: &'a FileOptions) -> Self {
        Self { module, options }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.module.name(), self.options.language.file_extension())
    }

    /// Include guard macro, e.g. `UART_RX_V`.
    pub fn guard_macro(&self) -> String {
        format!(
            "{}_{}",
            self.module.name().to_uppercase(),
            self.options.language.file_extension().to_uppercase()
        )
    }

    pub fn render(&self) -> String {
        let mut text = String::new();
        self.options.push_timescale(&mut text);

        let guard = self.guard_macro();
        if self.options.include_guards {
            text.push_str(&format!("`ifndef {}\n`define {}\n\n", guard, guard));
        }

        text.push_str(&self.options.emitter().render_declaration(self.module));

        if self.options.include_guards {
            text.push_str(&format!("\n`endif // {}\n", guard));
        }
        text
    }

    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        write_text(sink, &self.render())
    }
}

/// Testbench driving a module under test.
pub struct Testbench<'a> {
    module: &'a Module,
    options: &'a FileOptions,
}

impl<'a> Testbench<'a> {
    pub const DUT_INSTANCE: &'static str = "dut";

    pub fn new(module: &'a Module, options: &'a FileOptions) -> Self {
        Self { module, options }
    }

    pub fn module_name(&self) -> String {
        format!("tb_{}", self.module.name())
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.module_name(), self.options.language.file_extension())
    }

    pub fn render(&self) -> String {
        let emitter = self.options.emitter();
        let mut text = String::new();
        self.options.push_timescale(&mut text);
        text.push_str(&format!("module {};\n\n", self.module_name()));

        for direction in PortDirection::ALL {
            let ports = self.module.ports().get(direction);
            if ports.is_empty() {
                continue;
            }
            text.push_str(&format!("\t// dut {}s\n", direction));
            for port in ports {
                text.push('\t');
                text.push_str(&emitter.variable_declaration(port));
                text.push('\n');
            }
            text.push('\n');
        }

        text.push_str("\tinitial begin\n\t\t$finish;\n\tend\n\n");
        text.push_str(&emitter.render_instance(self.module, Self::DUT_INSTANCE, "\t"));
        text.push_str("\nendmodule\n");
        text
    }

    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        write_text(sink, &self.render())
    }
}
