use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vcodegen_core::{tokens, Language, Module, Parameter, Port, PortDirection};

#[derive(Parser, Debug)]
#[command(name = "vcodegen")]
#[command(about = "Generate aligned Verilog/SystemVerilog modules, testbenches and instances.")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of ~/.config/vcodegen/config.toml
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Tab width, overriding the configuration file
    #[arg(long = "tabwidth", value_name = "N", global = true)]
    pub tab_width: Option<usize>,

    /// Overwrite existing output files
    #[arg(long = "force", global = true)]
    pub force: bool,

    /// Directory generated files are written to
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".", global = true)]
    pub out_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new module file from port and parameter descriptions
    Module(ModuleArgs),

    /// Create a testbench for the first module declared in a file
    Testbench {
        /// Verilog (.v) or SystemVerilog (.sv) source
        file: PathBuf,
    },

    /// Print an instantiation of the first module declared in a file
    Instantiate {
        /// Verilog (.v) or SystemVerilog (.sv) source
        file: PathBuf,

        /// Instance name (default: <module>_inst)
        #[arg(long = "instance", value_name = "NAME")]
        instance: Option<String>,
    },

    /// Print the module header found in a file
    Scan {
        /// Verilog (.v) or SystemVerilog (.sv) source
        file: PathBuf,

        /// Print as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Write a configuration file holding the defaults
    ConfigTemplate {
        /// Target directory (default: ~/.config/vcodegen)
        dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ModuleArgs {
    /// Module name; a .v or .sv suffix selects the language
    pub name: String,

    /// Input ports as name[#width]
    #[arg(short = 'i', long = "input", value_name = "PORT", num_args = 1..)]
    pub inputs: Vec<String>,

    /// Output ports as name[#width]
    #[arg(short = 'o', long = "output", value_name = "PORT", num_args = 1..)]
    pub outputs: Vec<String>,

    /// Bidirectional ports as name[#width]
    #[arg(long = "inout", value_name = "PORT", num_args = 1..)]
    pub inouts: Vec<String>,

    /// Parameters as name[=default]
    #[arg(short = 'p', long = "parameter", value_name = "PARAM", num_args = 1..)]
    pub parameters: Vec<String>,

    /// Declare outputs as reg (logic in SystemVerilog)
    #[arg(long = "output-reg")]
    pub output_reg: bool,

    /// Timescale as unit/precision, e.g. 1ns/1ps
    #[arg(long = "timescale", value_name = "UNIT/PRECISION")]
    pub timescale: Option<String>,

    /// Generate SystemVerilog
    #[arg(long = "sv")]
    pub system_verilog: bool,

    /// Wrap the module in `ifndef/`define/`endif guards
    #[arg(long = "include-guards")]
    pub include_guards: bool,

    /// Also generate tb_<name>
    #[arg(long = "add-testbench")]
    pub add_testbench: bool,
}

impl ModuleArgs {
    pub fn language(&self) -> Language {
        module_name_and_language(&self.name, self.system_verilog).1
    }

    pub fn to_module(&self) -> Result<Module, String> {
        let (name, _) = module_name_and_language(&self.name, self.system_verilog);

        let parameters = split_descriptions(&self.parameters)
            .iter()
            .map(|description| Parameter::from_description(description))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| err.to_string())?;

        let mut ports = Vec::new();
        for (direction, raw) in [
            (PortDirection::Input, &self.inputs),
            (PortDirection::Output, &self.outputs),
            (PortDirection::Inout, &self.inouts),
        ] {
            for description in split_descriptions(raw) {
                let port = Port::from_description(direction, &description)
                    .map_err(|err| err.to_string())?;
                ports.push(port);
            }
        }

        Module::new(&name, parameters, ports).map_err(|err| err.to_string())
    }

    /// The timescale in canonical `unit/precision` form.
    pub fn normalized_timescale(&self) -> Result<Option<String>, String> {
        match &self.timescale {
            None => Ok(None),
            Some(raw) => parse_timescale(raw).map(Some),
        }
    }
}

/// Split descriptions given either as separate arguments or comma separated.
pub fn split_descriptions(raw_args: &[String]) -> Vec<String> {
    raw_args
        .iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .map(str::to_string)
        .collect()
}

/// Module name without a `.v`/`.sv` suffix, and the language it selects.
/// `force_sv` selects SystemVerilog regardless of the suffix.
pub fn module_name_and_language(raw: &str, force_sv: bool) -> (String, Language) {
    let (name, language) = match raw.rsplit_once('.') {
        Some((stem, extension)) => match Language::from_extension(extension) {
            Some(language) => (stem, language),
            None => (raw, Language::Verilog),
        },
        None => (raw, Language::Verilog),
    };

    let language = if force_sv {
        Language::SystemVerilog
    } else {
        language
    };
    (name.to_string(), language)
}

pub fn parse_timescale(raw: &str) -> Result<String, String> {
    tokens::timescale(&format!("`timescale {}", raw))
        .ok_or_else(|| format!("Invalid timescale '{}', expected unit/precision", raw))
}

pub fn log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}
