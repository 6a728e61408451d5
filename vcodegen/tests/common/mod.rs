use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;
use vcodegen::{run, Cli};

/// A scratch directory holding sources, a config file and generated output.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        // isolate from any user config
        fs::write(dir.path().join("config.toml"), "").expect("Failed to write config");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        fs::write(&path, contents).unwrap_or_else(|err| {
            panic!("Failed to write {}: {}", path.display(), err);
        });
        path
    }

    pub fn read(&self, name: &str) -> String {
        let path = self.file(name);
        fs::read_to_string(&path).unwrap_or_else(|err| {
            panic!("Failed to read {}: {}", path.display(), err);
        })
    }

    /// Parse `args` as given after `vcodegen`, pointed at this workspace.
    pub fn cli(&self, args: &[&str]) -> Cli {
        let out_dir = self.path().display().to_string();
        let config = self.file("config.toml").display().to_string();
        let mut argv = vec!["vcodegen", "--out-dir", &out_dir, "--config", &config];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
            .unwrap_or_else(|err| panic!("Failed to parse {:?}: {}", args, err))
    }

    /// Run `args` and return what was printed.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let mut stdout = Vec::new();
        run(&self.cli(args), &mut stdout)?;
        Ok(String::from_utf8(stdout).expect("stdout is not UTF-8"))
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
pub const UART_RX_V: &str = "\
`timescale 1ns / 1ps
module uartRx #(
    parameter CLK_FREQ = 100_000_000,
    parameter MSG_BITS = 8
) (
    input                 clk,
    input                 uart_i,
    output [MSG_BITS-1:0] symbol_o,
    output                newSymbol_o
);
endmodule
";
