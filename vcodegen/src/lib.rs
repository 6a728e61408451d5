pub mod cli;
pub mod config;
pub mod output;

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use vcodegen_core::emitter::default_instance_name;
use vcodegen_core::{scan_file, FileOptions, ModuleFile, ScannedFile, Testbench};

pub use cli::{Cli, Command, ModuleArgs};
pub use config::Config;
pub use output::OutputDir;

/// Configuration in effect for `cli`: the config file, then `--tabwidth`.
pub fn effective_config(cli: &Cli) -> Result<Config> {
    let home = config::home_dir();
    let mut config = Config::discover(cli.config.as_deref(), home.as_deref())?;
    if let Some(tab_width) = cli.tab_width {
        config.tab_width = tab_width;
        config.validate().context("Invalid --tabwidth")?;
    }
    debug!("Effective config: {:?}", config);
    Ok(config)
}

/// Execute `cli`. Text meant for the terminal goes to `stdout`.
pub fn run<W: Write>(cli: &Cli, stdout: &mut W) -> Result<()> {
    let config = effective_config(cli)?;
    let output = OutputDir::new(&cli.out_dir, cli.force);

    match &cli.command {
        Command::Module(args) => generate_module(args, &config, &output),
        Command::Testbench { file } => generate_testbench(file, &config, &output),
        Command::Instantiate { file, instance } => {
            instantiate(file, instance.as_deref(), &config, stdout)
        }
        Command::Scan { file, json } => print_scan(file, *json, stdout),
        Command::ConfigTemplate { dir } => {
            let dir = match dir {
                Some(dir) => dir.clone(),
                None => config::home_dir()
                    .map(|home| config::user_config_dir(&home))
                    .ok_or_else(|| {
                        anyhow!("Cannot determine the home directory, pass a target directory")
                    })?,
            };
            let path = config::write_template(&dir, cli.force)?;
            writeln!(stdout, "{}", path.display())?;
            Ok(())
        }
    }
}

fn file_options(config: &Config) -> FileOptions {
    FileOptions {
        indent: config.indent(),
        strip_io_suffix: config.strip_io_suffix,
        ..FileOptions::default()
    }
}

fn scan_module(file: &Path) -> Result<ScannedFile> {
    scan_file(file)
        .with_context(|| format!("Failed to scan {}", file.display()))?
        .ok_or_else(|| anyhow!("No module declaration found in {}", file.display()))
}

fn generate_module(args: &ModuleArgs, config: &Config, output: &OutputDir) -> Result<()> {
    let module = args.to_module().map_err(|err| anyhow!(err))?;
    let options = FileOptions {
        language: args.language(),
        timescale: args.normalized_timescale().map_err(|err| anyhow!(err))?,
        include_guards: args.include_guards,
        output_reg: args.output_reg,
        ..file_options(config)
    };

    let file = ModuleFile::new(&module, &options);
    output.write(&file.file_name(), &file.render())?;

    if args.add_testbench {
        let testbench = Testbench::new(&module, &options);
        output.write(&testbench.file_name(), &testbench.render())?;
    }
    Ok(())
}

fn generate_testbench(file: &Path, config: &Config, output: &OutputDir) -> Result<()> {
    let scanned = scan_module(file)?;
    let options = FileOptions {
        language: scanned.language,
        timescale: scanned.timescale.clone(),
        ..file_options(config)
    };

    let testbench = Testbench::new(&scanned.module, &options);
    output.write(&testbench.file_name(), &testbench.render())?;
    Ok(())
}

fn instantiate<W: Write>(
    file: &Path,
    instance: Option<&str>,
    config: &Config,
    stdout: &mut W,
) -> Result<()> {
    let scanned = scan_module(file)?;
    let instance = match instance {
        Some(name) if name.trim().is_empty() => bail!("Instance name must not be empty"),
        Some(name) => name.to_string(),
        None => default_instance_name(&scanned.module),
    };

    let emitter = file_options(config).emitter();
    stdout.write_all(emitter.render_instance(&scanned.module, &instance, "").as_bytes())?;
    Ok(())
}

fn print_scan<W: Write>(file: &Path, json: bool, stdout: &mut W) -> Result<()> {
    let scanned = scan_module(file)?;
    if json {
        let text = serde_json::to_string_pretty(&scanned).context("Failed to serialize module")?;
        writeln!(stdout, "{}", text)?;
    } else {
        writeln!(stdout, "language: {}", scanned.language)?;
        if let Some(timescale) = &scanned.timescale {
            writeln!(stdout, "timescale: {}", timescale)?;
        }
        writeln!(stdout, "{}", scanned.module)?;
    }
    Ok(())
}
