use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sicpass::{presets, session::Session, AssemblerOptions};

#[derive(Debug, Parser)]
#[clap(author, version, about = "Two-pass assembler for the SIC machine")]
struct Args {
    /// Directory holding the saved source and operation table
    #[clap(long, default_value = ".sicpass")]
    session_dir: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assign addresses and write <output>.symtab and <output>.int
    Pass1 {
        source: PathBuf,
        optab: PathBuf,
        output: String,
    },
    /// Turn pass one output into object code, written to <output>.obj
    Pass2 {
        intermediate: PathBuf,
        symtab: PathBuf,
        optab: PathBuf,
        output: String,
        /// Bytes per text record
        #[clap(long, default_value_t = AssemblerOptions::default().max_text_bytes)]
        max_text_bytes: usize,
    },
    /// Run both passes and write all three artifacts
    Assemble {
        /// Source file, defaults to the saved session source
        source: Option<PathBuf>,
        /// Operation table, defaults to the saved session table
        optab: Option<PathBuf>,
        #[clap(short, long, default_value = "out")]
        output: String,
    },
    /// Print an operation table for the standard mnemonics a program uses
    Optab { source: PathBuf },
    /// Print a built-in example program and its operation table
    Preset { name: String },
    /// Remember a source file and operation table for later runs
    Save { source: PathBuf, optab: PathBuf },
    /// Print the saved source and operation table
    Restore,
    /// Forget the saved source and operation table
    Clear,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: String, contents: &str) -> Result<()> {
    fs::write(&path, contents).with_context(|| format!("writing {}", path))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let session = Session::new(&args.session_dir);

    match args.command {
        Command::Pass1 {
            source,
            optab,
            output,
        } => {
            let (symtab, intermediate) = sicpass::first_pass(&read(&source)?, &read(&optab)?)?;
            write(format!("{}.symtab", output), &symtab)?;
            write(format!("{}.int", output), &intermediate)?;
        }
        Command::Pass2 {
            intermediate,
            symtab,
            optab,
            output,
            max_text_bytes,
        } => {
            let object_code = sicpass::second_pass_with(
                &read(&intermediate)?,
                &read(&symtab)?,
                &read(&optab)?,
                AssemblerOptions { max_text_bytes },
            )?;
            write(format!("{}.obj", output), &object_code)?;
        }
        Command::Assemble {
            source,
            optab,
            output,
        } => {
            let (saved_source, saved_optab) = session.restore()?;
            let program_text = source.as_deref().map(read).transpose()?.unwrap_or(saved_source);
            let optab_text = optab.as_deref().map(read).transpose()?.unwrap_or(saved_optab);

            let report = sicpass::assemble(&program_text, &optab_text);
            if let Some(message) = report.message() {
                anyhow::bail!("{}", message);
            }
            write(format!("{}.symtab", output), &report.pass_one.symtab)?;
            write(format!("{}.int", output), &report.pass_one.intermediate)?;
            if let Some(pass_two) = report.pass_two {
                write(format!("{}.obj", output), &pass_two.object_code)?;
                println!("{}", pass_two.object_code);
            }
        }
        Command::Optab { source } => {
            println!("{}", sicpass::generate_optab(&read(&source)?));
        }
        Command::Preset { name } => {
            let preset = presets::find(&name)
                .ok_or_else(|| anyhow::anyhow!("No preset named {}", name))?;
            println!("{}\n\n{}", preset.program_text, preset.optab_text);
        }
        Command::Save { source, optab } => {
            session.save_source(&read(&source)?)?;
            session.save_optab(&read(&optab)?)?;
        }
        Command::Restore => {
            let (program_text, optab_text) = session.restore()?;
            println!("{}\n\n{}", program_text, optab_text);
        }
        Command::Clear => session.clear()?,
    }

    Ok(())
}
