pub use error::{Artifact, AsmError, Result};
pub use intermediate::{IntermediateFile, IntermediateRecord};
pub use opcodes::generate_optab;
pub use optab::Optab;
pub use pass_one::{pass_one, PassOne};
pub use pass_two::{pass_two, AssemblerOptions};
pub use record::{Data, Record, Text};
pub use report::{
    assemble, run_pass_one, run_pass_two, AssemblyReport, PassOneReport, PassTwoReport,
};
pub use symtab::Symtab;

mod constants;
mod directive;
mod error;
mod intermediate;
mod line;
mod opcodes;
mod optab;
mod pass_one;
mod pass_two;
pub mod presets;
mod record;
mod report;
pub mod session;
mod symtab;

/// Runs pass one over source and operation-table text.
///
/// Returns the symbol-table text and the intermediate text.
///
/// # Errors
///
/// If either input is empty or the program is malformed
pub fn first_pass(program_text: &str, optab_text: &str) -> Result<(String, String)> {
    let pass = pass_one(program_text, optab_text)?;
    Ok((pass.symtab.to_string(), pass.intermediate.to_string()))
}

/// Runs pass two over the text artifacts of pass one and returns the object code.
///
/// # Errors
///
/// If any input is empty, cannot be parsed, or references an undefined symbol
pub fn second_pass(intermediate_text: &str, symtab_text: &str, optab_text: &str) -> Result<String> {
    second_pass_with(
        intermediate_text,
        symtab_text,
        optab_text,
        AssemblerOptions::default(),
    )
}

/// Like [`second_pass`], with explicit options for the object records.
///
/// # Errors
///
/// If any input is empty, cannot be parsed, or references an undefined symbol
pub fn second_pass_with(
    intermediate_text: &str,
    symtab_text: &str,
    optab_text: &str,
    options: AssemblerOptions,
) -> Result<String> {
    for (text, artifact) in [
        (intermediate_text, Artifact::Intermediate),
        (symtab_text, Artifact::Symtab),
        (optab_text, Artifact::Optab),
    ] {
        if text.trim().is_empty() {
            return Err(AsmError::EmptyInput(artifact));
        }
    }

    let intermediate = IntermediateFile::parse(intermediate_text)?;
    let symtab = Symtab::parse(symtab_text)?;
    let optab = Optab::parse(optab_text)?;

    let records = pass_two(&intermediate, &symtab, &optab, options)?;

    Ok(records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}
