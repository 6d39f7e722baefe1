//! The boundary a front end talks to: every pass returns its text artifacts, or empty
//! artifacts and a message starting with `Error!`.

use crate::{first_pass, second_pass, AsmError};

fn error_message(err: &AsmError) -> String {
    format!("Error! {}", err)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassOneReport {
    pub symtab: String,
    pub intermediate: String,
    pub message: String,
}

impl PassOneReport {
    pub fn is_ok(&self) -> bool {
        self.message.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassTwoReport {
    pub object_code: String,
    pub message: String,
}

impl PassTwoReport {
    pub fn is_ok(&self) -> bool {
        self.message.is_empty()
    }
}

pub fn run_pass_one(program_text: &str, optab_text: &str) -> PassOneReport {
    match first_pass(program_text, optab_text) {
        Ok((symtab, intermediate)) => PassOneReport {
            symtab,
            intermediate,
            message: String::new(),
        },
        Err(err) => {
            log::warn!("pass one failed: {}", err);
            PassOneReport {
                message: error_message(&err),
                ..Default::default()
            }
        }
    }
}

pub fn run_pass_two(intermediate_text: &str, symtab_text: &str, optab_text: &str) -> PassTwoReport {
    match second_pass(intermediate_text, symtab_text, optab_text) {
        Ok(object_code) => PassTwoReport {
            object_code,
            message: String::new(),
        },
        Err(err) => {
            log::warn!("pass two failed: {}", err);
            PassTwoReport {
                message: error_message(&err),
                ..Default::default()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    pub pass_one: PassOneReport,
    /// `None` when pass one failed and pass two was never run.
    pub pass_two: Option<PassTwoReport>,
}

impl AssemblyReport {
    /// The first failure message, if any pass failed.
    pub fn message(&self) -> Option<&str> {
        if !self.pass_one.is_ok() {
            return Some(&self.pass_one.message);
        }
        self.pass_two
            .as_ref()
            .filter(|report| !report.is_ok())
            .map(|report| report.message.as_str())
    }
}

/// Runs both passes, skipping pass two when pass one fails.
pub fn assemble(program_text: &str, optab_text: &str) -> AssemblyReport {
    let pass_one = run_pass_one(program_text, optab_text);
    if !pass_one.is_ok() {
        return AssemblyReport {
            pass_one,
            pass_two: None,
        };
    }

    let pass_two = run_pass_two(&pass_one.intermediate, &pass_one.symtab, optab_text);
    AssemblyReport {
        pass_one,
        pass_two: Some(pass_two),
    }
}
