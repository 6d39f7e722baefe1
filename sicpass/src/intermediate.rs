use std::fmt::Display;

use crate::{
    constants::PLACEHOLDER,
    error::{AsmError, Artifact, Result},
};

/// A source line annotated with the address pass one assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediateRecord {
    pub location: Option<u32>,
    pub label: Option<String>,
    pub opcode: String,
    pub operand: Option<String>,
}

impl IntermediateRecord {
    fn parse(line: &str) -> Result<Self> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        let [location, label, opcode, operand] = tokens[..] else {
            return Err(AsmError::syntax(tokens.join(" ")));
        };

        let location = match location {
            PLACEHOLDER => None,
            hex => Some(u32::from_str_radix(hex, 16).map_err(AsmError::numeric(hex))?),
        };
        let field = |token: &str| (token != PLACEHOLDER).then(|| token.to_owned());

        Ok(Self {
            location,
            label: field(label),
            opcode: opcode.to_owned(),
            operand: field(operand),
        })
    }
}

impl Display for IntermediateRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.location {
            Some(location) => write!(f, "{:X}", location)?,
            None => write!(f, "{}", PLACEHOLDER)?,
        }
        write!(
            f,
            "\t{}\t{}\t{}",
            self.label.as_deref().unwrap_or(PLACEHOLDER),
            self.opcode,
            self.operand.as_deref().unwrap_or(PLACEHOLDER)
        )
    }
}

/// The full output of pass one, one record per source line plus the closing `END` record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediateFile {
    pub records: Vec<IntermediateRecord>,
}

impl IntermediateFile {
    pub fn push(&mut self, record: IntermediateRecord) {
        self.records.push(record);
    }

    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(AsmError::EmptyInput(Artifact::Intermediate));
        }

        let records = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(IntermediateRecord::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Address of the first located record.
    pub fn start(&self) -> Option<u32> {
        self.records.iter().take(2).find_map(|r| r.location)
    }

    /// Address of the last located record.
    pub fn end(&self) -> Option<u32> {
        self.records.iter().rev().take(2).find_map(|r| r.location)
    }

    pub fn program_name(&self) -> Option<&str> {
        self.records.first().and_then(|r| r.label.as_deref())
    }
}

impl Display for IntermediateFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for record in &self.records {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}
