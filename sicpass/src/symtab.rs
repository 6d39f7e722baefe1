use std::fmt::Display;

use indexmap::IndexMap;

use crate::{
    error::{AsmError, Artifact, Result},
    optab::pair,
};

static PROGRAM_SIZE: &str = "Program Size:";

/// Labels and the addresses they were defined at, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symtab {
    labels: IndexMap<String, u32>,
    program_size: Option<u32>,
}

impl Symtab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `label`. A label may only be defined once.
    pub fn add(&mut self, label: &str, address: u32) -> Result<()> {
        if self.labels.contains_key(label) {
            return Err(AsmError::DuplicateLabel(label.to_owned()));
        }
        log::debug!("symbol {} = {:X}", label, address);
        self.labels.insert(label.to_owned(), address);
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.labels.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels.iter().map(|(label, address)| (label.as_str(), *address))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn program_size(&self) -> Option<u32> {
        self.program_size
    }

    pub fn set_program_size(&mut self, size: u32) {
        self.program_size = Some(size);
    }

    /// Reads symbol-table text as written by pass one.
    ///
    /// The `Program Size:` trailer is read separately so it never lands in the label map.
    /// Blank lines and lines with a single token are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(AsmError::EmptyInput(Artifact::Symtab));
        }

        let mut symtab = Self::new();
        for line in text.lines() {
            if let Some(size) = line.trim().strip_prefix(PROGRAM_SIZE) {
                let size = size.trim();
                symtab.program_size =
                    Some(u32::from_str_radix(size, 16).map_err(AsmError::numeric(size))?);
                continue;
            }

            if let Some((label, address)) = pair(line) {
                let address =
                    u32::from_str_radix(address, 16).map_err(AsmError::numeric(address))?;
                symtab.labels.insert(label.to_owned(), address);
            }
        }

        Ok(symtab)
    }
}

impl Display for Symtab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (label, address) in self.iter() {
            writeln!(f, "{}\t{:X}", label, address)?;
        }
        if let Some(size) = self.program_size {
            write!(f, "\n{} {:X}\n", PROGRAM_SIZE, size)?;
        }
        Ok(())
    }
}
