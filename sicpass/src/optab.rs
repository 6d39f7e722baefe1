use indexmap::IndexMap;

use crate::error::{AsmError, Artifact, Result};

/// Mnemonic to opcode mapping parsed from operation-table text.
///
/// Lines are `mnemonic opcode`, whitespace separated. Blank lines and lines with fewer
/// than two tokens are skipped. When a mnemonic appears twice the first definition wins,
/// matching the linear scan pass one performs.
#[derive(Debug, Clone, Default)]
pub struct Optab {
    opcodes: IndexMap<String, String>,
}

impl Optab {
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(AsmError::EmptyInput(Artifact::Optab));
        }

        let mut opcodes = IndexMap::new();
        for (mnemonic, opcode) in text.lines().filter_map(pair) {
            opcodes
                .entry(mnemonic.to_owned())
                .or_insert_with(|| opcode.to_owned());
        }

        Ok(Self { opcodes })
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, mnemonic: &str) -> bool {
        self.opcodes.contains_key(mnemonic)
    }

    /// The opcode as written in the table. Its hex format is only checked when pass two
    /// encodes it.
    pub fn get(&self, mnemonic: &str) -> Option<&str> {
        self.opcodes.get(mnemonic).map(String::as_str)
    }

    /// Parses the opcode byte for `mnemonic`, if present.
    pub fn opcode(&self, mnemonic: &str) -> Option<Result<u8>> {
        self.get(mnemonic)
            .map(|raw| u8::from_str_radix(raw, 16).map_err(AsmError::numeric(raw)))
    }

    pub fn len(&self) -> usize {
        self.opcodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opcodes.is_empty()
    }
}

/// First two whitespace-separated tokens of a table line.
pub(crate) fn pair(line: &str) -> Option<(&str, &str)> {
    let mut tokens = line.split_whitespace();
    Some((tokens.next()?, tokens.next()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_skips_short_lines() {
        let optab = Optab::parse("SUB     05 \n\nCMP\t03\nRSUB\nLDA\t00\n").unwrap();
        assert_eq!(optab.len(), 3);
        assert_eq!(optab.get("SUB"), Some("05"));
        assert_eq!(optab.get("CMP"), Some("03"));
        assert!(!optab.contains("RSUB"));
        assert!(!optab.contains("lda"));
    }

    #[test]
    fn first_definition_wins() {
        let optab = Optab::parse("LDA 00\nLDA 50").unwrap();
        assert_eq!(optab.get("LDA"), Some("00"));
        assert_eq!(optab.len(), 1);
    }

    #[test]
    fn opcode_is_parsed_lazily() {
        let optab = Optab::parse("STA 23\nBAD ZZ").unwrap();
        assert_eq!(optab.opcode("STA").unwrap().unwrap(), 0x23);
        assert!(matches!(
            optab.opcode("BAD"),
            Some(Err(AsmError::NumericParse { .. }))
        ));
        assert!(optab.opcode("ADD").is_none());
    }

    #[test]
    fn blank_table_is_empty_input() {
        assert!(matches!(
            Optab::parse("  \n"),
            Err(AsmError::EmptyInput(Artifact::Optab))
        ));
    }
}
