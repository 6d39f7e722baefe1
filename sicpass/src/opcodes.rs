use crate::constants::sic_opcodes;

/// Column the opcode lands in for a generated table line.
const OPCODE_COLUMN: usize = 8;

fn padding(mnemonic: &str) -> usize {
    match mnemonic.len() {
        1..=4 => OPCODE_COLUMN - mnemonic.len(),
        _ => 5,
    }
}

/// Builds operation-table text for the standard SIC mnemonics used in `program_text`.
///
/// One line is written per source line whose opcode field is a standard mnemonic. Other
/// lines are skipped.
pub fn generate_optab(program_text: &str) -> String {
    program_text
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter_map(|mnemonic| {
            sic_opcodes()
                .get(mnemonic)
                .map(|opcode| {
                    format!("{}{}{:0>2X}", mnemonic, " ".repeat(padding(mnemonic)), opcode)
                })
        })
        .collect::<Vec<_>>()
        .join("\n")
}
