use std::collections::HashMap;

use once_cell::sync::OnceCell;
use regex::Regex;

/// Largest number of object bytes a single text record may hold (0x1E).
pub const MAX_TEXT_BYTES: usize = 30;

/// Width in bytes of every SIC instruction.
pub const INSTRUCTION_LEN: u32 = 3;

/// Highest address a label or instruction can occupy.
pub const MAX_ADDRESS: u32 = 0xFFFF;

/// Range of decimal values a `WORD` can hold in 24 bits.
pub const WORD_MIN: i32 = -0x80_0000;
pub const WORD_MAX: i32 = 0xFF_FFFF;

/// Placeholder used in the intermediate file for an absent location, label or operand.
pub const PLACEHOLDER: &str = "-";

pub static SIC_OPCODES: OnceCell<HashMap<&'static str, u8>> = OnceCell::new();
pub static LIT_REGEX: OnceCell<Regex> = OnceCell::new();
static LIT_REGEX_PATTERN: &str = r#"^(?:C'(?P<chars>[^']*)'|X'(?P<bytes>(?:[0-9A-Fa-f]{2})*)')$"#;

/// The standard SIC instruction set.
pub fn sic_opcodes() -> &'static HashMap<&'static str, u8> {
    SIC_OPCODES.get_or_init(|| {
        [
            ("ADD", 0x18),
            ("AND", 0x40),
            ("COMP", 0x28),
            ("DIV", 0x24),
            ("J", 0x3C),
            ("JEQ", 0x30),
            ("JGT", 0x34),
            ("JLT", 0x38),
            ("JSUB", 0x48),
            ("LDA", 0x00),
            ("LDCH", 0x50),
            ("LDL", 0x08),
            ("LDX", 0x04),
            ("MUL", 0x20),
            ("OR", 0x44),
            ("RD", 0xD8),
            ("RSUB", 0x4C),
            ("STA", 0x0C),
            ("STCH", 0x54),
            ("STL", 0x14),
            ("STSW", 0xE8),
            ("STX", 0x10),
            ("SUB", 0x1C),
            ("TD", 0xE0),
            ("TIX", 0x2C),
            ("WD", 0xDC),
        ]
        .into()
    })
}

pub fn lit_regex() -> &'static Regex {
    LIT_REGEX.get_or_init(|| Regex::new(LIT_REGEX_PATTERN).expect("Invalid literal regex"))
}
