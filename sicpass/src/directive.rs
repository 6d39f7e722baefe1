#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assembler {
    START,
    BYTE,
    WORD,
    RESW,
    RESB,
    END,
}

impl Assembler {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "START" => Some(Self::START),
            "BYTE" => Some(Self::BYTE),
            "WORD" => Some(Self::WORD),
            "RESW" => Some(Self::RESW),
            "RESB" => Some(Self::RESB),
            "END" => Some(Self::END),
            _ => None,
        }
    }
}

/// What an opcode field resolves to once the operation table has been consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Instruction,
    Assembler(Assembler),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_directives() {
        assert_eq!(Assembler::from_str("RESW"), Some(Assembler::RESW));
        assert_eq!(Assembler::from_str("BYTE"), Some(Assembler::BYTE));
        assert_eq!(Assembler::from_str("byte"), None);
        assert_eq!(Assembler::from_str("LDA"), None);
    }
}
