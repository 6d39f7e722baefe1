//! Ready-made programs for trying the assembler out.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub program_text: &'static str,
    pub optab_text: &'static str,
}

pub static PRESETS: &[Preset] = &[Preset {
    name: "copy",
    program_text: "COPY\tSTART   1000
-\t    LDA\t    ALPHA
-\t    ADD\t    ONE
-\t    SUB\t    TWO
-\t    STA\t    BETA
ALPHA\tBYTE\tC'CSE'
ONE \tRESB\t2
TWO\t    WORD\t2
BETA\tRESW\t2
-\t    END \t1000",
    optab_text: "SUB     05
CMP     03
LDA\t    00
STA\t    23
ADD\t    01
JNC\t    08",
}];

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}
