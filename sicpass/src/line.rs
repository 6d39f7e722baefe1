use crate::{
    constants::{lit_regex, PLACEHOLDER},
    error::{AsmError, Result},
};

/// One tokenized source line: `label opcode [operand]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub label: Option<&'a str>,
    pub opcode: &'a str,
    pub operand: Option<&'a str>,
}

impl<'a> SourceLine<'a> {
    /// Splits a line on whitespace.
    ///
    /// Blank lines and `.` comments yield `None`. A `-` label or operand means the field is
    /// absent. Tokens after the operand are ignored.
    pub fn parse(line: &'a str) -> Result<Option<Self>> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('.') {
            return Ok(None);
        }

        let tokens = trimmed.split_whitespace().collect::<Vec<_>>();
        if tokens.len() < 2 {
            return Err(AsmError::syntax(tokens.join(" ")));
        }

        Ok(Some(Self {
            label: field(tokens[0]),
            opcode: tokens[1],
            operand: tokens.get(2).copied().and_then(field),
        }))
    }

    pub fn expect_operand(&self) -> Result<&'a str> {
        self.operand.ok_or_else(|| {
            AsmError::syntax(format!("{} requires an operand", self.opcode))
        })
    }
}

fn field(token: &str) -> Option<&str> {
    (token != PLACEHOLDER).then_some(token)
}

/// Decodes a `BYTE` operand, `C'EOF'` or `X'F1'`, into the bytes it assembles to.
pub fn parse_literal(lit: &str) -> Result<Vec<u8>> {
    let captures = lit_regex()
        .captures(lit)
        .ok_or_else(|| AsmError::syntax(format!("invalid BYTE literal {}", lit)))?;

    if let Some(chars) = captures.name("chars") {
        let chars = chars.as_str();
        if !chars.is_ascii() {
            return Err(AsmError::syntax(format!("non-ASCII BYTE literal {}", lit)));
        }
        Ok(chars.bytes().collect())
    } else if let Some(bytes) = captures.name("bytes") {
        let bytes = bytes.as_str();
        (0..bytes.len())
            .step_by(2)
            .map(|i| {
                let pair = &bytes[i..i + 2];
                u8::from_str_radix(pair, 16).map_err(AsmError::numeric(pair))
            })
            .collect()
    } else {
        Err(AsmError::syntax(format!("invalid BYTE literal {}", lit)))
    }
}
