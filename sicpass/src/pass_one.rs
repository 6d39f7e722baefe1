use crate::{
    constants::{INSTRUCTION_LEN, MAX_ADDRESS},
    directive::{Assembler, Directive},
    error::{AsmError, Artifact, Result},
    intermediate::{IntermediateFile, IntermediateRecord},
    line::{parse_literal, SourceLine},
    optab::Optab,
    symtab::Symtab,
};

/// Output of the first pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOne {
    pub symtab: Symtab,
    pub intermediate: IntermediateFile,
    pub start_addr: u32,
    pub length: u32,
}

struct FirstPass<'a> {
    optab: &'a Optab,
    cur_offset: u32,
    symtab: Symtab,
    intermediate: IntermediateFile,
}

impl<'a> FirstPass<'a> {
    fn new(optab: &'a Optab, start_addr: u32) -> Self {
        Self {
            optab,
            cur_offset: start_addr,
            symtab: Symtab::new(),
            intermediate: IntermediateFile::default(),
        }
    }

    fn directive(&self, opcode: &str) -> Result<Directive> {
        if self.optab.contains(opcode) {
            return Ok(Directive::Instruction);
        }
        match Assembler::from_str(opcode) {
            Some(Assembler::START) => Err(AsmError::syntax(
                "unexpected START, only one control section is supported",
            )),
            Some(asm) => Ok(Directive::Assembler(asm)),
            None => Err(AsmError::InvalidOpcode(opcode.to_owned())),
        }
    }

    fn size(directive: Directive, line: &SourceLine) -> Result<u32> {
        Ok(match directive {
            Directive::Instruction => INSTRUCTION_LEN,
            Directive::Assembler(asm) => match asm {
                Assembler::START | Assembler::END => 0,
                Assembler::BYTE => parse_literal(line.expect_operand()?)?.len() as u32,
                Assembler::WORD => INSTRUCTION_LEN,
                Assembler::RESB => count(line.expect_operand()?)?,
                Assembler::RESW => count(line.expect_operand()?)?
                    .checked_mul(INSTRUCTION_LEN)
                    .ok_or_else(|| AsmError::syntax("RESW count overflows"))?,
            },
        })
    }

    /// Handles one line after `START`. Returns `false` once `END` is reached.
    fn parse_line(&mut self, line: &SourceLine) -> Result<bool> {
        if line.opcode == "END" {
            return Ok(false);
        }

        check_address(self.cur_offset, MAX_ADDRESS)?;

        if let Some(label) = line.label {
            self.symtab.add(label, self.cur_offset)?;
        }

        let directive = self.directive(line.opcode)?;

        self.intermediate.push(IntermediateRecord {
            location: Some(self.cur_offset),
            label: line.label.map(str::to_owned),
            opcode: line.opcode.to_owned(),
            operand: line.operand.map(str::to_owned),
        });

        let size = Self::size(directive, line)?;
        self.cur_offset = self
            .cur_offset
            .checked_add(size)
            .ok_or_else(|| AsmError::syntax("location counter overflows"))?;

        Ok(true)
    }
}

fn check_address(address: u32, limit: u32) -> Result<()> {
    if address > limit {
        return Err(AsmError::syntax(format!(
            "address {:X} is beyond {:X}",
            address, MAX_ADDRESS
        )));
    }
    Ok(())
}

fn count(operand: &str) -> Result<u32> {
    operand.parse::<u32>().map_err(AsmError::numeric(operand))
}

/// Assigns addresses to every line up to `END` and collects the symbol table.
pub fn pass_one(program_text: &str, optab_text: &str) -> Result<PassOne> {
    if program_text.trim().is_empty() {
        return Err(AsmError::EmptyInput(Artifact::Source));
    }
    if optab_text.trim().is_empty() {
        return Err(AsmError::EmptyInput(Artifact::Optab));
    }
    let optab = Optab::parse(optab_text)?;

    let mut lines = program_text
        .lines()
        .filter_map(|line| SourceLine::parse(line).transpose());

    let start = lines
        .next()
        .transpose()?
        .ok_or(AsmError::EmptyInput(Artifact::Source))?;
    if start.opcode != "START" {
        return Err(AsmError::syntax(format!(
            "expected START directive, found {}",
            start.opcode
        )));
    }
    let start_operand = start.expect_operand()?;
    let start_addr =
        u32::from_str_radix(start_operand, 16).map_err(AsmError::numeric(start_operand))?;
    check_address(start_addr, MAX_ADDRESS)?;

    let mut pass = FirstPass::new(&optab, start_addr);
    pass.intermediate.push(IntermediateRecord {
        location: None,
        label: start.label.map(str::to_owned),
        opcode: start.opcode.to_owned(),
        operand: Some(start_operand.to_owned()),
    });

    let mut ended = false;
    for line in lines {
        if !pass.parse_line(&line?)? {
            ended = true;
            break;
        }
    }
    if !ended {
        return Err(AsmError::syntax("missing END directive"));
    }
    // The program may run up to the last byte of memory.
    check_address(pass.cur_offset, MAX_ADDRESS + 1)?;

    pass.intermediate.push(IntermediateRecord {
        location: Some(pass.cur_offset),
        label: None,
        opcode: "END".to_owned(),
        operand: None,
    });

    let length = pass.cur_offset - start_addr;
    pass.symtab.set_program_size(length);
    log::info!(
        "pass one: {} lines, {} symbols, program size {:X}",
        pass.intermediate.records.len(),
        pass.symtab.len(),
        length
    );

    Ok(PassOne {
        symtab: pass.symtab,
        intermediate: pass.intermediate,
        start_addr,
        length,
    })
}
