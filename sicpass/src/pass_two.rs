use crate::{
    constants::{INSTRUCTION_LEN, MAX_TEXT_BYTES, WORD_MAX, WORD_MIN},
    directive::Assembler,
    error::{AsmError, Result},
    intermediate::{IntermediateFile, IntermediateRecord},
    line::parse_literal,
    optab::Optab,
    record::{Data, Record, Text},
    symtab::Symtab,
};

/// Knobs for object-code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// A text record is closed once it holds this many bytes. Values below one
    /// instruction are raised to 3.
    pub max_text_bytes: usize,
}

impl AssemblerOptions {
    pub fn text_limit(&self) -> usize {
        self.max_text_bytes.max(INSTRUCTION_LEN as usize)
    }
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            max_text_bytes: MAX_TEXT_BYTES,
        }
    }
}

struct PassTwo<'a> {
    cur_text: Option<Text>,
    records: Vec<Record>,
    start_addr: u32,
    symtab: &'a Symtab,
    optab: &'a Optab,
    options: AssemblerOptions,
}

impl<'a> PassTwo<'a> {
    fn new(
        intermediate: &IntermediateFile,
        symtab: &'a Symtab,
        optab: &'a Optab,
        options: AssemblerOptions,
    ) -> Result<Self> {
        let start_addr = intermediate
            .start()
            .ok_or_else(|| AsmError::syntax("no located record to start from"))?;
        let end_addr = intermediate
            .end()
            .ok_or_else(|| AsmError::syntax("no located record to end on"))?;
        let length = end_addr
            .checked_sub(start_addr)
            .ok_or_else(|| AsmError::syntax("program ends before its start address"))?;

        let records = vec![Record::Header {
            name: intermediate.program_name().unwrap_or_default().to_owned(),
            start: start_addr,
            length,
        }];

        Ok(Self {
            cur_text: None,
            records,
            start_addr,
            symtab,
            optab,
            options,
        })
    }

    fn assemble_lines(mut self, intermediate: &IntermediateFile) -> Result<Vec<Record>> {
        for line in intermediate.records.iter().skip(1) {
            let Some(location) = line.location else {
                break;
            };
            if line.opcode == "END" {
                break;
            }
            self.assemble_line(location, line)?;
        }

        if let Some(text) = self.cur_text.take() {
            self.flush(text);
        }

        self.records.push(Record::End {
            first_instruction: self.start_addr,
        });

        Ok(self.records)
    }

    fn flush(&mut self, text: Text) {
        if !text.is_empty() {
            log::debug!("text record at {:06X}, {} bytes", text.address, text.len());
            self.records.push(Record::Text(text));
        }
    }

    fn add_instruction(&mut self, address: u32, mut instruction: Data) {
        let limit = self.options.text_limit();
        let mut text = self.cur_text.take().unwrap_or_else(|| Text::new(address));

        if let Data::Byte(mut bytes) = instruction {
            let mut address = address;
            while text.len() + bytes.len() > limit {
                let space_remaining = limit.saturating_sub(text.len());
                let new_text: Vec<u8> = bytes.drain(..space_remaining).collect();
                address += new_text.len() as u32;
                if !new_text.is_empty() {
                    text.instructions.push(Data::Byte(new_text));
                }
                self.flush(text);
                text = Text::new(address);
            }

            instruction = Data::Byte(bytes);
        } else if text.len() + instruction.len() > limit {
            self.flush(text);
            text = Text::new(address);
        }

        text.instructions.push(instruction);
        if text.len() >= limit {
            self.flush(text);
        } else {
            self.cur_text = Some(text);
        }
    }

    fn resolve(&self, operand: Option<&str>) -> Result<u16> {
        let Some(operand) = operand else {
            return Ok(0);
        };
        let address = self
            .symtab
            .get(operand)
            .ok_or_else(|| AsmError::UndefinedSymbol(operand.to_owned()))?;
        u16::try_from(address).map_err(|_| {
            AsmError::syntax(format!("address {:X} of {} is out of range", address, operand))
        })
    }

    fn assemble_line(&mut self, location: u32, line: &IntermediateRecord) -> Result<()> {
        if let Some(opcode) = self.optab.opcode(&line.opcode) {
            let opcode = opcode?;
            let address = self.resolve(line.operand.as_deref())?;
            self.add_instruction(location, Data::Instruction { opcode, address });
            return Ok(());
        }

        let operand = || {
            line.operand.as_deref().ok_or_else(|| {
                AsmError::syntax(format!("{} requires an operand", line.opcode))
            })
        };

        match Assembler::from_str(&line.opcode) {
            Some(Assembler::BYTE) => {
                let bytes = parse_literal(operand()?)?;
                self.add_instruction(location, Data::Byte(bytes));
            }
            Some(Assembler::WORD) => {
                let value = operand()?;
                let word = value.parse::<i32>().map_err(AsmError::numeric(value))?;
                if !(WORD_MIN..=WORD_MAX).contains(&word) {
                    return Err(AsmError::syntax(format!(
                        "WORD {} does not fit in 24 bits",
                        value
                    )));
                }
                self.add_instruction(location, Data::Word(word as u32 & 0x00FF_FFFF));
            }
            Some(Assembler::RESB | Assembler::RESW) => {}
            Some(Assembler::START | Assembler::END) | None => {
                return Err(AsmError::InvalidOpcode(line.opcode.clone()));
            }
        }

        Ok(())
    }
}

/// Builds the header, text and end records for an addressed program.
pub fn pass_two(
    intermediate: &IntermediateFile,
    symtab: &Symtab,
    optab: &Optab,
    options: AssemblerOptions,
) -> Result<Vec<Record>> {
    let pass = PassTwo::new(intermediate, symtab, optab, options)?;
    let records = pass.assemble_lines(intermediate)?;
    log::info!("pass two: {} records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assemble(intermediate: &str, symtab: &str, optab: &str, limit: usize) -> Result<String> {
        let records = pass_two(
            &IntermediateFile::parse(intermediate)?,
            &Symtab::parse(symtab)?,
            &Optab::parse(optab)?,
            AssemblerOptions {
                max_text_bytes: limit,
            },
        )?;
        Ok(records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    #[test]
    fn no_operand_instruction_uses_zero_address() {
        let object = assemble(
            "-\tP\tSTART\t0\n0\t-\tRSUB\t-\n3\t-\tEND\t-\n",
            "\nProgram Size: 3\n",
            "RSUB 4C",
            30,
        )
        .unwrap();
        assert_eq!(object, "H^P^000000^000003\nT^000000^03^4C0000\nE^000000");
    }

    #[test]
    fn undefined_symbol_names_operand() {
        let err = assemble(
            "-\tP\tSTART\t0\n0\t-\tLDA\tGAMMA\n3\t-\tEND\t-\n",
            "\nProgram Size: 3\n",
            "LDA 00",
            30,
        )
        .unwrap_err();
        assert!(matches!(err, AsmError::UndefinedSymbol(ref s) if s == "GAMMA"));
    }

    #[test]
    fn flushes_at_limit_and_anchors_next_record() {
        let object = assemble(
            "-\tP\tSTART\t100\n100\tA\tWORD\t1\n103\t-\tWORD\t2\n106\t-\tWORD\t-3\n109\t-\tEND\t-\n",
            "A\t100\n\nProgram Size: 9\n",
            "LDA 00",
            6,
        )
        .unwrap();
        assert_eq!(
            object,
            "H^P^000100^000009\nT^000100^06^000001^000002\nT^000106^03^FFFFFD\nE^000100"
        );
    }

    #[test]
    fn word_out_of_range() {
        for value in ["16777216", "-8388609"] {
            let err = assemble(
                &format!("-\tP\tSTART\t0\n0\tA\tWORD\t{}\n3\t-\tEND\t-\n", value),
                "A\t0\n",
                "LDA 00",
                30,
            )
            .unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Syntax error: WORD {} does not fit in 24 bits", value)
            );
        }

        let object = assemble(
            "-\tP\tSTART\t0\n0\tA\tWORD\t16777215\n3\t-\tWORD\t-8388608\n6\t-\tEND\t-\n",
            "A\t0\n",
            "LDA 00",
            30,
        )
        .unwrap();
        assert_eq!(object, "H^P^000000^000006\nT^000000^06^FFFFFF^800000\nE^000000");
    }

    #[test]
    fn limit_below_one_instruction_is_raised() {
        let object = assemble(
            "-\tP\tSTART\t0\n0\tA\tWORD\t1\n3\t-\tWORD\t2\n6\t-\tBYTE\tC'ABCD'\nA\t-\tEND\t-\n",
            "A\t0\n",
            "LDA 00",
            1,
        )
        .unwrap();
        assert_eq!(
            object,
            "H^P^000000^00000A\nT^000000^03^000001\nT^000003^03^000002\n\
             T^000006^03^414243\nT^000009^01^44\nE^000000"
        );
    }

    #[test]
    fn splits_long_byte_literal() {
        let object = assemble(
            "-\tP\tSTART\t0\n0\t-\tLDA\tS\n3\tS\tBYTE\tC'ABCDE'\n8\t-\tEND\t-\n",
            "S\t3\n",
            "LDA 00",
            6,
        )
        .unwrap();
        assert_eq!(
            object,
            "H^P^000000^000008\nT^000000^06^000003^414243\nT^000006^02^4445\nE^000000"
        );
    }

    #[test]
    fn reserved_storage_emits_nothing() {
        let object = assemble(
            "-\tP\tSTART\t0\n0\tB\tRESB\t4\n4\tW\tRESW\t1\n7\t-\tEND\t-\n",
            "B\t0\nW\t4\n",
            "LDA 00",
            30,
        )
        .unwrap();
        assert_eq!(object, "H^P^000000^000007\nE^000000");
    }

    #[test]
    fn unknown_opcode_and_bad_opcode_hex() {
        assert!(matches!(
            assemble("-\tP\tSTART\t0\n0\t-\tMOV\tX\n3\t-\tEND\t-\n", "X\t0\n", "LDA 00", 30),
            Err(AsmError::InvalidOpcode(ref o)) if o == "MOV"
        ));
        assert!(matches!(
            assemble("-\tP\tSTART\t0\n0\tX\tLDA\tX\n3\t-\tEND\t-\n", "X\t0\n", "LDA G0", 30),
            Err(AsmError::NumericParse { .. })
        ));
    }
}
