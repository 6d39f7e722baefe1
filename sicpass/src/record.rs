use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data {
    Instruction { opcode: u8, address: u16 },
    Byte(Vec<u8>),
    Word(u32),
}

impl Data {
    pub fn len(&self) -> usize {
        match self {
            Data::Instruction { .. } | Data::Word(_) => 3,
            Data::Byte(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Data::Instruction { opcode, address } => write!(f, "{:0>2X}{:0>4X}", opcode, address),
            Data::Byte(bytes) => {
                for byte in bytes {
                    write!(f, "{:0>2X}", byte)?;
                }
                Ok(())
            }
            Data::Word(word) => {
                let [_, a, b, c] = word.to_be_bytes();
                write!(f, "{:0>2X}{:0>2X}{:0>2X}", a, b, c)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub address: u32,
    pub instructions: Vec<Data>,
}

impl Text {
    pub fn new(address: u32) -> Self {
        Self {
            address,
            instructions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.instructions.iter().map(Data::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Header {
        name: String,
        start: u32,
        length: u32,
    },
    Text(Text),
    End {
        first_instruction: u32,
    },
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Header {
                name,
                start,
                length,
            } => write!(f, "H^{}^{:0>6X}^{:0>6X}", name, start, length),
            Record::Text(text) => {
                write!(f, "T^{:0>6X}^{:0>2X}", text.address, text.len())?;
                for data in text.instructions.iter().filter(|d| !d.is_empty()) {
                    write!(f, "^{}", data)?;
                }
                Ok(())
            }
            Record::End { first_instruction } => write!(f, "E^{:0>6X}", first_instruction),
        }
    }
}
