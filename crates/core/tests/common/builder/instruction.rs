//! Fluent encoder for RV32IM instruction words, for hand-assembling test
//! programs without an external assembler.

use r10k_core::isa::rv32i::{funct3, funct7, opcodes::*};
use r10k_core::isa::rv32m::{funct3 as mfunct3, opcodes::M_EXTENSION};

#[derive(Default)]
pub struct InstructionBuilder {
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
    imm: i32,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // --- R-type: base ALU ---

    pub fn add(mut self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3::ADD_SUB;
        self.funct7 = funct7::DEFAULT;
        self
    }

    pub fn sub(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.add(rd, rs1, rs2).with_funct7(funct7::SUB)
    }

    pub fn and(mut self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3::AND;
        self
    }

    pub fn or(mut self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3::OR;
        self
    }

    pub fn slt(mut self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.opcode = OP_REG;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3::SLT;
        self
    }

    // --- R-type: M extension ---

    fn m_ext(mut self, rd: u32, rs1: u32, rs2: u32, funct3_val: u32) -> Self {
        self.opcode = OP_REG;
        self.rd = rd;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3_val;
        self.funct7 = M_EXTENSION;
        self
    }

    pub fn mul(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::MUL)
    }

    pub fn mulh(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::MULH)
    }

    pub fn mulhsu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::MULHSU)
    }

    pub fn mulhu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::MULHU)
    }

    pub fn div(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::DIV)
    }

    pub fn divu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::DIVU)
    }

    pub fn rem(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::REM)
    }

    pub fn remu(self, rd: u32, rs1: u32, rs2: u32) -> Self {
        self.m_ext(rd, rs1, rs2, mfunct3::REMU)
    }

    // --- I-type ---

    pub fn addi(mut self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = OP_IMM;
        self.rd = rd;
        self.rs1 = rs1;
        self.funct3 = funct3::ADD_SUB;
        self.imm = imm;
        self
    }

    pub fn lw(mut self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = OP_LOAD;
        self.rd = rd;
        self.rs1 = rs1;
        self.funct3 = funct3::LW;
        self.imm = imm;
        self
    }

    pub fn jalr(mut self, rd: u32, rs1: u32, imm: i32) -> Self {
        self.opcode = OP_JALR;
        self.rd = rd;
        self.rs1 = rs1;
        self.funct3 = 0;
        self.imm = imm;
        self
    }

    // --- S-type ---

    pub fn sw(mut self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.opcode = OP_STORE;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3::SW;
        self.imm = imm;
        self
    }

    // --- B-type ---

    fn branch(mut self, rs1: u32, rs2: u32, imm: i32, funct3_val: u32) -> Self {
        self.opcode = OP_BRANCH;
        self.rs1 = rs1;
        self.rs2 = rs2;
        self.funct3 = funct3_val;
        self.imm = imm;
        self
    }

    pub fn beq(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.branch(rs1, rs2, imm, funct3::BEQ)
    }

    pub fn bne(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.branch(rs1, rs2, imm, funct3::BNE)
    }

    pub fn blt(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.branch(rs1, rs2, imm, funct3::BLT)
    }

    pub fn bge(self, rs1: u32, rs2: u32, imm: i32) -> Self {
        self.branch(rs1, rs2, imm, funct3::BGE)
    }

    // --- U-type ---

    pub fn lui(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_LUI;
        self.rd = rd;
        self.imm = imm;
        self
    }

    // --- J-type ---

    pub fn jal(mut self, rd: u32, imm: i32) -> Self {
        self.opcode = OP_JAL;
        self.rd = rd;
        self.imm = imm;
        self
    }

    /// `EBREAK`: the only terminator this core decodes.
    pub fn ebreak() -> u32 {
        0x0010_0073
    }

    fn with_funct7(mut self, funct7: u32) -> Self {
        self.funct7 = funct7;
        self
    }

    pub fn build(self) -> u32 {
        let opcode = self.opcode & 0x7F;
        let rd = (self.rd & 0x1F) << 7;
        let funct3 = (self.funct3 & 0x7) << 12;
        let rs1 = (self.rs1 & 0x1F) << 15;
        let rs2 = (self.rs2 & 0x1F) << 20;
        let funct7 = (self.funct7 & 0x7F) << 25;

        match opcode {
            OP_REG => funct7 | rs2 | rs1 | funct3 | rd | opcode,
            OP_IMM | OP_LOAD | OP_JALR => {
                let imm_val = (self.imm as u32) & 0xFFF;
                (imm_val << 20) | rs1 | funct3 | rd | opcode
            }
            OP_STORE => {
                let imm_val = self.imm as u32;
                let imm_11_5 = ((imm_val >> 5) & 0x7F) << 25;
                let imm_4_0 = (imm_val & 0x1F) << 7;
                imm_11_5 | rs2 | rs1 | funct3 | imm_4_0 | opcode
            }
            OP_BRANCH => {
                let imm_val = self.imm as u32;
                let bit_12 = ((imm_val >> 12) & 0x1) << 31;
                let bits_10_5 = ((imm_val >> 5) & 0x3F) << 25;
                let bits_4_1 = ((imm_val >> 1) & 0xF) << 8;
                let bit_11 = ((imm_val >> 11) & 0x1) << 7;
                bit_12 | bits_10_5 | rs2 | rs1 | funct3 | bits_4_1 | bit_11 | opcode
            }
            OP_LUI => {
                // `imm` is the raw 20-bit upper immediate, not pre-shifted.
                let imm_val = (self.imm as u32) & 0xFFFFF;
                (imm_val << 12) | rd | opcode
            }
            OP_JAL => {
                let imm_val = self.imm as u32;
                let bit_20 = ((imm_val >> 20) & 0x1) << 31;
                let bits_10_1 = ((imm_val >> 1) & 0x3FF) << 21;
                let bit_11 = ((imm_val >> 11) & 0x1) << 20;
                let bits_19_12 = ((imm_val >> 12) & 0xFF) << 12;
                bit_20 | bits_10_1 | bit_11 | bits_19_12 | rd | opcode
            }
            _ => panic!("unsupported opcode: {opcode:#x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addi_encodes_i_type() {
        // addi x10, x0, 42
        let word = InstructionBuilder::new().addi(10, 0, 42).build();
        assert_eq!(word, (42 << 20) | (10 << 7) | OP_IMM);
    }

    #[test]
    fn add_encodes_r_type() {
        // add x5, x6, x7
        let word = InstructionBuilder::new().add(5, 6, 7).build();
        assert_eq!(word, (7 << 20) | (6 << 15) | (5 << 7) | OP_REG);
    }

    #[test]
    fn ebreak_matches_decoder_terminator_encoding() {
        assert_eq!(InstructionBuilder::ebreak(), 0x0010_0073);
    }
}
