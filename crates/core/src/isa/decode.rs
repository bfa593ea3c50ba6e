//! RV32IM instruction decoder.
//!
//! Decodes a raw 32-bit instruction word into [`InstructionArgs`]: the operand
//! sources, control flags, and immediate that rename, the ALU/mul-div units, the
//! LSU, and the branch-resolution logic all consume. Mutually-exclusive RV32I/M
//! opcode encodings make a direct match-based decoder both correct and more
//! idiomatic than literally overlaying every instruction's `.select()` across a
//! shared accumulator the way a hardware-construction DSL must.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::{funct3 as mfunct3, opcodes as mopcodes};

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for extracting the I-Type immediate field (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

const S_IMM_LOW_SHIFT: u32 = 7;
const S_IMM_LOW_MASK: u32 = 0x1F;
const S_IMM_HIGH_SHIFT: u32 = 25;
const S_IMM_HIGH_MASK: u32 = 0x7F;
const S_IMM_COMBINED_SHIFT: u32 = 5;
const S_IMM_BITS: u32 = 12;

const B_IMM_11_SHIFT: u32 = 7;
const B_IMM_11_MASK: u32 = 1;
const B_IMM_4_1_SHIFT: u32 = 8;
const B_IMM_4_1_MASK: u32 = 0xF;
const B_IMM_10_5_SHIFT: u32 = 25;
const B_IMM_10_5_MASK: u32 = 0x3F;
const B_IMM_12_SHIFT: u32 = 31;
const B_IMM_12_MASK: u32 = 1;
const B_IMM_BITS: u32 = 13;
const B_IMM_12_POS: u32 = 12;
const B_IMM_11_POS: u32 = 11;
const B_IMM_10_5_POS: u32 = 5;
const B_IMM_4_1_POS: u32 = 1;

const U_IMM_MASK: u32 = 0xFFFF_F000;

const J_IMM_19_12_SHIFT: u32 = 12;
const J_IMM_19_12_MASK: u32 = 0xFF;
const J_IMM_11_SHIFT: u32 = 20;
const J_IMM_11_MASK: u32 = 1;
const J_IMM_10_1_SHIFT: u32 = 21;
const J_IMM_10_1_MASK: u32 = 0x3FF;
const J_IMM_20_SHIFT: u32 = 31;
const J_IMM_20_MASK: u32 = 1;
const J_IMM_BITS: u32 = 21;
const J_IMM_20_POS: u32 = 20;
const J_IMM_19_12_POS: u32 = 12;
const J_IMM_11_POS: u32 = 11;
const J_IMM_10_1_POS: u32 = 1;

/// EBREAK's full 32-bit encoding (`OP_SYSTEM`, all other fields zero except the
/// immediate, which is 1 for EBREAK and 0 for ECALL).
const EBREAK_ENCODING: u32 = 0x0010_0073;

fn decode_i_type_imm(inst: u32) -> i64 {
    ((inst as i32) >> I_IMM_SHIFT) as i64
}

fn decode_s_type_imm(inst: u32) -> i64 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    let combined = (high << S_IMM_COMBINED_SHIFT) | low;
    sign_extend(combined, S_IMM_BITS)
}

fn decode_b_type_imm(inst: u32) -> i64 {
    let bit_11 = (inst >> B_IMM_11_SHIFT) & B_IMM_11_MASK;
    let bits_4_1 = (inst >> B_IMM_4_1_SHIFT) & B_IMM_4_1_MASK;
    let bits_10_5 = (inst >> B_IMM_10_5_SHIFT) & B_IMM_10_5_MASK;
    let bit_12 = (inst >> B_IMM_12_SHIFT) & B_IMM_12_MASK;

    let combined = (bit_12 << B_IMM_12_POS)
        | (bit_11 << B_IMM_11_POS)
        | (bits_10_5 << B_IMM_10_5_POS)
        | (bits_4_1 << B_IMM_4_1_POS);
    sign_extend(combined, B_IMM_BITS)
}

fn decode_u_type_imm(inst: u32) -> i64 {
    ((inst & U_IMM_MASK) as i32) as i64
}

fn decode_j_type_imm(inst: u32) -> i64 {
    let bits_19_12 = (inst >> J_IMM_19_12_SHIFT) & J_IMM_19_12_MASK;
    let bit_11 = (inst >> J_IMM_11_SHIFT) & J_IMM_11_MASK;
    let bits_10_1 = (inst >> J_IMM_10_1_SHIFT) & J_IMM_10_1_MASK;
    let bit_20 = (inst >> J_IMM_20_SHIFT) & J_IMM_20_MASK;

    let combined = (bit_20 << J_IMM_20_POS)
        | (bits_19_12 << J_IMM_19_12_POS)
        | (bit_11 << J_IMM_11_POS)
        | (bits_10_1 << J_IMM_10_1_POS);
    sign_extend(combined, J_IMM_BITS)
}

fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift >> shift) as i64
}

/// Decodes a raw instruction into its component fields (opcode, registers,
/// function codes, and format-appropriate sign-extended immediate).
#[must_use]
pub fn decode_fields(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => decode_i_type_imm(inst),
        opcodes::OP_STORE => decode_s_type_imm(inst),
        opcodes::OP_BRANCH => decode_b_type_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => decode_u_type_imm(inst),
        opcodes::OP_JAL => decode_j_type_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: InstructionBits::rd(&inst),
        rs1: InstructionBits::rs1(&inst),
        rs2: InstructionBits::rs2(&inst),
        funct3: InstructionBits::funct3(&inst),
        funct7: InstructionBits::funct7(&inst),
        imm,
    }
}

/// Integer ALU operation selected by the decode table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AluOp {
    #[default]
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
}

impl AluOp {
    /// Whether this op routes through the multiplier/divider unit rather than
    /// the single-cycle ALU.
    #[must_use]
    pub const fn is_mul(self) -> bool {
        matches!(self, Self::Mul | Self::Mulh | Self::Mulhsu | Self::Mulhu)
    }

    /// Whether this op routes through the divider unit.
    #[must_use]
    pub const fn is_div(self) -> bool {
        matches!(self, Self::Div | Self::Divu | Self::Rem | Self::Remu)
    }
}

/// Source selection for one ALU operand, mirroring the original's
/// `OperantFrom` enum (`RS1`/`RS2`/`IMM`/`PC`/`LITERAL_FOUR`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OperandSource {
    #[default]
    Rs1,
    Rs2,
    Imm,
    Pc,
    /// The literal constant 4, used to compute `pc + 4` link values for JAL/JALR.
    Four,
    /// The literal constant 0, used by LUI (`result = 0 + imm`).
    Zero,
}

/// Branch comparison kind, resolved against `rs1`/`rs2` values at execute time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    Eq,
    Ne,
    Lt,
    Ge,
    Ltu,
    Geu,
}

/// Load/store access width, ordered to match the original's `MemoryOpType`
/// (`BYTE=0, HALF=1, WORD=2, BYTE_U=3, HALF_U=4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MemWidth {
    #[default]
    Byte,
    Half,
    Word,
    ByteUnsigned,
    HalfUnsigned,
}

/// Fully decoded instruction, ready for rename. All fields are meaningful only
/// for instruction classes that use them (e.g. `branch_cond` is `None` unless
/// `is_branch`).
#[derive(Clone, Debug)]
pub struct InstructionArgs {
    /// Raw encoding, retained for commit-log tracing.
    pub raw: u32,
    /// Destination architectural register, if any.
    pub rd: usize,
    /// Whether this instruction writes a destination register.
    pub has_rd: bool,
    /// First source architectural register.
    pub rs1: usize,
    /// Whether `rs1` is actually read by this instruction.
    pub rs1_needed: bool,
    /// Second source architectural register.
    pub rs2: usize,
    /// Whether `rs2` is actually read by this instruction.
    pub rs2_needed: bool,
    /// Sign-extended immediate.
    pub imm: i32,
    /// ALU/mul-div operation.
    pub alu_op: AluOp,
    /// Source for ALU operand 1.
    pub operand1_from: OperandSource,
    /// Source for ALU operand 2.
    pub operand2_from: OperandSource,
    /// Is a conditional branch.
    pub is_branch: bool,
    /// Branch comparison kind, set iff `is_branch`.
    pub branch_cond: Option<BranchCond>,
    /// Is `JAL`.
    pub is_jal: bool,
    /// Is `JALR`.
    pub is_jalr: bool,
    /// Is a load.
    pub is_load: bool,
    /// Is a store.
    pub is_store: bool,
    /// Memory access width, meaningful iff `is_load || is_store`.
    pub mem_width: MemWidth,
    /// Terminates simulation once it commits (`EBREAK`).
    pub is_terminator: bool,
}

impl InstructionArgs {
    /// An all-NOP instruction: no register writes, no side effects. Used for
    /// encodings this decoder does not recognize — there is no illegal
    /// instruction trap path in this design.
    #[must_use]
    pub fn nop(raw: u32) -> Self {
        Self {
            raw,
            rd: 0,
            has_rd: false,
            rs1: 0,
            rs1_needed: false,
            rs2: 0,
            rs2_needed: false,
            imm: 0,
            alu_op: AluOp::Add,
            operand1_from: OperandSource::Zero,
            operand2_from: OperandSource::Zero,
            is_branch: false,
            branch_cond: None,
            is_jal: false,
            is_jalr: false,
            is_load: false,
            is_store: false,
            mem_width: MemWidth::Word,
            is_terminator: false,
        }
    }
}

/// Decodes a raw instruction word into [`InstructionArgs`].
#[must_use]
pub fn decode(inst: u32) -> InstructionArgs {
    if inst == EBREAK_ENCODING {
        let mut args = InstructionArgs::nop(inst);
        args.is_terminator = true;
        return args;
    }

    let d = decode_fields(inst);
    let imm = d.imm as i32;

    match d.opcode {
        opcodes::OP_REG if d.funct7 == mopcodes::M_EXTENSION => decode_m_ext(d),
        opcodes::OP_REG => decode_r_type(d),
        opcodes::OP_IMM => decode_i_type_alu(d, imm),
        opcodes::OP_LOAD => decode_load(d, imm),
        opcodes::OP_STORE => decode_store(d, imm),
        opcodes::OP_BRANCH => decode_branch(d, imm),
        opcodes::OP_JAL => decode_jal(d, imm),
        opcodes::OP_JALR => decode_jalr(d, imm),
        opcodes::OP_LUI => decode_lui(d, imm),
        opcodes::OP_AUIPC => decode_auipc(d, imm),
        _ => InstructionArgs::nop(inst),
    }
}

fn decode_r_type(d: Decoded) -> InstructionArgs {
    let alu_op = match (d.funct3, d.funct7) {
        (funct3::ADD_SUB, funct7::DEFAULT) => AluOp::Add,
        (funct3::ADD_SUB, funct7::SUB) => AluOp::Sub,
        (funct3::SLL, _) => AluOp::Sll,
        (funct3::SLT, _) => AluOp::Slt,
        (funct3::SLTU, _) => AluOp::Sltu,
        (funct3::XOR, _) => AluOp::Xor,
        (funct3::SRL_SRA, funct7::SRA) => AluOp::Sra,
        (funct3::SRL_SRA, _) => AluOp::Srl,
        (funct3::OR, _) => AluOp::Or,
        (funct3::AND, _) => AluOp::And,
        _ => AluOp::Add,
    };
    InstructionArgs {
        raw: d.raw,
        rd: d.rd,
        has_rd: true,
        rs1: d.rs1,
        rs1_needed: true,
        rs2: d.rs2,
        rs2_needed: true,
        imm: 0,
        alu_op,
        operand1_from: OperandSource::Rs1,
        operand2_from: OperandSource::Rs2,
        is_branch: false,
        branch_cond: None,
        is_jal: false,
        is_jalr: false,
        is_load: false,
        is_store: false,
        mem_width: MemWidth::Word,
        is_terminator: false,
    }
}

fn decode_m_ext(d: Decoded) -> InstructionArgs {
    let alu_op = match d.funct3 {
        mfunct3::MUL => AluOp::Mul,
        mfunct3::MULH => AluOp::Mulh,
        mfunct3::MULHSU => AluOp::Mulhsu,
        mfunct3::MULHU => AluOp::Mulhu,
        mfunct3::DIV => AluOp::Div,
        mfunct3::DIVU => AluOp::Divu,
        mfunct3::REM => AluOp::Rem,
        _ => AluOp::Remu,
    };
    InstructionArgs {
        alu_op,
        ..decode_r_type(d)
    }
}

fn decode_i_type_alu(d: Decoded, imm: i32) -> InstructionArgs {
    let alu_op = match d.funct3 {
        funct3::ADD_SUB => AluOp::Add,
        funct3::SLL => AluOp::Sll,
        funct3::SLT => AluOp::Slt,
        funct3::SLTU => AluOp::Sltu,
        funct3::XOR => AluOp::Xor,
        funct3::SRL_SRA if d.funct7 == funct7::SRA => AluOp::Sra,
        funct3::SRL_SRA => AluOp::Srl,
        funct3::OR => AluOp::Or,
        _ => AluOp::And,
    };
    InstructionArgs {
        raw: d.raw,
        rd: d.rd,
        has_rd: true,
        rs1: d.rs1,
        rs1_needed: true,
        rs2: 0,
        rs2_needed: false,
        imm,
        alu_op,
        operand1_from: OperandSource::Rs1,
        operand2_from: OperandSource::Imm,
        is_branch: false,
        branch_cond: None,
        is_jal: false,
        is_jalr: false,
        is_load: false,
        is_store: false,
        mem_width: MemWidth::Word,
        is_terminator: false,
    }
}

fn decode_load(d: Decoded, imm: i32) -> InstructionArgs {
    let mem_width = match d.funct3 {
        funct3::LB => MemWidth::Byte,
        funct3::LH => MemWidth::Half,
        funct3::LW => MemWidth::Word,
        funct3::LBU => MemWidth::ByteUnsigned,
        _ => MemWidth::HalfUnsigned,
    };
    InstructionArgs {
        raw: d.raw,
        rd: d.rd,
        has_rd: true,
        rs1: d.rs1,
        rs1_needed: true,
        rs2: 0,
        rs2_needed: false,
        imm,
        alu_op: AluOp::Add,
        operand1_from: OperandSource::Rs1,
        operand2_from: OperandSource::Imm,
        is_branch: false,
        branch_cond: None,
        is_jal: false,
        is_jalr: false,
        is_load: true,
        is_store: false,
        mem_width,
        is_terminator: false,
    }
}

fn decode_store(d: Decoded, imm: i32) -> InstructionArgs {
    let mem_width = match d.funct3 {
        funct3::SB => MemWidth::Byte,
        funct3::SH => MemWidth::Half,
        _ => MemWidth::Word,
    };
    InstructionArgs {
        raw: d.raw,
        rd: 0,
        has_rd: false,
        rs1: d.rs1,
        rs1_needed: true,
        rs2: d.rs2,
        rs2_needed: true,
        imm,
        alu_op: AluOp::Add,
        operand1_from: OperandSource::Rs1,
        operand2_from: OperandSource::Imm,
        is_branch: false,
        branch_cond: None,
        is_jal: false,
        is_jalr: false,
        is_load: false,
        is_store: true,
        mem_width,
        is_terminator: false,
    }
}

fn decode_branch(d: Decoded, imm: i32) -> InstructionArgs {
    let cond = match d.funct3 {
        funct3::BEQ => BranchCond::Eq,
        funct3::BNE => BranchCond::Ne,
        funct3::BLT => BranchCond::Lt,
        funct3::BGE => BranchCond::Ge,
        funct3::BLTU => BranchCond::Ltu,
        _ => BranchCond::Geu,
    };
    InstructionArgs {
        raw: d.raw,
        rd: 0,
        has_rd: false,
        rs1: d.rs1,
        rs1_needed: true,
        rs2: d.rs2,
        rs2_needed: true,
        imm,
        alu_op: AluOp::Sub,
        operand1_from: OperandSource::Rs1,
        operand2_from: OperandSource::Rs2,
        is_branch: true,
        branch_cond: Some(cond),
        is_jal: false,
        is_jalr: false,
        is_load: false,
        is_store: false,
        mem_width: MemWidth::Word,
        is_terminator: false,
    }
}

fn decode_jal(d: Decoded, imm: i32) -> InstructionArgs {
    // Target (pc + imm) is already known at fetch time and carries no
    // register dependency; the scheduler computes both target and the
    // pc+4 link value directly from the Active List entry, so the ALU
    // operands here are unused placeholders that are trivially ready.
    InstructionArgs {
        raw: d.raw,
        rd: d.rd,
        has_rd: true,
        rs1: 0,
        rs1_needed: false,
        rs2: 0,
        rs2_needed: false,
        imm,
        alu_op: AluOp::Add,
        operand1_from: OperandSource::Zero,
        operand2_from: OperandSource::Zero,
        is_branch: false,
        branch_cond: None,
        is_jal: true,
        is_jalr: false,
        is_load: false,
        is_store: false,
        mem_width: MemWidth::Word,
        is_terminator: false,
    }
}

fn decode_jalr(d: Decoded, imm: i32) -> InstructionArgs {
    // ALU computes the jump target (rs1 + imm); the scheduler masks off
    // bit 0 and supplies the pc+4 link value separately.
    InstructionArgs {
        raw: d.raw,
        rd: d.rd,
        has_rd: true,
        rs1: d.rs1,
        rs1_needed: true,
        rs2: 0,
        rs2_needed: false,
        imm,
        alu_op: AluOp::Add,
        operand1_from: OperandSource::Rs1,
        operand2_from: OperandSource::Imm,
        is_branch: false,
        branch_cond: None,
        is_jal: false,
        is_jalr: true,
        is_load: false,
        is_store: false,
        mem_width: MemWidth::Word,
        is_terminator: false,
    }
}

fn decode_lui(d: Decoded, imm: i32) -> InstructionArgs {
    InstructionArgs {
        raw: d.raw,
        rd: d.rd,
        has_rd: true,
        rs1: 0,
        rs1_needed: false,
        rs2: 0,
        rs2_needed: false,
        imm,
        alu_op: AluOp::Add,
        operand1_from: OperandSource::Zero,
        operand2_from: OperandSource::Imm,
        is_branch: false,
        branch_cond: None,
        is_jal: false,
        is_jalr: false,
        is_load: false,
        is_store: false,
        mem_width: MemWidth::Word,
        is_terminator: false,
    }
}

fn decode_auipc(d: Decoded, imm: i32) -> InstructionArgs {
    InstructionArgs {
        raw: d.raw,
        rd: d.rd,
        has_rd: true,
        rs1: 0,
        rs1_needed: false,
        rs2: 0,
        rs2_needed: false,
        imm,
        alu_op: AluOp::Add,
        operand1_from: OperandSource::Pc,
        operand2_from: OperandSource::Imm,
        is_branch: false,
        branch_cond: None,
        is_jal: false,
        is_jalr: false,
        is_load: false,
        is_store: false,
        mem_width: MemWidth::Word,
        is_terminator: false,
    }
}
