//! Concrete end-to-end programs, hand-assembled and run to a terminator.
//!
//! Each program's expected `x10` is checked against the terminator commit's
//! value, matching what a reference in-order simulator executing the same
//! stream would retire.

use crate::common::builder::InstructionBuilder;
use crate::common::harness::run_program;
use r10k_core::RunOutcome;

fn expect_x10(outcome: RunOutcome, expected: u32) {
    match outcome {
        RunOutcome::Completed { x10, .. } => assert_eq!(x10, expected, "x10 = {x10:#x}"),
        RunOutcome::Timeout => panic!("program timed out before reaching EBREAK"),
    }
}

/// `x10 <- sum(1..=100)`.
#[test]
fn sum100() {
    let b = InstructionBuilder::new;
    let imem = vec![
        b().addi(5, 0, 0).build(),   // sum = 0
        b().addi(6, 0, 1).build(),   // i = 1
        b().addi(7, 0, 101).build(), // limit = 101
        b().add(5, 5, 6).build(),    // loop: sum += i
        b().addi(6, 6, 1).build(),   // i += 1
        b().bne(6, 7, -8).build(),   // i != limit -> loop
        b().addi(10, 5, 0).build(),  // x10 = sum
        InstructionBuilder::ebreak(),
    ];
    let result = run_program(imem, vec![]);
    expect_x10(result.outcome, 5050);
}

/// `x10 <- fib(10)` via the standard iterative two-register recurrence.
#[test]
fn fibonacci() {
    let b = InstructionBuilder::new;
    let imem = vec![
        b().addi(5, 0, 0).build(),    // a = 0
        b().addi(6, 0, 1).build(),    // b = 1
        b().addi(7, 0, 10).build(),   // counter = 10
        b().add(28, 5, 6).build(),    // loop: tmp = a + b
        b().addi(5, 6, 0).build(),    // a = b
        b().addi(6, 28, 0).build(),   // b = tmp
        b().addi(7, 7, -1).build(),   // counter -= 1
        b().bne(7, 0, -16).build(),   // counter != 0 -> loop
        b().addi(10, 5, 0).build(),   // x10 = a
        InstructionBuilder::ebreak(),
    ];
    let result = run_program(imem, vec![]);
    expect_x10(result.outcome, 55);
}

/// `x10 <- sum of element-wise a[i] + b[i]` over a 4-element pair of vectors,
/// interleaved in data memory as `[a0,b0,a1,b1,a2,b2,a3,b3]`.
#[test]
fn vector_add() {
    let b = InstructionBuilder::new;
    let imem = vec![
        b().lw(11, 0, 0).build(),
        b().lw(12, 0, 4).build(),
        b().add(13, 11, 12).build(), // 1 + 10 = 11
        b().lw(11, 0, 8).build(),
        b().lw(12, 0, 12).build(),
        b().add(14, 11, 12).build(), // 2 + 20 = 22
        b().lw(11, 0, 16).build(),
        b().lw(12, 0, 20).build(),
        b().add(15, 11, 12).build(), // 3 + 30 = 33
        b().lw(11, 0, 24).build(),
        b().lw(12, 0, 28).build(),
        b().add(16, 11, 12).build(), // 4 + 40 = 44
        b().add(10, 13, 14).build(),
        b().add(10, 10, 15).build(),
        b().add(10, 10, 16).build(),
        InstructionBuilder::ebreak(),
    ];
    let dmem = vec![1, 10, 2, 20, 3, 30, 4, 40];
    let result = run_program(imem, dmem);
    expect_x10(result.outcome, 110);
}

/// One compare-and-swap block of a straight-line (fully unrolled) bubble
/// sort pass over the pair at byte addresses `(addr, addr + 4)`.
///
/// Layout is self-relative so the same 6-word template works at any `addr`:
/// `blt` skips to the swap (+2 words) when `b < a`; the intervening `jal`
/// skips over the swap (+3 words) when no swap is needed.
fn compare_and_swap(addr: i32) -> Vec<u32> {
    let b = InstructionBuilder::new;
    vec![
        b().lw(11, 0, addr).build(),
        b().lw(12, 0, addr + 4).build(),
        b().blt(12, 11, 8).build(),
        b().jal(0, 12).build(),
        b().sw(0, 12, addr).build(),
        b().sw(0, 11, addr + 4).build(),
    ]
}

/// Returns the last (maximum) element of a 4-element array after an
/// unrolled bubble sort: 3 passes of 3 adjacent compare-and-swaps, which is
/// strictly more passes than the `n - 1` bubble sort needs and so always
/// leaves the array fully sorted regardless of the starting permutation.
#[test]
fn bubble_sort() {
    let mut imem = Vec::new();
    for _ in 0..3 {
        for addr in [0, 4, 8] {
            imem.extend(compare_and_swap(addr));
        }
    }
    imem.push(InstructionBuilder::new().lw(10, 0, 12).build());
    imem.push(InstructionBuilder::ebreak());

    let dmem = vec![40, 10, 30, 20];
    let result = run_program(imem, dmem);
    expect_x10(result.outcome, 40);
}

/// Exercises MUL/MULH/MULHSU/MULHU on operands `a = -2`, `b = -1` (as a
/// `u32` bit pattern, `b` is also `u32::MAX`, giving MULHSU and MULHU each a
/// distinct high-word result from MULH). `x10` accumulates all four.
#[test]
fn test_mul() {
    let b = InstructionBuilder::new;
    let imem = vec![
        b().addi(5, 0, -2).build(),
        b().addi(6, 0, -1).build(),
        b().mul(7, 5, 6).build(),
        b().mulh(28, 5, 6).build(),
        b().mulhsu(29, 5, 6).build(),
        b().mulhu(30, 5, 6).build(),
        b().add(10, 7, 28).build(),
        b().add(10, 10, 29).build(),
        b().add(10, 10, 30).build(),
        InstructionBuilder::ebreak(),
    ];
    let result = run_program(imem, vec![]);
    // mul=2, mulh=0, mulhsu=0xFFFF_FFFE, mulhu=0xFFFF_FFFD; summed mod 2^32.
    expect_x10(result.outcome, 0xFFFF_FFFD);
}

/// `INT_MIN / -1` (the signed-overflow special case) and `x / 0` (the
/// divide-by-zero special case), checked via the full architectural register
/// file rather than `x10` since both cases need independent verification.
#[test]
fn test_div() {
    let b = InstructionBuilder::new;
    let imem = vec![
        b().lui(5, 0x8_0000).build(), // x5 = INT_MIN (0x8000_0000)
        b().addi(6, 0, -1).build(),   // x6 = -1
        b().div(7, 5, 6).build(),     // overflow: quotient = dividend
        b().rem(28, 5, 6).build(),    // overflow: remainder = 0
        b().addi(8, 0, 12345).build(),
        b().addi(9, 0, 0).build(),
        b().div(29, 8, 9).build(), // divide by zero: quotient = -1
        b().rem(30, 8, 9).build(), // divide by zero: remainder = dividend
        b().addi(10, 0, 0).build(),
        InstructionBuilder::ebreak(),
    ];
    let result = run_program(imem, vec![]);
    assert!(matches!(result.outcome, RunOutcome::Completed { .. }));
    assert_eq!(result.regs[7], 0x8000_0000, "INT_MIN / -1 quotient");
    assert_eq!(result.regs[28], 0, "INT_MIN / -1 remainder");
    assert_eq!(result.regs[29], 0xFFFF_FFFF, "x / 0 quotient");
    assert_eq!(result.regs[30], 12345, "x / 0 remainder");
}
