use serde::{Deserialize, Serialize};

/// Smallest and largest operand of the arithmetic challenge
pub const OPERAND_MIN: u8 = 1;
pub const OPERAND_MAX: u8 = 10;

/// A single-use "a + b = ?" human verification puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub operand_a: u8,
    pub operand_b: u8,
    pub expected_sum: u16,
}

impl Challenge {
    pub fn with_operands(operand_a: u8, operand_b: u8) -> Self {
        Self {
            operand_a,
            operand_b,
            expected_sum: u16::from(operand_a) + u16::from(operand_b),
        }
    }

    /// Question text shown next to the answer field
    pub fn question(&self) -> String {
        format!("{} + {} = ?", self.operand_a, self.operand_b)
    }
}
