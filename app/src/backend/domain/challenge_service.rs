//! Arithmetic human-verification challenge.
//!
//! A challenge is single-use: after a failed answer the caller must discard it
//! and generate a fresh one, so a guessed answer cannot simply be resubmitted.

use log::debug;
use rand::Rng;
use std::sync::Arc;

use crate::backend::domain::models::challenge::{Challenge, OPERAND_MAX, OPERAND_MIN};

/// Source of challenge operands in `OPERAND_MIN..=OPERAND_MAX`
pub trait OperandSource: Send + Sync {
    fn next_operand(&self) -> u8;
}

/// Uniform operands from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOperands;

impl OperandSource for RandomOperands {
    fn next_operand(&self) -> u8 {
        rand::thread_rng().gen_range(OPERAND_MIN..=OPERAND_MAX)
    }
}

#[derive(Clone)]
pub struct ChallengeService {
    operands: Arc<dyn OperandSource>,
}

impl ChallengeService {
    pub fn new(operands: Arc<dyn OperandSource>) -> Self {
        Self { operands }
    }

    /// Draw two independent operands and build a new challenge
    pub fn generate(&self) -> Challenge {
        let operand_a = self.draw();
        let operand_b = self.draw();
        debug!("Generated new verification challenge");
        Challenge::with_operands(operand_a, operand_b)
    }

    /// Exact integer comparison of the visitor's answer against the expected sum
    pub fn verify(&self, answer: &str, challenge: &Challenge) -> bool {
        match answer.trim().parse::<i64>() {
            Ok(value) => value == i64::from(challenge.expected_sum),
            Err(_) => false,
        }
    }

    fn draw(&self) -> u8 {
        self.operands.next_operand().clamp(OPERAND_MIN, OPERAND_MAX)
    }
}

impl Default for ChallengeService {
    fn default() -> Self {
        Self::new(Arc::new(RandomOperands))
    }
}

#[cfg(test)]
pub mod test_support {
    use super::OperandSource;
    use std::sync::Mutex;

    /// Replays a fixed operand sequence, cycling when exhausted
    pub struct ScriptedOperands {
        values: Vec<u8>,
        position: Mutex<usize>,
    }

    impl ScriptedOperands {
        pub fn new(values: Vec<u8>) -> Self {
            Self {
                values,
                position: Mutex::new(0),
            }
        }
    }

    impl OperandSource for ScriptedOperands {
        fn next_operand(&self) -> u8 {
            let mut position = self.position.lock().unwrap();
            let value = self.values[*position % self.values.len()];
            *position += 1;
            value
        }
    }
}
