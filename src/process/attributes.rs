/*!
 * Attribute Sources
 * Where new processes get their burst time, memory footprint and priority
 */

use super::types::Attributes;
use crate::core::errors::ProcessError;
use crate::core::types::{Priority, BURST_RANGE, MEMORY_RANGE, PRIORITY_RANGE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies attributes for each process the factory creates
pub trait AttributeSource: Send {
    fn next_attributes(&mut self) -> Attributes;
}

/// Uniformly distributed attributes over the fixed ranges
pub struct RandomAttributes {
    rng: StdRng,
}

impl RandomAttributes {
    /// Entropy-seeded source
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAttributes {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeSource for RandomAttributes {
    fn next_attributes(&mut self) -> Attributes {
        Attributes::in_range(
            self.rng.gen_range(BURST_RANGE),
            self.rng.gen_range(MEMORY_RANGE),
            self.rng.gen_range(PRIORITY_RANGE),
        )
    }
}

/// Replays a fixed list of attributes, wrapping around when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedAttributes {
    script: Vec<Attributes>,
    cursor: usize,
}

impl ScriptedAttributes {
    pub fn new(script: Vec<Attributes>) -> Result<Self, ProcessError> {
        if script.is_empty() {
            return Err(ProcessError::EmptyScript);
        }
        Ok(Self { script, cursor: 0 })
    }

    /// Script from priorities alone, with the given burst and a memory footprint of 1
    pub fn from_priorities(priorities: &[Priority], burst_time: u8) -> Result<Self, ProcessError> {
        let script = priorities
            .iter()
            .map(|&priority| Attributes::new(burst_time, 1, priority))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(script)
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl AttributeSource for ScriptedAttributes {
    fn next_attributes(&mut self) -> Attributes {
        let attrs = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_attributes_in_range() {
        let mut source = RandomAttributes::seeded(7);
        for _ in 0..1_000 {
            let attrs = source.next_attributes();
            assert!(BURST_RANGE.contains(&attrs.burst_time()));
            assert!(MEMORY_RANGE.contains(&attrs.memory_footprint()));
            assert!(PRIORITY_RANGE.contains(&attrs.priority()));
        }
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = RandomAttributes::seeded(42);
        let mut b = RandomAttributes::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.next_attributes(), b.next_attributes());
        }
    }

    #[test]
    fn test_script_wraps_around() {
        let mut source = ScriptedAttributes::from_priorities(&[1, 5, 3], 2).unwrap();
        let priorities: Vec<_> = (0..5).map(|_| source.next_attributes().priority()).collect();
        assert_eq!(priorities, vec![1, 5, 3, 1, 5]);
    }

    #[test]
    fn test_script_rejects_invalid() {
        assert_eq!(
            ScriptedAttributes::new(Vec::new()).unwrap_err(),
            ProcessError::EmptyScript
        );
        assert!(ScriptedAttributes::from_priorities(&[1, 9], 1).is_err());
    }
}
