//! # Search Configuration
//!
//! Serializable description of a frontier search, as read by tooling.
//!
//! ```toml
//! direction = "both"
//! max_visits = 100
//!
//! [frontier]
//! kind = "random"
//! seed = 7
//! ```
//!
//! Every field is optional; the default is an outgoing breadth-first search
//! without a visit budget.

use crate::buffer::{Buffer, QueueBuffer, RandomBuffer, StackBuffer};
use crate::{ArcwalkError, Direction, VertexId};
use serde::{Deserialize, Serialize};

/// Frontier strategy of a configured search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrontierKind {
    /// FIFO: breadth-first order.
    #[default]
    Queue,
    /// LIFO.
    Stack,
    /// Uniform random pick; seeded for reproducible runs.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl FrontierKind {
    /// A fresh, empty buffer of this kind.
    pub fn buffer<'a>(&self) -> Box<dyn Buffer<VertexId> + 'a> {
        match *self {
            Self::Queue => Box::new(QueueBuffer::new()),
            Self::Stack => Box::new(StackBuffer::new()),
            Self::Random { seed: Some(seed) } => Box::new(RandomBuffer::seeded(seed)),
            Self::Random { seed: None } => Box::new(RandomBuffer::new()),
        }
    }
}

/// Parameters of a configured frontier search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub direction: Direction,
    pub frontier: FrontierKind,
    /// Stop after this many vertices have been expanded.
    pub max_visits: Option<usize>,
}

impl SearchConfig {
    /// Reject values no search can honor.
    pub fn validate(&self) -> Result<(), ArcwalkError> {
        if self.max_visits == Some(0) {
            return Err(ArcwalkError::InvalidConfig(
                "max_visits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
