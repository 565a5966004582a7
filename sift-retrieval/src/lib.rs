//! # sift-retrieval
//!
//! The retriever unit. Sizes each search by intent, balances comparison
//! queries across the compared concepts, optionally rewrites the query, and
//! can hand the choice of search actions to a step-bounded model planner.
//! Also ships [`MemoryIndex`], an in-memory lexical document source.

pub mod comparison;
pub mod index;
pub mod optimizer;
pub mod planner;
pub mod rank;
pub mod retriever;

pub use index::MemoryIndex;
pub use optimizer::QueryOptimizer;
pub use planner::{Capability, RetrievalPlanner};
pub use retriever::Retriever;
