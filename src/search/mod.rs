//! Search, deduplication and the results handed to the outside

pub mod dedup;
pub mod problem;
pub mod solution;
pub mod solver;
pub mod validator;

pub use dedup::{are_equivalent, equivalence_classes, unique_solutions, EquivalenceClass};
pub use problem::PuzzleProblem;
pub use solution::{PlacedTile, Solution, SolveReport};
pub use solver::{SearchOutcome, SearchStatistics, Solver};
pub use validator::{EdgeViolation, SolutionValidator, ValidationResult};
