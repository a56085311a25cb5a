//! student-registry - In-Memory Academic Records Registry
//!
//! Keeps student records under two orderings, indexes course grades for
//! threshold queries, and ranks record collections with a multi-threaded
//! chunk-sort-then-merge.
//!
//! # Features
//!
//! - **Dual Ordering**: Arrival order and natural roll-number order, both
//!   current as soon as an insert returns.
//!
//! - **Natural Order**: `2020CS9` sorts before `2020CS10`; digit runs compare
//!   by magnitude, not character by character.
//!
//! - **Grade Index**: Course -> grade -> records, so "at least 9.0 in OOPD"
//!   is a range scan.
//!
//! - **Parallel Ranker**: N worker threads each sort one chunk, then a single
//!   thread merges. Per-worker timings are reported for benchmarking.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────────────────────┐
//! │  CSV file        │ loader │            Registry              │
//! │  name,id,branch, ├───────►│  Mutex ─┬─ insertion order       │
//! │  year,courses    │        │         ├─ ranked order          │
//! └──────────────────┘        │         └─ grade index           │
//!          │                  └──────────────────────────────────┘
//!          │ records
//!          ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │ ParallelRanker: partition → N sort workers → join → merge    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Create a 3000-record sample file
//! student-registry generate
//!
//! # Benchmark the parallel sort with 4 workers
//! student-registry rank -w 4
//!
//! # Who scored at least 9.0 in OOPD?
//! student-registry query --course OOPD --min-grade 9.0
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod natural;
pub mod progress;
pub mod ranker;
pub mod record;
pub mod registry;

pub use config::{CliArgs, Command, CourseType, RunConfig};
pub use error::{RankError, RegistryError, Result};
pub use natural::{natural_cmp, NaturalKey};
pub use ranker::{is_ranked, rank, ParallelRanker, RankReport};
pub use record::Record;
pub use registry::{OrderView, Registry};
