//! # storebench-core: Pure Logic for StoreBench
//!
//! The heart of the benchmark harness: entity types and the deterministic
//! dataset generator, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        StoreBench Data Flow                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ storebench-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌──────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │  generator  │  │  verify  │  │  error   │  │   │
//! │  │   │ 6 entities│  │ seeded RNG  │  │  counts  │  │ contract │  │   │
//! │  │   └───────────┘  └─────────────┘  └──────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └────────────────┬───────────────────────────┬────────────────────┘   │
//! │                   │                           │                         │
//! │                   ▼                           ▼                         │
//! │        storebench-pg (loader)      storebench-mongo (loader)           │
//! │                   │                           │                         │
//! │                   └───────► verification ◄────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity structs and enums shared by both stores
//! - [`generator`] - Deterministic seeded dataset generation
//! - [`battery`] - Query battery labels, timing stats, probe outcomes
//! - [`verify`] - Post-load cross-store count comparison
//! - [`error`] - Contract-violation errors
//!
//! ## Design Principles
//!
//! 1. **Reproducibility**: every generator function reseeds a fresh RNG from
//!    the fixed seed, so its output never depends on what ran before it
//! 2. **No I/O**: database, network and filesystem access are forbidden here
//! 3. **Exact decimals**: monetary fields are `Decimal`, rounded once at
//!    generation time with banker's rounding
//! 4. **Explicit errors**: malformed counts fail fast, typed, before any
//!    store is touched

pub mod battery;
pub mod error;
pub mod generator;
pub mod types;
pub mod verify;

pub use battery::{
    AtomicUpdateProbe, AvailabilityProbe, BenchQuery, ConstraintProbe, QueryTiming, RollbackProbe,
    WriteLatencyProbe,
};
pub use error::{CoreError, CoreResult};
pub use generator::{Dataset, DatasetCounts, DATASET_SEED};
pub use types::{
    Category, EntityCounts, EntityKind, LoadReport, Order, OrderItem, OrderStatus, PaymentMethod,
    PaymentStatus, Product, Review, TableLoad, User,
};
pub use verify::{VerificationEntry, VerificationReport};
