//! Two-slot heterogeneous value store for embedding in a dynamic host.
//!
//! An [`OddlyEven`] store holds two arbitrary host values in native memory.
//! Self-contained scalars (booleans, integers, floats, strings) are copied
//! inline; anything that lives in the host's managed heap is pinned through
//! a shared [`Registry`] and held by [`RefHandle`]. Dropping the store is the
//! host finalizer: it releases every pinned handle exactly once.
//!
//! ```text
//! OddlyEven<V>
//! ├── [TaggedValue; 2]   (addressed by index parity)
//! │   ├── None | Bool | Int | Float | String   (inline payload)
//! │   └── Indirect(RefHandle) ─────────┐
//! └── Registry<V> (shared, Arc<Mutex>) ◄┘
//!     └── HandleTable<V>  (slot + generation, free list)
//! ```
//!
//! The crate is host-agnostic: hosts describe their values through the
//! [`HostValue`] trait. `oddly-python` binds it to CPython.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod id;
pub mod iter;
pub mod registry;
pub mod store;
pub mod value;

pub use config::{RegistryConfig, StorageStrategy, StoreConfig};
pub use error::{ArgumentError, ConfigError, OddlyStatus};
pub use handle::RefHandle;
pub use id::StoreId;
pub use iter::{next_entry, next_key, IterTriple, IterVariant, StepFn, Steps};
pub use registry::{Registry, RegistryStats};
pub use store::{parse_index, slot_index, OddlyEven, SLOT_COUNT};
pub use value::{HostValue, HostView, Inline, TaggedValue, ValueKind};
