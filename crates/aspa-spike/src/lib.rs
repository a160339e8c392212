//! aspa-spike - Spike train data layer
//!
//! This crate turns recordings into the samples analyzed by `aspa-gof`:
//!
//! - **Raw input**: plain-text spike timestamps and numeric columns
//! - **Trials**: segmentation by inter-trial interval, aggregation
//! - **Intervals**: inter-spike intervals with trial of origin and rank
//! - **Summaries**: five-number summary, CV, lagged Spearman correlation
//! - **Histograms**: linear or log bins, Rudemo bin-count selection
//! - **Time rescaling**: intervals to presumed-uniform values

pub mod config;
pub mod error;
pub mod histogram;
pub mod isi;
pub mod raw;
pub mod summary;
pub mod trains;
pub mod transform;

pub use config::*;
pub use error::*;
pub use histogram::*;
pub use isi::*;
pub use raw::*;
pub use summary::*;
pub use trains::*;
pub use transform::*;
