/// Content-addressable matching engine
///
/// This module handles:
/// - Digesting decoded pixel buffers (digest.rs)
/// - Building the digest -> fine-label reference index (index.rs)
/// - Classifying test images against the frozen index (classify.rs)

pub mod classify;
pub mod digest;
pub mod index;
