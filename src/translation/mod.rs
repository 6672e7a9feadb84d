/*!
 * Translation pipelines built on top of the engine layer.
 *
 * This module contains the core functionality for translating text and
 * markup trees. It is split into several submodules:
 *
 * - `core`: Text translation pipeline and service definition
 * - `tree`: Batched, concurrent translation of parsed markup trees
 * - `cache`: Memoization of obtained translations
 * - `retry`: Bounded, jittered backoff policy
 */

// Re-export main types for easier usage
pub use self::cache::TranslationMemo;
pub use self::core::TranslationService;
pub use self::retry::BackoffPolicy;
pub use self::tree::TreeTranslator;

// Submodules
pub mod cache;
pub mod core;
pub mod retry;
pub mod tree;
