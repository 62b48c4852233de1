//! Import path engine for rehome
//!
//! Rewrites module-import references so that every reference to a relocated
//! module resolves to the module's canonical folder, whether the reference is
//! written relative to the importing file or through the root alias. Also
//! repairs import literals left without a closing quote.
//!
//! # Modules
//!
//! - [`registry`] - module name → canonical folder lookup
//! - [`lexer`] - `from "<path>"` clause extraction
//! - [`clause`] - clause classification (style, module name)
//! - [`resolver`] - canonical path text computation
//! - [`quote_repair`] - closing-quote repair
//! - [`rewriter`] - the two-pass engine and the audit mode
//!
//! # Example
//!
//! ```rust
//! use rehome_core::{ImportRewriter, ModuleRegistry};
//! use rehome_foundation::{Layout, ModuleRecord};
//! use std::path::Path;
//!
//! let registry = ModuleRegistry::from_records([ModuleRecord::new("Button", "common")]).unwrap();
//! let rewriter = ImportRewriter::new(registry, Layout::default());
//!
//! let (text, changed) = rewriter
//!     .rewrite("import Button from \"../../components/Button\";\n", Path::new("src/routes/auth"))
//!     .into_parts();
//! assert!(changed);
//! assert_eq!(text, "import Button from \"../../components/common/Button\";\n");
//! ```
//!
//! Everything in this crate is synchronous and free of I/O; one
//! [`ImportRewriter`] can be shared across threads and files.

pub mod clause;
pub mod lexer;
pub mod paths;
pub mod quote_repair;
pub mod registry;
pub mod resolver;
pub mod rewriter;

pub use clause::ImportClause;
pub use quote_repair::{QuoteRepairer, RepairOutcome};
pub use registry::ModuleRegistry;
pub use resolver::PathResolver;
pub use rewriter::{ImportRewriter, RewriteOutcome};
