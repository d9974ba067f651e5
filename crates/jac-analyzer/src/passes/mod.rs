//! The five semantic passes that run, in order, over every module: building
//! a sub-node index, resolving imports, building the symbol table, matching
//! forward declarations to their out-of-line bodies, and binding every name
//! use back to its declaration.

mod common;
mod decl_def_match;
mod def_use;
mod import;
mod sub_node_table;
mod symbol_table_build;

pub use decl_def_match::DeclDefMatchPass;
pub use def_use::DefUsePass;
pub use import::ImportPass;
pub use sub_node_table::SubNodeTablePass;
pub use symbol_table_build::SymbolTableBuildPass;
