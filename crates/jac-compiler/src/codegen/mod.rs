//! The Python code generator: lowers an analyzed Jac AST to target-language
//! source text, one [`jac_ast::meta::Meta::py_code`] at a time.

pub mod ops;
pub mod py_ast_gen;

pub use py_ast_gen::PyAstGenPass;
