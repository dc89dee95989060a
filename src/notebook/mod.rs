//! Binding a connection into an interactive session.
//!
//! The session is always passed in explicitly as a [`Shell`]; there is no ambient lookup.

pub mod binding;
pub mod shell;
pub mod sql_magic;

pub use binding::{bind_connection, connect_and_bind, connect_and_bind_with, register_extension};
pub use shell::{Extension, InteractiveShell, Shell};
pub use sql_magic::SqlMagic;
