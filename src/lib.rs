//! # haml-jinja
//!
//! Compiles haml-style, indentation-based markup into Jinja template text.
//!
//! ```text
//! -extends "base.html"
//!
//! -block content
//!   %ul.list#users
//!     -for user in users
//!       %li
//!         %a(href="#{user.url}") #{user.username}
//!     -else
//!       %li No users
//! ```
//!
//! Compilation runs in three stages:
//!
//!     normalize   merge `\` continuations, blank `;` comments, rewrite `#{x}`
//!     builder     classify each line into a node and nest by indentation
//!     render      emit opening/closing lines, resolving if/elif/else chains
//!
//! The compiler only emits Jinja syntax; it never evaluates it.

pub mod ast;
pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod render;
pub mod renderer;
pub mod snapshot;

pub use config::{HamlConfig, Loader, RenderOptions};
pub use error::{LineError, TemplateError};
pub use renderer::{compile, compile_with, compile_with_config, Renderer};
