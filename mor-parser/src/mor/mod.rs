//! Main module for mor library functionality

pub mod ast;
pub mod building;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod masking;
pub mod parsing;
pub mod pipeline;
pub mod rules;
pub mod table;
pub mod testing;
