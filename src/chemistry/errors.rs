/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the chemistry module

use thiserror::Error;

/// Errors raised while parsing a chemical formula or weighing it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Unknown element symbol '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },

    #[error("Unmatched '{bracket}' at position {position}")]
    UnmatchedBracket { bracket: char, position: usize },

    #[error("Unexpected character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("No parsable element in formula '{0}'")]
    NoElements(String),

    #[error("Element count overflow in formula '{0}'")]
    CountOverflow(String),

    #[error("No atomic weight available for element '{0}'")]
    MissingWeight(String),

    #[error("Molecular weight must be finite and positive, got {0}")]
    InvalidMolecularWeight(f64),
}

/// Result type for chemistry operations
pub type Result<T> = std::result::Result<T, FormulaError>;
