/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Chemical formula parser
//!
//! Grammar, informally:
//!
//! ```text
//! formula  := segment (separator segment)*
//! segment  := count? term*
//! term     := element count? | open term* close count?
//! element  := [A-Z][a-z]?
//! ```
//!
//! Counts multiply into the enclosing scope, so `Ca(OH)2` yields one Ca, two O
//! and two H. Hydrate separators (`.`, `·`, `•`, `*`) split the formula into
//! segments; a leading count on a segment multiplies that segment
//! (`CuSO4·5H2O`). Whitespace is ignored.

use super::database;
use super::errors::{FormulaError, Result};
use std::collections::BTreeMap;

/// Element symbol → number of atoms in the formula unit
pub type ElementCountMap = BTreeMap<String, u32>;

const SEPARATORS: [char; 4] = ['.', '\u{00B7}', '\u{2022}', '*'];

fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

fn closing_for(open: char) -> char {
    match open {
        '[' => ']',
        _ => ')',
    }
}

/// Parse a chemical formula into element counts
///
/// # Arguments
///
/// * `text` - Formula such as `"C6H6"`, `"Ca(OH)2"` or `"CuSO4·5H2O"`
///
/// # Returns
///
/// Element counts with every count positive, or a [`FormulaError`] for an
/// unknown symbol, an unmatched bracket, a stray character, or a formula that
/// names no element at all
pub fn parse_formula(text: &str) -> Result<ElementCountMap> {
    let mut parser = FormulaParser::new(text);
    let mut counts = parser.parse()?;
    counts.retain(|_, count| *count > 0);

    if counts.is_empty() {
        return Err(FormulaError::NoElements(text.to_string()));
    }
    Ok(counts)
}

/// Sum of `count × atomic weight` over all elements, in g/mol
pub fn compute_molecular_weight(counts: &ElementCountMap) -> Result<f64> {
    let mut total = 0.0;
    for (symbol, &count) in counts {
        let weight = database::atomic_weight(symbol)
            .ok_or_else(|| FormulaError::MissingWeight(symbol.clone()))?;
        total += count as f64 * weight;
    }

    if !total.is_finite() || total <= 0.0 {
        return Err(FormulaError::InvalidMolecularWeight(total));
    }
    Ok(total)
}

struct FormulaParser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse(&mut self) -> Result<ElementCountMap> {
        let mut total = ElementCountMap::new();
        loop {
            self.skip_whitespace();
            let multiplier = self.parse_count()?.unwrap_or(1);
            let segment = self.parse_sequence(None)?;
            self.merge_into(&mut total, &segment, multiplier)?;

            match self.peek() {
                Some(c) if is_separator(c) => self.pos += 1,
                _ => break,
            }
        }
        Ok(total)
    }

    /// Parse terms until the end of input, a top-level separator, or the
    /// bracket closing `group` (opening char and its position)
    fn parse_sequence(&mut self, group: Option<(char, usize)>) -> Result<ElementCountMap> {
        let mut counts = ElementCountMap::new();

        while let Some(c) = self.peek() {
            match c {
                c if c.is_whitespace() => self.pos += 1,
                'A'..='Z' => {
                    let position = self.pos;
                    let symbol = self.parse_symbol();
                    if !database::is_element(&symbol) {
                        return Err(FormulaError::UnknownElement { symbol, position });
                    }
                    let count = self.parse_count()?.unwrap_or(1);
                    self.add(&mut counts, &symbol, count)?;
                }
                '(' | '[' => {
                    let open_position = self.pos;
                    self.pos += 1;
                    let inner = self.parse_sequence(Some((c, open_position)))?;
                    let count = self.parse_count()?.unwrap_or(1);
                    self.merge_into(&mut counts, &inner, count)?;
                }
                ')' | ']' => {
                    return match group {
                        Some((open, _)) if closing_for(open) == c => {
                            self.pos += 1;
                            Ok(counts)
                        }
                        _ => Err(FormulaError::UnmatchedBracket {
                            bracket: c,
                            position: self.pos,
                        }),
                    };
                }
                c if is_separator(c) => {
                    if group.is_none() {
                        break;
                    }
                    self.pos += 1;
                }
                other => {
                    return Err(FormulaError::InvalidCharacter {
                        character: other,
                        position: self.pos,
                    })
                }
            }
        }

        match group {
            Some((open, position)) => Err(FormulaError::UnmatchedBracket {
                bracket: open,
                position,
            }),
            None => Ok(counts),
        }
    }

    fn parse_symbol(&mut self) -> String {
        let mut symbol = String::with_capacity(2);
        if let Some(first) = self.peek() {
            symbol.push(first);
            self.pos += 1;
        }
        if let Some(second) = self.peek().filter(char::is_ascii_lowercase) {
            symbol.push(second);
            self.pos += 1;
        }
        symbol
    }

    /// Digits (whitespace between them allowed) as a count, `None` if absent
    fn parse_count(&mut self) -> Result<Option<u32>> {
        let mut count: Option<u32> = None;
        loop {
            self.skip_whitespace();
            let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) else {
                break;
            };
            let next = count
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| FormulaError::CountOverflow(self.text.to_string()))?;
            count = Some(next);
            self.pos += 1;
        }
        Ok(count)
    }

    fn add(&self, counts: &mut ElementCountMap, symbol: &str, count: u32) -> Result<()> {
        let entry = counts.entry(symbol.to_string()).or_insert(0);
        *entry = entry
            .checked_add(count)
            .ok_or_else(|| FormulaError::CountOverflow(self.text.to_string()))?;
        Ok(())
    }

    fn merge_into(
        &self,
        target: &mut ElementCountMap,
        source: &ElementCountMap,
        multiplier: u32,
    ) -> Result<()> {
        for (symbol, &count) in source {
            let scaled = count
                .checked_mul(multiplier)
                .ok_or_else(|| FormulaError::CountOverflow(self.text.to_string()))?;
            self.add(target, symbol, scaled)?;
        }
        Ok(())
    }
}
