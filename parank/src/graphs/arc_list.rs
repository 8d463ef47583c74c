/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Whitespace-separated arc-list input.
//!
//! The format is a token stream: first the number of nodes and the number of
//! arcs, then that many source/target pairs. Any whitespace (spaces,
//! newlines, tabs) separates tokens, and tokens beyond the declared number of
//! pairs are ignored.
//!
//! The parser checks the *format* only: endpoint range checking is performed
//! by the graph builders, which reject the whole list on the first
//! out-of-range arc.

use std::io::BufRead;
use std::path::Path;
use thiserror::Error;

/// Errors arising while parsing an arc list.
#[derive(Error, Debug)]
pub enum ArcListError {
    /// The header (node count and arc count) is missing or malformed.
    #[error("malformed header: expected node and arc counts")]
    InvalidHeader,
    /// The stream ended before the declared number of arcs was read.
    #[error("truncated arc list: expected {expected} arcs, found {found}")]
    Truncated { expected: usize, found: usize },
    /// A token could not be parsed as a node identifier.
    #[error("cannot parse {value:?} as a node identifier")]
    InvalidValue { value: String },
    /// An I/O error while reading the stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// An arc list read from a file or stream: a node count and a sequence of
/// (source, target) pairs, in input order and with duplicates preserved.
#[derive(Debug, Clone)]
pub struct ArcList {
    /// The number of nodes declared by the header.
    pub num_nodes: usize,
    /// The arcs, exactly as many as the header declared.
    pub arcs: Vec<(usize, usize)>,
}

impl ArcList {
    /// Reads an arc list from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArcListError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Reads an arc list from a buffered reader.
    pub fn from_reader(mut reader: impl BufRead) -> Result<Self, ArcListError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let mut tokens = contents.split_whitespace();
        let num_nodes = tokens
            .next()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or(ArcListError::InvalidHeader)?;
        let num_arcs = tokens
            .next()
            .and_then(|t| t.parse::<usize>().ok())
            .ok_or(ArcListError::InvalidHeader)?;

        let mut parse = |found: usize| -> Result<usize, ArcListError> {
            let token = tokens.next().ok_or(ArcListError::Truncated {
                expected: num_arcs,
                found,
            })?;
            token.parse::<usize>().map_err(|_| ArcListError::InvalidValue {
                value: token.into(),
            })
        };

        let mut arcs = Vec::with_capacity(num_arcs);
        for found in 0..num_arcs {
            let src = parse(found)?;
            let dst = parse(found)?;
            arcs.push((src, dst));
        }

        log::debug!("Read {} arcs over {} nodes", arcs.len(), num_nodes);
        Ok(Self { num_nodes, arcs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_basic() {
        let list = ArcList::from_reader("3 3\n0 1\n1 2\n2 0\n".as_bytes()).unwrap();
        assert_eq!(list.num_nodes, 3);
        assert_eq!(list.arcs, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_arbitrary_whitespace_and_trailing_tokens() {
        // Pairs may be split across lines; tokens past the declared count
        // are ignored, as in the original format.
        let list = ArcList::from_reader("2 1   0\n\t1  junk 99".as_bytes()).unwrap();
        assert_eq!(list.num_nodes, 2);
        assert_eq!(list.arcs, vec![(0, 1)]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let list = ArcList::from_reader("3 3\n0 1\n0 1\n0 2\n".as_bytes()).unwrap();
        assert_eq!(list.arcs, vec![(0, 1), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            ArcList::from_reader("".as_bytes()),
            Err(ArcListError::InvalidHeader)
        ));
        assert!(matches!(
            ArcList::from_reader("5".as_bytes()),
            Err(ArcListError::InvalidHeader)
        ));
        assert!(matches!(
            ArcList::from_reader("five 3".as_bytes()),
            Err(ArcListError::InvalidHeader)
        ));
    }

    #[test]
    fn test_truncated() {
        match ArcList::from_reader("4 3\n0 1\n1 2".as_bytes()) {
            Err(ArcListError::Truncated { expected, found }) => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            r => panic!("expected truncation error, got {r:?}"),
        }
    }

    #[test]
    fn test_negative_id_rejected() {
        assert!(matches!(
            ArcList::from_reader("4 1\n0 -1".as_bytes()),
            Err(ArcListError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "2 2\n0 1\n1 0\n").unwrap();
        let list = ArcList::from_path(file.path()).unwrap();
        assert_eq!(list.num_nodes, 2);
        assert_eq!(list.arcs.len(), 2);
    }
}
