pub mod body;
pub mod probe;
pub mod reference;
pub mod table;

use crate::error::{PostError, PostResult};
use std::path::Path;

// Whitespace-separated numeric columns of one text line
pub(crate) fn parse_columns(path: &Path, line_no: usize, line: &str) -> PostResult<Vec<f64>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|e| PostError::Parse {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("invalid number {:?}: {}", tok, e),
            })
        })
        .collect()
}

pub(crate) fn read_text(path: &Path) -> PostResult<String> {
    std::fs::read_to_string(path).map_err(|source| PostError::Io {
        path: path.to_path_buf(),
        source,
    })
}
