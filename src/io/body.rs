use crate::error::{PostError, PostResult};
use crate::geometry::Boundary;
use crate::io::{parse_columns, read_text};
use std::path::Path;
use tracing::{debug, warn};

/// Read an immersed-boundary file: a header line with the point count,
/// then one `x y` pair per line.
pub fn read_body(path: &Path) -> PostResult<Boundary> {
    let contents = read_text(path)?;
    parse_body(path, &contents)
}

pub fn parse_body(path: &Path, contents: &str) -> PostResult<Boundary> {
    let mut lines = contents.lines().enumerate();
    let declared = lines
        .next()
        .and_then(|(_, header)| header.split_whitespace().next())
        .and_then(|tok| tok.parse::<usize>().ok());

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cols = parse_columns(path, idx + 1, line)?;
        if cols.len() < 2 {
            return Err(PostError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("expected at least 2 columns, found {}", cols.len()),
            });
        }
        x.push(cols[0]);
        y.push(cols[1]);
    }

    if let Some(n) = declared {
        if n != x.len() {
            warn!("{:?} declares {} points but holds {}", path, n, x.len());
        }
    }
    debug!("Loaded {} boundary points from {:?}", x.len(), path);

    Boundary::new(x, y)
}
