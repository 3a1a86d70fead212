use crate::error::{PostError, PostResult};
use crate::io::{parse_columns, read_text};
use std::path::Path;
use tracing::debug;

// Published surface pressure profile: columns 0, 2 and 3 hold p, x and y
#[derive(Debug, Clone)]
pub struct ReferenceProfile {
    pub p: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

pub fn read_reference(path: &Path) -> PostResult<ReferenceProfile> {
    let contents = read_text(path)?;
    parse_reference(path, &contents)
}

pub fn parse_reference(path: &Path, contents: &str) -> PostResult<ReferenceProfile> {
    let mut profile = ReferenceProfile {
        p: Vec::new(),
        x: Vec::new(),
        y: Vec::new(),
    };

    for (idx, line) in contents.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default();
        if line.trim().is_empty() {
            continue;
        }
        let cols = parse_columns(path, idx + 1, line)?;
        if cols.len() < 4 {
            return Err(PostError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("expected at least 4 columns, found {}", cols.len()),
            });
        }
        profile.p.push(cols[0]);
        profile.x.push(cols[2]);
        profile.y.push(cols[3]);
    }

    debug!("Loaded {} reference points from {:?}", profile.p.len(), path);
    Ok(profile)
}
