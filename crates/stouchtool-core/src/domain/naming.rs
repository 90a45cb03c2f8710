//! Output file naming rules.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::PortCount;

/// Longest contiguous substring shared by `a` and `b`.
///
/// Ties go to the match starting earliest in `a`, then earliest in `b`.
/// Returns an empty string when the inputs share no character.
pub fn longest_common_substring(a: &str, b: &str) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let (mut best_len, mut best_end) = (0, 0);

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            curr[j] = if a[i - 1] == b[j - 1] { prev[j - 1] + 1 } else { 0 };
            if curr[j] > best_len {
                best_len = curr[j];
                best_end = i;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    a[best_end - best_len..best_end].iter().collect()
}

/// Default output for a concatenation: the longest common substring of the
/// first two input names followed by `.s{N}p`.
pub fn cat_output_name(first: &Path, second: &Path, ports: PortCount) -> PathBuf {
    let common = longest_common_substring(&first.to_string_lossy(), &second.to_string_lossy());
    PathBuf::from(format!("{common}.s{}p", ports.get()))
}

/// Default plot output: the input path with its extension replaced by `pdf`.
pub fn plot_output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

/// Default plot title: the input's base name without extension.
pub fn plot_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
